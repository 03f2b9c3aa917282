//! Survey data model: categorical features, historical records, user profiles.
//!
//! Every enumeration parses totally: values outside the recognized set degrade
//! to an explicit fallback variant instead of failing deserialization. The
//! fallback variants are never offered as CLI choices.

use std::fmt;

use serde::{Deserialize, Deserializer, de};

/// Coarse age category derived from a raw age range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(from = "String")]
pub enum Generation {
    GenZ,
    Millennial,
    GenX,
    Boomer,
    /// Age range missing or unparseable.
    #[value(skip)]
    Unknown,
}

impl Generation {
    pub fn label(&self) -> &'static str {
        match self {
            Generation::GenZ => "Gen Z",
            Generation::Millennial => "Millennial",
            Generation::GenX => "Gen X",
            Generation::Boomer => "Boomer",
            Generation::Unknown => "Unknown",
        }
    }

    fn parse(s: &str) -> Self {
        match s.trim() {
            "Gen Z" => Generation::GenZ,
            "Millennial" => Generation::Millennial,
            "Gen X" => Generation::GenX,
            "Boomer" => Generation::Boomer,
            _ => Generation::Unknown,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(from = "String")]
pub enum Gender {
    Female,
    Male,
    /// Left blank in the survey.
    #[value(skip)]
    Unspecified,
}

impl Gender {
    pub fn label(&self) -> &'static str {
        match self {
            Gender::Female => "Female",
            Gender::Male => "Male",
            Gender::Unspecified => "Unspecified",
        }
    }

    fn parse(s: &str) -> Self {
        match s.trim() {
            "Female" => Gender::Female,
            "Male" => Gender::Male,
            _ => Gender::Unspecified,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(from = "String")]
pub enum EduLevel {
    Basic,
    Secondary,
    Higher,
    #[value(skip)]
    Unspecified,
}

impl EduLevel {
    pub fn label(&self) -> &'static str {
        match self {
            EduLevel::Basic => "Basic",
            EduLevel::Secondary => "Secondary",
            EduLevel::Higher => "Higher",
            EduLevel::Unspecified => "Unspecified",
        }
    }

    fn parse(s: &str) -> Self {
        match s.trim() {
            "Basic" => EduLevel::Basic,
            "Secondary" => EduLevel::Secondary,
            "Higher" => EduLevel::Higher,
            _ => EduLevel::Unspecified,
        }
    }
}

/// Favourite-animal preference. `Other` is a real survey answer (and a
/// decision-list trigger), distinct from the `Unspecified` fallback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(from = "String")]
pub enum FavAnimals {
    Dogs,
    Cats,
    DogsAndCats,
    NoFavorites,
    Other,
    #[value(skip)]
    Unspecified,
}

impl FavAnimals {
    pub fn label(&self) -> &'static str {
        match self {
            FavAnimals::Dogs => "Dogs",
            FavAnimals::Cats => "Cats",
            FavAnimals::DogsAndCats => "Dogs and cats",
            FavAnimals::NoFavorites => "No favorites",
            FavAnimals::Other => "Other",
            FavAnimals::Unspecified => "Unspecified",
        }
    }

    fn parse(s: &str) -> Self {
        match s.trim() {
            "Dogs" => FavAnimals::Dogs,
            "Cats" => FavAnimals::Cats,
            "Dogs and cats" => FavAnimals::DogsAndCats,
            "No favorites" => FavAnimals::NoFavorites,
            "Other" => FavAnimals::Other,
            _ => FavAnimals::Unspecified,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(from = "String")]
pub enum FavPlace {
    ByTheWater,
    InTheForest,
    InTheMountains,
    Other,
    #[value(skip)]
    Unspecified,
}

impl FavPlace {
    pub fn label(&self) -> &'static str {
        match self {
            FavPlace::ByTheWater => "By the water",
            FavPlace::InTheForest => "In the forest",
            FavPlace::InTheMountains => "In the mountains",
            FavPlace::Other => "Other",
            FavPlace::Unspecified => "Unspecified",
        }
    }

    fn parse(s: &str) -> Self {
        match s.trim() {
            "By the water" => FavPlace::ByTheWater,
            "In the forest" => FavPlace::InTheForest,
            "In the mountains" => FavPlace::InTheMountains,
            "Other" => FavPlace::Other,
            _ => FavPlace::Unspecified,
        }
    }
}

impl From<String> for Generation {
    fn from(s: String) -> Self {
        Self::parse(&s)
    }
}

impl From<String> for Gender {
    fn from(s: String) -> Self {
        Self::parse(&s)
    }
}

impl From<String> for EduLevel {
    fn from(s: String) -> Self {
        Self::parse(&s)
    }
}

impl From<String> for FavAnimals {
    fn from(s: String) -> Self {
        Self::parse(&s)
    }
}

impl From<String> for FavPlace {
    fn from(s: String) -> Self {
        Self::parse(&s)
    }
}

impl fmt::Display for Generation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl fmt::Display for EduLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl fmt::Display for FavAnimals {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl fmt::Display for FavPlace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Persona/segment identifier. The training pipeline emits these either as a
/// bare integer or as a `"Cluster N"` label; both forms deserialize.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ClusterId(pub u32);

impl ClusterId {
    /// Parse `"2"` or `"Cluster 2"` into an id.
    pub fn parse(s: &str) -> Option<Self> {
        let t = s.trim();
        let t = t.strip_prefix("Cluster").map(str::trim_start).unwrap_or(t);
        t.parse().ok().map(ClusterId)
    }
}

impl fmt::Display for ClusterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl<'de> Deserialize<'de> for ClusterId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct IdVisitor;

        impl de::Visitor<'_> for IdVisitor {
            type Value = ClusterId;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a cluster id integer or a \"Cluster N\" label")
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
                u32::try_from(v)
                    .map(ClusterId)
                    .map_err(|_| E::custom(format!("cluster id out of range: {v}")))
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
                ClusterId::parse(v).ok_or_else(|| E::custom(format!("invalid cluster id: {v:?}")))
            }
        }

        deserializer.deserialize_any(IdVisitor)
    }
}

/// One historical participant, as written by the external training pipeline.
/// Read-only at query time.
#[derive(Debug, Clone, Deserialize)]
pub struct SurveyRecord {
    /// Raw age range as surveyed (e.g. `"25-34"`, `"55+"`).
    pub age: String,
    pub edu_level: EduLevel,
    pub fav_animals: FavAnimals,
    pub fav_place: FavPlace,
    pub gender: Gender,
    /// Precomputed midpoint age, when the pipeline kept it.
    #[serde(default)]
    pub age_numeric: Option<f64>,
    pub generation: Generation,
    /// Assigned persona cluster, immutable once computed.
    #[serde(rename = "Cluster")]
    pub cluster: ClusterId,
}

/// A transient, user-submitted analogue of [`SurveyRecord`]: same categorical
/// field set, no cluster assigned yet. Built per submission, consumed once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserProfile {
    pub generation: Generation,
    pub gender: Gender,
    pub fav_animals: FavAnimals,
    pub fav_place: FavPlace,
    pub edu_level: EduLevel,
}
