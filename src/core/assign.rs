//! Cluster assignment strategies.
//!
//! One seam, three interchangeable implementations:
//!
//! * [`RuleBased`] - an ordered decision list, first match wins. Canonical.
//! * [`SimilarityScoring`] - mean field-match score against the historical
//!   dataset, grouped by existing cluster.
//! * [`ExternalModel`] - an opaque, offline-trained predictor.
//!
//! All strategies are total over well-formed and malformed profiles alike:
//! unrecognized feature values fall through to the default cluster (rules) or
//! simply score lower (similarity).

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::profile::{ClusterId, EduLevel, FavAnimals, Generation, SurveyRecord, UserProfile};

/// Cluster every profile falls back to when no rule applies.
pub const DEFAULT_CLUSTER: ClusterId = ClusterId(0);

/// Assigns a persona cluster to a submitted profile.
///
/// `historical` is the read-only training dataset; strategies that do not
/// need it ignore it. Implementations must be deterministic: identical
/// inputs yield the identical cluster id.
pub trait ClusterAssigner {
    fn assign(&self, profile: &UserProfile, historical: &[SurveyRecord]) -> ClusterId;

    /// Strategy identifier for logs and output.
    fn name(&self) -> &'static str;
}

/// Selectable strategy, from CLI flag or config file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    /// Ordered decision list (deterministic, dataset-free).
    #[default]
    Rules,
    /// Mean field-match score per historical cluster.
    Similarity,
}

impl Strategy {
    pub fn assigner(self) -> Box<dyn ClusterAssigner> {
        match self {
            Strategy::Rules => Box::new(RuleBased),
            Strategy::Similarity => Box::new(SimilarityScoring),
        }
    }
}

/// One entry of the decision list: a predicate over the profile and the
/// cluster it yields.
struct Rule {
    when: fn(&UserProfile) -> bool,
    then: ClusterId,
    why: &'static str,
}

/// The decision list, in priority order. Evaluation is top-to-bottom with
/// short-circuit; reordering entries changes behavior. Gender and favourite
/// place are intentionally not consulted.
const DECISION_LIST: &[Rule] = &[
    Rule {
        when: |p| p.generation == Generation::Millennial && p.edu_level == EduLevel::Higher,
        then: ClusterId(1),
        why: "higher-educated millennial",
    },
    Rule {
        when: |p| matches!(p.generation, Generation::GenX | Generation::Boomer),
        then: ClusterId(2),
        why: "Gen X or boomer",
    },
    Rule {
        when: |p| p.fav_animals == FavAnimals::Other,
        then: ClusterId(3),
        why: "unconventional animal preference",
    },
];

/// Deterministic decision-list assigner. Mirrors the personas the clustering
/// run produced, without needing the dataset at query time.
pub struct RuleBased;

impl ClusterAssigner for RuleBased {
    fn assign(&self, profile: &UserProfile, _historical: &[SurveyRecord]) -> ClusterId {
        for rule in DECISION_LIST {
            if (rule.when)(profile) {
                debug!(rule = rule.why, cluster = %rule.then, "decision list matched");
                return rule.then;
            }
        }

        DEFAULT_CLUSTER
    }

    fn name(&self) -> &'static str {
        "rules"
    }
}

/// Number of categorical fields equal between a submitted profile and a
/// historical record. Range 0-5.
fn match_score(profile: &UserProfile, record: &SurveyRecord) -> u32 {
    let mut score = 0;
    if record.generation == profile.generation {
        score += 1;
    }
    if record.gender == profile.gender {
        score += 1;
    }
    if record.fav_animals == profile.fav_animals {
        score += 1;
    }
    if record.fav_place == profile.fav_place {
        score += 1;
    }
    if record.edu_level == profile.edu_level {
        score += 1;
    }
    score
}

/// Data-driven assigner: the cluster whose members look most like the
/// profile, by mean field-match score.
///
/// Aggregation is explicit (sum and count per cluster in a `BTreeMap`), so
/// iteration order - and therefore the tie-break - is ascending by cluster
/// id, not a library accident. On equal mean scores the lowest cluster id
/// wins. Clusters with no historical records never enter the comparison.
pub struct SimilarityScoring;

impl ClusterAssigner for SimilarityScoring {
    fn assign(&self, profile: &UserProfile, historical: &[SurveyRecord]) -> ClusterId {
        let mut totals: std::collections::BTreeMap<ClusterId, (u64, u64)> =
            std::collections::BTreeMap::new();

        for record in historical {
            let entry = totals.entry(record.cluster).or_insert((0, 0));
            entry.0 += u64::from(match_score(profile, record));
            entry.1 += 1;
        }

        let mut best: Option<(ClusterId, f64)> = None;
        for (cluster, (sum, count)) in totals {
            let mean = sum as f64 / count as f64;
            // Strict comparison keeps the first (lowest) id on ties.
            let better = match best {
                Some((_, best_mean)) => mean > best_mean,
                None => true,
            };
            if better {
                best = Some((cluster, mean));
            }
        }

        match best {
            Some((cluster, mean)) => {
                debug!(cluster = %cluster, mean, "similarity scoring picked cluster");
                cluster
            }
            // Empty dataset: nothing to compare against. The loader treats
            // an empty dataset as a startup failure, so this is reachable
            // only through direct library use.
            None => DEFAULT_CLUSTER,
        }
    }

    fn name(&self) -> &'static str {
        "similarity"
    }
}

/// Opaque offline-trained classifier plugged in behind the same seam, so the
/// rest of the system never learns the model's internals. The call is
/// synchronous and non-retryable.
pub struct ExternalModel<F> {
    predict: F,
}

impl<F> ExternalModel<F>
where
    F: Fn(&UserProfile) -> ClusterId,
{
    pub fn new(predict: F) -> Self {
        Self { predict }
    }
}

impl<F> ClusterAssigner for ExternalModel<F>
where
    F: Fn(&UserProfile) -> ClusterId,
{
    fn assign(&self, profile: &UserProfile, _historical: &[SurveyRecord]) -> ClusterId {
        (self.predict)(profile)
    }

    fn name(&self) -> &'static str {
        "external"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::profile::{FavPlace, Gender};

    fn profile(
        generation: Generation,
        edu_level: EduLevel,
        fav_animals: FavAnimals,
    ) -> UserProfile {
        UserProfile {
            generation,
            gender: Gender::Female,
            fav_animals,
            fav_place: FavPlace::ByTheWater,
            edu_level,
        }
    }

    fn record(profile: &UserProfile, cluster: ClusterId) -> SurveyRecord {
        SurveyRecord {
            age: "25-34".to_string(),
            edu_level: profile.edu_level,
            fav_animals: profile.fav_animals,
            fav_place: profile.fav_place,
            gender: profile.gender,
            age_numeric: None,
            generation: profile.generation,
            cluster,
        }
    }

    #[test]
    fn higher_educated_millennials_are_cluster_one() {
        let p = profile(Generation::Millennial, EduLevel::Higher, FavAnimals::Dogs);
        assert_eq!(RuleBased.assign(&p, &[]), ClusterId(1));
    }

    #[test]
    fn gender_and_place_never_change_the_rule_outcome() {
        let base = profile(Generation::Millennial, EduLevel::Higher, FavAnimals::Dogs);

        for gender in [Gender::Female, Gender::Male, Gender::Unspecified] {
            for place in [
                FavPlace::ByTheWater,
                FavPlace::InTheForest,
                FavPlace::InTheMountains,
                FavPlace::Other,
                FavPlace::Unspecified,
            ] {
                let p = UserProfile { gender, fav_place: place, ..base.clone() };
                assert_eq!(RuleBased.assign(&p, &[]), ClusterId(1));
            }
        }
    }

    #[test]
    fn older_generations_are_cluster_two_even_with_other_animals() {
        // The generation rule outranks the animal rule.
        let p = profile(Generation::GenX, EduLevel::Basic, FavAnimals::Cats);
        assert_eq!(RuleBased.assign(&p, &[]), ClusterId(2));

        let p = profile(Generation::Boomer, EduLevel::Basic, FavAnimals::Other);
        assert_eq!(RuleBased.assign(&p, &[]), ClusterId(2));
    }

    #[test]
    fn other_animals_are_cluster_three() {
        let p = profile(Generation::GenZ, EduLevel::Basic, FavAnimals::Other);
        assert_eq!(RuleBased.assign(&p, &[]), ClusterId(3));
    }

    #[test]
    fn everyone_else_lands_in_the_default_cluster() {
        let p = profile(Generation::GenZ, EduLevel::Basic, FavAnimals::Dogs);
        assert_eq!(RuleBased.assign(&p, &[]), DEFAULT_CLUSTER);
    }

    #[test]
    fn unrecognized_features_fall_through_to_default() {
        let p = profile(Generation::Unknown, EduLevel::Unspecified, FavAnimals::Unspecified);
        assert_eq!(RuleBased.assign(&p, &[]), DEFAULT_CLUSTER);
    }

    #[test]
    fn similarity_picks_the_closest_cluster() {
        let target = profile(Generation::GenZ, EduLevel::Higher, FavAnimals::Cats);
        let decoy = profile(Generation::Boomer, EduLevel::Basic, FavAnimals::Dogs);

        let historical = vec![
            record(&target, ClusterId(3)),
            record(&target, ClusterId(3)),
            record(&decoy, ClusterId(0)),
        ];

        assert_eq!(SimilarityScoring.assign(&target, &historical), ClusterId(3));
    }

    #[test]
    fn similarity_ties_break_to_the_lowest_id() {
        let p = profile(Generation::GenZ, EduLevel::Higher, FavAnimals::Cats);

        // Identical members in clusters 2 and 1: both means are equal.
        let historical = vec![record(&p, ClusterId(2)), record(&p, ClusterId(1))];

        assert_eq!(SimilarityScoring.assign(&p, &historical), ClusterId(1));
    }

    #[test]
    fn clusters_without_members_are_excluded() {
        let p = profile(Generation::GenZ, EduLevel::Higher, FavAnimals::Cats);
        let far = profile(Generation::Boomer, EduLevel::Basic, FavAnimals::Dogs);

        // Only cluster 2 has members; no phantom mean for 0, 1 or 3.
        let historical = vec![record(&far, ClusterId(2))];

        assert_eq!(SimilarityScoring.assign(&p, &historical), ClusterId(2));
    }

    #[test]
    fn assignment_is_deterministic() {
        let p = profile(Generation::Millennial, EduLevel::Secondary, FavAnimals::Cats);
        let historical = vec![
            record(&p, ClusterId(0)),
            record(&profile(Generation::GenX, EduLevel::Basic, FavAnimals::Dogs), ClusterId(2)),
        ];

        for assigner in [Strategy::Rules.assigner(), Strategy::Similarity.assigner()] {
            let first = assigner.assign(&p, &historical);
            let second = assigner.assign(&p, &historical);
            assert_eq!(first, second, "{} must be deterministic", assigner.name());
        }
    }

    #[test]
    fn external_model_satisfies_the_same_seam() {
        let oracle = ExternalModel::new(|_: &UserProfile| ClusterId(3));
        let p = profile(Generation::GenZ, EduLevel::Basic, FavAnimals::Dogs);
        assert_eq!(oracle.assign(&p, &[]), ClusterId(3));
        assert_eq!(oracle.name(), "external");
    }
}
