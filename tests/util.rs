//! Shared test utilities for integration tests
//!
//! Provides common fixture creation and helper functions
//! used across multiple test files.

use assert_fs::prelude::*;

/// Columns the training pipeline writes, in order.
pub const DATASET_HEADER: &str =
    "age,edu_level,fav_animals,fav_place,gender,age_numeric,generation,Cluster";

/// A small but representative clustered dataset: all four personas, mixed
/// genders and generations, a few empty `age_numeric` cells.
pub const DATASET_ROWS: &[&str] = &[
    "25-34,Higher,Dogs,By the water,Female,29.5,Millennial,1",
    "25-34,Higher,Cats,In the mountains,Male,29.5,Millennial,1",
    "35-44,Higher,Dogs and cats,In the forest,Female,39.5,Millennial,1",
    "45-54,Secondary,Dogs,In the forest,Male,49.5,Gen X,2",
    "45-54,Basic,Cats,By the water,Female,,Gen X,2",
    "65+,Higher,Dogs,In the mountains,Male,65,Boomer,2",
    "65+,Basic,No favorites,By the water,Female,65,Boomer,2",
    "18-24,Basic,Other,In the forest,Male,21,Gen Z,3",
    "18-24,Secondary,Other,Other,Female,21,Gen Z,3",
    "18-24,Basic,Dogs,By the water,Female,21,Gen Z,0",
    "18-24,Secondary,Cats,In the mountains,Male,,Gen Z,0",
    "25-34,Basic,Dogs,By the water,Female,29.5,Millennial,0",
];

pub const DESCRIPTORS_JSON: &str = r#"{
  "0": {
    "name": "Independent Individualists",
    "description": "Self-directed learners who chart their own course."
  },
  "1": {
    "name": "Driven Millennials",
    "description": "Career-focused, highly educated, always moving."
  },
  "2": {
    "name": "Seasoned Strategists",
    "description": "Experience first; novelty has to earn its place."
  },
  "3": {
    "name": "Unconventional Explorers",
    "description": "Off the beaten path, in answers as in life."
  }
}"#;

/// Create a project directory seeded with the dataset and descriptor store
/// under their default names, so commands run without path flags.
pub fn seed_project() -> assert_fs::TempDir {
    let tmp = assert_fs::TempDir::new().expect("tempdir");

    let mut csv = String::from(DATASET_HEADER);
    for row in DATASET_ROWS {
        csv.push('\n');
        csv.push_str(row);
    }
    csv.push('\n');

    tmp.child("clustered_data_v1.csv")
        .write_str(&csv)
        .expect("write dataset");
    tmp.child("cluster_descriptions.json")
        .write_str(DESCRIPTORS_JSON)
        .expect("write descriptors");

    tmp
}
