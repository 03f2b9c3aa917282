//! Loading of the two external stores: the clustered survey dataset (CSV)
//! and the cluster descriptor store (JSON).
//!
//! Both loads happen once per process, before any core logic runs, and fail
//! fast: a missing or corrupt store is a startup error, never an empty
//! default. The loaded data is immutable afterwards.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{debug, warn};

use crate::core::profile::SurveyRecord;
use crate::core::registry::ClusterRegistry;

/// Load-time failure taxonomy.
#[derive(Debug, thiserror::Error)]
pub enum DataError {
    #[error("dataset not found: {}", .0.display())]
    MissingDataset(PathBuf),

    #[error("dataset {}: row {row}: {source}", .path.display())]
    MalformedRow {
        path: PathBuf,
        /// 1-based line number, counting the header.
        row: usize,
        source: csv::Error,
    },

    #[error("dataset has a header but no rows: {}", .0.display())]
    EmptyDataset(PathBuf),
}

impl DataError {
    fn malformed_row(path: &Path, row: usize, source: csv::Error) -> Self {
        DataError::MalformedRow { path: path.to_path_buf(), row, source }
    }
}

/// Expand `~` in user-supplied paths.
pub fn expand_path(path: &Path) -> PathBuf {
    let raw = path.to_string_lossy();
    PathBuf::from(shellexpand::tilde(raw.as_ref()).into_owned())
}

/// Read the historical dataset into memory.
///
/// One CSV row per participant, comma-separated with a header row. Row
/// numbers in errors are 1-based and count the header, matching what an
/// editor shows.
pub fn load_dataset(path: &Path) -> Result<Vec<SurveyRecord>> {
    let path = expand_path(path);

    if !path.exists() {
        return Err(DataError::MissingDataset(path).into());
    }

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_path(&path)
        .with_context(|| format!("Failed to open dataset {}", path.display()))?;

    let mut records = Vec::new();
    for (i, row) in reader.deserialize::<SurveyRecord>().enumerate() {
        let record = row.map_err(|source| DataError::malformed_row(&path, i + 2, source))?;
        records.push(record);
    }

    if records.is_empty() {
        return Err(DataError::EmptyDataset(path).into());
    }

    debug!(rows = records.len(), path = %path.display(), "dataset loaded");
    Ok(records)
}

/// Load the persona descriptor store.
pub fn load_descriptors(path: &Path) -> Result<ClusterRegistry> {
    let path = expand_path(path);
    let registry = ClusterRegistry::load(&path)?;

    if registry.is_empty() {
        // Legal (lookups degrade to the fallback descriptor), but almost
        // certainly a misconfigured store.
        warn!(path = %path.display(), "descriptor store contains no clusters");
    }

    Ok(registry)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    use crate::core::profile::{ClusterId, FavAnimals, Generation};

    const HEADER: &str = "age,edu_level,fav_animals,fav_place,gender,age_numeric,generation,Cluster";

    fn write_dataset(rows: &[&str]) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().expect("tempfile");
        writeln!(file, "{HEADER}").unwrap();
        for row in rows {
            writeln!(file, "{row}").unwrap();
        }
        file.flush().unwrap();
        file
    }

    #[test]
    fn loads_well_formed_rows() {
        let file = write_dataset(&[
            "25-34,Higher,Dogs,By the water,Female,29.5,Millennial,1",
            "55+,Basic,Other,In the forest,Male,,Boomer,Cluster 2",
        ]);

        let records = load_dataset(file.path()).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].cluster, ClusterId(1));
        assert_eq!(records[0].age_numeric, Some(29.5));
        assert_eq!(records[1].cluster, ClusterId(2));
        assert_eq!(records[1].age_numeric, None);
        assert_eq!(records[1].generation, Generation::Boomer);
    }

    #[test]
    fn unrecognized_categorical_values_degrade_not_fail() {
        let file = write_dataset(&["18-24,Bootcamp,Ferrets,On the moon,Robot,,Gen Z,0"]);

        let records = load_dataset(file.path()).unwrap();
        assert_eq!(records[0].fav_animals, FavAnimals::Unspecified);
    }

    #[test]
    fn missing_dataset_fails_fast() {
        let err = load_dataset(Path::new("/definitely/not/here.csv")).unwrap_err();
        assert!(err.to_string().contains("dataset not found"));
    }

    #[test]
    fn header_only_dataset_is_an_error() {
        let file = write_dataset(&[]);
        let err = load_dataset(file.path()).unwrap_err();
        assert!(err.to_string().contains("no rows"));
    }

    #[test]
    fn malformed_cluster_id_points_at_the_row() {
        let file = write_dataset(&[
            "25-34,Higher,Dogs,By the water,Female,,Millennial,1",
            "25-34,Higher,Dogs,By the water,Female,,Millennial,persona-one",
        ]);

        let err = load_dataset(file.path()).unwrap_err();
        assert!(err.to_string().contains("row 3"), "got: {err}");
    }
}
