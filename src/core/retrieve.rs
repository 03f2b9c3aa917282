//! Retrieval of historical participants sharing a cluster.

use crate::core::profile::{ClusterId, SurveyRecord};

/// Default cap on how many similar participants are shown.
pub const DEFAULT_LIMIT: usize = 10;

/// Records assigned to `cluster`, in their original dataset order, truncated
/// to `limit`. The dataset is borrowed, never copied or reordered; zero
/// matches yield an empty vec.
pub fn similar<'a>(
    cluster: ClusterId,
    records: &'a [SurveyRecord],
    limit: usize,
) -> Vec<&'a SurveyRecord> {
    records
        .iter()
        .filter(|r| r.cluster == cluster)
        .take(limit)
        .collect()
}
