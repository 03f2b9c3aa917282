//! Persona registry: cluster id to display name and description.
//!
//! Loaded once at startup from a JSON side file keyed by the string form of
//! the cluster id. Lookup is total: ids the store does not know degrade to a
//! fallback descriptor instead of failing.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use indexmap::IndexMap;
use serde::Deserialize;
use tracing::debug;

use crate::core::profile::ClusterId;

/// Marker used when the store has no entry for an id.
pub const NO_DESCRIPTION: &str = "no description available";

/// Human-readable persona attached to a cluster id.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ClusterDescriptor {
    pub name: String,
    pub description: String,
}

/// Process-lifetime map of known personas. Immutable after load.
#[derive(Debug, Clone)]
pub struct ClusterRegistry {
    descriptors: IndexMap<ClusterId, ClusterDescriptor>,
}

impl ClusterRegistry {
    /// Load descriptors from a JSON document of the form
    /// `{"0": {"name": "...", "description": "..."}, ...}`.
    ///
    /// Keys that do not parse as cluster ids fail the load outright.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read descriptor store {}", path.display()))?;

        let parsed: BTreeMap<String, ClusterDescriptor> = serde_json::from_str(&raw)
            .with_context(|| format!("Malformed descriptor store {}", path.display()))?;

        Self::from_entries(parsed)
    }

    /// Build a registry from already-parsed `(string key, descriptor)` pairs.
    pub fn from_entries(
        entries: impl IntoIterator<Item = (String, ClusterDescriptor)>,
    ) -> Result<Self> {
        let mut descriptors = IndexMap::new();

        for (key, descriptor) in entries {
            let id = ClusterId::parse(&key)
                .with_context(|| format!("Descriptor key is not a cluster id: {key:?}"))?;
            descriptors.insert(id, descriptor);
        }

        descriptors.sort_keys();
        debug!(clusters = descriptors.len(), "cluster registry loaded");

        Ok(Self { descriptors })
    }

    /// Total lookup. Unknown ids come back as a fallback descriptor whose
    /// name is the raw id and whose description marks the absence.
    pub fn describe(&self, id: ClusterId) -> ClusterDescriptor {
        match self.descriptors.get(&id) {
            Some(descriptor) => descriptor.clone(),
            None => ClusterDescriptor {
                name: id.to_string(),
                description: NO_DESCRIPTION.to_string(),
            },
        }
    }

    /// Ids the store knows, in ascending order.
    pub fn known_ids(&self) -> impl Iterator<Item = ClusterId> + '_ {
        self.descriptors.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }
}
