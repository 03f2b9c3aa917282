//! **coursemates** - Match course survey respondents to persona clusters
//!
//! Deterministic profile matching over a clustered survey dataset: normalize
//! raw survey features, assign a persona cluster (decision list, similarity
//! scoring, or an external model), and retrieve the participants who share it.

/// Command-line interface with clap integration
pub mod cli;

/// Shell completion generation
pub mod completion;

/// Core profile-matching pipeline
pub mod core {
    /// Survey data model: feature enumerations, records, profiles
    pub mod profile;
    pub use profile::{ClusterId, SurveyRecord, UserProfile};

    /// Raw age ranges to numeric ages and generation buckets
    pub mod normalize;
    pub use normalize::{generation_for_range, map_generation, normalize_age};

    /// Cluster assignment strategies behind one seam
    pub mod assign;
    pub use assign::{ClusterAssigner, ExternalModel, RuleBased, SimilarityScoring, Strategy};

    /// Persona names and descriptions with total lookup
    pub mod registry;
    pub use registry::{ClusterDescriptor, ClusterRegistry};

    /// Order-preserving retrieval of same-cluster participants
    pub mod retrieve;
    pub use retrieve::similar;

    /// Cluster statistics report and the `stats` command
    pub mod stats;
    pub use stats::{ClusterReport, run as stats_run};

    /// The `match` command: assign, describe, retrieve
    pub mod matcher;
    pub use matcher::run as match_run;
}

/// Infrastructure - Configuration and data loading
pub mod infra {
    /// Configuration management with TOML support
    pub mod config;
    pub use config::{Config, init as config_init, load_config};

    /// Fail-fast loading of the dataset and descriptor stores
    pub mod io;
    pub use io::{DataError, load_dataset, load_descriptors};
}

// Strategic re-exports for clean CLI interface
pub use cli::{AppContext, Cli, Commands};
pub use core::{match_run, stats_run};
pub use infra::{Config, load_config};

// Core types for external consumers
pub use core::profile::{ClusterId, SurveyRecord, UserProfile};
pub use core::registry::{ClusterDescriptor, ClusterRegistry};
