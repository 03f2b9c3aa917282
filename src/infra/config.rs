use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::cli::{AppContext, InitArgs};
use crate::core::assign::Strategy;
use crate::core::retrieve::DEFAULT_LIMIT;

#[derive(Debug, Serialize, Deserialize)]
pub struct Config
{
    /// Historical dataset (CSV) written by the training pipeline
    pub dataset: PathBuf,

    /// Cluster descriptor store (JSON)
    pub descriptors: PathBuf,

    /// Default profile-matching settings
    pub matching: MatchingConfig,

    /// Default statistics settings
    pub stats: StatsConfig,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MatchingConfig
{
    pub strategy: Strategy,
    pub limit: usize,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct StatsConfig
{
    pub round_digits: u32,
}

impl Default for Config
{
    fn default() -> Self
    {
        Self {
            dataset: PathBuf::from("clustered_data_v1.csv"),
            descriptors: PathBuf::from("cluster_descriptions.json"),
            matching: MatchingConfig { strategy: Strategy::Rules, limit: DEFAULT_LIMIT },
            stats: StatsConfig { round_digits: 2 },
        }
    }
}

pub fn load_config() -> Result<Config>
{
    let mut builder = config::Config::builder();

    // Load from config files in priority order
    let config_paths = [
        "coursemates.toml",
        "coursemates.yaml",
        "coursemates.json",
        ".coursemates.toml",
    ];

    for path in &config_paths
    {
        if Path::new(path).exists()
        {
            builder = builder.add_source(config::File::with_name(path));
            break;
        }
    }

    // Add environment variables with COURSEMATES_ prefix
    builder = builder.add_source(config::Environment::with_prefix("COURSEMATES").separator("_"));

    let cfg = builder
        .build()
        .context("Failed to load configuration")?;
    let parsed: Config = cfg
        .try_deserialize()
        .context("Failed to parse configuration")?;

    Ok(parsed)
}

pub fn init(
    args: InitArgs,
    ctx: &AppContext,
) -> Result<()>
{
    let config_path = args
        .path
        .join("coursemates.toml");

    if config_path.exists() && !args.force
    {
        anyhow::bail!(
            "Config file already exists at {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    let config = Config::default();
    let toml_string =
        toml::to_string_pretty(&config).context("Failed to serialize default config")?;

    std::fs::write(&config_path, toml_string).context("Failed to write config file")?;

    if !ctx.quiet
    {
        println!("Created config file at {}", config_path.display());
    }
    Ok(())
}
