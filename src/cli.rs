use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::core::assign::Strategy;
use crate::core::profile::{EduLevel, FavAnimals, FavPlace, Gender, Generation};

/// Shared application context for global flags
#[derive(Clone, Debug)]
pub struct AppContext {
    pub quiet: bool,    // global --quiet
    pub no_color: bool, // global --no-color
    pub dry_run: bool,  // global --dry-run
}

#[derive(Parser)]
#[command(name = "coursemates")]
#[command(
    about = "A fast, lightweight CLI for matching course survey respondents to persona clusters"
)]
#[command(version, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Suppress non-essential output
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Show what would be done without executing
    #[arg(long, global = true)]
    pub dry_run: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Match a survey profile to a persona cluster and list similar participants
    Match(MatchArgs),

    /// Print cluster statistics over the historical dataset
    Stats(StatsArgs),

    /// Initialize a coursemates.toml config file
    Init(InitArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Parser)]
pub struct MatchArgs {
    /// Age range as surveyed (e.g. 25-34 or 55+)
    #[arg(long)]
    pub age: String,

    /// Education level
    #[arg(long, value_enum)]
    pub edu_level: EduLevel,

    /// Favourite animals
    #[arg(long, value_enum)]
    pub fav_animals: FavAnimals,

    /// Favourite place
    #[arg(long, value_enum)]
    pub fav_place: FavPlace,

    /// Gender
    #[arg(long, value_enum)]
    pub gender: Gender,

    /// Assignment strategy (defaults to config)
    #[arg(long, value_enum)]
    pub strategy: Option<Strategy>,

    /// Maximum number of similar participants to show (defaults to config)
    #[arg(long)]
    pub limit: Option<usize>,

    /// Dataset CSV path (defaults to config)
    #[arg(long)]
    pub dataset: Option<PathBuf>,

    /// Descriptor store JSON path (defaults to config)
    #[arg(long)]
    pub descriptors: Option<PathBuf>,
}

#[derive(Parser)]
pub struct StatsArgs {
    /// Only include these genders (repeatable); empty keeps everyone
    #[arg(long, value_enum)]
    pub gender: Vec<Gender>,

    /// Only include these generations (repeatable); empty keeps everyone
    #[arg(long, value_enum)]
    pub generation: Vec<Generation>,

    /// Dataset CSV path (defaults to config)
    #[arg(long)]
    pub dataset: Option<PathBuf>,

    /// Descriptor store JSON path (defaults to config)
    #[arg(long)]
    pub descriptors: Option<PathBuf>,
}

#[derive(Parser)]
pub struct InitArgs {
    /// Directory to initialize config in
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Overwrite existing config file
    #[arg(long)]
    pub force: bool,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

#[derive(Parser)]
pub struct CompletionsArgs {
    /// Target shell
    #[arg(value_enum)]
    pub shell: Shell,

    /// Output directory; if omitted and --stdout not set, prints error
    #[arg(long)]
    pub out_dir: Option<PathBuf>,

    /// Print completion script to stdout instead of a file
    #[arg(long)]
    pub stdout: bool,
}
