use anyhow::Result;
use clap::Parser;
use coursemates::cli::{AppContext, Cli, Commands};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Silent unless RUST_LOG asks for more
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    // Build a context once, pass everywhere
    let ctx = AppContext {
        quiet: cli.quiet,
        no_color: cli.no_color,
        dry_run: cli.dry_run,
    };

    match cli.command {
        Commands::Match(args) => coursemates::match_run(args, &ctx),
        Commands::Stats(args) => coursemates::stats_run(args, &ctx),
        Commands::Init(args) => coursemates::infra::config::init(args, &ctx),
        Commands::Completions(args) => coursemates::completion::run(args),
    }
}
