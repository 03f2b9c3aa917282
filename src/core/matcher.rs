//! The `match` command: assign a submitted profile to a persona cluster and
//! show the participants who share it.

use anyhow::{Context, Result};
use owo_colors::OwoColorize;
use tabled::{Table, Tabled, settings::Style};
use tracing::info;

use crate::cli::{AppContext, MatchArgs};
use crate::core::normalize::generation_for_range;
use crate::core::profile::{SurveyRecord, UserProfile};
use crate::core::retrieve::similar;
use crate::infra::config::load_config;
use crate::infra::io::{load_dataset, load_descriptors};

#[derive(Tabled)]
struct MemberRow {
    #[tabled(rename = "Age")]
    age: String,
    #[tabled(rename = "Generation")]
    generation: String,
    #[tabled(rename = "Gender")]
    gender: String,
    #[tabled(rename = "Education")]
    edu_level: String,
    #[tabled(rename = "Animals")]
    fav_animals: String,
    #[tabled(rename = "Place")]
    fav_place: String,
}

impl From<&SurveyRecord> for MemberRow {
    fn from(r: &SurveyRecord) -> Self {
        Self {
            age: r.age.clone(),
            generation: r.generation.to_string(),
            gender: r.gender.to_string(),
            edu_level: r.edu_level.to_string(),
            fav_animals: r.fav_animals.to_string(),
            fav_place: r.fav_place.to_string(),
        }
    }
}

pub fn run(args: MatchArgs, ctx: &AppContext) -> Result<()> {
    let config = load_config().unwrap_or_default();

    let dataset_path = args.dataset.unwrap_or(config.dataset);
    let descriptors_path = args.descriptors.unwrap_or(config.descriptors);
    let strategy = args.strategy.unwrap_or(config.matching.strategy);
    let limit = args.limit.unwrap_or(config.matching.limit);

    // The profile itself needs no dataset; build it first so dry runs can
    // show the derived generation too.
    let profile = UserProfile {
        generation: generation_for_range(&args.age),
        gender: args.gender,
        fav_animals: args.fav_animals,
        fav_place: args.fav_place,
        edu_level: args.edu_level,
    };

    if ctx.dry_run {
        if !ctx.quiet {
            println!("{}", "DRY RUN: Would match:".yellow());
            println!("  Profile: {profile:?}");
            println!("  Strategy: {}", strategy.assigner().name());
            println!("  Dataset: {}", dataset_path.display());
            println!("  Descriptors: {}", descriptors_path.display());
            println!("  Limit: {limit}");
        }
        return Ok(());
    }

    let records = load_dataset(&dataset_path)?;
    let registry =
        load_descriptors(&descriptors_path).context("Failed to load cluster descriptors")?;

    let assigner = strategy.assigner();
    let cluster = assigner.assign(&profile, &records);
    info!(strategy = assigner.name(), cluster = %cluster, "profile assigned");

    let descriptor = registry.describe(cluster);
    let members = similar(cluster, &records, limit);

    if ctx.no_color {
        println!("Your persona: {} (cluster {cluster})", descriptor.name);
    } else {
        println!(
            "{} {} {}",
            "Your persona:".bold(),
            descriptor.name.bold().green(),
            format!("(cluster {cluster})").dimmed()
        );
    }

    if ctx.quiet {
        return Ok(());
    }

    println!();
    println!("{}", descriptor.description);
    println!();

    if members.is_empty() {
        println!("No other participants share this persona yet.");
        return Ok(());
    }

    println!("{}", "Participants with a similar profile:".bold());
    let rows: Vec<MemberRow> = members.into_iter().map(MemberRow::from).collect();
    println!("{}", Table::new(rows).with(Style::sharp()));

    Ok(())
}
