//! Cluster statistics over the historical dataset.
//!
//! Mirrors what the offline interpretation pass reports: cluster sizes,
//! per-cluster categorical value shares, and mean numeric age. All ordering
//! is deterministic (ascending cluster id, shares descending with the value
//! label as tie-break).

use std::collections::BTreeMap;

use anyhow::{Context, Result};
use itertools::Itertools;
use owo_colors::OwoColorize;
use tabled::{Table, Tabled, settings::Style};

use crate::cli::{AppContext, StatsArgs};
use crate::core::profile::{ClusterId, SurveyRecord};
use crate::core::registry::ClusterRegistry;
use crate::infra::config::load_config;
use crate::infra::io::{load_dataset, load_descriptors};

/// Share of one categorical value within a cluster.
#[derive(Debug, Clone, PartialEq)]
pub struct ValueShare {
    pub value: String,
    pub share: f64,
}

/// Distribution of one survey field within a cluster.
#[derive(Debug, Clone)]
pub struct FieldBreakdown {
    pub field: &'static str,
    pub shares: Vec<ValueShare>,
}

/// Everything reported about a single cluster.
#[derive(Debug, Clone)]
pub struct ClusterProfile {
    pub cluster: ClusterId,
    pub members: usize,
    pub fields: Vec<FieldBreakdown>,
    /// Mean of `age_numeric`, when any member carries one.
    pub mean_age: Option<f64>,
}

/// Full statistics report over a dataset.
#[derive(Debug, Clone)]
pub struct ClusterReport {
    pub observations: usize,
    pub sizes: Vec<(ClusterId, usize)>,
    pub profiles: Vec<ClusterProfile>,
}

const FIELDS: &[&str] = &["generation", "gender", "fav_animals", "fav_place", "edu_level"];

fn field_label(record: &SurveyRecord, field: &str) -> String {
    match field {
        "generation" => record.generation.to_string(),
        "gender" => record.gender.to_string(),
        "fav_animals" => record.fav_animals.to_string(),
        "fav_place" => record.fav_place.to_string(),
        "edu_level" => record.edu_level.to_string(),
        other => unreachable!("unknown survey field {other}"),
    }
}

fn round_to(x: f64, digits: u32) -> f64 {
    let factor = 10f64.powi(digits as i32);
    (x * factor).round() / factor
}

impl ClusterReport {
    /// Compute the report. `round_digits` applies to value shares; mean ages
    /// round to one decimal.
    pub fn build(records: &[SurveyRecord], round_digits: u32) -> Self {
        let mut by_cluster: BTreeMap<ClusterId, Vec<&SurveyRecord>> = BTreeMap::new();
        for record in records {
            by_cluster.entry(record.cluster).or_default().push(record);
        }

        let sizes = by_cluster
            .iter()
            .map(|(id, members)| (*id, members.len()))
            .collect();

        let profiles = by_cluster
            .iter()
            .map(|(id, members)| {
                let fields = FIELDS
                    .iter()
                    .map(|&field| {
                        let counts = members.iter().counts_by(|r| field_label(r, field));

                        let mut shares: Vec<ValueShare> = counts
                            .into_iter()
                            .map(|(value, n)| ValueShare {
                                value,
                                share: round_to(n as f64 / members.len() as f64, round_digits),
                            })
                            .collect();

                        shares.sort_by(|a, b| {
                            b.share
                                .total_cmp(&a.share)
                                .then_with(|| a.value.cmp(&b.value))
                        });

                        FieldBreakdown { field, shares }
                    })
                    .collect();

                let ages: Vec<f64> = members.iter().filter_map(|r| r.age_numeric).collect();
                let mean_age = (!ages.is_empty())
                    .then(|| round_to(ages.iter().sum::<f64>() / ages.len() as f64, 1));

                ClusterProfile { cluster: *id, members: members.len(), fields, mean_age }
            })
            .collect();

        ClusterReport { observations: records.len(), sizes, profiles }
    }
}

#[derive(Tabled)]
struct SizeRow {
    #[tabled(rename = "Cluster")]
    cluster: String,
    #[tabled(rename = "Persona")]
    persona: String,
    #[tabled(rename = "Members")]
    members: usize,
}

#[derive(Tabled)]
struct ShareRow {
    #[tabled(rename = "Field")]
    field: &'static str,
    #[tabled(rename = "Value")]
    value: String,
    #[tabled(rename = "Share")]
    share: String,
}

pub fn run(args: StatsArgs, ctx: &AppContext) -> Result<()> {
    let config = load_config().unwrap_or_default();

    let dataset_path = args.dataset.unwrap_or(config.dataset);
    let descriptors_path = args.descriptors.unwrap_or(config.descriptors);

    if ctx.dry_run {
        if !ctx.quiet {
            println!("{}", "DRY RUN: Would report on:".yellow());
            println!("  Dataset: {}", dataset_path.display());
            println!("  Descriptors: {}", descriptors_path.display());
            println!("  Gender filter: {:?}", args.gender);
            println!("  Generation filter: {:?}", args.generation);
        }
        return Ok(());
    }

    let records = load_dataset(&dataset_path)?;
    let registry: ClusterRegistry =
        load_descriptors(&descriptors_path).context("Failed to load cluster descriptors")?;

    // Sidebar-style pre-filters; an empty filter list keeps everything.
    let filtered: Vec<SurveyRecord> = records
        .into_iter()
        .filter(|r| args.gender.is_empty() || args.gender.contains(&r.gender))
        .filter(|r| args.generation.is_empty() || args.generation.contains(&r.generation))
        .collect();

    let report = ClusterReport::build(&filtered, config.stats.round_digits);
    render(&report, &registry, ctx);

    Ok(())
}

fn render(report: &ClusterReport, registry: &ClusterRegistry, ctx: &AppContext) {
    let headline = format!(
        "Observations: {}   Clusters: {}",
        report.observations,
        report.sizes.len()
    );
    if ctx.no_color {
        println!("{headline}");
    } else {
        println!("{}", headline.bold());
    }
    println!();

    let size_rows: Vec<SizeRow> = report
        .sizes
        .iter()
        .map(|(id, members)| SizeRow {
            cluster: id.to_string(),
            persona: registry.describe(*id).name,
            members: *members,
        })
        .collect();

    println!("{}", Table::new(size_rows).with(Style::sharp()));

    if ctx.quiet {
        // Sizes only; the per-cluster breakdown is the verbose part.
        return;
    }

    for profile in &report.profiles {
        let descriptor = registry.describe(profile.cluster);

        println!();
        println!(
            "{} {}: {} ({} members)",
            "Cluster".bold().cyan(),
            profile.cluster,
            descriptor.name.bold(),
            profile.members
        );

        let rows: Vec<ShareRow> = profile
            .fields
            .iter()
            .flat_map(|breakdown| {
                breakdown.shares.iter().map(|s| ShareRow {
                    field: breakdown.field,
                    value: s.value.clone(),
                    share: s.share.to_string(),
                })
            })
            .collect();

        println!("{}", Table::new(rows).with(Style::sharp()));

        if let Some(mean_age) = profile.mean_age {
            println!("Mean age: {mean_age}");
        }
    }
}
