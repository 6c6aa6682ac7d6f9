#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Command-line front end for the disaster map dashboard.
//!
//! ```text
//! disaster_map views [--start 1970] [--end 2000] [--country Chile] [--disaster-type Flood] [--metric affected]
//! disaster_map total <country> [--field "Total deaths"]
//! disaster_map serve
//! ```
//!
//! Running `disaster_map` with no subcommand enters interactive mode.
//!
//! Uses `indicatif-log-bridge` (via [`disaster_map_cli_utils::init_logger`])
//! to route `log` output through `indicatif::MultiProgress` so that log
//! lines and the loading progress bar never fight for the terminal.

mod dataset;
mod interactive;
mod render;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use disaster_map_analytics::aggregate::get_total;
use disaster_map_dashboard::{DashboardConfig, Selection, derive_views};
use disaster_map_disaster_models::{DisasterType, Metric, Year, YearRange, fields};

#[derive(Parser)]
#[command(
    name = "disaster_map",
    about = "Explore natural disaster statistics by country, type, and year"
)]
struct Cli {
    /// Dataset path or URL (overrides the config file and `DISASTER_MAP_DATA`)
    #[arg(long, global = true)]
    data: Option<String>,

    /// Config file (overrides `DISASTER_MAP_CONFIG`)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the map, bar, and line views for a selection as JSON
    Views {
        /// First year (defaults to the configured or dataset start)
        #[arg(long)]
        start: Option<Year>,
        /// Last year (defaults to the configured or dataset end)
        #[arg(long)]
        end: Option<Year>,
        /// Selected country
        #[arg(long)]
        country: Option<String>,
        /// Selected disaster type, e.g. "Flood"
        #[arg(long, value_parser = parse_disaster_type)]
        disaster_type: Option<DisasterType>,
        /// Metric for the bar and line views
        #[arg(long, value_parser = parse_metric)]
        metric: Option<Metric>,
    },
    /// Sum one statistic column over every year and type for a country
    Total {
        /// Country name
        country: String,
        /// Statistic column
        #[arg(long, default_value = fields::TOTAL_DEATHS)]
        field: String,
    },
    /// Start the HTTP API server
    Serve,
}

fn parse_disaster_type(s: &str) -> Result<DisasterType, String> {
    s.parse().map_err(|_| {
        let names: Vec<String> = DisasterType::all().iter().map(ToString::to_string).collect();
        format!("unknown disaster type '{s}' (expected one of: {})", names.join(", "))
    })
}

fn parse_metric(s: &str) -> Result<Metric, String> {
    s.parse().map_err(|_| {
        let names: Vec<String> = Metric::all().iter().map(ToString::to_string).collect();
        format!("unknown metric '{s}' (expected one of: {})", names.join(", "))
    })
}

fn load_config(cli: &Cli) -> Result<DashboardConfig, Box<dyn std::error::Error>> {
    let mut config = match &cli.config {
        Some(path) => DashboardConfig::load(path)?,
        None => DashboardConfig::from_env()?,
    };
    if let Some(data) = &cli.data {
        config.data_path.clone_from(data);
    }
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let multi = disaster_map_cli_utils::init_logger();
    let cli = Cli::parse();
    let config = load_config(&cli)?;

    let Some(command) = cli.command else {
        return interactive::run(config, &multi).await;
    };

    match command {
        Commands::Views {
            start,
            end,
            country,
            disaster_type,
            metric,
        } => {
            let dataset = dataset::load(&config, &multi).await?;
            let initial = config.initial_years(dataset.bounds);
            let years = YearRange::new(
                start.unwrap_or_else(|| initial.start()),
                end.unwrap_or_else(|| initial.end()),
            )?
            .clamp_to(dataset.bounds);

            let mut selection = Selection::new(years, metric.unwrap_or(config.metric));
            selection.country = country;
            selection.disaster_type = disaster_type;

            let views = derive_views(&dataset.store, &selection);
            println!("{}", serde_json::to_string_pretty(&views)?);
        }
        Commands::Total { country, field } => {
            let dataset = dataset::load(&config, &multi).await?;
            if !dataset.store.contains_key(&country) {
                eprintln!("Country not found: {country}");
                std::process::exit(1);
            }
            println!("{}", get_total(&dataset.store, &country, &field));
        }
        Commands::Serve => {
            // The server uses actix-web's runtime, so we need to run it
            // in a blocking task to avoid nesting tokio runtimes.
            tokio::task::spawn_blocking(move || {
                actix_web::rt::System::new().block_on(disaster_map_server::run_server(config))
            })
            .await??;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn views_args_parse_type_and_metric() {
        let cli = Cli::try_parse_from([
            "disaster_map",
            "views",
            "--disaster-type",
            "Extreme temperature",
            "--metric",
            "affected",
        ])
        .unwrap();

        match cli.command {
            Some(Commands::Views {
                disaster_type,
                metric,
                ..
            }) => {
                assert_eq!(disaster_type, Some(DisasterType::ExtremeTemperature));
                assert_eq!(metric, Some(Metric::Affected));
            }
            _ => panic!("expected views command"),
        }
    }

    #[test]
    fn unknown_type_and_metric_are_rejected() {
        assert!(parse_disaster_type("Meteor").unwrap_err().contains("Flood"));
        assert!(parse_metric("casualties").unwrap_err().contains("death"));
        assert!(
            Cli::try_parse_from(["disaster_map", "views", "--metric", "casualties"]).is_err()
        );
    }
}
