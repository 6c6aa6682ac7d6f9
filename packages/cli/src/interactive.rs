//! Interactive mode.
//!
//! Drives a [`Dashboard`] from `dialoguer` menus: each menu choice is
//! reported as the same [`Interaction`] a chart click would produce, and
//! the terminal charts redraw after every change.

use dialoguer::{Input, Select};
use disaster_map_analytics::aggregate::country_summary;
use disaster_map_analytics::format::{
    format_metric_value, format_ratio_per_million, format_year_range,
};
use disaster_map_cli_utils::MultiProgress;
use disaster_map_dashboard::{ChartSet, Dashboard, DashboardConfig, Interaction};
use disaster_map_disaster_models::{DisasterType, Metric, Year, YearRange};

use crate::dataset;
use crate::render::{TerminalBars, TerminalLine, TerminalMap};

/// Top-level tool selection.
enum Tool {
    Explore,
    Server,
}

impl Tool {
    const ALL: &[Self] = &[Self::Explore, Self::Server];

    #[must_use]
    const fn label(&self) -> &'static str {
        match self {
            Self::Explore => "Explore the dashboard",
            Self::Server => "Start server",
        }
    }
}

/// Actions available while exploring.
enum Action {
    DisasterType,
    Country,
    Years,
    Metric,
    CountryDetails,
    Reset,
    Quit,
}

impl Action {
    const ALL: &[Self] = &[
        Self::DisasterType,
        Self::Country,
        Self::Years,
        Self::Metric,
        Self::CountryDetails,
        Self::Reset,
        Self::Quit,
    ];

    #[must_use]
    const fn label(&self) -> &'static str {
        match self {
            Self::DisasterType => "Select disaster type (bar chart)",
            Self::Country => "Select country (map)",
            Self::Years => "Set year range (time slider)",
            Self::Metric => "Change metric",
            Self::CountryDetails => "Show country totals",
            Self::Reset => "Reset selection",
            Self::Quit => "Quit",
        }
    }
}

/// Runs the interactive menu.
///
/// # Errors
///
/// Returns an error if the dataset cannot be loaded, a prompt fails, or
/// the server fails to start.
pub async fn run(
    config: DashboardConfig,
    multi: &MultiProgress,
) -> Result<(), Box<dyn std::error::Error>> {
    println!("Disaster Map");
    println!();

    let labels: Vec<&str> = Tool::ALL.iter().map(Tool::label).collect();

    let idx = Select::new()
        .with_prompt("What would you like to do?")
        .items(&labels)
        .default(0)
        .interact()?;

    match Tool::ALL[idx] {
        Tool::Explore => explore(config, multi).await?,
        Tool::Server => {
            // The server uses actix-web's runtime, so we need to run it
            // in a blocking task to avoid nesting tokio runtimes.
            tokio::task::spawn_blocking(move || {
                actix_web::rt::System::new()
                    .block_on(disaster_map_server::interactive::run(config))
            })
            .await??;
        }
    }

    Ok(())
}

async fn explore(
    config: DashboardConfig,
    multi: &MultiProgress,
) -> Result<(), Box<dyn std::error::Error>> {
    let dataset = dataset::load(&config, multi).await?;

    let charts = ChartSet::new()
        .with_map(TerminalMap)
        .with_bar(TerminalBars)
        .with_line(TerminalLine);
    let mut dashboard = Dashboard::new(
        dataset.store,
        dataset.bounds,
        config.initial_years(dataset.bounds),
        config.metric,
        charts,
    );

    let labels: Vec<&str> = Action::ALL.iter().map(Action::label).collect();

    loop {
        println!("Selection: {}", describe(&dashboard));

        let idx = Select::new()
            .with_prompt("Dashboard")
            .items(&labels)
            .default(0)
            .interact()?;

        let interaction = match Action::ALL[idx] {
            Action::DisasterType => Interaction::BarClicked(prompt_disaster_type()?),
            Action::Country => Interaction::CountryClicked(prompt_country(&dashboard)?),
            Action::Years => {
                let (start, end) = prompt_years(dashboard.selection().years, dashboard.bounds())?;
                Interaction::SliderChanged(start, end)
            }
            Action::Metric => Interaction::MetricChanged(prompt_metric()?),
            Action::CountryDetails => {
                show_country(&dashboard, &prompt_country(&dashboard)?);
                continue;
            }
            Action::Reset => Interaction::ResetClicked,
            Action::Quit => break,
        };

        dashboard.handle(interaction);
    }

    Ok(())
}

fn describe(dashboard: &Dashboard) -> String {
    let selection = dashboard.selection();
    format!(
        "{}, country: {}, type: {}, metric: {}",
        format_year_range(selection.years),
        selection.country.as_deref().unwrap_or("all"),
        selection
            .disaster_type
            .map_or_else(|| "all".to_string(), |t| t.to_string()),
        selection.metric.label()
    )
}

fn prompt_disaster_type() -> Result<DisasterType, dialoguer::Error> {
    let labels: Vec<String> = DisasterType::all().iter().map(ToString::to_string).collect();
    let idx = Select::new()
        .with_prompt("Disaster type (selecting the current one clears it)")
        .items(&labels)
        .default(0)
        .interact()?;
    Ok(DisasterType::all()[idx])
}

fn prompt_metric() -> Result<Metric, dialoguer::Error> {
    let labels: Vec<&str> = Metric::all().iter().map(|m| m.label()).collect();
    let idx = Select::new()
        .with_prompt("Metric")
        .items(&labels)
        .default(0)
        .interact()?;
    Ok(Metric::all()[idx])
}

fn prompt_country(dashboard: &Dashboard) -> Result<String, dialoguer::Error> {
    let store = dashboard.pristine();
    Input::<String>::new()
        .with_prompt("Country name")
        .validate_with(|name: &String| -> Result<(), String> {
            if store.contains_key(name.trim()) {
                Ok(())
            } else {
                Err(format!("No data for '{}'", name.trim()))
            }
        })
        .interact_text()
        .map(|name| name.trim().to_string())
}

fn prompt_years(current: YearRange, bounds: YearRange) -> Result<(Year, Year), dialoguer::Error> {
    let in_bounds = |year: &Year| -> Result<(), String> {
        if bounds.contains(*year) {
            Ok(())
        } else {
            Err(format!("Years run from {} to {}", bounds.start(), bounds.end()))
        }
    };

    let start = Input::<Year>::new()
        .with_prompt("First year")
        .default(current.start())
        .validate_with(in_bounds)
        .interact_text()?;
    let end = Input::<Year>::new()
        .with_prompt("Last year")
        .default(current.end())
        .validate_with(in_bounds)
        .interact_text()?;

    Ok((start, end))
}

fn show_country(dashboard: &Dashboard, name: &str) {
    let Some(summary) = country_summary(dashboard.pristine(), name) else {
        println!("No data for {name}");
        return;
    };

    let average = dashboard
        .views()
        .map
        .countries
        .iter()
        .find(|c| c.country_name == name)
        .and_then(|c| c.average_ratio);

    println!();
    println!("{}", summary.country_name);
    println!(
        "  Deaths per capita ({}): {}",
        format_year_range(dashboard.selection().years),
        format_ratio_per_million(average)
    );
    println!(
        "  {}: {}",
        Metric::Death.label(),
        format_metric_value(Metric::Death, summary.total_deaths)
    );
    println!(
        "  {}: {}",
        Metric::Affected.label(),
        format_metric_value(Metric::Affected, summary.total_affected)
    );
    println!(
        "  {}: {}",
        Metric::Damage.label(),
        format_metric_value(Metric::Damage, summary.total_damage)
    );
    match (summary.first_year, summary.last_year) {
        (Some(first), Some(last)) => {
            println!("  {} events, {first} to {last}", summary.events);
        }
        _ => println!("  No recorded events"),
    }
    println!();
}
