#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Standalone entry point for the disaster map API server.
//!
//! Reads [`DashboardConfig`] from `DISASTER_MAP_CONFIG` (default
//! `disaster_map.toml`) and `DISASTER_MAP_DATA`, then serves until
//! interrupted.

use disaster_map_dashboard::DashboardConfig;

#[actix_web::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::init_custom_env("RUST_LOG");

    let config = DashboardConfig::from_env()?;
    disaster_map_server::run_server(config).await?;

    Ok(())
}
