//! Interactive mode for the server.
//!
//! Prompts the user for the dataset, bind address, and port before
//! starting the server.

use dialoguer::{Confirm, Input};
use disaster_map_dashboard::DashboardConfig;

/// Runs the server in interactive mode, prompting for configuration.
///
/// Asks for a dataset path (pre-filled from `config`), a bind address and
/// a port, sets the corresponding environment variables (`BIND_ADDR`,
/// `PORT`), and delegates to [`super::run_server`].
///
/// # Errors
///
/// Returns an `std::io::Result` error if the dataset cannot be loaded or
/// the underlying server fails to start.
#[allow(clippy::future_not_send)]
pub async fn run(mut config: DashboardConfig) -> std::io::Result<()> {
    println!("Disaster Map Server");
    println!();

    config.data_path = Input::new()
        .with_prompt("Dataset path or URL")
        .default(config.data_path.clone())
        .interact_text()
        .unwrap_or_else(|_| config.data_path.clone());

    let bind_addr: String = Input::new()
        .with_prompt("Bind address")
        .default("127.0.0.1".to_string())
        .interact_text()
        .unwrap_or_else(|_| "127.0.0.1".to_string());

    let port_str: String = Input::new()
        .with_prompt("Port")
        .default("8080".to_string())
        .interact_text()
        .unwrap_or_else(|_| "8080".to_string());

    // SAFETY: We are single-threaded at this point (before server starts) and
    // these variables are only read once during server initialisation.
    unsafe {
        std::env::set_var("BIND_ADDR", &bind_addr);
        std::env::set_var("PORT", &port_str);
    }

    if !Confirm::new()
        .with_prompt(format!("Start server on {bind_addr}:{port_str}?"))
        .default(true)
        .interact()
        .unwrap_or(true)
    {
        println!("Cancelled.");
        return Ok(());
    }

    super::run_server(config).await
}
