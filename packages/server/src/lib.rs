#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Actix-Web API server for the disaster map dashboard.
//!
//! Loads the dataset once at startup and serves derived views over a REST
//! API. Each request carries its own selection as query parameters, so the
//! server holds no per-client state; the pristine store is shared
//! read-only. Frontend files are served from the configured static
//! directory when it exists.

mod handlers;
pub mod interactive;

use std::sync::Arc;

use actix_cors::Cors;
use actix_files::Files;
use actix_web::{App, HttpServer, middleware, web};
use disaster_map_dashboard::DashboardConfig;
use disaster_map_disaster_models::{DisasterStore, Metric, YearRange, year_bounds};
use disaster_map_source::load::{DatasetLocation, load_store};
use disaster_map_source::progress::null_progress;

/// Shared application state.
pub struct AppState {
    /// The pristine record store. Never modified after startup.
    pub store: Arc<DisasterStore>,
    /// Full year range of the dataset.
    pub bounds: YearRange,
    /// Metric used when a request does not name one.
    pub default_metric: Metric,
}

impl AppState {
    /// Wraps a loaded store. Returns `None` if the store holds no years.
    #[must_use]
    pub fn new(store: DisasterStore, default_metric: Metric) -> Option<Self> {
        let bounds = year_bounds(&store)?;
        Some(Self {
            store: Arc::new(store),
            bounds,
            default_metric,
        })
    }
}

/// Registers the `/api` routes.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .route("/health", web::get().to(handlers::health))
            .route("/meta", web::get().to(handlers::meta))
            .route("/views", web::get().to(handlers::views))
            .route("/countries/{name}", web::get().to(handlers::country)),
    );
}

/// Loads the dataset named by `config` and starts the API server.
///
/// The dataset is loaded before binding; a dataset that cannot be loaded
/// keeps the server from starting. Bind address and port come from
/// `BIND_ADDR` and `PORT`. This is a regular async function; the caller
/// provides the runtime (e.g. via `#[actix_web::main]`).
///
/// # Errors
///
/// Returns an `std::io::Result` error if the dataset cannot be loaded, or
/// the HTTP server fails to bind or encounters a runtime error.
#[allow(clippy::future_not_send)]
pub async fn run_server(config: DashboardConfig) -> std::io::Result<()> {
    let location = DatasetLocation::parse(&config.data_path);
    log::info!("Loading dataset from {location}...");

    let outcome = load_store(&location, &null_progress())
        .await
        .map_err(std::io::Error::other)?;
    if !outcome.errors.is_empty() {
        log::warn!("{} malformed rows were skipped", outcome.errors.len());
    }

    let state = AppState::new(outcome.store, config.metric).ok_or_else(|| {
        std::io::Error::other(format!("Dataset at {location} has no year data"))
    })?;
    log::info!(
        "Serving {} countries over {}",
        state.store.len(),
        state.bounds
    );
    let state = web::Data::new(state);

    let static_dir = config.static_dir.filter(|dir| dir.is_dir());
    match &static_dir {
        Some(dir) => log::info!("Serving static files from {}", dir.display()),
        None => log::info!("No static directory; serving the API only"),
    }

    let bind_addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "127.0.0.1".to_string());
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(8080);

    log::info!("Starting server on {bind_addr}:{port}");

    HttpServer::new(move || {
        let cors = Cors::permissive();

        let app = App::new()
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .app_data(state.clone())
            .configure(configure);

        match &static_dir {
            Some(dir) => app.service(Files::new("/", dir).index_file("index.html")),
            None => app,
        }
    })
    .bind((bind_addr, port))?
    .run()
    .await
}
