//! Actix-Web dashboard for the EV vs petrol trends.
//!
//! Serves a server-rendered HTML page with inline SVG charts at `/` and a
//! JSON API under `/api`. The tables are loaded once at startup and shared
//! read-only between workers; every request recomputes its filtered view.

pub mod handlers;
pub mod models;
pub mod page;
pub mod view;

use actix_web::{middleware, web, App, HttpServer};
use trend_data::config::AppConfig;
use trend_data::metrics::{summarize, yearly_totals, Summary};
use trend_data::TrendTables;
use trend_forecast::{ForecastResult, ModelKind};
use trend_report::ForecastChart;

/// Shared application state.
#[derive(Debug, Clone)]
pub struct DashboardState {
    /// Loaded tables, never mutated after startup
    pub tables: TrendTables,
    pub config: AppConfig,
    /// KPIs over the unfiltered tables
    pub summary: Summary,
}

impl DashboardState {
    pub fn new(tables: TrendTables, config: AppConfig) -> Self {
        let summary = summarize(
            &tables.timeseries,
            &tables.regions,
            &tables.yoy,
            config.min_samples_per_year,
        );
        Self {
            tables,
            config,
            summary,
        }
    }

    /// Load the tables from the locations in `config`
    pub fn load(config: AppConfig) -> trend_data::Result<Self> {
        let tables = TrendTables::load(&config.paths())?;
        log::info!(
            "Loaded {} records, {} regions and {} years",
            tables.timeseries.len(),
            tables.regions.len(),
            tables.yoy.len()
        );
        Ok(Self::new(tables, config))
    }

    /// Project yearly EV totals `horizon` years ahead
    pub fn forecast(
        &self,
        model: ModelKind,
        horizon: usize,
    ) -> trend_forecast::Result<(ForecastChart, ForecastResult)> {
        ForecastChart::project(&yearly_totals(&self.tables.timeseries), model, horizon)
    }
}

/// Register the page and API routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(handlers::index)).service(
        web::scope("/api")
            .route("/health", web::get().to(handlers::health))
            .route("/summary", web::get().to(handlers::summary))
            .route("/timeseries", web::get().to(handlers::timeseries))
            .route("/regions", web::get().to(handlers::regions))
            .route("/yoy", web::get().to(handlers::yoy))
            .route("/forecast", web::get().to(handlers::forecast)),
    );
}

/// Starts the dashboard server on the configured address.
///
/// This is a regular async function; the caller provides the runtime (e.g.
/// via `#[actix_web::main]`).
///
/// # Errors
///
/// Returns an `std::io::Result` error if the HTTP server fails to bind or
/// encounters a runtime error.
pub async fn run_server(state: DashboardState) -> std::io::Result<()> {
    let bind_addr = state.config.bind_addr.clone();
    let port = state.config.port;
    let state = web::Data::new(state);

    log::info!("Starting dashboard on http://{}:{}", bind_addr, port);

    HttpServer::new(move || {
        App::new()
            .wrap(middleware::Logger::default())
            .app_data(state.clone())
            .configure(configure)
    })
    .bind((bind_addr, port))?
    .run()
    .await
}
