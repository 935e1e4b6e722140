//! # Trend Report
//!
//! Renders the static chart set for the EV vs petrol comparison and provides
//! the chart types the dashboard embeds as inline SVG.
//!
//! The report reads the raw tables and the persisted year-over-year table,
//! so run the derive step first. A failing forecast does not stop the report;
//! its chart is skipped and the reason logged.

use std::path::PathBuf;
use thiserror::Error;
use trend_data::config::AppConfig;
use trend_data::metrics::{region_shares, yearly_totals};
use trend_data::{Category, DataError, TrendTables};
use trend_forecast::{ForecastError, ModelKind};

pub mod charts;
pub mod render;

pub use charts::{BarChart, ForecastChart, ShareChart, TrendChart, YoYChart};
pub use render::{render_png, render_svg, Chart, CHART_SIZE};

/// Line chart of both categories over time
pub const TRENDS_PNG: &str = "ev_vs_petrol_trends.png";
/// Top regions by EV interest
pub const TOP_STATES_PNG: &str = "top_states_ev.png";
/// Grouped year-over-year growth bars
pub const YOY_PNG: &str = "ev_vs_petrol_yoy.png";
/// EV share per year
pub const SHARE_PNG: &str = "ev_share_by_year.png";
/// Yearly EV totals with projection
pub const FORECAST_PNG: &str = "ev_forecast.png";

/// Errors raised while producing charts
#[derive(Error, Debug)]
pub enum ReportError {
    #[error("Data error: {0}")]
    Data(#[from] DataError),

    #[error("Forecast error: {0}")]
    Forecast(#[from] ForecastError),

    #[error("Render error: {0}")]
    Render(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for report operations
pub type Result<T> = std::result::Result<T, ReportError>;

/// What a report run produced
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ReportOutcome {
    /// Chart files written, in order
    pub written: Vec<PathBuf>,
    /// Charts left out, with the reason
    pub skipped: Vec<(String, String)>,
}

impl ReportOutcome {
    fn save<C: Chart>(&mut self, chart: &C, path: PathBuf) -> Result<()> {
        render_png(chart, &path, CHART_SIZE)?;
        self.written.push(path);
        Ok(())
    }
}

/// Render the full chart set into the configured results directory
pub fn generate_report(config: &AppConfig, model: ModelKind) -> Result<ReportOutcome> {
    let paths = config.paths();
    let tables = TrendTables::load(&paths)?;
    log::info!(
        "Rendering report from {} records, {} regions and {} years",
        tables.timeseries.len(),
        tables.regions.len(),
        tables.yoy.len()
    );

    let mut outcome = ReportOutcome::default();

    outcome.save(
        &TrendChart::new(&tables.timeseries, &Category::ALL),
        paths.result_file(TRENDS_PNG),
    )?;
    outcome.save(
        &BarChart::top_regions(&tables.regions, config.top_regions),
        paths.result_file(TOP_STATES_PNG),
    )?;
    outcome.save(&YoYChart::new(&tables.yoy), paths.result_file(YOY_PNG))?;
    outcome.save(&ShareChart::new(&tables.yoy), paths.result_file(SHARE_PNG))?;

    let totals = yearly_totals(&tables.timeseries);
    match ForecastChart::project(&totals, model, config.forecast_horizon) {
        Ok((chart, forecast)) => {
            if let Some((year, value)) = forecast.last() {
                log::info!("EV interest projected to reach ~{:.0} by {}", value, year);
            }
            if let Some(accuracy) = forecast.accuracy() {
                log::info!("{} in-sample fit: {}", forecast.model(), accuracy);
            }
            outcome.save(&chart, paths.result_file(FORECAST_PNG))?;
        }
        Err(err) => {
            log::warn!("Skipping {}: {}", FORECAST_PNG, err);
            outcome
                .skipped
                .push((FORECAST_PNG.to_string(), err.to_string()));
        }
    }

    if let Some(top) = trend_data::metrics::top_region(&region_shares(&tables.regions)) {
        log::info!("Top region by EV share: {}", top.region.geoname);
    }

    Ok(outcome)
}
