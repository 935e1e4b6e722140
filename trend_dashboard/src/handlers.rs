//! HTTP handler functions for the dashboard.

use actix_web::{web, HttpResponse};
use trend_data::filter::filter_by_years;
use trend_data::filter::RegionSelector;
use trend_forecast::{check_horizon, ModelKind};

use crate::models::{
    ApiError, ApiHealth, ApiRegions, ApiTimeseries, ForecastParams, PageParams, RegionParams,
    YearRangeParams,
};
use crate::page::render_page;
use crate::view::{ranked_regions, resolve_range, DashboardView};
use crate::DashboardState;

fn parse_model(raw: Option<&str>) -> Result<ModelKind, HttpResponse> {
    match raw {
        None => Ok(ModelKind::default()),
        Some(raw) => raw
            .parse()
            .map_err(|e: trend_forecast::ForecastError| {
                HttpResponse::BadRequest().json(ApiError::new(e.to_string()))
            }),
    }
}

/// `GET /`
pub async fn index(state: web::Data<DashboardState>, params: web::Query<PageParams>) -> HttpResponse {
    let model = match parse_model(params.model.as_deref()) {
        Ok(model) => model,
        Err(response) => return response,
    };

    let view = DashboardView::build(&state.tables, &params);
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(render_page(&state, &view, model))
}

/// `GET /api/health`
pub async fn health() -> HttpResponse {
    HttpResponse::Ok().json(ApiHealth {
        healthy: true,
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// `GET /api/summary`
pub async fn summary(state: web::Data<DashboardState>) -> HttpResponse {
    HttpResponse::Ok().json(&state.summary)
}

/// `GET /api/timeseries`
///
/// Records whose year falls in `start_year..=end_year`.
pub async fn timeseries(
    state: web::Data<DashboardState>,
    params: web::Query<YearRangeParams>,
) -> HttpResponse {
    match resolve_range(&state.tables.timeseries, params.start_year, params.end_year) {
        Ok(range) => {
            let records = range
                .map(|range| filter_by_years(&state.tables.timeseries, &range))
                .unwrap_or_default();
            HttpResponse::Ok().json(ApiTimeseries { range, records })
        }
        Err(e) => HttpResponse::BadRequest().json(ApiError::new(e.to_string())),
    }
}

/// `GET /api/regions`
///
/// Region shares ranked highest first. An unknown region is an empty list.
pub async fn regions(
    state: web::Data<DashboardState>,
    params: web::Query<RegionParams>,
) -> HttpResponse {
    let selector = params
        .region
        .as_deref()
        .map(RegionSelector::parse)
        .unwrap_or_default();

    HttpResponse::Ok().json(ApiRegions {
        region: selector.to_string(),
        rows: ranked_regions(&state.tables, &selector),
    })
}

/// `GET /api/yoy`
pub async fn yoy(state: web::Data<DashboardState>) -> HttpResponse {
    HttpResponse::Ok().json(&state.tables.yoy)
}

/// `GET /api/forecast`
///
/// Projection of yearly EV totals; 400 for a bad model or horizon, 422 when
/// the data cannot be forecast.
pub async fn forecast(
    state: web::Data<DashboardState>,
    params: web::Query<ForecastParams>,
) -> HttpResponse {
    let model = match parse_model(params.model.as_deref()) {
        Ok(model) => model,
        Err(response) => return response,
    };
    let horizon = params.horizon.unwrap_or(state.config.forecast_horizon);
    if let Err(e) = check_horizon(horizon) {
        return HttpResponse::BadRequest().json(ApiError::new(e.to_string()));
    }

    match state.forecast(model, horizon) {
        Ok((_, forecast)) => HttpResponse::Ok().json(forecast),
        Err(e) => {
            log::warn!("Forecast failed: {}", e);
            HttpResponse::UnprocessableEntity().json(ApiError::new(e.to_string()))
        }
    }
}
