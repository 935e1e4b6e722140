//! Server-rendered HTML page

use crate::view::DashboardView;
use crate::DashboardState;
use std::fmt::Write as _;
use trend_data::filter::{region_names, RegionSelector, ALL_REGIONS};
use trend_data::metrics::RegionShare;
use trend_data::Category;
use trend_forecast::ModelKind;
use trend_report::{render_svg, BarChart, Chart, ShareChart, TrendChart, YoYChart};

/// Size of the inline charts
const SVG_SIZE: (u32, u32) = (960, 420);

const STYLE: &str = "body{font-family:sans-serif;margin:0 2rem;color:#222}\
.kpis{display:flex;gap:1rem}\
.kpi{flex:1;border:1px solid #ddd;border-radius:6px;padding:0.8rem}\
.kpi .value{font-size:1.6rem;font-weight:bold}\
form{margin:1rem 0;display:flex;gap:1rem;align-items:end;flex-wrap:wrap}\
.notice,.error{color:#a33}\
table{border-collapse:collapse}td,th{border:1px solid #ddd;padding:0.2rem 0.6rem}";

/// Escape text for use in HTML content and attribute values
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// `1234567` as `1,234,567`
pub fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

fn format_pct(value: Option<f64>) -> String {
    value.map_or_else(|| "n/a".to_string(), |v| format!("{:.2}%", v))
}

fn option(value: &str, label: &str, selected: bool) -> String {
    format!(
        "<option value=\"{}\"{}>{}</option>",
        escape_html(value),
        if selected { " selected" } else { "" },
        escape_html(label)
    )
}

/// Inline SVG, or an error line when the chart cannot be drawn
fn chart_figure<C: Chart>(chart: &C) -> String {
    match render_svg(chart, SVG_SIZE) {
        Ok(svg) => format!("<figure>{}</figure>", svg),
        Err(err) => {
            log::warn!("Could not render '{}': {}", chart.title(), err);
            format!(
                "<p class=\"error\">Chart unavailable: {}</p>",
                escape_html(&err.to_string())
            )
        }
    }
}

fn kpi(label: &str, value: &str) -> String {
    format!(
        "<div class=\"kpi\"><div>{}</div><div class=\"value\">{}</div></div>",
        escape_html(label),
        escape_html(value)
    )
}

fn filter_form(state: &DashboardState, view: &DashboardView, model: ModelKind) -> String {
    let mut years = String::new();
    let mut end_years = String::new();
    if let (Some(span), Some(range)) = (view.span, view.range) {
        for year in span.start()..=span.end() {
            let label = year.to_string();
            years.push_str(&option(&label, &label, year == range.start()));
            end_years.push_str(&option(&label, &label, year == range.end()));
        }
    }

    let mut regions = option(ALL_REGIONS, ALL_REGIONS, view.selector == RegionSelector::All);
    for name in region_names(&state.tables.regions) {
        let selected = matches!(&view.selector, RegionSelector::Only(chosen) if *chosen == name);
        regions.push_str(&option(&name, &name, selected));
    }

    let metric_choices = [
        (Category::ALL.to_vec(), "Both"),
        (vec![Category::ElectricCars], Category::ElectricCars.label()),
        (vec![Category::PetrolCars], Category::PetrolCars.label()),
    ];
    let metrics: String = metric_choices
        .iter()
        .map(|(categories, label)| {
            let value = categories
                .iter()
                .map(|c| c.column())
                .collect::<Vec<_>>()
                .join(",");
            option(&value, label, *categories == view.categories)
        })
        .collect();

    let models: String = [ModelKind::Linear, ModelKind::Holt]
        .iter()
        .map(|kind| option(&kind.to_string(), &kind.to_string(), *kind == model))
        .collect();

    format!(
        "<form method=\"get\" action=\"/\">\
<label>From<br><select name=\"start_year\">{years}</select></label>\
<label>To<br><select name=\"end_year\">{end_years}</select></label>\
<label>Region<br><select name=\"region\">{regions}</select></label>\
<label>Metrics<br><select name=\"metrics\">{metrics}</select></label>\
<label>Forecast model<br><select name=\"model\">{models}</select></label>\
<button type=\"submit\">Apply</button></form>"
    )
}

fn region_table(rows: &[RegionShare]) -> String {
    let mut table = String::from(
        "<table><tr><th>Region</th><th>Electric Cars</th><th>Petrol Cars</th><th>EV Share</th></tr>",
    );
    for row in rows {
        let _ = write!(
            table,
            "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
            escape_html(&row.region.geoname),
            row.region.electric_cars,
            row.region.petrol_cars,
            format_pct(row.ev_share_pct)
        );
    }
    table.push_str("</table>");
    table
}

/// The whole dashboard for one set of filters
pub fn render_page(state: &DashboardState, view: &DashboardView, model: ModelKind) -> String {
    let summary = &state.summary;
    let mut body = String::new();

    body.push_str("<h1>EV vs Petrol Cars in India - Interactive Dashboard</h1>");
    let _ = write!(
        body,
        "<section class=\"kpis\">{}{}{}</section>",
        kpi("Total EVs", &group_thousands(summary.total_ev)),
        kpi("Total Petrol Cars", &group_thousands(summary.total_petrol)),
        kpi("Latest EV Share (%)", &format_pct(summary.latest_ev_share_pct)),
    );

    body.push_str(&filter_form(state, view, model));
    for notice in &view.notices {
        let _ = write!(body, "<p class=\"notice\">{}</p>", escape_html(notice));
    }

    body.push_str("<h2>EV vs Petrol Adoption Over Time</h2>");
    body.push_str(&chart_figure(&TrendChart::new(&view.records, &view.categories)));

    body.push_str("<h2>Regional EV vs Petrol Adoption</h2>");
    body.push_str(&chart_figure(&BarChart::region_shares(&view.regions)));
    body.push_str(&region_table(&view.regions));

    body.push_str("<h2>Year-over-Year Growth (%)</h2>");
    body.push_str(&chart_figure(&YoYChart::new(&state.tables.yoy)));

    body.push_str("<h2>EV Share of Total Cars (%)</h2>");
    body.push_str(&chart_figure(&ShareChart::new(&state.tables.yoy)));

    let horizon = state.config.forecast_horizon;
    let _ = write!(body, "<h2>Forecasting EV Adoption ({} years)</h2>", horizon);
    let projection = match state.forecast(model, horizon) {
        Ok((chart, forecast)) => {
            body.push_str(&chart_figure(&chart));
            Some(forecast)
        }
        Err(err) => {
            log::warn!("Forecast unavailable: {}", err);
            let _ = write!(
                body,
                "<p class=\"error\">Forecast unavailable: {}</p>",
                escape_html(&err.to_string())
            );
            None
        }
    };

    body.push_str("<h2>Key Insights</h2><ul>");
    let _ = write!(body, "<li>CAGR (EV): {}</li>", format_pct(summary.ev_cagr_pct));
    let _ = write!(
        body,
        "<li>Top State by EV Share: {}</li>",
        escape_html(summary.top_region.as_deref().unwrap_or("n/a"))
    );
    if let Some(forecast) = &projection {
        if let Some((year, value)) = forecast.last() {
            let _ = write!(
                body,
                "<li>EV interest expected to reach ~{} by {}</li>",
                group_thousands(value.round() as u64),
                year
            );
        }
        if let Some(accuracy) = forecast.accuracy() {
            let _ = write!(
                body,
                "<li>Forecast fit on observed years ({}): {}</li>",
                escape_html(forecast.model()),
                accuracy
            );
        }
    }
    body.push_str("</ul>");

    format!(
        "<!DOCTYPE html><html><head><meta charset=\"utf-8\">\
<title>EV vs Petrol Cars Dashboard</title><style>{}</style></head><body>{}</body></html>",
        STYLE, body
    )
}
