//! Drawing of the prepared charts with plotters
//!
//! Every chart draws onto any [`DrawingBackend`], so the same code produces
//! the PNG files of the static report and the inline SVG of the dashboard.

use crate::charts::{BarChart, ForecastChart, Series, ShareChart, TrendChart, YoYChart};
use crate::{ReportError, Result};
use chrono::NaiveDate;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::{register_font, FontStyle, FontTransform};
use std::fs;
use std::path::Path;
use std::sync::OnceLock;

/// Default size of a rendered chart in pixels
pub const CHART_SIZE: (u32, u32) = (1200, 600);

/// Half the width of a grouped YoY bar, in years
const BAR_WIDTH: f64 = 0.35;

const CAPTION_FONT: (&str, u32) = ("sans-serif", 24);

/// DejaVu Sans, bundled so rendering works on hosts without fonts
static EMBEDDED_FONT: &[u8] = include_bytes!("../assets/DejaVuSans.ttf");

/// Register the embedded font as the `sans-serif` family.
///
/// Runs once per process; later calls return the first outcome.
pub fn register_fonts() -> Result<()> {
    static REGISTERED: OnceLock<bool> = OnceLock::new();

    let registered = *REGISTERED.get_or_init(|| {
        register_font("sans-serif", FontStyle::Normal, EMBEDDED_FONT).is_ok()
    });
    if registered {
        Ok(())
    } else {
        Err(ReportError::Render(
            "Embedded chart font could not be parsed".to_string(),
        ))
    }
}

fn render_err<E: std::fmt::Display>(err: E) -> ReportError {
    ReportError::Render(err.to_string())
}

fn color((r, g, b): (u8, u8, u8)) -> RGBColor {
    RGBColor(r, g, b)
}

/// A chart that can draw itself onto a drawing area
pub trait Chart {
    fn title(&self) -> &str;

    /// True when there is nothing to plot
    fn is_empty(&self) -> bool;

    /// Draw onto a cleared area; only called when the chart is not empty
    fn plot<DB: DrawingBackend>(&self, area: &DrawingArea<DB, Shift>) -> Result<()>;
}

/// Clear `area` and draw `chart`, or a notice when it has no data
pub fn draw<DB: DrawingBackend, C: Chart>(chart: &C, area: &DrawingArea<DB, Shift>) -> Result<()> {
    register_fonts()?;
    area.fill(&WHITE).map_err(render_err)?;

    if chart.is_empty() {
        area.draw(&Text::new(
            format!("{}: no data for the current selection", chart.title()),
            (40, 40),
            ("sans-serif", 20).into_font(),
        ))
        .map_err(render_err)?;
        return Ok(());
    }

    chart.plot(area)
}

/// Render `chart` into a PNG file, creating the parent directory
pub fn render_png<C: Chart, P: AsRef<Path>>(chart: &C, path: P, size: (u32, u32)) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let root = BitMapBackend::new(path, size).into_drawing_area();
    draw(chart, &root)?;
    root.present().map_err(render_err)?;

    log::info!("Saved {}", path.display());
    Ok(())
}

/// Render `chart` as an SVG document
pub fn render_svg<C: Chart>(chart: &C, size: (u32, u32)) -> Result<String> {
    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, size).into_drawing_area();
        draw(chart, &root)?;
        root.present().map_err(render_err)?;
    }
    Ok(svg)
}

/// Line plus point markers for one series
fn draw_line<DB, X, Y>(
    chart: &mut ChartContext<'_, DB, Cartesian2d<X, Y>>,
    series: &[(X::ValueType, Y::ValueType)],
    label: &str,
    rgb: (u8, u8, u8),
) -> Result<()>
where
    DB: DrawingBackend,
    X: Ranged,
    Y: Ranged,
    X::ValueType: Clone + 'static,
    Y::ValueType: Clone + 'static,
{
    let line_color = color(rgb);
    chart
        .draw_series(LineSeries::new(series.iter().cloned(), line_color.stroke_width(2)))
        .map_err(render_err)?
        .label(label)
        .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], line_color.stroke_width(2)));

    chart
        .draw_series(
            series
                .iter()
                .cloned()
                .map(|point| Circle::new(point, 3, line_color.filled())),
        )
        .map_err(render_err)?;
    Ok(())
}

impl Chart for TrendChart {
    fn title(&self) -> &str {
        &self.title
    }

    fn is_empty(&self) -> bool {
        TrendChart::is_empty(self)
    }

    fn plot<DB: DrawingBackend>(&self, area: &DrawingArea<DB, Shift>) -> Result<()> {
        let Some((from, to)) = self.date_range() else {
            return Ok(());
        };

        let mut chart = ChartBuilder::on(area)
            .caption(&self.title, CAPTION_FONT)
            .margin(15)
            .x_label_area_size(40)
            .y_label_area_size(60)
            .build_cartesian_2d(from..to, 0f64..self.y_max())
            .map_err(render_err)?;

        chart
            .configure_mesh()
            .x_desc("Year")
            .y_desc("Search interest")
            .x_label_formatter(&|d: &NaiveDate| d.format("%Y").to_string())
            .draw()
            .map_err(render_err)?;

        for Series { label, rgb, points } in &self.series {
            draw_line(&mut chart, points.as_slice(), label, *rgb)?;
        }

        chart
            .configure_series_labels()
            .background_style(&WHITE.mix(0.8))
            .border_style(&BLACK)
            .draw()
            .map_err(render_err)?;
        Ok(())
    }
}

impl Chart for BarChart {
    fn title(&self) -> &str {
        &self.title
    }

    fn is_empty(&self) -> bool {
        BarChart::is_empty(self)
    }

    fn plot<DB: DrawingBackend>(&self, area: &DrawingArea<DB, Shift>) -> Result<()> {
        let count = self.bars.len() as u32;

        let mut chart = ChartBuilder::on(area)
            .caption(&self.title, CAPTION_FONT)
            .margin(15)
            .x_label_area_size(120)
            .y_label_area_size(60)
            .build_cartesian_2d((0u32..count).into_segmented(), 0f64..self.y_max())
            .map_err(render_err)?;

        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_labels(self.bars.len())
            .x_desc(self.x_desc.as_str())
            .y_desc(self.y_desc.as_str())
            .x_label_style(("sans-serif", 12).into_font().transform(FontTransform::Rotate90))
            .x_label_formatter(&|value: &SegmentValue<u32>| match value {
                SegmentValue::CenterOf(index) => self
                    .bars
                    .get(*index as usize)
                    .map(|(name, _)| name.clone())
                    .unwrap_or_default(),
                _ => String::new(),
            })
            .draw()
            .map_err(render_err)?;

        chart
            .draw_series(
                Histogram::vertical(&chart)
                    .style(color(self.rgb).filled())
                    .margin(6)
                    .data(
                        self.bars
                            .iter()
                            .enumerate()
                            .map(|(index, (_, value))| (index as u32, *value)),
                    ),
            )
            .map_err(render_err)?;
        Ok(())
    }
}

impl Chart for YoYChart {
    fn title(&self) -> &str {
        &self.title
    }

    fn is_empty(&self) -> bool {
        YoYChart::is_empty(self)
    }

    fn plot<DB: DrawingBackend>(&self, area: &DrawingArea<DB, Shift>) -> Result<()> {
        let first = self.years.first().copied().unwrap_or_default();
        let last = self.years.last().copied().unwrap_or(first);
        let (low, high) = self.y_range();
        let x_range = (f64::from(first) - 0.6)..(f64::from(last) + 0.6);

        let mut chart = ChartBuilder::on(area)
            .caption(&self.title, CAPTION_FONT)
            .margin(15)
            .x_label_area_size(40)
            .y_label_area_size(60)
            .build_cartesian_2d(x_range.clone(), low..high)
            .map_err(render_err)?;

        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_labels(self.years.len() + 1)
            .x_label_formatter(&|x: &f64| {
                if (x - x.round()).abs() < 0.05 {
                    format!("{:.0}", x)
                } else {
                    String::new()
                }
            })
            .x_desc("Year")
            .y_desc("YoY % Change")
            .draw()
            .map_err(render_err)?;

        chart
            .draw_series(LineSeries::new(
                vec![(x_range.start, 0.0), (x_range.end, 0.0)],
                BLACK.stroke_width(1),
            ))
            .map_err(render_err)?;

        let groups = [
            ("EV YoY %", &self.ev, trend_data::Category::ElectricCars.rgb(), -BAR_WIDTH),
            ("Petrol YoY %", &self.petrol, trend_data::Category::PetrolCars.rgb(), 0.0),
        ];
        for (label, values, rgb, offset) in groups {
            let bar_color = color(rgb);
            let bars = self.years.iter().zip(values.iter()).filter_map(|(&year, pct)| {
                pct.map(|value| {
                    let x = f64::from(year) + offset;
                    Rectangle::new(
                        [(x, value.max(0.0)), (x + BAR_WIDTH, value.min(0.0))],
                        bar_color.filled(),
                    )
                })
            });

            chart
                .draw_series(bars)
                .map_err(render_err)?
                .label(label)
                .legend(move |(x, y)| Rectangle::new([(x, y - 5), (x + 15, y + 5)], bar_color.filled()));
        }

        chart
            .configure_series_labels()
            .background_style(&WHITE.mix(0.8))
            .border_style(&BLACK)
            .draw()
            .map_err(render_err)?;
        Ok(())
    }
}

impl Chart for ShareChart {
    fn title(&self) -> &str {
        &self.title
    }

    fn is_empty(&self) -> bool {
        ShareChart::is_empty(self)
    }

    fn plot<DB: DrawingBackend>(&self, area: &DrawingArea<DB, Shift>) -> Result<()> {
        let points: Vec<(f64, f64)> = self
            .series
            .points
            .iter()
            .map(|&(year, share)| (f64::from(year), share))
            .collect();
        let first = points.first().map(|p| p.0).unwrap_or_default();
        let last = points.last().map(|p| p.0).unwrap_or(first);

        let mut chart = ChartBuilder::on(area)
            .caption(&self.title, CAPTION_FONT)
            .margin(15)
            .x_label_area_size(40)
            .y_label_area_size(60)
            .build_cartesian_2d((first - 0.5)..(last + 0.5), 0f64..100f64)
            .map_err(render_err)?;

        chart
            .configure_mesh()
            .x_labels(points.len() + 1)
            .x_label_formatter(&|x: &f64| format!("{:.0}", x))
            .x_desc("Year")
            .y_desc("EV Share %")
            .draw()
            .map_err(render_err)?;

        draw_line(&mut chart, points.as_slice(), &self.series.label, self.series.rgb)
    }
}

impl Chart for ForecastChart {
    fn title(&self) -> &str {
        &self.title
    }

    fn is_empty(&self) -> bool {
        ForecastChart::is_empty(self)
    }

    fn plot<DB: DrawingBackend>(&self, area: &DrawingArea<DB, Shift>) -> Result<()> {
        let (first, last) = self.year_span();
        let as_xy = |points: &[(i32, f64)]| -> Vec<(f64, f64)> {
            points.iter().map(|&(year, v)| (f64::from(year), v)).collect()
        };

        let mut chart = ChartBuilder::on(area)
            .caption(&self.title, CAPTION_FONT)
            .margin(15)
            .x_label_area_size(40)
            .y_label_area_size(70)
            .build_cartesian_2d(
                (f64::from(first) - 0.5)..(f64::from(last) + 0.5),
                0f64..self.y_max(),
            )
            .map_err(render_err)?;

        chart
            .configure_mesh()
            .x_label_formatter(&|x: &f64| format!("{:.0}", x))
            .x_desc("Year")
            .y_desc("Yearly EV interest")
            .draw()
            .map_err(render_err)?;

        if !self.band.is_empty() {
            let mut outline: Vec<(f64, f64)> = self
                .band
                .iter()
                .map(|&(year, _, high)| (f64::from(year), high))
                .collect();
            outline.extend(self.band.iter().rev().map(|&(year, low, _)| (f64::from(year), low)));

            let band_color = color(self.projected.rgb).mix(0.2);
            chart
                .draw_series(std::iter::once(Polygon::new(outline, band_color.filled())))
                .map_err(render_err)?;
        }

        draw_line(
            &mut chart,
            as_xy(&self.observed.points).as_slice(),
            &self.observed.label,
            self.observed.rgb,
        )?;
        draw_line(
            &mut chart,
            as_xy(&self.projected.points).as_slice(),
            &self.projected.label,
            self.projected.rgb,
        )?;

        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperLeft)
            .background_style(&WHITE.mix(0.8))
            .border_style(&BLACK)
            .draw()
            .map_err(render_err)?;
        Ok(())
    }
}
