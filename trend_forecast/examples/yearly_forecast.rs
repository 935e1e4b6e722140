use trend_data::metrics::yearly_totals;
use trend_data::sample::{generate_timeseries, SampleOptions};
use trend_forecast::utils::forecast_accuracy;
use trend_forecast::{
    forecast_yearly, ForecastModel, LinearTrend, ModelKind, TrainedForecastModel, YearlySeries,
    DEFAULT_CONFIDENCE,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Weekly sample interest, summed per year
    let records = generate_timeseries(&SampleOptions::default())?;
    let totals = yearly_totals(&records);
    println!("Loaded {} weekly records over {} years", records.len(), totals.len());

    let series = YearlySeries::from_totals(&totals)?;

    for kind in [ModelKind::Linear, ModelKind::Holt] {
        let forecast = forecast_yearly(kind, &series, 6, Some(DEFAULT_CONFIDENCE))?;
        println!("\nForecast using {}:", forecast.model());

        let intervals = forecast.intervals();
        for (year, value) in forecast.values() {
            match intervals.and_then(|i| i.get(year)) {
                Some((low, high)) => println!("{}: {:.0} ({:.0} - {:.0})", year, value, low, high),
                None => println!("{}: {:.0}", year, value),
            }
        }
    }

    // In-sample fit of the linear trend
    let trained = LinearTrend::new().train(&series)?;
    let accuracy = forecast_accuracy(trained.fitted(), series.values())?;
    println!("\nLinear trend in-sample accuracy: {}", accuracy);

    Ok(())
}
