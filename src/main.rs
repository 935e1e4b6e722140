//! Command line front end for the EV vs petrol trends workspace.

use clap::{ArgAction, Parser, Subcommand};
use ev_trends::dashboard::{run_server, DashboardState};
use ev_trends::data::sample::{write_sample, SampleOptions};
use ev_trends::data::store::derive_yoy;
use ev_trends::forecast::ModelKind;
use ev_trends::report::generate_report;
use log::LevelFilter;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "ev_trends",
    version,
    about = "EV vs petrol search-interest analytics"
)]
struct Cli {
    /// Directory holding `data/` and `results/`
    #[arg(long, global = true)]
    base_dir: Option<PathBuf>,

    /// TOML configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// More log output (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Rebuild the year-over-year table from the raw time series
    Derive,
    /// Render the static PNG charts into the results directory
    Report {
        /// Forecast model for the projection chart
        #[arg(long, default_value_t = ModelKind::Linear)]
        model: ModelKind,
    },
    /// Serve the interactive dashboard
    Dashboard {
        /// Address to bind, overrides the config file
        #[arg(long)]
        bind: Option<String>,
        /// Port to listen on, overrides the config file
        #[arg(long)]
        port: Option<u16>,
    },
    /// Write deterministic sample tables into the data directory
    Sample {
        #[arg(long, default_value_t = 42)]
        seed: u64,
    },
}

fn init_logger(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Info,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };

    pretty_env_logger::formatted_builder()
        .filter_level(level)
        .parse_env("RUST_LOG")
        .init();
}

#[actix_web::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_logger(cli.verbose);

    let mut config = ev_trends::load_config(cli.config.as_deref(), cli.base_dir)?;
    let paths = config.paths();

    match cli.command {
        Commands::Derive => {
            let yoy = derive_yoy(&paths)?;
            for row in &yoy {
                log::debug!(
                    "{}: ev {} ({:?}%), petrol {} ({:?}%)",
                    row.year,
                    row.total_ev,
                    row.ev_yoy_pct,
                    row.total_petrol,
                    row.petrol_yoy_pct
                );
            }
        }
        Commands::Report { model } => {
            let outcome = generate_report(&config, model)?;
            for (chart, reason) in &outcome.skipped {
                log::warn!("{} not written: {}", chart, reason);
            }
            log::info!(
                "Wrote {} charts to {}",
                outcome.written.len(),
                paths.results_dir().display()
            );
        }
        Commands::Dashboard { bind, port } => {
            if let Some(bind) = bind {
                config.bind_addr = bind;
            }
            if let Some(port) = port {
                config.port = port;
            }
            run_server(DashboardState::load(config)?).await?;
        }
        Commands::Sample { seed } => {
            let options = SampleOptions {
                seed,
                ..SampleOptions::default()
            };
            write_sample(&paths, &options)?;
            log::info!("Sample tables written to {}", paths.data_dir().display());
        }
    }

    Ok(())
}
