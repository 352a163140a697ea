//! Health and metrics monitor for the search front end.
//!
//! Prints one report per probe to stdout, as JSON or in the Prometheus text
//! exposition format. Diagnostics go to stderr so stdout can be scraped.
//!
//! ```text
//! searxng-monitor --url http://localhost:5000 --format prometheus --continuous
//! ```

use std::process::ExitCode;

use clap::Parser;
use searxng_bridge::{HealthProbe, MonitorConfig, OutputFormat};

#[derive(Parser)]
#[command(
    name = "searxng-monitor",
    version,
    about = "Monitor search front end health and metrics"
)]
struct Args {
    /// Front end base URL.
    #[arg(long, default_value = "http://localhost:5000")]
    url: String,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
    format: OutputFormat,

    /// Probe repeatedly until interrupted.
    #[arg(long)]
    continuous: bool,

    /// Seconds between probes in continuous mode.
    #[arg(long, default_value_t = 60)]
    interval: u64,
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("searxng_bridge=info")),
        )
        .init();

    let args = Args::parse();
    let config = MonitorConfig::new(args.url).with_interval_secs(args.interval);
    let probe =
        HealthProbe::new(config).map_err(|e| anyhow::anyhow!("cannot start monitor: {e}"))?;

    tokio::select! {
        code = run(&probe, args.format, args.continuous) => code,
        _ = tokio::signal::ctrl_c() => {
            println!("\nMonitoring stopped");
            Ok(ExitCode::SUCCESS)
        }
    }
}

async fn run(
    probe: &HealthProbe,
    format: OutputFormat,
    continuous: bool,
) -> anyhow::Result<ExitCode> {
    loop {
        let report = probe.check().await;
        println!("{}", format.render(&report)?);

        if !continuous {
            return Ok(if report.is_healthy() {
                ExitCode::SUCCESS
            } else {
                ExitCode::from(1)
            });
        }
        if !report.is_healthy() {
            tracing::warn!(url = %report.url, status = %report.status, "front end not healthy");
        }

        tokio::time::sleep(probe.config().interval()).await;
    }
}
