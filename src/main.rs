use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::io::{BufWriter, Write};
use std::path::PathBuf;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use vineyard_sensor_sim::config::Config;
use vineyard_sensor_sim::generator::{BatchGenerator, StreamingGenerator};
use vineyard_sensor_sim::simulation::{build_sensors, step_from_minutes};
use vineyard_sensor_sim::sink::InfluxDbSink;
use vineyard_sensor_sim::telemetry::{init_tracing, shutdown_signal};

#[derive(Parser)]
#[command(name = "vineyard-sim")]
#[command(version)]
#[command(about = "Synthetic vineyard environment sensor data", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write line-protocol points for a historical range
    Backfill {
        /// First instant, RFC 3339 in the site offset (e.g. 2024-01-01T00:00:00+08:00)
        #[arg(long)]
        start: String,

        /// Last instant (inclusive); defaults to now
        #[arg(long)]
        end: Option<String>,

        /// Minutes between timesteps
        #[arg(long)]
        step_minutes: Option<i64>,

        /// Output file; stdout when omitted
        #[arg(short, long, value_name = "OUTPUT")]
        output: Option<PathBuf>,

        /// Seed for reproducible noise
        #[arg(long, env = "VSIM_SEED")]
        seed: Option<u64>,
    },

    /// Push live readings to InfluxDB until interrupted
    Stream {
        /// Seconds between ticks
        #[arg(long)]
        cadence_seconds: Option<u64>,

        /// Seed for reproducible noise
        #[arg(long, env = "VSIM_SEED")]
        seed: Option<u64>,
    },

    /// Fit soil moisture coefficients from a probe CSV (time,soil_moisture)
    #[cfg(feature = "calibration")]
    Calibrate {
        #[arg(short, long, value_name = "CSV")]
        input: PathBuf,

        /// Print the report as JSON instead of a TOML snippet
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let cli = Cli::parse();
    let cfg = Config::load()?;

    match cli.command {
        Commands::Backfill {
            start,
            end,
            step_minutes,
            output,
            seed,
        } => backfill(&cfg, &start, end.as_deref(), step_minutes, output, seed),
        Commands::Stream {
            cadence_seconds,
            seed,
        } => stream(&cfg, cadence_seconds, seed).await,
        #[cfg(feature = "calibration")]
        Commands::Calibrate { input, json } => calibrate(&cfg, &input, json),
    }
}

fn backfill(
    cfg: &Config,
    start: &str,
    end: Option<&str>,
    step_minutes: Option<i64>,
    output: Option<PathBuf>,
    seed: Option<u64>,
) -> Result<()> {
    let offset = cfg.offset();
    let start = offset.parse_instant(start).context("invalid --start")?;
    let end = match end {
        Some(raw) => offset.parse_instant(raw).context("invalid --end")?,
        None => offset.now(),
    };
    let step = step_from_minutes(step_minutes.unwrap_or(cfg.generator.step_minutes))?;

    let sensors = build_sensors(&cfg.sensors, offset, seed.or(cfg.generator.seed))?;
    let mut generator = BatchGenerator::new(sensors, offset)
        .with_step(step)
        .with_measurement(cfg.generator.measurement.clone());

    let summary = match &output {
        Some(path) => {
            let file = std::fs::File::create(path)
                .with_context(|| format!("cannot create {}", path.display()))?;
            generator.run(start, end, &mut BufWriter::new(file))?
        }
        None => {
            let stdout = std::io::stdout();
            let mut out = BufWriter::new(stdout.lock());
            let summary = generator.run(start, end, &mut out)?;
            out.flush()?;
            summary
        }
    };

    info!(
        output = %output.as_ref().map(|p| p.display().to_string()).unwrap_or_else(|| "stdout".into()),
        timesteps = summary.timesteps,
        lines = summary.lines,
        "line protocol written"
    );
    Ok(())
}

async fn stream(cfg: &Config, cadence_seconds: Option<u64>, seed: Option<u64>) -> Result<()> {
    if cfg.influxdb.token.is_empty() || cfg.influxdb.token.starts_with("__SET_VIA_ENV") {
        anyhow::bail!(
            "VSIM__INFLUXDB__TOKEN must be set to an InfluxDB API token with write access to bucket '{}'",
            cfg.influxdb.bucket
        );
    }

    let offset = cfg.offset();
    let sensors = build_sensors(&cfg.sensors, offset, seed.or(cfg.generator.seed))?;
    let sink = Arc::new(InfluxDbSink::new(&cfg.influxdb, cfg.generator.measurement.clone())?);
    let cadence =
        std::time::Duration::from_secs(cadence_seconds.unwrap_or(cfg.generator.cadence_seconds));

    let mut generator = StreamingGenerator::new(sensors, offset, sink).with_cadence(cadence);

    let cancel = CancellationToken::new();
    let stopper = cancel.clone();
    tokio::spawn(async move {
        shutdown_signal().await;
        stopper.cancel();
    });

    info!(url = %cfg.influxdb.url, bucket = %cfg.influxdb.bucket, "streaming to InfluxDB");
    let summary = generator.run(cancel).await?;

    if summary.failed > 0 {
        warn!(failed = summary.failed, "some points were not delivered");
    }
    info!(ticks = summary.ticks, written = summary.written, "shutdown complete");
    Ok(())
}

#[cfg(feature = "calibration")]
fn calibrate(cfg: &Config, input: &std::path::Path, json: bool) -> Result<()> {
    use vineyard_sensor_sim::calibration::{fit_harmonic, load_observations};

    #[derive(serde::Serialize)]
    struct Snippet {
        coefficients: vineyard_sensor_sim::simulation::CoefficientSet,
    }

    let observations = load_observations(input, cfg.offset())?;
    let report = fit_harmonic(&observations)?;

    let rendered = if json {
        serde_json::to_string_pretty(&report)?
    } else {
        format!(
            "# {} observations, rms residual {:.6}\n{}",
            report.observations,
            report.rms_residual,
            toml::to_string(&Snippet {
                coefficients: report.coefficients,
            })?
        )
    };
    println!("{rendered}");
    Ok(())
}
