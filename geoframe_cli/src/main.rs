//! GeoFrame telemetry converter CLI
//!
//! Convert logged vehicle telemetry into geodetic pose and trajectory streams.

use anyhow::Context;
use clap::Parser;
use geoframe_cli::{convert_all, load_frames};
use geoframe_core::{ConverterConfig, GeodeticPoint, PoseConverter};
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// GeoFrame telemetry converter
#[derive(Parser, Debug)]
#[command(name = "geoframe")]
#[command(about = "Convert vehicle telemetry into geodetic visualization streams", long_about = None)]
struct Args {
    /// JSON file holding an array of telemetry frames
    #[arg(short, long)]
    input: String,

    /// Export destination (stdout when omitted)
    #[arg(short, long)]
    output: Option<String>,

    /// Converter config JSON (origin, max_radius_m, strict_range)
    #[arg(short, long)]
    config: Option<String>,

    /// Origin latitude in degrees (overrides config)
    #[arg(long, allow_hyphen_values = true)]
    origin_lat: Option<f64>,

    /// Origin longitude in degrees (overrides config)
    #[arg(long, allow_hyphen_values = true)]
    origin_lon: Option<f64>,

    /// Origin altitude in meters (overrides config)
    #[arg(long, allow_hyphen_values = true)]
    origin_alt: Option<f64>,

    /// Validity radius of the local frame in meters (overrides config)
    #[arg(long)]
    max_radius: Option<f64>,

    /// Fail frames outside the validity radius instead of warning
    #[arg(long)]
    strict: bool,

    /// Include stream metadata in the export
    #[arg(long)]
    metadata: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,

    /// JSON summary on stdout for scripting (requires --output)
    #[arg(long)]
    json: bool,
}

/// Merge the config file (or defaults) with command-line overrides.
fn resolve_config(args: &Args) -> anyhow::Result<ConverterConfig> {
    let mut config = match &args.config {
        Some(path) => ConverterConfig::from_file(path)
            .with_context(|| format!("loading config {}", path))?,
        None => ConverterConfig::default(),
    };

    if args.origin_lat.is_some() || args.origin_lon.is_some() || args.origin_alt.is_some() {
        config.origin = GeodeticPoint::new(
            args.origin_lat.unwrap_or(config.origin.latitude()),
            args.origin_lon.unwrap_or(config.origin.longitude()),
            args.origin_alt.unwrap_or(config.origin.altitude()),
        )
        .context("invalid origin override")?;
    }
    if let Some(radius) = args.max_radius {
        config.max_radius_m = radius;
    }
    if args.strict {
        config.strict_range = true;
    }

    config.validate().context("invalid converter config")?;
    Ok(config)
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Initialize logging; stdout is reserved for the export. RUST_LOG wins over --verbose.
    let default_level = if args.verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set tracing subscriber")?;

    if args.json && args.output.is_none() {
        anyhow::bail!("--json requires --output");
    }

    let config = resolve_config(&args)?;
    let converter = PoseConverter::new(config.projector()?);

    info!(
        "GeoFrame converter v{} | origin {} | radius {:.0}m{}",
        env!("CARGO_PKG_VERSION"),
        config.origin,
        config.max_radius_m,
        if config.strict_range { " (strict)" } else { "" }
    );

    let frames = load_frames(&args.input)?;
    info!("Loaded {} frames from {}", frames.len(), args.input);

    let export = convert_all(&converter, &frames, args.metadata);

    match &args.output {
        Some(path) => {
            export
                .write_to_file(path)
                .with_context(|| format!("writing export to {}", path))?;
            info!("Exported {} frames to {}", export.frames.len(), path);
        }
        None => println!("{}", export.to_json()?),
    }

    if args.json {
        let summary = serde_json::json!({
            "total": frames.len(),
            "converted": export.frames.len(),
            "failed": export.failed_frames.len(),
            "duration_ms": export.duration_ms(),
            "failures": export.failed_frames,
        });
        println!("{}", serde_json::to_string_pretty(&summary)?);
    }

    // Exit with proper code for scripts
    if !export.failed_frames.is_empty() {
        error!(
            "{}/{} frames failed to convert",
            export.failed_frames.len(),
            frames.len()
        );
        std::process::exit(1);
    }

    Ok(())
}
