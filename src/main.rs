use anyhow::{Context, Result, bail};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use tracing_subscriber::EnvFilter;

use geopin::api::{AddressResolver, NominatimClient};
use geopin::config::FileConfig;
use geopin::domain::{AddressInfo, Point};
use geopin::pipeline::{ClampNotice, LocationPicker};
use geopin::viewport::ViewportController;

/// Validate a map pin against a municipal boundary and look up its address
///
/// Examples:
///   # Check a point with the built-in Ucú, Yucatán boundary
///   geopin --lat 21.0317 --lng -89.7464
///
///   # Point outside the boundary is moved onto it, then reverse geocoded
///   geopin --lat 21.10 --lng -89.70 --resolve
///
///   # Treat the point as the device's own location (rejected when outside)
///   geopin --lat 21.03 --lng -89.74 --device
///
///   # Use a config file with another boundary
///   geopin --config merida.toml --lat 20.97 --lng -89.62
#[derive(Parser, Debug)]
#[command(name = "geopin")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to config file (optional, auto-searches geopin.toml if not provided)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Candidate latitude
    #[arg(long, allow_hyphen_values = true)]
    lat: f64,

    /// Candidate longitude
    #[arg(long, allow_hyphen_values = true)]
    lng: f64,

    /// Reverse geocode the accepted point
    #[arg(short = 'r', long)]
    resolve: bool,

    /// Treat the point as the device location: reject instead of clamping
    #[arg(long)]
    device: bool,

    /// Enable verbose logging
    #[arg(short = 'v', long)]
    verbose: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let candidate = Point::new(args.lat, args.lng);
    if !candidate.is_finite()
        || !(-90.0..=90.0).contains(&args.lat)
        || !(-180.0..=180.0).contains(&args.lng)
    {
        bail!("Coordinates out of range: ({}, {})", args.lat, args.lng);
    }

    let config = match args.config {
        Some(ref path) => FileConfig::load_from(path)?,
        None => FileConfig::load().unwrap_or_default(),
    };

    let geofence = config.geofence().context("Invalid boundary polygon")?;
    let view = config
        .view_settings(geofence.polygon())
        .context("Invalid view configuration")?;
    let default_center = view.center;

    let client = NominatimClient::new(&config.geocoder).context("Failed to create geocoder")?;
    let resolver = Arc::new(AddressResolver::new(client, config.region.clone()));
    let mut picker = LocationPicker::new(
        geofence,
        resolver,
        None,
        default_center,
        ClampNotice::new(config.notice_duration()),
    );

    let mut viewport = ViewportController::new(view);
    if let Some(initial) = viewport.on_lifecycle(picker.should_center()) {
        println!(
            "View:      ({:.6}, {:.6}) zoom {}",
            initial.center.lat, initial.center.lng, initial.zoom
        );
    }

    let municipality = &config.region.municipality;
    if args.device {
        if !picker.use_device_location(candidate) {
            println!("Location is outside {}; pin left at the default centre", municipality);
            return Ok(());
        }
    } else {
        let outcome = picker.place(candidate, Instant::now());
        if outcome.was_clamped {
            println!(
                "Location is outside {}; moved to the nearest boundary point",
                municipality
            );
        }
    }

    let pin = picker.position();
    println!("Candidate: ({:.6}, {:.6})", candidate.lat, candidate.lng);
    println!("Accepted:  ({:.6}, {:.6})", pin.lat, pin.lng);

    if args.resolve {
        let spinner = create_spinner("Looking up address...");
        let start = Instant::now();
        match picker.lookup().await {
            Some(resolved) => {
                spinner.finish_with_message(format!(
                    "Address found [{:.1}s]",
                    start.elapsed().as_secs_f32()
                ));
                print_address(&resolved.address, municipality);
                if !resolved.address.matches_region(&config.region) {
                    println!("Warning: address does not appear to belong to {}", municipality);
                }
            }
            None => {
                spinner.finish_with_message("Address lookup failed; enter it manually");
            }
        }
    }

    Ok(())
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn print_address(address: &AddressInfo, municipality: &str) {
    println!();
    println!("Address ({})", municipality);
    println!("================================");
    println!("  Street:   {}", address.street_line());
    println!("  Suburb:   {}", address.suburb);
    println!("  City:     {}", address.city);
    println!("  State:    {}", address.state);
    println!("  Postcode: {}", address.postcode);
    println!("  Country:  {}", address.country);
    if !address.full_address.is_empty() {
        println!("  Full:     {}", address.full_address);
    }
}

fn create_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::with_template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(80));
    pb
}
