//! # geoproximity — proximity check CLI
//!
//! Composition root that wires the location adapter, the proximity service
//! and the configuration together.
//!
//! ## Responsibilities
//! - Parse command-line arguments
//! - Load configuration (config file, env vars)
//! - Initialize logging
//! - Construct the location adapter and the application service
//! - Print results on stdout; logs go to stderr
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer — no domain logic belongs here.

mod cli;
mod config;
mod output;

use anyhow::Context;
use geoproximity_adapter_location_jsonl::JsonLinesLocationSource;
use geoproximity_app::services::proximity_service::ProximityService;
use geoproximity_domain::coordinate::Coordinate;
use tracing_subscriber::EnvFilter;

use crate::cli::{CommandLine, Commands};
use crate::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = CommandLine::parse_args();

    let config = Config::load(&args.config)
        .with_context(|| format!("loading {}", args.config.display()))?;
    init_logging(&config.logging.filter);

    let checker = config.checker()?;
    let geofences = config.geofences()?;
    tracing::debug!(
        reference = %checker.reference_location(),
        threshold = %checker.threshold(),
        model = %checker.model(),
        geofences = geofences.len(),
        "configuration loaded"
    );

    match args.command {
        Commands::Reference => {
            println!("{}", output::reference(&checker, args.json));
        }
        Commands::Check {
            latitude,
            longitude,
        } => {
            let candidate = Coordinate::new(latitude, longitude)
                .with_context(|| format!("invalid coordinate ({latitude}, {longitude})"))?;
            let report = checker.report(candidate);
            let inside = checker.geofences_containing(&geofences, candidate);
            tracing::info!(near = report.near, distance = %report.distance, "check complete");
            println!("{}", output::report(&report, &inside, args.json));
        }
        Commands::LastKnown { track } => {
            let source = JsonLinesLocationSource::open(&track).await?;
            if source.skipped() > 0 {
                tracing::warn!(
                    skipped = source.skipped(),
                    path = %track.display(),
                    "some track lines were ignored"
                );
            }
            let service = ProximityService::new(source, checker).with_geofences(geofences);
            match service.check_last_known_location().await? {
                Some(report) => {
                    let inside = service.geofences_containing(report.candidate);
                    tracing::info!(near = report.near, distance = %report.distance, "check complete");
                    println!("{}", output::report(&report, &inside, args.json));
                }
                None => {
                    tracing::info!(path = %track.display(), "track has no usable fix");
                    println!("{}", output::no_location(args.json));
                }
            }
        }
    }

    Ok(())
}

fn init_logging(filter: &str) {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_writer(std::io::stderr)
        .init();
}
