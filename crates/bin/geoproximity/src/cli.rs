//! Command-line surface.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "geoproximity")]
#[command(about = "Check whether a location is near the office.", version)]
pub struct CommandLine {
    /// Path to the TOML configuration file.
    #[arg(long, global = true, default_value = "geoproximity.toml")]
    pub config: PathBuf,

    /// Print results as JSON.
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Check a coordinate against the reference point
    #[command(alias = "c", allow_negative_numbers = true)]
    Check {
        /// Latitude in decimal degrees
        latitude: f64,
        /// Longitude in decimal degrees
        longitude: f64,
    },
    /// Show the reference point and threshold
    #[command(alias = "r")]
    Reference,
    /// Check the last known location from a JSON-lines track
    #[command(alias = "l")]
    LastKnown {
        /// Track file, one JSON fix per line
        track: PathBuf,
    },
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_parse_check_with_negative_longitude() {
        let cli = CommandLine::try_parse_from(["geoproximity", "check", "54.617106", "-5.941409"])
            .unwrap();
        match cli.command {
            Commands::Check {
                latitude,
                longitude,
            } => {
                assert!((latitude - 54.617_106).abs() < f64::EPSILON);
                assert!((longitude + 5.941_409).abs() < f64::EPSILON);
            }
            other => panic!("unexpected command {other:?}"),
        }
        assert!(!cli.json);
        assert_eq!(cli.config, PathBuf::from("geoproximity.toml"));
    }

    #[test]
    fn should_accept_global_flags_after_subcommand() {
        let cli = CommandLine::try_parse_from([
            "geoproximity",
            "last-known",
            "track.jsonl",
            "--json",
            "--config",
            "custom.toml",
        ])
        .unwrap();
        assert!(cli.json);
        assert_eq!(cli.config, PathBuf::from("custom.toml"));
        assert!(matches!(cli.command, Commands::LastKnown { .. }));
    }

    #[test]
    fn should_reject_non_numeric_latitude() {
        let result = CommandLine::try_parse_from(["geoproximity", "check", "north", "0"]);
        assert!(result.is_err());
    }

    #[test]
    fn should_parse_reference_alias() {
        let cli = CommandLine::try_parse_from(["geoproximity", "r"]).unwrap();
        assert!(matches!(cli.command, Commands::Reference));
    }
}
