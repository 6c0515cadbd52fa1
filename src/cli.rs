//! Command line definition using clap

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "freightmatch-core")]
#[command(version)]
#[command(about = "Match shipments to nearby vehicles")]
pub struct Cli {
    /// Defaults to `serve`
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the HTTP API
    Serve,

    /// Import locations from a CSV file and optionally create a random fleet
    Seed {
        /// CSV with at least `city`, `state_name`, `zip`, `lat` and `lng` columns
        #[arg(long)]
        csv: PathBuf,

        /// Number of vehicles to create at random locations
        #[arg(long, default_value_t = 0)]
        vehicles: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_to_no_subcommand() {
        let cli = Cli::try_parse_from(["freightmatch-core"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_parses_seed() {
        let cli = Cli::try_parse_from([
            "freightmatch-core",
            "seed",
            "--csv",
            "uszips.csv",
            "--vehicles",
            "25",
        ])
        .unwrap();

        match cli.command {
            Some(Command::Seed { csv, vehicles }) => {
                assert_eq!(csv, PathBuf::from("uszips.csv"));
                assert_eq!(vehicles, 25);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_seed_requires_csv() {
        assert!(Cli::try_parse_from(["freightmatch-core", "seed"]).is_err());
    }
}
