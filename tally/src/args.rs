use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Tally service CLI
#[derive(Debug, Parser)]
#[command(name = "tally", about = "Record-keeping web service and utilities")]
pub struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = "tally.toml", env = "TALLY_CONFIG")]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the HTTP service (the default when no subcommand is given)
    Serve,

    /// Print the SHA-256 digest of a value, or of stdin when omitted
    Hash {
        /// Value to hash
        value: Option<String>,
    },

    /// Print the primes up to a bound, one per line
    Primes {
        /// Upper bound, inclusive
        #[arg(default_value_t = 100)]
        limit: usize,
    },
}
