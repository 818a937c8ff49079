//! Command-line argument parsing for sqldrill.

use std::io::Read;
use std::path::PathBuf;

use clap::Parser;

use crate::config::Config;
use crate::error::{DrillError, Result};

/// A SQL practice grader for file-backed SQLite exercise snapshots.
#[derive(Parser, Debug)]
#[command(name = "sqldrill")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Candidate SQL to grade (use '-' to read from stdin)
    #[arg(value_name = "QUERY")]
    pub query: Option<String>,

    /// Snapshot filename within the databases directory (e.g. db1.sqlite)
    #[arg(short = 'd', long, value_name = "FILE")]
    pub database: Option<String>,

    /// Question id whose reference solution grades the candidate
    #[arg(short = 'q', long, value_name = "ID")]
    pub question: Option<u32>,

    /// Reference solution SQL, bypassing the question catalog
    #[arg(long, value_name = "SQL", conflicts_with = "question")]
    pub solution: Option<String>,

    /// Read the candidate SQL from a file instead of the command line
    #[arg(long, value_name = "PATH", conflicts_with = "query")]
    pub query_file: Option<PathBuf>,

    /// List available snapshots and exit
    #[arg(long)]
    pub list_databases: bool,

    /// List the questions for the selected snapshot and exit
    #[arg(long)]
    pub list_questions: bool,

    /// Show the snapshot's tables with sample rows and exit
    #[arg(long)]
    pub tables: bool,

    /// Config file path
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Emit machine-readable JSON instead of text
    #[arg(long)]
    pub json: bool,

    /// Accept rows in any order
    #[arg(long)]
    pub ignore_row_order: bool,

    /// Numeric comparison tolerance (default from config, 0 = exact)
    #[arg(long, value_name = "EPSILON")]
    pub float_epsilon: Option<f64>,
}

impl Cli {
    /// Parses command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Returns the config file path, either from `--config` or the platform
    /// default.
    pub fn config_path(&self) -> PathBuf {
        self.config.clone().unwrap_or_else(Config::default_path)
    }

    /// Resolves the candidate SQL from the positional argument, `--query-file`
    /// or stdin.
    pub fn candidate_query(&self) -> Result<String> {
        if let Some(path) = &self.query_file {
            return std::fs::read_to_string(path).map_err(|e| {
                DrillError::config(format!("Failed to read query file {}: {e}", path.display()))
            });
        }

        match self.query.as_deref() {
            Some("-") => {
                let mut sql = String::new();
                std::io::stdin()
                    .read_to_string(&mut sql)
                    .map_err(|e| DrillError::config(format!("Failed to read stdin: {e}")))?;
                Ok(sql)
            }
            Some(sql) => Ok(sql.to_string()),
            None => Err(DrillError::config(
                "no candidate query given; pass it as an argument, via --query-file, or '-' for stdin",
            )),
        }
    }
}
