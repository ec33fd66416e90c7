//! Command-line argument parsing for askdb.

use clap::Parser;
use std::path::PathBuf;

use crate::config::Config;

/// Ask natural-language questions about a SQLite database.
#[derive(Parser, Debug)]
#[command(name = "askdb")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// The question to answer
    #[arg(value_name = "QUESTION")]
    pub question: String,

    /// Path to the SQLite database file
    #[arg(short = 'd', long, value_name = "PATH")]
    pub database: Option<String>,

    /// LLM provider to use (openai, anthropic, ollama, mock)
    #[arg(short = 'p', long, value_name = "PROVIDER")]
    pub provider: Option<String>,

    /// Model name (overrides the provider default)
    #[arg(short = 'm', long, value_name = "MODEL")]
    pub model: Option<String>,

    /// API key (overrides the provider's environment variable)
    #[arg(long, value_name = "KEY", env = "ASKDB_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Config file path
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Suppress per-step progress output
    #[arg(short = 'q', long)]
    pub quiet: bool,
}

impl Cli {
    /// Parses command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Returns the config file path to use.
    ///
    /// Uses the --config argument if provided, otherwise the default path.
    pub fn config_path(&self) -> PathBuf {
        self.config.clone().unwrap_or_else(Config::default_path)
    }
}
