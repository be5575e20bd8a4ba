//! CLI module for notedeck
//!
//! Command-line front end over the failover client.
//!
//! # Commands
//!
//! - `notes` - List, add, edit and delete notes
//! - `health` - Probe every endpoint and show the result
//! - `endpoint` - Show the endpoint the next request would use
//! - `config` - Configuration utilities (init)
//! - `completions` - Generate shell completions
//!
//! # Example
//!
//! ```bash
//! # Two backends, the second one used when the first is down
//! notedeck --api-url http://notes-a:3002 --api-url http://notes-b:3002 notes list
//!
//! # Probe health as JSON
//! notedeck health --json
//! ```

pub mod completions;
pub mod config;
pub mod endpoint;
pub mod health;
pub mod notes;
pub mod output;

pub use completions::handle_completions;
pub use config::handle_config_init;
pub use endpoint::handle_endpoint;
pub use health::handle_health;
pub use notes::handle_notes;

use crate::config::{ConfigError, NotedeckConfig};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Default configuration file name, read from the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "notedeck.toml";

/// notedeck - note board client with multi-endpoint failover
#[derive(Parser, Debug)]
#[command(
    name = "notedeck",
    version,
    about = "Note board client with multi-endpoint failover"
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Commands,
}

/// Options shared by every command.
#[derive(Args, Debug, Default)]
pub struct GlobalArgs {
    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Endpoint URL, in priority order (repeatable, replaces configured endpoints)
    #[arg(long = "api-url", global = true)]
    pub api_urls: Vec<String>,

    /// Per-attempt request timeout in milliseconds
    #[arg(long, global = true)]
    pub timeout_ms: Option<u64>,

    /// Retries per endpoint after the first attempt
    #[arg(long, global = true)]
    pub max_retries: Option<u32>,

    /// Set log level (trace, debug, info, warn, error)
    #[arg(short, long, global = true)]
    pub log_level: Option<String>,

    /// Print request and probe counters (Prometheus text) to stderr on exit
    #[arg(long, global = true)]
    pub metrics: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Manage notes
    #[command(subcommand)]
    Notes(NotesCommands),
    /// Probe every endpoint and show its health
    Health(HealthArgs),
    /// Show the endpoint the next request would try first
    Endpoint(EndpointArgs),
    /// Configuration utilities
    #[command(subcommand)]
    Config(ConfigCommands),
    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Subcommand, Debug)]
pub enum NotesCommands {
    /// List all notes
    List(NotesListArgs),
    /// Create a note
    Add(NotesAddArgs),
    /// Change the title or content of a note
    Edit(NotesEditArgs),
    /// Delete a note
    Delete(NotesDeleteArgs),
}

#[derive(Args, Debug)]
pub struct NotesListArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct NotesAddArgs {
    /// Note title
    pub title: String,

    /// Note content
    pub content: String,

    /// Owning user id
    #[arg(short, long, default_value = "1")]
    pub user_id: i64,
}

#[derive(Args, Debug)]
pub struct NotesEditArgs {
    /// Id of the note to change
    pub id: i64,

    /// New title
    #[arg(short, long)]
    pub title: Option<String>,

    /// New content
    #[arg(long)]
    pub content: Option<String>,
}

#[derive(Args, Debug)]
pub struct NotesDeleteArgs {
    /// Id of the note to delete
    pub id: i64,
}

#[derive(Args, Debug)]
pub struct HealthArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct EndpointArgs {
    /// Probe all endpoints before choosing
    #[arg(long)]
    pub probe: bool,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Initialize a new configuration file
    Init(ConfigInitArgs),
}

#[derive(Args, Debug)]
pub struct ConfigInitArgs {
    /// Output file path
    #[arg(short, long, default_value = DEFAULT_CONFIG_FILE)]
    pub output: PathBuf,

    /// Overwrite existing file
    #[arg(short, long)]
    pub force: bool,
}

#[derive(Args, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: clap_complete::Shell,
}

/// Resolve configuration: file, then `NOTEDECK_*` environment, then flags.
///
/// An explicit `--config` must exist. Without it, `notedeck.toml` in the
/// working directory is used when present and defaults otherwise.
pub fn load_config(args: &GlobalArgs) -> Result<NotedeckConfig, ConfigError> {
    let config = match &args.config {
        Some(path) => NotedeckConfig::load(Some(path))?,
        None => {
            let default_path = PathBuf::from(DEFAULT_CONFIG_FILE);
            if default_path.exists() {
                NotedeckConfig::load(Some(&default_path))?
            } else {
                NotedeckConfig::default()
            }
        }
    };

    let config = apply_cli_overrides(config.with_env_overrides(), args);
    config.validate()?;
    Ok(config)
}

/// Apply command-line flags on top of an already layered configuration.
pub fn apply_cli_overrides(mut config: NotedeckConfig, args: &GlobalArgs) -> NotedeckConfig {
    let urls: Vec<String> = args
        .api_urls
        .iter()
        .map(|url| url.trim().to_string())
        .filter(|url| !url.is_empty())
        .collect();
    if !urls.is_empty() {
        config.client.endpoints = urls;
    }
    if let Some(ms) = args.timeout_ms {
        config.client.request_timeout_ms = ms;
    }
    if let Some(retries) = args.max_retries {
        config.client.max_retries = retries;
    }
    if let Some(level) = &args.log_level {
        config.logging.level = level.clone();
    }
    config
}
