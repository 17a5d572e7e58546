//! CLI command definitions

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Output format for discussion results
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Only the final draft
    Draft,
    /// Every round followed by the final draft
    Full,
    /// The run result as JSON
    Json,
    /// The session report (snapshot and complete history) as JSON
    Report,
}

/// CLI arguments for story-council
#[derive(Parser, Debug)]
#[command(name = "story-council")]
#[command(author, version, about = "Story Council - AI roles discuss and draft a story together")]
#[command(long_about = r#"
Story Council runs a round-based discussion between AI roles on a story topic.

Each round every participant speaks once, in order; the initiator only speaks
in the first round. Every turn sees the session's recent history. When the
discussion ends, the final editor turns the narrative state into a draft.

Built-in roles: plot_writer, character_designer, world_builder, editor_in_chief

Configuration files are loaded from (in priority order):
1. COUNCIL_* environment variables
2. --config <path>     Explicit config file
3. ./council.toml      Project-level config
4. ~/.config/story-council/config.toml   Global config

Example:
  story-council --theme "Harbour mystery" --topic "The opening scene"
  story-council --theme "Space opera" -p plot_writer -p world_builder -p editor_in_chief \
      --initiator world_builder --topic "The first contact" --max-rounds 2 -o full
"#)]
pub struct Cli {
    /// Theme of the new session
    #[arg(long, value_name = "THEME")]
    pub theme: Option<String>,

    /// Topic the initiator opens the discussion with
    #[arg(long, value_name = "TOPIC")]
    pub topic: Option<String>,

    /// Participating role ids, in speaking order (can be specified multiple times)
    #[arg(short = 'p', long = "participant", value_name = "ROLE")]
    pub participants: Vec<String>,

    /// Role that opens the discussion (defaults to the first participant)
    #[arg(short, long, value_name = "ROLE")]
    pub initiator: Option<String>,

    /// Starting narrative state of the session
    #[arg(long, value_name = "TEXT", default_value = "")]
    pub state: String,

    /// Maximum number of rounds
    #[arg(short = 'r', long, value_name = "N")]
    pub max_rounds: Option<usize>,

    /// SQLite database holding session history
    #[arg(long, value_name = "PATH")]
    pub db: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "draft")]
    pub output: OutputFormat,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,

    /// List the registered roles and exit
    #[arg(long)]
    pub list_roles: bool,
}
