//! CLI command definitions

use clap::Parser;
use std::path::PathBuf;

/// CLI arguments for toolpilot
#[derive(Parser, Debug)]
#[command(name = "toolpilot")]
#[command(author, version, about = "Interactive assistant that reads, writes and runs commands in one directory")]
#[command(long_about = r#"
toolpilot is an interactive assistant confined to a base directory.

Each input starts a turn: the model may read and write files under the base
directory and run shell commands there until it has an answer. Press Ctrl-C
during a turn to cancel it, including any running command.

Configuration files are loaded from (in priority order):
1. --config <path>        Explicit config file
2. ./toolpilot.toml       Project-level config
3. ~/.config/toolpilot/config.toml   Global config

Example:
  toolpilot
  toolpilot --provider ollama --model qwen2.5-coder
  toolpilot --base-dir ./my-project --max-iterations 20
"#)]
pub struct Cli {
    /// Model provider: openai, gemini or ollama
    #[arg(short, long, value_name = "PROVIDER")]
    pub provider: Option<String>,

    /// Model name (defaults depend on the provider)
    #[arg(short, long, value_name = "MODEL")]
    pub model: Option<String>,

    /// Directory all file access and commands are confined to
    #[arg(short, long, value_name = "DIR")]
    pub base_dir: Option<PathBuf>,

    /// Maximum tool calls per turn
    #[arg(long, value_name = "N")]
    pub max_iterations: Option<usize>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress the thinking spinner
    #[arg(short, long)]
    pub quiet: bool,

    /// Also write logs to this file
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,
}
