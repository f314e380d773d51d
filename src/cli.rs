use clap::{Parser, Subcommand, ValueEnum};
use std::io::IsTerminal;
use std::path::PathBuf;

use prompt_engine::RuntimeFields;

/// Output format for commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text
    Text,
    /// JSON format
    Json,
    /// YAML format
    Yaml,
}

impl OutputFormat {
    /// Resolve the effective output format.
    /// If user specified a format, use it.
    /// Otherwise: TTY → Text, non-TTY (pipe) → Json
    pub fn resolve(user_choice: Option<OutputFormat>) -> OutputFormat {
        match user_choice {
            Some(fmt) => fmt,
            None => {
                if std::io::stdout().is_terminal() {
                    OutputFormat::Text
                } else {
                    OutputFormat::Json
                }
            }
        }
    }
}

fn parse_field(s: &str) -> Result<(String, String), String> {
    RuntimeFields::parse_assignment(s)
}

#[derive(Parser)]
#[command(
    name = "prompt-engine",
    about = "Assemble LLM agent prompts from YAML blueprints",
    version,
    after_help = "Logs are written to: ~/.local/share/prompt-engine/logs/prompt-engine.log"
)]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true, help = "Path to prompt-engine.yaml config file")]
    pub config: Option<PathBuf>,

    /// Template library root (overrides config and PROMPT_ENGINE_TEMPLATES)
    #[arg(short, long, global = true)]
    pub templates: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Build the prompt for an agent blueprint
    Build {
        /// Blueprint name (blueprints/<name>.bp.yaml) or path to a blueprint file
        agent: String,

        /// Runtime field as name=value (repeatable)
        #[arg(long = "field", short = 'f', value_parser = parse_field)]
        fields: Vec<(String, String)>,

        /// Read the `history` field from a file
        #[arg(long)]
        history_file: Option<PathBuf>,

        /// Write the prompt to a file instead of stdout
        #[arg(long, short = 'O')]
        output: Option<PathBuf>,
    },

    /// Inspect agent blueprints
    Agent {
        #[command(subcommand)]
        action: AgentAction,
    },

    /// Scaffold a template library
    Init {
        /// Directory to initialize (defaults to ~/.config/prompt-engine)
        #[arg(long)]
        path: Option<PathBuf>,

        /// Overwrite existing templates
        #[arg(long)]
        force: bool,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand)]
pub enum AgentAction {
    /// List blueprints in the template library
    List {
        /// Output format (default: text for TTY, json for pipes)
        #[arg(long, short = 'o', value_enum)]
        format: Option<OutputFormat>,
    },

    /// Show a parsed blueprint
    Show {
        /// Blueprint name or path
        agent: String,

        /// Output format (default: text for TTY, json for pipes)
        #[arg(long, short = 'o', value_enum)]
        format: Option<OutputFormat>,
    },

    /// List the tools a build would render, including dynamically included ones
    Tools {
        /// Blueprint name or path
        agent: String,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show {
        /// Output format (default: text for TTY, json for pipes)
        #[arg(long, short = 'o', value_enum)]
        format: Option<OutputFormat>,
    },

    /// Get a configuration value
    Get {
        /// Configuration key
        key: String,
    },
}
