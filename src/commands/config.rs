use colored::*;
use eyre::Result;
use std::path::Path;

use crate::cli::{ConfigAction, OutputFormat};
use crate::config::Config;

pub fn run(action: ConfigAction, config: &Config, templates_dir: &Path) -> Result<()> {
    match action {
        ConfigAction::Show { format } => show(OutputFormat::resolve(format), config, templates_dir),
        ConfigAction::Get { key } => get(&key, config, templates_dir),
    }
}

fn show(format: OutputFormat, config: &Config, templates_dir: &Path) -> Result<()> {
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(config)?);
        }
        OutputFormat::Yaml => {
            println!("{}", serde_yaml::to_string(config)?);
        }
        OutputFormat::Text => {
            println!("{}", "prompt-engine Configuration".bold());
            println!();

            println!("{}:", "templates".cyan());
            println!("  configured: {}", config.templates_dir.display());
            println!("  effective: {}", templates_dir.display());
            println!();

            println!("{}:", "logging".cyan());
            println!("  log_level: {}", config.log_level.as_filter());
        }
    }

    Ok(())
}

fn get(key: &str, config: &Config, templates_dir: &Path) -> Result<()> {
    let value = match key {
        "templates_dir" | "templates-dir" => Some(templates_dir.display().to_string()),
        "log_level" | "log-level" => Some(config.log_level.as_filter().to_string()),
        _ => None,
    };

    match value {
        Some(v) => println!("{}", v),
        None => {
            eprintln!("{} Unknown config key: {}", "✗".red(), key);
            std::process::exit(1);
        }
    }

    Ok(())
}
