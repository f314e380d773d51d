//! Blueprint inspection commands

use colored::*;
use eyre::{Context, Result};
use serde::Serialize;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use prompt_engine::agent::{AgentDefinition, ReflectionKnowledge};
use prompt_engine::{TemplateLoader, TemplatePaths};

use super::open_assembler;
use crate::cli::{AgentAction, OutputFormat};

pub fn run(action: AgentAction, templates_dir: &Path) -> Result<()> {
    match action {
        AgentAction::List { format } => list_agents(OutputFormat::resolve(format), templates_dir),
        AgentAction::Show { agent, format } => show_agent(&agent, OutputFormat::resolve(format), templates_dir),
        AgentAction::Tools { agent } => list_tools(&agent, templates_dir),
    }
}

#[derive(Debug, Serialize)]
struct BlueprintSummary {
    name: String,
    path: PathBuf,
    agent_type: Option<String>,
    tools: usize,
    included_tools: Vec<String>,
    error: Option<String>,
}

/// Find `<name>.bp.yaml` files under the blueprints directory, sorted by name
fn discover_blueprints(paths: &TemplatePaths) -> Vec<(String, PathBuf)> {
    let dir = paths.blueprints_dir();
    if !dir.exists() {
        return Vec::new();
    }

    WalkDir::new(&dir)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                log::warn!("Failed to read blueprint entry: {}", e);
                None
            }
        })
        .filter(|entry| entry.file_type().is_file())
        .filter_map(|entry| {
            let name = TemplatePaths::blueprint_name(entry.path())?;
            Some((name, entry.into_path()))
        })
        .collect()
}

fn summarize(loader: &TemplateLoader, name: String, path: PathBuf) -> BlueprintSummary {
    match loader.load_as::<AgentDefinition>(&path) {
        Ok(agent) => BlueprintSummary {
            name,
            agent_type: Some(agent.kind().to_string()),
            tools: agent.tools.len(),
            included_tools: agent.included_tool_names().into_iter().map(str::to_string).collect(),
            path,
            error: None,
        },
        Err(e) => {
            log::warn!("Failed to load blueprint {}: {}", path.display(), e);
            BlueprintSummary {
                name,
                path,
                agent_type: None,
                tools: 0,
                included_tools: Vec::new(),
                error: Some(e.to_string()),
            }
        }
    }
}

fn list_agents(format: OutputFormat, templates_dir: &Path) -> Result<()> {
    let paths = TemplatePaths::new(templates_dir);
    let loader = TemplateLoader::new();

    let summaries: Vec<BlueprintSummary> = discover_blueprints(&paths)
        .into_iter()
        .map(|(name, path)| summarize(&loader, name, path))
        .collect();

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&summaries)?),
        OutputFormat::Yaml => println!("{}", serde_yaml::to_string(&summaries)?),
        OutputFormat::Text => {
            println!("{}", "Available Blueprints:".bold());
            println!();

            if summaries.is_empty() {
                println!(
                    "  {} No blueprints found in {}",
                    "(none)".dimmed(),
                    paths.blueprints_dir().display()
                );
                println!();
                println!("  Scaffold a template library with: {}", "prompt-engine init".cyan());
            } else {
                for summary in &summaries {
                    match (&summary.agent_type, &summary.error) {
                        (Some(kind), _) => {
                            println!("  {} {} {}", "●".green(), summary.name.bold(), format!("({})", kind).dimmed());
                            println!("    Tools: {}", summary.tools);
                            if !summary.included_tools.is_empty() {
                                println!("    Includes: {}", summary.included_tools.join(", ").cyan());
                            }
                        }
                        (None, error) => {
                            println!("  {} {}", "✗".red(), summary.name.bold());
                            if let Some(error) = error {
                                println!("    {}", error.red());
                            }
                        }
                    }
                    println!();
                }
            }
        }
    }

    Ok(())
}

fn show_agent(agent: &str, format: OutputFormat, templates_dir: &Path) -> Result<()> {
    let paths = TemplatePaths::new(templates_dir);
    let blueprint = paths.resolve_blueprint(agent);
    let definition: AgentDefinition = TemplateLoader::new()
        .load_as(&blueprint)
        .with_context(|| format!("Failed to load agent '{}'", agent))?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&definition)?),
        OutputFormat::Yaml => println!("{}", serde_yaml::to_string(&definition)?),
        OutputFormat::Text => print_definition(agent, &blueprint, &definition),
    }

    Ok(())
}

fn print_definition(agent: &str, blueprint: &Path, definition: &AgentDefinition) {
    println!("{} {}", "Agent:".bold(), agent.green().bold());
    println!("{} {}", "Type:".bold(), definition.kind());
    println!("{} {}", "Path:".bold(), blueprint.display().to_string().dimmed());

    if !definition.system_message.is_empty() {
        println!();
        println!("{}", "System Message:".bold());
        for line in definition.system_message.lines() {
            println!("  {}", line);
        }
    }

    if !definition.rules.is_empty() {
        println!();
        println!("{}", "Rules:".bold());
        for rule in &definition.rules {
            println!("  {} {}", "•".cyan(), rule);
        }
    }

    if !definition.tools.is_empty() {
        println!();
        println!("{}", "Tools:".bold());
        for tool in &definition.tools {
            println!("  {} {} - {}", "•".cyan(), tool.name.bold(), tool.description);
        }
    }

    let included = definition.included_tool_names();
    if !included.is_empty() {
        println!();
        println!("{} {}", "Included Tools:".bold(), included.join(", ").cyan());
    }

    if let Some(knowledge) = definition.reflection() {
        println!();
        println!("{}", "Reflection Knowledge:".bold());
        match knowledge {
            ReflectionKnowledge::Items(items) => {
                for item in items {
                    println!("  {} {}", "•".cyan(), item);
                }
            }
            ReflectionKnowledge::Text(text) => println!("  {}", text.trim()),
        }
    }

    if let Some(answer_format) = definition.answer_format() {
        println!();
        println!("{}", "Answer Format:".bold());
        for line in answer_format.lines() {
            println!("  {}", line.italic());
        }
    }

    if !definition.examples.is_empty() {
        println!();
        println!("{}", "Examples:".bold());
        for example in &definition.examples {
            println!("  {} {} ({} steps)", "•".cyan(), example.name, example.steps.len());
        }
    }
}

fn list_tools(agent: &str, templates_dir: &Path) -> Result<()> {
    let assembler = open_assembler(agent, templates_dir)?;
    let resolved = assembler
        .resolve_agent()
        .with_context(|| format!("Failed to resolve tools for '{}'", agent))?;

    if resolved.tools.is_empty() {
        println!("  {} Agent '{}' has no tools", "(none)".dimmed(), agent);
        return Ok(());
    }

    for tool in &resolved.tools {
        let marker = if tool.is_critical { "critical".yellow().to_string() } else { String::new() };
        println!("  {} {} {}", "●".green(), tool.name.bold(), marker);
        println!("    e.g. {}", tool.example_calling.dimmed());
    }

    Ok(())
}
