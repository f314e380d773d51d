//! Scaffold a template library

use colored::*;
use eyre::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use prompt_engine::{AgentKind, TemplatePaths};

use crate::config::{CONFIG_FILE, Config};

const REACT_INSTRUCTIONS: &str = r#"instructions: |
  You run in a loop of Thought, Tool, PAUSE, Observation.
  At the end of the loop you output an Answer.
  Use Thought to describe your reasoning about the question you have been asked.
  Use Tool to run one of the tools available to you, then return PAUSE.
  Observation will be the result of running that tool.
  When you have enough information, output the final Answer.
"#;

const FEW_SHOT_INSTRUCTIONS: &str = r#"instructions: |
  Follow the response format and choose only from the valid actions.
"#;

const COT_INSTRUCTIONS: &str = r#"instructions: |
  Think through the problem step by step before giving the final answer.
"#;

const DEFAULT_INSTRUCTIONS: &str = r#"instructions: ""
"#;

const SAMPLE_BLUEPRINT: &str = r#"# Agent: react_agent
# Created by: prompt-engine init

agent_type: react

system_message: |
  You are a helpful research assistant.

rules:
  - Always ground factual claims in tool observations.
  - Keep answers concise.

tools:
  - name: search
    description: Searches the web and returns the top results as text.
    example_calling: "search: capital of France"

examples:
  - name: Capital lookup
    description: Answering a geography question with a single search
    steps:
      - type: thought
        content: I should look up the capital of France.
      - type: tool_call
        name: search
        input: capital of France
      - type: observation
        content: Paris is the capital and largest city of France.
      - type: answer
        content: The capital of France is Paris.

answer_format: |
  Answer: <one or two sentences>

reflection_knowledge:
  - Prefer primary sources over summaries.
  - State uncertainty when observations disagree.

# Pulls tools/calculator.tool.yaml into the tools section at build time
include_tool_calculator: true
"#;

const SAMPLE_TOOL: &str = r#"- name: calculator
  description: Evaluates an arithmetic expression and returns the result.
  example_calling: "calculator: (2 + 3) * 4"
  examples:
    - name: Arithmetic
      steps:
        - type: tool_call
          name: calculator
          input: (2 + 3) * 4
        - type: observation
          content: 20
        - type: answer
          content: The result is 20.
"#;

fn instruction_template(kind: AgentKind) -> &'static str {
    match kind {
        AgentKind::React => REACT_INSTRUCTIONS,
        AgentKind::FewShot => FEW_SHOT_INSTRUCTIONS,
        AgentKind::Cot => COT_INSTRUCTIONS,
        AgentKind::Default => DEFAULT_INSTRUCTIONS,
    }
}

/// Write `content` unless the file exists and `force` is off
fn write_template(path: &Path, content: &str, force: bool, label: &str) -> Result<bool> {
    if path.exists() && !force {
        println!("  {} Kept existing {}", "✓".green(), label);
        return Ok(false);
    }

    fs::write(path, content).with_context(|| format!("Failed to write {}", path.display()))?;
    println!("  {} Created {}", "✓".green(), label);
    Ok(true)
}

/// Create the template library under `app_dir/templates`
pub(crate) fn scaffold(app_dir: &Path, force: bool) -> Result<TemplatePaths> {
    let paths = TemplatePaths::new(app_dir.join("templates"));

    for dir in [paths.blueprints_dir(), paths.instructions_dir(), paths.tools_dir()] {
        fs::create_dir_all(&dir).with_context(|| format!("Failed to create {}", dir.display()))?;
    }

    for kind in AgentKind::ALL {
        let label = format!("instructions/{}.inst.yaml", kind);
        write_template(&paths.instruction(kind.as_str()), instruction_template(kind), force, &label)?;
    }

    write_template(
        &paths.blueprint("react_agent"),
        SAMPLE_BLUEPRINT,
        force,
        "blueprints/react_agent.bp.yaml",
    )?;
    write_template(&paths.tool("calculator"), SAMPLE_TOOL, force, "tools/calculator.tool.yaml")?;

    Ok(paths)
}

pub fn run(path: Option<PathBuf>, force: bool) -> Result<()> {
    let app_dir = path.unwrap_or_else(Config::app_dir);

    println!("{} Initializing prompt-engine in {}", "→".blue(), app_dir.display());

    let paths = scaffold(&app_dir, force)?;

    let config_file = app_dir.join(CONFIG_FILE);
    if config_file.exists() && !force {
        println!("  {} Kept existing {}", "✓".green(), CONFIG_FILE);
    } else {
        let config = Config {
            templates_dir: paths.root().to_path_buf(),
            ..Config::default()
        };
        let yaml_str = serde_yaml::to_string(&config).context("Failed to serialize config")?;
        fs::write(&config_file, yaml_str).with_context(|| format!("Failed to write {}", CONFIG_FILE))?;
        println!("  {} Created {}", "✓".green(), CONFIG_FILE);
    }

    println!();
    println!("{} Template library ready!", "✓".green().bold());
    println!();
    println!("Next steps:");
    println!("  1. Run {} to see blueprints", "prompt-engine agent list".cyan());
    println!("  2. Run {} to build a prompt", "prompt-engine build react_agent".cyan());

    Ok(())
}
