//! Build a prompt from a blueprint

use eyre::{Context, Result};
use std::fs;
use std::path::Path;

use prompt_engine::RuntimeFields;
use prompt_engine::prompt::fields::HISTORY;

use super::open_assembler;

pub fn run(
    agent: &str,
    fields: Vec<(String, String)>,
    history_file: Option<&Path>,
    output: Option<&Path>,
    templates_dir: &Path,
) -> Result<()> {
    let runtime = collect_fields(fields, history_file)?;
    let assembler = open_assembler(agent, templates_dir)?;

    log::info!(
        "Building {} prompt for '{}' with {} runtime field(s)",
        assembler.kind(),
        agent,
        runtime.len()
    );

    let prompt = assembler
        .build(&runtime)
        .with_context(|| format!("Failed to build prompt for '{}'", agent))?;

    match output {
        Some(path) => {
            fs::write(path, &prompt).with_context(|| format!("Failed to write prompt to {}", path.display()))?;
            log::info!("Wrote prompt to {}", path.display());
        }
        None => println!("{}", prompt),
    }

    Ok(())
}

/// Merge `--field` assignments with an optional history file.
/// The history file wins over a `history=` field.
fn collect_fields(fields: Vec<(String, String)>, history_file: Option<&Path>) -> Result<RuntimeFields> {
    let mut runtime: RuntimeFields = fields.into_iter().collect();

    if let Some(path) = history_file {
        let history =
            fs::read_to_string(path).with_context(|| format!("Failed to read history file: {}", path.display()))?;
        runtime.insert(HISTORY, history.trim_end().to_string());
    }

    Ok(runtime)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_collect_fields_from_assignments() {
        let runtime = collect_fields(
            vec![
                ("history".to_string(), "User: hi".to_string()),
                ("example".to_string(), "x".to_string()),
            ],
            None,
        )
        .unwrap();

        assert_eq!(runtime.get("history"), Some("User: hi"));
        assert_eq!(runtime.get("example"), Some("x"));
    }

    #[test]
    fn test_history_file_overrides_field() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("history.txt");
        fs::write(&path, "User: from file\n").unwrap();

        let runtime = collect_fields(vec![("history".to_string(), "inline".to_string())], Some(&path)).unwrap();
        assert_eq!(runtime.get("history"), Some("User: from file"));
    }

    #[test]
    fn test_missing_history_file() {
        let result = collect_fields(vec![], Some(Path::new("/nonexistent/history.txt")));
        assert!(result.is_err());
    }
}
