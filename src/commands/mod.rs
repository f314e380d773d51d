pub mod agent;
pub mod build;
pub mod completions;
pub mod config;
pub mod init;

use std::path::Path;
use std::sync::Arc;

use eyre::{Context, Result};
use prompt_engine::{PromptAssembler, TemplateLoader, TemplatePaths};

/// Open a blueprint by name or path against the template library
pub(crate) fn open_assembler(agent: &str, templates_dir: &Path) -> Result<PromptAssembler> {
    let paths = TemplatePaths::new(templates_dir);
    let blueprint = paths.resolve_blueprint(agent);

    PromptAssembler::new(&blueprint, paths, Arc::new(TemplateLoader::new()))
        .with_context(|| format!("Failed to load agent '{}' from {}", agent, blueprint.display()))
}
