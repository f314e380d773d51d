//! Template library layout and loading
//!
//! A template library is a directory with three areas:
//!
//! ```text
//! <root>/blueprints/<name>.bp.yaml       agent definitions
//! <root>/instructions/<kind>.inst.yaml   instruction text per agent kind
//! <root>/tools/<tool>.tool.yaml          tools pulled in by include_tool_<tool>
//! ```

use std::path::{Path, PathBuf};

pub mod loader;

pub use loader::TemplateLoader;

pub const TEMPLATE_EXT: &str = "yaml";
pub const BLUEPRINTS_DIR: &str = "blueprints";
pub const INSTRUCTIONS_DIR: &str = "instructions";
pub const TOOLS_DIR: &str = "tools";

/// Derives template paths from a library root
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplatePaths {
    root: PathBuf,
}

impl TemplatePaths {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn blueprints_dir(&self) -> PathBuf {
        self.root.join(BLUEPRINTS_DIR)
    }

    pub fn instructions_dir(&self) -> PathBuf {
        self.root.join(INSTRUCTIONS_DIR)
    }

    pub fn tools_dir(&self) -> PathBuf {
        self.root.join(TOOLS_DIR)
    }

    /// `instructions/<agent_type lower-cased>.inst.yaml`
    pub fn instruction(&self, agent_type: &str) -> PathBuf {
        self.instructions_dir()
            .join(format!("{}.inst.{}", agent_type.to_lowercase(), TEMPLATE_EXT))
    }

    /// `tools/<tool_name>.tool.yaml`
    pub fn tool(&self, tool_name: &str) -> PathBuf {
        self.tools_dir().join(format!("{}.tool.{}", tool_name, TEMPLATE_EXT))
    }

    /// `blueprints/<name>.bp.yaml`
    pub fn blueprint(&self, name: &str) -> PathBuf {
        self.blueprints_dir().join(format!("{}.bp.{}", name, TEMPLATE_EXT))
    }

    /// Resolve a blueprint reference: an existing file is used as-is,
    /// anything else is treated as a blueprint name
    pub fn resolve_blueprint(&self, reference: &str) -> PathBuf {
        let direct = PathBuf::from(reference);
        if direct.is_file() { direct } else { self.blueprint(reference) }
    }

    /// Blueprint name from a `<name>.bp.yaml` file name
    pub fn blueprint_name(path: &Path) -> Option<String> {
        let file_name = path.file_name()?.to_str()?;
        file_name
            .strip_suffix(&format!(".bp.{}", TEMPLATE_EXT))
            .filter(|name| !name.is_empty())
            .map(str::to_string)
    }
}
