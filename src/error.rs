//! Error types for template loading and prompt assembly

use std::path::PathBuf;
use thiserror::Error;

use crate::agent::AgentKind;

#[derive(Error, Debug)]
pub enum PromptError {
    /// A referenced template document does not exist or cannot be read
    #[error("Template file not found at: {}", path.display())]
    TemplateNotFound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A template document exists but is not well-formed
    #[error("Error parsing YAML file at {}: {}", path.display(), source)]
    TemplateParsing {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// Reserved for runtime fields that a strategy declares mandatory
    #[error("Missing value for required placeholder: {0}")]
    MissingPlaceholder(String),

    /// The agent kind has no composition strategy yet
    #[error("Prompt strategy '{0}' is not implemented")]
    UnimplementedStrategy(AgentKind),
}

impl PromptError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::TemplateNotFound { .. })
    }
}

pub type Result<T> = std::result::Result<T, PromptError>;
