//! Prompt assembly for language-model agents
//!
//! Agent blueprints, instruction templates and tool definitions live as YAML
//! documents in a template library. A [`PromptAssembler`] loads a blueprint,
//! picks the composition strategy for its `agent_type`, and joins the
//! selected sections into one prompt string.
//!
//! ```no_run
//! use std::sync::Arc;
//! use prompt_engine::{PromptAssembler, RuntimeFields, TemplateLoader, TemplatePaths};
//!
//! let paths = TemplatePaths::new("templates");
//! let loader = Arc::new(TemplateLoader::new());
//! let assembler = PromptAssembler::new(paths.blueprint("react_agent"), paths, loader)?;
//! let prompt = assembler.build(&RuntimeFields::new().with("history", "User: hi"))?;
//! # Ok::<(), prompt_engine::PromptError>(())
//! ```

pub mod agent;
pub mod error;
pub mod prompt;
pub mod template;

pub use agent::{AgentDefinition, AgentKind, InstructionDefinition, ToolSpec};
pub use error::{PromptError, Result};
pub use prompt::{Compose, PromptAssembler, RuntimeFields};
pub use template::{TemplateLoader, TemplatePaths};
