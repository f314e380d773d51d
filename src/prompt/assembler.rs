//! Blueprint-driven prompt assembly

use std::borrow::Cow;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::agent::{AgentDefinition, AgentKind, InstructionDefinition, ToolDocument};
use crate::error::{PromptError, Result};
use crate::template::{TemplateLoader, TemplatePaths};

use super::{RuntimeFields, strategy_for};

/// Builds prompts for one agent blueprint
///
/// Construction loads the blueprint and the instruction template for its
/// kind. The loaded definitions are never mutated: each `build` call works
/// on its own copy, so repeated builds produce the same prompt.
#[derive(Debug)]
pub struct PromptAssembler {
    agent_path: PathBuf,
    agent: AgentDefinition,
    instructions: InstructionDefinition,
    paths: TemplatePaths,
    loader: Arc<TemplateLoader>,
}

impl PromptAssembler {
    pub fn new(agent_path: impl AsRef<Path>, paths: TemplatePaths, loader: Arc<TemplateLoader>) -> Result<Self> {
        let agent_path = agent_path.as_ref().to_path_buf();
        let agent: AgentDefinition = loader.load_as(&agent_path)?;

        let instruction_path = paths.instruction(&agent.agent_type);
        let instructions: InstructionDefinition = loader.load_as(&instruction_path)?;

        log::debug!(
            "Loaded {} blueprint {} with instructions {}",
            agent.kind(),
            agent_path.display(),
            instruction_path.display()
        );

        Ok(Self {
            agent_path,
            agent,
            instructions,
            paths,
            loader,
        })
    }

    /// Assemble the prompt for the blueprint's kind
    pub fn build(&self, fields: &RuntimeFields) -> Result<String> {
        let kind = self.kind();
        log::debug!("Building {} prompt for {}", kind, self.agent_path.display());

        let agent = self.resolve_agent()?;
        strategy_for(kind).compose(&agent, &self.instructions, fields)
    }

    /// The blueprint as a given `build` sees it, with included tools merged in
    pub fn resolve_agent(&self) -> Result<Cow<'_, AgentDefinition>> {
        if !self.kind().includes_tools() {
            return Ok(Cow::Borrowed(&self.agent));
        }

        let names = self.agent.included_tool_names();
        if names.is_empty() {
            return Ok(Cow::Borrowed(&self.agent));
        }

        let mut working = self.agent.clone();
        for name in names {
            let tool_path = self.paths.tool(name);
            match self.loader.load_as::<ToolDocument>(&tool_path) {
                Ok(document) => {
                    let tools = document.into_tools();
                    log::debug!("Included {} tool(s) from {}", tools.len(), tool_path.display());
                    working.merge_included(tools);
                }
                Err(PromptError::TemplateNotFound { .. }) => {
                    log::warn!("Tool definition not found for '{}' at {}", name, tool_path.display());
                }
                Err(e) => return Err(e),
            }
        }

        Ok(Cow::Owned(working))
    }

    pub fn kind(&self) -> AgentKind {
        self.agent.kind()
    }

    pub fn agent(&self) -> &AgentDefinition {
        &self.agent
    }

    pub fn instructions(&self) -> &InstructionDefinition {
        &self.instructions
    }

    pub fn agent_path(&self) -> &Path {
        &self.agent_path
    }
}
