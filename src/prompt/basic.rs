//! Minimal strategies: raw system message fallback and chain of thought

use crate::agent::{AgentDefinition, AgentKind, InstructionDefinition};
use crate::error::{PromptError, Result};

use super::{Compose, RuntimeFields};

/// Fallback for unknown agent types: the system message, unmodified
pub struct DefaultStrategy;

impl Compose for DefaultStrategy {
    fn compose(
        &self,
        agent: &AgentDefinition,
        _instructions: &InstructionDefinition,
        _fields: &RuntimeFields,
    ) -> Result<String> {
        Ok(agent.system_message.clone())
    }
}

/// Chain of thought has no defined section layout yet
pub struct CotStrategy;

impl Compose for CotStrategy {
    fn compose(
        &self,
        _agent: &AgentDefinition,
        _instructions: &InstructionDefinition,
        _fields: &RuntimeFields,
    ) -> Result<String> {
        Err(PromptError::UnimplementedStrategy(AgentKind::Cot))
    }
}
