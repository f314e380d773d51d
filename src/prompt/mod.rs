//! Prompt composition
//!
//! Each agent kind maps to one [`Compose`] strategy. The strategies only
//! read the definitions they are given; the [`PromptAssembler`] prepares a
//! per-build working copy of the blueprint (with included tools merged in)
//! before dispatching.

use crate::agent::{AgentDefinition, AgentKind, InstructionDefinition};
use crate::error::Result;

pub mod assembler;
pub mod basic;
pub mod few_shot;
pub mod fields;
pub mod react;

pub use assembler::PromptAssembler;
pub use fields::RuntimeFields;

/// Separator between prompt sections
pub const SECTION_SEPARATOR: &str = "\n\n";

/// A section-composition strategy
pub trait Compose {
    fn compose(
        &self,
        agent: &AgentDefinition,
        instructions: &InstructionDefinition,
        fields: &RuntimeFields,
    ) -> Result<String>;
}

/// Strategy used for an agent kind
pub fn strategy_for(kind: AgentKind) -> &'static dyn Compose {
    match kind {
        AgentKind::React => &react::ReactStrategy,
        AgentKind::Cot => &basic::CotStrategy,
        AgentKind::FewShot => &few_shot::FewShotStrategy,
        AgentKind::Default => &basic::DefaultStrategy,
    }
}

/// Join sections with blank lines and trim the result
pub(crate) fn join_sections(sections: &[String]) -> String {
    sections.join(SECTION_SEPARATOR).trim().to_string()
}

/// `CRITICAL RULES:` followed by one bullet per rule
pub(crate) fn rules_section(rules: &[String]) -> Option<String> {
    if rules.is_empty() {
        return None;
    }

    let bullets = rules.iter().map(|rule| format!("- {}", rule)).collect::<Vec<_>>().join("\n");
    Some(format!("CRITICAL RULES:\n{}", bullets))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rules_section() {
        let rules = vec!["Be concise.".to_string(), "Cite sources.".to_string()];
        assert_eq!(
            rules_section(&rules).unwrap(),
            "CRITICAL RULES:\n- Be concise.\n- Cite sources."
        );
        assert!(rules_section(&[]).is_none());
    }

    #[test]
    fn test_join_sections_trims() {
        let sections = vec!["\n  first".to_string(), "second  \n".to_string()];
        assert_eq!(join_sections(&sections), "first\n\nsecond");
    }
}
