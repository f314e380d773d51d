//! Few-shot prompt composition
//!
//! Assembles fragments provided at runtime without any internal branching.
//! The caller is responsible for constructing the response format rules,
//! valid actions list and example.

use crate::agent::{AgentDefinition, InstructionDefinition};
use crate::error::Result;

use super::fields::{EXAMPLE, RESPONSE_FORMAT_RULES, VALID_ACTIONS_LIST};
use super::{Compose, RuntimeFields, join_sections, rules_section};

const RUNTIME_SECTIONS: [&str; 3] = [RESPONSE_FORMAT_RULES, VALID_ACTIONS_LIST, EXAMPLE];

pub struct FewShotStrategy;

impl Compose for FewShotStrategy {
    fn compose(
        &self,
        agent: &AgentDefinition,
        _instructions: &InstructionDefinition,
        fields: &RuntimeFields,
    ) -> Result<String> {
        let mut sections = vec![agent.system_message.clone()];

        if let Some(rules) = rules_section(&agent.rules) {
            sections.push(rules);
        }

        sections.extend(
            RUNTIME_SECTIONS
                .iter()
                .filter_map(|name| fields.get(name))
                .map(str::to_string),
        );

        Ok(join_sections(&sections))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn compose(yaml: &str, fields: &RuntimeFields) -> String {
        let agent: AgentDefinition = serde_yaml::from_str(yaml).unwrap();
        FewShotStrategy
            .compose(&agent, &InstructionDefinition::default(), fields)
            .unwrap()
    }

    #[test]
    fn test_system_message_only() {
        let prompt = compose("agent_type: few_shot\nsystem_message: \"  Classify the intent.\\n\"\n", &RuntimeFields::new());
        assert_eq!(prompt, "Classify the intent.");
    }

    #[test]
    fn test_fixed_runtime_order() {
        let fields = RuntimeFields::new()
            .with(EXAMPLE, "Input: hi\nOutput: greet")
            .with(VALID_ACTIONS_LIST, "greet, ask, quit")
            .with(RESPONSE_FORMAT_RULES, "Reply with one action.")
            .with("history", "ignored");

        let prompt = compose("agent_type: few_shot\nsystem_message: S\nrules: [Be brief.]\n", &fields);

        assert_eq!(
            prompt,
            "S\n\nCRITICAL RULES:\n- Be brief.\n\nReply with one action.\n\ngreet, ask, quit\n\nInput: hi\nOutput: greet"
        );
    }

    #[test]
    fn test_partial_runtime_fields() {
        let fields = RuntimeFields::new().with(VALID_ACTIONS_LIST, "greet");
        let prompt = compose("agent_type: few_shot\nsystem_message: S\n", &fields);
        assert_eq!(prompt, "S\n\ngreet");
    }
}
