//! ReAct prompt composition
//!
//! Sections, in order, each only when it has content:
//!
//! 1. Preamble: system message, instructions, answer format
//! 2. Conversation history (runtime `history` field)
//! 3. Tools
//! 4. Reflection knowledge
//! 5. Rules
//! 6. Worked examples

use crate::agent::{AgentDefinition, ExampleSpec, InstructionDefinition, ReflectionKnowledge, Step, ToolSpec};
use crate::error::Result;

use super::fields::HISTORY;
use super::{Compose, RuntimeFields, SECTION_SEPARATOR, join_sections, rules_section};

const STRUCTURE_NOTICE: &str =
    "IMPORTANT: The XML-like tags in this prompt are for context and structure. DO NOT include them in your response.";

const ANSWER_FORMAT_LEAD: &str = "YOU MUST PROVIDE FINAL ANSWER IN SPECIFIC FORMAT SHOWN BELOW:";

const TOOLS_INTRO: &str = "Your available tools are in <tools_list>";
const TOOLS_INTRO_REFLECTION: &str = " and your guiding principles are in <reflection_knowledge>";
const TOOLS_OUTRO: &str = "No other actions are available to you.";

pub const CRITICAL_TOOL_RULE: &str = "<loop_rules>This tool is critical. If you decide to call it, you must provide Answer immediately after calling this tool. After you receive the Observation from this tool, your ONLY next step is to output the final Answer.</loop_rules>";

const REFLECTION_ENFORCEMENT: &str = "CRITICAL: When using any tool, you MUST ground your reasoning in the following reflection knowledge. Your thought process must explicitly reference these principles.";

const PAUSE: &str = "PAUSE";
const CONTINUATION_HINT: &str = "You will be called again with this:";
const ANSWER_LEAD: &str = "You then output:";

pub struct ReactStrategy;

impl Compose for ReactStrategy {
    fn compose(
        &self,
        agent: &AgentDefinition,
        instructions: &InstructionDefinition,
        fields: &RuntimeFields,
    ) -> Result<String> {
        let mut sections = vec![preamble(agent, instructions)];

        if let Some(history) = fields.get(HISTORY) {
            sections.push(history.to_string());
        }

        let reflection = agent.reflection();

        if !agent.tools.is_empty() {
            sections.push(tools_section(&agent.tools, reflection.is_some()));
        }

        if let Some(knowledge) = reflection {
            sections.push(reflection_section(knowledge));
        }

        if let Some(rules) = rules_section(&agent.rules) {
            sections.push(rules);
        }

        if !agent.examples.is_empty() {
            sections.push(examples_section(&agent.examples));
        }

        Ok(join_sections(&sections))
    }
}

fn preamble(agent: &AgentDefinition, instructions: &InstructionDefinition) -> String {
    let mut parts = Vec::new();

    if !agent.system_message.is_empty() {
        parts.push(agent.system_message.clone());
    }

    parts.push(format!("{}\n{}", instructions.instructions, STRUCTURE_NOTICE));

    if let Some(answer_format) = agent.answer_format() {
        parts.push(format!("{}\n{}", ANSWER_FORMAT_LEAD, answer_format));
    }

    parts.join(SECTION_SEPARATOR)
}

fn tools_section(tools: &[ToolSpec], has_reflection: bool) -> String {
    let mut intro = TOOLS_INTRO.to_string();
    if has_reflection {
        intro.push_str(TOOLS_INTRO_REFLECTION);
    }

    let mut lines = vec![intro, "<tools_list>".to_string()];
    lines.extend(tools.iter().map(render_tool));
    lines.push(TOOLS_OUTRO.to_string());
    lines.push("</tools_list>".to_string());

    lines.join("\n")
}

fn render_tool(tool: &ToolSpec) -> String {
    let mut block = format!(
        "<tool>\n{}\ne.g. {}\n\n{}",
        tool.name, tool.example_calling, tool.description
    );

    if tool.is_critical {
        block.push_str(SECTION_SEPARATOR);
        block.push_str(CRITICAL_TOOL_RULE);
    }

    // Trailing newline leaves a blank line between blocks
    block.push_str("\n</tool>\n");
    block
}

fn reflection_section(knowledge: &ReflectionKnowledge) -> String {
    format!(
        "<reflection_knowledge>\n{}\n{}\n</reflection_knowledge>",
        REFLECTION_ENFORCEMENT,
        knowledge.render()
    )
}

fn examples_section(examples: &[ExampleSpec]) -> String {
    let blocks: Vec<String> = examples
        .iter()
        .enumerate()
        .map(|(i, example)| render_example(i + 1, example))
        .collect();

    format!("{}{}", SECTION_SEPARATOR, blocks.join(SECTION_SEPARATOR))
}

fn render_example(number: usize, example: &ExampleSpec) -> String {
    let mut lines = vec![format!("--- Example {}: {} ---", number, example.name)];

    if let Some(description) = example.description.as_deref().filter(|d| !d.is_empty()) {
        lines.push(format!("Example Session: {}\n", description));
    }

    let last = example.steps.len().saturating_sub(1);
    for (i, step) in example.steps.iter().enumerate() {
        match step {
            Step::Thought { content } => lines.push(format!("Thought: {}", content)),
            Step::ToolCall { name, input } => {
                match input.as_deref().filter(|input| !input.is_empty()) {
                    Some(input) => lines.push(format!("Tool: {}: {}", name, input)),
                    None => lines.push(format!("Tool: {}", name)),
                }
                lines.push(PAUSE.to_string());
                if i < last {
                    lines.push(format!("\n{}", CONTINUATION_HINT));
                }
            }
            Step::Observation { content } => lines.push(format!("Observation: {}", content)),
            Step::Answer { content } => {
                lines.push(ANSWER_LEAD.to_string());
                lines.push(format!("Answer: {}", content));
            }
            Step::Custom { content } => lines.push(content.clone()),
        }
    }

    lines.join("\n")
}
