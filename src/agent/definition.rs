//! Blueprint, instruction and tool document types

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize, de};
use serde_yaml::Value;

use super::AgentKind;

const INCLUDE_TOOL_PREFIX: &str = "include_tool_";

/// An agent blueprint: persona, rules, tools and worked examples
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentDefinition {
    /// Selects the composition strategy (e.g. "react", "few_shot")
    #[serde(default = "default_agent_type")]
    pub agent_type: String,

    #[serde(default)]
    pub system_message: String,

    #[serde(default, deserialize_with = "scalar_list")]
    pub rules: Vec<String>,

    #[serde(default)]
    pub tools: Vec<ToolSpec>,

    #[serde(default)]
    pub examples: Vec<ExampleSpec>,

    /// Required shape of the final answer
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub answer_format: Option<String>,

    /// Guiding principles the agent must reference when using tools
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reflection_knowledge: Option<ReflectionKnowledge>,

    /// Remaining keys in document order, including `include_tool_<name>` flags
    #[serde(flatten)]
    pub extra: IndexMap<String, Value>,
}

fn default_agent_type() -> String {
    AgentKind::Default.as_str().to_string()
}

impl AgentDefinition {
    pub fn kind(&self) -> AgentKind {
        AgentKind::from_agent_type(&self.agent_type)
    }

    /// Tool names requested through truthy `include_tool_<name>` flags
    pub fn included_tool_names(&self) -> Vec<&str> {
        self.extra
            .iter()
            .filter(|(_, value)| is_truthy(value))
            .filter_map(|(key, _)| key.strip_prefix(INCLUDE_TOOL_PREFIX))
            .filter(|name| !name.is_empty())
            .collect()
    }

    /// Reflection knowledge, if present and non-empty
    pub fn reflection(&self) -> Option<&ReflectionKnowledge> {
        self.reflection_knowledge.as_ref().filter(|k| !k.is_empty())
    }

    /// Answer format, if present and non-empty
    pub fn answer_format(&self) -> Option<&str> {
        self.answer_format.as_deref().filter(|f| !f.is_empty())
    }

    /// Append tools loaded from a tool document. Examples carried by the
    /// first appended tool are appended to the blueprint's examples.
    pub fn merge_included(&mut self, included: Vec<ToolSpec>) {
        if let Some(first) = included.first() {
            self.examples.extend(first.examples.iter().cloned());
        }
        self.tools.extend(included);
    }
}

/// YAML truthiness for inclusion flags
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        Value::Sequence(seq) => !seq.is_empty(),
        Value::Mapping(map) => !map.is_empty(),
        Value::Tagged(tagged) => is_truthy(&tagged.value),
    }
}

/// Text form of a YAML scalar, so `content: 20` reads as "20"
fn scalar_text(value: Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Tagged(tagged) => scalar_text(tagged.value),
        Value::Null | Value::Sequence(_) | Value::Mapping(_) => None,
    }
}

fn scalar<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    let value = Value::deserialize(deserializer)?;
    scalar_text(value).ok_or_else(|| de::Error::custom("expected a string, number or boolean"))
}

fn optional_scalar<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(None),
        value => scalar_text(value)
            .map(Some)
            .ok_or_else(|| de::Error::custom("expected a string, number or boolean")),
    }
}

fn scalar_list<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<String>, D::Error> {
    Vec::<Value>::deserialize(deserializer)?
        .into_iter()
        .map(|value| scalar_text(value).ok_or_else(|| de::Error::custom("rules must be scalar values")))
        .collect()
}

/// Reflection knowledge is either free text or a list of principles
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ReflectionKnowledge {
    Items(Vec<String>),
    Text(String),
}

impl ReflectionKnowledge {
    pub fn is_empty(&self) -> bool {
        match self {
            ReflectionKnowledge::Items(items) => items.is_empty(),
            ReflectionKnowledge::Text(text) => text.is_empty(),
        }
    }

    /// Bulleted for lists, trimmed text otherwise
    pub fn render(&self) -> String {
        match self {
            ReflectionKnowledge::Items(items) => items
                .iter()
                .map(|item| format!("- {}", item))
                .collect::<Vec<_>>()
                .join("\n"),
            ReflectionKnowledge::Text(text) => text.trim().to_string(),
        }
    }
}

/// Mode-of-operation text selected by agent kind
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InstructionDefinition {
    #[serde(default)]
    pub instructions: String,
}

/// A tool the agent may call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolSpec {
    pub name: String,
    pub description: String,
    pub example_calling: String,

    /// The agent must answer right after using a critical tool
    #[serde(default)]
    pub is_critical: bool,

    /// Worked examples merged into the blueprint when this tool is included
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub examples: Vec<ExampleSpec>,
}

/// Contents of a `<name>.tool.yaml` document
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ToolDocument {
    Many(Vec<ToolSpec>),
    One(Box<ToolSpec>),
}

impl ToolDocument {
    pub fn into_tools(self) -> Vec<ToolSpec> {
        match self {
            ToolDocument::Many(tools) => tools,
            ToolDocument::One(tool) => vec![*tool],
        }
    }
}

/// A worked example session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExampleSpec {
    #[serde(default)]
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default)]
    pub steps: Vec<Step>,
}

/// One step of an example session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Step {
    Thought {
        #[serde(deserialize_with = "scalar")]
        content: String,
    },
    ToolCall {
        name: String,
        #[serde(default, deserialize_with = "optional_scalar", skip_serializing_if = "Option::is_none")]
        input: Option<String>,
    },
    Observation {
        #[serde(deserialize_with = "scalar")]
        content: String,
    },
    Answer {
        #[serde(deserialize_with = "scalar")]
        content: String,
    },
    /// Emitted verbatim
    Custom {
        #[serde(deserialize_with = "scalar")]
        content: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_agent_deserialize_full() {
        let yaml = r#"
agent_type: react
system_message: You are an assistant.
rules:
  - Be concise.
tools:
  - name: search
    description: Web search
    example_calling: search(query)
    is_critical: true
examples:
  - name: Lookup
    description: Looking something up
    steps:
      - type: thought
        content: I should search.
      - type: tool_call
        name: search
        input: capital of France
      - type: observation
        content: Paris
      - type: answer
        content: Paris
answer_format: "Answer: <text>"
reflection_knowledge:
  - Verify sources
include_tool_calculator: true
"#;

        let agent: AgentDefinition = serde_yaml::from_str(yaml).unwrap();

        assert_eq!(agent.kind(), AgentKind::React);
        assert_eq!(agent.rules, vec!["Be concise."]);
        assert_eq!(agent.tools.len(), 1);
        assert!(agent.tools[0].is_critical);
        assert_eq!(agent.examples[0].steps.len(), 4);
        assert_eq!(
            agent.examples[0].steps[1],
            Step::ToolCall {
                name: "search".to_string(),
                input: Some("capital of France".to_string())
            }
        );
        assert_eq!(agent.answer_format(), Some("Answer: <text>"));
        assert_eq!(
            agent.reflection(),
            Some(&ReflectionKnowledge::Items(vec!["Verify sources".to_string()]))
        );
        assert_eq!(agent.included_tool_names(), vec!["calculator"]);
    }

    #[test]
    fn test_unquoted_scalars_in_steps_and_rules() {
        let yaml = r#"
rules:
  - 42
  - Be brief.
examples:
  - name: Year
    steps:
      - type: tool_call
        name: calendar
        input: 2024
      - type: observation
        content: 20
      - type: answer
        content: true
"#;

        let agent: AgentDefinition = serde_yaml::from_str(yaml).unwrap();

        assert_eq!(agent.rules, vec!["42", "Be brief."]);
        let steps = &agent.examples[0].steps;
        assert_eq!(
            steps[0],
            Step::ToolCall {
                name: "calendar".to_string(),
                input: Some("2024".to_string())
            }
        );
        assert_eq!(
            steps[1],
            Step::Observation {
                content: "20".to_string()
            }
        );
        assert_eq!(
            steps[2],
            Step::Answer {
                content: "true".to_string()
            }
        );
    }

    #[test]
    fn test_step_rejects_structured_content() {
        let yaml = "examples:\n  - steps:\n      - type: observation\n        content: [1, 2]\n";
        assert!(serde_yaml::from_str::<AgentDefinition>(yaml).is_err());
    }

    #[test]
    fn test_agent_defaults() {
        let agent: AgentDefinition = serde_yaml::from_str("system_message: hi\n").unwrap();

        assert_eq!(agent.agent_type, "default");
        assert_eq!(agent.kind(), AgentKind::Default);
        assert!(agent.rules.is_empty());
        assert!(agent.tools.is_empty());
        assert!(agent.reflection().is_none());
        assert!(agent.answer_format().is_none());
    }

    #[test]
    fn test_included_tool_names_truthiness_and_order() {
        let yaml = r#"
agent_type: react
include_tool_zeta: true
include_tool_off: false
include_tool_alpha: 1
include_tool_zero: 0
include_tool_empty: ""
include_tool_named: "yes"
include_tool_: true
unrelated_flag: true
"#;
        let agent: AgentDefinition = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(agent.included_tool_names(), vec!["zeta", "alpha", "named"]);
    }

    #[test]
    fn test_reflection_text_and_empty() {
        let agent: AgentDefinition = serde_yaml::from_str("reflection_knowledge: \"  Be careful.  \"\n").unwrap();
        let reflection = agent.reflection().unwrap();
        assert_eq!(reflection.render(), "Be careful.");

        let agent: AgentDefinition = serde_yaml::from_str("reflection_knowledge: []\n").unwrap();
        assert!(agent.reflection().is_none());
    }

    #[test]
    fn test_reflection_items_render() {
        let knowledge = ReflectionKnowledge::Items(vec!["one".to_string(), "two".to_string()]);
        assert_eq!(knowledge.render(), "- one\n- two");
    }

    #[test]
    fn test_tool_missing_required_field() {
        let yaml = "tools:\n  - name: search\n    description: Web search\n";
        let result: Result<AgentDefinition, _> = serde_yaml::from_str(yaml);
        assert!(result.is_err());
    }

    #[test]
    fn test_tool_document_list_or_single() {
        let many: ToolDocument = serde_yaml::from_str(
            "- name: a\n  description: A\n  example_calling: a()\n- name: b\n  description: B\n  example_calling: b()\n",
        )
        .unwrap();
        assert_eq!(many.into_tools().len(), 2);

        let one: ToolDocument = serde_yaml::from_str("name: a\ndescription: A\nexample_calling: a()\n").unwrap();
        let tools = one.into_tools();
        assert_eq!(tools.len(), 1);
        assert_eq!(tools[0].name, "a");
    }

    #[test]
    fn test_merge_included_takes_first_tool_examples() {
        let mut agent: AgentDefinition = serde_yaml::from_str("agent_type: react\n").unwrap();
        let example = ExampleSpec {
            name: "calc".to_string(),
            description: None,
            steps: vec![Step::Answer { content: "4".to_string() }],
        };
        let first = ToolSpec {
            name: "calculator".to_string(),
            description: "Math".to_string(),
            example_calling: "calculator(2+2)".to_string(),
            is_critical: false,
            examples: vec![example.clone()],
        };
        let second = ToolSpec {
            name: "clock".to_string(),
            examples: vec![example.clone()],
            ..first.clone()
        };

        agent.merge_included(vec![first, second]);

        assert_eq!(agent.tools.len(), 2);
        assert_eq!(agent.examples, vec![example]);
    }

    #[test]
    fn test_step_unknown_type_rejected() {
        let result: Result<Step, _> = serde_yaml::from_str("type: reflection\ncontent: hmm\n");
        assert!(result.is_err());
    }
}
