//! Agent blueprints
//!
//! A blueprint describes one agent: its kind, persona, rules, tools and
//! worked examples. Tools may also be pulled in from the template library
//! through `include_tool_<name>` flags.

pub mod definition;
pub mod kind;

pub use definition::{
    AgentDefinition, ExampleSpec, InstructionDefinition, ReflectionKnowledge, Step, ToolDocument, ToolSpec,
};
pub use kind::AgentKind;
