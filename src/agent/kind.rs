//! Agent kinds
//!
//! The `agent_type` of a blueprint selects how its sections are composed.
//! Unknown types fall back to [`AgentKind::Default`].

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgentKind {
    /// Reason + act loop with tools, reflection and worked examples
    React,
    /// Chain of thought
    Cot,
    /// System message and rules plus caller-supplied few-shot fragments
    FewShot,
    /// Raw system message
    Default,
}

impl AgentKind {
    pub const ALL: [AgentKind; 4] = [AgentKind::React, AgentKind::Cot, AgentKind::FewShot, AgentKind::Default];

    /// Map a blueprint's `agent_type` onto a kind, case-insensitively
    pub fn from_agent_type(agent_type: &str) -> Self {
        agent_type.parse().unwrap_or(AgentKind::Default)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AgentKind::React => "react",
            AgentKind::Cot => "cot",
            AgentKind::FewShot => "few_shot",
            AgentKind::Default => "default",
        }
    }

    /// Whether this kind resolves `include_tool_*` flags before composing
    pub fn includes_tools(&self) -> bool {
        matches!(self, AgentKind::React)
    }
}

impl std::fmt::Display for AgentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for AgentKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "react" => Ok(AgentKind::React),
            "cot" => Ok(AgentKind::Cot),
            "few_shot" => Ok(AgentKind::FewShot),
            "default" => Ok(AgentKind::Default),
            _ => Err(format!("Unknown agent type: {}", s)),
        }
    }
}
