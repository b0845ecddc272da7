//! Agent roster definitions.

use serde::{Deserialize, Serialize};

/// Whether an agent is a human operator or an AI assistant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgentKind {
    Ai,
    Human,
}

/// Availability of an agent for taking transfers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgentStatus {
    Available,
    Busy,
    Offline,
}

/// One entry in the agent directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Agent {
    pub id: String,
    pub name: String,
    pub kind: AgentKind,
    pub status: AgentStatus,
    /// Skill tags used when picking a transfer target (e.g. "billing").
    pub capabilities: Vec<String>,
}
