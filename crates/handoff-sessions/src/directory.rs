//! Static agent roster with availability tracking.

use std::collections::HashMap;
use std::sync::RwLock;

use handoff_types::{Agent, AgentKind, AgentStatus};

/// In-memory agent directory.
///
/// Seeded with a demo roster; availability flips to `busy` while an
/// agent is part of a transfer and back to `available` afterwards.
/// Agents not in the roster (freshly generated `agent_b_*` ids) are
/// simply unknown here, which is fine: the roster is advisory.
#[derive(Debug)]
pub struct AgentDirectory {
    agents: RwLock<HashMap<String, Agent>>,
}

impl AgentDirectory {
    /// Builds the default demo roster.
    pub fn with_default_roster() -> Self {
        let roster = [
            Agent {
                id: "agent-a".into(),
                name: "Agent Alice".into(),
                kind: AgentKind::Ai,
                status: AgentStatus::Available,
                capabilities: vec!["general".into(), "billing".into(), "technical".into()],
            },
            Agent {
                id: "agent-b".into(),
                name: "Agent Bob".into(),
                kind: AgentKind::Ai,
                status: AgentStatus::Available,
                capabilities: vec!["billing".into(), "refunds".into(), "escalation".into()],
            },
            Agent {
                id: "agent-c".into(),
                name: "Agent Carol".into(),
                kind: AgentKind::Human,
                status: AgentStatus::Available,
                capabilities: vec!["technical".into(), "enterprise".into(), "escalation".into()],
            },
        ];

        let agents = roster
            .into_iter()
            .map(|agent| (agent.id.clone(), agent))
            .collect();
        Self {
            agents: RwLock::new(agents),
        }
    }

    /// All agents, sorted by id for stable output.
    pub fn list(&self) -> Vec<Agent> {
        let agents = self.agents.read().expect("directory poisoned");
        let mut all: Vec<Agent> = agents.values().cloned().collect();
        all.sort_by(|a, b| a.id.cmp(&b.id));
        all
    }

    /// Updates availability; no-op for agents outside the roster.
    pub fn set_status(&self, agent_id: &str, status: AgentStatus) {
        let mut agents = self.agents.write().expect("directory poisoned");
        if let Some(agent) = agents.get_mut(agent_id) {
            agent.status = status;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_roster_has_three_available_agents() {
        let directory = AgentDirectory::with_default_roster();
        let agents = directory.list();
        assert_eq!(agents.len(), 3);
        assert!(agents.iter().all(|a| a.status == AgentStatus::Available));
        assert_eq!(agents[0].id, "agent-a");
    }

    #[test]
    fn status_flips_and_unknown_ids_are_ignored() {
        let directory = AgentDirectory::with_default_roster();
        directory.set_status("agent-b", AgentStatus::Busy);

        let agents = directory.list();
        let agent_b = agents.iter().find(|a| a.id == "agent-b").unwrap();
        assert_eq!(agent_b.status, AgentStatus::Busy);

        directory.set_status("agent_b_deadbeef", AgentStatus::Busy);
        assert_eq!(directory.list().len(), 3);
    }
}
