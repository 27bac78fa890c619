//! # Agent Capabilities
//!
//! The engine never owns agents. Callers keep agents in their own table and
//! hand the engine [`AgentId`] handles; the engine reaches the agents through
//! an [`AgentRoster`] only to read a display symbol or to keep a position
//! field in sync.

use crate::game::Position;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Opaque handle to an agent, typically an index into the caller's agent table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AgentId(pub usize);

/// Optional capabilities an agent can expose to the engine.
///
/// Both capabilities are best effort. An agent that keeps the default methods
/// has no position bookkeeping and no symbol, and the engine treats that as a
/// normal case rather than an error.
pub trait Agent {
    /// Last position recorded on the agent, if it tracks one.
    fn position(&self) -> Option<Position> {
        None
    }

    /// Records a new position on the agent. Agents without a position ignore it.
    fn set_position(&mut self, _position: Position) {}

    /// Character drawn in place of the tile the agent stands on.
    fn symbol(&self) -> Option<char> {
        None
    }
}

/// Resolves agent handles to the agents they refer to.
pub trait AgentRoster {
    /// Looks up an agent.
    fn agent(&self, id: AgentId) -> Option<&dyn Agent>;

    /// Looks up an agent for updating.
    fn agent_mut(&mut self, id: AgentId) -> Option<&mut dyn Agent>;

    /// Reads an agent's recorded position.
    fn position_of(&self, id: AgentId) -> Option<Position> {
        self.agent(id).and_then(|agent| agent.position())
    }

    /// Reads an agent's display symbol.
    fn symbol_of(&self, id: AgentId) -> Option<char> {
        self.agent(id).and_then(|agent| agent.symbol())
    }
}

impl<T: Agent> AgentRoster for [T] {
    fn agent(&self, id: AgentId) -> Option<&dyn Agent> {
        self.get(id.0).map(|agent| agent as &dyn Agent)
    }

    fn agent_mut(&mut self, id: AgentId) -> Option<&mut dyn Agent> {
        self.get_mut(id.0).map(|agent| agent as &mut dyn Agent)
    }
}

impl<T: Agent> AgentRoster for Vec<T> {
    fn agent(&self, id: AgentId) -> Option<&dyn Agent> {
        self.as_slice().agent(id)
    }

    fn agent_mut(&mut self, id: AgentId) -> Option<&mut dyn Agent> {
        self.as_mut_slice().agent_mut(id)
    }
}

impl<T: Agent> AgentRoster for HashMap<AgentId, T> {
    fn agent(&self, id: AgentId) -> Option<&dyn Agent> {
        self.get(&id).map(|agent| agent as &dyn Agent)
    }

    fn agent_mut(&mut self, id: AgentId) -> Option<&mut dyn Agent> {
        self.get_mut(&id).map(|agent| agent as &mut dyn Agent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Marker {
        symbol: char,
        position: Option<Position>,
    }

    impl Agent for Marker {
        fn position(&self) -> Option<Position> {
            self.position
        }

        fn set_position(&mut self, position: Position) {
            self.position = Some(position);
        }

        fn symbol(&self) -> Option<char> {
            Some(self.symbol)
        }
    }

    struct Ghost;

    impl Agent for Ghost {}

    #[test]
    fn test_default_capabilities_are_absent() {
        let mut ghost = Ghost;
        ghost.set_position(Position::new(1, 1));
        assert_eq!(ghost.position(), None);
        assert_eq!(ghost.symbol(), None);
    }

    #[test]
    fn test_vec_roster() {
        let mut agents = vec![
            Marker { symbol: '@', position: None },
            Marker { symbol: 'g', position: Some(Position::new(2, 2)) },
        ];

        assert_eq!(agents.symbol_of(AgentId(0)), Some('@'));
        assert_eq!(agents.position_of(AgentId(1)), Some(Position::new(2, 2)));
        assert!(agents.agent(AgentId(2)).is_none());

        agents
            .agent_mut(AgentId(0))
            .unwrap()
            .set_position(Position::new(5, 6));
        assert_eq!(agents[0].position, Some(Position::new(5, 6)));
    }

    #[test]
    fn test_map_roster() {
        let mut agents = HashMap::new();
        agents.insert(AgentId(7), Marker { symbol: 'k', position: None });

        assert_eq!(agents.symbol_of(AgentId(7)), Some('k'));
        assert_eq!(agents.symbol_of(AgentId(0)), None);
        assert!(agents.agent_mut(AgentId(7)).is_some());
    }
}
