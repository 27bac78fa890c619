//! # Occupancy Index
//!
//! Spatial index from tiles to the agents standing on them.

use crate::game::{AgentId, AgentRoster, FloorGrid, Position};
use indexmap::IndexMap;

/// Tracks which agents stand on which tile of a floor.
///
/// Several agents may share one tile; each tile keeps its agents in arrival
/// order. A tile whose last agent leaves is dropped from the index, so the
/// index never holds an empty entry. Tiles themselves are kept in the order
/// they were first occupied, which makes scans over the index deterministic.
///
/// [`OccupancyIndex::move_agent`] only checks walkability. Callers that want
/// one agent per tile must ask [`OccupancyIndex::can_move_to`] first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OccupancyIndex {
    occupants: IndexMap<Position, Vec<AgentId>>,
}

impl OccupancyIndex {
    /// Creates an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Puts an agent on a walkable tile.
    ///
    /// Returns `false` without changing anything when the tile is not walkable.
    /// On success the agent's own position, if it keeps one, is updated too.
    pub fn place<R: AgentRoster + ?Sized>(
        &mut self,
        floor: &FloorGrid,
        agents: &mut R,
        id: AgentId,
        pos: Position,
    ) -> bool {
        if !floor.is_walkable(pos) {
            return false;
        }

        self.insert(id, pos);
        if let Some(agent) = agents.agent_mut(id) {
            agent.set_position(pos);
        }
        true
    }

    /// Takes the first occurrence of an agent off the index.
    ///
    /// Tiles are searched in the order they became occupied. Returns whether
    /// an entry was removed. The agent's own position field is
    /// left as it was.
    pub fn remove(&mut self, id: AgentId) -> bool {
        let found = self
            .occupants
            .iter()
            .find(|(_, ids)| ids.contains(&id))
            .map(|(&pos, _)| pos);

        match found {
            Some(pos) => self.detach(id, pos),
            None => false,
        }
    }

    /// Moves an agent to a walkable tile.
    ///
    /// The agent is detached from the position it last recorded on itself, if
    /// it records one and is listed there, and then appended at the
    /// destination. Occupancy of the destination is not checked. An agent
    /// without a position capability cannot be detached and ends up listed at
    /// both tiles.
    pub fn move_agent<R: AgentRoster + ?Sized>(
        &mut self,
        floor: &FloorGrid,
        agents: &mut R,
        id: AgentId,
        pos: Position,
    ) -> bool {
        if !floor.is_walkable(pos) {
            return false;
        }

        if let Some(previous) = agents.position_of(id) {
            self.detach(id, previous);
        }
        self.place(floor, agents, id, pos)
    }

    /// Gets the agents on a tile in arrival order.
    pub fn agents_at(&self, pos: Position) -> &[AgentId] {
        self.occupants.get(&pos).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Checks if any agent stands on a tile.
    pub fn is_occupied(&self, pos: Position) -> bool {
        !self.agents_at(pos).is_empty()
    }

    /// Checks if a tile is walkable and free of agents other than `exclude`.
    pub fn can_move_to(&self, floor: &FloorGrid, pos: Position, exclude: Option<AgentId>) -> bool {
        floor.is_walkable(pos)
            && self
                .agents_at(pos)
                .iter()
                .all(|&occupant| Some(occupant) == exclude)
    }

    /// Lists every agent on the floor.
    ///
    /// Agents sharing a tile keep their arrival order; tiles come in the order
    /// they became occupied.
    pub fn all_agents(&self) -> Vec<AgentId> {
        self.occupants.values().flatten().copied().collect()
    }

    /// Lists the occupied tiles.
    pub fn occupied_positions(&self) -> Vec<Position> {
        self.occupants.keys().copied().collect()
    }

    /// Counts the agent entries on the floor.
    pub fn len(&self) -> usize {
        self.occupants.values().map(Vec::len).sum()
    }

    /// Whether no agent is on the floor.
    pub fn is_empty(&self) -> bool {
        self.occupants.is_empty()
    }

    /// Drops every entry.
    pub fn clear(&mut self) {
        self.occupants.clear();
    }

    fn insert(&mut self, id: AgentId, pos: Position) {
        self.occupants.entry(pos).or_default().push(id);
    }

    /// Removes the first occurrence of `id` at `pos`, pruning the tile if it empties.
    fn detach(&mut self, id: AgentId, pos: Position) -> bool {
        let Some(ids) = self.occupants.get_mut(&pos) else {
            return false;
        };
        let Some(index) = ids.iter().position(|&occupant| occupant == id) else {
            return false;
        };

        ids.remove(index);
        if ids.is_empty() {
            self.occupants.shift_remove(&pos);
        }
        true
    }
}
