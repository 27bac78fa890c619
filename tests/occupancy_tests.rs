//! Property tests for the occupancy index.

use burrow::{Agent, AgentId, FloorGrid, OccupancyIndex, Position};
use proptest::prelude::*;

struct Scout {
    position: Option<Position>,
}

impl Agent for Scout {
    fn position(&self) -> Option<Position> {
        self.position
    }

    fn set_position(&mut self, position: Position) {
        self.position = Some(position);
    }
}

#[derive(Debug, Clone)]
enum Op {
    Place(usize, i32, i32),
    Move(usize, i32, i32),
    Remove(usize),
}

const AGENTS: usize = 4;

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0..AGENTS, -1i32..9, -1i32..7).prop_map(|(id, x, y)| Op::Place(id, x, y)),
        (0..AGENTS, -1i32..9, -1i32..7).prop_map(|(id, x, y)| Op::Move(id, x, y)),
        (0..AGENTS).prop_map(Op::Remove),
    ]
}

fn arena() -> FloorGrid {
    FloorGrid::from_ascii(
        1,
        &[
            "########", "#......#", "#..##..#", "#......#", "#.#....#", "########",
        ],
    )
    .expect("valid arena")
}

proptest! {
    #[test]
    fn prop_index_never_holds_empty_tiles(ops in prop::collection::vec(op_strategy(), 0..60)) {
        let floor = arena();
        let mut agents: Vec<Scout> = (0..AGENTS).map(|_| Scout { position: None }).collect();
        let mut index = OccupancyIndex::new();
        let mut expected_len = 0usize;

        for op in ops {
            match op {
                Op::Place(id, x, y) => {
                    let pos = Position::new(x, y);
                    let placed = index.place(&floor, &mut agents, AgentId(id), pos);
                    prop_assert_eq!(placed, floor.is_walkable(pos));
                    if placed {
                        expected_len += 1;
                    }
                }
                Op::Move(id, x, y) => {
                    let pos = Position::new(x, y);
                    let listed_at_previous = agents[id]
                        .position
                        .is_some_and(|previous| index.agents_at(previous).contains(&AgentId(id)));
                    let moved = index.move_agent(&floor, &mut agents, AgentId(id), pos);
                    prop_assert_eq!(moved, floor.is_walkable(pos));
                    if moved {
                        prop_assert_eq!(agents[id].position, Some(pos));
                        if !listed_at_previous {
                            expected_len += 1;
                        }
                    }
                }
                Op::Remove(id) => {
                    if index.remove(AgentId(id)) {
                        expected_len -= 1;
                    }
                }
            }

            prop_assert_eq!(index.len(), expected_len);
            prop_assert_eq!(index.all_agents().len(), expected_len);
            prop_assert_eq!(index.is_empty(), expected_len == 0);
            for pos in index.occupied_positions() {
                prop_assert!(!index.agents_at(pos).is_empty());
                prop_assert!(floor.is_walkable(pos));
            }
        }
    }

    #[test]
    fn prop_moved_agent_is_at_destination(
        start in 0usize..20,
        steps in prop::collection::vec(0usize..20, 1..20),
    ) {
        let floor = arena();
        let open: Vec<Position> = floor
            .tiles()
            .filter(|&(_, tile)| tile.is_walkable())
            .map(|(pos, _)| pos)
            .collect();
        let mut agents = vec![Scout { position: None }];
        let mut index = OccupancyIndex::new();
        let id = AgentId(0);

        let mut here = open[start % open.len()];
        prop_assert!(index.place(&floor, &mut agents, id, here));

        for step in steps {
            let next = open[step % open.len()];
            prop_assert!(index.move_agent(&floor, &mut agents, id, next));
            if next != here {
                prop_assert!(index.agents_at(here).is_empty());
            }
            prop_assert_eq!(index.agents_at(next), &[id][..]);
            prop_assert_eq!(index.len(), 1);
            here = next;
        }
    }
}
