//! Property tests for generated floors.

use burrow::generation::utils::create_rng;
use burrow::{
    FloorGrid, GenerationConfig, Generator, Position, Room, RoomCorridorGenerator, TileKind,
};
use proptest::prelude::*;

fn generate(width: u32, height: u32, config: &GenerationConfig) -> FloorGrid {
    let mut rng = create_rng(config);
    FloorGrid::generated(width, height, 1, config, &mut rng).expect("valid config should generate")
}

/// Checks every layout invariant of a generated floor.
fn assert_layout_invariants(floor: &FloorGrid) {
    // Outer wall is intact
    for (pos, tile) in floor.tiles() {
        let on_border = pos.x == 0
            || pos.y == 0
            || pos.x == floor.width as i32 - 1
            || pos.y == floor.height as i32 - 1;
        if on_border {
            assert_eq!(tile, TileKind::Wall, "border tile {} was carved", pos);
        }
    }

    for (i, a) in floor.rooms.iter().enumerate() {
        assert_eq!(a.id, i as u32);
        for b in &floor.rooms[i + 1..] {
            assert!(!a.intersects(b), "rooms {} and {} overlap", a.id, b.id);
        }
        for pos in a.interior_tiles() {
            assert!(floor.is_walkable(pos), "room {} interior {} is solid", a.id, pos);
        }
    }

    assert_eq!(floor.count_tiles(TileKind::StairsUp), 0);
    match floor.stairs_down_position {
        Some(stairs) => {
            assert_eq!(floor.count_tiles(TileKind::StairsDown), 1);
            assert_eq!(floor.get_tile(stairs), Some(TileKind::StairsDown));
            assert!(floor.rooms[1..].iter().any(|room| room.contains_interior(stairs)));
        }
        None => {
            assert_eq!(floor.count_tiles(TileKind::StairsDown), 0);
            assert!(floor.rooms.len() < 2);
        }
    }

    match floor.spawn_point {
        Some(spawn) => {
            assert!(floor.rooms[0].contains_interior(spawn));
            assert!(floor.is_walkable(spawn));
        }
        None => assert!(floor.rooms.is_empty()),
    }

    assert!(RoomCorridorGenerator::new().validate(floor).is_ok());
}

#[test]
fn test_standard_floors_across_seeds() {
    for seed in 0..100 {
        let floor = generate(80, 24, &GenerationConfig::new(seed));
        assert_layout_invariants(&floor);
        assert!(!floor.rooms.is_empty(), "seed {} produced no rooms", seed);
    }
}

#[test]
fn test_rooms_are_connected_in_a_chain() {
    for seed in 0..20 {
        let floor = generate(80, 24, &GenerationConfig::new(seed));
        let last = floor.rooms.len().saturating_sub(1);

        for (i, room) in floor.rooms.iter().enumerate() {
            let mut expected = Vec::new();
            if i > 0 {
                expected.push(i as u32 - 1);
            }
            if i < last {
                expected.push(i as u32 + 1);
            }
            let mut actual = room.connections.clone();
            actual.sort_unstable();
            assert_eq!(actual, expected, "seed {} room {}", seed, i);
        }
    }
}

#[test]
fn test_every_room_reachable_from_spawn() {
    for seed in 0..20 {
        let floor = generate(80, 24, &GenerationConfig::new(seed));
        let Some(spawn) = floor.spawn_point else {
            continue;
        };

        let mut seen = vec![spawn];
        let mut frontier = vec![spawn];
        while let Some(pos) = frontier.pop() {
            for next in pos.cardinal_adjacent_positions() {
                if floor.is_walkable(next) && !seen.contains(&next) {
                    seen.push(next);
                    frontier.push(next);
                }
            }
        }

        for room in &floor.rooms {
            assert!(
                seen.contains(&room.center()),
                "seed {}: room {} unreachable",
                seed,
                room.id
            );
        }
    }
}

#[test]
fn test_tiny_floor_stays_solid() {
    let floor = generate(5, 5, &GenerationConfig::new(3));
    assert!(floor.rooms.is_empty());
    assert_eq!(floor.count_tiles(TileKind::Wall), 25);
    assert_eq!(floor.spawn_point, None);
    assert_eq!(floor.stairs_down_position, None);
}

#[test]
fn test_line_of_sight_on_generated_floor() {
    let floor = generate(80, 24, &GenerationConfig::new(31));
    let spawn = floor.spawn_point.expect("spawn point");

    assert!(floor.has_line_of_sight(spawn, spawn, 0));
    let visible = floor.visible_from(spawn, 8);
    assert!(visible.contains(&spawn));
    for pos in visible {
        assert!(pos.manhattan_distance(spawn) <= 8);
        assert!(floor.has_line_of_sight(spawn, pos, 8));
    }
}

proptest! {
    #[test]
    fn prop_generated_floors_hold_invariants(
        seed in any::<u64>(),
        width in 10u32..100,
        height in 10u32..40,
    ) {
        let floor = generate(width, height, &GenerationConfig::new(seed));
        assert_layout_invariants(&floor);
    }

    #[test]
    fn prop_generation_is_deterministic(seed in any::<u64>()) {
        let config = GenerationConfig::for_testing(seed);
        prop_assert_eq!(generate(60, 30, &config), generate(60, 30, &config));
    }

    #[test]
    fn prop_intersects_is_symmetric(
        ax in 0i32..30, ay in 0i32..30, aw in 1u32..12, ah in 1u32..12,
        bx in 0i32..30, by in 0i32..30, bw in 1u32..12, bh in 1u32..12,
    ) {
        let a = Room::new(0, Position::new(ax, ay), aw, ah);
        let b = Room::new(1, Position::new(bx, by), bw, bh);
        prop_assert_eq!(a.intersects(&b), b.intersects(&a));
        prop_assert!(a.intersects(&a));
    }

    #[test]
    fn prop_out_of_bounds_is_never_walkable(
        seed in 0u64..1000,
        x in -20i32..100,
        y in -20i32..50,
    ) {
        let floor = generate(60, 24, &GenerationConfig::new(seed));
        let pos = Position::new(x, y);
        if !floor.is_valid_position(pos) {
            prop_assert!(!floor.is_walkable(pos));
            prop_assert_eq!(floor.get_tile(pos), None);
        }
    }

    #[test]
    fn prop_line_of_sight_respects_range(
        seed in 0u64..200,
        fx in 0i32..60, fy in 0i32..24,
        tx in 0i32..60, ty in 0i32..24,
        range in 0u32..20,
    ) {
        let floor = generate(60, 24, &GenerationConfig::new(seed));
        let from = Position::new(fx, fy);
        let to = Position::new(tx, ty);
        if from.manhattan_distance(to) > range {
            prop_assert!(!floor.has_line_of_sight(from, to, range));
        }
    }
}
