//! # Floor Generation
//!
//! Room-and-corridor layout generation.
//!
//! Generation runs four phases in strict order, each one reading what the
//! previous phase produced:
//! 1. Place non-overlapping rooms and carve their interiors
//! 2. Chain each room to the next with an L-shaped corridor
//! 3. Put the stairs down in a random room other than the first
//! 4. Pick the spawn point inside the first room

use crate::game::{FloorGrid, Position, TileKind};
use crate::generation::{GenerationConfig, Generator, Room};
use crate::{BurrowError, BurrowResult};
use log::debug;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::Rng;

/// Primary floor generator using the room-and-corridor algorithm.
///
/// Every room placement attempt is tried once. A candidate that overlaps an
/// accepted room is discarded rather than retried, so a floor usually ends up
/// with fewer rooms than the count drawn from the configuration.
#[derive(Debug, Clone, Default)]
pub struct RoomCorridorGenerator;

impl RoomCorridorGenerator {
    /// Creates a new floor generator.
    ///
    /// # Examples
    ///
    /// ```
    /// use burrow::{FloorGrid, GenerationConfig, Generator, RoomCorridorGenerator};
    /// use burrow::generation::utils::create_rng;
    ///
    /// let config = GenerationConfig::new(7);
    /// let mut rng = create_rng(&config);
    /// let mut floor = FloorGrid::new(80, 24, 1);
    ///
    /// let generator = RoomCorridorGenerator::new();
    /// generator.generate(&mut floor, &config, &mut rng).unwrap();
    /// assert!(floor.is_generated());
    /// assert!(generator.validate(&floor).is_ok());
    /// assert!(generator.generate(&mut floor, &config, &mut rng).is_err());
    /// ```
    pub fn new() -> Self {
        Self
    }

    /// Places rooms and carves their interiors.
    fn place_rooms(&self, floor: &mut FloorGrid, config: &GenerationConfig, rng: &mut StdRng) {
        let attempts = rng.gen_range(config.min_rooms..=config.max_rooms);

        for _ in 0..attempts {
            let Some(room) = self.room_candidate(floor, config, rng) else {
                continue;
            };

            if floor.rooms.iter().any(|existing| room.intersects(existing)) {
                continue;
            }

            self.carve_room(floor, &room);
            floor.rooms.push(room);
        }

        debug!(
            "Floor {}: placed {} of {} rooms",
            floor.floor_number,
            floor.rooms.len(),
            attempts
        );
    }

    /// Draws a room that fits inside the floor with a one-tile margin.
    ///
    /// Returns `None` when the drawn size leaves no room for that margin.
    fn room_candidate(
        &self,
        floor: &FloorGrid,
        config: &GenerationConfig,
        rng: &mut StdRng,
    ) -> Option<Room> {
        let width = rng.gen_range(config.min_room_size..=config.max_room_size);
        let height = rng.gen_range(config.min_room_size..=config.max_room_size);

        let max_x = floor.width as i64 - width as i64 - 1;
        let max_y = floor.height as i64 - height as i64 - 1;
        if max_x <= 1 || max_y <= 1 {
            return None;
        }

        let x = rng.gen_range(1..=max_x) as i32;
        let y = rng.gen_range(1..=max_y) as i32;

        Some(Room::new(floor.rooms.len() as u32, Position::new(x, y), width, height))
    }

    /// Carves out a room's interior. Walls stay walls.
    fn carve_room(&self, floor: &mut FloorGrid, room: &Room) {
        for pos in room.interior_tiles() {
            floor.set_tile(pos, TileKind::Floor);
        }
    }

    /// Connects each room to the next one in generation order.
    fn connect_rooms(&self, floor: &mut FloorGrid, config: &GenerationConfig, rng: &mut StdRng) {
        if floor.rooms.len() < 2 {
            return;
        }

        for i in 0..(floor.rooms.len() - 1) {
            let start = floor.rooms[i].center();
            let end = floor.rooms[i + 1].center();
            let horizontal_first = rng.gen_bool(config.horizontal_first_chance);

            self.carve_l_corridor(floor, start, end, horizontal_first);

            let (first_id, second_id) = (floor.rooms[i].id, floor.rooms[i + 1].id);
            floor.rooms[i].add_connection(second_id);
            floor.rooms[i + 1].add_connection(first_id);
        }

        debug!(
            "Floor {}: carved {} corridors",
            floor.floor_number,
            floor.rooms.len() - 1
        );
    }

    /// Carves an L-shaped corridor between two points.
    fn carve_l_corridor(
        &self,
        floor: &mut FloorGrid,
        start: Position,
        end: Position,
        horizontal_first: bool,
    ) {
        if horizontal_first {
            self.carve_horizontal(floor, start.x, end.x, start.y);
            self.carve_vertical(floor, start.y, end.y, end.x);
        } else {
            self.carve_vertical(floor, start.y, end.y, start.x);
            self.carve_horizontal(floor, start.x, end.x, end.y);
        }
    }

    fn carve_horizontal(&self, floor: &mut FloorGrid, x1: i32, x2: i32, y: i32) {
        for x in x1.min(x2)..=x1.max(x2) {
            self.carve_corridor_tile(floor, Position::new(x, y));
        }
    }

    fn carve_vertical(&self, floor: &mut FloorGrid, y1: i32, y2: i32, x: i32) {
        for y in y1.min(y2)..=y1.max(y2) {
            self.carve_corridor_tile(floor, Position::new(x, y));
        }
    }

    /// Corridors never break through the outer wall.
    fn carve_corridor_tile(&self, floor: &mut FloorGrid, pos: Position) {
        let inside_border = pos.x > 0
            && pos.y > 0
            && pos.x < floor.width as i32 - 1
            && pos.y < floor.height as i32 - 1;
        if inside_border {
            floor.set_tile(pos, TileKind::Floor);
        }
    }

    /// Places the stairs down in a random room other than the first.
    fn place_stairs(&self, floor: &mut FloorGrid, rng: &mut StdRng) {
        if floor.rooms.len() < 2 {
            return;
        }

        let Some(room) = floor.rooms[1..].choose(rng) else {
            return;
        };
        let Some(&stairs) = room.interior_tiles().choose(rng) else {
            debug!(
                "Floor {}: room {} has no interior, no stairs placed",
                floor.floor_number, room.id
            );
            return;
        };

        floor.set_tile(stairs, TileKind::StairsDown);
        floor.stairs_down_position = Some(stairs);
        debug!("Floor {}: stairs down at {}", floor.floor_number, stairs);
    }

    /// Picks the spawn point inside the first room. The tile itself is unchanged.
    fn place_spawn(&self, floor: &mut FloorGrid, rng: &mut StdRng) {
        let Some(first_room) = floor.rooms.first() else {
            return;
        };

        floor.spawn_point = first_room.interior_tiles().choose(rng).copied();
        if let Some(spawn) = floor.spawn_point {
            debug!("Floor {}: spawn point at {}", floor.floor_number, spawn);
        }
    }
}

impl Generator<FloorGrid> for RoomCorridorGenerator {
    fn generate(
        &self,
        floor: &mut FloorGrid,
        config: &GenerationConfig,
        rng: &mut StdRng,
    ) -> BurrowResult<()> {
        if floor.is_generated() {
            return Err(BurrowError::InvalidState(format!(
                "floor {} has already been generated",
                floor.floor_number
            )));
        }
        config.validate()?;

        self.place_rooms(floor, config, rng);
        self.connect_rooms(floor, config, rng);
        self.place_stairs(floor, rng);
        self.place_spawn(floor, rng);
        floor.mark_generated();
        Ok(())
    }

    fn validate(&self, floor: &FloorGrid) -> BurrowResult<()> {
        for (i, room) in floor.rooms.iter().enumerate() {
            if let Some(other) = floor.rooms[i + 1..].iter().find(|other| room.intersects(other)) {
                return Err(BurrowError::GenerationFailed(format!(
                    "rooms {} and {} intersect",
                    room.id, other.id
                )));
            }
        }

        let stairs_tiles = floor.count_tiles(TileKind::StairsDown);
        let expected = usize::from(floor.stairs_down_position.is_some());
        if stairs_tiles != expected {
            return Err(BurrowError::GenerationFailed(format!(
                "found {} stairs down tiles, expected {}",
                stairs_tiles, expected
            )));
        }

        if let Some(stairs) = floor.stairs_down_position {
            let in_later_room = floor
                .rooms
                .iter()
                .skip(1)
                .any(|room| room.contains_interior(stairs));
            if !in_later_room || floor.get_tile(stairs) != Some(TileKind::StairsDown) {
                return Err(BurrowError::GenerationFailed(format!(
                    "stairs at {} are not inside a room after the first",
                    stairs
                )));
            }
        }

        if let Some(spawn) = floor.spawn_point {
            let in_first_room = floor
                .rooms
                .first()
                .is_some_and(|room| room.contains_interior(spawn));
            if !in_first_room || !floor.is_walkable(spawn) {
                return Err(BurrowError::GenerationFailed(format!(
                    "spawn point {} is not a walkable tile of the first room",
                    spawn
                )));
            }
        }

        Ok(())
    }

    fn generator_type(&self) -> &'static str {
        "RoomCorridorGenerator"
    }
}
