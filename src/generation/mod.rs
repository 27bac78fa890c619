//! # Generation Module
//!
//! Procedural floor generation: configuration, rooms and the room-and-corridor
//! generator.
//!
//! Generation never reaches for a global random source. Every generator takes
//! an explicit [`StdRng`], so seeding the generator reproduces a floor exactly.

pub mod dungeon;

pub use dungeon::*;

use crate::game::Position;
use crate::{BurrowError, BurrowResult};
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Configuration for procedural generation.
///
/// Controls the room-count and room-size ranges used by room placement and
/// the orientation bias of corridor carving.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationConfig {
    /// Random seed for reproducible generation
    pub seed: u64,
    /// Minimum number of room placement attempts per floor
    pub min_rooms: u32,
    /// Maximum number of room placement attempts per floor
    pub max_rooms: u32,
    /// Minimum room side length, walls included
    pub min_room_size: u32,
    /// Maximum room side length, walls included
    pub max_room_size: u32,
    /// Probability that a corridor runs horizontally before turning (0.0 to 1.0)
    pub horizontal_first_chance: f64,
}

impl GenerationConfig {
    /// Creates the standard generation configuration.
    ///
    /// # Examples
    ///
    /// ```
    /// use burrow::GenerationConfig;
    ///
    /// let config = GenerationConfig::new(7);
    /// assert_eq!(config.min_rooms, 6);
    /// assert_eq!(config.max_rooms, 12);
    /// assert!(config.validate().is_ok());
    /// ```
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            min_rooms: 6,
            max_rooms: 12,
            min_room_size: 5,
            max_room_size: 15,
            horizontal_first_chance: 0.5,
        }
    }

    /// Creates a configuration for testing with smaller, simpler floors.
    pub fn for_testing(seed: u64) -> Self {
        Self {
            seed,
            min_rooms: 3,
            max_rooms: 6,
            min_room_size: 4,
            max_room_size: 8,
            horizontal_first_chance: 0.5,
        }
    }

    /// Checks that the ranges and probabilities are usable.
    pub fn validate(&self) -> BurrowResult<()> {
        if self.min_rooms > self.max_rooms {
            return Err(BurrowError::InvalidConfig(format!(
                "min_rooms ({}) exceeds max_rooms ({})",
                self.min_rooms, self.max_rooms
            )));
        }
        if self.min_room_size == 0 {
            return Err(BurrowError::InvalidConfig(
                "min_room_size must be at least 1".to_string(),
            ));
        }
        if self.min_room_size > self.max_room_size {
            return Err(BurrowError::InvalidConfig(format!(
                "min_room_size ({}) exceeds max_room_size ({})",
                self.min_room_size, self.max_room_size
            )));
        }
        if !(0.0..=1.0).contains(&self.horizontal_first_chance) {
            return Err(BurrowError::InvalidConfig(format!(
                "horizontal_first_chance ({}) must lie in [0, 1]",
                self.horizontal_first_chance
            )));
        }
        Ok(())
    }

    /// Parses and validates a configuration from JSON.
    pub fn from_json_str(json: &str) -> BurrowResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a JSON configuration file.
    pub fn from_json_file(path: impl AsRef<Path>) -> BurrowResult<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self::new(42)
    }
}

/// Represents a rectangular room on a floor.
///
/// The rectangle includes the room's walls. Only the interior, the tiles
/// strictly inside the border, is carved to floor. Width and height must be
/// at least 1; a room of width or height 2 or less has no interior.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    /// Index of this room in generation order
    pub id: u32,
    /// Top-left corner of the room
    pub top_left: Position,
    /// Width of the room (including walls)
    pub width: u32,
    /// Height of the room (including walls)
    pub height: u32,
    /// Rooms this one has a corridor to
    pub connections: Vec<u32>,
}

impl Room {
    /// Creates a new room with the given parameters.
    ///
    /// # Examples
    ///
    /// ```
    /// use burrow::{Room, Position};
    ///
    /// let room = Room::new(1, Position::new(5, 5), 10, 8);
    /// assert_eq!(room.id, 1);
    /// assert_eq!(room.width, 10);
    /// assert_eq!(room.height, 8);
    /// ```
    pub fn new(id: u32, top_left: Position, width: u32, height: u32) -> Self {
        debug_assert!(width >= 1 && height >= 1, "room dimensions must be positive");
        Self {
            id,
            top_left,
            width,
            height,
            connections: Vec::new(),
        }
    }

    fn right(&self) -> i32 {
        self.top_left.x + self.width as i32
    }

    fn bottom(&self) -> i32 {
        self.top_left.y + self.height as i32
    }

    /// Gets the center position of the room, rounding towards the top-left.
    pub fn center(&self) -> Position {
        Position::new(
            self.top_left.x + self.width as i32 / 2,
            self.top_left.y + self.height as i32 / 2,
        )
    }

    /// Checks if a position is inside this room, walls included.
    ///
    /// # Examples
    ///
    /// ```
    /// use burrow::{Room, Position};
    ///
    /// let room = Room::new(1, Position::new(5, 5), 10, 8);
    /// assert!(room.contains(Position::new(7, 7)));
    /// assert!(!room.contains(Position::new(20, 20)));
    /// ```
    pub fn contains(&self, pos: Position) -> bool {
        pos.x >= self.top_left.x
            && pos.y >= self.top_left.y
            && pos.x < self.right()
            && pos.y < self.bottom()
    }

    /// Checks if a position is strictly inside the walls of this room.
    pub fn contains_interior(&self, pos: Position) -> bool {
        pos.x > self.top_left.x
            && pos.y > self.top_left.y
            && pos.x < self.right() - 1
            && pos.y < self.bottom() - 1
    }

    /// Checks if this room overlaps another.
    ///
    /// Rooms that merely share an edge line do not intersect.
    pub fn intersects(&self, other: &Room) -> bool {
        self.top_left.x < other.right()
            && self.right() > other.top_left.x
            && self.top_left.y < other.bottom()
            && self.bottom() > other.top_left.y
    }

    /// Gets all interior positions, row by row.
    pub fn interior_tiles(&self) -> Vec<Position> {
        let mut positions = Vec::new();

        for y in (self.top_left.y + 1)..(self.bottom() - 1) {
            for x in (self.top_left.x + 1)..(self.right() - 1) {
                positions.push(Position::new(x, y));
            }
        }

        positions
    }

    /// Adds a connection to another room.
    pub fn add_connection(&mut self, room_id: u32) {
        if !self.connections.contains(&room_id) {
            self.connections.push(room_id);
        }
    }
}

/// Trait for procedural generators.
///
/// A generator fills in a freshly constructed target and can afterwards check
/// that the result honors the layout invariants it promises.
pub trait Generator<T> {
    /// Generates content into `target` using the configuration and random number generator.
    ///
    /// Fails without touching `target` when the configuration is invalid or the
    /// target has already been generated.
    fn generate(&self, target: &mut T, config: &GenerationConfig, rng: &mut StdRng)
        -> BurrowResult<()>;

    /// Validates that the generated content meets requirements.
    fn validate(&self, content: &T) -> BurrowResult<()>;

    /// Gets the generator type name for logging and debugging.
    fn generator_type(&self) -> &'static str;
}

/// Utility functions for generation algorithms.
pub mod utils {
    use super::*;
    use rand::SeedableRng;

    /// Creates a seeded random number generator from the config.
    pub fn create_rng(config: &GenerationConfig) -> StdRng {
        StdRng::seed_from_u64(config.seed)
    }
}
