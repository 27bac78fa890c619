//! # Floor Grid
//!
//! A single dungeon floor: a flat tile buffer, the rooms carved into it, and
//! the spatial queries the rest of the engine runs against it.

use crate::game::{Position, TileKind};
use crate::generation::{GenerationConfig, Generator, Room, RoomCorridorGenerator};
use crate::utils::BresenhamLine;
use crate::{BurrowError, BurrowResult};
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One floor of the dungeon.
///
/// A floor starts out as solid wall. [`FloorGrid::generate`] carves rooms,
/// corridors and stairs into it exactly once; afterwards the floor is only
/// queried, apart from individual tile edits through [`FloorGrid::set_tile`].
#[derive(Debug, Clone, PartialEq)]
pub struct FloorGrid {
    /// Width of the floor in tiles
    pub width: u32,
    /// Height of the floor in tiles
    pub height: u32,
    /// Floor number, starting at 1
    pub floor_number: u32,
    /// Rooms in generation order; the first one holds the spawn point
    pub rooms: Vec<Room>,
    /// Location of the stairs down, if any were placed
    pub stairs_down_position: Option<Position>,
    /// Where agents entering this floor start, if a spawn was placed
    pub spawn_point: Option<Position>,
    tiles: Vec<TileKind>,
    generated: bool,
}

impl FloorGrid {
    /// Creates a floor filled entirely with walls.
    ///
    /// # Examples
    ///
    /// ```
    /// use burrow::{FloorGrid, Position, TileKind};
    ///
    /// let floor = FloorGrid::new(40, 20, 1);
    /// assert_eq!(floor.get_tile(Position::new(10, 10)), Some(TileKind::Wall));
    /// assert!(floor.rooms.is_empty());
    /// ```
    pub fn new(width: u32, height: u32, floor_number: u32) -> Self {
        Self {
            width,
            height,
            floor_number,
            rooms: Vec::new(),
            stairs_down_position: None,
            spawn_point: None,
            tiles: vec![TileKind::Wall; width as usize * height as usize],
            generated: false,
        }
    }

    /// Creates a floor and immediately generates its layout.
    pub fn generated(
        width: u32,
        height: u32,
        floor_number: u32,
        config: &GenerationConfig,
        rng: &mut StdRng,
    ) -> BurrowResult<Self> {
        let mut floor = Self::new(width, height, floor_number);
        floor.generate(config, rng)?;
        Ok(floor)
    }

    /// Builds a finished floor from rows of tile symbols.
    ///
    /// The first `>` found (row by row) is recorded as the stairs down. The
    /// floor has no rooms and no spawn point, and cannot be generated again.
    ///
    /// # Examples
    ///
    /// ```
    /// use burrow::{FloorGrid, Position};
    ///
    /// let floor = FloorGrid::from_ascii(1, &["#####", "#..>#", "#####"]).unwrap();
    /// assert_eq!(floor.width, 5);
    /// assert_eq!(floor.stairs_down_position, Some(Position::new(3, 1)));
    /// ```
    pub fn from_ascii<S: AsRef<str>>(floor_number: u32, rows: &[S]) -> BurrowResult<Self> {
        let width = rows.first().map_or(0, |row| row.as_ref().chars().count());
        let mut floor = Self::new(width as u32, rows.len() as u32, floor_number);

        for (y, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.chars().count() != width {
                return Err(BurrowError::InvalidConfig(format!(
                    "row {} has {} tiles, expected {}",
                    y,
                    row.chars().count(),
                    width
                )));
            }
            for (x, symbol) in row.chars().enumerate() {
                let kind = TileKind::from_symbol(symbol).ok_or_else(|| {
                    BurrowError::InvalidConfig(format!(
                        "unknown tile symbol {:?} at ({}, {})",
                        symbol, x, y
                    ))
                })?;
                let pos = Position::new(x as i32, y as i32);
                floor.set_tile(pos, kind);
                if kind == TileKind::StairsDown && floor.stairs_down_position.is_none() {
                    floor.stairs_down_position = Some(pos);
                }
            }
        }

        floor.generated = true;
        Ok(floor)
    }

    /// Runs the room-and-corridor generator on this floor.
    ///
    /// Generation carves into the existing tiles, so it may only run once per
    /// floor. A second call is rejected with [`BurrowError::InvalidState`] and
    /// leaves the floor untouched.
    pub fn generate(&mut self, config: &GenerationConfig, rng: &mut StdRng) -> BurrowResult<()> {
        RoomCorridorGenerator::new().generate(self, config, rng)
    }

    /// Freezes the layout once a generator has finished with it.
    pub(crate) fn mark_generated(&mut self) {
        self.generated = true;
    }

    /// Whether the layout of this floor is final.
    pub fn is_generated(&self) -> bool {
        self.generated
    }

    fn index(&self, pos: Position) -> Option<usize> {
        if self.is_valid_position(pos) {
            Some(pos.y as usize * self.width as usize + pos.x as usize)
        } else {
            None
        }
    }

    /// Checks if a position lies within the floor bounds.
    pub fn is_valid_position(&self, pos: Position) -> bool {
        pos.x >= 0 && pos.y >= 0 && (pos.x as u32) < self.width && (pos.y as u32) < self.height
    }

    /// Checks if an agent could stand at a position. Out of bounds is never walkable.
    pub fn is_walkable(&self, pos: Position) -> bool {
        self.get_tile(pos).is_some_and(TileKind::is_walkable)
    }

    /// Gets the tile at a position, or `None` outside the floor.
    pub fn get_tile(&self, pos: Position) -> Option<TileKind> {
        self.index(pos).map(|index| self.tiles[index])
    }

    /// Replaces the tile at a position. Returns `false` when out of bounds.
    pub fn set_tile(&mut self, pos: Position, kind: TileKind) -> bool {
        match self.index(pos) {
            Some(index) => {
                self.tiles[index] = kind;
                true
            }
            None => false,
        }
    }

    /// Checks whether `to` can be seen from `from`.
    ///
    /// Targets further than `max_range` in Manhattan distance are never
    /// visible. Otherwise every point the Bresenham line visits before the
    /// target must be in bounds and transparent. The target tile itself is not
    /// tested, so a wall at the end of a clear line is visible.
    ///
    /// # Examples
    ///
    /// ```
    /// use burrow::{FloorGrid, Position};
    ///
    /// let floor = FloorGrid::from_ascii(1, &["#####", "#...#", "#####"]).unwrap();
    /// assert!(floor.has_line_of_sight(Position::new(1, 1), Position::new(3, 1), 8));
    /// assert!(floor.has_line_of_sight(Position::new(1, 1), Position::new(4, 1), 8));
    /// assert!(!floor.has_line_of_sight(Position::new(1, 1), Position::new(3, 1), 1));
    /// ```
    pub fn has_line_of_sight(&self, from: Position, to: Position, max_range: u32) -> bool {
        if from.manhattan_distance(to) > max_range {
            return false;
        }

        BresenhamLine::new(from, to)
            .all(|pos| self.get_tile(pos).is_some_and(TileKind::is_transparent))
    }

    /// Collects every in-bounds position visible from `origin` within `max_range`.
    ///
    /// The origin itself is always included when it lies on the floor.
    pub fn visible_from(&self, origin: Position, max_range: u32) -> Vec<Position> {
        let range = max_range.min(i32::MAX as u32) as i32;
        let mut visible = Vec::new();

        for y in origin.y.saturating_sub(range)..=origin.y.saturating_add(range) {
            for x in origin.x.saturating_sub(range)..=origin.x.saturating_add(range) {
                let pos = Position::new(x, y);
                if self.is_valid_position(pos) && self.has_line_of_sight(origin, pos, max_range) {
                    visible.push(pos);
                }
            }
        }

        visible
    }

    /// Iterates over every position on the floor with its tile, row by row.
    pub fn tiles(&self) -> impl Iterator<Item = (Position, TileKind)> + '_ {
        let width = self.width.max(1) as usize;
        self.tiles.iter().enumerate().map(move |(index, &kind)| {
            (
                Position::new((index % width) as i32, (index / width) as i32),
                kind,
            )
        })
    }

    /// Counts the tiles of one kind.
    pub fn count_tiles(&self, kind: TileKind) -> usize {
        self.tiles.iter().filter(|&&tile| tile == kind).count()
    }

    /// Summarizes this floor.
    pub fn info(&self) -> MapInfo {
        MapInfo {
            floor_number: self.floor_number,
            width: self.width,
            height: self.height,
            room_count: self.rooms.len(),
            stairs_down: self.stairs_down_position,
            spawn_point: self.spawn_point,
        }
    }
}

/// Human-readable summary of a floor.
///
/// The `Display` form lists the floor number, dimensions and room count,
/// followed by the stairs and spawn coordinates when present, one per line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapInfo {
    pub floor_number: u32,
    pub width: u32,
    pub height: u32,
    pub room_count: usize,
    pub stairs_down: Option<Position>,
    pub spawn_point: Option<Position>,
}

impl fmt::Display for MapInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Floor {}", self.floor_number)?;
        writeln!(f, "Map size: {}x{}", self.width, self.height)?;
        writeln!(f, "Rooms: {}", self.room_count)?;
        if let Some(stairs) = self.stairs_down {
            writeln!(f, "Stairs at: {}", stairs)?;
        }
        if let Some(spawn) = self.spawn_point {
            writeln!(f, "Spawn point: {}", spawn)?;
        }
        Ok(())
    }
}
