//! # Burrow
//!
//! Procedural dungeon floors for grid-based roguelikes.
//!
//! ## Architecture Overview
//!
//! The crate is split into a few small systems that data flows through in one
//! direction:
//!
//! - **Tiles**: the static catalog of tile kinds and their properties
//! - **Generation**: room placement, corridor carving, stairs and spawn points
//! - **Floors**: a single floor's tile grid with bounds, walkability and
//!   line-of-sight queries
//! - **Dungeon**: lazily generated floors and up/down navigation
//! - **Occupancy**: which agents stand on which tile
//! - **Rendering**: plain text rows with agents drawn over terrain
//!
//! Agents themselves are owned by the caller. The crate only stores
//! [`AgentId`] handles and reads positions and symbols through the
//! [`AgentRoster`] trait.

pub mod game;
pub mod generation;
pub mod rendering;
pub mod utils;

pub use game::*;
pub use generation::*;
pub use rendering::*;
pub use utils::*;

pub use game::{
    // From agents
    Agent,
    AgentId,
    AgentRoster,
    // Coordinates
    Direction,
    Dungeon,
    // From floor
    FloorGrid,
    MapInfo,
    OccupancyIndex,
    Position,
    // From tiles
    TileKind,
};

pub use generation::{GenerationConfig, Generator, Room, RoomCorridorGenerator};

pub use rendering::{Viewport, ViewportRenderer};

/// Core error type for the Burrow engine.
#[derive(thiserror::Error, Debug)]
pub enum BurrowError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// Configuration values are inconsistent or unusable
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// An operation was called in the wrong lifecycle state
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// Generated content broke a layout invariant
    #[error("Generation failed: {0}")]
    GenerationFailed(String),
}

/// Result type used throughout the Burrow codebase.
pub type BurrowResult<T> = Result<T, BurrowError>;

/// Version information for the crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Engine configuration constants.
pub mod config {
    /// Default floor width in tiles
    pub const DEFAULT_FLOOR_WIDTH: u32 = 80;

    /// Default floor height in tiles
    pub const DEFAULT_FLOOR_HEIGHT: u32 = 24;

    /// Default maximum Manhattan range for line-of-sight checks
    pub const DEFAULT_SIGHT_RANGE: u32 = 8;

    /// Default number of floors in a dungeon
    pub const DEFAULT_MAX_FLOORS: u32 = 2;
}
