//! # Dungeon State
//!
//! The multi-floor dungeon: lazily generated floors and the current-floor
//! counter that stair navigation moves up and down.

use crate::config::DEFAULT_MAX_FLOORS;
use crate::game::FloorGrid;
use crate::generation::{utils, GenerationConfig, Generator, RoomCorridorGenerator};
use crate::{BurrowError, BurrowResult};
use log::{debug, info, warn};
use rand::rngs::StdRng;
use std::collections::HashMap;

/// A stack of floors sharing one size and one random generator.
///
/// Floors are generated the first time they become current and cached from
/// then on, so revisiting a floor returns exactly the layout seen before.
/// The current floor always lies in `1..=max_floors`.
#[derive(Debug, Clone)]
pub struct Dungeon {
    /// Width of every floor in tiles
    pub floor_width: u32,
    /// Height of every floor in tiles
    pub floor_height: u32,
    floors: HashMap<u32, FloorGrid>,
    current_floor: u32,
    max_floors: u32,
    config: GenerationConfig,
    rng: StdRng,
}

impl Dungeon {
    /// Creates a dungeon of `DEFAULT_MAX_FLOORS` floors, starting on floor 1.
    ///
    /// The random generator is seeded from `config.seed`. No floor is
    /// generated until it is first requested.
    ///
    /// # Examples
    ///
    /// ```
    /// use burrow::{Dungeon, GenerationConfig};
    ///
    /// let mut dungeon = Dungeon::new(80, 24, GenerationConfig::new(3)).unwrap();
    /// assert_eq!(dungeon.current_floor_number(), 1);
    /// assert_eq!(dungeon.get_current_floor().floor_number, 1);
    /// assert!(dungeon.go_down());
    /// assert!(!dungeon.go_down());
    /// ```
    pub fn new(floor_width: u32, floor_height: u32, config: GenerationConfig) -> BurrowResult<Self> {
        config.validate()?;
        if floor_width == 0 || floor_height == 0 {
            return Err(BurrowError::InvalidConfig(format!(
                "floor dimensions must be positive, got {}x{}",
                floor_width, floor_height
            )));
        }

        let rng = utils::create_rng(&config);
        Ok(Self {
            floor_width,
            floor_height,
            floors: HashMap::new(),
            current_floor: 1,
            max_floors: DEFAULT_MAX_FLOORS,
            config,
            rng,
        })
    }

    /// Sets how many floors the dungeon has. At least one floor always exists.
    pub fn with_max_floors(mut self, max_floors: u32) -> Self {
        self.max_floors = max_floors.max(1);
        self.current_floor = self.current_floor.min(self.max_floors);
        self
    }

    /// Number of the floor agents are currently on.
    pub fn current_floor_number(&self) -> u32 {
        self.current_floor
    }

    /// Deepest floor number.
    pub fn max_floors(&self) -> u32 {
        self.max_floors
    }

    /// Gets the current floor, generating it on first access.
    pub fn get_current_floor(&mut self) -> &FloorGrid {
        self.current_floor_mut()
    }

    /// Gets the current floor for editing, generating it on first access.
    pub fn current_floor_mut(&mut self) -> &mut FloorGrid {
        let Self {
            floors,
            current_floor,
            floor_width,
            floor_height,
            config,
            rng,
            ..
        } = self;

        floors.entry(*current_floor).or_insert_with(|| {
            info!(
                "Generating floor {} ({}x{})",
                current_floor, floor_width, floor_height
            );
            let mut floor = FloorGrid::new(*floor_width, *floor_height, *current_floor);

            let generator = RoomCorridorGenerator::new();
            let outcome = generator
                .generate(&mut floor, config, rng)
                .and_then(|()| generator.validate(&floor));
            if let Err(e) = outcome {
                warn!("{} produced an invalid floor: {}", generator.generator_type(), e);
            }
            floor
        })
    }

    /// Looks up a floor that has already been generated.
    pub fn floor(&self, floor_number: u32) -> Option<&FloorGrid> {
        self.floors.get(&floor_number)
    }

    /// Number of floors generated so far.
    pub fn generated_floor_count(&self) -> usize {
        self.floors.len()
    }

    /// Descends one floor. Returns `false` on the deepest floor.
    pub fn go_down(&mut self) -> bool {
        if self.current_floor >= self.max_floors {
            debug!("Already on the deepest floor ({})", self.current_floor);
            return false;
        }

        self.current_floor += 1;
        debug!("Descended to floor {}", self.current_floor);
        true
    }

    /// Ascends one floor. Returns `false` on floor 1.
    pub fn go_up(&mut self) -> bool {
        if self.current_floor <= 1 {
            debug!("Already on the top floor");
            return false;
        }

        self.current_floor -= 1;
        debug!("Ascended to floor {}", self.current_floor);
        true
    }

    /// Forgets every floor and returns to floor 1.
    ///
    /// The random generator keeps its state, so the next visit to floor 1
    /// produces a new layout.
    pub fn reset(&mut self) {
        info!("Resetting dungeon ({} floors discarded)", self.floors.len());
        self.floors.clear();
        self.current_floor = 1;
    }
}
