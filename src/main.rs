//! # Burrow Demo Entry Point
//!
//! Generates a dungeon, drops a hero and a wandering monster onto each floor,
//! prints the view around the hero and walks down the stairs.

use burrow::config::{
    DEFAULT_FLOOR_HEIGHT, DEFAULT_FLOOR_WIDTH, DEFAULT_MAX_FLOORS, DEFAULT_SIGHT_RANGE,
};
use burrow::{
    Agent, AgentId, BurrowResult, Direction, Dungeon, FloorGrid, GenerationConfig,
    OccupancyIndex, Position, Viewport, ViewportRenderer,
};
use clap::Parser;
use log::{debug, info, warn, LevelFilter};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use std::path::PathBuf;

/// How many steps the monster wanders before each floor is drawn.
const WANDER_STEPS: usize = 5;

const HERO: AgentId = AgentId(0);
const MONSTER: AgentId = AgentId(1);

/// Command line arguments for the Burrow demo.
#[derive(Parser, Debug)]
#[command(name = "burrow")]
#[command(about = "Procedural multi-floor dungeon generator")]
#[command(version)]
struct Args {
    /// Random seed for dungeon generation
    #[arg(short, long)]
    seed: Option<u64>,

    /// Floor width in tiles
    #[arg(long, default_value_t = DEFAULT_FLOOR_WIDTH)]
    width: u32,

    /// Floor height in tiles
    #[arg(long, default_value_t = DEFAULT_FLOOR_HEIGHT)]
    height: u32,

    /// Number of floors in the dungeon
    #[arg(short, long, default_value_t = DEFAULT_MAX_FLOORS)]
    floors: u32,

    /// JSON file with generation settings (overrides --seed)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Width of the printed view
    #[arg(long)]
    view_width: Option<u32>,

    /// Height of the printed view
    #[arg(long)]
    view_height: Option<u32>,

    /// Print floor information as JSON
    #[arg(long)]
    json: bool,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    log_level: String,
}

/// A creature in the demo's agent table.
struct Creature {
    symbol: char,
    position: Option<Position>,
}

impl Creature {
    fn new(symbol: char) -> Self {
        Self {
            symbol,
            position: None,
        }
    }
}

impl Agent for Creature {
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

fn main() -> BurrowResult<()> {
    let args = Args::parse();

    initialize_logging(&args.log_level);

    info!("Starting Burrow v{}", burrow::VERSION);

    let config = load_config(&args)?;
    info!("Using seed {}", config.seed);

    let mut dungeon =
        Dungeon::new(args.width, args.height, config.clone())?.with_max_floors(args.floors);
    let mut rng = StdRng::seed_from_u64(config.seed.wrapping_add(1));

    loop {
        let floor = dungeon.get_current_floor();
        explore_floor(floor, &args, &mut rng)?;

        if !dungeon.go_down() {
            break;
        }
        println!();
    }

    info!("Reached the bottom of the dungeon");
    Ok(())
}

/// Sets up env_logger at the requested level.
fn initialize_logging(log_level: &str) {
    let level = match log_level.to_lowercase().as_str() {
        "error" => LevelFilter::Error,
        "warn" => LevelFilter::Warn,
        "info" => LevelFilter::Info,
        "debug" => LevelFilter::Debug,
        "trace" => LevelFilter::Trace,
        _ => LevelFilter::Info,
    };

    env_logger::Builder::new()
        .filter_level(level)
        .format_target(false)
        .init();
}

fn load_config(args: &Args) -> BurrowResult<GenerationConfig> {
    let config = match &args.config {
        Some(path) => {
            if args.seed.is_some() {
                warn!("--seed is ignored when --config is given");
            }
            GenerationConfig::from_json_file(path)?
        }
        None => GenerationConfig::new(args.seed.unwrap_or_else(rand::random)),
    };
    Ok(config)
}

/// Populates one floor, lets the monster wander and prints the result.
fn explore_floor(floor: &FloorGrid, args: &Args, rng: &mut StdRng) -> BurrowResult<()> {
    let (agents, occupancy) = populate_floor(floor, rng);
    let viewport = viewport_for(args, floor.spawn_point);

    let renderer = ViewportRenderer::new(floor, &occupancy, &agents);
    for row in renderer.render(&viewport) {
        println!("{}", row);
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&floor.info())?);
    } else {
        print!("{}", renderer.map_info());
    }

    if let Some(spawn) = floor.spawn_point {
        let visible = floor.visible_from(spawn, DEFAULT_SIGHT_RANGE);
        info!(
            "Hero sees {} tiles from {} on floor {}",
            visible.len(),
            spawn,
            floor.floor_number
        );
    }
    Ok(())
}

/// Places the hero at the spawn point and a monster in a later room.
///
/// A floor without a spawn point has no rooms, so it is left empty.
fn populate_floor(floor: &FloorGrid, rng: &mut StdRng) -> (Vec<Creature>, OccupancyIndex) {
    let mut agents = vec![Creature::new('@'), Creature::new('g')];
    let mut occupancy = OccupancyIndex::new();

    let Some(spawn) = floor.spawn_point else {
        info!("Floor {} has no rooms, nobody to place", floor.floor_number);
        return (agents, occupancy);
    };
    occupancy.place(floor, &mut agents, HERO, spawn);

    let lair = floor
        .rooms
        .iter()
        .skip(1)
        .flat_map(|room| room.interior_tiles())
        .filter(|&pos| occupancy.can_move_to(floor, pos, None))
        .collect::<Vec<_>>()
        .choose(rng)
        .copied();

    match lair {
        Some(pos) => {
            occupancy.place(floor, &mut agents, MONSTER, pos);
            for _ in 0..WANDER_STEPS {
                wander(floor, &mut occupancy, &mut agents, MONSTER, rng);
            }
        }
        None => debug!("No room for a monster on floor {}", floor.floor_number),
    }

    (agents, occupancy)
}

/// Centers a sized view on the hero. Full views and empty floors stay anchored.
fn viewport_for(args: &Args, spawn: Option<Position>) -> Viewport {
    let sized = args.view_width.is_some() || args.view_height.is_some();
    Viewport {
        width: args.view_width,
        height: args.view_height,
        center: spawn.filter(|_| sized),
    }
}

/// Steps an agent onto a random free neighbouring tile, if there is one.
fn wander(
    floor: &FloorGrid,
    occupancy: &mut OccupancyIndex,
    agents: &mut [Creature],
    id: AgentId,
    rng: &mut StdRng,
) {
    let Some(from) = agents.get(id.0).and_then(|agent| agent.position) else {
        return;
    };

    let mut directions = Direction::all();
    directions.shuffle(rng);
    let step = directions
        .into_iter()
        .map(|direction| from + direction.to_delta())
        .find(|&to| occupancy.can_move_to(floor, to, Some(id)));

    match step {
        Some(to) if rng.gen_bool(0.8) => {
            occupancy.move_agent(floor, agents, id, to);
            debug!("Agent {} moved from {} to {}", id.0, from, to);
        }
        _ => debug!("Agent {} stays at {}", id.0, from),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use burrow::generation::utils::create_rng;

    fn args(extra: &[&str]) -> Args {
        Args::parse_from(std::iter::once("burrow").chain(extra.iter().copied()))
    }

    fn floor(width: u32, height: u32, seed: u64) -> FloorGrid {
        let config = GenerationConfig::new(seed);
        let mut rng = create_rng(&config);
        FloorGrid::generated(width, height, 1, &config, &mut rng).unwrap()
    }

    #[test]
    fn test_floor_without_rooms_is_still_explored() {
        let floor = floor(6, 6, 1);
        assert!(floor.spawn_point.is_none());

        let mut rng = StdRng::seed_from_u64(1);
        let (agents, occupancy) = populate_floor(&floor, &mut rng);
        assert!(occupancy.is_empty());
        assert!(agents.iter().all(|agent| agent.position.is_none()));

        let args = args(&["--view-width", "4", "--view-height", "4"]);
        let viewport = viewport_for(&args, floor.spawn_point);
        assert_eq!(viewport.center, None);

        let rows = ViewportRenderer::new(&floor, &occupancy, &agents).render(&viewport);
        assert_eq!(rows, vec!["####"; 4]);

        assert!(explore_floor(&floor, &args, &mut rng).is_ok());
    }

    #[test]
    fn test_hero_starts_at_spawn() {
        let floor = floor(80, 24, 7);
        let spawn = floor.spawn_point.unwrap();

        let mut rng = StdRng::seed_from_u64(7);
        let (agents, occupancy) = populate_floor(&floor, &mut rng);
        assert_eq!(occupancy.agents_at(spawn), &[HERO]);
        assert_eq!(agents[HERO.0].position, Some(spawn));
        if floor.rooms.len() > 1 {
            assert_eq!(occupancy.len(), 2);
        }
    }

    #[test]
    fn test_viewport_centers_only_when_sized() {
        let spawn = Some(Position::new(10, 5));

        let full = viewport_for(&args(&[]), spawn);
        assert_eq!(full, Viewport::full());

        let sized = viewport_for(&args(&["--view-width", "20"]), spawn);
        assert_eq!(sized.center, spawn);
        assert_eq!(sized.width, Some(20));
        assert_eq!(sized.height, None);
    }
}
