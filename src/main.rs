use std::fs::File;
use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use glam::Vec2;
use log::info;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;

use cycle_dungeon::{Dungeon, Grid, Level, LevelConfig, Path};

/// Generate a cyclic dungeon and dump it as JSON.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Level configuration JSON; flags below override its dungeon values
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// RNG seed; a random one is drawn and logged when omitted
    #[arg(short, long)]
    seed: Option<u64>,

    /// Cross points along x
    #[arg(long)]
    width: Option<i32>,

    /// Cross points along y
    #[arg(long)]
    height: Option<i32>,

    /// Room block side length in tiles
    #[arg(long)]
    room_size: Option<i32>,

    #[arg(long)]
    min_walk: Option<u32>,

    #[arg(long)]
    max_walk: Option<u32>,

    #[arg(long)]
    minor_room_chance: Option<f64>,

    /// Also route from the first room to the last one
    #[arg(long)]
    route: bool,

    /// Also place obstacles and units
    #[arg(long)]
    spawn: bool,

    /// JSON output path; use "-" for stdout. Without it an ASCII map is printed
    #[arg(short, long)]
    output: Option<PathBuf>,
}

impl Args {
    fn level_config(&self) -> Result<LevelConfig> {
        let mut config = match &self.config {
            Some(path) => LevelConfig::from_json_file(path)
                .with_context(|| format!("failed to load config {}", path.display()))?,
            None => LevelConfig::default(),
        };
        let dungeon = &mut config.dungeon;
        if let Some(width) = self.width {
            dungeon.width = width;
        }
        if let Some(height) = self.height {
            dungeon.height = height;
        }
        if let Some(room_size) = self.room_size {
            dungeon.room_size = room_size;
        }
        if let Some(min_walk) = self.min_walk {
            dungeon.min_walk_len = min_walk;
        }
        if let Some(max_walk) = self.max_walk {
            dungeon.max_walk_len = max_walk;
        }
        if let Some(chance) = self.minor_room_chance {
            dungeon.minor_room_chance = chance;
        }
        config.validate().context("invalid configuration")?;
        Ok(config)
    }
}

#[derive(Serialize)]
struct SpawnSummary {
    walls: usize,
    obstacles: usize,
    units: usize,
    targets: usize,
}

#[derive(Serialize)]
struct Report<'a> {
    seed: u64,
    dungeon: &'a Dungeon,
    #[serde(skip_serializing_if = "Option::is_none")]
    route: Option<Vec<Vec2>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    spawn: Option<SpawnSummary>,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    let config = args.level_config()?;

    let seed = args.seed.unwrap_or_else(|| rand::thread_rng().gen());
    info!("using seed {seed}");
    let mut rng = StdRng::seed_from_u64(seed);

    let (dungeon, spawn) = if args.spawn {
        let level = Level::generate(&config, &mut rng)?;
        let summary = SpawnSummary {
            walls: level.walls.len(),
            obstacles: level.obstacles.len(),
            units: level.units.units.len(),
            targets: level.target_count(),
        };
        (level.dungeon, Some(summary))
    } else {
        (cycle_dungeon::generate(&config.dungeon, &mut rng)?, None)
    };

    let route = if args.route {
        Some(first_to_last_route(&dungeon)?)
    } else {
        None
    };

    let report = Report {
        seed,
        dungeon: &dungeon,
        route,
        spawn,
    };

    match &args.output {
        Some(path) if path.as_os_str() == "-" => {
            let stdout = io::stdout();
            serde_json::to_writer_pretty(stdout.lock(), &report)?;
            println!();
        }
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            serde_json::to_writer_pretty(file, &report)?;
            info!("wrote {}", path.display());
        }
        None => {
            let stdout = io::stdout();
            let mut out = stdout.lock();
            write_ascii(&mut out, &dungeon.grid)?;
            writeln!(
                out,
                "seed {seed}: {} rooms, {} waypoints",
                dungeon.rooms.len(),
                dungeon.graph.len()
            )?;
            if let Some(route) = &report.route {
                writeln!(out, "route of {} steps from the first room to the last", route.len())?;
            }
            if let Some(spawn) = &report.spawn {
                writeln!(
                    out,
                    "{} walls, {} obstacles, {} units, {} targets",
                    spawn.walls, spawn.obstacles, spawn.units, spawn.targets
                )?;
            }
        }
    }

    Ok(())
}

fn first_to_last_route(dungeon: &Dungeon) -> Result<Vec<Vec2>> {
    let (Some(&first), Some(&last)) = (dungeon.rooms.first(), dungeon.rooms.last()) else {
        return Ok(Vec::new());
    };
    let waypoints = dungeon.graph.waypoints();
    let path: Path = dungeon
        .find_path(waypoints.point(first), waypoints.point(last))
        .context("route between the first and last room")?;
    Ok(path.iter().map(|step| step.point).collect())
}

fn write_ascii(out: &mut impl Write, grid: &Grid) -> io::Result<()> {
    for y in (0..grid.height as i32).rev() {
        let row: String = (0..grid.width as i32)
            .map(|x| grid.get(x, y).map_or(' ', |tile| tile.tile_type.glyph()))
            .collect();
        writeln!(out, "{row}")?;
    }
    Ok(())
}
