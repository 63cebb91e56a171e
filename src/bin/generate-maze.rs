//! CLI for maze generation

use anyhow::Context;
use ball_maze::maze_generator::MazeGenerator;
use ball_maze::random::RngSource;
use ball_maze::renderer::WallRenderer;
use ball_maze::MazeConfig;
use clap::Parser;
use itertools::Itertools;
use log::debug;

/// Random perfect maze generator
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Number of cell rows
    #[arg(long, default_value_t = 12)]
    rows: usize,

    /// Number of cell columns
    #[arg(long, default_value_t = 15)]
    columns: usize,

    /// Random seed
    #[arg(long)]
    seed: Option<u64>,

    /// Print wall segments instead of a text drawing
    #[arg(long)]
    segments: bool,

    /// Drawing area width, for segments
    #[arg(long, default_value_t = 900.0)]
    width: f32,

    /// Drawing area height, for segments
    #[arg(long, default_value_t = 720.0)]
    height: f32,

    /// Inner wall thickness, for segments
    #[arg(long, default_value_t = 5.0)]
    wall_thickness: f32,

    /// Border thickness, for segments
    #[arg(long, default_value_t = 2.0)]
    border_thickness: f32,
}

/// Generate a maze, print output
fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let config = MazeConfig {
        rows: args.rows,
        columns: args.columns,
        width: args.width,
        height: args.height,
        wall_thickness: args.wall_thickness,
        border_thickness: args.border_thickness,
    };
    config.validate().context("Invalid maze configuration")?;
    debug!("Cell size {:?}", config.cell_size());

    let mut gen = MazeGenerator::new(RngSource::seeded(args.seed));
    let walls = gen.generate(config.rows, config.columns)?;

    if args.segments {
        let renderer = WallRenderer::new(&config)?;
        println!(
            "{}",
            renderer
                .segments(&walls)
                .iter()
                .map(|s| format!("{:?} {} {} {} {}", s.kind, s.x, s.y, s.width, s.height))
                .join("\n")
        );
    } else {
        println!("{}", walls);
    }
    Ok(())
}
