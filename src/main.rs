//! Terminal game: roll the ball to the goal

use std::{
    io::{self, BufRead},
    thread,
    time::Duration,
};

use anyhow::Context;
use ball_maze::game::{Command, Game, Outcome};
use ball_maze::maze_generator::MazeGenerator;
use ball_maze::random::RngSource;
use clap::Parser;
use log::warn;

/// Steer a ball through a random maze with w, a, s, d
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

    /// Frame length in milliseconds while the ball rolls
    #[arg(short, long, default_value_t = 80)]
    frame_length: u64,
}

fn show(game: &Game) {
    print!("\x1B[2J\x1B[1;1H");
    println!("{}", game.draw());
}

/// Read pushes from stdin, one line at a time
fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let walls = MazeGenerator::new(RngSource::seeded(args.seed))
        .generate(args.rows, args.columns)
        .context("Could not generate maze")?;
    let mut game = Game::new(walls);
    show(&game);

    for line in io::stdin().lock().lines() {
        let line = line.context("Could not read input")?;

        for key in line.chars().filter(|c| !c.is_whitespace()) {
            match Command::parse(key) {
                Ok(Command::Push(direction)) => game.impulse(direction),
                Ok(Command::Quit) => return Ok(()),
                Err(e) => warn!("{}", e),
            }
        }

        let outcome = loop {
            match game.step() {
                Outcome::Moved(_) => {
                    show(&game);
                    thread::sleep(Duration::from_millis(args.frame_length));
                }
                Outcome::Blocked(_) => (),
                outcome => break outcome,
            }
        };
        show(&game);

        if outcome == Outcome::Won {
            println!("You win!");
            return Ok(());
        }
    }
    Ok(())
}
