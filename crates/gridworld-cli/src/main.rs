use anyhow::Result;
use clap::Parser;
use gridworld_core::grid::{Coord, Grid};
use gridworld_core::world::{GridWorld, SweepParams};

/// Bellman value iteration on the fixed 3x4 demonstration gridworld, printing
/// the utility grid after every sweep.
#[derive(Parser, Debug)]
#[command(name = "gridworld", version)]
struct Args {
    /// Number of Bellman sweeps to perform.
    #[arg(long, default_value_t = 4)]
    iterations: usize,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let grid = Grid::from_rows(vec![
        vec![0.0, 0.0, 1.0, -1.0],
        vec![0.0, 0.0, 0.0, 0.0],
        vec![0.0, 0.0, 0.0, 0.0],
    ])?;
    let mut world = GridWorld::try_new(
        grid,
        [Coord::new(0, 2), Coord::new(0, 3)],
        [Coord::new(1, 1)],
        SweepParams::default(),
    )?;

    println!("{}", world.grid());
    for i in 1..=args.iterations {
        world.step();
        println!("Iteration {i}");
        println!("{}", world.grid());
    }
    Ok(())
}
