pub mod trace;

pub use trace::*;

use crate::direction::Direction;
use crate::grid::{Coord, Grid};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::{error::Error, fmt};

/// Scalar parameters of one Bellman sweep.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SweepParams {
    /// Probability mass that a movement attempt slips to one of the two
    /// perpendicular directions (split evenly between them). Must be in [0, 1].
    pub noise: f64,
    /// Discount factor on the future-value term. Must be in [0, 1].
    pub decay: f64,
    /// Additive reward for existing in a non-terminal state, typically
    /// negative.
    pub cost: f64,
}

/// Parameters of the demonstration scenario.
impl Default for SweepParams {
    fn default() -> Self {
        Self {
            noise: 0.2,
            decay: 0.9,
            cost: -0.05,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum WorldInitError {
    CoordinateOutOfRange {
        coord: Coord,
        rows: usize,
        cols: usize,
    },
    NoiseOutOfRange(f64),
    DecayOutOfRange(f64),
}

impl fmt::Display for WorldInitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WorldInitError::CoordinateOutOfRange { coord, rows, cols } => {
                write!(f, "coordinate {coord} lies outside the {rows}x{cols} grid")
            }
            WorldInitError::NoiseOutOfRange(noise) => {
                write!(f, "noise ({noise}) must be within [0, 1]")
            }
            WorldInitError::DecayOutOfRange(decay) => {
                write!(f, "decay ({decay}) must be within [0, 1]")
            }
        }
    }
}

impl Error for WorldInitError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunError {
    TooManyIterations { max: usize, actual: usize },
}

impl fmt::Display for RunError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunError::TooManyIterations { max, actual } => {
                write!(f, "iterations ({actual}) exceed supported maximum ({max})")
            }
        }
    }
}

impl Error for RunError {}

/// Utility of the cell an agent ends up observing when it attempts to move
/// from `origin` in `dir`. Out-of-bounds and wall candidates bounce the agent
/// back to the origin cell, so walls act as elastic barriers rather than
/// penalized or absorbing states.
pub fn neighbor_value(grid: &Grid, walls: &HashSet<Coord>, origin: Coord, dir: Direction) -> f64 {
    let (dr, dc) = dir.delta();
    let row = origin.row as isize + dr;
    let col = origin.col as isize + dc;
    if row < 0 || col < 0 {
        return grid.get(origin);
    }
    let candidate = Coord::new(row as usize, col as usize);
    if !grid.contains(candidate) || walls.contains(&candidate) {
        return grid.get(origin);
    }
    grid.get(candidate)
}

/// Maximum expected utility over the four movement attempts from `origin`.
///
/// An attempt succeeds with probability `1 - noise` and slips to each
/// perpendicular direction with probability `noise / 2`. Slip terms are
/// accumulated in a fixed order so results are bit-for-bit reproducible.
pub fn best_action_value(noise: f64, grid: &Grid, walls: &HashSet<Coord>, origin: Coord) -> f64 {
    let slip = noise / 2.0;
    Direction::ALL
        .iter()
        .map(|&dir| {
            let [side_a, side_b] = dir.perpendicular();
            neighbor_value(grid, walls, origin, dir) * (1.0 - noise)
                + neighbor_value(grid, walls, origin, side_a) * slip
                + neighbor_value(grid, walls, origin, side_b) * slip
        })
        .fold(f64::NEG_INFINITY, f64::max)
}

/// A grid MDP plus the state needed to run synchronous value iteration over
/// it: terminal cells keep their value forever, wall cells are excluded from
/// updates and impassable to movement.
#[derive(Debug)]
pub struct GridWorld {
    grid: Grid,
    terminals: HashSet<Coord>,
    walls: HashSet<Coord>,
    params: SweepParams,
    iteration: usize,
}

impl GridWorld {
    pub const MAX_ITERATIONS: usize = 1_000_000;

    pub fn new(
        grid: Grid,
        terminals: impl IntoIterator<Item = Coord>,
        walls: impl IntoIterator<Item = Coord>,
        params: SweepParams,
    ) -> Self {
        Self::try_new(grid, terminals, walls, params).unwrap_or_else(|e| panic!("{e}"))
    }

    pub fn try_new(
        grid: Grid,
        terminals: impl IntoIterator<Item = Coord>,
        walls: impl IntoIterator<Item = Coord>,
        params: SweepParams,
    ) -> Result<Self, WorldInitError> {
        if !(0.0..=1.0).contains(&params.noise) {
            return Err(WorldInitError::NoiseOutOfRange(params.noise));
        }
        if !(0.0..=1.0).contains(&params.decay) {
            return Err(WorldInitError::DecayOutOfRange(params.decay));
        }
        let terminals: HashSet<Coord> = terminals.into_iter().collect();
        let walls: HashSet<Coord> = walls.into_iter().collect();
        for &coord in terminals.iter().chain(walls.iter()) {
            if !grid.contains(coord) {
                return Err(WorldInitError::CoordinateOutOfRange {
                    coord,
                    rows: grid.rows(),
                    cols: grid.cols(),
                });
            }
        }
        Ok(Self {
            grid,
            terminals,
            walls,
            params,
            iteration: 0,
        })
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn params(&self) -> SweepParams {
        self.params
    }

    /// Number of sweeps performed so far.
    pub fn iteration(&self) -> usize {
        self.iteration
    }

    pub fn is_terminal(&self, coord: Coord) -> bool {
        self.terminals.contains(&coord)
    }

    pub fn is_wall(&self, coord: Coord) -> bool {
        self.walls.contains(&coord)
    }

    /// Perform one synchronous Bellman sweep, replacing the grid with a fresh
    /// one computed entirely from the previous grid's values.
    pub fn step(&mut self) {
        self.grid = self.sweep();
        self.iteration += 1;
    }

    /// One Bellman backup of every cell. Terminals are copied verbatim from
    /// the old grid; walls are left at the fresh grid's zero rather than
    /// carried over; every other cell gets `cost + decay * best_action_value`.
    /// No cell ever observes another cell's already-updated value.
    fn sweep(&self) -> Grid {
        let mut next = Grid::zeroed(self.grid.rows(), self.grid.cols());
        for coord in self.grid.coords() {
            if self.terminals.contains(&coord) {
                next.set(coord, self.grid.get(coord));
            } else if !self.walls.contains(&coord) {
                let best = best_action_value(self.params.noise, &self.grid, &self.walls, coord);
                next.set(coord, self.params.cost + self.params.decay * best);
            }
        }
        next
    }

    pub fn run(&mut self, iterations: usize) -> RunTrace {
        self.try_run(iterations).unwrap_or_else(|e| panic!("{e}"))
    }

    /// Perform a fixed number of sweeps, recording one snapshot per sweep.
    /// The iteration count is always exhausted; `max_residual` in the trace
    /// is informational and never triggers early stopping.
    pub fn try_run(&mut self, iterations: usize) -> Result<RunTrace, RunError> {
        if iterations > Self::MAX_ITERATIONS {
            return Err(RunError::TooManyIterations {
                max: Self::MAX_ITERATIONS,
                actual: iterations,
            });
        }
        let mut snapshots = Vec::with_capacity(iterations);
        for _ in 0..iterations {
            let prev = self.grid.clone();
            self.step();
            let max_residual = prev
                .coords()
                .map(|c| (self.grid.get(c) - prev.get(c)).abs())
                .fold(0.0, f64::max);
            snapshots.push(IterationSnapshot {
                iteration: self.iteration,
                max_residual,
                grid: self.grid.clone(),
            });
        }
        Ok(RunTrace {
            schema_version: 1,
            iterations,
            snapshots,
        })
    }
}
