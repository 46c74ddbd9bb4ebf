//! Bellman value iteration over small fixed-topology grid MDPs.
//!
//! The [`world::GridWorld`] engine owns a rectangular utility grid, a set of
//! frozen terminal cells and a set of impassable wall cells, and repeatedly
//! applies synchronous Bellman sweeps: every non-terminal, non-wall cell is
//! backed up to `cost + decay * max_a E[V(s')]` under directional noise,
//! reading exclusively from the previous grid.

pub mod direction;
pub mod grid;
pub mod world;
