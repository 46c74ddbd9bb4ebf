use crate::grid::Grid;
use serde::{Deserialize, Serialize};

/// State of the world after one sweep of a run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct IterationSnapshot {
    pub iteration: usize,
    /// Largest absolute per-cell change this sweep produced. Reported for
    /// observability only; run length is always fixed up front.
    pub max_residual: f64,
    pub grid: Grid,
}

fn default_schema_version() -> u32 {
    1
}

/// Record of a fixed-length value-iteration run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RunTrace {
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,
    pub iterations: usize,
    pub snapshots: Vec<IterationSnapshot>,
}
