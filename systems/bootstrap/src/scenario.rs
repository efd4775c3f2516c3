//! Initialization parameters for a simulation run.

use std::{
    fs,
    path::{Path, PathBuf},
};

use pursuit_maze_core::{ActivationOrder, CellCoord};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Width of the reference maze in cells.
pub const REFERENCE_WIDTH: usize = 17;
/// Height of the reference maze in cells.
pub const REFERENCE_HEIGHT: usize = 14;

/// The classic layout: a walled 17×14 maze with a single connected floor.
pub const REFERENCE_MAZE: [[u8; REFERENCE_WIDTH]; REFERENCE_HEIGHT] = [
    [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
    [0, 1, 1, 1, 1, 1, 1, 1, 0, 1, 1, 1, 1, 1, 1, 1, 0],
    [0, 1, 0, 1, 0, 0, 0, 1, 1, 1, 0, 1, 0, 1, 0, 1, 0],
    [0, 1, 1, 1, 0, 1, 0, 0, 0, 0, 0, 1, 0, 1, 1, 1, 0],
    [0, 1, 0, 0, 0, 1, 1, 1, 1, 1, 1, 1, 0, 0, 0, 1, 0],
    [0, 1, 0, 1, 0, 1, 0, 0, 0, 0, 0, 1, 1, 1, 0, 1, 0],
    [0, 1, 1, 1, 0, 1, 0, 1, 1, 1, 0, 1, 0, 1, 0, 1, 0],
    [0, 1, 0, 1, 0, 1, 0, 1, 1, 1, 0, 1, 0, 1, 0, 1, 0],
    [0, 1, 0, 1, 1, 1, 0, 0, 1, 0, 0, 1, 0, 1, 1, 1, 0],
    [0, 1, 0, 0, 0, 1, 1, 1, 1, 1, 1, 1, 0, 0, 0, 1, 0],
    [0, 1, 1, 1, 0, 1, 0, 0, 0, 0, 0, 1, 0, 1, 1, 1, 0],
    [0, 1, 0, 1, 0, 1, 0, 1, 1, 1, 0, 0, 0, 1, 0, 1, 0],
    [0, 1, 1, 1, 1, 1, 1, 1, 0, 1, 1, 1, 1, 1, 1, 1, 0],
    [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
];

/// Cell the pursuer starts from in the reference layout.
pub const REFERENCE_START: CellCoord = CellCoord::new(1, 1);
/// Cell holding the target in the reference layout.
pub const REFERENCE_TARGET: CellCoord = CellCoord::new(9, 6);

/// Everything required to boot a world: geometry, endpoints, and scheduling policy.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scenario {
    /// Rows of 0 (wall) and 1 (floor) values; row count is the height.
    pub maze: Vec<Vec<u8>>,
    /// Cell the pursuer is placed on and plans from.
    pub pursuer_start: CellCoord,
    /// Cell holding the target the pursuer heads toward.
    pub target: CellCoord,
    /// Order mobile entities act in within a tick.
    #[serde(default)]
    pub activation: ActivationOrder,
}

impl Scenario {
    /// The reference layout with registration-order activation.
    #[must_use]
    pub fn reference() -> Self {
        Self {
            maze: REFERENCE_MAZE.iter().map(|row| row.to_vec()).collect(),
            pursuer_start: REFERENCE_START,
            target: REFERENCE_TARGET,
            activation: ActivationOrder::Registration,
        }
    }

    /// Parses a scenario from TOML text.
    pub fn from_toml_str(contents: &str) -> Result<Self, ScenarioError> {
        toml::from_str(contents).map_err(ScenarioError::Parse)
    }

    /// Reads and parses a scenario file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ScenarioError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| ScenarioError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&contents)
    }

    /// Returns the scenario with a different activation policy.
    #[must_use]
    pub fn with_activation(mut self, activation: ActivationOrder) -> Self {
        self.activation = activation;
        self
    }
}

impl Default for Scenario {
    fn default() -> Self {
        Self::reference()
    }
}

/// Failures raised while reading scenario files.
#[derive(Debug, Error)]
pub enum ScenarioError {
    /// The file could not be read.
    #[error("failed to read scenario at {}", path.display())]
    Io {
        /// Location that was read.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
    /// The contents are not a valid scenario.
    #[error("failed to parse scenario toml")]
    Parse(#[source] toml::de::Error),
}
