#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Bootstrap system that turns a [`Scenario`] into a ready-to-tick [`World`].
//!
//! Construction runs leaf-first: the maze is validated into a [`GridWorld`],
//! the pursuer's route is planned once, and the registry is populated with
//! the target, the pursuer and one obstacle per wall cell.

mod scenario;

use pursuit_maze_core::{CellCoord, EntityId, EntityKind, SimulationError};
use pursuit_maze_system_pathfinding::{distance_field, PathPlanner};
use pursuit_maze_world::{GridWorld, World};
use tracing::{debug, info};

pub use scenario::{
    Scenario, ScenarioError, REFERENCE_HEIGHT, REFERENCE_MAZE, REFERENCE_START, REFERENCE_TARGET,
    REFERENCE_WIDTH,
};

/// Figures gathered while the world was assembled.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LaunchReport {
    /// Number of cells in the pursuer's planned route.
    pub route_length: usize,
    /// Floor cells reachable from the pursuer's start, the start included.
    pub reachable_cells: usize,
    /// Obstacles derived from wall cells.
    pub obstacles: usize,
}

/// A freshly bootstrapped world plus the identifiers drivers care about.
#[derive(Clone, Debug)]
pub struct Launch {
    /// The populated world, not yet ticked.
    pub world: World,
    /// Identifier of the pursuer.
    pub pursuer: EntityId,
    /// Identifier of the target.
    pub target: EntityId,
    /// Construction summary.
    pub report: LaunchReport,
}

/// Assembles worlds from scenarios.
#[derive(Debug, Default)]
pub struct Bootstrap {
    planner: PathPlanner,
}

impl Bootstrap {
    /// Builds a world from the scenario.
    ///
    /// Any failure aborts construction: malformed mazes, endpoints outside
    /// the grid, unreachable targets, and rejected placements.
    pub fn build(&mut self, scenario: &Scenario) -> Result<Launch, SimulationError> {
        let grid = GridWorld::build(&scenario.maze)?;
        let (width, height) = grid.dimensions();
        debug!(width, height, "maze validated");

        let reachable_cells = distance_field(&grid, scenario.pursuer_start)?.reachable_count();
        let route = self
            .planner
            .find_path(&grid, scenario.pursuer_start, scenario.target)?;
        let route_length = route.len();
        debug!(
            start = %scenario.pursuer_start,
            end = %scenario.target,
            route_length,
            "route planned"
        );

        let walls: Vec<CellCoord> = grid.wall_cells().collect();
        let mut world = World::new(grid, scenario.activation);

        let target = world.place(EntityKind::Target, scenario.target)?;
        let pursuer = world.spawn_pursuer(scenario.pursuer_start, route)?;
        for &cell in &walls {
            let _ = world.place(EntityKind::Obstacle, cell)?;
        }

        let report = LaunchReport {
            route_length,
            reachable_cells,
            obstacles: walls.len(),
        };
        info!(
            width,
            height,
            route_length,
            reachable_cells,
            obstacles = report.obstacles,
            activation = ?scenario.activation,
            "world bootstrapped"
        );

        Ok(Launch {
            world,
            pursuer,
            target,
            report,
        })
    }
}

/// Builds a world from the scenario with a throwaway bootstrapper.
pub fn launch(scenario: &Scenario) -> Result<Launch, SimulationError> {
    Bootstrap::default().build(scenario)
}
