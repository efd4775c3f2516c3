#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Deterministic shortest-path planning over the maze grid.
//!
//! Routes are computed once, before the scheduler starts ticking, with an A*
//! search over 4-neighbour adjacency. Frontier ties on the estimated total
//! cost resolve in favour of the earliest-inserted node, so identical inputs
//! always yield identical routes.

mod field;

use std::{cmp::Reverse, collections::BinaryHeap};

use pursuit_maze_core::{CellCoord, Route, SimulationError};
use pursuit_maze_world::GridWorld;

pub use field::DistanceField;

/// Plans a route from `start` to `end` with a throwaway planner.
pub fn find_path(
    grid: &GridWorld,
    start: CellCoord,
    end: CellCoord,
) -> Result<Route, SimulationError> {
    PathPlanner::default().find_path(grid, start, end)
}

/// Computes breadth-first step counts from `origin` to every reachable cell.
pub fn distance_field(grid: &GridWorld, origin: CellCoord) -> Result<DistanceField, SimulationError> {
    DistanceField::from_origin(grid, origin)
}

/// A* planner whose search buffers are reused between calls.
#[derive(Debug, Default)]
pub struct PathPlanner {
    costs: Vec<u32>,
    parents: Vec<Option<usize>>,
    closed: Vec<bool>,
    frontier: BinaryHeap<Reverse<FrontierEntry>>,
}

/// Frontier key ordered by estimated total cost, then insertion sequence.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
struct FrontierEntry {
    estimate: u32,
    sequence: u64,
    node: usize,
}

impl PathPlanner {
    /// Computes the shortest route from `start` to `end`.
    ///
    /// The returned route excludes `start` and includes `end`; it is empty
    /// when both are the same cell. Endpoints outside the grid fail with
    /// [`SimulationError::OutOfBounds`], wall endpoints or disconnected
    /// regions with [`SimulationError::PathNotFound`].
    pub fn find_path(
        &mut self,
        grid: &GridWorld,
        start: CellCoord,
        end: CellCoord,
    ) -> Result<Route, SimulationError> {
        let start_walkable = grid.walkable(start)?;
        let end_walkable = grid.walkable(end)?;
        let not_found = SimulationError::PathNotFound { start, end };

        if !start_walkable || !end_walkable {
            return Err(not_found);
        }

        if start == end {
            return Ok(Route::default());
        }

        let (Some(start_node), Some(goal_node)) = (grid.index_of(start), grid.index_of(end)) else {
            return Err(not_found);
        };

        self.reset(grid.cell_count());
        let mut sequence: u64 = 0;

        self.costs[start_node] = 0;
        self.frontier.push(Reverse(FrontierEntry {
            estimate: start.manhattan_distance(end),
            sequence,
            node: start_node,
        }));

        while let Some(Reverse(entry)) = self.frontier.pop() {
            let node = entry.node;
            if self.closed[node] {
                continue;
            }
            self.closed[node] = true;

            if node == goal_node {
                return self.reconstruct(grid, start_node, goal_node).ok_or(not_found);
            }

            let Some(cell) = grid.cell_at(node) else {
                continue;
            };
            let next_cost = self.costs[node].saturating_add(1);

            for neighbor in grid.neighbors(cell) {
                let Some(neighbor_node) = grid.index_of(neighbor) else {
                    continue;
                };

                if self.closed[neighbor_node] || next_cost >= self.costs[neighbor_node] {
                    continue;
                }

                self.costs[neighbor_node] = next_cost;
                self.parents[neighbor_node] = Some(node);
                sequence += 1;
                self.frontier.push(Reverse(FrontierEntry {
                    estimate: next_cost.saturating_add(neighbor.manhattan_distance(end)),
                    sequence,
                    node: neighbor_node,
                }));
            }
        }

        Err(not_found)
    }

    fn reset(&mut self, node_count: usize) {
        self.costs.clear();
        self.costs.resize(node_count, u32::MAX);
        self.parents.clear();
        self.parents.resize(node_count, None);
        self.closed.clear();
        self.closed.resize(node_count, false);
        self.frontier.clear();
    }

    fn reconstruct(&self, grid: &GridWorld, start_node: usize, goal_node: usize) -> Option<Route> {
        let mut cells = Vec::new();
        let mut node = goal_node;

        while node != start_node {
            cells.push(grid.cell_at(node)?);
            node = self.parents.get(node).copied().flatten()?;
        }

        cells.reverse();
        Some(Route::new(cells))
    }
}
