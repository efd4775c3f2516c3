//! Breadth-first step counts used for reachability checks.

use std::collections::VecDeque;

use pursuit_maze_core::{CellCoord, SimulationError};
use pursuit_maze_world::GridWorld;

/// Dense grid of step counts from a single origin.
///
/// Distances are stored in row-major order and stay `None` for walls and for
/// floor cells the origin cannot reach.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DistanceField {
    origin: CellCoord,
    width: u32,
    distances: Vec<Option<u32>>,
}

impl DistanceField {
    /// Floods the grid outward from `origin`.
    ///
    /// A wall origin produces a field where nothing is reachable.
    pub fn from_origin(grid: &GridWorld, origin: CellCoord) -> Result<Self, SimulationError> {
        let origin_walkable = grid.walkable(origin)?;
        let mut distances = vec![None; grid.cell_count()];
        let mut queue = VecDeque::new();

        if let (true, Some(index)) = (origin_walkable, grid.index_of(origin)) {
            distances[index] = Some(0);
            queue.push_back(origin);
        }

        while let Some(cell) = queue.pop_front() {
            let Some(current) = grid.index_of(cell).and_then(|index| distances[index]) else {
                continue;
            };

            for neighbor in grid.neighbors(cell) {
                let Some(neighbor_index) = grid.index_of(neighbor) else {
                    continue;
                };

                if distances[neighbor_index].is_some() {
                    continue;
                }

                distances[neighbor_index] = Some(current + 1);
                queue.push_back(neighbor);
            }
        }

        Ok(Self {
            origin,
            width: grid.width(),
            distances,
        })
    }

    /// Cell the field was flooded from.
    #[must_use]
    pub const fn origin(&self) -> CellCoord {
        self.origin
    }

    /// Step count from the origin, or `None` when unreachable or outside the field.
    #[must_use]
    pub fn distance(&self, cell: CellCoord) -> Option<u32> {
        if cell.x() >= self.width {
            return None;
        }

        let width = usize::try_from(self.width).ok()?;
        let x = usize::try_from(cell.x()).ok()?;
        let y = usize::try_from(cell.y()).ok()?;
        let index = y.checked_mul(width)?.checked_add(x)?;
        self.distances.get(index).copied().flatten()
    }

    /// Number of cells reachable from the origin, the origin included.
    #[must_use]
    pub fn reachable_count(&self) -> usize {
        self.distances.iter().filter(|distance| distance.is_some()).count()
    }
}
