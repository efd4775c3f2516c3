//! Immutable maze geometry.

use pursuit_maze_core::{CellCoord, Direction, SimulationError};

/// Maze value marking a wall cell.
pub const WALL: u8 = 0;
/// Maze value marking a walkable floor cell.
pub const FLOOR: u8 = 1;

/// Fixed-size walkability grid built once from a 0/1 maze description.
///
/// Cells are stored densely in row-major order. Every coordinate within
/// `[0, width) × [0, height)` maps to exactly one cell and the grid is never
/// mutated after [`GridWorld::build`] returns.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GridWorld {
    width: u32,
    height: u32,
    walkable: Vec<bool>,
}

impl GridWorld {
    /// Builds a grid from rows of [`WALL`] and [`FLOOR`] values.
    ///
    /// The row count becomes the height and the shared row length the width.
    pub fn build<R>(maze: &[R]) -> Result<Self, SimulationError>
    where
        R: AsRef<[u8]>,
    {
        let Some(first) = maze.first() else {
            return Err(malformed("maze has no rows"));
        };

        let width = first.as_ref().len();
        if width == 0 {
            return Err(malformed("maze rows are empty"));
        }

        let mut walkable = Vec::with_capacity(width.saturating_mul(maze.len()));
        for (y, row) in maze.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != width {
                return Err(malformed(format!(
                    "row {y} has {} cells but the first row has {width}",
                    row.len()
                )));
            }

            for (x, value) in row.iter().enumerate() {
                match *value {
                    WALL => walkable.push(false),
                    FLOOR => walkable.push(true),
                    other => {
                        return Err(malformed(format!(
                            "cell ({x}, {y}) holds {other}; expected {WALL} or {FLOOR}"
                        )))
                    }
                }
            }
        }

        let width = u32::try_from(width).map_err(|_| malformed("maze is too wide"))?;
        let height = u32::try_from(maze.len()).map_err(|_| malformed("maze is too tall"))?;

        Ok(Self {
            width,
            height,
            walkable,
        })
    }

    /// Grid dimensions as `(width, height)`.
    #[must_use]
    pub const fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Number of columns.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Number of rows.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Total number of cells.
    #[must_use]
    pub fn cell_count(&self) -> usize {
        self.walkable.len()
    }

    /// Reports whether the coordinate lies inside the grid.
    #[must_use]
    pub const fn contains(&self, cell: CellCoord) -> bool {
        cell.x() < self.width && cell.y() < self.height
    }

    /// Walkability of the cell, rejecting coordinates outside the grid.
    pub fn walkable(&self, cell: CellCoord) -> Result<bool, SimulationError> {
        self.index_of(cell)
            .and_then(|index| self.walkable.get(index).copied())
            .ok_or(SimulationError::OutOfBounds {
                cell,
                width: self.width,
                height: self.height,
            })
    }

    /// Walkability of the cell, treating out-of-range coordinates as blocked.
    #[must_use]
    pub fn is_walkable(&self, cell: CellCoord) -> bool {
        self.walkable(cell).unwrap_or(false)
    }

    /// Row-major dense index of the cell, if it lies inside the grid.
    #[must_use]
    pub fn index_of(&self, cell: CellCoord) -> Option<usize> {
        dense_index(self.width, self.height, cell)
    }

    /// Coordinate stored at the provided dense index.
    #[must_use]
    pub fn cell_at(&self, index: usize) -> Option<CellCoord> {
        if index >= self.walkable.len() {
            return None;
        }

        let width = usize::try_from(self.width).ok()?;
        let x = u32::try_from(index % width).ok()?;
        let y = u32::try_from(index / width).ok()?;
        Some(CellCoord::new(x, y))
    }

    /// Every cell with its walkability, in row-major order.
    ///
    /// Each call starts a fresh pass over the whole grid.
    pub fn iterate_cells(&self) -> impl Iterator<Item = (CellCoord, bool)> + '_ {
        self.walkable
            .iter()
            .enumerate()
            .filter_map(|(index, walkable)| self.cell_at(index).map(|cell| (cell, *walkable)))
    }

    /// Every wall cell, in row-major order.
    pub fn wall_cells(&self) -> impl Iterator<Item = CellCoord> + '_ {
        self.iterate_cells()
            .filter_map(|(cell, walkable)| (!walkable).then_some(cell))
    }

    /// Walkable cells sharing an edge with `cell`, in north, east, south, west order.
    pub fn neighbors(&self, cell: CellCoord) -> impl Iterator<Item = CellCoord> + '_ {
        Direction::ALL
            .into_iter()
            .filter_map(move |direction| cell.step(direction))
            .filter(move |neighbor| self.is_walkable(*neighbor))
    }

    /// Re-derives the 0/1 maze description the grid was built from.
    #[must_use]
    pub fn to_matrix(&self) -> Vec<Vec<u8>> {
        let width = usize::try_from(self.width).unwrap_or(0);
        if width == 0 {
            return Vec::new();
        }

        self.walkable
            .chunks(width)
            .map(|row| {
                row.iter()
                    .map(|walkable| if *walkable { FLOOR } else { WALL })
                    .collect()
            })
            .collect()
    }
}

fn malformed(reason: impl Into<String>) -> SimulationError {
    SimulationError::MalformedMaze {
        reason: reason.into(),
    }
}

/// Row-major index of `cell` within a `width × height` grid.
pub(crate) fn dense_index(width: u32, height: u32, cell: CellCoord) -> Option<usize> {
    if cell.x() >= width || cell.y() >= height {
        return None;
    }

    let x = usize::try_from(cell.x()).ok()?;
    let y = usize::try_from(cell.y()).ok()?;
    let width = usize::try_from(width).ok()?;
    y.checked_mul(width)?.checked_add(x)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn corridor() -> GridWorld {
        let rows: [[u8; 4]; 3] = [[0, 0, 0, 0], [0, 1, 1, 0], [0, 0, 1, 0]];
        GridWorld::build(&rows).expect("valid maze")
    }

    #[test]
    fn build_records_dimensions_and_walkability() {
        let grid = corridor();

        assert_eq!(grid.dimensions(), (4, 3));
        assert_eq!(grid.walkable(CellCoord::new(1, 1)), Ok(true));
        assert_eq!(grid.walkable(CellCoord::new(0, 0)), Ok(false));
        assert_eq!(grid.walkable(CellCoord::new(2, 2)), Ok(true));
    }

    #[test]
    fn walkable_rejects_out_of_range() {
        let grid = corridor();

        assert_eq!(
            grid.walkable(CellCoord::new(4, 0)),
            Err(SimulationError::OutOfBounds {
                cell: CellCoord::new(4, 0),
                width: 4,
                height: 3,
            })
        );
        assert!(grid.walkable(CellCoord::new(0, 3)).is_err());
        assert!(!grid.is_walkable(CellCoord::new(9, 9)));
    }

    #[test]
    fn dense_index_is_row_major_and_bounded() {
        let grid = corridor();

        assert_eq!(grid.index_of(CellCoord::new(2, 1)), Some(6));
        assert_eq!(grid.index_of(CellCoord::new(3, 2)), Some(11));
        assert_eq!(grid.index_of(CellCoord::new(4, 0)), None);
        assert_eq!(grid.index_of(CellCoord::new(0, 3)), None);
        assert_eq!(dense_index(u32::MAX, u32::MAX, CellCoord::new(u32::MAX, 0)), None);
        assert_eq!(grid.cell_at(6), Some(CellCoord::new(2, 1)));
    }

    #[test]
    fn build_rejects_empty_maze() {
        let rows: [Vec<u8>; 0] = [];
        assert!(matches!(
            GridWorld::build(&rows),
            Err(SimulationError::MalformedMaze { .. })
        ));
        assert!(matches!(
            GridWorld::build(&[Vec::<u8>::new()]),
            Err(SimulationError::MalformedMaze { .. })
        ));
    }

    #[test]
    fn build_rejects_ragged_rows() {
        let rows: Vec<Vec<u8>> = vec![vec![1, 1, 1], vec![1, 1]];
        let error = GridWorld::build(&rows).expect_err("ragged maze");
        assert_eq!(
            error,
            SimulationError::MalformedMaze {
                reason: "row 1 has 2 cells but the first row has 3".to_owned(),
            }
        );
    }

    #[test]
    fn build_rejects_unknown_cell_values() {
        let rows: Vec<Vec<u8>> = vec![vec![1, 2], vec![0, 1]];
        assert!(matches!(
            GridWorld::build(&rows),
            Err(SimulationError::MalformedMaze { .. })
        ));
    }

    #[test]
    fn iterate_cells_covers_grid_and_restarts() {
        let grid = corridor();

        let first: Vec<_> = grid.iterate_cells().collect();
        let second: Vec<_> = grid.iterate_cells().collect();

        assert_eq!(first.len(), 12);
        assert_eq!(first, second);
        assert_eq!(first[5], (CellCoord::new(1, 1), true));
    }

    #[test]
    fn matrix_round_trips_through_cells() {
        let rows: Vec<Vec<u8>> = vec![vec![0, 1, 1], vec![1, 0, 1]];
        let grid = GridWorld::build(&rows).expect("valid maze");

        let mut rebuilt = vec![vec![WALL; 3]; 2];
        for (cell, walkable) in grid.iterate_cells() {
            rebuilt[cell.y() as usize][cell.x() as usize] = u8::from(walkable);
        }

        assert_eq!(rebuilt, rows);
        assert_eq!(grid.to_matrix(), rows);
    }

    #[test]
    fn neighbors_follow_fixed_order_and_skip_walls() {
        let rows: [[u8; 3]; 3] = [[1, 1, 1], [1, 1, 0], [1, 1, 1]];
        let grid = GridWorld::build(&rows).expect("valid maze");

        let around_center: Vec<_> = grid.neighbors(CellCoord::new(1, 1)).collect();
        assert_eq!(
            around_center,
            vec![
                CellCoord::new(1, 0),
                CellCoord::new(1, 2),
                CellCoord::new(0, 1),
            ]
        );

        let around_corner: Vec<_> = grid.neighbors(CellCoord::new(0, 0)).collect();
        assert_eq!(around_corner, vec![CellCoord::new(1, 0), CellCoord::new(0, 1)]);
    }

    #[test]
    fn wall_cells_lists_blocked_cells() {
        let grid = corridor();
        assert_eq!(grid.wall_cells().count(), 9);
        assert!(grid.wall_cells().all(|cell| !grid.is_walkable(cell)));
    }
}
