//! Precomputed routes consumed one cell per tick.

use crate::CellCoord;

/// Ordered cells a mobile entity traverses, read through a forward-only cursor.
///
/// The sequence excludes the cell the route was planned from and includes the
/// destination. Cells are never removed; consuming the route only moves the
/// cursor, so an exhausted route stays exhausted.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Route {
    cells: Vec<CellCoord>,
    cursor: usize,
}

impl Route {
    /// Creates a route positioned before its first cell.
    #[must_use]
    pub fn new(cells: Vec<CellCoord>) -> Self {
        Self { cells, cursor: 0 }
    }

    /// Total number of cells in the route, consumed or not.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Reports whether the route holds no cells at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Number of cells that have not been consumed yet.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.cells.len().saturating_sub(self.cursor)
    }

    /// Reports whether every cell has been consumed.
    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        self.remaining() == 0
    }

    /// Head of the unconsumed portion, if any.
    #[must_use]
    pub fn next_step(&self) -> Option<CellCoord> {
        self.cells.get(self.cursor).copied()
    }

    /// Consumes and returns the head of the unconsumed portion.
    pub fn advance(&mut self) -> Option<CellCoord> {
        let cell = self.next_step()?;
        self.cursor += 1;
        Some(cell)
    }

    /// Every cell of the route in traversal order.
    #[must_use]
    pub fn cells(&self) -> &[CellCoord] {
        &self.cells
    }

    /// Cells that have not been consumed yet.
    #[must_use]
    pub fn upcoming(&self) -> &[CellCoord] {
        self.cells.get(self.cursor..).unwrap_or(&[])
    }

    /// Final cell of the route.
    #[must_use]
    pub fn destination(&self) -> Option<CellCoord> {
        self.cells.last().copied()
    }
}
