//! A board-sized grid of cells, stored row by row.

use wormsim_types::{BoardSize, Cell, Position};

/// A rectangular grid of [`Cell`]s covering the whole board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    size: BoardSize,
    cells: Vec<Cell>,
}

impl Grid {
    /// A grid with every cell set to `cell`.
    pub fn filled(size: BoardSize, cell: Cell) -> Self {
        Self {
            size,
            cells: vec![cell; size.area()],
        }
    }

    /// Dimensions of the grid.
    pub const fn size(&self) -> BoardSize {
        self.size
    }

    /// The cell at `at`, or `None` off the board.
    pub fn get(&self, at: Position) -> Option<Cell> {
        self.offset(at).and_then(|i| self.cells.get(i)).copied()
    }

    /// Overwrite the cell at `at`. Positions off the board are ignored.
    pub fn set(&mut self, at: Position, cell: Cell) {
        if let Some(slot) = self.offset(at).and_then(|i| self.cells.get_mut(i)) {
            *slot = cell;
        }
    }

    /// Overwrite every cell.
    pub fn fill(&mut self, cell: Cell) {
        self.cells.fill(cell);
    }

    /// Make this grid an exact copy of `other`.
    pub fn copy_from(&mut self, other: &Self) {
        self.size = other.size;
        self.cells.clone_from(&other.cells);
    }

    /// Rows from top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(usize::from(self.size.width).max(1))
    }

    /// Number of cells holding a carrot.
    pub fn carrot_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_carrot()).count()
    }

    fn offset(&self, at: Position) -> Option<usize> {
        if !self.size.contains(at) {
            return None;
        }
        usize::from(at.y)
            .checked_mul(usize::from(self.size.width))?
            .checked_add(usize::from(at.x))
    }
}
