pub mod cell;
pub use cell::{Cell, CellState, Direction};

use smallvec::SmallVec;

use crate::{array::Array2D, dims::Dims, generator::GenerationError};

/// Rectangular grid of maze cells with fixed dimensions.
///
/// Cells are stored and iterated in row-major order. The grid is only ever mutated by the
/// generator; consumers get it read-only once generation terminates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    cells: Array2D<Cell>,
}

impl Grid {
    /// Creates a grid of the given size (`Dims(cols, rows)`) with every cell disconnected.
    pub fn new(size: Dims) -> Result<Self, GenerationError> {
        let cells = Array2D::from_fn(size, Cell::new).ok_or(GenerationError::InvalidSize {
            rows: size.row() as i64,
            cols: size.col() as i64,
        })?;

        Ok(Grid { cells })
    }

    pub fn create(rows: i32, cols: i32) -> Result<Self, GenerationError> {
        Self::new(Dims::from_row_col(rows, cols))
    }

    pub fn size(&self) -> Dims {
        self.cells.size()
    }

    pub fn rows(&self) -> usize {
        self.size().row() as usize
    }

    pub fn cols(&self) -> usize {
        self.size().col() as usize
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn is_in_bounds(&self, pos: Dims) -> bool {
        self.cells.dim_to_idx(pos).is_some()
    }

    /// Position reached from `pos` in `dir`, `None` when it leaves the grid.
    pub fn neighbor_pos(&self, pos: Dims, dir: Direction) -> Option<Dims> {
        if !self.is_in_bounds(pos) {
            return None;
        }

        let next = pos + dir.offset();
        self.is_in_bounds(next).then_some(next)
    }

    pub fn neighbor_of(&self, pos: Dims, dir: Direction) -> Option<&Cell> {
        self.neighbor_pos(pos, dir).map(|next| &self.cells[next])
    }

    /// In-bounds neighbors of `pos` in north, east, south, west order.
    pub fn neighbors(&self, pos: Dims) -> SmallVec<[(Direction, &Cell); 4]> {
        Direction::ALL
            .into_iter()
            .filter_map(|dir| self.neighbor_of(pos, dir).map(|cell| (dir, cell)))
            .collect()
    }

    pub fn get(&self, pos: Dims) -> Option<&Cell> {
        self.cells.get(pos)
    }

    pub(crate) fn get_mut(&mut self, pos: Dims) -> Option<&mut Cell> {
        self.cells.get_mut(pos)
    }

    pub fn cell_at(&self, row: i32, col: i32) -> Option<&Cell> {
        self.get(Dims::from_row_col(row, col))
    }

    /// All cells in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }

    pub fn positions(&self) -> impl Iterator<Item = Dims> + '_ {
        self.cells.iter_pos()
    }

    pub fn count(&self, pred: impl Fn(CellState) -> bool) -> usize {
        self.cells().filter(|cell| pred(cell.state())).count()
    }

    pub fn is_complete(&self) -> bool {
        self.cells().all(|cell| !cell.state().is_disconnected())
    }

    pub fn has_seeds(&self) -> bool {
        self.cells().any(|cell| cell.state().is_seed())
    }

    /// Number of parent edges, `len() - 1` for a finished maze.
    pub fn edge_count(&self) -> usize {
        self.cells().filter(|cell| cell.connect().is_some()).count()
    }

    /// The cell in the maze that has no parent. `None` before any cell joined the maze.
    pub fn root(&self) -> Option<&Cell> {
        self.cells()
            .find(|cell| !cell.state().is_disconnected() && cell.connect().is_none())
    }

    pub fn parent_of(&self, pos: Dims) -> Option<&Cell> {
        let dir = self.get(pos)?.connect()?;
        self.neighbor_of(pos, dir)
    }

    /// Positions from `pos` to the root following connect vectors, both ends included.
    ///
    /// Returns `None` if the chain is broken or longer than the grid, which can only happen on a
    /// grid that does not hold a tree.
    pub fn path_to_root(&self, pos: Dims) -> Option<Vec<Dims>> {
        let mut path = vec![self.get(pos)?.pos()];
        let mut current = pos;

        while let Some(parent) = self.parent_of(current) {
            current = parent.pos();
            path.push(current);
            if path.len() > self.len() {
                return None;
            }
        }

        match self.get(current)?.connect() {
            None => Some(path),
            Some(_) => None,
        }
    }

    /// Whether the wall between `pos` and its neighbor in `dir` is open, that is one of the two
    /// cells is the parent of the other.
    pub fn is_passage(&self, pos: Dims, dir: Direction) -> bool {
        let (Some(cell), Some(neighbor)) = (self.get(pos), self.neighbor_of(pos, dir)) else {
            return false;
        };

        cell.connect() == Some(dir) || neighbor.connect() == Some(dir.opposite())
    }

    /// Disconnected neighbors of `pos`, as directions in scanning order.
    pub fn disconnected_neighbors(&self, pos: Dims) -> SmallVec<[Direction; 4]> {
        self.neighbors(pos)
            .into_iter()
            .filter(|(_, cell)| cell.state().is_disconnected())
            .map(|(dir, _)| dir)
            .collect()
    }

    pub(crate) fn set_state(&mut self, pos: Dims, state: CellState) {
        if let Some(cell) = self.get_mut(pos) {
            cell.state = state;
        }
    }
}
