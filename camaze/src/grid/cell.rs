use crate::dims::Dims;

/// One of the four grid directions.
///
/// The discriminant is the fixed direction index, `North = 0` through `West = 3`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Direction {
    North = 0,
    East = 1,
    South = 2,
    West = 3,
}

impl Direction {
    /// All directions in scanning order. Every neighbor scan in the crate walks this order.
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn opposite(self) -> Self {
        use Direction::*;

        match self {
            North => South,
            East => West,
            South => North,
            West => East,
        }
    }

    /// Coordinate offset of the direction, north is towards row 0.
    pub fn offset(self) -> Dims {
        match self {
            Direction::North => Dims(0, -1),
            Direction::East => Dims(1, 0),
            Direction::South => Dims(0, 1),
            Direction::West => Dims(-1, 0),
        }
    }
}

/// State of a cell in the growth automaton.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CellState {
    /// Not part of the maze yet.
    Disconnected,
    /// Part of the maze and able to invite a disconnected neighbor.
    Seed,
    /// Proposes to connect the neighbor in the carried direction in the next generation.
    Invited(Direction),
    /// Part of the maze, not growing anymore.
    Connected,
}

impl CellState {
    pub fn is_disconnected(self) -> bool {
        matches!(self, CellState::Disconnected)
    }

    pub fn is_seed(self) -> bool {
        matches!(self, CellState::Seed)
    }

    pub fn is_invited(self) -> bool {
        matches!(self, CellState::Invited(_))
    }

    pub fn is_connected(self) -> bool {
        matches!(self, CellState::Connected)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    pub(crate) state: CellState,
    connect: Option<Direction>,
    pos: Dims,
}

impl Cell {
    pub fn new(pos: Dims) -> Cell {
        Cell {
            state: CellState::Disconnected,
            connect: None,
            pos,
        }
    }

    pub fn state(&self) -> CellState {
        self.state
    }

    /// Direction to the parent cell, `None` for the root and for cells not in the maze.
    pub fn connect(&self) -> Option<Direction> {
        self.connect
    }

    pub fn pos(&self) -> Dims {
        self.pos
    }

    pub fn row(&self) -> i32 {
        self.pos.row()
    }

    pub fn col(&self) -> i32 {
        self.pos.col()
    }

    /// Records the parent edge. The connect vector is write-once, so this returns `false` and
    /// leaves the cell untouched if it was already set.
    pub(crate) fn connect_to(&mut self, dir: Direction) -> bool {
        if self.connect.is_some() {
            return false;
        }

        self.connect = Some(dir);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opposite_pairs() {
        for dir in Direction::ALL {
            assert_ne!(dir, dir.opposite());
            assert_eq!(dir, dir.opposite().opposite());
            assert_eq!(dir.offset() + dir.opposite().offset(), Dims::ZERO);
            assert_eq!((dir.index() + 2) % 4, dir.opposite().index());
        }
    }

    #[test]
    fn indices_are_fixed() {
        assert_eq!(Direction::North.index(), 0);
        assert_eq!(Direction::East.index(), 1);
        assert_eq!(Direction::South.index(), 2);
        assert_eq!(Direction::West.index(), 3);
        for (i, dir) in Direction::ALL.into_iter().enumerate() {
            assert_eq!(dir.index(), i);
        }
    }

    #[test]
    fn connect_is_write_once() {
        let mut cell = Cell::new(Dims(0, 0));
        assert!(cell.connect_to(Direction::East));
        assert!(!cell.connect_to(Direction::South));
        assert_eq!(cell.connect(), Some(Direction::East));
    }
}
