use std::{fmt, ops::Add};

use serde::{Deserialize, Serialize};

/// Two dimensional grid coordinate, `Dims(x, y)` where `x` is the column and `y` the row.
///
/// Also used for sizes, in that case `x` is the column count and `y` the row count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Dims(pub i32, pub i32);

impl Dims {
    pub const ZERO: Dims = Dims(0, 0);

    /// Builds the coordinate from `(row, col)` order.
    pub fn from_row_col(row: i32, col: i32) -> Self {
        Dims(col, row)
    }

    pub fn row(self) -> i32 {
        self.1
    }

    pub fn col(self) -> i32 {
        self.0
    }

    /// Row-major iteration over the half-open rectangle `[from, to)`.
    pub fn iter_fill(from: Dims, to: Dims) -> impl Iterator<Item = Dims> {
        (from.1..to.1).flat_map(move |y| (from.0..to.0).map(move |x| Dims(x, y)))
    }

    pub fn all_positive(self) -> bool {
        self.0 > 0 && self.1 > 0
    }

    pub fn all_non_negative(self) -> bool {
        self.0 >= 0 && self.1 >= 0
    }
}

impl fmt::Display for Dims {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(row {}, col {})", self.1, self.0)
    }
}

impl Add for Dims {
    type Output = Dims;

    fn add(self, other: Dims) -> Dims {
        Dims(self.0 + other.0, self.1 + other.1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_col_order() {
        let pos = Dims::from_row_col(2, 5);
        assert_eq!(pos, Dims(5, 2));
        assert_eq!(pos.row(), 2);
        assert_eq!(pos.col(), 5);
    }

    #[test]
    fn iter_fill_is_row_major() {
        let all: Vec<_> = Dims::iter_fill(Dims::ZERO, Dims(2, 2)).collect();
        assert_eq!(all, vec![Dims(0, 0), Dims(1, 0), Dims(0, 1), Dims(1, 1)]);
    }
}
