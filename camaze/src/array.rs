use std::ops;

use crate::dims::Dims;

/// Fixed size 2D array stored row by row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Array2D<T> {
    buf: Vec<T>,
    width: usize,
    height: usize,
}

impl<T> Array2D<T> {
    /// Builds the array from a function of the position, filled in row-major order.
    pub fn from_fn(size: Dims, mut f: impl FnMut(Dims) -> T) -> Option<Self> {
        if !size.all_positive() {
            return None;
        }

        Some(Self {
            buf: Dims::iter_fill(Dims::ZERO, size).map(&mut f).collect(),
            width: size.0 as usize,
            height: size.1 as usize,
        })
    }

    pub fn size(&self) -> Dims {
        Dims(self.width as i32, self.height as i32)
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn dim_to_idx(&self, pos: Dims) -> Option<usize> {
        if !pos.all_non_negative() {
            return None;
        }

        let Dims(x, y) = pos;
        let (x, y) = (x as usize, y as usize);

        if x >= self.width || y >= self.height {
            return None;
        }

        Some(y * self.width + x)
    }

    pub fn idx_to_dim(&self, idx: usize) -> Option<Dims> {
        if idx >= self.buf.len() {
            return None;
        }

        let x = idx % self.width;
        let y = idx / self.width;

        Some(Dims(x as i32, y as i32))
    }

    pub fn get(&self, pos: Dims) -> Option<&T> {
        self.dim_to_idx(pos).and_then(|i| self.buf.get(i))
    }

    pub fn get_mut(&mut self, pos: Dims) -> Option<&mut T> {
        self.dim_to_idx(pos).and_then(|i| self.buf.get_mut(i))
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.buf.iter()
    }

    pub fn iter_pos(&self) -> impl Iterator<Item = Dims> + '_ {
        (0..self.buf.len()).filter_map(move |i| self.idx_to_dim(i))
    }
}

impl<T> ops::Index<Dims> for Array2D<T> {
    type Output = T;

    fn index(&self, index: Dims) -> &Self::Output {
        self.get(index).expect("Index out of bounds")
    }
}

impl<T> ops::IndexMut<Dims> for Array2D<T> {
    fn index_mut(&mut self, index: Dims) -> &mut Self::Output {
        self.get_mut(index).expect("Index out of bounds")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn idx_roundtrip_corners() {
        let arr = Array2D::from_fn(Dims(3, 2), |_| 0u8).unwrap();
        assert_eq!(arr.dim_to_idx(Dims(2, 1)), Some(5));
        assert_eq!(arr.idx_to_dim(5), Some(Dims(2, 1)));
        assert_eq!(arr.idx_to_dim(6), None);
    }

    #[test]
    fn out_of_bounds() {
        let arr = Array2D::from_fn(Dims(3, 2), |_| 0u8).unwrap();
        assert_eq!(arr.get(Dims(-1, 0)), None);
        assert_eq!(arr.get(Dims(0, -1)), None);
        assert_eq!(arr.get(Dims(3, 0)), None);
        assert_eq!(arr.get(Dims(0, 2)), None);
        assert_eq!(arr.get(Dims(2, 1)), Some(&0));
    }

    #[test]
    fn from_fn_row_major() {
        let arr = Array2D::from_fn(Dims(2, 2), |pos| pos).unwrap();
        assert_eq!(arr[Dims(1, 0)], Dims(1, 0));
        assert_eq!(
            arr.iter().copied().collect::<Vec<_>>(),
            arr.iter_pos().collect::<Vec<_>>()
        );
        assert!(Array2D::from_fn(Dims(0, 2), |pos| pos).is_none());
    }
}
