//! Dense per-pixel price estimates.

/// `height x width` grid of price estimates, indexed `[y][x]`.
///
/// `None` marks pixels without a trustworthy estimate. A fresh matrix is
/// all `None`, so cells that are never written render like invalid ones.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceMatrix {
    width: usize,
    height: usize,
    cells: Vec<Option<f64>>,
}

impl PriceMatrix {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![None; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    fn index(&self, x: usize, y: usize) -> Option<usize> {
        (x < self.width && y < self.height).then(|| y * self.width + x)
    }

    /// Estimate at column `x`, row `y`; `None` outside the grid as well.
    pub fn get(&self, x: usize, y: usize) -> Option<f64> {
        self.index(x, y).and_then(|idx| self.cells[idx])
    }

    /// Store an estimate. Returns false if the position is off the grid.
    pub fn set(&mut self, x: usize, y: usize, estimate: Option<f64>) -> bool {
        match self.index(x, y) {
            Some(idx) => {
                self.cells[idx] = estimate;
                true
            }
            None => false,
        }
    }

    /// Row-major view of all cells.
    pub fn cells(&self) -> &[Option<f64>] {
        &self.cells
    }

    /// Number of cells holding an estimate.
    pub fn valid_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_matrix_is_all_invalid() {
        let matrix = PriceMatrix::new(3, 2);
        assert_eq!(matrix.cells().len(), 6);
        assert_eq!(matrix.valid_count(), 0);
        assert_eq!(matrix.get(2, 1), None);
    }

    #[test]
    fn test_set_and_get_non_square() {
        let mut matrix = PriceMatrix::new(4, 2);
        assert!(matrix.set(3, 1, Some(12.5)));
        assert_eq!(matrix.get(3, 1), Some(12.5));
        assert_eq!(matrix.cells()[7], Some(12.5));
        assert_eq!(matrix.get(1, 3), None);
    }

    #[test]
    fn test_set_out_of_range() {
        let mut matrix = PriceMatrix::new(2, 2);
        assert!(!matrix.set(2, 0, Some(1.0)));
        assert!(!matrix.set(0, 2, Some(1.0)));
        assert_eq!(matrix.valid_count(), 0);
    }
}
