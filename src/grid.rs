/// A bounded (non-wrapping) matrix of cells stored row-major in a flat buffer.
///
/// Coordinates are signed so callers can hand in positions that fall off the
/// edge; every accessor treats those as absent rather than failing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    width: u32,
    height: u32,
    cells: Vec<bool>,
}

impl Grid {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            cells: vec![false; (width * height) as usize],
        }
    }

    /// Build a grid from rows of `O`/`.` characters. Test helper for
    /// hand-crafted generations.
    #[cfg(test)]
    pub fn from_rows(rows: &[&str]) -> Self {
        let height = rows.len() as u32;
        let width = rows.first().map_or(0, |r| r.len()) as u32;
        let mut grid = Self::new(width, height);
        for (y, row) in rows.iter().enumerate() {
            for (x, ch) in row.chars().enumerate() {
                grid.set(x as i32, y as i32, ch == 'O');
            }
        }
        grid
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Raw row-major cell slice (`y * width + x`).
    #[cfg(test)]
    pub fn cells(&self) -> &[bool] {
        &self.cells
    }

    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as u32) < self.width && (y as u32) < self.height
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        self.in_bounds(x, y)
            .then(|| (y as u32 * self.width + x as u32) as usize)
    }

    /// Cell state; anything off the grid reads as dead.
    pub fn get(&self, x: i32, y: i32) -> bool {
        self.index(x, y).is_some_and(|i| self.cells[i])
    }

    /// Set a single cell. Out-of-range writes are dropped.
    pub fn set(&mut self, x: i32, y: i32, alive: bool) {
        if let Some(i) = self.index(x, y) {
            self.cells[i] = alive;
        }
    }

    /// Flip a single cell. Out-of-range is a no-op.
    pub fn toggle(&mut self, x: i32, y: i32) {
        if let Some(i) = self.index(x, y) {
            self.cells[i] = !self.cells[i];
        }
    }

    /// Kill every cell.
    pub fn clear(&mut self) {
        self.cells.fill(false);
    }

    /// Overwrite this grid with the contents of `other` (same shape).
    pub fn copy_from(&mut self, other: &Grid) {
        debug_assert_eq!((self.width, self.height), (other.width, other.height));
        self.cells.copy_from_slice(&other.cells);
    }

    /// Count live cells.
    pub fn population(&self) -> u64 {
        self.cells.iter().filter(|&&c| c).count() as u64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_new() {
        let grid = Grid::new(100, 50);
        assert_eq!(grid.cells().len(), 5000);
        assert_eq!(grid.population(), 0);
    }

    #[test]
    fn test_grid_set_get() {
        let mut grid = Grid::new(10, 10);
        grid.set(3, 4, true);
        assert!(grid.get(3, 4));
        assert!(!grid.get(4, 3));
        assert!(grid.cells()[4 * 10 + 3]);
    }

    #[test]
    fn test_grid_does_not_wrap() {
        let mut grid = Grid::new(10, 10);
        grid.set(-1, -1, true);
        grid.set(10, 0, true);
        grid.set(0, 10, true);
        assert_eq!(grid.population(), 0);
        assert!(!grid.get(-1, 5));
        assert!(!grid.get(9, 10));
    }

    #[test]
    fn toggle_flips_and_flips_back() {
        let mut grid = Grid::new(4, 4);
        grid.toggle(2, 1);
        assert!(grid.get(2, 1));
        grid.toggle(2, 1);
        assert!(!grid.get(2, 1));
    }

    #[test]
    fn toggle_out_of_bounds_leaves_grid_untouched() {
        let mut grid = Grid::from_rows(&["O..", ".O.", "..O"]);
        let before = grid.clone();
        for &(x, y) in &[(-1, 0), (0, -1), (3, 0), (0, 3), (i32::MAX, i32::MAX), (i32::MIN, 1)] {
            grid.toggle(x, y);
        }
        assert_eq!(grid, before);
    }

    #[test]
    fn test_grid_clear() {
        let mut grid = Grid::from_rows(&["OOO", "OOO"]);
        assert_eq!(grid.population(), 6);
        grid.clear();
        assert_eq!(grid.population(), 0);
    }

    #[test]
    fn copy_from_duplicates_cells() {
        let src = Grid::from_rows(&[".O", "O."]);
        let mut dst = Grid::new(2, 2);
        dst.copy_from(&src);
        assert_eq!(dst, src);
    }
}
