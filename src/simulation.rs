use crate::grid::Grid;

/// Conway's rule (B3/S23) as a pure function of a cell's previous state and
/// its live neighbor count.
pub fn next_state(was_alive: bool, live_neighbors: u32) -> bool {
    match (was_alive, live_neighbors) {
        (true, 2) | (true, 3) => true,
        (false, 3) => true,
        _ => false,
    }
}

/// Double-buffered Game of Life state.
///
/// `current` is the generation being edited and displayed. `previous` is the
/// snapshot taken at the start of each step; neighbor counts only ever read
/// from it, so every cell's fate depends on the prior generation alone.
#[derive(Debug, Clone)]
pub struct Simulation {
    current: Grid,
    previous: Grid,
    pub generation: u64,
}

impl Simulation {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            current: Grid::new(width, height),
            previous: Grid::new(width, height),
            generation: 0,
        }
    }

    /// Start from an existing grid (generation 0).
    #[cfg(test)]
    pub fn from_grid(grid: Grid) -> Self {
        let previous = Grid::new(grid.width(), grid.height());
        Self {
            current: grid,
            previous,
            generation: 0,
        }
    }

    pub fn current(&self) -> &Grid {
        &self.current
    }

    /// Mutable access to the generation being edited.
    pub fn current_mut(&mut self) -> &mut Grid {
        &mut self.current
    }

    #[cfg(test)]
    pub fn previous(&self) -> &Grid {
        &self.previous
    }

    pub fn width(&self) -> u32 {
        self.current.width()
    }

    pub fn height(&self) -> u32 {
        self.current.height()
    }

    /// Flip one cell of the current generation (cell space).
    pub fn toggle(&mut self, x: i32, y: i32) {
        self.current.toggle(x, y);
    }

    /// Kill every cell of the current generation and restart the counter.
    /// The previous snapshot is left alone until the next step.
    pub fn clear(&mut self) {
        self.current.clear();
        self.generation = 0;
    }

    /// Copy current → previous.
    pub fn snapshot(&mut self) {
        self.previous.copy_from(&self.current);
    }

    /// Live cells among the 8 neighbors of `(x, y)` in the previous
    /// generation. Neighbors off the edge count as dead.
    pub fn count_live_neighbors(&self, x: i32, y: i32) -> u32 {
        let mut count = 0;
        for dy in -1..=1 {
            for dx in -1..=1 {
                if dx == 0 && dy == 0 {
                    continue;
                }
                if self.previous.get(x + dx, y + dy) {
                    count += 1;
                }
            }
        }
        count
    }

    /// Advance the simulation by one generation.
    pub fn step(&mut self) {
        self.snapshot();

        let w = self.width() as i32;
        let h = self.height() as i32;
        for y in 0..h {
            for x in 0..w {
                let n = self.count_live_neighbors(x, y);
                let was_alive = self.previous.get(x, y);
                self.current.set(x, y, next_state(was_alive, n));
            }
        }

        self.generation += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sim(rows: &[&str]) -> Simulation {
        Simulation::from_grid(Grid::from_rows(rows))
    }

    #[test]
    fn rule_survival_and_death() {
        for n in 0..=8 {
            assert_eq!(next_state(true, n), n == 2 || n == 3, "live cell with {n}");
        }
    }

    #[test]
    fn rule_birth_only_at_three() {
        for n in 0..=8 {
            assert_eq!(next_state(false, n), n == 3, "dead cell with {n}");
        }
    }

    #[test]
    fn empty_grid_stays_empty() {
        let mut s = Simulation::new(5, 5);
        s.step();
        assert_eq!(s.current().population(), 0);
        assert_eq!(s.generation, 1);
    }

    #[test]
    fn isolated_cell_dies() {
        let mut s = sim(&[".....", ".....", "..O..", ".....", "....."]);
        s.step();
        assert_eq!(s.current().population(), 0);
    }

    #[test]
    fn pair_dies_with_one_neighbor_each() {
        let mut s = sim(&["....", ".OO.", "...."]);
        s.step();
        assert_eq!(s.current().population(), 0);
    }

    #[test]
    fn block_is_stable() {
        let rows = ["....", ".OO.", ".OO.", "...."];
        let mut s = sim(&rows);
        s.step();
        assert_eq!(s.current(), &Grid::from_rows(&rows));
    }

    #[test]
    fn blinker_has_period_two() {
        let vertical = [".....", "..O..", "..O..", "..O..", "....."];
        let horizontal = [".....", ".....", ".OOO.", ".....", "....."];
        let mut s = sim(&vertical);

        s.step();
        assert_eq!(s.current(), &Grid::from_rows(&horizontal));
        assert_ne!(s.current(), &Grid::from_rows(&vertical));

        s.step();
        assert_eq!(s.current(), &Grid::from_rows(&vertical));
        assert_eq!(s.generation, 2);
    }

    #[test]
    fn crowded_center_dies() {
        // Center has 4 live neighbors.
        let mut s = sim(&["O.O", ".O.", "O.O"]);
        s.step();
        assert!(!s.current().get(1, 1));
    }

    #[test]
    fn neighbor_counts_ignore_off_grid_cells() {
        let mut s = sim(&["OOO", "OOO", "OOO"]);
        s.snapshot();
        assert_eq!(s.count_live_neighbors(0, 0), 3);
        assert_eq!(s.count_live_neighbors(1, 0), 5);
        assert_eq!(s.count_live_neighbors(1, 1), 8);
        assert_eq!(s.count_live_neighbors(2, 2), 3);
    }

    #[test]
    fn edge_row_does_not_wrap() {
        // On a torus this would seed the bottom row; bounded it must not.
        let mut s = sim(&[".OOO.", ".....", ".....", ".....", "....."]);
        s.step();
        assert_eq!(s.current(), &Grid::from_rows(&["..O..", "..O..", ".....", ".....", "....."]));
    }

    #[test]
    fn neighbor_counts_read_previous_snapshot() {
        let mut s = sim(&["O..", "...", "..."]);
        s.snapshot();
        s.toggle(1, 1);
        s.toggle(2, 2);
        // Edits after the snapshot are invisible to the counter.
        assert_eq!(s.count_live_neighbors(1, 0), 1);
        assert_eq!(s.count_live_neighbors(1, 2), 0);
    }

    #[test]
    fn clear_keeps_previous_until_next_step() {
        let mut s = sim(&["OO", "OO"]);
        s.step();
        assert_eq!(s.previous().population(), 4);
        s.clear();
        assert_eq!(s.current().population(), 0);
        assert_eq!(s.previous().population(), 4);
        assert_eq!(s.generation, 0);
        s.step();
        assert_eq!(s.previous().population(), 0);
    }
}
