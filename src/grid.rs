use std::hash::{Hash, Hasher};

use metrohash::MetroHash64;

use crate::{error::GridError, pos, utils::NEIGHBOR_OFFSETS, Pos};

/// A fixed-size field of dead or alive cells. Cloning duplicates the storage.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Grid {
    rows: i32,
    cols: i32,
    cells: Vec<bool>,
}

impl Grid {
    /// Creates a grid with every cell dead.
    pub fn new(rows: i32, cols: i32) -> Result<Self, GridError> {
        if rows <= 0 || cols <= 0 {
            return Err(GridError::InvalidDimension { rows, cols });
        }
        let cells = vec![false; rows as usize * cols as usize];
        Ok(Self { rows, cols, cells })
    }

    pub fn rows(&self) -> i32 {
        self.rows
    }

    pub fn cols(&self) -> i32 {
        self.cols
    }

    pub fn dimensions(&self) -> (i32, i32) {
        (self.rows, self.cols)
    }

    pub fn contains(&self, Pos { row, col }: Pos) -> bool {
        (0..self.rows).contains(&row) && (0..self.cols).contains(&col)
    }

    fn index(&self, pos: Pos) -> Result<usize, GridError> {
        if !self.contains(pos) {
            return Err(GridError::OutOfBounds {
                pos,
                rows: self.rows,
                cols: self.cols,
            });
        }
        Ok(pos.row as usize * self.cols as usize + pos.col as usize)
    }

    pub fn get(&self, pos: Pos) -> Result<bool, GridError> {
        let index = self.index(pos)?;
        Ok(self.cells[index])
    }

    pub fn set(&mut self, pos: Pos, alive: bool) -> Result<(), GridError> {
        let index = self.index(pos)?;
        self.cells[index] = alive;
        Ok(())
    }

    pub fn clear(&mut self) {
        self.cells.fill(false);
    }

    /// Overwrites every cell with the one at the same position in `other`.
    pub fn copy_from(&mut self, other: &Grid) -> Result<(), GridError> {
        if self.dimensions() != other.dimensions() {
            return Err(GridError::DimensionMismatch {
                expected: self.dimensions(),
                found: other.dimensions(),
            });
        }
        self.cells.copy_from_slice(&other.cells);
        Ok(())
    }

    /// Counts the live cells around `pos`, ignoring positions that fall off
    /// the edges. The grid does not wrap.
    pub fn count_live_neighbors(&self, pos: Pos) -> Result<usize, GridError> {
        self.index(pos)?;
        let count = NEIGHBOR_OFFSETS
            .iter()
            .map(|&offset| pos + offset)
            .filter(|&neighbor| self.is_alive(neighbor))
            .count();
        Ok(count)
    }

    /// Like [`Grid::get`], but out of bounds positions read as dead.
    pub fn is_alive(&self, pos: Pos) -> bool {
        self.get(pos).unwrap_or(false)
    }

    /// Every in-bounds position, in row-major order.
    pub fn positions(&self) -> impl Iterator<Item = Pos> {
        let cols = self.cols;
        (0..self.rows).flat_map(move |row| (0..cols).map(move |col| pos!(row, col)))
    }

    /// Positions of the live cells, in row-major order.
    pub fn actives(&self) -> Vec<Pos> {
        self.positions().filter(|&pos| self.is_alive(pos)).collect()
    }

    pub fn population(&self) -> usize {
        self.cells.iter().filter(|&&alive| alive).count()
    }

    /// Hash of the dimensions and cell states, used to spot repeating
    /// generations.
    pub fn fingerprint(&self) -> u64 {
        let mut hasher = MetroHash64::new();
        self.hash(&mut hasher);
        hasher.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full(rows: i32, cols: i32) -> Grid {
        let mut grid = Grid::new(rows, cols).unwrap();
        for pos in grid.positions().collect::<Vec<_>>() {
            grid.set(pos, true).unwrap();
        }
        grid
    }

    #[test]
    fn test_new_is_dead() {
        let grid = Grid::new(3, 4).unwrap();
        assert_eq!(grid.dimensions(), (3, 4));
        assert_eq!(grid.population(), 0);
        assert!(grid.positions().all(|pos| grid.get(pos) == Ok(false)));
    }

    #[test]
    fn test_new_rejects_non_positive() {
        for (rows, cols) in [(0, 5), (5, 0), (-1, 5), (5, -3)] {
            assert_eq!(
                Grid::new(rows, cols),
                Err(GridError::InvalidDimension { rows, cols })
            );
        }
    }

    #[test]
    fn test_get_set() {
        let mut grid = Grid::new(5, 5).unwrap();
        grid.set(pos!(2, 3), true).unwrap();
        assert_eq!(grid.get(pos!(2, 3)), Ok(true));
        assert_eq!(grid.get(pos!(3, 2)), Ok(false));
        grid.set(pos!(2, 3), false).unwrap();
        assert_eq!(grid.population(), 0);
    }

    #[test]
    fn test_out_of_bounds() {
        let mut grid = Grid::new(4, 6).unwrap();
        for pos in [pos!(-1, 0), pos!(0, -1), pos!(4, 0), pos!(0, 6), pos!(10, 10)] {
            let expected = Err(GridError::OutOfBounds { pos, rows: 4, cols: 6 });
            assert_eq!(grid.get(pos), expected);
            assert_eq!(grid.set(pos, true).map(|_| false), expected);
            assert_eq!(grid.count_live_neighbors(pos).map(|_| false), expected);
        }
        assert_eq!(grid.population(), 0);
    }

    #[test]
    fn test_clear() {
        let mut grid = full(3, 3);
        grid.clear();
        assert_eq!(grid.population(), 0);
    }

    #[test]
    fn test_copy_from_is_independent() {
        let mut source = Grid::new(3, 3).unwrap();
        source.set(pos!(1, 1), true).unwrap();
        let mut target = Grid::new(3, 3).unwrap();
        target.copy_from(&source).unwrap();
        assert_eq!(target, source);

        source.set(pos!(0, 0), true).unwrap();
        assert_eq!(target.get(pos!(0, 0)), Ok(false));
    }

    #[test]
    fn test_copy_from_mismatch_leaves_target() {
        let mut target = Grid::new(3, 3).unwrap();
        target.set(pos!(2, 2), true).unwrap();
        let before = target.clone();
        let other = full(3, 4);
        assert_eq!(
            target.copy_from(&other),
            Err(GridError::DimensionMismatch {
                expected: (3, 3),
                found: (3, 4)
            })
        );
        assert_eq!(target, before);
    }

    #[test]
    fn test_neighbor_maxima() {
        let grid = full(5, 5);
        assert_eq!(grid.count_live_neighbors(pos!(0, 0)), Ok(3));
        assert_eq!(grid.count_live_neighbors(pos!(4, 4)), Ok(3));
        assert_eq!(grid.count_live_neighbors(pos!(0, 2)), Ok(5));
        assert_eq!(grid.count_live_neighbors(pos!(2, 4)), Ok(5));
        assert_eq!(grid.count_live_neighbors(pos!(2, 2)), Ok(8));
    }

    #[test]
    fn test_neighbors_skip_center() {
        let mut grid = Grid::new(3, 3).unwrap();
        grid.set(pos!(1, 1), true).unwrap();
        assert_eq!(grid.count_live_neighbors(pos!(1, 1)), Ok(0));
        assert_eq!(grid.count_live_neighbors(pos!(0, 0)), Ok(1));
    }

    #[test]
    fn test_no_wraparound() {
        let mut grid = Grid::new(4, 4).unwrap();
        grid.set(pos!(0, 3), true).unwrap();
        grid.set(pos!(3, 0), true).unwrap();
        grid.set(pos!(3, 3), true).unwrap();
        assert_eq!(grid.count_live_neighbors(pos!(0, 0)), Ok(0));
    }

    #[test]
    fn test_single_column() {
        let grid = full(4, 1);
        assert_eq!(grid.count_live_neighbors(pos!(0, 0)), Ok(1));
        assert_eq!(grid.count_live_neighbors(pos!(2, 0)), Ok(2));
    }

    #[test]
    fn test_actives_and_fingerprint() {
        let mut a = Grid::new(4, 4).unwrap();
        a.set(pos!(2, 1), true).unwrap();
        a.set(pos!(0, 3), true).unwrap();
        assert_eq!(a.actives(), vec![pos!(0, 3), pos!(2, 1)]);

        let b = a.clone();
        assert_eq!(a.fingerprint(), b.fingerprint());
        a.set(pos!(3, 3), true).unwrap();
        assert_ne!(a.fingerprint(), b.fingerprint());
        assert_ne!(
            Grid::new(2, 8).unwrap().fingerprint(),
            Grid::new(4, 4).unwrap().fingerprint()
        );
    }
}
