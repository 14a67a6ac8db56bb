use std::{
    fmt,
    ops::{Add, Sub},
};

/// A `(row, col)` coordinate. Signed so that positions left of or above the
/// grid can be expressed and rejected.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy, Default)]
pub struct Pos {
    pub row: i32,
    pub col: i32,
}

#[macro_export]
macro_rules! pos {
    ($row:expr, $col:expr) => {
        $crate::Pos {
            row: $row,
            col: $col,
        }
    };
}

impl Add for Pos {
    type Output = Self;
    fn add(self, rhs: Self) -> Self::Output {
        pos!(self.row + rhs.row, self.col + rhs.col)
    }
}

impl Sub for Pos {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self::Output {
        pos!(self.row - rhs.row, self.col - rhs.col)
    }
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Offsets of the 8 cells surrounding a position.
pub const NEIGHBOR_OFFSETS: [Pos; 8] = [
    pos!(-1, -1),
    pos!(-1, 0),
    pos!(-1, 1),
    pos!(0, -1),
    pos!(0, 1),
    pos!(1, -1),
    pos!(1, 0),
    pos!(1, 1),
];

#[test]
fn test_pos_arith() {
    assert_eq!(pos!(1, 2) + pos!(-1, 3), pos!(0, 5));
    assert_eq!(pos!(1, 2) - pos!(2, 2), pos!(-1, 0));
    assert!(!NEIGHBOR_OFFSETS.contains(&pos!(0, 0)));
}
