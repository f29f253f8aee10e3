use rand::Rng;
use std::fmt;
use crate::units::{ColumnIndex, RowIndex};

/// The state of one grid cell.
///
/// The carving walk turns `Filled` cells into `Empty` passages. Consumers place a wall block on every
/// `Empty` cell, see `layout::BlockLayout`.
#[derive(Hash, Eq, PartialEq, Copy, Clone, Debug)]
pub enum Brick {
    Empty,
    Filled,
}

impl Brick {
    #[inline]
    pub fn is_filled(self) -> bool {
        self == Brick::Filled
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self == Brick::Empty
    }
}

/// `x` is the column, `y` is the row. `(0, 0)` is the top left corner of the grid.
#[derive(Hash, Eq, PartialEq, Copy, Clone, Debug, Ord, PartialOrd)]
pub struct Cartesian2DCoordinate {
    pub x: u32,
    pub y: u32,
}

impl Cartesian2DCoordinate {
    pub fn new(x: u32, y: u32) -> Cartesian2DCoordinate {
        Cartesian2DCoordinate { x: x, y: y }
    }

    pub fn from_row_column_indices(col_index: ColumnIndex, row_index: RowIndex) -> Self {
        Cartesian2DCoordinate::new(col_index.0 as u32, row_index.0 as u32)
    }

    #[inline]
    pub fn row(&self) -> RowIndex {
        RowIndex(self.y as usize)
    }

    #[inline]
    pub fn column(&self) -> ColumnIndex {
        ColumnIndex(self.x as usize)
    }

    /// The coordinate `steps` cells away in `direction`.
    /// Returns None if the result would have a negative component or overflow.
    /// No grid bounds are considered here, the grid's accessors do that.
    pub fn offset(&self, direction: CompassPrimary, steps: u32) -> Option<Cartesian2DCoordinate> {
        let (x, y) = match direction {
            CompassPrimary::East => (self.x.checked_add(steps), Some(self.y)),
            CompassPrimary::West => (self.x.checked_sub(steps), Some(self.y)),
            CompassPrimary::South => (Some(self.x), self.y.checked_add(steps)),
            CompassPrimary::North => (Some(self.x), self.y.checked_sub(steps)),
        };
        match (x, y) {
            (Some(x), Some(y)) => Some(Cartesian2DCoordinate::new(x, y)),
            _ => None,
        }
    }
}

impl From<(u32, u32)> for Cartesian2DCoordinate {
    fn from(x_y_pair: (u32, u32)) -> Cartesian2DCoordinate {
        Cartesian2DCoordinate::new(x_y_pair.0, x_y_pair.1)
    }
}

impl fmt::Display for Cartesian2DCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Carving directions. The declaration order is the walk's round-robin order:
/// index 0 is East `(+1, 0)`, 1 West `(-1, 0)`, 2 South `(0, +1)` and 3 North `(0, -1)`.
#[derive(Eq, PartialEq, Copy, Clone, Debug, Hash)]
pub enum CompassPrimary {
    East,
    West,
    South,
    North,
}

pub const ALL_DIRECTIONS: [CompassPrimary; 4] = [CompassPrimary::East,
                                                 CompassPrimary::West,
                                                 CompassPrimary::South,
                                                 CompassPrimary::North];

impl CompassPrimary {
    /// Direction for an index in `[0, 4)`, wrapping larger values.
    #[inline]
    pub fn from_index(index: usize) -> CompassPrimary {
        ALL_DIRECTIONS[index % ALL_DIRECTIONS.len()]
    }

    #[inline]
    pub fn index(self) -> usize {
        match self {
            CompassPrimary::East => 0,
            CompassPrimary::West => 1,
            CompassPrimary::South => 2,
            CompassPrimary::North => 3,
        }
    }

    /// The next direction to try after this one is rejected: `(index + 1) mod 4`.
    #[inline]
    pub fn round_robin_next(self) -> CompassPrimary {
        CompassPrimary::from_index(self.index() + 1)
    }

    pub fn rand_direction<R: Rng>(rng: &mut R) -> CompassPrimary {
        CompassPrimary::from_index(rng.gen_range(0..ALL_DIRECTIONS.len()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_xorshift::XorShiftRng;

    #[test]
    fn round_robin_order() {
        let mut dir = CompassPrimary::East;
        let mut seen = vec![];
        for _ in 0..5 {
            seen.push(dir);
            dir = dir.round_robin_next();
        }
        assert_eq!(seen,
                   vec![CompassPrimary::East,
                        CompassPrimary::West,
                        CompassPrimary::South,
                        CompassPrimary::North,
                        CompassPrimary::East]);
    }

    #[test]
    fn direction_index_roundtrip() {
        for (i, dir) in ALL_DIRECTIONS.iter().enumerate() {
            assert_eq!(dir.index(), i);
            assert_eq!(CompassPrimary::from_index(i), *dir);
        }
        assert_eq!(CompassPrimary::from_index(6), CompassPrimary::South);
    }

    #[test]
    fn offsets() {
        let gc = |x, y| Cartesian2DCoordinate::new(x, y);
        let c = gc(2, 2);
        assert_eq!(c.offset(CompassPrimary::East, 1), Some(gc(3, 2)));
        assert_eq!(c.offset(CompassPrimary::West, 2), Some(gc(0, 2)));
        assert_eq!(c.offset(CompassPrimary::South, 2), Some(gc(2, 4)));
        assert_eq!(c.offset(CompassPrimary::North, 1), Some(gc(2, 1)));
        assert_eq!(c.offset(CompassPrimary::North, 3), None);
        assert_eq!(gc(0, 0).offset(CompassPrimary::West, 1), None);
        assert_eq!(gc(u32::MAX, 0).offset(CompassPrimary::East, 1), None);
    }

    #[test]
    fn random_directions_cover_all() {
        let mut rng = XorShiftRng::seed_from_u64(7);
        let mut hits = [0usize; 4];
        for _ in 0..1000 {
            hits[CompassPrimary::rand_direction(&mut rng).index()] += 1;
        }
        assert!(hits.iter().all(|&n| n > 0));
    }

    #[test]
    fn brick_predicates() {
        assert!(Brick::Filled.is_filled());
        assert!(!Brick::Filled.is_empty());
        assert!(Brick::Empty.is_empty());
    }
}
