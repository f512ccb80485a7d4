pub mod wall_grid;

pub use wall_grid::{Cell, WallGrid};

/// Each cell is a mask of open walls, one bit per `Direction`. Zero means the
/// cell is unvisited and fully walled in.
pub type WalledCell = u8;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Dimensions {
    pub rows: usize,
    pub columns: usize,
}

impl Dimensions {
    pub fn cell_count(&self) -> usize {
        self.rows * self.columns
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    North = 1,
    East = 2,
    South = 4,
    West = 8,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];

    #[inline]
    pub fn bit(self) -> WalledCell {
        self as WalledCell
    }

    /// Unit step as (dx, dy). North points towards increasing rows.
    #[inline]
    pub fn displacement(self) -> (isize, isize) {
        match self {
            Direction::North => (0, 1),
            Direction::East => (1, 0),
            Direction::South => (0, -1),
            Direction::West => (-1, 0),
        }
    }
}

impl std::ops::Neg for Direction {
    type Output = Direction;

    fn neg(self) -> Self::Output {
        match self {
            Direction::North => Direction::South,
            Direction::South => Direction::North,
            Direction::East => Direction::West,
            Direction::West => Direction::East,
        }
    }
}

#[inline(always)]
pub fn is_open(cell: WalledCell, direction: Direction) -> bool {
    cell & direction.bit() != 0
}
