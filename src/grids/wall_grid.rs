use std::fmt;

use crate::grids::{is_open, Dimensions, Direction, WalledCell};

pub type Cell = (usize, usize);

/// Row-major grid of wall masks, addressed by (x, y) where x is the column.
#[derive(Debug, Clone, PartialEq)]
pub struct WallGrid {
    pub dims: Dimensions,

    pub cells: Vec<WalledCell>,
}

impl WallGrid {
    /// Every cell starts at 0: unvisited with all four walls standing.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            cells: vec![0; width * height],
            dims: Dimensions {
                rows: height,
                columns: width,
            },
        }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.dims.columns
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.dims.rows
    }

    #[inline]
    fn index_of(&self, x: usize, y: usize) -> usize {
        (self.dims.columns * y) + x
    }

    #[inline]
    pub fn get_cell(&self, x: usize, y: usize) -> WalledCell {
        self.cells[self.index_of(x, y)]
    }

    #[inline]
    pub fn is_visited(&self, x: usize, y: usize) -> bool {
        self.get_cell(x, y) != 0
    }

    #[inline]
    pub fn is_open(&self, x: usize, y: usize, direction: Direction) -> bool {
        is_open(self.get_cell(x, y), direction)
    }

    /// Coordinates one step from `cell`, or `None` when that leaves the grid.
    pub fn neighbor_of(&self, cell: Cell, direction: Direction) -> Option<Cell> {
        let (dx, dy) = direction.displacement();
        let nx = cell.0 as isize + dx;
        let ny = cell.1 as isize + dy;

        if nx < 0 || ny < 0 {
            return None;
        }

        let (nx, ny) = (nx as usize, ny as usize);
        if nx < self.dims.columns && ny < self.dims.rows {
            Some((nx, ny))
        } else {
            None
        }
    }

    /// Opens the wall between `cell` and its neighbor in `direction` if that
    /// neighbor exists and is unvisited. Both sides are set together.
    pub fn carve_towards(&mut self, cell: Cell, direction: Direction) -> Option<Cell> {
        let next = self.neighbor_of(cell, direction)?;
        if self.is_visited(next.0, next.1) {
            return None;
        }

        let here = self.index_of(cell.0, cell.1);
        let there = self.index_of(next.0, next.1);
        self.cells[here] |= direction.bit();
        self.cells[there] |= (-direction).bit();

        Some(next)
    }

    /// Number of open passages; each is recorded once on either side.
    pub fn edge_count(&self) -> usize {
        let bits: u32 = self.cells.iter().map(|cell| cell.count_ones()).sum();
        bits as usize / 2
    }

    pub fn clear(&mut self) {
        for cell in self.cells.iter_mut() {
            *cell = 0;
        }
    }
}

/// Plain text picture with north at the top. Unvisited cells are shaded.
impl fmt::Display for WallGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.cells.is_empty() {
            return Ok(());
        }

        let top = self.dims.rows - 1;
        for x in 0..self.dims.columns {
            let wall = if self.is_open(x, top, Direction::North) {
                "  "
            } else {
                "--"
            };
            write!(f, "+{}", wall)?;
        }
        writeln!(f, "+")?;

        for y in (0..self.dims.rows).rev() {
            let west = if self.is_open(0, y, Direction::West) {
                ' '
            } else {
                '|'
            };
            write!(f, "{}", west)?;
            for x in 0..self.dims.columns {
                let fill = if self.is_visited(x, y) { "  " } else { "##" };
                let east = if self.is_open(x, y, Direction::East) {
                    ' '
                } else {
                    '|'
                };
                write!(f, "{}{}", fill, east)?;
            }
            writeln!(f)?;

            for x in 0..self.dims.columns {
                let wall = if self.is_open(x, y, Direction::South) {
                    "  "
                } else {
                    "--"
                };
                write!(f, "+{}", wall)?;
            }
            writeln!(f, "+")?;
        }

        Ok(())
    }
}
