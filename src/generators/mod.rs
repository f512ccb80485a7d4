pub mod iterative;
pub mod recursive;

use rand::Rng;

use crate::grids::{Cell, Direction, WallGrid};
use crate::random::shuffle_directions;

pub use iterative::IterativeBacktracker;
pub use recursive::RecursiveBacktracker;

/// Grids with at least this many cells are carved iteratively.
pub const RECURSION_THRESHOLD: usize = 5000;

/// A suspension point: one attempted direction from the current cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Carved {
        from: Cell,
        to: Cell,
        direction: Direction,
    },
    Blocked {
        cell: Cell,
        direction: Direction,
    },
}

pub trait Generator {
    /// Advances to the next suspension point, `None` once every direction of
    /// every visited cell has been tried.
    fn step_generation(&mut self, grid: &mut WallGrid) -> Option<Step>;
    /// Runs whatever is left of the traversal without pausing.
    fn generate_maze(&mut self, grid: &mut WallGrid);
    fn is_done(&self) -> bool;
    fn is_stepping(&self) -> bool;
    fn kind(&self) -> GeneratorKind;
}

impl<G: Generator + ?Sized> Generator for Box<G> {
    fn step_generation(&mut self, grid: &mut WallGrid) -> Option<Step> {
        (**self).step_generation(grid)
    }

    fn generate_maze(&mut self, grid: &mut WallGrid) {
        (**self).generate_maze(grid)
    }

    fn is_done(&self) -> bool {
        (**self).is_done()
    }

    fn is_stepping(&self) -> bool {
        (**self).is_stepping()
    }

    fn kind(&self) -> GeneratorKind {
        (**self).kind()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GeneratorKind {
    RecursiveBacktracker,
    IterativeBacktracker,
}

impl GeneratorKind {
    /// Recursion below `threshold` cells, the explicit frontier at or above it.
    pub fn for_cell_count(cells: usize, threshold: usize) -> Self {
        if cells < threshold {
            GeneratorKind::RecursiveBacktracker
        } else {
            GeneratorKind::IterativeBacktracker
        }
    }
}

pub fn new_generator<R: Rng + 'static>(
    kind: GeneratorKind,
    start: Cell,
    stepping: bool,
    rng: R,
) -> Box<dyn Generator> {
    match kind {
        GeneratorKind::RecursiveBacktracker => {
            Box::new(RecursiveBacktracker::new(start, stepping, rng))
        }
        GeneratorKind::IterativeBacktracker => {
            Box::new(IterativeBacktracker::new(start, stepping, rng))
        }
    }
}

/// A cell together with the directions it has yet to try.
#[derive(Debug, Clone)]
pub(crate) struct Frame {
    pub cell: Cell,
    directions: [Direction; 4],
    next: usize,
}

impl Frame {
    pub fn new<R: Rng>(cell: Cell, rng: &mut R) -> Self {
        Self {
            cell,
            directions: shuffle_directions(rng),
            next: 0,
        }
    }

    pub fn next_direction(&mut self) -> Option<Direction> {
        let direction = self.directions.get(self.next).copied()?;
        self.next += 1;
        Some(direction)
    }
}

/// Lazy carving run over a borrowed grid.
///
/// In stepping mode every `next` stops at one suspension point. Otherwise the
/// first `next` carves the whole maze and the sequence ends without yielding.
/// Dropping it early leaves the grid partially carved.
pub struct Carving<'g, G> {
    grid: &'g mut WallGrid,
    generator: G,
}

pub fn carve<G: Generator>(grid: &mut WallGrid, generator: G) -> Carving<'_, G> {
    Carving { grid, generator }
}

impl<G: Generator> Carving<'_, G> {
    pub fn grid(&self) -> &WallGrid {
        self.grid
    }

    pub fn is_done(&self) -> bool {
        self.generator.is_done()
    }
}

impl<G: Generator> Iterator for Carving<'_, G> {
    type Item = Step;

    fn next(&mut self) -> Option<Self::Item> {
        if self.generator.is_stepping() {
            self.generator.step_generation(self.grid)
        } else {
            self.generator.generate_maze(self.grid);
            None
        }
    }
}
