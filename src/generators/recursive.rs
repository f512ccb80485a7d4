use log::{debug, trace};
use rand::prelude::*;

use crate::generators::{Frame, Generator, GeneratorKind, Step};
use crate::grids::{Cell, WallGrid};
use crate::random::shuffle_directions;

/// Depth-first recursive backtracker.
///
/// Batch runs recurse on the call stack, one level per cell on the current
/// path. Stepped runs keep the same frames on an explicit stack so they can
/// pause between direction attempts.
pub struct RecursiveBacktracker<R> {
    rng: R,
    start: Cell,
    stepping: bool,
    frames: Vec<Frame>,
    started: bool,
    carved: usize,
    done: bool,
}

impl<R: Rng> RecursiveBacktracker<R> {
    pub fn new(start: Cell, stepping: bool, rng: R) -> Self {
        Self {
            rng,
            start,
            stepping,
            frames: Vec::new(),
            started: false,
            carved: 0,
            done: false,
        }
    }

    fn carve_from(&mut self, grid: &mut WallGrid, cell: Cell) {
        for &direction in shuffle_directions(&mut self.rng).iter() {
            if let Some(next) = grid.carve_towards(cell, direction) {
                self.carved += 1;
                self.carve_from(grid, next);
            }
        }
    }

    fn finish(&mut self) {
        self.done = true;
        debug!(
            "recursive backtracker finished from {:?}, {} passages carved",
            self.start, self.carved
        );
    }
}

impl<R: Rng> Generator for RecursiveBacktracker<R> {
    fn step_generation(&mut self, grid: &mut WallGrid) -> Option<Step> {
        if self.done {
            return None;
        }

        if !self.started {
            self.started = true;
            debug!("recursive backtracker stepping from {:?}", self.start);
            let frame = Frame::new(self.start, &mut self.rng);
            self.frames.push(frame);
        }

        loop {
            let frame = match self.frames.last_mut() {
                Some(frame) => frame,
                None => {
                    self.finish();
                    return None;
                }
            };
            let cell = frame.cell;

            // an exhausted frame is a return to the caller
            let direction = match frame.next_direction() {
                Some(direction) => direction,
                None => {
                    self.frames.pop();
                    continue;
                }
            };

            let step = match grid.carve_towards(cell, direction) {
                Some(next) => {
                    self.carved += 1;
                    let frame = Frame::new(next, &mut self.rng);
                    self.frames.push(frame);
                    Step::Carved {
                        from: cell,
                        to: next,
                        direction,
                    }
                }
                None => Step::Blocked { cell, direction },
            };
            trace!("{:?}", step);

            return Some(step);
        }
    }

    fn generate_maze(&mut self, grid: &mut WallGrid) {
        if self.done {
            return;
        }

        if self.started {
            while self.step_generation(grid).is_some() {}
        } else {
            self.started = true;
            debug!("recursive backtracker carving from {:?}", self.start);
            let start = self.start;
            self.carve_from(grid, start);
            self.finish();
        }
    }

    fn is_done(&self) -> bool {
        self.done
    }

    fn is_stepping(&self) -> bool {
        self.stepping
    }

    fn kind(&self) -> GeneratorKind {
        GeneratorKind::RecursiveBacktracker
    }
}
