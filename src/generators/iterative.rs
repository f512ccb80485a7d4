use std::collections::VecDeque;

use log::{debug, trace};
use rand::prelude::*;

use crate::generators::{Frame, Generator, GeneratorKind, Step};
use crate::grids::{Cell, WallGrid};

/// Backtracker driven by an explicit frontier instead of the call stack.
///
/// New cells go on the front of the frontier and are explored before anything
/// behind them, so the front entry always plays the role of the innermost
/// recursive call. Memory grows with the length of the current path.
pub struct IterativeBacktracker<R> {
    rng: R,
    start: Cell,
    stepping: bool,
    frontier: VecDeque<Frame>,
    started: bool,
    deepest: usize,
    done: bool,
}

impl<R: Rng> IterativeBacktracker<R> {
    pub fn new(start: Cell, stepping: bool, rng: R) -> Self {
        Self {
            rng,
            start,
            stepping,
            frontier: VecDeque::new(),
            started: false,
            deepest: 0,
            done: false,
        }
    }

    fn push_front(&mut self, cell: Cell) {
        let frame = Frame::new(cell, &mut self.rng);
        self.frontier.push_front(frame);
        self.deepest = self.deepest.max(self.frontier.len());
    }
}

impl<R: Rng> Generator for IterativeBacktracker<R> {
    fn step_generation(&mut self, grid: &mut WallGrid) -> Option<Step> {
        if self.done {
            return None;
        }

        if !self.started {
            self.started = true;
            debug!("iterative backtracker starting from {:?}", self.start);
            let start = self.start;
            self.push_front(start);
        }

        let (cell, direction) = loop {
            let front = self.frontier.front_mut()?;
            match front.next_direction() {
                Some(direction) => break (front.cell, direction),
                None => {
                    // backtrack
                    self.frontier.pop_front();
                    if self.frontier.is_empty() {
                        self.done = true;
                        debug!(
                            "iterative backtracker finished, frontier peaked at {} cells",
                            self.deepest
                        );
                        return None;
                    }
                }
            }
        };

        let step = match grid.carve_towards(cell, direction) {
            Some(next) => {
                self.push_front(next);
                Step::Carved {
                    from: cell,
                    to: next,
                    direction,
                }
            }
            None => Step::Blocked { cell, direction },
        };
        trace!("{:?}", step);

        Some(step)
    }

    fn generate_maze(&mut self, grid: &mut WallGrid) {
        while self.step_generation(grid).is_some() {}
    }

    fn is_done(&self) -> bool {
        self.done
    }

    fn is_stepping(&self) -> bool {
        self.stepping
    }

    fn kind(&self) -> GeneratorKind {
        GeneratorKind::IterativeBacktracker
    }
}
