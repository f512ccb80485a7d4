use std::time::{Duration, Instant};

use anyhow::{ensure, Result};
use log::{debug, info};
use rand::prelude::*;

use crate::generators::{new_generator, Generator, GeneratorKind, RECURSION_THRESHOLD};
use crate::grids::{Cell, WallGrid};
use crate::random::random_int;

pub const DEFAULT_DIMS: (usize, usize) = (16, 16);

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub width: usize,
    pub height: usize,
    pub recursion_threshold: usize,
    /// Fixed seed for reproducible runs, entropy when unset.
    pub seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            width: DEFAULT_DIMS.0,
            height: DEFAULT_DIMS.1,
            recursion_threshold: RECURSION_THRESHOLD,
            seed: None,
        }
    }
}

/// Everything one driver needs between generations: the grid, the stepping
/// generator in flight and the random source that feeds new carvers.
pub struct Session {
    config: Config,
    grid: WallGrid,
    rng: StdRng,
    generator: Option<Box<dyn Generator>>,
    steps_taken: usize,
    last_generation_time: Option<Duration>,
}

fn validate_dims(width: usize, height: usize) -> Result<()> {
    ensure!(width >= 1, "maze width must be at least 1, got {}", width);
    ensure!(height >= 1, "maze height must be at least 1, got {}", height);
    Ok(())
}

impl Config {
    pub fn validate(&self) -> Result<()> {
        validate_dims(self.width, self.height)?;
        ensure!(
            self.recursion_threshold >= 1,
            "recursion threshold must be at least 1"
        );
        Ok(())
    }
}

impl Session {
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;

        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Ok(Self {
            grid: WallGrid::new(config.width, config.height),
            config,
            rng,
            generator: None,
            steps_taken: 0,
            last_generation_time: None,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn grid(&self) -> &WallGrid {
        &self.grid
    }

    /// True while a stepped generation has suspension points left.
    pub fn is_generating(&self) -> bool {
        self.generator.is_some()
    }

    pub fn steps_taken(&self) -> usize {
        self.steps_taken
    }

    /// Time spent carving the latest maze. For a stepped run this is the sum
    /// over every step so far, restarting when a new maze begins.
    pub fn last_generation_time(&self) -> Option<Duration> {
        self.last_generation_time
    }

    pub fn generator_kind(&self) -> GeneratorKind {
        GeneratorKind::for_cell_count(
            self.grid.dims.cell_count(),
            self.config.recursion_threshold,
        )
    }

    /// Changes the grid size. Any stepped generation in flight is dropped.
    pub fn resize(&mut self, width: usize, height: usize) -> Result<()> {
        validate_dims(width, height)?;
        self.config.width = width;
        self.config.height = height;
        self.generator = None;
        self.steps_taken = 0;
        self.grid = WallGrid::new(width, height);
        debug!("session resized to {}x{}", width, height);
        Ok(())
    }

    fn start_generator(&mut self, stepping: bool) -> Box<dyn Generator> {
        self.grid.clear();
        self.steps_taken = 0;

        let start: Cell = (
            random_int(&mut self.rng, 0, self.config.width),
            random_int(&mut self.rng, 0, self.config.height),
        );
        let kind = self.generator_kind();
        let carver_rng = StdRng::seed_from_u64(self.rng.gen());
        debug!("{:?} starting at {:?}, stepping: {}", kind, start, stepping);

        new_generator(kind, start, stepping, carver_rng)
    }

    /// Carves a fresh maze in one go, abandoning any stepped run.
    pub fn generate(&mut self) -> &WallGrid {
        let started = Instant::now();

        self.generator = None;
        let mut generator = self.start_generator(false);
        generator.generate_maze(&mut self.grid);

        let elapsed = started.elapsed();
        self.last_generation_time = Some(elapsed);
        info!(
            "generated {}x{} maze with {:?} in {:?}",
            self.config.width,
            self.config.height,
            generator.kind(),
            elapsed
        );

        &self.grid
    }

    /// Advances the stepped generation, starting a new maze when none is in
    /// flight. Returns whether more steps remain.
    pub fn step(&mut self) -> bool {
        let started = Instant::now();

        let more = match self.generator.as_mut() {
            None => {
                self.last_generation_time = None;
                self.generator = Some(self.start_generator(true));
                true
            }
            Some(generator) => match generator.step_generation(&mut self.grid) {
                Some(_) => {
                    self.steps_taken += 1;
                    true
                }
                None => {
                    info!(
                        "stepped {}x{} maze finished after {} steps, {:?} carving",
                        self.config.width,
                        self.config.height,
                        self.steps_taken,
                        self.last_generation_time.unwrap_or_default()
                    );
                    self.generator = None;
                    false
                }
            },
        };

        let spent = self.last_generation_time.unwrap_or_default();
        self.last_generation_time = Some(spent + started.elapsed());
        more
    }
}

#[cfg(test)]
mod test_session {
    use super::*;
    use crate::generators::test_support::assert_perfect;

    fn seeded(width: usize, height: usize, seed: u64) -> Session {
        Session::new(Config {
            width,
            height,
            seed: Some(seed),
            ..Config::default()
        })
        .unwrap()
    }

    #[test]
    fn rejects_empty_grids() {
        assert!(Session::new(Config {
            width: 0,
            ..Config::default()
        })
        .is_err());
        assert!(Session::new(Config {
            height: 0,
            ..Config::default()
        })
        .is_err());
        assert!(Session::new(Config {
            recursion_threshold: 0,
            ..Config::default()
        })
        .is_err());

        let mut session = Session::new(Config::default()).unwrap();
        assert!(session.resize(3, 0).is_err());
        assert_eq!(session.grid().width(), DEFAULT_DIMS.0);
    }

    #[test]
    fn generate_carves_a_perfect_maze() {
        let mut session = seeded(20, 12, 1);
        assert_perfect(session.generate());
        assert!(session.last_generation_time().is_some());
        assert!(!session.is_generating());
    }

    #[test]
    fn generate_starts_from_scratch() {
        let mut session = seeded(10, 10, 2);
        let first = session.generate().clone();
        let second = session.generate().clone();
        assert_perfect(&first);
        assert_perfect(&second);
    }

    #[test]
    fn same_seed_same_maze() {
        let mut one = seeded(15, 15, 33);
        let mut two = seeded(15, 15, 33);
        assert_eq!(one.generate(), two.generate());
    }

    #[test]
    fn threshold_selects_strategy() {
        let mut session = seeded(70, 70, 0);
        assert_eq!(
            session.generator_kind(),
            GeneratorKind::RecursiveBacktracker
        );

        session.resize(50, 100).unwrap();
        assert_eq!(
            session.generator_kind(),
            GeneratorKind::IterativeBacktracker
        );

        let session = Session::new(Config {
            width: 4,
            height: 4,
            recursion_threshold: 16,
            seed: Some(0),
        })
        .unwrap();
        assert_eq!(
            session.generator_kind(),
            GeneratorKind::IterativeBacktracker
        );
    }

    #[test]
    fn large_mazes_use_the_frontier() {
        let mut session = seeded(100, 80, 5);
        assert_perfect(session.generate());
    }

    #[test]
    fn stepping_runs_to_completion_then_restarts() {
        let mut session = seeded(4, 3, 9);

        // first press only sets up
        assert!(session.step());
        assert!(session.is_generating());
        assert_eq!(session.grid().edge_count(), 0);

        let mut presses = 0;
        while session.step() {
            presses += 1;
        }
        assert_eq!(presses, 4 * 4 * 3);
        assert_eq!(session.steps_taken(), 4 * 4 * 3);
        assert!(!session.is_generating());
        assert_perfect(session.grid());

        assert!(session.step());
        assert!(session.is_generating());
        assert_eq!(session.grid().edge_count(), 0);
    }

    #[test]
    fn stepped_and_batch_agree_under_seed() {
        let mut batch = seeded(9, 7, 17);
        let expected = batch.generate().clone();

        let mut stepped = seeded(9, 7, 17);
        while stepped.step() {}
        assert_eq!(stepped.grid(), &expected);
    }

    #[test]
    fn stepping_time_accumulates_over_the_run() {
        let mut session = seeded(5, 5, 6);
        assert_eq!(session.last_generation_time(), None);

        let mut previous = Duration::default();
        while session.step() {
            let total = session.last_generation_time().unwrap();
            assert!(total >= previous);
            previous = total;
        }
        let finished = session.last_generation_time().unwrap();
        assert!(finished >= previous);

        // a new maze starts its own total
        let before = Instant::now();
        assert!(session.step());
        assert!(session.last_generation_time().unwrap() <= before.elapsed());
    }

    #[test]
    fn config_validation() {
        assert!(Config::default().validate().is_ok());
        assert!(Config {
            width: 0,
            ..Config::default()
        }
        .validate()
        .is_err());
        assert!(Config {
            recursion_threshold: 0,
            ..Config::default()
        }
        .validate()
        .is_err());
    }

    #[test]
    fn resize_abandons_stepping() {
        let mut session = seeded(6, 6, 4);
        session.step();
        session.step();
        session.step();
        session.resize(3, 2).unwrap();

        assert!(!session.is_generating());
        assert_eq!(session.grid(), &WallGrid::new(3, 2));
        assert_eq!(session.steps_taken(), 0);
    }
}
