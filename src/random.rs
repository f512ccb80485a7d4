use rand::prelude::*;

use crate::grids::Direction;

/// All four directions in a uniformly random order.
///
/// `SliceRandom::shuffle` is a Fisher-Yates pass from the last index down,
/// swapping each slot with one drawn from `[0, i]`.
pub fn shuffle_directions<R: Rng>(rng: &mut R) -> [Direction; 4] {
    let mut directions = Direction::ALL;
    directions.shuffle(rng);
    directions
}

/// Uniform integer in `[min, max)`.
pub fn random_int<R: Rng>(rng: &mut R, min: usize, max: usize) -> usize {
    rng.gen_range(min, max)
}
