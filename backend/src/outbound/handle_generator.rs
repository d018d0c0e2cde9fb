//! Random candidate handles.

use std::sync::Mutex;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::domain::ports::HandleGenerator;
use crate::domain::{HANDLE_SPACE, Handle};

fn draw<R: Rng + ?Sized>(rng: &mut R) -> Handle {
    let index = rng.gen_range(0..HANDLE_SPACE);
    // `gen_range` never leaves the half-open range.
    Handle::from_index(index).unwrap_or_else(|_| unreachable!("index below HANDLE_SPACE"))
}

/// Uniform candidates from the thread-local, OS-seeded generator.
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadRngHandleGenerator;

impl HandleGenerator for ThreadRngHandleGenerator {
    fn next_candidate(&self) -> Handle {
        draw(&mut rand::thread_rng())
    }
}

/// Reproducible candidates from a fixed seed.
#[derive(Debug)]
pub struct SeededHandleGenerator {
    rng: Mutex<SmallRng>,
}

impl SeededHandleGenerator {
    /// Generator whose sequence is fully determined by `seed`.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(SmallRng::seed_from_u64(seed)),
        }
    }
}

impl HandleGenerator for SeededHandleGenerator {
    fn next_candidate(&self) -> Handle {
        match self.rng.lock() {
            Ok(mut rng) => draw(&mut *rng),
            Err(poisoned) => draw(&mut *poisoned.into_inner()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn thread_rng_candidates_are_well_formed() {
        let generator = ThreadRngHandleGenerator;
        for _ in 0..1_000 {
            let candidate = generator.next_candidate();
            assert_eq!(candidate.as_str().len(), 8);
            assert!(candidate.as_str().bytes().all(|byte| byte.is_ascii_digit()));
        }
    }

    #[rstest]
    fn equal_seeds_give_equal_sequences() {
        let left = SeededHandleGenerator::new(7);
        let right = SeededHandleGenerator::new(7);
        let left: Vec<_> = (0..16).map(|_| left.next_candidate()).collect();
        let right: Vec<_> = (0..16).map(|_| right.next_candidate()).collect();
        assert_eq!(left, right);
    }

    #[rstest]
    fn candidates_spread_across_the_space() {
        let generator = SeededHandleGenerator::new(42);
        let leading: std::collections::HashSet<u8> = (0..500)
            .map(|_| generator.next_candidate().as_str().as_bytes()[0])
            .collect();
        assert_eq!(leading.len(), 10, "every leading digit should appear");
    }
}
