//! The random draw provider.
//!
//! Each selector instance owns one [`DrawSource`]: a seedable uniform
//! stream that advances by exactly one draw per probabilistic
//! evaluation and not at all otherwise. Explicit seeding makes
//! selection reproducible in tests; entropy seeding is the default for
//! production instances. Concurrent use of one source must be
//! serialized externally (the `&mut self` draw method enforces
//! single-writer access within safe Rust).

use rand::rngs::StdRng;
use rand::Rng;
use rand::SeedableRng;

/// A reproducible stream of uniform draws in `[0, 1)`.
#[derive(Debug, Clone)]
pub struct DrawSource {
    rng: StdRng,
}

impl DrawSource {
    /// A stream with a fixed seed (reproducible).
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// A stream seeded from process-wide entropy.
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }

    /// Next uniform draw in `[0, 1)`.
    ///
    /// Advances the stream state by exactly one draw per call.
    pub fn next_draw(&mut self) -> f64 {
        self.rng.random()
    }
}
