//! Reproducible uniform deviates (Pike and Hill, 1965).

use std::fmt;

const MULTIPLIER: i64 = 125;
const MODULUS: i64 = 2_796_203;

pub const DEFAULT_SEED: u32 = 100_001;

/// Multiplicative congruential generator `iy <- 125 * iy mod 2796203`.
///
/// The modulus is prime and every accepted seed is nonzero modulo it, so
/// the state never reaches zero and each deviate lies strictly inside
/// (0, 1). The period is 2796202.
///
/// # Examples
///
/// ```
/// # use elefunt::random::RandomSource;
/// #
/// let mut rng = RandomSource::new();
/// let first = rng.draw();
///
/// assert!(0.0 < first && first < 1.0);
///
/// rng.reset();
/// assert_eq!(rng.draw(), first);
/// ```
#[derive(Clone, Debug)]
pub struct RandomSource {
    iy: i64,
}

impl RandomSource {
    pub fn new() -> RandomSource {
        RandomSource {
            iy: i64::from(DEFAULT_SEED),
        }
    }

    pub fn with_seed(seed: u32) -> Result<RandomSource, SeedError> {
        let mut rng = RandomSource::new();

        rng.reseed(seed)?;

        Ok(rng)
    }

    /// Restarts the sequence from `seed`.
    pub fn reseed(&mut self, seed: u32) -> Result<(), SeedError> {
        let seed = i64::from(seed);

        if seed % MODULUS == 0 {
            return Err(SeedError(seed));
        }

        self.iy = seed;

        Ok(())
    }

    /// Restarts the sequence from [`DEFAULT_SEED`].
    pub fn reset(&mut self) {
        self.iy = i64::from(DEFAULT_SEED);
    }

    /// Advances the generator and returns the next deviate.
    pub fn draw(&mut self) -> f64 {
        self.iy = (self.iy * MULTIPLIER) % MODULUS;

        self.iy as f64 / MODULUS as f64
    }
}

impl Default for RandomSource {
    fn default() -> Self {
        RandomSource::new()
    }
}

/// A seed that would pin the generator at zero.
#[derive(Debug)]
pub struct SeedError(i64);

impl fmt::Display for SeedError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "seed {} is a multiple of the modulus {MODULUS}", self.0)
    }
}

impl std::error::Error for SeedError {}
