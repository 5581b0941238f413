//! Gaussian noise for the stochastic force
//!
//! The integrator only sees a [`NoiseSource`]. The production sampler is
//! [`BoxMuller`] on top of a `rand` generator; tests swap in a
//! [`SequenceSource`] to get bit-reproducible draws.

use crate::error::ConfigError;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::f64::consts::PI;

/// Uniform draws in `[0, 1)`
pub trait UniformSource {
    fn next_uniform(&mut self) -> f64;
}

/// Normal-distributed samples with a given mean and standard deviation
pub trait NoiseSource {
    fn sample(&mut self, mean: f64, std: f64) -> f64;
}

/// Adapts any `rand` generator into a [`UniformSource`]
#[derive(Debug, Clone)]
pub struct RandSource<R: Rng>(pub R);

impl<R: Rng> UniformSource for RandSource<R> {
    fn next_uniform(&mut self) -> f64 {
        // Standard f64 sampling is half-open: [0, 1)
        self.0.gen::<f64>()
    }
}

impl RandSource<StdRng> {
    /// Seeded generator when `seed` is given, otherwise seeded from OS entropy
    pub fn std(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self(StdRng::seed_from_u64(seed)),
            None => Self(StdRng::from_entropy()),
        }
    }
}

/// Replays a fixed list of uniform draws, cycling when exhausted
#[derive(Debug, Clone)]
pub struct SequenceSource {
    draws: Vec<f64>,
    cursor: usize,
    consumed: usize,
}

impl SequenceSource {
    pub fn new(draws: Vec<f64>) -> Result<Self, ConfigError> {
        if draws.is_empty() {
            return Err(ConfigError::EmptySequence);
        }
        if let Some(&bad) = draws.iter().find(|u| !(0.0..1.0).contains(*u)) {
            return Err(ConfigError::InvalidUniformDraw(bad));
        }
        Ok(Self {
            draws,
            cursor: 0,
            consumed: 0,
        })
    }

    /// Total number of draws handed out so far
    pub fn consumed(&self) -> usize {
        self.consumed
    }
}

impl UniformSource for SequenceSource {
    fn next_uniform(&mut self) -> f64 {
        let u = self.draws[self.cursor];
        self.cursor = (self.cursor + 1) % self.draws.len();
        self.consumed += 1;
        u
    }
}

/// Box-Muller sampler producing one cosine variate per call
///
/// Each call consumes two uniform draws `a, b` and returns
/// `sqrt(-2 ln(1 - a)) * cos(2 pi b) * std + mean`. The matching sine
/// variate is dropped.
///
/// A first draw of 1.0 or more (or NaN) would send `ln` to infinity. Such a
/// draw is floored to the smallest positive value, logged as a warning and
/// counted in [`BoxMuller::floored_draws`]; the resulting variate is about
/// 37.6 standard deviations out.
#[derive(Debug, Clone)]
pub struct BoxMuller<U: UniformSource> {
    source: U,
    floored: usize,
}

impl<U: UniformSource> BoxMuller<U> {
    pub fn new(source: U) -> Self {
        Self { source, floored: 0 }
    }

    pub fn source(&self) -> &U {
        &self.source
    }

    /// Number of out-of-range first draws that had to be floored
    pub fn floored_draws(&self) -> usize {
        self.floored
    }

    /// Standard normal variate
    pub fn standard(&mut self) -> f64 {
        // 1 - a maps [0, 1) onto (0, 1]
        let a = self.source.next_uniform();
        let mut u1 = 1.0 - a;
        if u1.is_nan() || u1 <= 0.0 {
            self.floored += 1;
            log::warn!(
                "uniform draw {} is outside [0, 1), flooring 1 - a to {:e}",
                a,
                f64::MIN_POSITIVE
            );
            u1 = f64::MIN_POSITIVE;
        }
        let u2 = self.source.next_uniform();
        (-2.0 * u1.ln()).sqrt() * (2.0 * PI * u2).cos()
    }
}

impl<U: UniformSource> NoiseSource for BoxMuller<U> {
    fn sample(&mut self, mean: f64, std: f64) -> f64 {
        self.standard() * std + mean
    }
}

/// Sampler used by the runtime
pub type DefaultSampler = BoxMuller<RandSource<StdRng>>;

impl DefaultSampler {
    pub fn from_seed(seed: Option<u64>) -> Self {
        Self::new(RandSource::std(seed))
    }
}
