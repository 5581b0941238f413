//! Statistical checks on the Box-Muller sampler

use langevin_core::rng::{DefaultSampler, NoiseSource};
use langevin_core::tests::test_helpers::mean_and_std;

#[test]
fn test_standard_normal_moments() {
    let mut sampler = DefaultSampler::from_seed(Some(2024));
    let draws: Vec<f64> = (0..100_000).map(|_| sampler.sample(0.0, 1.0)).collect();
    let (mean, std) = mean_and_std(&draws);
    assert!(mean.abs() < 0.02, "mean {}", mean);
    assert!((std - 1.0).abs() < 0.02, "std {}", std);
}

#[test]
fn test_mean_and_std_are_applied() {
    let mut sampler = DefaultSampler::from_seed(Some(7));
    let draws: Vec<f64> = (0..100_000).map(|_| sampler.sample(3.0, 0.5)).collect();
    let (mean, std) = mean_and_std(&draws);
    assert!((mean - 3.0).abs() < 0.01, "mean {}", mean);
    assert!((std - 0.5).abs() < 0.01, "std {}", std);
}

#[test]
fn test_tails_are_gaussian() {
    let mut sampler = DefaultSampler::from_seed(Some(99));
    let n = 100_000;
    let beyond_two = (0..n)
        .filter(|_| sampler.sample(0.0, 1.0).abs() > 2.0)
        .count() as f64
        / n as f64;
    // P(|z| > 2) = 0.0455
    assert!((beyond_two - 0.0455).abs() < 0.005, "tail mass {}", beyond_two);
}

#[test]
fn test_unseeded_samplers_differ() {
    let mut a = DefaultSampler::from_seed(None);
    let mut b = DefaultSampler::from_seed(None);
    let left: Vec<f64> = (0..8).map(|_| a.sample(0.0, 1.0)).collect();
    let right: Vec<f64> = (0..8).map(|_| b.sample(0.0, 1.0)).collect();
    assert_ne!(left, right);
}
