//! Ensemble behaviour under thermal noise

use langevin_core::config::ForceConfig;
use langevin_core::integrator::LangevinIntegrator;
use langevin_core::potential::Potential;
use langevin_core::rng::DefaultSampler;
use langevin_core::state::State;
use langevin_core::tests::test_helpers::{mean_and_std, seeded_integrator};

/// No external force at all
struct Free;

impl Potential for Free {
    fn potential(&self, _x: f64) -> f64 {
        0.0
    }
}

fn noise_only() -> ForceConfig {
    ForceConfig {
        friction_enabled: false,
        noise_enabled: true,
        ..ForceConfig::default()
    }
}

fn ensemble_positions(steps: usize, runs: usize, seed: u64) -> Vec<f64> {
    let mut integrator =
        LangevinIntegrator::new(Free, noise_only(), DefaultSampler::from_seed(Some(seed)))
            .unwrap();
    (0..runs)
        .map(|_| {
            integrator
                .advance(State::new(0.0, 0.0), steps)
                .unwrap()
                .position
        })
        .collect()
}

#[test]
fn test_ensemble_mean_does_not_drift() {
    let positions = ensemble_positions(200, 2000, 5);
    let (mean, std) = mean_and_std(&positions);
    // Standard error of the mean is about 0.025 here
    assert!(mean.abs() < 0.15, "ensemble mean {} (std {})", mean, std);
}

#[test]
fn test_ensemble_variance_grows_with_steps() {
    let (_, early) = mean_and_std(&ensemble_positions(50, 2000, 6));
    let (_, late) = mean_and_std(&ensemble_positions(200, 2000, 6));
    assert!(late > 2.0 * early, "std after 50 steps {}, after 200 {}", early, late);
}

#[test]
fn test_velocity_variance_matches_scheme() {
    // Each step adds two independent kicks of sigma * dt / 2 to v
    let config = noise_only();
    let steps = 200;
    let mut integrator =
        LangevinIntegrator::new(Free, config, DefaultSampler::from_seed(Some(8))).unwrap();
    let velocities: Vec<f64> = (0..2000)
        .map(|_| {
            integrator
                .advance(State::new(0.0, 0.0), steps)
                .unwrap()
                .velocity
        })
        .collect();
    let (_, std) = mean_and_std(&velocities);
    let kick = config.sigma * config.dt / 2.0;
    let expected = (2.0 * steps as f64).sqrt() * kick;
    assert!((std - expected).abs() < 0.1 * expected, "std {} vs {}", std, expected);
}

#[test]
fn test_noise_keeps_particle_moving_in_well() {
    let forces = ForceConfig {
        friction_enabled: true,
        noise_enabled: true,
        ..ForceConfig::default()
    };
    let mut integrator = seeded_integrator(forces, 13);
    let mut state = State::new(-0.5, 0.5);
    let mut speeds = Vec::new();
    for _ in 0..4000 {
        state = integrator.step(state).unwrap();
        speeds.push(state.velocity.abs());
    }
    let late_mean_speed = speeds[2000..].iter().sum::<f64>() / 2000.0;
    // Friction alone would bring it to rest; the noise keeps it agitated
    assert!(late_mean_speed > 0.05, "mean speed {}", late_mean_speed);
    assert!(state.position.abs() < 3.0);
}
