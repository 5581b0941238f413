//! Test helper utilities for the Langevin engine tests

use crate::config::{ForceConfig, PotentialParams, SimulationConfig};
use crate::integrator::LangevinIntegrator;
use crate::potential::DoubleWellPotential;
use crate::rng::{BoxMuller, DefaultSampler, SequenceSource};
use crate::runtime::SimulationResult;
use crate::state::State;

/// Check if two floating point values are approximately equal within tolerance
pub fn approx_eq(a: f64, b: f64, tol: f64) -> bool {
    (a - b).abs() <= tol
}

/// Sample mean and (population) standard deviation
pub fn mean_and_std(values: &[f64]) -> (f64, f64) {
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let var = values.iter().map(|v| (v - mean) * (v - mean)).sum::<f64>() / n;
    (mean, var.sqrt())
}

/// Double well with g = 1, delta = 0.5
pub fn reference_potential() -> DoubleWellPotential {
    DoubleWellPotential::new(PotentialParams { g: 1.0, delta: 0.5 })
        .expect("reference potential is valid")
}

/// Integrator over the reference potential driven by a fixed uniform sequence
pub fn replay_integrator(
    forces: ForceConfig,
    draws: &[f64],
) -> LangevinIntegrator<DoubleWellPotential, BoxMuller<SequenceSource>> {
    let source = SequenceSource::new(draws.to_vec()).expect("draws are in [0, 1)");
    LangevinIntegrator::new(reference_potential(), forces, BoxMuller::new(source))
        .expect("forces are valid")
}

/// Integrator over the reference potential with a seeded generator
pub fn seeded_integrator(
    forces: ForceConfig,
    seed: u64,
) -> LangevinIntegrator<DoubleWellPotential, DefaultSampler> {
    LangevinIntegrator::new(
        reference_potential(),
        forces,
        DefaultSampler::from_seed(Some(seed)),
    )
    .expect("forces are valid")
}

/// Collect `steps` states after `start`, stopping at the first fault
pub fn trajectory<P, N>(
    integrator: &mut LangevinIntegrator<P, N>,
    start: State,
    steps: usize,
) -> Vec<State>
where
    P: crate::potential::Potential,
    N: crate::rng::NoiseSource,
{
    let mut states = Vec::with_capacity(steps);
    let mut state = start;
    for _ in 0..steps {
        state = integrator.step(state).expect("step stays finite");
        states.push(state);
    }
    states
}

/// Scenario with a fixed seed, otherwise default parameters
pub fn seeded_config(steps: usize, seed: u64) -> SimulationConfig {
    SimulationConfig {
        steps,
        seed: Some(seed),
        ..SimulationConfig::default()
    }
}

/// True when both runs ended in bit-identical states
pub fn results_bit_equal(a: &SimulationResult, b: &SimulationResult) -> bool {
    a.steps == b.steps
        && a.final_state.position.to_bits() == b.final_state.position.to_bits()
        && a.final_state.velocity.to_bits() == b.final_state.velocity.to_bits()
}
