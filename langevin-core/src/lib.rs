pub mod config;
pub mod diagnostics;
pub mod error;
pub mod integrator;
pub mod potential;
pub mod rng;
pub mod runtime;
pub mod state;

pub use config::{ForceConfig, PotentialParams, SimulationConfig};
pub use diagnostics::{analyze_config, Diagnostic, DiagnosticSeverity, Diagnostics};
pub use error::{ConfigError, Error, NumericError};
pub use integrator::LangevinIntegrator;
pub use potential::{DerivativeScheme, DoubleWellPotential, Potential};
pub use rng::{BoxMuller, DefaultSampler, NoiseSource, RandSource, SequenceSource, UniformSource};
pub use runtime::{
    build_simulation_context, build_simulation_context_from_source, run_config, run_program,
    step_simulation, DefaultIntegrator, SimulationContext, SimulationResult,
};
pub use state::State;

// Test helpers module (public for integration tests)
// Always compiled - integration tests are separate crates and need access
pub mod tests;
