//! Error types for the Langevin engine
//!
//! Configuration problems are caught when a potential or integrator is
//! built. Numeric faults are caught while stepping and are never folded
//! back into the trajectory.

use crate::state::State;
use thiserror::Error;

/// Rejected parameter set, raised before any step is taken
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("mass must be strictly positive, got {0}")]
    NonPositiveMass(f64),

    #[error("time step must be strictly positive, got {0}")]
    NonPositiveTimeStep(f64),

    #[error("friction coefficient must be non-negative, got {0}")]
    NegativeFriction(f64),

    #[error("noise strength must be non-negative, got {0}")]
    NegativeNoise(f64),

    #[error("call strength must be non-negative, got {0}")]
    NegativeCallStrength(f64),

    #[error("parameter '{field}' must be finite")]
    NonFinite { field: &'static str },

    #[error("potential denominator x^2 + delta vanishes near x = {x} (delta = {delta})")]
    SingularPotential { delta: f64, x: f64 },

    #[error("uniform draw {0} is outside [0, 1)")]
    InvalidUniformDraw(f64),

    #[error("uniform sequence must contain at least one draw")]
    EmptySequence,
}

/// Fault detected while advancing a state
#[derive(Debug, Clone, PartialEq, Error)]
pub enum NumericError {
    #[error("force evaluated to a non-finite value at x = {x}")]
    NonFiniteForce { x: f64 },

    #[error("step produced a non-finite state (x = {}, v = {})", .state.position, .state.velocity)]
    NonFiniteState { state: State },
}

/// Umbrella error for loading and running a scenario
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("numeric failure: {0}")]
    Numeric(#[from] NumericError),

    #[error("could not parse scenario: {0}")]
    Parse(#[from] toml::de::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
