//! Parameter snapshots for potentials, integrators and whole scenarios
//!
//! Every struct here is a plain immutable value. Changing a parameter means
//! building a new snapshot and from it a new potential or integrator.

use crate::error::{ConfigError, Error};
use crate::potential::DoubleWellPotential;
use crate::state::State;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Shape of the double-well potential
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PotentialParams {
    /// Coupling constant, scales the whole potential
    pub g: f64,
    /// Bonding strength, sets the inner barrier width
    pub delta: f64,
}

impl Default for PotentialParams {
    fn default() -> Self {
        Self { g: 1.0, delta: 0.5 }
    }
}

/// Force composition and integration constants
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForceConfig {
    pub friction_enabled: bool,
    pub noise_enabled: bool,
    /// Friction coefficient
    pub epsilon: f64,
    /// Standard deviation of the noise force
    pub sigma: f64,
    pub mass: f64,
    pub dt: f64,
}

impl Default for ForceConfig {
    fn default() -> Self {
        Self {
            friction_enabled: true,
            noise_enabled: true,
            epsilon: 0.25,
            sigma: 1.5,
            mass: 1.0,
            dt: 0.025,
        }
    }
}

impl ForceConfig {
    /// Both stochastic and dissipative terms switched off
    pub fn conservative(mass: f64, dt: f64) -> Self {
        Self {
            friction_enabled: false,
            noise_enabled: false,
            mass,
            dt,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [
            ("epsilon", self.epsilon),
            ("sigma", self.sigma),
            ("mass", self.mass),
            ("dt", self.dt),
        ] {
            if !value.is_finite() {
                return Err(ConfigError::NonFinite { field });
            }
        }
        if self.mass <= 0.0 {
            return Err(ConfigError::NonPositiveMass(self.mass));
        }
        if self.dt <= 0.0 {
            return Err(ConfigError::NonPositiveTimeStep(self.dt));
        }
        if self.epsilon < 0.0 {
            return Err(ConfigError::NegativeFriction(self.epsilon));
        }
        if self.sigma < 0.0 {
            return Err(ConfigError::NegativeNoise(self.sigma));
        }
        Ok(())
    }
}

/// One complete scenario: potential, forces, start state and run length
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub steps: usize,
    /// Seed for the noise generator; entropy-seeded when absent
    pub seed: Option<u64>,
    /// Velocity kick applied toward the origin by a call
    pub call_strength: f64,
    /// Largest |x| the potential must stay regular on; the whole line when absent
    pub x_max: Option<f64>,
    pub potential: PotentialParams,
    pub forces: ForceConfig,
    pub initial: State,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            steps: 4000,
            seed: None,
            call_strength: 0.25,
            x_max: None,
            potential: PotentialParams::default(),
            forces: ForceConfig::default(),
            initial: State::default(),
        }
    }
}

impl SimulationConfig {
    pub fn from_toml_str(source: &str) -> Result<Self, Error> {
        Ok(toml::from_str(source)?)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, Error> {
        let source = std::fs::read_to_string(path)?;
        Self::from_toml_str(&source)
    }

    /// Potential checked over `x_max`, or over the whole line when unset
    pub fn build_potential(&self) -> Result<DoubleWellPotential, ConfigError> {
        match self.x_max {
            Some(x_max) => DoubleWellPotential::within(self.potential, x_max),
            None => DoubleWellPotential::new(self.potential),
        }
    }

    pub fn validate_call_strength(&self) -> Result<(), ConfigError> {
        if !self.call_strength.is_finite() {
            return Err(ConfigError::NonFinite {
                field: "call_strength",
            });
        }
        if self.call_strength < 0.0 {
            return Err(ConfigError::NegativeCallStrength(self.call_strength));
        }
        Ok(())
    }

    pub fn to_toml_string(&self) -> String {
        // Plain structs of numbers and bools always serialize
        toml::to_string_pretty(self).unwrap_or_default()
    }
}
