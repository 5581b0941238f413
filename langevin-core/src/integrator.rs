//! Verlet-Maruyama integration of the Langevin equation of motion
//!
//! A velocity-Verlet step with friction and Gaussian noise added to the
//! acceleration at both half-steps:
//!
//! ```text
//! a1 = F(x)/m  - eps*v/m + xi1/m
//! x' = x + v*dt + a1*dt^2/2
//! a2 = F(x')/m - eps*v/m + xi2/m
//! v' = v + (a1 + a2)*dt/2
//! ```
//!
//! The second friction term uses the velocity from before the update and
//! `xi2` is a fresh draw, independent of `xi1`. Textbook Langevin splittings
//! (BAOAB, BBK) treat both terms differently; this scheme keeps the simpler
//! form and reduces to plain velocity-Verlet when friction and noise are off.

use crate::config::ForceConfig;
use crate::error::{ConfigError, NumericError};
use crate::potential::Potential;
use crate::rng::NoiseSource;
use crate::state::State;

/// Advances a [`State`] by one fixed time step
///
/// The configuration is fixed for the integrator's lifetime. To change a
/// parameter, take the parts back with [`LangevinIntegrator::into_parts`]
/// and build a new integrator.
#[derive(Debug, Clone)]
pub struct LangevinIntegrator<P: Potential, N: NoiseSource> {
    potential: P,
    noise: N,
    config: ForceConfig,
    inv_mass: f64,
    half_dt: f64,
    half_dt_sq: f64,
}

impl<P: Potential, N: NoiseSource> LangevinIntegrator<P, N> {
    pub fn new(potential: P, config: ForceConfig, noise: N) -> Result<Self, ConfigError> {
        config.validate()?;
        log::debug!(
            "langevin integrator: dt={} m={} friction={} (eps={}) noise={} (sigma={})",
            config.dt,
            config.mass,
            config.friction_enabled,
            config.epsilon,
            config.noise_enabled,
            config.sigma
        );
        Ok(Self {
            potential,
            noise,
            config,
            inv_mass: 1.0 / config.mass,
            half_dt: 0.5 * config.dt,
            half_dt_sq: 0.5 * config.dt * config.dt,
        })
    }

    pub fn config(&self) -> &ForceConfig {
        &self.config
    }

    pub fn potential(&self) -> &P {
        &self.potential
    }

    pub fn noise(&self) -> &N {
        &self.noise
    }

    pub fn into_parts(self) -> (P, N) {
        (self.potential, self.noise)
    }

    /// Advance `state` by one time step
    pub fn step(&mut self, state: State) -> Result<State, NumericError> {
        let State { position: x, velocity: v } = state;
        let dt = self.config.dt;

        let a1 = self.acceleration(x, v)?;
        let next_x = x + v * dt + a1 * self.half_dt_sq;
        let a2 = self.acceleration(next_x, v)?;
        let next_v = v + (a1 + a2) * self.half_dt;

        let next = State::new(next_x, next_v);
        if !next.is_finite() {
            log::warn!("non-finite state after step from {:?}", state);
            return Err(NumericError::NonFiniteState { state: next });
        }
        Ok(next)
    }

    /// Advance `state` by `steps` time steps, stopping at the first fault
    pub fn advance(&mut self, mut state: State, steps: usize) -> Result<State, NumericError> {
        for _ in 0..steps {
            state = self.step(state)?;
        }
        Ok(state)
    }

    /// Total acceleration at position `x`, with friction on velocity `v`
    fn acceleration(&mut self, x: f64, v: f64) -> Result<f64, NumericError> {
        let force = self.potential.try_force(x).map_err(|err| {
            log::warn!("{}", err);
            err
        })?;
        let mut acceleration = force * self.inv_mass;
        if self.config.friction_enabled {
            acceleration -= self.config.epsilon * v * self.inv_mass;
        }
        if self.config.noise_enabled {
            acceleration += self.noise.sample(0.0, self.config.sigma) * self.inv_mass;
        }
        Ok(acceleration)
    }
}
