use serde::{Deserialize, Serialize};

/// Position and velocity of the particle at one instant
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct State {
    pub position: f64,
    pub velocity: f64,
}

impl State {
    pub fn new(position: f64, velocity: f64) -> Self {
        Self { position, velocity }
    }

    pub fn is_finite(&self) -> bool {
        self.position.is_finite() && self.velocity.is_finite()
    }

    /// Velocity kicked by `strength` toward the origin
    ///
    /// A particle exactly at the origin is kicked toward negative x.
    pub fn called(&self, strength: f64) -> Self {
        let velocity = if self.position < 0.0 {
            self.velocity + strength
        } else {
            self.velocity - strength
        };
        Self::new(self.position, velocity)
    }

    /// Kinetic energy 0.5 * m * v^2
    pub fn kinetic_energy(&self, mass: f64) -> f64 {
        0.5 * mass * self.velocity * self.velocity
    }
}

impl Default for State {
    fn default() -> Self {
        Self::new(-0.5, 0.5)
    }
}
