use crate::config::PotentialParams;
use crate::error::{ConfigError, NumericError};
use crate::state::State;

/// Step used by the centered finite-difference force
pub const FINITE_DIFFERENCE_STEP: f64 = 0.001;

/// Smallest |x^2 + delta| accepted when validating a potential
pub const DENOMINATOR_TOLERANCE: f64 = 1e-6;

/// A one-dimensional external potential
pub trait Potential {
    fn potential(&self, x: f64) -> f64;

    /// Conservative force -dV/dx, by centered finite difference unless overridden
    fn force(&self, x: f64) -> f64 {
        -central_difference(|x| self.potential(x), x)
    }

    fn try_force(&self, x: f64) -> Result<f64, NumericError> {
        let force = self.force(x);
        if force.is_finite() {
            Ok(force)
        } else {
            Err(NumericError::NonFiniteForce { x })
        }
    }

    /// Mechanical energy 0.5 * m * v^2 + V(x)
    fn energy(&self, state: &State, mass: f64) -> f64 {
        state.kinetic_energy(mass) + self.potential(state.position)
    }
}

/// How [`DoubleWellPotential`] turns the potential into a force
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DerivativeScheme {
    /// Centered difference with [`FINITE_DIFFERENCE_STEP`]
    #[default]
    FiniteDifference,
    /// Exact derivative; trajectories differ from the finite-difference
    /// ones by the O(h^2) truncation term
    Analytic,
}

/// `V(x) = g (x^2 - 1) x^2 (x^2 - delta) / (x^2 + delta)`
///
/// Even in `x`. For `delta` in (0, 1): a shallow dip at the origin, a barrier
/// on each side below `sqrt(delta)`, the two wells between `sqrt(delta)` and
/// 1, and unbounded growth beyond `|x| = 1`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DoubleWellPotential {
    g: f64,
    delta: f64,
    scheme: DerivativeScheme,
}

impl DoubleWellPotential {
    /// Potential valid on the whole real line, which requires `delta > 0`
    pub fn new(params: PotentialParams) -> Result<Self, ConfigError> {
        check_finite(&params)?;
        if params.delta <= DENOMINATOR_TOLERANCE {
            return Err(ConfigError::SingularPotential {
                delta: params.delta,
                x: (-params.delta).max(0.0).sqrt(),
            });
        }
        Ok(Self::unchecked(params))
    }

    /// Potential valid for `|x| <= x_max` only
    ///
    /// A negative `delta` is accepted as long as the poles at
    /// `+-sqrt(-delta)` stay clear of the range, including the
    /// finite-difference reach around its edges.
    pub fn within(params: PotentialParams, x_max: f64) -> Result<Self, ConfigError> {
        check_finite(&params)?;
        if !x_max.is_finite() {
            return Err(ConfigError::NonFinite { field: "x_max" });
        }
        let reach = x_max.abs() + FINITE_DIFFERENCE_STEP;
        let lowest = params.delta;
        let highest = reach * reach + params.delta;
        if lowest <= DENOMINATOR_TOLERANCE && highest >= -DENOMINATOR_TOLERANCE {
            return Err(ConfigError::SingularPotential {
                delta: params.delta,
                x: (-params.delta).max(0.0).sqrt(),
            });
        }
        Ok(Self::unchecked(params))
    }

    fn unchecked(params: PotentialParams) -> Self {
        Self {
            g: params.g,
            delta: params.delta,
            scheme: DerivativeScheme::default(),
        }
    }

    pub fn with_scheme(self, scheme: DerivativeScheme) -> Self {
        Self { scheme, ..self }
    }

    pub fn scheme(&self) -> DerivativeScheme {
        self.scheme
    }

    /// Exact dV/dx
    pub fn analytic_derivative(&self, x: f64) -> f64 {
        // With u = x^2: V = g N(u) / D(u), N = u (u - 1) (u - delta), D = u + delta
        let u = x * x;
        let delta = self.delta;
        let n = u * (u - 1.0) * (u - delta);
        let dn = 3.0 * u * u - 2.0 * (1.0 + delta) * u + delta;
        let d = u + delta;
        self.g * 2.0 * x * (dn * d - n) / (d * d)
    }
}

impl Potential for DoubleWellPotential {
    fn potential(&self, x: f64) -> f64 {
        let x2 = x * x;
        self.g * (x2 - 1.0) * x2 * (x2 - self.delta) / (x2 + self.delta)
    }

    fn force(&self, x: f64) -> f64 {
        match self.scheme {
            DerivativeScheme::FiniteDifference => -central_difference(|x| self.potential(x), x),
            DerivativeScheme::Analytic => -self.analytic_derivative(x),
        }
    }
}

/// (f(x + h) - f(x - h)) / 2h with h = [`FINITE_DIFFERENCE_STEP`]
pub fn central_difference(f: impl Fn(f64) -> f64, x: f64) -> f64 {
    let h = FINITE_DIFFERENCE_STEP;
    (f(x + h) - f(x - h)) / (2.0 * h)
}

fn check_finite(params: &PotentialParams) -> Result<(), ConfigError> {
    if !params.g.is_finite() {
        return Err(ConfigError::NonFinite { field: "g" });
    }
    if !params.delta.is_finite() {
        return Err(ConfigError::NonFinite { field: "delta" });
    }
    Ok(())
}
