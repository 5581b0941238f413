use crate::config::{ForceConfig, SimulationConfig};
use crate::diagnostics::{analyze_config, Diagnostics};
use crate::error::{ConfigError, Error, NumericError};
use crate::integrator::LangevinIntegrator;
use crate::potential::{DoubleWellPotential, Potential};
use crate::rng::DefaultSampler;
use crate::state::State;

/// Integrator type driven by the runtime
pub type DefaultIntegrator = LangevinIntegrator<DoubleWellPotential, DefaultSampler>;

/// Final result of running a scenario
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationResult {
    pub final_state: State,
    pub steps: usize,
    pub initial_energy: f64,
    pub final_energy: f64,
}

/// A live simulation: one timeline advanced tick by tick
#[derive(Debug)]
pub struct SimulationContext {
    pub config: SimulationConfig,
    pub integrator: DefaultIntegrator,
    pub state: State,
    pub current_step: usize,
    pub max_steps: usize,
}

impl SimulationContext {
    pub fn potential(&self) -> &DoubleWellPotential {
        self.integrator.potential()
    }

    pub fn energy(&self) -> f64 {
        self.potential().energy(&self.state, self.config.forces.mass)
    }

    /// Swap in a new force configuration
    ///
    /// The integrator is rebuilt from scratch; potential, state and the noise
    /// stream carry over. On error the context is left unchanged.
    pub fn reconfigure(&mut self, forces: ForceConfig) -> Result<(), ConfigError> {
        let (potential, noise) = self.integrator.clone().into_parts();
        self.integrator = LangevinIntegrator::new(potential, forces, noise)?;
        self.config.forces = forces;
        Ok(())
    }

    /// Call the particle: kick its velocity by `strength` toward the origin
    ///
    /// The state is replaced; the integrator and step counter are untouched.
    pub fn call(&mut self, strength: f64) {
        self.state = self.state.called(strength);
        log::debug!("call: v = {:.4}", self.state.velocity);
    }

    /// Put the particle back at the configured initial state
    pub fn reset(&mut self) {
        self.state = self.config.initial;
        self.current_step = 0;
    }

    pub fn is_finished(&self) -> bool {
        self.current_step >= self.max_steps
    }
}

/// Main entry point: parse and run a TOML scenario
pub fn run_program(source: &str) -> Result<SimulationResult, Error> {
    let config = SimulationConfig::from_toml_str(source)?;
    run_config(&config)
}

/// Run a scenario to completion
pub fn run_config(config: &SimulationConfig) -> Result<SimulationResult, Error> {
    let mut ctx = build_simulation_context(config)?;
    let initial_energy = ctx.energy();

    while !step_simulation(&mut ctx)? {}

    let final_energy = ctx.energy();
    log::info!(
        "ran {} steps: x={:.6} v={:.6} E={:.6} (start {:.6})",
        ctx.current_step,
        ctx.state.position,
        ctx.state.velocity,
        final_energy,
        initial_energy
    );

    Ok(SimulationResult {
        final_state: ctx.state,
        steps: ctx.current_step,
        initial_energy,
        final_energy,
    })
}

/// Build a simulation context from a scenario
pub fn build_simulation_context(config: &SimulationConfig) -> Result<SimulationContext, Error> {
    if !config.initial.is_finite() {
        return Err(NumericError::NonFiniteState {
            state: config.initial,
        }
        .into());
    }
    config.validate_call_strength()?;
    let potential = config.build_potential()?;
    let noise = DefaultSampler::from_seed(config.seed);
    let integrator = LangevinIntegrator::new(potential, config.forces, noise)?;

    Ok(SimulationContext {
        config: config.clone(),
        integrator,
        state: config.initial,
        current_step: 0,
        max_steps: config.steps,
    })
}

/// Parse a scenario, analyze it and build a context
///
/// Diagnostics are returned alongside the context so callers can show
/// warnings. A scenario with error diagnostics fails to build.
pub fn build_simulation_context_from_source(
    source: &str,
) -> Result<(SimulationContext, Diagnostics), Error> {
    let config = SimulationConfig::from_toml_str(source)?;
    let diagnostics = analyze_config(&config);
    let ctx = build_simulation_context(&config)?;
    Ok((ctx, diagnostics))
}

/// Advance the simulation by one step
///
/// Returns `true` once the configured number of steps has been taken. A
/// numeric fault leaves the state at its last good value.
pub fn step_simulation(ctx: &mut SimulationContext) -> Result<bool, NumericError> {
    if ctx.is_finished() {
        return Ok(true);
    }
    ctx.state = ctx.integrator.step(ctx.state)?;
    ctx.current_step += 1;
    Ok(ctx.is_finished())
}
