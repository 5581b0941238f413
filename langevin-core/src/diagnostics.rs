//! Static checks on a scenario before it is run
//!
//! Errors mirror what construction would reject. Warnings flag settings that
//! are legal but probably not what the user meant.

use crate::config::SimulationConfig;
use std::fmt;

/// Initial conditions outside this range are clamped by interactive drivers
pub const INITIAL_CONDITION_LIMIT: f64 = 1.0;

/// Time steps above this make the trajectory visibly coarse
pub const LARGE_TIME_STEP: f64 = 0.25;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticSeverity {
    Error,
    Warning,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    pub severity: DiagnosticSeverity,
    pub message: String,
    /// Scenario field the diagnostic refers to, e.g. `forces.dt`
    pub field: Option<&'static str>,
}

impl Diagnostic {
    pub fn error(message: impl Into<String>, field: Option<&'static str>) -> Self {
        Self {
            severity: DiagnosticSeverity::Error,
            message: message.into(),
            field,
        }
    }

    pub fn warning(message: impl Into<String>, field: Option<&'static str>) -> Self {
        Self {
            severity: DiagnosticSeverity::Warning,
            message: message.into(),
            field,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self.severity {
            DiagnosticSeverity::Error => "error",
            DiagnosticSeverity::Warning => "warning",
        };
        match self.field {
            Some(field) => write!(f, "{} [{}]: {}", label, field, self.message),
            None => write!(f, "{}: {}", label, self.message),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Diagnostics {
    items: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, diagnostic: Diagnostic) {
        self.items.push(diagnostic);
    }

    pub fn has_errors(&self) -> bool {
        self.items
            .iter()
            .any(|d| d.severity == DiagnosticSeverity::Error)
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.items.iter()
    }
}

impl fmt::Display for Diagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for diagnostic in &self.items {
            writeln!(f, "{}", diagnostic)?;
        }
        Ok(())
    }
}

/// Analyze a scenario and return diagnostics
pub fn analyze_config(config: &SimulationConfig) -> Diagnostics {
    let mut diagnostics = Diagnostics::new();
    let forces = &config.forces;

    if let Err(err) = config.build_potential() {
        diagnostics.push(Diagnostic::error(err.to_string(), Some("potential.delta")));
    }
    if let Err(err) = config.validate_call_strength() {
        diagnostics.push(Diagnostic::error(err.to_string(), Some("call_strength")));
    }
    if let Err(err) = forces.validate() {
        diagnostics.push(Diagnostic::error(err.to_string(), Some("forces")));
    }

    if forces.friction_enabled && forces.epsilon == 0.0 {
        diagnostics.push(Diagnostic::warning(
            "friction is enabled but epsilon is 0, the term has no effect",
            Some("forces.epsilon"),
        ));
    }
    if forces.noise_enabled && forces.sigma == 0.0 {
        diagnostics.push(Diagnostic::warning(
            "noise is enabled but sigma is 0, the term has no effect",
            Some("forces.sigma"),
        ));
    }
    if forces.dt > LARGE_TIME_STEP {
        diagnostics.push(Diagnostic::warning(
            format!(
                "time step {} is above {}, trajectories will be coarse",
                forces.dt, LARGE_TIME_STEP
            ),
            Some("forces.dt"),
        ));
    }

    if config.initial.position.abs() > INITIAL_CONDITION_LIMIT {
        diagnostics.push(Diagnostic::warning(
            format!(
                "initial position {} is outside [-{limit}, {limit}]",
                config.initial.position,
                limit = INITIAL_CONDITION_LIMIT
            ),
            Some("initial.position"),
        ));
    }
    if config.initial.velocity.abs() > INITIAL_CONDITION_LIMIT {
        diagnostics.push(Diagnostic::warning(
            format!(
                "initial velocity {} is outside [-{limit}, {limit}]",
                config.initial.velocity,
                limit = INITIAL_CONDITION_LIMIT
            ),
            Some("initial.velocity"),
        ));
    }
    if !config.initial.is_finite() {
        diagnostics.push(Diagnostic::error(
            "initial state must be finite",
            Some("initial"),
        ));
    }

    diagnostics
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::State;

    #[test]
    fn default_scenario_is_clean() {
        assert!(analyze_config(&SimulationConfig::default()).is_empty());
    }

    #[test]
    fn zero_mass_is_an_error() {
        let mut config = SimulationConfig::default();
        config.forces.mass = 0.0;
        let diagnostics = analyze_config(&config);
        assert!(diagnostics.has_errors());
        assert_eq!(diagnostics.len(), 1);
    }

    #[test]
    fn singular_delta_is_an_error() {
        let mut config = SimulationConfig::default();
        config.potential.delta = 0.0;
        let diagnostics = analyze_config(&config);
        assert!(diagnostics.has_errors());
        let first = diagnostics.iter().next().unwrap();
        assert_eq!(first.field, Some("potential.delta"));
    }

    #[test]
    fn negative_call_strength_is_an_error() {
        let config = SimulationConfig {
            call_strength: -1.0,
            ..SimulationConfig::default()
        };
        let diagnostics = analyze_config(&config);
        assert!(diagnostics.has_errors());
        assert_eq!(
            diagnostics.iter().next().map(|d| d.field),
            Some(Some("call_strength"))
        );
    }

    #[test]
    fn idle_toggles_are_warnings() {
        let mut config = SimulationConfig::default();
        config.forces.epsilon = 0.0;
        config.forces.sigma = 0.0;
        let diagnostics = analyze_config(&config);
        assert!(!diagnostics.has_errors());
        assert_eq!(diagnostics.len(), 2);
    }

    #[test]
    fn disabled_toggles_do_not_warn() {
        let mut config = SimulationConfig::default();
        config.forces.friction_enabled = false;
        config.forces.noise_enabled = false;
        config.forces.epsilon = 0.0;
        config.forces.sigma = 0.0;
        assert!(analyze_config(&config).is_empty());
    }

    #[test]
    fn out_of_range_initial_state_warns() {
        let config = SimulationConfig {
            initial: State::new(1.5, -2.0),
            ..SimulationConfig::default()
        };
        let diagnostics = analyze_config(&config);
        assert!(!diagnostics.has_errors());
        assert_eq!(diagnostics.len(), 2);
        let text = diagnostics.to_string();
        assert!(text.contains("warning [initial.position]"));
        assert!(text.contains("warning [initial.velocity]"));
    }

    #[test]
    fn large_time_step_warns() {
        let mut config = SimulationConfig::default();
        config.forces.dt = 0.5;
        let diagnostics = analyze_config(&config);
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(
            diagnostics.iter().next().map(|d| d.field),
            Some(Some("forces.dt"))
        );
    }
}
