//! A module which collects solve metrics and writes information into log.

#[cfg(test)]
#[path = "../../tests/unit/solver/telemetry_test.rs"]
mod telemetry_test;

use crate::utils::{Float, InfoLogger, Timer};
use std::time::Duration;

/// Encapsulates different measurements regarding a solve call.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Metrics {
    /// Total duration in milliseconds.
    pub duration: usize,
    /// Amount of optimizer invocations.
    pub solver_invocations: usize,
    /// Cumulative optimizer time in seconds.
    pub solver_time: Float,
    /// Amount of cycles eliminated by added constraints.
    pub eliminated_cycles: usize,
    /// Amount of lazy callback calls with an integral candidate.
    pub lazy_triggers: usize,
    /// Amount of constraints added before the first optimization.
    pub preseeded_constraints: usize,
}

/// Specifies a telemetry mode.
#[derive(Clone)]
pub enum TelemetryMode {
    /// No telemetry at all.
    None,
    /// Only logging.
    OnlyLogging {
        /// A logger type.
        logger: InfoLogger,
    },
    /// Only metrics collection.
    OnlyMetrics,
    /// Both logging and metrics collection.
    All {
        /// A logger type.
        logger: InfoLogger,
    },
}

impl TelemetryMode {
    /// Returns logger if logging is enabled.
    pub fn logger(&self) -> Option<InfoLogger> {
        match self {
            TelemetryMode::OnlyLogging { logger } | TelemetryMode::All { logger } => Some(logger.clone()),
            _ => None,
        }
    }
}

/// Provides way to collect metrics and write information into log.
pub struct Telemetry {
    mode: TelemetryMode,
    time: Timer,
    metrics: Metrics,
}

impl Telemetry {
    /// Creates a new instance of `Telemetry`, counters start from zero.
    pub fn new(mode: TelemetryMode) -> Self {
        Self { mode, time: Timer::start(), metrics: Metrics::default() }
    }

    /// Reports constraints added before the first optimization.
    pub fn on_preseeded(&mut self, amount: usize) {
        self.metrics.preseeded_constraints += amount;
        if amount > 0 {
            self.log(format!("[{}ms] pre-seeded {amount} subtour constraints", self.time.elapsed_millis()).as_str());
        }
    }

    /// Reports a single optimizer invocation.
    pub fn on_solver_call(&mut self, duration: Duration) {
        self.metrics.solver_invocations += 1;
        self.metrics.solver_time += duration.as_secs_f64();
    }

    /// Reports an analyzed iteration of the constraint generation loop.
    pub fn on_iteration(&mut self, cycles: usize, added: usize, objective: Option<Float>) {
        self.metrics.eliminated_cycles += added;
        self.log(
            format!(
                "[{}ms] iteration {}: {cycles} cycle(s), {added} new constraint(s), objective: {}",
                self.time.elapsed_millis(),
                self.metrics.solver_invocations,
                objective.map_or("n/a".to_string(), |value| value.to_string())
            )
            .as_str(),
        );
    }

    /// Reports lazy callback statistics.
    pub fn on_lazy_callback(&mut self, triggers: usize, eliminated_cycles: usize) {
        self.metrics.lazy_triggers += triggers;
        self.metrics.eliminated_cycles += eliminated_cycles;
        self.log(
            format!(
                "[{}ms] lazy callback: {triggers} trigger(s), {eliminated_cycles} cycle(s) eliminated",
                self.time.elapsed_millis()
            )
            .as_str(),
        );
    }

    /// Reports final result.
    pub fn on_result(&mut self, cost: Float, is_optimal: bool) {
        self.metrics.duration = self.time.elapsed_millis() as usize;
        self.log(
            format!(
                "[{}ms] total optimizer calls: {}, optimizer time: {:.3}s, cost: {cost}{}",
                self.metrics.duration,
                self.metrics.solver_invocations,
                self.metrics.solver_time,
                if is_optimal { "" } else { " (optimality is not proven)" }
            )
            .as_str(),
        );
    }

    /// Writes a warning message.
    pub fn warn(&self, message: &str) {
        self.log(format!("warning: {message}").as_str());
    }

    /// Gets metrics.
    pub fn take_metrics(self) -> Option<Metrics> {
        match &self.mode {
            TelemetryMode::OnlyMetrics | TelemetryMode::All { .. } => Some(self.metrics),
            _ => None,
        }
    }

    /// Writes log message.
    pub fn log(&self, message: &str) {
        match &self.mode {
            TelemetryMode::OnlyLogging { logger, .. } => (logger)(message),
            TelemetryMode::All { logger, .. } => (logger)(message),
            _ => {}
        }
    }
}
