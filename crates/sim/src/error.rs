use heatloop_components::{
    controller::PiConfigError,
    thermal::{IntegrationError, TankConfigError, TankError},
};
use thiserror::Error;

use crate::ClockError;

/// Errors raised while setting up or running a simulation.
///
/// Configuration variants are returned by
/// [`Simulation::new`](crate::Simulation::new) before any step runs.
/// [`Error::Step`] and [`Error::Aborted`] end a run part way through.
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid time grid: {0}")]
    Clock(#[from] ClockError),

    #[error("invalid tank: {0}")]
    Tank(#[from] TankConfigError),

    #[error("invalid integration settings: {0}")]
    Integration(#[from] IntegrationError),

    #[error("invalid controller: {0}")]
    Controller(#[from] PiConfigError),

    #[error("initial temperature must be finite, got {0}")]
    InitialTemperature(f64),

    /// A schedule's length differs from the sample count.
    ///
    /// Longer schedules are rejected as well as shorter ones, so a sweep
    /// that changes `samples` cannot silently reuse a stale schedule.
    #[error("{name} schedule has {actual} values, expected {expected}")]
    ScheduleLength {
        name: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("{name} schedule value at index {index} is not finite")]
    ScheduleValue { name: &'static str, index: usize },

    #[error("step {step} failed")]
    Step {
        step: usize,
        #[source]
        source: TankError,
    },

    #[error("run aborted by observer at step {step}")]
    Aborted { step: usize },
}
