use heatloop_core::constraint::ConstraintError;
use thiserror::Error;

/// Tuning and limits of a [`PiController`](super::PiController).
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PiConfig {
    /// Proportional-integral gain `Ki`.
    pub gain: f64,

    /// Integral time constant `taui`.
    pub integral_time: f64,

    /// Output produced with zero error and an empty accumulator.
    pub bias: f64,

    /// Lower output limit.
    pub output_min: f64,

    /// Upper output limit.
    pub output_max: f64,
}

/// Error returned when a [`PiConfig`] cannot produce a working controller.
#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum PiConfigError {
    #[error("gain must be finite, got {0}")]
    Gain(f64),

    #[error("invalid integral time: {0}")]
    IntegralTime(#[source] ConstraintError),

    #[error("bias must be finite, got {0}")]
    Bias(f64),

    /// The limits are not finite, or do not satisfy `min < max`.
    #[error("output limits must be finite with min < max (min={min}, max={max})")]
    OutputLimits { min: f64, max: f64 },
}
