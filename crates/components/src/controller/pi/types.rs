/// Accumulated error-time product carried between controller steps.
///
/// The default is an empty accumulator, which is how every run starts.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PiState {
    pub integral: f64,
}

/// Inputs for one controller step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PiInput {
    /// Target value for the measurement.
    pub setpoint: f64,

    /// Process value observed before this step's update.
    pub measurement: f64,

    /// Sampling step used to integrate the error.
    pub dt: f64,

    /// Accumulator committed by the previous step.
    pub state: PiState,
}

/// Which limit, if any, the raw command ran into.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Saturation {
    #[default]
    None,
    High,
    Low,
}

/// Result of one controller step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PiOutput {
    /// Tracking error `setpoint - measurement`.
    pub error: f64,

    /// Command before clamping.
    pub raw_output: f64,

    /// Command after clamping. This is the value to apply.
    pub output: f64,

    /// Which limit the raw command hit.
    pub saturation: Saturation,

    /// Accumulator to carry into the next step.
    ///
    /// Equal to the input state whenever `saturation` is not
    /// [`Saturation::None`].
    pub state: PiState,
}

impl PiOutput {
    /// Returns `true` if the command was clamped and the accumulator rolled back.
    #[must_use]
    pub fn is_saturated(&self) -> bool {
        self.saturation != Saturation::None
    }
}
