use heatloop_components::controller::{PiInput, PiOutput};
use heatloop_core::Snapshot;

/// What happened during one simulation step.
///
/// Emitted after sample `step` has been written, so `step` runs from `1` to
/// `samples - 1`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Event {
    pub step: usize,

    /// Time of sample `step`.
    pub time: f64,

    /// The controller call made at the start of the step.
    pub controller: Snapshot<PiInput, PiOutput>,

    /// Tank temperature at the end of the step.
    pub temperature: f64,

    /// Inlet temperature held during the step.
    pub inlet_temperature: f64,
}

/// Control actions an observer can return to the simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Stop the run. It ends with [`Error::Aborted`](crate::Error::Aborted).
    Abort,
}
