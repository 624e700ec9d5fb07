use heatloop_core::Snapshot;

/// Indicates how an integrator terminated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// Completed all requested steps.
    Complete,

    /// Stopped early due to an observer action.
    StoppedByObserver,
}

/// The result of a transient integration.
#[derive(Debug, Clone)]
pub struct Solution<I, O> {
    /// How the integrator terminated.
    pub status: Status,

    /// Snapshots from each step, starting with the initial state.
    pub history: Vec<Snapshot<I, O>>,

    /// Number of integration steps completed.
    pub steps: usize,
}

impl<I, O> Solution<I, O> {
    /// Returns the last snapshot in the history.
    ///
    /// The history always holds at least the initial snapshot, so this never
    /// returns `None` for a solution produced by an integrator.
    pub fn last(&self) -> Option<&Snapshot<I, O>> {
        self.history.last()
    }
}
