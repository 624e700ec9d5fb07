/// Receives events from a solver or simulation and optionally returns an action.
///
/// The event type `E` and action type `A` are defined by whoever emits the
/// events. Returning `None` lets the emitter continue undisturbed.
///
/// Implemented for:
///
/// - `()`, which ignores every event
/// - any `FnMut(&E) -> Option<A>` closure
pub trait Observer<E, A> {
    /// Observes an event, returning an action to take or `None`.
    fn observe(&mut self, event: &E) -> Option<A>;
}

impl<E, A> Observer<E, A> for () {
    fn observe(&mut self, _event: &E) -> Option<A> {
        None
    }
}

impl<E, A, F> Observer<E, A> for F
where
    F: FnMut(&E) -> Option<A>,
{
    fn observe(&mut self, event: &E) -> Option<A> {
        self(event)
    }
}
