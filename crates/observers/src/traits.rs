//! Capability traits for observers that work at more than one level.
//!
//! A closed-loop simulation and the integrator inside a single tank step
//! emit different event and action types. These traits abstract over them so
//! one observer can watch either.
//!
//! # Example
//!
//! ```rust
//! use heatloop_core::Observer;
//! use heatloop_observers::traits::{CanAbort, HasTemperature};
//!
//! /// Stops after the first event hotter than `limit`.
//! struct Overheat {
//!     limit: f64,
//! }
//!
//! impl<E: HasTemperature, A: CanAbort> Observer<E, A> for Overheat {
//!     fn observe(&mut self, event: &E) -> Option<A> {
//!         (event.temperature() > self.limit).then(A::abort)
//!     }
//! }
//! ```

use heatloop_components::thermal::{TankInput, TankOutput};
use heatloop_solvers::transient;

/// An event that carries a tank temperature.
pub trait HasTemperature {
    fn temperature(&self) -> f64;
}

/// An action type that can end the run that emitted the event.
pub trait CanAbort {
    fn abort() -> Self;
}

impl HasTemperature for heatloop_sim::Event {
    fn temperature(&self) -> f64 {
        self.temperature
    }
}

impl HasTemperature for transient::Event<TankInput, TankOutput> {
    fn temperature(&self) -> f64 {
        self.snapshot.input.temperature
    }
}

impl CanAbort for heatloop_sim::Action {
    fn abort() -> Self {
        Self::Abort
    }
}

impl CanAbort for transient::Action {
    fn abort() -> Self {
        Self::StopEarly
    }
}
