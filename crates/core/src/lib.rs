//! Core traits and types for Heatloop.
//!
//! This crate defines the shared abstractions that solvers, components, and
//! the simulation driver build on:
//!
//! - [`Model`]: a callable that maps a typed input to a typed output
//! - [`Snapshot`]: a captured input/output pair from a model call
//! - [`Observer`]: receives events and optionally returns control actions
//! - [`OdeProblem`]: adapts a model so a generic integrator can step it
//! - [`StepIntegrable`]: a state that can be stepped by its derivative
//! - [`constraint`]: numeric invariants checked at construction time

pub mod constraint;

mod model;
mod observer;
mod problems;
mod step;

pub use observer::Observer;
pub use problems::OdeProblem;
pub use step::{DerivativeOf, StepIntegrable};
pub use {model::Model, model::Snapshot};
