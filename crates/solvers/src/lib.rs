//! Numerical integrators for Heatloop.
//!
//! Solvers here work with any [`OdeProblem`] whose step variable is an `f64`,
//! calling the underlying [`Model`] to evaluate derivatives.
//!
//! # Modules
//!
//! - [`transient`]: fixed-step integrators ([`transient::euler`],
//!   [`transient::rk4`]) for initial value problems
//!
//! [`OdeProblem`]: heatloop_core::OdeProblem
//! [`Model`]: heatloop_core::Model

pub mod transient;
