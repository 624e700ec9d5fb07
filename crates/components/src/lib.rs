//! Models for the two halves of a temperature control loop.
//!
//! - [`thermal`]: the process: a well-mixed tank heated by an element and
//!   flushed by an inlet stream
//! - [`controller`]: the regulator: a discrete PI law with output limits and
//!   integral anti-windup
//!
//! Each component implements [`heatloop_core::Model`] so it can be called,
//! observed, and integrated the same way as any other model.
//!
//! # Features
//!
//! - `serde`: derives `Serialize`/`Deserialize` for configuration types.

pub mod controller;
pub mod thermal;
