//! Closed-loop simulation of a PI-controlled stirred heating tank.
//!
//! A [`Scenario`] gathers every construction-time input: tank constants,
//! integration settings, controller tuning, the time grid, the initial
//! temperature, and the setpoint and inlet-temperature [`Schedule`]s.
//! [`Simulation::new`] validates all of it before any step runs, and
//! [`Simulation::run`] alternates controller and tank over the grid to
//! produce a [`ResultSeries`].
//!
//! ```
//! use heatloop_sim::{Scenario, Simulation};
//!
//! let series = Simulation::new(Scenario::canonical())?.run()?;
//!
//! assert_eq!(series.len(), 301);
//! assert!((series.final_temperature().unwrap() - 50.0).abs() < 0.5);
//! # Ok::<(), heatloop_sim::Error>(())
//! ```
//!
//! Independent scenarios, such as a tuning sweep, can be run in parallel with
//! [`run_batch`]. A single run is always sequential.
//!
//! # Features
//!
//! - `serde`: derives `Serialize`/`Deserialize` for [`Schedule`] and
//!   [`ResultSeries`], and enables the same feature on `heatloop-components`.

mod batch;
mod clock;
mod error;
mod event;
mod scenario;
mod schedule;
mod series;
mod simulation;

pub use batch::run_batch;
pub use clock::{ClockError, SimulationClock};
pub use error::Error;
pub use event::{Action, Event};
pub use scenario::Scenario;
pub use schedule::Schedule;
pub use series::ResultSeries;
pub use simulation::Simulation;
