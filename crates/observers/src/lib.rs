//! Reusable observers for Heatloop.
//!
//! Observers watch a run as it happens. The ones in this crate work with
//! closed-loop simulation events from `heatloop-sim` and, where it makes
//! sense, with the tank's own integrator events from `heatloop-solvers`.
//!
//! # Modules
//!
//! - [`traits`]: capability traits shared by both event sources
//!   ([`HasTemperature`], [`CanAbort`])
//!
//! # Observers
//!
//! - [`TemperatureBand`]: aborts a run once the temperature leaves a band
//! - [`SaturationCounter`]: counts controller steps pinned at each limit
//! - [`PlotObserver`]: collects traces and shows them in a window
//!   (feature `plot`)
//!
//! # Features
//!
//! - `plot`: Enables [`PlotObserver`] for visualizing runs via egui.
//!   This feature adds dependencies on `eframe` and `egui_plot`.
//!
//! [`HasTemperature`]: traits::HasTemperature
//! [`CanAbort`]: traits::CanAbort

pub mod traits;

mod band;
mod saturation;

#[cfg(feature = "plot")]
mod plot;

pub use band::{BandError, TemperatureBand};
pub use saturation::SaturationCounter;

#[cfg(feature = "plot")]
pub use plot::{PlotObserver, Plottable, ShowConfig};
