//! Feedback controllers.

mod pi;

pub use pi::{PiConfig, PiConfigError, PiController, PiInput, PiOutput, PiState, Saturation};
