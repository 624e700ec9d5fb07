//! Thermal process models.

mod stirred_tank;

pub use stirred_tank::{
    Integration, IntegrationError, MAX_REFINEMENTS, Method, StirredTank, TankConfig,
    TankConfigError, TankError, TankInput, TankOutput, TankProblem,
};
