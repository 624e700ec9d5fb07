use thiserror::Error;

/// Numerical method used to integrate the tank over one sub-interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Method {
    /// Forward Euler. First order; needs many sub-steps to converge.
    Euler,

    /// Classic fourth-order Runge–Kutta.
    #[default]
    Rk4,
}

/// How many times [`StirredTank::advance`](super::StirredTank::advance) may
/// double the sub-step count before giving up.
pub const MAX_REFINEMENTS: u32 = 12;

/// How [`StirredTank::advance`](super::StirredTank::advance) integrates the
/// derivative law.
///
/// The tank is always integrated over `[0, interval]`, independently of the
/// sampling step of whatever loop drives it. With the default `interval` of
/// `1.0`, a driver sampling every `Δt = 1.0` time units sees the tank advance
/// exactly one sample per call; with any other `Δt` the tank still advances
/// `interval` time units per call.
///
/// Each call integrates with `substeps` and with `2 × substeps`. While the
/// two results differ by more than `rel_tol · max(1, |T|)`, or either pass
/// diverged, the count keeps doubling, up to
/// `substeps · 2^`[`MAX_REFINEMENTS`]. A tank whose residence time is short
/// compared with the sub-step therefore still converges, just with more
/// work. Only a pass that exhausts the cap is rejected as not converged.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Integration {
    interval: f64,
    substeps: usize,
    rel_tol: f64,
    method: Method,
}

/// Errors returned when validating an [`Integration`].
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum IntegrationError {
    #[error("interval must be finite and strictly positive")]
    Interval,

    #[error("substeps must be at least 1")]
    Substeps,

    #[error("rel_tol must be finite and strictly positive")]
    RelTol,
}

impl Default for Integration {
    fn default() -> Self {
        Self {
            interval: 1.0,
            substeps: 10,
            rel_tol: 1e-6,
            method: Method::Rk4,
        }
    }
}

impl Integration {
    /// Creates a validated integration setting.
    ///
    /// # Errors
    ///
    /// Returns an error if `interval` or `rel_tol` is not finite and positive,
    /// or if `substeps` is zero.
    pub fn new(
        interval: f64,
        substeps: usize,
        rel_tol: f64,
        method: Method,
    ) -> Result<Self, IntegrationError> {
        if !interval.is_finite() || interval <= 0.0 {
            return Err(IntegrationError::Interval);
        }
        if substeps == 0 {
            return Err(IntegrationError::Substeps);
        }
        if !rel_tol.is_finite() || rel_tol <= 0.0 {
            return Err(IntegrationError::RelTol);
        }

        Ok(Self {
            interval,
            substeps,
            rel_tol,
            method,
        })
    }

    /// Returns a copy using a different number of sub-steps.
    ///
    /// # Errors
    ///
    /// Returns [`IntegrationError::Substeps`] if `substeps` is zero.
    pub fn with_substeps(self, substeps: usize) -> Result<Self, IntegrationError> {
        Self::new(self.interval, substeps, self.rel_tol, self.method)
    }

    /// Length of the sub-interval integrated per call.
    #[must_use]
    pub fn interval(&self) -> f64 {
        self.interval
    }

    /// Number of fixed sub-steps of the coarse pass.
    #[must_use]
    pub fn substeps(&self) -> usize {
        self.substeps
    }

    /// Relative tolerance between the coarse and fine passes.
    #[must_use]
    pub fn rel_tol(&self) -> f64 {
        self.rel_tol
    }

    #[must_use]
    pub fn method(&self) -> Method {
        self.method
    }

    /// Finest sub-step count a single call may use.
    #[must_use]
    pub fn max_substeps(&self) -> usize {
        self.substeps.saturating_mul(1 << MAX_REFINEMENTS)
    }

    /// Returns `true` if two passes agree within the tolerance.
    pub(super) fn agree(&self, coarse: f64, fine: f64) -> bool {
        coarse.is_finite()
            && fine.is_finite()
            && (fine - coarse).abs() <= self.rel_tol * fine.abs().max(1.0)
    }
}
