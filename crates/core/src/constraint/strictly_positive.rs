use super::{Constrained, Constraint, ConstraintError};

/// Marker type enforcing that a value is finite and strictly positive (> 0).
///
/// Used for quantities that appear in a denominator, such as a tank's volume
/// or a controller's integral time.
///
/// # Examples
///
/// ```
/// use heatloop_core::constraint::{ConstraintError, StrictlyPositive};
///
/// assert_eq!(StrictlyPositive::new(4.18).unwrap().into_inner(), 4.18);
/// assert_eq!(StrictlyPositive::new(0.0), Err(ConstraintError::Zero));
/// assert_eq!(StrictlyPositive::new(-1.0), Err(ConstraintError::Negative));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StrictlyPositive;

impl StrictlyPositive {
    /// Constructs a `Constrained<f64, StrictlyPositive>` if the value is valid.
    ///
    /// # Errors
    ///
    /// Returns an error if the value is zero, negative, or not finite.
    pub fn new(value: f64) -> Result<Constrained<f64, StrictlyPositive>, ConstraintError> {
        Constrained::<f64, StrictlyPositive>::new(value)
    }
}

impl Constraint<f64> for StrictlyPositive {
    fn check(value: &f64) -> Result<(), ConstraintError> {
        if let Some(err) = ConstraintError::non_finite(*value) {
            return Err(err);
        }
        if *value > 0.0 {
            Ok(())
        } else if *value == 0.0 {
            Err(ConstraintError::Zero)
        } else {
            Err(ConstraintError::Negative)
        }
    }
}
