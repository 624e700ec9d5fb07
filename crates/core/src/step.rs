/// A trait for types that can be stepped using their derivative.
///
/// Implementing this trait enables the generic integrators in
/// `heatloop-solvers` to work with the type by stepping it via
/// `derivative * delta`, where the derivative is with respect to `Delta`.
///
/// Scalar `f64` states are supported out of the box, which covers a
/// well-mixed tank whose only state is its temperature.
pub trait StepIntegrable<Delta> {
    /// The derivative of the type with respect to `Delta`.
    type Derivative;

    /// Returns the value after stepping with a derivative and step size.
    #[must_use]
    fn step(&self, derivative: Self::Derivative, delta: Delta) -> Self;
}

/// Type alias for the derivative of a `StepIntegrable` type.
pub type DerivativeOf<T, Delta> = <T as StepIntegrable<Delta>>::Derivative;

impl StepIntegrable<f64> for f64 {
    type Derivative = f64;

    fn step(&self, derivative: f64, delta: f64) -> Self {
        self + derivative * delta
    }
}
