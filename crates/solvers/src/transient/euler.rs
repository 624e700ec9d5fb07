//! Forward Euler integration.
//!
//! ```text
//! state_{n+1} = state_n + derivative_n * dt
//! ```
//!
//! First order: halving `dt` roughly halves the global error. Cheap, but
//! needs many more steps than [`rk4`](super::rk4) for the same accuracy.

use heatloop_core::{Model, Observer, OdeProblem, Snapshot, StepIntegrable};

use super::{Action, Error, Event, Solution, integrate};

/// Integrates an ODE problem using forward Euler.
///
/// The observer receives an [`Event`] for the initial state and after each
/// step, and may return [`Action::StopEarly`] to terminate early.
///
/// # Errors
///
/// Returns an error if the model or problem returns an error at any point.
pub fn solve<M, P, Obs>(
    model: &M,
    problem: &P,
    initial: M::Input,
    dt: f64,
    steps: usize,
    observer: Obs,
) -> Result<Solution<M::Input, M::Output>, Error>
where
    M: Model,
    M::Input: Clone,
    M::Output: Clone,
    P: OdeProblem<Input = M::Input, Output = M::Output, Delta = f64>,
    Obs: Observer<Event<M::Input, M::Output>, Action>,
{
    integrate(model, problem, initial, dt, steps, observer, advance)
}

/// Integrates an ODE problem using forward Euler without observation.
///
/// # Errors
///
/// Returns an error if the model or problem returns an error at any point.
pub fn solve_unobserved<M, P>(
    model: &M,
    problem: &P,
    initial: M::Input,
    dt: f64,
    steps: usize,
) -> Result<Solution<M::Input, M::Output>, Error>
where
    M: Model,
    M::Input: Clone,
    M::Output: Clone,
    P: OdeProblem<Input = M::Input, Output = M::Output, Delta = f64>,
{
    solve(model, problem, initial, dt, steps, ())
}

fn advance<M, P>(
    _model: &M,
    problem: &P,
    current: &Snapshot<M::Input, M::Output>,
    dt: f64,
) -> Result<M::Input, Error>
where
    M: Model,
    P: OdeProblem<Input = M::Input, Output = M::Output, Delta = f64>,
{
    let state = problem.state(&current.input).map_err(Error::problem)?;
    let derivative = problem
        .derivative(&current.input, &current.output)
        .map_err(Error::problem)?;

    let next_state = state.step(derivative, dt);

    problem
        .build_input(&current.input, &next_state, &dt)
        .map_err(Error::problem)
}
