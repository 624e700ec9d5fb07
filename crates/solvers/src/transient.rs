//! Fixed-step integrators for transient problems.
//!
//! Every integrator in this module shares the same driver loop and differs
//! only in how one step is taken:
//!
//! - [`euler`]: explicit forward Euler, first order
//! - [`rk4`]: classic four-stage Runge–Kutta, fourth order
//!
//! # Algorithm
//!
//! 1. Call the model with the initial input to get the initial snapshot.
//! 2. For each step:
//!    - Advance the state by `dt` using the method's update rule.
//!    - Build the next input from the stepped state and finalize it.
//!    - Call the model to get the next output.
//!    - Emit an [`Event`] to the observer.
//!    - If the observer returns [`Action::StopEarly`], terminate.
//! 3. Return the [`Solution`] with the full history.
//!
//! # Example
//!
//! ```ignore
//! use heatloop_solvers::transient::rk4;
//!
//! let solution = rk4::solve_unobserved(&model, &problem, initial_input, 0.1, 10)?;
//! let last = solution.history.last().unwrap();
//! ```

mod action;
mod error;
mod event;
mod solution;

pub mod euler;
pub mod rk4;

#[cfg(test)]
mod test_utils;

pub use action::Action;
pub use error::Error;
pub use event::Event;
pub use solution::{Solution, Status};

use heatloop_core::{Model, Observer, OdeProblem, Snapshot};

/// Advances the current snapshot by `dt`, returning the next (unfinalized) input.
type Advance<M, P> = fn(
    &M,
    &P,
    &Snapshot<<M as Model>::Input, <M as Model>::Output>,
    f64,
) -> Result<<M as Model>::Input, Error>;

/// Shared driver loop for all fixed-step methods.
fn integrate<M, P, Obs>(
    model: &M,
    problem: &P,
    initial: M::Input,
    dt: f64,
    steps: usize,
    mut observer: Obs,
    advance: Advance<M, P>,
) -> Result<Solution<M::Input, M::Output>, Error>
where
    M: Model,
    M::Input: Clone,
    M::Output: Clone,
    P: OdeProblem<Input = M::Input, Output = M::Output, Delta = f64>,
    Obs: Observer<Event<M::Input, M::Output>, Action>,
{
    let initial_output = model.call(&initial).map_err(Error::model)?;
    let initial_snapshot = Snapshot::new(initial, initial_output);

    let mut history = Vec::with_capacity(steps + 1);
    history.push(initial_snapshot.clone());

    let event = Event {
        step: 0,
        snapshot: initial_snapshot.clone(),
    };
    if let Some(Action::StopEarly) = observer.observe(&event) {
        return Ok(Solution {
            status: Status::StoppedByObserver,
            history,
            steps: 0,
        });
    }

    let mut current = initial_snapshot;

    for step in 1..=steps {
        let next_input = advance(model, problem, &current, dt)?;
        let next_input = problem
            .finalize_step(next_input, &current.input, &current.output, &dt)
            .map_err(Error::problem)?;

        let next_output = model.call(&next_input).map_err(Error::model)?;
        let next_snapshot = Snapshot::new(next_input, next_output);

        history.push(next_snapshot.clone());

        let event = Event {
            step,
            snapshot: next_snapshot.clone(),
        };
        if let Some(Action::StopEarly) = observer.observe(&event) {
            return Ok(Solution {
                status: Status::StoppedByObserver,
                history,
                steps: step,
            });
        }

        current = next_snapshot;
    }

    Ok(Solution {
        status: Status::Complete,
        history,
        steps,
    })
}
