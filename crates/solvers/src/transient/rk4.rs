//! Classic fourth-order Runge–Kutta integration.
//!
//! ```text
//! k1 = f(t,        y)
//! k2 = f(t + dt/2, y + k1 * dt/2)
//! k3 = f(t + dt/2, y + k2 * dt/2)
//! k4 = f(t + dt,   y + k3 * dt)
//! y_{n+1} = y_n + (k1 + 2 k2 + 2 k3 + k4) * dt/6
//! ```
//!
//! The model is called once per stage, so every step costs four model calls
//! (the last one is reused as the next step's `k1`).
//!
//! The weighted sum is formed by chaining [`StepIntegrable::step`] calls, which
//! assumes `step` is additive in `derivative * delta`. That holds for any
//! state that steps as `state + derivative * delta`.

use heatloop_core::{DerivativeOf, Model, Observer, OdeProblem, Snapshot, StepIntegrable};

use super::{Action, Error, Event, Solution, integrate};

/// Integrates an ODE problem using classic RK4.
///
/// The observer receives an [`Event`] for the initial state and after each
/// step, and may return [`Action::StopEarly`] to terminate early.
///
/// # Errors
///
/// Returns an error if the model or problem returns an error at any stage.
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
    DerivativeOf<P::State, f64>: Clone,
    Obs: Observer<Event<M::Input, M::Output>, Action>,
{
    integrate(model, problem, initial, dt, steps, observer, advance)
}

/// Integrates an ODE problem using classic RK4 without observation.
///
/// # Errors
///
/// Returns an error if the model or problem returns an error at any stage.
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
    DerivativeOf<P::State, f64>: Clone,
{
    solve(model, problem, initial, dt, steps, ())
}

fn advance<M, P>(
    model: &M,
    problem: &P,
    current: &Snapshot<M::Input, M::Output>,
    dt: f64,
) -> Result<M::Input, Error>
where
    M: Model,
    P: OdeProblem<Input = M::Input, Output = M::Output, Delta = f64>,
    DerivativeOf<P::State, f64>: Clone,
{
    let base = &current.input;
    let half = 0.5 * dt;

    let state = problem.state(base).map_err(Error::problem)?;
    let k1 = problem
        .derivative(base, &current.output)
        .map_err(Error::problem)?;
    let k2 = stage(model, problem, base, &state.step(k1.clone(), half), half)?;
    let k3 = stage(model, problem, base, &state.step(k2.clone(), half), half)?;
    let k4 = stage(model, problem, base, &state.step(k3.clone(), dt), dt)?;

    let next_state = state
        .step(k1, dt / 6.0)
        .step(k2, dt / 3.0)
        .step(k3, dt / 3.0)
        .step(k4, dt / 6.0);

    problem
        .build_input(base, &next_state, &dt)
        .map_err(Error::problem)
}

/// Evaluates the derivative at an intermediate state `delta` into the step.
fn stage<M, P>(
    model: &M,
    problem: &P,
    base: &M::Input,
    state: &P::State,
    delta: f64,
) -> Result<DerivativeOf<P::State, f64>, Error>
where
    M: Model,
    P: OdeProblem<Input = M::Input, Output = M::Output, Delta = f64>,
{
    let input = problem
        .build_input(base, state, &delta)
        .map_err(Error::problem)?;
    let output = model.call(&input).map_err(Error::model)?;
    problem.derivative(&input, &output).map_err(Error::problem)
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    use crate::transient::{
        Status, euler,
        test_utils::{Cooling, CoolingProblem, Input, Output},
    };

    fn cooling() -> Cooling {
        Cooling {
            ambient: 20.0,
            time_constant: 10.0,
        }
    }

    fn final_error(model: &Cooling, steps: usize, horizon: f64) -> f64 {
        #[allow(clippy::cast_precision_loss)]
        let dt = horizon / steps as f64;
        let solution =
            solve_unobserved(model, &CoolingProblem, Input::at_rest(80.0), dt, steps).unwrap();
        let last = solution.last().unwrap();

        assert_relative_eq!(last.input.time, horizon, max_relative = 1e-12);
        (last.input.temperature - model.exact(80.0, horizon)).abs()
    }

    #[test]
    fn matches_the_exponential_decay() {
        let model = cooling();
        assert!(final_error(&model, 10, 10.0) < 1e-4);
    }

    #[test]
    fn converges_at_fourth_order() {
        let model = Cooling {
            ambient: 20.0,
            time_constant: 1.0,
        };

        let coarse = final_error(&model, 50, 5.0);
        let fine = final_error(&model, 100, 5.0);

        // Halving the step cuts the error by about 2^4.
        assert_relative_eq!(coarse / fine, 16.0, max_relative = 0.15);
    }

    #[test]
    fn is_more_accurate_than_euler_for_the_same_step() {
        let model = cooling();
        let exact = model.exact(80.0, 5.0);

        let rk4 = solve_unobserved(&model, &CoolingProblem, Input::at_rest(80.0), 0.5, 10)
            .unwrap()
            .last()
            .map(|s| s.input.temperature)
            .unwrap();
        let euler = euler::solve_unobserved(&model, &CoolingProblem, Input::at_rest(80.0), 0.5, 10)
            .unwrap()
            .last()
            .map(|s| s.input.temperature)
            .unwrap();

        assert!((rk4 - exact).abs() < (euler - exact).abs() / 1000.0);
    }

    #[test]
    fn observer_sees_every_step_and_can_stop() {
        let model = cooling();
        let mut times = Vec::new();

        let solution = solve(
            &model,
            &CoolingProblem,
            Input::at_rest(80.0),
            0.5,
            10,
            |event: &Event<Input, Output>| {
                times.push(event.snapshot.input.time);
                (event.step == 3).then_some(Action::StopEarly)
            },
        )
        .unwrap();

        assert_eq!(solution.status, Status::StoppedByObserver);
        assert_eq!(solution.steps, 3);
        assert_eq!(times, vec![0.0, 0.5, 1.0, 1.5]);
    }

    #[test]
    fn stage_errors_are_surfaced() {
        let model = Cooling {
            ambient: -1000.0,
            time_constant: 1.0,
        };

        let result = solve_unobserved(&model, &CoolingProblem, Input::at_rest(20.0), 0.5, 10);

        assert!(matches!(result, Err(Error::Model(_))));
    }
}
