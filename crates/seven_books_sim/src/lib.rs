//! seven_books_sim: integration collaborator for the Seven Books Model.
//!
//! Drives any [`VectorField`](seven_books_core::VectorField) over a grid of
//! query times and reports the resulting trajectory:
//! - [`integrator`]: fixed-step RK4 with sub-stepping
//! - [`trajectory`]: the state sequence and its derived series
//! - [`scenario`]: intervention timing comparisons

pub mod integrator;
pub mod scenario;
pub mod trajectory;

pub use integrator::{linspace, Rk4};
pub use scenario::{compare, run_scenario, Scenario, ScenarioOutcome};
pub use trajectory::Trajectory;

use seven_books_core::{ModelError, ModelParams, SevenBooksModel, SimulationConfig};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimError {
    #[error("integrator needs at least one substep")]
    ZeroSubsteps,

    #[error("query times must be strictly increasing (violated at index {index})")]
    NonMonotonicTimes { index: usize },

    #[error("state component {component} became non-finite at t={time}")]
    NonFinite { time: f64, component: usize },

    #[error(transparent)]
    Model(#[from] ModelError),
}

/// Integrate `params` over the grid described by `sim`.
pub fn simulate(params: &ModelParams, sim: &SimulationConfig) -> Result<Trajectory, SimError> {
    let times = linspace(0.0, sim.t_end, sim.samples);
    let model = SevenBooksModel::new(params.clone());
    Rk4::new(sim.substeps).integrate(&model, sim.initial_state, &times)
}
