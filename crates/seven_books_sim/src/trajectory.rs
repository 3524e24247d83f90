//! Trajectory: the integrator's output, an ordered sequence of states
//! aligned to the query times.

use seven_books_core::state::{coherence_of, DWELLING};
use seven_books_core::StateVector;
use serde::Serialize;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Trajectory {
    times: Vec<f64>,
    states: Vec<StateVector>,
}

impl Trajectory {
    pub(crate) fn with_capacity(n: usize) -> Self {
        Self {
            times: Vec::with_capacity(n),
            states: Vec::with_capacity(n),
        }
    }

    pub(crate) fn push(&mut self, time: f64, state: StateVector) {
        self.times.push(time);
        self.states.push(state);
    }

    pub fn len(&self) -> usize {
        self.times.len()
    }

    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    pub fn times(&self) -> &[f64] {
        &self.times
    }

    pub fn states(&self) -> &[StateVector] {
        &self.states
    }

    pub fn final_state(&self) -> Option<&StateVector> {
        self.states.last()
    }

    /// `(time, state)` pairs in order.
    pub fn samples(&self) -> impl Iterator<Item = (f64, &StateVector)> + '_ {
        self.times.iter().copied().zip(self.states.iter())
    }

    /// Facet `index` (0, 1 or 2) over time; `None` for any other index.
    pub fn facet(&self, index: usize) -> Option<Vec<f64>> {
        (index < DWELLING).then(|| self.series(index))
    }

    pub fn dwelling(&self) -> Vec<f64> {
        self.series(DWELLING)
    }

    fn series(&self, index: usize) -> Vec<f64> {
        self.states.iter().map(|s| s[index]).collect()
    }

    /// Facet mean over time.
    pub fn coherence(&self) -> Vec<f64> {
        self.states.iter().map(coherence_of).collect()
    }

    /// First sampled time at which coherence is at least `level`.
    pub fn first_time_coherence_reaches(&self, level: f64) -> Option<f64> {
        self.samples()
            .find(|(_, s)| coherence_of(s) >= level)
            .map(|(t, _)| t)
    }

    pub fn peak_dwelling(&self) -> Option<f64> {
        self.states
            .iter()
            .map(|s| s[DWELLING])
            .reduce(f64::max)
    }
}
