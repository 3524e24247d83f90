//! State vector of the Seven Books Model.
//!
//! The state is an ordered 4-tuple `(x1, x2, x3, dwelling)`, mapped
//! positionally. Every component is conceptually bounded to `[0, 1]`.

use crate::error::{ModelError, Result};
use serde::{Deserialize, Serialize};

pub const STATE_DIM: usize = 4;

pub const X1: usize = 0;
pub const X2: usize = 1;
pub const X3: usize = 2;
pub const DWELLING: usize = 3;

/// Positional state (and derivative) vector.
pub type StateVector = [f64; STATE_DIM];

/// Mean of the three facets.
#[inline]
pub fn coherence_of(state: &StateVector) -> f64 {
    (state[X1] + state[X2] + state[X3]) / 3.0
}

/// Named view over a [`StateVector`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ModelState {
    pub x1: f64,
    pub x2: f64,
    pub x3: f64,
    pub dwelling: f64,
}

impl Default for ModelState {
    /// Low activation, moderate dwelling.
    fn default() -> Self {
        Self::from_array([0.2, 0.1, 0.15, 0.6])
    }
}

impl ModelState {
    pub fn from_array(v: StateVector) -> Self {
        Self {
            x1: v[X1],
            x2: v[X2],
            x3: v[X3],
            dwelling: v[DWELLING],
        }
    }

    /// Fails unless `values` has exactly [`STATE_DIM`] components.
    pub fn from_slice(values: &[f64]) -> Result<Self> {
        let array: StateVector =
            values
                .try_into()
                .map_err(|_| ModelError::InvalidStateShape {
                    expected: STATE_DIM,
                    actual: values.len(),
                })?;
        Ok(Self::from_array(array))
    }

    pub fn to_array(self) -> StateVector {
        [self.x1, self.x2, self.x3, self.dwelling]
    }

    /// Clamp every component into `[0, 1]`. `NaN` passes through.
    pub fn clamped(self) -> Self {
        Self {
            x1: self.x1.clamp(0.0, 1.0),
            x2: self.x2.clamp(0.0, 1.0),
            x3: self.x3.clamp(0.0, 1.0),
            dwelling: self.dwelling.clamp(0.0, 1.0),
        }
    }

    pub fn facets(&self) -> [f64; 3] {
        [self.x1, self.x2, self.x3]
    }

    pub fn coherence(&self) -> f64 {
        coherence_of(&self.to_array())
    }
}

impl From<StateVector> for ModelState {
    fn from(v: StateVector) -> Self {
        Self::from_array(v)
    }
}

impl From<ModelState> for StateVector {
    fn from(s: ModelState) -> Self {
        s.to_array()
    }
}
