//! Model Dynamics: the vector field of the Seven Books Model
//!
//! dy/dt = F(y, t) where:
//! - y = (x1, x2, x3, dwelling)
//! - x1..x3 are the interpretive facets, mutually exciting each other
//! - dwelling is a slow, self-limiting field that strengthens coupling and
//!   relieves decay while coherence is low
//! - t only enters through the optional forcing window on facet 1
//!
//! Calling convention is state-first, time-second.

use crate::activation::ActivationLaw;
use crate::error::Result;
use crate::params::ModelParams;
use crate::state::{ModelState, StateVector};
use serde::{Deserialize, Serialize};

/// A time-dependent vector field over [`StateVector`]s.
///
/// Implementors must be pure: the same `(state, time)` always yields the
/// same derivatives.
pub trait VectorField: Send + Sync {
    fn derivatives(&self, state: &StateVector, time: f64) -> StateVector;
}

/// Coupling and decay after dwelling has shaped them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DwellingModulation {
    pub coupling: f64,
    pub decay: f64,
}

/// The Seven Books vector field bound to one parameter set.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SevenBooksModel {
    params: ModelParams,
    law: ActivationLaw,
}

impl SevenBooksModel {
    pub fn new(params: ModelParams) -> Self {
        let law = ActivationLaw::from_params(&params);
        Self { params, law }
    }

    pub fn params(&self) -> &ModelParams {
        &self.params
    }

    /// Dwelling strengthens listening between facets and protects against
    /// premature closure.
    #[inline]
    pub fn modulation(&self, dwelling: f64) -> DwellingModulation {
        let p = &self.params;
        DwellingModulation {
            coupling: 1.0 + p.coupling_boost() * dwelling,
            decay: p.base_decay() * (1.0 - p.decay_relief() * dwelling),
        }
    }

    /// Rises under low coherence while there is headroom, fades in
    /// proportion to coherence and its own level.
    #[inline]
    pub fn dwelling_rate(&self, coherence: f64, dwelling: f64) -> f64 {
        let p = &self.params;
        p.dwelling_rise() * p.story_depth() * (1.0 - coherence) * (1.0 - dwelling)
            - p.dwelling_fade() * coherence * dwelling
    }

    fn evaluate(&self, state: ModelState, time: f64) -> StateVector {
        let s = state.clamped();
        let coherence = s.coherence();
        let d_dwelling = self.dwelling_rate(coherence, s.dwelling);

        let DwellingModulation { coupling, decay } = self.modulation(s.dwelling);

        let act1 = self.law.respond(s.x1);
        let act2 = self.law.respond(s.x2);
        let act3 = self.law.respond(s.x3);

        // Each facet is excited only by the other two.
        let mut dx1 = coupling * (act2 + act3) / 2.0 * (1.0 - s.x1) - decay * s.x1;
        let dx2 = coupling * (act1 + act3) / 2.0 * (1.0 - s.x2) - decay * s.x2;
        let dx3 = coupling * (act1 + act2) / 2.0 * (1.0 - s.x3) - decay * s.x3;

        dx1 += self.params.forcing().drive(time, s.x1);

        [dx1, dx2, dx3, d_dwelling]
    }
}

impl VectorField for SevenBooksModel {
    fn derivatives(&self, state: &StateVector, time: f64) -> StateVector {
        self.evaluate(ModelState::from_array(*state), time)
    }
}

/// Evaluate the vector field for a dynamically sized state.
///
/// Fails with [`ModelError::InvalidStateShape`](crate::ModelError) unless
/// `state` has exactly four components.
pub fn derivatives(state: &[f64], time: f64, params: &ModelParams) -> Result<StateVector> {
    let state = ModelState::from_slice(state)?;
    Ok(SevenBooksModel::new(params.clone()).evaluate(state, time))
}
