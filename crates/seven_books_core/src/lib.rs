//! # The Seven Books Model
//!
//! Understanding as a dynamical system: three interpretive facets excite one
//! another through a steep Hill activation, while a slow dwelling field
//! strengthens their coupling and relieves their decay whenever coherence is
//! low. An optional pulse on facet 1 models a time-localized intervention.
//!
//! The crate is the vector field and its parameterization. Integration lives
//! in `seven_books_sim`.

pub mod activation;
pub mod config;
pub mod dynamics;
pub mod error;
pub mod params;
pub mod state;

pub use activation::{hill, ActivationLaw};
pub use config::{SevenBooksConfig, SimulationConfig};
pub use dynamics::{derivatives, DwellingModulation, SevenBooksModel, VectorField};
pub use error::ModelError;
pub use params::{Forcing, ModelParams, ModelParamsBuilder};
pub use state::{coherence_of, ModelState, StateVector, STATE_DIM};
