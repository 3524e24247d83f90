//! Error taxonomy for the model core.

use thiserror::Error;

/// Contract violations surfaced by the model core.
///
/// Numerical non-finiteness is deliberately absent: `NaN`/`Inf` derivatives
/// propagate unmodified and are reported by the integration layer.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ModelError {
    #[error("state vector must have {expected} components, got {actual}")]
    InvalidStateShape { expected: usize, actual: usize },

    #[error("invalid parameter `{name}` = {value}: {reason}")]
    InvalidParameters {
        name: &'static str,
        value: f64,
        reason: &'static str,
    },
}

pub type Result<T> = std::result::Result<T, ModelError>;
