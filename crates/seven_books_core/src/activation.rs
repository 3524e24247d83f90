//! Activation Law: a Hill-type saturating sigmoid.
//!
//! ```text
//! hill(x) = gamma * x^n / (threshold^n + x^n)
//!         = gamma / (1 + (threshold / x)^n)      (x != 0)
//! ```
//!
//! The second form is what gets evaluated: it cannot underflow into `0/0`
//! when `threshold^n` and `x^n` are both tiny.
//!
//! Insight emerges sharply once `x` crosses `threshold`; `n` (steepness)
//! controls how sharp the transition is.

use crate::params::ModelParams;
use serde::{Deserialize, Serialize};

/// Evaluate the Hill response for `x`.
///
/// Does not clamp. Finite for every `x >= 0` when `threshold > 0`; negative
/// `x` mirrors the positive branch for even steepness and has a pole at
/// `x = -threshold` for odd steepness. Steepness beyond `i32::MAX` saturates
/// there.
#[inline]
pub fn hill(x: f64, gamma: f64, threshold: f64, steepness: u32) -> f64 {
    let n = i32::try_from(steepness).unwrap_or(i32::MAX);
    if x == 0.0 {
        return 0.0;
    }
    gamma / (1.0 + (threshold / x).powi(n))
}

/// The activation parameters shared by all three facets.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ActivationLaw {
    pub gamma: f64,
    pub threshold: f64,
    pub steepness: u32,
}

impl ActivationLaw {
    pub fn from_params(params: &ModelParams) -> Self {
        Self {
            gamma: params.gamma(),
            threshold: params.threshold(),
            steepness: params.steepness(),
        }
    }

    #[inline]
    pub fn respond(&self, x: f64) -> f64 {
        hill(x, self.gamma, self.threshold, self.steepness)
    }
}

impl Default for ActivationLaw {
    fn default() -> Self {
        Self::from_params(&ModelParams::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_input_gives_zero() {
        assert_eq!(hill(0.0, 10.0, 0.5, 6), 0.0);
    }

    #[test]
    fn test_half_activation_at_threshold() {
        let law = ActivationLaw::default();
        assert!((law.respond(0.5) - 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_saturates_toward_gamma() {
        let law = ActivationLaw::default();
        let ratio = law.respond(100.0) / law.gamma;
        assert!(ratio > 0.999, "expected near-saturation, got {}", ratio);
        assert!(law.respond(100.0) < law.gamma);
    }

    #[test]
    fn test_steeper_law_is_sharper_around_threshold() {
        // Below threshold a steeper law responds less, above it responds more.
        let shallow = |x| hill(x, 10.0, 0.5, 2);
        let steep = |x| hill(x, 10.0, 0.5, 8);
        assert!(steep(0.4) < shallow(0.4));
        assert!(steep(0.6) > shallow(0.6));
    }

    #[test]
    fn test_huge_steepness_keeps_zero_at_origin() {
        assert_eq!(hill(0.0, 10.0, 0.5, u32::MAX), 0.0);
        assert!(hill(0.4, 10.0, 0.5, u32::MAX).is_finite());
        assert_eq!(hill(0.4, 10.0, 0.5, i32::MAX as u32), 0.0);
        assert_eq!(hill(0.6, 10.0, 0.5, i32::MAX as u32), 10.0);
    }

    #[test]
    fn test_tiny_threshold_does_not_underflow_to_nan() {
        let v = hill(1e-60, 10.0, 1e-60, 6);
        assert!((v - 5.0).abs() < 1e-12, "got {}", v);
    }

    #[test]
    fn test_matches_textbook_form() {
        for x in [0.05f64, 0.2, 0.45, 0.5, 0.55, 0.9, 1.0] {
            let n = 6;
            let textbook = 10.0 * x.powi(n) / (0.5f64.powi(n) + x.powi(n));
            assert!((hill(x, 10.0, 0.5, 6) - textbook).abs() < 1e-12);
        }
    }

    #[test]
    fn test_negative_input_is_finite() {
        // Integer exponent: even steepness mirrors the positive branch.
        let v = hill(-0.3, 10.0, 0.5, 6);
        assert!(v.is_finite());
        assert!((v - hill(0.3, 10.0, 0.5, 6)).abs() < 1e-12);
    }

    #[test]
    fn test_from_params_copies_shared_fields() {
        let params = ModelParams::builder()
            .gamma(4.0)
            .threshold(0.3)
            .steepness(2)
            .build()
            .unwrap();
        let law = ActivationLaw::from_params(&params);
        assert_eq!(law.gamma, 4.0);
        assert_eq!(law.threshold, 0.3);
        assert_eq!(law.steepness, 2);
    }
}
