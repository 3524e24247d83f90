//! Parameter set for the Seven Books Model.
//!
//! [`ModelParams`] is immutable once built. All construction goes through
//! [`ModelParamsBuilder::build`], which validates every field up front so the
//! derivative call never has to.

use crate::error::{ModelError, Result};
use serde::{Deserialize, Serialize};

/// Time-localized additive pulse on facet 1 ("grace").
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Forcing {
    /// No intervention.
    Off,
    /// Pulse active on the half-open window `[start, start + duration)`.
    Windowed {
        start: f64,
        duration: f64,
        strength: f64,
    },
}

impl Forcing {
    #[inline]
    pub fn is_active(&self, time: f64) -> bool {
        match *self {
            Forcing::Off => false,
            Forcing::Windowed {
                start, duration, ..
            } => start <= time && time < start + duration,
        }
    }

    /// Additive drive on facet 1; saturates as `x1 -> 1`.
    #[inline]
    pub fn drive(&self, time: f64, x1: f64) -> f64 {
        match *self {
            Forcing::Windowed { strength, .. } if self.is_active(time) => strength * (1.0 - x1),
            _ => 0.0,
        }
    }

    pub fn start(&self) -> Option<f64> {
        match *self {
            Forcing::Off => None,
            Forcing::Windowed { start, .. } => Some(start),
        }
    }
}

/// Validated, immutable model parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ModelParamsBuilder", into = "ModelParamsBuilder")]
pub struct ModelParams {
    gamma: f64,
    threshold: f64,
    steepness: u32,
    base_decay: f64,
    dwelling_rise: f64,
    dwelling_fade: f64,
    coupling_boost: f64,
    decay_relief: f64,
    story_depth: f64,
    forcing: Forcing,
    /// Pulse shape, kept even while forcing is off so moving the pulse
    /// later preserves it.
    nudge_duration: f64,
    nudge_strength: f64,
}

impl Default for ModelParams {
    fn default() -> Self {
        Self {
            gamma: 10.0,
            threshold: 0.5,
            steepness: 6,
            base_decay: 0.22,
            dwelling_rise: 0.35,
            dwelling_fade: 0.45,
            coupling_boost: 0.8,
            decay_relief: 0.6,
            story_depth: 0.8,
            forcing: Forcing::Off,
            nudge_duration: 2.0,
            nudge_strength: 0.5,
        }
    }
}

impl ModelParams {
    pub fn builder() -> ModelParamsBuilder {
        ModelParamsBuilder::default()
    }

    /// Start a builder pre-filled with these values, for partial overrides.
    pub fn to_builder(&self) -> ModelParamsBuilder {
        ModelParamsBuilder::from(self.clone())
    }

    /// Same parameters with the forcing pulse moved to `start` (or removed).
    ///
    /// Keeps the configured pulse duration and strength.
    pub fn with_nudge_time(&self, start: Option<f64>) -> Result<Self> {
        let mut builder = self.to_builder();
        builder.nudge_time = start;
        builder.build()
    }

    pub fn gamma(&self) -> f64 {
        self.gamma
    }
    pub fn threshold(&self) -> f64 {
        self.threshold
    }
    pub fn steepness(&self) -> u32 {
        self.steepness
    }
    pub fn base_decay(&self) -> f64 {
        self.base_decay
    }
    pub fn dwelling_rise(&self) -> f64 {
        self.dwelling_rise
    }
    pub fn dwelling_fade(&self) -> f64 {
        self.dwelling_fade
    }
    pub fn coupling_boost(&self) -> f64 {
        self.coupling_boost
    }
    pub fn decay_relief(&self) -> f64 {
        self.decay_relief
    }
    pub fn story_depth(&self) -> f64 {
        self.story_depth
    }
    pub fn forcing(&self) -> Forcing {
        self.forcing
    }
}

/// Unvalidated parameter bundle, named after the model's published defaults.
///
/// Missing fields in TOML fall back to the defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelParamsBuilder {
    pub gamma: f64,
    pub threshold: f64,
    pub steepness: u32,
    pub base_decay: f64,
    pub dwelling_rise: f64,
    pub dwelling_fade: f64,
    pub coupling_boost: f64,
    pub decay_relief: f64,
    pub story_depth: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nudge_time: Option<f64>,
    pub nudge_duration: f64,
    pub nudge_strength: f64,
}

impl Default for ModelParamsBuilder {
    fn default() -> Self {
        Self::from(ModelParams::default())
    }
}

impl From<ModelParams> for ModelParamsBuilder {
    fn from(p: ModelParams) -> Self {
        Self {
            gamma: p.gamma,
            threshold: p.threshold,
            steepness: p.steepness,
            base_decay: p.base_decay,
            dwelling_rise: p.dwelling_rise,
            dwelling_fade: p.dwelling_fade,
            coupling_boost: p.coupling_boost,
            decay_relief: p.decay_relief,
            story_depth: p.story_depth,
            nudge_time: p.forcing.start(),
            nudge_duration: p.nudge_duration,
            nudge_strength: p.nudge_strength,
        }
    }
}

impl TryFrom<ModelParamsBuilder> for ModelParams {
    type Error = ModelError;

    fn try_from(builder: ModelParamsBuilder) -> Result<Self> {
        builder.build()
    }
}

fn require(name: &'static str, value: f64, ok: bool, reason: &'static str) -> Result<()> {
    if value.is_finite() && ok {
        Ok(())
    } else {
        Err(ModelError::InvalidParameters {
            name,
            value,
            reason,
        })
    }
}

impl ModelParamsBuilder {
    pub fn gamma(mut self, v: f64) -> Self {
        self.gamma = v;
        self
    }
    pub fn threshold(mut self, v: f64) -> Self {
        self.threshold = v;
        self
    }
    pub fn steepness(mut self, v: u32) -> Self {
        self.steepness = v;
        self
    }
    pub fn base_decay(mut self, v: f64) -> Self {
        self.base_decay = v;
        self
    }
    pub fn dwelling_rise(mut self, v: f64) -> Self {
        self.dwelling_rise = v;
        self
    }
    pub fn dwelling_fade(mut self, v: f64) -> Self {
        self.dwelling_fade = v;
        self
    }
    pub fn coupling_boost(mut self, v: f64) -> Self {
        self.coupling_boost = v;
        self
    }
    pub fn decay_relief(mut self, v: f64) -> Self {
        self.decay_relief = v;
        self
    }
    pub fn story_depth(mut self, v: f64) -> Self {
        self.story_depth = v;
        self
    }
    pub fn nudge_time(mut self, v: Option<f64>) -> Self {
        self.nudge_time = v;
        self
    }
    pub fn nudge_duration(mut self, v: f64) -> Self {
        self.nudge_duration = v;
        self
    }
    pub fn nudge_strength(mut self, v: f64) -> Self {
        self.nudge_strength = v;
        self
    }

    /// Validate and freeze.
    pub fn build(self) -> Result<ModelParams> {
        require("gamma", self.gamma, self.gamma >= 0.0, "must be non-negative")?;
        require(
            "threshold",
            self.threshold,
            self.threshold > 0.0,
            "must be positive",
        )?;
        if self.steepness == 0 || i32::try_from(self.steepness).is_err() {
            return Err(ModelError::InvalidParameters {
                name: "steepness",
                value: self.steepness as f64,
                reason: "must be a positive integer no larger than i32::MAX",
            });
        }
        for (name, value) in [
            ("base_decay", self.base_decay),
            ("dwelling_rise", self.dwelling_rise),
            ("dwelling_fade", self.dwelling_fade),
            ("coupling_boost", self.coupling_boost),
            ("story_depth", self.story_depth),
        ] {
            require(name, value, value >= 0.0, "must be non-negative")?;
        }
        require(
            "decay_relief",
            self.decay_relief,
            (0.0..1.0).contains(&self.decay_relief),
            "must lie in [0, 1) to keep decay non-negative",
        )?;

        let forcing = match self.nudge_time {
            None => Forcing::Off,
            Some(start) => {
                require("nudge_time", start, true, "must be finite")?;
                require(
                    "nudge_duration",
                    self.nudge_duration,
                    self.nudge_duration >= 0.0,
                    "must be non-negative",
                )?;
                require(
                    "nudge_strength",
                    self.nudge_strength,
                    self.nudge_strength >= 0.0,
                    "must be non-negative",
                )?;
                Forcing::Windowed {
                    start,
                    duration: self.nudge_duration,
                    strength: self.nudge_strength,
                }
            }
        };

        tracing::debug!(?forcing, story_depth = self.story_depth, "model parameters built");

        Ok(ModelParams {
            gamma: self.gamma,
            threshold: self.threshold,
            steepness: self.steepness,
            base_decay: self.base_decay,
            dwelling_rise: self.dwelling_rise,
            dwelling_fade: self.dwelling_fade,
            coupling_boost: self.coupling_boost,
            decay_relief: self.decay_relief,
            story_depth: self.story_depth,
            forcing,
            nudge_duration: self.nudge_duration,
            nudge_strength: self.nudge_strength,
        })
    }
}
