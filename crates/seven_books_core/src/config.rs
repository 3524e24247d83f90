use crate::params::{ModelParams, ModelParamsBuilder};
use crate::state::StateVector;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

// ============================================================================
// Top-level config
// ============================================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SevenBooksConfig {
    pub model: ModelParamsBuilder,
    pub simulation: SimulationConfig,
}

impl SevenBooksConfig {
    /// Load config from a TOML file, falling back to defaults for missing fields.
    /// After loading, env var overrides are applied.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;
        let mut config: SevenBooksConfig =
            toml::from_str(&content).with_context(|| "Failed to parse TOML config")?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load from path if the file exists; otherwise return defaults with env
    /// overrides. A file that exists but cannot be read or parsed is an error.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            return Self::load(path);
        }
        tracing::info!("Config file {} not found, using defaults", path.display());
        let mut cfg = Self::default();
        cfg.apply_env_overrides();
        Ok(cfg)
    }

    /// Validated model parameters for this config.
    pub fn params(&self) -> Result<ModelParams> {
        self.model
            .clone()
            .build()
            .context("Invalid [model] parameters")
    }

    /// Apply environment variable overrides on top of file-based config.
    fn apply_env_overrides(&mut self) {
        if let Some(v) = env_parse::<f64>("SEVEN_BOOKS_NUDGE_TIME") {
            self.model.nudge_time = Some(v);
        }
        if let Some(v) = env_parse("SEVEN_BOOKS_STORY_DEPTH") {
            self.model.story_depth = v;
        }
        if let Some(v) = env_parse("SEVEN_BOOKS_T_END") {
            self.simulation.t_end = v;
        }
        if let Some(v) = env_parse("SEVEN_BOOKS_SAMPLES") {
            self.simulation.samples = v;
        }
    }
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    let raw = std::env::var(key).ok()?;
    match raw.parse() {
        Ok(v) => Some(v),
        Err(_) => {
            tracing::warn!("Ignoring {}={:?}: not a valid number", key, raw);
            None
        }
    }
}

// ============================================================================
// Sub-configs
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Initial `(x1, x2, x3, dwelling)`.
    pub initial_state: StateVector,
    /// Query grid is `linspace(0, t_end, samples)`.
    pub t_end: f64,
    pub samples: usize,
    /// Integrator sub-steps between consecutive query times.
    pub substeps: usize,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            initial_state: [0.2, 0.1, 0.15, 0.6],
            t_end: 50.0,
            samples: 500,
            substeps: 10,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
