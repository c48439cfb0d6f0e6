//! Engine configuration, validation, and error types.
//!
//! [`HandoffConfig`] is the builder-input for a
//! [`TrackingEngine`](crate::TrackingEngine). [`validate()`](HandoffConfig::validate)
//! checks it against the scene at construction time.

use handoff_core::ObjectId;
use handoff_scene::Scene;
use thiserror::Error;

// ── ScoreWeights ───────────────────────────────────────────────────

/// Multipliers for the three distance terms of the matching score.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScoreWeights {
    /// Weight of the Manhattan position distance. Default: 0.1. Must be
    /// strictly positive, otherwise a candidate further from the
    /// predicted position would no longer score worse.
    pub position: f64,
    /// Weight of the mean absolute appearance difference. Default: 1.0.
    pub appearance: f64,
    /// Weight of the effective bounding-box size difference. Default: 4.0.
    pub size: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            position: 0.1,
            appearance: 1.0,
            size: 4.0,
        }
    }
}

// ── ConfigError ────────────────────────────────────────────────────

/// Errors detected during [`HandoffConfig::validate()`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// A score weight is negative, NaN or infinite, or the position weight
    /// is zero.
    #[error("{name} weight {value} is out of range")]
    InvalidWeight {
        /// Which weight.
        name: &'static str,
        /// The rejected value.
        value: f64,
    },
    /// The match threshold is negative, NaN or infinite.
    #[error("match_threshold must be finite and >= 0, got {value}")]
    InvalidThreshold {
        /// The rejected value.
        value: f64,
    },
    /// The target object is not in the scene.
    #[error("target object {target} is not in the scene")]
    UnknownTarget {
        /// The configured target.
        target: ObjectId,
    },
}

// ── HandoffConfig ──────────────────────────────────────────────────

/// Tracking engine configuration.
#[derive(Clone, Debug, PartialEq)]
pub struct HandoffConfig {
    /// Score term weights.
    pub weights: ScoreWeights,
    /// Largest score a re-identification may have and still count.
    /// `None` (the default) accepts the best candidate however poor.
    pub match_threshold: Option<f64>,
    /// The object to acquire and track. Default: object 0.
    pub target: ObjectId,
}

impl Default for HandoffConfig {
    fn default() -> Self {
        Self {
            weights: ScoreWeights::default(),
            match_threshold: None,
            target: ObjectId(0),
        }
    }
}

impl HandoffConfig {
    /// Track `target` with default weights and no threshold.
    pub fn for_target(target: ObjectId) -> Self {
        Self {
            target,
            ..Self::default()
        }
    }

    /// Check weights, threshold, and that the target exists in `scene`.
    pub fn validate(&self, scene: &Scene) -> Result<(), ConfigError> {
        let w = &self.weights;
        for (name, value, min_exclusive) in [
            ("position", w.position, true),
            ("appearance", w.appearance, false),
            ("size", w.size, false),
        ] {
            let below = if min_exclusive { value <= 0.0 } else { value < 0.0 };
            if !value.is_finite() || below {
                return Err(ConfigError::InvalidWeight { name, value });
            }
        }
        if let Some(value) = self.match_threshold {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidThreshold { value });
            }
        }
        if scene.object(self.target).is_none() {
            return Err(ConfigError::UnknownTarget {
                target: self.target,
            });
        }
        Ok(())
    }

    /// Whether a best-match score is good enough to re-home responsibility.
    pub fn accepts(&self, score: f64) -> bool {
        self.match_threshold.map_or(true, |t| score <= t)
    }
}
