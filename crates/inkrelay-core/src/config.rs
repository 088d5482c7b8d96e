//! Capture configuration.

use crate::batcher::{CONTINUITY_POINTS, DEFAULT_BATCH_SIZE};
use crate::style::{ColourValue, StrokeAppearance, DEFAULT_LINE_WIDTH};
use kurbo::Vec2;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Offset subtracted from touch locations on each axis by default.
pub const DEFAULT_TOUCH_OFFSET: f64 = 10.0;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid config JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("batch_size must be at least {min}, got {got}")]
    BatchTooSmall { min: usize, got: usize },
    #[error("touch_offset must be a finite, non-negative number, got {0}")]
    InvalidTouchOffset(f64),
    #[error("initial_line_width must be finite and positive, got {0}")]
    InvalidLineWidth(f64),
}

/// Settings for one capture instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CaptureConfig {
    /// Buffered entries that trigger a continuing flush.
    pub batch_size: usize,
    /// Touch padding correction applied on both axes.
    pub touch_offset: f64,
    pub initial_colour: ColourValue,
    pub initial_line_width: f64,
    pub appearance: StrokeAppearance,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            batch_size: DEFAULT_BATCH_SIZE,
            touch_offset: DEFAULT_TOUCH_OFFSET,
            initial_colour: ColourValue::default(),
            initial_line_width: DEFAULT_LINE_WIDTH,
            appearance: StrokeAppearance::default(),
        }
    }
}

impl CaptureConfig {
    /// Set the batch size.
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size;
        self
    }

    /// Set the touch offset correction.
    pub fn with_touch_offset(mut self, offset: f64) -> Self {
        self.touch_offset = offset;
        self
    }

    /// Set the colour active before any palette selection.
    pub fn with_initial_colour(mut self, colour: impl Into<ColourValue>) -> Self {
        self.initial_colour = colour.into();
        self
    }

    pub fn touch_offset_vec(&self) -> Vec2 {
        Vec2::new(self.touch_offset, self.touch_offset)
    }

    /// Check the values for consistency.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let min = CONTINUITY_POINTS + 1;
        if self.batch_size < min {
            return Err(ConfigError::BatchTooSmall {
                min,
                got: self.batch_size,
            });
        }
        if !self.touch_offset.is_finite() || self.touch_offset < 0.0 {
            return Err(ConfigError::InvalidTouchOffset(self.touch_offset));
        }
        if !self.initial_line_width.is_finite() || self.initial_line_width <= 0.0 {
            return Err(ConfigError::InvalidLineWidth(self.initial_line_width));
        }
        Ok(())
    }

    /// Parse and validate a config from JSON. Missing fields take defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a config file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&json)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::LineCap;

    #[test]
    fn test_defaults() {
        let config = CaptureConfig::default();
        assert_eq!(config.batch_size, 1000);
        assert!((config.touch_offset - 10.0).abs() < f64::EPSILON);
        assert_eq!(config.initial_colour, ColourValue::new("black"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = CaptureConfig::from_json(r#"{"batch_size": 50, "appearance": {"blur": 0.0}}"#).unwrap();
        assert_eq!(config.batch_size, 50);
        assert!((config.touch_offset - 10.0).abs() < f64::EPSILON);
        assert_eq!(config.appearance.line_cap, LineCap::Round);
        assert!(config.appearance.blur.abs() < f64::EPSILON);
    }

    #[test]
    fn test_rejects_tiny_batch() {
        let result = CaptureConfig::from_json(r#"{"batch_size": 2}"#);
        assert!(matches!(result, Err(ConfigError::BatchTooSmall { min: 3, got: 2 })));
    }

    #[test]
    fn test_rejects_negative_offset() {
        let config = CaptureConfig::default().with_touch_offset(-1.0);
        assert!(matches!(config.validate(), Err(ConfigError::InvalidTouchOffset(_))));
    }

    #[test]
    fn test_missing_file() {
        let result = CaptureConfig::from_file("/nonexistent/inkrelay.json");
        assert!(matches!(result, Err(ConfigError::Io { .. })));
    }

    #[test]
    fn test_json_round_trip() {
        let config = CaptureConfig::default()
            .with_batch_size(64)
            .with_initial_colour("transparent");
        let parsed = CaptureConfig::from_json(&config.to_json().unwrap()).unwrap();
        assert_eq!(parsed, config);
    }
}
