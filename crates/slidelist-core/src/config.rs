//! Reorder configuration types.

use std::time::Duration;

use derive_builder::Builder;
use serde::{Deserialize, Serialize};

use crate::commit::CommitMode;
use crate::displacement::default_slide_threshold;
use crate::error::ReorderError;

/// Item height used when none is configured (pixels).
pub const DEFAULT_ITEM_HEIGHT: u32 = 50;

/// Configuration for drag-to-reorder on a list.
#[derive(Debug, Clone, PartialEq, Builder, Serialize, Deserialize)]
#[builder(setter(into), build_fn(validate = "Self::validate", error = "ReorderError"))]
pub struct ReorderConfig {
    /// Fixed height of every item, in pixels.
    #[serde(default = "default_item_height")]
    pub item_height: u32,

    /// How close the dragged item must get to a neighbor's far edge before
    /// the neighbor counts as passed. Defaults to half the item height.
    #[builder(default)]
    #[serde(default)]
    pub slide_threshold: Option<u32>,

    /// How long a press must be held before dragging starts.
    #[builder(default = "500")]
    #[serde(default = "default_long_press_ms")]
    pub long_press_threshold_ms: u64,

    /// Movement (pixels) tolerated while waiting for the long press.
    #[builder(default = "8.0")]
    #[serde(default = "default_touch_slop")]
    pub touch_slop: f32,

    /// Duration of the snap animation after release (0 = snap instantly).
    #[builder(default = "150")]
    #[serde(default = "default_settle_ms")]
    pub settle_duration_ms: u64,

    /// Interval between animation frames.
    #[builder(default = "16")]
    #[serde(default = "default_frame_ms")]
    pub frame_interval_ms: u64,

    /// How the host applies a finished drag to its list.
    #[builder(default)]
    #[serde(default)]
    pub commit_mode: CommitMode,
}

fn default_item_height() -> u32 {
    DEFAULT_ITEM_HEIGHT
}

fn default_long_press_ms() -> u64 {
    500
}

fn default_touch_slop() -> f32 {
    8.0
}

fn default_settle_ms() -> u64 {
    150
}

fn default_frame_ms() -> u64 {
    16
}

impl From<derive_builder::UninitializedFieldError> for ReorderError {
    fn from(err: derive_builder::UninitializedFieldError) -> Self {
        ReorderError::invalid_config(err.to_string())
    }
}

impl From<String> for ReorderError {
    fn from(message: String) -> Self {
        ReorderError::InvalidConfig { message }
    }
}

impl ReorderConfigBuilder {
    fn validate(&self) -> Result<(), String> {
        match self.item_height {
            Some(0) => return Err("Item height must be positive".to_string()),
            Some(height) => {
                if let Some(Some(threshold)) = self.slide_threshold
                    && threshold >= height
                {
                    return Err(format!(
                        "Slide threshold ({threshold}) must be smaller than the item height ({height})"
                    ));
                }
            }
            None => return Err("Item height is required".to_string()),
        }
        if self.frame_interval_ms == Some(0) {
            return Err("Frame interval must be positive".to_string());
        }
        Ok(())
    }
}

impl ReorderConfig {
    /// Create a new reorder config builder.
    pub fn builder() -> ReorderConfigBuilder {
        ReorderConfigBuilder::default()
    }

    /// Create a config with defaults for the given item height.
    pub fn new(item_height: u32) -> Self {
        Self {
            item_height,
            slide_threshold: None,
            long_press_threshold_ms: default_long_press_ms(),
            touch_slop: default_touch_slop(),
            settle_duration_ms: default_settle_ms(),
            frame_interval_ms: default_frame_ms(),
            commit_mode: CommitMode::default(),
        }
    }

    /// Effective slide threshold in pixels.
    pub fn slide_threshold(&self) -> u32 {
        self.slide_threshold
            .unwrap_or_else(|| default_slide_threshold(self.item_height))
    }

    /// Long-press threshold as a duration.
    pub fn long_press_threshold(&self) -> Duration {
        Duration::from_millis(self.long_press_threshold_ms)
    }

    /// Settle animation duration.
    pub fn settle_duration(&self) -> Duration {
        Duration::from_millis(self.settle_duration_ms)
    }

    /// Animation frame interval (never zero).
    pub fn frame_interval(&self) -> Duration {
        Duration::from_millis(self.frame_interval_ms.max(1))
    }

    /// Re-run builder validation on a config that came from elsewhere
    /// (for example a settings file).
    pub fn validated(self) -> Result<Self, ReorderError> {
        let builder = ReorderConfigBuilder {
            item_height: Some(self.item_height),
            slide_threshold: Some(self.slide_threshold),
            long_press_threshold_ms: Some(self.long_press_threshold_ms),
            touch_slop: Some(self.touch_slop),
            settle_duration_ms: Some(self.settle_duration_ms),
            frame_interval_ms: Some(self.frame_interval_ms),
            commit_mode: Some(self.commit_mode),
        };
        builder.validate()?;
        Ok(self)
    }
}

impl Default for ReorderConfig {
    fn default() -> Self {
        Self::new(DEFAULT_ITEM_HEIGHT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_builder() {
        let config = ReorderConfig::builder()
            .item_height(100u32)
            .settle_duration_ms(0u64)
            .commit_mode(CommitMode::Move)
            .build()
            .unwrap();

        assert_eq!(config.item_height, 100);
        assert_eq!(config.slide_threshold(), 50);
        assert_eq!(config.settle_duration(), Duration::ZERO);
        assert_eq!(config.commit_mode, CommitMode::Move);
        assert_eq!(config.long_press_threshold(), Duration::from_millis(500));
    }

    #[test]
    fn test_config_builder_rejects_zero_height() {
        let err = ReorderConfig::builder().item_height(0u32).build().unwrap_err();
        assert!(matches!(err, ReorderError::InvalidConfig { .. }));
    }

    #[test]
    fn test_config_builder_requires_height() {
        let err = ReorderConfig::builder().build().unwrap_err();
        assert!(matches!(err, ReorderError::InvalidConfig { .. }));
    }

    #[test]
    fn test_config_threshold_must_fit_item() {
        let err = ReorderConfig::builder()
            .item_height(40u32)
            .slide_threshold(40u32)
            .build()
            .unwrap_err();
        assert!(err.to_string().contains("Slide threshold"));

        let config = ReorderConfig::builder()
            .item_height(40u32)
            .slide_threshold(10u32)
            .build()
            .unwrap();
        assert_eq!(config.slide_threshold(), 10);
    }

    #[test]
    fn test_config_simple() {
        let config = ReorderConfig::default();
        assert_eq!(config.item_height, DEFAULT_ITEM_HEIGHT);
        assert_eq!(config.slide_threshold(), 25);
        assert_eq!(config.commit_mode, CommitMode::Swap);
        assert!(config.clone().validated().is_ok());

        let broken = ReorderConfig {
            item_height: 0,
            ..config
        };
        assert!(broken.validated().is_err());
    }
}
