use core::time::Duration;
use field_core::Camera;
use field_features::FeatureConfig;
use fovea::Thresholding;
use thiserror::Error;

#[cfg(feature = "serde-serialize")]
use serde::{Deserialize, Serialize};

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    #[error("the {0:?} camera must be sampled at a density of at least 1")]
    ZeroDensity(Camera),
    #[error("the threshold window must be at least 1 sample wide")]
    ZeroWindow,
    #[error("threshold percent {0} must be strictly between -100 and 100")]
    PercentOutOfRange(i32),
    #[error("the field must have a positive length and width, got {length} x {width}")]
    EmptyField { length: f64, width: f64 },
    #[error("consensus needs at least one iteration and two supporting points")]
    DegenerateConsensus,
    #[error("short lines ({short}) must be shorter than long lines ({long})")]
    LineLengths { short: f64, long: f64 },
    #[error("the goal box corner band {min}..{max} is empty")]
    GoalBoxBand { min: f64, max: f64 },
}

/// Configuration of one perception tick over both cameras.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct VisionConfig {
    pub thresholding: Thresholding,
    /// Raw pixels per sample on the top camera, which sees far away and needs less detail.
    pub top_density: usize,
    pub bottom_density: usize,
    pub features: FeatureConfig,
    /// Ticks that take longer than this are reported.
    pub budget: Duration,
}

impl Default for VisionConfig {
    fn default() -> Self {
        Self {
            thresholding: Thresholding::default(),
            top_density: 4,
            bottom_density: 2,
            features: FeatureConfig::default(),
            budget: Duration::from_millis(30),
        }
    }
}

impl VisionConfig {
    pub fn density(&self, camera: Camera) -> usize {
        match camera {
            Camera::Top => self.top_density,
            Camera::Bottom => self.bottom_density,
        }
    }

    /// Checks the values that would otherwise make a tick silently find nothing.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for camera in [Camera::Top, Camera::Bottom] {
            if self.density(camera) == 0 {
                return Err(ConfigError::ZeroDensity(camera));
            }
        }
        if self.thresholding.window_size == 0 {
            return Err(ConfigError::ZeroWindow);
        }
        if self.thresholding.percent <= -100 || self.thresholding.percent >= 100 {
            return Err(ConfigError::PercentOutOfRange(self.thresholding.percent));
        }

        let field = &self.features.field;
        if !(field.length > 0.0 && field.width > 0.0) {
            return Err(ConfigError::EmptyField {
                length: field.length,
                width: field.width,
            });
        }

        let fitting = &self.features.fitting;
        if fitting.ransac.iterations == 0
            || fitting.ransac.min_inliers < 2
            || fitting.lines_only_min_inliers < 2
        {
            return Err(ConfigError::DegenerateConsensus);
        }
        if fitting.short_line_length > fitting.min_line_length {
            return Err(ConfigError::LineLengths {
                short: fitting.short_line_length,
                long: fitting.min_line_length,
            });
        }

        let classifier = &self.features.classifier;
        if classifier.goal_box_corner_min >= classifier.goal_box_corner_max {
            return Err(ConfigError::GoalBoxBand {
                min: classifier.goal_box_corner_min,
                max: classifier.goal_box_corner_max,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_valid() {
        assert_eq!(VisionConfig::default().validate(), Ok(()));
    }

    #[test]
    fn bad_values_are_named() {
        let mut config = VisionConfig::default();
        config.bottom_density = 0;
        assert_eq!(
            config.validate(),
            Err(ConfigError::ZeroDensity(Camera::Bottom))
        );

        let mut config = VisionConfig::default();
        config.thresholding.percent = 100;
        assert_eq!(config.validate(), Err(ConfigError::PercentOutOfRange(100)));

        let mut config = VisionConfig::default();
        config.features.classifier.goal_box_corner_max = 300.0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::GoalBoxBand { .. })
        ));
    }
}
