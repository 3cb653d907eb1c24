use crate::{Blackboard, ConfigError, VisionConfig};
use field_core::{Camera, CameraToRobot, Feature, FieldPoint};
use field_features::FieldFeatureDetector;
use fovea::{BodyPartMask, BufferError, Colour, PixelBuffer, ScanStarts};
use log::*;
use ndarray::Array2;
use std::time::{Duration, Instant};
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum VisionError {
    #[error("invalid vision configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("unusable camera frame: {0}")]
    Frame(#[from] BufferError),
}

/// An owned copy of one camera frame in packed YUV422.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Frame {
    pub width: usize,
    pub height: usize,
    pub bytes: Vec<u8>,
}

impl Frame {
    pub fn new(width: usize, height: usize, bytes: Vec<u8>) -> Self {
        Self {
            width,
            height,
            bytes,
        }
    }

    pub fn buffer(&self, camera: Camera) -> Result<PixelBuffer<'_>, BufferError> {
        PixelBuffer::new(camera, self.width, self.height, &self.bytes)
    }
}

/// What one camera contributes to a tick.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CameraInput {
    pub frame: Frame,
    /// First ground row of every raw column.
    pub starts: ScanStarts,
    pub body_parts: Option<BodyPartMask>,
}

/// Everything a tick reads, captured together at its start.
#[derive(Debug, Clone, PartialEq)]
pub struct PerceptionInput<T> {
    pub top: CameraInput,
    pub bottom: CameraInput,
    pub transform: T,
    /// Player number of this robot. Player 1 keeps goal.
    pub player: u8,
}

impl<T> PerceptionInput<T> {
    pub fn camera(&self, camera: Camera) -> &CameraInput {
        match camera {
            Camera::Top => &self.top,
            Camera::Bottom => &self.bottom,
        }
    }
}

/// The result of one tick.
#[derive(Debug, Clone, PartialEq)]
pub struct VisionOutput {
    pub features: Vec<Feature>,
    pub points: Vec<FieldPoint>,
    /// Colour classification of each whole frame, for detectors that share the tick.
    pub top_colours: Array2<Colour>,
    pub bottom_colours: Array2<Colour>,
    pub elapsed: Duration,
}

/// Runs segmentation and landmark detection over both cameras once per frame.
#[derive(Debug, Clone)]
pub struct VisionPipeline {
    config: VisionConfig,
    detector: FieldFeatureDetector,
}

impl VisionPipeline {
    pub fn new(config: VisionConfig) -> Result<Self, VisionError> {
        config.validate()?;
        Ok(Self {
            config,
            detector: FieldFeatureDetector::new(config.features),
        })
    }

    pub fn config(&self) -> &VisionConfig {
        &self.config
    }

    /// Processes one snapshot of both cameras.
    pub fn tick<T>(&self, input: &PerceptionInput<T>) -> Result<VisionOutput, VisionError>
    where
        T: CameraToRobot,
    {
        let start = Instant::now();
        let thresholding = &self.config.thresholding;
        let segment = |camera: Camera| -> Result<_, BufferError> {
            let camera_input = input.camera(camera);
            let buffer = camera_input.frame.buffer(camera)?;
            Ok(thresholding.segment_frame(
                buffer,
                self.config.density(camera),
                camera_input.body_parts.as_ref(),
            ))
        };
        let top = segment(Camera::Top)?;
        let bottom = segment(Camera::Bottom)?;

        let detection = self.detector.detect(
            [(&top, &input.top.starts), (&bottom, &input.bottom.starts)],
            &input.transform,
            input.player,
        );

        let elapsed = start.elapsed();
        if elapsed > self.config.budget {
            warn!(
                "perception tick took {:?}, over the {:?} budget",
                elapsed, self.config.budget
            );
        }
        info!(
            "tick found {} features from {} points in {:?}",
            detection.features.len(),
            detection.points.len(),
            elapsed
        );
        Ok(VisionOutput {
            features: detection.features,
            points: detection.points,
            top_colours: top.into_colours(),
            bottom_colours: bottom.into_colours(),
            elapsed,
        })
    }

    /// Reads the latest input, runs a tick and publishes its features.
    ///
    /// The input is copied out under the read lock and the features are written under the
    /// write lock in one step. A failed tick publishes nothing.
    pub fn run<T>(
        &self,
        input: &Blackboard<PerceptionInput<T>>,
        features: &Blackboard<Vec<Feature>>,
    ) -> Result<VisionOutput, VisionError>
    where
        T: CameraToRobot + Clone,
    {
        let snapshot = input.snapshot();
        trace!("tick on input generation {}", snapshot.generation);
        let output = self.tick(&snapshot.value)?;
        features.publish(output.features.clone());
        Ok(output)
    }
}
