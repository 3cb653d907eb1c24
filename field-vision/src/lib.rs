//! # `field-vision`
//!
//! Soccer field perception for a robot with two head cameras.
//!
//! Every tick takes the newest frame from each camera, segments it into field colours,
//! finds the painted lines and reports the landmarks they form. The stages live in their
//! own crates and are re-exported here:
//!
//! * [`segment`] - adaptive threshold segmentation of camera regions
//! * [`consensus`] - RANSAC fitting of lines and the centre circle
//! * [`features`] - line points, fitting rounds and landmark classification
//!
//! [`VisionPipeline`] wires the stages together with a [`VisionConfig`]. Inputs and outputs
//! are exchanged with other threads through a [`Blackboard`].
//!
//! ```no_run
//! use field_vision::{Blackboard, PerceptionInput, VisionConfig, VisionPipeline};
//! # fn run(input: PerceptionInput<field_vision::CameraPair>) -> Result<(), field_vision::VisionError> {
//! let pipeline = VisionPipeline::new(VisionConfig::default())?;
//! let inputs = Blackboard::new(input);
//! let features = Blackboard::new(Vec::new());
//! let output = pipeline.run(&inputs, &features)?;
//! println!("{} features", output.features.len());
//! # Ok(())
//! # }
//! ```

mod board;
mod config;
mod pipeline;

pub use board::*;
pub use config::*;
pub use field_core::*;
pub use pipeline::*;

/// Segmentation of camera frames
pub mod segment {
    pub use fovea::*;
}

/// Consensus fitting of field models
pub mod consensus {
    pub use field_ransac::*;
}

/// Landmark detection
pub mod features {
    pub use field_features::*;
}
