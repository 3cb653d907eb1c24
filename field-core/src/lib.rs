//! # Field Core
//!
//! Common types shared by every crate in the field perception pipeline. A camera frame
//! is segmented into a [`Fovea`](https://docs.rs/fovea), candidate line points are pulled
//! out of the segmentation, lines and circles are fitted to the points, and the fitted
//! models are classified into the landmarks found on a soccer field. This crate holds
//! the vocabulary those stages speak to each other:
//!
//! * [`FieldPoint`] for an accepted line sample in both image and robot-relative space
//! * [`FieldLine`] and [`Circle`] for the fitted models (these implement
//!   [`sample_consensus::Model`] so they plug into any consensus algorithm)
//! * [`Feature`] for the typed landmark output of one tick
//! * [`CameraToRobot`] for the calibrated transform between image pixels and the ground
//!
//! ## Coordinate frames
//!
//! Robot-relative coordinates are in millimetres on the ground plane. The X axis points
//! forwards out of the robot's chest and the Y axis points to the robot's left. A heading
//! of `0` is straight ahead and headings grow counter-clockwise.
//!
//! ```text
//!              +x
//!               ^
//!               |
//!     +y <------R
//! ```
//!
//! Image coordinates are raw camera pixels with the X axis to the right and the Y axis
//! pointing down.
//!
//! The crate is `#![no_std]`; `libm` is used (through [`num-traits`]) for the math.

#![no_std]

mod camera;
mod feature;
mod geometry;
mod line;
mod point;

pub use camera::*;
pub use feature::*;
pub use geometry::*;
pub use line::*;
pub use nalgebra;
pub use point::*;
pub use sample_consensus;
