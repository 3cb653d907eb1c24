//! # Field Features
//!
//! Finds the landmarks of a soccer field in segmented camera frames.
//!
//! The detector runs in stages, each its own module:
//!
//! 1. [`find_points`] scans the rows and columns of a [`fovea::Fovea`] for white runs
//!    between green and projects the middle of each onto the ground
//! 2. [`filter_occluded`] drops points that crowd into one patch of the field
//! 3. [`fit_features`] pulls lines and the centre circle out of the points with RANSAC
//! 4. [`find_intersections`], [`merge_goal_box_corners`] and [`orient_centre_circle`]
//!    turn the fitted models into corners, T junctions and goal box corners
//!
//! [`FieldFeatureDetector`] strings these together for one perception tick. Everything
//! is tuned through [`FeatureConfig`].

mod circle;
mod config;
mod detector;
mod fitting;
mod intersection;
mod merge;
mod occlusion;
mod parallel;
mod points;

pub use circle::*;
pub use config::*;
pub use detector::*;
pub use fitting::*;
pub use intersection::*;
pub use merge::*;
pub use occlusion::*;
pub use parallel::*;
pub use points::*;

pub use field_core;
pub use field_ransac;
pub use fovea;
