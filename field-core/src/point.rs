use crate::Camera;
use nalgebra::Point2;

#[cfg(feature = "serde-serialize")]
use serde::{Deserialize, Serialize};

/// A sample accepted as lying on the middle of a painted field line.
///
/// The image coordinate is in raw camera pixels of `camera`, while `robot` is the same
/// sample projected onto the ground in robot-relative millimetres.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct FieldPoint {
    pub camera: Camera,
    pub image: Point2<usize>,
    pub robot: Point2<f64>,
}

impl FieldPoint {
    pub fn new(camera: Camera, image: Point2<usize>, robot: Point2<f64>) -> Self {
        Self {
            camera,
            image,
            robot,
        }
    }
}
