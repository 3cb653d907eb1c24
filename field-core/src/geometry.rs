use nalgebra::{Point2, Vector2};
use num_traits::Float;

#[cfg(feature = "serde-serialize")]
use serde::{Deserialize, Serialize};

/// Dimensions of the playing field in millimetres.
///
/// All values describe the painted markings, measured from the middle of each line.
/// The field is centred on the origin of the field frame, so the touch lines are at
/// `y = ±width / 2` and the goal lines are at `x = ±length / 2`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct FieldGeometry {
    pub length: f64,
    pub width: f64,
    pub line_width: f64,
    pub centre_circle_diameter: f64,
    pub goal_box_length: f64,
    pub goal_box_width: f64,
    pub penalty_cross_distance: f64,
}

impl FieldGeometry {
    /// The standard platform league field.
    pub const SPL: Self = Self {
        length: 9000.0,
        width: 6000.0,
        line_width: 50.0,
        centre_circle_diameter: 1500.0,
        goal_box_length: 600.0,
        goal_box_width: 2200.0,
        penalty_cross_distance: 1300.0,
    };

    pub fn centre_circle_radius(&self) -> f64 {
        self.centre_circle_diameter / 2.0
    }

    /// Checks that a point lies within the field rectangle centred on the origin.
    ///
    /// Robot-relative points are tested against this rectangle directly, which bounds
    /// how far away a line sample may be accepted.
    pub fn contains(&self, point: &Point2<f64>) -> bool {
        point.x.abs() <= self.length / 2.0 && point.y.abs() <= self.width / 2.0
    }
}

impl Default for FieldGeometry {
    fn default() -> Self {
        Self::SPL
    }
}

/// A polar position relative to the robot.
///
/// `heading` is the bearing of the landmark and `orientation` is the direction the
/// landmark faces, both in radians. Landmarks without a facing use an orientation of `0`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct RRCoord {
    pub distance: f64,
    pub heading: f64,
    pub orientation: f64,
}

impl RRCoord {
    pub fn new(distance: f64, heading: f64, orientation: f64) -> Self {
        Self {
            distance,
            heading,
            orientation,
        }
    }

    /// Polar coordinate of a cartesian robot-relative point, facing forwards.
    pub fn from_cartesian(point: &Point2<f64>) -> Self {
        Self::new(
            point.coords.norm_squared().sqrt(),
            point.y.atan2(point.x),
            0.0,
        )
    }

    pub fn with_orientation(self, orientation: f64) -> Self {
        Self {
            orientation,
            ..self
        }
    }

    pub fn to_cartesian(&self) -> Point2<f64> {
        Point2::from(Vector2::new(self.heading.cos(), self.heading.sin()) * self.distance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use core::f64::consts::FRAC_PI_2;

    #[test]
    fn polar_round_trip() {
        let rr = RRCoord::from_cartesian(&Point2::new(0.0, 1200.0));
        assert_relative_eq!(rr.distance, 1200.0);
        assert_relative_eq!(rr.heading, FRAC_PI_2);
        let back = rr.to_cartesian();
        assert_relative_eq!(back.x, 0.0, epsilon = 1e-9);
        assert_relative_eq!(back.y, 1200.0, epsilon = 1e-9);
    }

    #[test]
    fn field_containment_is_inclusive() {
        let field = FieldGeometry::SPL;
        assert!(field.contains(&Point2::new(4500.0, -3000.0)));
        assert!(!field.contains(&Point2::new(4500.5, 0.0)));
        assert!(!field.contains(&Point2::new(0.0, 3001.0)));
        assert_relative_eq!(field.centre_circle_radius(), 750.0);
    }
}
