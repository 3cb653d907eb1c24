use crate::{Camera, FieldLine, RRCoord};
use nalgebra::Point2;

#[cfg(feature = "serde-serialize")]
use serde::{Deserialize, Serialize};

/// Where a landmark appears in a camera image.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct ImagePosition {
    pub camera: Camera,
    pub pixel: Point2<f64>,
}

/// A fitted line that survived the length gate.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct LineFeature {
    pub line: FieldLine,
    /// Consensus score of the fit, more negative is better.
    pub score: f64,
    /// Set once the line has been merged into an intersection feature.
    pub used: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct CircleFeature {
    pub centre: Point2<f64>,
    pub score: f64,
    /// Whether the orientation of [`Feature::rr`] was resolved from a centre line.
    pub oriented: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct CornerFeature {
    pub position: Point2<f64>,
    /// The two line ends furthest from each other, one from each arm.
    pub endpoints: [Point2<f64>; 2],
    pub image: Option<ImagePosition>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct TJunctionFeature {
    pub position: Point2<f64>,
    pub image: Option<ImagePosition>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct GoalBoxCornerFeature {
    pub position: Point2<f64>,
    /// `true` for the corner on the left of a striker facing the goal.
    pub left: bool,
    pub image: Option<ImagePosition>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct ParallelLinesFeature {
    pub lines: [FieldLine; 2],
}

/// The kind specific part of a [`Feature`].
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub enum FeatureKind {
    Empty,
    Line(LineFeature),
    CentreCircle(CircleFeature),
    Corner(CornerFeature),
    TJunction(TJunctionFeature),
    GoalBoxCorner(GoalBoxCornerFeature),
    ParallelLines(ParallelLinesFeature),
}

/// A landmark detected during one perception tick.
///
/// Every feature carries its position relative to the robot. Lines use the foot of the
/// perpendicular from the robot, everything else the landmark position itself.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct Feature {
    pub rr: RRCoord,
    pub kind: FeatureKind,
}

impl Default for Feature {
    fn default() -> Self {
        Self {
            rr: RRCoord::default(),
            kind: FeatureKind::Empty,
        }
    }
}

impl Feature {
    pub fn line(line: FieldLine, score: f64) -> Self {
        Self {
            rr: RRCoord::from_cartesian(&line.foot_from_origin()),
            kind: FeatureKind::Line(LineFeature {
                line,
                score,
                used: false,
            }),
        }
    }

    pub fn centre_circle(centre: Point2<f64>, score: f64) -> Self {
        Self {
            rr: RRCoord::from_cartesian(&centre),
            kind: FeatureKind::CentreCircle(CircleFeature {
                centre,
                score,
                oriented: false,
            }),
        }
    }

    pub fn corner(position: Point2<f64>, orientation: f64, endpoints: [Point2<f64>; 2]) -> Self {
        Self {
            rr: RRCoord::from_cartesian(&position).with_orientation(orientation),
            kind: FeatureKind::Corner(CornerFeature {
                position,
                endpoints,
                image: None,
            }),
        }
    }

    pub fn t_junction(position: Point2<f64>, orientation: f64) -> Self {
        Self {
            rr: RRCoord::from_cartesian(&position).with_orientation(orientation),
            kind: FeatureKind::TJunction(TJunctionFeature {
                position,
                image: None,
            }),
        }
    }

    pub fn goal_box_corner(position: Point2<f64>, orientation: f64, left: bool) -> Self {
        Self {
            rr: RRCoord::from_cartesian(&position).with_orientation(orientation),
            kind: FeatureKind::GoalBoxCorner(GoalBoxCornerFeature {
                position,
                left,
                image: None,
            }),
        }
    }

    pub fn parallel_lines(first: FieldLine, second: FieldLine) -> Self {
        let mid = nalgebra::center(&first.foot_from_origin(), &second.foot_from_origin());
        Self {
            rr: RRCoord::from_cartesian(&mid),
            kind: FeatureKind::ParallelLines(ParallelLinesFeature {
                lines: [first, second],
            }),
        }
    }

    pub fn is_line(&self) -> bool {
        matches!(self.kind, FeatureKind::Line(_))
    }

    pub fn as_line(&self) -> Option<&LineFeature> {
        match &self.kind {
            FeatureKind::Line(line) => Some(line),
            _ => None,
        }
    }

    pub fn as_line_mut(&mut self) -> Option<&mut LineFeature> {
        match &mut self.kind {
            FeatureKind::Line(line) => Some(line),
            _ => None,
        }
    }

    /// The ground position of point-like landmarks.
    pub fn position(&self) -> Option<Point2<f64>> {
        match &self.kind {
            FeatureKind::CentreCircle(circle) => Some(circle.centre),
            FeatureKind::Corner(corner) => Some(corner.position),
            FeatureKind::TJunction(t) => Some(t.position),
            FeatureKind::GoalBoxCorner(corner) => Some(corner.position),
            FeatureKind::Empty | FeatureKind::Line(_) | FeatureKind::ParallelLines(_) => None,
        }
    }

    /// Records where a junction was seen. Other kinds have no single image position.
    pub fn set_image(&mut self, image: ImagePosition) {
        match &mut self.kind {
            FeatureKind::Corner(corner) => corner.image = Some(image),
            FeatureKind::TJunction(t) => t.image = Some(image),
            FeatureKind::GoalBoxCorner(corner) => corner.image = Some(image),
            _ => {}
        }
    }

    pub fn image(&self) -> Option<ImagePosition> {
        match &self.kind {
            FeatureKind::Corner(corner) => corner.image,
            FeatureKind::TJunction(t) => t.image,
            FeatureKind::GoalBoxCorner(corner) => corner.image,
            _ => None,
        }
    }
}
