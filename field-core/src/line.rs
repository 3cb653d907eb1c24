use nalgebra::{Point2, Vector2};
use num_traits::Float;
use sample_consensus::Model;

#[cfg(feature = "serde-serialize")]
use serde::{Deserialize, Serialize};

/// A straight line segment in robot-relative coordinates.
///
/// Besides the two endpoints the line stores the coefficients of its implicit equation
/// `t1 * x + t2 * y + t3 = 0`, which gives signed distances and intersections without
/// re-deriving a slope. The coefficients are taken from the endpoints the line was
/// created with and survive [`FieldLine::with_endpoints`], so trimming a segment does not
/// move the infinite line it lies on.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct FieldLine {
    pub p1: Point2<f64>,
    pub p2: Point2<f64>,
    pub t1: f64,
    pub t2: f64,
    pub t3: f64,
}

impl FieldLine {
    pub fn new(p1: Point2<f64>, p2: Point2<f64>) -> Self {
        Self {
            p1,
            p2,
            t1: p1.y - p2.y,
            t2: p2.x - p1.x,
            t3: p1.x * p2.y - p2.x * p1.y,
        }
    }

    /// Replaces the segment endpoints while keeping the implicit equation.
    pub fn with_endpoints(self, p1: Point2<f64>, p2: Point2<f64>) -> Self {
        Self { p1, p2, ..self }
    }

    pub fn normal(&self) -> Vector2<f64> {
        Vector2::new(self.t1, self.t2)
    }

    pub fn direction(&self) -> Vector2<f64> {
        self.p2 - self.p1
    }

    pub fn length_squared(&self) -> f64 {
        self.direction().norm_squared()
    }

    pub fn length(&self) -> f64 {
        self.length_squared().sqrt()
    }

    /// Distance from `point` to the infinite line, positive on the side the normal points to.
    ///
    /// A degenerate line (both endpoints equal) yields NaN.
    pub fn signed_distance(&self, point: &Point2<f64>) -> f64 {
        (self.t1 * point.x + self.t2 * point.y + self.t3) / self.normal().norm_squared().sqrt()
    }

    pub fn distance(&self, point: &Point2<f64>) -> f64 {
        self.signed_distance(point).abs()
    }

    /// Point where the two infinite lines cross.
    ///
    /// Returns `None` when the lines are parallel (or either is degenerate).
    pub fn intersection(&self, other: &Self) -> Option<Point2<f64>> {
        let determinant = self.t1 * other.t2 - other.t1 * self.t2;
        let scale = (self.normal().norm_squared() * other.normal().norm_squared()).sqrt();
        if !(determinant.abs() > 1e-9 * scale) {
            return None;
        }
        Some(Point2::new(
            (other.t3 * self.t2 - self.t3 * other.t2) / determinant,
            (self.t3 * other.t1 - self.t1 * other.t3) / determinant,
        ))
    }

    /// The point on the infinite line closest to the robot origin.
    pub fn foot_from_origin(&self) -> Point2<f64> {
        let scale = -self.t3 / self.normal().norm_squared();
        Point2::from(self.normal() * scale)
    }

    /// The endpoint furthest from `point`, followed by the closest one.
    pub fn far_and_close(&self, point: &Point2<f64>) -> (Point2<f64>, Point2<f64>) {
        if (self.p1 - *point).norm_squared() > (self.p2 - *point).norm_squared() {
            (self.p1, self.p2)
        } else {
            (self.p2, self.p1)
        }
    }
}

impl Model<Point2<f64>> for FieldLine {
    fn residual(&self, data: &Point2<f64>) -> f64 {
        self.distance(data)
    }
}

/// A circle of known radius in robot-relative coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct Circle {
    pub centre: Point2<f64>,
    pub radius: f64,
}

impl Circle {
    pub fn new(centre: Point2<f64>, radius: f64) -> Self {
        Self { centre, radius }
    }

    /// The two circles of `radius` passing through both `a` and `b`.
    ///
    /// Returns nothing if the points coincide or are further apart than the diameter.
    pub fn through(a: Point2<f64>, b: Point2<f64>, radius: f64) -> Option<(Self, Self)> {
        let chord = b - a;
        let half_squared = chord.norm_squared() / 4.0;
        let offset_squared = radius * radius - half_squared;
        if half_squared <= 0.0 || offset_squared < 0.0 {
            return None;
        }
        let mid = a + chord / 2.0;
        let perpendicular = Vector2::new(-chord.y, chord.x) / (4.0 * half_squared).sqrt();
        let offset = perpendicular * offset_squared.sqrt();
        Some((
            Self::new(mid + offset, radius),
            Self::new(mid - offset, radius),
        ))
    }
}

impl Model<Point2<f64>> for Circle {
    fn residual(&self, data: &Point2<f64>) -> f64 {
        ((*data - self.centre).norm_squared().sqrt() - self.radius).abs()
    }
}
