use crate::ClassifierConfig;
use core::f64::consts::PI;
use field_core::{nalgebra::Point2, Feature, FeatureKind};
use log::*;

/// Resolves which way the centre circle faces from the halfway line through it.
///
/// Only runs when the features hold exactly one line and one centre circle. The line
/// must pass close to the circle centre. On success the circle orientation is set in
/// place as an angle in `[0, π)` and `true` is returned.
pub fn orient_centre_circle(features: &mut [Feature], config: &ClassifierConfig) -> bool {
    let lines: Vec<usize> = (0..features.len())
        .filter(|&ix| features[ix].is_line())
        .collect();
    let circles: Vec<usize> = (0..features.len())
        .filter(|&ix| matches!(features[ix].kind, FeatureKind::CentreCircle(_)))
        .collect();
    let (line, circle) = match (lines.as_slice(), circles.as_slice()) {
        (&[line], &[circle]) => (line, circle),
        _ => return false,
    };
    let line = match features[line].as_line() {
        Some(line) => line.line,
        None => return false,
    };

    let centre = features[circle].rr.to_cartesian();
    let offset = line.signed_distance(&centre);
    if !(offset.abs() <= config.circle_line_distance) {
        trace!("halfway line is {} from the circle centre", offset);
        return false;
    }

    let (right, left) = if line.p1.y > line.p2.y {
        (line.p2, line.p1)
    } else {
        (line.p1, line.p2)
    };
    let line_angle = (right.y - left.y).atan2(right.x - left.x);

    let (right, left) = if centre.y < 0.0 {
        (centre, Point2::origin())
    } else {
        (Point2::origin(), centre)
    };
    let robot_angle = (right.y - left.y).atan2(right.x - left.x);

    // The circle looks the same from either side of the halfway line.
    let orientation = (robot_angle - line_angle).rem_euclid(PI);

    let feature = &mut features[circle];
    feature.rr.orientation = orientation;
    if let FeatureKind::CentreCircle(circle) = &mut feature.kind {
        circle.oriented = true;
    }
    debug!("centre circle orientation {}", orientation);
    true
}
