//! Corners and T junctions from pairs of perpendicular lines.
//!
//! Orientations follow the robot frame convention used by the localisation filter: the
//! bearing of the landmark is measured from the robot's forward axis and the facing of
//! a junction is the direction its arms open towards, negated.

use crate::ClassifierConfig;
use core::f64::consts::{PI, TAU};
use field_core::{nalgebra::Point2, Feature, FieldLine};
use log::*;

/// Whether two lines cross at a right angle within `tolerance` radians.
///
/// Degenerate lines have no direction and are never perpendicular.
pub fn perpendicular(a: &FieldLine, b: &FieldLine, tolerance: f64) -> bool {
    let (na, nb) = (a.normal(), b.normal());
    let cos = na.dot(&nb).abs() / (na.norm() * nb.norm());
    cos < tolerance.sin()
}

/// Whether `top` could be the crossbar of a T whose stem is `stem`.
///
/// The ends of the crossbar must lie well apart on either side of the stem and the stem
/// must reach the crossbar.
pub fn possible_t(top: &FieldLine, stem: &FieldLine, config: &ClassifierConfig) -> bool {
    let d1 = stem.signed_distance(&top.p1);
    let d2 = stem.signed_distance(&top.p2);
    (d1 < 0.0) != (d2 < 0.0)
        && d1.abs() > config.t_straddle
        && d2.abs() > config.t_straddle
        && (top.distance(&stem.p1) < config.t_touch || top.distance(&stem.p2) < config.t_touch)
}

/// A corner is bad when either arm lies wholly away from the other arm.
pub fn is_bad_corner(a: &FieldLine, b: &FieldLine, config: &ClassifierConfig) -> bool {
    let away = |line: &FieldLine, other: &FieldLine| {
        line.distance(&other.p1) > config.bad_corner_distance
            && line.distance(&other.p2) > config.bad_corner_distance
    };
    away(a, b) || away(b, a)
}

/// Bearing of `line` leaving `point`, from its closer to its further end.
pub fn gradient(line: &FieldLine, point: &Point2<f64>) -> f64 {
    let (far, close) = line.far_and_close(point);
    (far.x - close.x).atan2(far.y - close.y)
}

fn facing(point: &Point2<f64>, angle: f64) -> f64 {
    let theta = point.x.atan2(point.y);
    let facing = if angle > 0.0 {
        theta + PI - angle
    } else {
        theta - (PI + angle)
    };
    normalise(facing)
}

/// Wraps an angle into `(-π, π]`.
pub fn normalise(angle: f64) -> f64 {
    let wrapped = (angle + PI).rem_euclid(TAU) - PI;
    if wrapped <= -PI {
        wrapped + TAU
    } else {
        wrapped
    }
}

/// The angle of a T at `point` with the given stem.
pub fn t_angle(point: &Point2<f64>, stem: &FieldLine) -> f64 {
    facing(point, gradient(stem, point))
}

/// The angle of a corner at `point`, taken from the bisector of both arms.
pub fn corner_angle(point: &Point2<f64>, a: &FieldLine, b: &FieldLine) -> f64 {
    let quadrant = 80f64.to_radians();
    let (mut ga, mut gb) = (gradient(a, point), gradient(b, point));
    if ga > quadrant && gb < -quadrant {
        gb += TAU;
    } else if gb > quadrant && ga < -quadrant {
        ga += TAU;
    }
    let mut bisector = (ga + gb) / 2.0;
    if bisector > PI {
        bisector -= TAU;
    }
    facing(point, bisector)
}

/// The end of each arm, chosen so the two are as far apart as possible.
pub fn corner_endpoints(a: &FieldLine, b: &FieldLine) -> [Point2<f64>; 2] {
    let mut best = [a.p1, b.p1];
    let mut best_distance = -1.0;
    for &ea in &[a.p1, a.p2] {
        for &eb in &[b.p1, b.p2] {
            let distance = (ea - eb).norm_squared();
            if distance > best_distance {
                best = [ea, eb];
                best_distance = distance;
            }
        }
    }
    best
}

/// How a pair of lines meets.
enum Pairing {
    Junction(Feature),
    /// Each line could be the stem of a T on the other.
    Crossing,
}

fn pair(a: &FieldLine, b: &FieldLine, config: &ClassifierConfig) -> Option<Pairing> {
    let point = a.intersection(b)?;
    if !perpendicular(a, b, config.perpendicular_tolerance) {
        return None;
    }
    match (possible_t(a, b, config), possible_t(b, a, config)) {
        (true, true) => {
            trace!("ambiguous crossing at {:?}", point);
            Some(Pairing::Crossing)
        }
        (true, false) => Some(Pairing::Junction(Feature::t_junction(
            point,
            -t_angle(&point, b),
        ))),
        (false, true) => Some(Pairing::Junction(Feature::t_junction(
            point,
            -t_angle(&point, a),
        ))),
        (false, false) => {
            if is_bad_corner(a, b, config) {
                trace!("bad corner at {:?}", point);
                return None;
            }
            Some(Pairing::Junction(Feature::corner(
                point,
                -corner_angle(&point, a, b),
                corner_endpoints(a, b),
            )))
        }
    }
}

/// Classifies the crossing of two lines.
///
/// Returns `None` for lines that are parallel, not perpendicular, cross in an X or form
/// a bad corner.
pub fn classify(a: &FieldLine, b: &FieldLine, config: &ClassifierConfig) -> Option<Feature> {
    match pair(a, b, config)? {
        Pairing::Junction(feature) => Some(feature),
        Pairing::Crossing => None,
    }
}

/// Adds a junction for every line that meets a later line.
///
/// Each line pairs with at most one later line. Both lines of a pairing are marked as
/// used, including an X crossing, which adds no feature.
pub fn find_intersections(features: &mut Vec<Feature>, config: &ClassifierConfig) {
    let lines: Vec<usize> = (0..features.len())
        .filter(|&ix| features[ix].is_line())
        .collect();
    let mut junctions = Vec::new();
    for (n, &i) in lines.iter().enumerate() {
        for &j in &lines[n + 1..] {
            let (a, b) = match (features[i].as_line(), features[j].as_line()) {
                (Some(a), Some(b)) => (a.line, b.line),
                _ => continue,
            };
            let pairing = match pair(&a, &b, config) {
                Some(pairing) => pairing,
                None => continue,
            };
            if let Pairing::Junction(junction) = pairing {
                debug!("junction {:?}", junction.rr);
                junctions.push(junction);
            }
            for ix in [i, j] {
                if let Some(line) = features[ix].as_line_mut() {
                    line.used = true;
                }
            }
            break;
        }
    }
    features.extend(junctions);
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use field_core::FeatureKind;
    use quickcheck_macros::quickcheck;

    fn line(x1: f64, y1: f64, x2: f64, y2: f64) -> FieldLine {
        FieldLine::new(Point2::new(x1, y1), Point2::new(x2, y2))
    }

    #[test]
    fn l_shape_is_a_corner_facing_the_bisector() {
        let config = ClassifierConfig::default();
        let a = line(0.0, 0.0, 600.0, 0.0);
        let b = line(600.0, 0.0, 600.0, 600.0);
        let corner = classify(&a, &b, &config).unwrap();
        assert_relative_eq!(corner.rr.distance, 600.0, epsilon = 1e-6);
        assert_relative_eq!(corner.rr.heading, 0.0, epsilon = 1e-6);
        assert_relative_eq!(corner.rr.orientation, PI / 4.0, epsilon = 1e-6);
        match corner.kind {
            FeatureKind::Corner(corner) => {
                assert_eq!(corner.endpoints, [Point2::new(0.0, 0.0), Point2::new(600.0, 600.0)])
            }
            other => panic!("expected a corner, got {:?}", other),
        }
    }

    #[test]
    fn stem_reaching_the_middle_is_a_t() {
        let config = ClassifierConfig::default();
        let top = line(2000.0, -1000.0, 2000.0, 1000.0);
        let stem = line(1000.0, 0.0, 1950.0, 0.0);
        assert!(possible_t(&top, &stem, &config));
        assert!(!possible_t(&stem, &top, &config));
        let t = classify(&top, &stem, &config).unwrap();
        assert!(matches!(t.kind, FeatureKind::TJunction(_)));
        assert_relative_eq!(t.rr.distance, 2000.0, epsilon = 1e-6);
    }

    #[test]
    fn crossing_lines_are_discarded() {
        let config = ClassifierConfig::default();
        let a = line(1000.0, -150.0, 1000.0, 150.0);
        let b = line(850.0, 0.0, 1150.0, 0.0);
        assert!(possible_t(&a, &b, &config) && possible_t(&b, &a, &config));
        assert!(classify(&a, &b, &config).is_none());
    }

    #[test]
    fn arms_far_apart_are_a_bad_corner() {
        let config = ClassifierConfig::default();
        let a = line(0.0, 0.0, 600.0, 0.0);
        let b = line(1000.0, 500.0, 1000.0, 1500.0);
        assert!(is_bad_corner(&a, &b, &config));
        assert!(classify(&a, &b, &config).is_none());
    }

    #[test]
    fn degenerate_lines_are_not_perpendicular() {
        let point = line(5.0, 5.0, 5.0, 5.0);
        assert!(!perpendicular(&point, &line(0.0, 0.0, 1.0, 0.0), 0.2));
    }

    #[test]
    fn first_line_joins_at_most_one_junction() {
        let config = ClassifierConfig::default();
        let mut features = vec![
            Feature::line(line(0.0, 0.0, 600.0, 0.0), -30.0),
            Feature::line(line(600.0, 0.0, 600.0, 600.0), -30.0),
            Feature::line(line(0.0, 0.0, 0.0, 600.0), -30.0),
        ];
        find_intersections(&mut features, &config);
        let corners = features
            .iter()
            .filter(|f| matches!(f.kind, FeatureKind::Corner(_)))
            .count();
        assert_eq!(corners, 1);
        let used: Vec<bool> = features
            .iter()
            .filter_map(|f| f.as_line())
            .map(|line| line.used)
            .collect();
        assert_eq!(used, vec![true, true, false]);
    }

    #[test]
    fn crossing_consumes_both_lines() {
        let config = ClassifierConfig::default();
        let mut features = vec![
            Feature::line(line(1000.0, -150.0, 1000.0, 150.0), -30.0),
            Feature::line(line(850.0, 0.0, 1150.0, 0.0), -30.0),
            Feature::line(line(1000.0, 150.0, 1600.0, 150.0), -30.0),
        ];
        find_intersections(&mut features, &config);
        assert_eq!(features.len(), 3);
        let used: Vec<bool> = features
            .iter()
            .filter_map(|f| f.as_line())
            .map(|line| line.used)
            .collect();
        assert_eq!(used, vec![true, true, false]);
    }

    #[quickcheck]
    fn perpendicular_within_tolerance(a: u16, b: u16, length: u8) -> bool {
        let tolerance = 10f64.to_radians();
        let (a, b) = (a as f64 / 100.0, b as f64 / 100.0);
        let r = 100.0 + length as f64;
        let first = line(0.0, 0.0, r * a.cos(), r * a.sin());
        let second = line(50.0, 50.0, 50.0 + r * b.cos(), 50.0 + r * b.sin());
        let between = (a - b).rem_euclid(PI);
        let off_right = (between - PI / 2.0).abs();
        !perpendicular(&first, &second, tolerance) || off_right <= tolerance + 1e-9
    }
}
