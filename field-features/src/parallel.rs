use crate::ClassifierConfig;
use field_core::{Feature, FieldGeometry, FieldLine};
use log::*;

/// Whether two lines could be the goal line and the goal box line behind it.
pub fn parallel_pair(
    a: &FieldLine,
    b: &FieldLine,
    config: &ClassifierConfig,
    field: &FieldGeometry,
) -> bool {
    let (da, db) = (a.direction(), b.direction());
    let sin = da.perp(&db).abs() / (da.norm() * db.norm());
    if !(sin < config.parallel_tolerance.sin()) {
        return false;
    }
    let min_length_squared = config.min_parallel_length * config.min_parallel_length;
    if a.length_squared() < min_length_squared || b.length_squared() < min_length_squared {
        return false;
    }
    let (ra, rb) = (
        a.foot_from_origin().coords.norm(),
        b.foot_from_origin().coords.norm(),
    );
    ((ra - rb).abs() - field.goal_box_length).abs() < config.parallel_distance_tolerance
}

/// Appends the first parallel pair of lines as a single feature.
///
/// This path is disabled unless [`ClassifierConfig::detect_parallel_lines`] is set.
pub fn find_parallel_lines(
    features: &mut Vec<Feature>,
    config: &ClassifierConfig,
    field: &FieldGeometry,
) -> bool {
    let lines: Vec<usize> = (0..features.len())
        .filter(|&ix| features[ix].is_line())
        .collect();
    for (n, &i) in lines.iter().enumerate() {
        for &j in &lines[n + 1..] {
            let (a, b) = match (features[i].as_line(), features[j].as_line()) {
                (Some(a), Some(b)) => (a.line, b.line),
                _ => continue,
            };
            if parallel_pair(&a, &b, config, field) {
                for ix in [i, j] {
                    if let Some(line) = features[ix].as_line_mut() {
                        line.used = true;
                    }
                }
                let pair = Feature::parallel_lines(a, b);
                debug!("parallel lines at {:?}", pair.rr);
                features.push(pair);
                return true;
            }
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use field_core::{nalgebra::Point2, FeatureKind};

    fn line(x: f64, y1: f64, y2: f64) -> Feature {
        Feature::line(
            FieldLine::new(Point2::new(x, y1), Point2::new(x, y2)),
            -30.0,
        )
    }

    #[test]
    fn goal_line_and_goal_box_line_pair_up() {
        let mut features = vec![line(2000.0, -1100.0, 1100.0), line(2600.0, 1500.0, -1500.0)];
        let config = ClassifierConfig::default();
        assert!(find_parallel_lines(&mut features, &config, &FieldGeometry::default()));
        assert!(matches!(features[2].kind, FeatureKind::ParallelLines(_)));
        assert!(features[..2].iter().all(|f| f.as_line().map_or(false, |l| l.used)));
    }

    #[test]
    fn wrong_spacing_does_not_pair() {
        let mut features = vec![line(2000.0, -1100.0, 1100.0), line(3500.0, 1500.0, -1500.0)];
        let config = ClassifierConfig::default();
        assert!(!find_parallel_lines(&mut features, &config, &FieldGeometry::default()));
        assert_eq!(features.len(), 2);
    }
}
