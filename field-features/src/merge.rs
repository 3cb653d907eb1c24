use crate::ClassifierConfig;
use field_core::{nalgebra::Point2, Feature, FeatureKind};
use log::*;

/// Appends a goal box corner for every corner and T junction the right distance apart.
///
/// The corner and the T are both kept. The goal box corner takes its position and
/// orientation from the corner.
pub fn merge_goal_box_corners(features: &mut Vec<Feature>, config: &ClassifierConfig) {
    let min_squared = config.goal_box_corner_min * config.goal_box_corner_min;
    let max_squared = config.goal_box_corner_max * config.goal_box_corner_max;
    let mut merged = Vec::new();
    for corner_feature in features.iter() {
        let corner = match &corner_feature.kind {
            FeatureKind::Corner(corner) => corner,
            _ => continue,
        };
        for t in features.iter().filter_map(|f| match &f.kind {
            FeatureKind::TJunction(t) => Some(t.position),
            _ => None,
        }) {
            let separation = (corner.position - t).norm_squared();
            if separation > min_squared && separation < max_squared {
                let left = is_left(&corner.position, &corner.endpoints, &t);
                debug!("goal box corner at {:?}, left {}", corner.position, left);
                merged.push(Feature::goal_box_corner(
                    corner.position,
                    corner_feature.rr.orientation,
                    left,
                ));
            }
        }
    }
    features.extend(merged);
}

/// Which side of the goal a striker sees the goal box corner on.
///
/// The arm that does not run towards the T tells the sides apart.
fn is_left(corner: &Point2<f64>, endpoints: &[Point2<f64>; 2], t: &Point2<f64>) -> bool {
    let [e1, e2] = *endpoints;
    let far = if (e1 - *t).norm_squared() > (e2 - *t).norm_squared() {
        e1
    } else {
        e2
    };
    let (arm, towards_t) = (far - *corner, *t - *corner);
    arm.perp(&towards_t) > 0.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn corner_and_t(separation: f64) -> Vec<Feature> {
        let corner = Point2::new(4500.0, 1100.0);
        vec![
            Feature::corner(
                corner,
                0.3,
                [Point2::new(3900.0, 1100.0), Point2::new(4500.0, 1600.0)],
            ),
            Feature::t_junction(Point2::new(4500.0, 1100.0 + separation), 0.0),
        ]
    }

    fn goal_box_corners(features: &[Feature]) -> Vec<&Feature> {
        features
            .iter()
            .filter(|f| matches!(f.kind, FeatureKind::GoalBoxCorner(_)))
            .collect()
    }

    #[test]
    fn goal_box_width_apart_merges() {
        let mut features = corner_and_t(900.0);
        merge_goal_box_corners(&mut features, &ClassifierConfig::default());
        let merged = goal_box_corners(&features);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].rr, features[0].rr);
        assert_eq!(features.len(), 3);
    }

    #[test]
    fn too_far_apart_does_not_merge() {
        let mut features = corner_and_t(1500.0);
        merge_goal_box_corners(&mut features, &ClassifierConfig::default());
        assert!(goal_box_corners(&features).is_empty());
    }

    #[test]
    fn side_follows_the_free_arm() {
        let corner = Point2::new(0.0, 0.0);
        let t = Point2::new(0.0, 900.0);
        assert!(is_left(&corner, &[Point2::new(600.0, 0.0), Point2::new(0.0, 300.0)], &t));
        assert!(!is_left(&corner, &[Point2::new(-600.0, 0.0), Point2::new(0.0, 300.0)], &t));
    }
}
