use crate::{FittingConfig, SearchMode};
use field_core::{nalgebra::Point2, Feature, FieldGeometry, FieldLine};
use field_ransac::{CircleEstimator, Fit, LineEstimator, Ransac};
use float_ord::FloatOrd;
use log::*;

/// Lines and circles fitted from one tick of field points.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Fitted {
    /// Line and centre circle features in the order they were found.
    pub features: Vec<Feature>,
    /// Size of the point pool at the start of every round.
    pub pool_sizes: Vec<usize>,
}

/// Repeatedly extracts the best supported model from the point pool.
///
/// Every round fits a line and, unless only lines are searched, a centre circle. A
/// circle with a good enough score that also beats the line is reported. Otherwise the
/// line is trimmed to its longest unbroken run and reported if it is long enough. The
/// inliers of whichever model was taken leave the pool, so rounds stop once no model
/// has enough support or the round limit is reached.
pub fn fit_features(
    points: &[Point2<f64>],
    mode: SearchMode,
    config: &FittingConfig,
    field: &FieldGeometry,
) -> Fitted {
    let ransac_config = config.ransac(mode);
    let mut ransac = Ransac::new(ransac_config);
    let circles = CircleEstimator::new(field.centre_circle_radius());
    let mut pool = points.to_vec();
    let mut fitted = Fitted::default();

    for round in 0..config.max_rounds {
        if pool.len() < ransac_config.min_inliers.max(2) {
            break;
        }
        fitted.pool_sizes.push(pool.len());

        let line = ransac.fit(&LineEstimator, &pool);
        let circle = match mode {
            SearchMode::LinesAndCircles => ransac.fit(&circles, &pool),
            SearchMode::LinesOnly => None,
        };

        match (line, circle) {
            (line, Some(circle))
                if circle.score <= config.circle_score
                    && line.as_ref().map_or(true, |line| circle.score < line.score) =>
            {
                debug!(
                    "round {}: centre circle at {:?} with score {}",
                    round, circle.model.centre, circle.score
                );
                fitted
                    .features
                    .push(Feature::centre_circle(circle.model.centre, circle.score));
                remove(&mut pool, &circle.inliers);
            }
            (Some(line), _) => {
                let trimmed = trim(&line, &pool, config.max_line_gap);
                if long_enough(&trimmed, line.score, config) {
                    debug!(
                        "round {}: line {:?} to {:?} with score {}",
                        round, trimmed.p1, trimmed.p2, line.score
                    );
                    fitted.features.push(Feature::line(trimmed, line.score));
                } else {
                    trace!("round {}: line of length {} is too short", round, trimmed.length());
                }
                remove(&mut pool, &line.inliers);
            }
            (None, Some(circle)) => {
                trace!("round {}: discarding weak circle {}", round, circle.score);
                remove(&mut pool, &circle.inliers);
            }
            (None, None) => break,
        }
    }
    fitted
}

/// Cuts a fitted line down to the longest run of inliers without a large gap.
///
/// Inliers are ordered along the axis the line mostly follows. Runs are counted in
/// points, so a long sparse tail does not win over a dense segment.
pub fn trim(fit: &Fit<FieldLine>, pool: &[Point2<f64>], max_gap: f64) -> FieldLine {
    let direction = fit.model.direction();
    let along_x = direction.x.abs() >= direction.y.abs();
    let mut inliers: Vec<Point2<f64>> = fit.inliers.iter().map(|&ix| pool[ix]).collect();
    inliers.sort_unstable_by_key(|p| FloatOrd(if along_x { p.x } else { p.y }));

    let max_gap_squared = max_gap * max_gap;
    let (mut best, mut start) = (0..0, 0);
    for ix in 1..=inliers.len() {
        let broken = ix == inliers.len()
            || (inliers[ix] - inliers[ix - 1]).norm_squared() > max_gap_squared;
        if broken {
            if ix - start > best.len() {
                best = start..ix;
            }
            start = ix;
        }
    }

    if best.is_empty() {
        return fit.model;
    }
    fit.model
        .with_endpoints(inliers[best.start], inliers[best.end - 1])
}

fn long_enough(line: &FieldLine, score: f64, config: &FittingConfig) -> bool {
    let length_squared = line.length_squared();
    length_squared > config.min_line_length * config.min_line_length
        || (length_squared > config.short_line_length * config.short_line_length
            && score <= config.strict_line_score)
}

fn remove(pool: &mut Vec<Point2<f64>>, indices: &[usize]) {
    let mut taken = vec![false; pool.len()];
    for &ix in indices {
        taken[ix] = true;
    }
    let mut taken = taken.into_iter();
    pool.retain(|_| !taken.next().unwrap_or(false));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fit_of(points: &[Point2<f64>]) -> Fit<FieldLine> {
        Fit {
            model: FieldLine::new(Point2::new(0.0, 0.0), Point2::new(1.0, 0.0)),
            inliers: (0..points.len()).collect(),
            score: -20.0,
        }
    }

    #[test]
    fn trim_keeps_the_densest_run() {
        let mut points: Vec<Point2<f64>> =
            (0..20).map(|i| Point2::new(i as f64 * 50.0, 0.0)).collect();
        points.extend((0..5).map(|i| Point2::new(3000.0 + i as f64 * 50.0, 0.0)));
        let line = trim(&fit_of(&points), &points, 300.0);
        assert_eq!(line.p1, Point2::new(0.0, 0.0));
        assert_eq!(line.p2, Point2::new(950.0, 0.0));
    }

    #[test]
    fn length_gate() {
        let config = FittingConfig::default();
        let line = |length: f64| FieldLine::new(Point2::new(0.0, 0.0), Point2::new(length, 0.0));
        assert!(long_enough(&line(450.0), -1.0, &config));
        assert!(!long_enough(&line(350.0), -15.0, &config));
        assert!(long_enough(&line(350.0), -16.0, &config));
        assert!(!long_enough(&line(250.0), -100.0, &config));
    }

    #[test]
    fn remove_drops_exactly_the_indices() {
        let mut pool: Vec<Point2<f64>> = (0..6).map(|i| Point2::new(i as f64, 0.0)).collect();
        remove(&mut pool, &[0, 3, 5]);
        let xs: Vec<f64> = pool.iter().map(|p| p.x).collect();
        assert_eq!(xs, vec![1.0, 2.0, 4.0]);
    }
}
