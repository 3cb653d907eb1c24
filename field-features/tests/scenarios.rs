use approx::assert_relative_eq;
use core::f64::consts::{FRAC_PI_4, TAU};
use field_core::{nalgebra::Point2, Camera, FeatureKind, FieldGeometry, FieldPoint};
use field_features::{
    fit_features, FeatureConfig, FieldFeatureDetector, FittingConfig, SearchMode,
};
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg64;

fn field_points(points: impl IntoIterator<Item = Point2<f64>>) -> Vec<FieldPoint> {
    points
        .into_iter()
        .map(|robot| FieldPoint::new(Camera::Top, Point2::new(0, 0), robot))
        .collect()
}

fn l_shape() -> Vec<FieldPoint> {
    let along = (0..=30).map(|i| Point2::new(i as f64 * 20.0, 0.0));
    let up = (1..=30).map(|i| Point2::new(600.0, i as f64 * 20.0));
    field_points(along.chain(up))
}

fn count(features: &[field_core::Feature], kind: fn(&FeatureKind) -> bool) -> usize {
    features.iter().filter(|f| kind(&f.kind)).count()
}

#[test]
fn l_shape_is_one_corner() {
    let _ = pretty_env_logger::try_init();
    let detector = FieldFeatureDetector::default();
    let features = detector.features_from_points(&l_shape(), 2);

    let corners: Vec<_> = features
        .iter()
        .filter(|f| matches!(f.kind, FeatureKind::Corner(_)))
        .collect();
    assert_eq!(corners.len(), 1, "{:?}", features);
    let corner = corners[0];
    assert_relative_eq!(corner.rr.distance, 600.0, epsilon = 1.0);
    assert_relative_eq!(corner.rr.heading, 0.0, epsilon = 0.01);
    assert_relative_eq!(corner.rr.orientation, FRAC_PI_4, epsilon = 0.02);

    assert_eq!(count(&features, |k| matches!(k, FeatureKind::Line(_))), 2);
    assert!(features
        .iter()
        .filter_map(|f| f.as_line())
        .all(|line| line.used));
}

#[test]
fn ring_is_the_centre_circle() {
    let points = field_points((0..60).map(|i| {
        let angle = i as f64 * TAU / 60.0;
        Point2::new(750.0 + 750.0 * angle.cos(), 750.0 * angle.sin())
    }));
    let features = FieldFeatureDetector::default().features_from_points(&points, 3);

    assert_eq!(features.len(), 1, "{:?}", features);
    assert!(matches!(features[0].kind, FeatureKind::CentreCircle(_)));
    assert_relative_eq!(features[0].rr.distance, 750.0, epsilon = 5.0);
}

#[test]
fn goalkeeper_never_sees_the_centre_circle() {
    let points = field_points((0..60).map(|i| {
        let angle = i as f64 * TAU / 60.0;
        Point2::new(750.0 + 750.0 * angle.cos(), 750.0 * angle.sin())
    }));
    let features = FieldFeatureDetector::default().features_from_points(&points, 1);
    assert_eq!(
        count(&features, |k| matches!(k, FeatureKind::CentreCircle(_))),
        0
    );
}

#[test]
fn halfway_line_orients_the_centre_circle() {
    let ring = (0..60).map(|i| {
        let angle = i as f64 * TAU / 60.0;
        Point2::new(2000.0 + 750.0 * angle.cos(), 750.0 * angle.sin())
    });
    let halfway = (0..=60).map(|i| Point2::new(2000.0, -1500.0 + i as f64 * 50.0));
    let points = field_points(ring.chain(halfway));
    let features = FieldFeatureDetector::default().features_from_points(&points, 4);

    let circle = features
        .iter()
        .find_map(|f| match f.kind {
            FeatureKind::CentreCircle(circle) => Some(circle),
            _ => None,
        })
        .expect("no centre circle");
    assert!(circle.oriented);
}

fn random_cloud(seed: u64) -> Vec<Point2<f64>> {
    let mut rng = Pcg64::seed_from_u64(seed);
    let mut points: Vec<Point2<f64>> = Vec::new();
    for _ in 0..rng.gen_range(1..5) {
        let start = Point2::new(rng.gen_range(-3000.0..3000.0), rng.gen_range(-2000.0..2000.0));
        let heading: f64 = rng.gen_range(0.0..TAU);
        let length = rng.gen_range(100.0..2500.0);
        let n = rng.gen_range(10..60);
        points.extend((0..n).map(|i| {
            let t = length * i as f64 / n as f64;
            Point2::new(
                start.x + t * heading.cos() + rng.gen_range(-8.0..8.0),
                start.y + t * heading.sin() + rng.gen_range(-8.0..8.0),
            )
        }));
    }
    points.extend((0..rng.gen_range(0..80)).map(|_| {
        Point2::new(rng.gen_range(-4500.0..4500.0), rng.gen_range(-3000.0..3000.0))
    }));
    points
}

#[test]
fn fitting_terminates_with_progress() {
    let config = FittingConfig::default();
    let field = FieldGeometry::default();
    for seed in 0..40 {
        let points = random_cloud(seed);
        let fitted = fit_features(&points, SearchMode::LinesAndCircles, &config, &field);
        assert!(fitted.pool_sizes.len() <= config.max_rounds);
        assert!(fitted.pool_sizes.windows(2).all(|w| w[1] < w[0]));
        assert!(fitted.pool_sizes.first().map_or(true, |&n| n == points.len()));
    }
}

#[test]
fn emitted_lines_pass_the_length_gate() {
    let config = FittingConfig::default();
    let field = FieldGeometry::default();
    for seed in 100..140 {
        let fitted = fit_features(&random_cloud(seed), SearchMode::LinesOnly, &config, &field);
        for line in fitted.features.iter().filter_map(|f| f.as_line()) {
            let length_squared = line.line.length_squared();
            assert!(
                length_squared > config.min_line_length.powi(2)
                    || (length_squared > config.short_line_length.powi(2)
                        && line.score <= config.strict_line_score),
                "line of length {} with score {}",
                length_squared.sqrt(),
                line.score
            );
        }
    }
}

#[test]
fn detection_is_deterministic() {
    let detector = FieldFeatureDetector::new(FeatureConfig::default());
    let points = field_points(random_cloud(7));
    assert_eq!(
        detector.features_from_points(&points, 2),
        detector.features_from_points(&points, 2)
    );
}
