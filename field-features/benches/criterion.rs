use criterion::{criterion_group, criterion_main, Criterion};
use field_core::{nalgebra::Point2, Camera, FieldPoint};
use field_features::FieldFeatureDetector;

/// The two touch line corners and the halfway line seen from the penalty spot.
fn penalty_area_view() -> Vec<FieldPoint> {
    let mut robot = Vec::new();
    robot.extend((0..80).map(|i| Point2::new(3000.0, -1100.0 + i as f64 * 27.5)));
    robot.extend((0..25).map(|i| Point2::new(3000.0 + i as f64 * 24.0, -1100.0)));
    robot.extend((0..25).map(|i| Point2::new(3000.0 + i as f64 * 24.0, 1100.0)));
    robot.extend((0..120).map(|i| Point2::new(3600.0, -2500.0 + i as f64 * 42.0)));
    robot.extend((0..40).map(|i| {
        Point2::new(
            ((i * 7919) % 4000) as f64 - 500.0,
            ((i * 104_729) % 5000) as f64 - 2500.0,
        )
    }));
    robot
        .into_iter()
        .map(|robot| FieldPoint::new(Camera::Top, Point2::new(0, 0), robot))
        .collect()
}

fn features(c: &mut Criterion) {
    let detector = FieldFeatureDetector::default();
    let points = penalty_area_view();
    c.bench_function("features_from_points_striker", |b| {
        b.iter(|| detector.features_from_points(&points, 4))
    });
    c.bench_function("features_from_points_goalkeeper", |b| {
        b.iter(|| detector.features_from_points(&points, 1))
    });
}

criterion_group!(
    name = field_features;
    config = Criterion::default().sample_size(10);
    targets = features
);

criterion_main!(field_features);
