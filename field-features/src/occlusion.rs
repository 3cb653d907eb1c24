use crate::OcclusionConfig;
use field_core::{FieldGeometry, FieldPoint};
use log::*;
use ndarray::Array2;

/// Drops points that pile up in one patch of the field.
///
/// The field is split into square cells anchored at the corner `(-L/2, -W/2)`. A cell
/// with at least `dense_cluster` points almost always holds a robot or a goal post that
/// segmented as white, so all its points go. Order of the survivors is preserved.
pub fn filter_occluded(
    points: Vec<FieldPoint>,
    config: &OcclusionConfig,
    field: &FieldGeometry,
) -> Vec<FieldPoint> {
    let rows = (field.length / config.box_size).ceil() as usize + 1;
    let cols = (field.width / config.box_size).ceil() as usize + 1;
    let mut counts = Array2::<usize>::zeros((rows, cols));

    let cell = |point: &FieldPoint| {
        let x = ((point.robot.x + field.length / 2.0) / config.box_size).max(0.0) as usize;
        let y = ((point.robot.y + field.width / 2.0) / config.box_size).max(0.0) as usize;
        (x.min(rows - 1), y.min(cols - 1))
    };

    for point in &points {
        counts[cell(point)] += 1;
    }

    let before = points.len();
    let kept: Vec<FieldPoint> = points
        .into_iter()
        .filter(|point| counts[cell(point)] < config.dense_cluster)
        .collect();
    if kept.len() != before {
        debug!("dropped {} points in dense clusters", before - kept.len());
    }
    kept
}
