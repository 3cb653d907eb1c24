use crate::{
    circle::orient_centre_circle, fitting::fit_features, intersection::find_intersections,
    merge::merge_goal_box_corners, occlusion::filter_occluded, parallel::find_parallel_lines,
    points::find_points, FeatureConfig, SearchMode,
};
use field_core::{nalgebra::Point2, Camera, CameraToRobot, Feature, FieldPoint, ImagePosition};
use fovea::{Fovea, ScanStarts};
use log::*;

/// Player number of the goalkeeper, who never looks for the centre circle.
pub const GOALKEEPER: u8 = 1;

/// The output of one detection pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Detection {
    /// Accepted line points after the occlusion filter, in scan order.
    pub points: Vec<FieldPoint>,
    pub features: Vec<Feature>,
}

/// Turns segmented foveae into field landmarks.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FieldFeatureDetector {
    pub config: FeatureConfig,
}

impl FieldFeatureDetector {
    pub fn new(config: FeatureConfig) -> Self {
        Self { config }
    }

    pub fn search_mode(player: u8) -> SearchMode {
        if player == GOALKEEPER {
            SearchMode::LinesOnly
        } else {
            SearchMode::LinesAndCircles
        }
    }

    /// Candidate line points of one fovea, before occlusion filtering.
    pub fn find_points<T>(&self, fovea: &Fovea, starts: &ScanStarts, transform: &T) -> Vec<FieldPoint>
    where
        T: CameraToRobot + ?Sized,
    {
        find_points(
            fovea,
            starts,
            transform,
            &self.config.points,
            &self.config.field,
        )
    }

    /// Fits and classifies landmarks from points that already passed the occlusion filter.
    pub fn features_from_points(&self, points: &[FieldPoint], player: u8) -> Vec<Feature> {
        let config = &self.config;
        let robot: Vec<Point2<f64>> = points.iter().map(|point| point.robot).collect();
        let fitted = fit_features(
            &robot,
            Self::search_mode(player),
            &config.fitting,
            &config.field,
        );
        trace!("fitting rounds saw pools of {:?}", fitted.pool_sizes);

        let mut features = fitted.features;
        find_intersections(&mut features, &config.classifier);
        merge_goal_box_corners(&mut features, &config.classifier);
        if player != GOALKEEPER {
            orient_centre_circle(&mut features, &config.classifier);
        }
        if config.classifier.detect_parallel_lines {
            find_parallel_lines(&mut features, &config.classifier, &config.field);
        }
        features
    }

    /// Runs the full detector over every fovea of a tick.
    ///
    /// Points of each fovea go through the occlusion filter on their own and are then
    /// pooled before fitting, so a line seen partly in each camera is fitted once. Junctions are annotated with their position in the first
    /// camera frame they project into.
    pub fn detect<'r, 'a: 'r, I, T>(&self, regions: I, transform: &T, player: u8) -> Detection
    where
        I: IntoIterator<Item = (&'r Fovea<'a>, &'r ScanStarts)>,
        T: CameraToRobot + ?Sized,
    {
        let mut frames: Vec<(Camera, usize, usize)> = Vec::new();
        let mut batches = Vec::new();
        for (fovea, starts) in regions {
            frames.push((fovea.camera(), fovea.buffer().width(), fovea.buffer().height()));
            batches.push(self.find_points(fovea, starts, transform));
        }
        let points = self.pool(batches);
        let mut features = self.features_from_points(&points, player);

        for feature in &mut features {
            if let Some(image) = feature
                .position()
                .and_then(|position| project(&frames, transform, position))
            {
                feature.set_image(image);
            }
        }
        info!(
            "{} features from {} line points",
            features.len(),
            points.len()
        );
        Detection { points, features }
    }

    /// Drops the dense clusters of every batch, then joins what is left.
    fn pool<B>(&self, batches: B) -> Vec<FieldPoint>
    where
        B: IntoIterator<Item = Vec<FieldPoint>>,
    {
        batches
            .into_iter()
            .flat_map(|batch| filter_occluded(batch, &self.config.occlusion, &self.config.field))
            .collect()
    }
}

fn project<T>(
    frames: &[(Camera, usize, usize)],
    transform: &T,
    position: Point2<f64>,
) -> Option<ImagePosition>
where
    T: CameraToRobot + ?Sized,
{
    frames.iter().find_map(|&(camera, width, height)| {
        let pixel = transform.robot_to_image(camera, position)?;
        let inside = pixel.x >= 0.0
            && pixel.y >= 0.0
            && pixel.x < width as f64
            && pixel.y < height as f64;
        inside.then(|| ImagePosition { camera, pixel })
    })
}
