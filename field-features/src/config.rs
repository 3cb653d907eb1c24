use field_core::FieldGeometry;
use field_ransac::RansacConfig;

#[cfg(feature = "serde-serialize")]
use serde::{Deserialize, Serialize};

/// Filters applied to every candidate line point, in millimetres unless noted.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct PointConfig {
    /// Narrowest accepted distance between the two edges of a line.
    pub min_line_width: f64,
    /// Widest accepted distance between the two edges of a line.
    pub max_line_width: f64,
    /// Points closer to the robot than this are its own feet.
    pub min_point_distance: f64,
    /// Spacing between accepted points on the same row and column, in raw pixels.
    pub point_proximity: usize,
}

impl Default for PointConfig {
    fn default() -> Self {
        Self {
            min_line_width: 0.0,
            max_line_width: 75.0,
            min_point_distance: 120.0,
            point_proximity: 16,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct OcclusionConfig {
    /// Side of a square grid cell in millimetres.
    pub box_size: f64,
    /// Cells holding this many points or more are dropped entirely.
    pub dense_cluster: usize,
}

impl Default for OcclusionConfig {
    fn default() -> Self {
        Self {
            box_size: 1024.0,
            dense_cluster: 160,
        }
    }
}

/// Whether the fitter looks for the centre circle as well as lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub enum SearchMode {
    LinesAndCircles,
    LinesOnly,
}

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct FittingConfig {
    pub ransac: RansacConfig,
    /// Minimum support when only lines are searched.
    pub lines_only_min_inliers: usize,
    pub max_rounds: usize,
    pub min_line_length: f64,
    /// Lines shorter than `min_line_length` survive down to this length with a strict score.
    pub short_line_length: f64,
    pub strict_line_score: f64,
    /// A circle must score at or below this to win a round.
    pub circle_score: f64,
    /// Largest gap between consecutive inliers kept in a trimmed line.
    pub max_line_gap: f64,
}

impl Default for FittingConfig {
    fn default() -> Self {
        Self {
            ransac: RansacConfig::default(),
            lines_only_min_inliers: 20,
            max_rounds: 100,
            min_line_length: 400.0,
            short_line_length: 300.0,
            strict_line_score: -16.0,
            circle_score: -10.0,
            max_line_gap: 300.0,
        }
    }
}

impl FittingConfig {
    pub fn ransac(&self, mode: SearchMode) -> RansacConfig {
        match mode {
            SearchMode::LinesAndCircles => self.ransac,
            SearchMode::LinesOnly => self.ransac.min_inliers(self.lines_only_min_inliers),
        }
    }
}

/// Thresholds of the intersection and landmark classifier. Angles are in radians.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct ClassifierConfig {
    /// Largest deviation from a right angle of a corner or T.
    pub perpendicular_tolerance: f64,
    /// Both ends of the top of a T must be at least this far either side of the stem.
    pub t_straddle: f64,
    /// One end of the stem of a T must be within this distance of the top.
    pub t_touch: f64,
    /// A corner is rejected when both ends of an arm are further than this from the other arm.
    pub bad_corner_distance: f64,
    /// Exclusive band of corner to T distances that make a goal box corner.
    pub goal_box_corner_min: f64,
    pub goal_box_corner_max: f64,
    /// Largest distance between the centre circle centre and the halfway line.
    pub circle_line_distance: f64,
    /// Whether to pair up parallel lines as goal box edges. Off in competition.
    pub detect_parallel_lines: bool,
    pub parallel_tolerance: f64,
    pub parallel_distance_tolerance: f64,
    pub min_parallel_length: f64,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            perpendicular_tolerance: 10f64.to_radians(),
            t_straddle: 100.0,
            t_touch: 200.0,
            bad_corner_distance: 200.0,
            goal_box_corner_min: 400.0,
            goal_box_corner_max: 1000.0,
            circle_line_distance: 200.0,
            detect_parallel_lines: false,
            parallel_tolerance: 10f64.to_radians(),
            parallel_distance_tolerance: 200.0,
            min_parallel_length: 500.0,
        }
    }
}

/// Everything the field feature detector can be tuned with.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct FeatureConfig {
    pub field: FieldGeometry,
    pub points: PointConfig,
    pub occlusion: OcclusionConfig,
    pub fitting: FittingConfig,
    pub classifier: ClassifierConfig,
}
