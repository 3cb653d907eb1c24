use crate::PointConfig;
use field_core::{nalgebra::Point2, CameraToRobot, FieldGeometry, FieldPoint};
use fovea::{Colour, Fovea, ScanStarts};
use log::*;

/// Tracks one run of white samples along a row or column.
///
/// A run opens on a green to white transition and closes on the following white to
/// green transition. Anything else, including body parts and unscanned samples,
/// drops the run.
#[derive(Debug, Clone, Copy, Default)]
struct EdgeScan {
    previous: Option<Colour>,
    start: Option<usize>,
}

impl EdgeScan {
    fn reset(&mut self) {
        *self = Self::default();
    }

    /// Feeds the sample at `position`. Returns the first and last white position of a
    /// run that has just closed.
    fn step(&mut self, position: usize, colour: Colour) -> Option<(usize, usize)> {
        let closed = match (self.previous, colour) {
            (_, Colour::BodyPart) => {
                self.reset();
                return None;
            }
            (Some(Colour::Green), Colour::White) => {
                self.start = Some(position);
                None
            }
            (Some(Colour::White), Colour::Green) => self.start.take().map(|s| (s, position - 1)),
            _ => None,
        };
        self.previous = Some(colour);
        closed
    }
}

#[derive(Debug, Default)]
struct Rejections {
    colour: usize,
    proximity: usize,
    width: usize,
    close: usize,
    outside: usize,
}

/// Finds the middle of painted lines in a segmented fovea.
///
/// Rows and columns are scanned together in raster order. Every closed white run is a
/// candidate whose midpoint must be white, far enough from the last accepted point on
/// its row and column, of plausible width on the ground, not under the robot and on
/// the field.
pub fn find_points<T>(
    fovea: &Fovea,
    starts: &ScanStarts,
    transform: &T,
    config: &PointConfig,
    field: &FieldGeometry,
) -> Vec<FieldPoint>
where
    T: CameraToRobot + ?Sized,
{
    let (width, height) = (fovea.width(), fovea.height());
    let colours = fovea.colours();
    let camera = fovea.camera();
    let proximity = (config.point_proximity / fovea.density().max(1)) as isize;
    let min_width_squared = config.min_line_width * config.min_line_width;
    let max_width_squared = config.max_line_width * config.max_line_width;
    let min_distance_squared = config.min_point_distance * config.min_point_distance;

    let mut recent_row_x = vec![-1000isize; height];
    let mut recent_col_y = vec![-1000isize; width];
    let mut columns = vec![EdgeScan::default(); width];
    let mut points = Vec::new();
    let mut rejections = Rejections::default();
    let mut candidates = 0;

    let robot = |x: usize, y: usize| {
        let raw = fovea.to_raw(x, y);
        transform.image_to_robot(camera, Point2::new(raw.x as f64, raw.y as f64))
    };

    let mut candidate = |first: (usize, usize), last: (usize, usize)| {
        candidates += 1;
        let (x, y) = ((first.0 + last.0) / 2, (first.1 + last.1) / 2);
        if colours[(y, x)] != Colour::White {
            rejections.colour += 1;
            return;
        }
        let (xi, yi) = (x as isize, y as isize);
        if xi - recent_row_x[y] <= proximity || yi - recent_col_y[x] <= proximity {
            rejections.proximity += 1;
            return;
        }
        recent_row_x[y] = xi;
        recent_col_y[x] = yi;

        let width_squared = match (robot(first.0, first.1), robot(last.0, last.1)) {
            (Some(a), Some(b)) => (a - b).norm_squared(),
            _ => f64::INFINITY,
        };
        if width_squared < min_width_squared || width_squared > max_width_squared {
            rejections.width += 1;
            return;
        }
        let middle = match robot(x, y) {
            Some(middle) => middle,
            None => {
                rejections.width += 1;
                return;
            }
        };
        if middle.coords.norm_squared() < min_distance_squared {
            rejections.close += 1;
            return;
        }
        if !field.contains(&middle) {
            rejections.outside += 1;
            return;
        }
        points.push(FieldPoint::new(camera, fovea.to_raw(x, y), middle));
    };

    for y in 0..height {
        let mut row = EdgeScan::default();
        for x in 0..width {
            let raw = fovea.to_raw(x, y);
            if !starts.allows(raw.x, raw.y) {
                row.reset();
                columns[x].reset();
                continue;
            }
            let colour = colours[(y, x)];
            if let Some((first, last)) = row.step(x, colour) {
                candidate((first, y), (last, y));
            }
            if let Some((first, last)) = columns[x].step(y, colour) {
                candidate((x, first), (x, last));
            }
        }
    }

    debug!(
        "{} line points out of {} candidates on the {:?} camera",
        points.len(),
        candidates,
        camera
    );
    trace!("rejected: {:?}", rejections);
    points
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn runs_need_green_on_both_sides() {
        let mut scan = EdgeScan::default();
        let colours = [
            Colour::White,
            Colour::Green,
            Colour::White,
            Colour::White,
            Colour::Green,
            Colour::White,
            Colour::BodyPart,
            Colour::Green,
        ];
        let runs: Vec<_> = colours
            .iter()
            .enumerate()
            .filter_map(|(i, &c)| scan.step(i, c))
            .collect();
        assert_eq!(runs, vec![(2, 3)]);
    }
}
