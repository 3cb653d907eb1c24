use nalgebra::{Point2, Vector2, Vector3};
use num_traits::Float;

#[cfg(feature = "serde-serialize")]
use serde::{Deserialize, Serialize};

/// One of the two head cameras.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub enum Camera {
    Top,
    Bottom,
}

/// Converts between raw image pixels and robot-relative ground coordinates.
///
/// The transform is calibrated externally (kinematics + camera model) and is only
/// ever borrowed by the perception pipeline.
pub trait CameraToRobot {
    /// Projects a raw pixel onto the ground plane.
    ///
    /// Pixels at or above the horizon never reach the ground, so this is fallible.
    fn image_to_robot(&self, camera: Camera, pixel: Point2<f64>) -> Option<Point2<f64>>;

    /// Projects a robot-relative ground point back into a raw pixel position.
    ///
    /// Points behind the camera have no image, so this is fallible.
    fn robot_to_image(&self, camera: Camera, point: Point2<f64>) -> Option<Point2<f64>>;
}

impl<T> CameraToRobot for &T
where
    T: CameraToRobot + ?Sized,
{
    fn image_to_robot(&self, camera: Camera, pixel: Point2<f64>) -> Option<Point2<f64>> {
        (**self).image_to_robot(camera, pixel)
    }

    fn robot_to_image(&self, camera: Camera, point: Point2<f64>) -> Option<Point2<f64>> {
        (**self).robot_to_image(camera, point)
    }
}

/// A distortion free pinhole camera looking at a flat ground plane.
///
/// The camera sits `height` millimetres above the ground directly over the robot
/// origin and is pitched `pitch` radians below the horizon. Its image frame has X
/// right and Y down, as with every other camera model.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct GroundPlaneCamera {
    pub focals: Vector2<f64>,
    pub principal_point: Point2<f64>,
    pub height: f64,
    pub pitch: f64,
}

impl GroundPlaneCamera {
    pub fn new(focal: f64, principal_point: Point2<f64>, height: f64, pitch: f64) -> Self {
        Self {
            focals: Vector2::new(focal, focal),
            principal_point,
            height,
            pitch,
        }
    }

    /// Ray direction of a pixel expressed in the robot frame (X forward, Y left, Z up).
    pub fn ray(&self, pixel: Point2<f64>) -> Vector3<f64> {
        let xn = (pixel.x - self.principal_point.x) / self.focals.x;
        let yn = (pixel.y - self.principal_point.y) / self.focals.y;
        let (sin, cos) = self.pitch.sin_cos();
        Vector3::new(-yn * sin + cos, -xn, -yn * cos - sin)
    }

    pub fn pixel_to_ground(&self, pixel: Point2<f64>) -> Option<Point2<f64>> {
        let ray = self.ray(pixel);
        // The ray must point below the horizon.
        if ray.z >= -f64::EPSILON {
            return None;
        }
        let t = self.height / -ray.z;
        Some(Point2::new(ray.x * t, ray.y * t))
    }

    pub fn ground_to_pixel(&self, point: Point2<f64>) -> Option<Point2<f64>> {
        let (sin, cos) = self.pitch.sin_cos();
        let xc = -point.y;
        let yc = -point.x * sin + self.height * cos;
        let zc = point.x * cos + self.height * sin;
        if zc <= f64::EPSILON {
            return None;
        }
        Some(Point2::new(
            self.focals.x * xc / zc + self.principal_point.x,
            self.focals.y * yc / zc + self.principal_point.y,
        ))
    }
}

/// The calibrated top and bottom cameras of one robot.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct CameraPair {
    pub top: GroundPlaneCamera,
    pub bottom: GroundPlaneCamera,
}

impl CameraPair {
    pub fn camera(&self, camera: Camera) -> &GroundPlaneCamera {
        match camera {
            Camera::Top => &self.top,
            Camera::Bottom => &self.bottom,
        }
    }
}

impl CameraToRobot for CameraPair {
    fn image_to_robot(&self, camera: Camera, pixel: Point2<f64>) -> Option<Point2<f64>> {
        self.camera(camera).pixel_to_ground(pixel)
    }

    fn robot_to_image(&self, camera: Camera, point: Point2<f64>) -> Option<Point2<f64>> {
        self.camera(camera).ground_to_pixel(point)
    }
}
