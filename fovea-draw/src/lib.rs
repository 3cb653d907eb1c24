use field_core::{nalgebra::Point2, Camera, FieldGeometry, GroundPlaneCamera};
use field_features::{find_points, PointConfig};
use fovea::{yuv422_from_luma, BufferError, Colour, PixelBuffer, ScanStarts, Thresholding};
use image::{DynamicImage, Rgba, RgbaImage};
use imageproc::drawing;

fn paint(colour: Colour) -> Rgba<u8> {
    match colour {
        Colour::White => Rgba([255, 255, 255, 255]),
        Colour::Green => Rgba([0, 128, 0, 255]),
        Colour::BodyPart => Rgba([128, 128, 128, 255]),
    }
}

/// Feeds the luma of an ordinary image through segmentation.
///
/// Odd widths lose their last column, since YUV422 pairs up pixels.
pub fn luma_frame(image: &DynamicImage) -> (usize, usize, Vec<u8>) {
    let luma = image.to_luma8();
    let width = luma.width() as usize & !1;
    let height = luma.height() as usize;
    let bytes = yuv422_from_luma(width, height, |x, y| luma.get_pixel(x as u32, y as u32)[0]);
    (width, height, bytes)
}

/// Renders the colour classification of the whole image at `density`.
///
/// When a ground camera is given, accepted line points are drawn on top as crosses.
pub fn render_colours(
    image: &DynamicImage,
    thresholding: &Thresholding,
    density: usize,
    ground: Option<&GroundPlaneCamera>,
) -> Result<DynamicImage, BufferError> {
    let (width, height, bytes) = luma_frame(image);
    let buffer = PixelBuffer::new(Camera::Top, width, height, &bytes)?;
    let fovea = thresholding.segment_frame(buffer, density, None);

    let mut canvas = RgbaImage::from_fn(width as u32, height as u32, |x, y| {
        fovea
            .from_raw(Point2::new(x as usize, y as usize))
            .and_then(|(fx, fy)| fovea.colour(fx, fy))
            .map_or(Rgba([0, 0, 0, 255]), paint)
    });

    if let Some(ground) = ground {
        let cameras = field_core::CameraPair {
            top: *ground,
            bottom: *ground,
        };
        let points = find_points(
            &fovea,
            &ScanStarts::default(),
            &cameras,
            &PointConfig::default(),
            &FieldGeometry::default(),
        );
        for point in points {
            drawing::draw_cross_mut(
                &mut canvas,
                Rgba([255, 0, 0, 255]),
                point.image.x as i32,
                point.image.y as i32,
            );
        }
    }
    Ok(DynamicImage::ImageRgba8(canvas))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GrayImage, Luma};

    #[test]
    fn stripe_is_painted_white() {
        let image = DynamicImage::ImageLuma8(GrayImage::from_fn(65, 40, |x, _| {
            Luma([if (30..34).contains(&x) { 220 } else { 60 }])
        }));
        let rendered = render_colours(&image, &Thresholding::default(), 1, None)
            .unwrap()
            .to_rgba8();
        assert_eq!(rendered.dimensions(), (64, 40));
        assert_eq!(*rendered.get_pixel(31, 20), paint(Colour::White));
        assert_eq!(*rendered.get_pixel(5, 20), paint(Colour::Green));
    }
}
