use field_core::Camera;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum BufferError {
    #[error("a {width} x {height} YUV422 frame needs {expected} bytes, but {actual} were given")]
    SizeMismatch {
        width: usize,
        height: usize,
        expected: usize,
        actual: usize,
    },
    #[error("YUV422 frames must have an even width, got {0}")]
    OddWidth(usize),
}

/// A borrowed camera frame in packed YUV422 (`Y U Y V`) layout.
///
/// Every pixel takes two bytes and its luma is the first of them. The frame belongs
/// to the camera driver; segmentation only ever reads from it.
#[derive(Debug, Clone, Copy)]
pub struct PixelBuffer<'a> {
    camera: Camera,
    width: usize,
    height: usize,
    bytes: &'a [u8],
}

impl<'a> PixelBuffer<'a> {
    pub const BYTES_PER_PIXEL: usize = 2;

    pub fn new(
        camera: Camera,
        width: usize,
        height: usize,
        bytes: &'a [u8],
    ) -> Result<Self, BufferError> {
        if width % 2 != 0 {
            return Err(BufferError::OddWidth(width));
        }
        let expected = width * height * Self::BYTES_PER_PIXEL;
        if bytes.len() != expected {
            return Err(BufferError::SizeMismatch {
                width,
                height,
                expected,
                actual: bytes.len(),
            });
        }
        Ok(Self {
            camera,
            width,
            height,
            bytes,
        })
    }

    pub fn camera(&self) -> Camera {
        self.camera
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Luma of the raw pixel at column `x`, row `y`.
    pub fn luma(&self, x: usize, y: usize) -> Option<u8> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.bytes
            .get((y * self.width + x) * Self::BYTES_PER_PIXEL)
            .copied()
    }

    /// Number of whole samples along each axis at `density`.
    pub fn dense_size(&self, density: usize) -> (usize, usize) {
        let density = density.max(1);
        (self.width / density, self.height / density)
    }
}

/// Packs a luma function into a YUV422 frame with neutral chroma.
///
/// Used for synthetic frames and for feeding ordinary images through segmentation.
pub fn yuv422_from_luma(width: usize, height: usize, luma: impl Fn(usize, usize) -> u8) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(width * height * PixelBuffer::BYTES_PER_PIXEL);
    for y in 0..height {
        for x in 0..width {
            bytes.push(luma(x, y));
            bytes.push(128);
        }
    }
    bytes
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_short_frames() {
        let bytes = vec![0u8; 10];
        assert_eq!(
            PixelBuffer::new(Camera::Top, 4, 2, &bytes).unwrap_err(),
            BufferError::SizeMismatch {
                width: 4,
                height: 2,
                expected: 16,
                actual: 10
            }
        );
    }

    #[test]
    fn luma_is_every_other_byte() {
        let bytes = yuv422_from_luma(4, 2, |x, y| (x + 10 * y) as u8);
        let buffer = PixelBuffer::new(Camera::Bottom, 4, 2, &bytes).unwrap();
        assert_eq!(buffer.luma(3, 1), Some(13));
        assert_eq!(buffer.luma(4, 1), None);
        assert_eq!(buffer.dense_size(2), (2, 1));
    }
}
