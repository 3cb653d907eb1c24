//! Adaptive threshold segmentation of camera frames.
//!
//! Field lines are white paint on a green carpet, but the carpet is never lit evenly.
//! A fixed luma threshold that works in the middle of the field fails in the shadow of
//! the goal or under a window. Instead every sample is compared against the mean of
//! a window around it: a sample is white when it is sufficiently brighter than its
//! neighbourhood. The window means come from an [`IntegralImage`] so each one costs four
//! lookups no matter how big the window is.
//!
//! A [`Fovea`] is the result of segmenting one rectangle of a frame at a given density
//! (every `density`-th raw pixel along both axes).

mod buffer;
mod columns;
mod integral;
mod region;

pub use buffer::*;
pub use columns::*;
pub use integral::*;
pub use region::*;

use log::*;
use ndarray::Array2;

#[cfg(feature = "serde-serialize")]
use serde::{Deserialize, Serialize};

/// Parameters of the adaptive threshold.
///
/// A sample is classified [`Colour::Green`] when
/// `luma * count * 100 <= window_sum * (100 - percent)` and [`Colour::White`] otherwise.
/// Raising `percent` lowers the bar a sample must clear to be white.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct Thresholding {
    /// Side of the square averaging window in samples. Forced odd and capped to the fovea.
    pub window_size: usize,

    /// Signed bias of the comparison in percent of the window mean.
    pub percent: i32,
}

impl Default for Thresholding {
    fn default() -> Self {
        Self {
            window_size: 101,
            percent: -40,
        }
    }
}

impl Thresholding {
    pub fn new(window_size: usize, percent: i32) -> Self {
        Self {
            window_size,
            percent,
        }
    }

    /// The window actually used on a `height x width` fovea.
    ///
    /// The window is capped to one less than the smaller side and made odd so it is
    /// centred on the sample.
    pub fn effective_window(&self, height: usize, width: usize) -> usize {
        let mut size = self.window_size.min(height.min(width).saturating_sub(1));
        if size % 2 == 0 {
            size = size.saturating_sub(1);
        }
        size.max(1)
    }

    /// Segments `bbox` (in units of `density`) of the frame.
    ///
    /// The box is clipped to the frame. An empty or fully outside box gives an empty
    /// fovea. Samples whose raw pixel is covered by `body_parts` become
    /// [`Colour::BodyPart`].
    pub fn segment<'a>(
        &self,
        buffer: PixelBuffer<'a>,
        bbox: BBox,
        density: usize,
        body_parts: Option<&BodyPartMask>,
    ) -> Fovea<'a> {
        let density = density.max(1);
        let (frame_width, frame_height) = buffer.dense_size(density);
        let bbox = bbox.clip(frame_width, frame_height);
        let raw = |r: usize, c: usize| ((bbox.x + c) * density, (bbox.y + r) * density);

        let colours = if bbox.area() == 0 {
            debug!("empty fovea requested on the {:?} camera", buffer.camera());
            Array2::from_elem((0, 0), Colour::Green)
        } else {
            let luma = |r: usize, c: usize| {
                let (x, y) = raw(r, c);
                buffer.luma(x, y).unwrap_or(0)
            };
            let integral = IntegralImage::new(bbox.height, bbox.width, &luma);
            let size = self.effective_window(bbox.height, bbox.width);
            trace!(
                "thresholding {}x{} samples at density {} with window {}",
                bbox.width,
                bbox.height,
                density,
                size
            );
            let scale = 100 - i64::from(self.percent);
            Array2::from_shape_fn((bbox.height, bbox.width), |(r, c)| {
                let (x, y) = raw(r, c);
                if body_parts.map_or(false, |mask| mask.covers(x, y)) {
                    return Colour::BodyPart;
                }
                let (sum, count) = integral.window_sum(r, c, size);
                let lhs = i64::from(luma(r, c)) * count as i64 * 100;
                if lhs <= sum as i64 * scale {
                    Colour::Green
                } else {
                    Colour::White
                }
            })
        };

        Fovea {
            buffer,
            bbox,
            density,
            colours,
            children: Vec::new(),
        }
    }

    /// Segments the whole frame.
    pub fn segment_frame<'a>(
        &self,
        buffer: PixelBuffer<'a>,
        density: usize,
        body_parts: Option<&BodyPartMask>,
    ) -> Fovea<'a> {
        self.segment(buffer, BBox::frame(&buffer, density), density, body_parts)
    }
}
