use crate::{BodyPartMask, PixelBuffer, Thresholding};
use field_core::{nalgebra::Point2, Camera};
use ndarray::{Array2, ArrayView2};

#[cfg(feature = "serde-serialize")]
use serde::{Deserialize, Serialize};

/// The class given to every sample of a [`Fovea`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub enum Colour {
    /// Brighter than its surroundings; the paint of a field line.
    White,
    /// Anything that isn't white.
    Green,
    /// Covered by the robot's own body and never used for detection.
    BodyPart,
}

/// A rectangle in dense units, i.e. raw pixels divided by the fovea density.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct BBox {
    pub x: usize,
    pub y: usize,
    pub width: usize,
    pub height: usize,
}

impl BBox {
    pub fn new(x: usize, y: usize, width: usize, height: usize) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// The whole frame at `density`.
    pub fn frame(buffer: &PixelBuffer, density: usize) -> Self {
        let (width, height) = buffer.dense_size(density);
        Self::new(0, 0, width, height)
    }

    pub fn area(&self) -> usize {
        self.width * self.height
    }

    /// Clips the box to a `width x height` extent. Boxes entirely outside end up empty.
    pub fn clip(&self, width: usize, height: usize) -> Self {
        let x = self.x.min(width);
        let y = self.y.min(height);
        Self::new(
            x,
            y,
            (self.x.saturating_add(self.width)).min(width) - x,
            (self.y.saturating_add(self.height)).min(height) - y,
        )
    }
}

/// A segmented rectangle of one camera frame.
///
/// The colour grid is indexed `(row, column)` in dense units relative to the box origin.
/// Children are foveae over the same frame at other densities; they are owned by this
/// fovea and go away with it.
#[derive(Debug, Clone)]
pub struct Fovea<'a> {
    pub(crate) buffer: PixelBuffer<'a>,
    pub(crate) bbox: BBox,
    pub(crate) density: usize,
    pub(crate) colours: Array2<Colour>,
    pub(crate) children: Vec<Fovea<'a>>,
}

impl<'a> Fovea<'a> {
    pub fn camera(&self) -> Camera {
        self.buffer.camera()
    }

    pub fn buffer(&self) -> &PixelBuffer<'a> {
        &self.buffer
    }

    pub fn bbox(&self) -> BBox {
        self.bbox
    }

    pub fn density(&self) -> usize {
        self.density
    }

    pub fn width(&self) -> usize {
        self.colours.ncols()
    }

    pub fn height(&self) -> usize {
        self.colours.nrows()
    }

    pub fn is_empty(&self) -> bool {
        self.colours.is_empty()
    }

    /// Colour of the sample at column `x`, row `y` of this fovea.
    pub fn colour(&self, x: usize, y: usize) -> Option<Colour> {
        self.colours.get((y, x)).copied()
    }

    /// The whole classification, for other detectors that run in the same tick.
    pub fn colours(&self) -> ArrayView2<'_, Colour> {
        self.colours.view()
    }

    pub fn into_colours(self) -> Array2<Colour> {
        self.colours
    }

    /// Raw image pixel of the sample at column `x`, row `y` of this fovea.
    pub fn to_raw(&self, x: usize, y: usize) -> Point2<usize> {
        Point2::new(
            (self.bbox.x + x) * self.density,
            (self.bbox.y + y) * self.density,
        )
    }

    /// Sample of this fovea containing the raw pixel, if it is covered at all.
    pub fn from_raw(&self, raw: Point2<usize>) -> Option<(usize, usize)> {
        let x = (raw.x / self.density).checked_sub(self.bbox.x)?;
        let y = (raw.y / self.density).checked_sub(self.bbox.y)?;
        (x < self.width() && y < self.height()).then(|| (x, y))
    }

    /// Segments another box of the same frame and keeps it as a child.
    pub fn child(
        &mut self,
        bbox: BBox,
        density: usize,
        thresholding: &Thresholding,
        body_parts: Option<&BodyPartMask>,
    ) -> &Fovea<'a> {
        let child = thresholding.segment(self.buffer, bbox, density, body_parts);
        let index = self.children.len();
        self.children.push(child);
        &self.children[index]
    }

    pub fn children(&self) -> &[Fovea<'a>] {
        &self.children
    }
}
