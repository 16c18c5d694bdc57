//! Module for `Image` manipulation.
//!
//! An [`Image`] is an immutable RGBA bitmap with a logical size, a display scale
//! and an [`Orientation`] tag. Transforms never mutate their input, they return
//! a new [`Image`].
mod orientation;
mod resize;
mod utils;

pub use orientation::{normalize_orientation, Orientation};
pub use resize::{resize, AspectFitResizer};
pub use utils::save_png;

use crate::content::Size;
use image::{DynamicImage, RgbaImage};
use thiserror::Error;

/// Errors of image transforms.
#[derive(Debug, Error)]
pub enum TransformError {
    /// The image has a zero, negative or non finite dimension or scale.
    #[error("Invalid image: {width}x{height} at scale {scale}")]
    InvalidImage {
        /// logical width of the image
        width: f64,
        /// logical height of the image
        height: f64,
        /// display scale of the image
        scale: f64,
    },

    /// The physical size of the transform output can't be stored in a pixel buffer.
    #[error("Output size {width}x{height} pixels is out of range ({reason:?})")]
    OutputTooLarge {
        /// requested width in pixels
        width: f64,
        /// requested height in pixels
        height: f64,
        /// Failed pixel count conversion
        reason: cast::Error,
    },

    /// The RGBA buffer of the transform output would exceed [`MAX_PIXEL_BYTES`].
    #[error("Output buffer of {width}x{height} pixels exceeds {limit} bytes")]
    BufferTooLarge {
        /// output width in pixels
        width: u32,
        /// output height in pixels
        height: u32,
        /// byte limit of an output buffer
        limit: u64,
    },
}

/// Largest RGBA pixel buffer, in bytes, a transform will allocate (1 GiB).
pub const MAX_PIXEL_BYTES: u64 = 1 << 30;

/// An immutable bitmap with logical size, display scale and orientation tag.
#[derive(Debug, Clone, PartialEq)]
pub struct Image {
    pixels: RgbaImage,
    size: Size,
    scale: f64,
    orientation: Orientation,
}

impl Image {
    /// Create an `Image` from an RGBA pixel buffer as stored by the capture device.
    ///
    /// The logical size is the displayed size: the buffer dimensions, swapped
    /// if `orientation` rotates by a quarter turn, divided by `scale`.
    ///
    /// # Errors
    ///
    /// Will return [`TransformError::InvalidImage`] if the buffer is empty, if
    /// `scale` is not strictly positive and finite, or if the logical size
    /// isn't finite (as with a subnormal `scale`).
    pub fn new(
        pixels: RgbaImage,
        scale: f64,
        orientation: Orientation,
    ) -> Result<Self, TransformError> {
        let stored = Size::new(f64::from(pixels.width()), f64::from(pixels.height()));
        let displayed = if orientation.swaps_axes() {
            stored.transposed()
        } else {
            stored
        };
        let size = Size::new(displayed.width / scale, displayed.height / scale);
        if !stored.is_positive() || !scale.is_finite() || scale <= 0. || !size.is_positive() {
            return Err(TransformError::InvalidImage {
                width: size.width,
                height: size.height,
                scale,
            });
        }
        Ok(Self {
            pixels,
            size,
            scale,
            orientation,
        })
    }

    /// Create an `Image` from any decoded image, converted to RGBA.
    ///
    /// # Errors
    ///
    /// Same as [`Self::new`].
    pub fn from_dynamic(
        image: &DynamicImage,
        scale: f64,
        orientation: Orientation,
    ) -> Result<Self, TransformError> {
        Self::new(image.to_rgba8(), scale, orientation)
    }

    /// Build an image from already consistent parts. Used by transforms, which
    /// may legitimately produce an empty image.
    pub(crate) const fn from_parts(
        pixels: RgbaImage,
        size: Size,
        scale: f64,
        orientation: Orientation,
    ) -> Self {
        Self {
            pixels,
            size,
            scale,
            orientation,
        }
    }

    /// Same logical size, scale and orientation, with another pixel buffer of
    /// the same dimensions.
    pub(crate) fn with_pixels(&self, pixels: RgbaImage) -> Self {
        debug_assert_eq!(pixels.dimensions(), self.pixels.dimensions());
        Self::from_parts(pixels, self.size, self.scale, self.orientation)
    }

    /// Check the image can be transformed: non-empty buffer, positive finite
    /// logical size and scale. Transforms may output empty images, which fail here.
    ///
    /// # Errors
    ///
    /// Will return [`TransformError::InvalidImage`] if the image is empty.
    pub fn check_valid(&self) -> Result<(), TransformError> {
        let (width, height) = self.pixels.dimensions();
        if self.size.is_positive()
            && width > 0
            && height > 0
            && self.scale.is_finite()
            && self.scale > 0.
        {
            Ok(())
        } else {
            Err(TransformError::InvalidImage {
                width: self.size.width,
                height: self.size.height,
                scale: self.scale,
            })
        }
    }

    /// Logical displayed width.
    #[must_use]
    pub const fn width(&self) -> f64 {
        self.size.width
    }

    /// Logical displayed height.
    #[must_use]
    pub const fn height(&self) -> f64 {
        self.size.height
    }

    /// Logical displayed size.
    #[must_use]
    pub const fn size(&self) -> Size {
        self.size
    }

    /// Multiplier between logical units and physical pixels.
    #[must_use]
    pub const fn scale(&self) -> f64 {
        self.scale
    }

    /// Pending orientation of the stored pixels.
    #[must_use]
    pub const fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// The stored pixel buffer, before orientation is applied.
    #[must_use]
    pub const fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }

    /// Consume the image and return the stored pixel buffer.
    #[must_use]
    pub fn into_pixels(self) -> RgbaImage {
        self.pixels
    }

    /// See [`normalize_orientation`].
    ///
    /// # Errors
    ///
    /// Will return [`TransformError::InvalidImage`] if the image is empty.
    pub fn normalized(&self) -> Result<Self, TransformError> {
        normalize_orientation(self)
    }
}
