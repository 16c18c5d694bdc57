//! Aspect-fit resize of an [`Image`] into a bounding [`Size`].

use super::{normalize_orientation, Image, Orientation, TransformError, MAX_PIXEL_BYTES};
use crate::content::Size;
use image::{imageops, imageops::FilterType, RgbaImage};
use log::trace;

/// Resize images to the largest size fitting in bounds, keeping the aspect ratio.
#[derive(Debug, Clone, Copy)]
pub struct AspectFitResizer {
    filter: FilterType,
}

impl Default for AspectFitResizer {
    fn default() -> Self {
        Self::new(FilterType::Triangle)
    }
}

impl AspectFitResizer {
    /// Create a resizer which resample with `filter`.
    ///
    /// Resampling is at least bilinear: [`FilterType::Nearest`] is replaced
    /// by [`FilterType::Triangle`].
    #[must_use]
    pub const fn new(filter: FilterType) -> Self {
        let filter = match filter {
            FilterType::Nearest => FilterType::Triangle,
            other => other,
        };
        Self { filter }
    }

    /// Interpolation filter used for resampling.
    #[must_use]
    pub const fn filter(&self) -> FilterType {
        self.filter
    }

    /// Resize `source` to fit entirely in `bounds`.
    ///
    /// The output logical size is `source.size() * min(width ratio, height ratio)`,
    /// its scale is the scale of `source`. The source is rendered through its
    /// orientation first, so the output is tagged [`Orientation::Up`].
    /// Empty `bounds` give an empty image.
    ///
    /// # Errors
    ///
    /// Will return [`TransformError::InvalidImage`] if `source` has an empty size.
    /// Will return [`TransformError::OutputTooLarge`] if the output doesn't fit a pixel buffer.
    /// Will return [`TransformError::BufferTooLarge`] if the output buffer exceeds [`MAX_PIXEL_BYTES`].
    #[profiling::function]
    pub fn resize(&self, source: &Image, bounds: Size) -> Result<Image, TransformError> {
        source.check_valid()?;

        let size = source.size().aspect_fit(bounds);
        let (width, height) = pixel_dimensions(size, source.scale())?;
        trace!(
            "resize {} to {size} in {bounds}, {width}x{height} pixels",
            source.size()
        );

        let pixels = if width == 0 || height == 0 {
            RgbaImage::new(width, height)
        } else {
            let upright;
            let pixels = if source.orientation() == Orientation::Up {
                source.pixels()
            } else {
                upright = normalize_orientation(source)?;
                upright.pixels()
            };
            if pixels.dimensions() == (width, height) {
                pixels.clone()
            } else {
                profiling::scope!("resample");
                imageops::resize(pixels, width, height, self.filter)
            }
        };

        Ok(Image::from_parts(
            pixels,
            size,
            source.scale(),
            Orientation::Up,
        ))
    }
}

/// Resize `source` to fit in `bounds` with the default [`AspectFitResizer`].
///
/// # Errors
///
/// See [`AspectFitResizer::resize`].
pub fn resize(source: &Image, bounds: Size) -> Result<Image, TransformError> {
    AspectFitResizer::default().resize(source, bounds)
}

/// Physical pixel counts of a logical `size` at `scale`, within [`MAX_PIXEL_BYTES`].
fn pixel_dimensions(size: Size, scale: f64) -> Result<(u32, u32), TransformError> {
    let physical = size.scaled(scale);
    let to_pixels = |value: f64| {
        let pixels = cast::u32(value.round()).map_err(|reason| TransformError::OutputTooLarge {
            width: physical.width,
            height: physical.height,
            reason,
        })?;
        // a visible side keeps at least one pixel
        Ok(if value > 0. { pixels.max(1) } else { pixels })
    };
    let (width, height) = (to_pixels(physical.width)?, to_pixels(physical.height)?);

    let bytes = u64::from(width)
        .checked_mul(u64::from(height))
        .and_then(|count| count.checked_mul(4));
    match bytes {
        Some(bytes) if bytes <= MAX_PIXEL_BYTES => Ok((width, height)),
        _ => Err(TransformError::BufferTooLarge {
            width,
            height,
            limit: MAX_PIXEL_BYTES,
        }),
    }
}
