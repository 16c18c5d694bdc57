use super::{FilterError, FilterPreset, FilterService};
use crate::image::Image;
use image::{imageops, GrayImage, Pixel, Rgba, RgbaImage};
use log::trace;

/// Default gradient magnitude above which a pixel is part of a line.
pub const DEFAULT_EDGE_THRESHOLD: f32 = 96.;

/// [`FilterService`] built on `image` primitives.
#[derive(Debug, Clone, Copy)]
pub struct ImageOpsFilter {
    edge_threshold: f32,
}

impl Default for ImageOpsFilter {
    fn default() -> Self {
        Self::new(DEFAULT_EDGE_THRESHOLD)
    }
}

impl ImageOpsFilter {
    /// Create a filter service, `edge_threshold` is the minimum Sobel gradient
    /// magnitude drawn by [`FilterPreset::LineOverlay`].
    #[must_use]
    pub const fn new(edge_threshold: f32) -> Self {
        Self { edge_threshold }
    }
}

impl FilterService for ImageOpsFilter {
    fn apply(&self, image: &Image, preset: FilterPreset) -> Result<Image, FilterError> {
        trace!("apply filter {preset} on {} image", image.size());
        let pixels = image.pixels();
        let filtered = match preset {
            FilterPreset::None => return Ok(image.clone()),
            FilterPreset::Mono => mono(pixels),
            FilterPreset::Sepia => sepia(pixels),
            FilterPreset::LineOverlay => line_overlay(pixels, self.edge_threshold),
        };
        Ok(image.with_pixels(filtered))
    }
}

/// Replace colors by their luminance, alpha is kept.
#[profiling::function]
fn mono(pixels: &RgbaImage) -> RgbaImage {
    let mut out = pixels.clone();
    out.pixels_mut().for_each(|pixel| {
        let luma = pixel.to_luma()[0];
        let alpha = pixel[3];
        *pixel = Rgba([luma, luma, luma, alpha]);
    });
    out
}

/// Classic sepia tone matrix.
#[profiling::function]
fn sepia(pixels: &RgbaImage) -> RgbaImage {
    let mut out = pixels.clone();
    out.pixels_mut().for_each(|pixel| {
        let [r, g, b, a] = pixel.0;
        let (r, g, b) = (f32::from(r), f32::from(g), f32::from(b));
        let tone = |cr: f32, cg: f32, cb: f32| channel(cr * r + cg * g + cb * b);
        *pixel = Rgba([
            tone(0.393, 0.769, 0.189),
            tone(0.349, 0.686, 0.168),
            tone(0.272, 0.534, 0.131),
            a,
        ]);
    });
    out
}

/// Opaque black where the luminance gradient is strong, transparent elsewhere.
#[profiling::function]
fn line_overlay(pixels: &RgbaImage, threshold: f32) -> RgbaImage {
    let luma: GrayImage = imageops::grayscale(pixels);
    let (width, height) = luma.dimensions();
    if width == 0 || height == 0 {
        return RgbaImage::new(width, height);
    }
    let at = |x: i64, y: i64| {
        let x = u32::try_from(x.clamp(0, i64::from(width) - 1)).unwrap_or_default();
        let y = u32::try_from(y.clamp(0, i64::from(height) - 1)).unwrap_or_default();
        f32::from(luma.get_pixel(x, y)[0])
    };

    RgbaImage::from_fn(width, height, |x, y| {
        let (x, y) = (i64::from(x), i64::from(y));
        let gx = at(x + 1, y - 1) + 2. * at(x + 1, y) + at(x + 1, y + 1)
            - at(x - 1, y - 1)
            - 2. * at(x - 1, y)
            - at(x - 1, y + 1);
        let gy = at(x - 1, y + 1) + 2. * at(x, y + 1) + at(x + 1, y + 1)
            - at(x - 1, y - 1)
            - 2. * at(x, y - 1)
            - at(x + 1, y - 1);
        if gx.hypot(gy) >= threshold {
            Rgba([0, 0, 0, u8::MAX])
        } else {
            Rgba([0, 0, 0, 0])
        }
    })
}

/// Clamp a computed channel value to `u8`.
fn channel(value: f32) -> u8 {
    cast::u8(value.round().clamp(0., 255.)).unwrap_or(u8::MAX)
}
