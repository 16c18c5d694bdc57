//! Orientation tag of captured bitmaps, and its application to pixel data.

use super::{Image, TransformError};
use image::{imageops, RgbaImage};
use log::trace;

/// Transform to apply to stored pixels before display.
///
/// Variants follow the eight `EXIF` orientations. The name gives where the top
/// of the stored buffer ends up once displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Orientation {
    /// Stored as displayed (`EXIF` 1).
    #[default]
    Up,
    /// Mirrored horizontally (`EXIF` 2).
    UpMirrored,
    /// Rotated by 180° (`EXIF` 3).
    Down,
    /// Mirrored vertically (`EXIF` 4).
    DownMirrored,
    /// Transposed, mirrored then rotated 90° counterclockwise (`EXIF` 5).
    LeftMirrored,
    /// Needs a 90° clockwise rotation (`EXIF` 6).
    Right,
    /// Transversed, mirrored then rotated 90° clockwise (`EXIF` 7).
    RightMirrored,
    /// Needs a 90° counterclockwise rotation (`EXIF` 8).
    Left,
}

impl Orientation {
    /// Parse the value of an `EXIF` orientation tag.
    #[must_use]
    pub const fn from_exif(value: u8) -> Option<Self> {
        match value {
            1 => Some(Self::Up),
            2 => Some(Self::UpMirrored),
            3 => Some(Self::Down),
            4 => Some(Self::DownMirrored),
            5 => Some(Self::LeftMirrored),
            6 => Some(Self::Right),
            7 => Some(Self::RightMirrored),
            8 => Some(Self::Left),
            _ => None,
        }
    }

    /// Value of the matching `EXIF` orientation tag.
    #[must_use]
    pub const fn to_exif(self) -> u8 {
        match self {
            Self::Up => 1,
            Self::UpMirrored => 2,
            Self::Down => 3,
            Self::DownMirrored => 4,
            Self::LeftMirrored => 5,
            Self::Right => 6,
            Self::RightMirrored => 7,
            Self::Left => 8,
        }
    }

    /// Return `true` if displaying exchanges width and height of the buffer.
    #[must_use]
    pub const fn swaps_axes(self) -> bool {
        matches!(
            self,
            Self::Left | Self::LeftMirrored | Self::Right | Self::RightMirrored
        )
    }

    /// Render `pixels` through this orientation, the result is stored as displayed.
    #[must_use]
    pub fn apply(self, pixels: &RgbaImage) -> RgbaImage {
        match self {
            Self::Up => pixels.clone(),
            Self::UpMirrored => imageops::flip_horizontal(pixels),
            Self::Down => imageops::rotate180(pixels),
            Self::DownMirrored => imageops::flip_vertical(pixels),
            Self::LeftMirrored => imageops::flip_horizontal(&imageops::rotate90(pixels)),
            Self::Right => imageops::rotate90(pixels),
            Self::RightMirrored => imageops::flip_horizontal(&imageops::rotate270(pixels)),
            Self::Left => imageops::rotate270(pixels),
        }
    }
}

/// Bake the orientation tag of `image` into its pixels.
///
/// The returned image is tagged [`Orientation::Up`], keeps the logical size
/// and the scale, and its buffer is stored exactly as `image` is displayed.
///
/// # Errors
///
/// Will return [`TransformError::InvalidImage`] if the image is empty.
#[profiling::function]
pub fn normalize_orientation(image: &Image) -> Result<Image, TransformError> {
    image.check_valid()?;
    trace!("normalize orientation {:?}", image.orientation());

    let pixels = image.orientation().apply(image.pixels());
    Ok(Image::from_parts(
        pixels,
        image.size(),
        image.scale(),
        Orientation::Up,
    ))
}
