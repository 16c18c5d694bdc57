use super::{Image, Orientation};
use image::ImageFormat;
use log::debug;
use std::{borrow::Cow, path::Path};

/// Write `image` as a `PNG` file at `path`.
///
/// `PNG` has no orientation tag, so pixels are written as displayed.
///
/// # Errors
///
/// Will return the encoding or `io` error from `image` if the write failed.
#[profiling::function]
pub fn save_png<P>(path: P, image: &Image) -> Result<(), image::ImageError>
where
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let pixels = match image.orientation() {
        Orientation::Up => Cow::Borrowed(image.pixels()),
        orientation => Cow::Owned(orientation.apply(image.pixels())),
    };
    debug!(
        "write {}x{} png to '{}'",
        pixels.width(),
        pixels.height(),
        path.display()
    );
    pixels.save_with_format(path, ImageFormat::Png)
}
