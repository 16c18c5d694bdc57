//! Platform services used by the [`CameraController`](crate::CameraController).
//!
//! The host application implements these traits over its camera, photo
//! library and share sheet. Capture results come back through
//! [`CameraController::did_capture`](crate::CameraController::did_capture).

use crate::image::Image;
use compact_str::CompactString;
use thiserror::Error;

/// Failure reported by a platform service.
#[derive(Debug, Error)]
#[error("{service} failed: {reason}")]
pub struct ServiceError {
    /// name of the failing service
    pub service: &'static str,
    /// description of the failure
    pub reason: CompactString,
}

/// Camera capture device.
pub trait Camera {
    /// Return `true` if a camera can be used to take a photo.
    fn is_available(&self) -> bool;

    /// Show the capture interface. The captured image is handed back later
    /// to [`CameraController::did_capture`](crate::CameraController::did_capture).
    fn present(&mut self);
}

/// Persistent storage of captured photos.
pub trait PhotoLibrary {
    /// Save `image` in the library.
    ///
    /// # Errors
    ///
    /// Will return a [`ServiceError`] if the library refused the image.
    fn save(&mut self, image: &Image) -> Result<(), ServiceError>;
}

/// Content handed to the share sheet.
#[derive(Debug, Clone, PartialEq)]
pub struct SharePayload {
    /// Text shared along the image.
    pub caption: CompactString,
    /// Image, fitted to the frame it was displayed in.
    pub image: Image,
}

/// System share sheet.
pub trait ShareSheet {
    /// Offer `payload` to the user for sharing.
    fn present(&mut self, payload: SharePayload);
}
