//! Custom error types.

use thiserror::Error;

/// A type representing errors that are specific to `mycamera`. Module
/// operations return their own error type, which converts into this one.
#[derive(Debug, Error)]
pub enum MyCameraError {
    /// Error with an image transform
    #[error("Image transform failed")]
    Transform(#[from] crate::image::TransformError),

    /// Error while applying a filter
    #[error("Filter failed")]
    Filter(#[from] crate::filter::FilterError),

    /// Error while creating a notification attachment
    #[error("Notification attachment failed")]
    Attachment(#[from] crate::notification::AttachmentError),

    /// Error from the notification center
    #[error("Notification failed")]
    Notification(#[from] crate::notification::NotificationError),

    /// Error from another platform service
    #[error("Platform service failed")]
    Service(#[from] crate::services::ServiceError),

    /// No camera can be used to take a photo.
    #[error("Camera is not available")]
    CameraUnavailable,

    /// The operation needs a photo, and none was taken.
    #[error("No photo has been taken")]
    NoImage,
}
