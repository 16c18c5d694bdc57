//! Settings of the [`CameraController`](crate::CameraController).

use crate::content::Size;
use compact_str::CompactString;
use image::imageops::FilterType;
use std::{path::PathBuf, time::Duration};

/// Settings of the local notification.
#[derive(Debug, Clone)]
pub struct NotificationConfig {
    /// Identifier of the request, used to replace or remove it.
    pub identifier: CompactString,
    /// Title of the notification.
    pub title: CompactString,
    /// Subtitle of the notification.
    pub subtitle: CompactString,
    /// Body text of the notification.
    pub body: CompactString,
    /// Play the default sound on delivery.
    pub sound: bool,
    /// Delay between scheduling and delivery.
    pub delay: Duration,
    /// Deliver again every `delay`.
    pub repeats: bool,
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            identifier: "my_interval".into(),
            title: "Title".into(),
            subtitle: "Subtitle".into(),
            body: "Body".into(),
            sound: true,
            delay: Duration::from_secs(5),
            repeats: false,
        }
    }
}

/// Settings of the thumbnail attached to notifications.
#[derive(Debug, Clone)]
pub struct AttachmentConfig {
    /// Bounds the thumbnail is fitted in.
    pub bounds: Size,
    /// Name of the written `PNG` file, also used as attachment identifier.
    pub file_name: CompactString,
    /// Folder in which a unique sub folder is created for each attachment.
    /// The system temporary folder if `None`.
    pub directory: Option<PathBuf>,
}

impl Default for AttachmentConfig {
    fn default() -> Self {
        Self {
            bounds: Size::new(120., 120.),
            file_name: "mycamera.png".into(),
            directory: None,
        }
    }
}

impl AttachmentConfig {
    /// Folder in which attachment folders are created.
    #[must_use]
    pub fn base_directory(&self) -> PathBuf {
        self.directory.clone().unwrap_or_else(std::env::temp_dir)
    }
}

/// All settings of the [`CameraController`](crate::CameraController).
#[derive(Debug, Clone)]
pub struct Config {
    /// Text shared with the photo.
    pub share_caption: CompactString,
    /// Interpolation used when resizing for share and thumbnails.
    /// `Nearest` is upgraded to `Triangle` by the resizer.
    pub resample_filter: FilterType,
    /// Local notification settings.
    pub notification: NotificationConfig,
    /// Notification thumbnail settings.
    pub attachment: AttachmentConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            share_caption: "#MyCameraApp".into(),
            resample_filter: FilterType::Triangle,
            notification: NotificationConfig::default(),
            attachment: AttachmentConfig::default(),
        }
    }
}
