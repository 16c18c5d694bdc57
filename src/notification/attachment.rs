use crate::{
    config::AttachmentConfig,
    image::{save_png, AspectFitResizer, Image, TransformError},
};
use compact_str::CompactString;
use log::debug;
use std::{
    fs::create_dir_all,
    io,
    path::{Path, PathBuf},
};
use thiserror::Error;

/// Handle Error for attachment creation.
#[derive(Debug, Error)]
pub enum AttachmentError {
    /// Error with folder creation
    #[error("Could not create attachment folder in '{}'", path.display())]
    Folder {
        /// Path of the folder
        path: PathBuf,
        /// Error source
        source: io::Error,
    },

    /// Error during thumbnail write
    #[error("Could not write attachment file '{}'", path.display())]
    WriteImage {
        /// Path of the file write failed
        path: PathBuf,
        /// Error source
        source: image::ImageError,
    },

    /// The image could not be resized to a thumbnail.
    #[error("Thumbnail creation failed")]
    Transform(#[from] TransformError),
}

/// A media file attached to a notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    identifier: CompactString,
    path: PathBuf,
}

impl Attachment {
    /// Write a thumbnail of `image` for a notification.
    ///
    /// The image is fitted in `config.bounds` with `resizer`, then written as
    /// `PNG` in a new uniquely named folder of [`AttachmentConfig::base_directory`].
    /// Folder and file are left in place for the platform to consume.
    ///
    /// # Errors
    ///
    /// Will return [`AttachmentError::Transform`] if the image can't be resized.
    /// Will return [`AttachmentError::Folder`] if the folder can't be created.
    /// Will return [`AttachmentError::WriteImage`] if the thumbnail write failed.
    #[profiling::function]
    pub fn create(
        image: &Image,
        resizer: &AspectFitResizer,
        config: &AttachmentConfig,
    ) -> Result<Self, AttachmentError> {
        let thumbnail = resizer.resize(image, config.bounds)?;

        let base = config.base_directory();
        create_dir_all(&base).map_err(|source| AttachmentError::Folder {
            path: base.clone(),
            source,
        })?;
        let folder = tempfile::Builder::new()
            .prefix("attachment-")
            .tempdir_in(&base)
            .map_err(|source| AttachmentError::Folder {
                path: base.clone(),
                source,
            })?
            .keep();

        let path = folder.join(config.file_name.as_str());
        save_png(&path, &thumbnail).map_err(|source| AttachmentError::WriteImage {
            path: path.clone(),
            source,
        })?;
        debug!("notification attachment written to '{}'", path.display());

        Ok(Self {
            identifier: config.file_name.clone(),
            path,
        })
    }

    /// Identifier of the attachment in the notification.
    #[must_use]
    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    /// Path of the attached file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}
