//! Local notification requests and their thumbnail attachment.
//!
//! Delivery is handled by the platform through the [`NotificationCenter`]
//! trait, this module only builds the requests.
mod attachment;

pub use attachment::{Attachment, AttachmentError};

use crate::config::NotificationConfig;
use compact_str::CompactString;
use std::time::Duration;
use thiserror::Error;

/// Error for notification handling.
#[derive(Debug, Error)]
pub enum NotificationError {
    /// The notification center refused the request.
    #[error("Notification request '{identifier}' rejected: {reason}")]
    Rejected {
        /// identifier of the request
        identifier: CompactString,
        /// reason given by the notification center
        reason: CompactString,
    },

    /// The authorization request failed.
    #[error("Notification authorization failed: {reason}")]
    Authorization {
        /// reason given by the notification center
        reason: CompactString,
    },
}

/// Kinds of interaction notifications are allowed to have.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthorizationOptions {
    /// Update the application badge.
    pub badge: bool,
    /// Play a sound.
    pub sound: bool,
    /// Display an alert.
    pub alert: bool,
}

impl AuthorizationOptions {
    /// Badge, sound and alert.
    pub const ALL: Self = Self {
        badge: true,
        sound: true,
        alert: true,
    };
}

/// What is displayed by a notification.
#[derive(Debug, Clone, PartialEq)]
pub struct NotificationContent {
    /// Title line.
    pub title: CompactString,
    /// Line below the title.
    pub subtitle: CompactString,
    /// Main text.
    pub body: CompactString,
    /// Play the default sound.
    pub sound: bool,
    /// Attached media files.
    pub attachments: Vec<Attachment>,
}

/// When a notification is delivered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    /// After `interval` from scheduling, and every `interval` if `repeats`.
    TimeInterval {
        /// delay before delivery
        interval: Duration,
        /// deliver repeatedly
        repeats: bool,
    },
}

/// A notification to schedule.
#[derive(Debug, Clone, PartialEq)]
pub struct NotificationRequest {
    /// Identifier, a new request with the same identifier replaces the previous one.
    pub identifier: CompactString,
    /// What is displayed.
    pub content: NotificationContent,
    /// When it is delivered.
    pub trigger: Trigger,
}

impl NotificationRequest {
    /// Build the request described by `config`, with `attachments`.
    #[must_use]
    pub fn from_config(config: &NotificationConfig, attachments: Vec<Attachment>) -> Self {
        Self {
            identifier: config.identifier.clone(),
            content: NotificationContent {
                title: config.title.clone(),
                subtitle: config.subtitle.clone(),
                body: config.body.clone(),
                sound: config.sound,
                attachments,
            },
            trigger: Trigger::TimeInterval {
                interval: config.delay,
                repeats: config.repeats,
            },
        }
    }
}

/// Platform notification scheduler.
pub trait NotificationCenter {
    /// Ask the user for permission to notify with `options`.
    ///
    /// # Errors
    ///
    /// Will return [`NotificationError::Authorization`] if the request could not be made.
    fn request_authorization(
        &mut self,
        options: AuthorizationOptions,
    ) -> Result<bool, NotificationError>;

    /// Schedule `request`.
    ///
    /// # Errors
    ///
    /// Will return [`NotificationError::Rejected`] if the request is refused.
    fn add(&mut self, request: NotificationRequest) -> Result<(), NotificationError>;

    /// Cancel scheduled requests not yet delivered.
    fn remove_pending(&mut self, identifiers: &[&str]);

    /// Remove already delivered notifications from display.
    fn remove_delivered(&mut self, identifiers: &[&str]);
}
