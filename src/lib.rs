//! This crate provides the building blocks of a small photo capture application:
//! take a photo, apply a filter preset, share it, and schedule a local
//! notification with a thumbnail of it.
//!
//! The core is made of pure bitmap transforms on [`Image`](crate::image::Image):
//! aspect-fit resizing with [`AspectFitResizer`](crate::image::AspectFitResizer)
//! and orientation normalization with
//! [`normalize_orientation`](crate::image::normalize_orientation).
//! Camera, photo library, share sheet and notification center are platform
//! services behind traits, wired together by the [`CameraController`].

pub mod config;
pub mod content;
mod controller;
mod errors;
pub mod filter;
pub mod image;
pub mod notification;
pub mod services;

pub use controller::{CameraController, Services};
pub use errors::MyCameraError;
