//! Module for geometric content utils
mod size;

pub use size::Size;
