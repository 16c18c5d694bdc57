//! Named visual effects applied to a captured [`Image`].
//!
//! The presets form a fixed ordered list the user walks through:
//! `none`, `mono`, `sepia` then `line-overlay`.
mod effects;

pub use effects::{ImageOpsFilter, DEFAULT_EDGE_THRESHOLD};

use crate::image::Image;
use compact_str::CompactString;
use core::{fmt, str::FromStr};
use thiserror::Error;

/// Error for filter handling.
#[derive(Debug, Error)]
pub enum FilterError {
    /// The name doesn't match any preset.
    #[error("Unknown filter preset '{name}'")]
    UnknownPreset {
        /// the name which failed to parse
        name: CompactString,
    },

    /// The filter service failed to apply the preset.
    #[error("Applying filter '{preset}' failed: {reason}")]
    Failed {
        /// preset which was applied
        preset: FilterPreset,
        /// description of the failure from the service
        reason: CompactString,
    },
}

/// Visual effect presets, in the order presented to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FilterPreset {
    /// The image is displayed as captured.
    #[default]
    None,
    /// Black and white.
    Mono,
    /// Brownish old photo tone.
    Sepia,
    /// Outline of the edges as black lines.
    LineOverlay,
}

impl FilterPreset {
    /// All presets, in presentation order.
    pub const ALL: [Self; 4] = [Self::None, Self::Mono, Self::Sepia, Self::LineOverlay];

    /// Position of the preset in [`Self::ALL`].
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::None => 0,
            Self::Mono => 1,
            Self::Sepia => 2,
            Self::LineOverlay => 3,
        }
    }

    /// Preset at `index` in [`Self::ALL`].
    #[must_use]
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// The following preset, `None` after the last one.
    #[must_use]
    pub fn next(self) -> Option<Self> {
        Self::from_index(self.index() + 1)
    }

    /// The preceding preset, `None` before the first one.
    #[must_use]
    pub fn previous(self) -> Option<Self> {
        self.index().checked_sub(1).and_then(Self::from_index)
    }

    /// Stable identifier of the preset.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Mono => "mono",
            Self::Sepia => "sepia",
            Self::LineOverlay => "line-overlay",
        }
    }
}

impl fmt::Display for FilterPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for FilterPreset {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|preset| preset.name() == s)
            .ok_or_else(|| FilterError::UnknownPreset { name: s.into() })
    }
}

/// Service able to apply a [`FilterPreset`] to an [`Image`].
///
/// The output keeps the size, scale and orientation of the input.
pub trait FilterService {
    /// Apply `preset` to `image` and return the filtered image.
    ///
    /// # Errors
    ///
    /// Will return [`FilterError::Failed`] if the service can't produce the image.
    fn apply(&self, image: &Image, preset: FilterPreset) -> Result<Image, FilterError>;
}
