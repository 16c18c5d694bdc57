use core::fmt;

/// Logical dimensions of an image or of a bounding box.
///
/// Values are expressed in logical units, the physical pixel count being
/// obtained by multiplying by the display scale of the image.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    /// Width in logical units.
    pub width: f64,
    /// Height in logical units.
    pub height: f64,
}

impl Size {
    /// An empty size.
    pub const ZERO: Self = Self::new(0., 0.);

    /// Create a `Size` from a width and a height.
    #[must_use]
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Return `true` if both dimensions are strictly positive and finite.
    #[must_use]
    pub fn is_positive(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0. && self.height > 0.
    }

    /// Return `true` if at least one dimension is zero.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.width == 0. || self.height == 0.
    }

    /// Width divided by height.
    #[must_use]
    pub fn aspect_ratio(&self) -> f64 {
        self.width / self.height
    }

    /// The same size with width and height exchanged.
    #[must_use]
    pub const fn transposed(self) -> Self {
        Self::new(self.height, self.width)
    }

    /// Multiply both dimensions by `factor`.
    #[must_use]
    pub fn scaled(self, factor: f64) -> Self {
        Self::new(self.width * factor, self.height * factor)
    }

    /// Check if `self` fits in `bounds` on both axis, with a small tolerance
    /// for floating point rounding.
    #[must_use]
    pub fn fits_within(&self, bounds: Self) -> bool {
        const EPSILON: f64 = 1e-9;
        self.width <= bounds.width + EPSILON && self.height <= bounds.height + EPSILON
    }

    /// Scale factor to apply to `self` for the result to fit entirely
    /// inside `bounds` while keeping the aspect ratio.
    ///
    /// The smallest of the two axis ratios constrains the fit. Negative or
    /// `NaN` components of `bounds` count as zero.
    /// `self` must be positive, see [`Self::is_positive`].
    #[must_use]
    pub fn fit_ratio(&self, bounds: Self) -> f64 {
        let width_ratio = bounds.width.max(0.) / self.width;
        let height_ratio = bounds.height.max(0.) / self.height;
        width_ratio.min(height_ratio)
    }

    /// Largest size with the aspect ratio of `self` that fits in `bounds`.
    #[must_use]
    pub fn aspect_fit(self, bounds: Self) -> Self {
        self.scaled(self.fit_ratio(bounds))
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}
