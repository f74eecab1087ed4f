//! Planar cabin coordinate type.
//!
//! The cabin is modeled as a 2-D floor plane: `x` runs nose→tail along the
//! fuselage, `y` runs across the rows.  Both are metres.  `f64` throughout —
//! dose integrals accumulate over thousands of steps and single precision
//! drifts visibly at that scale.

/// A point on the cabin floor plane, in metres.
#[derive(Copy, Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CabinPoint {
    pub x: f64,
    pub y: f64,
}

impl CabinPoint {
    #[inline]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance in metres.
    #[inline]
    pub fn distance_m(self, other: CabinPoint) -> f64 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Linear interpolation: `self` at `f = 0`, `other` at `f = 1`.
    #[inline]
    pub fn lerp(self, other: CabinPoint, f: f64) -> CabinPoint {
        CabinPoint {
            x: self.x + (other.x - self.x) * f,
            y: self.y + (other.y - self.y) * f,
        }
    }

    /// `true` if both coordinates are finite (not NaN/∞).
    #[inline]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl std::fmt::Display for CabinPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.2}, {:.2})", self.x, self.y)
    }
}
