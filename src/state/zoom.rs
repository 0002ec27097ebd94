//! Bounded zoom factor for the overview presentation.

/// Zoom factor in tenths, always within `[MIN, MAX]`.
///
/// Integer storage keeps repeated stepping exact: ten steps out from 1.0 land
/// on 0.7, not on 0.69999.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ZoomLevel(u8);

impl ZoomLevel {
    pub const MIN: ZoomLevel = ZoomLevel(7);
    pub const MAX: ZoomLevel = ZoomLevel(15);
    pub const DEFAULT: ZoomLevel = ZoomLevel(10);

    /// Nearest level to `factor`, clamped. Non-finite input yields the default.
    pub fn from_factor(factor: f64) -> Self {
        if !factor.is_finite() {
            return Self::DEFAULT;
        }
        let tenths = (factor * 10.0)
            .round()
            .clamp(f64::from(Self::MIN.0), f64::from(Self::MAX.0));
        Self(tenths as u8)
    }

    pub fn factor(self) -> f64 {
        f64::from(self.0) / 10.0
    }

    pub fn percent(self) -> u16 {
        u16::from(self.0) * 10
    }

    /// One step larger; a no-op at `MAX`.
    pub fn stepped_in(self) -> Self {
        Self((self.0 + 1).min(Self::MAX.0))
    }

    /// One step smaller; a no-op at `MIN`.
    pub fn stepped_out(self) -> Self {
        Self(self.0.saturating_sub(1).max(Self::MIN.0))
    }

    pub fn is_max(self) -> bool {
        self == Self::MAX
    }

    pub fn is_min(self) -> bool {
        self == Self::MIN
    }

    /// Scale a base length by this factor, never below 1.
    pub fn scale(self, base: u16) -> u16 {
        ((u32::from(base) * u32::from(self.0) + 5) / 10).max(1) as u16
    }
}

impl Default for ZoomLevel {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl std::fmt::Display for ZoomLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}%", self.percent())
    }
}
