#![forbid(unsafe_code)]

//! Light/dark mode and the two mode-dependent neutrals.
//!
//! Outside any palette, the kaleidoscope always offers a *base* (background)
//! and an *accent* (foreground) color. In light mode base is white and accent
//! is `#222222`; dark mode swaps them.
//!
//! ```
//! use kaleido_style::theme::{Mode, Neutral};
//! use kaleido_style::color::Rgb;
//!
//! assert_eq!(Neutral::Base.resolve(Mode::Light), Rgb::WHITE);
//! assert_eq!(Neutral::Base.resolve(Mode::Dark), Rgb::NEAR_BLACK);
//! ```

use std::fmt;

use crate::color::Rgb;

/// Display mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Mode {
    /// White background, dark accents. The starting mode.
    #[default]
    Light,
    /// Dark background, white accents.
    Dark,
}

impl Mode {
    /// The other mode.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    /// Whether this is dark mode.
    #[must_use]
    pub const fn is_dark(self) -> bool {
        matches!(self, Self::Dark)
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Light => "light",
            Self::Dark => "dark",
        })
    }
}

/// A color that changes with [`Mode`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AdaptiveColor {
    /// Color in light mode.
    pub light: Rgb,
    /// Color in dark mode.
    pub dark: Rgb,
}

impl AdaptiveColor {
    /// Create an adaptive color with light/dark variants.
    #[inline]
    pub const fn adaptive(light: Rgb, dark: Rgb) -> Self {
        Self { light, dark }
    }

    /// A color that is the same in both modes.
    #[inline]
    pub const fn fixed(color: Rgb) -> Self {
        Self::adaptive(color, color)
    }

    /// Resolve for the given mode.
    #[inline]
    pub const fn resolve(self, mode: Mode) -> Rgb {
        match mode {
            Mode::Light => self.light,
            Mode::Dark => self.dark,
        }
    }

    /// Check if this color differs between modes.
    #[inline]
    pub const fn is_adaptive(self) -> bool {
        self.light.as_key() != self.dark.as_key()
    }
}

impl From<Rgb> for AdaptiveColor {
    fn from(color: Rgb) -> Self {
        Self::fixed(color)
    }
}

/// Background neutral: white in light mode, `#222222` in dark mode.
pub const BASE: AdaptiveColor = AdaptiveColor::adaptive(Rgb::WHITE, Rgb::NEAR_BLACK);
/// Foreground neutral: `#222222` in light mode, white in dark mode.
pub const ACCENT: AdaptiveColor = AdaptiveColor::adaptive(Rgb::NEAR_BLACK, Rgb::WHITE);
/// Idle swatch border, identical in both modes.
pub const BORDER: AdaptiveColor = AdaptiveColor::fixed(Rgb::new(0xee, 0xee, 0xee));

/// One of the two reserved, palette-independent colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Neutral {
    /// See [`BASE`].
    Base,
    /// See [`ACCENT`].
    Accent,
}

impl Neutral {
    /// The adaptive color behind this neutral.
    #[must_use]
    pub const fn color(self) -> AdaptiveColor {
        match self {
            Self::Base => BASE,
            Self::Accent => ACCENT,
        }
    }

    /// Concrete color in `mode`.
    #[must_use]
    pub const fn resolve(self, mode: Mode) -> Rgb {
        self.color().resolve(mode)
    }

    /// The neutral that shows the same concrete color after a mode toggle.
    #[must_use]
    pub const fn swapped(self) -> Self {
        match self {
            Self::Base => Self::Accent,
            Self::Accent => Self::Base,
        }
    }

    /// The neutral whose concrete color in `mode` is `color`, if any.
    #[must_use]
    pub fn matching(color: Rgb, mode: Mode) -> Option<Self> {
        [Self::Base, Self::Accent]
            .into_iter()
            .find(|n| n.resolve(mode) == color)
    }
}

/// Concrete base/accent pair for one mode, as the page chrome uses them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Neutrals {
    /// Page background, title border.
    pub base: Rgb,
    /// Title text, button text, highlighted swatch border.
    pub accent: Rgb,
    /// Border of swatches that are not highlighted.
    pub border: Rgb,
}

impl Neutrals {
    /// Resolve all neutrals for `mode`.
    #[must_use]
    pub const fn for_mode(mode: Mode) -> Self {
        Self {
            base: BASE.resolve(mode),
            accent: ACCENT.resolve(mode),
            border: BORDER.resolve(mode),
        }
    }
}
