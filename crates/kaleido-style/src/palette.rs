#![forbid(unsafe_code)]

//! Palettes, the palette catalog, and swatch slots.
//!
//! A [`Palette`] is a named, ordered set of exactly [`PALETTE_SIZE`] colors.
//! A [`PaletteCatalog`] is the fixed, non-empty list of palettes a session
//! may switch between; palettes are addressed by their integer position in it.
//!
//! A [`Swatch`] names a color *slot* rather than a value: one of the active
//! palette's positions, or one of the two neutrals. Slots are resolved to
//! concrete colors against the active palette and the current [`Mode`].

use std::fmt;

use ahash::AHashSet;

use crate::color::{ColorParseError, Rgb};
use crate::theme::{Mode, Neutral};

/// Number of colors in every palette.
pub const PALETTE_SIZE: usize = 5;

/// A named, immutable sequence of [`PALETTE_SIZE`] colors.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Palette {
    name: String,
    colors: [Rgb; PALETTE_SIZE],
}

impl Palette {
    /// Create a palette from already-canonical colors.
    #[must_use]
    pub fn new(name: impl Into<String>, colors: [Rgb; PALETTE_SIZE]) -> Self {
        Self {
            name: name.into(),
            colors,
        }
    }

    /// Build a palette from a color list of any length.
    ///
    /// Fails with [`CatalogError::WrongColorCount`] unless exactly
    /// [`PALETTE_SIZE`] colors are given.
    pub fn from_slice(name: impl Into<String>, colors: &[Rgb]) -> Result<Self, CatalogError> {
        let name = name.into();
        let colors: [Rgb; PALETTE_SIZE] =
            colors.try_into().map_err(|_| CatalogError::WrongColorCount {
                name: name.clone(),
                found: colors.len(),
            })?;
        Ok(Self { name, colors })
    }

    /// Parse a palette from color strings (`#rgb`, `#rrggbb`, or `rgb()`).
    pub fn parse<S: AsRef<str>>(name: impl Into<String>, colors: &[S]) -> Result<Self, CatalogError> {
        let name = name.into();
        let parsed = colors
            .iter()
            .enumerate()
            .map(|(index, raw)| {
                Rgb::parse(raw.as_ref()).map_err(|source| CatalogError::InvalidColor {
                    name: name.clone(),
                    index,
                    source,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::from_slice(name, &parsed)
    }

    /// Display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// All colors in order.
    #[must_use]
    pub fn colors(&self) -> &[Rgb; PALETTE_SIZE] {
        &self.colors
    }

    /// Color at `index`, if in range.
    #[must_use]
    pub fn color(&self, index: usize) -> Option<Rgb> {
        self.colors.get(index).copied()
    }

    /// Position of the first occurrence of `color`.
    #[must_use]
    pub fn index_of(&self, color: Rgb) -> Option<usize> {
        self.colors.iter().position(|c| *c == color)
    }

    /// Whether `color` is one of this palette's colors.
    #[must_use]
    pub fn contains(&self, color: Rgb) -> bool {
        self.index_of(color).is_some()
    }
}

/// A color slot: a position in the active palette, or a neutral.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Swatch {
    /// The palette color at this index (`0..PALETTE_SIZE`).
    Palette(usize),
    /// The mode's base (background) neutral.
    Base,
    /// The mode's accent (foreground) neutral.
    Accent,
}

impl Swatch {
    /// The first palette color; the default selection.
    pub const FIRST: Self = Self::Palette(0);

    /// Whether the slot is addressable. Palette indices must be below
    /// [`PALETTE_SIZE`]; neutrals are always valid.
    #[must_use]
    pub const fn is_valid(self) -> bool {
        match self {
            Self::Palette(index) => index < PALETTE_SIZE,
            Self::Base | Self::Accent => true,
        }
    }

    /// The neutral this slot names, if any.
    #[must_use]
    pub const fn neutral(self) -> Option<Neutral> {
        match self {
            Self::Palette(_) => None,
            Self::Base => Some(Neutral::Base),
            Self::Accent => Some(Neutral::Accent),
        }
    }

    /// Resolve to a concrete color. `None` for an out-of-range palette index.
    #[must_use]
    pub fn resolve(self, palette: &Palette, mode: Mode) -> Option<Rgb> {
        match self {
            Self::Palette(index) => palette.color(index),
            Self::Base => Some(Neutral::Base.resolve(mode)),
            Self::Accent => Some(Neutral::Accent.resolve(mode)),
        }
    }
}

impl From<Neutral> for Swatch {
    fn from(neutral: Neutral) -> Self {
        match neutral {
            Neutral::Base => Self::Base,
            Neutral::Accent => Self::Accent,
        }
    }
}

impl fmt::Display for Swatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Palette(index) => write!(f, "palette[{index}]"),
            Self::Base => f.write_str("base"),
            Self::Accent => f.write_str("accent"),
        }
    }
}

/// The fixed, non-empty list of palettes available to a session.
///
/// # Invariants
///
/// 1. At least one palette.
/// 2. Palette names are unique.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaletteCatalog {
    palettes: Vec<Palette>,
}

impl PaletteCatalog {
    /// Validate and wrap a palette list.
    pub fn new(palettes: Vec<Palette>) -> Result<Self, CatalogError> {
        if palettes.is_empty() {
            return Err(CatalogError::Empty);
        }
        let mut seen = AHashSet::with_capacity(palettes.len());
        for palette in &palettes {
            if !seen.insert(palette.name()) {
                return Err(CatalogError::DuplicateName(palette.name().to_owned()));
            }
        }
        tracing::debug!(palettes = palettes.len(), "palette catalog loaded");
        Ok(Self { palettes })
    }

    /// The eleven schemes the kaleidoscope ships with.
    #[must_use]
    pub fn builtin() -> Self {
        let palettes = BUILTIN
            .iter()
            .map(|(name, keys)| Palette::new(*name, (*keys).map(Rgb::from_key)))
            .collect();
        Self { palettes }
    }

    /// Number of palettes (always at least one).
    #[must_use]
    pub fn len(&self) -> usize {
        self.palettes.len()
    }

    /// Always `false`; present for API symmetry with `len`.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.palettes.is_empty()
    }

    /// Palette at `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Palette> {
        self.palettes.get(index)
    }

    /// Position of the palette called `name` (exact match).
    #[must_use]
    pub fn index_of_name(&self, name: &str) -> Option<usize> {
        self.palettes.iter().position(|p| p.name() == name)
    }

    /// Iterate palettes in catalog order.
    pub fn iter(&self) -> std::slice::Iter<'_, Palette> {
        self.palettes.iter()
    }
}

impl Default for PaletteCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

impl<'a> IntoIterator for &'a PaletteCatalog {
    type Item = &'a Palette;
    type IntoIter = std::slice::Iter<'a, Palette>;

    fn into_iter(self) -> Self::IntoIter {
        self.palettes.iter()
    }
}

/// Errors building a palette or catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// The catalog had no palettes.
    Empty,
    /// A palette did not have exactly [`PALETTE_SIZE`] colors.
    WrongColorCount {
        /// Palette name.
        name: String,
        /// Number of colors supplied.
        found: usize,
    },
    /// Two palettes share a name.
    DuplicateName(String),
    /// A color string failed to parse.
    InvalidColor {
        /// Palette name.
        name: String,
        /// Position of the bad color.
        index: usize,
        /// Underlying parse failure.
        source: ColorParseError,
    },
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => f.write_str("palette catalog is empty"),
            Self::WrongColorCount { name, found } => write!(
                f,
                "palette {name:?} has {found} colors, expected {PALETTE_SIZE}"
            ),
            Self::DuplicateName(name) => write!(f, "duplicate palette name {name:?}"),
            Self::InvalidColor {
                name,
                index,
                source,
            } => write!(f, "palette {name:?} color {index}: {source}"),
        }
    }
}

impl std::error::Error for CatalogError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::InvalidColor { source, .. } => Some(source),
            _ => None,
        }
    }
}

// Hex values from coolors.co trending palettes.
const BUILTIN: [(&str, [u32; PALETTE_SIZE]); 11] = [
    ("Daytona", [0xb09e99, 0xfee9e1, 0xfad4c0, 0xc0fdfb, 0x64b6ac]),
    ("Tahoe", [0xbc4749, 0xc17c74, 0x7a6c5d, 0xbcac9b, 0xddc9b4]),
    ("Tahiti", [0xff9f1c, 0xffbf69, 0xffecb6, 0xcbf3f0, 0x2ec4b6]),
    ("Club Neon", [0x75dddd, 0x84c7d0, 0x9297c4, 0x9368b7, 0xaa3e98]),
    ("Wisteria", [0x360568, 0x5b2a86, 0x7785ac, 0x9ac6c5, 0x4eb870]),
    ("Fresh Melon", [0x386641, 0x6a994e, 0xa7c957, 0xf2e8cf, 0xbc4749]),
    ("Lake House", [0x086788, 0x07a0c3, 0xf0c808, 0xfff1d0, 0xdd1c1a]),
    ("Sitka", [0xdb504a, 0xff6f59, 0xb2b09b, 0x254441, 0x43aa8b]),
    ("Flagstaff", [0x2a9d8f, 0x175e7a, 0xe9c46a, 0xf4a261, 0xe76f51]),
    ("Lush Lipstick", [0x4f000b, 0x720026, 0xce4257, 0xff7f51, 0xff9b54]),
    ("Disco", [0x5f0f40, 0x9a031e, 0xfb8b24, 0xe36414, 0x0f4c5c]),
];
