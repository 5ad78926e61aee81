#![forbid(unsafe_code)]

//! Color vocabulary for the kaleidoscope slice model.
//!
//! # Role in Kaleido
//! `kaleido-style` is the shared vocabulary for colors. The runtime stores
//! and compares these types; a rendering layer reads them back out. Nothing
//! here holds mutable session state.
//!
//! # This crate provides
//! - [`Rgb`] canonical 24-bit colors and their parsing.
//! - [`Palette`] and [`PaletteCatalog`], including the built-in schemes.
//! - [`Swatch`] color slots resolved against a palette and a [`Mode`].
//! - [`Mode`] and the mode-dependent [`Neutral`] colors.

/// Canonical color values and parsing.
pub mod color;
/// Palettes, catalogs, and swatch slots.
pub mod palette;
/// Light/dark mode and neutral colors.
pub mod theme;

pub use color::{ColorParseError, Rgb, parse_color};
pub use palette::{CatalogError, PALETTE_SIZE, Palette, PaletteCatalog, Swatch};
pub use theme::{ACCENT, AdaptiveColor, BASE, BORDER, Mode, Neutral, Neutrals};
