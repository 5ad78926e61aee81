#![forbid(unsafe_code)]

//! Recoverable errors reported by the synchronizer.
//!
//! Every operation that returns one of these leaves the state exactly as it
//! was. None of them are fatal; the UI layer decides whether to ignore the
//! stray input or surface it.

use std::fmt;

use kaleido_style::{Rgb, Swatch};

use crate::topology::{CellId, GroupId};

/// How a caller referred to a palette.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PaletteRef {
    /// Position in the catalog.
    Index(usize),
    /// Palette name.
    Name(String),
}

impl fmt::Display for PaletteRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Index(index) => write!(f, "#{index}"),
            Self::Name(name) => write!(f, "{name:?}"),
        }
    }
}

/// A requested color selection, by value or by slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColorChoice {
    /// A concrete color value.
    Value(Rgb),
    /// A swatch slot.
    Swatch(Swatch),
}

impl fmt::Display for ColorChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Value(color) => write!(f, "{color}"),
            Self::Swatch(swatch) => write!(f, "{swatch}"),
        }
    }
}

/// Errors reported by [`SliceSynchronizer`](crate::SliceSynchronizer) operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncError {
    /// The color is neither a neutral nor in the active palette.
    InvalidColorSelection(ColorChoice),
    /// The group is not part of the configured topology.
    UnknownGroup(GroupId),
    /// The group exists but has no cell at this position.
    UnknownCell(CellId),
    /// The palette is not in the catalog.
    UnknownPalette(PaletteRef),
}

impl fmt::Display for SyncError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidColorSelection(choice) => {
                write!(f, "color {choice} is not selectable in the active palette")
            }
            Self::UnknownGroup(group) => write!(f, "unknown group {group}"),
            Self::UnknownCell(cell) => write!(f, "unknown cell {cell}"),
            Self::UnknownPalette(palette) => write!(f, "unknown palette {palette}"),
        }
    }
}

impl std::error::Error for SyncError {}
