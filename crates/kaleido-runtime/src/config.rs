#![forbid(unsafe_code)]

//! Session configuration as data.
//!
//! Captures everything a session needs at startup (palette catalog, grid
//! topology, and how to choose the initial palette) as a single
//! [`SessionConfig`] that can be loaded from TOML or JSON.
//!
//! # Loading
//!
//! ```toml
//! # kaleido.toml
//! randomize_palette = false
//! default_palette = 1
//!
//! [[palettes]]
//! name = "Grays"
//! colors = ["#111", "#222", "#333", "#444", "#555"]
//!
//! [[palettes]]
//! name = "Lights"
//! colors = ["#aaa", "#bbb", "#ccc", "#ddd", "#eee"]
//!
//! [[groups]]
//! name = "a1"
//! cells = 6
//! ```
//!
//! ```rust,ignore
//! let session = SessionConfig::from_toml_file("kaleido.toml")?.build()?;
//! ```
//!
//! # Defaults
//!
//! An empty config uses the built-in palette catalog, the default
//! kaleidoscope topology, and a random initial palette.

#[cfg(feature = "session-config")]
use std::path::Path;

use kaleido_style::{CatalogError, Palette, PaletteCatalog, Rgb};
use rand::SeedableRng;
use rand::rngs::SmallRng;
#[cfg(feature = "session-config")]
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::SyncError;
use crate::session::Session;
use crate::synchronizer::SliceSynchronizer;
use crate::topology::{GridTopology, TopologyError};

/// Startup configuration for a [`Session`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "session-config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "session-config", serde(default))]
pub struct SessionConfig {
    /// Draw the initial palette uniformly from the catalog. Default: true.
    pub randomize_palette: bool,
    /// Initial palette when not randomizing. Default: 0.
    pub default_palette: usize,
    /// Seed for the random palette choice; `None` seeds from the OS.
    pub seed: Option<u64>,
    /// Palette catalog; empty means the built-in schemes.
    pub palettes: Vec<PaletteSpec>,
    /// Mirrored groups; empty means the default kaleidoscope layout.
    pub groups: Vec<GroupSpec>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            randomize_palette: true,
            default_palette: 0,
            seed: None,
            palettes: Vec::new(),
            groups: Vec::new(),
        }
    }
}

/// One palette entry.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "session-config", derive(Serialize, Deserialize))]
pub struct PaletteSpec {
    /// Display name, unique in the catalog.
    pub name: String,
    /// Exactly five colors.
    pub colors: Vec<Rgb>,
}

/// One mirrored group.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "session-config", derive(Serialize, Deserialize))]
pub struct GroupSpec {
    /// Group name, unique in the topology.
    pub name: String,
    /// Number of mirrored cells.
    pub cells: u16,
}

impl SessionConfig {
    /// Load from a TOML string.
    #[cfg(feature = "session-config")]
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(ConfigError::Toml)
    }

    /// Load from a TOML file on disk.
    #[cfg(feature = "session-config")]
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(ConfigError::Io)?;
        Self::from_toml_str(&content)
    }

    /// Load from a JSON string.
    #[cfg(feature = "session-config")]
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(s).map_err(ConfigError::Json)
    }

    /// Load from a JSON file on disk.
    #[cfg(feature = "session-config")]
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(ConfigError::Io)?;
        Self::from_json_str(&content)
    }

    /// Check every parameter.
    ///
    /// Returns a list of problems. An empty list means [`build`](Self::build)
    /// will succeed.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        let palette_count = match self.catalog() {
            Ok(catalog) => catalog.len(),
            Err(err) => {
                errors.push(format!("palettes: {err}"));
                0
            }
        };

        if !self.randomize_palette && palette_count > 0 && self.default_palette >= palette_count {
            errors.push(format!(
                "default_palette must be < {palette_count}, got {}",
                self.default_palette
            ));
        }

        if let Err(err) = self.topology() {
            errors.push(format!("groups: {err}"));
        }

        errors
    }

    /// The palette catalog this config describes.
    pub fn catalog(&self) -> Result<PaletteCatalog, CatalogError> {
        if self.palettes.is_empty() {
            return Ok(PaletteCatalog::builtin());
        }
        let palettes = self
            .palettes
            .iter()
            .map(|spec| Palette::from_slice(spec.name.clone(), &spec.colors))
            .collect::<Result<Vec<_>, _>>()?;
        PaletteCatalog::new(palettes)
    }

    /// The grid topology this config describes.
    pub fn topology(&self) -> Result<GridTopology, TopologyError> {
        if self.groups.is_empty() {
            return Ok(GridTopology::kaleidoscope());
        }
        GridTopology::new(self.groups.iter().map(|g| (g.name.clone(), g.cells)))
    }

    /// Validate and build a ready synchronizer.
    pub fn synchronizer(&self) -> Result<SliceSynchronizer, ConfigError> {
        let errors = self.validate();
        if !errors.is_empty() {
            return Err(ConfigError::Validation(errors));
        }
        let catalog = self.catalog()?;
        let topology = self.topology()?;
        let sync = if self.randomize_palette {
            let mut rng = match self.seed {
                Some(seed) => SmallRng::seed_from_u64(seed),
                None => SmallRng::from_os_rng(),
            };
            SliceSynchronizer::with_random_palette(catalog, topology, &mut rng)?
        } else {
            SliceSynchronizer::new(catalog, topology, self.default_palette)?
        };
        info!(
            palette = sync.active_palette().name(),
            groups = sync.topology().len(),
            randomized = self.randomize_palette,
            "session configured"
        );
        Ok(sync)
    }

    /// Validate and build a ready [`Session`].
    pub fn build(&self) -> Result<Session, ConfigError> {
        self.synchronizer().map(Session::new)
    }
}

/// Errors that can occur when loading or building a session config.
#[derive(Debug)]
pub enum ConfigError {
    /// I/O error reading a file.
    Io(std::io::Error),
    /// TOML parse error.
    #[cfg(feature = "session-config")]
    Toml(toml::de::Error),
    /// JSON parse error.
    #[cfg(feature = "session-config")]
    Json(serde_json::Error),
    /// Validation errors.
    Validation(Vec<String>),
    /// Palette catalog could not be built.
    Catalog(CatalogError),
    /// Topology could not be built.
    Topology(TopologyError),
    /// Synchronizer rejected the initial state.
    Sync(SyncError),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            #[cfg(feature = "session-config")]
            Self::Toml(e) => write!(f, "TOML parse error: {e}"),
            #[cfg(feature = "session-config")]
            Self::Json(e) => write!(f, "JSON parse error: {e}"),
            Self::Validation(errors) => {
                write!(f, "validation errors: {}", errors.join("; "))
            }
            Self::Catalog(e) => write!(f, "palette catalog: {e}"),
            Self::Topology(e) => write!(f, "topology: {e}"),
            Self::Sync(e) => write!(f, "initial state: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            #[cfg(feature = "session-config")]
            Self::Toml(e) => Some(e),
            #[cfg(feature = "session-config")]
            Self::Json(e) => Some(e),
            Self::Validation(_) => None,
            Self::Catalog(e) => Some(e),
            Self::Topology(e) => Some(e),
            Self::Sync(e) => Some(e),
        }
    }
}

impl From<CatalogError> for ConfigError {
    fn from(err: CatalogError) -> Self {
        Self::Catalog(err)
    }
}

impl From<TopologyError> for ConfigError {
    fn from(err: TopologyError) -> Self {
        Self::Topology(err)
    }
}

impl From<SyncError> for ConfigError {
    fn from(err: SyncError) -> Self {
        Self::Sync(err)
    }
}
