#![forbid(unsafe_code)]

//! Mirrored slice color-state synchronizer for Kaleido.
//!
//! # Role in Kaleido
//! `kaleido-runtime` owns the session state behind the kaleidoscope: which
//! palette is active, which color is selected, the light/dark mode, and the
//! color slot of every mirrored group. Rendering layers never mutate it;
//! they feed [`Event`]s to a [`Session`] and read [`Snapshot`]s back.
//!
//! # How it fits in the system
//! Colors, palettes, and modes come from `kaleido-style`. A
//! [`SessionConfig`] (optionally loaded from TOML or JSON) builds the
//! catalog and [`GridTopology`], and the [`SliceSynchronizer`] enforces the
//! mirroring and palette-consistency invariants on every transition.
//!
//! # Example
//! ```
//! use kaleido_runtime::{Event, SessionConfig};
//!
//! let config = SessionConfig {
//!     randomize_palette: false,
//!     ..SessionConfig::default()
//! };
//! let mut session = config.build().unwrap();
//! let a1 = session.synchronizer().topology().group_by_name("a1").unwrap();
//! session.dispatch(Event::SliceClicked(a1)).unwrap();
//! assert_eq!(
//!     session.snapshot().color_of(a1),
//!     Some(session.synchronizer().active_palette().colors()[0])
//! );
//! ```

pub mod config;
pub mod error;
pub mod session;
pub mod snapshot;
pub mod synchronizer;
pub mod topology;

pub use config::{ConfigError, GroupSpec, PaletteSpec, SessionConfig};
pub use error::{ColorChoice, PaletteRef, SyncError};
pub use session::{Event, Outcome, Session};
pub use snapshot::{Snapshot, SnapshotCell, Subscription};
pub use synchronizer::{AlwaysConfirm, ResetConfirmer, SliceSynchronizer};
pub use topology::{CellId, GridTopology, GroupId, TopologyError};

pub use kaleido_style::{Mode, Palette, PaletteCatalog, Rgb, Swatch};
