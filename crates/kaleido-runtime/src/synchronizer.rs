#![forbid(unsafe_code)]

//! Mirrored multi-slice color-state synchronizer.
//!
//! # Design
//!
//! [`SliceSynchronizer`] owns the palette catalog, the grid topology, the
//! active palette, the selected swatch, the mode, and one color slot per
//! group. Color is stored per *group*, never per cell, so every mirrored cell
//! of a slice shows the same color by construction.
//!
//! Groups store a [`Swatch`] slot, not a concrete color:
//!
//! - `Palette(i)` resolves to the i-th color of whatever palette is active.
//!   A palette switch therefore remaps every painted group positionally
//!   without touching it, and a group can never hold a color from an
//!   inactive palette.
//! - `Base` / `Accent` resolve through the current [`Mode`]. Toggling the
//!   mode flips the concrete value of every neutral group at once, computed
//!   from the old pair, so nothing is flipped twice.
//!
//! A palette color that happens to equal a neutral value (say `#222222`)
//! stays a palette color: it follows palette switches and ignores mode
//! toggles.
//!
//! # Invariants
//!
//! 1. All cells of a group resolve to the same color.
//! 2. Every group resolves to the base, the accent, or an active-palette color.
//! 3. A group at palette index i is at index i of every later palette.
//! 4. `selected` and every group slot satisfy [`Swatch::is_valid`].
//! 5. A failed operation leaves the state untouched.

use kaleido_style::{Mode, Neutral, Neutrals, Palette, PaletteCatalog, Rgb, Swatch};
use rand::Rng;
use tracing::{debug, debug_span, warn};

use crate::error::{ColorChoice, PaletteRef, SyncError};
use crate::snapshot::Snapshot;
use crate::topology::{CellId, GridTopology, GroupId};

/// External confirmation step consulted before a reset.
pub trait ResetConfirmer {
    /// Return `true` to go ahead with the reset.
    fn confirm_reset(&mut self) -> bool;
}

impl<F: FnMut() -> bool> ResetConfirmer for F {
    fn confirm_reset(&mut self) -> bool {
        self()
    }
}

/// Confirms every reset without asking.
#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysConfirm;

impl ResetConfirmer for AlwaysConfirm {
    fn confirm_reset(&mut self) -> bool {
        true
    }
}

fn rejected(err: SyncError) -> SyncError {
    warn!(error = %err, "operation rejected");
    err
}

/// Session-scoped color state for a mirrored grid.
#[derive(Debug, Clone)]
pub struct SliceSynchronizer {
    catalog: PaletteCatalog,
    topology: GridTopology,
    active: usize,
    palette: Palette,
    selected: Swatch,
    mode: Mode,
    groups: Vec<Swatch>,
}

impl SliceSynchronizer {
    /// Start with the palette at `initial_palette`, light mode, the first
    /// palette color selected, and every group at the accent.
    pub fn new(
        catalog: PaletteCatalog,
        topology: GridTopology,
        initial_palette: usize,
    ) -> Result<Self, SyncError> {
        let palette = catalog
            .get(initial_palette)
            .cloned()
            .ok_or_else(|| rejected(SyncError::UnknownPalette(PaletteRef::Index(initial_palette))))?;
        let groups = vec![Swatch::Accent; topology.len()];
        debug!(
            palette = initial_palette,
            groups = groups.len(),
            "synchronizer initialized"
        );
        Ok(Self {
            catalog,
            topology,
            active: initial_palette,
            palette,
            selected: Swatch::FIRST,
            mode: Mode::Light,
            groups,
        })
    }

    /// Like [`new`](Self::new) but with the initial palette drawn uniformly
    /// from the catalog.
    pub fn with_random_palette<R: Rng>(
        catalog: PaletteCatalog,
        topology: GridTopology,
        rng: &mut R,
    ) -> Result<Self, SyncError> {
        let initial = rng.random_range(0..catalog.len());
        Self::new(catalog, topology, initial)
    }

    // --- Transitions -------------------------------------------------------

    /// Switch to the catalog palette at `index`.
    ///
    /// Painted groups keep their palette position and so take on the new
    /// palette's color at that position; neutral groups are untouched. The
    /// selection and highlight reset to the first palette color. Selecting
    /// the active palette leaves every group as it is.
    pub fn select_palette(&mut self, index: usize) -> Result<(), SyncError> {
        let _span = debug_span!("kaleido.select_palette", from = self.active, to = index).entered();
        let palette = self
            .catalog
            .get(index)
            .cloned()
            .ok_or_else(|| rejected(SyncError::UnknownPalette(PaletteRef::Index(index))))?;
        // Group slots are palette positions, so the remap happens on resolve
        // against the new palette; only the active palette changes here.
        let remapped = self
            .groups
            .iter()
            .filter(|slot| matches!(slot, Swatch::Palette(_)))
            .count();
        self.active = index;
        self.palette = palette;
        self.selected = Swatch::FIRST;
        debug!(remapped, "palette switched");
        Ok(())
    }

    /// Switch to the catalog palette called `name`.
    pub fn select_palette_named(&mut self, name: &str) -> Result<(), SyncError> {
        let index = self
            .catalog
            .index_of_name(name)
            .ok_or_else(|| rejected(SyncError::UnknownPalette(PaletteRef::Name(name.to_owned()))))?;
        self.select_palette(index)
    }

    /// Select a concrete color. It must be a color of the active palette or
    /// the current base or accent. Palette colors win when a value is both.
    pub fn select_color(&mut self, color: Rgb) -> Result<(), SyncError> {
        let _span = debug_span!("kaleido.select_color", color = %color).entered();
        let swatch = self
            .active_palette()
            .index_of(color)
            .map(Swatch::Palette)
            .or_else(|| Neutral::matching(color, self.mode).map(Swatch::from))
            .ok_or_else(|| rejected(SyncError::InvalidColorSelection(ColorChoice::Value(color))))?;
        self.selected = swatch;
        debug!(swatch = %swatch, "color selected");
        Ok(())
    }

    /// Select a swatch slot directly.
    pub fn select_swatch(&mut self, swatch: Swatch) -> Result<(), SyncError> {
        let _span = debug_span!("kaleido.select_swatch", swatch = %swatch).entered();
        if !swatch.is_valid() {
            return Err(rejected(SyncError::InvalidColorSelection(
                ColorChoice::Swatch(swatch),
            )));
        }
        self.selected = swatch;
        Ok(())
    }

    /// Paint every cell of `group` with the selected color, or revert the
    /// group to the accent if it already shows the selected color.
    ///
    /// "Already shows" compares displayed colors, not slots: a group at the
    /// dark-mode base `#222222` is turned off by a palette `#222222`.
    pub fn paint_slice(&mut self, group: GroupId) -> Result<(), SyncError> {
        let _span = debug_span!("kaleido.paint_slice", group = %group).entered();
        let selected = self.selected;
        let shown = self.group_color(group)?;
        let toggle_off = shown == self.resolve(selected);
        let slot = self
            .groups
            .get_mut(group.index())
            .ok_or_else(|| rejected(SyncError::UnknownGroup(group)))?;
        *slot = if toggle_off { Swatch::Accent } else { selected };
        debug!(slot = %slot, toggle_off, "slice painted");
        Ok(())
    }

    /// Flip between light and dark mode.
    ///
    /// Neutral groups keep their slot, so their concrete color inverts.
    /// A neutral selection moves to the other slot so the selected concrete
    /// color survives the toggle. Calling this twice restores everything.
    pub fn toggle_mode(&mut self) {
        let old = self.mode;
        let _span = debug_span!("kaleido.toggle_mode", from = %old).entered();
        self.mode = old.toggled();
        if let Some(neutral) = self.selected.neutral() {
            self.selected = neutral.swapped().into();
        }
        debug!(to = %self.mode, "mode toggled");
    }

    /// Return every group to the current accent. Palette, selection, and
    /// mode are kept. Never fails; confirmation is the caller's job.
    pub fn reset(&mut self) {
        let _span = debug_span!("kaleido.reset", groups = self.groups.len()).entered();
        self.groups.fill(Swatch::Accent);
        debug!("design reset");
    }

    /// Ask `confirmer` and reset only if it agrees. Returns whether the reset
    /// happened.
    pub fn request_reset<C: ResetConfirmer + ?Sized>(&mut self, confirmer: &mut C) -> bool {
        if confirmer.confirm_reset() {
            self.reset();
            true
        } else {
            debug!("reset declined");
            false
        }
    }

    // --- Queries -----------------------------------------------------------

    /// The palette catalog.
    #[must_use]
    pub fn catalog(&self) -> &PaletteCatalog {
        &self.catalog
    }

    /// The grid topology.
    #[must_use]
    pub fn topology(&self) -> &GridTopology {
        &self.topology
    }

    /// The active palette.
    #[must_use]
    pub fn active_palette(&self) -> &Palette {
        &self.palette
    }

    /// Catalog position of the active palette.
    #[must_use]
    pub fn active_palette_index(&self) -> usize {
        self.active
    }

    /// Current mode.
    #[must_use]
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Concrete base color for the current mode.
    #[must_use]
    pub fn base(&self) -> Rgb {
        Neutral::Base.resolve(self.mode)
    }

    /// Concrete accent color for the current mode.
    #[must_use]
    pub fn accent(&self) -> Rgb {
        Neutral::Accent.resolve(self.mode)
    }

    /// The swatch highlighted in the chooser (the selected slot).
    #[must_use]
    pub fn highlighted_swatch(&self) -> Swatch {
        self.selected
    }

    /// Concrete selected color.
    #[must_use]
    pub fn selected_color(&self) -> Rgb {
        self.resolve(self.selected)
    }

    /// Slot stored for `group`.
    pub fn group_swatch(&self, group: GroupId) -> Result<Swatch, SyncError> {
        self.groups
            .get(group.index())
            .copied()
            .ok_or_else(|| rejected(SyncError::UnknownGroup(group)))
    }

    /// Concrete color of `group`.
    pub fn group_color(&self, group: GroupId) -> Result<Rgb, SyncError> {
        self.group_swatch(group).map(|slot| self.resolve(slot))
    }

    /// Concrete color of a single cell: always its group's color.
    pub fn cell_color(&self, cell: CellId) -> Result<Rgb, SyncError> {
        let color = self.group_color(cell.group)?;
        if !self.topology.contains_cell(cell) {
            return Err(rejected(SyncError::UnknownCell(cell)));
        }
        Ok(color)
    }

    /// Read-only view of the whole state.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            palette: self.palette.clone(),
            palette_index: self.active,
            selected: self.selected_color(),
            highlighted: self.selected,
            mode: self.mode,
            neutrals: Neutrals::for_mode(self.mode),
            cells: self
                .topology
                .groups()
                .zip(&self.groups)
                .map(|(id, slot)| (id, self.resolve(*slot)))
                .collect(),
        }
    }

    fn resolve(&self, slot: Swatch) -> Rgb {
        debug_assert!(slot.is_valid());
        // Slots are validated on entry; the fallback is unreachable.
        slot.resolve(&self.palette, self.mode)
            .unwrap_or_else(|| self.accent())
    }
}
