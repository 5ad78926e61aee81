#![forbid(unsafe_code)]

//! Inbound events and the session that applies them.
//!
//! A [`Session`] is the single owner of a [`SliceSynchronizer`] for the
//! lifetime of one page session. UI glue converts clicks into [`Event`]s and
//! hands them to [`Session::dispatch`] one at a time; events are applied
//! strictly in delivery order and each runs to completion. After every
//! event that changes state, a fresh [`Snapshot`] is published to the
//! session's [`SnapshotCell`].

use kaleido_style::{Rgb, Swatch};
use tracing::{debug, info_span};

use crate::error::SyncError;
use crate::snapshot::{Snapshot, SnapshotCell};
use crate::synchronizer::{AlwaysConfirm, ResetConfirmer, SliceSynchronizer};
use crate::topology::GroupId;

/// A discrete user interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Event {
    /// A palette in the scheme list was clicked.
    PaletteChosen(usize),
    /// A color swatch was clicked; carries the swatch's color value.
    ColorChosen(Rgb),
    /// A swatch was clicked, addressed by slot.
    SwatchChosen(Swatch),
    /// A clickable hexagon of this group was clicked.
    SliceClicked(GroupId),
    /// The light/dark toggle was clicked.
    ModeToggleClicked,
    /// The reset button was clicked.
    ResetRequested,
}

/// What [`Session::dispatch`] did with an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The event was applied.
    Applied,
    /// The confirmer declined a reset; nothing changed.
    ResetDeclined,
}

/// One page session: synchronizer, reset confirmation, and snapshot output.
pub struct Session {
    sync: SliceSynchronizer,
    confirmer: Box<dyn ResetConfirmer>,
    snapshots: SnapshotCell,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("sync", &self.sync)
            .field("snapshots", &self.snapshots)
            .finish_non_exhaustive()
    }
}

impl Session {
    /// Wrap a synchronizer. Resets are confirmed automatically until a
    /// confirmer is installed with [`with_confirmer`](Self::with_confirmer).
    #[must_use]
    pub fn new(sync: SliceSynchronizer) -> Self {
        let snapshots = SnapshotCell::new(sync.snapshot());
        Self {
            sync,
            confirmer: Box::new(AlwaysConfirm),
            snapshots,
        }
    }

    /// Install the collaborator asked before every reset.
    #[must_use]
    pub fn with_confirmer(mut self, confirmer: impl ResetConfirmer + 'static) -> Self {
        self.confirmer = Box::new(confirmer);
        self
    }

    /// Apply one event.
    ///
    /// On error the state is unchanged and nothing is published.
    pub fn dispatch(&mut self, event: Event) -> Result<Outcome, SyncError> {
        let _span = info_span!("kaleido.dispatch", event = ?event).entered();
        let outcome = match event {
            Event::PaletteChosen(index) => self.sync.select_palette(index).map(|()| Outcome::Applied),
            Event::ColorChosen(color) => self.sync.select_color(color).map(|()| Outcome::Applied),
            Event::SwatchChosen(swatch) => {
                self.sync.select_swatch(swatch).map(|()| Outcome::Applied)
            }
            Event::SliceClicked(group) => self.sync.paint_slice(group).map(|()| Outcome::Applied),
            Event::ModeToggleClicked => {
                self.sync.toggle_mode();
                Ok(Outcome::Applied)
            }
            Event::ResetRequested => {
                if self.sync.request_reset(self.confirmer.as_mut()) {
                    Ok(Outcome::Applied)
                } else {
                    Ok(Outcome::ResetDeclined)
                }
            }
        }?;

        if outcome == Outcome::Applied {
            let changed = self.snapshots.publish(self.sync.snapshot());
            debug!(changed, version = self.snapshots.version(), "event applied");
        }
        Ok(outcome)
    }

    /// Apply events in order, stopping at the first error.
    pub fn dispatch_all(
        &mut self,
        events: impl IntoIterator<Item = Event>,
    ) -> Result<Vec<Outcome>, SyncError> {
        events.into_iter().map(|e| self.dispatch(e)).collect()
    }

    /// The synchronizer, read-only.
    #[must_use]
    pub fn synchronizer(&self) -> &SliceSynchronizer {
        &self.sync
    }

    /// A handle to the published snapshots. Clones share state.
    #[must_use]
    pub fn snapshots(&self) -> SnapshotCell {
        self.snapshots.clone()
    }

    /// The latest published snapshot.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        self.snapshots.get()
    }
}
