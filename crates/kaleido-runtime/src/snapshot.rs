#![forbid(unsafe_code)]

//! Read-only state snapshots and the observable cell that publishes them.
//!
//! # Design
//!
//! The synchronizer never calls into rendering. After every mutating call
//! the session publishes a fresh [`Snapshot`] into a [`SnapshotCell`]; a
//! rendering layer either polls [`SnapshotCell::version`] or subscribes a
//! callback.
//!
//! [`SnapshotCell`] wraps the latest snapshot in shared, reference-counted
//! storage (`Rc<RefCell<..>>`). Cloning the cell creates a second handle to
//! the same state.
//!
//! # Invariants
//!
//! 1. `version` increments by exactly 1 for each published snapshot that
//!    differs from the previous one.
//! 2. Publishing an identical snapshot is a no-op.
//! 3. Subscribers are notified in registration order.
//! 4. Dropped [`Subscription`] guards are pruned lazily on the next notify.
//!
//! # Failure Modes
//!
//! - **Publish from a subscriber callback**: allowed. The cell is not
//!   borrowed while callbacks run, so a nested publish notifies immediately,
//!   before the outer round reaches its remaining subscribers.
//! - **Publish from inside [`SnapshotCell::with`]**: panics. The closure runs
//!   under a shared borrow of the cell.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use kaleido_style::{Mode, Neutrals, Palette, Rgb, Swatch};
use tracing::{info_span, trace};
use web_time::Instant;

use crate::topology::GroupId;

/// Everything a renderer needs to paint swatches, chrome, and cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    /// Active palette.
    pub palette: Palette,
    /// Position of the active palette in the catalog.
    pub palette_index: usize,
    /// Concrete selected color.
    pub selected: Rgb,
    /// Swatch shown as highlighted in the chooser.
    pub highlighted: Swatch,
    /// Current mode.
    pub mode: Mode,
    /// Concrete base/accent/border colors for the page chrome.
    pub neutrals: Neutrals,
    /// Concrete color of every group, in group order.
    pub cells: Vec<(GroupId, Rgb)>,
}

impl Snapshot {
    /// Color of `group`, if it exists.
    #[must_use]
    pub fn color_of(&self, group: GroupId) -> Option<Rgb> {
        self.cells
            .get(group.get() as usize)
            .map(|(_, color)| *color)
    }
}

type CallbackRc = Rc<dyn Fn(&Snapshot)>;
type CallbackWeak = Weak<dyn Fn(&Snapshot)>;

struct SnapshotInner {
    value: Snapshot,
    version: u64,
    subscribers: Vec<CallbackWeak>,
}

/// Shared, version-tracked holder of the latest [`Snapshot`].
pub struct SnapshotCell {
    inner: Rc<RefCell<SnapshotInner>>,
}

impl Clone for SnapshotCell {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl std::fmt::Debug for SnapshotCell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("SnapshotCell")
            .field("version", &inner.version)
            .field("mode", &inner.value.mode)
            .field("subscriber_count", &inner.subscribers.len())
            .finish()
    }
}

impl SnapshotCell {
    /// Create a cell holding `initial` at version 0.
    #[must_use]
    pub fn new(initial: Snapshot) -> Self {
        Self {
            inner: Rc::new(RefCell::new(SnapshotInner {
                value: initial,
                version: 0,
                subscribers: Vec::new(),
            })),
        }
    }

    /// Clone of the latest snapshot.
    #[must_use]
    pub fn get(&self) -> Snapshot {
        self.inner.borrow().value.clone()
    }

    /// Borrow the latest snapshot without cloning.
    ///
    /// `f` must not publish to this cell.
    pub fn with<R>(&self, f: impl FnOnce(&Snapshot) -> R) -> R {
        f(&self.inner.borrow().value)
    }

    /// Current version. Useful for dirty-checking in a render loop.
    #[must_use]
    pub fn version(&self) -> u64 {
        self.inner.borrow().version
    }

    /// Number of registered subscribers, including dead ones not yet pruned.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.inner.borrow().subscribers.len()
    }

    /// Replace the snapshot. Returns `true` if it changed (and subscribers
    /// were notified).
    pub fn publish(&self, snapshot: Snapshot) -> bool {
        {
            let mut inner = self.inner.borrow_mut();
            if inner.value == snapshot {
                return false;
            }
            inner.value = snapshot;
            inner.version += 1;
        }
        self.notify();
        true
    }

    /// Register `callback` for every future change.
    ///
    /// Dropping the returned [`Subscription`] unsubscribes.
    pub fn subscribe(&self, callback: impl Fn(&Snapshot) + 'static) -> Subscription {
        let strong: CallbackRc = Rc::new(callback);
        self.inner
            .borrow_mut()
            .subscribers
            .push(Rc::downgrade(&strong));
        Subscription { _guard: strong }
    }

    fn notify(&self) {
        let (callbacks, value, version) = {
            let mut inner = self.inner.borrow_mut();
            inner.subscribers.retain(|w| w.strong_count() > 0);
            let callbacks: Vec<CallbackRc> =
                inner.subscribers.iter().filter_map(Weak::upgrade).collect();
            (callbacks, inner.value.clone(), inner.version)
        };
        if callbacks.is_empty() {
            trace!(version, "snapshot published without subscribers");
            return;
        }

        let start = Instant::now();
        let _span = info_span!(
            "kaleido.publish",
            version,
            subscribers = callbacks.len() as u64,
            duration_us = tracing::field::Empty
        )
        .entered();
        for cb in &callbacks {
            cb(&value);
        }
        let duration_us = start.elapsed().as_micros() as u64;
        tracing::Span::current().record("duration_us", duration_us);
    }
}

/// RAII guard for a snapshot subscriber.
pub struct Subscription {
    _guard: CallbackRc,
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription").finish_non_exhaustive()
    }
}
