//! Keeps a published [`ValidationState`] in step with the store
//!
//! Data flows one way: store notification → engine → published state. The
//! subscriber owns the engine and the state cell but never the store.

use crate::card::YearMonth;
use crate::engine::{ValidationEngine, ValidationState};
use crate::field::FormSnapshot;
use crate::store::{FieldModelStore, SubscriptionId};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::sync::Arc;
use tracing::debug;

struct SyncInner {
    engine: ValidationEngine,
    state: RefCell<ValidationState>,
    last_validated: RefCell<Arc<FormSnapshot>>,
    /// Clock month the published state was computed in
    last_month: Cell<Option<YearMonth>>,
    runs: Cell<u64>,
}

impl SyncInner {
    fn on_change(&self, snapshot: &Arc<FormSnapshot>) {
        let month = self.engine.current_month();
        let unchanged = month == self.last_month.get()
            && self.last_validated.borrow().same_values(snapshot);

        let next = if unchanged {
            // Same values in the same month: same result, new revision
            let mut state = self.state.borrow().clone();
            state.revision = snapshot.revision();
            state
        } else {
            self.runs.set(self.runs.get() + 1);
            self.engine.validate(snapshot)
        };

        debug!(
            target: "checkout::sync",
            revision = next.revision,
            invalid = next.is_invalid,
            errors = next.errors.total_errors(),
            reused = unchanged,
            "validation state refreshed"
        );

        *self.state.borrow_mut() = next;
        *self.last_validated.borrow_mut() = Arc::clone(snapshot);
        self.last_month.set(month);
    }
}

/// Subscribes an engine to a store and exposes the latest result
pub struct SyncController {
    inner: Rc<SyncInner>,
    subscription: SubscriptionId,
}

impl SyncController {
    /// Validate the store's current snapshot, then follow every update
    pub fn attach(store: &mut FieldModelStore, engine: ValidationEngine) -> Self {
        let snapshot = store.snapshot();
        let month = engine.current_month();
        let initial = engine.validate(&snapshot);

        let inner = Rc::new(SyncInner {
            engine,
            state: RefCell::new(initial),
            last_validated: RefCell::new(snapshot),
            last_month: Cell::new(month),
            runs: Cell::new(1),
        });

        let listener = Rc::clone(&inner);
        let subscription = store.subscribe(move |snapshot| listener.on_change(snapshot));

        Self {
            inner,
            subscription,
        }
    }

    /// Re-publish for `snapshot` unless the current state already covers it
    /// in the current clock month
    pub fn refresh(&self, snapshot: &Arc<FormSnapshot>) -> ValidationState {
        self.inner.on_change(snapshot);
        self.state()
    }

    /// Latest published state
    pub fn state(&self) -> ValidationState {
        self.inner.state.borrow().clone()
    }

    pub fn is_invalid(&self) -> bool {
        self.inner.state.borrow().is_invalid
    }

    /// Revision of the snapshot behind [`SyncController::state`]
    pub fn revision(&self) -> u64 {
        self.inner.state.borrow().revision
    }

    /// How many times the engine actually ran (including the initial run)
    pub fn runs(&self) -> u64 {
        self.inner.runs.get()
    }

    pub fn engine(&self) -> &ValidationEngine {
        &self.inner.engine
    }

    /// Stop following the store
    pub fn detach(self, store: &mut FieldModelStore) -> ValidationState {
        store.unsubscribe(self.subscription);
        self.state()
    }
}

impl std::fmt::Debug for SyncController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SyncController")
            .field("revision", &self.revision())
            .field("invalid", &self.is_invalid())
            .field("runs", &self.runs())
            .finish()
    }
}
