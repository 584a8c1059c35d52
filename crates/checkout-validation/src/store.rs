//! Field model store: the single owner of the current form snapshot

use crate::field::{FieldName, FieldValue, FormSnapshot};
use std::sync::Arc;
use tracing::trace;

/// Handle returned by [`FieldModelStore::subscribe`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

pub type Subscriber = Box<dyn FnMut(&Arc<FormSnapshot>)>;

/// Holds the current snapshot and notifies subscribers after each edit.
///
/// Every edit swaps in a fresh `Arc<FormSnapshot>`; anyone still holding an
/// older one keeps a consistent view. Subscribers get a shared reference to
/// the new snapshot and no access to the store, so they cannot write back.
pub struct FieldModelStore {
    current: Arc<FormSnapshot>,
    subscribers: Vec<(SubscriptionId, Subscriber)>,
    next_id: u64,
}

impl FieldModelStore {
    pub fn new() -> Self {
        Self {
            current: Arc::new(FormSnapshot::new()),
            subscribers: Vec::new(),
            next_id: 0,
        }
    }

    pub fn snapshot(&self) -> Arc<FormSnapshot> {
        Arc::clone(&self.current)
    }

    pub fn revision(&self) -> u64 {
        self.current.revision()
    }

    /// Replace one field and notify every subscriber before returning
    pub fn update(&mut self, field: FieldName, value: FieldValue) -> Arc<FormSnapshot> {
        let next = Arc::new(self.current.with(field, value));
        trace!(
            target: "checkout::store",
            field = field.as_str(),
            revision = next.revision(),
            "field updated"
        );
        self.replace(next)
    }

    /// Clear every field and notify
    pub fn reset(&mut self) -> Arc<FormSnapshot> {
        let next = Arc::new(self.current.cleared());
        trace!(target: "checkout::store", revision = next.revision(), "store reset");
        self.replace(next)
    }

    pub fn subscribe<F>(&mut self, callback: F) -> SubscriptionId
    where
        F: FnMut(&Arc<FormSnapshot>) + 'static,
    {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.subscribers.push((id, Box::new(callback)));
        id
    }

    /// Returns false if the id was not subscribed
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sub_id, _)| *sub_id != id);
        self.subscribers.len() != before
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    fn replace(&mut self, next: Arc<FormSnapshot>) -> Arc<FormSnapshot> {
        self.current = Arc::clone(&next);
        for (_, subscriber) in self.subscribers.iter_mut() {
            subscriber(&next);
        }
        next
    }
}

impl Default for FieldModelStore {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for FieldModelStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FieldModelStore")
            .field("revision", &self.current.revision())
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_update_produces_new_snapshot() {
        let mut store = FieldModelStore::new();
        let before = store.snapshot();

        let after = store.update(FieldName::Cvv, Some("1".to_string()));

        assert_eq!(before.get(FieldName::Cvv), None);
        assert_eq!(after.get(FieldName::Cvv), Some("1"));
        assert_eq!(store.snapshot(), after);
        assert_eq!(store.revision(), 1);
    }

    #[test]
    fn test_subscribers_notified_synchronously_in_order() {
        let mut store = FieldModelStore::new();
        let seen = Rc::new(RefCell::new(Vec::new()));

        let first = Rc::clone(&seen);
        store.subscribe(move |s| first.borrow_mut().push(("first", s.revision())));
        let second = Rc::clone(&seen);
        store.subscribe(move |s| second.borrow_mut().push(("second", s.revision())));

        store.update(FieldName::Email, Some("a".to_string()));
        assert_eq!(*seen.borrow(), vec![("first", 1), ("second", 1)]);

        store.update(FieldName::Email, Some("a@".to_string()));
        assert_eq!(seen.borrow().len(), 4);
    }

    #[test]
    fn test_unsubscribe() {
        let mut store = FieldModelStore::new();
        let count = Rc::new(RefCell::new(0));
        let counter = Rc::clone(&count);
        let id = store.subscribe(move |_| *counter.borrow_mut() += 1);

        store.update(FieldName::Cvv, Some("1".to_string()));
        assert!(store.unsubscribe(id));
        assert!(!store.unsubscribe(id));
        store.update(FieldName::Cvv, Some("12".to_string()));

        assert_eq!(*count.borrow(), 1);
        assert_eq!(store.subscriber_count(), 0);
    }

    #[test]
    fn test_reset_notifies_with_empty_snapshot() {
        let mut store = FieldModelStore::new();
        let last = Rc::new(RefCell::new(None));
        let sink = Rc::clone(&last);
        store.subscribe(move |s| *sink.borrow_mut() = Some(Arc::clone(s)));

        store.update(FieldName::Email, Some("a@b.com".to_string()));
        store.reset();

        let snapshot = last.borrow().clone().unwrap();
        assert_eq!(snapshot.revision(), 2);
        assert!(snapshot.same_values(&FormSnapshot::new()));
    }
}
