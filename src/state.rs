//! Observable selected-tags store.
//!
//! Single-owner container instead of a bare global: callers hold a
//! `SelectedTags`, subscribe callbacks, and mutate through `set`. A
//! notification-in-progress flag makes re-entrant `set` calls from inside
//! a callback safe: the new value is queued and applied after the current
//! round instead of recursing.

use std::cell::{Cell, RefCell};

struct Subscriber {
    id: usize,
    callback: Box<dyn FnMut(&[String])>,
}

/// Handle returned by [`SelectedTags::subscribe`], used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Subscription(usize);

#[derive(Default)]
pub struct SelectedTags {
    tags: RefCell<Vec<String>>,
    subscribers: RefCell<Vec<Subscriber>>,
    next_id: Cell<usize>,
    notifying: Cell<bool>,
    pending: RefCell<Option<Vec<String>>>,
    removed: RefCell<Vec<usize>>,
}

impl SelectedTags {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the current selection.
    pub fn get(&self) -> Vec<String> {
        self.tags.borrow().clone()
    }

    /// Replace the selection and notify subscribers.
    ///
    /// Duplicates are dropped, keeping first-seen order. Called from
    /// inside a subscriber, the value is queued and applied once the
    /// current notification round finishes; a queued value equal to the
    /// current one is discarded so mutually-triggering subscribers cannot
    /// loop forever.
    pub fn set(&self, tags: &[String]) {
        let mut deduped: Vec<String> = Vec::with_capacity(tags.len());
        for tag in tags {
            if !deduped.contains(tag) {
                deduped.push(tag.clone());
            }
        }

        if self.notifying.get() {
            *self.pending.borrow_mut() = Some(deduped);
            return;
        }

        *self.tags.borrow_mut() = deduped;
        self.notify();
    }

    /// Register a callback invoked with the selection after every change.
    pub fn subscribe(&self, callback: impl FnMut(&[String]) + 'static) -> Subscription {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        self.subscribers
            .borrow_mut()
            .push(Subscriber { id, callback: Box::new(callback) });
        Subscription(id)
    }

    /// Remove a callback. Safe to call from inside a notification; the
    /// removal then takes effect after the current round.
    pub fn unsubscribe(&self, subscription: Subscription) {
        if self.notifying.get() {
            self.removed.borrow_mut().push(subscription.0);
            return;
        }
        self.subscribers
            .borrow_mut()
            .retain(|s| s.id != subscription.0);
    }

    fn notify(&self) {
        self.notifying.set(true);
        loop {
            let snapshot = self.tags.borrow().clone();

            // Subscribers are moved out for the duration of the calls so
            // callbacks may subscribe or unsubscribe without a double borrow.
            let mut subscribers = self.subscribers.take();
            for subscriber in &mut subscribers {
                (subscriber.callback)(&snapshot);
            }
            let added = self.subscribers.take();
            subscribers.extend(added);
            let removed = self.removed.take();
            subscribers.retain(|s| !removed.contains(&s.id));
            *self.subscribers.borrow_mut() = subscribers;

            match self.pending.take() {
                Some(next) if next != snapshot => *self.tags.borrow_mut() = next,
                _ => break,
            }
        }
        self.notifying.set(false);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::rc::Rc;

    #[test]
    fn test_set_and_get() {
        let store = SelectedTags::new();
        store.set(&["rust".to_string(), "systems".to_string()]);
        assert_eq!(store.get(), ["rust", "systems"]);
    }

    #[test]
    fn test_set_dedups_keeping_first_seen_order() {
        let store = SelectedTags::new();
        let tags: Vec<String> = ["b", "a", "b", "c", "a"]
            .iter()
            .map(|t| t.to_string())
            .collect();
        store.set(&tags);
        assert_eq!(store.get(), ["b", "a", "c"]);
    }

    #[test]
    fn test_subscribers_see_every_change() {
        let store = SelectedTags::new();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        store.subscribe(move |tags| sink.borrow_mut().push(tags.to_vec()));

        store.set(&["a".to_string()]);
        store.set(&[]);
        assert_eq!(*seen.borrow(), vec![vec!["a".to_string()], vec![]]);
    }

    #[test]
    fn test_unsubscribe_stops_notifications() {
        let store = SelectedTags::new();
        let count = Rc::new(Cell::new(0));
        let sink = Rc::clone(&count);
        let sub = store.subscribe(move |_| sink.set(sink.get() + 1));

        store.set(&["a".to_string()]);
        store.unsubscribe(sub);
        store.set(&["b".to_string()]);
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn test_reentrant_set_is_deferred_not_recursive() {
        let store = Rc::new(SelectedTags::new());
        let seen = Rc::new(RefCell::new(Vec::new()));

        let inner = Rc::clone(&store);
        let sink = Rc::clone(&seen);
        store.subscribe(move |tags| {
            sink.borrow_mut().push(tags.to_vec());
            if tags == ["first"] {
                inner.set(&["second".to_string()]);
            }
        });

        store.set(&["first".to_string()]);
        assert_eq!(
            *seen.borrow(),
            vec![vec!["first".to_string()], vec!["second".to_string()]]
        );
        assert_eq!(store.get(), ["second"]);
    }

    #[test]
    fn test_reentrant_set_of_same_value_terminates() {
        let store = Rc::new(SelectedTags::new());
        let count = Rc::new(Cell::new(0));

        let inner = Rc::clone(&store);
        let sink = Rc::clone(&count);
        store.subscribe(move |tags| {
            sink.set(sink.get() + 1);
            // always re-sets the value it just saw
            inner.set(&tags.to_vec());
        });

        store.set(&["loop".to_string()]);
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn test_subscribe_during_notification_joins_later_rounds() {
        let store = Rc::new(SelectedTags::new());
        let late_calls = Rc::new(Cell::new(0));

        let inner = Rc::clone(&store);
        let late = Rc::clone(&late_calls);
        let armed = Cell::new(false);
        store.subscribe(move |_| {
            if !armed.get() {
                armed.set(true);
                let late = Rc::clone(&late);
                inner.subscribe(move |_| late.set(late.get() + 1));
            }
        });

        store.set(&["a".to_string()]);
        assert_eq!(late_calls.get(), 0);
        store.set(&["b".to_string()]);
        assert_eq!(late_calls.get(), 1);
    }

    #[test]
    fn test_unsubscribe_during_notification() {
        let store = Rc::new(SelectedTags::new());
        let count = Rc::new(Cell::new(0));

        let sink = Rc::clone(&count);
        let sub = store.subscribe(move |_| sink.set(sink.get() + 1));
        let inner = Rc::clone(&store);
        store.subscribe(move |_| inner.unsubscribe(sub));

        store.set(&["a".to_string()]);
        store.set(&["b".to_string()]);
        // first round still reached it, later rounds did not
        assert_eq!(count.get(), 1);
    }
}
