//! Synchronous delivery of flushed batches to a single subscriber.

use crate::events::Batch;
use std::fmt;

/// Callback invoked with each delivered batch.
pub type BatchCallback = Box<dyn FnMut(&Batch)>;

/// Holds at most one subscriber and hands it batches as they are flushed.
///
/// Delivery is fire-and-forget: without a subscriber, batches are dropped.
#[derive(Default)]
pub struct Notifier {
    subscriber: Option<BatchCallback>,
}

impl fmt::Debug for Notifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Notifier")
            .field("subscribed", &self.subscriber.is_some())
            .finish()
    }
}

impl Notifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the subscriber, replacing any previous one.
    pub fn register(&mut self, callback: impl FnMut(&Batch) + 'static) {
        if self.subscriber.is_some() {
            log::debug!("Replacing batch subscriber");
        }
        self.subscriber = Some(Box::new(callback));
    }

    /// Remove the subscriber, if any.
    pub fn unregister(&mut self) {
        self.subscriber = None;
    }

    pub fn has_subscriber(&self) -> bool {
        self.subscriber.is_some()
    }

    /// Hand `batch` to the subscriber.
    ///
    /// Returns whether the subscriber was invoked. Empty batches are never
    /// delivered.
    pub fn deliver(&mut self, batch: &Batch) -> bool {
        if batch.is_empty() {
            return false;
        }
        match self.subscriber.as_mut() {
            Some(callback) => {
                callback(batch);
                true
            }
            None => {
                log::trace!("No subscriber, dropping batch of {} entries", batch.len());
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::{DrawingPoint, StyleMarker};
    use std::cell::RefCell;
    use std::rc::Rc;

    fn sample_batch() -> Batch {
        let mut batch = Batch::new();
        batch.push(StyleMarker::new("red"));
        batch.push(DrawingPoint::new(1.0, 1.0, 1.0));
        batch
    }

    #[test]
    fn test_deliver_without_subscriber_is_noop() {
        let mut notifier = Notifier::new();
        assert!(!notifier.deliver(&sample_batch()));
    }

    #[test]
    fn test_deliver_invokes_subscriber() {
        let received = Rc::new(RefCell::new(Vec::new()));
        let sink = received.clone();

        let mut notifier = Notifier::new();
        notifier.register(move |batch| sink.borrow_mut().push(batch.clone()));

        assert!(notifier.deliver(&sample_batch()));
        assert_eq!(received.borrow().len(), 1);
        assert_eq!(received.borrow()[0], sample_batch());
    }

    #[test]
    fn test_register_replaces_previous_subscriber() {
        let first = Rc::new(RefCell::new(0));
        let second = Rc::new(RefCell::new(0));

        let mut notifier = Notifier::new();
        let counter = first.clone();
        notifier.register(move |_| *counter.borrow_mut() += 1);
        let counter = second.clone();
        notifier.register(move |_| *counter.borrow_mut() += 1);

        notifier.deliver(&sample_batch());
        assert_eq!(*first.borrow(), 0);
        assert_eq!(*second.borrow(), 1);
    }

    #[test]
    fn test_empty_batch_is_not_delivered() {
        let calls = Rc::new(RefCell::new(0));
        let counter = calls.clone();

        let mut notifier = Notifier::new();
        notifier.register(move |_| *counter.borrow_mut() += 1);

        assert!(!notifier.deliver(&Batch::new()));
        assert_eq!(*calls.borrow(), 0);
    }
}
