//! In-process event bus.
//!
//! Lifecycle events fan out synchronously to subscribed handlers so UI
//! surfaces can track sync progress without polling. The event set is
//! closed: handler signatures are checked at compile time against
//! [`Event`], not duck-typed.

use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::{Arc, Mutex};

use crate::models::Note;

/// A lifecycle event published on the bus.
#[derive(Debug, Clone)]
pub enum Event {
    /// A full push of the local collection started
    SyncStarted,
    /// A full push finished; per-note outcomes are in the status map
    SyncCompleted,
    /// A sync operation could not run at all
    SyncFailed(String),
    /// One note was pushed successfully
    NoteSynced(Note),
    /// Companion-device reachability changed (UI concern, engine ignores it)
    ReachabilityChanged(bool),
    /// A note arrived from a companion device
    NoteReceived {
        title: String,
        content: String,
        timestamp: i64,
    },
}

impl Event {
    /// The subscription key this event publishes under.
    #[must_use]
    pub const fn kind(&self) -> EventKind {
        match self {
            Self::SyncStarted => EventKind::SyncStarted,
            Self::SyncCompleted => EventKind::SyncCompleted,
            Self::SyncFailed(_) => EventKind::SyncFailed,
            Self::NoteSynced(_) => EventKind::NoteSynced,
            Self::ReachabilityChanged(_) => EventKind::ReachabilityChanged,
            Self::NoteReceived { .. } => EventKind::NoteReceived,
        }
    }
}

/// Discriminant used to subscribe to one kind of [`Event`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    SyncStarted,
    SyncCompleted,
    SyncFailed,
    NoteSynced,
    ReachabilityChanged,
    NoteReceived,
}

/// Token returned by [`EventBus::on`], used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubscriptionId(u64);

type Handler = Arc<dyn Fn(&Event) + Send + Sync>;

struct Registry {
    next_id: u64,
    // Registration order is delivery order.
    handlers: Vec<(u64, EventKind, Handler)>,
}

/// Synchronous publish/subscribe channel for [`Event`]s.
///
/// Cheap to clone; clones share one handler registry.
#[derive(Clone)]
pub struct EventBus {
    registry: Arc<Mutex<Registry>>,
}

impl EventBus {
    #[must_use]
    pub fn new() -> Self {
        Self {
            registry: Arc::new(Mutex::new(Registry {
                next_id: 0,
                handlers: Vec::new(),
            })),
        }
    }

    /// Subscribe `handler` to events of `kind`.
    pub fn on(
        &self,
        kind: EventKind,
        handler: impl Fn(&Event) + Send + Sync + 'static,
    ) -> SubscriptionId {
        let mut registry = self.registry.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        let id = registry.next_id;
        registry.next_id += 1;
        registry.handlers.push((id, kind, Arc::new(handler)));
        SubscriptionId(id)
    }

    /// Remove a subscription. Returns `false` when the id is unknown.
    pub fn off(&self, id: SubscriptionId) -> bool {
        let mut registry = self.registry.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        let before = registry.handlers.len();
        registry.handlers.retain(|(handler_id, _, _)| *handler_id != id.0);
        registry.handlers.len() != before
    }

    /// Publish an event to every matching handler, in registration order.
    ///
    /// A panicking handler is logged and skipped; the remaining handlers
    /// for the same emission still run.
    pub fn emit(&self, event: &Event) {
        let kind = event.kind();
        let handlers: Vec<Handler> = {
            let registry = self.registry.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
            registry
                .handlers
                .iter()
                .filter(|(_, handler_kind, _)| *handler_kind == kind)
                .map(|(_, _, handler)| Arc::clone(handler))
                .collect()
        };

        for handler in handlers {
            if catch_unwind(AssertUnwindSafe(|| handler(event))).is_err() {
                tracing::warn!(?kind, "event handler panicked");
            }
        }
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_handlers_run_in_registration_order() {
        let bus = EventBus::new();
        let seen = Arc::new(Mutex::new(Vec::new()));

        for label in ["first", "second", "third"] {
            let seen = Arc::clone(&seen);
            bus.on(EventKind::SyncStarted, move |_| {
                seen.lock().unwrap().push(label);
            });
        }

        bus.emit(&Event::SyncStarted);
        assert_eq!(*seen.lock().unwrap(), vec!["first", "second", "third"]);
    }

    #[test]
    fn test_only_matching_kind_fires() {
        let bus = EventBus::new();
        let count = Arc::new(AtomicUsize::new(0));

        let counter = Arc::clone(&count);
        bus.on(EventKind::SyncCompleted, move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        bus.emit(&Event::SyncStarted);
        assert_eq!(count.load(Ordering::SeqCst), 0);
        bus.emit(&Event::SyncCompleted);
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_off_unsubscribes() {
        let bus = EventBus::new();
        let count = Arc::new(AtomicUsize::new(0));

        let counter = Arc::clone(&count);
        let id = bus.on(EventKind::SyncStarted, move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        assert!(bus.off(id));
        assert!(!bus.off(id));
        bus.emit(&Event::SyncStarted);
        assert_eq!(count.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_panicking_handler_does_not_block_the_rest() {
        let bus = EventBus::new();
        let count = Arc::new(AtomicUsize::new(0));

        bus.on(EventKind::SyncStarted, |_| panic!("boom"));
        let counter = Arc::clone(&count);
        bus.on(EventKind::SyncStarted, move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        bus.emit(&Event::SyncStarted);
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_event_payloads_reach_handlers() {
        let bus = EventBus::new();
        let seen = Arc::new(Mutex::new(None));

        let sink = Arc::clone(&seen);
        bus.on(EventKind::NoteReceived, move |event| {
            if let Event::NoteReceived { title, .. } = event {
                *sink.lock().unwrap() = Some(title.clone());
            }
        });

        bus.emit(&Event::NoteReceived {
            title: "Groceries".to_string(),
            content: "milk".to_string(),
            timestamp: 1_700_000_000,
        });
        assert_eq!(seen.lock().unwrap().as_deref(), Some("Groceries"));
    }
}
