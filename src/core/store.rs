//! In-memory alert event store.

use chrono::{DateTime, Utc};

use super::types::{AlertEvent, AlertId, AnomalyKind};

/// Ordered collection of alert events, newest first.
///
/// The store is append-only apart from resolution: events are never removed
/// or reordered, so indices handed to a UI stay stable for the life of the
/// session.
#[derive(Debug, Clone, Default)]
pub struct AlertStore {
    events: Vec<AlertEvent>,
}

impl AlertStore {
    /// An empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a new unresolved event stamped now and return a copy of it.
    pub fn insert(&mut self, kind: AnomalyKind) -> AlertEvent {
        self.insert_at(kind, Utc::now())
    }

    /// Record a new unresolved event with an explicit timestamp.
    pub fn insert_at(&mut self, kind: AnomalyKind, timestamp: DateTime<Utc>) -> AlertEvent {
        let event = AlertEvent::new(kind, timestamp);
        self.events.insert(0, event.clone());
        event
    }

    /// Mark the event with `id` resolved.
    ///
    /// Returns whether the id names a known event. Resolving an already
    /// resolved event is a no-op that still returns `true`.
    pub fn resolve(&mut self, id: AlertId) -> bool {
        match self.events.iter_mut().find(|e| e.id == id) {
            Some(event) => {
                event.resolved = true;
                true
            }
            None => false,
        }
    }

    /// Look up an event by id.
    pub fn get(&self, id: AlertId) -> Option<&AlertEvent> {
        self.events.iter().find(|e| e.id == id)
    }

    /// Unresolved events, newest first.
    pub fn active(&self) -> impl Iterator<Item = &AlertEvent> {
        self.events.iter().filter(|e| !e.resolved)
    }

    /// Number of unresolved events.
    pub fn active_count(&self) -> usize {
        self.active().count()
    }

    /// Every event ever recorded, newest first.
    pub fn all(&self) -> &[AlertEvent] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_insert_orders_newest_first() {
        let mut store = AlertStore::new();
        let t0 = Utc::now();
        store.insert_at(AnomalyKind::Fall, t0);
        store.insert_at(AnomalyKind::Speech, t0 + Duration::seconds(10));
        store.insert_at(AnomalyKind::Breathing, t0 + Duration::seconds(20));

        let kinds: Vec<_> = store.all().iter().map(|e| e.kind).collect();
        assert_eq!(
            kinds,
            vec![AnomalyKind::Breathing, AnomalyKind::Speech, AnomalyKind::Fall]
        );
    }

    #[test]
    fn test_insert_stamps_current_time() {
        let mut store = AlertStore::new();
        let before = Utc::now();
        let event = store.insert(AnomalyKind::Fall);
        let after = Utc::now();
        assert!(event.timestamp >= before && event.timestamp <= after);
        assert!(!event.resolved);
    }

    #[test]
    fn test_resolve_marks_event() {
        let mut store = AlertStore::new();
        let event = store.insert(AnomalyKind::Fall);
        assert!(store.resolve(event.id));
        assert!(store.get(event.id).unwrap().resolved);
    }

    #[test]
    fn test_resolve_is_idempotent() {
        let mut store = AlertStore::new();
        let event = store.insert(AnomalyKind::Breathing);
        assert!(store.resolve(event.id));
        assert!(store.resolve(event.id));
        assert!(store.get(event.id).unwrap().resolved);
    }

    #[test]
    fn test_resolve_unknown_id() {
        let mut store = AlertStore::new();
        store.insert(AnomalyKind::Fall);
        assert!(!store.resolve(AlertId::new()));
    }

    #[test]
    fn test_active_filters_resolved_keeps_order() {
        let mut store = AlertStore::new();
        let t0 = Utc::now();
        let first = store.insert_at(AnomalyKind::Fall, t0);
        store.insert_at(AnomalyKind::Speech, t0 + Duration::seconds(5));
        let third = store.insert_at(AnomalyKind::Breathing, t0 + Duration::seconds(9));
        store.resolve(first.id);

        let active: Vec<_> = store.active().map(|e| e.kind).collect();
        assert_eq!(active, vec![AnomalyKind::Breathing, AnomalyKind::Speech]);
        assert_eq!(store.active_count(), 2);
        assert_eq!(store.len(), 3);
        assert!(!store.get(third.id).unwrap().resolved);
    }
}
