use store::PointId;

/// Store-change notification.
///
/// This is the seam that replaced whole-page reloads: the front end drains
/// these after each mutation and re-renders exactly what changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreEvent {
    PointAdded(PointId),
    PointRemoved(PointId),
    Cleared,
}

#[derive(Debug, Default)]
pub struct StoreEvents {
    events: Vec<StoreEvent>,
}

impl StoreEvents {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn emit(&mut self, event: StoreEvent) {
        self.events.push(event);
    }

    pub fn events(&self) -> &[StoreEvent] {
        &self.events
    }

    pub fn drain(&mut self) -> Vec<StoreEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::{StoreEvent, StoreEvents};
    use store::PointId;

    #[test]
    fn records_events_in_order() {
        let mut bus = StoreEvents::new();
        bus.emit(StoreEvent::PointAdded(PointId::new(1)));
        bus.emit(StoreEvent::PointRemoved(PointId::new(1)));
        assert_eq!(
            bus.events(),
            [
                StoreEvent::PointAdded(PointId::new(1)),
                StoreEvent::PointRemoved(PointId::new(1)),
            ]
        );
    }

    #[test]
    fn drain_clears_events() {
        let mut bus = StoreEvents::new();
        bus.emit(StoreEvent::Cleared);
        let drained = bus.drain();
        assert_eq!(drained.len(), 1);
        assert!(bus.events().is_empty());
    }
}
