use log::{debug, warn};

use crate::platform::{EventKind, EventTarget, ListenerId};

/// Window-level listeners owned by a screen
/// Everything bound here is removed by `release_all`, which screens call from `hide`
#[derive(Debug, Default)]
pub struct Bindings(Vec<(EventKind, ListenerId)>);

impl Bindings {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Listen for `kind`, replacing any earlier listener of the same kind
    pub fn bind(&mut self, events: &mut EventTarget, kind: EventKind) -> ListenerId {
        self.unbind(events, kind);
        let id = events.add_listener(kind);
        debug!("Bound {:?} listener {:?}", kind, id);
        self.0.push((kind, id));
        id
    }

    /// Stop listening for `kind`, returning false if it was not bound
    pub fn unbind(&mut self, events: &mut EventTarget, kind: EventKind) -> bool {
        match self.0.iter().position(|(bound, _)| *bound == kind) {
            Some(index) => {
                let (_, id) = self.0.remove(index);
                events.remove_listener(id);
                true
            }
            None => false,
        }
    }

    /// Remove every listener this set owns, returning how many there were
    pub fn release_all(&mut self, events: &mut EventTarget) -> usize {
        let count = self.0.len();
        for (_, id) in self.0.drain(..) {
            events.remove_listener(id);
        }
        count
    }

    pub fn handles(&self, kind: EventKind) -> bool {
        self.0.iter().any(|(bound, _)| *bound == kind)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Drop for Bindings {
    fn drop(&mut self) {
        if !self.0.is_empty() {
            warn!("Dropping {} event bindings that were never released", self.0.len());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn release_removes_exactly_what_was_bound() {
        let mut events = EventTarget::new();
        let foreign = events.add_listener(EventKind::Resize);

        let mut bindings = Bindings::new();
        bindings.bind(&mut events, EventKind::Resize);
        bindings.bind(&mut events, EventKind::Click);
        assert_eq!(events.len(), 3);

        assert_eq!(bindings.release_all(&mut events), 2);
        assert_eq!(events.len(), 1);
        assert!(events.is_registered(foreign));
        assert!(bindings.is_empty());
    }

    #[test]
    fn rebinding_a_kind_replaces_the_listener() {
        let mut events = EventTarget::new();
        let mut bindings = Bindings::new();

        let first = bindings.bind(&mut events, EventKind::KeyDown);
        let second = bindings.bind(&mut events, EventKind::KeyDown);

        assert!(!events.is_registered(first));
        assert!(events.is_registered(second));
        assert_eq!(bindings.len(), 1);
        bindings.release_all(&mut events);
    }

    #[test]
    fn release_twice_is_harmless() {
        let mut events = EventTarget::new();
        let mut bindings = Bindings::new();
        bindings.bind(&mut events, EventKind::Click);

        assert_eq!(bindings.release_all(&mut events), 1);
        assert_eq!(bindings.release_all(&mut events), 0);
        assert!(events.is_empty());
        assert!(!bindings.handles(EventKind::Click));
    }
}
