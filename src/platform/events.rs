use bitflags::bitflags;

use super::Viewport;

bitflags! {
    /// Set of event kinds, used to decide which window polling to enable
    pub struct EventMask: u8 {
        const RESIZE = 0b0001;
        const CLICK = 0b0010;
        const KEY_DOWN = 0b0100;
    }
}

/// Kind of a window-level event, used as the listener key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Resize,
    Click,
    KeyDown,
}

impl EventKind {
    pub fn mask(self) -> EventMask {
        match self {
            EventKind::Resize => EventMask::RESIZE,
            EventKind::Click => EventMask::CLICK,
            EventKind::KeyDown => EventMask::KEY_DOWN,
        }
    }
}

/// Window-level event, already translated from the windowing library
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Event {
    /// The drawable area changed size
    Resize(Viewport),
    /// Primary mouse button pressed at a cursor position
    Click { x: f64, y: f64 },
    /// Key pressed (repeats are not reported)
    KeyDown(glfw::Key),
}

impl Event {
    pub fn kind(&self) -> EventKind {
        match self {
            Event::Resize(_) => EventKind::Resize,
            Event::Click { .. } => EventKind::Click,
            Event::KeyDown(_) => EventKind::KeyDown,
        }
    }
}

/// Handle of a registered listener
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// Registry of window-level listeners
/// Listeners are only keys here; the owner decides what to do when its kind fires
#[derive(Debug)]
pub struct EventTarget {
    next_id: u64,
    listeners: Vec<(ListenerId, EventKind)>,
}

impl EventTarget {
    pub fn new() -> Self {
        Self {
            next_id: 1,
            listeners: Vec::new(),
        }
    }

    pub fn add_listener(&mut self, kind: EventKind) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, kind));
        id
    }

    /// Remove a listener, returning false if it was not registered
    pub fn remove_listener(&mut self, id: ListenerId) -> bool {
        let len = self.listeners.len();
        self.listeners.retain(|(listener, _)| *listener != id);
        self.listeners.len() != len
    }

    pub fn is_registered(&self, id: ListenerId) -> bool {
        self.listeners.iter().any(|(listener, _)| *listener == id)
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    /// All kinds with at least one listener
    pub fn subscribed(&self) -> EventMask {
        self.listeners
            .iter()
            .fold(EventMask::empty(), |mask, (_, kind)| mask | kind.mask())
    }
}

impl Default for EventTarget {
    fn default() -> Self {
        Self::new()
    }
}
