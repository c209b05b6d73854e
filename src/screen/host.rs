use log::{debug, info};

use crate::platform::{Event, EventKind, ListenerId, Platform};
use crate::screen::{Screen, ScreenName};

/// Owner of the active screen
/// Tears the old screen down before the new one starts, and forwards resizes and frames
pub struct ScreenHost {
    current: Option<Box<dyn Screen>>,
    resize_listener: Option<ListenerId>,
}

impl ScreenHost {
    /// Listen for window resizes, then show the initial screen
    pub fn new(platform: &mut Platform, initial: Box<dyn Screen>) -> Self {
        let mut host = Self::empty(platform);
        host.load_screen(initial, platform);
        host
    }

    /// Host with no screen yet
    pub fn empty(platform: &mut Platform) -> Self {
        Self {
            current: None,
            resize_listener: Some(platform.events.add_listener(EventKind::Resize)),
        }
    }

    /// Replace the active screen
    pub fn load_screen(&mut self, screen: Box<dyn Screen>, platform: &mut Platform) {
        if let Some(mut previous) = self.current.take() {
            debug!("Hiding {:?}", previous.name());
            previous.hide(platform);
        }
        info!("Loading screen {:?}", screen.name());
        self.current.insert(screen).show(platform);
        self.resize(platform);
    }

    /// Resize the active screen to the current viewport
    pub fn resize(&mut self, platform: &Platform) {
        if let Some(screen) = self.current.as_mut() {
            screen.resize(platform.viewport);
        }
    }

    /// Route a window event
    /// Returns the screen the active screen asked to switch to, if any
    pub fn dispatch(&mut self, event: &Event, platform: &mut Platform) -> Option<ScreenName> {
        if let Event::Resize(viewport) = event {
            platform.viewport = *viewport;
            if self.listens_for_resize(platform) {
                self.resize(platform);
            }
        }
        self.current
            .as_mut()
            .and_then(|screen| screen.handle_event(event, platform))
    }

    /// Run the frame callbacks due at `timestamp` (milliseconds)
    pub fn frame(&mut self, timestamp: f64, platform: &mut Platform) {
        let due = platform.frames.take_due();
        let Some(screen) = self.current.as_mut() else {
            return;
        };
        for handle in due {
            if !screen.animation().fire(handle) {
                continue;
            }
            screen.render(timestamp);
            screen.animation().rearm(&mut platform.frames);
        }
    }

    pub fn present(&mut self) {
        if let Some(screen) = self.current.as_mut() {
            screen.present();
        }
    }

    pub fn current_name(&self) -> Option<ScreenName> {
        self.current.as_ref().map(|screen| screen.name())
    }

    /// Hide the active screen and stop listening for resizes
    pub fn shutdown(&mut self, platform: &mut Platform) {
        if let Some(mut screen) = self.current.take() {
            info!("Shutting down {:?}", screen.name());
            screen.hide(platform);
        }
        if let Some(listener) = self.resize_listener.take() {
            platform.events.remove_listener(listener);
        }
    }

    fn listens_for_resize(&self, platform: &Platform) -> bool {
        self.resize_listener
            .map_or(false, |listener| platform.events.is_registered(listener))
    }
}
