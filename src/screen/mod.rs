mod bindings;
mod host;
mod intro;
mod pacer;

pub use bindings::*;
pub use host::*;
pub use intro::*;
pub use pacer::*;

use crate::config::Config;
use crate::gfx::Surface;
use crate::platform::{Event, Platform, Viewport};

/// Every screen the application knows how to build
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenName {
    Intro,
}

impl ScreenName {
    /// Build the named screen drawing onto `surface`
    pub fn init<S>(self, config: &Config, surface: S) -> Box<dyn Screen>
    where
        S: Surface + 'static,
    {
        match self {
            ScreenName::Intro => Box::new(IntroScreen::new(config, surface)),
        }
    }
}

/// Trait describing a "screen" of the application
/// Only one screen at a time is active, and screens take over the rendering and input handling
///
/// Lifecycle: `show` once, any number of `render` calls driven by the host's
/// frame callbacks, then `hide` once before the screen is dropped.
pub trait Screen {
    fn name(&self) -> ScreenName;

    /// Bind events, size surfaces, load data, then start the frame loop
    fn show(&mut self, platform: &mut Platform);

    /// Stop the frame loop and release every event binding
    /// NOTE: Must be safe to call more than once
    fn hide(&mut self, platform: &mut Platform);

    /// Resize every owned surface to the viewport
    /// Screens drawing onto several surfaces must resize each of them, not just the first
    fn resize(&mut self, viewport: Viewport);

    /// Called once per frame callback with a timestamp in milliseconds
    fn render(&mut self, timestamp: f64);

    /// Handle an event, optionally asking the host for another screen
    fn handle_event(&mut self, event: &Event, platform: &mut Platform) -> Option<ScreenName>;

    /// The frame loop the host delivers callbacks to
    fn animation(&mut self) -> &mut PacedLoop;

    /// Push persistent surface contents to the display
    fn present(&mut self) {}
}
