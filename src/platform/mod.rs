mod events;
mod frames;

pub use events::*;
pub use frames::*;

/// Size of the drawable area of the window, in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// Everything a screen may touch outside of itself
/// The window size, the window-level listeners, and the frame callback queue
#[derive(Debug, Default)]
pub struct Platform {
    pub viewport: Viewport,
    pub events: EventTarget,
    pub frames: AnimationFrames,
}

impl Platform {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            events: EventTarget::new(),
            frames: AnimationFrames::new(),
        }
    }
}
