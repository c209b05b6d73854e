use log::trace;

use crate::config::DEFAULT_FPS;
use crate::platform::{AnimationFrames, FrameHandle};

/// Gates a fast refresh callback down to a logical frame rate
///
/// The first tick anchors the clock. Afterwards, once a full interval has
/// elapsed, the frame index advances by exactly one step (however long the
/// gap was) and the frame becomes drawable again. Each logical frame is drawn
/// at most once.
#[derive(Debug, Clone)]
pub struct FramePacer {
    interval: f64,
    index: usize,
    last_frame: Option<f64>,
    drawn: bool,
}

impl FramePacer {
    /// Pacer running at `fps` logical frames per second
    pub fn new(fps: f64) -> Self {
        Self::with_interval(1000.0 / fps)
    }

    /// Pacer advancing at most once every `interval` milliseconds
    pub fn with_interval(interval: f64) -> Self {
        Self {
            interval,
            index: 0,
            last_frame: None,
            drawn: false,
        }
    }

    pub fn interval(&self) -> f64 {
        self.interval
    }

    pub fn index(&self) -> usize {
        self.index
    }

    /// Advance the clock to `timestamp` (milliseconds) over `count` frames
    /// Returns the frame index if it still needs drawing
    pub fn tick(&mut self, timestamp: f64, count: usize) -> Option<usize> {
        let last = *self.last_frame.get_or_insert(timestamp);
        if timestamp - last >= self.interval {
            if count > 0 {
                self.index = (self.index + 1) % count;
            }
            self.last_frame = Some(timestamp);
            self.drawn = false;
            trace!("Frame {} of {} at {:.1}ms", self.index, count, timestamp);
        }
        (!self.drawn).then_some(self.index)
    }

    /// Mark the current frame as drawn
    pub fn mark_drawn(&mut self) {
        self.drawn = true;
    }

    /// Forget the time anchor, so the next tick starts a fresh interval
    pub fn reset_clock(&mut self) {
        self.last_frame = None;
    }
}

impl Default for FramePacer {
    fn default() -> Self {
        Self::new(DEFAULT_FPS)
    }
}

/// A screen's frame loop: a pacer plus its outstanding frame request
///
/// The loop holds the handle returned when it last requested a frame. The host
/// hands every due handle to `fire`, which only accepts the one the loop is
/// waiting on, so a cancelled or superseded request never renders.
#[derive(Debug, Default)]
pub struct PacedLoop {
    pub pacer: FramePacer,
    pending: Option<FrameHandle>,
    running: bool,
}

impl PacedLoop {
    pub fn new(fps: f64) -> Self {
        Self {
            pacer: FramePacer::new(fps),
            pending: None,
            running: false,
        }
    }

    /// Start requesting frames
    pub fn start(&mut self, frames: &mut AnimationFrames) {
        self.running = true;
        self.pacer.reset_clock();
        if self.pending.is_none() {
            self.pending = Some(frames.request());
        }
    }

    /// Stop the loop and cancel the outstanding request, if any
    /// Safe to call any number of times
    pub fn cancel(&mut self, frames: &mut AnimationFrames) {
        self.running = false;
        if let Some(handle) = self.pending.take() {
            frames.cancel(handle);
        }
    }

    /// Accept a due frame, returning false if it is not the one this loop requested
    pub fn fire(&mut self, handle: FrameHandle) -> bool {
        if self.pending == Some(handle) {
            self.pending = None;
            true
        } else {
            false
        }
    }

    /// Request the next frame after a fired one, unless the loop was stopped meanwhile
    pub fn rearm(&mut self, frames: &mut AnimationFrames) {
        if self.running && self.pending.is_none() {
            self.pending = Some(frames.request());
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn pending(&self) -> Option<FrameHandle> {
        self.pending
    }
}
