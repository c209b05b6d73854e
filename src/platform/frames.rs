/// Handle of a requested animation frame
/// Captured at request time, and the only way to cancel the request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameHandle(u64);

/// Queue of animation frame requests
/// The main loop drains it once per display refresh with `take_due`
#[derive(Debug)]
pub struct AnimationFrames {
    next_id: u64,
    pending: Vec<FrameHandle>,
}

impl AnimationFrames {
    pub fn new() -> Self {
        Self {
            next_id: 1,
            pending: Vec::new(),
        }
    }

    /// Request a callback on the next refresh
    pub fn request(&mut self) -> FrameHandle {
        let handle = FrameHandle(self.next_id);
        self.next_id += 1;
        self.pending.push(handle);
        handle
    }

    /// Cancel a pending request
    /// Returns false if the request already fired or was already cancelled
    pub fn cancel(&mut self, handle: FrameHandle) -> bool {
        let len = self.pending.len();
        self.pending.retain(|pending| *pending != handle);
        self.pending.len() != len
    }

    /// Take every request made before this refresh
    /// Requests made while handling these land in the next refresh
    pub fn take_due(&mut self) -> Vec<FrameHandle> {
        std::mem::take(&mut self.pending)
    }

    pub fn pending(&self) -> usize {
        self.pending.len()
    }
}

impl Default for AnimationFrames {
    fn default() -> Self {
        Self::new()
    }
}
