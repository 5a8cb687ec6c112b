use alloc::vec::Vec;

use crate::{FrameHandle, FrameScheduler};

/// A manual [`FrameScheduler`]: requested frames pile up until the host drains them.
///
/// Typical host loop:
///
/// ```ignore
/// for handle in list.frames_mut().take_pending() {
///     list.run_frame(handle);
/// }
/// ```
#[derive(Clone, Debug, Default)]
pub struct FrameQueue {
    next: u64,
    pending: Vec<FrameHandle>,
}

impl FrameQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_pending(&self, handle: FrameHandle) -> bool {
        self.pending.contains(&handle)
    }

    /// Takes every requested, not-cancelled frame in request order.
    pub fn take_pending(&mut self) -> Vec<FrameHandle> {
        core::mem::take(&mut self.pending)
    }
}

impl FrameScheduler for FrameQueue {
    fn request_frame(&mut self) -> FrameHandle {
        self.next = self.next.wrapping_add(1);
        let handle = FrameHandle(self.next);
        self.pending.push(handle);
        handle
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        self.pending.retain(|&h| h != handle);
    }
}

/// Per-queue scheduling state: at most one armed frame at a time.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) enum FrameSlot {
    #[default]
    Idle,
    Armed(FrameHandle),
}

impl FrameSlot {
    pub(crate) fn is_armed(&self) -> bool {
        matches!(self, Self::Armed(_))
    }

    /// Requests a frame unless one is already armed.
    pub(crate) fn arm(&mut self, frames: &mut impl FrameScheduler) {
        if let Self::Idle = self {
            *self = Self::Armed(frames.request_frame());
        }
    }

    pub(crate) fn cancel(&mut self, frames: &mut impl FrameScheduler) {
        if let Self::Armed(handle) = *self {
            frames.cancel_frame(handle);
        }
        *self = Self::Idle;
    }

    /// Returns `true` (and goes idle) when `handle` is the armed frame.
    pub(crate) fn fire(&mut self, handle: FrameHandle) -> bool {
        match *self {
            Self::Armed(h) if h == handle => {
                *self = Self::Idle;
                true
            }
            _ => false,
        }
    }
}
