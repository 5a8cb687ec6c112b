use crate::frame::FrameSlot;
use crate::{Container, FrameScheduler, Px, Spacer};

/// Writes within this distance of the applied height are dropped.
const SPACER_EPSILON: f64 = 0.5;

/// Coalesces spacer writes into at most one commit per frame.
#[derive(Clone, Debug, Default)]
pub(crate) struct SpacerScheduler {
    applied_top: Option<Px>,
    applied_bottom: Option<Px>,
    pending: Option<(Px, Px)>,
    pub(crate) slot: FrameSlot,
}

impl SpacerScheduler {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn applied(&self) -> (Px, Px) {
        (
            self.applied_top.unwrap_or(Px::ZERO),
            self.applied_bottom.unwrap_or(Px::ZERO),
        )
    }

    /// Records the latest heights and arms a commit, unless both are within the noise
    /// threshold of what is already applied.
    pub(crate) fn schedule(&mut self, top: f64, bottom: f64, frames: &mut impl FrameScheduler) {
        let top = Px::new(top);
        let bottom = Px::new(bottom);
        let changed =
            needs_write(self.applied_top, top) || needs_write(self.applied_bottom, bottom);
        if !changed {
            self.pending = None;
            self.slot.cancel(frames);
            return;
        }
        self.pending = Some((top, bottom));
        self.slot.arm(frames);
    }

    /// Writes the pending heights to the container. Returns `true` if anything was written.
    pub(crate) fn commit<C: Container>(&mut self, container: &mut C) -> bool {
        let Some((top, bottom)) = self.pending.take() else {
            return false;
        };
        let mut wrote = false;
        if needs_write(self.applied_top, top) {
            container.set_spacer_height(Spacer::Top, top);
            self.applied_top = Some(top);
            wrote = true;
        }
        if needs_write(self.applied_bottom, bottom) {
            container.set_spacer_height(Spacer::Bottom, bottom);
            self.applied_bottom = Some(bottom);
            wrote = true;
        }
        vtrace!(top = top.get(), bottom = bottom.get(), wrote, "spacer commit");
        wrote
    }

    pub(crate) fn cancel(&mut self, frames: &mut impl FrameScheduler) {
        self.pending = None;
        self.slot.cancel(frames);
    }
}

fn needs_write(applied: Option<Px>, next: Px) -> bool {
    match applied {
        None => true,
        Some(cur) => next.differs_from(cur, SPACER_EPSILON),
    }
}
