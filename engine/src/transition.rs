//! Eased movement of card offsets after a selection change.

use std::time::Duration;

use wallet_types::ui::{EffectTimer, ease_in_out_cubic};

/// Offsets animate from where the cards were drawn when the selection changed toward
/// their new targets. Targets are not stored: they are recomputed from the current
/// selection on every query, so the transition only remembers its starting point.
#[derive(Debug, Clone)]
pub(crate) struct OffsetTransition {
    from: Vec<f32>,
    timer: EffectTimer,
}

impl OffsetTransition {
    pub(crate) fn new(from: Vec<f32>, duration: Duration) -> Self {
        Self {
            from,
            timer: EffectTimer::new(duration),
        }
    }

    pub(crate) fn advance(&mut self, delta: Duration) {
        self.timer.advance(delta);
    }

    pub(crate) fn is_finished(&self) -> bool {
        self.timer.is_finished()
    }

    pub(crate) fn offset(&self, index: usize, target: u16) -> f32 {
        let target = f32::from(target);
        let Some(&from) = self.from.get(index) else {
            return target;
        };
        let t = ease_in_out_cubic(self.timer.progress());
        from + (target - from) * t
    }
}
