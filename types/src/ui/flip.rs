//! Timed card flip.

use std::f32::consts::PI;
use std::time::Duration;

use super::animation::EffectTimer;
use crate::Face;

const HALF_TURN_DEGREES: f32 = 180.0;
const MIDPOINT: f32 = 0.5;

/// One half-turn of a card about its vertical axis.
///
/// The card rotates linearly through 180 degrees over the flip duration. The face
/// content swaps once, at the midpoint, when the card is edge-on, so the viewer never
/// sees mirrored content.
#[derive(Debug, Clone)]
pub struct FlipEffect {
    timer: EffectTimer,
    from: Face,
    to: Face,
}

impl FlipEffect {
    #[must_use]
    pub fn new(from: Face, to: Face, duration: Duration) -> Self {
        Self {
            timer: EffectTimer::new(duration),
            from,
            to,
        }
    }

    /// Advance the flip. Returns `true` on the call during which the face swapped.
    pub fn advance(&mut self, delta: Duration) -> bool {
        let before = self.has_swapped();
        self.timer.advance(delta);
        !before && self.has_swapped()
    }

    #[must_use]
    pub fn progress(&self) -> f32 {
        self.timer.progress()
    }

    #[must_use]
    pub fn rotation_degrees(&self) -> f32 {
        HALF_TURN_DEGREES * self.progress()
    }

    /// Horizontal projection of the turning card: 1.0 face-on, 0.0 edge-on.
    #[must_use]
    pub fn edge_scale(&self) -> f32 {
        (PI * self.progress()).cos().abs()
    }

    #[must_use]
    pub fn has_swapped(&self) -> bool {
        self.progress() >= MIDPOINT
    }

    #[must_use]
    pub fn displayed_face(&self) -> Face {
        if self.has_swapped() { self.to } else { self.from }
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.timer.is_finished()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FLIP: Duration = Duration::from_millis(500);

    #[test]
    fn shows_starting_face_until_midpoint() {
        let mut flip = FlipEffect::new(Face::Front, Face::Back, FLIP);
        assert_eq!(flip.displayed_face(), Face::Front);
        assert!(!flip.advance(Duration::from_millis(200)));
        assert_eq!(flip.displayed_face(), Face::Front);
        assert!(flip.rotation_degrees() > 0.0 && flip.rotation_degrees() < 90.0);
    }

    #[test]
    fn swaps_content_exactly_once_at_midpoint() {
        let mut flip = FlipEffect::new(Face::Front, Face::Back, FLIP);
        assert!(!flip.advance(Duration::from_millis(249)));
        assert!(flip.advance(Duration::from_millis(1)));
        assert_eq!(flip.displayed_face(), Face::Back);
        assert!(!flip.advance(Duration::from_millis(100)));
        assert!(!flip.is_finished());
        assert!(!flip.advance(Duration::from_millis(500)));
        assert!(flip.is_finished());
        assert!((flip.rotation_degrees() - 180.0).abs() < 1e-3);
    }

    #[test]
    fn card_is_edge_on_at_midpoint() {
        let mut flip = FlipEffect::new(Face::Back, Face::Front, FLIP);
        assert!((flip.edge_scale() - 1.0).abs() < 1e-6);
        flip.advance(Duration::from_millis(250));
        assert!(flip.edge_scale() < 1e-3);
        flip.advance(Duration::from_millis(250));
        assert!((flip.edge_scale() - 1.0).abs() < 1e-3);
    }

    #[test]
    fn zero_duration_lands_on_target_immediately() {
        let mut flip = FlipEffect::new(Face::Front, Face::Back, Duration::ZERO);
        assert!(flip.is_finished());
        assert_eq!(flip.displayed_face(), Face::Back);
        assert!(!flip.advance(Duration::from_millis(16)));
    }

    #[test]
    fn spin_without_face_change_keeps_face() {
        let mut flip = FlipEffect::new(Face::Front, Face::Front, FLIP);
        flip.advance(Duration::from_millis(400));
        assert_eq!(flip.displayed_face(), Face::Front);
        flip.advance(Duration::from_millis(100));
        assert!(flip.is_finished());
        assert_eq!(flip.displayed_face(), Face::Front);
    }
}
