//! Visual effects that fake card depth in a character grid.

use ratatui::layout::Rect;
use ratatui::style::Color;

use wallet_engine::CardPose;

/// Apply a card's tilt and flip to its face-on rectangle.
#[must_use]
pub fn apply_card_effect(pose: &CardPose, base: Rect) -> Rect {
    let (x, width) = pose.columns(base.x, base.width);
    Rect { x, width, ..base }
}

/// Linear blend between two RGB colors. Non-RGB colors switch at the halfway point.
#[must_use]
pub fn lerp_color(from: Color, to: Color, t: f32) -> Color {
    let t = t.clamp(0.0, 1.0);
    match (from, to) {
        (Color::Rgb(r1, g1, b1), Color::Rgb(r2, g2, b2)) => {
            let mix = |a: u8, b: u8| {
                (f32::from(a) + (f32::from(b) - f32::from(a)) * t).round() as u8
            };
            Color::Rgb(mix(r1, r2), mix(g1, g2), mix(b1, b2))
        }
        _ if t < 0.5 => from,
        _ => to,
    }
}
