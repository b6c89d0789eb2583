//! UI state types shared by the engine and the TUI.
//!
//! Pure data types with no IO, no async, no ratatui dependency.

mod animation;
mod flip;
mod options;

pub use animation::{EffectTimer, ease_in_out_cubic};
pub use flip::FlipEffect;
pub use options::UiOptions;
