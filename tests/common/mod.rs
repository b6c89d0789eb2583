//! Shared test utilities and fixtures
//!
//! Common infrastructure for integration tests.

#![allow(dead_code)]

use wallet_engine::{App, Card, StackViewport, UiOptions, parse_deck};

/// The sample deck the binary ships with.
pub const SAMPLE_DECK: &str = include_str!("../../cli/assets/deck.toml");

pub fn sample_cards() -> Vec<Card> {
    parse_deck(SAMPLE_DECK, "sample").expect("sample deck parses")
}

pub fn instant_options() -> UiOptions {
    UiOptions {
        reduced_motion: true,
        ..UiOptions::default()
    }
}

/// App over the sample deck with the stack drawn at the top-left of a tall viewport.
pub fn sample_app(selected: usize, options: UiOptions) -> App {
    let mut app = App::new(sample_cards(), selected, options).expect("valid selection");
    app.set_viewport(StackViewport {
        y: 0,
        height: 40,
        card_x: 6,
        card_width: 28,
    });
    app
}
