//! The shipped sample deck and user deck files.

use std::fs;

use wallet_engine::{DeckError, duplicate_ids, load_deck, parse_deck};
use wallet_types::CardColor;

use crate::common::{SAMPLE_DECK, sample_cards};

#[test]
fn sample_deck_has_six_cards_in_order() {
    let titles: Vec<String> = sample_cards().into_iter().map(|card| card.title).collect();
    assert_eq!(
        titles,
        [
            "Mastercard",
            "IKEA",
            "Canada Life",
            "Canadian Tire",
            "Tims Rewards",
            "Air Miles"
        ]
    );
}

#[test]
fn sample_deck_keeps_duplicate_id() {
    assert_eq!(duplicate_ids(&sample_cards()), vec![5]);
}

#[test]
fn sample_deck_colors() {
    let cards = sample_cards();
    assert_eq!(cards[0].background_color, CardColor::BLACK);
    assert_eq!(cards[0].foreground_color, CardColor::WHITE);
    assert_eq!(cards[0].number, "123 123 123 1234");
    assert_eq!(cards[2].background_color, CardColor::SYSTEM_GRAY5);
    assert_eq!(cards[3].background_color, CardColor::rgb(0xbb, 0x26, 0x1a));
    assert_eq!(cards[5].background_color, CardColor::rgb(0x9a, 0x81, 0x47));
}

#[test]
fn user_deck_file_loads() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("cards.toml");
    fs::write(&path, SAMPLE_DECK).unwrap();
    assert_eq!(load_deck(&path).unwrap(), sample_cards());
}

#[test]
fn bad_color_is_reported_with_origin() {
    let doc = SAMPLE_DECK.replace("#bb261a", "#bb26");
    let err = parse_deck(&doc, "broken.toml").unwrap_err();
    assert!(matches!(err, DeckError::Parse { .. }));
    assert!(err.to_string().contains("broken.toml"));
}
