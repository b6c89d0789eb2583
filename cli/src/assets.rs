use wallet_engine::{Card, DeckError, parse_deck};

const SAMPLE_DECK_RAW: &str = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/assets/deck.toml"));

/// The deck shown when neither `WALLET_DECK` nor `[deck].path` names one.
pub fn sample_deck() -> Result<Vec<Card>, DeckError> {
    parse_deck(SAMPLE_DECK_RAW, "built-in sample deck")
}
