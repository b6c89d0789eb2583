//! Deck fixtures.
//!
//! A deck is a TOML document with a `[[cards]]` array of tables:
//!
//! ```toml
//! [[cards]]
//! id = 1
//! foreground_color = "white"
//! background_color = "black"
//! title = "Mastercard"
//! number = "123 123 123 1234"
//! ```

use std::collections::HashSet;
use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use wallet_types::Card;

#[derive(Debug, Error)]
pub enum DeckError {
    #[error("failed to read deck {}: {source}", path.display())]
    Read { path: PathBuf, source: io::Error },
    #[error("failed to parse deck {origin}: {source}")]
    Parse {
        origin: String,
        source: toml::de::Error,
    },
}

#[derive(Debug, Deserialize)]
struct DeckFile {
    #[serde(default)]
    cards: Vec<Card>,
}

/// Parse a deck document. `origin` names the document in errors and logs.
pub fn parse_deck(content: &str, origin: &str) -> Result<Vec<Card>, DeckError> {
    let deck: DeckFile = toml::from_str(content).map_err(|source| DeckError::Parse {
        origin: origin.to_string(),
        source,
    })?;

    for id in duplicate_ids(&deck.cards) {
        tracing::warn!(id, origin, "Deck contains several cards with the same id");
    }
    tracing::debug!(origin, cards = deck.cards.len(), "Deck loaded");

    Ok(deck.cards)
}

pub fn load_deck(path: &Path) -> Result<Vec<Card>, DeckError> {
    let content = std::fs::read_to_string(path).map_err(|source| DeckError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_deck(&content, &path.display().to_string())
}

/// Ids that appear on more than one card, in order of their second appearance.
#[must_use]
pub fn duplicate_ids(cards: &[Card]) -> Vec<i64> {
    let mut seen = HashSet::new();
    let mut reported = HashSet::new();
    cards
        .iter()
        .filter(|card| !seen.insert(card.id) && reported.insert(card.id))
        .map(|card| card.id)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use wallet_types::CardColor;

    const TWO_CARDS: &str = r##"
[[cards]]
id = 5
foreground_color = "black"
background_color = "#b82b35"
title = "Tims Rewards"
number = "1231231231234"

[[cards]]
id = 5
foreground_color = "white"
background_color = "#9a8147"
title = "Air Miles"
number = "1231231231234"
"##;

    #[test]
    fn parses_cards_in_order() {
        let cards = parse_deck(TWO_CARDS, "inline").unwrap();
        assert_eq!(cards.len(), 2);
        assert_eq!(cards[0].title, "Tims Rewards");
        assert_eq!(cards[1].foreground_color, CardColor::WHITE);
        assert_eq!(cards[1].background_color, CardColor::rgb(154, 129, 71));
    }

    #[test]
    fn duplicate_ids_are_reported_once() {
        let cards = parse_deck(TWO_CARDS, "inline").unwrap();
        assert_eq!(duplicate_ids(&cards), vec![5]);

        let mut three = cards.clone();
        three.push(cards[0].clone());
        assert_eq!(duplicate_ids(&three), vec![5]);
    }

    #[test]
    fn empty_document_is_an_empty_deck() {
        assert!(parse_deck("", "empty").unwrap().is_empty());
    }

    #[test]
    fn invalid_color_names_the_origin() {
        let doc = TWO_CARDS.replace("#9a8147", "mauve");
        let err = parse_deck(&doc, "my-deck.toml").unwrap_err();
        assert!(matches!(err, DeckError::Parse { .. }));
        assert!(err.to_string().contains("my-deck.toml"));
    }

    #[test]
    fn missing_field_is_a_parse_error() {
        let doc = "[[cards]]\nid = 1\ntitle = \"No colors\"\nnumber = \"1\"\n";
        assert!(matches!(
            parse_deck(doc, "inline"),
            Err(DeckError::Parse { .. })
        ));
    }

    #[test]
    fn loads_deck_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("deck.toml");
        fs::write(&path, TWO_CARDS).unwrap();
        let cards = load_deck(&path).unwrap();
        assert_eq!(cards.len(), 2);
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml");
        let err = load_deck(&path).unwrap_err();
        assert!(matches!(err, DeckError::Read { .. }));
        assert!(err.to_string().contains("absent.toml"));
    }
}
