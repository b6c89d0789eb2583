//! Core domain types for the wallet card stack.
//!
//! This crate contains pure domain types with no IO, no async, and minimal dependencies.
//! Everything here can be used from any layer of the application.

// Pedantic lint configuration - these are intentional design choices
#![allow(clippy::missing_errors_doc)] // Result-returning functions are self-explanatory

pub mod ui;

use std::fmt;
use std::ops::Range;

use serde::{Deserialize, Serialize};
use thiserror::Error;

// ============================================================================
// CardColor
// ============================================================================

/// An opaque RGB color carried by a card.
///
/// Parsed from `#rrggbb` or one of a few named colors, serialized back as `#rrggbb`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CardColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid card color {0:?}: expected #rrggbb or one of black, white, system_gray5")]
pub struct ColorParseError(String);

impl CardColor {
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    pub const WHITE: Self = Self::rgb(255, 255, 255);
    /// iOS `systemGray5` in the light appearance.
    pub const SYSTEM_GRAY5: Self = Self::rgb(229, 229, 234);

    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn parse(value: &str) -> Result<Self, ColorParseError> {
        let trimmed = value.trim();
        if let Some(hex) = trimmed.strip_prefix('#') {
            return parse_hex(hex).ok_or_else(|| ColorParseError(value.to_string()));
        }
        match trimmed.to_ascii_lowercase().as_str() {
            "black" => Ok(Self::BLACK),
            "white" => Ok(Self::WHITE),
            "system_gray5" | "systemgray5" => Ok(Self::SYSTEM_GRAY5),
            _ => Err(ColorParseError(value.to_string())),
        }
    }

    /// Relative luminance in `0.0..=1.0` (Rec. 709 weights, no gamma).
    #[must_use]
    pub fn luminance(self) -> f32 {
        (0.2126 * f32::from(self.r) + 0.7152 * f32::from(self.g) + 0.0722 * f32::from(self.b))
            / 255.0
    }
}

fn parse_hex(hex: &str) -> Option<CardColor> {
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let channel = |range: Range<usize>| u8::from_str_radix(&hex[range], 16).ok();
    Some(CardColor::rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?))
}

impl fmt::Display for CardColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl TryFrom<String> for CardColor {
    type Error = ColorParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<CardColor> for String {
    fn from(value: CardColor) -> Self {
        value.to_string()
    }
}

// ============================================================================
// Card
// ============================================================================

/// A wallet card record.
///
/// Equality is structural: two records with the same `id` but different content are
/// different cards, and identical records are told apart by their position in the deck.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    pub id: i64,
    pub foreground_color: CardColor,
    pub background_color: CardColor,
    pub title: String,
    pub number: String,
}

// ============================================================================
// Face / CardState
// ============================================================================

/// Which side of a card is facing the viewer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Face {
    #[default]
    Front,
    Back,
}

impl Face {
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Face::Front => Face::Back,
            Face::Back => Face::Front,
        }
    }
}

/// Combined selection and orientation of a single card.
///
/// A card can only show its back while it is selected, so there is no
/// `BackUnselected` variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CardState {
    #[default]
    FrontUnselected,
    FrontSelected,
    BackSelected,
}

impl CardState {
    #[must_use]
    pub const fn selected(face: Face) -> Self {
        match face {
            Face::Front => CardState::FrontSelected,
            Face::Back => CardState::BackSelected,
        }
    }

    #[must_use]
    pub const fn is_selected(self) -> bool {
        matches!(self, CardState::FrontSelected | CardState::BackSelected)
    }

    #[must_use]
    pub const fn face(self) -> Face {
        match self {
            CardState::BackSelected => Face::Back,
            CardState::FrontUnselected | CardState::FrontSelected => Face::Front,
        }
    }
}
