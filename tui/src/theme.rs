//! Color theme and glyphs for the wallet TUI.
//!
//! Slate-to-black backdrop by default with an optional high-contrast override.

use ratatui::style::{Color, Modifier, Style};
use ratatui::symbols::border;

use wallet_types::CardColor;
use wallet_types::ui::UiOptions;

mod colors {
    use super::Color;

    // === Backdrop ===
    pub const BG_TOP: Color = Color::Rgb(49, 71, 85); // #314755
    pub const BG_BOTTOM: Color = Color::Rgb(0, 0, 0);
    pub const BG_STATUS: Color = Color::Rgb(22, 30, 36);

    // === Text ===
    pub const TEXT_PRIMARY: Color = Color::Rgb(229, 229, 234);
    pub const TEXT_MUTED: Color = Color::Rgb(128, 140, 150);

    // === Accents ===
    pub const ACCENT: Color = Color::Rgb(127, 180, 202);
    pub const PEACH: Color = Color::Rgb(255, 160, 102);
    pub const HIGHLIGHT_LIGHT: Color = Color::Rgb(255, 255, 255);
    pub const HIGHLIGHT_DARK: Color = Color::Rgb(28, 28, 30);
}

/// Resolved theme palette used by the UI.
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    pub bg_top: Color,
    pub bg_bottom: Color,
    pub bg_status: Color,
    pub text_primary: Color,
    pub text_muted: Color,
    pub accent: Color,
    pub peach: Color,
    /// Border of the selected card when the card itself is dark.
    pub highlight_light: Color,
    /// Border of the selected card when the card itself is light.
    pub highlight_dark: Color,
}

impl Palette {
    #[must_use]
    pub fn standard() -> Self {
        Self {
            bg_top: colors::BG_TOP,
            bg_bottom: colors::BG_BOTTOM,
            bg_status: colors::BG_STATUS,
            text_primary: colors::TEXT_PRIMARY,
            text_muted: colors::TEXT_MUTED,
            accent: colors::ACCENT,
            peach: colors::PEACH,
            highlight_light: colors::HIGHLIGHT_LIGHT,
            highlight_dark: colors::HIGHLIGHT_DARK,
        }
    }

    #[must_use]
    pub fn high_contrast() -> Self {
        Self {
            bg_top: Color::Black,
            bg_bottom: Color::Black,
            bg_status: Color::Black,
            text_primary: Color::White,
            text_muted: Color::Gray,
            accent: Color::Cyan,
            peach: Color::Yellow,
            highlight_light: Color::Yellow,
            highlight_dark: Color::Blue,
        }
    }

    /// Border color that stands out against a card's background.
    #[must_use]
    pub fn selection_border(&self, card_background: CardColor) -> Color {
        if card_background.luminance() > 0.5 {
            self.highlight_dark
        } else {
            self.highlight_light
        }
    }
}

#[must_use]
pub fn palette(options: UiOptions) -> Palette {
    if options.high_contrast {
        Palette::high_contrast()
    } else {
        Palette::standard()
    }
}

#[must_use]
pub fn card_color(color: CardColor) -> Color {
    Color::Rgb(color.r, color.g, color.b)
}

/// How card outlines are drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardBorder {
    Rounded,
    Ascii,
}

pub const ASCII_BORDER: border::Set = border::Set {
    top_left: "+",
    top_right: "+",
    bottom_left: "+",
    bottom_right: "+",
    vertical_left: "|",
    vertical_right: "|",
    horizontal_top: "-",
    horizontal_bottom: "-",
};

/// ASCII/Unicode glyphs for markers and hints.
#[derive(Debug, Clone, Copy)]
pub struct Glyphs {
    pub border: CardBorder,
    pub selected: &'static str,
    pub arrows: &'static str,
    pub enter: &'static str,
    pub separator: &'static str,
    pub ellipsis: &'static str,
    pub back_label: &'static str,
}

#[must_use]
pub fn glyphs(options: UiOptions) -> Glyphs {
    if options.ascii_only {
        Glyphs {
            border: CardBorder::Ascii,
            selected: ">",
            arrows: "j/k",
            enter: "enter",
            separator: "|",
            ellipsis: "...",
            back_label: "Back",
        }
    } else {
        Glyphs {
            border: CardBorder::Rounded,
            selected: "▸",
            arrows: "↑↓",
            enter: "⏎",
            separator: "│",
            ellipsis: "…",
            back_label: "Back",
        }
    }
}

/// Pre-defined styles for common UI elements.
pub mod styles {
    use super::{Modifier, Palette, Style};

    #[must_use]
    pub fn status_bar(palette: &Palette) -> Style {
        Style::default().fg(palette.text_primary).bg(palette.bg_status)
    }

    #[must_use]
    pub fn key_hint(palette: &Palette) -> Style {
        Style::default().fg(palette.text_muted)
    }

    #[must_use]
    pub fn key_highlight(palette: &Palette) -> Style {
        Style::default()
            .fg(palette.peach)
            .add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn selected_card(palette: &Palette) -> Style {
        Style::default()
            .fg(palette.accent)
            .add_modifier(Modifier::BOLD)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn high_contrast_backdrop_is_flat_black() {
        let options = UiOptions {
            high_contrast: true,
            ..UiOptions::default()
        };
        let palette = palette(options);
        assert_eq!(palette.bg_top, Color::Black);
        assert_eq!(palette.bg_bottom, Color::Black);
    }

    #[test]
    fn ascii_glyphs_avoid_box_drawing() {
        let options = UiOptions {
            ascii_only: true,
            ..UiOptions::default()
        };
        let glyphs = glyphs(options);
        assert_eq!(glyphs.border, CardBorder::Ascii);
        for glyph in [
            glyphs.selected,
            glyphs.arrows,
            glyphs.enter,
            glyphs.separator,
            glyphs.ellipsis,
        ] {
            assert!(glyph.is_ascii(), "{glyph:?} is not ASCII");
        }
    }

    #[test]
    fn selection_border_contrasts_with_card() {
        let palette = Palette::standard();
        assert_eq!(
            palette.selection_border(CardColor::WHITE),
            palette.highlight_dark
        );
        assert_eq!(
            palette.selection_border(CardColor::BLACK),
            palette.highlight_light
        );
    }

    #[test]
    fn card_color_maps_rgb() {
        assert_eq!(
            card_color(CardColor::rgb(187, 38, 26)),
            Color::Rgb(187, 38, 26)
        );
    }
}
