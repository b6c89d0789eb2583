//! Core engine for the wallet card stack.
//!
//! This crate contains the [`App`] state without TUI dependencies:
//!
//! - **Card stack**: [`CardStack`] owns the deck, the single selection, and the flip
//!   state of the selected card
//! - **Layout**: cascade offsets, stacking order, and hit-testing in terminal rows
//! - **Deck loading**: TOML fixtures ([`parse_deck`], [`load_deck`])
//! - **Configuration**: `~/.wallet/config.toml` ([`WalletConfig`])
//!
//! The TUI layer (`wallet_tui`) reads state from `App`, reports the viewport it drew
//! into, and forwards input back.

use std::time::{Duration, Instant};

use tracing::debug;

pub use wallet_types::ui::UiOptions;
pub use wallet_types::{Card, CardColor, CardState, ColorParseError, Face};

mod config;
mod deck;
mod stack;
mod transition;

pub use config::{AppConfig, ConfigError, DECK_ENV_VAR, DeckConfig, DeckSource, WalletConfig};
pub use deck::{DeckError, duplicate_ids, load_deck, parse_deck};
pub use stack::{CardPose, CardStack, StackError, StackMetrics, StackTimings, TapOutcome};

// ============================================================================
// StackViewport - where the renderer put the stack
// ============================================================================

/// Screen region the stack was last drawn into, in terminal cells.
///
/// Written by the renderer every frame and read back for pointer hit-testing and
/// scroll clamping.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StackViewport {
    pub y: u16,
    pub height: u16,
    /// Left column of a face-on card.
    pub card_x: u16,
    pub card_width: u16,
}

impl StackViewport {
    fn contains_row(&self, row: u16) -> bool {
        row >= self.y && row < self.y.saturating_add(self.height)
    }
}

#[derive(Debug)]
struct ViewState {
    /// Rows of stack content scrolled off the top.
    scroll: u16,
    scroll_max: u16,
    viewport: StackViewport,
    ui_options: UiOptions,
    /// Timestamp of last frame (for animation timing).
    last_frame: Instant,
}

impl ViewState {
    fn new(ui_options: UiOptions) -> Self {
        Self {
            scroll: 0,
            scroll_max: 0,
            viewport: StackViewport::default(),
            ui_options,
            last_frame: Instant::now(),
        }
    }
}

// ============================================================================
// App
// ============================================================================

#[derive(Debug)]
pub struct App {
    stack: CardStack,
    view: ViewState,
    should_quit: bool,
}

impl App {
    /// Build the app over `cards` with the default geometry.
    pub fn new(
        cards: Vec<Card>,
        initial_selected_index: usize,
        ui_options: UiOptions,
    ) -> Result<Self, StackError> {
        let stack = CardStack::new(cards, initial_selected_index, StackMetrics::DEFAULT)?
            .with_timings(StackTimings::for_options(ui_options));
        Ok(Self::with_stack(stack, ui_options))
    }

    #[must_use]
    pub fn with_stack(stack: CardStack, ui_options: UiOptions) -> Self {
        Self {
            stack,
            view: ViewState::new(ui_options),
            should_quit: false,
        }
    }

    #[must_use]
    pub fn stack(&self) -> &CardStack {
        &self.stack
    }

    #[must_use]
    pub fn ui_options(&self) -> UiOptions {
        self.view.ui_options
    }

    // ------------------------------------------------------------------------
    // Input intents
    // ------------------------------------------------------------------------

    pub fn tap(&mut self, index: usize) -> TapOutcome {
        self.stack.tap(index)
    }

    /// Tap the `n`-th card, counting from 1.
    pub fn tap_nth(&mut self, n: usize) -> TapOutcome {
        match n.checked_sub(1) {
            Some(index) => {
                let outcome = self.stack.tap(index);
                self.ensure_selected_visible();
                outcome
            }
            None => TapOutcome::Ignored,
        }
    }

    /// Tap whatever card is drawn at a screen cell.
    pub fn tap_at(&mut self, column: u16, row: u16) -> TapOutcome {
        match self.card_at_point(column, row) {
            Some(index) => self.stack.tap(index),
            None => {
                debug!(column, row, "Tap missed every card");
                TapOutcome::Ignored
            }
        }
    }

    #[must_use]
    pub fn card_at_point(&self, column: u16, row: u16) -> Option<usize> {
        let viewport = self.view.viewport;
        if !viewport.contains_row(row) {
            return None;
        }
        let content_row = (row - viewport.y).saturating_add(self.view.scroll);
        self.stack
            .card_at_cell(content_row, column, viewport.card_x, viewport.card_width)
    }

    pub fn flip_selected(&mut self) -> TapOutcome {
        self.stack.flip_selected()
    }

    pub fn deselect_selected(&mut self) -> bool {
        self.stack
            .selected_index()
            .is_some_and(|index| self.stack.deselect(index))
    }

    pub fn select_next(&mut self) -> bool {
        let changed = self.stack.select_next();
        self.ensure_selected_visible();
        changed
    }

    pub fn select_previous(&mut self) -> bool {
        let changed = self.stack.select_previous();
        self.ensure_selected_visible();
        changed
    }

    // ------------------------------------------------------------------------
    // Scrolling
    // ------------------------------------------------------------------------

    #[must_use]
    pub fn scroll_offset(&self) -> u16 {
        self.view.scroll
    }

    pub fn scroll_by(&mut self, delta: i32) {
        let target = i32::from(self.view.scroll).saturating_add(delta);
        self.view.scroll = target.clamp(0, i32::from(self.view.scroll_max)) as u16;
    }

    pub fn scroll_to_top(&mut self) {
        self.view.scroll = 0;
    }

    pub fn scroll_to_bottom(&mut self) {
        self.view.scroll = self.view.scroll_max;
    }

    /// Record where the stack was drawn and re-clamp the scroll position.
    pub fn set_viewport(&mut self, viewport: StackViewport) {
        self.view.viewport = viewport;
        self.view.scroll_max = self
            .stack
            .content_height()
            .saturating_sub(viewport.height);
        self.view.scroll = self.view.scroll.min(self.view.scroll_max);
    }

    #[must_use]
    pub fn viewport(&self) -> StackViewport {
        self.view.viewport
    }

    fn ensure_selected_visible(&mut self) {
        let height = self.view.viewport.height;
        let Some(index) = self.stack.selected_index() else {
            return;
        };
        if height == 0 {
            return;
        }
        let top = self.stack.offset_for(index);
        let bottom = top.saturating_add(self.stack.height_for(index));
        if top < self.view.scroll {
            self.view.scroll = top;
        } else if bottom > self.view.scroll.saturating_add(height) {
            self.view.scroll = bottom.saturating_sub(height);
        }
    }

    // ------------------------------------------------------------------------
    // Frame loop
    // ------------------------------------------------------------------------

    /// Advance animations by the wall-clock time since the previous tick.
    pub fn tick(&mut self) {
        let elapsed = self.frame_elapsed();
        self.advance(elapsed);
    }

    pub fn frame_elapsed(&mut self) -> Duration {
        let now = Instant::now();
        let elapsed = now.duration_since(self.view.last_frame);
        self.view.last_frame = now;
        elapsed
    }

    pub fn advance(&mut self, delta: Duration) {
        self.stack.advance(delta);
    }

    pub fn request_quit(&mut self) {
        self.should_quit = true;
    }

    #[must_use]
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }
}
