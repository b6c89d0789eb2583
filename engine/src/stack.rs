//! The card stack: selection, cascade offsets, and per-card flip state.
//!
//! Cards are identified by their position in the deck. The stack owns the only
//! selection and the orientation of the selected card; every other card is face-up
//! and unselected. All mutation goes through the methods here.

use std::time::Duration;

use thiserror::Error;
use tracing::{debug, trace, warn};

use wallet_types::ui::{FlipEffect, UiOptions};
use wallet_types::{Card, CardState, Face};

use crate::transition::OffsetTransition;

/// Geometry of the cascade, in terminal rows.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StackMetrics {
    /// Height of a fully expanded (selected) card.
    pub card_height: u16,
    /// Vertical distance between consecutive cards in the cascade.
    pub offset_step: u16,
    /// Height of an unselected card relative to `card_height`.
    pub non_selected_height_ratio: f32,
    /// Tilt of unselected cards about the horizontal axis.
    pub tilt_degrees: f32,
}

impl StackMetrics {
    pub const DEFAULT: Self = Self {
        card_height: 9,
        offset_step: 2,
        non_selected_height_ratio: 0.8,
        tilt_degrees: -10.0,
    };

    #[must_use]
    pub fn collapsed_height(&self) -> u16 {
        let scaled = (f32::from(self.card_height) * self.non_selected_height_ratio).round();
        (scaled as u16).max(1)
    }
}

impl Default for StackMetrics {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Animation lengths for the stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StackTimings {
    pub flip: Duration,
    pub selection: Duration,
}

impl StackTimings {
    pub const DEFAULT: Self = Self {
        flip: Duration::from_millis(500),
        selection: Duration::from_millis(350),
    };

    pub const INSTANT: Self = Self {
        flip: Duration::ZERO,
        selection: Duration::ZERO,
    };

    #[must_use]
    pub fn for_options(options: UiOptions) -> Self {
        if options.reduced_motion {
            Self::INSTANT
        } else {
            Self::DEFAULT
        }
    }
}

impl Default for StackTimings {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StackError {
    #[error("initial selection {index} is out of range for a deck of {len} cards")]
    SelectionOutOfRange { index: usize, len: usize },
}

/// Result of tapping a card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TapOutcome {
    /// The card was not selected; it is now.
    SelectionRequested,
    /// The card was already selected and now faces the given way.
    Flipped(Face),
    /// No such card.
    Ignored,
}

/// Everything the renderer needs to place one card.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CardPose {
    pub index: usize,
    /// Rows from the top of the stack content, as currently displayed.
    pub offset: u16,
    pub height: u16,
    pub tilt_degrees: f32,
    /// Draw order; higher draws on top.
    pub z_index: usize,
    pub state: CardState,
    /// Face drawn this frame (lags `state` during the first half of a flip).
    pub face: Face,
    /// `Some` while the card is mid-flip.
    pub rotation_degrees: Option<f32>,
    /// Horizontal projection of the card: 1.0 face-on, 0.0 edge-on.
    pub edge_scale: f32,
}

impl CardPose {
    /// Columns `(x, width)` this card covers, given the span of a face-on card.
    ///
    /// A tilted card is inset equally on both sides; a turning card is squeezed about
    /// its center. Never narrower than one column unless `card_width` is zero.
    #[must_use]
    pub fn columns(&self, card_x: u16, card_width: u16) -> (u16, u16) {
        let (x, width) = tilt_inset(card_x, card_width, self.tilt_degrees);
        match self.rotation_degrees {
            Some(_) => squeeze(x, width, self.edge_scale),
            None => (x, width),
        }
    }

    fn covers_row(&self, content_row: u16) -> bool {
        content_row >= self.offset && content_row < self.offset.saturating_add(self.height)
    }

    fn covers_column(&self, column: u16, card_x: u16, card_width: u16) -> bool {
        let (x, width) = self.columns(card_x, card_width);
        column >= x && column < x.saturating_add(width)
    }
}

fn tilt_inset(x: u16, width: u16, tilt_degrees: f32) -> (u16, u16) {
    let inset = (f32::from(width) * tilt_degrees.to_radians().sin().abs() / 2.0).round() as u16;
    let inset = inset.min(width.saturating_sub(1) / 2);
    (x + inset, width - inset * 2)
}

fn squeeze(x: u16, width: u16, scale: f32) -> (u16, u16) {
    let squeezed = (f32::from(width) * scale.clamp(0.0, 1.0)).round() as u16;
    let squeezed = squeezed.max(1).min(width);
    (x + (width - squeezed) / 2, squeezed)
}

#[derive(Debug)]
struct Selection {
    index: usize,
    face: Face,
    flip: Option<FlipEffect>,
}

impl Selection {
    fn new(index: usize) -> Self {
        Self {
            index,
            face: Face::Front,
            flip: None,
        }
    }

    fn displayed_face(&self) -> Face {
        self.flip
            .as_ref()
            .map_or(self.face, FlipEffect::displayed_face)
    }

    fn flip(&mut self, duration: Duration) -> Face {
        let displayed = self.displayed_face();
        self.face = self.face.toggled();
        let flip = FlipEffect::new(displayed, self.face, duration);
        self.flip = (!flip.is_finished()).then_some(flip);
        self.face
    }
}

#[derive(Debug)]
pub struct CardStack {
    cards: Vec<Card>,
    metrics: StackMetrics,
    timings: StackTimings,
    selection: Option<Selection>,
    transition: Option<OffsetTransition>,
}

impl CardStack {
    /// Build a stack with `cards[initial_selected_index]` selected.
    ///
    /// An empty deck has nothing to select and ignores the index. On a non-empty deck an
    /// out-of-range index is rejected rather than clamped.
    pub fn new(
        cards: Vec<Card>,
        initial_selected_index: usize,
        metrics: StackMetrics,
    ) -> Result<Self, StackError> {
        let selection = if cards.is_empty() {
            None
        } else if initial_selected_index < cards.len() {
            Some(Selection::new(initial_selected_index))
        } else {
            return Err(StackError::SelectionOutOfRange {
                index: initial_selected_index,
                len: cards.len(),
            });
        };

        Ok(Self {
            cards,
            metrics,
            timings: StackTimings::DEFAULT,
            selection,
            transition: None,
        })
    }

    #[must_use]
    pub fn with_timings(mut self, timings: StackTimings) -> Self {
        self.timings = timings;
        self
    }

    #[must_use]
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    #[must_use]
    pub fn metrics(&self) -> &StackMetrics {
        &self.metrics
    }

    #[must_use]
    pub fn timings(&self) -> StackTimings {
        self.timings
    }

    /// First position holding a card structurally equal to `card`.
    #[must_use]
    pub fn position_of(&self, card: &Card) -> Option<usize> {
        self.cards.iter().position(|c| c == card)
    }

    #[must_use]
    pub fn selected_index(&self) -> Option<usize> {
        self.selection.as_ref().map(|s| s.index)
    }

    #[must_use]
    pub fn selected_card(&self) -> Option<&Card> {
        self.selected_index().and_then(|i| self.cards.get(i))
    }

    #[must_use]
    pub fn is_selected(&self, index: usize) -> bool {
        self.selected_index() == Some(index)
    }

    #[must_use]
    pub fn card_state(&self, index: usize) -> CardState {
        match &self.selection {
            Some(selection) if selection.index == index => CardState::selected(selection.face),
            _ => CardState::FrontUnselected,
        }
    }

    #[must_use]
    pub fn displayed_face(&self, index: usize) -> Face {
        match &self.selection {
            Some(selection) if selection.index == index => selection.displayed_face(),
            _ => Face::Front,
        }
    }

    // ------------------------------------------------------------------------
    // Selection
    // ------------------------------------------------------------------------

    /// Select the card at `index`. Returns `false` when nothing changed.
    pub fn select(&mut self, index: usize) -> bool {
        if index >= self.cards.len() {
            warn!(index, len = self.cards.len(), "Ignoring selection outside the deck");
            return false;
        }
        if self.is_selected(index) {
            return false;
        }
        self.change_selection(Some(index));
        true
    }

    /// Clear the selection if `index` holds it. Returns `false` when nothing changed.
    pub fn deselect(&mut self, index: usize) -> bool {
        if !self.is_selected(index) {
            return false;
        }
        self.change_selection(None);
        true
    }

    /// Write side of the per-card selection binding.
    pub fn set_selected(&mut self, index: usize, selected: bool) -> bool {
        if selected {
            self.select(index)
        } else {
            self.deselect(index)
        }
    }

    pub fn select_card(&mut self, card: &Card) -> bool {
        self.position_of(card).is_some_and(|i| self.select(i))
    }

    pub fn deselect_card(&mut self, card: &Card) -> bool {
        self.position_of(card).is_some_and(|i| self.deselect(i))
    }

    pub fn select_next(&mut self) -> bool {
        let Some(last) = self.cards.len().checked_sub(1) else {
            return false;
        };
        let next = self.selected_index().map_or(0, |i| (i + 1).min(last));
        self.select(next)
    }

    pub fn select_previous(&mut self) -> bool {
        let Some(last) = self.cards.len().checked_sub(1) else {
            return false;
        };
        let previous = self.selected_index().map_or(last, |i| i.saturating_sub(1));
        self.select(previous)
    }

    fn change_selection(&mut self, next: Option<usize>) {
        let from = self.displayed_offsets();
        let previous = self.selected_index();
        self.selection = next.map(Selection::new);

        let transition = OffsetTransition::new(from, self.timings.selection);
        self.transition = (!transition.is_finished()).then_some(transition);

        debug!(?previous, ?next, "Card selection changed");
    }

    // ------------------------------------------------------------------------
    // Tapping / flipping
    // ------------------------------------------------------------------------

    /// Tap a card: flips it if selected, otherwise selects it.
    pub fn tap(&mut self, index: usize) -> TapOutcome {
        if index >= self.cards.len() {
            debug!(index, "Tap outside the deck ignored");
            return TapOutcome::Ignored;
        }

        let duration = self.timings.flip;
        if let Some(selection) = self.selection.as_mut()
            && selection.index == index
        {
            let face = selection.flip(duration);
            debug!(index, ?face, "Flipping selected card");
            return TapOutcome::Flipped(face);
        }

        self.select(index);
        TapOutcome::SelectionRequested
    }

    /// Tap the selected card, if there is one.
    pub fn flip_selected(&mut self) -> TapOutcome {
        match self.selected_index() {
            Some(index) => self.tap(index),
            None => TapOutcome::Ignored,
        }
    }

    // ------------------------------------------------------------------------
    // Layout
    // ------------------------------------------------------------------------

    /// Resting offset of the card at `index` for the current selection.
    ///
    /// Cards cascade by `offset_step`; cards after the selected one are pushed down by a
    /// full card height so the selected card can expand. With no selection nothing is
    /// pushed. Unknown positions resolve to 0.
    #[must_use]
    pub fn offset_for(&self, index: usize) -> u16 {
        if index >= self.cards.len() {
            return 0;
        }
        let selected = self.selected_index().unwrap_or(usize::MAX);
        let position = u16::try_from(index).unwrap_or(u16::MAX);
        let mut offset = position.saturating_mul(self.metrics.offset_step);
        if index > selected {
            offset = offset.saturating_add(self.metrics.card_height);
        }
        trace!(index, offset, "Card offset");
        offset
    }

    /// Offset as drawn this frame, mid-way through any selection transition.
    #[must_use]
    pub fn animated_offset(&self, index: usize) -> u16 {
        let target = self.offset_for(index);
        match &self.transition {
            Some(transition) => transition.offset(index, target).round().max(0.0) as u16,
            None => target,
        }
    }

    fn displayed_offsets(&self) -> Vec<f32> {
        (0..self.cards.len())
            .map(|i| {
                let target = self.offset_for(i);
                self.transition
                    .as_ref()
                    .map_or(f32::from(target), |t| t.offset(i, target))
            })
            .collect()
    }

    #[must_use]
    pub fn z_index(&self, index: usize) -> usize {
        index
    }

    #[must_use]
    pub fn height_for(&self, index: usize) -> u16 {
        if self.is_selected(index) {
            self.metrics.card_height
        } else {
            self.metrics.collapsed_height()
        }
    }

    #[must_use]
    pub fn pose(&self, index: usize) -> Option<CardPose> {
        if index >= self.cards.len() {
            return None;
        }
        let selected = self.is_selected(index);
        let flip = self
            .selection
            .as_ref()
            .filter(|s| s.index == index)
            .and_then(|s| s.flip.as_ref());

        Some(CardPose {
            index,
            offset: self.animated_offset(index),
            height: self.height_for(index),
            tilt_degrees: if selected { 0.0 } else { self.metrics.tilt_degrees },
            z_index: self.z_index(index),
            state: self.card_state(index),
            face: self.displayed_face(index),
            rotation_degrees: flip.map(FlipEffect::rotation_degrees),
            edge_scale: flip.map_or(1.0, FlipEffect::edge_scale),
        })
    }

    /// Poses of every card in draw order (bottom first).
    #[must_use]
    pub fn poses(&self) -> Vec<CardPose> {
        let mut poses: Vec<CardPose> = (0..self.cards.len()).filter_map(|i| self.pose(i)).collect();
        poses.sort_by_key(|p| p.z_index);
        poses
    }

    /// Topmost card covering `content_row`, as currently displayed.
    #[must_use]
    pub fn card_at(&self, content_row: u16) -> Option<usize> {
        self.poses()
            .into_iter()
            .rev()
            .find(|p| p.covers_row(content_row))
            .map(|p| p.index)
    }

    /// Topmost card drawn over a cell, with face-on cards spanning `card_width`
    /// columns from `card_x`.
    #[must_use]
    pub fn card_at_cell(
        &self,
        content_row: u16,
        column: u16,
        card_x: u16,
        card_width: u16,
    ) -> Option<usize> {
        self.poses()
            .into_iter()
            .rev()
            .find(|p| p.covers_row(content_row) && p.covers_column(column, card_x, card_width))
            .map(|p| p.index)
    }

    /// Rows needed to show the lowest card completely once animations settle.
    #[must_use]
    pub fn content_height(&self) -> u16 {
        (0..self.cards.len())
            .map(|i| self.offset_for(i).saturating_add(self.height_for(i)))
            .max()
            .unwrap_or(0)
    }

    // ------------------------------------------------------------------------
    // Animation
    // ------------------------------------------------------------------------

    pub fn advance(&mut self, delta: Duration) {
        if let Some(transition) = self.transition.as_mut() {
            transition.advance(delta);
            if transition.is_finished() {
                self.transition = None;
            }
        }

        if let Some(selection) = self.selection.as_mut() {
            let index = selection.index;
            if let Some(flip) = selection.flip.as_mut() {
                if flip.advance(delta) {
                    debug!(index, face = ?flip.displayed_face(), "Flip midpoint, face swapped");
                }
                if flip.is_finished() {
                    selection.flip = None;
                }
            }
        }
    }

    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.transition.is_some() || self.selection.as_ref().is_some_and(|s| s.flip.is_some())
    }
}
