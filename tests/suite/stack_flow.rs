//! End-to-end card stack behavior driven through `App`.

use std::time::Duration;

use wallet_engine::{App, CardState, Face, StackMetrics, StackTimings, TapOutcome, UiOptions};

use crate::common::{instant_options, sample_app, sample_cards};

const STEP: u16 = StackMetrics::DEFAULT.offset_step;
const HEIGHT: u16 = StackMetrics::DEFAULT.card_height;

#[test]
fn select_flip_and_move_on() {
    let mut app = sample_app(2, instant_options());
    let stack = app.stack();
    assert_eq!(stack.card_state(2), CardState::FrontSelected);
    assert_eq!(stack.offset_for(0), 0);
    assert_eq!(stack.offset_for(1), STEP);
    assert_eq!(stack.offset_for(2), 2 * STEP);
    assert_eq!(stack.offset_for(4), 4 * STEP + HEIGHT);

    // Tap the selected card: it flips.
    assert_eq!(app.tap(2), TapOutcome::Flipped(Face::Back));
    assert_eq!(app.stack().card_state(2), CardState::BackSelected);

    // Tap another card: selection moves and the old card lies face up again.
    assert_eq!(app.tap(4), TapOutcome::SelectionRequested);
    assert_eq!(app.stack().card_state(4), CardState::FrontSelected);
    assert_eq!(app.stack().card_state(2), CardState::FrontUnselected);
    assert_eq!(app.stack().offset_for(4), 4 * STEP);
    assert_eq!(app.stack().offset_for(5), 5 * STEP + HEIGHT);
}

#[test]
fn exactly_one_card_selected_after_any_tap_sequence() {
    let mut app = sample_app(0, instant_options());
    for index in [3, 3, 1, 5, 5, 5, 0, 2, 9, 4] {
        app.tap(index);
        let selected = (0..app.stack().len())
            .filter(|&i| app.stack().card_state(i).is_selected())
            .count();
        assert_eq!(selected, 1, "after tapping {index}");
    }
}

#[test]
fn duplicate_ids_are_distinct_cards() {
    let mut app = sample_app(4, instant_options());
    let tims = app.stack().cards()[4].clone();
    let air_miles = app.stack().cards()[5].clone();
    assert_eq!(tims.id, air_miles.id);
    assert_ne!(tims, air_miles);

    app.tap(5);
    assert!(app.stack().is_selected(5));
    assert!(!app.stack().is_selected(4));
    assert_eq!(app.stack().selected_card(), Some(&air_miles));
}

#[test]
fn flip_animation_swaps_face_halfway() {
    let mut app = sample_app(0, UiOptions::default());
    let half = StackTimings::DEFAULT.flip / 2;

    app.flip_selected();
    assert_eq!(app.stack().card_state(0), CardState::BackSelected);
    assert_eq!(app.stack().displayed_face(0), Face::Front);

    app.advance(half - Duration::from_millis(10));
    let pose = app.stack().pose(0).unwrap();
    assert_eq!(pose.face, Face::Front);
    assert!(pose.edge_scale < 0.1);

    app.advance(Duration::from_millis(20));
    assert_eq!(app.stack().displayed_face(0), Face::Back);

    app.advance(half);
    assert!(!app.stack().is_animating());
    assert_eq!(app.stack().pose(0).unwrap().rotation_degrees, None);
}

#[test]
fn selection_transition_settles_on_new_offsets() {
    let mut app = sample_app(0, UiOptions::default());
    app.tap(3);
    let before = app.stack().animated_offset(1);
    assert_eq!(before, STEP + HEIGHT);

    app.advance(StackTimings::DEFAULT.selection);
    assert!(!app.stack().is_animating());
    assert_eq!(app.stack().animated_offset(1), STEP);
    assert_eq!(app.stack().animated_offset(4), 4 * STEP + HEIGHT);
}

#[test]
fn pointer_taps_use_hit_testing() {
    let mut app = sample_app(0, instant_options());
    // Card 0 is expanded over rows 0..9; card 1 starts at row 11.
    assert_eq!(app.tap_at(10, 12), TapOutcome::SelectionRequested);
    assert!(app.stack().is_selected(1));
    // Row 0 still belongs to card 0, drawn beneath nothing.
    assert_eq!(app.tap_at(10, 0), TapOutcome::SelectionRequested);
    assert!(app.stack().is_selected(0));
    assert_eq!(app.tap_at(10, 0), TapOutcome::Flipped(Face::Back));
}

#[test]
fn out_of_range_initial_selection_is_rejected() {
    let err = App::new(sample_cards(), 6, UiOptions::default()).unwrap_err();
    assert_eq!(err.to_string(), "initial selection 6 is out of range for a deck of 6 cards");
}
