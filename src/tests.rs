// Integrated into the crate via `#[cfg(test)]` — included from lib.rs via `mod tests`.
//
// End-to-end scenarios exercising the whole decision pipeline (card parsing
// through policy output), rather than any one module in isolation.

use crate::board::{analyze_board, BoardTexture};
use crate::card::{Action, Card, Position, Street};
use crate::history::HistoryTracker;
use crate::policy::PolicyEngine;
use crate::table_state::TableState;

fn c(s: &str) -> Card {
    Card::parse(s).unwrap()
}

fn heads_up(hero_cards: [Card; 2]) -> TableState {
    let mut t = TableState::new(1, 1, hero_cards, 2.0);
    t.seat_player(1, Position::Button, 200.0);
    t.seat_player(2, Position::BigBlind, 200.0);
    t
}

/// Scenario tests exercise the real `decide()` path, which logs via the
/// `log` facade — wire a subscriber so `RUST_LOG=trace cargo test -- --nocapture`
/// actually shows the `policy`/`history`/`board` trace it emits.
fn init_logging() {
    let _ = env_logger::try_init();
}

// ---------------------------------------------------------------------------
// S1 — premium pocket pair raises preflop unopposed.
// ---------------------------------------------------------------------------

#[test]
fn s1_pocket_kings_opens_preflop() {
    init_logging();
    let table = heads_up([c("Kh"), c("Kd")]);
    let (action, amount) = PolicyEngine::new(&table).decide();
    assert_eq!(action, Action::Raise);
    assert!(amount >= table.min_raise);
}

// ---------------------------------------------------------------------------
// S2 — marginal hand facing a three-bet folds without the right odds.
// ---------------------------------------------------------------------------

#[test]
fn s2_weak_kicker_facing_heavy_preflop_aggression_folds() {
    let mut table = heads_up([c("Ah"), c("Th")]);
    table.record_action(2, Action::Raise, 6.0).unwrap();
    table.record_action(1, Action::Raise, 18.0).unwrap();
    table.record_action(2, Action::Raise, 54.0).unwrap();
    let (action, _) = PolicyEngine::new(&table).decide();
    assert_eq!(action, Action::Fold);
}

// ---------------------------------------------------------------------------
// S3 — top set on a dry flop bets for value, not just protection.
// ---------------------------------------------------------------------------

#[test]
fn s3_top_set_on_dry_flop_bets() {
    let mut table = heads_up([c("9c"), c("9d")]);
    table
        .deal_street(Street::Flop, vec![c("9h"), c("4s"), c("2c")])
        .unwrap();
    let (action, amount) = PolicyEngine::new(&table).decide();
    assert_eq!(action, Action::Raise);
    assert!(amount > 0.0);
}

// ---------------------------------------------------------------------------
// S4 — a flush draw facing a continuation bet with odds calls rather than folds.
// ---------------------------------------------------------------------------

#[test]
fn s4_flush_draw_facing_cbet_with_odds_continues() {
    let mut table = heads_up([c("Ah"), c("Kh")]);
    table
        .deal_street(Street::Flop, vec![c("Qh"), c("7d"), c("2h")])
        .unwrap();
    table.pot_size = 10.0;
    table.record_action(1, Action::Raise, 5.0).unwrap();
    let (action, _) = PolicyEngine::new(&table).decide();
    assert!(matches!(action, Action::Call | Action::Raise));
}

// ---------------------------------------------------------------------------
// S5 — a strong hand on the river facing a bet raises for value.
// ---------------------------------------------------------------------------

#[test]
fn s5_river_straight_facing_a_bet_raises() {
    let mut table = heads_up([c("Ah"), c("Kd")]);
    table
        .deal_street(
            Street::River,
            vec![c("Qc"), c("Jd"), c("Ts"), c("2h"), c("3c")],
        )
        .unwrap();
    table.record_action(1, Action::Raise, 8.0).unwrap();
    let (action, _) = PolicyEngine::new(&table).decide();
    assert_eq!(action, Action::Raise);
}

// ---------------------------------------------------------------------------
// S6 — air on the river facing a bet with no pot odds folds.
// ---------------------------------------------------------------------------

#[test]
fn s6_busted_draw_facing_river_bet_folds() {
    let mut table = heads_up([c("Ah"), c("Kh")]);
    table
        .deal_street(
            Street::River,
            vec![c("2d"), c("7c"), c("9s"), c("Jd"), c("3c")],
        )
        .unwrap();
    table.pot_size = 4.0;
    table.record_action(1, Action::Raise, 40.0).unwrap();
    let (action, _) = PolicyEngine::new(&table).decide();
    assert_eq!(action, Action::Fold);
}

// ---------------------------------------------------------------------------
// Board texture spans all four tiers.
// ---------------------------------------------------------------------------

#[test]
fn danger_level_covers_all_four_textures() {
    let dry = analyze_board(&[c("2c"), c("9d"), c("Kh")]);
    assert_eq!(dry.texture, BoardTexture::Dry);

    let semiwet = analyze_board(&[c("Tc"), c("9d"), c("2h")]);
    assert_eq!(semiwet.texture, BoardTexture::SemiWet);

    let wet = analyze_board(&[c("Th"), c("9h"), c("2h"), c("5c")]);
    assert!(matches!(wet.texture, BoardTexture::Wet | BoardTexture::VeryWet));

    let verywet = analyze_board(&[c("Th"), c("9h"), c("8h"), c("8c")]);
    assert_eq!(verywet.texture, BoardTexture::VeryWet);
}

// ---------------------------------------------------------------------------
// Betting-pattern symbol correctness.
// ---------------------------------------------------------------------------

#[test]
fn cbet_flag_true_only_for_the_preflop_raiser_leading_again() {
    let mut h = HistoryTracker::new();
    h.record_action(Street::Preflop, 1, Action::Raise, 6.0);
    h.record_action(Street::Preflop, 2, Action::Call, 6.0);
    h.record_action(Street::Flop, 1, Action::Raise, 4.0);
    assert!(h.is_continuation_bet(Street::Flop, 1));
    assert!(!h.is_continuation_bet(Street::Flop, 2));
}

#[test]
fn check_raise_flag_requires_a_check_before_the_raise() {
    let mut h = HistoryTracker::new();
    h.record_action(Street::Turn, 1, Action::Raise, 4.0);
    h.record_action(Street::Turn, 2, Action::Check, 0.0);
    assert!(!h.is_check_raise(Street::Turn, 1));

    h.record_action(Street::River, 1, Action::Check, 0.0);
    h.record_action(Street::River, 2, Action::Raise, 5.0);
    h.record_action(Street::River, 1, Action::Raise, 15.0);
    assert!(h.is_check_raise(Street::River, 1));
}
