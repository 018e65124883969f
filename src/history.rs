//! Betting-pattern tracking across a hand: per-street action sequences and
//! the derived boolean symbols the policy engine and opponent modeling
//! consult (continuation bet, check-raise, 3-bet, donk bet, and so on).

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::card::{Action, Street};

/// One recorded action: who acted, what they did, and how much.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ActionRecord {
    pub seat: u8,
    pub action: Action,
    pub amount: f64,
}

/// Per-hand betting history, organized by street.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HistoryTracker {
    streets: HashMap<Street, Vec<ActionRecord>>,
    aggressor_by_street: HashMap<Street, u8>,
    preflop_raiser: Option<u8>,
}

impl HistoryTracker {
    pub fn new() -> Self {
        HistoryTracker::default()
    }

    /// Clear all recorded history for a new hand.
    pub fn reset(&mut self) {
        self.streets.clear();
        self.aggressor_by_street.clear();
        self.preflop_raiser = None;
    }

    /// Record an action taken on `street`. The first raise/all-in recorded
    /// on a street becomes that street's aggressor for cbet/donk purposes.
    pub fn record_action(&mut self, street: Street, seat: u8, action: Action, amount: f64) {
        log::trace!("history: street={street:?} seat={seat} action={action:?} amount={amount}");
        if matches!(action, Action::Raise | Action::AllIn) {
            self.aggressor_by_street.entry(street).or_insert(seat);
            if street == Street::Preflop {
                self.preflop_raiser.get_or_insert(seat);
            }
        }
        self.streets
            .entry(street)
            .or_default()
            .push(ActionRecord { seat, action, amount });
    }

    fn actions_on(&self, street: Street) -> &[ActionRecord] {
        self.streets.get(&street).map(|v| v.as_slice()).unwrap_or(&[])
    }

    fn raise_count(&self, street: Street) -> usize {
        self.actions_on(street)
            .iter()
            .filter(|r| matches!(r.action, Action::Raise | Action::AllIn))
            .count()
    }

    /// Number of raises (or all-ins) recorded on `street` so far. The
    /// policy engine's `facing_raise`/`multiple_raisers` helpers read this
    /// instead of scanning per-player last-action state directly.
    pub fn raises_this_street(&self, street: Street) -> usize {
        self.raise_count(street)
    }

    pub fn number_of_raises_before_flop(&self) -> usize {
        self.raise_count(Street::Preflop)
    }

    pub fn number_of_raises_on_flop(&self) -> usize {
        self.raise_count(Street::Flop)
    }

    pub fn number_of_raises_on_turn(&self) -> usize {
        self.raise_count(Street::Turn)
    }

    pub fn number_of_raises_on_river(&self) -> usize {
        self.raise_count(Street::River)
    }

    /// Index of `seat`'s most recent action on `street`, if it acted there.
    fn last_own_action_index(&self, street: Street, seat: u8) -> Option<usize> {
        self.actions_on(street)
            .iter()
            .rposition(|r| r.seat == seat)
    }

    /// Raises recorded on `street` since `seat` last acted there (or all of
    /// them, if `seat` hasn't acted on this street yet).
    pub fn raises_since_last_hero_play(&self, street: Street, seat: u8) -> usize {
        let actions = self.actions_on(street);
        let start = self.last_own_action_index(street, seat).map_or(0, |i| i + 1);
        actions[start..]
            .iter()
            .filter(|r| matches!(r.action, Action::Raise | Action::AllIn))
            .count()
    }

    /// Calls recorded on `street` since `seat` last acted there (or all of
    /// them, if `seat` hasn't acted on this street yet).
    pub fn calls_since_last_hero_play(&self, street: Street, seat: u8) -> usize {
        let actions = self.actions_on(street);
        let start = self.last_own_action_index(street, seat).map_or(0, |i| i + 1);
        actions[start..]
            .iter()
            .filter(|r| matches!(r.action, Action::Call))
            .count()
    }

    /// Whether `seat` raised preflop and is now betting again on the flop as
    /// the first bettor there (the classic continuation bet pattern).
    pub fn is_continuation_bet(&self, street: Street, seat: u8) -> bool {
        if street == Street::Preflop {
            return false;
        }
        self.preflop_raiser == Some(seat) && self.aggressor_by_street.get(&street) == Some(&seat)
    }

    /// `seat` checked earlier this street, then raised after a bet came in.
    pub fn is_check_raise(&self, street: Street, seat: u8) -> bool {
        let actions = self.actions_on(street);
        let mut checked = false;
        let mut faced_bet_after_check = false;
        for r in actions {
            if r.seat == seat {
                if matches!(r.action, Action::Check) {
                    checked = true;
                } else if checked && matches!(r.action, Action::Raise | Action::AllIn) && faced_bet_after_check {
                    return true;
                }
            } else if checked && matches!(r.action, Action::Raise | Action::Call | Action::AllIn) {
                faced_bet_after_check = true;
            }
        }
        false
    }

    /// Two or more raises on the street (the second raise re-opens the
    /// action as a 3-bet from the original raiser's perspective).
    pub fn is_three_bet(&self, street: Street) -> bool {
        self.raise_count(street) >= 2
    }

    /// Three or more raises on the street.
    pub fn is_four_bet(&self, street: Street) -> bool {
        self.raise_count(street) >= 3
    }

    /// A bet from someone other than the prior street's aggressor, made
    /// before the aggressor has acted this street.
    pub fn is_donk_bet(&self, street: Street, seat: u8) -> bool {
        if street == Street::Preflop {
            return false;
        }
        let prev = match street {
            Street::Flop => Street::Preflop,
            Street::Turn => Street::Flop,
            Street::River => Street::Turn,
            Street::Preflop => unreachable!(),
        };
        let prior_aggressor = match self.aggressor_by_street.get(&prev) {
            Some(&s) => s,
            None => return false,
        };
        if seat == prior_aggressor {
            return false;
        }
        let actions = self.actions_on(street);
        let seat_bet = actions
            .iter()
            .position(|r| r.seat == seat && matches!(r.action, Action::Raise | Action::AllIn));
        let aggressor_acted_first = actions
            .iter()
            .position(|r| r.seat == prior_aggressor);
        match (seat_bet, aggressor_acted_first) {
            (Some(bet_idx), Some(agg_idx)) => bet_idx < agg_idx,
            (Some(_), None) => true,
            _ => false,
        }
    }

    /// A bet into a player who merely called (didn't raise) on the
    /// previous street, probing to see if the flop/turn connected for them.
    pub fn is_probe_bet(&self, street: Street, seat: u8) -> bool {
        if street == Street::Preflop {
            return false;
        }
        let prev = match street {
            Street::Flop => Street::Preflop,
            Street::Turn => Street::Flop,
            Street::River => Street::Turn,
            Street::Preflop => unreachable!(),
        };
        let acted_on_prev = self
            .actions_on(prev)
            .iter()
            .any(|r| r.seat == seat && matches!(r.action, Action::Call));
        acted_on_prev && self.is_donk_bet(street, seat)
    }

    /// Called a bet on the previous street and is now betting into the
    /// field on this street after everyone checks.
    pub fn is_float_bet(&self, street: Street, seat: u8) -> bool {
        if street == Street::Preflop {
            return false;
        }
        let prev = match street {
            Street::Flop => Street::Preflop,
            Street::Turn => Street::Flop,
            Street::River => Street::Turn,
            Street::Preflop => unreachable!(),
        };
        let called_prev = self
            .actions_on(prev)
            .iter()
            .any(|r| r.seat == seat && matches!(r.action, Action::Call));
        let is_aggressor_here = self.aggressor_by_street.get(&street) == Some(&seat);
        called_prev && is_aggressor_here && self.aggressor_by_street.get(&prev) != Some(&seat)
    }

    pub fn aggressor_on(&self, street: Street) -> Option<u8> {
        self.aggressor_by_street.get(&street).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cbet_requires_same_seat_to_lead_both_streets() {
        let mut h = HistoryTracker::new();
        h.record_action(Street::Preflop, 1, Action::Raise, 6.0);
        h.record_action(Street::Preflop, 2, Action::Call, 6.0);
        h.record_action(Street::Flop, 1, Action::Raise, 4.0);
        assert!(h.is_continuation_bet(Street::Flop, 1));
        assert!(!h.is_continuation_bet(Street::Flop, 2));
    }

    #[test]
    fn check_raise_detected_after_facing_a_bet() {
        let mut h = HistoryTracker::new();
        h.record_action(Street::Flop, 1, Action::Check, 0.0);
        h.record_action(Street::Flop, 2, Action::Raise, 5.0);
        h.record_action(Street::Flop, 1, Action::Raise, 15.0);
        assert!(h.is_check_raise(Street::Flop, 1));
        assert!(!h.is_check_raise(Street::Flop, 2));
    }

    #[test]
    fn three_and_four_bet_counting() {
        let mut h = HistoryTracker::new();
        h.record_action(Street::Preflop, 1, Action::Raise, 3.0);
        h.record_action(Street::Preflop, 2, Action::Raise, 9.0);
        assert!(h.is_three_bet(Street::Preflop));
        assert!(!h.is_four_bet(Street::Preflop));
        h.record_action(Street::Preflop, 1, Action::Raise, 27.0);
        assert!(h.is_four_bet(Street::Preflop));
    }

    #[test]
    fn donk_bet_is_a_lead_by_a_non_aggressor() {
        let mut h = HistoryTracker::new();
        h.record_action(Street::Preflop, 1, Action::Raise, 6.0);
        h.record_action(Street::Preflop, 2, Action::Call, 6.0);
        h.record_action(Street::Flop, 2, Action::Raise, 4.0);
        assert!(h.is_donk_bet(Street::Flop, 2));
    }

    #[test]
    fn raises_since_last_hero_play_counts_only_trailing_raises() {
        let mut h = HistoryTracker::new();
        h.record_action(Street::Flop, 1, Action::Check, 0.0);
        h.record_action(Street::Flop, 2, Action::Raise, 4.0);
        h.record_action(Street::Flop, 3, Action::Raise, 12.0);
        assert_eq!(h.raises_since_last_hero_play(Street::Flop, 1), 2);
        assert_eq!(h.calls_since_last_hero_play(Street::Flop, 1), 0);
        assert_eq!(h.number_of_raises_on_flop(), 2);
    }

    #[test]
    fn reset_clears_all_streets() {
        let mut h = HistoryTracker::new();
        h.record_action(Street::Preflop, 1, Action::Raise, 6.0);
        h.reset();
        assert!(!h.is_three_bet(Street::Preflop));
        assert_eq!(h.aggressor_on(Street::Preflop), None);
    }
}
