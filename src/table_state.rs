//! Aggregate table state: seats, stacks, the board, and the betting
//! history accumulated so far this hand. This is the composition root the
//! policy engine reads from — it owns a [`HistoryTracker`], delegates
//! texture reads to [`crate::board`], and exposes the position/SPR query
//! surface the decision routines lean on.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::card::{Action, Card, Position, Street};
use crate::error::PokerError;
use crate::history::HistoryTracker;

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PlayerState {
    pub seat: u8,
    pub position: Position,
    pub stack: f64,
    pub in_hand: bool,
    pub last_action: Option<Action>,
}

/// SPR buckets used to size bets and judge commitment. Thresholds:
/// `<= 3` very low, `<= 6` low, `<= 10` medium, `<= 15` high, else very high.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SprCategory {
    VeryLow,
    Low,
    Medium,
    High,
    VeryHigh,
}

impl SprCategory {
    pub fn from_spr(spr: f64) -> Self {
        if spr <= 3.0 {
            SprCategory::VeryLow
        } else if spr <= 6.0 {
            SprCategory::Low
        } else if spr <= 10.0 {
            SprCategory::Medium
        } else if spr <= 15.0 {
            SprCategory::High
        } else {
            SprCategory::VeryHigh
        }
    }

    /// Bet-size-to-pot-commitment ratio at or above which a bet this size
    /// should be treated as pot-committing.
    pub fn commitment_threshold(self) -> f64 {
        match self {
            SprCategory::VeryLow => 0.5,
            SprCategory::Low => 0.33,
            SprCategory::Medium => 0.25,
            SprCategory::High => 0.2,
            SprCategory::VeryHigh => 0.15,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableState {
    players: HashMap<u8, PlayerState>,
    hero_seat: u8,
    button_seat: u8,
    big_blind: f64,
    pub hero_cards: [Card; 2],
    pub community_cards: Vec<Card>,
    pub current_street: Street,
    pub pot_size: f64,
    pub current_bet: f64,
    pub min_raise: f64,
    #[serde(skip)]
    history: HistoryTracker,
}

impl TableState {
    pub fn new(hero_seat: u8, button_seat: u8, hero_cards: [Card; 2], big_blind: f64) -> Self {
        TableState {
            players: HashMap::new(),
            hero_seat,
            button_seat,
            big_blind,
            hero_cards,
            community_cards: Vec::new(),
            current_street: Street::Preflop,
            pot_size: big_blind * 1.5,
            current_bet: big_blind,
            min_raise: big_blind * 2.0,
            history: HistoryTracker::new(),
        }
    }

    pub fn seat_player(&mut self, seat: u8, position: Position, stack: f64) {
        self.players.insert(
            seat,
            PlayerState {
                seat,
                position,
                stack,
                in_hand: true,
                last_action: None,
            },
        );
    }

    pub fn total_players(&self) -> usize {
        self.players.len()
    }

    /// Advance to `street`, replacing the community cards. Fails if the
    /// number of cards doesn't match the street, or the street moves
    /// backwards.
    pub fn deal_street(&mut self, street: Street, community_cards: Vec<Card>) -> Result<(), PokerError> {
        if street < self.current_street {
            return Err(PokerError::InconsistentState(format!(
                "cannot move from {} back to {}",
                self.current_street, street
            )));
        }
        if community_cards.len() != street.community_card_count() {
            return Err(PokerError::InconsistentState(format!(
                "{street} expects {} community cards, got {}",
                street.community_card_count(),
                community_cards.len()
            )));
        }
        log::debug!("table state: advancing to {street}");
        self.current_street = street;
        self.community_cards = community_cards;
        self.current_bet = 0.0;
        Ok(())
    }

    /// Record a player's action: updates the pot, the current bet to call,
    /// and the betting history used to derive cbet/check-raise/etc flags.
    pub fn record_action(&mut self, seat: u8, action: Action, amount: f64) -> Result<(), PokerError> {
        let player = self
            .players
            .get_mut(&seat)
            .ok_or_else(|| PokerError::InconsistentState(format!("unknown seat {seat}")))?;

        log::trace!("table state: seat {seat} {action} {amount}");

        match action {
            Action::Fold => player.in_hand = false,
            Action::Check => {}
            Action::Call => self.pot_size += self.current_bet,
            Action::Raise | Action::AllIn => {
                self.pot_size += amount;
                self.current_bet = amount;
                self.min_raise = amount * 2.0;
            }
        }
        player.last_action = Some(action);
        player.stack -= match action {
            Action::Call => self.current_bet.min(player.stack),
            Action::Raise | Action::AllIn => amount.min(player.stack),
            _ => 0.0,
        };

        self.history.record_action(self.current_street, seat, action, amount);
        Ok(())
    }

    pub fn start_new_hand(&mut self) {
        self.history.reset();
        self.current_street = Street::Preflop;
        self.community_cards.clear();
        for p in self.players.values_mut() {
            p.in_hand = true;
            p.last_action = None;
        }
    }

    pub fn history(&self) -> &HistoryTracker {
        &self.history
    }

    pub fn hero_position(&self) -> Position {
        self.players
            .get(&self.hero_seat)
            .map(|p| p.position)
            .unwrap_or(Position::Utg)
    }

    pub fn get_pot_odds(&self, to_call: f64) -> f64 {
        if to_call <= 0.0 {
            return 0.0;
        }
        to_call / (self.pot_size + to_call)
    }

    /// The smallest remaining stack among players still in the hand
    /// (hero included) — the most either side can actually win or lose.
    pub fn effective_stack(&self) -> f64 {
        self.players
            .values()
            .filter(|p| p.in_hand)
            .map(|p| p.stack)
            .fold(f64::INFINITY, f64::min)
    }

    pub fn effective_stack_in_bb(&self) -> f64 {
        if self.big_blind <= 0.0 {
            return f64::INFINITY;
        }
        self.effective_stack() / self.big_blind
    }

    pub fn effective_spr(&self) -> f64 {
        if self.pot_size <= 0.0 {
            return f64::INFINITY;
        }
        self.effective_stack() / self.pot_size
    }

    pub fn spr_category(&self) -> SprCategory {
        SprCategory::from_spr(self.effective_spr())
    }

    pub fn is_short_stacked(&self) -> bool {
        self.effective_stack_in_bb() <= 20.0
    }

    pub fn is_deep_stacked(&self) -> bool {
        self.effective_stack_in_bb() >= 80.0
    }

    pub fn is_committed(&self, bet_size: f64) -> bool {
        if self.pot_size <= 0.0 {
            return false;
        }
        bet_size / self.pot_size >= self.spr_category().commitment_threshold()
    }

    // --- position queries -------------------------------------------------

    pub fn is_early_position(&self) -> bool {
        self.hero_position().is_early()
    }

    pub fn is_late_position(&self) -> bool {
        self.hero_position().is_late(self.total_players())
    }

    pub fn is_middle_position(&self) -> bool {
        !self.is_early_position() && !self.is_late_position() && !self.hero_position().is_blind()
    }

    pub fn is_in_the_blinds(&self) -> bool {
        self.hero_position().is_blind()
    }

    pub fn is_in_position(&self) -> bool {
        if self.total_players() == 3 {
            matches!(self.hero_position(), Position::Button | Position::SmallBlind)
        } else {
            matches!(self.hero_position(), Position::Button | Position::Co)
        }
    }

    pub fn is_in_position_vs(&self, other_seat: u8) -> bool {
        match self.players.get(&other_seat) {
            Some(opp) => self.hero_seat > opp.seat || (self.button_seat == self.hero_seat && opp.seat != self.hero_seat),
            None => self.is_in_position(),
        }
    }

    pub fn is_first_to_act(&self) -> bool {
        self.history
            .aggressor_on(self.current_street)
            .map_or(true, |_| false)
    }

    pub fn is_last_to_act(&self) -> bool {
        self.hero_seat == self.button_seat
    }

    pub fn get_first_caller_position(&self) -> Option<Position> {
        self.players
            .values()
            .filter(|p| matches!(p.last_action, Some(Action::Call)))
            .min_by_key(|p| p.seat)
            .map(|p| p.position)
    }

    pub fn get_last_raiser_position(&self) -> Option<Position> {
        let seat = self.history.aggressor_on(self.current_street)?;
        self.players.get(&seat).map(|p| p.position)
    }

    pub fn button_seat(&self) -> u8 {
        self.button_seat
    }

    pub fn hero_seat(&self) -> u8 {
        self.hero_seat
    }

    pub fn is_facing_bet(&self) -> bool {
        self.current_bet > 0.0
    }

    pub fn is_facing_raise(&self) -> bool {
        self.history.raises_this_street(self.current_street) > 0
    }

    pub fn multiple_raisers(&self) -> bool {
        self.history.raises_this_street(self.current_street) >= 2
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::{Card, Rank, Suit};

    fn new_heads_up() -> TableState {
        let mut t = TableState::new(1, 1, [Card::new(Rank(14), Suit::Hearts), Card::new(Rank(13), Suit::Hearts)], 2.0);
        t.seat_player(1, Position::Button, 200.0);
        t.seat_player(2, Position::BigBlind, 200.0);
        t
    }

    #[test]
    fn pot_odds_are_zero_with_nothing_to_call() {
        let t = new_heads_up();
        assert_eq!(t.get_pot_odds(0.0), 0.0);
    }

    #[test]
    fn effective_stack_is_the_smaller_of_the_two() {
        let mut t = new_heads_up();
        t.seat_player(2, Position::BigBlind, 50.0);
        assert_eq!(t.effective_stack(), 50.0);
    }

    #[test]
    fn record_action_updates_pot_and_bet() {
        let mut t = new_heads_up();
        t.record_action(1, Action::Raise, 6.0).unwrap();
        assert_eq!(t.current_bet, 6.0);
        assert!(t.pot_size > 3.0);
    }

    #[test]
    fn deal_street_rejects_wrong_card_count() {
        let mut t = new_heads_up();
        let bad = vec![Card::new(Rank(2), Suit::Clubs)];
        assert!(t.deal_street(Street::Flop, bad).is_err());
    }

    #[test]
    fn spr_category_buckets_correctly() {
        assert_eq!(SprCategory::from_spr(2.0), SprCategory::VeryLow);
        assert_eq!(SprCategory::from_spr(9.0), SprCategory::Medium);
        assert_eq!(SprCategory::from_spr(50.0), SprCategory::VeryHigh);
    }
}
