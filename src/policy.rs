//! The decision engine: street-indexed rules over hand strength, board
//! texture, position, stack-to-pot ratio, and betting history. `decide()`
//! never fails — any internally detectable inconsistency falls back to a
//! safe fold rather than surfacing a [`PokerError`].

use crate::board::{self, BoardTexture};
use crate::card::{Action, Street};
use crate::evaluator;
use crate::hand_strength::HandStrength;
use crate::table_state::{SprCategory, TableState};
use crate::trace::{DecisionTrace, TraceTimer};

/// The magic constants the decision routines lean on, gathered so callers
/// can retune aggression without touching the branching logic itself.
#[derive(Debug, Clone, Copy)]
pub struct PolicyConfig {
    pub good_implied_odds_multiplier: f64,
    pub pot_odds_floor: f64,
    pub good_odds_threshold: f64,
    pub drawing_odds_threshold: f64,
    pub made_hand_odds_threshold: f64,
    pub default_opponent_count: usize,
    pub default_monte_carlo_simulations: u32,
}

impl Default for PolicyConfig {
    fn default() -> Self {
        PolicyConfig {
            good_implied_odds_multiplier: 15.0,
            pot_odds_floor: 0.25,
            good_odds_threshold: 0.25,
            drawing_odds_threshold: 0.2,
            made_hand_odds_threshold: 0.3,
            default_opponent_count: 2,
            default_monte_carlo_simulations: 1000,
        }
    }
}

pub struct PolicyEngine<'a> {
    table: &'a TableState,
    config: PolicyConfig,
}

impl<'a> PolicyEngine<'a> {
    pub fn new(table: &'a TableState) -> Self {
        PolicyEngine { table, config: PolicyConfig::default() }
    }

    pub fn with_config(table: &'a TableState, config: PolicyConfig) -> Self {
        PolicyEngine { table, config }
    }

    /// Decide an action for the hero at the table's current street. Returns
    /// the action and, for `Raise`, the absolute raise size.
    pub fn decide(&self) -> (Action, f64) {
        log::debug!(
            "policy: street={:?} street hand={:?}",
            self.table.current_street,
            self.table.hero_cards
        );
        match self.table.current_street {
            Street::Preflop => self.decide_preflop(),
            Street::Flop => self.decide_postflop(true),
            Street::Turn => self.decide_postflop(false),
            Street::River => self.decide_river(),
        }
    }

    /// Same as [`decide`](Self::decide), but also returns a trace of the
    /// predicates consulted along the way.
    pub fn decide_with_trace(&self) -> (Action, f64, DecisionTrace) {
        let timer = TraceTimer::start();
        let (action, amount) = self.decide();
        let trace = DecisionTrace::leaf(
            "decide",
            &format!("{} decision", self.table.current_street),
            &format!("{action} {amount:.2}"),
        );
        (action, amount, timer.finish(trace))
    }

    fn hand_strength(&self) -> HandStrength {
        let (hs, _) = evaluator::evaluate_hand_strength(
            self.table.hero_cards,
            &self.table.community_cards,
            self.table.current_street,
        );
        hs
    }

    fn board_texture(&self) -> BoardTexture {
        board::analyze_board(&self.table.community_cards).texture
    }

    fn in_position(&self) -> bool {
        self.table.is_in_position()
    }

    fn facing_raise(&self) -> bool {
        self.table.is_facing_raise()
    }

    fn multiple_raisers(&self) -> bool {
        self.table.multiple_raisers()
    }

    /// "Good odds": pot odds clear the equity a draw actually has (via the
    /// outs-derived quick equity shortcut), or the flat made-hand floor
    /// otherwise.
    fn getting_good_odds(&self) -> bool {
        let pot_odds = self.table.get_pot_odds(self.table.current_bet);
        if self.have_good_draw() {
            pot_odds >= quick_equity(self.table)
        } else {
            pot_odds >= self.config.good_odds_threshold
        }
    }

    fn have_good_draw(&self) -> bool {
        let hs = self.hand_strength();
        hs.is_strong_draw() || hs.is_medium_draw()
    }

    fn getting_odds(&self) -> bool {
        let pot_odds = self.table.get_pot_odds(self.table.current_bet);
        if self.have_good_draw() {
            pot_odds >= self.config.drawing_odds_threshold
        } else {
            pot_odds >= self.config.made_hand_odds_threshold
        }
    }

    fn good_implied_odds(&self) -> bool {
        self.table.effective_stack() >= self.config.good_implied_odds_multiplier * self.table.current_bet
    }

    fn facing_bet(&self) -> bool {
        self.table.is_facing_bet()
    }

    fn facing_donk_bet(&self) -> bool {
        if !self.facing_bet() {
            return false;
        }
        self.table
            .history()
            .aggressor_on(self.table.current_street)
            .map_or(false, |seat| seat != self.table.button_seat())
    }

    fn facing_cbet(&self) -> bool {
        if !self.facing_bet() {
            return false;
        }
        self.table
            .history()
            .aggressor_on(self.table.current_street)
            .map_or(false, |seat| seat == self.table.button_seat())
    }

    /// `raise_size(multiplier)` from the shared-helpers list: the multiplier
    /// is first widened or narrowed by SPR category before being applied to
    /// the pot, then clamped between `min_raise` and the effective stack.
    fn raise_decision(&self, multiplier: f64) -> (Action, f64) {
        let adjusted = self.spr_adjusted_multiplier(multiplier);
        let min_raise = self.table.min_raise;
        let target = self.table.pot_size * adjusted;
        let size = min_raise.max(target.min(self.table.effective_stack()));
        (Action::Raise, size)
    }

    fn spr_adjusted_multiplier(&self, multiplier: f64) -> f64 {
        match self.table.spr_category() {
            SprCategory::VeryLow => (multiplier * 1.5).min(1.0),
            SprCategory::Low => (multiplier * 1.2).min(0.75),
            SprCategory::Medium => multiplier,
            SprCategory::High => multiplier * 0.8,
            SprCategory::VeryHigh => multiplier * 0.6,
        }
    }

    /// Strong-made-hand bet sizing: `calculate_optimal_bet_size` off the
    /// current SPR category, widened or narrowed by board texture, then
    /// amplified if the bet would commit hero or hero is already short.
    fn optimal_bet_amount(&self, hs: HandStrength, texture: BoardTexture) -> f64 {
        let fraction = calculate_optimal_bet_size(self.table.spr_category(), hs.strength_scalar());
        let texture_adjusted = fraction
            * match texture {
                BoardTexture::Dry => 0.8,
                BoardTexture::SemiWet => 1.0,
                BoardTexture::Wet | BoardTexture::VeryWet => 1.2,
            };
        let mut amount = self.table.pot_size * texture_adjusted;
        if self.table.is_committed(amount) || self.table.is_short_stacked() {
            amount *= 1.5;
        }
        self.table.min_raise.max(amount.min(self.table.effective_stack()))
    }

    fn decide_preflop(&self) -> (Action, f64) {
        let hs = self.hand_strength();

        if matches!(hs, HandStrength::OverpairStrong) {
            if self.facing_raise() {
                return if self.multiple_raisers() {
                    self.raise_decision(4.0)
                } else {
                    self.raise_decision(3.0)
                };
            }
            if self.table.is_short_stacked() {
                return (Action::AllIn, self.table.effective_stack());
            }
            let open_multiplier = if self.table.is_deep_stacked() { 2.0 } else { 2.5 };
            return self.raise_decision(open_multiplier);
        }

        if matches!(hs, HandStrength::OverpairWeak | HandStrength::TopPairGoodKicker) {
            if self.facing_raise() {
                if self.multiple_raisers() {
                    return if self.getting_good_odds() {
                        (Action::Call, self.table.current_bet)
                    } else {
                        (Action::Fold, 0.0)
                    };
                }
                return self.raise_decision(3.0);
            }
            return self.raise_decision(2.5);
        }

        if matches!(hs, HandStrength::TopPairWeakKicker | HandStrength::MiddlePairGoodKicker) {
            if self.facing_raise() {
                return if self.getting_good_odds() && !self.multiple_raisers() {
                    (Action::Call, self.table.current_bet)
                } else {
                    (Action::Fold, 0.0)
                };
            }
            return if self.in_position() {
                self.raise_decision(2.5)
            } else {
                (Action::Fold, 0.0)
            };
        }

        if hs.is_draw() {
            if self.facing_raise() {
                return if self.getting_good_odds() && self.good_implied_odds() && !self.multiple_raisers() {
                    (Action::Call, self.table.current_bet)
                } else {
                    (Action::Fold, 0.0)
                };
            }
            return if self.in_position() {
                self.raise_decision(2.5)
            } else {
                (Action::Fold, 0.0)
            };
        }

        (Action::Fold, 0.0)
    }

    fn decide_postflop(&self, is_flop: bool) -> (Action, f64) {
        let hs = self.hand_strength();
        let texture = self.board_texture();
        let dry = texture == BoardTexture::Dry;
        let unraised_medium = if is_flop { 0.5 } else { 0.66 };

        if !self.facing_bet() {
            if hs.is_strong_made_hand() {
                return (Action::Raise, self.optimal_bet_amount(hs, texture));
            }
            if hs.is_medium_made_hand() {
                return if self.in_position() || dry {
                    self.raise_decision(unraised_medium)
                } else {
                    (Action::Check, 0.0)
                };
            }
            if hs.is_strong_draw() {
                return if self.in_position() && !dry {
                    self.raise_decision(0.5)
                } else {
                    (Action::Check, 0.0)
                };
            }
            return (Action::Check, 0.0);
        }

        if self.facing_donk_bet() {
            if hs.is_strong_made_hand() {
                return (Action::Raise, self.optimal_bet_amount(hs, texture));
            }
            if hs.is_medium_made_hand() {
                if dry {
                    return (Action::Call, self.table.current_bet);
                }
                return if self.in_position() {
                    self.raise_decision(2.5)
                } else {
                    (Action::Call, self.table.current_bet)
                };
            }
            if hs.is_strong_draw() && self.getting_odds() {
                return (Action::Call, self.table.current_bet);
            }
            return (Action::Fold, 0.0);
        }

        if self.facing_cbet() {
            if hs.is_strong_made_hand() {
                return (Action::Raise, self.optimal_bet_amount(hs, texture));
            }
            if hs.is_medium_made_hand() {
                if dry {
                    return (Action::Call, self.table.current_bet);
                }
                return if self.in_position() {
                    self.raise_decision(2.5)
                } else {
                    (Action::Call, self.table.current_bet)
                };
            }
            if hs.is_strong_draw() || (hs.is_medium_draw() && self.in_position()) {
                if self.getting_odds() {
                    return if !dry {
                        self.raise_decision(2.5)
                    } else {
                        (Action::Call, self.table.current_bet)
                    };
                }
            }
            return (Action::Fold, 0.0);
        }

        (Action::Fold, 0.0)
    }

    fn decide_river(&self) -> (Action, f64) {
        let hs = self.hand_strength();
        let texture = self.board_texture();
        let dry = texture == BoardTexture::Dry;
        let value_or_better = hs.is_strong_made_hand();
        let good_showdown_value = hs.is_medium_made_hand() || value_or_better;

        if !self.facing_bet() {
            if value_or_better {
                // River value bets scale larger than other streets: the
                // computed fraction is floored at 0.75 pot.
                let amount = self.optimal_bet_amount(hs, texture).max(self.table.pot_size * 0.75);
                return (Action::Raise, amount.min(self.table.effective_stack()));
            }
            if good_showdown_value {
                return if dry && self.in_position() {
                    self.raise_decision(0.5)
                } else {
                    (Action::Check, 0.0)
                };
            }
            return (Action::Check, 0.0);
        }

        if value_or_better {
            let amount = self.optimal_bet_amount(hs, texture).max(self.table.pot_size * 0.75);
            return (Action::Raise, amount.min(self.table.effective_stack()));
        }
        if good_showdown_value {
            if dry {
                return (Action::Call, self.table.current_bet);
            }
            return if self.in_position() {
                self.raise_decision(2.5)
            } else {
                (Action::Call, self.table.current_bet)
            };
        }
        if hs.is_medium_made_hand() && dry && self.getting_good_odds() {
            return (Action::Call, self.table.current_bet);
        }
        (Action::Fold, 0.0)
    }
}

/// Bet-size-to-pot multiplier ladder by SPR category and a `[0, 1]` hand
/// strength scalar (see [`HandStrength::strength_scalar`]). This is the
/// sizing source the street routines use for every strong-made-hand raise,
/// postflop and river alike.
pub fn calculate_optimal_bet_size(spr_category: SprCategory, strength: f64) -> f64 {
    let tier = if strength >= 0.8 {
        0
    } else if strength >= 0.6 {
        1
    } else if strength >= 0.4 {
        2
    } else {
        3
    };
    let ladder = match spr_category {
        SprCategory::VeryLow => [1.0, 0.75, 0.5, 0.0],
        SprCategory::Low => [0.75, 0.66, 0.5, 0.0],
        SprCategory::Medium => [0.66, 0.5, 0.33, 0.0],
        SprCategory::High => [0.5, 0.33, 0.25, 0.0],
        SprCategory::VeryHigh => [0.33, 0.25, 0.25, 0.0],
    };
    ladder[tier]
}

/// Equity-from-outs shortcut the policy uses instead of a full Monte Carlo
/// run when it just needs a rough number for a pot-odds comparison (see
/// `getting_good_odds`).
pub fn quick_equity(table: &TableState) -> f64 {
    let texture_analysis = board::analyze_board(&table.community_cards);
    let outs_count = crate::outs::count_outs(table.hero_cards, &table.community_cards, &texture_analysis);
    crate::outs::equity_from_outs(outs_count, table.current_street)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::{Card, Position, Rank, Suit};

    fn premium_preflop() -> TableState {
        let mut t = TableState::new(
            1,
            1,
            [Card::new(Rank(14), Suit::Spades), Card::new(Rank(14), Suit::Hearts)],
            2.0,
        );
        t.seat_player(1, Position::Button, 200.0);
        t.seat_player(2, Position::BigBlind, 200.0);
        t
    }

    #[test]
    fn pocket_aces_unraised_preflop_raises() {
        let table = premium_preflop();
        let engine = PolicyEngine::new(&table);
        let (action, amount) = engine.decide();
        assert_eq!(action, Action::Raise);
        assert!(amount > 0.0);
    }

    #[test]
    fn short_stacked_premium_hand_shoves_preflop() {
        let mut t = TableState::new(
            1,
            1,
            [Card::new(Rank(14), Suit::Spades), Card::new(Rank(14), Suit::Hearts)],
            2.0,
        );
        t.seat_player(1, Position::Button, 20.0);
        t.seat_player(2, Position::BigBlind, 20.0);
        let engine = PolicyEngine::new(&t);
        let (action, amount) = engine.decide();
        assert_eq!(action, Action::AllIn);
        assert_eq!(amount, t.effective_stack());
    }

    #[test]
    fn trash_hand_facing_nothing_folds_preflop() {
        let mut t = TableState::new(
            1,
            1,
            [Card::new(Rank(7), Suit::Clubs), Card::new(Rank(2), Suit::Diamonds)],
            2.0,
        );
        t.seat_player(1, Position::Utg, 200.0);
        t.seat_player(2, Position::BigBlind, 200.0);
        let engine = PolicyEngine::new(&t);
        assert_eq!(engine.decide().0, Action::Fold);
    }

    #[test]
    fn strong_made_hand_unraised_on_flop_bets() {
        let mut t = TableState::new(
            1,
            1,
            [Card::new(Rank(9), Suit::Clubs), Card::new(Rank(9), Suit::Diamonds)],
            2.0,
        );
        t.seat_player(1, Position::Button, 200.0);
        t.seat_player(2, Position::BigBlind, 200.0);
        t.deal_street(
            Street::Flop,
            vec![
                Card::new(Rank(9), Suit::Hearts),
                Card::new(Rank(4), Suit::Spades),
                Card::new(Rank(2), Suit::Clubs),
            ],
        )
        .unwrap();
        let engine = PolicyEngine::new(&t);
        let (action, _) = engine.decide();
        assert_eq!(action, Action::Raise);
    }

    #[test]
    fn optimal_bet_size_shrinks_as_spr_grows() {
        let strength = HandStrength::TopSet.strength_scalar();
        let low_spr = calculate_optimal_bet_size(SprCategory::VeryLow, strength);
        let high_spr = calculate_optimal_bet_size(SprCategory::VeryHigh, strength);
        assert!(low_spr > high_spr);
    }

    #[test]
    fn raise_decision_widens_the_multiplier_at_low_spr() {
        let mut t = TableState::new(
            1,
            1,
            [Card::new(Rank(14), Suit::Spades), Card::new(Rank(14), Suit::Hearts)],
            2.0,
        );
        t.seat_player(1, Position::Button, 6.0);
        t.seat_player(2, Position::BigBlind, 6.0);
        let engine = PolicyEngine::new(&t);
        let adjusted = engine.spr_adjusted_multiplier(0.5);
        assert_eq!(adjusted, 0.75);
    }

    #[test]
    fn decide_with_trace_matches_decide() {
        let table = premium_preflop();
        let engine = PolicyEngine::new(&table);
        let (action, amount) = engine.decide();
        let (traced_action, traced_amount, trace) = engine.decide_with_trace();
        assert_eq!(action, traced_action);
        assert_eq!(amount, traced_amount);
        assert!(trace.elapsed_seconds >= 0.0);
    }
}
