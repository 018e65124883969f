//! Opponent tendency tracking: raw counters only. Nothing in this module is
//! read by [`crate::policy`] — it's a hook for callers who want to layer
//! their own exploitative adjustments on top of the rule-based decisions.

use serde::{Deserialize, Serialize};

use crate::card::Action;

/// Accumulated action counts for one seat across however many hands the
/// caller has fed it.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct PlayerStats {
    hands_observed: u32,
    voluntarily_put_money_in: u32,
    preflop_raises: u32,
    postflop_aggressive_actions: u32,
    postflop_passive_actions: u32,
}

impl PlayerStats {
    pub fn new() -> Self {
        PlayerStats::default()
    }

    /// Call once per hand this player was dealt in.
    pub fn record_hand_observed(&mut self) {
        self.hands_observed += 1;
    }

    pub fn record_preflop_action(&mut self, action: Action) {
        match action {
            Action::Call | Action::Raise | Action::AllIn => {
                self.voluntarily_put_money_in += 1;
            }
            _ => {}
        }
        if matches!(action, Action::Raise | Action::AllIn) {
            self.preflop_raises += 1;
        }
    }

    pub fn record_postflop_action(&mut self, action: Action) {
        match action {
            Action::Raise | Action::AllIn => self.postflop_aggressive_actions += 1,
            Action::Call => self.postflop_passive_actions += 1,
            _ => {}
        }
    }

    /// Voluntarily-put-money-in-pot percentage.
    pub fn vpip(&self) -> f64 {
        if self.hands_observed == 0 {
            return 0.0;
        }
        self.voluntarily_put_money_in as f64 / self.hands_observed as f64
    }

    /// Preflop-raise percentage.
    pub fn pfr(&self) -> f64 {
        if self.hands_observed == 0 {
            return 0.0;
        }
        self.preflop_raises as f64 / self.hands_observed as f64
    }

    /// Postflop aggression factor: aggressive actions per passive action.
    pub fn af(&self) -> f64 {
        if self.postflop_passive_actions == 0 {
            return self.postflop_aggressive_actions as f64;
        }
        self.postflop_aggressive_actions as f64 / self.postflop_passive_actions as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vpip_and_pfr_track_independently() {
        let mut stats = PlayerStats::new();
        stats.record_hand_observed();
        stats.record_preflop_action(Action::Call);
        assert_eq!(stats.vpip(), 1.0);
        assert_eq!(stats.pfr(), 0.0);
    }

    #[test]
    fn af_is_aggressive_when_no_passive_actions_recorded() {
        let mut stats = PlayerStats::new();
        stats.record_postflop_action(Action::Raise);
        assert_eq!(stats.af(), 1.0);
    }

    #[test]
    fn fresh_stats_report_zero() {
        let stats = PlayerStats::new();
        assert_eq!(stats.vpip(), 0.0);
        assert_eq!(stats.pfr(), 0.0);
        assert_eq!(stats.af(), 0.0);
    }
}
