//! Monte Carlo equity estimation: deal out random opponents and the
//! remaining board, showdown against the evaluator, and average the
//! result. `Pr(win) + 0.5 * Pr(tie)` is the reported equity.

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::card::{Card, Deck, Street};
use crate::evaluator;
use crate::policy::PolicyConfig;

/// Parameters for a single equity estimate. `simulations` and
/// `opponent_count` are clamped to sane defaults by [`estimate`] rather than
/// erroring, since equity estimation has no caller-facing way to report a
/// bad parameter without disrupting a decision in progress.
#[derive(Debug, Clone, Copy)]
pub struct EquityRequest {
    pub hole: [Card; 2],
    pub board: Vec<Card>,
    pub opponent_count: usize,
    pub simulations: u32,
    pub seed: u64,
}

impl EquityRequest {
    pub fn new(hole: [Card; 2], board: Vec<Card>) -> Self {
        EquityRequest {
            hole,
            board,
            opponent_count: PolicyConfig::default().default_opponent_count,
            simulations: PolicyConfig::default().default_monte_carlo_simulations,
            seed: 0,
        }
    }

    pub fn with_opponents(mut self, n: usize) -> Self {
        self.opponent_count = n;
        self
    }

    pub fn with_simulations(mut self, n: u32) -> Self {
        self.simulations = n;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }
}

/// `Pr(win) + 0.5 * Pr(tie)`, averaged over the requested number of random
/// trials.
pub fn estimate(req: &EquityRequest) -> f64 {
    let config = PolicyConfig::default();
    let opponent_count = req.opponent_count.clamp(1, 8);
    let simulations = if req.simulations == 0 {
        config.default_monte_carlo_simulations
    } else {
        req.simulations
    };

    log::trace!(
        "equity estimate: hole={:?} board={:?} opponents={} sims={}",
        req.hole,
        req.board,
        opponent_count,
        simulations
    );

    let mut rng = StdRng::seed_from_u64(req.seed);
    let mut win = 0.0f64;
    let mut tie = 0.0f64;

    for _ in 0..simulations {
        let mut exclude = req.board.clone();
        exclude.push(req.hole[0]);
        exclude.push(req.hole[1]);
        let mut deck = Deck::new_excluding(&mut rng, &exclude);

        let opponents: Vec<[Card; 2]> = (0..opponent_count)
            .map(|_| {
                let dealt = deck.deal_n(2);
                [dealt[0], dealt[1]]
            })
            .collect();

        let mut board = req.board.clone();
        let remaining_board = Street::River.community_card_count() - board.len();
        board.extend(deck.deal_n(remaining_board));

        let hero_score = evaluator::numeric_score(req.hole, &board);
        let best_opponent_score = opponents
            .iter()
            .map(|&hole| evaluator::numeric_score(hole, &board))
            .max()
            .unwrap_or(i64::MIN);

        if hero_score > best_opponent_score {
            win += 1.0;
        } else if hero_score == best_opponent_score {
            tie += 1.0;
        }
    }

    let n = simulations as f64;
    let equity = win / n + 0.5 * tie / n;
    log::debug!("equity estimate result: {equity:.4}");
    equity
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c(s: &str) -> Card {
        Card::parse(s).unwrap()
    }

    #[test]
    fn pocket_aces_beats_random_hand_most_of_the_time() {
        let req = EquityRequest::new([c("Ah"), c("Ad")], vec![])
            .with_opponents(1)
            .with_simulations(300)
            .with_seed(1);
        let eq = estimate(&req);
        assert!(eq > 0.7, "expected AA to be a heavy favorite, got {eq}");
    }

    #[test]
    fn equity_is_deterministic_for_a_fixed_seed() {
        let req = EquityRequest::new([c("Kh"), c("Kd")], vec![c("2c"), c("7d"), c("9s")])
            .with_opponents(2)
            .with_simulations(200)
            .with_seed(55);
        assert_eq!(estimate(&req), estimate(&req));
    }

    #[test]
    fn zero_simulations_falls_back_to_default() {
        let req = EquityRequest::new([c("2c"), c("7d")], vec![]).with_simulations(0);
        let eq = estimate(&req);
        assert!((0.0..=1.0).contains(&eq));
    }

    #[test]
    fn opponent_count_out_of_range_is_clamped() {
        let req = EquityRequest::new([c("Ah"), c("Ad")], vec![])
            .with_opponents(20)
            .with_simulations(50)
            .with_seed(3);
        let eq = estimate(&req);
        assert!((0.0..=1.0).contains(&eq));
    }

    #[test]
    fn river_hand_with_full_board_still_estimates() {
        let board = vec![c("2c"), c("7d"), c("9s"), c("Jh"), c("4d")];
        let req = EquityRequest::new([c("Ah"), c("Ad")], board).with_simulations(50);
        let eq = estimate(&req);
        assert!((0.0..=1.0).contains(&eq));
    }
}
