//! Outs counting and the rule-of-4/rule-of-2 equity approximation derived
//! from it. This is a cheaper, explainable alternative to running the
//! Monte Carlo estimator, used by the policy engine when it only needs a
//! rough equity figure to size a call.

use crate::board::BoardAnalysis;
use crate::card::{Card, Street};

/// Additive outs composition for a hole+board holding, clamped to zero.
pub fn count_outs(hole: [Card; 2], board: &[Card], texture: &BoardAnalysis) -> f64 {
    let mut all = board.to_vec();
    all.push(hole[0]);
    all.push(hole[1]);

    let mut suit_counts = [0u8; 4];
    for c in &all {
        suit_counts[c.suit as usize] += 1;
    }
    let flush_draw = suit_counts.iter().any(|&c| c == 4);

    let mut ranks: Vec<u8> = all.iter().map(|c| c.rank.0).collect();
    if ranks.contains(&14) {
        ranks.push(1);
    }
    ranks.sort_unstable();
    ranks.dedup();

    let mut best_straight_outs = 0.0;
    for low in 1..=10i32 {
        let present: Vec<bool> = (low..low + 5).map(|r| ranks.contains(&(r as u8))).collect();
        let count = present.iter().filter(|&&b| b).count();
        if count == 4 {
            let missing_idx = present.iter().position(|&b| !b).unwrap();
            let outs = if missing_idx == 0 || missing_idx == 4 {
                if low == 10 {
                    // J-Q-K-A shape: blocked at the top, only a ten completes it.
                    4.0
                } else if low == 1 {
                    9.0 // wheel-inclusive open end
                } else {
                    8.0
                }
            } else {
                4.0
            };
            if outs > best_straight_outs {
                best_straight_outs = outs;
            }
        }
    }

    let board_ranks: Vec<u8> = board.iter().map(|c| c.rank.0).collect();
    let max_board = board_ranks.iter().copied().max();
    let overcards = max_board.map_or(0, |m| hole.iter().filter(|c| c.rank.0 > m).count());

    let mut outs = 0.0;

    if flush_draw {
        outs += if suit_counts.iter().any(|&c| c == 4) { 9.0 } else { 8.0 };
    }

    outs += best_straight_outs;

    outs += match overcards {
        0 => 0.0,
        1 => 1.0,
        2 => {
            if texture.connectedness > 0.5 {
                5.0
            } else {
                6.0
            }
        }
        _ => 2.0,
    };

    if board.len() == 3 {
        if !flush_draw && suit_counts.iter().any(|&c| c == 3) {
            let has_ace = hole.iter().any(|c| c.rank.0 == 14);
            outs += if has_ace { 1.5 } else { 1.0 };
        }
    }

    if texture.paired {
        outs -= if texture.trips_on_board { 10.0 } else { 3.5 };
    }
    if texture.flush_possible {
        outs -= 2.0;
    }
    if texture.straight_possible {
        outs -= 2.0;
    }

    outs.max(0.0)
}

/// Rule-of-4 (flop, two cards to come) / rule-of-2 (turn, one card to
/// come) equity approximation from an outs count. Zero preflop and river,
/// where there's nothing left to draw to.
pub fn equity_from_outs(outs: f64, street: Street) -> f64 {
    let equity = match street {
        Street::Flop => outs * 0.04,
        Street::Turn => outs * 0.02,
        Street::Preflop | Street::River => 0.0,
    };
    equity.min(0.95)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::analyze_board;

    fn c(s: &str) -> Card {
        Card::parse(s).unwrap()
    }

    #[test]
    fn flush_draw_on_dry_board_counts_eight_or_nine_outs() {
        let hole = [c("Ah"), c("Kh")];
        let board = [c("Qh"), c("7d"), c("2h")];
        let texture = analyze_board(&board);
        let outs = count_outs(hole, &board, &texture);
        assert!(outs >= 8.0);
    }

    #[test]
    fn outs_never_go_negative() {
        let hole = [c("2c"), c("3d")];
        let board = [c("7h"), c("7d"), c("7s")];
        let texture = analyze_board(&board);
        let outs = count_outs(hole, &board, &texture);
        assert!(outs >= 0.0);
    }

    #[test]
    fn rule_of_four_doubles_rule_of_two_for_same_outs() {
        assert_eq!(equity_from_outs(9.0, Street::Flop), 0.36);
        assert_eq!(equity_from_outs(9.0, Street::Turn), 0.18);
    }

    #[test]
    fn preflop_and_river_have_no_outs_equity() {
        assert_eq!(equity_from_outs(9.0, Street::Preflop), 0.0);
        assert_eq!(equity_from_outs(9.0, Street::River), 0.0);
    }

    #[test]
    fn equity_from_outs_is_capped() {
        assert_eq!(equity_from_outs(30.0, Street::Flop), 0.95);
    }
}
