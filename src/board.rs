//! Board texture classification: how dangerous is this board for a made
//! hand, independent of any particular hero holding.

use serde::{Deserialize, Serialize};

use crate::card::Card;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BoardTexture {
    Dry,
    SemiWet,
    Wet,
    VeryWet,
}

/// The component scores behind a texture classification, exposed so the
/// outs calculator and policy engine can reuse individual facts (e.g.
/// "is the board paired") without recomputing them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoardAnalysis {
    pub texture: BoardTexture,
    pub danger_score: f64,
    pub paired: bool,
    pub trips_on_board: bool,
    pub two_pair_on_board: bool,
    pub full_house_on_board: bool,
    pub quads_on_board: bool,
    pub flush_possible: bool,
    pub straight_possible: bool,
    pub multiple_straight_draws_possible: bool,
    pub connectedness: f64,
    pub is_monotone: bool,
    pub is_two_tone: bool,
    pub is_rainbow: bool,
    pub is_connected: bool,
    pub is_very_connected: bool,
    pub flush_draw_possible: bool,
    pub open_ended_straight_draw_possible: bool,
    pub gut_shot_straight_draw_possible: bool,
    pub number_of_straight_possibilities: usize,
}

fn rank_counts(board: &[Card]) -> [u8; 15] {
    let mut counts = [0u8; 15];
    for c in board {
        counts[c.rank.0 as usize] += 1;
    }
    counts
}

fn suit_counts(board: &[Card]) -> [u8; 4] {
    let mut counts = [0u8; 4];
    for c in board {
        counts[c.suit as usize] += 1;
    }
    counts
}

fn distinct_sorted_ranks(board: &[Card]) -> Vec<u8> {
    let mut ranks: Vec<u8> = board.iter().map(|c| c.rank.0).collect();
    if ranks.contains(&14) {
        ranks.push(1);
    }
    ranks.sort_unstable();
    ranks.dedup();
    ranks
}

/// How tightly packed the board ranks are: 1.0 for three cards within a
/// 4-rank span (e.g. 9-8-7), scaling down as the span widens.
fn connectedness(board: &[Card]) -> f64 {
    let mut ranks: Vec<u8> = board.iter().map(|c| c.rank.0).collect();
    ranks.sort_unstable();
    ranks.dedup();
    if ranks.len() < 2 {
        return 0.0;
    }
    let span = (ranks[ranks.len() - 1] - ranks[0]) as f64;
    let min_possible_span = (ranks.len() - 1) as f64;
    if span <= 0.0 {
        return 0.0;
    }
    (min_possible_span / span).min(1.0)
}

fn is_connected_ranks(ranks: &[u8]) -> bool {
    ranks.windows(2).any(|w| (w[1] as i32 - w[0] as i32) <= 2)
}

fn is_very_connected_ranks(ranks: &[u8]) -> bool {
    ranks.windows(3).any(|w| (w[2] as i32 - w[0] as i32) == 2)
}

/// Scans every 5-rank window for straight potential. Returns
/// (open_ended_possible, gut_shot_possible, number_of_windows_with_3+_ranks).
fn straight_window_shapes(ranks: &[u8]) -> (bool, bool, usize) {
    let mut oesd = false;
    let mut gut = false;
    let mut windows = 0;
    for low in 1..=10i32 {
        let present: Vec<bool> = (low..low + 5).map(|r| ranks.contains(&(r as u8))).collect();
        let count = present.iter().filter(|&&b| b).count();
        if count < 3 {
            continue;
        }
        windows += 1;
        if count == 4 {
            let missing_idx = present.iter().position(|&b| !b).unwrap();
            if missing_idx == 0 || missing_idx == 4 {
                oesd = true;
            } else {
                gut = true;
            }
        } else {
            let missing: Vec<usize> = present
                .iter()
                .enumerate()
                .filter(|(_, &b)| !b)
                .map(|(i, _)| i)
                .collect();
            if missing == [0, 1] || missing == [3, 4] || missing == [0, 4] {
                oesd = true;
            } else {
                gut = true;
            }
        }
    }
    (oesd, gut, windows)
}

/// Classify a board (3 to 5 community cards) by danger level. The weighted
/// sum of component scores lands in `[0, 1]`; thresholds split it into four
/// tiers (0.3 / 0.6 / 0.8 — the top two tiers aren't distinguished by the
/// underlying rule set beyond that midpoint split, so `Wet` covers
/// `[0.6, 0.8)` and `VeryWet` covers `[0.8, 1.0]`).
pub fn analyze_board(board: &[Card]) -> BoardAnalysis {
    let counts = rank_counts(board);
    let suits = suit_counts(board);
    let ranks = distinct_sorted_ranks(board);

    let paired = counts.iter().any(|&c| c == 2);
    let trips_on_board = counts.iter().any(|&c| c == 3);
    let quads_on_board = counts.iter().any(|&c| c == 4);
    let pair_count = counts.iter().filter(|&&c| c == 2).count();
    let two_pair_on_board = pair_count >= 2;
    let full_house_on_board = trips_on_board && pair_count >= 1;

    let suits_present = suits.iter().filter(|&&c| c > 0).count();
    let is_monotone = board.len() >= 2 && suits_present == 1;
    let is_two_tone = suits_present == 2;
    let is_rainbow = suits.iter().all(|&c| c <= 1);

    let flush_possible = suits.iter().any(|&c| c >= 3);
    let flush_draw_possible = suits.iter().any(|&c| c >= 2);
    let straight_poss = straight_possible(board);
    let multi_straight = multiple_straight_draws_possible(board);
    let conn = connectedness(board);
    let is_connected = is_connected_ranks(&ranks);
    let is_very_connected = is_very_connected_ranks(&ranks);
    let (oesd_possible, gut_possible, straight_window_count) = straight_window_shapes(&ranks);

    let mut score = 0.0;
    if paired {
        score += 0.2;
    }
    if trips_on_board {
        score += 0.3;
    }
    if two_pair_on_board {
        score += 0.2;
    }
    if full_house_on_board {
        score += 0.4;
    }
    if quads_on_board {
        score += 0.5;
    }
    if flush_possible {
        score += 0.2;
    }
    if straight_poss {
        score += 0.2;
    }
    if multi_straight {
        score += 0.2;
    }
    score += conn * 0.2;
    let danger_score = score.min(1.0);

    let texture = if danger_score < 0.3 {
        BoardTexture::Dry
    } else if danger_score < 0.6 {
        BoardTexture::SemiWet
    } else if danger_score < 0.8 {
        BoardTexture::Wet
    } else {
        BoardTexture::VeryWet
    };

    log::trace!("board texture: {:?} (danger={:.2})", texture, danger_score);

    BoardAnalysis {
        texture,
        danger_score,
        paired,
        trips_on_board,
        two_pair_on_board,
        full_house_on_board,
        quads_on_board,
        flush_possible,
        straight_possible: straight_poss,
        multiple_straight_draws_possible: multi_straight,
        connectedness: conn,
        is_monotone,
        is_two_tone,
        is_rainbow,
        is_connected,
        is_very_connected,
        flush_draw_possible,
        open_ended_straight_draw_possible: oesd_possible,
        gut_shot_straight_draw_possible: gut_possible,
        number_of_straight_possibilities: straight_window_count,
    }
}

fn straight_possible(board: &[Card]) -> bool {
    let ranks = distinct_sorted_ranks(board);
    // A straight is "possible" if three board ranks already fall within a
    // 5-rank window (two more cards, hole or community, could complete it).
    for low in 1..=10i32 {
        let count = (low..low + 5)
            .filter(|&r| ranks.contains(&(r as u8)))
            .count();
        if count >= 3 {
            return true;
        }
    }
    false
}

fn multiple_straight_draws_possible(board: &[Card]) -> bool {
    let ranks = distinct_sorted_ranks(board);
    let mut windows_with_three = 0;
    for low in 1..=10i32 {
        let count = (low..low + 5)
            .filter(|&r| ranks.contains(&(r as u8)))
            .count();
        if count >= 3 {
            windows_with_three += 1;
        }
    }
    windows_with_three >= 2
}

/// Whether the board changed in a way that matters to a made hand holder:
/// a new pair, a newly possible flush, a newly possible straight, or a
/// texture-tier change outright. Meant for flop→turn and turn→river
/// transitions (pass the board before and after the new card).
pub fn texture_changed(previous: &[Card], current: &[Card]) -> bool {
    let before = analyze_board(previous);
    let after = analyze_board(current);
    (!before.paired && after.paired)
        || (!before.flush_possible && after.flush_possible)
        || (!before.straight_possible && after.straight_possible)
        || after.texture != before.texture
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c(s: &str) -> Card {
        Card::parse(s).unwrap()
    }

    #[test]
    fn rainbow_disconnected_board_is_dry() {
        let board = [c("2c"), c("9d"), c("Kh")];
        let a = analyze_board(&board);
        assert_eq!(a.texture, BoardTexture::Dry);
        assert!(a.is_rainbow);
        assert!(!a.is_monotone);
        assert!(!a.is_two_tone);
    }

    #[test]
    fn paired_two_flush_board_is_at_least_semiwet() {
        let board = [c("7c"), c("7d"), c("9c"), c("2c")];
        let a = analyze_board(&board);
        assert!(a.danger_score >= 0.3);
        assert!(a.flush_draw_possible);
    }

    #[test]
    fn connected_suited_board_is_wet_or_verywet() {
        let board = [c("9h"), c("8h"), c("7h")];
        let a = analyze_board(&board);
        assert!(matches!(a.texture, BoardTexture::Wet | BoardTexture::VeryWet));
        assert!(a.is_monotone);
        assert!(a.is_very_connected);
    }

    #[test]
    fn monotone_connected_paired_board_is_verywet() {
        let board = [c("9h"), c("8h"), c("7h"), c("7c")];
        let a = analyze_board(&board);
        assert_eq!(a.texture, BoardTexture::VeryWet);
        assert!(!a.is_monotone);
        assert!(a.is_two_tone);
    }

    #[test]
    fn danger_score_is_clamped_to_one() {
        let board = [c("9h"), c("8h"), c("7h"), c("7c"), c("7d")];
        let a = analyze_board(&board);
        assert!(a.danger_score <= 1.0);
    }

    #[test]
    fn oesd_and_gutshot_discriminate_by_shape() {
        let oesd_board = [c("Jh"), c("Td"), c("9h"), c("8d")];
        let a = analyze_board(&oesd_board);
        assert!(a.open_ended_straight_draw_possible);

        let gut_board = [c("Jh"), c("Td"), c("9h"), c("7d")];
        let b = analyze_board(&gut_board);
        assert!(b.gut_shot_straight_draw_possible);
    }

    #[test]
    fn texture_changed_fires_when_turn_pairs_the_board() {
        let flop = [c("2c"), c("9d"), c("Kh")];
        let turn = [c("2c"), c("9d"), c("Kh"), c("9h")];
        assert!(texture_changed(&flop, &turn));
    }

    #[test]
    fn texture_unchanged_on_a_blank_turn_card() {
        let flop = [c("2c"), c("9d"), c("Kh")];
        let turn = [c("2c"), c("9d"), c("Kh"), c("4s")];
        assert!(!texture_changed(&flop, &turn));
    }
}
