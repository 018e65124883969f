//! Five-of-seven best-hand scoring and categorical strength labeling.
//!
//! The numeric score totally orders any two 5-to-7-card holdings (used for
//! showdown comparison and by the equity estimator's inner loop). The
//! categorical [`HandStrength`] label is picked separately, for decision
//! making, and is never derived by thresholding the numeric score alone —
//! see the module-level note on [`HandStrength`] for why.

use std::collections::HashSet;

use crate::card::{Card, Street};
use crate::hand_strength::HandStrength;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Category {
    HighCard,
    Pair,
    TwoPair,
    Trips,
    Straight,
    Flush,
    FullHouse,
    Quads,
    StraightFlush,
}

#[derive(Debug, Clone)]
struct FiveCardValue {
    category: Category,
    score: i64,
    ranks_desc: Vec<u8>,
    pair_rank: Option<u8>,
    second_pair_rank: Option<u8>,
    trips_rank: Option<u8>,
    quad_rank: Option<u8>,
}

fn rank_counts(cards: &[Card; 5]) -> [u8; 15] {
    let mut counts = [0u8; 15];
    for c in cards {
        counts[c.rank.0 as usize] += 1;
    }
    counts
}

fn straight_high(unique_ranks_desc: &[u8]) -> Option<u8> {
    if unique_ranks_desc.len() != 5 {
        return None;
    }
    let is_run = unique_ranks_desc.windows(2).all(|w| w[0] == w[1] + 1);
    if is_run {
        return Some(unique_ranks_desc[0]);
    }
    if unique_ranks_desc == [14, 5, 4, 3, 2] {
        return Some(5);
    }
    None
}

fn score_five(cards: &[Card; 5]) -> FiveCardValue {
    let counts = rank_counts(cards);
    let mut ranks_desc: Vec<u8> = cards.iter().map(|c| c.rank.0).collect();
    ranks_desc.sort_unstable_by(|a, b| b.cmp(a));

    let is_flush = cards.iter().all(|c| c.suit == cards[0].suit);

    let mut unique_desc: Vec<u8> = ranks_desc.clone();
    unique_desc.dedup();
    let straight = straight_high(&unique_desc);

    // Group ranks by multiplicity, highest rank first within each group.
    let mut quads = Vec::new();
    let mut trips = Vec::new();
    let mut pairs = Vec::new();
    let mut singles = Vec::new();
    for r in (2u8..=14).rev() {
        match counts[r as usize] {
            4 => quads.push(r),
            3 => trips.push(r),
            2 => pairs.push(r),
            1 => singles.push(r),
            _ => {}
        }
    }

    if let Some(&high) = unique_desc.first() {
        if is_flush && straight.is_some() {
            return FiveCardValue {
                category: Category::StraightFlush,
                score: 8_000_000 + straight.unwrap() as i64,
                ranks_desc,
                pair_rank: None,
                second_pair_rank: None,
                trips_rank: None,
                quad_rank: None,
            };
        }
        let _ = high;
    }

    if let Some(&quad_rank) = quads.first() {
        let kicker = ranks_desc.iter().find(|&&r| r != quad_rank).copied().unwrap_or(0);
        return FiveCardValue {
            category: Category::Quads,
            score: 7_000_000 + 13 * quad_rank as i64 + kicker as i64,
            ranks_desc,
            pair_rank: None,
            second_pair_rank: None,
            trips_rank: Some(quad_rank),
            quad_rank: Some(quad_rank),
        };
    }

    if !trips.is_empty() && (pairs.len() + trips.len() > 1) {
        // Full house: trips + a pair, or two trips (use the second as a pair).
        let triplet_rank = trips[0];
        let pair_rank = if trips.len() > 1 {
            trips[1]
        } else {
            pairs[0]
        };
        return FiveCardValue {
            category: Category::FullHouse,
            score: 6_000_000 + 13 * triplet_rank as i64 + pair_rank as i64,
            ranks_desc,
            pair_rank: Some(pair_rank),
            second_pair_rank: None,
            trips_rank: Some(triplet_rank),
            quad_rank: None,
        };
    }

    if is_flush {
        let sum: i64 = ranks_desc.iter().map(|&r| r as i64).sum();
        return FiveCardValue {
            category: Category::Flush,
            score: 5_000_000 + sum,
            ranks_desc,
            pair_rank: None,
            second_pair_rank: None,
            trips_rank: None,
            quad_rank: None,
        };
    }

    if let Some(high) = straight {
        return FiveCardValue {
            category: Category::Straight,
            score: 4_000_000 + high as i64,
            ranks_desc,
            pair_rank: None,
            second_pair_rank: None,
            trips_rank: None,
            quad_rank: None,
        };
    }

    if let Some(&triplet_rank) = trips.first() {
        let kickers: Vec<u8> = singles.iter().take(2).copied().collect();
        let k1 = kickers.first().copied().unwrap_or(0) as i64;
        let k2 = kickers.get(1).copied().unwrap_or(0) as i64;
        return FiveCardValue {
            category: Category::Trips,
            score: 3_000_000 + 169 * triplet_rank as i64 + 13 * k1 + k2,
            ranks_desc,
            pair_rank: None,
            second_pair_rank: None,
            trips_rank: Some(triplet_rank),
            quad_rank: None,
        };
    }

    if pairs.len() >= 2 {
        let high_pair = pairs[0];
        let low_pair = pairs[1];
        let kicker = singles.first().copied().unwrap_or(0) as i64;
        return FiveCardValue {
            category: Category::TwoPair,
            score: 2_000_000 + 169 * high_pair as i64 + 13 * low_pair as i64 + kicker,
            ranks_desc,
            pair_rank: Some(high_pair),
            second_pair_rank: Some(low_pair),
            trips_rank: None,
            quad_rank: None,
        };
    }

    if let Some(&pair_rank) = pairs.first() {
        let k1 = singles.first().copied().unwrap_or(0) as i64;
        let k2 = singles.get(1).copied().unwrap_or(0) as i64;
        let k3 = singles.get(2).copied().unwrap_or(0) as i64;
        return FiveCardValue {
            category: Category::Pair,
            score: 1_000_000 + 2197 * pair_rank as i64 + 169 * k1 + 13 * k2 + k3,
            ranks_desc,
            pair_rank: Some(pair_rank),
            second_pair_rank: None,
            trips_rank: None,
            quad_rank: None,
        };
    }

    let score: i64 = ranks_desc
        .iter()
        .enumerate()
        .map(|(i, &r)| r as i64 * 13i64.pow(4 - i as u32))
        .sum();
    FiveCardValue {
        category: Category::HighCard,
        score,
        ranks_desc,
        pair_rank: None,
        second_pair_rank: None,
        trips_rank: None,
        quad_rank: None,
    }
}

fn combinations_5(cards: &[Card]) -> Vec<[Card; 5]> {
    let n = cards.len();
    if n < 5 {
        return Vec::new();
    }
    let mut out = Vec::new();
    let mut idx = [0usize; 5];
    for i in 0..5 {
        idx[i] = i;
    }
    loop {
        out.push([cards[idx[0]], cards[idx[1]], cards[idx[2]], cards[idx[3]], cards[idx[4]]]);
        let mut i = 4;
        loop {
            if idx[i] != i + n - 5 {
                idx[i] += 1;
                for j in i + 1..5 {
                    idx[j] = idx[j - 1] + 1;
                }
                break;
            }
            if i == 0 {
                return out;
            }
            i -= 1;
        }
    }
}

fn best_five(cards: &[Card]) -> FiveCardValue {
    combinations_5(cards)
        .into_iter()
        .map(|c| score_five(&c))
        .max_by_key(|v| v.score)
        .expect("at least 5 cards required to score a hand")
}

/// Numeric score for a full hole+board holding (5 to 7 cards), used for
/// showdown comparison and the equity estimator. Panics if fewer than 5
/// cards are supplied (the caller never calls this before the flop).
pub fn numeric_score(hole: [Card; 2], board: &[Card]) -> i64 {
    let mut all = board.to_vec();
    all.push(hole[0]);
    all.push(hole[1]);
    best_five(&all).score
}

fn distinct_board_ranks_desc(board: &[Card]) -> Vec<u8> {
    let mut ranks: Vec<u8> = board.iter().map(|c| c.rank.0).collect();
    ranks.sort_unstable_by(|a, b| b.cmp(a));
    ranks.dedup();
    ranks
}

fn kicker_quality(kicker: u8) -> KickerQuality {
    match kicker {
        14 | 13 | 12 => KickerQuality::Good,
        11 | 10 => KickerQuality::Medium,
        _ => KickerQuality::Bad,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum KickerQuality {
    Good,
    Medium,
    Bad,
}

/// Internal ordinal used only to compare a made-hand label against a draw
/// label when deciding which is "stronger in context" for this hole+board
/// (see §4.1: pick the draw label only if its value exceeds the made-hand
/// label's value and the street isn't the river). This mirrors the
/// reference implementation's flat numeric `HandStrength` values, but is
/// kept private here: the policy engine never sees or compares these
/// numbers directly, only the classifier booleans on `HandStrength` itself.
fn ordinal(hs: HandStrength) -> u32 {
    use HandStrength::*;
    match hs {
        HighCard => 0,
        BackdoorTwoCardsStraight => 2,
        BackdoorStraightDraw => 4,
        BackdoorFlushDraw => 6,
        TwoOvercards => 8,
        BottomPairBadKicker => 10,
        Gutshot => 12,
        BottomPairGoodKicker => 15,
        OvercardsWithGutshot => 18,
        MiddlePairBadKicker => 20,
        DoubleGutshot => 22,
        ThirdTopPairBadKicker => 23,
        MiddlePairGoodKicker => 25,
        ThirdTopPairGoodKicker => 27,
        PairWithGutshot => 28,
        TopPairBadKicker => 30,
        OpenEnded => 32,
        SecondTopPairBadKicker => 33,
        TopPairWeakKicker => 35,
        SecondTopPairGoodKicker => 37,
        OvercardsWithStraightDraw => 38,
        TopPairGoodKicker => 40,
        FlushDraw => 42,
        FlushDrawWithOvercard => 44,
        OverpairWeak => 45,
        PairWithStraightDraw => 48,
        PairWithStraightRedraw => 49,
        OverpairStrong => 50,
        FlushDrawWithPair => 52,
        PairWithFlushRedraw => 53,
        TwoPairBottom => 55,
        TwoPairTopAndBottom => 60,
        FlushDrawWithStraightDraw => 62,
        TwoPairTopAndMiddle => 65,
        SecondNutFlushDraw => 71,
        NutFlushDraw => 72,
        Trips => 73,
        Set => 75,
        SecondSet => 77,
        TopSet => 80,
        SetWithStraightRedraw => 82,
        SetWithFlushRedraw => 83,
        Straight => 85,
        Flush => 90,
        FullHouse => 100,
        FourOfAKind => 110,
        StraightFlush => 120,
    }
}

fn classify_made_hand(hole: [Card; 2], board: &[Card], best: &FiveCardValue) -> HandStrength {
    let is_pocket_pair = hole[0].rank == hole[1].rank;
    let board_ranks = distinct_board_ranks_desc(board);
    let max_board = board_ranks.first().copied();
    let second_board = board_ranks.get(1).copied();

    match best.category {
        Category::StraightFlush => HandStrength::StraightFlush,
        Category::Quads => HandStrength::FourOfAKind,
        Category::FullHouse => HandStrength::FullHouse,
        Category::Flush => HandStrength::Flush,
        Category::Straight => HandStrength::Straight,
        Category::Trips => {
            let trips_rank = best.trips_rank.unwrap_or(0);
            if is_pocket_pair && hole[0].rank.0 == trips_rank {
                // Set: both hole cards form the pair, the board supplies the third.
                if Some(trips_rank) == max_board {
                    HandStrength::TopSet
                } else if Some(trips_rank) == second_board {
                    HandStrength::SecondSet
                } else {
                    HandStrength::Set
                }
            } else {
                HandStrength::Trips
            }
        }
        Category::TwoPair => {
            let hi = best.pair_rank.unwrap_or(0);
            let lo = best.second_pair_rank.unwrap_or(0);
            let pair_set: HashSet<u8> = [hi, lo].into_iter().collect();
            if Some(hi) == max_board || Some(lo) == max_board {
                if let Some(sb) = second_board {
                    if pair_set.contains(&sb) {
                        HandStrength::TwoPairTopAndMiddle
                    } else {
                        HandStrength::TwoPairTopAndBottom
                    }
                } else {
                    HandStrength::TwoPairTopAndBottom
                }
            } else {
                HandStrength::TwoPairBottom
            }
        }
        Category::Pair => {
            let pair_rank = best.pair_rank.unwrap_or(0);
            if is_pocket_pair && hole[0].rank.0 == pair_rank {
                // Overpair or underpair: no board rank matches the pocket pair.
                if max_board.map_or(true, |m| pair_rank > m) {
                    if pair_rank >= 12 {
                        HandStrength::OverpairStrong
                    } else {
                        HandStrength::OverpairWeak
                    }
                } else {
                    // Underpair: position it among board ranks by how many board
                    // ranks exceed it, using the same tiering as a board-matched pair.
                    let overcards_on_board = board_ranks.iter().filter(|&&r| r > pair_rank).count();
                    underpair_tier(overcards_on_board, pair_rank)
                }
            } else {
                // Non-pocket pair: one hole card matched a board rank; the other
                // hole card is the kicker.
                let other_rank = if hole[0].rank.0 == pair_rank {
                    hole[1].rank.0
                } else {
                    hole[0].rank.0
                };
                let position = board_ranks.iter().position(|&r| r == pair_rank).unwrap_or(0);
                board_pair_tier(position, board_ranks.len(), kicker_quality(other_rank))
            }
        }
        Category::HighCard => HandStrength::HighCard,
    }
}

fn underpair_tier(overcards_on_board: usize, pair_rank: u8) -> HandStrength {
    let quality = if pair_rank >= 10 {
        KickerQuality::Good
    } else {
        KickerQuality::Bad
    };
    board_pair_tier(overcards_on_board.saturating_sub(1), overcards_on_board.max(1), quality)
}

fn board_pair_tier(position: usize, distinct_board_count: usize, quality: KickerQuality) -> HandStrength {
    if position == 0 {
        match quality {
            KickerQuality::Good => HandStrength::TopPairGoodKicker,
            KickerQuality::Medium => HandStrength::TopPairWeakKicker,
            KickerQuality::Bad => HandStrength::TopPairBadKicker,
        }
    } else if distinct_board_count <= 3 && position == distinct_board_count.saturating_sub(1) {
        // Flop: the third distinct rank is simultaneously "bottom" — named
        // ThirdTopPair to match the reference label vocabulary.
        match quality {
            KickerQuality::Good | KickerQuality::Medium => HandStrength::ThirdTopPairGoodKicker,
            KickerQuality::Bad => HandStrength::ThirdTopPairBadKicker,
        }
    } else if position == 1 {
        match quality {
            KickerQuality::Good | KickerQuality::Medium => HandStrength::SecondTopPairGoodKicker,
            KickerQuality::Bad => HandStrength::SecondTopPairBadKicker,
        }
    } else if position + 1 == distinct_board_count {
        match quality {
            KickerQuality::Good | KickerQuality::Medium => HandStrength::BottomPairGoodKicker,
            KickerQuality::Bad => HandStrength::BottomPairBadKicker,
        }
    } else {
        match quality {
            KickerQuality::Good | KickerQuality::Medium => HandStrength::MiddlePairGoodKicker,
            KickerQuality::Bad => HandStrength::MiddlePairBadKicker,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StraightDrawKind {
    Gutshot,
    OpenEnded,
    DoubleGutshot,
}

fn straight_draw_kind(all_ranks: &[u8]) -> Option<StraightDrawKind> {
    let mut uniq: Vec<u8> = all_ranks.to_vec();
    if uniq.contains(&14) {
        uniq.push(1);
    }
    uniq.sort_unstable();
    uniq.dedup();
    let present = |r: i32| -> bool { r >= 1 && r <= 14 && uniq.contains(&(r as u8)) };

    let mut open_ended_found = false;
    let mut gutshot_completions: HashSet<i32> = HashSet::new();

    for low in 1..=10i32 {
        let window: Vec<i32> = (low..low + 5).collect();
        let present_flags: Vec<bool> = window.iter().map(|&r| present(r)).collect();
        let count = present_flags.iter().filter(|&&b| b).count();
        if count != 4 {
            continue;
        }
        let missing_idx = present_flags.iter().position(|&b| !b).unwrap();
        if missing_idx == 0 || missing_idx == 4 {
            let run: Vec<i32> = window
                .iter()
                .zip(present_flags.iter())
                .filter(|(_, &p)| p)
                .map(|(&r, _)| r)
                .collect();
            let run_low = *run.iter().min().unwrap();
            let run_high = *run.iter().max().unwrap();
            if run_low == 11 && run_high == 14 {
                // J-Q-K-A: blocked at the top, only T completes it.
                gutshot_completions.insert(10);
            } else {
                open_ended_found = true;
            }
        } else {
            gutshot_completions.insert(window[missing_idx]);
        }
    }

    if open_ended_found {
        Some(StraightDrawKind::OpenEnded)
    } else if gutshot_completions.len() >= 2 {
        Some(StraightDrawKind::DoubleGutshot)
    } else if !gutshot_completions.is_empty() {
        Some(StraightDrawKind::Gutshot)
    } else {
        None
    }
}

fn classify_draw(hole: [Card; 2], board: &[Card], made_is_pair_tier: bool) -> Option<HandStrength> {
    let mut all = board.to_vec();
    all.push(hole[0]);
    all.push(hole[1]);

    let mut suit_counts = [0u8; 4];
    for c in &all {
        suit_counts[c.suit as usize] += 1;
    }
    let flush_suit = (0..4).find(|&s| suit_counts[s] == 4);
    let flush_draw_present = flush_suit.is_some();
    let has_nut_flush_draw = flush_suit.map_or(false, |s| {
        hole.iter().any(|c| c.suit as usize == s && c.rank.0 == 14)
    });
    let has_second_nut_flush_draw = flush_suit.map_or(false, |s| {
        !has_nut_flush_draw
            && hole.iter().any(|c| c.suit as usize == s && c.rank.0 == 13)
            && !board.iter().any(|c| c.suit as usize == s && c.rank.0 == 14)
    });

    let ranks: Vec<u8> = all.iter().map(|c| c.rank.0).collect();
    let sdk = straight_draw_kind(&ranks);

    let max_board = board.iter().map(|c| c.rank.0).max();
    let overcard_count = if let Some(mb) = max_board {
        hole.iter().filter(|c| c.rank.0 > mb).count()
    } else {
        0
    };

    if flush_draw_present {
        return Some(if made_is_pair_tier && sdk.is_some() {
            HandStrength::FlushDrawWithStraightDraw
        } else if made_is_pair_tier {
            HandStrength::FlushDrawWithPair
        } else if has_nut_flush_draw {
            HandStrength::NutFlushDraw
        } else if has_second_nut_flush_draw {
            HandStrength::SecondNutFlushDraw
        } else if overcard_count > 0 {
            HandStrength::FlushDrawWithOvercard
        } else {
            HandStrength::FlushDraw
        });
    }

    match sdk {
        Some(StraightDrawKind::OpenEnded) => {
            return Some(if made_is_pair_tier {
                HandStrength::PairWithStraightDraw
            } else if overcard_count > 0 {
                HandStrength::OvercardsWithStraightDraw
            } else {
                HandStrength::OpenEnded
            });
        }
        Some(StraightDrawKind::DoubleGutshot) => {
            return Some(if made_is_pair_tier {
                HandStrength::PairWithStraightDraw
            } else {
                HandStrength::DoubleGutshot
            });
        }
        Some(StraightDrawKind::Gutshot) => {
            return Some(if made_is_pair_tier {
                HandStrength::PairWithGutshot
            } else if overcard_count > 0 {
                HandStrength::OvercardsWithGutshot
            } else {
                HandStrength::Gutshot
            });
        }
        None => {}
    }

    if overcard_count >= 2 {
        return Some(HandStrength::TwoOvercards);
    }

    if board.len() == 3 {
        // Backdoor draws only apply on the flop (two more cards to come).
        if let Some(s) = (0..4).find(|&s| suit_counts[s] == 3) {
            if hole.iter().any(|c| c.suit as usize == s) {
                return Some(HandStrength::BackdoorFlushDraw);
            }
        }
        let mut distinct: Vec<u8> = ranks.clone();
        distinct.sort_unstable();
        distinct.dedup();
        for w in distinct.windows(3) {
            if w[2] - w[0] <= 3 {
                let hole_in_run = hole.iter().filter(|c| w.contains(&c.rank.0)).count();
                if hole_in_run == 2 {
                    return Some(HandStrength::BackdoorTwoCardsStraight);
                } else if hole_in_run == 1 {
                    return Some(HandStrength::BackdoorStraightDraw);
                }
            }
        }
    }

    None
}

/// Preflop hand classification, reusing the postflop label vocabulary as
/// coarse buckets (there is no board to refine against): pocket pair ≥
/// Queens is the premium bucket (`OverpairStrong`); JJ/TT or AK/AQ are the
/// strong bucket; 99-66 or KQ/AJ are the medium bucket; suited
/// connectors/one-gappers and small pocket pairs are speculative
/// (draw-eligible); everything else is trash (`HighCard`).
fn classify_preflop(hole: [Card; 2]) -> HandStrength {
    let (r0, r1) = (hole[0].rank.0, hole[1].rank.0);
    let suited = hole[0].suit == hole[1].suit;
    let (hi, lo) = if r0 >= r1 { (r0, r1) } else { (r1, r0) };
    let is_pair = r0 == r1;

    if is_pair && hi >= 12 {
        return HandStrength::OverpairStrong;
    }
    if is_pair && hi >= 10 {
        return HandStrength::OverpairWeak;
    }
    if (hi, lo) == (14, 13) {
        return HandStrength::TopPairGoodKicker;
    }
    if (hi, lo) == (14, 12) {
        return HandStrength::TopPairGoodKicker;
    }
    if is_pair && hi >= 6 {
        return HandStrength::MiddlePairGoodKicker;
    }
    if (hi, lo) == (13, 12) || (hi, lo) == (14, 11) {
        return HandStrength::TopPairWeakKicker;
    }
    let gap = hi - lo;
    if suited && (gap == 1 || gap == 2) {
        return HandStrength::BackdoorTwoCardsStraight;
    }
    if is_pair {
        return HandStrength::BackdoorTwoCardsStraight;
    }
    if suited && hi == 14 {
        return HandStrength::BackdoorFlushDraw;
    }
    HandStrength::HighCard
}

/// Given hole cards, board (0..=5 community cards), and the current street,
/// returns the categorical strength label and the numeric showdown score
/// (0 preflop, since there aren't 5 cards yet to score).
pub fn evaluate_hand_strength(hole: [Card; 2], board: &[Card], street: Street) -> (HandStrength, i64) {
    if street == Street::Preflop || board.is_empty() {
        return (classify_preflop(hole), 0);
    }

    let mut all = board.to_vec();
    all.push(hole[0]);
    all.push(hole[1]);
    let best = best_five(&all);
    let made = classify_made_hand(hole, board, &best);

    if street == Street::River {
        return (made, best.score);
    }

    let made_is_pair_tier = matches!(best.category, Category::Pair);
    let draw = classify_draw(hole, board, made_is_pair_tier);
    let label = match draw {
        Some(d) if ordinal(d) > ordinal(made) => d,
        _ => made,
    };
    (label, best.score)
}
