//! The categorical hand-strength label.
//!
//! This is a tagged sum type, not a flat integer enum: a hand's category is
//! a variant, and "how strong is this within the policy" is answered by the
//! classifier methods below, never by comparing variant ordinals across
//! categories. A draw and a made hand are never ordered against each other
//! by discriminant — only by consulting `is_strong_made_hand`,
//! `is_strong_draw`, and friends, which the policy engine treats as the
//! actual contract.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HandStrength {
    // Made hands, weakest to strongest.
    HighCard,
    BottomPairBadKicker,
    BottomPairGoodKicker,
    MiddlePairBadKicker,
    MiddlePairGoodKicker,
    ThirdTopPairBadKicker,
    ThirdTopPairGoodKicker,
    TopPairBadKicker,
    SecondTopPairBadKicker,
    TopPairWeakKicker,
    SecondTopPairGoodKicker,
    TopPairGoodKicker,
    OverpairWeak,
    OverpairStrong,
    TwoPairBottom,
    TwoPairTopAndBottom,
    TwoPairTopAndMiddle,
    Trips,
    Set,
    SecondSet,
    TopSet,
    SetWithStraightRedraw,
    SetWithFlushRedraw,
    Straight,
    Flush,
    FullHouse,
    FourOfAKind,
    StraightFlush,

    // Draws.
    BackdoorTwoCardsStraight,
    BackdoorStraightDraw,
    BackdoorFlushDraw,
    TwoOvercards,
    Gutshot,
    OvercardsWithGutshot,
    DoubleGutshot,
    PairWithGutshot,
    OpenEnded,
    OvercardsWithStraightDraw,
    FlushDraw,
    FlushDrawWithOvercard,
    PairWithStraightDraw,
    PairWithStraightRedraw,
    FlushDrawWithPair,
    PairWithFlushRedraw,
    FlushDrawWithStraightDraw,
    SecondNutFlushDraw,
    NutFlushDraw,
}

impl HandStrength {
    /// Whether this label names a made hand (as opposed to a draw).
    pub fn is_made_hand(self) -> bool {
        !self.is_draw()
    }

    /// Whether this label names a draw (possibly alongside made-hand value,
    /// e.g. `FlushDrawWithPair`).
    pub fn is_draw(self) -> bool {
        use HandStrength::*;
        matches!(
            self,
            BackdoorTwoCardsStraight
                | BackdoorStraightDraw
                | BackdoorFlushDraw
                | TwoOvercards
                | Gutshot
                | OvercardsWithGutshot
                | DoubleGutshot
                | PairWithGutshot
                | OpenEnded
                | OvercardsWithStraightDraw
                | FlushDraw
                | FlushDrawWithOvercard
                | PairWithStraightDraw
                | PairWithStraightRedraw
                | FlushDrawWithPair
                | PairWithFlushRedraw
                | FlushDrawWithStraightDraw
                | SecondNutFlushDraw
                | NutFlushDraw
        )
    }

    /// Strong made hands: two pair top-and-bottom or better, excluding draws.
    pub fn is_strong_made_hand(self) -> bool {
        use HandStrength::*;
        !self.is_draw()
            && matches!(
                self,
                TwoPairTopAndBottom
                    | TwoPairTopAndMiddle
                    | Trips
                    | Set
                    | SecondSet
                    | TopSet
                    | SetWithStraightRedraw
                    | SetWithFlushRedraw
                    | Straight
                    | Flush
                    | FullHouse
                    | FourOfAKind
                    | StraightFlush
            )
    }

    /// Medium made hands: top pair good kicker up to (not including) two
    /// pair top-and-bottom.
    pub fn is_medium_made_hand(self) -> bool {
        use HandStrength::*;
        !self.is_draw()
            && matches!(self, TopPairGoodKicker | OverpairWeak | OverpairStrong | TwoPairBottom)
    }

    /// Weak made hands: everything below medium.
    pub fn is_weak_made_hand(self) -> bool {
        self.is_made_hand() && !self.is_strong_made_hand() && !self.is_medium_made_hand()
    }

    /// Strong draws: the four draw labels the policy treats as worth betting
    /// or calling large with, even unimproved.
    pub fn is_strong_draw(self) -> bool {
        use HandStrength::*;
        matches!(
            self,
            FlushDrawWithPair | FlushDrawWithStraightDraw | NutFlushDraw | OvercardsWithStraightDraw
        )
    }

    /// Medium draws: open-ended, flush draw (plain or with overcard), second
    /// nut flush draw, double gutshot with or without an accompanying pair.
    pub fn is_medium_draw(self) -> bool {
        use HandStrength::*;
        !self.is_strong_draw()
            && matches!(
                self,
                OpenEnded
                    | FlushDraw
                    | FlushDrawWithOvercard
                    | SecondNutFlushDraw
                    | DoubleGutshot
                    | PairWithStraightDraw
                    | PairWithFlushRedraw
                    | PairWithStraightRedraw
            )
    }

    /// Weak draws: everything draw-shaped that isn't strong or medium.
    pub fn is_weak_draw(self) -> bool {
        self.is_draw() && !self.is_strong_draw() && !self.is_medium_draw()
    }

    /// A coarse strength scalar in `[0, 1]` used by `calculate_optimal_bet_size`.
    /// Strong made hands and strong draws get 0.8; medium made/draws 0.6;
    /// everything else 0.4 unless it's outright trash, which never reaches
    /// this path (the policy checks once and falls to check/fold first).
    pub fn strength_scalar(self) -> f64 {
        if self.is_strong_made_hand() || self.is_strong_draw() {
            0.8
        } else if self.is_medium_made_hand() || self.is_medium_draw() {
            0.6
        } else {
            0.4
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strong_made_hand_excludes_draws() {
        assert!(HandStrength::TwoPairTopAndBottom.is_strong_made_hand());
        assert!(!HandStrength::FlushDrawWithPair.is_strong_made_hand());
    }

    #[test]
    fn made_and_draw_are_mutually_exclusive() {
        for variant in [
            HandStrength::TopPairGoodKicker,
            HandStrength::NutFlushDraw,
            HandStrength::Gutshot,
            HandStrength::StraightFlush,
        ] {
            assert_ne!(variant.is_made_hand(), variant.is_draw());
        }
    }

    #[test]
    fn strong_draw_set_matches_contract() {
        assert!(HandStrength::NutFlushDraw.is_strong_draw());
        assert!(HandStrength::OvercardsWithStraightDraw.is_strong_draw());
        assert!(!HandStrength::Gutshot.is_strong_draw());
    }
}
