//! Card primitives shared by every subsystem: rank/suit representation,
//! parsing, formatting, and the shuffled deck used by the equity estimator.
//!
//! A card is a `(Rank, Suit)` pair. Rank stores 2..=14 where 14 = Ace.
//! String form follows standard notation: `"As"` = Ace of spades,
//! `"Tc"` = Ten of clubs. Parsing is case-insensitive; formatting is
//! always lower-case suit.

use std::fmt;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::PokerError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Suit {
    Clubs,
    Diamonds,
    Hearts,
    Spades,
}

impl Suit {
    pub const ALL: [Suit; 4] = [Suit::Clubs, Suit::Diamonds, Suit::Hearts, Suit::Spades];

    fn from_char(c: char) -> Result<Suit, PokerError> {
        match c.to_ascii_lowercase() {
            'c' => Ok(Suit::Clubs),
            'd' => Ok(Suit::Diamonds),
            'h' => Ok(Suit::Hearts),
            's' => Ok(Suit::Spades),
            other => Err(PokerError::InvalidCard(format!("unknown suit '{other}'"))),
        }
    }
}

impl fmt::Display for Suit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Suit::Clubs => write!(f, "c"),
            Suit::Diamonds => write!(f, "d"),
            Suit::Hearts => write!(f, "h"),
            Suit::Spades => write!(f, "s"),
        }
    }
}

/// Rank 2..=14 where 14 = Ace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Rank(pub u8);

impl Rank {
    pub const TWO: Rank = Rank(2);
    pub const ACE: Rank = Rank(14);

    pub fn symbol(self) -> &'static str {
        match self.0 {
            2 => "2", 3 => "3", 4 => "4", 5 => "5", 6 => "6",
            7 => "7", 8 => "8", 9 => "9", 10 => "T",
            11 => "J", 12 => "Q", 13 => "K", 14 => "A",
            _ => "?",
        }
    }

    fn from_char(c: char) -> Result<Rank, PokerError> {
        match c.to_ascii_uppercase() {
            '2' => Ok(Rank(2)), '3' => Ok(Rank(3)), '4' => Ok(Rank(4)),
            '5' => Ok(Rank(5)), '6' => Ok(Rank(6)), '7' => Ok(Rank(7)),
            '8' => Ok(Rank(8)), '9' => Ok(Rank(9)),
            'T' => Ok(Rank(10)), 'J' => Ok(Rank(11)), 'Q' => Ok(Rank(12)),
            'K' => Ok(Rank(13)), 'A' => Ok(Rank(14)),
            other => Err(PokerError::InvalidCard(format!("unknown rank '{other}'"))),
        }
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    pub rank: Rank,
    pub suit: Suit,
}

impl Card {
    pub fn new(rank: Rank, suit: Suit) -> Self {
        Card { rank, suit }
    }

    /// Parse a two-character rank+suit string, e.g. `"As"`, `"10c"` is rejected
    /// (use `"Tc"`); case-insensitive.
    pub fn parse(s: &str) -> Result<Card, PokerError> {
        let chars: Vec<char> = s.chars().collect();
        if chars.len() != 2 {
            return Err(PokerError::InvalidCard(format!("card string must be 2 chars: {s}")));
        }
        Ok(Card {
            rank: Rank::from_char(chars[0])?,
            suit: Suit::from_char(chars[1])?,
        })
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rank, self.suit)
    }
}

/// The four betting rounds, in play order. Community card count per street
/// is 0/3/4/5 respectively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Street {
    Preflop = 1,
    Flop = 2,
    Turn = 3,
    River = 4,
}

impl Street {
    pub fn community_card_count(self) -> usize {
        match self {
            Street::Preflop => 0,
            Street::Flop => 3,
            Street::Turn => 4,
            Street::River => 5,
        }
    }
}

impl fmt::Display for Street {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Street::Preflop => write!(f, "Preflop"),
            Street::Flop => write!(f, "Flop"),
            Street::Turn => write!(f, "Turn"),
            Street::River => write!(f, "River"),
        }
    }
}

/// Seat position relative to the button. 3-handed play only ever uses
/// `Button`, `SmallBlind`, `BigBlind`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Position {
    SmallBlind,
    BigBlind,
    Utg,
    Mp,
    Co,
    Button,
}

impl Position {
    /// Button or Cutoff in full ring/6-max; Button or SmallBlind 3-handed
    /// (the small blind acts last postflop heads-up against two others).
    pub fn is_late(self, total_players: usize) -> bool {
        if total_players == 3 {
            matches!(self, Position::Button | Position::SmallBlind)
        } else {
            matches!(self, Position::Button | Position::Co)
        }
    }

    pub fn is_blind(self) -> bool {
        matches!(self, Position::SmallBlind | Position::BigBlind)
    }

    pub fn is_early(self) -> bool {
        matches!(self, Position::Utg)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Position::SmallBlind => "SB",
            Position::BigBlind => "BB",
            Position::Utg => "UTG",
            Position::Mp => "MP",
            Position::Co => "CO",
            Position::Button => "BTN",
        };
        write!(f, "{s}")
    }
}

/// A legal betting action. `Raise` carries the absolute total chips to
/// match; `Call` carries the implied call amount. `Fold`/`Check` always
/// carry amount 0; `AllIn` carries the acting player's full remaining stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    Fold,
    Check,
    Call,
    Raise,
    AllIn,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Fold => write!(f, "Fold"),
            Action::Check => write!(f, "Check"),
            Action::Call => write!(f, "Call"),
            Action::Raise => write!(f, "Raise"),
            Action::AllIn => write!(f, "All-In"),
        }
    }
}

/// A standard 52-card deck, built by exclusion of already-known cards
/// (hero's hole cards and any dealt board), then shuffled. No allocation
/// happens inside the equity estimator's inner loop beyond this vector.
pub struct Deck {
    cards: Vec<Card>,
    cursor: usize,
}

impl Deck {
    /// Build every card not already present in `exclude`, and shuffle it
    /// with `rng`.
    pub fn new_excluding<R: Rng>(rng: &mut R, exclude: &[Card]) -> Self {
        let mut cards: Vec<Card> = Suit::ALL
            .iter()
            .flat_map(|&suit| (2u8..=14).map(move |r| Card { rank: Rank(r), suit }))
            .filter(|c| !exclude.contains(c))
            .collect();

        for i in (1..cards.len()).rev() {
            let j = rng.gen_range(0..=i);
            cards.swap(i, j);
        }

        Deck { cards, cursor: 0 }
    }

    /// Build a fresh ordered 52-card deck and shuffle it with `rng`.
    pub fn new_shuffled<R: Rng>(rng: &mut R) -> Self {
        Deck::new_excluding(rng, &[])
    }

    /// Deal one card; panics if the deck is exhausted.
    pub fn deal(&mut self) -> Card {
        assert!(self.cursor < self.cards.len(), "Deck exhausted");
        let card = self.cards[self.cursor];
        self.cursor += 1;
        card
    }

    /// Deal `n` cards at once.
    pub fn deal_n(&mut self, n: usize) -> Vec<Card> {
        (0..n).map(|_| self.deal()).collect()
    }

    /// Remaining cards available.
    pub fn remaining(&self) -> usize {
        self.cards.len() - self.cursor
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn deck_has_52_unique_cards() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut deck = Deck::new_shuffled(&mut rng);
        let all: Vec<Card> = (0..52).map(|_| deck.deal()).collect();

        let mut seen = std::collections::HashSet::new();
        for c in &all {
            assert!(seen.insert(*c), "duplicate card: {c}");
        }
        assert_eq!(all.len(), 52);
    }

    #[test]
    fn deck_excludes_known_cards() {
        let mut rng = StdRng::seed_from_u64(7);
        let hole = [Card::parse("As").unwrap(), Card::parse("Kd").unwrap()];
        let mut deck = Deck::new_excluding(&mut rng, &hole);
        assert_eq!(deck.remaining(), 50);
        let dealt = deck.deal_n(50);
        assert!(!dealt.contains(&hole[0]));
        assert!(!dealt.contains(&hole[1]));
    }

    #[test]
    fn deck_is_deterministic_with_seed() {
        let make = |seed: u64| -> Vec<Card> {
            let mut rng = StdRng::seed_from_u64(seed);
            let mut deck = Deck::new_shuffled(&mut rng);
            deck.deal_n(5)
        };
        assert_eq!(make(99), make(99));
        assert_ne!(make(99), make(100));
    }

    #[test]
    fn card_round_trips_through_all_52() {
        for &suit in &Suit::ALL {
            for r in 2u8..=14 {
                let card = Card::new(Rank(r), suit);
                let parsed = Card::parse(&card.to_string()).unwrap();
                assert_eq!(card, parsed);
            }
        }
    }

    #[test]
    fn card_parse_is_case_insensitive() {
        assert_eq!(Card::parse("as").unwrap(), Card::parse("AS").unwrap());
    }

    #[test]
    fn card_parse_rejects_bad_input() {
        assert!(Card::parse("Xs").is_err());
        assert!(Card::parse("A").is_err());
        assert!(Card::parse("Ass").is_err());
    }
}
