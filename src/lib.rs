//! # gecko_holdem_engine
//!
//! A rule-based No-Limit Hold'em decision engine: given a table state (hole
//! cards, board, stacks, and betting history), it returns an action the way
//! an experienced player following a fixed set of heuristics would —  no
//! solver, no opponent modeling feeding back into the decision itself.
//!
//! ## Quick start
//!
//! ```rust
//! use gecko_holdem_engine::{Card, Position, PolicyEngine, Street, TableState};
//!
//! let hole = [Card::parse("Ah").unwrap(), Card::parse("Ad").unwrap()];
//! let mut table = TableState::new(1, 1, hole, 2.0);
//! table.seat_player(1, Position::Button, 200.0);
//! table.seat_player(2, Position::BigBlind, 200.0);
//!
//! let (action, amount) = PolicyEngine::new(&table).decide();
//! println!("{action} {amount}");
//! assert_eq!(table.current_street, Street::Preflop);
//! ```

pub mod board;
pub mod card;
pub mod equity;
pub mod error;
pub mod evaluator;
pub mod hand_strength;
pub mod history;
pub mod opponent;
pub mod outs;
pub mod policy;
pub mod table_state;
pub mod trace;

pub use board::{analyze_board, texture_changed, BoardAnalysis, BoardTexture};
pub use card::{Action, Card, Deck, Position, Rank, Street, Suit};
pub use equity::{estimate as estimate_equity, EquityRequest};
pub use error::PokerError;
pub use evaluator::evaluate_hand_strength;
pub use hand_strength::HandStrength;
pub use history::HistoryTracker;
pub use opponent::PlayerStats;
pub use outs::{count_outs, equity_from_outs};
pub use policy::{calculate_optimal_bet_size, quick_equity, PolicyConfig, PolicyEngine};
pub use table_state::{PlayerState, SprCategory, TableState};
pub use trace::DecisionTrace;

#[cfg(test)]
mod tests;
