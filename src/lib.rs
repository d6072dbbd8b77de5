//! # Poker Odds
//!
//! Monte Carlo odds for a Texas Hold'em table, tracked one card at a time.
//!
//! A [`Session`] follows a single game from the player's point of view:
//! hole cards, opponent hands (known, partially known or unknown), the board
//! and burned cards. At any stage it can estimate
//!
//! - the player's win probability against the table,
//! - the probability that some opponent reaches a given hand category,
//! - and enumerate every two-card holding that currently beats the player.
//!
//! ## Quick Start
//!
//! ```
//! use poker_odds::{parse_cards, Session, SimConfig};
//!
//! let config = SimConfig::default().with_trials(2_000).with_seed(7);
//! let mut session = Session::new(3, "As Kd".parse()?, config)?;
//!
//! session.update_board(&parse_cards("Ah 7c 2d")?).into_result()?;
//! let win = session.calculate_win_probabilities()?;
//! assert!((0.0..=1.0).contains(&win.probability()));
//! # Ok::<(), poker_odds::OddsError>(())
//! ```
//!
//! ## Modules
//!
//! - [`cards`]: card model and the `CardSet` bitset
//! - [`eval`]: the `Evaluator` trait and the bundled evaluator
//! - [`game`]: `GameState`, the zone bookkeeping
//! - [`sim`]: Monte Carlo engine, configuration and outs enumeration
//! - [`session`]: `Session`, tying the pieces together
//!
//! ## Architecture
//!
//! ```text
//!               ┌───────────────────────────┐
//!               │          Session          │
//!               └─────────────┬─────────────┘
//!                 mutates     │     estimates
//!          ┌──────────────────┴──────────────────┐
//!          ▼                                     ▼
//!   ┌─────────────┐   snapshot()   ┌──────────────────────────┐
//!   │  GameState  │ ─────────────▶ │ Simulator / beating_hands │
//!   └─────────────┘                └────────────┬─────────────┘
//!                                               │ Evaluator
//!                                               ▼
//!                                     ┌───────────────────┐
//!                                     │ StandardEvaluator │
//!                                     └───────────────────┘
//! ```

pub mod cards;
pub mod error;
pub mod eval;
pub mod game;
pub mod session;
pub mod sim;

pub use cards::{parse_cards, Card, CardSet, HoleCards};
pub use error::{OddsError, Result};
pub use eval::{Evaluator, HandCategory, Score, StandardEvaluator};
pub use game::{DealReport, GameSnapshot, GameState, OpponentHand};
pub use session::{HandSummary, Session};
pub use sim::{CancelToken, Estimate, SimConfig, Simulator};
