//! Monte Carlo estimation.
//!
//! ## Modules
//!
//! - `config`: `SimConfig`, trial counts, threading, seeding and timeouts
//! - `engine`: `Simulator`, the batched parallel estimator
//! - `outs`: enumeration of holdings that beat the player right now

pub mod config;
pub mod engine;
pub mod outs;

pub use config::{ConfigError, SimConfig, DEFAULT_BATCH_SIZE, DEFAULT_TRIALS};
pub use engine::{CancelToken, Estimate, ProgressFn, Simulator};
pub use outs::{beating_hands, combinations};
