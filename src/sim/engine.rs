//! Monte Carlo simulation engine.
//!
//! Every estimation follows the same plan:
//!
//! 1. Freeze the inputs from a [`GameSnapshot`] (known cards, sampling pool,
//!    number of board cards still to come).
//! 2. Draw one seed per batch from a sequential base RNG.
//! 3. Run the batches on rayon; each batch owns its RNG and scratch buffers.
//! 4. Sum the per-batch counts.
//!
//! Because the per-batch seeds are fixed before any work starts and the
//! reduction is a plain sum, a seeded estimation returns the same result no
//! matter how many threads run it.

use log::{debug, info};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;

use super::config::SimConfig;
use crate::cards::{Card, CardSet};
use crate::error::{OddsError, Result};
use crate::eval::{normalize_name, Evaluator, Score, StandardEvaluator};
use crate::game::{GameSnapshot, OpponentHand, HAND_SIZE};

/// Counts produced by an estimation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Estimate {
    /// Trials that actually ran.
    pub trials: u64,
    /// Trials meeting the estimation's condition (a win, or a category hit).
    pub hits: u64,
    /// Win estimations only: trials where the player tied the best opponent.
    pub ties: u64,
}

impl Estimate {
    /// Fraction of trials meeting the condition, in [0, 1].
    pub fn probability(&self) -> f64 {
        if self.trials == 0 {
            0.0
        } else {
            self.hits as f64 / self.trials as f64
        }
    }

    /// Fraction of trials that ended in a tie, in [0, 1].
    pub fn tie_probability(&self) -> f64 {
        if self.trials == 0 {
            0.0
        } else {
            self.ties as f64 / self.trials as f64
        }
    }

    fn merge(self, other: Estimate) -> Estimate {
        Estimate {
            trials: self.trials + other.trials,
            hits: self.hits + other.hits,
            ties: self.ties + other.ties,
        }
    }
}

impl fmt::Display for Estimate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:.2}% ({} of {} trials)",
            self.probability() * 100.0,
            self.hits,
            self.trials
        )
    }
}

/// Shared flag that stops an estimation between batches.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    /// Clear the flag so the token can be reused.
    pub fn reset(&self) {
        self.0.store(false, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Called after each batch with the number of trials finished so far.
///
/// Batches finish on worker threads, so calls are concurrent and the counts
/// may arrive out of order. The largest count seen is the true progress.
pub type ProgressFn = dyn Fn(u64) + Send + Sync;

/// What a trial counts as a hit.
#[derive(Debug, Clone, Copy)]
enum Condition {
    /// The player's score beats every opponent.
    PlayerWins,
    /// Some opponent reaches at least this score.
    OpponentReaches(Score),
}

/// Inputs of one estimation, frozen before any trial runs.
#[derive(Debug, Clone)]
struct TrialPlan {
    player: [Card; 2],
    /// Board and burned cards.
    community: Vec<Card>,
    /// Known cards of each opponent.
    opponents: Vec<Vec<Card>>,
    /// Cards trials may draw from.
    pool: Vec<Card>,
    missing_board: usize,
    /// Cards drawn per trial: the missing board plus missing opponent cards.
    draw_count: usize,
}

impl TrialPlan {
    fn new(
        player: [Card; 2],
        community: Vec<Card>,
        opponents: Vec<Vec<Card>>,
        pool: Vec<Card>,
        missing_board: usize,
    ) -> Result<Self> {
        let missing_hole: usize = opponents
            .iter()
            .map(|cards| HAND_SIZE.saturating_sub(cards.len()))
            .sum();
        let draw_count = missing_board + missing_hole;
        if draw_count > pool.len() {
            return Err(OddsError::EmptyDeck {
                needed: draw_count,
                remaining: pool.len(),
            });
        }
        Ok(Self {
            player,
            community,
            opponents,
            pool,
            missing_board,
            draw_count,
        })
    }

    fn from_snapshot(snapshot: &GameSnapshot) -> Result<Self> {
        Self::new(
            snapshot.player.cards(),
            snapshot.community(),
            snapshot.opponents.iter().map(|opp| opp.cards.clone()).collect(),
            snapshot.deck.to_vec(),
            snapshot.missing_board_cards(),
        )
    }
}

/// Monte Carlo estimator over game snapshots.
///
/// The simulator never touches a `GameState`; it reads a `GameSnapshot` and
/// returns counts.
#[derive(Clone)]
pub struct Simulator<E: Evaluator = StandardEvaluator> {
    evaluator: E,
    config: SimConfig,
    cancel: CancelToken,
    progress: Option<Arc<ProgressFn>>,
    /// Dedicated workers when `config.num_threads` is set.
    pool: Option<Arc<ThreadPool>>,
}

impl Simulator<StandardEvaluator> {
    /// Simulator with the bundled evaluator.
    pub fn standard(config: SimConfig) -> Result<Self> {
        Self::new(StandardEvaluator::new(), config)
    }
}

impl<E: Evaluator> Simulator<E> {
    pub fn new(evaluator: E, config: SimConfig) -> Result<Self> {
        config.validate()?;
        let pool = build_pool(&config)?;
        Ok(Self {
            evaluator,
            config,
            cancel: CancelToken::new(),
            progress: None,
            pool,
        })
    }

    /// Builder method: share a cancellation token.
    pub fn with_cancel_token(mut self, token: CancelToken) -> Self {
        self.cancel = token;
        self
    }

    /// Builder method: report progress after every batch.
    pub fn with_progress<F>(mut self, progress: F) -> Self
    where
        F: Fn(u64) + Send + Sync + 'static,
    {
        self.progress = Some(Arc::new(progress));
        self
    }

    pub fn set_progress(&mut self, progress: Option<Arc<ProgressFn>>) {
        self.progress = progress;
    }

    /// Replace the configuration. The worker pool is rebuilt only when the
    /// thread count changes.
    pub fn set_config(&mut self, config: SimConfig) -> Result<()> {
        config.validate()?;
        if config.num_threads != self.config.num_threads {
            self.pool = build_pool(&config)?;
        }
        self.config = config;
        Ok(())
    }

    pub fn evaluator(&self) -> &E {
        &self.evaluator
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn cancel_token(&self) -> &CancelToken {
        &self.cancel
    }

    /// Estimate how often the player beats every given opponent hand.
    ///
    /// Each trial completes the board from the snapshot's deck and counts a
    /// win only when the player's score is strictly better than every
    /// opponent's. Every opponent hand must hold two cards. Cards of the
    /// supplied hands that are still in the snapshot's deck are left out of
    /// the sampling pool.
    pub fn simulate_remaining_game(
        &self,
        snapshot: &GameSnapshot,
        opponent_hands: &[OpponentHand],
    ) -> Result<Estimate> {
        if let Some(opp) = opponent_hands.iter().find(|opp| !opp.is_complete()) {
            return Err(OddsError::IncompleteHand {
                owner: opp.name.clone(),
                cards: opp.cards.len(),
            });
        }

        let mut taken: CardSet = snapshot.player.cards().iter().collect();
        for &card in snapshot.board.iter().chain(&snapshot.burned) {
            taken.insert(card);
        }
        for opp in opponent_hands {
            for &card in &opp.cards {
                if !taken.insert(card) {
                    return Err(OddsError::DuplicateCard(card));
                }
            }
        }

        let plan = TrialPlan::new(
            snapshot.player.cards(),
            snapshot.community(),
            opponent_hands.iter().map(|opp| opp.cards.clone()).collect(),
            snapshot.deck.difference(&taken).to_vec(),
            snapshot.missing_board_cards(),
        )?;
        self.run(&plan, Condition::PlayerWins)
    }

    /// Estimate the player's win probability against the snapshot's
    /// opponents, drawing every unknown opponent card afresh in each trial.
    pub fn equity(&self, snapshot: &GameSnapshot) -> Result<Estimate> {
        let plan = TrialPlan::from_snapshot(snapshot)?;
        self.run(&plan, Condition::PlayerWins)
    }

    /// Estimate the probability that at least one opponent finishes with the
    /// named category or better.
    ///
    /// This measures the opponents, not the player. Unknown opponent cards are
    /// drawn afresh in each trial.
    pub fn hand_probability(&self, snapshot: &GameSnapshot, hand_type: &str) -> Result<Estimate> {
        let threshold = self
            .evaluator
            .threshold(&normalize_name(hand_type))
            .ok_or_else(|| OddsError::InvalidHandType(hand_type.to_string()))?;
        let plan = TrialPlan::from_snapshot(snapshot)?;
        self.run(&plan, Condition::OpponentReaches(threshold))
    }

    fn run(&self, plan: &TrialPlan, condition: Condition) -> Result<Estimate> {
        let config = &self.config;
        let num_batches = config.num_batches();
        let mut base_rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let seeds: Vec<u64> = (0..num_batches).map(|_| base_rng.gen()).collect();
        let deadline = config.timeout().map(|timeout| Instant::now() + timeout);
        let finished = AtomicU64::new(0);

        debug!(
            "running {} trials in {} batches: {} opponents, {} cards drawn per trial from {}",
            config.trials,
            num_batches,
            plan.opponents.len(),
            plan.draw_count,
            plan.pool.len()
        );

        let work = || {
            seeds
                .par_iter()
                .enumerate()
                .map(|(batch, &seed)| {
                    let expired = deadline.is_some_and(|deadline| Instant::now() >= deadline);
                    if expired || self.cancel.is_cancelled() {
                        return Estimate::default();
                    }

                    let start = batch as u64 * config.batch_size;
                    let trials = config.batch_size.min(config.trials - start);
                    let estimate = self.run_batch(plan, condition, seed, trials);

                    let done = finished.fetch_add(trials, Ordering::Relaxed) + trials;
                    if let Some(progress) = &self.progress {
                        progress(done);
                    }
                    estimate
                })
                .reduce(Estimate::default, Estimate::merge)
        };

        let started = Instant::now();
        let total = match &self.pool {
            Some(pool) => pool.install(work),
            None => work(),
        };

        if total.trials == 0 {
            return Err(OddsError::Cancelled);
        }
        if total.trials < config.trials {
            info!("estimation stopped early after {} of {} trials", total.trials, config.trials);
        }
        info!(
            "estimate {} in {:.3}s",
            total,
            started.elapsed().as_secs_f64()
        );
        Ok(total)
    }

    /// Run `trials` trials with a private RNG and private buffers.
    fn run_batch(
        &self,
        plan: &TrialPlan,
        condition: Condition,
        seed: u64,
        trials: u64,
    ) -> Estimate {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut pool = plan.pool.clone();
        let mut community = plan.community.clone();
        let known_community = community.len();
        let mut hands = plan.opponents.clone();
        let mut scores = Vec::with_capacity(hands.len());
        let mut estimate = Estimate::default();

        for _ in 0..trials {
            let (drawn, _) = pool.partial_shuffle(&mut rng, plan.draw_count);

            community.truncate(known_community);
            community.extend_from_slice(&drawn[..plan.missing_board]);

            let mut offset = plan.missing_board;
            scores.clear();
            for (hand, known) in hands.iter_mut().zip(&plan.opponents) {
                let missing = HAND_SIZE.saturating_sub(known.len());
                hand.truncate(known.len());
                hand.extend_from_slice(&drawn[offset..offset + missing]);
                offset += missing;
                scores.push(self.evaluator.evaluate(hand, &community));
            }

            estimate.trials += 1;
            match condition {
                Condition::PlayerWins => {
                    let player = self.evaluator.evaluate(&plan.player, &community);
                    match scores.iter().min() {
                        Some(&best) if best == player => estimate.ties += 1,
                        Some(&best) if !player.beats(best) => {}
                        _ => estimate.hits += 1,
                    }
                }
                Condition::OpponentReaches(threshold) => {
                    if scores.iter().any(|score| score.at_least(threshold)) {
                        estimate.hits += 1;
                    }
                }
            }
        }

        estimate
    }
}

fn build_pool(config: &SimConfig) -> Result<Option<Arc<ThreadPool>>> {
    match config.num_threads {
        Some(threads) => {
            let pool = ThreadPoolBuilder::new().num_threads(threads).build()?;
            debug!("built worker pool with {} threads", threads);
            Ok(Some(Arc::new(pool)))
        }
        None => Ok(None),
    }
}
