//! Interactive odds tracker.
//!
//! Follows one hand from the player's seat: enter board cards as they come,
//! mark revealed cards, and ask for win, equity or hit probabilities at any
//! point. Type `help` at the prompt for the command list.

mod command;

use std::error::Error;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;

use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use log::info;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;

use poker_odds::eval::HandCategory;
use poker_odds::sim::combinations;
use poker_odds::{CardSet, DealReport, Estimate, HoleCards, OddsError, Session, SimConfig};

use command::Command;

#[derive(Parser, Debug)]
#[command(
    name = "odds",
    about = "Track a Texas Hold'em hand and estimate its odds",
    long_about = "Track a Texas Hold'em hand card by card and estimate win probability,\n\
                  multiway equity and opponent hand probabilities by Monte Carlo simulation."
)]
struct Args {
    /// Players at the table, yourself included (2-15)
    #[arg(short, long, default_value_t = 2)]
    players: usize,

    /// Your hole cards, e.g. "As Kd" or "AsKd"; random if omitted
    #[arg(long)]
    hole: Option<String>,

    /// JSON file with simulation settings
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Trials per estimation (overrides config)
    #[arg(short = 'n', long)]
    trials: Option<u64>,

    /// Trials per batch (overrides config)
    #[arg(long)]
    batch_size: Option<u64>,

    /// Worker threads (overrides config; default all cores)
    #[arg(short, long)]
    threads: Option<usize>,

    /// Random seed for dealing and simulation (overrides config)
    #[arg(short, long)]
    seed: Option<u64>,

    /// Stop each estimation after this many milliseconds (overrides config)
    #[arg(long)]
    timeout_ms: Option<u64>,

    /// Log filter used when RUST_LOG is unset
    #[arg(long, default_value = "warn")]
    log_level: String,

    /// Print results as JSON
    #[arg(long)]
    json: bool,

    /// Hide the progress bar
    #[arg(long)]
    no_progress: bool,
}

impl Args {
    fn sim_config(&self) -> Result<SimConfig, OddsError> {
        let mut config = match &self.config {
            Some(path) => SimConfig::from_json_file(path)?,
            None => SimConfig::default(),
        };
        if let Some(trials) = self.trials {
            config = config.with_trials(trials);
        }
        if let Some(batch_size) = self.batch_size {
            config = config.with_batch_size(batch_size);
        }
        if let Some(threads) = self.threads {
            config = config.with_threads(threads);
        }
        if let Some(seed) = self.seed {
            config = config.with_seed(seed);
        }
        if let Some(timeout_ms) = self.timeout_ms {
            config = config.with_timeout_ms(timeout_ms);
        }
        config.validate()?;
        Ok(config)
    }
}

/// Prompt loop state.
struct Repl {
    session: Session,
    json: bool,
    progress: bool,
}

fn main() {
    let args = Args::parse();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&args.log_level))
        .init();

    if let Err(err) = run(args) {
        eprintln!("error: {}", err);
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<(), Box<dyn Error>> {
    let config = args.sim_config()?;
    let hole = match &args.hole {
        Some(text) => text.parse::<HoleCards>()?,
        None => random_hole_cards(config.seed)?,
    };
    info!("starting with {:?}", config);

    let mut repl = Repl {
        session: Session::new(args.players, hole, config)?,
        json: args.json,
        progress: !args.no_progress,
    };
    println!(
        "{} players, your hand: {}. Type `help` for commands.",
        args.players, hole
    );

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        print!("> ");
        io::stdout().flush()?;
        let Some(line) = lines.next() else {
            break;
        };
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        match Command::parse_line(&line) {
            Ok(Command::Exit) => break,
            Ok(command) => {
                if let Err(err) = repl.handle(command) {
                    eprintln!("error: {}", err);
                }
            }
            Err(err) => {
                let _ = err.print();
            }
        }
    }
    Ok(())
}

fn random_hole_cards(seed: Option<u64>) -> Result<HoleCards, OddsError> {
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let mut deck = CardSet::full();
    match deck.draw(2, &mut rng).as_deref() {
        Some(&[card1, card2]) => HoleCards::new(card1, card2),
        _ => Err(OddsError::EmptyDeck {
            needed: 2,
            remaining: deck.len(),
        }),
    }
}

/// Progress callback that only ever moves `bar` forward.
///
/// Worker threads report finished-trial counts out of order; each call adds
/// only the part beyond the largest count seen so far.
fn progress_sink(bar: ProgressBar) -> impl Fn(u64) + Send + Sync + 'static {
    let seen = AtomicU64::new(0);
    move |done| {
        let prev = seen.fetch_max(done, Ordering::Relaxed);
        if done > prev {
            bar.inc(done - prev);
        }
    }
}

impl Repl {
    fn handle(&mut self, command: Command) -> Result<(), Box<dyn Error>> {
        match command {
            Command::NewGame {
                players,
                card1,
                card2,
            } => {
                match (card1, card2) {
                    (Some(card1), Some(card2)) => {
                        self.session
                            .new_game(players, HoleCards::new(card1, card2)?)?;
                    }
                    (None, None) => {
                        let hole = self.session.state().player_hand();
                        self.session.new_game(players, hole)?;
                        self.session.deal_hole_cards()?;
                    }
                    _ => return Err("newgame takes either no cards or two cards".into()),
                }
                println!(
                    "new game: {} players, your hand: {}",
                    players,
                    self.session.state().player_hand()
                );
            }
            Command::Flop {
                card1,
                card2,
                card3,
            } => {
                if !self.session.state().board().is_empty() {
                    return Err("the flop is already on the board".into());
                }
                let report = self.session.update_board_tokens(&[card1, card2, card3]);
                self.print_report(report);
            }
            Command::Turn { card } | Command::River { card } => {
                let report = self.session.update_board_tokens(&[card]);
                self.print_report(report);
            }
            Command::CalculateWin => {
                let estimate = self.estimate(|session| session.calculate_win_probabilities())?;
                self.print_estimate("win", &estimate);
            }
            Command::CalculateEquity => {
                let estimate = self.estimate(|session| session.calculate_equity())?;
                self.print_estimate("equity", &estimate);
            }
            Command::CalculateHit { hand_type } => {
                if hand_type.is_empty() {
                    for category in HandCategory::ALL.iter().rev() {
                        let estimate = self.estimate(|session| {
                            session.calculate_hand_probability(category.key())
                        })?;
                        self.print_estimate(category.name(), &estimate);
                    }
                } else {
                    let name = hand_type.join(" ");
                    let estimate =
                        self.estimate(|session| session.calculate_hand_probability(&name))?;
                    self.print_estimate(&name, &estimate);
                }
            }
            Command::Revealed { card } => {
                self.session.reveal_card(card)?;
                println!("revealed {}", card);
            }
            Command::AddToPlayer { name, card } => {
                self.session.add_to_opponent_hand(&name, card)?;
                println!("{} holds {}", name, card);
            }
            Command::Outs => self.print_outs()?,
            Command::ShowHands => self.print_hands()?,
            Command::Exit => {}
        }
        Ok(())
    }

    /// Run one estimation, driving a progress bar when enabled.
    fn estimate<F>(&mut self, run: F) -> Result<Estimate, OddsError>
    where
        F: FnOnce(&mut Session) -> Result<Estimate, OddsError>,
    {
        let started = Instant::now();
        if !self.progress {
            return run(&mut self.session);
        }

        let bar = ProgressBar::new(self.session.simulator().config().trials);
        let style = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})")
            .map(|style| style.progress_chars("#>-"))
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        bar.set_style(style);

        self.session
            .simulator_mut()
            .set_progress(Some(Arc::new(progress_sink(bar.clone()))));
        let result = run(&mut self.session);
        self.session.simulator_mut().set_progress(None);
        bar.finish_and_clear();

        info!("estimation took {:.2}s", started.elapsed().as_secs_f64());
        result
    }

    fn print_estimate(&self, label: &str, estimate: &Estimate) {
        if self.json {
            #[derive(Serialize)]
            struct Line<'a> {
                label: &'a str,
                probability: f64,
                tie_probability: f64,
                #[serde(flatten)]
                estimate: &'a Estimate,
            }
            let line = Line {
                label,
                probability: estimate.probability(),
                tie_probability: estimate.tie_probability(),
                estimate,
            };
            match serde_json::to_string(&line) {
                Ok(json) => println!("{}", json),
                Err(err) => eprintln!("error: {}", err),
            }
            return;
        }

        if estimate.ties > 0 {
            println!(
                "{:<16} {:>7.2}%  (ties {:.2}%, {} trials)",
                label,
                estimate.probability() * 100.0,
                estimate.tie_probability() * 100.0,
                estimate.trials
            );
        } else {
            println!(
                "{:<16} {:>7.2}%  ({} trials)",
                label,
                estimate.probability() * 100.0,
                estimate.trials
            );
        }
    }

    fn print_report(&self, report: DealReport) {
        for err in &report.rejected {
            eprintln!("rejected: {}", err);
        }
        let board = self.session.state().board();
        println!(
            "board: {}",
            board
                .iter()
                .map(|card| card.to_string())
                .collect::<Vec<_>>()
                .join(" ")
        );
    }

    fn print_outs(&self) -> Result<(), Box<dyn Error>> {
        let hands = self.session.get_beating_hands();
        let total = combinations(self.session.state().deck().len());
        if self.json {
            println!("{}", serde_json::to_string(&hands)?);
            return Ok(());
        }
        println!("{} of {} holdings beat you", hands.len(), total);
        for chunk in hands.chunks(10) {
            println!(
                "  {}",
                chunk
                    .iter()
                    .map(|hand| hand.to_string())
                    .collect::<Vec<_>>()
                    .join("  ")
            );
        }
        Ok(())
    }

    fn print_hands(&self) -> Result<(), Box<dyn Error>> {
        let summary = self.session.show_hand();
        let state = self.session.state();
        if self.json {
            println!("{}", serde_json::to_string(&summary)?);
            return Ok(());
        }
        println!("you: {}", summary);
        for opponent in state.opponents() {
            println!("{}", opponent);
        }
        if !state.burned().is_empty() {
            println!(
                "revealed: {}",
                state
                    .burned()
                    .iter()
                    .map(|card| card.to_string())
                    .collect::<Vec<_>>()
                    .join(" ")
            );
        }
        Ok(())
    }
}
