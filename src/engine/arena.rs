//! Strategy-vs-strategy arena runner.
//!
//! Sessions are independent and seeded from `base_seed + index`, so they run
//! in parallel via rayon and still reproduce exactly.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;

use rayon::prelude::*;

use crate::engine::models::*;
use crate::engine::opponent::MoveGenerator;
use crate::engine::simulator::{play_session, SessionReport};

/// Builds a fresh generator for one session from that session's seed.
pub type GeneratorFactory = dyn Fn(u64) -> Box<dyn MoveGenerator> + Sync;

/// Aggregated results from an arena run.
pub struct ArenaResult {
    pub player_name: String,
    pub opponent_name: String,
    pub num_sessions: usize,
    pub player_wins: usize,
    pub computer_wins: usize,
    pub ties: usize,
    pub round_wins: u64,
    pub round_losses: u64,
    pub round_ties: u64,
    pub session_durations_ms: Vec<f64>,
}

impl ArenaResult {
    fn empty(player_name: String, opponent_name: String, num_sessions: usize) -> Self {
        Self {
            player_name,
            opponent_name,
            num_sessions,
            player_wins: 0,
            computer_wins: 0,
            ties: 0,
            round_wins: 0,
            round_losses: 0,
            round_ties: 0,
            session_durations_ms: Vec::new(),
        }
    }

    fn record(&mut self, report: &SessionReport, elapsed_ms: f64) {
        match report.result {
            GameOutcome::PlayerWinsGame => self.player_wins += 1,
            GameOutcome::ComputerWinsGame => self.computer_wins += 1,
            GameOutcome::TieGame => self.ties += 1,
        }
        for round in &report.rounds {
            match round.outcome {
                RoundOutcome::PlayerWin => self.round_wins += 1,
                RoundOutcome::ComputerWin => self.round_losses += 1,
                RoundOutcome::Tie => self.round_ties += 1,
            }
        }
        self.session_durations_ms.push(elapsed_ms);
    }

    pub fn win_rate(&self) -> f64 {
        self.player_wins as f64 / self.num_sessions.max(1) as f64
    }

    pub fn loss_rate(&self) -> f64 {
        self.computer_wins as f64 / self.num_sessions.max(1) as f64
    }

    /// Wilson score interval for the player's session win rate.
    pub fn confidence_interval_95(&self) -> (f64, f64) {
        let n = self.num_sessions;
        if n == 0 {
            return (0.0, 0.0);
        }
        let p = self.win_rate();
        let z = 1.96_f64;
        let denom = 1.0 + z * z / n as f64;
        let center = (p + z * z / (2.0 * n as f64)) / denom;
        let margin = z * ((p * (1.0 - p) + z * z / (4.0 * n as f64)) / n as f64).sqrt() / denom;
        ((center - margin).max(0.0), (center + margin).min(1.0))
    }

    pub fn summary(&self) -> String {
        let (ci_lo, ci_hi) = self.confidence_interval_95();
        let mut lines = vec![format!(
            "Arena Results ({} sessions): {} vs {}",
            self.num_sessions, self.player_name, self.opponent_name
        )];
        lines.push("=".repeat(60));
        lines.push(format!(
            "  {:>12}: {:5} ({:5.1}%)  [95% CI: {:.1}%-{:.1}%]",
            self.player_name,
            self.player_wins,
            self.win_rate() * 100.0,
            ci_lo * 100.0,
            ci_hi * 100.0,
        ));
        lines.push(format!(
            "  {:>12}: {:5} ({:5.1}%)",
            self.opponent_name,
            self.computer_wins,
            self.loss_rate() * 100.0,
        ));
        lines.push(format!("  {:>12}: {:5}", "Ties", self.ties));
        lines.push(format!(
            "  Rounds: won={} lost={} tied={}",
            self.round_wins, self.round_losses, self.round_ties
        ));
        if !self.session_durations_ms.is_empty() {
            let total_ms = self.session_durations_ms.iter().sum::<f64>();
            let avg_us = total_ms * 1000.0 / self.session_durations_ms.len() as f64;
            lines.push(format!("  Avg session: {:.1}us  |  Total: {:.1}ms", avg_us, total_ms));
        }
        lines.join("\n")
    }
}

/// Run `num_sessions` sessions between generators built by the two factories.
/// The opponent factory gets a seed offset so mirrored strategies do not play
/// identical sequences.
pub fn run_arena(
    player: &GeneratorFactory,
    opponent: &GeneratorFactory,
    num_sessions: usize,
    base_seed: u64,
    progress_callback: Option<&(dyn Fn(usize, usize) + Sync)>,
) -> ArenaResult {
    let done = AtomicUsize::new(0);

    let reports: Vec<(SessionReport, f64, String, String)> = (0..num_sessions)
        .into_par_iter()
        .map(|idx| {
            let seed = base_seed.wrapping_add(idx as u64);
            let mut p = player(seed);
            let mut o = opponent(seed.wrapping_add(0x9E37_79B9_7F4A_7C15));
            let t0 = Instant::now();
            let report = play_session(Session::default(), p.as_mut(), o.as_mut());
            let elapsed_ms = t0.elapsed().as_secs_f64() * 1000.0;

            let n = done.fetch_add(1, Ordering::Relaxed) + 1;
            if let Some(cb) = progress_callback {
                cb(n, num_sessions);
            }
            (report, elapsed_ms, p.name().to_string(), o.name().to_string())
        })
        .collect();

    let (player_name, opponent_name) = reports
        .first()
        .map(|(_, _, p, o)| (p.clone(), o.clone()))
        .unwrap_or_else(|| ("player".into(), "opponent".into()));

    let mut result = ArenaResult::empty(player_name, opponent_name, num_sessions);
    for (report, elapsed_ms, _, _) in &reports {
        result.record(report, *elapsed_ms);
    }
    tracing::info!(
        sessions = num_sessions,
        player_wins = result.player_wins,
        computer_wins = result.computer_wins,
        ties = result.ties,
        "arena finished"
    );
    result
}
