//! Move generators: the injected source of opponent (and simulated player) moves.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::engine::models::Move;

/// Produces one move per round.
pub trait MoveGenerator: Send {
    fn next_move(&mut self) -> Move;

    /// Called after each round with this side's move and the other side's move.
    fn observe(&mut self, _own: Move, _other: Move) {}

    fn name(&self) -> &str {
        "custom"
    }
}

impl<F> MoveGenerator for F
where
    F: FnMut() -> Move + Send,
{
    fn next_move(&mut self) -> Move {
        self()
    }
}

/// Uniform choice over the three moves, independent per call.
pub struct RandomMoves {
    rng: StdRng,
}

impl RandomMoves {
    pub fn from_entropy() -> Self {
        Self { rng: StdRng::from_entropy() }
    }

    pub fn seeded(seed: u64) -> Self {
        Self { rng: StdRng::seed_from_u64(seed) }
    }

    pub fn new(seed: Option<u64>) -> Self {
        match seed {
            Some(s) => Self::seeded(s),
            None => Self::from_entropy(),
        }
    }
}

impl MoveGenerator for RandomMoves {
    fn next_move(&mut self) -> Move {
        Move::ALL[self.rng.gen_range(0..Move::ALL.len())]
    }

    fn name(&self) -> &str {
        "random"
    }
}

/// Replays a fixed sequence, wrapping around when exhausted.
pub struct ScriptedMoves {
    moves: Vec<Move>,
    cursor: usize,
}

impl ScriptedMoves {
    /// An empty script degrades to always playing Rock.
    pub fn new(moves: Vec<Move>) -> Self {
        Self { moves, cursor: 0 }
    }
}

impl MoveGenerator for ScriptedMoves {
    fn next_move(&mut self) -> Move {
        if self.moves.is_empty() {
            return Move::Rock;
        }
        let m = self.moves[self.cursor % self.moves.len()];
        self.cursor += 1;
        m
    }

    fn name(&self) -> &str {
        "script"
    }
}

pub struct ConstantMoves(pub Move);

impl MoveGenerator for ConstantMoves {
    fn next_move(&mut self) -> Move {
        self.0
    }

    fn name(&self) -> &str {
        self.0.as_str()
    }
}

/// Rock, Paper, Scissors, Rock, ...
#[derive(Default)]
pub struct CyclingMoves {
    next: usize,
}

impl MoveGenerator for CyclingMoves {
    fn next_move(&mut self) -> Move {
        let m = Move::ALL[self.next % Move::ALL.len()];
        self.next += 1;
        m
    }

    fn name(&self) -> &str {
        "cycle"
    }
}

/// Plays whatever beats the other side's previous move; random on the first round.
pub struct BeatLastMoves {
    last_seen: Option<Move>,
    fallback: RandomMoves,
}

impl BeatLastMoves {
    pub fn new(seed: Option<u64>) -> Self {
        Self { last_seen: None, fallback: RandomMoves::new(seed) }
    }
}

impl MoveGenerator for BeatLastMoves {
    fn next_move(&mut self) -> Move {
        match self.last_seen {
            Some(m) => m.counter(),
            None => self.fallback.next_move(),
        }
    }

    fn observe(&mut self, _own: Move, other: Move) {
        self.last_seen = Some(other);
    }

    fn name(&self) -> &str {
        "beat-last"
    }
}

/// Build a generator from a textual spec: `random`, `rock`, `paper`, `scissors`,
/// `cycle`, `beat-last` or `script:rock,paper,...`.
pub fn build_generator(spec: &str, seed: Option<u64>) -> Result<Box<dyn MoveGenerator>, String> {
    let spec = spec.trim();
    if let Some(list) = spec.strip_prefix("script:") {
        let moves = list
            .split(',')
            .filter(|s| !s.trim().is_empty())
            .map(|s| s.parse::<Move>().map_err(|e| e.to_string()))
            .collect::<Result<Vec<_>, _>>()?;
        if moves.is_empty() {
            return Err("script strategy needs at least one move".into());
        }
        return Ok(Box::new(ScriptedMoves::new(moves)));
    }
    match spec.to_ascii_lowercase().as_str() {
        "random" => Ok(Box::new(RandomMoves::new(seed))),
        "cycle" => Ok(Box::new(CyclingMoves::default())),
        "beat-last" => Ok(Box::new(BeatLastMoves::new(seed))),
        other => other
            .parse::<Move>()
            .map(|m| Box::new(ConstantMoves(m)) as Box<dyn MoveGenerator>)
            .map_err(|_| format!("unknown strategy: {}", spec)),
    }
}
