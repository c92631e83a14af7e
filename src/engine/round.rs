//! Round resolution and session bookkeeping.
//!
//! Every function here is pure over an explicit [`Session`] value; the only
//! source of nondeterminism is the [`MoveGenerator`] passed in by the caller.

use crate::engine::models::*;
use crate::engine::opponent::MoveGenerator;

pub fn choose_opponent_move(generator: &mut dyn MoveGenerator) -> Move {
    generator.next_move()
}

pub fn resolve_round(player_move: Move, opponent_move: Move) -> RoundOutcome {
    if player_move == opponent_move {
        RoundOutcome::Tie
    } else if player_move.beats(opponent_move) {
        RoundOutcome::PlayerWin
    } else {
        RoundOutcome::ComputerWin
    }
}

/// Count the round and credit the winner. A complete session is returned unchanged.
pub fn apply_outcome(session: Session, outcome: RoundOutcome) -> Session {
    if is_session_complete(&session) {
        tracing::warn!(moves_taken = session.moves_taken, "outcome applied to a complete session, ignored");
        return session;
    }
    let mut next = session;
    match outcome {
        RoundOutcome::PlayerWin => next.player_score = next.player_score.saturating_add(1),
        RoundOutcome::ComputerWin => next.computer_score = next.computer_score.saturating_add(1),
        RoundOutcome::Tie => {}
    }
    next.moves_taken += 1;
    next
}

/// A session counts as complete once `moves_taken` reaches [`MOVES_PER_SESSION`].
/// Out-of-range values set through the public fields are treated as complete too,
/// so [`apply_outcome`] can never push the counter further.
pub fn is_session_complete(session: &Session) -> bool {
    session.moves_taken >= MOVES_PER_SESSION
}

pub fn final_result(session: &Session) -> GameOutcome {
    use std::cmp::Ordering;
    match session.player_score.cmp(&session.computer_score) {
        Ordering::Greater => GameOutcome::PlayerWinsGame,
        Ordering::Less => GameOutcome::ComputerWinsGame,
        Ordering::Equal => GameOutcome::TieGame,
    }
}

pub fn reset_session() -> Session {
    Session::default()
}

/// Choose the opponent's move, resolve against `player_move` and apply the outcome.
pub fn play_round(
    session: Session,
    player_move: Move,
    opponent: &mut dyn MoveGenerator,
) -> (Session, Round) {
    let opponent_move = choose_opponent_move(opponent);
    tracing::debug!(%opponent_move, "computer's choice");
    let outcome = resolve_round(player_move, opponent_move);
    opponent.observe(opponent_move, player_move);
    let round = Round { player_move, opponent_move, outcome };
    (apply_outcome(session, outcome), round)
}
