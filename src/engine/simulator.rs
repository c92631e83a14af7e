//! Synchronous session simulator — plays a full session without any UI.
//! Used by the arena, the bench and the scenario tests.

use serde::Serialize;

use crate::engine::models::*;
use crate::engine::opponent::{MoveGenerator, ScriptedMoves};
use crate::engine::round::{final_result, is_session_complete, play_round};

/// Every round of one session plus the final counters.
#[derive(Debug, Clone, Serialize)]
pub struct SessionReport {
    pub rounds: Vec<Round>,
    pub session: Session,
    pub result: GameOutcome,
}

/// Play rounds until the session is complete. `start` is normally a fresh
/// session; a partially played one is finished from where it stands.
pub fn play_session(
    start: Session,
    player: &mut dyn MoveGenerator,
    opponent: &mut dyn MoveGenerator,
) -> SessionReport {
    let mut session = start;
    let mut rounds = Vec::with_capacity(session.moves_left() as usize);

    while !is_session_complete(&session) {
        let player_move = player.next_move();
        let (next, round) = play_round(session, player_move, opponent);
        player.observe(round.player_move, round.opponent_move);
        session = next;
        rounds.push(round);
    }

    SessionReport {
        rounds,
        result: final_result(&session),
        session,
    }
}

/// Play a fresh session from two fixed move lists (wrapping if shorter than a session).
pub fn replay(player_moves: &[Move], opponent_moves: &[Move]) -> SessionReport {
    let mut player = ScriptedMoves::new(player_moves.to_vec());
    let mut opponent = ScriptedMoves::new(opponent_moves.to_vec());
    play_session(Session::default(), &mut player, &mut opponent)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::opponent::{ConstantMoves, RandomMoves};

    #[test]
    fn test_session_has_ten_rounds() {
        let mut p = RandomMoves::seeded(1);
        let mut o = RandomMoves::seeded(2);
        let report = play_session(Session::default(), &mut p, &mut o);
        assert_eq!(report.rounds.len(), MOVES_PER_SESSION as usize);
        assert_eq!(report.session.moves_taken, MOVES_PER_SESSION);
        let wins = report.rounds.iter().filter(|r| r.outcome == RoundOutcome::PlayerWin).count();
        assert_eq!(wins as u32, report.session.player_score);
    }

    #[test]
    fn test_finishes_partial_session() {
        let start = Session { player_score: 2, computer_score: 1, moves_taken: 7 };
        let report = play_session(start, &mut ConstantMoves(Move::Paper), &mut ConstantMoves(Move::Rock));
        assert_eq!(report.rounds.len(), 3);
        assert_eq!(report.session.player_score, 5);
        assert_eq!(report.result, GameOutcome::PlayerWinsGame);
    }

    #[test]
    fn test_replay_all_ties() {
        let report = replay(&[Move::Rock], &[Move::Rock]);
        assert_eq!(report.session.player_score, 0);
        assert_eq!(report.session.computer_score, 0);
        assert_eq!(report.result, GameOutcome::TieGame);
    }
}
