//! Round-resolution properties and a scripted ten-round session.

use rps_game_engine::engine::models::*;
use rps_game_engine::engine::opponent::ScriptedMoves;
use rps_game_engine::engine::round::*;
use rps_game_engine::engine::simulator::{play_session, replay};

const PLAYER: [Move; 10] = [
    Move::Rock,
    Move::Rock,
    Move::Paper,
    Move::Scissors,
    Move::Paper,
    Move::Rock,
    Move::Scissors,
    Move::Paper,
    Move::Rock,
    Move::Scissors,
];

const OPPONENT: [Move; 10] = [
    Move::Scissors,
    Move::Rock,
    Move::Paper,
    Move::Paper,
    Move::Rock,
    Move::Scissors,
    Move::Scissors,
    Move::Rock,
    Move::Paper,
    Move::Rock,
];

#[test]
fn resolve_is_antisymmetric() {
    for a in Move::ALL {
        for b in Move::ALL {
            let ab = resolve_round(a, b);
            let ba = resolve_round(b, a);
            if a == b {
                assert_eq!(ab, RoundOutcome::Tie);
                assert_eq!(ba, RoundOutcome::Tie);
            } else {
                assert_ne!(ab, RoundOutcome::Tie, "{} vs {}", a, b);
                assert_eq!(ab, ba.reversed(), "{} vs {}", a, b);
                assert!(!(a.beats(b) && b.beats(a)));
            }
        }
    }
}

#[test]
fn every_move_ties_itself() {
    for m in Move::ALL {
        assert_eq!(resolve_round(m, m), RoundOutcome::Tie);
    }
}

#[test]
fn dominance_is_cyclic() {
    for m in Move::ALL {
        let beaten: Vec<Move> = Move::ALL.into_iter().filter(|&o| m.beats(o)).collect();
        let beaten_by: Vec<Move> = Move::ALL.into_iter().filter(|&o| o.beats(m)).collect();
        assert_eq!(beaten.len(), 1, "{} should beat exactly one move", m);
        assert_eq!(beaten_by.len(), 1, "{} should lose to exactly one move", m);
        assert_ne!(beaten[0], m);
        assert_ne!(beaten_by[0], m);
        assert_ne!(beaten[0], beaten_by[0]);
    }
}

#[test]
fn complete_only_after_ten_outcomes() {
    let mut session = reset_session();
    for i in 0..MOVES_PER_SESSION {
        assert!(!is_session_complete(&session), "complete after {} rounds", i);
        session = apply_outcome(session, RoundOutcome::Tie);
    }
    assert!(is_session_complete(&session));
    assert_eq!(session.moves_taken, 10);
}

#[test]
fn final_result_follows_scores() {
    let session = Session { player_score: 6, computer_score: 4, moves_taken: 10 };
    assert_eq!(final_result(&session), GameOutcome::PlayerWinsGame);
}

#[test]
fn reset_clears_everything() {
    let played = Session { player_score: 7, computer_score: 2, moves_taken: 10 };
    assert!(is_session_complete(&played));
    let fresh = reset_session();
    assert_eq!(fresh, Session { player_score: 0, computer_score: 0, moves_taken: 0 });
    assert!(!is_session_complete(&fresh));
}

#[test]
fn scripted_session_scenario() {
    use RoundOutcome::*;
    let expected = [
        PlayerWin, Tie, Tie, PlayerWin, PlayerWin, PlayerWin, Tie, PlayerWin, ComputerWin, ComputerWin,
    ];

    let mut opponent = ScriptedMoves::new(OPPONENT.to_vec());
    let mut session = reset_session();
    for (i, player_move) in PLAYER.into_iter().enumerate() {
        let (next, round) = play_round(session, player_move, &mut opponent);
        assert_eq!(round.opponent_move, OPPONENT[i]);
        assert_eq!(round.outcome, expected[i], "round {}", i + 1);
        session = next;
    }

    assert_eq!(session.player_score, 5);
    assert_eq!(session.computer_score, 2);
    assert!(is_session_complete(&session));
    assert_eq!(final_result(&session), GameOutcome::PlayerWinsGame);
}

#[test]
fn scripted_session_through_simulator() {
    let report = replay(&PLAYER, &OPPONENT);
    assert_eq!(report.rounds.len(), 10);
    assert_eq!(report.session, Session { player_score: 5, computer_score: 2, moves_taken: 10 });
    assert_eq!(report.result, GameOutcome::PlayerWinsGame);

    let mut player = ScriptedMoves::new(PLAYER.to_vec());
    let mut opponent = ScriptedMoves::new(OPPONENT.to_vec());
    let again = play_session(Session::default(), &mut player, &mut opponent);
    assert_eq!(again.rounds, report.rounds);
}

#[test]
fn injected_closure_drives_opponent() {
    let mut script = OPPONENT.into_iter().cycle();
    let mut opponent = move || script.next().unwrap_or(Move::Rock);
    assert_eq!(choose_opponent_move(&mut opponent), Move::Scissors);
    assert_eq!(choose_opponent_move(&mut opponent), Move::Rock);
}
