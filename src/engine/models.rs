//! Core engine data types: moves, outcomes, the session counters and the
//! record kept in the persistence store.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Number of rounds in one session.
pub const MOVES_PER_SESSION: u32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Move {
    Rock,
    Paper,
    Scissors,
}

impl Move {
    pub const ALL: [Move; 3] = [Move::Rock, Move::Paper, Move::Scissors];

    /// Cyclic dominance: Rock beats Scissors, Scissors beats Paper, Paper beats Rock.
    pub fn beats(self, other: Move) -> bool {
        matches!(
            (self, other),
            (Move::Rock, Move::Scissors) | (Move::Scissors, Move::Paper) | (Move::Paper, Move::Rock)
        )
    }

    /// The single move this one beats.
    pub fn victim(self) -> Move {
        match self {
            Move::Rock => Move::Scissors,
            Move::Paper => Move::Rock,
            Move::Scissors => Move::Paper,
        }
    }

    /// The single move that beats this one.
    pub fn counter(self) -> Move {
        match self {
            Move::Rock => Move::Paper,
            Move::Paper => Move::Scissors,
            Move::Scissors => Move::Rock,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Move::Rock => "rock",
            Move::Paper => "paper",
            Move::Scissors => "scissors",
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown move {0:?}, expected rock, paper or scissors")]
pub struct MoveParseError(pub String);

impl FromStr for Move {
    type Err = MoveParseError;

    /// Case-insensitive; surrounding whitespace is ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "rock" => Ok(Move::Rock),
            "paper" => Ok(Move::Paper),
            "scissors" => Ok(Move::Scissors),
            _ => Err(MoveParseError(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoundOutcome {
    PlayerWin,
    ComputerWin,
    Tie,
}

impl RoundOutcome {
    /// The same round seen from the other side of the table.
    pub fn reversed(self) -> RoundOutcome {
        match self {
            RoundOutcome::PlayerWin => RoundOutcome::ComputerWin,
            RoundOutcome::ComputerWin => RoundOutcome::PlayerWin,
            RoundOutcome::Tie => RoundOutcome::Tie,
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            RoundOutcome::PlayerWin => "You Won",
            RoundOutcome::ComputerWin => "Computer Won",
            RoundOutcome::Tie => "It is a Tie",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameOutcome {
    PlayerWinsGame,
    ComputerWinsGame,
    TieGame,
}

impl GameOutcome {
    pub fn message(self) -> &'static str {
        match self {
            GameOutcome::PlayerWinsGame => "Hooray! You Won The Game",
            GameOutcome::ComputerWinsGame => "Oop! Sorry. You Lost The Game",
            GameOutcome::TieGame => "Wow! No Winner. It was a Tie",
        }
    }
}

/// Session counters. `moves_taken` never exceeds [`MOVES_PER_SESSION`] when
/// driven through `engine::round`; scores saturate at `u32::MAX`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Session {
    pub player_score: u32,
    pub computer_score: u32,
    pub moves_taken: u32,
}

impl Session {
    /// Fresh session carrying over the scores of a stored record.
    pub fn from_record(record: &PersistedRecord) -> Self {
        Self {
            player_score: record.player_score,
            computer_score: record.computer_score,
            moves_taken: 0,
        }
    }

    pub fn moves_left(&self) -> u32 {
        MOVES_PER_SESSION.saturating_sub(self.moves_taken)
    }

    pub fn is_active(&self) -> bool {
        self.moves_taken < MOVES_PER_SESSION
    }
}

/// One resolved round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Round {
    pub player_move: Move,
    pub opponent_move: Move,
    pub outcome: RoundOutcome,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PersistedRecord {
    pub player_name: String,
    pub player_score: u32,
    pub computer_score: u32,
}
