//! Rendering-independent view model: what the screen shows right now.

use serde::Serialize;

use crate::engine::models::{GameOutcome, Round, Session, MOVES_PER_SESSION};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Screen {
    /// Name-entry form.
    Setup,
    Game,
}

/// Color hint for the result line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Tone {
    Neutral,
    /// blue
    Win,
    /// red
    Loss,
    /// grey
    Tie,
}

impl From<GameOutcome> for Tone {
    fn from(outcome: GameOutcome) -> Self {
        match outcome {
            GameOutcome::PlayerWinsGame => Tone::Win,
            GameOutcome::ComputerWinsGame => Tone::Loss,
            GameOutcome::TieGame => Tone::Tie,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct View {
    pub screen: Screen,
    pub player_name: String,
    /// Inline message under the name field.
    pub validation_message: Option<String>,
    /// The most recently revealed round.
    pub last_round: Option<Round>,
    pub result_text: String,
    pub result_tone: Tone,
    pub player_score: u32,
    pub computer_score: u32,
    pub moves_left: u32,
    pub choices_visible: bool,
    pub reset_visible: bool,
}

impl Default for View {
    fn default() -> Self {
        Self {
            screen: Screen::Setup,
            player_name: String::new(),
            validation_message: None,
            last_round: None,
            result_text: String::new(),
            result_tone: Tone::Neutral,
            player_score: 0,
            computer_score: 0,
            moves_left: MOVES_PER_SESSION,
            choices_visible: true,
            reset_visible: false,
        }
    }
}

impl View {
    pub fn show_scores(&mut self, session: &Session) {
        self.player_score = session.player_score;
        self.computer_score = session.computer_score;
    }

    pub fn show_moves_left(&mut self, session: &Session) {
        self.moves_left = session.moves_left();
    }

    pub fn show_game_over(&mut self, outcome: GameOutcome) {
        self.choices_visible = false;
        self.reset_visible = true;
        self.result_text = outcome.message().to_string();
        self.result_tone = outcome.into();
    }

    /// Choices back, result cleared, reset hidden.
    pub fn show_choices(&mut self) {
        self.choices_visible = true;
        self.reset_visible = false;
        self.last_round = None;
        self.result_text.clear();
        self.result_tone = Tone::Neutral;
    }
}
