//! UI-layer state machine.
//!
//! Owns the session, the view model, the store and the opponent. Each player
//! action is handled to completion; the delayed round reveal comes back in as
//! a timer ticket via [`GameController::on_timer`].

use thiserror::Error;

use crate::engine::config::{GameSettings, ResetPolicy};
use crate::engine::models::*;
use crate::engine::opponent::MoveGenerator;
use crate::engine::round::{final_result, is_session_complete, play_round, reset_session};
use crate::store::{clear_scores, load_record, save_name, save_scores, KeyValueStore};
use crate::ui::scheduler::{Scheduler, TaskHandle, Ticket};
use crate::ui::view::{Screen, Tone, View};

pub const NAME_REQUIRED_MESSAGE: &str = "Please enter your name.";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SetupError {
    #[error("Please enter your name.")]
    EmptyName,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SubmitError {
    #[error("enter your name before playing")]
    NotStarted,
    #[error("the game is over, reset to play again")]
    SessionComplete,
    #[error("wait for the current round to be revealed")]
    RevealPending,
}

/// A round whose result has been decided but not yet shown.
struct PendingReveal {
    handle: TaskHandle,
    round: Round,
    session: Session,
}

pub struct GameController {
    settings: GameSettings,
    store: Box<dyn KeyValueStore>,
    opponent: Box<dyn MoveGenerator>,
    scheduler: Box<dyn Scheduler>,
    session: Session,
    view: View,
    pending: Option<PendingReveal>,
    next_ticket: u64,
}

impl GameController {
    pub fn new(
        settings: GameSettings,
        store: Box<dyn KeyValueStore>,
        opponent: Box<dyn MoveGenerator>,
        scheduler: Box<dyn Scheduler>,
    ) -> Self {
        let record = load_record(store.as_ref());
        let view = View {
            player_name: record.player_name,
            ..View::default()
        };
        Self {
            settings,
            store,
            opponent,
            scheduler,
            session: reset_session(),
            view,
            pending: None,
            next_ticket: 1,
        }
    }

    pub fn view(&self) -> &View {
        &self.view
    }

    pub fn session(&self) -> Session {
        self.session
    }

    pub fn settings(&self) -> &GameSettings {
        &self.settings
    }

    pub fn store(&self) -> &dyn KeyValueStore {
        self.store.as_ref()
    }

    pub fn has_pending_reveal(&self) -> bool {
        self.pending.is_some()
    }

    /// Start the game under `raw_name`. Blank names leave the setup screen up
    /// with a validation message.
    pub fn submit_name(&mut self, raw_name: &str) -> Result<(), SetupError> {
        let name = raw_name.trim();
        if name.is_empty() {
            self.view.validation_message = Some(NAME_REQUIRED_MESSAGE.to_string());
            return Err(SetupError::EmptyName);
        }

        if let Err(e) = save_name(self.store.as_mut(), name) {
            tracing::warn!(error = %e, "failed to persist player name");
        }
        let record = load_record(self.store.as_ref());
        self.session = Session::from_record(&record);

        self.view.player_name = name.to_string();
        self.view.validation_message = None;
        self.view.screen = Screen::Game;
        self.view.show_choices();
        self.view.show_moves_left(&self.session);
        self.view.show_scores(&self.session);
        self.persist_scores();

        tracing::info!(
            player = name,
            player_score = self.session.player_score,
            computer_score = self.session.computer_score,
            "session started"
        );
        Ok(())
    }

    /// Play one round. The moves-left counter updates now; the result and the
    /// scoreboard update when the reveal ticket comes back.
    pub fn submit_move(&mut self, player_move: Move) -> Result<Round, SubmitError> {
        if self.view.screen != Screen::Game {
            return Err(SubmitError::NotStarted);
        }
        if is_session_complete(&self.session) {
            return Err(SubmitError::SessionComplete);
        }
        if let Some(pending) = self.pending.take() {
            if self.settings.lock_input_during_reveal {
                self.pending = Some(pending);
                return Err(SubmitError::RevealPending);
            }
            pending.handle.cancel();
            self.reveal(pending.round, pending.session);
        }

        let (session, round) = play_round(self.session, player_move, self.opponent.as_mut());
        self.session = session;
        if round.outcome != RoundOutcome::Tie {
            self.persist_scores();
        }
        self.view.show_moves_left(&self.session);

        let ticket = Ticket(self.next_ticket);
        self.next_ticket += 1;
        let handle = self.scheduler.schedule(self.settings.reveal_delay(), ticket);
        self.pending = Some(PendingReveal { handle, round, session });

        tracing::debug!(
            %player_move,
            outcome = ?round.outcome,
            moves_taken = session.moves_taken,
            "round submitted"
        );
        Ok(round)
    }

    /// Deliver a timer ticket. Returns false for tickets that no longer match
    /// the pending reveal.
    pub fn on_timer(&mut self, ticket: Ticket) -> bool {
        match self.pending.take() {
            Some(pending) if pending.handle.ticket() == ticket => {
                self.reveal(pending.round, pending.session);
                true
            }
            other => {
                self.pending = other;
                tracing::debug!(?ticket, "stale reveal ticket ignored");
                false
            }
        }
    }

    /// Clear the session and the stored scores and bring the choices back.
    pub fn reset(&mut self) {
        if let Some(pending) = self.pending.take() {
            pending.handle.cancel();
        }
        self.session = reset_session();
        if let Err(e) = clear_scores(self.store.as_mut()) {
            tracing::warn!(error = %e, "failed to clear stored scores");
        }

        self.view.show_scores(&self.session);
        self.view.show_moves_left(&self.session);
        self.view.show_choices();
        if self.settings.reset_policy == ResetPolicy::Reload {
            self.view.screen = Screen::Setup;
            self.view.validation_message = None;
        }
        tracing::info!(policy = ?self.settings.reset_policy, "session reset");
    }

    fn reveal(&mut self, round: Round, session: Session) {
        self.view.last_round = Some(round);
        self.view.result_text = round.outcome.message().to_string();
        self.view.result_tone = Tone::Neutral;
        self.view.show_scores(&session);

        if is_session_complete(&session) {
            let outcome = final_result(&session);
            self.view.show_game_over(outcome);
            tracing::info!(
                player_score = session.player_score,
                computer_score = session.computer_score,
                ?outcome,
                "session complete"
            );
        }
    }

    fn persist_scores(&mut self) {
        if let Err(e) = save_scores(self.store.as_mut(), &self.session) {
            tracing::warn!(error = %e, "failed to persist scores");
        }
    }
}
