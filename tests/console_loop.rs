//! Drive the terminal loop with canned input under tokio's paused clock.

use rps_game_engine::engine::config::{GameSettings, ResetPolicy};
use rps_game_engine::engine::models::*;
use rps_game_engine::engine::opponent::ScriptedMoves;
use rps_game_engine::store::{MemoryStore, KEY_PLAYER_NAME};
use rps_game_engine::ui::console;
use rps_game_engine::ui::controller::GameController;
use rps_game_engine::ui::scheduler::TokioScheduler;
use rps_game_engine::ui::view::Screen;

fn controller(settings: GameSettings, opponent: Vec<Move>) -> (GameController, tokio::sync::mpsc::UnboundedReceiver<rps_game_engine::ui::scheduler::Ticket>) {
    let (scheduler, tickets) = TokioScheduler::new();
    let c = GameController::new(
        settings,
        Box::new(MemoryStore::new()),
        Box::new(ScriptedMoves::new(opponent)),
        Box::new(scheduler),
    );
    (c, tickets)
}

#[tokio::test(start_paused = true)]
async fn plays_a_whole_game_from_stdin() {
    let settings = GameSettings { lock_input_during_reveal: false, ..GameSettings::default() };
    let (mut c, mut tickets) = controller(settings, vec![Move::Scissors]);

    let input: &[u8] = b"\nAda\nr\nrock\nR\nROCK\nr\nr\nr\nr\nr\nr\npaper\n";
    let mut out: Vec<u8> = Vec::new();
    console::run(&mut c, &mut tickets, input, &mut out).await.unwrap();

    let text = String::from_utf8(out).unwrap();
    assert!(text.contains("Please enter your name."));
    assert!(text.contains("moves left: 0"));
    assert!(text.contains("the game is over"));
    assert!(text.contains("Ada 10 - 0 Computer"));
    assert!(text.contains("Hooray! You Won The Game"));

    assert_eq!(c.session(), Session { player_score: 10, computer_score: 0, moves_taken: 10 });
    assert!(!c.has_pending_reveal());
    assert!(!c.view().choices_visible);
}

#[tokio::test(start_paused = true)]
async fn locked_input_rejects_fast_clicks() {
    let (mut c, mut tickets) = controller(GameSettings::default(), vec![Move::Rock]);

    let input: &[u8] = b"Ada\npaper\npaper\n";
    let mut out: Vec<u8> = Vec::new();
    console::run(&mut c, &mut tickets, input, &mut out).await.unwrap();

    let text = String::from_utf8(out).unwrap();
    assert!(text.contains("wait for the current round to be revealed"));
    assert!(text.contains("You Won"));
    assert_eq!(c.session().moves_taken, 1);
}

#[tokio::test(start_paused = true)]
async fn quit_and_unknown_commands() {
    let (mut c, mut tickets) = controller(GameSettings::default(), vec![Move::Rock]);

    let input: &[u8] = b"Ada\nlizard\nhelp\nquit\nrock\n";
    let mut out: Vec<u8> = Vec::new();
    console::run(&mut c, &mut tickets, input, &mut out).await.unwrap();

    let text = String::from_utf8(out).unwrap();
    assert!(text.contains("unknown command \"lizard\""));
    assert!(text.contains("commands:"));
    assert_eq!(c.view().screen, Screen::Game);
    assert_eq!(c.session().moves_taken, 0);
}

#[tokio::test(start_paused = true)]
async fn reset_command_restores_choices() {
    let settings = GameSettings { lock_input_during_reveal: false, ..GameSettings::default() };
    let (mut c, mut tickets) = controller(settings, vec![Move::Paper]);

    let input: &[u8] = b"Ada\nrock\nreset\n";
    let mut out: Vec<u8> = Vec::new();
    console::run(&mut c, &mut tickets, input, &mut out).await.unwrap();

    assert_eq!(c.session(), Session::default());
    assert!(c.view().choices_visible);
    assert_eq!(c.view().result_text, "");
    assert!(!c.has_pending_reveal());
}

#[tokio::test(start_paused = true)]
async fn reload_reset_keeps_remembered_name() {
    let settings = GameSettings { reset_policy: ResetPolicy::Reload, ..GameSettings::default() };
    let (mut c, mut tickets) = controller(settings, vec![Move::Scissors]);

    let input: &[u8] = b"Ada\nr\nreset\nrock\n";
    let mut out: Vec<u8> = Vec::new();
    console::run(&mut c, &mut tickets, input, &mut out).await.unwrap();

    assert_eq!(c.view().screen, Screen::Game);
    assert_eq!(c.view().player_name, "Ada");
    assert_eq!(c.store().get(KEY_PLAYER_NAME).as_deref(), Some("Ada"));
    assert_eq!(c.session(), Session { player_score: 1, computer_score: 0, moves_taken: 1 });
    assert_eq!(c.view().result_text, "You Won");
}

#[tokio::test(start_paused = true)]
async fn command_words_are_not_taken_as_names() {
    let (mut c, mut tickets) = controller(GameSettings::default(), vec![Move::Rock]);

    let input: &[u8] = b"help\nreset\nrock\nquit\nAda\n";
    let mut out: Vec<u8> = Vec::new();
    console::run(&mut c, &mut tickets, input, &mut out).await.unwrap();

    let text = String::from_utf8(out).unwrap();
    assert!(text.contains("commands:"));
    assert!(text.contains("enter your name before playing"));
    assert_eq!(c.view().screen, Screen::Setup);
    assert_eq!(c.view().player_name, "");
    assert_eq!(c.store().get(KEY_PLAYER_NAME), None);
    assert_eq!(c.session().moves_taken, 0);
}
