//! Terminal front-end: reads commands line by line and redraws the view.

use std::io::Write;

use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::sync::mpsc::UnboundedReceiver;

use crate::engine::models::Move;
use crate::ui::controller::{GameController, SubmitError};
use crate::ui::scheduler::Ticket;
use crate::ui::view::{Screen, Tone, View};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Play(Move),
    Reset,
    Help,
    Quit,
    Unknown(String),
}

pub fn parse_command(line: &str) -> Command {
    let word = line.trim().to_ascii_lowercase();
    match word.as_str() {
        "r" => Command::Play(Move::Rock),
        "p" => Command::Play(Move::Paper),
        "s" => Command::Play(Move::Scissors),
        "reset" => Command::Reset,
        "help" | "?" => Command::Help,
        "quit" | "exit" | "q" => Command::Quit,
        _ => match word.parse::<Move>() {
            Ok(m) => Command::Play(m),
            Err(_) => Command::Unknown(line.trim().to_string()),
        },
    }
}

const HELP: &str = "commands: rock | paper | scissors (or r/p/s), reset, help, quit";

fn paint(text: &str, tone: Tone) -> String {
    let code = match tone {
        Tone::Neutral => return text.to_string(),
        Tone::Win => "34",
        Tone::Loss => "31",
        Tone::Tie => "90",
    };
    format!("\x1b[{}m{}\x1b[0m", code, text)
}

/// Draw the whole view as plain lines.
pub fn render(view: &View) -> String {
    let mut lines = Vec::new();
    match view.screen {
        Screen::Setup => {
            if view.player_name.is_empty() {
                lines.push("Enter your name:".to_string());
            } else {
                lines.push(format!("Enter your name (last played as {}):", view.player_name));
            }
            if let Some(msg) = &view.validation_message {
                lines.push(format!("  ! {}", msg));
            }
        }
        Screen::Game => {
            lines.push(format!(
                "{} {} - {} Computer    moves left: {}",
                view.player_name, view.player_score, view.computer_score, view.moves_left
            ));
            if let Some(round) = &view.last_round {
                lines.push(format!(
                    "  you played {}, computer played {}",
                    round.player_move, round.opponent_move
                ));
            }
            if !view.result_text.is_empty() {
                lines.push(format!("  {}", paint(&view.result_text, view.result_tone)));
            }
            if view.choices_visible {
                lines.push("Choose: rock / paper / scissors".to_string());
            }
            if view.reset_visible {
                lines.push("Type 'reset' to play again.".to_string());
            }
        }
    }
    lines.join("\n")
}

/// Handle one input line. Returns false when the player asked to quit.
fn handle_line<W: Write + ?Sized>(
    controller: &mut GameController,
    line: &str,
    out: &mut W,
) -> std::io::Result<bool> {
    if controller.view().screen == Screen::Setup {
        return handle_setup_line(controller, line, out);
    }

    match parse_command(line) {
        Command::Play(m) => play(controller, m, out)?,
        Command::Reset => {
            controller.reset();
            writeln!(out, "{}", render(controller.view()))?;
        }
        Command::Help => writeln!(out, "{}", HELP)?,
        Command::Quit => return Ok(false),
        Command::Unknown(s) if s.is_empty() => {}
        Command::Unknown(s) => writeln!(out, "unknown command {:?}; {}", s, HELP)?,
    }
    Ok(true)
}

/// On the name screen only unrecognised words are taken as a name. A move
/// resumes under the remembered name, if there is one.
fn handle_setup_line<W: Write + ?Sized>(
    controller: &mut GameController,
    line: &str,
    out: &mut W,
) -> std::io::Result<bool> {
    match parse_command(line) {
        Command::Quit => return Ok(false),
        Command::Help => writeln!(out, "{}", HELP)?,
        Command::Reset => writeln!(out, "{}", render(controller.view()))?,
        Command::Play(m) => {
            let remembered = controller.view().player_name.clone();
            if remembered.is_empty() {
                writeln!(out, "{}", SubmitError::NotStarted)?;
                writeln!(out, "{}", render(controller.view()))?;
            } else if controller.submit_name(&remembered).is_ok() {
                writeln!(out, "{}", render(controller.view()))?;
                play(controller, m, out)?;
            }
        }
        Command::Unknown(_) => {
            // a rejected name shows up as the validation line in the view
            if let Err(e) = controller.submit_name(line) {
                tracing::debug!(error = %e, "name rejected");
            }
            writeln!(out, "{}", render(controller.view()))?;
        }
    }
    Ok(true)
}

fn play<W: Write + ?Sized>(controller: &mut GameController, m: Move, out: &mut W) -> std::io::Result<()> {
    match controller.submit_move(m) {
        Ok(_) => writeln!(out, "you played {}... moves left: {}", m, controller.view().moves_left),
        Err(e) => writeln!(out, "{}", e),
    }
}

/// Drive the controller from `input` and `tickets` until input ends or the
/// player quits. On end of input the last pending reveal is still shown.
pub async fn run<R, W>(
    controller: &mut GameController,
    tickets: &mut UnboundedReceiver<Ticket>,
    input: R,
    out: &mut W,
) -> std::io::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: Write + ?Sized,
{
    writeln!(out, "{}", render(controller.view()))?;
    let mut lines = input.lines();

    loop {
        tokio::select! {
            line = lines.next_line() => {
                match line? {
                    Some(line) => {
                        if !handle_line(controller, &line, out)? {
                            return Ok(());
                        }
                    }
                    None => break,
                }
            }
            Some(ticket) = tickets.recv() => {
                if controller.on_timer(ticket) {
                    writeln!(out, "{}", render(controller.view()))?;
                }
            }
        }
        out.flush()?;
    }

    while controller.has_pending_reveal() {
        match tickets.recv().await {
            Some(ticket) => {
                if controller.on_timer(ticket) {
                    writeln!(out, "{}", render(controller.view()))?;
                }
            }
            None => break,
        }
    }
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::models::{Round, RoundOutcome};

    #[test]
    fn test_parse_command() {
        assert_eq!(parse_command("r"), Command::Play(Move::Rock));
        assert_eq!(parse_command(" Paper "), Command::Play(Move::Paper));
        assert_eq!(parse_command("SCISSORS"), Command::Play(Move::Scissors));
        assert_eq!(parse_command("reset"), Command::Reset);
        assert_eq!(parse_command("q"), Command::Quit);
        assert_eq!(parse_command("?"), Command::Help);
        assert_eq!(parse_command("lizard"), Command::Unknown("lizard".into()));
    }

    #[test]
    fn test_render_setup_with_validation() {
        let view = View {
            validation_message: Some("Please enter your name.".into()),
            ..View::default()
        };
        let text = render(&view);
        assert!(text.starts_with("Enter your name:"));
        assert!(text.contains("Please enter your name."));
    }

    #[test]
    fn test_render_game_over() {
        let mut view = View {
            screen: Screen::Game,
            player_name: "Ada".into(),
            player_score: 6,
            computer_score: 4,
            moves_left: 0,
            last_round: Some(Round {
                player_move: Move::Rock,
                opponent_move: Move::Scissors,
                outcome: RoundOutcome::PlayerWin,
            }),
            ..View::default()
        };
        view.show_game_over(crate::engine::models::GameOutcome::PlayerWinsGame);
        let text = render(&view);
        assert!(text.contains("Ada 6 - 4 Computer"));
        assert!(text.contains("moves left: 0"));
        assert!(text.contains("you played rock, computer played scissors"));
        assert!(text.contains("\x1b[34mHooray! You Won The Game\x1b[0m"));
        assert!(text.contains("reset"));
        assert!(!text.contains("Choose:"));
    }
}
