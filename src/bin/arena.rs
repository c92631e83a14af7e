//! Arena CLI — pit two move strategies against each other over many sessions.
//!
//! Usage:
//!   cargo run --release --bin arena -- --sessions 10000 --player beat-last --opponent random
//!   cargo run --release --bin arena -- --player "script:rock,rock,paper" --opponent cycle

use clap::Parser;
use tracing_subscriber::EnvFilter;

use rps_game_engine::engine::arena::run_arena;
use rps_game_engine::engine::opponent::{build_generator, MoveGenerator, RandomMoves};

#[derive(Parser)]
#[command(name = "arena", about = "Run strategy-vs-strategy rock-paper-scissors sessions")]
struct Cli {
    /// Number of ten-round sessions to play
    #[arg(long, default_value = "1000")]
    sessions: usize,

    /// Base random seed
    #[arg(long, default_value = "42")]
    seed: u64,

    /// Player strategy: random, rock, paper, scissors, cycle, beat-last, script:<moves>
    #[arg(long, default_value = "random")]
    player: String,

    /// Opponent strategy (same syntax as --player)
    #[arg(long, default_value = "random")]
    opponent: String,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("warn".parse()?))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    // Fail fast on a bad spec before spinning up the pool.
    build_generator(&cli.player, Some(cli.seed))?;
    build_generator(&cli.opponent, Some(cli.seed))?;

    let player_spec = cli.player.clone();
    let opponent_spec = cli.opponent.clone();
    let player = move |seed: u64| -> Box<dyn MoveGenerator> {
        build_generator(&player_spec, Some(seed)).unwrap_or_else(|_| Box::new(RandomMoves::seeded(seed)))
    };
    let opponent = move |seed: u64| -> Box<dyn MoveGenerator> {
        build_generator(&opponent_spec, Some(seed)).unwrap_or_else(|_| Box::new(RandomMoves::seeded(seed)))
    };

    eprintln!(
        "Arena: {} sessions, seed={}, player={}, opponent={}",
        cli.sessions, cli.seed, cli.player, cli.opponent
    );

    let total = cli.sessions;
    let progress_cb = move |done: usize, _total: usize| {
        if done % 100 == 0 || done == total {
            eprint!("\r  [{}/{}] sessions completed", done, total);
        }
    };

    let result = run_arena(&player, &opponent, cli.sessions, cli.seed, Some(&progress_cb));

    eprintln!("\r                                          "); // clear progress line
    println!("{}", result.summary());
    Ok(())
}
