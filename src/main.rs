use std::path::PathBuf;

use clap::Parser;
use tokio::io::BufReader;
use tracing_subscriber::EnvFilter;

use rps_game_engine::engine::config::{load_config, load_default_config, ResetPolicy};
use rps_game_engine::engine::opponent::RandomMoves;
use rps_game_engine::store::JsonFileStore;
use rps_game_engine::ui::console;
use rps_game_engine::ui::controller::GameController;
use rps_game_engine::ui::scheduler::TokioScheduler;

#[derive(Parser)]
#[command(name = "rps-game-engine", about = "Rock-paper-scissors against the computer, ten rounds a game")]
struct Cli {
    /// Path to rps.toml (default: auto-discover)
    #[arg(long, env = "RPS_CONFIG")]
    config: Option<PathBuf>,

    /// Path to the JSON score store
    #[arg(long, env = "RPS_STORE")]
    store: Option<PathBuf>,

    /// Seed for the computer's moves
    #[arg(long, env = "RPS_SEED")]
    seed: Option<u64>,

    /// Delay before a round result is shown (ms)
    #[arg(long, env = "RPS_DELAY_MS")]
    delay_ms: Option<u64>,

    /// Accept a new move while the previous result is still pending
    #[arg(long, env = "RPS_UNLOCKED")]
    unlocked: bool,

    /// What reset does: "in_place" or "reload"
    #[arg(long, env = "RPS_RESET_POLICY")]
    reset_policy: Option<ResetPolicy>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => load_config(path).map_err(|e| format!("Failed to load config: {}", e))?,
        None => load_default_config(),
    };
    if let Some(path) = cli.store {
        config.store.path = path;
    }
    if let Some(seed) = cli.seed {
        config.game.seed = Some(seed);
    }
    if let Some(ms) = cli.delay_ms {
        config.game.reveal_delay_ms = ms;
    }
    if cli.unlocked {
        config.game.lock_input_during_reveal = false;
    }
    if let Some(policy) = cli.reset_policy {
        config.game.reset_policy = policy;
    }

    let store = JsonFileStore::open(&config.store.path)?;
    tracing::info!(
        store = %store.path().display(),
        delay_ms = config.game.reveal_delay_ms,
        seeded = config.game.seed.is_some(),
        "starting game"
    );

    let (scheduler, mut tickets) = TokioScheduler::new();
    let opponent = RandomMoves::new(config.game.seed);
    let mut controller = GameController::new(
        config.game,
        Box::new(store),
        Box::new(opponent),
        Box::new(scheduler),
    );

    let input = BufReader::new(tokio::io::stdin());
    let mut out = std::io::stdout();
    console::run(&mut controller, &mut tickets, input, &mut out).await?;
    Ok(())
}
