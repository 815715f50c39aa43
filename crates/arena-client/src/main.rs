//! Arena Watch
//!
//! Headless dashboard: polls the arena API for the game list and one game,
//! and logs every change to the scoreboard until interrupted.

use arena_client::arena_core::payload::CURRENT_GAME;
use arena_client::{ClientConfig, Dashboard};
use tracing::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let config = ClientConfig::from_env()?;
    let game_id = std::env::var("ARENA_GAME").unwrap_or_else(|_| CURRENT_GAME.to_string());

    let mut dashboard = Dashboard::new(&config)?;
    info!(api = %dashboard.client().base(), game = %game_id, "Arena watch starting");

    let store = dashboard.store();
    store.current_game.subscribe(|game| {
        info!(
            status = %game.status,
            winner = %game.winner,
            highscore = game.highscore,
            "Game"
        );
    });
    store.scoreboard.subscribe(|board| {
        let mut teams: Vec<_> = board.iter().collect();
        teams.sort();
        info!(scoreboard = ?teams, "Scoreboard");
    });
    store.games.subscribe(|games| {
        info!(count = games.len(), "Game list");
    });

    // Populate once before the first tick
    if let Err(e) = dashboard.fetch_games().await {
        warn!(error = %e, "Initial game list fetch failed");
    }
    if let Err(e) = dashboard.fetch_game(&game_id).await {
        warn!(error = %e, "Initial game fetch failed");
    }

    dashboard.start_games_polling();
    dashboard.select_game(&game_id);

    tokio::signal::ctrl_c().await?;
    info!("Interrupted, stopping pollers");
    dashboard.stop();

    Ok(())
}
