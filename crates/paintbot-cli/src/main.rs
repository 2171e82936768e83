//! Paintbot player
//!
//! Usage: `paintbot [NAME] [training|tournament]`
//!
//! The server defaults to server.paintbot.cygni.se:80 and can be overridden
//! with `PAINTBOT_HOST` and `PAINTBOT_PORT`. Log level follows `RUST_LOG`.

mod bot;

use anyhow::{Context, Result};
use bot::RotatingBot;
use paintbot_client::ClientConfig;
use paintbot_core::{GameMode, GameSettings};
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

const HOST_VAR: &str = "PAINTBOT_HOST";
const PORT_VAR: &str = "PAINTBOT_PORT";

fn config_from_env() -> Result<ClientConfig> {
    let mut args = std::env::args().skip(1);
    let defaults = ClientConfig::default();

    let name = args.next().unwrap_or(defaults.player_name.clone());
    let mode = match args.next() {
        Some(mode) => mode.parse::<GameMode>()?,
        None => GameMode::Training,
    };

    let host = std::env::var(HOST_VAR).unwrap_or(defaults.host.clone());
    let port = match std::env::var(PORT_VAR) {
        Ok(port) => port
            .parse::<u16>()
            .with_context(|| format!("{} is not a valid port: {}", PORT_VAR, port))?,
        Err(_) => defaults.port,
    };

    let mut config = ClientConfig::new(name, mode).with_server(host, port);
    if mode.is_training() {
        config = config.with_settings(GameSettings::training());
    }
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let config = config_from_env()?;
    info!(
        "Paintbot '{}' starting ({} mode, {})",
        config.player_name,
        config.mode,
        config.url()
    );

    let report = paintbot_client::run(config, RotatingBot::new()).await?;

    info!(
        "Finished: {} game(s), {} move(s){}",
        report.games.len(),
        report.moves_sent,
        if report.won_last_game {
            ", won the last game"
        } else {
            ""
        }
    );
    if let Some(ranks) = &report.last_game_result {
        for rank in ranks {
            info!("#{} {} ({} points)", rank.rank, rank.player_name, rank.points);
        }
    }
    Ok(())
}
