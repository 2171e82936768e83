//! Client configuration

use paintbot_core::{GameMode, GameSettings};
use std::time::Duration;

use crate::heartbeat::DEFAULT_HEARTBEAT_INTERVAL;

/// Configuration for a client session
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Server host (default: server.paintbot.cygni.se)
    pub host: String,
    /// Server port (default: 80)
    pub port: u16,
    /// Display name to register with
    pub player_name: String,
    /// Training or tournament; selects the endpoint path
    pub mode: GameMode,
    /// Requested settings. `None` lets the server apply its defaults.
    pub game_settings: Option<GameSettings>,
    /// Time between heartbeats (default: 30s)
    pub heartbeat_interval: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            host: "server.paintbot.cygni.se".into(),
            port: 80,
            player_name: "Rusty Bot".into(),
            mode: GameMode::Training,
            game_settings: None,
            heartbeat_interval: DEFAULT_HEARTBEAT_INTERVAL,
        }
    }
}

impl ClientConfig {
    /// Default server, given player name and mode
    pub fn new(player_name: impl Into<String>, mode: GameMode) -> Self {
        Self {
            player_name: player_name.into(),
            mode,
            ..Self::default()
        }
    }

    pub fn with_server(mut self, host: impl Into<String>, port: u16) -> Self {
        self.host = host.into();
        self.port = port;
        self
    }

    pub fn with_settings(mut self, settings: GameSettings) -> Self {
        self.game_settings = Some(settings);
        self
    }

    pub fn with_heartbeat_interval(mut self, interval: Duration) -> Self {
        self.heartbeat_interval = interval;
        self
    }

    /// WebSocket URL for the configured server and mode
    pub fn url(&self) -> String {
        format!("ws://{}:{}{}", self.host, self.port, self.mode.path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_selects_mode_path() {
        let config = ClientConfig::new("bot", GameMode::Tournament).with_server("localhost", 8080);
        assert_eq!(config.url(), "ws://localhost:8080/tournament");
        assert_eq!(
            ClientConfig::default().url(),
            "ws://server.paintbot.cygni.se:80/training"
        );
    }
}
