//! Game settings and match modes

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::PaintbotError;

/// Settings a player may request when registering.
///
/// The server echoes the effective settings back in `PlayerRegistered` and
/// `GameStarting`. Fields missing from a server message take the defaults below.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GameSettings {
    pub max_noof_players: u32,
    pub time_in_ms_per_tick: u32,
    pub obstacles_enabled: bool,
    pub power_ups_enabled: bool,
    /// Percent chance per tick that a power-up is added
    pub add_power_up_likelihood: u32,
    /// Percent chance per tick that a power-up is removed
    pub remove_power_up_likelihood: u32,
    pub training_game: bool,
    pub points_per_tile_owned: u32,
    pub points_per_caused_stun: u32,
    pub no_of_ticks_invulnerable_after_stun: u32,
    pub no_of_ticks_stunned: u32,
    pub start_obstacles: u32,
    pub start_power_ups: u32,
    pub game_duration_in_seconds: u32,
    pub explosion_range: u32,
    pub points_per_tick: bool,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            max_noof_players: 5,
            time_in_ms_per_tick: 250,
            obstacles_enabled: true,
            power_ups_enabled: true,
            add_power_up_likelihood: 15,
            remove_power_up_likelihood: 5,
            training_game: false,
            points_per_tile_owned: 1,
            points_per_caused_stun: 5,
            no_of_ticks_invulnerable_after_stun: 3,
            no_of_ticks_stunned: 10,
            start_obstacles: 5,
            start_power_ups: 0,
            game_duration_in_seconds: 60,
            explosion_range: 4,
            points_per_tick: false,
        }
    }
}

impl GameSettings {
    /// Settings for a solo training game
    pub fn training() -> Self {
        Self {
            training_game: true,
            ..Self::default()
        }
    }
}

/// Match mode, selecting the server endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum GameMode {
    /// Single self-contained game against server bots
    Training,
    /// Series of games ending with a tournament result
    Tournament,
}

impl GameMode {
    /// WebSocket path for this mode
    pub fn path(self) -> &'static str {
        match self {
            GameMode::Training => "/training",
            GameMode::Tournament => "/tournament",
        }
    }

    /// Training sessions end with their single game
    pub fn is_training(self) -> bool {
        matches!(self, GameMode::Training)
    }
}

impl fmt::Display for GameMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameMode::Training => f.write_str("training"),
            GameMode::Tournament => f.write_str("tournament"),
        }
    }
}

impl FromStr for GameMode {
    type Err = PaintbotError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "training" => Ok(GameMode::Training),
            "tournament" => Ok(GameMode::Tournament),
            other => Err(PaintbotError::InvalidConfig(format!(
                "unknown game mode: {}",
                other
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_field_names() {
        let json = serde_json::to_value(GameSettings::training()).unwrap();
        assert_eq!(json["maxNoofPlayers"], 5);
        assert_eq!(json["timeInMsPerTick"], 250);
        assert_eq!(json["noOfTicksInvulnerableAfterStun"], 3);
        assert_eq!(json["trainingGame"], true);
        assert_eq!(json["pointsPerTick"], false);
    }

    #[test]
    fn test_partial_settings_fill_defaults() {
        let settings: GameSettings =
            serde_json::from_str(r#"{"timeInMsPerTick": 100, "gameMode": "TRAINING"}"#).unwrap();
        assert_eq!(settings.time_in_ms_per_tick, 100);
        assert_eq!(settings.explosion_range, GameSettings::default().explosion_range);
    }

    #[test]
    fn test_mode_paths() {
        assert_eq!(GameMode::Training.path(), "/training");
        assert_eq!(GameMode::Tournament.path(), "/tournament");
        assert_eq!("Tournament".parse::<GameMode>().unwrap(), GameMode::Tournament);
        assert!("arena".parse::<GameMode>().is_err());
    }
}
