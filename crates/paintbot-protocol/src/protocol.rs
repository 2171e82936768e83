//! Wire protocol for client <-> server communication
//!
//! Every message is a JSON object with a `type` discriminator holding the
//! server's fully qualified message name, a `timestamp` in milliseconds and
//! the `receivingPlayerId` the message concerns. Variant fields sit next to
//! them at the top level:
//! `{"type": "se.cygni.paintbot.api.request.StartGame", "timestamp": 0, "receivingPlayerId": null}`
//!
//! Decoding is two-step: the header is read first and its discriminator is
//! matched against the closed set in [`message_types`]; only then is the
//! variant payload parsed.

use paintbot_core::{Action, GameSettings, Map, PaintbotError, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

/// Discriminator strings, exact and case-sensitive
pub mod message_types {
    // Server -> client
    pub const INVALID_MESSAGE: &str = "se.cygni.paintbot.api.exception.InvalidMessage";
    pub const PLAYER_REGISTERED: &str = "se.cygni.paintbot.api.response.PlayerRegistered";
    pub const GAME_LINK: &str = "se.cygni.paintbot.api.event.GameLinkEvent";
    pub const GAME_STARTING: &str = "se.cygni.paintbot.api.event.GameStartingEvent";
    pub const MAP_UPDATE: &str = "se.cygni.paintbot.api.event.MapUpdateEvent";
    pub const GAME_ENDED: &str = "se.cygni.paintbot.api.event.GameEndedEvent";
    pub const GAME_RESULT: &str = "se.cygni.paintbot.api.event.GameResultEvent";
    pub const TOURNAMENT_ENDED: &str = "se.cygni.paintbot.api.event.TournamentEndedEvent";
    pub const HEARTBEAT_RESPONSE: &str = "se.cygni.paintbot.api.response.HeartBeatResponse";

    // Client -> server
    pub const REGISTER_PLAYER: &str = "se.cygni.paintbot.api.request.RegisterPlayer";
    pub const CLIENT_INFO: &str = "se.cygni.paintbot.api.request.ClientInfo";
    pub const START_GAME: &str = "se.cygni.paintbot.api.request.StartGame";
    pub const REGISTER_MOVE: &str = "se.cygni.paintbot.api.request.RegisterMove";
    pub const HEARTBEAT_REQUEST: &str = "se.cygni.paintbot.api.request.HeartBeatRequest";
}

/// Fields shared by every envelope
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Header {
    #[serde(rename = "type")]
    pub message_type: String,
    #[serde(default)]
    pub timestamp: i64,
    #[serde(default)]
    pub receiving_player_id: Option<String>,
}

/// A decoded inbound envelope
#[derive(Debug, Clone, PartialEq)]
pub struct Inbound {
    pub header: Header,
    pub message: ServerMessage,
}

/// Messages sent from the server to the client
#[derive(Debug, Clone, PartialEq)]
pub enum ServerMessage {
    /// The server rejected something this client sent
    InvalidMessage(InvalidMessage),
    /// Registration accepted; the header carries the assigned player id
    PlayerRegistered(PlayerRegistered),
    /// Where the game can be watched
    GameLink(GameLink),
    /// Board dimensions and effective settings
    GameStarting(GameStarting),
    /// One tick's snapshot; must be answered with a move
    MapUpdate(MapUpdate),
    GameEnded(GameEnded),
    /// Final ranking of one game
    GameResult(GameResult),
    TournamentEnded(TournamentEnded),
    /// Acknowledgment of a heartbeat; carries nothing
    HeartBeatResponse,
}

impl ServerMessage {
    /// Discriminator of this variant
    pub fn message_type(&self) -> &'static str {
        match self {
            ServerMessage::InvalidMessage(_) => message_types::INVALID_MESSAGE,
            ServerMessage::PlayerRegistered(_) => message_types::PLAYER_REGISTERED,
            ServerMessage::GameLink(_) => message_types::GAME_LINK,
            ServerMessage::GameStarting(_) => message_types::GAME_STARTING,
            ServerMessage::MapUpdate(_) => message_types::MAP_UPDATE,
            ServerMessage::GameEnded(_) => message_types::GAME_ENDED,
            ServerMessage::GameResult(_) => message_types::GAME_RESULT,
            ServerMessage::TournamentEnded(_) => message_types::TOURNAMENT_ENDED,
            ServerMessage::HeartBeatResponse => message_types::HEARTBEAT_RESPONSE,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvalidMessage {
    #[serde(default)]
    pub error_message: String,
    #[serde(default)]
    pub received_message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerRegistered {
    #[serde(default)]
    pub game_id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub game_settings: GameSettings,
    #[serde(default)]
    pub game_mode: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameLink {
    #[serde(default)]
    pub game_id: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameStarting {
    pub game_id: String,
    #[serde(default)]
    pub no_of_players: u32,
    pub width: usize,
    pub height: usize,
    #[serde(default)]
    pub game_settings: GameSettings,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapUpdate {
    pub game_id: String,
    pub game_tick: u64,
    pub map: Map,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameEnded {
    #[serde(default)]
    pub player_winner_id: String,
    #[serde(default)]
    pub player_winner_name: String,
    pub game_id: String,
    #[serde(default)]
    pub game_tick: u64,
    pub map: Map,
}

/// One line of a game's final ranking
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerRank {
    pub player_name: String,
    pub player_id: String,
    pub rank: u32,
    pub points: i64,
    #[serde(default)]
    pub alive: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameResult {
    #[serde(default)]
    pub game_id: String,
    #[serde(default)]
    pub player_ranks: Vec<PlayerRank>,
}

/// One line of a tournament's final standings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerPoints {
    pub name: String,
    pub player_id: String,
    pub points: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TournamentEnded {
    #[serde(default)]
    pub player_winner_id: String,
    #[serde(default)]
    pub game_id: String,
    #[serde(default)]
    pub game_result: Vec<PlayerPoints>,
    #[serde(default)]
    pub tournament_name: String,
    #[serde(default)]
    pub tournament_id: String,
}

/// Messages sent from the client to the server
///
/// Note: the `rename` strings must stay in sync with [`message_types`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum ClientMessage {
    /// Register with a display name and optionally requested settings.
    /// `None` lets the server apply its defaults.
    #[serde(
        rename = "se.cygni.paintbot.api.request.RegisterPlayer",
        rename_all = "camelCase"
    )]
    RegisterPlayer {
        player_name: String,
        game_settings: Option<GameSettings>,
    },

    /// Platform metadata, for the server's diagnostics only
    #[serde(
        rename = "se.cygni.paintbot.api.request.ClientInfo",
        rename_all = "camelCase"
    )]
    ClientInfo {
        language: String,
        language_version: String,
        operating_system: String,
        operating_system_version: String,
        client_version: String,
    },

    /// Ask the server to start the game
    #[serde(rename = "se.cygni.paintbot.api.request.StartGame")]
    StartGame,

    /// Action for one tick of one game
    #[serde(
        rename = "se.cygni.paintbot.api.request.RegisterMove",
        rename_all = "camelCase"
    )]
    RegisterMove {
        game_id: String,
        game_tick: u64,
        direction: Action,
    },

    /// Liveness ping
    #[serde(rename = "se.cygni.paintbot.api.request.HeartBeatRequest")]
    HeartBeatRequest,
}

impl ClientMessage {
    /// Discriminator of this variant
    pub fn message_type(&self) -> &'static str {
        match self {
            ClientMessage::RegisterPlayer { .. } => message_types::REGISTER_PLAYER,
            ClientMessage::ClientInfo { .. } => message_types::CLIENT_INFO,
            ClientMessage::StartGame => message_types::START_GAME,
            ClientMessage::RegisterMove { .. } => message_types::REGISTER_MOVE,
            ClientMessage::HeartBeatRequest => message_types::HEARTBEAT_REQUEST,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct OutboundEnvelope<'a> {
    #[serde(flatten)]
    message: &'a ClientMessage,
    receiving_player_id: Option<&'a str>,
    timestamp: i64,
}

/// Milliseconds since the Unix epoch
pub fn now_millis() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as i64
}

/// Serialize an outbound message to JSON bytes, stamped with the current time
pub fn encode(message: &ClientMessage, receiving_player_id: Option<&str>) -> Result<Vec<u8>> {
    encode_at(message, receiving_player_id, now_millis())
}

/// Serialize an outbound message to JSON bytes with an explicit timestamp
pub fn encode_at(
    message: &ClientMessage,
    receiving_player_id: Option<&str>,
    timestamp: i64,
) -> Result<Vec<u8>> {
    let envelope = OutboundEnvelope {
        message,
        receiving_player_id,
        timestamp,
    };
    Ok(serde_json::to_vec(&envelope)?)
}

/// Decode an inbound frame.
///
/// Fails with `Decode` when the frame is not an envelope or a known variant's
/// payload is malformed, and with `Protocol` when the discriminator is not
/// part of the protocol. Both errors carry the raw frame.
pub fn decode(bytes: &[u8]) -> Result<Inbound> {
    let header: Header =
        serde_json::from_slice(bytes).map_err(|e| PaintbotError::decode(e, bytes))?;

    let message = match header.message_type.as_str() {
        message_types::INVALID_MESSAGE => ServerMessage::InvalidMessage(payload(bytes)?),
        message_types::PLAYER_REGISTERED => ServerMessage::PlayerRegistered(payload(bytes)?),
        message_types::GAME_LINK => ServerMessage::GameLink(payload(bytes)?),
        message_types::GAME_STARTING => ServerMessage::GameStarting(payload(bytes)?),
        message_types::MAP_UPDATE => ServerMessage::MapUpdate(payload(bytes)?),
        message_types::GAME_ENDED => ServerMessage::GameEnded(payload(bytes)?),
        message_types::GAME_RESULT => ServerMessage::GameResult(payload(bytes)?),
        message_types::TOURNAMENT_ENDED => ServerMessage::TournamentEnded(payload(bytes)?),
        message_types::HEARTBEAT_RESPONSE => ServerMessage::HeartBeatResponse,
        other => {
            return Err(PaintbotError::protocol(
                format!("unknown message type: {}", other),
                bytes,
            ));
        }
    };

    Ok(Inbound { header, message })
}

fn payload<T: DeserializeOwned>(bytes: &[u8]) -> Result<T> {
    serde_json::from_slice(bytes).map_err(|e| PaintbotError::decode(e, bytes))
}
