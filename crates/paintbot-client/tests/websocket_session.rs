//! Full training session against a scripted local server

use futures_util::{SinkExt, StreamExt};
use paintbot_client::{ClientConfig, PaintbotError};
use paintbot_core::{Action, GameMode, Map};
use paintbot_protocol::message_types;
use serde_json::{Value, json};
use tokio::net::{TcpListener, TcpStream};
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{WebSocketStream, accept_async};

const PLAYER: &str = "player-42";
const GAME: &str = "game-1";

struct ScriptedServer {
    ws: WebSocketStream<TcpStream>,
    received: Vec<Value>,
}

impl ScriptedServer {
    async fn accept(listener: TcpListener) -> Self {
        let (stream, _) = listener.accept().await.unwrap();
        let ws = accept_async(stream).await.unwrap();
        Self {
            ws,
            received: Vec::new(),
        }
    }

    /// Next text frame from the client, `None` once it closes
    async fn next(&mut self) -> Option<Value> {
        while let Some(message) = self.ws.next().await {
            match message.ok()? {
                Message::Text(text) => {
                    let value: Value = serde_json::from_str(&text).unwrap();
                    self.received.push(value.clone());
                    return Some(value);
                }
                Message::Close(_) => return None,
                _ => continue,
            }
        }
        None
    }

    /// Read until a frame of the given type arrives
    async fn expect(&mut self, message_type: &str) -> Value {
        loop {
            let value = self
                .next()
                .await
                .unwrap_or_else(|| panic!("Connection closed while waiting for {}", message_type));
            if value["type"] == message_type {
                return value;
            }
        }
    }

    async fn send(&mut self, value: Value) {
        self.ws.send(Message::Text(value.to_string())).await.unwrap();
    }

    async fn drain(&mut self) {
        while self.next().await.is_some() {}
    }
}

fn map(tick: u64) -> Value {
    json!({
        "width": 10, "height": 10, "worldTick": tick,
        "characterInfos": [{
            "id": PLAYER, "name": "it-bot", "points": tick, "position": 55 + tick,
            "colouredPositions": [55], "stunnedForGameTicks": 0, "carryingPowerUp": false
        }],
        "powerUpPositions": [], "obstaclePositions": [0, 1, 2],
        "collisionInfos": [], "explosionInfos": []
    })
}

async fn play_training_game(mut server: ScriptedServer) -> Vec<Value> {
    let register = server.expect(message_types::REGISTER_PLAYER).await;
    assert_eq!(register["playerName"], "it-bot");
    assert_eq!(register["gameSettings"]["trainingGame"], true);

    server
        .send(json!({
            "type": message_types::PLAYER_REGISTERED,
            "timestamp": 1,
            "receivingPlayerId": PLAYER,
            "gameId": GAME, "name": "it-bot", "gameMode": "TRAINING"
        }))
        .await;
    server.expect(message_types::START_GAME).await;

    server
        .send(json!({
            "type": message_types::GAME_LINK,
            "receivingPlayerId": PLAYER,
            "gameId": GAME, "url": "http://localhost/game/1"
        }))
        .await;
    server
        .send(json!({
            "type": message_types::GAME_STARTING,
            "receivingPlayerId": PLAYER,
            "gameId": GAME, "noOfPlayers": 1, "width": 10, "height": 10
        }))
        .await;

    for tick in 0..3u64 {
        server
            .send(json!({
                "type": message_types::MAP_UPDATE,
                "receivingPlayerId": PLAYER,
                "gameId": GAME, "gameTick": tick, "map": map(tick)
            }))
            .await;
        let register_move = server.expect(message_types::REGISTER_MOVE).await;
        assert_eq!(register_move["gameTick"], tick);
    }

    server
        .send(json!({
            "type": message_types::GAME_ENDED,
            "receivingPlayerId": PLAYER,
            "playerWinnerId": PLAYER, "playerWinnerName": "it-bot",
            "gameId": GAME, "gameTick": 3, "map": map(3)
        }))
        .await;

    server.drain().await;
    server.received
}

#[tokio::test]
async fn test_training_session_over_websocket() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();

    let server = tokio::spawn(async move {
        let server = ScriptedServer::accept(listener).await;
        play_training_game(server).await
    });

    let config = ClientConfig::new("it-bot", GameMode::Training)
        .with_server("127.0.0.1", port)
        .with_settings(paintbot_core::GameSettings::training());
    let policy = |map: &Map, player_id: &str| {
        assert_eq!(player_id, PLAYER);
        if map.can_perform(player_id, Action::Right).unwrap_or(false) {
            Action::Right
        } else {
            Action::Stay
        }
    };

    let report = paintbot_client::run(config, policy).await.unwrap();
    assert_eq!(report.player_id.as_deref(), Some(PLAYER));
    assert_eq!(report.games, vec![GAME.to_string()]);
    assert_eq!(report.moves_sent, 3);
    assert!(report.won_last_game);

    let received = server.await.unwrap();
    let types: Vec<&str> = received
        .iter()
        .map(|value| value["type"].as_str().unwrap())
        .collect();

    assert_eq!(types[0], message_types::REGISTER_PLAYER);
    assert!(types.contains(&message_types::CLIENT_INFO));
    assert!(types.contains(&message_types::HEARTBEAT_REQUEST));

    let moves: Vec<&Value> = received
        .iter()
        .filter(|value| value["type"] == message_types::REGISTER_MOVE)
        .collect();
    assert_eq!(moves.len(), 3);
    for (tick, register_move) in moves.iter().enumerate() {
        assert_eq!(register_move["gameId"], GAME);
        assert_eq!(register_move["gameTick"], tick as u64);
        assert_eq!(register_move["direction"], "RIGHT");
        assert_eq!(register_move["receivingPlayerId"], PLAYER);
    }

    for value in &received[1..] {
        assert_eq!(value["receivingPlayerId"], PLAYER);
    }
}

#[tokio::test]
async fn test_unreachable_server_is_transport_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);

    let config = ClientConfig::new("it-bot", GameMode::Training).with_server("127.0.0.1", port);
    let result = paintbot_client::run(config, |_: &Map, _: &str| Action::Stay).await;
    assert!(matches!(result, Err(PaintbotError::Transport(_))));
}
