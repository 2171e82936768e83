//! Session state machine
//!
//! Owns the read loop: every inbound frame is decoded, advances the phase,
//! and map updates are answered with exactly one move chosen by the policy.

use paintbot_core::{PaintbotError, Result};
use paintbot_protocol::{ClientMessage, Inbound, PlayerPoints, PlayerRank, ServerMessage, decode};
use tracing::{debug, error, info, warn};

use crate::config::ClientConfig;
use crate::connection::Connection;
use crate::heartbeat::Heartbeat;
use crate::policy::Policy;

/// Map updates between two progress lines at info level
const PROGRESS_LOG_EVERY: u64 = 10;

/// Where the session is in its lifecycle. Phases only move forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    Idle,
    Registering,
    AwaitingStart,
    InProgress,
    Ended,
}

/// Summary of a finished session
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionReport {
    /// Identity assigned on registration
    pub player_id: Option<String>,
    /// Games played, in order
    pub games: Vec<String>,
    pub moves_sent: u64,
    /// Ranking of the most recent game
    pub last_game_result: Option<Vec<PlayerRank>>,
    /// Final standings, tournament mode only
    pub tournament_result: Option<Vec<PlayerPoints>>,
    pub won_last_game: bool,
}

/// One client session, from registration until the server ends it
pub struct Session<P> {
    connection: Connection,
    config: ClientConfig,
    policy: P,
    phase: SessionPhase,
    heartbeat: Option<Heartbeat>,
    report: SessionReport,
}

impl<P: Policy> Session<P> {
    pub fn new(connection: Connection, config: ClientConfig, policy: P) -> Self {
        Self {
            connection,
            config,
            policy,
            phase: SessionPhase::Idle,
            heartbeat: None,
            report: SessionReport::default(),
        }
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn report(&self) -> &SessionReport {
        &self.report
    }

    /// Drive the session to its end.
    ///
    /// The keep-alive task is stopped and the connection closed on every
    /// path, including failures.
    pub async fn run(mut self) -> Result<SessionReport> {
        let outcome = self.run_loop().await;

        if let Some(heartbeat) = self.heartbeat.take() {
            heartbeat.stop().await;
        }
        if let Err(e) = self.connection.close().await {
            debug!("Close after session end failed: {}", e);
        }

        match outcome {
            Ok(()) => {
                info!(
                    "Session ended after {} game(s), {} move(s)",
                    self.report.games.len(),
                    self.report.moves_sent
                );
                Ok(self.report)
            }
            Err(e) => {
                self.phase = SessionPhase::Ended;
                error!("Session failed: {}", e);
                Err(e)
            }
        }
    }

    async fn run_loop(&mut self) -> Result<()> {
        self.register().await?;
        while self.step().await? != SessionPhase::Ended {}
        Ok(())
    }

    /// Send the registration request (Idle -> Registering)
    pub async fn register(&mut self) -> Result<()> {
        if self.phase != SessionPhase::Idle {
            warn!("Register called in phase {:?}, ignoring", self.phase);
            return Ok(());
        }

        info!(
            "Registering '{}' for a {} game",
            self.config.player_name, self.config.mode
        );
        let register = ClientMessage::RegisterPlayer {
            player_name: self.config.player_name.clone(),
            game_settings: self.config.game_settings.clone(),
        };
        self.connection.send(&register, None).await?;
        self.phase = SessionPhase::Registering;
        Ok(())
    }

    /// Read and handle one inbound frame, returning the resulting phase
    pub async fn step(&mut self) -> Result<SessionPhase> {
        let frame = self.connection.receive_next().await?;
        let inbound = decode(&frame)?;
        self.handle(inbound, &frame).await?;
        Ok(self.phase)
    }

    async fn handle(&mut self, inbound: Inbound, raw: &[u8]) -> Result<()> {
        let Inbound { header, message } = inbound;

        match message {
            ServerMessage::InvalidMessage(invalid) => {
                error!(
                    "Server rejected a message: {} (received: {})",
                    invalid.error_message, invalid.received_message
                );
                Err(PaintbotError::protocol(
                    format!("server reported invalid message: {}", invalid.error_message),
                    raw,
                ))
            }

            ServerMessage::PlayerRegistered(registered) => {
                if self.phase != SessionPhase::Registering {
                    warn!(
                        "Unexpected registration in phase {:?}, ignoring",
                        self.phase
                    );
                    return Ok(());
                }
                let player_id = header.receiving_player_id.ok_or_else(|| {
                    PaintbotError::protocol("registration without a player id", raw)
                })?;
                info!(
                    "Registered as '{}' with id {} ({})",
                    registered.name, player_id, registered.game_mode
                );

                self.connection
                    .send(&client_info(), Some(&player_id))
                    .await?;
                self.heartbeat = Some(Heartbeat::spawn(
                    self.connection.sender(),
                    player_id.clone(),
                    self.config.heartbeat_interval,
                ));
                self.connection
                    .send(&ClientMessage::StartGame, Some(&player_id))
                    .await?;

                self.report.player_id = Some(player_id);
                self.phase = SessionPhase::AwaitingStart;
                Ok(())
            }

            ServerMessage::GameLink(link) => {
                info!("Game {} can be watched at {}", link.game_id, link.url);
                Ok(())
            }

            ServerMessage::GameStarting(starting) => {
                self.ensure_registered(raw)?;
                info!(
                    "Game {} starting: {}x{} board, {} player(s)",
                    starting.game_id, starting.width, starting.height, starting.no_of_players
                );
                self.enter_game(&starting.game_id);
                Ok(())
            }

            ServerMessage::MapUpdate(update) => {
                self.ensure_registered(raw)?;
                self.enter_game(&update.game_id);

                let player_id = self
                    .report
                    .player_id
                    .as_deref()
                    .ok_or_else(|| PaintbotError::protocol("map update before registration", raw))?;

                if update.game_tick % PROGRESS_LOG_EVERY == 0 {
                    info!("Game {} at tick {}", update.game_id, update.game_tick);
                }

                let direction = self.policy.next_action(&update.map, player_id);
                debug!("Tick {}: {}", update.game_tick, direction);

                let register_move = ClientMessage::RegisterMove {
                    game_id: update.game_id,
                    game_tick: update.game_tick,
                    direction,
                };
                self.connection
                    .send(&register_move, Some(player_id))
                    .await?;
                self.report.moves_sent += 1;
                Ok(())
            }

            ServerMessage::GameEnded(ended) => {
                self.ensure_registered(raw)?;
                let won = self.report.player_id.as_deref() == Some(ended.player_winner_id.as_str());
                if won {
                    info!("Game {} ended at tick {}: we won", ended.game_id, ended.game_tick);
                } else {
                    info!(
                        "Game {} ended at tick {}: won by '{}'",
                        ended.game_id, ended.game_tick, ended.player_winner_name
                    );
                }
                self.report.won_last_game = won;

                if self.config.mode.is_training() {
                    self.phase = SessionPhase::Ended;
                }
                Ok(())
            }

            ServerMessage::GameResult(result) => {
                for rank in &result.player_ranks {
                    info!(
                        "#{} {} ({} points{})",
                        rank.rank,
                        rank.player_name,
                        rank.points,
                        if rank.alive { "" } else { ", eliminated" }
                    );
                }
                self.report.last_game_result = Some(result.player_ranks);
                Ok(())
            }

            ServerMessage::TournamentEnded(ended) => {
                info!(
                    "Tournament '{}' ended, winner {}",
                    ended.tournament_name, ended.player_winner_id
                );
                self.report.tournament_result = Some(ended.game_result);
                self.phase = SessionPhase::Ended;
                Ok(())
            }

            ServerMessage::HeartBeatResponse => {
                debug!("Heartbeat acknowledged");
                Ok(())
            }
        }
    }

    fn ensure_registered(&self, raw: &[u8]) -> Result<()> {
        match self.phase {
            SessionPhase::Idle | SessionPhase::Registering => Err(PaintbotError::protocol(
                format!("game event before registration (phase {:?})", self.phase),
                raw,
            )),
            _ => Ok(()),
        }
    }

    /// AwaitingStart -> InProgress, remembering each new game id
    fn enter_game(&mut self, game_id: &str) {
        if self.phase == SessionPhase::AwaitingStart {
            self.phase = SessionPhase::InProgress;
        }
        if self.report.games.last().map(String::as_str) != Some(game_id) {
            self.report.games.push(game_id.to_string());
        }
    }
}

/// Platform metadata sent once after registration
fn client_info() -> ClientMessage {
    ClientMessage::ClientInfo {
        language: "Rust".into(),
        language_version: env!("CARGO_PKG_RUST_VERSION").into(),
        operating_system: std::env::consts::OS.into(),
        operating_system_version: std::env::consts::ARCH.into(),
        client_version: env!("CARGO_PKG_VERSION").into(),
    }
}
