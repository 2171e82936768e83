//! Paintbot session client
//!
//! This crate connects a [`Policy`] to a Paintbot game server over
//! WebSocket, registers the player, keeps the connection alive and answers
//! every map update with one move.

pub mod config;
pub mod connection;
pub mod heartbeat;
pub mod policy;
pub mod session;

#[cfg(test)]
mod testing;

pub use config::ClientConfig;
pub use connection::{Connection, MessageSender};
pub use heartbeat::{DEFAULT_HEARTBEAT_INTERVAL, Heartbeat};
pub use paintbot_core::{PaintbotError, Result};
pub use policy::Policy;
pub use session::{Session, SessionPhase, SessionReport};

/// Connect to the configured server and play until the session ends
pub async fn run<P: Policy>(config: ClientConfig, policy: P) -> Result<SessionReport> {
    let connection = Connection::connect(&config.url()).await?;
    Session::new(connection, config, policy).run().await
}
