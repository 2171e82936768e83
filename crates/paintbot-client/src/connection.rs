//! Connection to the game server
//!
//! The reader half belongs to the session alone (`&mut` access). The writer
//! half sits behind an async mutex shared by every [`MessageSender`], so a
//! frame is always written and flushed in full before the next one starts.

use paintbot_core::Result;
use paintbot_protocol::{AsyncReader, AsyncWriter, ClientMessage, encode, ws};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info};

/// Longest frame prefix included in debug logs
const LOG_PREVIEW_CHARS: usize = 200;

fn preview(data: &[u8]) -> String {
    String::from_utf8_lossy(data)
        .chars()
        .take(LOG_PREVIEW_CHARS)
        .collect()
}

/// Cloneable handle for writing to the connection
#[derive(Clone)]
pub struct MessageSender {
    writer: Arc<Mutex<Box<dyn AsyncWriter>>>,
}

impl MessageSender {
    /// Encode and send one message
    pub async fn send(
        &self,
        message: &ClientMessage,
        receiving_player_id: Option<&str>,
    ) -> Result<()> {
        let data = encode(message, receiving_player_id)?;
        debug!("[Client→Server] len={} json={}", data.len(), preview(&data));

        let mut guard = self.writer.lock().await;
        guard.write_message(&data).await
    }

    /// Close the underlying channel
    pub async fn close(&self) -> Result<()> {
        let mut guard = self.writer.lock().await;
        guard.close().await
    }
}

/// Connection to the game server
pub struct Connection {
    reader: Box<dyn AsyncReader>,
    sender: MessageSender,
}

impl Connection {
    /// Open a WebSocket connection. Failure is reported, never retried.
    pub async fn connect(url: &str) -> Result<Self> {
        info!("Connecting to {}", url);
        let (reader, writer) = ws::connect(url).await?;
        info!("Connected");
        Ok(Self::from_transport(reader, writer))
    }

    /// Wrap an already established transport
    pub fn from_transport(
        reader: impl AsyncReader + 'static,
        writer: impl AsyncWriter + 'static,
    ) -> Self {
        Self {
            reader: Box::new(reader),
            sender: MessageSender {
                writer: Arc::new(Mutex::new(Box::new(writer))),
            },
        }
    }

    /// Handle for concurrent writers
    pub fn sender(&self) -> MessageSender {
        self.sender.clone()
    }

    pub async fn send(
        &self,
        message: &ClientMessage,
        receiving_player_id: Option<&str>,
    ) -> Result<()> {
        self.sender.send(message, receiving_player_id).await
    }

    /// Wait for the next complete inbound frame
    pub async fn receive_next(&mut self) -> Result<Vec<u8>> {
        let data = self.reader.read_message().await?;
        debug!("[Server→Client] len={} json={}", data.len(), preview(&data));
        Ok(data)
    }

    pub async fn close(&self) -> Result<()> {
        self.sender.close().await
    }
}
