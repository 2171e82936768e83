//! Transport abstractions for the client
//!
//! Provides AsyncReader/AsyncWriter traits over a message-oriented channel.
//! Each call moves exactly one complete frame; framing is the transport's job.

use async_trait::async_trait;
use paintbot_core::Result;

/// Trait for async reading from a transport
#[async_trait]
pub trait AsyncReader: Send {
    /// Read the next complete inbound frame.
    /// Fails with a transport error when the peer closes or the channel breaks.
    async fn read_message(&mut self) -> Result<Vec<u8>>;
}

/// Trait for async writing to a transport
#[async_trait]
pub trait AsyncWriter: Send + Sync {
    /// Write one complete frame and flush it
    async fn write_message(&mut self, data: &[u8]) -> Result<()>;

    /// Close the channel. Writes after closing fail.
    async fn close(&mut self) -> Result<()> {
        Ok(())
    }
}
