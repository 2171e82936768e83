//! In-memory transports for unit tests

use async_trait::async_trait;
use paintbot_core::{PaintbotError, Result};
use paintbot_protocol::{AsyncReader, AsyncWriter};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Replays scripted frames, then reports the connection as closed
pub struct MemoryReader {
    frames: VecDeque<Vec<u8>>,
    delay: Option<Duration>,
}

impl MemoryReader {
    pub fn new(frames: Vec<Vec<u8>>) -> Self {
        Self {
            frames: frames.into(),
            delay: None,
        }
    }

    /// Wait `delay` before handing out each frame
    pub fn with_delay(frames: Vec<Vec<u8>>, delay: Duration) -> Self {
        Self {
            frames: frames.into(),
            delay: Some(delay),
        }
    }
}

#[async_trait]
impl AsyncReader for MemoryReader {
    async fn read_message(&mut self) -> Result<Vec<u8>> {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.frames
            .pop_front()
            .ok_or_else(|| PaintbotError::Transport("Connection closed".into()))
    }
}

/// Records every frame written
#[derive(Default)]
pub struct MemoryWriter {
    frames: Arc<Mutex<Vec<Vec<u8>>>>,
}

impl MemoryWriter {
    pub fn frames(&self) -> Arc<Mutex<Vec<Vec<u8>>>> {
        self.frames.clone()
    }
}

#[async_trait]
impl AsyncWriter for MemoryWriter {
    async fn write_message(&mut self, data: &[u8]) -> Result<()> {
        self.frames.lock().unwrap().push(data.to_vec());
        Ok(())
    }
}

/// Writes each frame a few bytes at a time, yielding in between, followed by
/// a newline. Frames from unsynchronized writers would come out interleaved.
#[derive(Default)]
pub struct ChunkedWriter {
    bytes: Arc<Mutex<Vec<u8>>>,
}

impl ChunkedWriter {
    pub fn bytes(&self) -> Arc<Mutex<Vec<u8>>> {
        self.bytes.clone()
    }
}

#[async_trait]
impl AsyncWriter for ChunkedWriter {
    async fn write_message(&mut self, data: &[u8]) -> Result<()> {
        for chunk in data.chunks(7) {
            self.bytes.lock().unwrap().extend_from_slice(chunk);
            tokio::task::yield_now().await;
        }
        self.bytes.lock().unwrap().push(b'\n');
        Ok(())
    }
}
