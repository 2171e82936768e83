//! WebSocket transport implementation
//!
//! One protocol envelope per WebSocket text frame. Control frames are handled
//! by tungstenite and skipped here.

use crate::transport::{AsyncReader, AsyncWriter};
use async_trait::async_trait;
use futures_util::stream::{SplitSink, SplitStream};
use futures_util::{SinkExt, StreamExt};
use paintbot_core::{PaintbotError, Result};
use tokio::io::{AsyncRead, AsyncWrite};
use tokio::net::TcpStream;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async};
use tracing::debug;

/// Stream type produced by [`connect`]
pub type ClientStream = MaybeTlsStream<TcpStream>;

/// WebSocket read wrapper
pub struct WsReadWrapper<S>(pub SplitStream<WebSocketStream<S>>);

#[async_trait]
impl<S> AsyncReader for WsReadWrapper<S>
where
    S: AsyncRead + AsyncWrite + Unpin + Send,
{
    async fn read_message(&mut self) -> Result<Vec<u8>> {
        loop {
            match self.0.next().await {
                Some(Ok(Message::Text(text))) => return Ok(text.into_bytes()),
                Some(Ok(Message::Binary(data))) => return Ok(data),
                Some(Ok(Message::Close(frame))) => {
                    let reason = frame
                        .map(|f| format!("{:?} {}", f.code, f.reason))
                        .unwrap_or_else(|| "no close frame".to_string());
                    return Err(PaintbotError::Transport(format!(
                        "Connection closed by server: {}",
                        reason
                    )));
                }
                Some(Ok(other)) => {
                    debug!("Skipping control frame: {:?}", other);
                }
                Some(Err(e)) => {
                    return Err(PaintbotError::Transport(format!(
                        "WebSocket read failed: {}",
                        e
                    )));
                }
                None => return Err(PaintbotError::Transport("Connection closed".into())),
            }
        }
    }
}

/// WebSocket write wrapper
pub struct WsWriteWrapper<S>(pub SplitSink<WebSocketStream<S>, Message>);

#[async_trait]
impl<S> AsyncWriter for WsWriteWrapper<S>
where
    S: AsyncRead + AsyncWrite + Unpin + Send,
{
    async fn write_message(&mut self, data: &[u8]) -> Result<()> {
        let text = String::from_utf8(data.to_vec())
            .map_err(|e| PaintbotError::Serialization(format!("Frame is not UTF-8: {}", e)))?;

        // `send` flushes, so the frame is on the wire when this returns
        self.0
            .send(Message::Text(text))
            .await
            .map_err(|e| PaintbotError::Transport(format!("WebSocket write failed: {}", e)))
    }

    async fn close(&mut self) -> Result<()> {
        self.0
            .close()
            .await
            .map_err(|e| PaintbotError::Transport(format!("WebSocket close failed: {}", e)))
    }
}

/// Open a WebSocket connection and split it into reader and writer halves
pub async fn connect(
    url: &str,
) -> Result<(WsReadWrapper<ClientStream>, WsWriteWrapper<ClientStream>)> {
    let (stream, _response) = connect_async(url)
        .await
        .map_err(|e| PaintbotError::Transport(format!("Failed to connect to {}: {}", url, e)))?;

    let (write, read) = stream.split();
    Ok((WsReadWrapper(read), WsWriteWrapper(write)))
}
