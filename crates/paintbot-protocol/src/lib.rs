//! Wire protocol and transport for the Paintbot client
//!
//! This crate provides:
//! - Envelope encoding and decoding over a closed message set
//! - Transport abstractions (AsyncReader/AsyncWriter traits)
//! - WebSocket transport

pub mod protocol;
pub mod transport;
pub mod ws;

pub use protocol::{
    ClientMessage, Header, Inbound, PlayerPoints, PlayerRank, ServerMessage, decode, encode,
    encode_at, message_types,
};
pub use transport::{AsyncReader, AsyncWriter};
