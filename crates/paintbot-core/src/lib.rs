//! # paintbot-core
//!
//! Core types for the Paintbot protocol.
//!
//! This crate provides the foundational types used by the client:
//! - Per-tick board snapshots and spatial queries
//! - The closed action set
//! - Game settings and match modes
//! - Error taxonomy

pub mod action;
pub mod error;
pub mod map;
pub mod settings;
pub mod view;

pub use action::Action;
pub use error::{PaintbotError, Result};
pub use map::{CharacterInfo, Coordinate, Map, Position, Tile, TileGrid};
pub use settings::{GameMode, GameSettings};
pub use view::PlayerView;
