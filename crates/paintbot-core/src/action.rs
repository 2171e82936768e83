//! Player actions

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::PaintbotError;
use crate::map::Coordinate;

/// An action a player can register for one game tick.
///
/// Serialized as the server's upper-case strings (`"LEFT"`, `"EXPLODE"`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Action {
    Left,
    Right,
    Up,
    Down,
    /// Hold position
    Stay,
    /// Detonate a carried power-up
    Explode,
}

impl Action {
    /// Every action, in wire order
    pub const ALL: [Action; 6] = [
        Action::Left,
        Action::Right,
        Action::Up,
        Action::Down,
        Action::Stay,
        Action::Explode,
    ];

    /// The four movement actions
    pub const DIRECTIONS: [Action; 4] = [Action::Left, Action::Right, Action::Up, Action::Down];

    /// Wire representation
    pub fn as_str(self) -> &'static str {
        match self {
            Action::Left => "LEFT",
            Action::Right => "RIGHT",
            Action::Up => "UP",
            Action::Down => "DOWN",
            Action::Stay => "STAY",
            Action::Explode => "EXPLODE",
        }
    }

    /// Unit offset applied to the mover's coordinate. Up decreases `y`.
    pub fn offset(self) -> (i32, i32) {
        match self {
            Action::Left => (-1, 0),
            Action::Right => (1, 0),
            Action::Up => (0, -1),
            Action::Down => (0, 1),
            Action::Stay | Action::Explode => (0, 0),
        }
    }

    /// Whether the action moves the player
    pub fn is_directional(self) -> bool {
        self.offset() != (0, 0)
    }

    /// Coordinate after the action has been performed successfully
    pub fn translate(self, from: Coordinate) -> Coordinate {
        let (dx, dy) = self.offset();
        Coordinate::new(from.x + dx, from.y + dy)
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Action {
    type Err = PaintbotError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Action::ALL
            .into_iter()
            .find(|action| action.as_str() == s)
            .ok_or_else(|| PaintbotError::InvalidAction(s.to_string()))
    }
}
