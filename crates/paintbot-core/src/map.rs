//! Per-tick world snapshot and spatial queries
//!
//! The server sends the board flattened: every tile is a single index
//! `p = y * width + x`. [`Map`] keeps that representation as received and
//! answers coordinate-based questions on top of it. All index arithmetic goes
//! through [`Map::coordinate_of`] and [`Map::position_of`].

use serde::{Deserialize, Serialize};

use crate::action::Action;
use crate::error::{PaintbotError, Result};

/// Flattened index into the board
pub type Position = usize;

/// A point on (or off) the board.
///
/// Signed so that the neighbour of an edge tile can be represented and
/// classified as out of bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Coordinate {
    pub x: i32,
    pub y: i32,
}

impl Coordinate {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Coordinate after applying the action's unit offset
    pub fn translate(self, action: Action) -> Self {
        action.translate(self)
    }

    pub fn manhattan_distance(self, other: Coordinate) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }

    /// Closest candidate by Manhattan distance; the first one wins ties
    pub fn nearest(self, candidates: impl IntoIterator<Item = Coordinate>) -> Option<Coordinate> {
        candidates
            .into_iter()
            .min_by_key(|candidate| self.manhattan_distance(*candidate))
    }
}

/// Classification of a single tile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Tile {
    /// Obstacle, or anything outside the board
    Obstacle,
    PowerUp,
    /// Occupied by a character
    Player,
    Open,
}

impl Tile {
    /// Whether a character may move onto this tile
    pub fn is_walkable(self) -> bool {
        matches!(self, Tile::Open | Tile::PowerUp | Tile::Player)
    }
}

/// One player's state within a snapshot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CharacterInfo {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub points: i64,
    pub position: Position,
    /// Tiles painted by this player
    #[serde(default)]
    pub coloured_positions: Vec<Position>,
    #[serde(default)]
    pub stunned_for_game_ticks: u32,
    #[serde(default)]
    pub carrying_power_up: bool,
}

impl CharacterInfo {
    pub fn is_stunned(&self) -> bool {
        self.stunned_for_game_ticks > 0
    }
}

/// Immutable snapshot of the board for one tick
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Map {
    pub width: usize,
    pub height: usize,
    #[serde(default)]
    pub world_tick: u64,
    #[serde(default)]
    pub character_infos: Vec<CharacterInfo>,
    #[serde(default)]
    pub power_up_positions: Vec<Position>,
    #[serde(default)]
    pub obstacle_positions: Vec<Position>,
    #[serde(default)]
    pub collision_infos: Vec<Position>,
    #[serde(default)]
    pub explosion_infos: Vec<Position>,
}

impl Map {
    /// Empty board of the given size
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    /// Number of tiles on the board
    pub fn size(&self) -> usize {
        self.width * self.height
    }

    /// Converts a flattened position to a coordinate.
    /// Returns `None` when the position is not on the board.
    pub fn coordinate_of(&self, position: Position) -> Option<Coordinate> {
        if position >= self.size() {
            return None;
        }
        Some(Coordinate::new(
            (position % self.width) as i32,
            (position / self.width) as i32,
        ))
    }

    /// Converts a coordinate to its flattened position.
    /// Returns `None` when the coordinate is out of bounds.
    pub fn position_of(&self, coordinate: Coordinate) -> Option<Position> {
        flatten(self.width, self.height, coordinate)
    }

    pub fn is_out_of_bounds(&self, coordinate: Coordinate) -> bool {
        self.position_of(coordinate).is_none()
    }

    /// Converts a list of positions, skipping any that are off the board
    pub fn coordinates_of(&self, positions: &[Position]) -> Vec<Coordinate> {
        positions
            .iter()
            .filter_map(|&position| self.coordinate_of(position))
            .collect()
    }

    /// Converts a list of coordinates, skipping any that are out of bounds
    pub fn positions_of(&self, coordinates: &[Coordinate]) -> Vec<Position> {
        coordinates
            .iter()
            .filter_map(|&coordinate| self.position_of(coordinate))
            .collect()
    }

    /// Classifies the tile at a coordinate.
    ///
    /// Out of bounds is an obstacle. On the board, obstacles take precedence
    /// over power-ups, which take precedence over characters.
    pub fn tile_at(&self, coordinate: Coordinate) -> Tile {
        match self.position_of(coordinate) {
            Some(position) => self.tile_at_position(position),
            None => Tile::Obstacle,
        }
    }

    fn tile_at_position(&self, position: Position) -> Tile {
        if self.obstacle_positions.contains(&position) {
            Tile::Obstacle
        } else if self.power_up_positions.contains(&position) {
            Tile::PowerUp
        } else if self
            .character_infos
            .iter()
            .any(|character| character.position == position)
        {
            Tile::Player
        } else {
            Tile::Open
        }
    }

    /// Whether a character may move onto the coordinate
    pub fn is_tile_available(&self, coordinate: Coordinate) -> bool {
        self.tile_at(coordinate).is_walkable()
    }

    /// Looks up a character by id
    pub fn character(&self, player_id: &str) -> Result<&CharacterInfo> {
        self.character_infos
            .iter()
            .find(|character| character.id == player_id)
            .ok_or_else(|| PaintbotError::CharacterNotFound(player_id.to_string()))
    }

    /// Current coordinate of a character
    pub fn character_coordinate(&self, player_id: &str) -> Result<Coordinate> {
        let character = self.character(player_id)?;
        self.coordinate_of(character.position).ok_or_else(|| {
            PaintbotError::CharacterNotFound(format!(
                "{} (position {} is off the board)",
                player_id, character.position
            ))
        })
    }

    /// Whether the character can perform the action, assuming nobody else moves.
    ///
    /// Stunned characters can only stay. Exploding requires a carried power-up.
    pub fn can_perform(&self, player_id: &str, action: Action) -> Result<bool> {
        let character = self.character(player_id)?;

        if action == Action::Stay {
            return Ok(true);
        }
        if character.is_stunned() {
            return Ok(false);
        }
        if action == Action::Explode {
            return Ok(character.carrying_power_up);
        }

        let destination = self.character_coordinate(player_id)?.translate(action);
        Ok(self.is_tile_available(destination))
    }

    /// Actions the character can currently perform, in [`Action::ALL`] order
    pub fn legal_actions(&self, player_id: &str) -> Result<Vec<Action>> {
        let mut legal = Vec::with_capacity(Action::ALL.len());
        for action in Action::ALL {
            if self.can_perform(player_id, action)? {
                legal.push(action);
            }
        }
        Ok(legal)
    }

    pub fn power_up_coordinates(&self) -> Vec<Coordinate> {
        self.coordinates_of(&self.power_up_positions)
    }

    pub fn obstacle_coordinates(&self) -> Vec<Coordinate> {
        self.coordinates_of(&self.obstacle_positions)
    }

    pub fn collision_coordinates(&self) -> Vec<Coordinate> {
        self.coordinates_of(&self.collision_infos)
    }

    pub fn explosion_coordinates(&self) -> Vec<Coordinate> {
        self.coordinates_of(&self.explosion_infos)
    }

    /// Tiles painted by the given player
    pub fn coloured_coordinates(&self, player_id: &str) -> Result<Vec<Coordinate>> {
        let character = self.character(player_id)?;
        Ok(self.coordinates_of(&character.coloured_positions))
    }

    /// Nearest power-up to a coordinate
    pub fn nearest_power_up(&self, from: Coordinate) -> Option<Coordinate> {
        from.nearest(self.power_up_coordinates())
    }

    /// Dense classification of every tile, built in one pass over the sparse lists
    pub fn tile_grid(&self) -> TileGrid {
        let mut tiles = vec![Tile::Open; self.size()];
        // Lowest precedence first, so later layers overwrite.
        let players = self.character_infos.iter().map(|c| (c.position, Tile::Player));
        let power_ups = self.power_up_positions.iter().map(|&p| (p, Tile::PowerUp));
        let obstacles = self.obstacle_positions.iter().map(|&p| (p, Tile::Obstacle));
        for (position, tile) in players.chain(power_ups).chain(obstacles) {
            if let Some(slot) = tiles.get_mut(position) {
                *slot = tile;
            }
        }
        TileGrid {
            width: self.width,
            height: self.height,
            tiles,
        }
    }
}

/// Flattened index of a coordinate on a `width` x `height` board
fn flatten(width: usize, height: usize, coordinate: Coordinate) -> Option<Position> {
    if coordinate.x < 0 || coordinate.y < 0 {
        return None;
    }
    let (x, y) = (coordinate.x as usize, coordinate.y as usize);
    if x >= width || y >= height {
        return None;
    }
    Some(y * width + x)
}

/// Dense tile classification of a whole board
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileGrid {
    width: usize,
    height: usize,
    tiles: Vec<Tile>,
}

impl TileGrid {
    /// Tile at a coordinate; out of bounds is an obstacle
    pub fn get(&self, coordinate: Coordinate) -> Tile {
        flatten(self.width, self.height, coordinate)
            .and_then(|position| self.tiles.get(position).copied())
            .unwrap_or(Tile::Obstacle)
    }

    /// Tiles in flattened order
    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    pub fn count(&self, tile: Tile) -> usize {
        self.tiles.iter().filter(|t| **t == tile).count()
    }
}
