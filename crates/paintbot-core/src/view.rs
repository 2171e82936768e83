//! A snapshot seen from one player's perspective

use crate::action::Action;
use crate::error::Result;
use crate::map::{CharacterInfo, Coordinate, Map};

/// Borrowed view of a [`Map`] bound to one player id.
///
/// Every query fails with `CharacterNotFound` once the player has no
/// character on the board.
#[derive(Debug, Clone, Copy)]
pub struct PlayerView<'a> {
    map: &'a Map,
    player_id: &'a str,
}

impl<'a> PlayerView<'a> {
    pub fn new(map: &'a Map, player_id: &'a str) -> Self {
        Self { map, player_id }
    }

    pub fn map(&self) -> &'a Map {
        self.map
    }

    pub fn player_id(&self) -> &'a str {
        self.player_id
    }

    /// Whether the player still has a character on the board
    pub fn is_present(&self) -> bool {
        self.map.character(self.player_id).is_ok()
    }

    pub fn me(&self) -> Result<&'a CharacterInfo> {
        self.map.character(self.player_id)
    }

    pub fn my_coordinate(&self) -> Result<Coordinate> {
        self.map.character_coordinate(self.player_id)
    }

    pub fn can_i_perform(&self, action: Action) -> Result<bool> {
        self.map.can_perform(self.player_id, action)
    }

    pub fn legal_actions(&self) -> Result<Vec<Action>> {
        self.map.legal_actions(self.player_id)
    }

    pub fn my_coloured_coordinates(&self) -> Result<Vec<Coordinate>> {
        self.map.coloured_coordinates(self.player_id)
    }

    /// Characters other than this player
    pub fn opponents(self) -> impl Iterator<Item = &'a CharacterInfo> + 'a {
        let player_id = self.player_id;
        self.map
            .character_infos
            .iter()
            .filter(move |character| character.id != player_id)
    }
}

impl Map {
    /// View of this snapshot for one player
    pub fn view<'a>(&'a self, player_id: &'a str) -> PlayerView<'a> {
        PlayerView::new(self, player_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::Position;

    fn character(id: &str, position: Position) -> CharacterInfo {
        CharacterInfo {
            id: id.into(),
            name: format!("Bot {}", id),
            points: 0,
            position,
            coloured_positions: vec![position],
            stunned_for_game_ticks: 0,
            carrying_power_up: false,
        }
    }

    #[test]
    fn test_view_queries() {
        let map = Map {
            character_infos: vec![character("me", 4), character("other", 0)],
            ..Map::new(3, 3)
        };
        let view = map.view("me");

        assert!(view.is_present());
        assert_eq!(view.me().unwrap().name, "Bot me");
        assert_eq!(view.my_coordinate().unwrap(), Coordinate::new(1, 1));
        assert_eq!(
            view.legal_actions().unwrap(),
            vec![Action::Left, Action::Right, Action::Up, Action::Down, Action::Stay]
        );
        let opponents: Vec<_> = view.opponents().map(|c| c.id.as_str()).collect();
        assert_eq!(opponents, vec!["other"]);
    }

    #[test]
    fn test_view_of_eliminated_player() {
        let map = Map::new(3, 3);
        let view = map.view("me");
        assert!(!view.is_present());
        assert!(view.me().is_err());
        assert!(view.can_i_perform(Action::Stay).is_err());
    }
}
