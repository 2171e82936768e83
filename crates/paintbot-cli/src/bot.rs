//! Sample policy

use paintbot_client::Policy;
use paintbot_core::{Action, Map};
use tracing::debug;

/// Paints by cycling through the four directions.
///
/// Holds still while stunned or eliminated, and explodes as soon as it
/// carries a power-up. Otherwise it moves in the next direction (in
/// LEFT, RIGHT, UP, DOWN order) that is currently legal.
#[derive(Debug, Default)]
pub struct RotatingBot {
    next: usize,
}

impl RotatingBot {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Policy for RotatingBot {
    fn next_action(&mut self, map: &Map, player_id: &str) -> Action {
        let view = map.view(player_id);
        let me = match view.me() {
            Ok(me) => me,
            Err(e) => {
                debug!("{}, staying", e);
                return Action::Stay;
            }
        };

        if me.is_stunned() {
            return Action::Stay;
        }
        if me.carrying_power_up {
            return Action::Explode;
        }

        let count = Action::DIRECTIONS.len();
        for offset in 0..count {
            let index = (self.next + offset) % count;
            let action = Action::DIRECTIONS[index];
            if view.can_i_perform(action).unwrap_or(false) {
                self.next = (index + 1) % count;
                return action;
            }
        }
        Action::Stay
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use paintbot_core::CharacterInfo;

    fn board(position: usize, stunned: u32, carrying: bool) -> Map {
        let mut map = Map::new(3, 3);
        map.character_infos.push(CharacterInfo {
            id: "me".into(),
            name: "bot".into(),
            points: 0,
            position,
            coloured_positions: vec![position],
            stunned_for_game_ticks: stunned,
            carrying_power_up: carrying,
        });
        map
    }

    #[test]
    fn test_rotates_through_directions() {
        let map = board(4, 0, false);
        let mut bot = RotatingBot::new();
        let moves: Vec<Action> = (0..5).map(|_| bot.next_action(&map, "me")).collect();
        assert_eq!(
            moves,
            vec![
                Action::Left,
                Action::Right,
                Action::Up,
                Action::Down,
                Action::Left
            ]
        );
    }

    #[test]
    fn test_skips_blocked_directions() {
        // Top-left corner: only RIGHT and DOWN are open
        let map = board(0, 0, false);
        let mut bot = RotatingBot::new();
        assert_eq!(bot.next_action(&map, "me"), Action::Right);
        assert_eq!(bot.next_action(&map, "me"), Action::Down);
        assert_eq!(bot.next_action(&map, "me"), Action::Right);
    }

    #[test]
    fn test_stays_when_stunned_or_absent() {
        let mut bot = RotatingBot::new();
        assert_eq!(bot.next_action(&board(4, 2, true), "me"), Action::Stay);
        assert_eq!(bot.next_action(&board(4, 0, false), "someone"), Action::Stay);
    }

    #[test]
    fn test_explodes_with_power_up() {
        let mut bot = RotatingBot::new();
        assert_eq!(bot.next_action(&board(4, 0, true), "me"), Action::Explode);
    }

    #[test]
    fn test_boxed_in_stays() {
        let mut map = board(0, 0, false);
        map.obstacle_positions = vec![1, 3];
        let mut bot = RotatingBot::new();
        assert_eq!(bot.next_action(&map, "me"), Action::Stay);
    }
}
