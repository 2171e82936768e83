//! Decision callback driven by the session

use paintbot_core::{Action, Map};

/// Chooses one action per tick.
///
/// Called on the session task with a read-only snapshot and this client's
/// player id. Lookups on the map return `CharacterNotFound` when the
/// character is absent (e.g. eliminated); that error is recoverable and the
/// policy is expected to fall back to an action such as [`Action::Stay`].
pub trait Policy: Send {
    fn next_action(&mut self, map: &Map, player_id: &str) -> Action;
}

impl<F> Policy for F
where
    F: FnMut(&Map, &str) -> Action + Send,
{
    fn next_action(&mut self, map: &Map, player_id: &str) -> Action {
        self(map, player_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_closure_is_policy() {
        let mut calls = 0;
        let mut policy = |map: &Map, player_id: &str| {
            calls += 1;
            if map.character(player_id).is_ok() {
                Action::Down
            } else {
                Action::Stay
            }
        };

        let map = Map::new(3, 3);
        assert_eq!(policy.next_action(&map, "missing"), Action::Stay);
        assert_eq!(calls, 1);
    }
}
