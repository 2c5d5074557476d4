use serde::{Deserialize, Serialize};
use std::fs;

use crate::actor::{Actor, Direction};

/// Persisted player state: position, facing, and whatever the host keeps in
/// the inventory. The inventory is opaque to the simulation and travels
/// through saves untouched.
#[derive(Debug, Serialize, Deserialize)]
pub struct SaveState {
    pub x: f32,
    pub y: f32,
    pub facing: Direction,
    #[serde(default)]
    pub inventory: serde_json::Value,
}

impl SaveState {
    /// Capture the player actor and the host's inventory value
    pub fn from_player(player: &Actor, inventory: serde_json::Value) -> Self {
        SaveState {
            x: player.x,
            y: player.y,
            facing: player.facing,
            inventory,
        }
    }

    /// Write the player position and facing back. Movement state is not
    /// saved; the player always comes back idle.
    pub fn apply(&self, player: &mut Actor) {
        player.halt();
        player.x = self.x;
        player.y = self.y;
        player.facing = self.facing;
    }

    /// Save to file
    pub fn save_to_file(&self, path: &str) -> Result<(), String> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| format!("Failed to serialize save state: {}", e))?;

        fs::write(path, json).map_err(|e| format!("Failed to write save file: {}", e))?;

        Ok(())
    }

    /// Load from file
    pub fn load_from_file(path: &str) -> Result<Self, String> {
        let json = fs::read_to_string(path).map_err(|e| format!("Failed to read save file: {}", e))?;

        let save_state: SaveState =
            serde_json::from_str(&json).map_err(|e| format!("Failed to parse save file: {}", e))?;

        Ok(save_state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actor::ActorKind;

    #[test]
    fn test_apply_restores_position_and_facing() {
        let mut player = Actor::new(ActorKind::Player, "player", 8.0, 8.0, 2.0, 3);
        player.is_moving = true;

        let state = SaveState {
            x: 40.0,
            y: 56.0,
            facing: Direction::Left,
            inventory: serde_json::json!({"pokeballs": 3}),
        };
        state.apply(&mut player);

        assert_eq!((player.x, player.y), (40.0, 56.0));
        assert_eq!(player.facing, Direction::Left);
        assert!(!player.is_moving);
    }

    #[test]
    fn test_save_state_round_trips_through_json() {
        let player = Actor::new(ActorKind::Player, "player", 24.0, 40.0, 2.0, 3);
        let state = SaveState::from_player(&player, serde_json::json!(["potion"]));

        let json = serde_json::to_string(&state).unwrap();
        let restored: SaveState = serde_json::from_str(&json).unwrap();

        assert_eq!(restored.x, 24.0);
        assert_eq!(restored.y, 40.0);
        assert_eq!(restored.facing, Direction::Down);
        assert_eq!(restored.inventory, serde_json::json!(["potion"]));
    }
}
