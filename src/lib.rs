pub mod actor;
pub mod config;
pub mod grid;
pub mod interaction;
pub mod path_player;
pub mod pathfinding;
pub mod save_state;
pub mod tiled;
pub mod world;
pub mod zones;

pub use actor::{Actor, ActorKind, Direction};
pub use config::Config;
pub use grid::{GridMap, TileDescriptor, TilePos};
pub use pathfinding::{find_path, PathFinder, PathResponse};
pub use world::{DialogSink, Notifier, World};
pub use zones::{Rect, Zone, ZoneTracker, ZoneTransition};
