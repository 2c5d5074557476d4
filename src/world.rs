use log::{debug, warn};

use crate::actor::{Actor, ActorKind, Direction};
use crate::config::Config;
use crate::grid::{GridMap, TilePos};
use crate::interaction;
use crate::path_player::PathPlayback;
use crate::pathfinding::PathFinder;
use crate::save_state::SaveState;
use crate::tiled::{LoadedMap, PoiMarker};
use crate::zones::{Rect, ZoneTracker, ZoneTransition};

/// Fire-and-forget message surface provided by the host (a snackbar, a
/// status line, whatever). The simulation only decides when to fire.
pub trait Notifier {
    fn info(&mut self, message: &str);
    fn success(&mut self, message: &str);
    fn warning(&mut self, message: &str);
    fn close(&mut self);
}

/// Host-owned dialog surface. The simulation requests opening and closing
/// but never manages dialog state itself.
pub trait DialogSink {
    fn open(&mut self, subject: &str);
    fn request_close(&mut self);
    fn is_open(&self) -> bool;
}

/// The whole simulation: grid, actor registry, zone tracking, pathfinding
/// and the per-tick pipeline that wires them together.
///
/// Tick order is fixed: player motion first (input or path playback), then
/// the sign latch, then zone detection (only on an aligned player), then NPC
/// settling, then the dialog-close check. Later stages read the state the
/// earlier ones committed this tick.
pub struct World {
    pub grid: GridMap,
    /// Actor registry; indices are stable actor ids
    pub actors: Vec<Actor>,
    /// Index of the player actor
    pub player: usize,

    zones: ZoneTracker,
    pois: Vec<PoiMarker>,
    finder: PathFinder,
    playback: Option<PathPlayback>,
    segment_ticks: u32,
    sign_open: bool,
    free_camera: bool,

    notifier: Box<dyn Notifier>,
    dialog: Box<dyn DialogSink>,
}

impl World {
    /// Build the world from a loaded map. Spawn markers are snapped to the
    /// center of the tile they fall in so every actor starts aligned.
    pub fn new(
        map: LoadedMap,
        config: &Config,
        notifier: Box<dyn Notifier>,
        dialog: Box<dyn DialogSink>,
    ) -> Self {
        let grid = map.grid;

        let spawn_tile = grid.world_to_tile(map.spawn.x, map.spawn.y);
        let (px, py) = grid.tile_center(spawn_tile);
        let mut actors = vec![Actor::new(
            ActorKind::Player,
            "Player",
            px,
            py,
            config.actors.player_speed,
            config.actors.player_move_cooldown,
        )];

        for marker in &map.npc_spawns {
            let tile = grid.world_to_tile(marker.x, marker.y);
            let (nx, ny) = grid.tile_center(tile);
            actors.push(Actor::new(
                ActorKind::Npc,
                &marker.name,
                nx,
                ny,
                config.actors.npc_speed,
                config.actors.npc_move_cooldown,
            ));
        }

        let mut zones = ZoneTracker::new(map.zones);
        zones.seed(&body_rect(&grid, px, py));

        World {
            grid,
            actors,
            player: 0,
            zones,
            pois: map.pois,
            finder: PathFinder::new(),
            playback: None,
            segment_ticks: config.segment_ticks(),
            sign_open: false,
            free_camera: false,
            notifier,
            dialog,
        }
    }

    pub fn player_actor(&self) -> &Actor {
        &self.actors[self.player]
    }

    pub fn current_zone(&self) -> Option<&str> {
        self.zones.current()
    }

    pub fn previous_zone(&self) -> Option<&str> {
        self.zones.previous()
    }

    pub fn playback_active(&self) -> bool {
        self.playback.is_some()
    }

    pub fn free_camera(&self) -> bool {
        self.free_camera
    }

    /// One-shot "toggle free-camera view" command. While set, the player
    /// does not advance and the host drives the camera with the same keys.
    pub fn toggle_free_camera(&mut self) {
        self.free_camera = !self.free_camera;
        debug!("free camera: {}", self.free_camera);
    }

    /// Advance the simulation one tick. `held` is the directional command
    /// currently asserted by the input source, if any.
    pub fn tick(&mut self, held: Option<Direction>) {
        if !self.free_camera {
            if let Some(playback) = self.playback.as_mut() {
                if playback.advance(&mut self.actors[self.player], &self.grid) {
                    self.playback = None;
                }
            } else {
                self.actors[self.player].update(held, &self.grid);
            }

            self.update_sign_latch();

            // Zones are only evaluated on an aligned player; mid-step
            // positions would flicker between neighbouring zones
            if self.actors[self.player].is_aligned(&self.grid) {
                let player = &self.actors[self.player];
                let body = body_rect(&self.grid, player.x, player.y);
                if let Some(ZoneTransition::Entered(name)) = self.zones.update(&body) {
                    self.notifier.warning(&name);
                }
            }
        }

        // NPCs settle after the player's state is committed
        for i in 0..self.actors.len() {
            if i != self.player {
                self.actors[i].update(None, &self.grid);
            }
        }

        // Walking away from the speaker ends the conversation
        if self.dialog.is_open() {
            let faced = interaction::faced_tile(&self.actors[self.player], &self.grid);
            if !interaction::is_occupied(&self.actors, &self.grid, faced, self.player) {
                self.dialog.request_close();
            }
        }
    }

    /// Resolve a pointer click at world pixel coordinates: the player's own
    /// tile dismisses current focus, the faced occupied tile interacts, and
    /// anything else becomes a path request.
    pub fn handle_click(&mut self, world_x: f32, world_y: f32) {
        let to = self.grid.world_to_tile(world_x, world_y);
        let from = self.actors[self.player].tile(&self.grid);

        if to == from {
            debug!("clicked on player");
            self.dialog.request_close();
            return;
        }

        let faced = interaction::faced_tile(&self.actors[self.player], &self.grid);
        if to == faced && interaction::is_occupied(&self.actors, &self.grid, faced, self.player) {
            self.interact();
            return;
        }

        debug!("going from ({},{}) to ({},{})", from.x, from.y, to.x, to.y);
        self.finder.enqueue(from, to);
        self.solve_paths();
    }

    /// Drain the path queue and act on every response
    pub fn solve_paths(&mut self) {
        for response in self.finder.solve(&self.grid) {
            match response.path {
                Some(path) => self.start_playback(&path),
                None => warn!("path request {}: no route found", response.id),
            }
        }
    }

    /// Explicit "interact" command (the action key)
    pub fn interact(&mut self) {
        if let Some(occupant) = interaction::interact(&mut self.actors, &self.grid, self.player) {
            let subject = self.actors[occupant].name.clone();
            debug!("interacting with {}", subject);
            self.dialog.open(&subject);
        }
    }

    /// Persist the player state plus the host's opaque inventory value
    pub fn save(&mut self, path: &str, inventory: serde_json::Value) -> Result<(), String> {
        let state = SaveState::from_player(&self.actors[self.player], inventory);
        state.save_to_file(path)?;
        self.notifier.success("Game saved");
        Ok(())
    }

    /// Restore player position and facing; hands the saved inventory back
    /// to the host
    pub fn restore(&mut self, path: &str) -> Result<serde_json::Value, String> {
        let state = SaveState::load_from_file(path)?;
        state.apply(&mut self.actors[self.player]);
        self.playback = None;
        let player = &self.actors[self.player];
        let body = body_rect(&self.grid, player.x, player.y);
        self.zones.seed(&body);
        Ok(state.inventory)
    }

    /// A playback response only applies to an aligned player; starting a new
    /// path while one is in flight replaces it outright.
    fn start_playback(&mut self, path: &[TilePos]) {
        if !self.actors[self.player].is_aligned(&self.grid) {
            return;
        }
        if self.playback.is_some() {
            self.playback = None;
            self.actors[self.player].halt();
        }
        self.playback =
            PathPlayback::new(&self.actors[self.player], &self.grid, path, self.segment_ticks);
    }

    /// Show the sign text once while the player faces a readable sign; close
    /// it again once the player faces a passable tile.
    fn update_sign_latch(&mut self) {
        let player = &self.actors[self.player];
        let faced = interaction::faced_tile(player, &self.grid);
        let facing = player.facing;
        let collides = self
            .grid
            .tile(faced.x, faced.y)
            .map(|t| t.collides)
            .unwrap_or(false);

        if collides {
            let poi = self
                .pois
                .iter()
                .find(|p| p.tile == faced && p.visible_from.contains(&facing));
            if let Some(poi) = poi {
                if !self.sign_open {
                    self.notifier.success(&poi.text);
                    self.sign_open = true;
                }
            }
        } else if self.sign_open {
            self.notifier.close();
            self.sign_open = false;
        }
    }
}

/// The fixed tile-sized collision box centered on an actor position
fn body_rect(grid: &GridMap, x: f32, y: f32) -> Rect {
    Rect::new(
        x - grid.tile_width as f32 / 2.0,
        y - grid.tile_height as f32 / 2.0,
        grid.tile_width as f32,
        grid.tile_height as f32,
    )
}
