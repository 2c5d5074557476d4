use log::{info, warn};
use serde::Deserialize;
use std::fs;

#[derive(Debug, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub simulation: SimulationConfig,
    #[serde(default)]
    pub actors: ActorsConfig,
    #[serde(default)]
    pub path: PathConfig,
    #[serde(default)]
    pub map: MapConfig,
    #[serde(default)]
    pub save: SaveConfig,
    #[serde(default)]
    pub visual: VisualConfig,
}

#[derive(Debug, Deserialize)]
pub struct SimulationConfig {
    /// Fixed simulation ticks per second
    #[serde(default = "default_tick_rate")]
    pub tick_rate: u32,
}

#[derive(Debug, Deserialize)]
pub struct ActorsConfig {
    /// Pixels per tick; must divide the tile size evenly
    #[serde(default = "default_player_speed")]
    pub player_speed: f32,
    #[serde(default = "default_npc_speed")]
    pub npc_speed: f32,
    /// Ticks a key must be held before the first step from standstill
    #[serde(default = "default_player_move_cooldown")]
    pub player_move_cooldown: i32,
    #[serde(default = "default_npc_move_cooldown")]
    pub npc_move_cooldown: i32,
}

#[derive(Debug, Deserialize)]
pub struct PathConfig {
    /// Duration of one tile-to-tile playback segment
    #[serde(default = "default_segment_ms")]
    pub segment_ms: u32,
}

#[derive(Debug, Deserialize)]
pub struct MapConfig {
    #[serde(default = "default_map_path")]
    pub path: String,
}

#[derive(Debug, Deserialize)]
pub struct SaveConfig {
    #[serde(default = "default_save_path")]
    pub path: String,
}

#[derive(Debug, Deserialize)]
pub struct VisualConfig {
    #[serde(default = "default_window_title")]
    pub window_title: String,
    #[serde(default = "default_bg_r")]
    pub background_r: u8,
    #[serde(default = "default_bg_g")]
    pub background_g: u8,
    #[serde(default = "default_bg_b")]
    pub background_b: u8,
}

// Default values
fn default_tick_rate() -> u32 { 60 }
fn default_player_speed() -> f32 { 2.0 }
fn default_npc_speed() -> f32 { 2.0 }
fn default_player_move_cooldown() -> i32 { 3 }
fn default_npc_move_cooldown() -> i32 { 7 }
fn default_segment_ms() -> u32 { 200 }
fn default_map_path() -> String { "assets/map.json".to_string() }
fn default_save_path() -> String { "save.json".to_string() }
fn default_window_title() -> String { "Tilequest".to_string() }
fn default_bg_r() -> u8 { 30 }
fn default_bg_g() -> u8 { 30 }
fn default_bg_b() -> u8 { 30 }

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            tick_rate: default_tick_rate(),
        }
    }
}

impl Default for ActorsConfig {
    fn default() -> Self {
        Self {
            player_speed: default_player_speed(),
            npc_speed: default_npc_speed(),
            player_move_cooldown: default_player_move_cooldown(),
            npc_move_cooldown: default_npc_move_cooldown(),
        }
    }
}

impl Default for PathConfig {
    fn default() -> Self {
        Self {
            segment_ms: default_segment_ms(),
        }
    }
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            path: default_map_path(),
        }
    }
}

impl Default for SaveConfig {
    fn default() -> Self {
        Self {
            path: default_save_path(),
        }
    }
}

impl Default for VisualConfig {
    fn default() -> Self {
        Self {
            window_title: default_window_title(),
            background_r: default_bg_r(),
            background_g: default_bg_g(),
            background_b: default_bg_b(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            simulation: SimulationConfig::default(),
            actors: ActorsConfig::default(),
            path: PathConfig::default(),
            map: MapConfig::default(),
            save: SaveConfig::default(),
            visual: VisualConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from file, or use defaults if file doesn't exist
    pub fn load() -> Self {
        match fs::read_to_string("config.toml") {
            Ok(contents) => match toml::from_str(&contents) {
                Ok(config) => {
                    info!("loaded configuration from config.toml");
                    config
                }
                Err(e) => {
                    warn!("failed to parse config.toml: {}; using defaults", e);
                    Config::default()
                }
            },
            Err(_) => {
                info!("no config.toml found, using default configuration");
                Config::default()
            }
        }
    }

    /// Whole ticks one path playback segment takes at the configured rate
    pub fn segment_ticks(&self) -> u32 {
        (self.path.segment_ms * self.simulation.tick_rate / 1000).max(1)
    }
}
