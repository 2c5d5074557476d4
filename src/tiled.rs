use std::collections::HashSet;
use std::fs;

use log::info;
use serde::Deserialize;
use thiserror::Error;

use crate::actor::Direction;
use crate::grid::{GridMap, TileDescriptor, TilePos};
use crate::zones::{Rect, Zone};

/// Object layer names expected in the map export
const OBJECTS_LAYER: &str = "Objects";
const ZONES_LAYER: &str = "Zones";
const POI_LAYER: &str = "Points of interest";

/// Name of the required player spawn object
pub const SPAWN_POINT: &str = "Spawn Point";

/// Load-time failures. The world cannot be built from a broken map, so all
/// of these are fatal to initialization.
#[derive(Debug, Error)]
pub enum MapError {
    #[error("failed to read map file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse map JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("map has no tile layer")]
    MissingTileLayer,
    #[error("map has no tileset")]
    MissingTileset,
    #[error("tile layer has {found} cells, expected {expected}")]
    LayerSizeMismatch { expected: usize, found: usize },
    #[error("required map object \"{0}\" not found")]
    MissingObject(&'static str),
}

// Serde model of the relevant subset of a Tiled JSON export

#[derive(Debug, Deserialize)]
struct TiledMap {
    width: i32,
    height: i32,
    #[serde(rename = "tilewidth")]
    tile_width: i32,
    #[serde(rename = "tileheight")]
    tile_height: i32,
    layers: Vec<TiledLayer>,
    tilesets: Vec<TiledTileset>,
}

#[derive(Debug, Deserialize)]
struct TiledLayer {
    name: String,
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    data: Vec<u32>,
    #[serde(default)]
    objects: Vec<TiledObject>,
}

#[derive(Debug, Deserialize)]
struct TiledObject {
    #[serde(default)]
    name: String,
    x: f32,
    y: f32,
    #[serde(default)]
    width: f32,
    #[serde(default)]
    height: f32,
    #[serde(default)]
    properties: Vec<TiledProperty>,
}

#[derive(Debug, Deserialize)]
struct TiledProperty {
    name: String,
    #[serde(default)]
    value: serde_json::Value,
}

#[derive(Debug, Deserialize)]
struct TiledTileset {
    #[serde(rename = "firstgid")]
    first_gid: u32,
    #[serde(default)]
    tiles: Vec<TilesetTile>,
}

#[derive(Debug, Deserialize)]
struct TilesetTile {
    id: u32,
    #[serde(default)]
    properties: Vec<TiledProperty>,
}

/// A named point object, used for the player spawn and NPC spawns
#[derive(Debug, Clone)]
pub struct SpawnMarker {
    pub name: String,
    pub x: f32,
    pub y: f32,
}

/// A sign placed on a colliding tile, readable from the listed directions
#[derive(Debug, Clone)]
pub struct PoiMarker {
    pub tile: TilePos,
    pub text: String,
    pub visible_from: Vec<Direction>,
}

/// Everything the simulation needs out of one map file
pub struct LoadedMap {
    pub grid: GridMap,
    pub spawn: SpawnMarker,
    pub npc_spawns: Vec<SpawnMarker>,
    pub zones: Vec<Zone>,
    pub pois: Vec<PoiMarker>,
}

/// Read and parse a map file
pub fn load_map(path: &str) -> Result<LoadedMap, MapError> {
    let contents = fs::read_to_string(path)?;
    let map = parse_map(&contents)?;
    info!(
        "loaded map {}: {}x{} tiles, {} zones, {} signs, {} npc spawns",
        path,
        map.grid.cols,
        map.grid.rows,
        map.zones.len(),
        map.pois.len(),
        map.npc_spawns.len()
    );
    Ok(map)
}

/// Parse a Tiled-style JSON export into a loaded map
pub fn parse_map(json: &str) -> Result<LoadedMap, MapError> {
    let map: TiledMap = serde_json::from_str(json)?;

    if map.tilesets.is_empty() {
        return Err(MapError::MissingTileset);
    }
    let colliding = colliding_tile_types(&map.tilesets);

    let tile_layer = map
        .layers
        .iter()
        .find(|l| l.kind == "tilelayer")
        .ok_or(MapError::MissingTileLayer)?;

    let expected = (map.width * map.height) as usize;
    if tile_layer.data.len() != expected {
        return Err(MapError::LayerSizeMismatch {
            expected,
            found: tile_layer.data.len(),
        });
    }

    let tiles: Vec<TileDescriptor> = tile_layer
        .data
        .iter()
        .map(|&gid| TileDescriptor {
            index: gid,
            collides: colliding.contains(&gid),
        })
        .collect();

    // from_tiles only fails on a size mismatch, which was checked above
    let grid = GridMap::from_tiles(map.width, map.height, map.tile_width, map.tile_height, tiles)
        .ok_or(MapError::LayerSizeMismatch {
            expected,
            found: 0,
        })?;

    let mut spawn = None;
    let mut npc_spawns = Vec::new();
    for object in objects_of(&map, OBJECTS_LAYER) {
        if object.name == SPAWN_POINT {
            spawn = Some(SpawnMarker {
                name: object.name.clone(),
                x: object.x,
                y: object.y,
            });
        } else if !object.name.is_empty() {
            npc_spawns.push(SpawnMarker {
                name: object.name.clone(),
                x: object.x,
                y: object.y,
            });
        }
    }
    let spawn = spawn.ok_or(MapError::MissingObject(SPAWN_POINT))?;

    let zones = objects_of(&map, ZONES_LAYER)
        .map(|object| Zone {
            name: object.name.clone(),
            bounds: Rect::new(object.x, object.y, object.width, object.height),
        })
        .collect();

    let pois = objects_of(&map, POI_LAYER)
        .filter_map(|object| poi_from_object(&grid, object))
        .collect();

    Ok(LoadedMap {
        grid,
        spawn,
        npc_spawns,
        zones,
        pois,
    })
}

/// Global tile ids whose tile type declares `collides: true`.
/// A tile type with no declared property is passable by default.
fn colliding_tile_types(tilesets: &[TiledTileset]) -> HashSet<u32> {
    let mut colliding = HashSet::new();
    for tileset in tilesets {
        for tile in &tileset.tiles {
            let collides = tile
                .properties
                .iter()
                .any(|p| p.name == "collides" && p.value == serde_json::Value::Bool(true));
            if collides {
                colliding.insert(tileset.first_gid + tile.id);
            }
        }
    }
    colliding
}

fn objects_of<'a>(map: &'a TiledMap, layer_name: &'a str) -> impl Iterator<Item = &'a TiledObject> {
    map.layers
        .iter()
        .filter(move |l| l.kind == "objectgroup" && l.name == layer_name)
        .flat_map(|l| l.objects.iter())
}

fn poi_from_object(grid: &GridMap, object: &TiledObject) -> Option<PoiMarker> {
    let text = object.properties.iter().find_map(|p| {
        if p.name == "text" {
            if let serde_json::Value::String(s) = &p.value {
                return Some(s.clone());
            }
        }
        None
    })?;

    let facings = [
        ("up", Direction::Up),
        ("down", Direction::Down),
        ("left", Direction::Left),
        ("right", Direction::Right),
    ];
    let visible_from: Vec<Direction> = facings
        .iter()
        .filter(|(name, _)| {
            object
                .properties
                .iter()
                .any(|p| p.name == *name && p.value == serde_json::Value::Bool(true))
        })
        .map(|(_, direction)| *direction)
        .collect();

    Some(PoiMarker {
        tile: grid.world_to_tile(object.x, object.y),
        text,
        visible_from,
    })
}
