use crate::actor::Actor;
use crate::grid::{GridMap, TilePos};

/// The tile one unit away in the actor's facing direction
pub fn faced_tile(actor: &Actor, grid: &GridMap) -> TilePos {
    let (dx, dy) = actor.facing.delta();
    let tile = actor.tile(grid);
    TilePos::new(tile.x + dx, tile.y + dy)
}

/// Index of the actor standing on `tile`, skipping `except`
pub fn occupant_of(
    actors: &[Actor],
    grid: &GridMap,
    tile: TilePos,
    except: usize,
) -> Option<usize> {
    actors
        .iter()
        .enumerate()
        .find(|(i, actor)| *i != except && actor.tile(grid) == tile)
        .map(|(i, _)| i)
}

pub fn is_occupied(actors: &[Actor], grid: &GridMap, tile: TilePos, except: usize) -> bool {
    occupant_of(actors, grid, tile, except).is_some()
}

/// Resolve an interact command from `source`.
///
/// When the faced tile is occupied, the occupant is spun around to face the
/// interacting actor (exact inverse facing) and yanked back to idle so a
/// mid-step occupant does not keep walking through the exchange. Returns the
/// occupant's index; the domain-level event is the caller's business.
pub fn interact(actors: &mut [Actor], grid: &GridMap, source: usize) -> Option<usize> {
    let target = faced_tile(&actors[source], grid);
    let occupant = occupant_of(actors, grid, target, source)?;

    let reply_facing = actors[source].facing.inverse();
    actors[occupant].halt();
    actors[occupant].face(reply_facing);
    Some(occupant)
}
