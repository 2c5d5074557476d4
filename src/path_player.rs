use crate::actor::{Actor, Direction};
use crate::grid::{GridMap, TilePos};

/// One tile-to-tile leg of a path, tagged with the facing it is walked in
#[derive(Debug, Clone, Copy)]
pub struct PathSegment {
    pub target: TilePos,
    pub direction: Direction,
}

/// Drives an actor through a found path as a chain of fixed-duration
/// tile-to-tile interpolations.
///
/// Segments run strictly in order; each one sets the facing on its first
/// tick and the last one returns the actor to idle. Playback owns the
/// actor's position while active, so a caller starting a new playback must
/// halt the previous one first.
pub struct PathPlayback {
    segments: Vec<PathSegment>,
    current: usize,
    tick_in_segment: u32,
    segment_ticks: u32,
    /// Pixel position at the start of the current segment
    start: (f32, f32),
}

impl PathPlayback {
    /// Decompose a path into directional segments.
    ///
    /// Returns None when the actor is mid-step, the path is shorter than two
    /// tiles, or a consecutive pair is not 4-adjacent.
    pub fn new(actor: &Actor, grid: &GridMap, path: &[TilePos], segment_ticks: u32) -> Option<Self> {
        if !actor.is_aligned(grid) || path.len() < 2 || segment_ticks == 0 {
            return None;
        }

        let mut segments = Vec::with_capacity(path.len() - 1);
        for pair in path.windows(2) {
            let direction = Direction::between(pair[0], pair[1])?;
            segments.push(PathSegment {
                target: pair[1],
                direction,
            });
        }

        Some(PathPlayback {
            segments,
            current: 0,
            tick_in_segment: 0,
            segment_ticks,
            start: (actor.x, actor.y),
        })
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    /// Advance playback one tick. Returns true once the final segment has
    /// completed and the actor is idle again.
    pub fn advance(&mut self, actor: &mut Actor, grid: &GridMap) -> bool {
        let segment = self.segments[self.current];
        if self.tick_in_segment == 0 {
            actor.face(segment.direction);
            actor.is_moving = true;
        }
        self.tick_in_segment += 1;

        let (target_x, target_y) = grid.tile_center(segment.target);
        if self.tick_in_segment >= self.segment_ticks {
            // Segment done: snap to the tile center, no drift accumulates
            actor.x = target_x;
            actor.y = target_y;
            self.current += 1;
            self.tick_in_segment = 0;
            self.start = (target_x, target_y);
            if self.current == self.segments.len() {
                actor.halt();
                return true;
            }
        } else {
            let t = self.tick_in_segment as f32 / self.segment_ticks as f32;
            actor.x = self.start.0 + (target_x - self.start.0) * t;
            actor.y = self.start.1 + (target_y - self.start.1) * t;
        }
        false
    }
}
