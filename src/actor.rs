use serde::{Deserialize, Serialize};

use crate::grid::{GridMap, TilePos};

/// A cardinal facing/movement direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Unit tile offset of this direction
    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    pub fn inverse(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// Direction from one tile to an adjacent tile, if exactly one axis differs
    /// by one unit
    pub fn between(from: TilePos, to: TilePos) -> Option<Direction> {
        match (to.x - from.x, to.y - from.y) {
            (-1, 0) => Some(Direction::Left),
            (1, 0) => Some(Direction::Right),
            (0, -1) => Some(Direction::Up),
            (0, 1) => Some(Direction::Down),
            _ => None,
        }
    }
}

/// What an actor is and which command sources drive it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActorKind {
    Player,
    Npc,
}

/// A character on the grid with a continuous pixel position synchronized to
/// tile boundaries.
///
/// The actor is either idle (grid-aligned) or stepping between two adjacent
/// tiles. A step is initiated by a directional command and then continues one
/// speed-sized increment per tick until the destination tile is reached.
#[derive(Debug, Clone)]
pub struct Actor {
    pub kind: ActorKind,
    /// Display name, also the dialog subject for NPCs
    pub name: String,

    /// Pixel position (center of the collision box)
    pub x: f32,
    pub y: f32,

    pub facing: Direction,
    pub is_moving: bool,
    /// Tick counter within the current step, 0 while idle
    pub steps: i32,
    /// Pixels travelled per tick; must divide the tile size evenly
    pub speed: f32,

    /// Countdown gating the first step after standing still
    pub move_timer: i32,
    move_timer_initial: i32,
    /// Direction of the in-flight or just-finished step; cleared when the
    /// actor stands still with no command. While set, the cooldown gate is
    /// bypassed so held keys give continuous movement.
    last_command: Option<Direction>,
}

impl Actor {
    pub fn new(kind: ActorKind, name: &str, x: f32, y: f32, speed: f32, move_cooldown: i32) -> Self {
        Actor {
            kind,
            name: name.to_string(),
            x,
            y,
            facing: Direction::Down,
            is_moving: false,
            steps: 0,
            speed,
            move_timer: move_cooldown,
            move_timer_initial: move_cooldown,
            last_command: None,
        }
    }

    /// The tile the actor's center is on
    pub fn tile(&self, grid: &GridMap) -> TilePos {
        grid.world_to_tile(self.x, self.y)
    }

    /// True when the position coincides exactly with a tile center
    pub fn is_aligned(&self, grid: &GridMap) -> bool {
        let half_w = grid.tile_width as f32 / 2.0;
        let half_h = grid.tile_height as f32 / 2.0;
        (self.x - half_w) % grid.tile_width as f32 == 0.0
            && (self.y - half_h) % grid.tile_height as f32 == 0.0
    }

    /// Turn without moving
    pub fn face(&mut self, direction: Direction) {
        self.facing = direction;
    }

    /// Force the actor back to idle, whatever it was doing
    pub fn halt(&mut self) {
        self.is_moving = false;
        self.steps = 0;
        self.move_timer = self.move_timer_initial;
        self.last_command = None;
    }

    /// Ticks a step takes after the initiation tick
    pub fn steps_per_tile(&self, grid: &GridMap) -> i32 {
        (grid.tile_width as f32 / self.speed) as i32
    }

    /// Pixel position one tile away in the given direction
    pub fn next_position(&self, direction: Direction, grid: &GridMap) -> (f32, f32) {
        let (dx, dy) = direction.delta();
        (
            self.x + (dx * grid.tile_width) as f32,
            self.y + (dy * grid.tile_height) as f32,
        )
    }

    /// Advance one simulation tick.
    ///
    /// A direction change issued mid-step is ignored; the current step always
    /// runs to completion along its original direction.
    pub fn update(&mut self, command: Option<Direction>, grid: &GridMap) {
        if self.is_moving {
            self.continue_moving(grid);
        } else if let Some(direction) = command {
            self.try_move(direction, grid);
        } else {
            self.stop();
        }
    }

    /// Attempt to start a step. Facing updates even when the move is refused.
    fn try_move(&mut self, direction: Direction, grid: &GridMap) {
        self.facing = direction;
        let (next_x, next_y) = self.next_position(direction, grid);
        if self.can_move_to(next_x, next_y, grid) {
            self.is_moving = true;
            self.last_command = Some(direction);
            self.steps = 0;
            self.advance(direction);
        }
    }

    /// Cooldown gate plus passability check.
    ///
    /// The countdown must reach zero before the first step of a standstill;
    /// while `last_command` is set (a step just ran) the gate is bypassed, so
    /// holding a key moves every tick without the initial delay.
    fn can_move_to(&mut self, x: f32, y: f32, grid: &GridMap) -> bool {
        if self.move_timer == 0 || self.last_command.is_some() {
            self.move_timer = self.move_timer_initial;
            match grid.tile_at(x, y) {
                Some(tile) => !tile.collides,
                None => false,
            }
        } else {
            self.move_timer -= 1;
            false
        }
    }

    fn continue_moving(&mut self, grid: &GridMap) {
        self.steps += 1;
        let direction = self.last_command.unwrap_or(self.facing);
        self.advance(direction);
        if self.steps == self.steps_per_tile(grid) - 1 {
            self.is_moving = false;
            self.steps = 0;
            self.move_timer = self.move_timer_initial;
        }
    }

    fn stop(&mut self) {
        self.is_moving = false;
        self.last_command = None;
        self.move_timer = self.move_timer_initial;
    }

    fn advance(&mut self, direction: Direction) {
        let (dx, dy) = direction.delta();
        self.x += dx as f32 * self.speed;
        self.y += dy as f32 * self.speed;
    }
}
