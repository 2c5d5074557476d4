/// A tile coordinate on the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TilePos {
    pub x: i32,
    pub y: i32,
}

impl TilePos {
    pub fn new(x: i32, y: i32) -> Self {
        TilePos { x, y }
    }
}

/// Per-tile data: the tile type id from the map source and its collision flag
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TileDescriptor {
    /// Tile type id ("ID" field in the map editor)
    pub index: u32,
    pub collides: bool,
}

/// Static walkability map. Built once at load, read-only afterwards.
#[derive(Clone)]
pub struct GridMap {
    pub cols: i32,
    pub rows: i32,
    /// Tile dimensions in pixels
    pub tile_width: i32,
    pub tile_height: i32,
    tiles: Vec<TileDescriptor>,
}

impl GridMap {
    /// Create a grid with all tiles passable (index 0)
    pub fn new(cols: i32, rows: i32, tile_width: i32, tile_height: i32) -> Self {
        GridMap {
            cols,
            rows,
            tile_width,
            tile_height,
            tiles: vec![
                TileDescriptor {
                    index: 0,
                    collides: false
                };
                (cols * rows) as usize
            ],
        }
    }

    /// Create a grid with specific blocked tiles
    pub fn with_blocked(cols: i32, rows: i32, tile_width: i32, tile_height: i32, blocked: &[TilePos]) -> Self {
        let mut grid = Self::new(cols, rows, tile_width, tile_height);
        for pos in blocked {
            if pos.x >= 0 && pos.x < cols && pos.y >= 0 && pos.y < rows {
                grid.tiles[(pos.x + pos.y * cols) as usize].collides = true;
            }
        }
        grid
    }

    /// Build a grid from a row-major tile list. Returns None on a size mismatch.
    pub fn from_tiles(
        cols: i32,
        rows: i32,
        tile_width: i32,
        tile_height: i32,
        tiles: Vec<TileDescriptor>,
    ) -> Option<Self> {
        if tiles.len() != (cols * rows) as usize {
            return None;
        }
        Some(GridMap {
            cols,
            rows,
            tile_width,
            tile_height,
            tiles,
        })
    }

    pub fn in_bounds(&self, tile_x: i32, tile_y: i32) -> bool {
        tile_x >= 0 && tile_x < self.cols && tile_y >= 0 && tile_y < self.rows
    }

    /// Get the descriptor at tile coordinates, or None outside the grid
    pub fn tile(&self, tile_x: i32, tile_y: i32) -> Option<&TileDescriptor> {
        if !self.in_bounds(tile_x, tile_y) {
            return None;
        }
        Some(&self.tiles[(tile_x + tile_y * self.cols) as usize])
    }

    /// Check whether a tile can be walked on. Out of bounds is impassable.
    pub fn is_passable(&self, tile_x: i32, tile_y: i32) -> bool {
        match self.tile(tile_x, tile_y) {
            Some(tile) => !tile.collides,
            None => false,
        }
    }

    /// Get the descriptor of the tile a world point falls in
    pub fn tile_at(&self, world_x: f32, world_y: f32) -> Option<&TileDescriptor> {
        let pos = self.world_to_tile(world_x, world_y);
        self.tile(pos.x, pos.y)
    }

    /// Convert world pixel coordinates to the tile they fall in (floor division)
    pub fn world_to_tile(&self, world_x: f32, world_y: f32) -> TilePos {
        TilePos {
            x: (world_x / self.tile_width as f32).floor() as i32,
            y: (world_y / self.tile_height as f32).floor() as i32,
        }
    }

    /// World position of a tile's top-left corner
    pub fn tile_to_world(&self, pos: TilePos) -> (f32, f32) {
        (
            (pos.x * self.tile_width) as f32,
            (pos.y * self.tile_height) as f32,
        )
    }

    /// World position of a tile's center, the anchor actors align to
    pub fn tile_center(&self, pos: TilePos) -> (f32, f32) {
        (
            (pos.x * self.tile_width) as f32 + self.tile_width as f32 / 2.0,
            (pos.y * self.tile_height) as f32 + self.tile_height as f32 / 2.0,
        )
    }

    pub fn width_in_pixels(&self) -> f32 {
        (self.cols * self.tile_width) as f32
    }

    pub fn height_in_pixels(&self) -> f32 {
        (self.rows * self.tile_height) as f32
    }
}
