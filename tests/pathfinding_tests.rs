use tilequest::pathfinding::{find_path, format_path};
use tilequest::{GridMap, TilePos};

/// Render a path over the grid for failure diagnostics
fn visualize_path(grid: &GridMap, path: &[TilePos], start: TilePos, dest: TilePos) -> String {
    let mut result = String::new();

    result.push_str(&format!("\nPath: {}\n\n", format_path(path)));

    for y in 0..grid.rows {
        for x in 0..grid.cols {
            let pos = TilePos::new(x, y);
            let symbol = if pos == start {
                'S'
            } else if pos == dest {
                'D'
            } else if path.contains(&pos) {
                '*'
            } else if !grid.is_passable(x, y) {
                '█'
            } else {
                '.'
            };
            result.push(symbol);
        }
        result.push('\n');
    }

    result
}

/// Every consecutive pair must differ by one unit on exactly one axis, the
/// endpoints must match the request, and every intermediate tile must be
/// passable
fn assert_valid_path(grid: &GridMap, path: &[TilePos], from: TilePos, to: TilePos) {
    assert_eq!(path.first(), Some(&from), "path must start at the request start");
    assert_eq!(path.last(), Some(&to), "path must end at the request goal");

    for pair in path.windows(2) {
        let dx = (pair[1].x - pair[0].x).abs();
        let dy = (pair[1].y - pair[0].y).abs();
        assert_eq!(dx + dy, 1, "consecutive tiles must be 4-adjacent: {:?}", pair);
    }

    for pos in &path[1..] {
        assert!(
            grid.is_passable(pos.x, pos.y),
            "tile ({},{}) on the path is impassable",
            pos.x,
            pos.y
        );
    }
}

#[test]
fn test_detour_around_single_blocked_tile() {
    // 5x5, all passable except (2,2); crossing the middle row forces one
    // sidestep, so the shortest route is 7 tiles long
    let grid = GridMap::with_blocked(5, 5, 16, 16, &[TilePos::new(2, 2)]);
    let from = TilePos::new(0, 2);
    let to = TilePos::new(4, 2);

    let path = find_path(&grid, from, to).expect("detour should exist");
    println!("{}", visualize_path(&grid, &path, from, to));

    assert_valid_path(&grid, &path, from, to);
    assert_eq!(path.len(), 7);
    assert!(!path.contains(&TilePos::new(2, 2)));
}

#[test]
fn test_blocking_a_corridor_disconnects_the_route() {
    // A one-tile-wide corridor: passable before, unreachable after the
    // middle tile is blocked
    let open = GridMap::with_blocked(
        3,
        3,
        16,
        16,
        &[
            TilePos::new(0, 0),
            TilePos::new(1, 0),
            TilePos::new(2, 0),
            TilePos::new(0, 2),
            TilePos::new(1, 2),
            TilePos::new(2, 2),
        ],
    );
    let from = TilePos::new(0, 1);
    let to = TilePos::new(2, 1);

    let path = find_path(&open, from, to).expect("straight corridor should be walkable");
    assert_eq!(path.len(), 3);

    let mut blocked_tiles = vec![TilePos::new(1, 1)];
    blocked_tiles.extend([
        TilePos::new(0, 0),
        TilePos::new(1, 0),
        TilePos::new(2, 0),
        TilePos::new(0, 2),
        TilePos::new(1, 2),
        TilePos::new(2, 2),
    ]);
    let closed = GridMap::with_blocked(3, 3, 16, 16, &blocked_tiles);

    assert!(
        find_path(&closed, from, to).is_none(),
        "blocking the corridor must yield the failure sentinel"
    );
}

#[test]
fn test_path_in_a_walled_room() {
    // Room with a doorway; the path must thread through it
    let mut walls = Vec::new();
    for y in 0..7 {
        if y != 3 {
            walls.push(TilePos::new(4, y));
        }
    }
    let grid = GridMap::with_blocked(9, 7, 16, 16, &walls);
    let from = TilePos::new(1, 1);
    let to = TilePos::new(7, 5);

    let path = find_path(&grid, from, to).expect("doorway should connect the halves");
    println!("{}", visualize_path(&grid, &path, from, to));

    assert_valid_path(&grid, &path, from, to);
    assert!(
        path.contains(&TilePos::new(4, 3)),
        "the only doorway must be on the path"
    );
}

#[test]
fn test_shortest_path_length_on_open_grid() {
    let grid = GridMap::new(8, 8, 16, 16);
    let from = TilePos::new(1, 1);
    let to = TilePos::new(6, 4);

    let path = find_path(&grid, from, to).expect("open grid is fully connected");

    assert_valid_path(&grid, &path, from, to);
    // Manhattan distance + 1 tiles on an unobstructed grid
    assert_eq!(path.len(), 9);
}
