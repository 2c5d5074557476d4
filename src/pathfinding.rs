use std::collections::{HashMap, VecDeque};

use log::debug;

use crate::grid::{GridMap, TilePos};

/// One queued search: walk from `from` to `to` over passable tiles
#[derive(Debug, Clone, Copy)]
pub struct PathRequest {
    pub id: usize,
    pub from: TilePos,
    pub to: TilePos,
}

/// Outcome of a solved request. `path` is the full tile sequence from start
/// to goal inclusive, or None when no route exists.
#[derive(Debug, Clone)]
pub struct PathResponse {
    pub id: usize,
    pub path: Option<Vec<TilePos>>,
}

/// Batching path solver.
///
/// Requests accumulate via `enqueue` and nothing runs until `solve` is
/// called; one call drains the whole queue and yields exactly one response
/// per request, in enqueue order. A request cannot be withdrawn once issued.
pub struct PathFinder {
    queue: VecDeque<PathRequest>,
    next_id: usize,
}

impl PathFinder {
    pub fn new() -> Self {
        PathFinder {
            queue: VecDeque::new(),
            next_id: 0,
        }
    }

    /// Queue a search and get its request id back
    pub fn enqueue(&mut self, from: TilePos, to: TilePos) -> usize {
        let id = self.next_id;
        self.next_id += 1;
        self.queue.push_back(PathRequest { id, from, to });
        id
    }

    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Solve every queued request against the grid's passability
    pub fn solve(&mut self, grid: &GridMap) -> Vec<PathResponse> {
        let mut responses = Vec::with_capacity(self.queue.len());
        while let Some(request) = self.queue.pop_front() {
            let path = find_path(grid, request.from, request.to);
            debug!(
                "path request {}: ({},{}) -> ({},{}) {}",
                request.id,
                request.from.x,
                request.from.y,
                request.to.x,
                request.to.y,
                match &path {
                    Some(p) => format!("found, {} tiles", p.len()),
                    None => "not found".to_string(),
                }
            );
            responses.push(PathResponse {
                id: request.id,
                path,
            });
        }
        responses
    }
}

impl Default for PathFinder {
    fn default() -> Self {
        Self::new()
    }
}

/// Neighbor expansion order. Fixed so equal-cost ties always break the same
/// way.
const NEIGHBOR_ORDER: [(i32, i32); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

/// Uniform-cost shortest path over the 4-connected grid.
///
/// Breadth-first search; every visited tile except the start must be
/// passable. Returns the tile sequence from `from` to `to` inclusive, or
/// None when the destination is impassable or unreachable.
pub fn find_path(grid: &GridMap, from: TilePos, to: TilePos) -> Option<Vec<TilePos>> {
    if !grid.in_bounds(from.x, from.y) || !grid.is_passable(to.x, to.y) {
        return None;
    }
    if from == to {
        return Some(vec![from]);
    }

    let mut came_from: HashMap<TilePos, TilePos> = HashMap::new();
    let mut frontier = VecDeque::new();
    frontier.push_back(from);
    came_from.insert(from, from);

    while let Some(current) = frontier.pop_front() {
        if current == to {
            break;
        }
        for (dx, dy) in NEIGHBOR_ORDER {
            let next = TilePos::new(current.x + dx, current.y + dy);
            if grid.is_passable(next.x, next.y) && !came_from.contains_key(&next) {
                came_from.insert(next, current);
                frontier.push_back(next);
            }
        }
    }

    if !came_from.contains_key(&to) {
        return None;
    }

    // Walk the parent links back from the goal
    let mut path = vec![to];
    let mut current = to;
    while current != from {
        current = came_from[&current];
        path.push(current);
    }
    path.reverse();
    Some(path)
}

/// Format a path for display
pub fn format_path(path: &[TilePos]) -> String {
    if path.is_empty() {
        return "No path".to_string();
    }

    let mut result = String::new();
    for (i, pos) in path.iter().enumerate() {
        if i > 0 {
            result.push_str(" -> ");
        }
        result.push_str(&format!("({},{})", pos.x, pos.y));
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_straight_line_path() {
        let grid = GridMap::new(5, 5, 16, 16);
        let path = find_path(&grid, TilePos::new(0, 2), TilePos::new(3, 2)).unwrap();

        assert_eq!(path.first(), Some(&TilePos::new(0, 2)));
        assert_eq!(path.last(), Some(&TilePos::new(3, 2)));
        assert_eq!(path.len(), 4);
    }

    #[test]
    fn test_impassable_destination_fails() {
        let grid = GridMap::with_blocked(5, 5, 16, 16, &[TilePos::new(3, 2)]);

        assert!(find_path(&grid, TilePos::new(0, 2), TilePos::new(3, 2)).is_none());
    }

    #[test]
    fn test_out_of_bounds_destination_fails() {
        let grid = GridMap::new(5, 5, 16, 16);

        assert!(find_path(&grid, TilePos::new(0, 0), TilePos::new(7, 0)).is_none());
    }

    #[test]
    fn test_start_tile_is_exempt_from_passability() {
        // An actor standing on a blocked tile can still walk off it
        let grid = GridMap::with_blocked(5, 5, 16, 16, &[TilePos::new(0, 0)]);
        let path = find_path(&grid, TilePos::new(0, 0), TilePos::new(2, 0)).unwrap();

        assert_eq!(path.first(), Some(&TilePos::new(0, 0)));
        assert_eq!(path.last(), Some(&TilePos::new(2, 0)));
    }

    #[test]
    fn test_responses_arrive_in_enqueue_order() {
        let grid = GridMap::new(5, 5, 16, 16);
        let mut finder = PathFinder::new();

        let first = finder.enqueue(TilePos::new(0, 0), TilePos::new(4, 0));
        let second = finder.enqueue(TilePos::new(0, 0), TilePos::new(0, 4));
        assert_eq!(finder.pending(), 2);

        let responses = finder.solve(&grid);
        assert_eq!(finder.pending(), 0);
        assert_eq!(responses.len(), 2);
        assert_eq!(responses[0].id, first);
        assert_eq!(responses[1].id, second);
        assert!(responses[0].path.is_some());
        assert!(responses[1].path.is_some());
    }
}
