#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Best-first grid search used by every mobile enemy.
//!
//! The search orders its frontier by `f = g + h` with a Manhattan heuristic
//! and unit-cost cardinal moves. Ties between equal `f` values resolve in
//! insertion order, and a closed cell is never expanded again.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use grid_siege_core::{CellCoord, Direction, TileMap};
use log::trace;

/// Condition under which the search considers the goal reached.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Arrival {
    /// The route must end on the goal cell.
    Exact,
    /// The route ends on the first cell at Manhattan distance 1 from the goal.
    Adjacent,
}

impl Arrival {
    fn reached(self, cell: CellCoord, goal: CellCoord) -> bool {
        match self {
            Self::Exact => cell == goal,
            Self::Adjacent => cell.manhattan_distance(goal) == 1,
        }
    }
}

/// Transient node created while a single search runs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PathNode {
    /// Cell represented by the node.
    pub cell: CellCoord,
    /// Steps taken from the start.
    pub g: u32,
    /// Manhattan distance to the goal.
    pub h: u32,
    /// Search priority, `g + h`.
    pub f: u32,
    /// Index of the node this one was reached from.
    pub parent: Option<usize>,
}

/// Reusable search workspace.
///
/// Buffers are sized to the grid on every call and retained between calls so
/// repeated searches over the same arena do not allocate.
#[derive(Debug, Default)]
pub struct Pathfinder {
    nodes: Vec<PathNode>,
    open: BinaryHeap<Reverse<(u32, u64, usize)>>,
    closed: Vec<bool>,
    best_open: Vec<u32>,
    sequence: u64,
}

impl Pathfinder {
    /// Creates an empty workspace.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Searches for a route from `start` toward `goal`.
    ///
    /// The returned route begins with `start`, so the next cell to step into
    /// sits at index 1 and the number of steps is `len() - 1`. An empty route
    /// means no path exists or an endpoint lies outside the grid; callers hold
    /// position in that case.
    pub fn find_path<M>(
        &mut self,
        start: CellCoord,
        goal: CellCoord,
        map: &M,
        arrival: Arrival,
    ) -> Vec<CellCoord>
    where
        M: TileMap + ?Sized,
    {
        if !map.contains(start) || !map.contains(goal) {
            trace!("path request {:?} -> {:?} leaves the grid", start, goal);
            return Vec::new();
        }

        let width = map.width();
        self.reset(width, map.height());

        let h = start.manhattan_distance(goal);
        self.push(
            width,
            PathNode {
                cell: start,
                g: 0,
                h,
                f: 0,
                parent: None,
            },
        );

        while let Some(Reverse((_, _, index))) = self.open.pop() {
            let current = self.nodes[index];
            let slot = cell_index(current.cell, width);
            if self.closed[slot] {
                continue;
            }

            if arrival.reached(current.cell, goal) {
                return self.trace_back(index);
            }

            self.closed[slot] = true;
            self.best_open[slot] = u32::MAX;

            for direction in Direction::SEARCH_ORDER {
                let Some(next) = current.cell.neighbor(direction) else {
                    continue;
                };
                if !map.contains(next) || !map.is_walkable(next) {
                    continue;
                }

                let next_slot = cell_index(next, width);
                if self.closed[next_slot] {
                    continue;
                }

                let g = current.g + 1;
                if self.best_open[next_slot] <= g {
                    continue;
                }

                let h = next.manhattan_distance(goal);
                self.push(
                    width,
                    PathNode {
                        cell: next,
                        g,
                        h,
                        f: g + h,
                        parent: Some(index),
                    },
                );
            }
        }

        trace!("no path from {:?} to {:?}", start, goal);
        Vec::new()
    }

    fn reset(&mut self, width: u32, height: u32) {
        let cells = width as usize * height as usize;
        self.nodes.clear();
        self.open.clear();
        self.closed.clear();
        self.closed.resize(cells, false);
        self.best_open.clear();
        self.best_open.resize(cells, u32::MAX);
        self.sequence = 0;
    }

    fn push(&mut self, width: u32, node: PathNode) {
        let index = self.nodes.len();
        self.nodes.push(node);
        self.best_open[cell_index(node.cell, width)] = node.g;
        self.open.push(Reverse((node.f, self.sequence, index)));
        self.sequence += 1;
    }

    fn trace_back(&self, mut index: usize) -> Vec<CellCoord> {
        let mut path = Vec::new();
        loop {
            let node = self.nodes[index];
            path.push(node.cell);
            match node.parent {
                Some(parent) => index = parent,
                None => break,
            }
        }
        path.reverse();
        path
    }
}

fn cell_index(cell: CellCoord, width: u32) -> usize {
    cell.row() as usize * width as usize + cell.column() as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Open {
        width: u32,
        height: u32,
    }

    impl TileMap for Open {
        fn width(&self) -> u32 {
            self.width
        }

        fn height(&self) -> u32 {
            self.height
        }

        fn is_walkable(&self, cell: CellCoord) -> bool {
            self.contains(cell)
        }
    }

    #[test]
    fn adjacent_goal_on_start_returns_start_only() {
        let map = Open {
            width: 4,
            height: 4,
        };
        let mut pathfinder = Pathfinder::new();
        let path = pathfinder.find_path(
            CellCoord::new(1, 1),
            CellCoord::new(1, 2),
            &map,
            Arrival::Adjacent,
        );
        assert_eq!(path, vec![CellCoord::new(1, 1)]);
    }

    #[test]
    fn out_of_bounds_goal_is_empty() {
        let map = Open {
            width: 4,
            height: 4,
        };
        let mut pathfinder = Pathfinder::new();
        let path = pathfinder.find_path(
            CellCoord::new(0, 0),
            CellCoord::new(9, 0),
            &map,
            Arrival::Exact,
        );
        assert!(path.is_empty());
    }

    #[test]
    fn ties_prefer_earlier_insertions() {
        let map = Open {
            width: 5,
            height: 5,
        };
        let mut pathfinder = Pathfinder::new();
        let path = pathfinder.find_path(
            CellCoord::new(0, 0),
            CellCoord::new(2, 2),
            &map,
            Arrival::Exact,
        );
        assert_eq!(path.len(), 5);
        assert_eq!(path[1], CellCoord::new(1, 0));
    }
}
