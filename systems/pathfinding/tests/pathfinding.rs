use grid_siege_core::{CellCoord, TileMap};
use grid_siege_system_pathfinding::{Arrival, Pathfinder};

struct Grid {
    width: u32,
    height: u32,
    blocked: Vec<CellCoord>,
}

impl Grid {
    fn open(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            blocked: Vec::new(),
        }
    }

    fn with_blocked(mut self, cells: impl IntoIterator<Item = CellCoord>) -> Self {
        self.blocked.extend(cells);
        self
    }
}

impl TileMap for Grid {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn is_walkable(&self, cell: CellCoord) -> bool {
        self.contains(cell) && !self.blocked.contains(&cell)
    }
}

fn assert_connected(path: &[CellCoord], grid: &Grid) {
    for pair in path.windows(2) {
        assert_eq!(pair[0].manhattan_distance(pair[1]), 1, "{pair:?}");
    }
    for cell in path.iter().skip(1) {
        assert!(grid.is_walkable(*cell), "{cell:?} is blocked");
    }
}

#[test]
fn open_grid_steps_match_manhattan_distance() {
    let grid = Grid::open(20, 20);
    let mut pathfinder = Pathfinder::new();
    let enemy = CellCoord::new(5, 5);
    let player = CellCoord::new(5, 10);

    let exact = pathfinder.find_path(enemy, player, &grid, Arrival::Exact);
    assert_eq!(exact.len() - 1, 5);
    assert_eq!(exact.first(), Some(&enemy));
    assert_eq!(exact.last(), Some(&player));
    assert_connected(&exact, &grid);

    let adjacent = pathfinder.find_path(enemy, player, &grid, Arrival::Adjacent);
    assert_eq!(adjacent.len() - 1, 4);
    assert_eq!(adjacent.last().map(|cell| cell.manhattan_distance(player)), Some(1));
    assert_connected(&adjacent, &grid);
}

#[test]
fn walls_force_a_detour() {
    let wall = (0..9).map(|column| CellCoord::new(column, 4));
    let grid = Grid::open(10, 10).with_blocked(wall);
    let mut pathfinder = Pathfinder::new();

    let path = pathfinder.find_path(
        CellCoord::new(0, 0),
        CellCoord::new(0, 8),
        &grid,
        Arrival::Exact,
    );

    assert!(!path.is_empty());
    assert!(path.contains(&CellCoord::new(9, 4)));
    assert_eq!(path.len() - 1, 26);
    assert_connected(&path, &grid);
}

#[test]
fn enclosed_goal_is_unreachable() {
    let goal = CellCoord::new(5, 5);
    let ring = [
        CellCoord::new(5, 4),
        CellCoord::new(4, 5),
        CellCoord::new(6, 5),
        CellCoord::new(5, 6),
    ];
    let grid = Grid::open(10, 10).with_blocked(ring);
    let mut pathfinder = Pathfinder::new();

    assert!(pathfinder
        .find_path(CellCoord::new(0, 0), goal, &grid, Arrival::Exact)
        .is_empty());
    assert!(pathfinder
        .find_path(CellCoord::new(0, 0), goal, &grid, Arrival::Adjacent)
        .is_empty());
}

#[test]
fn workspace_is_reusable_across_grids() {
    let mut pathfinder = Pathfinder::new();
    let small = Grid::open(3, 3);
    let large = Grid::open(30, 12);

    let first = pathfinder.find_path(
        CellCoord::new(0, 0),
        CellCoord::new(2, 2),
        &small,
        Arrival::Exact,
    );
    let second = pathfinder.find_path(
        CellCoord::new(0, 0),
        CellCoord::new(29, 11),
        &large,
        Arrival::Exact,
    );
    let third = pathfinder.find_path(
        CellCoord::new(0, 0),
        CellCoord::new(2, 2),
        &small,
        Arrival::Exact,
    );

    assert_eq!(first.len() - 1, 4);
    assert_eq!(second.len() - 1, 40);
    assert_eq!(first, third);
}
