use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::tile::{Tile, TileId};
use super::types::{Direction, Position};
use crate::session_rng::SessionRng;

/// Square board of optional tiles. Cells hold tile ids; the tiles
/// themselves live in a flat arena owned by the grid, so nothing ever
/// aliases a tile through two cells.
pub struct Grid {
    size: usize,
    cells: Vec<Option<TileId>>,
    tiles: HashMap<TileId, Tile>,
    next_id: u32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SerializedTile {
    pub position: Position,
    pub value: u32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SerializedGrid {
    pub size: usize,
    pub cells: Vec<Vec<Option<SerializedTile>>>,
}

impl Grid {
    pub fn empty(size: usize) -> Self {
        Self {
            size,
            cells: vec![None; size * size],
            tiles: HashMap::new(),
            next_id: 0,
        }
    }

    pub fn from_serialized(serialized: &SerializedGrid) -> Self {
        let mut grid = Self::empty(serialized.size);
        for row in &serialized.cells {
            for cell in row.iter().flatten() {
                grid.spawn_tile(cell.position, cell.value);
            }
        }
        grid
    }

    pub fn size(&self) -> usize {
        self.size
    }

    fn index(&self, position: Position) -> usize {
        position.y * self.size + position.x
    }

    pub fn within_bounds(&self, position: Position) -> bool {
        position.x < self.size && position.y < self.size
    }

    /// The cell one step from `position` along `direction`, or `None`
    /// when that step leaves the board.
    pub fn neighbor(&self, position: Position, direction: Direction) -> Option<Position> {
        let (dx, dy) = direction.offset();
        let x = position.x as i32 + dx;
        let y = position.y as i32 + dy;
        if x < 0 || y < 0 || x >= self.size as i32 || y >= self.size as i32 {
            return None;
        }
        Some(Position::new(x as usize, y as usize))
    }

    /// Tile occupying `position`, if any. Out-of-bounds positions are
    /// simply empty, not an error.
    pub fn cell_content(&self, position: Position) -> Option<&Tile> {
        if !self.within_bounds(position) {
            return None;
        }
        self.cells[self.index(position)]
            .and_then(|id| self.tiles.get(&id))
    }

    pub fn cell_occupied(&self, position: Position) -> bool {
        self.cell_content(position).is_some()
    }

    /// Empty coordinates in row-major order. The order is not
    /// semantically significant but must stay deterministic so a fixed
    /// RNG seed reproduces the same spawn sequence.
    pub fn available_cells(&self) -> Vec<Position> {
        let mut available = Vec::new();
        for y in 0..self.size {
            for x in 0..self.size {
                let position = Position::new(x, y);
                if !self.cell_occupied(position) {
                    available.push(position);
                }
            }
        }
        available
    }

    pub fn cells_available(&self) -> bool {
        self.cells.iter().any(|cell| cell.is_none())
    }

    pub fn random_available_cell(&self, rng: &mut SessionRng) -> Option<Position> {
        let available = self.available_cells();
        if available.is_empty() {
            return None;
        }
        Some(available[rng.random_range(0..available.len())])
    }

    /// Creates a tile at `position` and returns its id. The caller is
    /// responsible for picking an empty cell.
    pub fn spawn_tile(&mut self, position: Position, value: u32) -> TileId {
        let id = TileId(self.next_id);
        self.next_id += 1;
        let index = self.index(position);
        self.cells[index] = Some(id);
        self.tiles.insert(id, Tile::new(id, position, value));
        id
    }

    pub fn tile(&self, id: TileId) -> Option<&Tile> {
        self.tiles.get(&id)
    }

    pub fn move_tile(&mut self, id: TileId, to: Position) {
        let Some(tile) = self.tiles.get_mut(&id) else {
            return;
        };
        let from_index = tile.position.y * self.size + tile.position.x;
        let to_index = to.y * self.size + to.x;
        tile.position = to;
        self.cells[from_index] = None;
        self.cells[to_index] = Some(id);
    }

    /// Removes the tile from its cell and the arena. Consumed tiles
    /// survive only through whatever trace recorded them.
    pub fn remove_tile(&mut self, id: TileId) {
        if let Some(tile) = self.tiles.remove(&id) {
            let index = tile.position.y * self.size + tile.position.x;
            if self.cells[index] == Some(id) {
                self.cells[index] = None;
            }
        }
    }

    /// Row-major matrix of tile values, 0 for empty cells.
    pub fn tile_values(&self) -> Vec<Vec<u32>> {
        let mut rows = Vec::with_capacity(self.size);
        for y in 0..self.size {
            let mut row = Vec::with_capacity(self.size);
            for x in 0..self.size {
                row.push(
                    self.cell_content(Position::new(x, y))
                        .map_or(0, |tile| tile.value),
                );
            }
            rows.push(row);
        }
        rows
    }

    pub fn max_tile(&self) -> u32 {
        self.tiles.values().map(|tile| tile.value).max().unwrap_or(0)
    }

    pub fn tiles(&self) -> impl Iterator<Item = &Tile> {
        self.tiles.values()
    }

    pub fn serialize(&self) -> SerializedGrid {
        let mut cells = Vec::with_capacity(self.size);
        for y in 0..self.size {
            let mut row = Vec::with_capacity(self.size);
            for x in 0..self.size {
                row.push(self.cell_content(Position::new(x, y)).map(|tile| {
                    SerializedTile {
                        position: tile.position,
                        value: tile.value,
                    }
                }));
            }
            cells.push(row);
        }
        SerializedGrid {
            size: self.size,
            cells,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_grid_has_all_cells_available() {
        let grid = Grid::empty(4);
        assert_eq!(grid.available_cells().len(), 16);
        assert!(grid.cells_available());
    }

    #[test]
    fn test_spawn_tile_occupies_cell() {
        let mut grid = Grid::empty(4);
        let id = grid.spawn_tile(Position::new(1, 2), 2);
        let tile = grid.cell_content(Position::new(1, 2)).unwrap();
        assert_eq!(tile.id, id);
        assert_eq!(tile.value, 2);
        assert_eq!(grid.available_cells().len(), 15);
    }

    #[test]
    fn test_available_cells_row_major_order() {
        let mut grid = Grid::empty(2);
        grid.spawn_tile(Position::new(0, 0), 2);
        assert_eq!(
            grid.available_cells(),
            vec![
                Position::new(1, 0),
                Position::new(0, 1),
                Position::new(1, 1)
            ]
        );
    }

    #[test]
    fn test_cell_content_out_of_bounds_is_none() {
        let grid = Grid::empty(4);
        assert!(grid.cell_content(Position::new(4, 0)).is_none());
        assert!(grid.cell_content(Position::new(0, 17)).is_none());
    }

    #[test]
    fn test_neighbor_stops_at_edges() {
        let grid = Grid::empty(4);
        assert_eq!(grid.neighbor(Position::new(0, 0), Direction::Up), None);
        assert_eq!(grid.neighbor(Position::new(0, 0), Direction::Left), None);
        assert_eq!(
            grid.neighbor(Position::new(0, 0), Direction::Right),
            Some(Position::new(1, 0))
        );
        assert_eq!(grid.neighbor(Position::new(3, 3), Direction::Down), None);
    }

    #[test]
    fn test_move_tile_updates_cell_and_position() {
        let mut grid = Grid::empty(4);
        let id = grid.spawn_tile(Position::new(3, 0), 4);
        grid.move_tile(id, Position::new(0, 0));
        assert!(grid.cell_content(Position::new(3, 0)).is_none());
        let tile = grid.cell_content(Position::new(0, 0)).unwrap();
        assert_eq!(tile.id, id);
        assert_eq!(tile.position, Position::new(0, 0));
    }

    #[test]
    fn test_remove_tile_clears_cell_and_arena() {
        let mut grid = Grid::empty(4);
        let id = grid.spawn_tile(Position::new(2, 2), 8);
        grid.remove_tile(id);
        assert!(grid.cell_content(Position::new(2, 2)).is_none());
        assert!(grid.tile(id).is_none());
    }

    #[test]
    fn test_random_available_cell_none_when_full() {
        let mut grid = Grid::empty(2);
        for y in 0..2 {
            for x in 0..2 {
                grid.spawn_tile(Position::new(x, y), 2);
            }
        }
        let mut rng = SessionRng::new(42);
        assert_eq!(grid.random_available_cell(&mut rng), None);
        assert!(!grid.cells_available());
    }

    #[test]
    fn test_random_available_cell_uniform_seeded() {
        let grid = Grid::empty(4);
        let mut a = SessionRng::new(9);
        let mut b = SessionRng::new(9);
        assert_eq!(
            grid.random_available_cell(&mut a),
            grid.random_available_cell(&mut b)
        );
    }

    #[test]
    fn test_serialize_restore_round_trip() {
        let mut grid = Grid::empty(4);
        grid.spawn_tile(Position::new(0, 0), 2);
        grid.spawn_tile(Position::new(3, 1), 64);
        grid.spawn_tile(Position::new(2, 3), 2048);

        let restored = Grid::from_serialized(&grid.serialize());
        assert_eq!(restored.size(), 4);
        assert_eq!(restored.serialize(), grid.serialize());
        assert_eq!(restored.tile_values(), grid.tile_values());
    }

    #[test]
    fn test_tile_values_matrix() {
        let mut grid = Grid::empty(2);
        grid.spawn_tile(Position::new(1, 0), 4);
        assert_eq!(grid.tile_values(), vec![vec![0, 4], vec![0, 0]]);
    }

    #[test]
    fn test_max_tile() {
        let mut grid = Grid::empty(4);
        assert_eq!(grid.max_tile(), 0);
        grid.spawn_tile(Position::new(0, 0), 2);
        grid.spawn_tile(Position::new(1, 0), 512);
        assert_eq!(grid.max_tile(), 512);
    }
}
