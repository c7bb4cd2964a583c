use super::types::Position;

/// Identity of a tile for the lifetime of one grid. Ids are never
/// reused within a session, so a move trace can reference tiles that
/// were merged away.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub struct TileId(pub u32);

impl std::fmt::Display for TileId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "t{}", self.0)
    }
}

#[derive(Clone, Debug)]
pub struct Tile {
    pub id: TileId,
    pub position: Position,
    pub value: u32,
}

impl Tile {
    pub fn new(id: TileId, position: Position, value: u32) -> Self {
        Self {
            id,
            position,
            value,
        }
    }
}
