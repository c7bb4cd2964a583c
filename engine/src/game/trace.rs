use super::tile::TileId;
use super::types::Position;

/// Record of what one resolved move did to each tile, enough to drive
/// an animated replay without the grid keeping per-tile history.
#[derive(Clone, Debug, Default)]
pub struct MoveTrace {
    pub entries: Vec<TraceEntry>,
    pub spawned: Option<SpawnRecord>,
}

/// One tile's journey during a move. A merged-away tile carries the id
/// of the tile the merge produced; a plain slide carries `None`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TraceEntry {
    pub tile: TileId,
    pub from: Position,
    pub to: Position,
    pub merged_into: Option<TileId>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SpawnRecord {
    pub tile: TileId,
    pub position: Position,
    pub value: u32,
}

impl MoveTrace {
    pub fn record_slide(&mut self, tile: TileId, from: Position, to: Position) {
        self.entries.push(TraceEntry {
            tile,
            from,
            to,
            merged_into: None,
        });
    }

    pub fn record_merge(&mut self, tile: TileId, from: Position, to: Position, into: TileId) {
        self.entries.push(TraceEntry {
            tile,
            from,
            to,
            merged_into: Some(into),
        });
    }

    pub fn record_spawn(&mut self, tile: TileId, position: Position, value: u32) {
        self.spawned = Some(SpawnRecord {
            tile,
            position,
            value,
        });
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty() && self.spawned.is_none()
    }
}
