use crate::calculate_offsets;

use super::{
    layout::{LEAF_KEY_OFFSET, LEAF_KEY_SIZE, LEAF_VALUE_OFFSET, LEAF_VALUE_SIZE},
    row::Row,
};

/// A leaf cell: a 4-byte key followed by one serialized row.
///
/// Keys are stored in insertion order; ordered placement arrives together
/// with node splitting.
pub struct LeafCell {
    key: u32,
    row: Row,
}

impl LeafCell {
    pub fn new(key: u32, row: Row) -> Self {
        Self { key, row }
    }

    pub fn key(&self) -> u32 {
        self.key
    }

    pub fn row(&self) -> &Row {
        &self.row
    }

    /// Encodes the cell into a slot of at least `LEAF_CELL_SIZE` bytes.
    pub fn write_to(&self, slot: &mut [u8]) {
        let (start, end) = calculate_offsets!(LEAF_KEY_OFFSET, LEAF_KEY_SIZE);
        slot[start..end].clone_from_slice(&self.key.to_le_bytes());

        let (start, end) = calculate_offsets!(LEAF_VALUE_OFFSET, LEAF_VALUE_SIZE);
        self.row.write_to(&mut slot[start..end]);
    }

    /// Decodes a cell from a slot of at least `LEAF_CELL_SIZE` bytes.
    pub fn read_from(slot: &[u8]) -> Self {
        let (start, end) = calculate_offsets!(LEAF_KEY_OFFSET, LEAF_KEY_SIZE);
        let key = u32::from_le_bytes(slot[start..end].try_into().expect("failed to read cell key"));

        let (start, end) = calculate_offsets!(LEAF_VALUE_OFFSET, LEAF_VALUE_SIZE);
        let row = Row::read_from(&slot[start..end]);

        Self { key, row }
    }
}
