use std::sync::Arc;

use log::debug;

use crate::{
    calculate_offsets,
    storage::layout::{
        IS_ROOT_OFFSET, IS_ROOT_SIZE, LEAF_CELL_SIZE, LEAF_HEADER_SIZE, LEAF_MAX_CELLS,
        LEAF_NUM_CELLS_OFFSET, LEAF_NUM_CELLS_SIZE, LEAF_VALUE_OFFSET, LEAF_VALUE_SIZE,
        NODE_TYPE_OFFSET, NODE_TYPE_SIZE, PARENT_POINTER_OFFSET, PARENT_POINTER_SIZE,
    },
};

use super::{
    cell::LeafCell,
    page::{u8_to_bool, CachedPage, PageType},
    row::Row,
};

// In-memory representation of a page.
//
// This structure is used to manipulate page contents in memory. All reads
// and writes go through the page lock, so no two views mutate the same
// cell at once.
pub struct Node {
    page: CachedPage,
    _type: PageType,
}

impl Node {
    pub fn load(page: CachedPage) -> Result<Self, String> {
        let mut obj = Self {
            page,
            _type: PageType::Leaf,
        };

        obj._type = obj.read_page_type()?;

        Ok(obj)
    }

    fn read_page_type(&self) -> Result<PageType, String> {
        let (start, end) = calculate_offsets!(NODE_TYPE_OFFSET, NODE_TYPE_SIZE);
        let page = Arc::clone(&self.page.0);
        let handle = page.read().expect("failed to retrieve read lock on page");

        handle[start..end][0].try_into()
    }

    pub fn node_type(&self) -> &PageType {
        &self._type
    }

    pub fn is_root(&self) -> Result<bool, String> {
        let (start, end) = calculate_offsets!(IS_ROOT_OFFSET, IS_ROOT_SIZE);
        let page = Arc::clone(&self.page.0);
        let handle = page.read().expect("failed to retrieve read lock on page");

        u8_to_bool(handle[start..end][0])
    }

    pub fn parent(&self) -> u32 {
        let (start, end) = calculate_offsets!(PARENT_POINTER_OFFSET, PARENT_POINTER_SIZE);
        let page = Arc::clone(&self.page.0);
        let handle = page.read().expect("failed to retrieve read lock on page");

        u32::from_le_bytes(
            handle[start..end]
                .try_into()
                .expect("failed to read parent pointer"),
        )
    }

    pub fn num_cells(&self) -> u32 {
        let (start, end) = calculate_offsets!(LEAF_NUM_CELLS_OFFSET, LEAF_NUM_CELLS_SIZE);
        let page = Arc::clone(&self.page.0);
        let handle = page.read().expect("failed to retrieve read lock on page");

        u32::from_le_bytes(
            handle[start..end]
                .try_into()
                .expect("failed to read num cells bytes"),
        )
    }

    /// Byte offset of a cell within the page.
    fn cell_offset(num: u32) -> usize {
        LEAF_HEADER_SIZE + num as usize * LEAF_CELL_SIZE
    }

    pub fn key(&self, cell_num: u32) -> u32 {
        let cell = self.read_cell(cell_num);
        cell.key()
    }

    /// Reads the row stored in a cell's value region.
    pub fn row(&self, cell_num: u32) -> Row {
        let pos = Self::cell_offset(cell_num) + LEAF_VALUE_OFFSET;
        let (start, end) = calculate_offsets!(pos, LEAF_VALUE_SIZE);
        let page = Arc::clone(&self.page.0);
        let handle = page.read().expect("failed to retrieve read lock on page");

        Row::read_from(&handle[start..end])
    }

    pub fn read_cell(&self, cell_num: u32) -> LeafCell {
        let pos = Self::cell_offset(cell_num);
        let (start, end) = calculate_offsets!(pos, LEAF_CELL_SIZE);
        let page = Arc::clone(&self.page.0);
        let handle = page.read().expect("failed to retrieve read lock on page");

        LeafCell::read_from(&handle[start..end])
    }

    /// Writes a cell at `cell_num`, shifting the cells at and after that
    /// position one slot to the right.
    ///
    /// Errs when the leaf already holds `LEAF_MAX_CELLS` cells; splitting
    /// does not exist yet.
    pub fn insert_cell(&mut self, cell_num: u32, cell: &LeafCell) -> Result<(), String> {
        let num_cells = self.num_cells();
        if num_cells as usize >= LEAF_MAX_CELLS {
            return Err("leaf node is full; need to implement node splitting".to_string());
        }

        let page = Arc::clone(&self.page.0);
        let mut handle = page.write().expect("failed to retrieve write lock on page");

        let pos = Self::cell_offset(cell_num);
        if cell_num < num_cells {
            let occupied_end = Self::cell_offset(num_cells);
            handle.0.copy_within(pos..occupied_end, pos + LEAF_CELL_SIZE);
        }

        debug!(
            "inserting leaf cell {} at offset {}; key {}",
            cell_num,
            pos,
            cell.key()
        );

        cell.write_to(&mut handle[pos..pos + LEAF_CELL_SIZE]);

        let (start, end) = calculate_offsets!(LEAF_NUM_CELLS_OFFSET, LEAF_NUM_CELLS_SIZE);
        handle[start..end].clone_from_slice(&(num_cells + 1).to_le_bytes());

        Ok(())
    }
}
