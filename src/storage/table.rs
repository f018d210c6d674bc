use std::path::PathBuf;

use log::debug;

use super::{btree::Node, page::CachedPage, pager::Pager};

/// Table is a wrapper around B+-Trees
///
/// Table wraps a B+-Tree structure and provides functionality to retrieve specific pages in the
/// tree as well as functionality to modify the structure of the tree. It also tracks the stored
/// row count, recovered from the root leaf header at open.
pub struct Table {
    pager: Pager,
    root: u64,
    num_rows: u32,
}

impl Table {
    /// Creates a new Table wrapper on an existing/new B+-Tree structure on-disk
    pub fn new(file_path: PathBuf) -> Self {
        let mut pager = Pager::new(file_path);
        let root = pager.root_page();

        let root_node = Node::load(pager.get_page(root)).expect("failed to load root node");
        let num_rows = root_node.num_cells();
        debug!("Loaded {num_rows} rows.");

        Self {
            pager,
            root,
            num_rows,
        }
    }

    /// Retrieves a particular page in the table
    pub fn get_page(&mut self, num: u64) -> CachedPage {
        self.pager.get_page(num)
    }

    pub fn root(&self) -> u64 {
        self.root
    }

    pub fn root_page(&mut self) -> CachedPage {
        let root = self.root;
        self.pager.get_page(root)
    }

    pub fn num_rows(&self) -> u32 {
        self.num_rows
    }

    pub(crate) fn increment_num_rows(&mut self) {
        self.num_rows += 1;
    }

    /// Flushes every cached page to disk and releases the file.
    pub fn close(self) {
        self.pager.close();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{cell::LeafCell, row::Row, Cursor};

    #[test]
    fn opens_a_fresh_file_with_an_empty_root_leaf() {
        let dir = tempfile::tempdir().unwrap();
        let mut table = Table::new(dir.path().join("test.db"));

        assert_eq!(table.root(), 0);
        assert_eq!(table.num_rows(), 0);

        let node = Node::load(table.root_page()).unwrap();
        assert_eq!(node.is_root(), Ok(true));
        assert_eq!(node.num_cells(), 0);
    }

    #[test]
    fn recovers_the_row_count_from_the_leaf_header() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("test.db");

        let mut table = Table::new(path.clone());
        let mut node = Node::load(table.root_page()).unwrap();
        for key in [1u32, 2] {
            let cell = LeafCell::new(key, Row::new(key as i64, "user", "u@e"));
            node.insert_cell(key - 1, &cell).unwrap();
        }
        table.close();

        let table = Table::new(path);
        assert_eq!(table.num_rows(), 2);
    }

    #[test]
    fn rows_survive_a_close_and_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("test.db");

        let mut table = Table::new(path.clone());
        {
            let mut cursor = Cursor::table_end(&mut table);
            cursor.insert(7, Row::new(7, "dave", "d@w")).unwrap();
        }
        table.increment_num_rows();
        table.close();

        let mut table = Table::new(path);
        assert_eq!(table.num_rows(), 1);

        let mut cursor = Cursor::table_begin(&mut table);
        let rows = cursor.select();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].id(), 7);
        assert_eq!(rows[0].username(), "dave");
    }
}
