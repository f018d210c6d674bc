use log::debug;

use super::{btree::Node, cell::LeafCell, row::Row, table::Table};

/// A position `(page index, cell index)` over the stored cells, with a
/// terminal flag.
///
/// A cursor lives only within a single logical operation; it borrows its
/// table for that long, so no page can be mutated behind its back.
pub struct Cursor<'a> {
    table: &'a mut Table,
    page_num: u64,
    cell_num: u32,
    end_of_table: bool,
}

impl<'a> Cursor<'a> {
    /// Positions a cursor on the first cell of the table.
    pub fn table_begin(table: &'a mut Table) -> Self {
        let node = Node::load(table.root_page()).expect("failed to load root node");
        let end_of_table = node.num_cells() == 0;
        let page_num = table.root();

        Self {
            table,
            page_num,
            cell_num: 0,
            end_of_table,
        }
    }

    /// Positions a cursor one past the last cell of the table.
    pub fn table_end(table: &'a mut Table) -> Self {
        let node = Node::load(table.root_page()).expect("failed to load root node");
        let cell_num = node.num_cells();
        let page_num = table.root();

        Self {
            table,
            page_num,
            cell_num,
            end_of_table: true,
        }
    }

    fn node(&mut self) -> Node {
        let page = self.table.get_page(self.page_num);
        Node::load(page).expect("failed to load node at cursor")
    }

    pub fn end_of_table(&self) -> bool {
        self.end_of_table
    }

    pub fn advance(&mut self) {
        self.cell_num += 1;
        if self.node().num_cells() <= self.cell_num {
            self.end_of_table = true;
        }
    }

    /// Reads the row stored at the cursor position.
    pub fn row(&mut self) -> Row {
        let cell_num = self.cell_num;
        debug!("reading cell {cell_num} on page {}", self.page_num);
        self.node().row(cell_num)
    }

    /// Writes a new cell at the cursor position, shifting later cells right.
    pub fn insert(&mut self, key: u32, row: Row) -> Result<(), String> {
        let cell = LeafCell::new(key, row);
        let cell_num = self.cell_num;
        self.node().insert_cell(cell_num, &cell)
    }

    /// Drains the table from the cursor position into a row list.
    pub fn select(&mut self) -> Vec<Row> {
        let mut data = Vec::new();

        while !self.end_of_table {
            data.push(self.row());
            self.advance();
        }

        data
    }
}
