use std::error::Error;

use log::{debug, log_enabled, Level};

use crate::storage::{btree::Node, layout::*, Table};

/// Commands that are not part of the database DSL.
///
/// These commands mostly control what the REPL session does
#[derive(Debug, Clone)]
pub enum MetaCommand {
    /// Close the current REPL session
    Exit,
    /// Prints out the keys stored in the root leaf
    Btree,
    /// Prints out layout information
    Layout,
}

impl MetaCommand {
    pub fn execute(&self, table: &mut Table) -> Result<(), Box<dyn Error>> {
        match self {
            // handled by the REPL loop so the table can be closed
            Self::Exit => Ok(()),
            Self::Btree => {
                let node = Node::load(table.root_page())?;
                let num_cells = node.num_cells();

                println!("Tree:");
                println!("leaf (size {num_cells})");
                for i in 0..num_cells {
                    println!("  - {} : {}", i, node.key(i));
                    if log_enabled!(Level::Debug) {
                        debug!("row {i}: {}", node.row(i));
                    }
                }

                Ok(())
            }
            Self::Layout => {
                println!("=== Common info ===");
                println!("Page size: {}", PAGE_SIZE);
                println!("Common header size: {}", COMMON_NODE_HEADER_SIZE);
                println!("Parent pointer size: {}", PARENT_POINTER_SIZE);
                println!();

                println!("=== Leaf page info ===");
                println!("Header size: {}", LEAF_HEADER_SIZE);
                println!("Space for cells: {}", LEAF_SPACE_FOR_CELLS);
                println!("Cell size: {}", LEAF_CELL_SIZE);
                println!("Max cells: {}", LEAF_MAX_CELLS);
                println!();

                println!("=== Row info ===");
                println!("Row size: {}", ROW_SIZE);
                println!("Username size: {}", USERNAME_SIZE);
                println!("Email size: {}", EMAIL_SIZE);

                Ok(())
            }
        }
    }
}

impl TryInto<MetaCommand> for &str {
    type Error = String;

    fn try_into(self) -> Result<MetaCommand, Self::Error> {
        match self {
            ".exit" => Ok(MetaCommand::Exit),
            ".btree" => Ok(MetaCommand::Btree),
            ".layout" => Ok(MetaCommand::Layout),
            _ => Err(format!("unknown command `{self}`.")),
        }
    }
}
