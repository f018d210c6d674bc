pub mod commands;

pub use commands::MetaCommand;
use std::{io::Write, path::PathBuf};

use log::debug;

use crate::storage::{
    btree::Node,
    fatal,
    layout::LEAF_MAX_CELLS,
    row::Row,
    statement::{ExecuteResult, PrepareError, Statement},
    Cursor, Table,
};

/// Starts a database REPL session
///
/// The loop reads one command per line. Reaching end of input closes the
/// table the same way `.exit` does, so every cached page is flushed.
pub fn start_repl(name: String, path: PathBuf) {
    let mut table = Table::new(path);

    loop {
        print!("{name} > ");

        let mut input: String = String::new();
        std::io::stdout()
            .flush()
            .expect("failed to print to screen");

        match std::io::stdin().read_line(&mut input) {
            Ok(0) => {
                println!("EOF reached, input stream closed prematurely, exiting...");
                break;
            }
            Ok(_) => {}
            Err(_) => {
                eprintln!("Error reading input, exiting.");
                std::process::exit(1);
            }
        }
        let input = input.trim();

        if input.is_empty() {
            println!("Empty input, please try again.");
            continue;
        }

        debug!("input: {input}, size: {}", input.len());

        // meta commands start with a '.' character
        if input.starts_with('.') {
            let result: Result<MetaCommand, _> = input.try_into();
            match result {
                Ok(MetaCommand::Exit) => {
                    println!("Encountered exit, exiting...");
                    break;
                }
                Ok(command) => command
                    .execute(&mut table)
                    .expect("failed to execute command"),
                Err(_) => println!("Unrecognized command: {input}"),
            }
            continue;
        }

        let statement = match Statement::try_from(input) {
            Ok(statement) => statement,
            Err(e) => {
                match e {
                    PrepareError::InvalidSyntax => println!("Invalid Syntax: {input}"),
                    PrepareError::TokenTooLong => println!("Token too long: {input}"),
                    PrepareError::NullToken => println!("Null token found: {input}"),
                    PrepareError::NegativeToken => println!("Negative token found: {input}"),
                    PrepareError::Unrecognized => println!("Unrecognized statement: {input}"),
                }
                continue;
            }
        };

        match execute_statement(statement, &mut table) {
            ExecuteResult::Success => {}
            ExecuteResult::TableFull => println!("[ERROR] Table is full, cannot insert the row"),
        }
    }

    table.close();
}

fn execute_statement(statement: Statement, table: &mut Table) -> ExecuteResult {
    match statement {
        Statement::Insert(row) => execute_insert(row, table),
        Statement::Select => execute_select_all(table),
        Statement::Delete => ExecuteResult::Success,
    }
}

/// Appends a row at the end of the root leaf.
fn execute_insert(row: Row, table: &mut Table) -> ExecuteResult {
    let root = Node::load(table.root_page()).expect("failed to load root node");
    if root.num_cells() as usize >= LEAF_MAX_CELLS {
        return ExecuteResult::TableFull;
    }

    let key = row.id() as u32;
    let mut cursor = Cursor::table_end(table);
    if let Err(e) = cursor.insert(key, row) {
        fatal(e);
    }
    table.increment_num_rows();

    println!("Row inserted successfully.");
    ExecuteResult::Success
}

/// Emits every stored row in insertion order, then a count line.
fn execute_select_all(table: &mut Table) -> ExecuteResult {
    let mut cursor = Cursor::table_begin(table);
    for row in cursor.select() {
        println!("[SELECT] ({row})");
    }

    println!("Returned {} rows.", table.num_rows());
    ExecuteResult::Success
}
