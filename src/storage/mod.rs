pub mod btree;
pub mod cell;
pub mod cursor;
pub(crate) mod layout;
pub(crate) mod page;
pub mod pager;
pub mod row;
pub mod statement;
pub mod table;

pub use cursor::Cursor;
pub use table::Table;

/// Single abort point for unrecoverable storage failures.
///
/// File I/O errors, out-of-range page indices and a saturated leaf all end
/// up here: the diagnostic is logged and the process dies with a non-zero
/// status. Tests intercept the panic instead of the exit.
pub(crate) fn fatal(msg: String) -> ! {
    log::error!("{msg}");
    panic!("{msg}");
}
