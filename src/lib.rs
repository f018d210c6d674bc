mod repl;
mod storage;

pub use repl::*;

/// Turns an `(OFFSET, SIZE)` constant pair from the on-disk layout into a
/// `(start, end)` byte range, so accessors can slice a page or row slot as
/// `buf[start..end]` (e.g. `LEAF_KEY_OFFSET`/`LEAF_KEY_SIZE` for a cell key,
/// `ID_OFFSET`/`ID_SIZE` for a row id).
macro_rules! calculate_offsets {
    ($start:ident, $size:ident) => {{
        let start = $start;
        let end = start + $size;
        (start, end)
    }};
}

pub(crate) use calculate_offsets;
