//! On-disk layout constants.
//!
//! The backing file is a raw sequence of fixed-size pages; page 0 is the
//! root leaf. Every multi-byte header field and the cell key are stored as
//! little-endian unsigned integers, and the row id is an explicit 8-byte
//! little-endian signed integer, so a database file is readable on any
//! platform.

pub const PAGE_SIZE: usize = 4096;
pub const TABLE_MAX_PAGES: usize = 100;

/*
 * Common node header
 */
pub const NODE_TYPE_SIZE: usize = 1;
pub const NODE_TYPE_OFFSET: usize = 0;
pub const IS_ROOT_SIZE: usize = 1;
pub const IS_ROOT_OFFSET: usize = NODE_TYPE_OFFSET + NODE_TYPE_SIZE;
pub const PARENT_POINTER_SIZE: usize = 4;
pub const PARENT_POINTER_OFFSET: usize = IS_ROOT_OFFSET + IS_ROOT_SIZE;
pub const COMMON_NODE_HEADER_SIZE: usize = NODE_TYPE_SIZE + IS_ROOT_SIZE + PARENT_POINTER_SIZE;

/*
 * Leaf node header
 */
pub const LEAF_NUM_CELLS_SIZE: usize = 4;
pub const LEAF_NUM_CELLS_OFFSET: usize = COMMON_NODE_HEADER_SIZE;
pub const LEAF_HEADER_SIZE: usize = COMMON_NODE_HEADER_SIZE + LEAF_NUM_CELLS_SIZE;

/*
 * Row layout
 */
pub const USERNAME_LENGTH: usize = 32;
pub const EMAIL_LENGTH: usize = 255;
pub const ID_SIZE: usize = 8;
pub const ID_OFFSET: usize = 0;
// string fields carry a trailing terminator byte
pub const USERNAME_SIZE: usize = USERNAME_LENGTH + 1;
pub const USERNAME_OFFSET: usize = ID_OFFSET + ID_SIZE;
pub const EMAIL_SIZE: usize = EMAIL_LENGTH + 1;
pub const EMAIL_OFFSET: usize = USERNAME_OFFSET + USERNAME_SIZE;
pub const ROW_SIZE: usize = ID_SIZE + USERNAME_SIZE + EMAIL_SIZE;

/*
 * Leaf node body
 */
pub const LEAF_KEY_SIZE: usize = 4;
pub const LEAF_KEY_OFFSET: usize = 0;
pub const LEAF_VALUE_SIZE: usize = ROW_SIZE;
pub const LEAF_VALUE_OFFSET: usize = LEAF_KEY_OFFSET + LEAF_KEY_SIZE;
pub const LEAF_CELL_SIZE: usize = LEAF_KEY_SIZE + LEAF_VALUE_SIZE;
pub const LEAF_SPACE_FOR_CELLS: usize = PAGE_SIZE - LEAF_HEADER_SIZE;
pub const LEAF_MAX_CELLS: usize = LEAF_SPACE_FOR_CELLS / LEAF_CELL_SIZE;
