use std::sync::{Arc, RwLock};

use crate::calculate_offsets;

use super::layout::{
    IS_ROOT_OFFSET, IS_ROOT_SIZE, NODE_TYPE_OFFSET, NODE_TYPE_SIZE, PAGE_SIZE,
};

/// On-disk structure for storing and organizing records
#[derive(Debug, Clone)]
pub struct Page(pub [u8; PAGE_SIZE]);

/// Cached in-memory page
#[derive(Debug, Clone)]
pub struct CachedPage(pub Arc<RwLock<Page>>);

impl CachedPage {
    pub fn new(page: Page) -> Self {
        Self(Arc::new(RwLock::new(page)))
    }
}

impl<Idx> std::ops::Index<Idx> for Page
where
    Idx: std::slice::SliceIndex<[u8]>,
{
    type Output = Idx::Output;

    fn index(&self, index: Idx) -> &Self::Output {
        &self.0[index]
    }
}

impl<Idx> std::ops::IndexMut<Idx> for Page
where
    Idx: std::slice::SliceIndex<[u8]>,
{
    fn index_mut(&mut self, index: Idx) -> &mut Self::Output {
        &mut self.0[index]
    }
}

/// Type of page.
///
/// A page can be one of two types:
///
/// - `Internal`: An internal node within the B+-Tree structure. It acts as an index for the B+-Tree
/// - `Leaf`: An external node within the B+-Tree structure. These pages store the actual data
///
/// An uninitialized (all-zero) page decodes as a non-root internal node;
/// only leaves are ever written in the current form.
#[derive(Debug, Clone, PartialEq)]
pub enum PageType {
    Internal,
    Leaf,
}

impl Into<u8> for &PageType {
    fn into(self) -> u8 {
        match self {
            PageType::Internal => 0x0,
            PageType::Leaf => 0x1,
        }
    }
}

impl TryFrom<u8> for PageType {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0x0 => Ok(PageType::Internal),
            0x1 => Ok(PageType::Leaf),
            v => Err(format!("unknown type: {:#x}", v)),
        }
    }
}

/// Builder struct for a page.
///
/// A fresh buffer is all zeroes, which already encodes `parent = 0` and
/// `num_cells = 0`; the builder stamps the type and root flag on top.
pub struct PageBuilder {
    inner: [u8; PAGE_SIZE],
}

impl PageBuilder {
    pub fn kind(mut self, _type: &PageType) -> Self {
        let (start, end) = calculate_offsets!(NODE_TYPE_OFFSET, NODE_TYPE_SIZE);

        self.inner[start..end].clone_from_slice(&[_type.into()]);
        self
    }

    pub fn is_root(mut self, is_root: bool) -> Self {
        let (start, end) = calculate_offsets!(IS_ROOT_OFFSET, IS_ROOT_SIZE);

        self.inner[start..end].clone_from_slice(&[bool_to_u8(is_root)]);
        self
    }

    pub fn build(self) -> Page {
        Page(self.inner)
    }
}

impl Default for PageBuilder {
    fn default() -> Self {
        PageBuilder {
            inner: [0x0; PAGE_SIZE],
        }
        .kind(&PageType::Leaf)
        .is_root(false)
    }
}

/// Converts a boolean value into a u8 value
pub fn bool_to_u8(v: bool) -> u8 {
    if v {
        0x1
    } else {
        0x0
    }
}

/// Converts a u8 value into a boolean value
pub fn u8_to_bool(v: u8) -> Result<bool, String> {
    match v {
        0x0 => Ok(false),
        0x1 => Ok(true),
        _ => Err("value is not a boolean".to_string()),
    }
}
