use std::{
    fs::{File, OpenOptions},
    io::{BufReader, Read, Seek, SeekFrom, Write},
    path::PathBuf,
    sync::Arc,
};

use log::{debug, warn};

use crate::storage::{
    fatal,
    layout::{PAGE_SIZE, TABLE_MAX_PAGES},
    page::PageBuilder,
};

use super::page::{CachedPage, Page, PageType};

/// Mediates between page indices and file offsets, owning the page cache.
///
/// The cache is a direct-mapped slot array keyed by page index; there is no
/// eviction, so a buffer lives from its first request until `close`.
pub struct Pager {
    num_pages: u64,
    root_page: u64,
    cache: Vec<Option<CachedPage>>,
    out: File,
}

impl Pager {
    pub fn new(path: PathBuf) -> Self {
        let out = match OpenOptions::new()
            .create(true)
            .read(true)
            .write(true)
            .open(&path)
        {
            Ok(file) => file,
            Err(e) => fatal(format!("Unable to open file: {}: {e}", path.display())),
        };
        let file_len = match out.metadata() {
            Ok(metadata) => metadata.len(),
            Err(e) => fatal(format!("failed to retrieve pager on-disk metadata: {e}")),
        };

        let mut num_pages = file_len / PAGE_SIZE as u64;
        if file_len % PAGE_SIZE as u64 != 0 {
            // an interrupted write can leave a short tail; treat it as a
            // whole page and let reads stop at the bytes that exist
            warn!("file length {file_len} is not a whole number of pages; loading the partial tail as a full page");
            num_pages += 1;
        }

        let mut obj = Self {
            num_pages,
            root_page: 0,
            cache: (0..TABLE_MAX_PAGES).map(|_| None).collect(),
            out,
        };

        if obj.num_pages == 0 {
            obj.new_page(PageType::Leaf, true);
        }

        obj
    }

    fn read_page(&self, offset: u64) -> [u8; PAGE_SIZE] {
        let mut buf: [u8; PAGE_SIZE] = [0; PAGE_SIZE];
        let mut reader = BufReader::new(&self.out);

        if let Err(e) = reader.seek(SeekFrom::Start(offset)) {
            fatal(format!("Error seeking the file: {e}"));
        }

        // a short read is fine: the tail page may be truncated on disk and
        // the missing bytes stay zero
        let mut filled = 0;
        while filled < PAGE_SIZE {
            match reader.read(&mut buf[filled..]) {
                Ok(0) => break,
                Ok(n) => filled += n,
                Err(e) => fatal(format!("Error reading file: {e}")),
            }
        }

        buf
    }

    fn cache_page(&mut self, index: u64, page: Page) -> CachedPage {
        let cached_page = CachedPage::new(page);
        let copy = CachedPage(Arc::clone(&cached_page.0));
        self.cache[index as usize] = Some(cached_page);
        copy
    }

    pub fn root_page(&self) -> u64 {
        self.root_page
    }

    pub fn num_pages(&self) -> u64 {
        self.num_pages
    }

    pub fn new_page(&mut self, kind: PageType, is_root: bool) -> CachedPage {
        let builder = PageBuilder::default().kind(&kind).is_root(is_root);

        let num = self.num_pages;
        self.num_pages += 1;
        self.cache_page(num, builder.build())
    }

    /// Returns the cached page at `num`, loading it from disk on a miss.
    ///
    /// Requesting an index past the end of the file extends the page count;
    /// requesting one past the cache capacity is fatal.
    pub fn get_page(&mut self, num: u64) -> CachedPage {
        if num >= TABLE_MAX_PAGES as u64 {
            fatal(format!("Page index out of bounds: {num}"));
        }

        if let Some(cached_page) = &self.cache[num as usize] {
            return CachedPage(Arc::clone(&cached_page.0));
        }

        let page = if num < self.num_pages {
            Page(self.read_page(num * PAGE_SIZE as u64))
        } else {
            self.num_pages = num + 1;
            debug!("page added: idx {num}, num_pages {}", self.num_pages);
            Page([0; PAGE_SIZE])
        };

        self.cache_page(num, page)
    }

    /// Writes the cached page at `num` back to its file offset.
    pub fn flush_page(&mut self, num: u64) {
        if num >= self.num_pages {
            fatal(format!("Page index is out of bounds: {num}"));
        }

        let Some(page) = &self.cache[num as usize] else {
            fatal("Null page cannot be flushed".to_string());
        };
        let bytes = page
            .0
            .read()
            .expect("failed to retrieve read handle on page")
            .0;

        if let Err(e) = self.out.seek(SeekFrom::Start(num * PAGE_SIZE as u64)) {
            fatal(format!("Error seeking the file: {e}"));
        }
        if let Err(e) = self.out.write_all(&bytes) {
            fatal(format!("Failed to save the data to disk: {e}"));
        }
    }

    /// Flushes every cached page in index order, then releases the file.
    pub fn close(mut self) {
        for num in 0..self.num_pages {
            if self.cache[num as usize].is_some() {
                self.flush_page(num);
                self.cache[num as usize] = None;
            }
        }

        if let Err(e) = self.out.sync_all() {
            fatal(format!("Error closing file descriptor: {e}"));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::layout::NODE_TYPE_OFFSET;
    use std::path::Path;

    fn pager_for(path: &Path) -> Pager {
        Pager::new(path.to_path_buf())
    }

    #[test]
    fn initializes_a_root_leaf_on_an_empty_file() {
        let dir = tempfile::tempdir().unwrap();
        let pager = pager_for(&dir.path().join("test.db"));

        assert_eq!(pager.num_pages(), 1);
        assert_eq!(pager.root_page(), 0);

        let page = pager.cache[0].as_ref().unwrap();
        let handle = page.0.read().unwrap();
        assert_eq!(handle[NODE_TYPE_OFFSET], 0x1);
    }

    #[test]
    fn extends_the_page_count_on_a_fresh_index() {
        let dir = tempfile::tempdir().unwrap();
        let mut pager = pager_for(&dir.path().join("test.db"));

        let page = pager.get_page(3);

        assert_eq!(pager.num_pages(), 4);
        let handle = page.0.read().unwrap();
        assert!(handle.0.iter().all(|b| *b == 0));
    }

    #[test]
    fn flushed_pages_survive_a_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("test.db");

        let mut pager = pager_for(&path);
        {
            let page = pager.get_page(0);
            let mut handle = page.0.write().unwrap();
            handle[100..104].clone_from_slice(b"data");
        }
        pager.close();

        let mut pager = pager_for(&path);
        let page = pager.get_page(0);
        let handle = page.0.read().unwrap();
        assert_eq!(&handle[100..104], b"data");
    }

    #[test]
    fn close_pads_the_file_to_whole_pages() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("test.db");

        let pager = pager_for(&path);
        pager.close();

        assert_eq!(std::fs::metadata(&path).unwrap().len(), PAGE_SIZE as u64);
    }

    #[test]
    fn loads_a_partial_tail_as_a_full_page() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("test.db");
        std::fs::write(&path, [0x5u8; 100]).unwrap();

        let mut pager = pager_for(&path);

        assert_eq!(pager.num_pages(), 1);
        let page = pager.get_page(0);
        let handle = page.0.read().unwrap();
        assert!(handle[..100].iter().all(|b| *b == 0x5));
        assert!(handle[100..].iter().all(|b| *b == 0));
    }

    #[test]
    #[should_panic(expected = "Page index out of bounds")]
    fn rejects_an_out_of_range_page_index() {
        let dir = tempfile::tempdir().unwrap();
        let mut pager = pager_for(&dir.path().join("test.db"));

        pager.get_page(TABLE_MAX_PAGES as u64);
    }

    #[test]
    #[should_panic(expected = "Null page cannot be flushed")]
    fn rejects_flushing_an_empty_slot() {
        let dir = tempfile::tempdir().unwrap();
        let mut pager = pager_for(&dir.path().join("test.db"));

        pager.get_page(2);
        pager.flush_page(1);
    }
}
