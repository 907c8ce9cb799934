// Copyright 2026 the Deeplist Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Deeplist Paging: demand-driven paged storage for list rows.
//!
//! Virtualized lists routinely outlive their loaded data: the window can
//! land on rows whose content has not arrived yet. [`PageCollection`]
//! stores rows in fixed-size pages, tracks which pages have been asked
//! for, and implements [`RowSource`] so the windowing engine skips
//! measuring rows that are still in flight.
//!
//! The collection never performs I/O. Hosts call
//! [`request_range`](PageCollection::request_range) for the rows a window
//! is about to need, drain the newly requested page indices with
//! [`take_requested`](PageCollection::take_requested), fetch them however
//! they like, and hand the results back through
//! [`fulfill`](PageCollection::fulfill).
//!
//! ```rust
//! use core::num::NonZeroUsize;
//! use deeplist_paging::PageCollection;
//!
//! let mut pages: PageCollection<&str> =
//!     PageCollection::new(NonZeroUsize::new(10).unwrap());
//! pages.request_range(5, 12);
//! assert_eq!(pages.take_requested(), vec![0, 1]);
//!
//! pages.fulfill(0, (0..10).map(|_| "row").collect());
//! assert!(pages.is_loaded(5));
//! assert!(!pages.is_loaded(11));
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

use alloc::vec::Vec;
use core::num::NonZeroUsize;

use deeplist_window::RowSource;
use hashbrown::HashMap;

/// Lifecycle of one page.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PageState {
    /// Known to exist, never asked for.
    #[default]
    Initialized,
    /// Asked for, response not yet arrived.
    Requested,
    /// Items present.
    Loaded,
}

/// One fixed-size page of rows.
#[derive(Clone, Debug)]
pub struct Page<T> {
    /// Current lifecycle state.
    pub state: PageState,
    /// The page's rows; empty until the page is loaded.
    pub items: Vec<T>,
}

impl<T> Page<T> {
    fn new() -> Self {
        Self {
            state: PageState::Initialized,
            items: Vec::new(),
        }
    }
}

/// Sparse paged storage for list rows.
///
/// Pages materialize lazily as ranges are requested, so the collection
/// stays small no matter how large the list index space is.
#[derive(Clone, Debug)]
pub struct PageCollection<T> {
    pages: HashMap<usize, Page<T>>,
    page_size: NonZeroUsize,
    newly_requested: Vec<usize>,
}

impl<T> PageCollection<T> {
    /// Creates an empty collection with the given rows per page.
    pub fn new(page_size: NonZeroUsize) -> Self {
        Self {
            pages: HashMap::new(),
            page_size,
            newly_requested: Vec::new(),
        }
    }

    /// Rows per page.
    pub fn page_size(&self) -> NonZeroUsize {
        self.page_size
    }

    /// The page a row index falls on.
    pub fn page_of(&self, index: usize) -> usize {
        index / self.page_size
    }

    /// The state of the page holding `index`.
    pub fn state_of(&self, index: usize) -> PageState {
        self.pages
            .get(&self.page_of(index))
            .map(|page| page.state)
            .unwrap_or_default()
    }

    /// The row at `index`, if its page has loaded that far.
    pub fn get(&self, index: usize) -> Option<&T> {
        let page = self.pages.get(&self.page_of(index))?;
        if page.state != PageState::Loaded {
            return None;
        }
        page.items.get(index % self.page_size)
    }

    /// Marks every page covering rows `start..end` as wanted.
    ///
    /// Pages already requested or loaded are left alone. Newly requested
    /// page indices accumulate until [`take_requested`](Self::take_requested)
    /// drains them.
    pub fn request_range(&mut self, start: usize, end: usize) {
        if end <= start {
            return;
        }
        let first_page = start / self.page_size;
        let last_page = (end - 1) / self.page_size;
        for page_index in first_page..=last_page {
            let page = self.pages.entry(page_index).or_insert_with(Page::new);
            if page.state == PageState::Initialized {
                page.state = PageState::Requested;
                self.newly_requested.push(page_index);
            }
        }
    }

    /// Drains the page indices that became requested since the last drain.
    pub fn take_requested(&mut self) -> Vec<usize> {
        core::mem::take(&mut self.newly_requested)
    }

    /// Stores the fetched rows of a page and marks it loaded.
    ///
    /// The final page of a list may hold fewer rows than the page size;
    /// any other short page means rows will answer as missing.
    pub fn fulfill(&mut self, page_index: usize, items: Vec<T>) {
        debug_assert!(
            items.len() <= self.page_size.get(),
            "page {page_index} holds more rows than the page size"
        );
        let page = self.pages.entry(page_index).or_insert_with(Page::new);
        page.items = items;
        page.state = PageState::Loaded;
    }

    /// Whether the row at `index` is present.
    pub fn is_loaded(&self, index: usize) -> bool {
        self.get(index).is_some()
    }

    /// Number of pages in any state.
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Drops every page and pending request.
    pub fn clear(&mut self) {
        self.pages.clear();
        self.newly_requested.clear();
    }
}

impl<T> RowSource for PageCollection<T> {
    fn is_loaded(&self, index: usize) -> bool {
        self.get(index).is_some()
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use super::*;

    fn page_size(size: usize) -> NonZeroUsize {
        NonZeroUsize::new(size).unwrap()
    }

    #[test]
    fn requesting_a_range_touches_every_covering_page() {
        let mut pages: PageCollection<u32> = PageCollection::new(page_size(10));
        pages.request_range(5, 25);
        assert_eq!(pages.take_requested(), vec![0, 1, 2]);
        assert_eq!(pages.state_of(5), PageState::Requested);
        assert_eq!(pages.state_of(24), PageState::Requested);
        assert_eq!(pages.state_of(30), PageState::Initialized);
    }

    #[test]
    fn requests_are_not_repeated() {
        let mut pages: PageCollection<u32> = PageCollection::new(page_size(10));
        pages.request_range(0, 10);
        assert_eq!(pages.take_requested(), vec![0]);
        pages.request_range(0, 20);
        assert_eq!(pages.take_requested(), vec![1]);
        pages.request_range(0, 20);
        assert!(pages.take_requested().is_empty());
    }

    #[test]
    fn fulfilled_pages_answer_rows() {
        let mut pages: PageCollection<u32> = PageCollection::new(page_size(10));
        pages.request_range(10, 20);
        pages.fulfill(1, (10..20).collect());
        assert_eq!(pages.state_of(15), PageState::Loaded);
        assert_eq!(pages.get(15), Some(&15));
        assert!(pages.is_loaded(19));
        assert!(!pages.is_loaded(20));
        assert_eq!(pages.get(5), None);
    }

    #[test]
    fn short_final_pages_only_answer_their_rows() {
        let mut pages: PageCollection<u32> = PageCollection::new(page_size(10));
        // A 23-row list: page 2 holds rows 20..=22.
        pages.fulfill(2, vec![20, 21, 22]);
        assert!(pages.is_loaded(22));
        assert!(!pages.is_loaded(23));
    }

    #[test]
    fn empty_ranges_request_nothing() {
        let mut pages: PageCollection<u32> = PageCollection::new(page_size(10));
        pages.request_range(7, 7);
        assert!(pages.take_requested().is_empty());
        assert_eq!(pages.page_count(), 0);
    }

    #[test]
    fn clear_forgets_pages_and_pending_requests() {
        let mut pages: PageCollection<u32> = PageCollection::new(page_size(10));
        pages.request_range(0, 30);
        pages.fulfill(0, (0..10).collect());
        pages.clear();
        assert_eq!(pages.page_count(), 0);
        assert!(pages.take_requested().is_empty());
        assert!(!pages.is_loaded(0));
    }
}
