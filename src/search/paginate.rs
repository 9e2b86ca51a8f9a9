//! Page window slicing.

use super::SearchError;
use crate::utils::validate_page_window;

/// A validated, 1-based page window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    current_page: usize,
    page_size: usize,
}

impl PageWindow {
    /// Validate a requested window. Page and size must both be at least 1.
    pub fn new(current_page: i64, page_size: i64) -> Result<Self, SearchError> {
        let (current_page, page_size) = validate_page_window(current_page, page_size)?;
        Ok(Self {
            current_page,
            page_size,
        })
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Index of the first item on the page, `None` if it does not fit in `usize`
    pub fn offset(&self) -> Option<usize> {
        (self.current_page - 1).checked_mul(self.page_size)
    }

    /// Borrow the items on this page; empty when the page lies past the end.
    pub fn slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        match self.offset() {
            Some(start) if start < items.len() => {
                let end = start.saturating_add(self.page_size).min(items.len());
                &items[start..end]
            }
            _ => &[],
        }
    }

    /// Keep only the items on this page.
    pub fn apply<T>(&self, items: Vec<T>) -> Vec<T> {
        match self.offset() {
            Some(start) => items.into_iter().skip(start).take(self.page_size).collect(),
            None => Vec::new(),
        }
    }
}

/// Return the items of page `current_page` when pages hold `page_size` items.
pub fn paginate<T: Clone>(
    items: &[T],
    current_page: i64,
    page_size: i64,
) -> Result<Vec<T>, SearchError> {
    let window = PageWindow::new(current_page, page_size)?;
    Ok(window.slice(items).to_vec())
}
