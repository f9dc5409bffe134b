//! Pagination types
//!
//! Defines the uniform page shape every source is mapped into, the opaque
//! cursor, and the per-session pagination state.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Opaque token marking where the next page begins
///
/// Backed by an offset because the upstream paginates by offset, but
/// callers must only pass back cursors they received from a page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct Cursor(u32);

impl Cursor {
    pub(crate) fn from_offset(offset: u32) -> Self {
        Self(offset)
    }

    /// Offset this cursor points at
    pub fn offset(self) -> u32 {
        self.0
    }
}

impl fmt::Display for Cursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Cursor {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        s.trim()
            .parse::<u32>()
            .map(Self)
            .map_err(|_| Error::invalid_cursor(s, "not a page cursor"))
    }
}

impl From<Cursor> for String {
    fn from(cursor: Cursor) -> Self {
        cursor.to_string()
    }
}

impl TryFrom<String> for Cursor {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

/// One page of normalized items
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    /// Items in source order
    pub items: Vec<T>,
    /// Where the next page starts; absent once the source is exhausted
    pub next_cursor: Option<Cursor>,
}

impl<T> Page<T> {
    /// Create a page
    pub fn new(items: Vec<T>, next_cursor: Option<Cursor>) -> Self {
        Self { items, next_cursor }
    }

    /// The empty page returned past exhaustion
    pub fn end() -> Self {
        Self {
            items: Vec::new(),
            next_cursor: None,
        }
    }

    /// Check if this is the last page
    pub fn is_last(&self) -> bool {
        self.next_cursor.is_none()
    }

    /// Number of items on the page
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if the page has no items
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// A page as the source returned it, before cursor mapping
#[derive(Debug, Clone, PartialEq)]
pub struct RawPage<T> {
    /// Items in source order
    pub items: Vec<T>,
    /// Explicit further-page indicator, when the source has one
    pub has_more: Option<bool>,
    /// Source positions this page covered (can exceed `items.len()` when
    /// the source filtered entries out)
    pub consumed: usize,
}

impl<T> RawPage<T> {
    /// Page from a source with a paging envelope
    pub fn with_next(items: Vec<T>, has_more: bool) -> Self {
        let consumed = items.len();
        Self {
            items,
            has_more: Some(has_more),
            consumed,
        }
    }

    /// Page from a source without a paging envelope
    pub fn bare(items: Vec<T>) -> Self {
        let consumed = items.len();
        Self {
            items,
            has_more: None,
            consumed,
        }
    }

    /// Override how many source positions the page covered
    #[must_use]
    pub fn consumed(mut self, consumed: usize) -> Self {
        self.consumed = consumed.max(self.items.len());
        self
    }
}

/// Tracks pagination progress for one session
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PaginationState {
    /// Offset of the next page
    pub offset: u32,
    /// Pages received so far
    pub pages: u32,
    /// Total items received so far
    pub total_fetched: u64,
    /// Is pagination complete?
    pub done: bool,
}

impl PaginationState {
    /// Create a new pagination state
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark pagination as complete
    pub fn mark_done(&mut self) {
        self.done = true;
    }

    /// Add offset
    pub fn add_offset(&mut self, amount: u32) {
        self.offset = self.offset.saturating_add(amount);
    }

    /// Record a received page
    pub fn add_fetched(&mut self, count: u64) {
        self.pages += 1;
        self.total_fetched += count;
    }

    /// Cursor for the next page, if any
    pub fn next_cursor(&self) -> Option<Cursor> {
        if self.done {
            None
        } else {
            Some(Cursor::from_offset(self.offset))
        }
    }
}

/// Where the consumer is in the rendered list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScrollPosition {
    /// Distance scrolled from the top
    pub offset: u32,
    /// Height of the visible area
    pub viewport: u32,
    /// Height of the whole rendered list
    pub content: u32,
}

impl ScrollPosition {
    /// Create a scroll position
    pub fn new(offset: u32, viewport: u32, content: u32) -> Self {
        Self {
            offset,
            viewport,
            content,
        }
    }

    /// Distance left to the bottom of the list
    pub fn remaining(&self) -> u32 {
        self.content
            .saturating_sub(self.offset.saturating_add(self.viewport))
    }

    /// Whether the consumer is within `threshold` of the bottom
    pub fn is_near_bottom(&self, threshold: u32) -> bool {
        self.remaining() <= threshold
    }
}
