//! Offset pagination
//!
//! Maps the upstream offset/limit convention onto uniform pages.
//! Common patterns:
//! - `?offset=20&limit=20` with a `next` link in the response envelope
//! - `?offset=20&limit=20` with a bare item array (end = short page)

use super::types::{Cursor, Page, PaginationState, RawPage};
use crate::config::MAX_PAGE_SIZE;

/// Offset-based pagination
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OffsetPaginator {
    /// Query parameter name for offset
    pub offset_param: String,
    /// Query parameter name for limit
    pub limit_param: String,
    /// Number of items per page
    pub limit_value: u32,
}

impl Default for OffsetPaginator {
    fn default() -> Self {
        Self::new(20)
    }
}

impl OffsetPaginator {
    /// Create a paginator using `offset`/`limit` parameters
    ///
    /// The limit is clamped to `1..=MAX_PAGE_SIZE`.
    pub fn new(limit_value: u32) -> Self {
        Self {
            offset_param: "offset".to_string(),
            limit_param: "limit".to_string(),
            limit_value: limit_value.clamp(1, MAX_PAGE_SIZE),
        }
    }

    /// Query parameters for the page starting at `cursor` (first page if absent)
    pub fn params(&self, cursor: Option<Cursor>) -> Vec<(String, String)> {
        let offset = cursor.map_or(0, Cursor::offset);
        vec![
            (self.offset_param.clone(), offset.to_string()),
            (self.limit_param.clone(), self.limit_value.to_string()),
        ]
    }

    /// Fold a raw page into the state and produce the uniform page
    ///
    /// The page ends the session when the source consumed no positions,
    /// when it says there is nothing further, or (without an explicit
    /// indicator) when it is shorter than the requested limit. Items dropped
    /// by the source still count as consumed, so a fully filtered page does
    /// not end the session.
    pub fn process<T>(&self, raw: RawPage<T>, state: &mut PaginationState) -> Page<T> {
        let count = raw.items.len();
        state.add_fetched(count as u64);

        let more = match raw.has_more {
            _ if raw.consumed == 0 => false,
            Some(has_more) => has_more,
            None => raw.consumed >= self.limit_value as usize,
        };

        if more {
            state.add_offset(raw.consumed as u32);
        } else {
            state.mark_done();
        }

        Page::new(raw.items, state.next_cursor())
    }
}
