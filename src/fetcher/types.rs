//! Fetcher types
//!
//! Outcomes, view events and session snapshots for the paged fetcher.

use crate::pagination::{Cursor, Page, PaginationState};
use crate::query::QueryDescriptor;
use crate::source::Item;
use serde::Serialize;

/// Result of a page request that did not fail
#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome {
    /// The page was applied to the session (empty past exhaustion)
    Page(Page<Item>),
    /// A request for this session was already in flight; nothing was sent
    Coalesced,
    /// The descriptor changed while the request was in flight; the
    /// response was discarded
    Superseded,
}

impl FetchOutcome {
    /// The page, if one was applied
    pub fn page(&self) -> Option<&Page<Item>> {
        match self {
            Self::Page(page) => Some(page),
            _ => None,
        }
    }

    /// Consume into the page, if one was applied
    pub fn into_page(self) -> Option<Page<Item>> {
        match self {
            Self::Page(page) => Some(page),
            _ => None,
        }
    }
}

/// Notifications from the view layer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchEvent {
    /// The user submitted a new search or discovery request
    Submit(QueryDescriptor),
    /// The user scrolled near the end of the rendered list
    NearBottom,
}

/// What the view should show for the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LoadingState {
    /// Waiting for the user or for the next near-bottom signal
    #[default]
    Idle,
    /// A page request is in flight
    Loading,
    /// The source has no further pages
    Finished,
}

/// Point-in-time copy of a fetch session
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionSnapshot {
    /// Session generation (changes whenever the session is replaced)
    pub generation: u64,
    /// Descriptor the session belongs to
    pub descriptor: Option<QueryDescriptor>,
    /// Accumulated items in page order
    pub items: Vec<Item>,
    /// Cursor the next near-bottom signal will use
    pub next_cursor: Option<Cursor>,
    /// Pages applied so far
    pub pages: u32,
    /// Loading state for the view
    pub loading: LoadingState,
}

/// Mutable state of the current fetch session
#[derive(Debug, Default)]
pub(crate) struct SessionState {
    pub generation: u64,
    pub descriptor: Option<QueryDescriptor>,
    pub items: Vec<Item>,
    pub pagination: PaginationState,
    pub in_flight: bool,
}

impl SessionState {
    /// Replace the session wholesale
    pub fn reset(&mut self, descriptor: QueryDescriptor) {
        self.generation += 1;
        self.descriptor = Some(descriptor);
        self.items.clear();
        self.pagination = PaginationState::new();
        self.in_flight = false;
    }

    /// Whether the session is for this descriptor
    pub fn is_for(&self, descriptor: &QueryDescriptor) -> bool {
        self.descriptor.as_ref() == Some(descriptor)
    }

    /// Cursor the caller has to present for the next page
    ///
    /// Absent before the first page has been applied.
    pub fn expected_cursor(&self) -> Option<Cursor> {
        if self.pagination.pages == 0 {
            None
        } else {
            self.pagination.next_cursor()
        }
    }

    pub fn loading_state(&self) -> LoadingState {
        if self.in_flight {
            LoadingState::Loading
        } else if self.pagination.done {
            LoadingState::Finished
        } else {
            LoadingState::Idle
        }
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            generation: self.generation,
            descriptor: self.descriptor.clone(),
            items: self.items.clone(),
            next_cursor: self.expected_cursor(),
            pages: self.pagination.pages,
            loading: self.loading_state(),
        }
    }
}
