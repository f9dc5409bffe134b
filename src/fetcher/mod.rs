//! Paged fetcher
//!
//! Owns one fetch session at a time: the descriptor being browsed, the
//! items accumulated so far (in page order, never reordered) and the cursor
//! for the next page.
//!
//! # Overview
//!
//! - `PagedFetcher::fetch_page` is the core contract: one descriptor, one
//!   cursor, at most one request.
//! - `submit` / `load_more` / `handle` are the view-facing entry points.
//! - At most one request is outstanding per session. A second request while
//!   one is in flight is coalesced, and a response that arrives after the
//!   session was replaced is discarded.

mod types;

pub use types::{FetchEvent, FetchOutcome, LoadingState, SessionSnapshot};

use crate::config::FetchConfig;
use crate::error::{Error, Result};
use crate::pagination::{Cursor, OffsetPaginator, Page, ScrollPosition};
use crate::query::QueryDescriptor;
use crate::source::{Item, PageRequest, PageSource};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::{debug, info, warn};
use types::SessionState;

/// Which cursor a request should use
#[derive(Debug, Clone, Copy)]
enum Requested {
    /// Caller-supplied cursor (absent = first page)
    Cursor(Option<Cursor>),
    /// Whatever the session expects next
    Next,
}

/// Outcome of the locked bookkeeping before a request
enum Begin {
    Send {
        generation: u64,
        descriptor: QueryDescriptor,
        request: PageRequest,
    },
    Skip(FetchOutcome),
}

/// Paginated remote-collection fetcher
pub struct PagedFetcher {
    source: Arc<dyn PageSource>,
    paginator: OffsetPaginator,
    near_bottom_threshold: u32,
    state: Mutex<SessionState>,
}

impl PagedFetcher {
    /// Create a fetcher over a page source
    pub fn new(source: Arc<dyn PageSource>, config: &FetchConfig) -> Self {
        Self {
            source,
            paginator: OffsetPaginator::new(config.page_size),
            near_bottom_threshold: config.near_bottom_threshold,
            state: Mutex::new(SessionState::default()),
        }
    }

    /// Create a fetcher with a given page size and default settings otherwise
    pub fn with_page_size(source: Arc<dyn PageSource>, page_size: u32) -> Self {
        let config = FetchConfig {
            page_size,
            ..FetchConfig::default()
        };
        Self::new(source, &config)
    }

    /// Items requested per page
    pub fn page_size(&self) -> u32 {
        self.paginator.limit_value
    }

    // ========================================================================
    // Core contract
    // ========================================================================

    /// Fetch one page for `descriptor` starting at `cursor`
    ///
    /// A descriptor different from the current session's starts a new
    /// session. Past exhaustion this returns an empty page with no cursor
    /// and issues no request. Errors leave the session at its last good
    /// state; a `SourceUnavailable` can be retried with the same cursor.
    pub async fn fetch_page(
        &self,
        descriptor: &QueryDescriptor,
        cursor: Option<Cursor>,
    ) -> Result<FetchOutcome> {
        descriptor.validate()?;

        match self.begin(Some(descriptor), Requested::Cursor(cursor))? {
            Begin::Skip(outcome) => Ok(outcome),
            Begin::Send {
                generation,
                descriptor,
                request,
            } => self.send(generation, &descriptor, request).await,
        }
    }

    // ========================================================================
    // View-facing entry points
    // ========================================================================

    /// Start a new session for `descriptor`, discarding the current one
    ///
    /// Returns the new session generation. Nothing is fetched yet.
    pub fn submit(&self, descriptor: QueryDescriptor) -> Result<u64> {
        descriptor.validate()?;

        let mut state = self.lock();
        info!(%descriptor, "Starting fetch session");
        state.reset(descriptor);
        Ok(state.generation)
    }

    /// Fetch the next page of the current session
    pub async fn load_more(&self) -> Result<FetchOutcome> {
        match self.begin(None, Requested::Next)? {
            Begin::Skip(outcome) => Ok(outcome),
            Begin::Send {
                generation,
                descriptor,
                request,
            } => self.send(generation, &descriptor, request).await,
        }
    }

    /// Apply a view event
    pub async fn handle(&self, event: FetchEvent) -> Result<FetchOutcome> {
        match event {
            FetchEvent::Submit(descriptor) => {
                self.submit(descriptor)?;
                self.load_more().await
            }
            FetchEvent::NearBottom => self.load_more().await,
        }
    }

    /// Fetch the next page if the consumer is near the bottom of the list
    pub async fn on_scroll(&self, position: ScrollPosition) -> Result<Option<FetchOutcome>> {
        if !position.is_near_bottom(self.near_bottom_threshold) {
            return Ok(None);
        }
        self.handle(FetchEvent::NearBottom).await.map(Some)
    }

    // ========================================================================
    // Session accessors
    // ========================================================================

    /// Copy of the current session
    pub fn snapshot(&self) -> SessionSnapshot {
        self.lock().snapshot()
    }

    /// Accumulated items in page order
    pub fn items(&self) -> Vec<Item> {
        self.lock().items.clone()
    }

    /// Number of accumulated items
    pub fn len(&self) -> usize {
        self.lock().items.len()
    }

    /// Check if nothing has been accumulated
    pub fn is_empty(&self) -> bool {
        self.lock().items.is_empty()
    }

    /// Look up an accumulated item by id
    pub fn item(&self, id: &str) -> Option<Item> {
        self.lock().items.iter().find(|item| item.id == id).cloned()
    }

    /// Whether the source has no further pages for this session
    pub fn is_exhausted(&self) -> bool {
        self.lock().pagination.done
    }

    /// Loading state for the view
    pub fn loading_state(&self) -> LoadingState {
        self.lock().loading_state()
    }

    /// Current session generation
    pub fn generation(&self) -> u64 {
        self.lock().generation
    }

    /// Descriptor of the current session
    pub fn descriptor(&self) -> Option<QueryDescriptor> {
        self.lock().descriptor.clone()
    }

    // ========================================================================
    // Internals
    // ========================================================================

    fn lock(&self) -> MutexGuard<'_, SessionState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Validate the request against the session and mark it in flight
    fn begin(&self, descriptor: Option<&QueryDescriptor>, requested: Requested) -> Result<Begin> {
        let mut state = self.lock();

        let descriptor = match descriptor {
            Some(descriptor) => descriptor.clone(),
            None => state
                .descriptor
                .clone()
                .ok_or_else(|| Error::invalid_query("no query has been submitted"))?,
        };

        if !state.is_for(&descriptor) {
            if let Requested::Cursor(Some(cursor)) = requested {
                return Err(Error::invalid_cursor(
                    cursor.to_string(),
                    "cursor was not issued for this query",
                ));
            }
            info!(%descriptor, "Descriptor changed, starting fetch session");
            state.reset(descriptor.clone());
        } else if state.pagination.done {
            debug!(%descriptor, "Session exhausted, returning empty page");
            return Ok(Begin::Skip(FetchOutcome::Page(Page::end())));
        } else if state.in_flight {
            debug!(%descriptor, "Request already in flight, coalescing");
            return Ok(Begin::Skip(FetchOutcome::Coalesced));
        } else if let Requested::Cursor(cursor) = requested {
            let expected = state.expected_cursor();
            match cursor {
                None if state.pagination.pages > 0 => {
                    info!(%descriptor, "First page requested again, restarting session");
                    state.reset(descriptor.clone());
                }
                None => {}
                Some(cursor) if Some(cursor) == expected => {}
                Some(cursor) => {
                    return Err(Error::invalid_cursor(
                        cursor.to_string(),
                        match expected {
                            Some(expected) => format!("expected cursor {expected}"),
                            None => "expected the first page".to_string(),
                        },
                    ));
                }
            }
        }

        state.in_flight = true;
        Ok(Begin::Send {
            generation: state.generation,
            request: PageRequest::new(state.expected_cursor(), self.paginator.limit_value),
            descriptor,
        })
    }

    /// Issue the request and apply the response if the session is unchanged
    async fn send(
        &self,
        generation: u64,
        descriptor: &QueryDescriptor,
        request: PageRequest,
    ) -> Result<FetchOutcome> {
        let mut guard = InFlightGuard {
            state: &self.state,
            generation,
            armed: true,
        };

        let result = self.source.fetch_page(descriptor, request).await;
        guard.armed = false;

        let mut state = self.lock();
        if state.generation != generation {
            debug!(
                %descriptor,
                stale = generation,
                current = state.generation,
                "Discarding response for replaced session"
            );
            return Ok(FetchOutcome::Superseded);
        }
        state.in_flight = false;

        let raw = result.inspect_err(|e| {
            warn!(%descriptor, offset = request.offset(), "Page request failed: {e}");
        })?;

        let page = self.paginator.process(raw, &mut state.pagination);
        state.items.extend(page.items.iter().cloned());

        info!(
            %descriptor,
            offset = request.offset(),
            received = page.len(),
            total = state.items.len(),
            exhausted = state.pagination.done,
            "Applied page"
        );
        Ok(FetchOutcome::Page(page))
    }
}

impl std::fmt::Debug for PagedFetcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PagedFetcher")
            .field("paginator", &self.paginator)
            .field("near_bottom_threshold", &self.near_bottom_threshold)
            .finish_non_exhaustive()
    }
}

/// Clears the in-flight flag if the request future is dropped mid-flight
struct InFlightGuard<'a> {
    state: &'a Mutex<SessionState>,
    generation: u64,
    armed: bool,
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        if state.generation == self.generation {
            state.in_flight = false;
        }
    }
}
