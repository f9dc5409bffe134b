//! Pagination module
//!
//! # Overview
//!
//! The upstream source paginates by offset. This module maps that
//! convention onto a uniform `Page` with an opaque `Cursor`, tracks when a
//! session is exhausted, and decides when the consumer has scrolled close
//! enough to the bottom to want the next page.

mod strategies;
mod types;

pub use strategies::OffsetPaginator;
pub use types::{Cursor, Page, PaginationState, RawPage, ScrollPosition};

#[cfg(test)]
mod tests;
