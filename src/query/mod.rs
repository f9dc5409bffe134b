//! Query descriptors
//!
//! Search terms and seeded discovery requests, validated locally before any
//! request is issued.

mod types;

pub use types::{QueryDescriptor, DEFAULT_POPULARITY, MAX_POPULARITY, MAX_SEEDS};
