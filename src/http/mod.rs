//! HTTP client module
//!
//! Provides the HTTP client used to talk to the upstream source.
//!
//! # Features
//!
//! - **Rate Limiting**: Token bucket rate limiter using governor
//! - **Authentication**: Bearer credential from the session context
//! - **Error Classification**: Status codes and transport failures mapped
//!   to `Unauthorized`, `SourceUnavailable` or `MalformedResponse`

mod client;
mod rate_limit;

pub use client::{HttpClient, HttpClientConfig, HttpClientConfigBuilder, RequestConfig};
pub use rate_limit::{RateLimiter, RateLimiterConfig};

#[cfg(test)]
mod tests;
