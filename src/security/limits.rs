//! Request and concurrency limits.
//!
//! # Responsibilities
//! - Enforce maximum request body size
//! - Shed requests once too many are in flight
//!
//! # Design Decisions
//! - Shedding is immediate (503), never queued
//! - Oversized bodies return 413 Payload Too Large through the body
//!   extractor, so the rejection carries the JSON error shape

use std::sync::Arc;

use axum::{
    body::Body,
    extract::{DefaultBodyLimit, State},
    http::Request,
    middleware::Next,
    response::{IntoResponse, Response},
};
use tokio::sync::Semaphore;

use crate::http::error::ApiError;

/// Permits bounding concurrently handled requests.
#[derive(Debug, Clone)]
pub struct InFlightLimit {
    permits: Arc<Semaphore>,
    max: usize,
}

impl InFlightLimit {
    pub fn new(max: usize) -> Self {
        Self {
            permits: Arc::new(Semaphore::new(max)),
            max,
        }
    }

    /// Slots currently free.
    pub fn available(&self) -> usize {
        self.permits.available_permits()
    }

    pub fn max(&self) -> usize {
        self.max
    }
}

/// Middleware holding a permit for the lifetime of each request.
pub async fn limit_in_flight(
    State(limit): State<InFlightLimit>,
    request: Request<Body>,
    next: Next,
) -> Response {
    match limit.permits.try_acquire() {
        Ok(_permit) => next.run(request).await,
        Err(_) => {
            tracing::warn!(max_in_flight = limit.max, "In-flight limit reached, shedding request");
            ApiError::Overloaded.into_response()
        }
    }
}

/// Layer capping the bytes any body extractor will buffer.
///
/// Applies whether or not the request declares a `Content-Length`.
pub fn body_limit_layer(max_bytes: usize) -> DefaultBodyLimit {
    DefaultBodyLimit::max(max_bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_permits_track_capacity() {
        let limit = InFlightLimit::new(2);
        assert_eq!(limit.available(), 2);

        let held = limit.permits.try_acquire().unwrap();
        assert_eq!(limit.available(), 1);
        drop(held);
        assert_eq!(limit.available(), limit.max());
    }
}
