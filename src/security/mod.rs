//! Security subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming request:
//!     → limits.rs (in-flight cap, request body size)
//!     → Pass to handlers
//! Outgoing response:
//!     → headers.rs (hardening response headers)
//! ```
//!
//! # Design Decisions
//! - Limits reject early, before the body is read
//! - Handler-set headers are never overwritten

pub mod headers;
pub mod limits;
