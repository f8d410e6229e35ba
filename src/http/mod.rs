//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP/TLS connection
//!     → server.rs (Axum setup, middleware stack)
//!     → request.rs (assign / propagate request ID)
//!     → security (in-flight cap, body limit, response headers)
//!     → handlers.rs (delegate to the item repository)
//!     → error.rs (map failures to JSON error bodies)
//!     → Send to client
//! ```

pub mod body;
pub mod error;
pub mod handlers;
pub mod request;
pub mod server;

pub use body::JsonBody;
pub use error::{json_error_bodies, ApiError, ErrorBody};
pub use request::X_REQUEST_ID;
pub use server::{AppState, HttpServer};
