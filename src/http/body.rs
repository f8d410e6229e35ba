//! Lenient JSON body extraction.
//!
//! A body that is empty, or not declared as JSON, reads as the target type's
//! default value. Missing fields then surface as validation errors (400)
//! rather than as a media-type rejection.

use axum::{
    body::Bytes,
    extract::{FromRequest, Request},
    http::{header, HeaderMap},
    Json,
};
use serde::de::DeserializeOwned;

use crate::http::error::ApiError;

/// JSON request body falling back to `T::default()`.
#[derive(Debug, Clone, Default)]
pub struct JsonBody<T>(pub T);

fn declares_json(headers: &HeaderMap) -> bool {
    let Some(value) = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
    else {
        return false;
    };
    let essence = value
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();
    essence == "application/json"
        || (essence.starts_with("application/") && essence.ends_with("+json"))
}

impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned + Default,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let json = declares_json(req.headers());
        // Buffering honours `DefaultBodyLimit`, so oversize is a 413 here.
        let bytes = Bytes::from_request(req, state).await?;
        if !json || bytes.trim_ascii().is_empty() {
            return Ok(JsonBody(T::default()));
        }
        let Json(value) = Json::<T>::from_bytes(&bytes)?;
        Ok(JsonBody(value))
    }
}
