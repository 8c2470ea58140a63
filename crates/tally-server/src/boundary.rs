//! The terminal failure handler of the request lifecycle
//!
//! Handlers return [`HandlerResult`] and let failures propagate unmodified
//! with `?`. axum hands each failure here exactly once; it is logged,
//! classified against the rule table, and turned into the response that
//! ends the request. Nothing is re-raised past this point.

use axum::Json;
use axum::response::{IntoResponse, Response};
use tally_core::Failure;

/// Result alias for handlers whose failures terminate at the boundary
pub type HandlerResult<T> = Result<T, ApiFailure>;

/// Wrapper carrying a failure to the boundary
#[derive(Debug)]
pub struct ApiFailure(pub Failure);

impl<E> From<E> for ApiFailure
where
    E: Into<Failure>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}

impl IntoResponse for ApiFailure {
    fn into_response(self) -> Response {
        let descriptor = tally_core::respond(&self.0);
        (descriptor.status, Json(descriptor.body)).into_response()
    }
}
