use actix_web::{HttpResponse, http::StatusCode};
use serde::Serialize;

use super::error::Res;

/// Shorthand for JSON success responses returned from route handlers.
pub struct Success;

impl Success {
    fn with_status<T: Serialize>(status: StatusCode, body: T) -> Res<HttpResponse> {
        Ok(HttpResponse::build(status).json(body))
    }

    pub fn ok<T: Serialize>(body: T) -> Res<HttpResponse> {
        Self::with_status(StatusCode::OK, body)
    }

    pub fn created<T: Serialize>(body: T) -> Res<HttpResponse> {
        Self::with_status(StatusCode::CREATED, body)
    }
}
