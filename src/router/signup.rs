use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use serde_json::{Map, Value};

use crate::dto::HttpRequest;
use crate::error::Result;
use crate::http::HttpResponse;
use crate::ports::Controller;

/// Handler to sign up a user.
pub async fn handler(
    State(controller): State<Arc<dyn Controller>>,
    payload: std::result::Result<Json<Map<String, Value>>, JsonRejection>,
) -> Result<HttpResponse> {
    let Json(body) = payload?;

    Ok(controller.handle(HttpRequest::new(body)).await)
}
