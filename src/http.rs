//! Response envelope and the helpers building it.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::dto::Account;
use crate::error::{RequestError, ResponseError, internal_server_error};

/// Standardized result of a controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status_code: StatusCode,
    pub body: ResponseBody,
}

/// Payload carried by an [`HttpResponse`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResponseBody {
    Error(RequestError),
    Account(Account),
}

/// Client-side failure, `400 Bad Request`.
pub fn bad_request(error: RequestError) -> HttpResponse {
    HttpResponse {
        status_code: StatusCode::BAD_REQUEST,
        body: ResponseBody::Error(error),
    }
}

/// Opaque server-side failure, `500 Internal Server Error`.
pub fn server_error() -> HttpResponse {
    HttpResponse {
        status_code: StatusCode::INTERNAL_SERVER_ERROR,
        body: ResponseBody::Error(RequestError::ServerError),
    }
}

/// Account successfully created, `201 Created`.
pub fn created(account: Account) -> HttpResponse {
    HttpResponse {
        status_code: StatusCode::CREATED,
        body: ResponseBody::Account(account),
    }
}

impl IntoResponse for HttpResponse {
    fn into_response(self) -> Response {
        match self.body {
            ResponseBody::Account(account) => {
                (self.status_code, Json(account)).into_response()
            },
            ResponseBody::Error(error) => ResponseError::from(&error)
                .status(self.status_code)
                .into_response()
                .unwrap_or_else(|_| internal_server_error()),
        }
    }
}
