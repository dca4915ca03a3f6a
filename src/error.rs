//! Error handler for signup.

use axum::extract::rejection::JsonRejection;
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, AppError>;

/// Required request fields, in the order they are checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Name,
    Email,
    Password,
    PasswordConfirm,
}

impl Field {
    /// Every required field, in presence-check order.
    pub const REQUIRED: [Field; 4] = [
        Field::Name,
        Field::Email,
        Field::Password,
        Field::PasswordConfirm,
    ];

    /// Key used by clients in the request body.
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Email => "email",
            Field::Password => "password",
            Field::PasswordConfirm => "passwordConfirm",
        }
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Failures a sign-up request can end with.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RequestError {
    #[error("Missing param: {0}")]
    MissingParam(Field),

    #[error("Invalid param: {0}")]
    InvalidParam(Field),

    #[error("Internal server error")]
    ServerError,
}

/// Fault raised by a capability (email validator, account store...).
///
/// The wrapped error is only meant for logs. It never reaches a client.
#[derive(Debug, Error)]
#[error("capability failed: {0}")]
pub struct CapabilityError(Box<dyn std::error::Error + Send + Sync>);

impl CapabilityError {
    pub fn internal<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self(Box::new(err))
    }

    /// Build a fault from a plain message.
    pub fn message(message: impl Into<String>) -> Self {
        let message: String = message.into();
        Self(message.into())
    }
}

pub trait Catch<T> {
    fn catch(self) -> std::result::Result<T, CapabilityError>;
}

impl<T, E> Catch<T> for std::result::Result<T, E>
where
    E: std::error::Error + Send + Sync + 'static,
{
    fn catch(self) -> std::result::Result<T, CapabilityError> {
        self.map_err(CapabilityError::internal)
    }
}

/// Errors outside of the sign-up decision procedure.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Axum(#[from] JsonRejection),

    #[error("URL is invalid: {0}")]
    Url(#[from] url::ParseError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("cannot install metrics recorder: {0}")]
    Metrics(#[from] metrics_exporter_prometheus::BuildError),

    #[error("invalid argon2 parameters: {0}")]
    Argon2(#[from] argon2::Error),
}

/// Structure for detailed error responses.
#[derive(Debug, Serialize)]
pub struct ResponseError {
    r#type: Option<String>,
    title: String,
    status: u16,
    detail: String,
    instance: Option<String>,
    errors: Option<Vec<FieldError>>,
}

impl ResponseError {
    /// Update error status code.
    pub fn status(mut self, code: StatusCode) -> Self {
        self.status = code.as_u16();
        self
    }

    /// Update `title` field.
    pub fn title(mut self, title: &str) -> Self {
        self.title = title.into();
        self
    }

    /// Add detailed error.
    pub fn details(mut self, description: &str) -> Self {
        self.detail = description.into();
        self
    }

    /// Blame a single field.
    pub fn field(mut self, field: Field, message: &str) -> Self {
        self.errors = Some(vec![FieldError {
            field: field.as_str().to_owned(),
            message: message.to_owned(),
        }]);
        self
    }

    /// Transform [`ResponseError`] into axum [`Response`].
    pub fn into_response(
        self,
    ) -> std::result::Result<Response, axum::http::Error> {
        if let Ok(body) = serde_json::to_string(&self) {
            Response::builder()
                .status(self.status)
                .header(header::CONTENT_TYPE, "application/json")
                .body(body.into())
        } else {
            Ok(internal_server_error())
        }
    }
}

impl Default for ResponseError {
    fn default() -> Self {
        Self {
            r#type: None,
            title: "Internal server error.".to_owned(),
            status: StatusCode::INTERNAL_SERVER_ERROR.as_u16(),
            detail: String::default(),
            instance: None,
            errors: None,
        }
    }
}

#[derive(Debug, Serialize)]
struct FieldError {
    field: String,
    message: String,
}

impl From<&RequestError> for ResponseError {
    fn from(error: &RequestError) -> Self {
        match error {
            RequestError::MissingParam(field) => ResponseError::default()
                .title("There were validation errors with your request.")
                .details(&error.to_string())
                .status(StatusCode::BAD_REQUEST)
                .field(*field, "Field is required."),
            RequestError::InvalidParam(field) => ResponseError::default()
                .title("There were validation errors with your request.")
                .details(&error.to_string())
                .status(StatusCode::BAD_REQUEST)
                .field(*field, "Field is invalid."),
            RequestError::ServerError => ResponseError::default(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let response = match &self {
            AppError::Axum(rejection) => ResponseError::default()
                .title("Server error during data parsing.")
                .details(&rejection.body_text())
                .status(rejection.status()),
            _ => {
                tracing::error!(error = %self, "server returned 500 status");
                ResponseError::default()
            },
        };

        response
            .into_response()
            .unwrap_or_else(|_| internal_server_error())
    }
}

pub(crate) fn internal_server_error() -> Response {
    Response::builder()
        .status(StatusCode::INTERNAL_SERVER_ERROR)
        .header(header::CONTENT_TYPE, "application/json")
        .body(
            serde_json::json!({
                "type": null,
                "title": "Internal server error.",
                "status": StatusCode::INTERNAL_SERVER_ERROR.as_u16(),
                "detail": null,
                "instance": null,
                "errors": null,
            })
            .to_string()
            .into(),
        )
        .unwrap_or_else(|_| Response::new("Internal server error".into()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_error_messages() {
        assert_eq!(
            RequestError::MissingParam(Field::Name).to_string(),
            "Missing param: name"
        );
        assert_eq!(
            RequestError::InvalidParam(Field::PasswordConfirm).to_string(),
            "Invalid param: passwordConfirm"
        );
        assert_eq!(
            RequestError::ServerError.to_string(),
            "Internal server error"
        );
    }

    #[test]
    fn test_request_error_equality() {
        assert_eq!(
            RequestError::MissingParam(Field::Email),
            RequestError::MissingParam(Field::Email)
        );
        assert_ne!(
            RequestError::MissingParam(Field::Email),
            RequestError::InvalidParam(Field::Email)
        );
        assert_ne!(
            RequestError::InvalidParam(Field::Email),
            RequestError::InvalidParam(Field::Password)
        );
    }

    #[test]
    fn test_catch_boxes_source() {
        let result: std::result::Result<(), std::io::Error> =
            Err(std::io::Error::other("disk on fire"));
        let err = result.catch().unwrap_err();
        assert!(err.to_string().contains("disk on fire"));
    }

    #[test]
    fn test_response_error_from_missing_param() {
        let response =
            ResponseError::from(&RequestError::MissingParam(Field::Password));
        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(json["status"], 400);
        assert_eq!(json["detail"], "Missing param: password");
        assert_eq!(json["errors"][0]["field"], "password");
    }

    #[test]
    fn test_response_error_from_server_error() {
        let response = ResponseError::from(&RequestError::ServerError);
        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(json["status"], 500);
        assert_eq!(json["title"], "Internal server error.");
        assert!(json["errors"].is_null());
    }
}
