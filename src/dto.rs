//! Data Transfer Objects.
//!
//! DTOs carry data between the transport, the sign-up controller and the
//! capabilities without exposing any storage representation.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Raw sign-up request, as received from a transport.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HttpRequest {
    /// Untrusted field name to value mapping.
    pub body: Map<String, Value>,
}

impl HttpRequest {
    pub fn new(body: Map<String, Value>) -> Self {
        Self { body }
    }
}

/// Validated account creation command.
///
/// Only built once every field is present and the password confirmation
/// matched. The confirmation itself is never carried further.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAccount {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Account returned by an [`crate::ports::AddAccount`] capability.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing, default)]
    pub password: String,
}
