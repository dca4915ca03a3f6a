//! Sign-up decision procedure.

use async_trait::async_trait;
use serde_json::{Map, Value};

use crate::dto::{Account, HttpRequest, NewAccount};
use crate::error::{Field, RequestError};
use crate::http::{HttpResponse, bad_request, created, server_error};
use crate::ports::{AddAccount, Controller, EmailValidator};

/// Controller validating sign-up requests before creating the account.
pub struct SignUpController {
    email_validator: Box<dyn EmailValidator>,
    add_account: Box<dyn AddAccount>,
}

impl SignUpController {
    pub fn new(
        email_validator: Box<dyn EmailValidator>,
        add_account: Box<dyn AddAccount>,
    ) -> Self {
        Self {
            email_validator,
            add_account,
        }
    }

    async fn signup(
        &self,
        request: HttpRequest,
    ) -> Result<Account, RequestError> {
        let body = request.body;

        if let Some(field) = Field::REQUIRED
            .into_iter()
            .find(|field| !body.get(field.as_str()).is_some_and(is_truthy))
        {
            return Err(RequestError::MissingParam(field));
        }

        let name = text(&body, Field::Name)?;
        let email = text(&body, Field::Email)?;
        let password = text(&body, Field::Password)?;
        let password_confirm = text(&body, Field::PasswordConfirm)?;

        if password != password_confirm {
            return Err(RequestError::InvalidParam(Field::PasswordConfirm));
        }

        let is_valid = self.email_validator.is_valid(&email).map_err(|err| {
            tracing::error!(error = %err, "email validation failed");
            RequestError::ServerError
        })?;
        if !is_valid {
            return Err(RequestError::InvalidParam(Field::Email));
        }

        self.add_account
            .add(NewAccount {
                name,
                email,
                password,
            })
            .await
            .map_err(|err| {
                tracing::error!(error = %err, "account creation failed");
                RequestError::ServerError
            })
    }
}

#[async_trait]
impl Controller for SignUpController {
    async fn handle(&self, request: HttpRequest) -> HttpResponse {
        match self.signup(request).await {
            Ok(account) => {
                tracing::info!(account_id = %account.id, "account created");
                created(account)
            },
            Err(RequestError::ServerError) => server_error(),
            Err(err) => {
                tracing::debug!(error = %err, "sign-up request rejected");
                bad_request(err)
            },
        }
    }
}

/// `null`, `false`, `0` and `""` count as absent.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(value) => *value,
        Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0),
        Value::String(text) => !text.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn text(body: &Map<String, Value>, field: Field) -> Result<String, RequestError> {
    match body.get(field.as_str()) {
        Some(Value::String(text)) => Ok(text.clone()),
        _ => Err(RequestError::InvalidParam(field)),
    }
}
