//! Email validation through the `validator` crate (HTML5 rules).

use validator::ValidateEmail;

use crate::error::CapabilityError;
use crate::ports::EmailValidator;

/// [`EmailValidator`] backed by [`validator::ValidateEmail`].
#[derive(Debug, Default)]
pub struct ValidatorEmailAdapter;

impl ValidatorEmailAdapter {
    pub fn new() -> Self {
        Self
    }
}

impl EmailValidator for ValidatorEmailAdapter {
    fn is_valid(&self, email: &str) -> Result<bool, CapabilityError> {
        Ok(email.validate_email())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_emails() {
        let validator = ValidatorEmailAdapter::new();

        assert!(validator.is_valid("jane@x.com").unwrap());
        assert!(validator.is_valid("test@gravitalia.com").unwrap());
    }

    #[test]
    fn test_invalid_emails() {
        let validator = ValidatorEmailAdapter::new();

        assert!(!validator.is_valid("jane").unwrap());
        assert!(!validator.is_valid("jane@").unwrap());
        assert!(!validator.is_valid("@x.com").unwrap());
    }
}
