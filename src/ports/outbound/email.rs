//! Interface for email format validation.

use crate::error::CapabilityError;

/// Port deciding whether an email address is acceptable.
pub trait EmailValidator: Send + Sync {
    /// Returns `Ok(false)` for a malformed address.
    ///
    /// # Errors
    ///
    /// Returns `Err` when the validation itself could not be performed.
    fn is_valid(&self, email: &str) -> Result<bool, CapabilityError>;
}
