//! Account persistence port.

use async_trait::async_trait;

use crate::dto::{Account, NewAccount};
use crate::error::CapabilityError;

/// Port for account creation.
#[async_trait]
pub trait AddAccount: Send + Sync {
    /// Persist a validated account and return what was stored.
    async fn add(&self, account: NewAccount) -> Result<Account, CapabilityError>;
}
