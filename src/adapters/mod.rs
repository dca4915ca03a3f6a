//! Default capability implementations.

pub mod account;
pub mod email;

pub use account::InMemoryAccountRepository;
pub use email::ValidatorEmailAdapter;
