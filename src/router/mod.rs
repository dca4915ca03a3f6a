//! HTTP routes.

pub mod signup;
pub mod status;

#[cfg(test)]
pub(crate) fn state() -> crate::AppState {
    use std::sync::Arc;

    use crate::adapters::{InMemoryAccountRepository, ValidatorEmailAdapter};
    use crate::config::{Argon2, Configuration};
    use crate::controller::SignUpController;

    let config = Configuration::default();
    let accounts = InMemoryAccountRepository::new(&Argon2 {
        memory_cost: 1024,
        iterations: 1,
        parallelism: 1,
        hash_length: 32,
    })
    .unwrap();

    crate::AppState {
        config: Arc::new(config),
        controller: Arc::new(SignUpController::new(
            Box::new(ValidatorEmailAdapter::new()),
            Box::new(accounts),
        )),
    }
}
