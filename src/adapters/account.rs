//! In-memory account store.
//!
//! Passwords are hashed with Argon2id before being kept. Accounts live as
//! long as the process does.

use std::collections::HashMap;

use argon2::password_hash::{PasswordHasher, SaltString};
use argon2::{Argon2, Params, Version};
use async_trait::async_trait;
use rand::distributions::Alphanumeric;
use rand::rngs::OsRng;
use rand::Rng;
use tokio::sync::RwLock;

use crate::config;
use crate::dto::{Account, NewAccount};
use crate::error::{AppError, CapabilityError, Catch};
use crate::ports::AddAccount;

const ID_LENGTH: usize = 16;

/// [`AddAccount`] keeping accounts in a process-local map.
pub struct InMemoryAccountRepository {
    params: Params,
    accounts: RwLock<HashMap<String, Account>>,
}

impl InMemoryAccountRepository {
    /// Create a new store hashing passwords with the given parameters.
    pub fn new(config: &config::Argon2) -> Result<Self, AppError> {
        let params = Params::new(
            config.memory_cost,
            config.iterations,
            config.parallelism,
            Some(config.hash_length),
        )?;

        Ok(Self {
            params,
            accounts: RwLock::default(),
        })
    }

    /// Hash on the blocking pool, Argon2id is memory and CPU bound.
    async fn hash(&self, password: String) -> Result<String, CapabilityError> {
        let params = self.params.clone();

        tokio::task::spawn_blocking(move || {
            let argon2 =
                Argon2::new(argon2::Algorithm::Argon2id, Version::V0x13, params);
            let salt = SaltString::generate(&mut OsRng);

            argon2
                .hash_password(password.as_bytes(), &salt)
                .map(|hash| hash.to_string())
                .catch()
        })
        .await
        .catch()?
    }
}

fn ensure_unique(
    accounts: &HashMap<String, Account>,
    email: &str,
) -> Result<(), CapabilityError> {
    if accounts.values().any(|stored| stored.email == email) {
        return Err(CapabilityError::message("email already registered"));
    }

    Ok(())
}

#[async_trait]
impl AddAccount for InMemoryAccountRepository {
    async fn add(&self, account: NewAccount) -> Result<Account, CapabilityError> {
        ensure_unique(&*self.accounts.read().await, &account.email)?;

        let password = self.hash(account.password).await?;

        // Another request may have taken the email while hashing.
        let mut accounts = self.accounts.write().await;
        ensure_unique(&accounts, &account.email)?;

        let id: String = OsRng
            .sample_iter(&Alphanumeric)
            .take(ID_LENGTH)
            .map(char::from)
            .collect();

        let account = Account {
            id: id.clone(),
            name: account.name,
            email: account.email,
            password,
        };
        accounts.insert(id, account.clone());

        Ok(account)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn repository() -> InMemoryAccountRepository {
        InMemoryAccountRepository::new(&config::Argon2 {
            memory_cost: 1024,
            iterations: 1,
            parallelism: 1,
            hash_length: 32,
        })
        .unwrap()
    }

    fn new_account(email: &str) -> NewAccount {
        NewAccount {
            name: "Jane".into(),
            email: email.into(),
            password: "P$soW%920$n&".into(),
        }
    }

    #[tokio::test]
    async fn test_add_hashes_password() {
        let repository = repository();
        let account = repository.add(new_account("jane@x.com")).await.unwrap();

        assert_eq!(account.id.len(), ID_LENGTH);
        assert_eq!(account.name, "Jane");
        assert_eq!(account.email, "jane@x.com");
        assert_ne!(account.password, "P$soW%920$n&");
        assert!(account.password.starts_with("$argon2id$"));

        let accounts = repository.accounts.read().await;
        assert_eq!(accounts.get(&account.id), Some(&account));
    }

    #[tokio::test]
    async fn test_add_generates_distinct_ids() {
        let repository = repository();
        let first = repository.add(new_account("a@x.com")).await.unwrap();
        let second = repository.add(new_account("b@x.com")).await.unwrap();

        assert_ne!(first.id, second.id);
    }

    #[tokio::test]
    async fn test_add_rejects_duplicate_email() {
        let repository = repository();
        repository.add(new_account("jane@x.com")).await.unwrap();

        let err = repository.add(new_account("jane@x.com")).await.unwrap_err();
        assert!(err.to_string().contains("email already registered"));
        assert_eq!(repository.accounts.read().await.len(), 1);
    }

    #[tokio::test]
    async fn test_duplicate_email_is_rejected_before_hashing() {
        // 1 GiB and 16 passes: hashing alone would take well over a second.
        let repository = InMemoryAccountRepository::new(&config::Argon2 {
            memory_cost: 1024 * 1024,
            iterations: 16,
            parallelism: 1,
            hash_length: 32,
        })
        .unwrap();

        let stored = Account {
            id: "stored".into(),
            name: "Jane".into(),
            email: "jane@x.com".into(),
            password: "$argon2id$stored".into(),
        };
        repository
            .accounts
            .write()
            .await
            .insert(stored.id.clone(), stored);

        let result = tokio::time::timeout(
            Duration::from_secs(1),
            repository.add(new_account("jane@x.com")),
        )
        .await
        .expect("duplicate email must be rejected without hashing");

        assert!(result.is_err());
    }

    #[test]
    fn test_invalid_params() {
        let config = config::Argon2 {
            memory_cost: 1,
            iterations: 0,
            parallelism: 0,
            hash_length: 32,
        };

        assert!(InMemoryAccountRepository::new(&config).is_err());
    }
}
