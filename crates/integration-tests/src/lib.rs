//! Shared test infrastructure for the Our Shop client.
//!
//! [`InMemoryAccountService`] mirrors the remote Account Service's
//! observable semantics (login match, register conflict on duplicate
//! email, not-found on unknown ids) without a network, so scenario tests
//! can drive the whole client core in-process.

use std::sync::atomic::{AtomicI32, Ordering};
use std::sync::{Arc, Mutex};

use tokio::sync::Notify;

use our_shop_client::account::{Account, AccountApi, AccountError};
use our_shop_core::{Email, Password, UserId};

#[derive(Clone)]
struct StoredAccount {
    account: Account,
    password: String,
}

/// An in-process stand-in for the remote Account Service.
///
/// Cloneable; clones share the same store. An optional gate parks
/// login/register calls until released, letting tests interleave local
/// actions with an in-flight call.
#[derive(Clone, Default)]
pub struct InMemoryAccountService {
    accounts: Arc<Mutex<Vec<StoredAccount>>>,
    next_id: Arc<AtomicI32>,
    gate: Option<Arc<Notify>>,
}

impl InMemoryAccountService {
    /// Create an empty service.
    #[must_use]
    pub fn new() -> Self {
        Self {
            accounts: Arc::new(Mutex::new(Vec::new())),
            next_id: Arc::new(AtomicI32::new(0)),
            gate: None,
        }
    }

    /// Park every login/register call until `gate` is notified.
    #[must_use]
    pub fn gated(gate: Arc<Notify>) -> Self {
        Self {
            gate: Some(gate),
            ..Self::new()
        }
    }

    /// Seed an account directly, returning its id.
    ///
    /// # Panics
    ///
    /// Panics if the store lock is poisoned (test-only code).
    pub fn seed(&self, email: &str, password: &str, is_admin: bool) -> UserId {
        let id = UserId::new(self.next_id.fetch_add(1, Ordering::SeqCst) + 1);
        let email = Email::parse(email).expect("seed email must be valid");
        self.accounts
            .lock()
            .expect("account store lock poisoned")
            .push(StoredAccount {
                account: Account {
                    id,
                    email,
                    password: None,
                    is_admin,
                },
                password: password.to_owned(),
            });
        id
    }

    /// Number of stored accounts.
    ///
    /// # Panics
    ///
    /// Panics if the store lock is poisoned (test-only code).
    #[must_use]
    pub fn account_count(&self) -> usize {
        self.accounts
            .lock()
            .expect("account store lock poisoned")
            .len()
    }

    async fn wait_for_gate(&self) {
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
    }
}

impl AccountApi for InMemoryAccountService {
    async fn login(&self, email: &Email, password: &Password) -> Result<Account, AccountError> {
        self.wait_for_gate().await;
        self.accounts
            .lock()
            .expect("account store lock poisoned")
            .iter()
            .find(|s| &s.account.email == email && s.password == password.expose())
            .map(|s| s.account.clone())
            .ok_or(AccountError::NoMatch)
    }

    async fn register(
        &self,
        email: &Email,
        password: &Password,
        is_admin: bool,
    ) -> Result<Account, AccountError> {
        self.wait_for_gate().await;
        let mut accounts = self.accounts.lock().expect("account store lock poisoned");

        if accounts.iter().any(|s| &s.account.email == email) {
            return Err(AccountError::Conflict(
                "Email already exists. Please use a different email or login.".to_owned(),
            ));
        }

        let id = UserId::new(self.next_id.fetch_add(1, Ordering::SeqCst) + 1);
        let account = Account {
            id,
            email: email.clone(),
            password: None,
            is_admin,
        };
        accounts.push(StoredAccount {
            account: account.clone(),
            password: password.expose().to_owned(),
        });

        Ok(account)
    }

    async fn get_user(&self, id: UserId) -> Result<Account, AccountError> {
        self.accounts
            .lock()
            .expect("account store lock poisoned")
            .iter()
            .find(|s| s.account.id == id)
            .map(|s| s.account.clone())
            .ok_or(AccountError::NotFound)
    }

    async fn list_users(&self) -> Result<Vec<Account>, AccountError> {
        Ok(self
            .accounts
            .lock()
            .expect("account store lock poisoned")
            .iter()
            .map(|s| s.account.clone())
            .collect())
    }

    async fn update_user(&self, account: &Account) -> Result<(), AccountError> {
        let mut accounts = self.accounts.lock().expect("account store lock poisoned");
        let stored = accounts
            .iter_mut()
            .find(|s| s.account.id == account.id)
            .ok_or(AccountError::NotFound)?;

        stored.account.email = account.email.clone();
        stored.account.is_admin = account.is_admin;
        if let Some(password) = &account.password {
            stored.password.clone_from(password);
        }

        Ok(())
    }

    async fn delete_user(&self, id: UserId) -> Result<(), AccountError> {
        let mut accounts = self.accounts.lock().expect("account store lock poisoned");
        let before = accounts.len();
        accounts.retain(|s| s.account.id != id);

        if accounts.len() == before {
            return Err(AccountError::NotFound);
        }
        Ok(())
    }
}
