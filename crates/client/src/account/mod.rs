//! Account Service client.
//!
//! Translates the remote account operations into typed outcomes. This
//! client performs no business logic beyond shape translation; validation
//! happens before a call is issued and session mutation happens after.
//!
//! # Endpoints
//!
//! | Operation | Method and path        | Success        | Classified failure  |
//! |-----------|------------------------|----------------|---------------------|
//! | Login     | POST /Customer/login   | 200 + Account  | 204 -> `NoMatch`    |
//! | Register  | POST /Customer/register| 201 + Account  | 400 -> `Conflict`   |
//! | Get by id | GET /Customer/{id}     | 200 + Account  | 404 -> `NotFound`   |
//! | List all  | GET /Customer/all      | 200 + [Account]| 400 -> `Server`     |
//! | Update    | PUT /Customer/{id}     | 200            | 404 -> `NotFound`   |
//! | Delete    | DELETE /Customer/{id}  | 200            | 404 -> `NotFound`   |
//!
//! Network failures surface as `Transport`; anything unclassified is
//! `Server`. Nothing is retried automatically.

mod types;

pub use types::{Account, CredentialsRequest};

use std::sync::Arc;

use reqwest::StatusCode;
use tracing::instrument;

use our_shop_core::{Email, Password, UserId};

use crate::config::ClientConfig;

/// Errors surfaced from the Account Service boundary.
#[derive(thiserror::Error, Debug)]
pub enum AccountError {
    /// Login credentials matched no account. Distinct from a transport
    /// error: the service answered, there is just no such account.
    #[error("no account matches those credentials")]
    NoMatch,

    /// The referenced account does not exist.
    #[error("account not found")]
    NotFound,

    /// Registration conflict (duplicate email or missing fields).
    #[error("registration rejected: {0}")]
    Conflict(String),

    /// The request never completed (network failure, bad response body).
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The service answered with an unclassified error status.
    #[error("account service error: HTTP {status}")]
    Server {
        /// The HTTP status code returned.
        status: u16,
    },
}

/// The seam across which the core talks to the external Account Service.
///
/// Production code uses [`AccountClient`]; tests substitute a scripted
/// implementation.
#[allow(async_fn_in_trait)]
pub trait AccountApi {
    /// Check credentials and return the matching account.
    async fn login(&self, email: &Email, password: &Password) -> Result<Account, AccountError>;

    /// Create a new account and return it.
    async fn register(
        &self,
        email: &Email,
        password: &Password,
        is_admin: bool,
    ) -> Result<Account, AccountError>;

    /// Fetch an account by id.
    async fn get_user(&self, id: UserId) -> Result<Account, AccountError>;

    /// Fetch all accounts.
    async fn list_users(&self) -> Result<Vec<Account>, AccountError>;

    /// Replace the stored account with `account` (full shape).
    async fn update_user(&self, account: &Account) -> Result<(), AccountError>;

    /// Delete the account with `id`.
    async fn delete_user(&self, id: UserId) -> Result<(), AccountError>;
}

/// Client for the Account Service HTTP/JSON API.
#[derive(Clone)]
pub struct AccountClient {
    inner: Arc<AccountClientInner>,
}

struct AccountClientInner {
    client: reqwest::Client,
    base_url: String,
}

impl AccountClient {
    /// Create a new Account Service client.
    #[must_use]
    pub fn new(config: &ClientConfig) -> Self {
        let base_url = config
            .account_api_base
            .as_str()
            .trim_end_matches('/')
            .to_owned();

        Self {
            inner: Arc::new(AccountClientInner {
                client: reqwest::Client::new(),
                base_url,
            }),
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/Customer{path}", self.inner.base_url)
    }

    /// Log the response body at warn level and classify the status.
    async fn classify_failure(response: reqwest::Response) -> AccountError {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        tracing::warn!(
            status = %status,
            body = %body.chars().take(200).collect::<String>(),
            "account service returned an error status"
        );
        AccountError::Server {
            status: status.as_u16(),
        }
    }

    /// Pull the service's `message` field out of an error body, if any.
    async fn error_message(response: reqwest::Response) -> String {
        response
            .json::<serde_json::Value>()
            .await
            .ok()
            .and_then(|v| v.get("message").and_then(|m| m.as_str()).map(String::from))
            .unwrap_or_else(|| "request rejected by the account service".to_owned())
    }
}

impl AccountApi for AccountClient {
    #[instrument(skip(self, email, password), fields(email = %email))]
    async fn login(&self, email: &Email, password: &Password) -> Result<Account, AccountError> {
        let response = self
            .inner
            .client
            .post(self.endpoint("/login"))
            .json(&CredentialsRequest {
                email: email.as_str(),
                password: password.expose(),
                is_admin: None,
            })
            .send()
            .await?;

        match response.status() {
            StatusCode::OK => Ok(response.json().await?),
            // The service answers an unmatched login with an empty 204.
            StatusCode::NO_CONTENT => Err(AccountError::NoMatch),
            _ => Err(Self::classify_failure(response).await),
        }
    }

    #[instrument(skip(self, email, password), fields(email = %email))]
    async fn register(
        &self,
        email: &Email,
        password: &Password,
        is_admin: bool,
    ) -> Result<Account, AccountError> {
        let response = self
            .inner
            .client
            .post(self.endpoint("/register"))
            .json(&CredentialsRequest {
                email: email.as_str(),
                password: password.expose(),
                is_admin: Some(is_admin),
            })
            .send()
            .await?;

        match response.status() {
            StatusCode::CREATED => Ok(response.json().await?),
            // 400 carries a message such as "Email already exists".
            StatusCode::BAD_REQUEST => {
                Err(AccountError::Conflict(Self::error_message(response).await))
            }
            _ => Err(Self::classify_failure(response).await),
        }
    }

    #[instrument(skip(self))]
    async fn get_user(&self, id: UserId) -> Result<Account, AccountError> {
        let response = self
            .inner
            .client
            .get(self.endpoint(&format!("/{id}")))
            .send()
            .await?;

        match response.status() {
            StatusCode::OK => Ok(response.json().await?),
            StatusCode::NOT_FOUND => Err(AccountError::NotFound),
            _ => Err(Self::classify_failure(response).await),
        }
    }

    #[instrument(skip(self))]
    async fn list_users(&self) -> Result<Vec<Account>, AccountError> {
        let response = self
            .inner
            .client
            .get(self.endpoint("/all"))
            .send()
            .await?;

        match response.status() {
            StatusCode::OK => Ok(response.json().await?),
            _ => Err(Self::classify_failure(response).await),
        }
    }

    #[instrument(skip(self, account), fields(id = %account.id))]
    async fn update_user(&self, account: &Account) -> Result<(), AccountError> {
        let response = self
            .inner
            .client
            .put(self.endpoint(&format!("/{}", account.id)))
            .json(account)
            .send()
            .await?;

        match response.status() {
            StatusCode::OK => Ok(()),
            StatusCode::NOT_FOUND => Err(AccountError::NotFound),
            _ => Err(Self::classify_failure(response).await),
        }
    }

    #[instrument(skip(self))]
    async fn delete_user(&self, id: UserId) -> Result<(), AccountError> {
        let response = self
            .inner
            .client
            .delete(self.endpoint(&format!("/{id}")))
            .send()
            .await?;

        match response.status() {
            StatusCode::OK => Ok(()),
            StatusCode::NOT_FOUND => Err(AccountError::NotFound),
            _ => Err(Self::classify_failure(response).await),
        }
    }
}
