//! Account management commands.
//!
//! Thin wrappers over [`AccountClient`]: validate input the way the app
//! does, make one call, print the typed outcome as JSON.

use thiserror::Error;

use our_shop_client::account::{Account, AccountApi, AccountClient, AccountError};
use our_shop_client::config::{ClientConfig, ConfigError};
use our_shop_core::{Email, EmailError, Password, PasswordError, UserId};

/// Errors that can occur during account commands.
#[derive(Debug, Error)]
pub enum CommandError {
    /// Configuration could not be loaded.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The email argument is malformed.
    #[error("invalid email: {0}")]
    Email(#[from] EmailError),

    /// The password argument is malformed.
    #[error("invalid password: {0}")]
    Password(#[from] PasswordError),

    /// The Account Service rejected or failed the call.
    #[error("account service: {0}")]
    Account(#[from] AccountError),

    /// The response could not be rendered.
    #[error("output error: {0}")]
    Output(#[from] serde_json::Error),
}

fn client() -> Result<AccountClient, CommandError> {
    let config = ClientConfig::from_env()?;
    Ok(AccountClient::new(&config))
}

#[allow(clippy::print_stdout)]
fn print_account(account: &Account) -> Result<(), CommandError> {
    println!("{}", serde_json::to_string_pretty(account)?);
    Ok(())
}

/// Check credentials against the Account Service.
///
/// Only new passwords are held to the length rule, so login accepts any
/// non-empty credential.
pub async fn login(email: &str, password: &str) -> Result<(), CommandError> {
    let email = Email::parse(email)?;
    let password = Password::existing(password)?;

    let account = client()?.login(&email, &password).await?;
    print_account(&account)
}

/// Register a new account.
pub async fn register(email: &str, password: &str, admin: bool) -> Result<(), CommandError> {
    let email = Email::parse(email)?;
    let password = Password::parse(password)?;

    let account = client()?.register(&email, &password, admin).await?;
    print_account(&account)
}

/// Fetch one account by id.
pub async fn get(id: i32) -> Result<(), CommandError> {
    let account = client()?.get_user(UserId::new(id)).await?;
    print_account(&account)
}

/// List all accounts.
#[allow(clippy::print_stdout)]
pub async fn list() -> Result<(), CommandError> {
    let accounts = client()?.list_users().await?;
    println!("{}", serde_json::to_string_pretty(&accounts)?);
    Ok(())
}

/// Update an account's email and optionally its password.
#[allow(clippy::print_stdout)]
pub async fn update(
    id: i32,
    email: &str,
    password: Option<&str>,
    admin: bool,
) -> Result<(), CommandError> {
    let email = Email::parse(email)?;
    let password = password.map(Password::parse).transpose()?;

    let account = Account {
        id: UserId::new(id),
        email,
        password: password.map(|p| p.expose().to_owned()),
        is_admin: admin,
    };

    client()?.update_user(&account).await?;
    println!("Updated account {id}");
    Ok(())
}

/// Delete an account.
#[allow(clippy::print_stdout)]
pub async fn delete(id: i32) -> Result<(), CommandError> {
    client()?.delete_user(UserId::new(id)).await?;
    println!("Deleted account {id}");
    Ok(())
}
