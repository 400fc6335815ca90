//! Wire types for the Account Service.
//!
//! Field casing follows the service's JSON exactly (`Id`, `email`,
//! `password`, `isAdmin`); serde renames keep the Rust side idiomatic.

use serde::{Deserialize, Serialize};

use our_shop_core::{Email, UserId};

/// The account shape returned across the service boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// Server-assigned account id.
    #[serde(rename = "Id")]
    pub id: UserId,
    /// Unique account email.
    pub email: Email,
    /// Opaque credential. Present only when the client is sending one;
    /// never logged.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    /// Whether the account has admin privileges.
    #[serde(rename = "isAdmin")]
    pub is_admin: bool,
}

/// Request body for `POST /Customer/login` and `POST /Customer/register`.
#[derive(Debug, Serialize)]
pub struct CredentialsRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
    /// Only sent on register.
    #[serde(rename = "isAdmin", skip_serializing_if = "Option::is_none")]
    pub is_admin: Option<bool>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_account_deserializes_service_casing() {
        let json = r#"{"Id": 7, "email": "user@example.com", "isAdmin": false}"#;
        let account: Account = serde_json::from_str(json).unwrap();

        assert_eq!(account.id, UserId::new(7));
        assert_eq!(account.email.as_str(), "user@example.com");
        assert!(!account.is_admin);
        assert!(account.password.is_none());
    }

    #[test]
    fn test_account_serializes_password_only_when_present() {
        let account = Account {
            id: UserId::new(1),
            email: Email::parse("user@example.com").unwrap(),
            password: None,
            is_admin: false,
        };
        let json = serde_json::to_value(&account).unwrap();
        assert!(json.get("password").is_none());
        assert_eq!(json["Id"], 1);
        assert_eq!(json["isAdmin"], false);
    }

    #[test]
    fn test_register_request_includes_admin_flag() {
        let request = CredentialsRequest {
            email: "user@example.com",
            password: "hunter22",
            is_admin: Some(false),
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["isAdmin"], false);

        let login = CredentialsRequest {
            email: "user@example.com",
            password: "hunter22",
            is_admin: None,
        };
        let json = serde_json::to_value(&login).unwrap();
        assert!(json.get("isAdmin").is_none());
    }
}
