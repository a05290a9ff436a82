//! User Identity Resolution
//!
//! When the widget mounts it tries to learn who the user is, so replies can
//! be personalised server-side. The auth context wins; otherwise the
//! `user_data` blob in session storage is consulted. Nothing here is fatal:
//! a broken blob is logged and the widget simply runs anonymously.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::storage::{SessionStorage, StorageError};

/// Storage key holding the serialized user record
pub const USER_DATA_KEY: &str = "user_data";

/// Identifier of the signed-in user
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    /// Wrap an identifier; blank input yields `None`
    pub fn new(raw: impl Into<String>) -> Option<Self> {
        let raw = raw.into();
        if raw.trim().is_empty() {
            None
        } else {
            Some(Self(raw))
        }
    }

    /// Borrow the raw identifier
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// What the authentication layer knows about the current user
#[derive(Clone, Debug, Default)]
pub struct AuthContext {
    /// Signed-in user's id, if any
    pub user_id: Option<UserId>,
}

impl AuthContext {
    /// Context for an anonymous visitor
    #[must_use]
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// Context for a signed-in user
    #[must_use]
    pub fn signed_in(user_id: UserId) -> Self {
        Self {
            user_id: Some(user_id),
        }
    }
}

/// Errors while reading the stored user record
#[derive(Debug, Error)]
pub enum IdentityError {
    /// Storage could not be read
    #[error("session storage: {0}")]
    Storage(#[from] StorageError),

    /// Stored record is not valid JSON
    #[error("malformed user data: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Resolve the user id for outbound requests
///
/// Prefers the auth context, then falls back to the `user_data` storage
/// blob. Failures are logged and reported as "no identifier".
pub async fn resolve_user_id(auth: &AuthContext, storage: &dyn SessionStorage) -> Option<UserId> {
    if let Some(ref id) = auth.user_id {
        tracing::debug!(user_id = %id, "User id from auth context");
        return Some(id.clone());
    }

    match read_stored_user_id(storage).await {
        Ok(Some(id)) => {
            tracing::debug!(user_id = %id, "User id from session storage");
            Some(id)
        }
        Ok(None) => None,
        Err(e) => {
            tracing::error!(error = %e, "Error parsing user data from session storage");
            None
        }
    }
}

/// Read and parse the stored user record
///
/// # Errors
///
/// Returns an error if storage fails or the blob is not JSON.
pub async fn read_stored_user_id(
    storage: &dyn SessionStorage,
) -> Result<Option<UserId>, IdentityError> {
    match storage.get_item(USER_DATA_KEY).await? {
        Some(blob) => parse_user_data(&blob),
        None => Ok(None),
    }
}

/// Extract `userId` from a user-data blob
///
/// Follows JavaScript truthiness: non-empty strings, non-zero numbers and
/// `true` are ids (numbers and booleans stringified); `0`, `false`, `null`
/// and empty strings are absent. Arrays and objects are ignored.
///
/// # Errors
///
/// Returns [`IdentityError::Parse`] if the blob is not valid JSON.
pub fn parse_user_data(blob: &str) -> Result<Option<UserId>, IdentityError> {
    let data: Value = serde_json::from_str(blob)?;
    let id = match data.get("userId") {
        Some(Value::String(s)) => UserId::new(s.clone()),
        Some(Value::Number(n)) if n.as_f64() == Some(0.0) => None,
        Some(Value::Number(n)) => UserId::new(n.to_string()),
        Some(Value::Bool(true)) => UserId::new("true"),
        Some(Value::Bool(false)) => None,
        Some(other) => {
            tracing::debug!(value = %other, "Ignoring non-scalar userId");
            None
        }
        None => None,
    };
    Ok(id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;

    fn user(id: &str) -> UserId {
        UserId::new(id).unwrap()
    }

    #[test]
    fn test_blank_user_id_is_none() {
        assert!(UserId::new("").is_none());
        assert!(UserId::new("   ").is_none());
        assert_eq!(user("abc").as_str(), "abc");
    }

    #[test]
    fn test_parse_string_id() {
        let id = parse_user_data(r#"{"userId":"u-42","name":"Asha"}"#).unwrap();
        assert_eq!(id, Some(user("u-42")));
    }

    #[test]
    fn test_parse_numeric_id_is_stringified() {
        let id = parse_user_data(r#"{"userId":1234}"#).unwrap();
        assert_eq!(id, Some(user("1234")));
    }

    #[test]
    fn test_parse_missing_or_odd_id() {
        assert_eq!(parse_user_data(r#"{"name":"Asha"}"#).unwrap(), None);
        assert_eq!(parse_user_data(r#"{"userId":null}"#).unwrap(), None);
        assert_eq!(parse_user_data(r#"{"userId":""}"#).unwrap(), None);
        assert_eq!(parse_user_data("[1,2,3]").unwrap(), None);
    }

    #[test]
    fn test_parse_falsy_and_boolean_ids() {
        assert_eq!(parse_user_data(r#"{"userId":0}"#).unwrap(), None);
        assert_eq!(parse_user_data(r#"{"userId":0.0}"#).unwrap(), None);
        assert_eq!(parse_user_data(r#"{"userId":false}"#).unwrap(), None);
        assert_eq!(
            parse_user_data(r#"{"userId":true}"#).unwrap(),
            Some(user("true"))
        );
        assert_eq!(parse_user_data(r#"{"userId":-3}"#).unwrap(), Some(user("-3")));
    }

    #[test]
    fn test_parse_malformed_blob() {
        let err = parse_user_data("{not json").unwrap_err();
        assert!(matches!(err, IdentityError::Parse(_)));
    }

    #[tokio::test]
    async fn test_auth_context_wins_over_storage() {
        let storage = MemoryStorage::new().with_item(USER_DATA_KEY, r#"{"userId":"stored"}"#);
        let auth = AuthContext::signed_in(user("from-auth"));
        assert_eq!(
            resolve_user_id(&auth, &storage).await,
            Some(user("from-auth"))
        );
    }

    #[tokio::test]
    async fn test_storage_fallback() {
        let storage = MemoryStorage::new().with_item(USER_DATA_KEY, r#"{"userId":77}"#);
        assert_eq!(
            resolve_user_id(&AuthContext::anonymous(), &storage).await,
            Some(user("77"))
        );
    }

    #[tokio::test]
    async fn test_malformed_storage_is_non_fatal() {
        let storage = MemoryStorage::new().with_item(USER_DATA_KEY, "garbage");
        assert_eq!(resolve_user_id(&AuthContext::anonymous(), &storage).await, None);
    }

    #[tokio::test]
    async fn test_nothing_anywhere() {
        let storage = MemoryStorage::new();
        assert_eq!(resolve_user_id(&AuthContext::anonymous(), &storage).await, None);
    }
}
