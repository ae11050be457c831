//! Account records as the backend reports them.
//!
//! The accounts endpoints predate the backend's casing cleanup, so every
//! field accepts both camelCase and PascalCase spellings on the way in and
//! writes camelCase on the way out.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Last-known logged-in account. Loosely typed on purpose: the backend adds
/// fields to this record without versioning, and the UI only needs a handful
/// of them. Unrecognized fields are retained in `extra` so persistence
/// round-trips losslessly.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Account {
    #[serde(alias = "AccountId", skip_serializing_if = "Option::is_none")]
    pub account_id: Option<String>,
    #[serde(alias = "Username", skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(alias = "Email", skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(alias = "Role", skip_serializing_if = "Option::is_none")]
    pub role: Option<Value>,
    #[serde(alias = "Status", skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(alias = "FullName", skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(alias = "Phone", skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Result of a successful login: the committed credential pair plus the
/// account record the backend attached to it.
#[derive(Debug, Clone, PartialEq)]
pub struct LoginResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub account: Option<Account>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn account_accepts_both_casings() {
        let camel: Account =
            serde_json::from_value(json!({"accountId": "A-1", "username": "maria"})).unwrap();
        let pascal: Account =
            serde_json::from_value(json!({"AccountId": "A-1", "Username": "maria"})).unwrap();
        assert_eq!(camel.account_id.as_deref(), Some("A-1"));
        assert_eq!(camel.account_id, pascal.account_id);
        assert_eq!(camel.username, pascal.username);
    }

    #[test]
    fn unknown_fields_round_trip() {
        let account: Account = serde_json::from_value(json!({
            "username": "maria",
            "shift": "night"
        }))
        .unwrap();
        assert_eq!(account.extra.get("shift"), Some(&json!("night")));

        let back = serde_json::to_value(&account).unwrap();
        assert_eq!(back.get("shift"), Some(&json!("night")));
        assert_eq!(back.get("username"), Some(&json!("maria")));
    }

    #[test]
    fn numeric_role_is_accepted() {
        // Older backend builds report role as an enum ordinal.
        let account: Account = serde_json::from_value(json!({"role": 2})).unwrap();
        assert_eq!(account.role, Some(json!(2)));
    }
}
