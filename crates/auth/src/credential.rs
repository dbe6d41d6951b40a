use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use wayfinder_core::UserId;

/// Snapshot of the authenticated user's identity, taken at login.
///
/// Field names follow the backend's camelCase wire form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSnapshot {
    pub user_id: UserId,
    pub username: String,
    #[serde(default)]
    pub nickname: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub avatar: Option<String>,
}

/// Access/refresh token pair as issued by the backend.
///
/// The expiry markers are opaque to this core: expiry is discovered
/// reactively via a rejected call, never by consulting a local clock.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
    #[serde(default)]
    pub expires_in: i64,
    #[serde(default)]
    pub refresh_expires_in: i64,
}

/// The session's credential pair plus the user identity it was issued for.
///
/// Created on successful login, replaced wholesale on successful refresh,
/// cleared on logout or unrecoverable refresh failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionCredential {
    #[serde(flatten)]
    pub tokens: TokenPair,
    pub user: UserSnapshot,
    pub issued_at: DateTime<Utc>,
}

impl SessionCredential {
    pub fn new(tokens: TokenPair, user: UserSnapshot) -> Self {
        Self {
            tokens,
            user,
            issued_at: Utc::now(),
        }
    }

    pub fn access_token(&self) -> &str {
        &self.tokens.access_token
    }

    pub fn refresh_token(&self) -> &str {
        &self.tokens.refresh_token
    }

    /// Replace the whole token pair after a successful refresh.
    pub fn replace_tokens(&mut self, tokens: TokenPair) {
        self.tokens = tokens;
        self.issued_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot() -> UserSnapshot {
        UserSnapshot {
            user_id: UserId::new(7),
            username: "alice".to_string(),
            nickname: "Alice".to_string(),
            email: None,
            avatar: None,
        }
    }

    fn pair(access: &str, refresh: &str) -> TokenPair {
        TokenPair {
            access_token: access.to_string(),
            refresh_token: refresh.to_string(),
            expires_in: 1800,
            refresh_expires_in: 604_800,
        }
    }

    #[test]
    fn replace_tokens_swaps_the_whole_pair() {
        let mut cred = SessionCredential::new(pair("a1", "r1"), snapshot());
        cred.replace_tokens(pair("a2", "r2"));
        assert_eq!(cred.access_token(), "a2");
        assert_eq!(cred.refresh_token(), "r2");
    }

    #[test]
    fn credential_deserializes_from_camel_case_wire_form() {
        let json = serde_json::json!({
            "accessToken": "a1",
            "refreshToken": "r1",
            "expiresIn": 1800,
            "refreshExpiresIn": 604800,
            "user": {"userId": 7, "username": "alice", "nickname": "Alice"},
            "issuedAt": "2026-01-05T10:00:00Z"
        });
        let cred: SessionCredential = serde_json::from_value(json).unwrap();
        assert_eq!(cred.access_token(), "a1");
        assert_eq!(cred.user.username, "alice");
    }
}
