use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::warn;

use wayfinder_auth::{SessionCredential, TokenPair, UserSnapshot};

use crate::client::ApiClient;
use crate::endpoints;
use crate::error::ApiError;
use crate::request::ApiRequest;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GrantType {
    Password,
    Email,
}

/// Login call parameters. The client key/secret pair is appended by
/// [`AuthApi`] from the client's own configuration.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub grant_type: GrantType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

impl LoginRequest {
    pub fn password(username: &str, password: &str) -> Self {
        Self {
            grant_type: GrantType::Password,
            username: Some(username.to_string()),
            password: Some(password.to_string()),
            email: None,
            code: None,
        }
    }

    pub fn email(email: &str, code: &str) -> Self {
        Self {
            grant_type: GrantType::Email,
            username: None,
            password: None,
            email: Some(email.to_string()),
            code: Some(code.to_string()),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    #[serde(flatten)]
    pub tokens: TokenPair,
    pub user_info: UserSnapshot,
}

/// Typed bindings for the authentication endpoints.
pub struct AuthApi {
    client: Arc<ApiClient>,
}

impl AuthApi {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    /// Authenticate and install the issued credential into the session.
    ///
    /// The login call itself is never auto-retried on an expiry signal.
    pub async fn login(&self, request: LoginRequest) -> Result<UserSnapshot, ApiError> {
        let mut body =
            serde_json::to_value(&request).map_err(|err| ApiError::Decode(err.to_string()))?;
        let credentials = self.client.client_credentials();
        body["clientKey"] = serde_json::json!(credentials.client_key);
        body["clientSecret"] = serde_json::json!(credentials.client_secret);

        let data = self
            .client
            .send(
                ApiRequest::post(endpoints::LOGIN)
                    .with_body(body)
                    .without_auto_refresh(),
            )
            .await?;
        let response: LoginResponse =
            serde_json::from_value(data).map_err(|err| ApiError::Decode(err.to_string()))?;

        let user = response.user_info.clone();
        self.client
            .session()
            .install_credential(SessionCredential::new(response.tokens, response.user_info));
        Ok(user)
    }

    /// Log out: best-effort server call, then local state is cleared no
    /// matter what the server said.
    pub async fn logout(&self) {
        if let Err(err) = self.client.send(ApiRequest::post(endpoints::LOGOUT)).await {
            warn!(error = %err, "logout call failed; clearing local state anyway");
        }
        self.client.session().clear();
    }

    /// Fetch the current user's identity snapshot.
    pub async fn me(&self) -> Result<UserSnapshot, ApiError> {
        let data = self.client.send(ApiRequest::get(endpoints::ME)).await?;
        serde_json::from_value(data).map_err(|err| ApiError::Decode(err.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_request_serializes_camel_case() {
        let request = LoginRequest::password("alice", "secret");
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["grantType"], "password");
        assert_eq!(value["username"], "alice");
        assert!(value.get("email").is_none());
    }

    #[test]
    fn login_response_accepts_flat_wire_form() {
        let value = serde_json::json!({
            "accessToken": "a1",
            "refreshToken": "r1",
            "expiresIn": 1800,
            "refreshExpiresIn": 604800,
            "userInfo": {"userId": 7, "username": "alice", "nickname": "Alice"}
        });
        let response: LoginResponse = serde_json::from_value(value).unwrap();
        assert_eq!(response.tokens.access_token, "a1");
        assert_eq!(response.user_info.username, "alice");
    }
}
