use std::sync::Arc;

use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, info, warn};

use wayfinder_auth::TokenPair;
use wayfinder_session::Session;

use crate::endpoints;
use crate::error::ApiError;
use crate::request::ApiRequest;
use crate::transport::{RawResponse, Transport};

/// Envelope every backend response is wrapped in.
#[derive(Debug, Deserialize)]
struct Envelope {
    code: u16,
    #[serde(default)]
    message: String,
    #[serde(default)]
    data: Value,
}

const CODE_SUCCESS: u16 = 200;
const CODE_EXPIRED: u16 = 401;

/// Client identity presented to the token endpoint on refresh.
#[derive(Debug, Clone)]
pub struct ClientCredentials {
    pub client_key: String,
    pub client_secret: String,
}

/// The credential lifecycle manager.
///
/// Owns the one path every outgoing call takes: attach the access token,
/// interpret the envelope, and on an expiry signal drive the refresh cycle
/// before replaying the triggering call exactly once.
///
/// Refresh is single-flight: the first expired call performs the refresh
/// while concurrent expired calls wait on the gate and then replay with the
/// credential the winner installed, instead of racing refreshes of their
/// own.
pub struct ApiClient {
    transport: Arc<dyn Transport>,
    session: Arc<Session>,
    credentials: ClientCredentials,
    refresh_gate: tokio::sync::Mutex<()>,
}

enum CallOutcome {
    Success(Value),
    Expired,
    Failed { code: u16, message: String },
}

impl ApiClient {
    pub fn new(
        transport: Arc<dyn Transport>,
        session: Arc<Session>,
        credentials: ClientCredentials,
    ) -> Self {
        Self {
            transport,
            session,
            credentials,
            refresh_gate: tokio::sync::Mutex::new(()),
        }
    }

    pub fn session(&self) -> &Arc<Session> {
        &self.session
    }

    pub(crate) fn client_credentials(&self) -> &ClientCredentials {
        &self.credentials
    }

    /// Send a call with the current access token attached.
    ///
    /// Returns the envelope's data on success. An expiry signal triggers
    /// the re-authentication cycle unless the request opted out (login and
    /// refresh are never auto-retried).
    pub async fn send(&self, request: ApiRequest) -> Result<Value, ApiError> {
        let token = self.session.access_token();
        let generation = self.session.credential_generation();

        match self.execute_once(&request, token.as_deref()).await? {
            CallOutcome::Success(data) => Ok(data),
            CallOutcome::Failed { code, message } => Err(ApiError::Api { code, message }),
            CallOutcome::Expired if !request.auto_refresh => Err(ApiError::Api {
                code: CODE_EXPIRED,
                message: "unauthorized".to_string(),
            }),
            CallOutcome::Expired => self.reauthenticate_and_replay(request, generation).await,
        }
    }

    async fn execute_once(
        &self,
        request: &ApiRequest,
        bearer: Option<&str>,
    ) -> Result<CallOutcome, ApiError> {
        debug!(
            id = %request.id,
            method = request.method.as_str(),
            path = %request.path,
            "dispatching api call"
        );
        let raw = self
            .transport
            .execute(request, bearer)
            .await
            .map_err(|err| ApiError::Network(err.to_string()))?;
        parse_outcome(raw)
    }

    /// The refresh cycle of a single expired call.
    ///
    /// `seen_generation` is the credential generation the call went out
    /// with; if it moved while we waited for the gate, another call already
    /// refreshed and we only replay.
    async fn reauthenticate_and_replay(
        &self,
        request: ApiRequest,
        seen_generation: u64,
    ) -> Result<Value, ApiError> {
        {
            let _gate = self.refresh_gate.lock().await;
            if self.session.credential_generation() == seen_generation {
                self.refresh_credential().await?;
            } else {
                debug!(id = %request.id, "credential already refreshed by a concurrent call");
            }
        }

        let token = self
            .session
            .access_token()
            .ok_or(ApiError::MustReauthenticate)?;

        // Credential replacement strictly precedes this resubmission, and
        // the call is resubmitted exactly once.
        match self.execute_once(&request, Some(&token)).await? {
            CallOutcome::Success(data) => Ok(data),
            CallOutcome::Failed { code, message } => Err(ApiError::Api { code, message }),
            CallOutcome::Expired => {
                warn!(id = %request.id, "replayed call rejected again; clearing session");
                self.session.clear();
                Err(ApiError::MustReauthenticate)
            }
        }
    }

    async fn refresh_credential(&self) -> Result<(), ApiError> {
        let Some(refresh_token) = self.session.refresh_token().filter(|t| !t.is_empty()) else {
            warn!("expiry signal without a refresh credential; clearing session");
            self.session.clear();
            return Err(ApiError::MustReauthenticate);
        };

        let request = ApiRequest::post(endpoints::REFRESH)
            .with_body(serde_json::json!({
                "refreshToken": refresh_token,
                "clientKey": self.credentials.client_key,
                "clientSecret": self.credentials.client_secret,
            }))
            .without_auto_refresh();

        // A transport outage during refresh is transient: surface it
        // without clearing the session.
        let token = self.session.access_token();
        let raw = self
            .transport
            .execute(&request, token.as_deref())
            .await
            .map_err(|err| ApiError::Network(err.to_string()))?;

        match parse_outcome(raw)? {
            CallOutcome::Success(data) => {
                let pair: TokenPair = serde_json::from_value(data)
                    .map_err(|err| ApiError::Decode(err.to_string()))?;
                if !self.session.replace_tokens(pair) {
                    return Err(ApiError::MustReauthenticate);
                }
                info!("credential pair refreshed");
                Ok(())
            }
            CallOutcome::Expired | CallOutcome::Failed { .. } => {
                warn!("credential refresh rejected; clearing session");
                self.session.clear();
                Err(ApiError::MustReauthenticate)
            }
        }
    }
}

fn parse_outcome(raw: RawResponse) -> Result<CallOutcome, ApiError> {
    if raw.status == CODE_EXPIRED {
        return Ok(CallOutcome::Expired);
    }
    let status = raw.status;
    let envelope: Envelope = serde_json::from_value(raw.body).map_err(|err| {
        if (200..300).contains(&status) {
            ApiError::Decode(err.to_string())
        } else {
            ApiError::Api {
                code: status,
                message: "unexpected response".to_string(),
            }
        }
    })?;
    match envelope.code {
        CODE_SUCCESS => Ok(CallOutcome::Success(envelope.data)),
        CODE_EXPIRED => Ok(CallOutcome::Expired),
        code => Ok(CallOutcome::Failed {
            code,
            message: envelope.message,
        }),
    }
}
