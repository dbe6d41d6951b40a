use thiserror::Error;

/// Uniform error surface of the request layer.
///
/// Credential handling happens centrally in [`crate::ApiClient`]; call
/// sites never see the raw expiry signal, only `MustReauthenticate` once
/// recovery has failed.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// The session is gone: no refresh credential, or the refresh was
    /// rejected. All session state has been cleared; the caller must route
    /// the user back to the authentication entry point.
    #[error("session expired; re-authentication required")]
    MustReauthenticate,

    /// Transient transport failure. Session state is deliberately retained.
    #[error("network unavailable: {0}")]
    Network(String),

    /// The backend rejected the call for a non-credential reason.
    #[error("api error ({code}): {message}")]
    Api { code: u16, message: String },

    /// The response arrived but did not match the expected shape.
    #[error("malformed response payload: {0}")]
    Decode(String),
}
