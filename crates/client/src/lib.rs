//! `wayfinder-client` — the credential-aware request layer.
//!
//! Every outgoing call flows through [`ApiClient::send`], which attaches the
//! session's access token, watches for expiry signals, refreshes the
//! credential pair, and replays the triggering call. Callers see a resolved
//! response or a uniform "must re-authenticate" signal, never a raw 401.

pub mod auth_api;
pub mod client;
pub mod endpoints;
pub mod error;
pub mod menu_api;
pub mod request;
pub mod transport;

#[cfg(feature = "http")]
pub mod http;

pub use auth_api::{AuthApi, GrantType, LoginRequest, LoginResponse};
pub use client::{ApiClient, ClientCredentials};
pub use error::ApiError;
pub use menu_api::MenuApi;
pub use request::{ApiRequest, Method};
pub use transport::{RawResponse, Transport, TransportError};

#[cfg(feature = "http")]
pub use http::HttpTransport;
