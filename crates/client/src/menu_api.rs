use std::sync::Arc;

use wayfinder_menu::RawMenuRecord;

use crate::client::ApiClient;
use crate::endpoints;
use crate::error::ApiError;
use crate::request::ApiRequest;

/// Typed binding for the per-user menu tree fetch.
pub struct MenuApi {
    client: Arc<ApiClient>,
}

impl MenuApi {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    /// Fetch the authorization-filtered menu tree for the current user.
    /// Any non-success result surfaces as a fetch failure to the caller.
    pub async fn fetch_user_menu_tree(&self) -> Result<Vec<RawMenuRecord>, ApiError> {
        let data = self
            .client
            .send(ApiRequest::get(endpoints::USER_MENU_TREE))
            .await?;
        serde_json::from_value(data).map_err(|err| ApiError::Decode(err.to_string()))
    }
}
