use serde_json::Value;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        }
    }
}

/// One outgoing backend call.
///
/// `auto_refresh` controls whether an expiry signal on this call triggers
/// the re-authentication cycle. The login and refresh calls disable it so
/// their own rejections can never loop back into another refresh.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    /// Correlation id for log lines; not sent over the wire.
    pub id: Uuid,
    pub method: Method,
    pub path: String,
    pub body: Option<Value>,
    pub auto_refresh: bool,
}

impl ApiRequest {
    fn new(method: Method, path: &str) -> Self {
        Self {
            id: Uuid::now_v7(),
            method,
            path: path.to_string(),
            body: None,
            auto_refresh: true,
        }
    }

    pub fn get(path: &str) -> Self {
        Self::new(Method::Get, path)
    }

    pub fn post(path: &str) -> Self {
        Self::new(Method::Post, path)
    }

    pub fn put(path: &str) -> Self {
        Self::new(Method::Put, path)
    }

    pub fn delete(path: &str) -> Self {
        Self::new(Method::Delete, path)
    }

    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    pub fn without_auto_refresh(mut self) -> Self {
        self.auto_refresh = false;
        self
    }
}
