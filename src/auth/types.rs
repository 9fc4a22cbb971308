//! Auth header type

use reqwest::RequestBuilder;

/// A single header carrying the access token (e.g., `app-id: <token>`)
#[derive(Clone, PartialEq, Eq)]
pub struct AuthHeader {
    /// Header name
    pub name: String,
    /// Header value (the token)
    pub value: String,
}

impl AuthHeader {
    /// Create a new auth header
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }

    /// Attach the header to a request
    pub fn apply(&self, req: RequestBuilder) -> RequestBuilder {
        req.header(self.name.as_str(), self.value.as_str())
    }
}

impl std::fmt::Debug for AuthHeader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthHeader")
            .field("name", &self.name)
            .field("value", &"<redacted>")
            .finish()
    }
}
