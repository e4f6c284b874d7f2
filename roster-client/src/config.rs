//! Client configuration

/// Which backend the directory reads from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SourceKind {
    /// Public demo users endpoint, directory fields derived client-side
    #[default]
    Demo,
    /// GraphQL directory service with login-gated mutations
    GraphQl,
}

/// Configuration for connecting to the directory backends
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// GraphQL endpoint (e.g. "http://localhost:4000/graphql")
    pub api_url: String,

    /// Demo users endpoint returning a JSON array of user-shaped objects
    pub demo_url: String,

    /// Active data source
    pub source: SourceKind,

    /// Bearer token attached to GraphQL requests
    pub token: Option<String>,

    /// Request timeout in seconds
    pub timeout: u64,
}

impl ClientConfig {
    /// Create a new configuration with the demo source active
    pub fn new(api_url: impl Into<String>, demo_url: impl Into<String>) -> Self {
        Self {
            api_url: api_url.into(),
            demo_url: demo_url.into(),
            source: SourceKind::Demo,
            token: None,
            timeout: 30,
        }
    }

    /// Select the active data source
    pub fn with_source(mut self, source: SourceKind) -> Self {
        self.source = source;
        self
    }

    /// Set the bearer token
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout = seconds;
        self
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(
            "http://localhost:4000/graphql",
            "https://jsonplaceholder.typicode.com/users",
        )
    }
}
