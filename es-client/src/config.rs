//! Configuration types for the SearchClient.

use std::time::Duration;

/// Default address used when a config is built with `Default`.
pub const DEFAULT_ELASTICSEARCH_URL: &str = "http://localhost:9200";

/// Configuration for the SearchClient and its Elasticsearch connection.
///
/// The library never reads the environment; callers build this value themselves
/// (the `es-health` binary fills it from environment variables).
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Node addresses, e.g. `http://localhost:9200`.
    ///
    /// A single address uses a single-node connection pool, several addresses are
    /// used round-robin. Nodes are never discovered from the cluster.
    pub addresses: Vec<String>,

    /// Transport-wide timeout applied to every request.
    ///
    /// Per-call deadlines in `RequestOptions` are applied on top of this.
    pub request_timeout: Option<Duration>,

    /// Skip any system proxy configuration when connecting. Defaults to `true`.
    pub disable_proxy: bool,

    /// Maximum number of documents allowed in a single bulk flush.
    ///
    /// `None` (the default) leaves batch sizing entirely to the caller.
    pub max_batch_size: Option<usize>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            addresses: vec![DEFAULT_ELASTICSEARCH_URL.to_string()],
            request_timeout: None,
            disable_proxy: true,
            max_batch_size: None,
        }
    }
}

impl ClientConfig {
    /// Create a config for the given node addresses with default settings.
    pub fn new<I, S>(addresses: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            addresses: addresses.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// Set the transport-wide request timeout.
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    /// Reject bulk flushes larger than `max_batch_size` documents.
    pub fn with_max_batch_size(mut self, max_batch_size: usize) -> Self {
        self.max_batch_size = Some(max_batch_size);
        self
    }

    /// Remove any bulk flush size limit.
    pub fn unlimited(mut self) -> Self {
        self.max_batch_size = None;
        self
    }
}
