//! Search backend configuration.

use serde::{Deserialize, Serialize};

use common::search_const::DEFAULT_INDEX;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpenSearchConfig {
    /// Base URL of the cluster, e.g. `https://localhost:9200`.
    pub url: String,

    #[serde(default = "default_index")]
    pub index: String,

    /// Basic auth user; no auth header is sent when unset.
    #[serde(default)]
    pub username: Option<String>,

    #[serde(default)]
    pub password: Option<String>,

    /// Local clusters run with self-signed certificates.
    #[serde(default = "default_accept_invalid_certs")]
    pub accept_invalid_certs: bool,

    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl Default for OpenSearchConfig {
    fn default() -> Self {
        Self {
            url: "https://localhost:9200".to_string(),
            index: default_index(),
            username: None,
            password: None,
            accept_invalid_certs: default_accept_invalid_certs(),
            timeout_secs: default_timeout(),
        }
    }
}

fn default_index() -> String {
    DEFAULT_INDEX.to_string()
}

fn default_accept_invalid_certs() -> bool {
    true
}

fn default_timeout() -> u64 {
    30
}
