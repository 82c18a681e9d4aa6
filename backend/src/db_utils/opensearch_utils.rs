use std::collections::BTreeMap;
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize, de::DeserializeOwned};
use url::Url;

use crate::api::search::query_dsl::CompiledQuery;
use crate::config::OpenSearchConfig;
use crate::error::{Result, SearchError};

#[derive(Debug, Serialize, Deserialize)]
pub struct RawSearchResult<T> {
    pub hits: RawSearchResultHits<T>,
    #[serde(default)]
    pub timed_out: bool,
    #[serde(default)]
    pub took: u64,
    pub aggregations: Option<BTreeMap<String, RawSearchResultAggregation>>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RawSearchResultHits<T> {
    pub hits: Vec<RawSearchResultHit<T>>,
    pub total: Option<RawSearchResultTotal>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct RawSearchResultTotal {
    pub value: u64,
    pub relation: String,
}

/// Range and terms aggregations carry `buckets`; missing aggregations only
/// `doc_count`.
#[derive(Debug, Serialize, Deserialize, Default, Clone)]
pub struct RawSearchResultAggregation {
    #[serde(default)]
    pub buckets: Vec<RawSearchResultAggregationBucket>,
    #[serde(default)]
    pub doc_count: Option<u64>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct RawSearchResultAggregationBucket {
    pub key: serde_json::Value,
    pub doc_count: u64,
    #[serde(default)]
    pub from: Option<f64>,
    #[serde(default)]
    pub to: Option<f64>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RawSearchResultHit<T> {
    pub _id: String,
    pub _source: T,
    /// Null when sorting by anything but the score.
    pub _score: Option<f64>,
}


/// Connection to one OpenSearch index.
///
/// Built once at startup; the inner HTTP client pools connections and is
/// cheap to clone.
#[derive(Debug, Clone)]
pub struct OpenSearchClient {
    http: reqwest::Client,
    search_url: Url,
    username: Option<String>,
    password: Option<String>,
}

impl OpenSearchClient {
    pub fn new(config: &OpenSearchConfig) -> Result<Self> {
        let base = format!("{}/", config.url.trim_end_matches('/'));
        let search_url = Url::parse(&base)
            .and_then(|base| base.join(&format!("{}/_search", config.index)))
            .map_err(|e| SearchError::Config(format!("invalid search backend url {:?}: {}", config.url, e)))?;

        let http = reqwest::Client::builder()
            .danger_accept_invalid_certs(config.accept_invalid_certs)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| SearchError::Config(format!("failed to build http client: {}", e)))?;

        Ok(Self {
            http,
            search_url,
            username: config.username.clone(),
            password: config.password.clone(),
        })
    }

    pub fn search_url(&self) -> &Url {
        &self.search_url
    }

    pub async fn search<T: DeserializeOwned + std::fmt::Debug>(&self, query: &CompiledQuery) -> Result<RawSearchResult<T>> {
        let t0 = Instant::now();
        let mut request = self.http.post(self.search_url.clone()).json(query);
        if let Some(username) = &self.username {
            request = request.basic_auth(username, self.password.as_ref());
        }

        let response = request.send().await.map_err(SearchError::BackendUnavailable)?;
        let status = response.status();
        let response_txt = response.text().await.map_err(SearchError::BackendUnavailable)?;
        if status.is_client_error() || status.is_server_error() {
            tracing::error!("Search backend returned {}: {}", status, response_txt);
            return Err(SearchError::BackendRejected { status: status.as_u16(), body: response_txt });
        }

        let dt_ms = t0.elapsed().as_millis() as u64;
        tracing::info!("SEARCH RESPONSE: len = {} (searched in {}ms)", response_txt.len(), dt_ms);
        let response: RawSearchResult<T> = serde_json::from_str(&response_txt)?;
        if response.timed_out {
            tracing::warn!("Search backend timed out after {}ms; results are partial", response.took);
        }
        Ok(response)
    }
}
