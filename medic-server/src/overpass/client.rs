//! Overpass HTTP client with sequential endpoint fallback.
//!
//! Public Overpass instances are interchangeable mirrors with no SLA. A
//! query is tried against each endpoint in order, one at a time, and the
//! first well-formed response wins.

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};

use crate::domain::Facility;

use super::convert::convert_response;
use super::error::OverpassError;
use super::query::FacilityQuery;
use super::types::OverpassResponse;

/// Public Overpass interpreters, in fallback order.
pub const DEFAULT_ENDPOINTS: [&str; 3] = [
    "https://overpass-api.de/api/interpreter",
    "https://overpass.kumi.systems/api/interpreter",
    "https://overpass.nchc.org.tw/api/interpreter",
];

/// Default per-request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default `User-Agent` header value.
pub const DEFAULT_USER_AGENT: &str = concat!("medic-server/", env!("CARGO_PKG_VERSION"));

/// Configuration for the Overpass client.
#[derive(Debug, Clone)]
pub struct OverpassConfig {
    /// Interpreter URLs, tried in order
    pub endpoints: Vec<String>,
    /// Request timeout in seconds, per endpoint attempt
    pub timeout_secs: u64,
    /// `User-Agent` sent with every request
    pub user_agent: String,
}

impl OverpassConfig {
    /// Create a config using the public endpoints.
    pub fn new() -> Self {
        Self {
            endpoints: DEFAULT_ENDPOINTS.iter().map(|s| s.to_string()).collect(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }

    /// Replace the endpoint list (for testing or private mirrors).
    pub fn with_endpoints<I, S>(mut self, endpoints: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.endpoints = endpoints.into_iter().map(Into::into).collect();
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}

impl Default for OverpassConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Facilities returned by one successful endpoint.
#[derive(Debug, Clone)]
pub struct FacilityBatch {
    /// Converted facilities, in response order.
    pub facilities: Vec<Facility>,
    /// Endpoint that answered.
    pub endpoint: String,
    /// Server remark, e.g. a runtime timeout that truncated the result.
    pub remark: Option<String>,
}

/// Overpass API client.
#[derive(Debug, Clone)]
pub struct OverpassClient {
    http: reqwest::Client,
    endpoints: Vec<String>,
}

impl OverpassClient {
    /// Create a new client with the given configuration.
    pub fn new(config: OverpassConfig) -> Result<Self, OverpassError> {
        let mut headers = HeaderMap::new();

        let user_agent =
            HeaderValue::from_str(&config.user_agent).map_err(|_| OverpassError::Api {
                status: 0,
                message: "Invalid User-Agent format".to_string(),
            })?;
        headers.insert(USER_AGENT, user_agent);

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            endpoints: config.endpoints,
        })
    }

    pub fn endpoints(&self) -> &[String] {
        &self.endpoints
    }

    /// Run a facility query, falling back through the endpoint list.
    ///
    /// Endpoints are attempted strictly one after another. A successful
    /// response with no elements is still a success.
    pub async fn find_facilities(
        &self,
        query: &FacilityQuery,
    ) -> Result<FacilityBatch, OverpassError> {
        let ql = query.to_overpass_ql();

        for endpoint in &self.endpoints {
            match self.query_endpoint(endpoint, &ql).await {
                Ok(response) => {
                    if let Some(remark) = &response.remark {
                        tracing::warn!(
                            endpoint = %endpoint,
                            remark = %remark,
                            "Overpass returned a remark"
                        );
                    }
                    let facilities = convert_response(&response);
                    tracing::info!(
                        endpoint = %endpoint,
                        elements = response.elements.len(),
                        facilities = facilities.len(),
                        "Overpass query succeeded"
                    );
                    return Ok(FacilityBatch {
                        facilities,
                        endpoint: endpoint.clone(),
                        remark: response.remark,
                    });
                }
                Err(e) => {
                    tracing::warn!(endpoint = %endpoint, error = %e, "Overpass endpoint failed");
                }
            }
        }

        Err(OverpassError::AllEndpointsFailed {
            attempted: self.endpoints.len(),
        })
    }

    /// Send raw Overpass QL to a single endpoint.
    pub async fn query_endpoint(
        &self,
        endpoint: &str,
        ql: &str,
    ) -> Result<OverpassResponse, OverpassError> {
        let response = self.http.get(endpoint).query(&[("data", ql)]).send().await?;

        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(OverpassError::Api {
                status: status.as_u16(),
                message: body.chars().take(200).collect(),
            });
        }

        let body = response.text().await?;

        serde_json::from_str(&body).map_err(|e| OverpassError::Json {
            message: e.to_string(),
        })
    }
}
