use crate::error::{NamecheapError, NcResult};
use crate::query::QueryParam;
use crate::response::{parse_response, unwrap_envelope};
use reqwest::header::CONTENT_TYPE;
use reqwest::{Method, Url};
use serde_json::Value;

/// HTTP transport for the XML API.
///
/// Stateless between calls: no retries, no timeouts, no caching. Each
/// operation issues exactly one request and either resolves with the
/// unwrapped `commandResponse` payload or fails fatally.
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: reqwest::Client,
    base_url: Url,
}

impl HttpClient {
    pub fn new(base_url: &str) -> NcResult<Self> {
        let base_url = Url::parse(base_url)
            .map_err(|e| NamecheapError::Configuration(format!("invalid base url: {e}")))?;
        Ok(Self {
            client: reqwest::Client::new(),
            base_url,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Send one request and run the response through the normalization
    /// pipeline, returning the envelope's command payload.
    pub async fn send(&self, method: Method, params: &[QueryParam]) -> NcResult<Value> {
        let mut url = self.base_url.clone();
        {
            let mut query = url.query_pairs_mut();
            query.clear();
            for param in params {
                query.append_pair(&param.name, &param.value);
            }
        }

        let command = params
            .iter()
            .find(|p| p.name == "Command")
            .map(|p| p.value.as_str())
            .unwrap_or("unknown");
        tracing::debug!("Sending {} {} to {}", method, command, url.path());

        let response = self.client.request(method, url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(NamecheapError::Transport {
                status: status.as_u16(),
                message: response.text().await.unwrap_or_default(),
            });
        }

        let is_xml = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|v| v.contains("xml"))
            .unwrap_or(false);
        if !is_xml {
            return Err(NamecheapError::MalformedResponse(
                "invalid response type".to_string(),
            ));
        }

        let text = response.text().await?;
        unwrap_envelope(parse_response(&text)?)
    }
}
