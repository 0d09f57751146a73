use async_trait::async_trait;
use reqwest::Url;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, error, info, trace};

use super::error::{ReportError, Result};

/// A source of report payloads.
///
/// One call is one attempt: implementations do not retry and do not impose a
/// timeout, so the operator re-triggers a load by hand.
#[async_trait]
pub trait ReportFetcher: Send + Sync {
    /// Perform one GET against `endpoint` and return the parsed JSON body.
    async fn fetch_json(&self, endpoint: &str, params: &[(&'static str, String)]) -> Result<Value>;

    /// Whether the report API answers its health check.
    async fn is_reachable(&self) -> bool;
}

/// Fetch `endpoint` and decode the body into its typed payload.
pub async fn fetch<T>(
    fetcher: &dyn ReportFetcher,
    endpoint: &str,
    params: &[(&'static str, String)],
) -> Result<T>
where
    T: DeserializeOwned,
{
    let value = fetcher.fetch_json(endpoint, params).await?;
    serde_json::from_value(value).map_err(|e| {
        let error = ReportError::Parse(format!("{}: {}", endpoint, e));
        error!(%endpoint, %error, "Payload does not match the expected shape");
        error
    })
}

/// [`ReportFetcher`] talking to the report API over HTTP.
#[derive(Debug, Clone)]
pub struct HttpReportClient {
    client: reqwest::Client,
    base_url: String,
}

impl HttpReportClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            client: reqwest::Client::new(),
            base_url,
        }
    }

    /// Full request URL with percent-encoded query parameters.
    pub fn endpoint_url(&self, endpoint: &str, params: &[(&'static str, String)]) -> Result<Url> {
        let mut url = Url::parse(&format!("{}{}", self.base_url, endpoint))
            .map_err(|e| ReportError::Request(format!("Invalid URL for {}: {}", endpoint, e)))?;
        if !params.is_empty() {
            url.query_pairs_mut()
                .extend_pairs(params.iter().map(|(k, v)| (*k, v.as_str())));
        }
        Ok(url)
    }
}

#[async_trait]
impl ReportFetcher for HttpReportClient {
    async fn fetch_json(&self, endpoint: &str, params: &[(&'static str, String)]) -> Result<Value> {
        let url = self.endpoint_url(endpoint, params)?;
        debug!("GET request to: {}", url);

        let response = self.client.get(url).send().await.map_err(|e| {
            let error = ReportError::from(e);
            error!("GET {} - {}", endpoint, error);
            error
        })?;

        let status = response.status();
        if !status.is_success() {
            // Read the whole body first, it usually carries the server's diagnostic
            let body = response.text().await.map_err(|e| {
                let error = ReportError::from(e);
                error!("GET {} - failed to read error body: {}", endpoint, error);
                error
            })?;
            let error = ReportError::Transport {
                status: status.as_u16(),
                status_text: status.canonical_reason().unwrap_or_default().to_string(),
                body,
            };
            error!("GET {} - {}", endpoint, error);
            return Err(error);
        }

        trace!("GET {} - Response received, parsing JSON", endpoint);
        let bytes = response.bytes().await?;
        let value = serde_json::from_slice::<Value>(&bytes).map_err(|e| {
            let error = ReportError::Parse(format!("{}: {}", endpoint, e));
            error!("GET {} - {}", endpoint, error);
            error
        })?;

        info!("GET {} - Success", endpoint);
        Ok(value)
    }

    async fn is_reachable(&self) -> bool {
        match self.endpoint_url("/health", &[]) {
            Ok(url) => match self.client.get(url).send().await {
                Ok(response) => response.status().is_success(),
                Err(e) => {
                    debug!("Report API health check failed: {}", e);
                    false
                }
            },
            Err(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::test_utils::{StubUpstream, closed_port_url};
    use axum::http::StatusCode;
    use common::WeeklySummary;

    #[test]
    fn test_endpoint_url_percent_encodes_params() {
        let client = HttpReportClient::new("http://reports.local:8000/");
        let url = client
            .endpoint_url(
                "/reports/weekly-summary",
                &[("start_date", "2024-01-01".to_string()), ("end_date", "2024 01&07".to_string())],
            )
            .unwrap();

        assert_eq!(
            url.as_str(),
            "http://reports.local:8000/reports/weekly-summary?start_date=2024-01-01&end_date=2024+01%2607"
        );
    }

    #[test]
    fn test_endpoint_url_keeps_base_path() {
        let client = HttpReportClient::new("http://reports.local/api");
        let url = client.endpoint_url("/reports/top-products", &[]).unwrap();
        assert_eq!(url.as_str(), "http://reports.local/api/reports/top-products");
    }

    #[tokio::test]
    async fn test_fetch_decodes_payload() {
        let upstream = StubUpstream::healthy().spawn().await;
        let client = HttpReportClient::new(upstream.base_url());

        let summary: WeeklySummary = fetch(
            &client,
            "/reports/weekly-summary",
            &[("start_date", "2024-01-01".to_string()), ("end_date", "2024-01-07".to_string())],
        )
        .await
        .unwrap();

        assert_eq!(summary.start_date, "2024-01-01");
        assert_eq!(summary.line_count, 18);
    }

    #[tokio::test]
    async fn test_non_success_status_becomes_transport_error_with_body() {
        let upstream = StubUpstream::healthy()
            .fail("/reports/seller-ranking", StatusCode::INTERNAL_SERVER_ERROR)
            .spawn()
            .await;
        let client = HttpReportClient::new(upstream.base_url());

        let error = client.fetch_json("/reports/seller-ranking", &[]).await.unwrap_err();

        assert_eq!(
            error,
            ReportError::Transport {
                status: 500,
                status_text: "Internal Server Error".to_string(),
                body: "stub failure for /reports/seller-ranking".to_string(),
            }
        );
        assert_eq!(
            error.display_message(),
            "500 Internal Server Error: stub failure for /reports/seller-ranking"
        );
    }

    #[tokio::test]
    async fn test_invalid_json_body_becomes_parse_error() {
        let upstream = StubUpstream::healthy()
            .malformed("/reports/top-products")
            .spawn()
            .await;
        let client = HttpReportClient::new(upstream.base_url());

        let error = client.fetch_json("/reports/top-products", &[]).await.unwrap_err();
        assert!(matches!(error, ReportError::Parse(_)), "got {error:?}");
    }

    #[tokio::test]
    async fn test_unreachable_api_is_request_error() {
        let client = HttpReportClient::new(closed_port_url().await);

        let error = client.fetch_json("/reports/weekly-summary", &[]).await.unwrap_err();
        assert!(matches!(error, ReportError::Request(_)), "got {error:?}");
        assert!(!client.is_reachable().await);
    }

    #[tokio::test]
    async fn test_health_check_against_stub() {
        let upstream = StubUpstream::healthy().spawn().await;
        let client = HttpReportClient::new(upstream.base_url());
        assert!(client.is_reachable().await);
    }
}
