#[cfg(test)]
pub mod test_utils {
    use crate::config::initialize_app_state_with_fetcher;
    use crate::report::error::{ReportError, Result};
    use crate::report::orchestrator::endpoints;
    use crate::report::ReportFetcher;
    use crate::router::create_router;
    use crate::schemas::AppState;
    use async_trait::async_trait;
    use axum::extract::State;
    use axum::http::{StatusCode, Uri};
    use axum::response::{IntoResponse, Response};
    use axum::{Json, Router};
    use serde_json::{json, Value};
    use std::collections::{HashMap, HashSet};
    use std::sync::{Arc, Mutex};
    use std::time::Duration;
    use tokio::net::TcpListener;
    use tokio::task::JoinHandle;
    use tracing::Level;
    use tracing_subscriber::FmtSubscriber;

    /// Well-formed payloads for every report endpoint, with zero quality issues.
    pub fn sample_payloads() -> HashMap<String, Value> {
        let mut payloads = HashMap::new();
        payloads.insert(
            endpoints::WEEKLY_SUMMARY.to_string(),
            json!({
                "start_date": "2024-01-01",
                "end_date": "2024-01-07",
                "revenue": 1520.75,
                "units": "31.00",
                "line_count": 18
            }),
        );
        payloads.insert(
            endpoints::SELLER_RANKING.to_string(),
            json!({
                "sellers": [
                    { "seller_name": "Ana", "revenue": 900.5, "units": 20, "line_count": 10 },
                    { "seller_name": "Bruno", "revenue": 620.25, "units": 11, "line_count": 8 }
                ]
            }),
        );
        payloads.insert(
            endpoints::TOP_PRODUCTS.to_string(),
            json!({
                "top_products": [
                    { "product_code": "P-100", "revenue": 400.5, "units": 7 },
                    { "product_code": "P-200", "revenue": 300, "units": 5 }
                ]
            }),
        );
        payloads.insert(
            endpoints::SHIPPING_BREAKDOWN.to_string(),
            json!({
                "shipping_companies": [
                    { "shipping_company": "FastShip", "revenue": 1000, "line_count": 12 },
                    { "shipping_company": "UNKNOWN", "revenue": 520.75, "line_count": 6 }
                ]
            }),
        );
        payloads.insert(
            endpoints::DATA_QUALITY.to_string(),
            json!({
                "status": "ok",
                "summary": {
                    "rows_in_range": 18,
                    "mismatched_total_count": 0,
                    "nonpositive_units_count": 0,
                    "negative_amount_count": 0,
                    "missing_shipping_company_count": 0
                },
                "samples": [],
                "notes": []
            }),
        );
        payloads.insert(
            endpoints::DATA_QUALITY_SAMPLES.to_string(),
            json!({ "samples": [] }),
        );
        payloads.insert("/health".to_string(), json!({ "status": "ok" }));
        payloads
    }

    /// In-memory [`ReportFetcher`] that records every call.
    #[derive(Debug, Default)]
    pub struct FakeFetcher {
        payloads: HashMap<String, Value>,
        failures: HashMap<String, u16>,
        malformed: HashSet<String>,
        delays: HashMap<String, Duration>,
        calls: Mutex<Vec<(String, Vec<(&'static str, String)>)>>,
    }

    impl FakeFetcher {
        pub fn healthy() -> Self {
            Self {
                payloads: sample_payloads(),
                ..Default::default()
            }
        }

        /// Answer `endpoint` with a non-success `status`.
        pub fn fail(mut self, endpoint: &str, status: u16) -> Self {
            self.failures.insert(endpoint.to_string(), status);
            self
        }

        /// Answer `endpoint` with a body that is not JSON.
        pub fn malformed(mut self, endpoint: &str) -> Self {
            self.malformed.insert(endpoint.to_string());
            self
        }

        /// Hold the answer for `endpoint` back by `delay`.
        pub fn delay(mut self, endpoint: &str, delay: Duration) -> Self {
            self.delays.insert(endpoint.to_string(), delay);
            self
        }

        pub fn respond(mut self, endpoint: &str, payload: Value) -> Self {
            self.payloads.insert(endpoint.to_string(), payload);
            self
        }

        pub fn calls(&self) -> Vec<(String, Vec<(&'static str, String)>)> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl ReportFetcher for FakeFetcher {
        async fn fetch_json(&self, endpoint: &str, params: &[(&'static str, String)]) -> Result<Value> {
            self.calls
                .lock()
                .unwrap()
                .push((endpoint.to_string(), params.to_vec()));

            if let Some(delay) = self.delays.get(endpoint) {
                tokio::time::sleep(*delay).await;
            }

            if let Some(status) = self.failures.get(endpoint) {
                let status_text = StatusCode::from_u16(*status)
                    .ok()
                    .and_then(|s| s.canonical_reason())
                    .unwrap_or_default();
                return Err(ReportError::Transport {
                    status: *status,
                    status_text: status_text.to_string(),
                    body: format!("fake failure for {}", endpoint),
                });
            }
            if self.malformed.contains(endpoint) {
                return Err(ReportError::Parse(format!("{}: expected value at line 1 column 1", endpoint)));
            }
            self.payloads
                .get(endpoint)
                .cloned()
                .ok_or_else(|| ReportError::Transport {
                    status: 404,
                    status_text: "Not Found".to_string(),
                    body: String::new(),
                })
        }

        async fn is_reachable(&self) -> bool {
            !self.failures.contains_key("/health")
        }
    }

    /// Report API stand-in served over real HTTP.
    #[derive(Debug, Clone, Default)]
    pub struct StubUpstream {
        payloads: HashMap<String, Value>,
        failures: HashMap<String, StatusCode>,
        malformed: HashSet<String>,
    }

    #[derive(Debug, Default)]
    struct StubState {
        upstream: StubUpstream,
        queries: Mutex<Vec<(String, String)>>,
    }

    /// A spawned [`StubUpstream`]; the server stops when this is dropped.
    pub struct RunningStub {
        base_url: String,
        state: Arc<StubState>,
        handle: JoinHandle<()>,
    }

    impl StubUpstream {
        pub fn healthy() -> Self {
            Self {
                payloads: sample_payloads(),
                ..Default::default()
            }
        }

        /// Answer `path` with `status` and a plain-text body.
        pub fn fail(mut self, path: &str, status: StatusCode) -> Self {
            self.failures.insert(path.to_string(), status);
            self
        }

        /// Answer `path` with 200 and a body that is not JSON.
        pub fn malformed(mut self, path: &str) -> Self {
            self.malformed.insert(path.to_string());
            self
        }

        pub async fn spawn(self) -> RunningStub {
            let state = Arc::new(StubState {
                upstream: self,
                queries: Mutex::new(Vec::new()),
            });
            let app = Router::new()
                .fallback(stub_handler)
                .with_state(state.clone());

            let listener = TcpListener::bind("127.0.0.1:0")
                .await
                .expect("Failed to bind stub upstream");
            let address = listener.local_addr().expect("Stub upstream has no address");
            let handle = tokio::spawn(async move {
                axum::serve(listener, app).await.expect("Stub upstream failed");
            });

            RunningStub {
                base_url: format!("http://{}", address),
                state,
                handle,
            }
        }
    }

    impl RunningStub {
        pub fn base_url(&self) -> &str {
            &self.base_url
        }

        /// Raw query string of the last request to `path`.
        pub fn query_for(&self, path: &str) -> Option<String> {
            self.state
                .queries
                .lock()
                .unwrap()
                .iter()
                .rev()
                .find(|(p, _)| p == path)
                .map(|(_, q)| q.clone())
        }
    }

    impl Drop for RunningStub {
        fn drop(&mut self) {
            self.handle.abort();
        }
    }

    async fn stub_handler(State(state): State<Arc<StubState>>, uri: Uri) -> Response {
        let path = uri.path().to_string();
        state
            .queries
            .lock()
            .unwrap()
            .push((path.clone(), uri.query().unwrap_or_default().to_string()));

        let upstream = &state.upstream;
        if let Some(status) = upstream.failures.get(&path) {
            return (*status, format!("stub failure for {}", path)).into_response();
        }
        if upstream.malformed.contains(&path) {
            return (StatusCode::OK, "<html>not json</html>").into_response();
        }
        match upstream.payloads.get(&path) {
            Some(payload) => Json(payload.clone()).into_response(),
            None => StatusCode::NOT_FOUND.into_response(),
        }
    }

    /// Base URL on which nothing is listening.
    pub async fn closed_port_url() -> String {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind probe listener");
        let address = listener.local_addr().expect("Probe listener has no address");
        drop(listener);
        format!("http://{}", address)
    }

    /// Initialize tracing for tests with output to STDERR.
    ///
    /// The log level is determined by the RUST_LOG environment variable,
    /// defaulting to WARN if not set.
    ///
    /// # Returns
    ///
    /// A guard that will clean up the subscriber when dropped.
    pub fn init_test_tracing() -> tracing::subscriber::DefaultGuard {
        let log_level = std::env::var("RUST_LOG")
            .ok()
            .and_then(|level| match level.to_uppercase().as_str() {
                "ERROR" => Some(Level::ERROR),
                "WARN" => Some(Level::WARN),
                "INFO" => Some(Level::INFO),
                "DEBUG" => Some(Level::DEBUG),
                "TRACE" => Some(Level::TRACE),
                _ => None,
            })
            .unwrap_or(Level::WARN);

        let subscriber = FmtSubscriber::builder()
            .with_max_level(log_level)
            .with_writer(std::io::stderr)
            .finish();
        tracing::subscriber::set_default(subscriber)
    }

    /// App state around `fetcher` with the default seven-day window
    pub fn setup_test_app_state(fetcher: Arc<dyn ReportFetcher>) -> AppState {
        initialize_app_state_with_fetcher(fetcher, 7)
    }

    /// Create axum app for testing
    pub fn setup_test_app(fetcher: Arc<dyn ReportFetcher>) -> (Router, AppState) {
        let state = setup_test_app_state(fetcher);
        (create_router(state.clone()), state)
    }
}
