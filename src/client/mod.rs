//! Async client for the Hyperion history and state API.
//!
//! [`HyperionClient`] owns the base URL and the transport. Each API area is a
//! borrowed view over it:
//!
//! ```no_run
//! use hyperion_client::HyperionClient;
//!
//! # async fn run() -> hyperion_client::Result<()> {
//! let client = HyperionClient::eos_mainnet();
//! let info = client.chain().get_info().await?;
//! if let Some(creator) = client.accounts().get_creator("eosio.token").await? {
//!     println!("created by {} at block {}", creator.creator, creator.block_num);
//! }
//! # let _ = info;
//! # Ok(())
//! # }
//! ```

mod accounts;
mod chain;
mod history;
mod stats;
mod status;
mod system;

pub use accounts::AccountsApi;
pub use chain::ChainApi;
pub use history::HistoryApi;
pub use stats::StatsApi;
pub use status::StatusApi;
pub use system::SystemApi;

pub use crate::error::{ApiError, Error, Result};

use crate::transport::{BaseUrl, HttpRequest, HttpResponse, Transport, TransportError};
use crate::types::ResponseMeta;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;

#[cfg(feature = "client")]
use crate::transport::ReqwestTransport;

/// Async client for a Hyperion instance.
///
/// Cheap to clone; clones share the transport. Nothing in the client is
/// mutated after construction, so one instance can serve concurrent calls.
#[derive(Clone)]
pub struct HyperionClient {
    base_url: BaseUrl,
    transport: Arc<dyn Transport>,
}

impl std::fmt::Debug for HyperionClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HyperionClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl HyperionClient {
    /// Create a client over any transport.
    pub fn with_transport(
        base_url: impl Into<BaseUrl>,
        transport: impl Transport + 'static,
    ) -> Self {
        Self::with_shared_transport(base_url, Arc::new(transport))
    }

    /// Create a client over a transport shared with other clients.
    pub fn with_shared_transport(
        base_url: impl Into<BaseUrl>,
        transport: Arc<dyn Transport>,
    ) -> Self {
        Self {
            base_url: base_url.into(),
            transport,
        }
    }

    pub fn base_url(&self) -> &BaseUrl {
        &self.base_url
    }

    // ── API areas ────────────────────────────────────────────────

    pub fn accounts(&self) -> AccountsApi<'_> {
        AccountsApi::new(self)
    }

    pub fn chain(&self) -> ChainApi<'_> {
        ChainApi::new(self)
    }

    pub fn history(&self) -> HistoryApi<'_> {
        HistoryApi::new(self)
    }

    pub fn stats(&self) -> StatsApi<'_> {
        StatsApi::new(self)
    }

    pub fn status(&self) -> StatusApi<'_> {
        StatusApi::new(self)
    }

    pub fn system(&self) -> SystemApi<'_> {
        SystemApi::new(self)
    }

    // ── Dispatch ─────────────────────────────────────────────────

    async fn send(&self, request: HttpRequest) -> Result<HttpResponse> {
        tracing::debug!(method = %request.method, url = %request.url, "sending request");
        let response = self.transport.send(request).await?;
        tracing::trace!(status = response.status, body = %response.body, "received response");
        if response.is_success() {
            Ok(response)
        } else {
            tracing::warn!(status = response.status, "request failed");
            Err(ApiError::from_status(response.status, response.body).into())
        }
    }

    pub(crate) async fn get<R: DeserializeOwned>(
        &self,
        path: &str,
        query: Vec<(String, String)>,
    ) -> Result<R> {
        let response = self
            .send(HttpRequest::get(self.base_url.join(path), query))
            .await?;
        decode(response)
    }

    /// Like [`get`](Self::get), but a success response that carries no entity
    /// (`{}`, `null`, an empty body, or only envelope metadata) is `Ok(None)`.
    pub(crate) async fn get_optional<R: DeserializeOwned>(
        &self,
        path: &str,
        query: Vec<(String, String)>,
    ) -> Result<Option<R>> {
        let response = self
            .send(HttpRequest::get(self.base_url.join(path), query))
            .await?;
        decode_optional(response)
    }

    pub(crate) async fn post<B: Serialize, R: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<R> {
        let body = serde_json::to_string(body)
            .map_err(|e| TransportError::with_source("failed to encode request body", e))?;
        let response = self
            .send(HttpRequest::post(self.base_url.join(path), body))
            .await?;
        decode(response)
    }
}

#[cfg(feature = "client")]
impl HyperionClient {
    /// Create a client for `base_url` using the default reqwest transport.
    pub fn new(base_url: impl Into<BaseUrl>) -> Self {
        Self::with_transport(base_url, ReqwestTransport::new())
    }

    /// EOS mainnet (EOS Rio).
    pub fn eos_mainnet() -> Self {
        Self::new("https://eos.hyperion.eosrio.io")
    }

    /// WAX mainnet (EOSphere).
    pub fn wax_mainnet() -> Self {
        Self::new("https://wax.eosphere.io")
    }

    /// Telos mainnet.
    pub fn telos_mainnet() -> Self {
        Self::new("https://mainnet.telos.net")
    }

    /// Jungle 4 testnet.
    pub fn jungle_testnet() -> Self {
        Self::new("https://jungle4.cryptolions.io")
    }

    /// A local Hyperion API on its default port.
    pub fn local() -> Self {
        Self::new("http://127.0.0.1:7000")
    }
}

fn decode<R: DeserializeOwned>(response: HttpResponse) -> Result<R> {
    serde_json::from_str(&response.body).map_err(|e| parse_failure(&response, &e).into())
}

fn decode_optional<R: DeserializeOwned>(response: HttpResponse) -> Result<Option<R>> {
    if response.body.trim().is_empty() {
        return Ok(None);
    }
    let value: Value =
        serde_json::from_str(&response.body).map_err(|e| parse_failure(&response, &e))?;
    if is_empty_result(&value) {
        return Ok(None);
    }
    serde_json::from_value(value)
        .map(Some)
        .map_err(|e| parse_failure(&response, &e).into())
}

fn parse_failure(response: &HttpResponse, error: &serde_json::Error) -> ApiError {
    tracing::warn!(
        status = response.status,
        error = %error,
        "response did not match the expected shape"
    );
    ApiError::from_parse(response.status, response.body.clone(), error)
}

fn is_empty_result(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Object(map) => map
            .keys()
            .all(|key| ResponseMeta::WIRE_FIELDS.contains(&key.as_str())),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::testing::StubTransport;
    use crate::transport::Method;
    use crate::types::GetCreatorResponse;

    const CREATOR: &str = r#"{"account":"alice","timestamp":"2024-01-01T00:00:00","trx_id":"abc123","block_num":500,"creator":"eosio"}"#;

    fn client(stub: &Arc<StubTransport>, base: &str) -> HyperionClient {
        HyperionClient::with_shared_transport(base, stub.clone())
    }

    #[tokio::test]
    async fn get_creator_returns_model() {
        let stub = Arc::new(StubTransport::always(200, CREATOR));
        let creator = client(&stub, "https://hyperion.test")
            .accounts()
            .get_creator("alice")
            .await
            .expect("request")
            .expect("creator");

        assert_eq!(creator.account, "alice");
        assert_eq!(creator.block_num, 500);
        assert_eq!(creator.creator, "eosio");
        assert_eq!(creator.trx_id, "abc123");
        assert_eq!(creator.timestamp, "2024-01-01T00:00:00");

        let request = stub.last_request();
        assert_eq!(request.method, Method::Get);
        assert_eq!(request.url, "https://hyperion.test/v2/history/get_creator");
        assert_eq!(request.query, [("account".to_string(), "alice".to_string())]);
    }

    #[tokio::test]
    async fn empty_object_is_not_found() {
        for body in ["{}", "null", "", "  ", r#"{"query_time_ms": 1.5, "cached": false}"#] {
            let stub = Arc::new(StubTransport::always(200, body));
            let creator = client(&stub, "https://hyperion.test")
                .accounts()
                .get_creator("nobody")
                .await
                .expect("request");
            assert_eq!(creator, None, "body {body:?}");
        }
    }

    #[tokio::test]
    async fn server_error_carries_status_and_body() {
        let stub = Arc::new(StubTransport::always(500, "\"internal error\""));
        let error = client(&stub, "https://hyperion.test")
            .accounts()
            .get_creator("alice")
            .await
            .expect_err("must fail");

        let api = error.as_api().expect("api error");
        assert_eq!(api.status, 500);
        assert_eq!(api.content, "\"internal error\"");
        assert!(!api.is_parse_failure());
    }

    #[tokio::test]
    async fn malformed_body_is_parse_failure() {
        for body in ["{not json", r#"{"account":"alice","block_num":"five hundred"}"#] {
            let stub = Arc::new(StubTransport::always(200, body));
            let error = client(&stub, "https://hyperion.test")
                .accounts()
                .get_creator("alice")
                .await
                .expect_err("must fail");
            assert!(error.is_parse_failure(), "body {body:?}");
            assert_eq!(error.status(), Some(200));
            assert_eq!(error.as_api().map(|a| a.content.as_str()), Some(body));
        }
    }

    #[tokio::test]
    async fn non_optional_endpoint_rejects_malformed_body() {
        let stub = Arc::new(StubTransport::always(200, "[1, 2]"));
        let error = client(&stub, "https://hyperion.test")
            .chain()
            .get_info()
            .await
            .expect_err("must fail");
        assert!(error.is_parse_failure());
    }

    #[tokio::test]
    async fn missing_fields_take_defaults() {
        let stub = Arc::new(StubTransport::always(200, r#"{"account":"alice"}"#));
        let creator = client(&stub, "https://hyperion.test")
            .accounts()
            .get_creator("alice")
            .await
            .expect("request")
            .expect("creator");
        assert_eq!(
            creator,
            GetCreatorResponse {
                account: "alice".to_string(),
                ..Default::default()
            }
        );
    }

    #[tokio::test]
    async fn same_response_twice_gives_equal_models() {
        let stub = Arc::new(StubTransport::always(200, CREATOR));
        let client = client(&stub, "https://hyperion.test");
        let first = client.accounts().get_creator("alice").await.expect("first");
        let second = client.accounts().get_creator("alice").await.expect("second");
        assert_eq!(first, second);
        assert_eq!(stub.requests().len(), 2);
    }

    #[tokio::test]
    async fn base_url_composition() {
        for base in ["https://hyperion.test", "https://hyperion.test/"] {
            let stub = Arc::new(StubTransport::always(200, "{}"));
            client(&stub, base).status().health().await.expect("health");
            assert_eq!(stub.last_request().url, "https://hyperion.test/v2/health");
        }
    }

    #[tokio::test]
    async fn transport_failure_is_not_an_api_error() {
        let stub = Arc::new(StubTransport::failing("connection refused"));
        let error = client(&stub, "https://hyperion.test")
            .chain()
            .get_info()
            .await
            .expect_err("must fail");
        assert!(matches!(error, Error::Transport(_)));
        assert_eq!(error.status(), None);
    }

    #[tokio::test]
    async fn unencodable_body_is_transport_error() {
        struct Unencodable;

        impl Serialize for Unencodable {
            fn serialize<S>(&self, _: S) -> std::result::Result<S::Ok, S::Error>
            where
                S: serde::Serializer,
            {
                Err(serde::ser::Error::custom("refusing to encode"))
            }
        }

        let stub = Arc::new(StubTransport::always(200, "{}"));
        let error = client(&stub, "https://hyperion.test")
            .post::<_, Value>("/v1/chain/get_info", &Unencodable)
            .await
            .expect_err("must fail");
        assert!(matches!(error, Error::Transport(_)));
        assert_eq!(error.status(), None);
        assert!(!error.is_parse_failure());
        assert!(stub.requests().is_empty());
    }

    #[derive(Clone, Default)]
    struct CapturedLogs(Arc<std::sync::Mutex<Vec<u8>>>);

    impl std::io::Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().expect("lock").extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    impl CapturedLogs {
        fn text(&self) -> String {
            String::from_utf8_lossy(&self.0.lock().expect("lock")).into_owned()
        }
    }

    #[test]
    fn optional_decode_failures_are_logged() {
        let bodies = ["{not json", r#"{"account":"alice","block_num":"five hundred"}"#];
        for body in bodies {
            let logs = CapturedLogs::default();
            let writer = logs.clone();
            let subscriber = tracing_subscriber::fmt()
                .with_ansi(false)
                .with_writer(move || writer.clone())
                .finish();

            let result = tracing::subscriber::with_default(subscriber, || {
                decode_optional::<GetCreatorResponse>(HttpResponse::new(200, body))
            });

            let error = result.expect_err("must fail");
            assert!(error.is_parse_failure(), "body {body:?}");
            let text = logs.text();
            assert!(text.contains("WARN"), "body {body:?}: {text}");
            assert!(text.contains("response did not match the expected shape"));
            assert!(text.contains("status=200"));
        }
    }

    #[test]
    fn client_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<HyperionClient>();
    }

    #[cfg(feature = "client")]
    #[test]
    fn test_client_creation() {
        let client = HyperionClient::eos_mainnet();
        assert_eq!(client.base_url().as_str(), "https://eos.hyperion.eosrio.io");

        let client = HyperionClient::local();
        assert_eq!(client.base_url().as_str(), "http://127.0.0.1:7000");

        let client = HyperionClient::new("https://custom.hyperion.example/");
        assert_eq!(client.base_url().as_str(), "https://custom.hyperion.example");
    }
}
