//! HTTP client for the collaborator API.
//!
//! All endpoints speak JSON with a `success` boolean envelope; a missing or
//! false `success`, a non-2xx status, and a transport failure are all
//! surfaced uniformly as [`ApiError`]. Authentication rides on a session
//! cookie held in the client's cookie store.

use std::sync::Arc;
use std::time::Duration;

use reqwest::cookie::{CookieStore, Jar};
use reqwest::{Client, Method, Url};
use serde::de::DeserializeOwned;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("invalid URL: {0}")]
    Url(#[from] url::ParseError),
    #[error("http error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("malformed response: {0}")]
    Decode(String),
    /// The server answered with an explicit human-readable reason.
    #[error("{message}")]
    Rejected { status: u16, message: String },
    /// The server refused the request without a usable message.
    #[error("request failed with status {status}")]
    Status { status: u16 },
}

impl ApiError {
    /// The server-supplied reason, when one was present in the response body.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ApiError::Rejected { message, .. } => Some(message),
            _ => None,
        }
    }
}

/// Cookie-authenticated client for one API origin.
#[derive(Clone, Debug)]
pub struct ApiClient {
    http: Client,
    base: Url,
    jar: Arc<Jar>,
}

impl ApiClient {
    pub fn new(base: Url, timeout: Duration) -> Result<Self, ApiError> {
        let jar = Arc::new(Jar::default());
        let http = Client::builder()
            .user_agent(Self::user_agent())
            .cookie_provider(Arc::clone(&jar))
            .timeout(timeout)
            .build()?;
        Ok(Self { http, base, jar })
    }

    pub fn user_agent() -> &'static str {
        concat!("velina-cli/", env!("CARGO_PKG_VERSION"))
    }

    pub fn base(&self) -> &Url {
        &self.base
    }

    /// Seed the cookie store with a previously captured session cookie.
    pub fn restore_session_cookie(&self, cookie: &str) {
        self.jar.add_cookie_str(cookie, &self.base);
    }

    /// The current session cookie header value, if the store holds one for
    /// this origin.
    pub fn session_cookie(&self) -> Option<String> {
        self.jar
            .cookies(&self.base)
            .and_then(|value| value.to_str().map(str::to_owned).ok())
    }

    fn url(&self, path: &str) -> Result<Url, ApiError> {
        self.base.join(path).map_err(ApiError::Url)
    }

    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, ApiError> {
        self.request(Method::GET, path, query, None).await
    }

    pub async fn post<T: DeserializeOwned>(
        &self,
        path: &str,
        body: serde_json::Value,
    ) -> Result<T, ApiError> {
        self.request(Method::POST, path, &[], Some(body)).await
    }

    pub async fn put<T: DeserializeOwned>(
        &self,
        path: &str,
        body: Option<serde_json::Value>,
    ) -> Result<T, ApiError> {
        self.request(Method::PUT, path, &[], body).await
    }

    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.request(Method::DELETE, path, &[], None).await
    }

    async fn request<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        body: Option<serde_json::Value>,
    ) -> Result<T, ApiError> {
        let mut url = self.url(path)?;
        if !query.is_empty() {
            url.set_query(None);
            let mut pairs = url.query_pairs_mut();
            for (key, value) in query {
                pairs.append_pair(key, value);
            }
        }

        let mut req = self.http.request(method, url);
        if let Some(b) = body {
            req = req.json(&b);
        }

        let resp = req.send().await?;
        let status = resp.status().as_u16();
        let bytes = resp.bytes().await?;
        let value: Option<serde_json::Value> = serde_json::from_slice(&bytes).ok();

        if !(200..300).contains(&status) {
            return Err(Self::rejection(status, value.as_ref()));
        }

        let value = value
            .ok_or_else(|| ApiError::Decode(format!("expected JSON body (status {status})")))?;
        match value.get("success").and_then(serde_json::Value::as_bool) {
            Some(true) => {}
            _ => return Err(Self::rejection(status, Some(&value))),
        }

        serde_json::from_value(value).map_err(|e| ApiError::Decode(e.to_string()))
    }

    fn rejection(status: u16, body: Option<&serde_json::Value>) -> ApiError {
        let message = body
            .and_then(|value| value.get("message"))
            .and_then(serde_json::Value::as_str)
            .filter(|m| !m.is_empty());
        match message {
            Some(message) => ApiError::Rejected {
                status,
                message: message.to_owned(),
            },
            None => ApiError::Status { status },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::MockServer;
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Probe {
        success: bool,
        value: u32,
    }

    fn client(server: &MockServer) -> ApiClient {
        let base = Url::parse(&server.base_url()).expect("base url");
        ApiClient::new(base, Duration::from_secs(5)).expect("client")
    }

    #[tokio::test]
    async fn parses_successful_envelope() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method("GET").path("/api/probe").query_param("limit", "5");
            then.status(200)
                .header("content-type", "application/json")
                .body(r#"{"success":true,"value":7}"#);
        });

        let probe: Probe = client(&server)
            .get("/api/probe", &[("limit", "5".into())])
            .await
            .expect("probe");
        assert!(probe.success);
        assert_eq!(probe.value, 7);
        mock.assert();
    }

    #[tokio::test]
    async fn false_success_is_a_rejection_with_the_server_message() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method("GET").path("/api/probe");
            then.status(200)
                .header("content-type", "application/json")
                .body(r#"{"success":false,"message":"nope"}"#);
        });

        let err = client(&server)
            .get::<Probe>("/api/probe", &[])
            .await
            .expect_err("rejection");
        assert_eq!(err.server_message(), Some("nope"));
    }

    #[tokio::test]
    async fn non_2xx_without_message_reports_the_status() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method("DELETE").path("/api/posts/p1");
            then.status(404).body("");
        });

        let err = client(&server)
            .delete::<serde_json::Value>("/api/posts/p1")
            .await
            .expect_err("status error");
        assert!(matches!(err, ApiError::Status { status: 404 }));
        assert!(err.server_message().is_none());
    }

    #[tokio::test]
    async fn captures_and_replays_session_cookies() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method("POST").path("/api/auth/login");
            then.status(200)
                .header("content-type", "application/json")
                .header("set-cookie", "sid=abc123; Path=/; HttpOnly")
                .body(r#"{"success":true,"value":1}"#);
        });
        let echo = server.mock(|when, then| {
            when.method("GET").path("/api/probe").header("cookie", "sid=abc123");
            then.status(200)
                .header("content-type", "application/json")
                .body(r#"{"success":true,"value":2}"#);
        });

        let api = client(&server);
        let _: Probe = api
            .post("/api/auth/login", serde_json::json!({}))
            .await
            .expect("login");
        assert_eq!(api.session_cookie().as_deref(), Some("sid=abc123"));

        let _: Probe = api.get("/api/probe", &[]).await.expect("probe");
        echo.assert();
    }

    #[tokio::test]
    async fn restored_cookie_is_sent_on_requests() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method("GET").path("/api/probe").header("cookie", "sid=seeded");
            then.status(200)
                .header("content-type", "application/json")
                .body(r#"{"success":true,"value":3}"#);
        });

        let api = client(&server);
        api.restore_session_cookie("sid=seeded");
        let _: Probe = api.get("/api/probe", &[]).await.expect("probe");
        mock.assert();
    }
}
