//! HTTP transport for the ListenBrainz API.
//!
//! Joins paths onto the API root, injects the `Authorization` header once a
//! token is known, and maps non-2xx responses to [`ListenBrainzError::Api`].

use reqwest::header::AUTHORIZATION;
use reqwest::{Client, RequestBuilder, Response};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::{ListenBrainzError, Result};

/// Query parameters as `(name, value)` pairs. Optional parameters that are
/// not set are left out of the slice entirely.
pub type Params<'a> = [(&'a str, String)];

/// Thin wrapper around [`reqwest::Client`] bound to one API root.
#[derive(Debug, Clone)]
pub struct Transport {
    client: Client,
    base_url: String,
    auth_token: Option<String>,
}

impl Transport {
    pub(crate) fn new(client: Client, base_url: String) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            auth_token: None,
        }
    }

    /// API root every path is appended to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn auth_token(&self) -> Option<&str> {
        self.auth_token.as_deref()
    }

    pub(crate) fn set_auth_token(&mut self, token: String) {
        self.auth_token = Some(token);
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.auth_token {
            Some(token) => request.header(AUTHORIZATION, format!("Token {}", token)),
            None => request,
        }
    }

    /// `GET {base}{path}?{params}`.
    pub async fn get(&self, path: &str, params: &Params<'_>) -> Result<Value> {
        let url = self.url(path);
        debug!("GET {} with params: {:?}", url, params);

        let request = self.authorize(self.client.get(&url).query(params));
        Self::handle(request.send().await?).await
    }

    /// `POST {base}{path}?{params}` with a JSON body.
    pub async fn post<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
        params: &Params<'_>,
    ) -> Result<Value> {
        let url = self.url(path);
        debug!("POST {} with params: {:?}", url, params);

        let request = self.authorize(self.client.post(&url).query(params).json(body));
        Self::handle(request.send().await?).await
    }

    async fn handle(response: Response) -> Result<Value> {
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            let message = error_message(&text);
            warn!("ListenBrainz API error (status {}): {}", status, message);
            return Err(ListenBrainzError::Api {
                status: status.as_u16(),
                message,
            });
        }

        if text.trim().is_empty() {
            return Ok(Value::Null);
        }
        Ok(serde_json::from_str(&text)?)
    }
}

/// The `error` field of a JSON error body, or the raw body text.
fn error_message(body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|json| {
            json.get("error")
                .and_then(|e| e.as_str())
                .map(|s| s.to_string())
        })
        .unwrap_or_else(|| body.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_message_from_json() {
        assert_eq!(
            error_message(r#"{"code": 401, "error": "Unauthorized"}"#),
            "Unauthorized"
        );
    }

    #[test]
    fn test_error_message_falls_back_to_text() {
        assert_eq!(error_message("Bad Gateway"), "Bad Gateway");
        assert_eq!(error_message(r#"{"code": 500}"#), r#"{"code": 500}"#);
    }

    #[test]
    fn test_url_joins_without_double_slash() {
        let transport = Transport::new(Client::new(), "https://api.listenbrainz.org/".to_string());
        assert_eq!(
            transport.url("/1/submit-listens"),
            "https://api.listenbrainz.org/1/submit-listens"
        );
        assert!(transport.auth_token().is_none());
    }
}
