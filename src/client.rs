//! ListenBrainz client session.
//!
//! Holds the transport and the optional auth token. Submission and query
//! operations live in [`crate::api::submit`] and [`crate::api::query`].

use reqwest::Client;
use tracing::{info, warn};

use crate::api::Transport;
use crate::error::{ListenBrainzError, Result};
use crate::models::ValidateToken;

/// Root of the public ListenBrainz API.
pub const API_ROOT_URL: &str = "https://api.listenbrainz.org";

const VALIDATE_TOKEN_PATH: &str = "/1/validate-token";

/// Client settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// API root that endpoint paths are appended to.
    pub base_url: String,
    /// `User-Agent` sent with every request.
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: API_ROOT_URL.to_string(),
            user_agent: format!("{}/{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION")),
        }
    }
}

impl ClientConfig {
    /// Default settings pointed at another API root.
    pub fn with_base_url<S: Into<String>>(base_url: S) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }
}

/// ListenBrainz API client.
///
/// The auth token is plain state on the client and is only changed through
/// [`ListenBrainz::set_auth_token`], which takes `&mut self`. Use one client
/// per logical user; share it across tasks only behind your own lock.
///
/// # Example
///
/// ```rust,no_run
/// use listenbrainz_client::{ListenBrainz, Listen};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let mut client = ListenBrainz::new()?;
///     client.set_auth_token("your-user-token").await?;
///
///     let listen = Listen::new("Fade", "Kanye West").with_listened_at(1_700_000_000);
///     client.submit_single_listen(&listen).await?;
///
///     for listen in client.get_listens("iliekcomputers", None, None, Some(10)).await? {
///         println!("{} - {}", listen.artist_name, listen.track_name);
///     }
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone)]
pub struct ListenBrainz {
    pub(crate) transport: Transport,
}

impl ListenBrainz {
    /// Create a client for the public API.
    pub fn new() -> Result<Self> {
        Self::with_config(ClientConfig::default())
    }

    /// Create a client from explicit settings.
    ///
    /// # Errors
    ///
    /// Returns `InvalidUrl` if `base_url` is empty or not http(s).
    pub fn with_config(config: ClientConfig) -> Result<Self> {
        let base_url = config.base_url.trim();
        if base_url.is_empty() {
            return Err(ListenBrainzError::InvalidUrl(
                "URL cannot be empty".to_string(),
            ));
        }
        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(ListenBrainzError::InvalidUrl(format!(
                "{} must start with http:// or https://",
                base_url
            )));
        }

        let client = Client::builder().user_agent(config.user_agent).build()?;

        Ok(Self {
            transport: Transport::new(client, base_url.to_string()),
        })
    }

    /// API root this client talks to.
    pub fn base_url(&self) -> &str {
        self.transport.base_url()
    }

    /// The token attached to requests, if one has been set.
    pub fn auth_token(&self) -> Option<&str> {
        self.transport.auth_token()
    }

    pub fn is_authenticated(&self) -> bool {
        self.transport.auth_token().is_some()
    }

    /// Low-level transport, for endpoints this client does not wrap.
    pub fn transport(&self) -> &Transport {
        &self.transport
    }

    /// Ask the service whether `token` is a valid user token.
    pub async fn is_token_valid(&self, token: &str) -> Result<bool> {
        Ok(self.validate_token(token).await?.valid)
    }

    /// Validate `token` with the service and, if valid, use it for every
    /// subsequent request.
    ///
    /// # Errors
    ///
    /// Returns `InvalidAuthToken` if the service rejects the token; the
    /// client keeps its previous token in that case. Transport and API
    /// errors are returned unchanged.
    pub async fn set_auth_token<S: Into<String>>(&mut self, token: S) -> Result<()> {
        let token = token.into();
        let validation = self.validate_token(&token).await?;

        if !validation.valid {
            warn!("Auth token rejected by ListenBrainz");
            return Err(ListenBrainzError::InvalidAuthToken);
        }

        info!(
            "Auth token accepted for user {}",
            validation.user_name.as_deref().unwrap_or("<unknown>")
        );
        self.transport.set_auth_token(token);
        Ok(())
    }

    async fn validate_token(&self, token: &str) -> Result<ValidateToken> {
        let response = self
            .transport
            .get(VALIDATE_TOKEN_PATH, &[("token", token.to_string())])
            .await?;
        Ok(serde_json::from_value(response)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_points_at_public_api() {
        let client = ListenBrainz::new().unwrap();
        assert_eq!(client.base_url(), "https://api.listenbrainz.org");
        assert!(!client.is_authenticated());
        assert_eq!(client.auth_token(), None);
    }

    #[test]
    fn test_trailing_slash_is_trimmed() {
        let client =
            ListenBrainz::with_config(ClientConfig::with_base_url("http://localhost:8100/")).unwrap();
        assert_eq!(client.base_url(), "http://localhost:8100");
    }

    #[test]
    fn test_empty_url_rejected() {
        match ListenBrainz::with_config(ClientConfig::with_base_url("")) {
            Err(ListenBrainzError::InvalidUrl(msg)) => assert!(msg.contains("empty")),
            other => panic!("Expected InvalidUrl error, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_url_without_scheme_rejected() {
        assert!(matches!(
            ListenBrainz::with_config(ClientConfig::with_base_url("api.listenbrainz.org")),
            Err(ListenBrainzError::InvalidUrl(_))
        ));
    }
}
