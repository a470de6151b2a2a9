//! Listen submission.
//!
//! All submissions go through the same validation before anything is sent:
//! token present, at least one listen, known listen type, exactly one
//! listen for `single`/`playing_now`, and no timestamps on playing-now
//! listens.

use serde_json::Value;
use tracing::debug;

use crate::client::ListenBrainz;
use crate::converters;
use crate::error::{ListenBrainzError, Result};
use crate::models::{Listen, ListenType, SubmitListens};

const SUBMIT_LISTENS_PATH: &str = "/1/submit-listens";

impl ListenBrainz {
    /// Submit one finished listen.
    pub async fn submit_single_listen(&self, listen: &Listen) -> Result<Value> {
        self.post_submit_listens(std::slice::from_ref(listen), ListenType::Single.as_str())
            .await
    }

    /// Report the track the user is listening to right now.
    ///
    /// The listen must not have a `listened_at` timestamp.
    pub async fn submit_playing_now(&self, listen: &Listen) -> Result<Value> {
        self.post_submit_listens(
            std::slice::from_ref(listen),
            ListenType::PlayingNow.as_str(),
        )
        .await
    }

    /// Import a batch of listens.
    pub async fn submit_multiple_listens(&self, listens: &[Listen]) -> Result<Value> {
        self.post_submit_listens(listens, ListenType::Import.as_str())
            .await
    }

    /// Submit listens with a listen type given by name
    /// (`single`, `playing_now` or `import`).
    pub async fn submit_listens(&self, listens: &[Listen], listen_type: &str) -> Result<Value> {
        self.post_submit_listens(listens, listen_type).await
    }

    async fn post_submit_listens(&self, listens: &[Listen], listen_type: &str) -> Result<Value> {
        let body = build_submission(self.is_authenticated(), listens, listen_type)?;
        debug!(
            "Submitting {} listen(s) as {}",
            body.payload.len(),
            body.listen_type
        );
        self.transport.post(SUBMIT_LISTENS_PATH, &body, &[]).await
    }
}

/// Validate a submission and build its request body.
fn build_submission(
    authenticated: bool,
    listens: &[Listen],
    listen_type: &str,
) -> Result<SubmitListens> {
    if !authenticated {
        return Err(ListenBrainzError::AuthTokenRequired);
    }
    if listens.is_empty() {
        return Err(ListenBrainzError::EmptyPayload);
    }

    let listen_type: ListenType = listen_type.parse()?;

    if listen_type.is_single_listen() && listens.len() > 1 {
        return Err(ListenBrainzError::TooManyListens {
            listen_type,
            count: listens.len(),
        });
    }
    if listen_type == ListenType::PlayingNow && listens.iter().any(|l| l.listened_at.is_some()) {
        return Err(ListenBrainzError::ListenedAtInPlayingNow);
    }

    Ok(SubmitListens {
        listen_type,
        payload: listens
            .iter()
            .map(|l| converters::listen_to_payload(l, listen_type))
            .collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn listen() -> Listen {
        Listen::new("Fade", "Kanye West")
            .with_release_name("The Life of Pablo")
            .with_listened_at(1_600_000_000)
    }

    #[test]
    fn test_requires_auth_for_every_type() {
        for listen_type in ["single", "playing_now", "import"] {
            assert!(matches!(
                build_submission(false, &[listen()], listen_type),
                Err(ListenBrainzError::AuthTokenRequired)
            ));
        }
    }

    #[test]
    fn test_empty_payload() {
        assert!(matches!(
            build_submission(true, &[], "import"),
            Err(ListenBrainzError::EmptyPayload)
        ));
    }

    #[test]
    fn test_unknown_listen_type() {
        assert!(matches!(
            build_submission(true, &[listen()], "unknown listen type"),
            Err(ListenBrainzError::UnknownListenType(_))
        ));
    }

    #[test]
    fn test_too_many_listens() {
        for listen_type in ["single", "playing_now"] {
            match build_submission(true, &[listen(), listen()], listen_type) {
                Err(ListenBrainzError::TooManyListens { count, .. }) => assert_eq!(count, 2),
                other => panic!("Expected TooManyListens, got {:?}", other),
            }
        }
    }

    #[test]
    fn test_listened_at_in_playing_now() {
        assert!(matches!(
            build_submission(true, &[listen()], "playing_now"),
            Err(ListenBrainzError::ListenedAtInPlayingNow)
        ));
    }

    #[test]
    fn test_import_accepts_many() {
        let body = build_submission(true, &[listen(), listen(), listen()], "import").unwrap();
        assert_eq!(body.listen_type, ListenType::Import);
        assert_eq!(body.payload.len(), 3);
    }

    #[test]
    fn test_single_body() {
        let body = build_submission(true, &[listen()], "single").unwrap();
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            json!({
                "listen_type": "single",
                "payload": [{
                    "listened_at": 1_600_000_000,
                    "track_metadata": {
                        "track_name": "Fade",
                        "artist_name": "Kanye West",
                        "release_name": "The Life of Pablo"
                    }
                }]
            })
        );
    }

    #[test]
    fn test_playing_now_body_has_no_timestamp() {
        let now = Listen::new("Fade", "Kanye West");
        let body = build_submission(true, &[now], "playing_now").unwrap();
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            json!({
                "listen_type": "playing_now",
                "payload": [{
                    "track_metadata": {
                        "track_name": "Fade",
                        "artist_name": "Kanye West"
                    }
                }]
            })
        );
    }
}
