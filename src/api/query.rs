//! Read-only queries: listen history, playing-now, listen counts and
//! recording recommendations.

use serde_json::Value;
use tracing::debug;
use urlencoding::encode;

use crate::client::ListenBrainz;
use crate::converters;
use crate::error::Result;
use crate::models::{ArtistType, Listen, ListenCountResponse, ListensResponse};

/// Default page size for recording recommendations.
pub const DEFAULT_RECOMMENDATION_COUNT: u32 = 25;

impl ListenBrainz {
    /// Get a user's listens, newest first as returned by the service.
    ///
    /// `max_ts` / `min_ts` bound the listen timestamps and `count` limits
    /// the number of listens. Parameters left as `None` are not sent.
    pub async fn get_listens(
        &self,
        username: &str,
        max_ts: Option<i64>,
        min_ts: Option<i64>,
        count: Option<u32>,
    ) -> Result<Vec<Listen>> {
        let params: Vec<(&str, String)> = [
            ("max_ts", max_ts.map(|v| v.to_string())),
            ("min_ts", min_ts.map(|v| v.to_string())),
            ("count", count.map(|v| v.to_string())),
        ]
        .into_iter()
        .filter_map(|(name, value)| value.map(|v| (name, v)))
        .collect();

        let response = self
            .transport
            .get(&format!("/1/user/{}/listens", encode(username)), &params)
            .await?;
        let response: ListensResponse = serde_json::from_value(response)?;

        debug!(
            "Fetched {} listens for {}",
            response.payload.listens.len(),
            username
        );

        Ok(response
            .payload
            .listens
            .into_iter()
            .map(converters::payload_to_listen)
            .collect())
    }

    /// Get the listen a user is currently playing.
    ///
    /// Returns `Ok(None)` when nothing is playing.
    pub async fn get_playing_now(&self, username: &str) -> Result<Option<Listen>> {
        let response = self
            .transport
            .get(&format!("/1/user/{}/playing-now", encode(username)), &[])
            .await?;
        let response: ListensResponse = serde_json::from_value(response)?;

        Ok(response.payload.listens.into_iter().next().map(|payload| {
            let mut listen = converters::payload_to_listen(payload);
            listen.listened_at = None;
            listen
        }))
    }

    /// Total number of listens submitted by a user.
    pub async fn get_user_listen_count(&self, username: &str) -> Result<u64> {
        let response = self
            .transport
            .get(&format!("/1/user/{}/listen-count", encode(username)), &[])
            .await?;
        let response: ListenCountResponse = serde_json::from_value(response)?;
        Ok(response.payload.count)
    }

    /// Get collaborative-filtering recording recommendations for a user.
    ///
    /// `artist_type` must be `"top"` or `"similar"`; anything else fails with
    /// `InvalidArtistType` before a request is made. `offset` defaults to 0
    /// and `count` to [`DEFAULT_RECOMMENDATION_COUNT`]. The response is
    /// returned as-is, or `Value::Null` when the service has no
    /// recommendations (204 No Content).
    pub async fn get_user_recommendation_recordings(
        &self,
        username: &str,
        artist_type: &str,
        offset: Option<u32>,
        count: Option<u32>,
    ) -> Result<Value> {
        let artist_type: ArtistType = artist_type.parse()?;

        let params = [
            ("artist_type", artist_type.as_str().to_string()),
            ("offset", offset.unwrap_or(0).to_string()),
            (
                "count",
                count.unwrap_or(DEFAULT_RECOMMENDATION_COUNT).to_string(),
            ),
        ];

        self.transport
            .get(
                &format!(
                    "/1/cf/recommendation/user/{}/recording",
                    encode(username)
                ),
                &params,
            )
            .await
    }
}
