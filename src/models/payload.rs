//! Wire types shared by listen submission and listen queries.
//!
//! The service uses the same listen shape in both directions:
//!
//! ```json
//! {
//!   "listened_at": 1600000000,
//!   "track_metadata": {
//!     "track_name": "Fade",
//!     "artist_name": "Kanye West",
//!     "release_name": "The Life of Pablo",
//!     "additional_info": { "recording_mbid": "..." }
//!   }
//! }
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::ListenBrainzError;

/// Kind of listen submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ListenType {
    /// One finished listen.
    Single,
    /// The track currently playing; carries no timestamp.
    PlayingNow,
    /// A batch of historical listens.
    Import,
}

impl ListenType {
    /// Name used on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            ListenType::Single => "single",
            ListenType::PlayingNow => "playing_now",
            ListenType::Import => "import",
        }
    }

    /// Whether a submission of this type must contain exactly one listen.
    pub fn is_single_listen(&self) -> bool {
        matches!(self, ListenType::Single | ListenType::PlayingNow)
    }
}

impl fmt::Display for ListenType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ListenType {
    type Err = ListenBrainzError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "single" => Ok(ListenType::Single),
            "playing_now" => Ok(ListenType::PlayingNow),
            "import" => Ok(ListenType::Import),
            other => Err(ListenBrainzError::UnknownListenType(other.to_string())),
        }
    }
}

/// `track_metadata` object of a listen.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct TrackMetadata {
    pub track_name: String,

    pub artist_name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub release_name: Option<String>,

    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub additional_info: Map<String, Value>,
}

/// One listen as sent to, or received from, the service.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ListenPayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub listened_at: Option<i64>,

    pub track_metadata: TrackMetadata,

    /// Present on listens returned by the service, never submitted.
    #[serde(default, skip_serializing)]
    pub user_name: Option<String>,
}

/// Body of `POST /1/submit-listens`.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SubmitListens {
    pub listen_type: ListenType,
    pub payload: Vec<ListenPayload>,
}
