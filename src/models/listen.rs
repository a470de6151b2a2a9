//! The listen model.

use serde_json::{Map, Value};

/// A single playback event.
///
/// A listen with `listened_at == None` is a "playing now" listen: the
/// track has not finished yet, so it has no timestamp.
///
/// Fields are public for reading, but a listen is treated as an immutable
/// value once built with [`Listen::new`] and the `with_*` methods. It has no
/// serde impl of its own; [`crate::converters`] maps it to and from the
/// `track_metadata` wire format.
///
/// # Example
///
/// ```rust
/// use listenbrainz_client::Listen;
///
/// let listen = Listen::new("Fade", "Kanye West")
///     .with_release_name("The Life of Pablo")
///     .with_listened_at(1_700_000_000);
///
/// assert_eq!(listen.release_name.as_deref(), Some("The Life of Pablo"));
/// assert!(!listen.is_playing_now());
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Listen {
    /// Track title.
    pub track_name: String,

    /// Artist credit as displayed.
    pub artist_name: String,

    /// Unix timestamp (seconds) of when the listen happened.
    pub listened_at: Option<i64>,

    /// Release (album) title.
    pub release_name: Option<String>,

    /// MusicBrainz recording ID.
    pub recording_mbid: Option<String>,

    /// MusicBrainz artist IDs.
    pub artist_mbids: Vec<String>,

    /// MusicBrainz release ID.
    pub release_mbid: Option<String>,

    /// MusicBrainz release group ID.
    pub release_group_mbid: Option<String>,

    /// MusicBrainz work IDs.
    pub work_mbids: Vec<String>,

    /// Position of the track on its release.
    pub tracknumber: Option<u32>,

    pub spotify_id: Option<String>,

    pub isrc: Option<String>,

    /// Player or service the listen came from.
    pub listening_from: Option<String>,

    /// User supplied tags.
    pub tags: Vec<String>,

    /// Any other metadata, sent as-is in `additional_info`.
    pub additional_info: Map<String, Value>,

    /// Owner of the listen. Only set on listens read from the service.
    pub username: Option<String>,
}

impl Listen {
    /// Create a listen with the two required fields.
    pub fn new<S1: Into<String>, S2: Into<String>>(track_name: S1, artist_name: S2) -> Self {
        Self {
            track_name: track_name.into(),
            artist_name: artist_name.into(),
            ..Default::default()
        }
    }

    pub fn with_listened_at(mut self, listened_at: i64) -> Self {
        self.listened_at = Some(listened_at);
        self
    }

    pub fn with_release_name<S: Into<String>>(mut self, release_name: S) -> Self {
        self.release_name = Some(release_name.into());
        self
    }

    pub fn with_recording_mbid<S: Into<String>>(mut self, mbid: S) -> Self {
        self.recording_mbid = Some(mbid.into());
        self
    }

    pub fn with_release_mbid<S: Into<String>>(mut self, mbid: S) -> Self {
        self.release_mbid = Some(mbid.into());
        self
    }

    pub fn with_artist_mbids<I, S>(mut self, mbids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.artist_mbids = mbids.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_tracknumber(mut self, tracknumber: u32) -> Self {
        self.tracknumber = Some(tracknumber);
        self
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_listening_from<S: Into<String>>(mut self, source: S) -> Self {
        self.listening_from = Some(source.into());
        self
    }

    /// Add one free-form metadata entry.
    pub fn with_additional_info<K: Into<String>, V: Into<Value>>(mut self, key: K, value: V) -> Self {
        self.additional_info.insert(key.into(), value.into());
        self
    }

    /// Whether this listen is in progress (has no timestamp).
    pub fn is_playing_now(&self) -> bool {
        self.listened_at.is_none()
    }
}
