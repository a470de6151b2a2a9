//! Conversion between [`Listen`] and the wire format.
//!
//! The service keeps MusicBrainz IDs, tags and similar fields inside
//! `track_metadata.additional_info`. [`Listen`] exposes them as typed fields,
//! so these converters move them in and out of that map.

use serde_json::{Map, Value};

use crate::models::{Listen, ListenPayload, ListenType, TrackMetadata};

const RECORDING_MBID: &str = "recording_mbid";
const ARTIST_MBIDS: &str = "artist_mbids";
const RELEASE_MBID: &str = "release_mbid";
const RELEASE_GROUP_MBID: &str = "release_group_mbid";
const WORK_MBIDS: &str = "work_mbids";
const TRACKNUMBER: &str = "tracknumber";
const SPOTIFY_ID: &str = "spotify_id";
const ISRC: &str = "isrc";
const LISTENING_FROM: &str = "listening_from";
const TAGS: &str = "tags";

/// Build the submission payload for one listen.
///
/// `listened_at` is dropped for [`ListenType::PlayingNow`].
pub fn listen_to_payload(listen: &Listen, listen_type: ListenType) -> ListenPayload {
    let mut additional_info = listen.additional_info.clone();

    put_str(&mut additional_info, RECORDING_MBID, &listen.recording_mbid);
    put_list(&mut additional_info, ARTIST_MBIDS, &listen.artist_mbids);
    put_str(&mut additional_info, RELEASE_MBID, &listen.release_mbid);
    put_str(
        &mut additional_info,
        RELEASE_GROUP_MBID,
        &listen.release_group_mbid,
    );
    put_list(&mut additional_info, WORK_MBIDS, &listen.work_mbids);
    if let Some(n) = listen.tracknumber {
        additional_info.insert(TRACKNUMBER.to_string(), Value::from(n));
    }
    put_str(&mut additional_info, SPOTIFY_ID, &listen.spotify_id);
    put_str(&mut additional_info, ISRC, &listen.isrc);
    put_str(&mut additional_info, LISTENING_FROM, &listen.listening_from);
    put_list(&mut additional_info, TAGS, &listen.tags);

    let listened_at = match listen_type {
        ListenType::PlayingNow => None,
        ListenType::Single | ListenType::Import => listen.listened_at,
    };

    ListenPayload {
        listened_at,
        track_metadata: TrackMetadata {
            track_name: listen.track_name.clone(),
            artist_name: listen.artist_name.clone(),
            release_name: listen.release_name.clone(),
            additional_info,
        },
        user_name: None,
    }
}

/// Turn a listen returned by the service into a [`Listen`].
///
/// Recognised keys are lifted out of `additional_info`; everything else
/// stays there untouched.
pub fn payload_to_listen(payload: ListenPayload) -> Listen {
    let TrackMetadata {
        track_name,
        artist_name,
        release_name,
        mut additional_info,
    } = payload.track_metadata;

    Listen {
        track_name,
        artist_name,
        listened_at: payload.listened_at,
        release_name,
        recording_mbid: take_str(&mut additional_info, RECORDING_MBID),
        artist_mbids: take_list(&mut additional_info, ARTIST_MBIDS),
        release_mbid: take_str(&mut additional_info, RELEASE_MBID),
        release_group_mbid: take_str(&mut additional_info, RELEASE_GROUP_MBID),
        work_mbids: take_list(&mut additional_info, WORK_MBIDS),
        tracknumber: take_tracknumber(&mut additional_info),
        spotify_id: take_str(&mut additional_info, SPOTIFY_ID),
        isrc: take_str(&mut additional_info, ISRC),
        listening_from: take_str(&mut additional_info, LISTENING_FROM),
        tags: take_list(&mut additional_info, TAGS),
        additional_info,
        username: payload.user_name,
    }
}

fn put_str(info: &mut Map<String, Value>, key: &str, value: &Option<String>) {
    if let Some(v) = value {
        info.insert(key.to_string(), Value::String(v.clone()));
    }
}

fn put_list(info: &mut Map<String, Value>, key: &str, values: &[String]) {
    if !values.is_empty() {
        info.insert(key.to_string(), Value::from(values.to_vec()));
    }
}

/// Remove a string entry. Non-string values are left in place.
fn take_str(info: &mut Map<String, Value>, key: &str) -> Option<String> {
    match info.get(key) {
        Some(Value::String(_)) => match info.remove(key) {
            Some(Value::String(s)) => Some(s),
            _ => None,
        },
        Some(Value::Null) => {
            info.remove(key);
            None
        }
        _ => None,
    }
}

/// Remove a list of strings. Entries that are not strings are skipped.
fn take_list(info: &mut Map<String, Value>, key: &str) -> Vec<String> {
    match info.get(key) {
        Some(Value::Array(_)) | Some(Value::Null) => info
            .remove(key)
            .and_then(|v| match v {
                Value::Array(items) => Some(items),
                _ => None,
            })
            .unwrap_or_default()
            .into_iter()
            .filter_map(|item| match item {
                Value::String(s) => Some(s),
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    }
}

/// Track numbers show up as numbers or numeric strings.
fn take_tracknumber(info: &mut Map<String, Value>) -> Option<u32> {
    let parsed = match info.get(TRACKNUMBER)? {
        Value::Number(n) => n.as_u64().and_then(|n| u32::try_from(n).ok()),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    };
    if parsed.is_some() {
        info.remove(TRACKNUMBER);
    }
    parsed
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_listen() -> Listen {
        Listen::new("Fade", "Kanye West")
            .with_release_name("The Life of Pablo")
            .with_listened_at(1_600_000_000)
    }

    #[test]
    fn test_single_payload_matches_submission_format() {
        let payload = listen_to_payload(&sample_listen(), ListenType::Single);
        assert_eq!(
            serde_json::to_value(&payload).unwrap(),
            json!({
                "listened_at": 1_600_000_000,
                "track_metadata": {
                    "track_name": "Fade",
                    "artist_name": "Kanye West",
                    "release_name": "The Life of Pablo"
                }
            })
        );
    }

    #[test]
    fn test_bare_listen_has_no_empty_metadata() {
        let listen = Listen::new("Fade", "Kanye West").with_listened_at(1_600_000_000);
        assert_eq!(
            serde_json::to_value(listen_to_payload(&listen, ListenType::Import)).unwrap(),
            json!({
                "listened_at": 1_600_000_000,
                "track_metadata": {
                    "track_name": "Fade",
                    "artist_name": "Kanye West"
                }
            })
        );
    }

    #[test]
    fn test_playing_now_payload_drops_timestamp() {
        let payload = listen_to_payload(&sample_listen(), ListenType::PlayingNow);
        assert_eq!(payload.listened_at, None);
        assert!(serde_json::to_value(&payload)
            .unwrap()
            .get("listened_at")
            .is_none());
    }

    #[test]
    fn test_typed_fields_go_to_additional_info() {
        let listen = Listen::new("Fade", "Kanye West")
            .with_recording_mbid("rec-1")
            .with_artist_mbids(["artist-1"])
            .with_tracknumber(3)
            .with_tags(["rap"])
            .with_additional_info("music_service", "spotify.com");

        let payload = listen_to_payload(&listen, ListenType::Import);
        let info = &payload.track_metadata.additional_info;
        assert_eq!(info["recording_mbid"], json!("rec-1"));
        assert_eq!(info["artist_mbids"], json!(["artist-1"]));
        assert_eq!(info["tracknumber"], json!(3));
        assert_eq!(info["tags"], json!(["rap"]));
        assert_eq!(info["music_service"], json!("spotify.com"));
    }

    #[test]
    fn test_round_trip_keeps_core_fields() {
        let listen = sample_listen()
            .with_release_mbid("rel-1")
            .with_additional_info("origin_url", "https://example.com");
        let wire = serde_json::to_string(&listen_to_payload(&listen, ListenType::Single)).unwrap();

        let back = payload_to_listen(serde_json::from_str(&wire).unwrap());
        assert_eq!(back.track_name, listen.track_name);
        assert_eq!(back.artist_name, listen.artist_name);
        assert_eq!(back.release_name, listen.release_name);
        assert_eq!(back.listened_at, listen.listened_at);
        assert_eq!(back, listen);
    }

    #[test]
    fn test_payload_to_listen_lifts_known_keys() {
        let payload: ListenPayload = serde_json::from_value(json!({
            "listened_at": 1669318360,
            "user_name": "iliekcomputers",
            "track_metadata": {
                "track_name": "Angel With A Shotgun",
                "artist_name": "The Cab",
                "additional_info": {
                    "tracknumber": "7",
                    "isrc": null,
                    "artist_mbids": ["91f7a868-d82e-4cfb-9cd9-a2ffd7faac25", 5],
                    "spotify_id": "https://open.spotify.com/track/49rpdsNYJirTTf6p6mMvag",
                    "submission_client": "spotify-importer"
                }
            }
        }))
        .unwrap();

        let listen = payload_to_listen(payload);
        assert_eq!(listen.tracknumber, Some(7));
        assert_eq!(listen.isrc, None);
        assert_eq!(
            listen.artist_mbids,
            vec!["91f7a868-d82e-4cfb-9cd9-a2ffd7faac25"]
        );
        assert!(listen.spotify_id.is_some());
        assert_eq!(listen.username.as_deref(), Some("iliekcomputers"));
        assert_eq!(listen.additional_info.len(), 1);
        assert_eq!(
            listen.additional_info["submission_client"],
            json!("spotify-importer")
        );
    }
}
