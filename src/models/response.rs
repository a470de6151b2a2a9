//! Typed response envelopes for the query endpoints.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::payload::ListenPayload;
use crate::error::ListenBrainzError;

/// Response of `GET /1/validate-token`.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct ValidateToken {
    pub valid: bool,

    #[serde(default)]
    pub user_name: Option<String>,

    #[serde(default)]
    pub message: Option<String>,
}

/// `{"payload": {"listens": [...]}}`, returned by the listens and
/// playing-now endpoints.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct ListensResponse {
    pub payload: ListensPayload,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct ListensPayload {
    #[serde(default)]
    pub listens: Vec<ListenPayload>,

    #[serde(default)]
    pub count: Option<u64>,

    #[serde(default)]
    pub user_id: Option<String>,
}

/// Response of `GET /1/user/{user}/listen-count`.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct ListenCountResponse {
    pub payload: ListenCount,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct ListenCount {
    pub count: u64,
}

/// Which artists a recording recommendation is drawn from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArtistType {
    /// The user's own top artists.
    Top,
    /// Artists similar to the user's top artists.
    Similar,
}

impl ArtistType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ArtistType::Top => "top",
            ArtistType::Similar => "similar",
        }
    }
}

impl fmt::Display for ArtistType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ArtistType {
    type Err = ListenBrainzError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "top" => Ok(ArtistType::Top),
            "similar" => Ok(ArtistType::Similar),
            other => Err(ListenBrainzError::InvalidArtistType(other.to_string())),
        }
    }
}
