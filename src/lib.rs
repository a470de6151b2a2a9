//! # ListenBrainz client
//!
//! An async client for the [ListenBrainz](https://listenbrainz.org) API.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use listenbrainz_client::{Listen, ListenBrainz};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut client = ListenBrainz::new()?;
//!
//!     // Queries work without a token
//!     let count = client.get_user_listen_count("iliekcomputers").await?;
//!     println!("{} listens", count);
//!
//!     if let Some(now) = client.get_playing_now("iliekcomputers").await? {
//!         println!("Playing: {} by {}", now.track_name, now.artist_name);
//!     }
//!
//!     // Submissions need a validated user token
//!     client.set_auth_token("your-user-token").await?;
//!     client
//!         .submit_playing_now(&Listen::new("Fade", "Kanye West"))
//!         .await?;
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Errors
//!
//! Every operation returns [`error::Result`]. Validation problems
//! (missing token, empty or oversized payloads, timestamps on playing-now
//! listens) are reported before any request is sent; non-2xx responses
//! become [`ListenBrainzError::Api`] with the status and server message.

pub mod api;
mod client;
pub mod converters;
pub mod error;
pub mod models;

// Main interface
pub use client::{ClientConfig, ListenBrainz, API_ROOT_URL};

pub use api::query::DEFAULT_RECOMMENDATION_COUNT;
pub use error::ListenBrainzError;
pub use models::{ArtistType, Listen, ListenType};
