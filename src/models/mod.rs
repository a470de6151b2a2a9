//! Data models for ListenBrainz requests and responses.
//!
//! [`Listen`] is the user-facing value type. The `payload` and `response`
//! modules mirror the JSON the service speaks.

pub mod listen;
pub mod payload;
pub mod response;

// Re-exports for convenience
pub use listen::Listen;
pub use payload::{ListenPayload, ListenType, SubmitListens, TrackMetadata};
pub use response::{ArtistType, ListenCountResponse, ListensResponse, ValidateToken};
