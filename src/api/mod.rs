//! ListenBrainz API plumbing.
//!
//! - [`transport`]: authenticated GET/POST against the API root
//! - [`submit`]: listen submission on [`crate::ListenBrainz`]
//! - [`query`]: listen history and recommendation queries

pub mod query;
pub mod submit;
pub mod transport;

pub use transport::Transport;
