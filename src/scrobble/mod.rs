//! Scrobble history: the endpoint client, raw payload shapes and normalization.

pub mod api;
pub mod models;
pub mod normalize;

pub use api::{HistoryClient, HistorySource};
pub use models::{Track, TrackKey};
pub use normalize::{Snapshot, split_history};
