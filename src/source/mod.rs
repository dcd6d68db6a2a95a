//! Input sources.
//!
//! The only source is a followed file: [`Follower`] reads complete lines from the
//! current end-of-data position, and [`FollowLines`] wraps it in a blocking iterator.

pub mod follower;

pub use follower::{FollowLines, Follower, RETRY_INTERVAL};
