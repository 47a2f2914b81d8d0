//! Utility functions

pub mod crypto;
pub mod time;

pub use crypto::{hash_ip, hash_string};
pub use time::{days_from, format_timestamp, now_utc};
