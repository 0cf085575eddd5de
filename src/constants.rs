use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;

pub static START_TIME: Lazy<DateTime<Utc>> = Lazy::new(Utc::now);

// Document groups
pub const USERS: &str = "users";
pub const CLOTHING_ITEMS: &str = "clothing_items";
pub const OUTFITS: &str = "outfits";
pub const COLLECTIONS: &str = "collections";

/// Fields no patch may touch once a document exists.
pub const IMMUTABLE_FIELDS: [&str; 2] = ["id", "user_id"];

pub const DEFAULT_RECENT_ITEMS: usize = 5;

/// Header carrying the caller identity, verified upstream.
pub const USER_ID_HEADER: &str = "X-User-Id";
