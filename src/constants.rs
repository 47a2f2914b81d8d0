//! Application-wide constants
//!
//! This module contains all constant values used throughout the application.
//! Constants are grouped by their purpose for better organization.

// =============================================================================
// SERVER DEFAULTS
// =============================================================================

/// Default server host address
pub const DEFAULT_SERVER_HOST: &str = "0.0.0.0";

/// Default server port
pub const DEFAULT_SERVER_PORT: u16 = 8080;

/// Default directory served for non-API paths
pub const DEFAULT_STATIC_DIR: &str = "public";

/// Default header carrying the original client address (set by Cloudflare)
pub const DEFAULT_CLIENT_IP_HEADER: &str = "CF-Connecting-IP";

/// Default value of `Access-Control-Allow-Origin`
pub const DEFAULT_CORS_ALLOW_ORIGIN: &str = "*";

/// Client address used when neither the header nor the peer address is known
pub const UNKNOWN_CLIENT_IP: &str = "unknown";

// =============================================================================
// DATABASE DEFAULTS
// =============================================================================

/// Default maximum database connections in the pool
pub const DEFAULT_DATABASE_MAX_CONNECTIONS: u32 = 20;

// =============================================================================
// API ROUTES
// =============================================================================

/// Submission endpoint
pub const PREDICTIONS_PATH: &str = "/api/predictions";

/// Running average endpoint
pub const AVERAGE_PATH: &str = "/api/predictions/average";

/// Summary statistics endpoint
pub const STATS_PATH: &str = "/api/predictions/stats";

/// Methods advertised in `Access-Control-Allow-Methods`
pub const CORS_ALLOW_METHODS: &str = "GET, POST, OPTIONS";

/// Headers advertised in `Access-Control-Allow-Headers`
pub const CORS_ALLOW_HEADERS: &str = "Content-Type";

// =============================================================================
// SUBMISSION LIMITS
// =============================================================================

/// Maximum accepted request body in bytes (1 KB)
pub const MAX_REQUEST_SIZE: usize = 1024;

/// Maximum username length after trimming
pub const MAX_USERNAME_LENGTH: u64 = 50;

/// Smallest accepted prediction in days
pub const MIN_DAYS_UNTIL_POP: i64 = 1;

/// Largest accepted prediction in days (roughly a century)
pub const MAX_DAYS_UNTIL_POP: i64 = 36500;

// =============================================================================
// RATE LIMITING
// =============================================================================

/// One submission per hashed IP within this window
pub const DEFAULT_RATE_LIMIT_WINDOW_SECS: i64 = 5 * 60;

/// Longest configurable window (30 days)
pub const MAX_RATE_LIMIT_WINDOW_SECS: i64 = 30 * 24 * 60 * 60;

// =============================================================================
// ERROR MESSAGES
// =============================================================================

/// Client-facing messages. Internal failures never expose more than these.
pub mod messages {
    pub const INVALID_CONTENT_TYPE: &str = "Invalid content type";
    pub const REQUEST_TOO_LARGE: &str = "Request too large";
    pub const INVALID_INPUT: &str = "Invalid input";
    pub const INVALID_DAYS: &str = "Invalid days value";
    pub const USERNAME_TOO_LONG: &str = "Username too long";
    pub const RATE_LIMITED: &str = "Please wait before submitting again";
    pub const USERNAME_TAKEN: &str = "Username already taken";
    pub const SERVER_ERROR: &str = "Server error";
    pub const AVERAGE_FAILED: &str = "Failed to get average";
    pub const STATS_FAILED: &str = "Failed to get stats";
}
