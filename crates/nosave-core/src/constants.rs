//! Application-wide constants
//!
//! Column names, URL templates and user-facing strings shared by the
//! source, the launcher and the frontends.

/// Package id of the default chat application
pub const CHAT_APP_PACKAGE: &str = "com.whatsapp";

/// Human-readable name of the default chat application
pub const CHAT_APP_NAME: &str = "WhatsApp";

/// Deep link that opens a chat; the number goes in the `phone` query parameter
pub const CHAT_DEEP_LINK_BASE: &str = "https://api.whatsapp.com/send";

/// Market-style store URI prefix, followed by the package id
pub const MARKET_URI_BASE: &str = "market://details?id=";

/// Public web page of the store, followed by the package id
pub const STORE_WEB_BASE: &str = "https://play.google.com/store/apps/details?id=";

/// Desktop executable probed on PATH to decide whether the chat app is installed
pub const DESKTOP_CHAT_COMMAND: &str = "whatsapp-for-linux";

/// Default timestamp pattern ("MMM dd, yyyy hh:mm a")
pub const DEFAULT_DATE_FORMAT: &str = "%b %d, %Y %I:%M %p";

/// File name of the call-history database inside the data dir
pub const HISTORY_DB_FILE: &str = "call_history.db";

/// Prefix of every load failure message
pub const LOAD_ERROR_PREFIX: &str = "Error loading call logs";

// Call-history columns, named after the platform call log
pub mod columns {
    pub const ID: &str = "_id";
    pub const NUMBER: &str = "number";
    pub const CACHED_NAME: &str = "name";
    pub const DATE: &str = "date";
    pub const DURATION: &str = "duration";
    pub const TYPE: &str = "type";

    /// Table holding one row per call
    pub const TABLE: &str = "calls";

    /// Projection requested on every fetch
    pub const PROJECTION: [&str; 6] = [ID, NUMBER, CACHED_NAME, DATE, DURATION, TYPE];

    /// Most recent calls first
    pub const SORT_ORDER: &str = "date DESC";
}

// Raw call type codes used by the platform call log
pub mod call_types {
    pub const INCOMING: i64 = 1;
    pub const OUTGOING: i64 = 2;
    pub const MISSED: i64 = 3;
    pub const REJECTED: i64 = 5;
    pub const BLOCKED: i64 = 6;
}
