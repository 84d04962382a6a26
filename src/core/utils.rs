//! Small formatting and convenience helpers shared by command handlers.

use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Serialize, de::DeserializeOwned};
use std::time::Duration;
use tracing::warn;

/// Alphanumeric charset used by [`generate_random_string`] by default.
pub const ALPHANUMERIC: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

/// Milliseconds between the Unix epoch and the first second of 2015 (Discord epoch).
const DISCORD_EPOCH_MS: u64 = 1_420_070_400_000;

/// Consistent envelope for structured responses.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApiResponse<T> {
    /// Whether the operation succeeded
    pub success: bool,
    /// When the response was produced
    pub timestamp: DateTime<Utc>,
    /// Payload, omitted when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    /// Human-readable note, omitted when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Wraps `data` and `message` in an [`ApiResponse`] stamped with the current time.
pub fn format_response<T: Serialize>(
    data: Option<T>,
    message: Option<&str>,
    success: bool,
) -> ApiResponse<T> {
    ApiResponse {
        success,
        timestamp: Utc::now(),
        data,
        message: message.filter(|m| !m.is_empty()).map(str::to_string),
    }
}

/// Uppercases the first character and lowercases the rest.
#[must_use]
pub fn capitalize(input: &str) -> String {
    let mut chars = input.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.as_str().to_lowercase().chars()).collect(),
        None => String::new(),
    }
}

/// Shortens `input` to at most `max_length` characters, ending in `...` when cut.
#[must_use]
pub fn truncate_string(input: &str, max_length: usize) -> String {
    if input.chars().count() <= max_length {
        return input.to_string();
    }
    let kept: String = input.chars().take(max_length.saturating_sub(3)).collect();
    format!("{kept}...")
}

/// Display styles for [`format_date`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DateFormat {
    /// `Jan 5, 2024`
    #[default]
    Short,
    /// `January 5, 2024, 03:04 PM`
    Long,
    /// `03:04:05 PM`
    Time,
}

/// Formats a UTC timestamp for display.
#[must_use]
pub fn format_date(timestamp: &DateTime<Utc>, format: DateFormat) -> String {
    let pattern = match format {
        DateFormat::Short => "%b %-d, %Y",
        DateFormat::Long => "%B %-d, %Y, %I:%M %p",
        DateFormat::Time => "%I:%M:%S %p",
    };
    timestamp.format(pattern).to_string()
}

/// Formats milliseconds since the Unix epoch, or `Invalid Date` when out of range.
#[must_use]
pub fn format_timestamp_millis(millis: i64, format: DateFormat) -> String {
    DateTime::from_timestamp_millis(millis)
        .map_or_else(|| "Invalid Date".to_string(), |ts| format_date(&ts, format))
}

/// Builds a random string of `length` characters drawn from `charset`.
#[must_use]
pub fn generate_random_string(length: usize, charset: &str) -> String {
    let pool: Vec<char> = charset.chars().collect();
    if pool.is_empty() {
        return String::new();
    }
    let mut rng = rand::thread_rng();
    (0..length).map(|_| pool[rng.gen_range(0..pool.len())]).collect()
}

/// Suspends the current task for `millis` milliseconds.
pub async fn delay(millis: u64) {
    tokio::time::sleep(Duration::from_millis(millis)).await;
}

/// Parses JSON, falling back to `default` (with a warning) on malformed input.
pub fn safe_json_parse<T: DeserializeOwned>(json: &str, default: T) -> T {
    match serde_json::from_str(json) {
        Ok(value) => value,
        Err(e) => {
            warn!(error = %e, "Failed to parse JSON");
            default
        }
    }
}

/// Creation time encoded in a Discord snowflake id.
#[must_use]
pub fn snowflake_timestamp(id: u64) -> DateTime<Utc> {
    let millis = (id >> 22).saturating_add(DISCORD_EPOCH_MS);
    i64::try_from(millis)
        .ok()
        .and_then(DateTime::from_timestamp_millis)
        .unwrap_or_default()
}
