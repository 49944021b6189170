/// Primary keys of the local `characters` table (SQLite `INTEGER`).
pub type DbId = i64;

/// Event timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Format of the `created` column on locally saved characters.
pub const CREATED_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Render the current local time in [`CREATED_FORMAT`].
pub fn created_now() -> String {
    chrono::Local::now().format(CREATED_FORMAT).to_string()
}
