//! Diesel table definitions.
//!
//! Must match `backend/migrations`; regenerate with `diesel print-schema`
//! after changing a migration.

diesel::table! {
    /// Durable calculation history.
    calculations (id) {
        /// Sequential identifier assigned by the database.
        id -> Int8,
        /// Expression as submitted (max 255 characters).
        expression -> Varchar,
        /// Formatted result (max 100 characters).
        result -> Varchar,
        /// Insertion timestamp, defaulted by the database.
        created_at -> Timestamptz,
    }
}
