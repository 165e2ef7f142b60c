//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/migrations` exactly. Regenerate with
//! `diesel print-schema` after changing a migration.

diesel::table! {
    /// Address book entries.
    ///
    /// `phone_number` and `lower(email)` carry unique indexes; PostgreSQL
    /// treats NULL emails as distinct, so any number of contacts may omit one.
    contacts (id) {
        /// Serial primary key assigned on insert.
        id -> Int4,
        /// Display name (max 100 characters).
        name -> Varchar,
        /// Phone number (5 to 15 characters).
        phone_number -> Varchar,
        email -> Nullable<Text>,
        /// Postal address (max 250 characters).
        address -> Nullable<Varchar>,
    }
}
