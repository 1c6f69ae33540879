//! Diesel table definitions for the PostgreSQL schema.
//!
//! Must match `migrations/` exactly; regenerate with `diesel print-schema`
//! after changing a migration.

diesel::table! {
    /// Stored reservations, one row per name.
    reservations (id) {
        /// Primary key drawn from the `SERIAL` sequence.
        id -> Int4,
        /// Name as supplied by the caller.
        name -> Varchar,
    }
}
