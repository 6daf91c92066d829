//! Diesel table definitions. Must match `backend/sql/users.sql`.

diesel::table! {
    /// Registered users. `email` carries a unique constraint.
    users (id) {
        id -> Int4,
        name -> Varchar,
        email -> Varchar,
        version -> Int4,
    }
}
