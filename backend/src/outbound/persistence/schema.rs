//! Diesel table definitions.
//!
//! Must match `backend/migrations` exactly.

diesel::table! {
    /// Registered users. `email` carries a unique index.
    users (id) {
        id -> Uuid,
        session_id -> Uuid,
        name -> Varchar,
        email -> Varchar,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Meals recorded by users.
    meals (id) {
        id -> Uuid,
        user_id -> Uuid,
        session_id -> Uuid,
        name -> Varchar,
        description -> Text,
        is_on_diet -> Bool,
        /// Epoch milliseconds.
        date -> Int8,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::joinable!(meals -> users (user_id));
diesel::allow_tables_to_appear_in_same_query!(users, meals);
