//! Diesel table definitions for the PostgreSQL schema.
//!
//! These must match the migrations exactly; regenerate or update them by hand
//! whenever a migration changes the schema.

diesel::table! {
    /// Profile records, one per user.
    profiles (id) {
        /// Surrogate key (BIGSERIAL).
        id -> BigInt,
        /// Owning user; carries a unique constraint.
        user_id -> BigInt,
        /// Contact email.
        email -> Text,
        /// Record creation timestamp.
        created_at -> Timestamptz,
        /// Last modification timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Contact records attached to profiles.
    contacts (id) {
        /// Surrogate key (BIGSERIAL).
        id -> BigInt,
        /// Given name, empty when not provided.
        first_name -> Text,
        /// Family name, empty when not provided.
        last_name -> Text,
        /// National identification number, empty when not provided.
        nin -> Text,
        /// Date of birth; null when not provided.
        dob -> Nullable<Date>,
        /// Phone number, empty when not provided.
        phone -> Text,
        /// Owning profile.
        profile_id -> BigInt,
        /// Free-text classification tag.
        #[sql_name = "type"]
        type_ -> Text,
        /// Record creation timestamp.
        created_at -> Timestamptz,
        /// Last modification timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Address records attached to profiles.
    addresses (id) {
        /// Surrogate key (BIGSERIAL).
        id -> BigInt,
        /// Street name.
        street_name -> Text,
        /// Street number.
        street_no -> Text,
        /// City.
        city -> Text,
        /// County or region.
        county -> Text,
        /// Country.
        country -> Text,
        /// Owning profile.
        profile_id -> BigInt,
        /// Postal code, empty when not provided.
        postal_code -> Text,
        /// Building identifier, empty when not provided.
        building -> Text,
        /// Apartment identifier, empty when not provided.
        apartment -> Text,
        /// Free text, capped at 512 characters.
        additional_data -> Varchar,
        /// Free-text classification tag.
        #[sql_name = "type"]
        type_ -> Text,
        /// Record creation timestamp.
        created_at -> Timestamptz,
        /// Last modification timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Company records attached to profiles.
    companies (id) {
        /// Surrogate key (BIGSERIAL).
        id -> BigInt,
        /// Legal name.
        name -> Text,
        /// Registration number.
        registration_no -> Text,
        /// Fiscal code.
        fiscal_code -> Text,
        /// Owning profile.
        profile_id -> BigInt,
        /// Free-text classification tag.
        #[sql_name = "type"]
        type_ -> Text,
        /// Record creation timestamp.
        created_at -> Timestamptz,
        /// Last modification timestamp.
        updated_at -> Timestamptz,
    }
}
