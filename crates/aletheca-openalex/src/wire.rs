//! Field-name translation at the JSON boundary
//!
//! Some OpenAlex keys are not legal Rust identifiers. The table below maps
//! record field names to their wire keys; decoders read through
//! [`wire_key`] and serializers write through it, so the Rust-side name never
//! appears on the wire and vice versa.

/// `(field name, wire key)` pairs.
pub const FIELD_RENAMES: &[(&str, &str)] = &[("two_yr_mean_citedness", "2yr_mean_citedness")];

/// Wire key for a record field name.
pub fn wire_key(field: &str) -> &str {
    FIELD_RENAMES
        .iter()
        .find(|(f, _)| *f == field)
        .map_or(field, |(_, wire)| wire)
}

/// Record field name for a wire key.
pub fn field_name(wire: &str) -> &str {
    FIELD_RENAMES
        .iter()
        .find(|(_, w)| *w == wire)
        .map_or(wire, |(field, _)| field)
}
