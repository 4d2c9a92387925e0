//! Event identifier generation.
//!
//! The mapper needs fresh identifiers for canonical fields the legacy
//! shapes cannot supply (snapshot ids, session ids). Identifiers are short
//! uuid-derived strings, optionally prefixed: `snap-1a2b3c4d5e6f`.

use uuid::Uuid;

/// Length of the random portion of a generated identifier.
const ID_LEN: usize = 12;

/// Generate a unique identifier, optionally prefixed.
///
/// The random portion is the leading hex of a v4 uuid; twelve characters is
/// plenty for batch-local uniqueness.
pub fn new_id(prefix: Option<&str>) -> String {
    let raw = Uuid::new_v4().simple().to_string();
    let short = &raw[..ID_LEN];
    match prefix {
        Some(p) => format!("{}-{}", p, short),
        None => short.to_string(),
    }
}
