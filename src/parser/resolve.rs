/// Primary type used when a row has no type at all
pub const FALLBACK_TYPE: &str = "normal";

/// Apply the type fallback rules: a lone secondary type is promoted to primary, and a row
/// with neither gets [`FALLBACK_TYPE`]. A secondary equal to the primary is kept.
pub fn resolve_types(type1: Option<String>, type2: Option<String>) -> (String, Option<String>) {
    match (type1, type2) {
        (Some(primary), secondary) => (primary, secondary),
        (None, Some(secondary)) => (secondary, None),
        (None, None) => (FALLBACK_TYPE.to_string(), None),
    }
}
