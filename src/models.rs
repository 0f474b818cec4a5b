//! Core data models for batchdex.
//!
//! An [`OrgRecord`] is the sole entity: one organization as reported by the
//! remote catalog, constructed transiently during an ingestion run, written
//! once to the store, and from then on only read.

/// A single organization record.
///
/// `slug` is the natural key — unique across the store. Every other field
/// is an opaque display string and may be empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrgRecord {
    pub name: String,
    pub slug: String,
    pub description: String,
    pub batch: String,
    pub logo_url: String,
    pub website_url: String,
    pub tags: Vec<String>,
    pub location: String,
}

/// Display projection used by the listing table and the selection prompt.
#[derive(Debug, Clone)]
pub struct OrgSummary {
    pub name: String,
    pub website_url: String,
    pub location: String,
}

/// Delimiter used to pack `tags` into a single TEXT column.
pub const TAG_DELIMITER: char = ',';

/// Join tags into the stored delimited form.
///
/// A tag that itself contains the delimiter will not round-trip through
/// [`split_tags`]; the catalog does not emit such tags.
pub fn join_tags(tags: &[String]) -> String {
    tags.join(&TAG_DELIMITER.to_string())
}

/// Split the stored delimited form back into a tag list. The empty string
/// decodes to no tags, not one empty tag.
pub fn split_tags(raw: &str) -> Vec<String> {
    if raw.is_empty() {
        return Vec::new();
    }
    raw.split(TAG_DELIMITER).map(str::to_string).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tags(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_tags_round_trip() {
        let original = tags(&["fintech", "b2b", "machine learning"]);
        assert_eq!(split_tags(&join_tags(&original)), original);
    }

    #[test]
    fn test_single_tag_round_trip() {
        let original = tags(&["devtools"]);
        assert_eq!(split_tags(&join_tags(&original)), original);
    }

    #[test]
    fn test_empty_tags_round_trip() {
        assert_eq!(join_tags(&[]), "");
        assert_eq!(split_tags(""), Vec::<String>::new());
    }

    #[test]
    fn test_tag_with_delimiter_does_not_round_trip() {
        // Documented invariant: a delimiter inside a tag corrupts the list.
        let original = tags(&["a,b"]);
        assert_ne!(split_tags(&join_tags(&original)), original);
    }
}
