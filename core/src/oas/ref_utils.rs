#![deny(missing_docs)]

//! # Reference Utilities
//!
//! Shared helpers for reading local `$ref` pointers of the form
//! `#/components/{section}/{name}`.
//!
//! Only document-local pointers are understood; nothing is ever fetched.

use percent_encoding::percent_decode_str;

/// Extracts a component name from a `$ref` if it points to exactly
/// `#/components/{section}/{name}`.
///
/// Returns `None` for external references, other sections, deeper pointers
/// (`#/components/schemas/Pet/properties/id`) and empty names.
pub(crate) fn extract_component_name(ref_str: &str, section: &str) -> Option<String> {
    let pointer = ref_str.strip_prefix("#/")?;
    let segments: Vec<&str> = pointer.split('/').collect();

    if segments.len() != 3 {
        return None;
    }
    if segments[0] != "components" || segments[1] != section {
        return None;
    }

    let name = decode_pointer_segment(segments[2]);
    if name.is_empty() {
        None
    } else {
        Some(name)
    }
}

/// Decodes a JSON Pointer segment (handles `~1` and `~0`).
pub(crate) fn decode_pointer_segment(segment: &str) -> String {
    let decoded = segment.replace("~1", "/").replace("~0", "~");
    percent_decode_str(&decoded)
        .decode_utf8_lossy()
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_component_name_success() {
        let name = extract_component_name("#/components/schemas/Pet", "schemas").unwrap();
        assert_eq!(name, "Pet");
    }

    #[test]
    fn test_extract_component_name_wrong_section() {
        let name = extract_component_name("#/components/responses/Limit", "parameters");
        assert!(name.is_none());
    }

    #[test]
    fn test_extract_component_name_rejects_other_shapes() {
        assert!(extract_component_name("#/definitions/Pet", "schemas").is_none());
        assert!(extract_component_name("#/components/schemas/", "schemas").is_none());
        assert!(extract_component_name("#/components/schemas/Pet/properties/id", "schemas").is_none());
        assert!(extract_component_name("other.yaml#/components/schemas/Pet", "schemas").is_none());
    }

    #[test]
    fn test_decode_pointer_segment_percent_encoding() {
        let encoded = "User%20Profile~1details";
        let decoded = decode_pointer_segment(encoded);
        assert_eq!(decoded, "User Profile/details");
    }
}
