//! # Schema Path Algebra
//!
//! Pure functions over slash-delimited schema paths. Two path forms flow
//! through the engine:
//!
//! - A **scope pointer** is the raw `$ref`-style form a UI schema carries,
//!   e.g. `#/properties/comments/0/message`. It may contain the `#`
//!   fragment marker, `properties` keyword segments, and numeric array
//!   indexes.
//!
//! - An **instance path** is the normalized form that addresses the data
//!   instance, e.g. `comments/0/message`.
//!
//! `filter_indexes` maps a scope pointer onto the schema tree (indexes
//! removed); `normalize` maps it onto the data tree (keywords removed).
//!
//! ## Invariants
//!
//! - `normalize` and `filter_indexes` are idempotent.
//! - All functions are total: the empty path and paths with trailing
//!   separators produce defined (and tested) results, never panics.
//! - A property literally named `properties` or a purely numeric property
//!   name cannot be represented; this is a limitation of the pointer
//!   dialect itself, not of this module.

/// Normalize a path into instance-path form.
///
/// Strips the `#` fragment marker, empty segments (redundant separators),
/// and `properties` keyword segments. Numeric array indexes are kept —
/// they are meaningful against the data tree.
///
/// `normalize("")` is `""`; `normalize` is idempotent.
pub fn normalize(path: &str) -> String {
    path.split('/')
        .filter(|fragment| !fragment.is_empty() && *fragment != "#" && *fragment != "properties")
        .collect::<Vec<_>>()
        .join("/")
}

/// Remove purely numeric segments from a path, preserving all others in
/// order.
///
/// The result is valid against the *schema* tree rather than the *data*
/// tree: `#/properties/comments/0/message` becomes
/// `#/properties/comments/message`. The leading `#` marker survives;
/// redundant separators do not. Idempotent.
pub fn filter_indexes(path: &str) -> String {
    path.split('/')
        .filter(|fragment| {
            !fragment.is_empty() && !fragment.bytes().all(|b| b.is_ascii_digit())
        })
        .collect::<Vec<_>>()
        .join("/")
}

/// Parent path: everything up to (but not including) the last separator.
///
/// `inits("age")` and `inits("")` are both `""`.
pub fn inits(path: &str) -> String {
    match path.rfind('/') {
        Some(idx) => path[..idx].to_string(),
        None => String::new(),
    }
}

/// Final segment of a path.
///
/// The empty path and a path with a trailing separator both yield `""`.
pub fn last_fragment(path: &str) -> &str {
    match path.rsplit('/').next() {
        Some(fragment) => fragment,
        None => path,
    }
}

/// Final segment of a path, transformed into a human-readable label.
///
/// Camel-case humps and `_`/`-` separators split into words; the first
/// word is capitalized, the rest are lower-cased:
/// `#/properties/firstName` becomes `First name`.
pub fn beautified_last_fragment(path: &str) -> String {
    beautify(last_fragment(path))
}

fn beautify(fragment: &str) -> String {
    let mut words: Vec<String> = Vec::new();
    let mut current = String::new();
    for c in fragment.chars() {
        if c == '_' || c == '-' || c == ' ' {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
        } else if c.is_uppercase() && !current.is_empty() {
            words.push(std::mem::take(&mut current));
            current.push(c);
        } else {
            current.push(c);
        }
    }
    if !current.is_empty() {
        words.push(current);
    }

    let mut out = String::new();
    for (i, word) in words.iter().enumerate() {
        let lower = word.to_lowercase();
        if i == 0 {
            let mut chars = lower.chars();
            if let Some(first) = chars.next() {
                out.extend(first.to_uppercase());
                out.push_str(chars.as_str());
            }
        } else {
            out.push(' ');
            out.push_str(&lower);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_strips_marker_and_keywords() {
        assert_eq!(normalize("#/properties/age"), "age");
        assert_eq!(
            normalize("#/properties/personal/properties/age"),
            "personal/age"
        );
    }

    #[test]
    fn test_normalize_keeps_array_indexes() {
        assert_eq!(
            normalize("#/properties/comments/0/message"),
            "comments/0/message"
        );
    }

    #[test]
    fn test_normalize_removes_redundant_separators() {
        assert_eq!(normalize("a//b///c"), "a/b/c");
        assert_eq!(normalize("/a/b/"), "a/b");
    }

    #[test]
    fn test_normalize_is_idempotent() {
        for path in [
            "#/properties/age",
            "#/properties/comments/0/message",
            "a//b/",
            "",
            "#",
        ] {
            let once = normalize(path);
            assert_eq!(normalize(&once), once, "not idempotent for {path:?}");
        }
    }

    #[test]
    fn test_normalize_empty_and_marker_only() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("#"), "");
        assert_eq!(normalize("#/"), "");
    }

    #[test]
    fn test_filter_indexes_removes_numeric_segments() {
        assert_eq!(
            filter_indexes("#/properties/comments/0/message"),
            "#/properties/comments/message"
        );
        assert_eq!(filter_indexes("items/0/name"), "items/name");
        assert_eq!(filter_indexes("a/12/b/345/c"), "a/b/c");
    }

    #[test]
    fn test_filter_indexes_preserves_non_numeric_segments_in_order() {
        assert_eq!(filter_indexes("#/properties/age"), "#/properties/age");
        assert_eq!(filter_indexes("a1/b2"), "a1/b2");
    }

    #[test]
    fn test_filter_indexes_is_idempotent() {
        for path in ["#/properties/comments/0/message", "a/0/b", "", "7"] {
            let once = filter_indexes(path);
            assert_eq!(filter_indexes(&once), once, "not idempotent for {path:?}");
        }
    }

    #[test]
    fn test_inits() {
        assert_eq!(inits("#/properties/age"), "#/properties");
        assert_eq!(inits("#/properties"), "#");
        assert_eq!(inits("age"), "");
        assert_eq!(inits(""), "");
    }

    #[test]
    fn test_last_fragment() {
        assert_eq!(last_fragment("#/properties/age"), "age");
        assert_eq!(last_fragment("age"), "age");
        assert_eq!(last_fragment(""), "");
        assert_eq!(last_fragment("a/b/"), "");
    }

    #[test]
    fn test_beautified_last_fragment_camel_case() {
        assert_eq!(beautified_last_fragment("#/properties/firstName"), "First name");
        assert_eq!(
            beautified_last_fragment("#/properties/dateOfBirth"),
            "Date of birth"
        );
    }

    #[test]
    fn test_beautified_last_fragment_underscores_and_dashes() {
        assert_eq!(beautified_last_fragment("first_name"), "First name");
        assert_eq!(beautified_last_fragment("first-name"), "First name");
    }

    #[test]
    fn test_beautified_last_fragment_single_word_and_empty() {
        assert_eq!(beautified_last_fragment("age"), "Age");
        assert_eq!(beautified_last_fragment(""), "");
    }
}
