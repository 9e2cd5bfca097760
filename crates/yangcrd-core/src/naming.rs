//! # Naming Normalization
//!
//! Pure name transforms shared by the compiler and the mapper:
//!
//! - [`to_display_name`] turns a schema identifier (`admin-state`,
//!   `ietf-interfaces`, `vlan.id`) into the camelCase or PascalCase spelling
//!   used by the resource schema and the external instance representation.
//! - [`fold_key`] produces the case- and separator-insensitive key used to
//!   match externally supplied instance keys against schema names. It is
//!   never used for display.
//!
//! Both functions are total over ASCII identifiers and hold no state; the
//! acronym table is a constant.

/// Words that are rendered with a fixed spelling once the word boundary has
/// been determined.
const KNOWN_WORDS: &[(&str, &str)] = &[("Ietf", "IETF")];

fn known_word(word: &[u8]) -> Option<&'static str> {
    KNOWN_WORDS
        .iter()
        .find(|(from, _)| from.as_bytes() == word)
        .map(|(_, to)| *to)
}

/// Convert a schema identifier into its display spelling.
///
/// Hyphens and dots are treated as underscores; an underscore immediately
/// followed by a lower-case letter is a word boundary and is dropped, the
/// letter being upper-cased. Digits pass through unchanged. A leading
/// separator is replaced by `X` (`x` in camelCase). With `pascal == false`
/// the first letter keeps its original case.
///
/// `my_field-name_2` becomes `myFieldName_2` (camel) or `MyFieldName_2`
/// (pascal).
pub fn to_display_name(identifier: &str, pascal: bool) -> String {
    let s = identifier.as_bytes();
    if s.is_empty() {
        return String::new();
    }

    let fix = |c: u8| if c == b'-' || c == b'.' { b'_' } else { c };

    let mut out: Vec<u8> = Vec::with_capacity(s.len());
    let mut i = 0;
    if fix(s[0]) == b'_' {
        out.push(if pascal { b'X' } else { b'x' });
        i += 1;
    }

    // Words are delimited by '_' or an upper-case letter; digits are words.
    while i < s.len() {
        let mut c = fix(s[i]);
        if c == b'_' && i + 1 < s.len() && s[i + 1].is_ascii_lowercase() {
            i += 1;
            continue;
        }
        if c.is_ascii_digit() {
            out.push(c);
            i += 1;
            continue;
        }
        if c.is_ascii_lowercase() && (i > 0 || pascal) {
            c = c.to_ascii_uppercase();
        }
        let start = out.len();
        out.push(c);
        while i + 1 < s.len() && s[i + 1].is_ascii_lowercase() {
            i += 1;
            out.push(s[i]);
        }
        if let Some(word) = known_word(&out[start..]) {
            out.truncate(start);
            out.extend_from_slice(word.as_bytes());
        }
        i += 1;
    }

    // Only ASCII bytes are rewritten, so multi-byte sequences survive intact.
    String::from_utf8(out).unwrap_or_else(|e| String::from_utf8_lossy(e.as_bytes()).into_owned())
}

/// Fold a key for structural matching: lower-case, hyphens and underscores removed.
pub fn fold_key(identifier: &str) -> String {
    identifier
        .to_lowercase()
        .chars()
        .filter(|c| *c != '-' && *c != '_')
        .collect()
}

/// Lower-case plural of a name: `Interface` → `interfaces`, `Status` → `status`.
pub fn pluralize(name: &str) -> String {
    if name.is_empty() {
        return String::new();
    }
    let lower = name.to_lowercase();
    if lower.ends_with('s') {
        lower
    } else {
        format!("{lower}s")
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Folding is idempotent.
        #[test]
        fn fold_is_idempotent(s in "[A-Za-z0-9_-]{0,24}") {
            let once = fold_key(&s);
            prop_assert_eq!(fold_key(&once), once.clone());
            prop_assert!(!once.contains('-') && !once.contains('_'));
        }

        /// Display names fold back onto the schema name they came from, which
        /// is what lets external keys match schema children.
        #[test]
        fn display_name_folds_to_schema_name(
            s in "[a-z][a-z0-9]{0,8}(-[a-z0-9]{1,8}){0,3}",
            pascal in any::<bool>(),
        ) {
            prop_assert_eq!(fold_key(&to_display_name(&s, pascal)), fold_key(&s));
        }

        /// Display names never contain hyphens or dots.
        #[test]
        fn display_name_has_no_separators(s in "[a-z][a-z0-9.-]{0,16}") {
            let name = to_display_name(&s, false);
            prop_assert!(!name.contains('-'));
            prop_assert!(!name.contains('.'));
        }
    }
}
