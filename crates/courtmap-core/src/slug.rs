//! URL-safe slugs for region display names.
//!
//! A slug is the identifier a region page is published under, e.g.
//! "District of Puerto Rico" → `district-of-puerto-rico`.
//!
//! # Rules
//!
//! 1. Lowercase the whole name
//! 2. Collapse every run of whitespace into a single `-`
//! 3. Drop every character outside `[a-z0-9-]`
//!
//! "Whitespace" is the ECMAScript `\s` class, so slugs agree with the links
//! the site's client-side code builds. It includes U+FEFF and excludes
//! U+0085, unlike [`char::is_whitespace`].
//!
//! Distinct names that differ only in dropped characters ("St. Louis" and
//! "St Louis") produce the same slug. Region names in the boundary files
//! are unique enough that this never happens in practice, so it is not
//! checked.

/// Convert a display name into its slug.
///
/// Total over every input; slugging a slug returns it unchanged.
pub fn slugify(name: &str) -> String {
    let lower = name.to_lowercase();
    let mut out = String::with_capacity(lower.len());
    let mut in_whitespace = false;

    for c in lower.chars() {
        if is_separator(c) {
            if !in_whitespace {
                out.push('-');
                in_whitespace = true;
            }
            continue;
        }
        in_whitespace = false;
        if c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' {
            out.push(c);
        }
    }

    out
}

fn is_separator(c: char) -> bool {
    matches!(
        c,
        '\t' | '\n'
            | '\u{0B}'
            | '\u{0C}'
            | '\r'
            | ' '
            | '\u{A0}'
            | '\u{1680}'
            | '\u{2000}'..='\u{200A}'
            | '\u{2028}'
            | '\u{2029}'
            | '\u{202F}'
            | '\u{205F}'
            | '\u{3000}'
            | '\u{FEFF}'
    )
}
