//! Form field sanitization
//!
//! Every accepted field value is tag-stripped and entity-escaped here before
//! it can be interpolated into a rendered message body. Message bodies are
//! built by string substitution, so nothing user-authored may survive as
//! markup.

use std::collections::HashSet;

/// Trim a raw field value and neutralize any markup in it.
///
/// `<script>alert(1)</script>John` becomes `John`; characters meaningful to
/// HTML (`<`, `>`, `&`) in the remaining text come out entity-escaped.
pub fn clean_text(input: &str) -> String {
    let mut builder = ammonia::Builder::default();
    // No tag survives; script and style contents are dropped entirely.
    builder.tags(HashSet::new());
    builder.clean(input.trim()).to_string()
}
