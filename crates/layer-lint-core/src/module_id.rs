//! Normalization of module identifiers as printed by the host build.
//!
//! Build tools render modules with decoration, e.g. `project ':app:feature'`.
//! Everything downstream of graph ingestion works on the bare id.

/// Extracts the bare module id: the text between the first pair of single
/// quotes, or the input unchanged when it has no such pair.
///
/// ```
/// use layer_lint_core::module_id::extract;
///
/// assert_eq!(extract("project ':app:feature'"), ":app:feature");
/// assert_eq!(extract(":app:feature"), ":app:feature");
/// ```
#[must_use]
pub fn extract(input: &str) -> &str {
    let mut parts = input.split('\'');
    match (parts.next(), parts.next()) {
        (Some(_), Some(inner)) => inner,
        _ => input,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_project_decoration() {
        assert_eq!(extract("project ':app:feature'"), ":app:feature");
    }

    #[test]
    fn bare_id_is_unchanged() {
        assert_eq!(extract(":app:feature"), ":app:feature");
    }

    #[test]
    fn extraction_is_idempotent() {
        let once = extract("project ':core'");
        assert_eq!(extract(once), once);
    }

    #[test]
    fn takes_first_quoted_segment() {
        assert_eq!(extract("project ':a' depends on ':b'"), ":a");
    }

    #[test]
    fn unterminated_quote_yields_tail() {
        // split semantics: the second segment is whatever follows the quote
        assert_eq!(extract("project ':core"), ":core");
    }

    #[test]
    fn root_project_with_empty_path() {
        assert_eq!(extract("root project ''"), "");
    }
}
