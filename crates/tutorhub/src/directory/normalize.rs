//! Tokenization helpers for delimiter-joined multi-value fields.

/// Split a comma-joined field such as `"Dhanmondi, Gulshan, "` into discrete
/// tokens, trimming each and dropping the empties. Display casing is kept so
/// tokens remain presentable; matching lowercases both sides instead.
pub fn normalize_multi_value(raw: Option<&str>) -> Vec<String> {
    let Some(raw) = raw else {
        return Vec::new();
    };

    raw.split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect()
}

/// Case-insensitive membership test over normalized tokens.
pub fn contains_ignore_case<S: AsRef<str>>(tokens: &[S], needle: &str) -> bool {
    let needle = needle.trim().to_lowercase();
    tokens
        .iter()
        .any(|token| token.as_ref().trim().to_lowercase() == needle)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_trims_and_drops_empty_tokens() {
        let tokens = normalize_multi_value(Some("Dhanmondi, Gulshan, "));
        assert_eq!(tokens, vec!["Dhanmondi", "Gulshan"]);
    }

    #[test]
    fn null_and_blank_inputs_yield_empty_sets() {
        assert!(normalize_multi_value(None).is_empty());
        assert!(normalize_multi_value(Some("")).is_empty());
        assert!(normalize_multi_value(Some(" , ,, ")).is_empty());
    }

    #[test]
    fn containment_ignores_case_and_padding() {
        let tokens = normalize_multi_value(Some("Dhanmondi, Gulshan"));
        assert!(contains_ignore_case(&tokens, "gulshan"));
        assert!(contains_ignore_case(&tokens, " DHANMONDI "));
        assert!(!contains_ignore_case(&tokens, "Banani"));
    }

    #[test]
    fn empty_set_never_contains_a_concrete_selection() {
        let tokens = normalize_multi_value(Some(" , "));
        assert!(!contains_ignore_case(&tokens, "Dhanmondi"));
    }
}
