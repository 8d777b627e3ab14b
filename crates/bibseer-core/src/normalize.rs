use once_cell::sync::Lazy;
use regex::Regex;

/// Reduce a title to lowercase alphanumerics only.
///
/// Used as the comparison key for deduplication and self-citation matching;
/// never displayed.
pub fn normalize_title(title: &str) -> String {
    static NON_ALNUM: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^a-z0-9]").unwrap());
    let lowered = title.to_lowercase();
    NON_ALNUM.replace_all(&lowered, "").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_case_and_punctuation_insensitive() {
        assert_eq!(normalize_title("Deep Learning!"), "deeplearning");
        assert_eq!(
            normalize_title("Deep Learning!"),
            normalize_title("deep learning")
        );
    }

    #[test]
    fn test_idempotent() {
        for s in ["Hello, World! 123", "  A--B  ", "", "!!!", "ÉTUDE: un éxample"] {
            let once = normalize_title(s);
            assert_eq!(normalize_title(&once), once);
        }
    }

    #[test]
    fn test_strips_everything_non_alphanumeric() {
        assert_eq!(normalize_title("Hello, World! 123"), "helloworld123");
        assert_eq!(normalize_title("  A--B  "), "ab");
        assert_eq!(normalize_title("!!!"), "");
    }
}
