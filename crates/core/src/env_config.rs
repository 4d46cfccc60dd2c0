//! Environment variable parsing with warn-level logging for invalid values.

/// Parse an already looked-up environment value with a default fallback.
///
/// - If the variable is not set: returns `default` silently (expected case).
/// - If the variable is set but cannot be parsed: logs a warning and returns `default`.
pub fn parse_or_default<T: std::str::FromStr + std::fmt::Display>(
    var: &str,
    raw: Option<&str>,
    default: T,
) -> T {
    match raw {
        Some(v) => match v.trim().parse() {
            Ok(n) => n,
            Err(_) => {
                tracing::warn!(
                    var,
                    value = %v,
                    default = %default,
                    "invalid env var value, using default"
                );
                default
            },
        },
        None => default,
    }
}

/// Trim a raw value, treating blank as unset.
#[must_use]
pub fn non_blank(raw: Option<String>) -> Option<String> {
    raw.map(|v| v.trim().to_owned()).filter(|v| !v.is_empty())
}

/// Split a comma-separated value into trimmed, non-empty items.
#[must_use]
pub fn split_list(raw: &str) -> Vec<String> {
    raw.split(',').map(str::trim).filter(|s| !s.is_empty()).map(str::to_owned).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_or_default_valid_value() {
        assert_eq!(parse_or_default("PORT", Some("42"), 10_u64), 42);
    }

    #[test]
    fn test_parse_or_default_invalid_value() {
        assert_eq!(parse_or_default("PORT", Some("banana"), 10_u64), 10);
    }

    #[test]
    fn test_parse_or_default_trims() {
        assert_eq!(parse_or_default("X", Some(" 7 "), 1_u64), 7);
        assert_eq!(parse_or_default("X", Some("-"), 1_u64), 1);
        assert_eq!(parse_or_default::<u64>("X", None, 1), 1);
    }

    #[test]
    fn test_non_blank() {
        assert_eq!(non_blank(Some("   ".to_owned())), None);
        assert_eq!(non_blank(Some(" x ".to_owned())), Some("x".to_owned()));
        assert_eq!(non_blank(None), None);
    }

    #[test]
    fn test_split_list_trims_and_drops_empty() {
        assert_eq!(split_list(" api.example.com, ,localhost "), vec!["api.example.com", "localhost"]);
    }
}
