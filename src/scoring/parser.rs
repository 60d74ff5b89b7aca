//! Tolerant score parsing.
//!
//! Raw text is split on any run of commas, semicolons and whitespace. Tokens
//! that are not a finite number are dropped without error; survivors keep
//! their left-to-right order. Besides decimal notation, unsigned `0x`, `0o`
//! and `0b` integer literals are accepted.

fn is_separator(c: char) -> bool {
    c == ',' || c == ';' || c.is_whitespace()
}

/// Non-empty tokens of `raw`, in order.
pub fn tokens(raw: &str) -> impl Iterator<Item = &str> {
    raw.split(is_separator).filter(|t| !t.trim().is_empty())
}

/// Unsigned `0x1F`, `0o17` or `0b101` literal.
fn parse_prefixed_integer(token: &str) -> Option<f64> {
    let radix = match token.get(..2)? {
        "0x" | "0X" => 16,
        "0o" | "0O" => 8,
        "0b" | "0B" => 2,
        _ => return None,
    };
    let digits = &token[2..];
    if digits.is_empty() {
        return None;
    }
    digits.chars().try_fold(0.0, |acc: f64, c| {
        c.to_digit(radix).map(|d| acc * f64::from(radix) + f64::from(d))
    })
}

fn parse_token(token: &str) -> Option<f64> {
    parse_prefixed_integer(token)
        .or_else(|| token.parse::<f64>().ok())
        .filter(|v| v.is_finite())
}

/// Parse free text into an ordered list of scores.
pub fn parse_scores(raw: &str) -> Vec<f64> {
    tokens(raw).filter_map(parse_token).collect()
}

/// Tokens that `parse_scores` would silently drop. Used for diagnostics only.
pub fn rejected_tokens(raw: &str) -> Vec<&str> {
    tokens(raw).filter(|t| parse_token(t).is_none()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_mixed_separators_and_garbage() {
        assert_eq!(
            parse_scores("10, 9; 8  7,,x,6"),
            vec![10.0, 9.0, 8.0, 7.0, 6.0]
        );
    }

    #[test]
    fn test_empty_input() {
        assert!(parse_scores("").is_empty());
        assert!(parse_scores(" ,;\t\n ").is_empty());
    }

    #[test]
    fn test_decimals_and_signs() {
        assert_eq!(parse_scores("9.5 -1 +2 .5"), vec![9.5, -1.0, 2.0, 0.5]);
    }

    #[test]
    fn test_non_finite_dropped() {
        assert_eq!(parse_scores("NaN inf 10 -infinity"), vec![10.0]);
    }

    #[test]
    fn test_prefixed_integer_literals() {
        assert_eq!(parse_scores("0x10 0o17 0b101 0XfF"), vec![16.0, 15.0, 5.0, 255.0]);
        assert_eq!(parse_scores("Infinity 0x10 1e2"), vec![16.0, 100.0]);
        // Sign, empty digits and out-of-radix digits are not literals
        assert_eq!(rejected_tokens("-0x10 0x 0b12 0xg"), vec!["-0x10", "0x", "0b12", "0xg"]);
    }

    #[test]
    fn test_rejected_tokens() {
        assert_eq!(rejected_tokens("10 x 9;abc;"), vec!["x", "abc"]);
        assert!(rejected_tokens("1,2,3").is_empty());
    }

    #[test]
    fn test_order_preserved() {
        assert_eq!(parse_scores("3;1;2"), vec![3.0, 1.0, 2.0]);
    }

    proptest! {
        #[test]
        fn prop_reparse_is_stable(raw in "[0-9a-z.,; +-]{0,40}") {
            let first = parse_scores(&raw);
            let joined = first
                .iter()
                .map(|v| v.to_string())
                .collect::<Vec<_>>()
                .join(",");
            prop_assert_eq!(parse_scores(&joined), first);
        }

        #[test]
        fn prop_never_more_scores_than_tokens(raw in "\\PC{0,60}") {
            prop_assert!(parse_scores(&raw).len() <= tokens(&raw).count());
        }

        #[test]
        fn prop_integers_survive(values in proptest::collection::vec(-1000i32..1000, 0..12)) {
            let raw = values
                .iter()
                .map(|v| v.to_string())
                .collect::<Vec<_>>()
                .join(" ;, ");
            let expected: Vec<f64> = values.iter().map(|v| *v as f64).collect();
            prop_assert_eq!(parse_scores(&raw), expected);
        }
    }
}
