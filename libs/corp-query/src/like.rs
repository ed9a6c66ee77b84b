//! SQL `LIKE` patterns with `\` as the escape character.
//!
//! [`escape_like`] prepares user text for a bind parameter. With the `regex`
//! feature, [`ilike`] evaluates a pattern the way `ILIKE` does, for records
//! held in memory.

/// Escape `LIKE` metacharacters so `value` matches literally.
pub fn escape_like(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\\' | '%' | '_' => {
                out.push('\\');
                out.push(c);
            }
            _ => out.push(c),
        }
    }
    out
}

/// Translate a `LIKE` pattern into an anchored, case-insensitive regex.
///
/// `%` becomes `.*`, `_` becomes `.`, and everything else is matched
/// literally. An unpaired trailing `\` is a literal backslash.
#[cfg(feature = "regex")]
pub fn like_regex(pattern: &str) -> Result<regex::Regex, regex::Error> {
    let mut source = String::with_capacity(pattern.len() + 8);
    source.push_str("(?is)^");

    let mut literal = String::new();
    let mut chars = pattern.chars();
    while let Some(c) = chars.next() {
        match c {
            '%' | '_' => {
                source.push_str(&regex::escape(&literal));
                literal.clear();
                source.push_str(if c == '%' { ".*" } else { "." });
            }
            '\\' => literal.push(chars.next().unwrap_or('\\')),
            other => literal.push(other),
        }
    }
    source.push_str(&regex::escape(&literal));
    source.push('$');

    regex::Regex::new(&source)
}

/// Returns true when `text` matches `pattern`, ignoring case.
#[cfg(feature = "regex")]
pub fn ilike(text: &str, pattern: &str) -> bool {
    like_regex(pattern).is_ok_and(|re| re.is_match(text))
}

#[cfg(all(test, feature = "regex"))]
mod tests {
    use super::*;

    #[test]
    fn literal_match_is_case_insensitive() {
        assert!(ilike("Skywalker", "skywalker"));
        assert!(ilike("skywalker", "SKYWALKER"));
        assert!(!ilike("Skywalker", "skywalke"));
        assert!(ilike("", ""));
        assert!(!ilike("a", ""));
    }

    #[test]
    fn percent_matches_any_run() {
        assert!(ilike("Skyler", "sky%"));
        assert!(ilike("Skyler", "%ler"));
        assert!(ilike("Skyler", "%yle%"));
        assert!(ilike("Skyler", "%"));
        assert!(ilike("", "%"));
        assert!(ilike("abcabc", "%abc"));
        assert!(ilike("mississippi", "m%ss%pi"));
        assert!(!ilike("Skyler", "%xyz%"));
        assert!(ilike("two\nlines", "two%lines"));
    }

    #[test]
    fn underscore_matches_one_character() {
        assert!(ilike("BC1234567", "bc_______"));
        assert!(!ilike("BC123456", "bc_______"));
        assert!(ilike("V8W 1A1", "v8w_1a1"));
    }

    #[test]
    fn regex_syntax_in_values_is_literal() {
        assert!(ilike("a.b (c)", "a.b (c)"));
        assert!(!ilike("axb (c)", "a.b (c)"));
        assert!(ilike("1+1=2?", "1+1=2?"));
    }

    #[test]
    fn escaped_metacharacters_are_literal() {
        assert!(ilike("50% off", &format!("%{}%", escape_like("50%"))));
        assert!(!ilike("500 off", &format!("%{}%", escape_like("50%"))));
        assert!(ilike("a_b", &escape_like("a_b")));
        assert!(!ilike("axb", &escape_like("a_b")));
        assert!(ilike(r"c:\dir", &escape_like(r"c:\dir")));
    }

    #[test]
    fn trailing_escape_is_a_backslash() {
        assert!(ilike(r"sky\", r"sky\"));
        assert!(ilike(r"sky\", r"sky\\"));
        assert!(!ilike("sky", r"sky\"));
    }
}
