//! Text matchers for string values, labels and rule names

use std::fmt;

#[derive(Debug, Clone)]
pub enum TextMatch {
    Exact(String),
    StartsWith(String),
    Contains(String),
    /// Any of the given texts, exactly
    OneOf(Vec<String>),
}

impl TextMatch {
    pub fn matches(&self, actual: &str) -> bool {
        match self {
            TextMatch::Exact(expected) => actual == expected,
            TextMatch::StartsWith(prefix) => actual.starts_with(prefix.as_str()),
            TextMatch::Contains(needle) => actual.contains(needle.as_str()),
            TextMatch::OneOf(options) => options.iter().any(|o| o == actual),
        }
    }

    /// Panic with `context` in the message unless `actual` matches
    pub fn assert(&self, actual: &str, context: &str) {
        assert!(
            self.matches(actual),
            "{}: Expected {}, but got '{}'",
            context,
            self,
            actual
        );
    }
}

impl fmt::Display for TextMatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TextMatch::Exact(expected) => write!(f, "'{}'", expected),
            TextMatch::StartsWith(prefix) => write!(f, "text starting with '{}'", prefix),
            TextMatch::Contains(needle) => write!(f, "text containing '{}'", needle),
            TextMatch::OneOf(options) => write!(f, "one of {:?}", options),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matchers() {
        assert!(TextMatch::Exact("a".into()).matches("a"));
        assert!(!TextMatch::Exact("a".into()).matches("ab"));
        assert!(TextMatch::StartsWith("//".into()).matches("//foo"));
        assert!(TextMatch::Contains(":".into()).matches("//foo:bar"));
        assert!(TextMatch::OneOf(vec!["x".into(), "y".into()]).matches("y"));
    }

    #[test]
    #[should_panic(expected = "rules[0]: Expected 'a', but got 'b'")]
    fn test_assert_reports_context() {
        TextMatch::Exact("a".into()).assert("b", "rules[0]");
    }
}
