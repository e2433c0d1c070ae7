use std::{borrow::Cow, cmp::Ordering};

/// How switch names are compared against the names of known descriptors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CaseRule {
    /// Names are folded to lower case before they're stored or compared
    #[default]
    Insensitive,

    /// Names are compared exactly as written
    Sensitive,
}

impl CaseRule {
    /// Fold a name into its canonical form under this rule.
    #[must_use]
    pub fn fold(self, name: &str) -> Cow<'_, str> {
        match self {
            CaseRule::Sensitive => Cow::Borrowed(name),
            CaseRule::Insensitive if !name.chars().any(char::is_uppercase) => Cow::Borrowed(name),
            CaseRule::Insensitive => Cow::Owned(name.to_lowercase()),
        }
    }

    /// Test two names for equality under this rule.
    #[must_use]
    pub fn matches(self, lhs: &str, rhs: &str) -> bool {
        match self {
            CaseRule::Sensitive => lhs == rhs,
            CaseRule::Insensitive => self.fold(lhs) == self.fold(rhs),
        }
    }

    /// Order two names under this rule.
    #[must_use]
    pub fn compare(self, lhs: &str, rhs: &str) -> Ordering {
        match self {
            CaseRule::Sensitive => lhs.cmp(rhs),
            CaseRule::Insensitive => self.fold(lhs).cmp(&self.fold(rhs)),
        }
    }

    /// Strip `prefix` from the front of `name`, comparing under this rule.
    #[must_use]
    pub fn strip_prefix<'a>(self, name: &'a str, prefix: &str) -> Option<&'a str> {
        match self {
            CaseRule::Sensitive => name.strip_prefix(prefix),
            CaseRule::Insensitive => {
                let head = name.get(..prefix.len())?;
                self.matches(head, prefix).then(|| &name[prefix.len()..])
            }
        }
    }
}

/// A configuration problem that makes parsing impossible. These are detected
/// before any argument is examined.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SettingsError {
    #[error("switch prefixes must not be empty strings")]
    EmptyPrefix,

    #[error("switch separators must not be empty strings")]
    EmptySeparator,

    #[error("the negation prefix must not be empty")]
    EmptyNegationPrefix,
}

/**
Settings that control how raw tokens are classified as switches, values, and
positionals.

The order of [`prefixes`][Settings::prefixes] matters: they're tried in order,
and the first literal match wins, so longer prefixes that share a start with
shorter ones (`--` and `-`) have to come first. The defaults are `--`, `-`, and
`/` as prefixes; `:` and `=` as separators; `no-` as the negation prefix; case
insensitive matching; and untagged members are bindable.
*/
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub prefixes: Vec<String>,
    pub separators: Vec<String>,
    pub negation_prefix: String,
    pub case: CaseRule,
    pub require_tags: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            prefixes: vec!["--".to_owned(), "-".to_owned(), "/".to_owned()],
            separators: vec![":".to_owned(), "=".to_owned()],
            negation_prefix: "no-".to_owned(),
            case: CaseRule::Insensitive,
            require_tags: false,
        }
    }
}

impl Settings {
    #[must_use]
    pub fn with_prefixes<I>(mut self, prefixes: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.prefixes = prefixes.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_separators<I>(mut self, separators: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.separators = separators.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_negation_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.negation_prefix = prefix.into();
        self
    }

    #[must_use]
    pub fn with_case(mut self, case: CaseRule) -> Self {
        self.case = case;
        self
    }

    /// Only bind members that carry an explicit argument tag.
    #[must_use]
    pub fn require_tags(mut self, require: bool) -> Self {
        self.require_tags = require;
        self
    }

    /// Check that these settings can be used to tokenize anything at all.
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.prefixes.iter().any(String::is_empty) {
            Err(SettingsError::EmptyPrefix)
        } else if self.separators.iter().any(String::is_empty) {
            Err(SettingsError::EmptySeparator)
        } else if self.negation_prefix.is_empty() {
            Err(SettingsError::EmptyNegationPrefix)
        } else {
            Ok(())
        }
    }

    /// If the (already trimmed) token starts with one of the prefixes, return
    /// the remainder after the first prefix that matches.
    #[must_use]
    pub fn strip_switch_prefix<'a>(&self, token: &'a str) -> Option<&'a str> {
        self.prefixes
            .iter()
            .find_map(|prefix| token.strip_prefix(prefix.as_str()))
    }

    /// True if this token would be read as a switch (or an end-of-switches
    /// marker) rather than a value.
    #[must_use]
    pub fn looks_like_switch(&self, token: &str) -> bool {
        self.strip_switch_prefix(token.trim()).is_some()
    }

    /// Split a switch body at the leftmost separator. When two separators
    /// match at the same position, the one declared first wins.
    #[must_use]
    pub fn split_separator<'a>(&self, body: &'a str) -> (&'a str, Option<&'a str>) {
        let best = self
            .separators
            .iter()
            .filter_map(|separator| {
                memchr::memmem::find(body.as_bytes(), separator.as_bytes())
                    .map(|position| (position, separator.len()))
            })
            .min_by_key(|&(position, _)| position);

        match best {
            None => (body, None),
            Some((position, len)) => (&body[..position], Some(&body[position + len..])),
        }
    }

    /// If `key` starts with the negation prefix, return the rest of it.
    #[must_use]
    pub fn strip_negation<'a>(&self, key: &'a str) -> Option<&'a str> {
        self.case.strip_prefix(key, &self.negation_prefix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn longest_prefix_must_come_first() {
        let settings = Settings::default();
        assert_eq!(settings.strip_switch_prefix("--name"), Some("name"));
        assert_eq!(settings.strip_switch_prefix("-name"), Some("name"));
        assert_eq!(settings.strip_switch_prefix("/name"), Some("name"));
        assert_eq!(settings.strip_switch_prefix("name"), None);

        let misordered = Settings::default().with_prefixes(["-", "--"]);
        assert_eq!(misordered.strip_switch_prefix("--name"), Some("-name"));
    }

    #[test]
    fn split_at_leftmost_separator() {
        let settings = Settings::default();
        assert_eq!(settings.split_separator("a=b:c"), ("a", Some("b:c")));
        assert_eq!(settings.split_separator("a:b=c"), ("a", Some("b=c")));
        assert_eq!(settings.split_separator("flag"), ("flag", None));
        assert_eq!(settings.split_separator("flag:"), ("flag", Some("")));
    }

    #[test]
    fn separator_ties_go_to_declaration_order() {
        let settings = Settings::default().with_separators(["=", "=="]);
        assert_eq!(settings.split_separator("a==b"), ("a", Some("=b")));

        let settings = Settings::default().with_separators(["==", "="]);
        assert_eq!(settings.split_separator("a==b"), ("a", Some("b")));
    }

    #[test]
    fn case_rules() {
        assert_eq!(CaseRule::Insensitive.fold("Verbose"), "verbose");
        assert_eq!(CaseRule::Sensitive.fold("Verbose"), "Verbose");
        assert!(CaseRule::Insensitive.matches("NAME", "name"));
        assert!(!CaseRule::Sensitive.matches("NAME", "name"));
        assert_eq!(
            CaseRule::Insensitive.strip_prefix("No-beta", "no-"),
            Some("beta")
        );
        assert_eq!(CaseRule::Sensitive.strip_prefix("No-beta", "no-"), None);
        assert_eq!(CaseRule::Insensitive.strip_prefix("n", "no-"), None);
    }

    #[test]
    fn validation() {
        assert_eq!(Settings::default().validate(), Ok(()));
        assert_eq!(
            Settings::default().with_prefixes(["--", ""]).validate(),
            Err(SettingsError::EmptyPrefix)
        );
        assert_eq!(
            Settings::default().with_separators([""]).validate(),
            Err(SettingsError::EmptySeparator)
        );
        assert_eq!(
            Settings::default().with_negation_prefix("").validate(),
            Err(SettingsError::EmptyNegationPrefix)
        );
    }
}
