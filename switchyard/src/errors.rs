/*!
Error types for [`switchyard`][crate]. Parsing never stops at the first
problem: every error found in one pass over the arguments is collected into a
single [`ParseError`].
 */

use core::fmt::{self, Display};

use joinery::JoinableIterator;
use switchyard_parser::{SettingsError, TokenError};

use crate::descriptor::{MemberType, TypeTag};

/// A raw string couldn't be coerced to a member's type.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{value:?} is not a valid {expected}: {message}")]
pub struct ConversionError {
    /// The raw value that failed
    pub value: String,

    /// The type the value should have had
    pub expected: TypeTag,

    /// The underlying cause
    pub message: String,
}

impl ConversionError {
    /// A [`FromStr`][core::str::FromStr] implementation (or something like
    /// it) rejected the value.
    pub fn parse_error(value: &str, expected: TypeTag, message: impl Display) -> Self {
        Self {
            value: value.to_owned(),
            expected,
            message: message.to_string(),
        }
    }

    /// The value should have been one of these (or a case-insensitive
    /// variation of one of them)
    pub fn should_be(value: &str, expected: TypeTag, possibilities: &[&str]) -> Self {
        Self {
            value: value.to_owned(),
            expected,
            message: format!("expected one of {}", possibilities.iter().join_with(", ")),
        }
    }

    /// Report this error as a failure to produce a different type. Used when
    /// one type's coercion is built on another's.
    #[must_use]
    pub fn expecting(self, expected: TypeTag) -> Self {
        Self { expected, ..self }
    }
}

/// A single problem found while parsing command-line arguments.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// A switch didn't match any descriptor. `value` is the inline value
    /// given with it, or empty.
    #[error("unknown command line switch {key:?}")]
    UnknownSwitch { key: String, value: String },

    /// A negated switch was given an inline value
    #[error("negated switch {switch:?} can't take a value (got {value:?})")]
    InvalidValueForNegation { switch: String, value: String },

    /// A value given to a switch couldn't be coerced to its member's type.
    /// `value` is the first value given to the switch; `source` holds the
    /// one that failed.
    #[error("invalid value for switch {key:?} ({member_type}): {source}")]
    Conversion {
        key: String,
        value: String,
        member_type: MemberType,
        #[source]
        source: ConversionError,
    },

    /// A required switch never appeared
    #[error("missing required switch {name:?}")]
    MissingRequired { name: String },

    /// A member's definition was rejected; it can't be bound at all
    #[error("invalid definition for member {member:?}: {reason}")]
    Descriptor { member: &'static str, reason: String },

    /// The settings can't be used to parse anything
    #[error("invalid parser settings: {0}")]
    Settings(#[from] SettingsError),
}

impl From<TokenError> for Error {
    fn from(error: TokenError) -> Self {
        match error {
            TokenError::UnknownSwitch { key, value } => Self::UnknownSwitch { key, value },
            TokenError::InvalidValueForNegation { switch, value } => {
                Self::InvalidValueForNegation { switch, value }
            }
        }
    }
}

/**
Every problem found while parsing a command line. A [`ParseError`] always
contains at least one [`Error`]; they're in the order they were found:
definition problems first, then token problems, then values that couldn't be
bound, then missing required switches.
*/
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    errors: Vec<Error>,
}

impl ParseError {
    /// Bundle a list of errors, if there are any.
    #[must_use]
    pub fn new(errors: Vec<Error>) -> Option<Self> {
        match errors.is_empty() {
            true => None,
            false => Some(Self { errors }),
        }
    }

    #[inline]
    #[must_use]
    pub fn errors(&self) -> &[Error] {
        &self.errors
    }

    #[inline]
    #[must_use]
    pub fn into_errors(self) -> Vec<Error> {
        self.errors
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Always false; provided for symmetry with [`len`][Self::len].
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    #[inline]
    pub fn iter(&self) -> core::slice::Iter<'_, Error> {
        self.errors.iter()
    }
}

impl From<Error> for ParseError {
    fn from(error: Error) -> Self {
        Self {
            errors: vec![error],
        }
    }
}

impl<'a> IntoIterator for &'a ParseError {
    type Item = &'a Error;
    type IntoIter = core::slice::Iter<'a, Error>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl IntoIterator for ParseError {
    type Item = Error;
    type IntoIter = std::vec::IntoIter<Error>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.into_iter()
    }
}

impl Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.errors.as_slice() {
            [error] => write!(f, "error parsing command line: {error}"),
            errors => {
                write!(f, "{} errors parsing command line:", errors.len())?;
                errors
                    .iter()
                    .try_for_each(|error| write!(f, "\n  - {error}"))
            }
        }
    }
}

impl std::error::Error for ParseError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_be_lists_the_possibilities() {
        let error = ConversionError::should_be("yes", TypeTag::Bool, &["true", "false"]);
        assert_eq!(error.value, "yes");
        assert_eq!(error.message, "expected one of true, false");
        assert_eq!(
            error.to_string(),
            r#""yes" is not a valid bool: expected one of true, false"#
        );
    }

    #[test]
    fn expecting_retags() {
        let error = ConversionError::parse_error("x", TypeTag::Integer, "bad digit")
            .expecting(TypeTag::Other { name: "port" });
        assert_eq!(error.expected, TypeTag::Other { name: "port" });
        assert_eq!(error.message, "bad digit");
    }

    #[test]
    fn token_errors_convert() {
        let error: Error = TokenError::UnknownSwitch {
            key: "aa".to_owned(),
            value: "102".to_owned(),
        }
        .into();

        assert_eq!(
            error,
            Error::UnknownSwitch {
                key: "aa".to_owned(),
                value: "102".to_owned(),
            }
        );
    }

    #[test]
    fn parse_errors_are_never_empty() {
        assert_eq!(ParseError::new(Vec::new()), None);

        let error = ParseError::new(vec![Error::MissingRequired {
            name: "firstname".to_owned(),
        }])
        .unwrap();
        assert_eq!(error.len(), 1);
        assert!(!error.is_empty());
    }

    #[test]
    fn display_lists_every_error() {
        let single = ParseError::from(Error::MissingRequired {
            name: "firstname".to_owned(),
        });
        assert_eq!(
            single.to_string(),
            r#"error parsing command line: missing required switch "firstname""#
        );

        let several = ParseError::new(vec![
            Error::UnknownSwitch {
                key: "aa".to_owned(),
                value: String::new(),
            },
            Error::MissingRequired {
                name: "firstname".to_owned(),
            },
        ])
        .unwrap();
        assert_eq!(
            several.to_string(),
            "2 errors parsing command line:\n  \
             - unknown command line switch \"aa\"\n  \
             - missing required switch \"firstname\""
        );
    }
}
