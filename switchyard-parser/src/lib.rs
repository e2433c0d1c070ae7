/*!
Low-level tokenization of command-line arguments into switches and
positionals. Takes care of prefixes, separators, negation, the end-of-switches
marker, and how many following tokens a switch consumes. No type handling
happens here; usually this is too low level to use directly.
*/

mod settings;

use indexmap::IndexMap;
use tracing::{debug, trace};

pub use settings::{CaseRule, Settings, SettingsError};

/// The literal value given to a boolean switch that appears on its own.
pub const TRUE: &str = "true";

/// The literal value given to any switch carrying the negation prefix.
pub const FALSE: &str = "false";

/// How a known switch takes its values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwitchKind {
    /// A boolean flag. It never consumes the following token.
    Flag,

    /// A single value, either inline (`-name:value`) or the following token.
    Value,

    /// One or more values: the first as for [`Value`][SwitchKind::Value],
    /// then every following token up to the next switch.
    List,
}

/**
A [`Resolver`] tells the [`Tokenizer`] whether a switch key is known, and if so
what kind of values it takes. The tokenizer can't classify `-name value` on its
own: `value` might belong to `-name`, or it might be a positional following a
flag.
*/
pub trait Resolver {
    fn resolve(&self, key: &str) -> Option<SwitchKind>;
}

impl<R: Resolver + ?Sized> Resolver for &R {
    #[inline]
    fn resolve(&self, key: &str) -> Option<SwitchKind> {
        R::resolve(self, key)
    }
}

/// Errors for individual tokens. These never stop tokenization.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TokenError {
    #[error("unknown command line switch {key:?}")]
    UnknownSwitch { key: String, value: String },

    #[error("negated switch {switch:?} can't take a value (got {value:?})")]
    InvalidValueForNegation { switch: String, value: String },
}

/**
The [`Tokenizer`] reports what it finds to a [`Visitor`]. Most callers can use
[`Tokens`], which collects everything.
*/
pub trait Visitor {
    /// A token that isn't a switch or a switch's value.
    fn visit_positional(&mut self, token: &str);

    /// A switch and every value it collected. `key` is already folded under
    /// the active [`CaseRule`].
    fn visit_switch(&mut self, key: String, values: Vec<String>);

    /// A token that couldn't be handled.
    fn visit_error(&mut self, error: TokenError);
}

/// Everything found in a token stream.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tokens {
    /// Switch key to values. A repeated key replaces the values from the
    /// earlier occurrence.
    pub groups: IndexMap<String, Vec<String>>,
    pub positional: Vec<String>,
    pub errors: Vec<TokenError>,
}

impl Visitor for Tokens {
    fn visit_positional(&mut self, token: &str) {
        self.positional.push(token.to_owned());
    }

    fn visit_switch(&mut self, key: String, values: Vec<String>) {
        if let Some(old) = self.groups.insert(key, values) {
            trace!(replaced = ?old, "switch repeated; later occurrence wins");
        }
    }

    fn visit_error(&mut self, error: TokenError) {
        debug!(%error, "token error");
        self.errors.push(error);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Parsing,

    /// An end-of-switches marker was seen; everything else is positional.
    Suspended,
}

/**
A [`Tokenizer`] walks a slice of raw arguments, one token per call to
[`next_token`][Tokenizer::next_token], sending what it finds to a [`Visitor`].
A switch can consume following tokens as its values, so a single call may
advance past more than one token.
*/
#[derive(Debug, Clone)]
pub struct Tokenizer<'a, S, R> {
    settings: &'a Settings,
    resolver: R,
    args: &'a [S],
    cursor: usize,
    state: State,
}

impl<'a, S, R> Tokenizer<'a, S, R>
where
    S: AsRef<str>,
    R: Resolver,
{
    /// Create a tokenizer that starts at `args[start]`. Tokens before `start`
    /// are ignored entirely.
    #[must_use]
    pub fn new(args: &'a [S], start: usize, settings: &'a Settings, resolver: R) -> Self {
        Self {
            settings,
            resolver,
            args,
            cursor: start,
            state: State::Parsing,
        }
    }

    /// Handle the next token, returning `None` once every token is consumed.
    pub fn next_token<V: Visitor>(&mut self, visitor: &mut V) -> Option<()> {
        let args = self.args;
        let raw = args.get(self.cursor)?.as_ref();
        self.cursor += 1;

        match self.state {
            State::Suspended => visitor.visit_positional(raw),
            State::Parsing => match self.settings.strip_switch_prefix(raw.trim()) {
                None => {
                    trace!(token = raw, "positional");
                    visitor.visit_positional(raw)
                }
                Some("") => {
                    debug!(token = raw, "end of switches; remaining tokens are positional");
                    self.state = State::Suspended;
                }
                Some(body) => match self.switch(raw, body) {
                    Ok((key, values)) => {
                        trace!(%key, ?values, "switch");
                        visitor.visit_switch(key, values)
                    }
                    Err(error) => visitor.visit_error(error),
                },
            },
        }

        Some(())
    }

    /// Tokenize everything, collecting the results.
    pub fn run(mut self) -> Tokens {
        let mut tokens = Tokens::default();
        while self.next_token(&mut tokens).is_some() {}
        tokens
    }

    /// Take the next token as a value, if it doesn't look like a switch.
    fn take_value(&mut self) -> Option<String> {
        let args = self.args;
        let token = args.get(self.cursor)?.as_ref();

        match self.settings.looks_like_switch(token) {
            true => None,
            false => {
                self.cursor += 1;
                Some(token.to_owned())
            }
        }
    }

    /// Handle a switch. `raw` is the whole token and `body` is the token with
    /// its prefix removed; `body` is never empty.
    fn switch(&mut self, raw: &str, body: &str) -> Result<(String, Vec<String>), TokenError> {
        let (key, inline) = self.settings.split_separator(body);

        // A key that's known as written is never treated as negated
        let (name, kind, negated) = match self.resolver.resolve(key) {
            Some(kind) => (key, kind, false),
            None => match self
                .settings
                .strip_negation(key)
                .filter(|name| !name.is_empty())
                .and_then(|name| Some((name, self.resolver.resolve(name)?)))
            {
                Some((name, kind)) => (name, kind, true),
                None => {
                    return Err(TokenError::UnknownSwitch {
                        key: key.to_owned(),
                        value: inline.unwrap_or_default().to_owned(),
                    });
                }
            },
        };

        let first = match (negated, inline) {
            (true, Some(value)) => {
                return Err(TokenError::InvalidValueForNegation {
                    switch: raw.trim().to_owned(),
                    value: value.to_owned(),
                });
            }
            (true, None) => FALSE.to_owned(),
            (false, Some(value)) => value.to_owned(),
            (false, None) => match kind {
                SwitchKind::Flag => TRUE.to_owned(),
                SwitchKind::Value | SwitchKind::List => self.take_value().unwrap_or_default(),
            },
        };

        let mut values = vec![first];

        if kind == SwitchKind::List && !negated {
            values.extend(std::iter::from_fn(|| self.take_value()));
        }

        Ok((self.settings.case.fold(name).into_owned(), values))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolver(key: &str) -> Option<SwitchKind> {
        match key {
            "beta" | "b" | "verbose" => Some(SwitchKind::Flag),
            "name" | "n" | "firstname" | "age" | "no-cache" => Some(SwitchKind::Value),
            "numbers" => Some(SwitchKind::List),
            _ => None,
        }
    }

    struct Known;

    impl Resolver for Known {
        fn resolve(&self, key: &str) -> Option<SwitchKind> {
            resolver(&key.to_lowercase())
        }
    }

    fn tokenize(args: &[&str]) -> Tokens {
        tokenize_with(args, &Settings::default())
    }

    fn tokenize_with(args: &[&str], settings: &Settings) -> Tokens {
        Tokenizer::new(args, 0, settings, Known).run()
    }

    fn group<'a>(tokens: &'a Tokens, key: &str) -> Option<Vec<&'a str>> {
        tokens
            .groups
            .get(key)
            .map(|values| values.iter().map(String::as_str).collect())
    }

    #[test]
    fn plain_tokens_are_positional() {
        let tokens = tokenize(&["a", "b", "c d"]);
        assert_eq!(tokens.positional, ["a", "b", "c d"]);
        assert!(tokens.groups.is_empty());
        assert!(tokens.errors.is_empty());
    }

    #[test]
    fn inline_and_following_values() {
        let tokens = tokenize(&["/name=fred", "file.txt"]);
        assert_eq!(group(&tokens, "name"), Some(vec!["fred"]));
        assert_eq!(tokens.positional, ["file.txt"]);

        let tokens = tokenize(&["-name", "fred", "file.txt"]);
        assert_eq!(group(&tokens, "name"), Some(vec!["fred"]));
        assert_eq!(tokens.positional, ["file.txt"]);
    }

    #[test]
    fn value_switch_does_not_swallow_a_switch() {
        let tokens = tokenize(&["-name", "-beta"]);
        assert_eq!(group(&tokens, "name"), Some(vec![""]));
        assert_eq!(group(&tokens, "beta"), Some(vec!["true"]));
    }

    #[test]
    fn flags_never_take_the_next_token() {
        let tokens = tokenize(&["-beta", "dummy"]);
        assert_eq!(group(&tokens, "beta"), Some(vec!["true"]));
        assert_eq!(tokens.positional, ["dummy"]);

        let tokens = tokenize(&["-beta:false"]);
        assert_eq!(group(&tokens, "beta"), Some(vec!["false"]));
    }

    #[test]
    fn negation() {
        let tokens = tokenize(&["-no-beta", "dummy"]);
        assert_eq!(group(&tokens, "beta"), Some(vec!["false"]));
        assert_eq!(tokens.positional, ["dummy"]);

        let tokens = tokenize(&["-no-beta:true", "-verbose"]);
        assert_eq!(
            tokens.errors,
            [TokenError::InvalidValueForNegation {
                switch: "-no-beta:true".to_owned(),
                value: "true".to_owned(),
            }]
        );
        assert!(tokens.groups.get("beta").is_none());
        assert_eq!(group(&tokens, "verbose"), Some(vec!["true"]));
    }

    #[test]
    fn names_with_the_negation_prefix_stay_reachable() {
        let tokens = tokenize(&["--no-cache", "dir"]);
        assert_eq!(group(&tokens, "no-cache"), Some(vec!["dir"]));
    }

    #[test]
    fn end_of_switches_marker() {
        let tokens = tokenize(&["-firstname", "richard", "--", "-age", "101", "--"]);
        assert_eq!(group(&tokens, "firstname"), Some(vec!["richard"]));
        assert!(tokens.groups.get("age").is_none());
        assert_eq!(tokens.positional, ["-age", "101", "--"]);
    }

    #[test]
    fn bare_prefixes_are_all_markers() {
        let tokens = tokenize(&["/", "-beta"]);
        assert_eq!(tokens.positional, ["-beta"]);
    }

    #[test]
    fn lists_are_greedy() {
        let tokens = tokenize(&["-numbers", "1", "2", "3", "-beta", "4"]);
        assert_eq!(group(&tokens, "numbers"), Some(vec!["1", "2", "3"]));
        assert_eq!(tokens.positional, ["4"]);

        let tokens = tokenize(&["-numbers:1", "2"]);
        assert_eq!(group(&tokens, "numbers"), Some(vec!["1", "2"]));

        let tokens = tokenize(&["-numbers", "1"]);
        assert_eq!(group(&tokens, "numbers"), Some(vec!["1"]));
    }

    #[test]
    fn repeated_switches_replace() {
        let tokens = tokenize(&["-numbers", "1", "2", "-numbers", "3"]);
        assert_eq!(group(&tokens, "numbers"), Some(vec!["3"]));
        assert_eq!(tokens.groups.len(), 1);
    }

    #[test]
    fn unknown_switch_is_consumed_alone() {
        let tokens = tokenize(&["/aa=102", "-zz", "value", "-name", "x"]);
        assert_eq!(
            tokens.errors,
            [
                TokenError::UnknownSwitch {
                    key: "aa".to_owned(),
                    value: "102".to_owned(),
                },
                TokenError::UnknownSwitch {
                    key: "zz".to_owned(),
                    value: String::new(),
                },
            ]
        );
        assert_eq!(tokens.positional, ["value"]);
        assert_eq!(group(&tokens, "name"), Some(vec!["x"]));
    }

    #[test]
    fn keys_are_folded() {
        let tokens = tokenize(&["-Beta", "-NAME:Fred"]);
        assert_eq!(group(&tokens, "beta"), Some(vec!["true"]));
        assert_eq!(group(&tokens, "name"), Some(vec!["Fred"]));

        let sensitive = Settings::default().with_case(CaseRule::Sensitive);
        let tokens = tokenize_with(&["-NAME:Fred"], &sensitive);
        assert_eq!(group(&tokens, "NAME"), Some(vec!["Fred"]));
    }

    #[test]
    fn tokens_are_trimmed_for_classification_only() {
        let tokens = tokenize(&["  -beta ", " plain "]);
        assert_eq!(group(&tokens, "beta"), Some(vec!["true"]));
        assert_eq!(tokens.positional, [" plain "]);
    }

    #[test]
    fn start_offset_skips_leading_tokens() {
        let settings = Settings::default();
        let args = ["program", "-beta", "x"];
        let tokens = Tokenizer::new(&args, 1, &settings, Known).run();
        assert_eq!(group(&tokens, "beta"), Some(vec!["true"]));
        assert_eq!(tokens.positional, ["x"]);
    }

    #[test]
    fn custom_prefixes_and_separators() {
        let settings = Settings::default()
            .with_prefixes(["+"])
            .with_separators(["~"]);
        let tokens = tokenize_with(&["+name~fred", "-beta", "+", "+beta"], &settings);
        assert_eq!(group(&tokens, "name"), Some(vec!["fred"]));
        assert_eq!(tokens.positional, ["-beta", "+beta"]);
    }
}
