use switchyard_parser::Settings;

use crate::{
    Arguments,
    errors::ParseError,
    from_args::{self, Parsed},
};

/// Helper type for loading arguments from the environment.
///
/// Arguments that aren't valid unicode are converted lossily.
#[derive(Debug, Clone)]
pub struct LoadedArguments {
    arguments: Vec<String>,
}

impl LoadedArguments {
    pub fn from_env() -> Self {
        Self {
            arguments: std::env::args_os()
                .map(|arg| arg.to_string_lossy().into_owned())
                .collect(),
        }
    }

    /// The program name, if the platform provided one
    pub fn program(&self) -> Option<&str> {
        self.arguments.first().map(String::as_str)
    }

    /// Every argument after the program name
    pub fn arguments(&self) -> &[String] {
        self.arguments.get(1..).unwrap_or(&[])
    }

    /// Parse every argument after the program name.
    pub fn parse<T: Arguments>(&self, settings: &Settings) -> Result<Parsed<T>, ParseError> {
        from_args::parse(&self.arguments, 1, settings)
    }
}

impl<S: Into<String>> FromIterator<S> for LoadedArguments {
    /// Collect arguments from somewhere other than the environment. The first
    /// one is the program name.
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            arguments: iter.into_iter().map(Into::into).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::Field;
    use crate::value::Member;

    #[derive(Debug, Default)]
    struct Verbosity {
        verbose: bool,
    }

    impl Arguments for Verbosity {
        fn fields() -> Vec<Field<Self>> {
            vec![Field::new::<bool>("verbose", |verbosity: &mut Self, raw: &str| {
                verbosity.verbose.assign(raw)
            })]
        }
    }

    #[test]
    fn program_name_is_skipped() {
        let loaded: LoadedArguments = ["-verbose", "-verbose", "file"].into_iter().collect();

        assert_eq!(loaded.program(), Some("-verbose"));
        assert_eq!(loaded.arguments(), ["-verbose", "file"]);

        let parsed = loaded.parse::<Verbosity>(&Settings::default()).unwrap();
        assert!(parsed.arguments.verbose);
        assert_eq!(parsed.positional, ["file"]);
    }

    #[test]
    fn empty_arguments() {
        let loaded: LoadedArguments = Vec::<String>::new().into_iter().collect();
        assert_eq!(loaded.program(), None);
        assert!(loaded.arguments().is_empty());
        assert!(!loaded.parse::<Verbosity>(&Settings::default()).unwrap().arguments.verbose);
    }
}
