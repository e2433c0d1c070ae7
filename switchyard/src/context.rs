use switchyard_parser::{Resolver, Settings, SwitchKind};
use tracing::debug;

use crate::descriptor::Descriptor;
use crate::errors::{Error, ParseError};
use crate::from_args::Parsed;

/// The state of a single parse. Created fresh for each call and consumed by
/// [`finish`][Context::finish].
pub(crate) struct Context<'s, T> {
    pub output: T,
    pub positional: Vec<String>,
    errors: Vec<Error>,
    pub settings: &'s Settings,
    pub descriptors: Vec<Descriptor<T>>,

    /// One flag per descriptor: has it been assigned at least once?
    satisfied: Vec<bool>,
}

impl<'s, T: Default> Context<'s, T> {
    pub fn new(settings: &'s Settings, descriptors: Vec<Descriptor<T>>) -> Self {
        Self {
            output: T::default(),
            positional: Vec::new(),
            errors: Vec::new(),
            settings,
            satisfied: vec![false; descriptors.len()],
            descriptors,
        }
    }
}

impl<T> Context<'_, T> {
    /// The indices of every descriptor that `key` refers to
    pub fn matching(&self, key: &str) -> Vec<usize> {
        let case = self.settings.case;

        self.descriptors
            .iter()
            .enumerate()
            .filter(|(_, descriptor)| descriptor.matches(key, case))
            .map(|(index, _)| index)
            .collect()
    }

    pub fn satisfy(&mut self, index: usize) {
        if let Some(flag) = self.satisfied.get_mut(index) {
            *flag = true;
        }
    }

    pub fn record(&mut self, error: Error) {
        debug!(%error, "recorded error");
        self.errors.push(error);
    }

    pub fn record_all(&mut self, errors: impl IntoIterator<Item = Error>) {
        errors.into_iter().for_each(|error| self.record(error));
    }

    /// Report every required descriptor that was never assigned, then hand
    /// back either the output or every error that was found.
    pub fn finish(mut self) -> Result<Parsed<T>, ParseError> {
        let missing: Vec<Error> = self
            .descriptors
            .iter()
            .zip(&self.satisfied)
            .filter(|&(descriptor, &satisfied)| descriptor.required() && !satisfied)
            .map(|(descriptor, _)| Error::MissingRequired {
                name: descriptor.name().to_owned(),
            })
            .collect();

        self.record_all(missing);

        match ParseError::new(self.errors) {
            Some(error) => Err(error),
            None => Ok(Parsed {
                arguments: self.output,
                positional: self.positional,
            }),
        }
    }
}

impl<T> Resolver for Context<'_, T> {
    fn resolve(&self, key: &str) -> Option<SwitchKind> {
        let case = self.settings.case;

        self.descriptors
            .iter()
            .find(|descriptor| descriptor.matches(key, case))
            .map(|descriptor| descriptor.member_type().switch_kind())
    }
}
