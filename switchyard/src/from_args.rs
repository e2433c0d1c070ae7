use switchyard_parser::{Settings, TRUE, Tokenizer};
use tracing::{debug, trace};

use crate::{
    Arguments,
    build::DescriptorBuilder,
    context::Context,
    errors::{Error, ParseError},
};

/// The result of a successful parse: the populated arguments, and every token
/// that wasn't a switch or a switch's value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Parsed<T> {
    pub arguments: T,
    pub positional: Vec<String>,
}

impl<T> Parsed<T> {
    #[inline]
    #[must_use]
    pub fn into_parts(self) -> (T, Vec<String>) {
        (self.arguments, self.positional)
    }
}

/**
Parse `args[start..]` into a fresh `T::default()`.

Every problem in the arguments is collected: if anything went wrong, the
[`ParseError`] describes all of it, not just the first thing. The only
exception is invalid [`Settings`], which fail the parse before any argument is
looked at.
*/
pub fn parse<T, S>(args: &[S], start: usize, settings: &Settings) -> Result<Parsed<T>, ParseError>
where
    T: Arguments,
    S: AsRef<str>,
{
    settings.validate().map_err(Error::from)?;

    let (descriptors, build_errors) = DescriptorBuilder::new(settings).build(T::fields());
    let mut context = Context::new(settings, descriptors);
    context.record_all(build_errors);

    let tokens = Tokenizer::new(args, start, settings, &context).run();
    debug!(
        groups = tokens.groups.len(),
        positional = tokens.positional.len(),
        "tokenized arguments"
    );

    context.positional = tokens.positional;
    context.record_all(tokens.errors.into_iter().map(Error::from));

    for (key, values) in &tokens.groups {
        bind_group(&mut context, key, values);
    }

    context.finish()
}

/// [`parse`] every argument with the default [`Settings`].
pub fn parse_default<T, S>(args: &[S]) -> Result<Parsed<T>, ParseError>
where
    T: Arguments,
    S: AsRef<str>,
{
    parse(args, 0, &Settings::default())
}

/// Assign every value in a group to every descriptor the key refers to.
fn bind_group<T>(context: &mut Context<'_, T>, key: &str, values: &[String]) {
    let matches = context.matching(key);

    if matches.is_empty() {
        context.record(Error::UnknownSwitch {
            key: key.to_owned(),
            value: values.first().cloned().unwrap_or_default(),
        });
        return;
    }

    for index in matches {
        let descriptor = &context.descriptors[index];
        let binder = descriptor.binder();
        let member_type = descriptor.member_type();
        let member = descriptor.member();

        let failure = values.iter().find_map(|value| {
            let raw = match value.as_str() {
                "" if member_type.is_bool() => TRUE,
                raw => raw,
            };

            trace!(key, raw, member, "binding");
            binder.bind(&mut context.output, raw).err()
        });

        // The error names the group by its first value; the element that
        // actually failed is in `source`.
        match failure {
            None => context.satisfy(index),
            Some(source) => context.record(Error::Conversion {
                key: key.to_owned(),
                value: values.first().cloned().unwrap_or_default(),
                member_type,
                source,
            }),
        }
    }
}
