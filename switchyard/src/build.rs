/*!
Turning the static [`Field`] table of an [`Arguments`][crate::Arguments] type
into [`Descriptor`]s under a particular set of [`Settings`].
 */

use switchyard_parser::Settings;
use tracing::{debug, trace};

use crate::descriptor::Descriptor;
use crate::errors::Error;
use crate::field::Field;

/**
Builds descriptors from field definitions. Each field is handled on its own: a
field that can't be turned into a descriptor is reported as an
[`Error::Descriptor`] and skipped, and the rest are still built.
*/
#[derive(Debug, Clone, Copy)]
pub struct DescriptorBuilder<'s> {
    settings: &'s Settings,
}

impl<'s> DescriptorBuilder<'s> {
    #[must_use]
    pub fn new(settings: &'s Settings) -> Self {
        Self { settings }
    }

    /// Build a descriptor for every bindable field, in field order, along
    /// with an error for every field that was rejected.
    pub fn build<T>(&self, fields: Vec<Field<T>>) -> (Vec<Descriptor<T>>, Vec<Error>) {
        let mut descriptors = Vec::with_capacity(fields.len());
        let mut errors = Vec::new();

        for field in fields {
            match self.descriptor(field) {
                Ok(Some(descriptor)) => descriptors.push(descriptor),
                Ok(None) => {}
                Err(error) => {
                    debug!(%error, "skipping member");
                    errors.push(error)
                }
            }
        }

        debug!(
            built = descriptors.len(),
            rejected = errors.len(),
            "built descriptors"
        );

        (descriptors, errors)
    }

    fn descriptor<T>(&self, field: Field<T>) -> Result<Option<Descriptor<T>>, Error> {
        let member = field.member;

        if member.is_empty() {
            return Err(Error::Descriptor {
                member,
                reason: "the member name is empty".to_owned(),
            });
        }

        let tag = match field.tag {
            Some(tag) => tag,
            None if self.settings.require_tags => {
                trace!(member, "untagged member ignored");
                return Ok(None);
            }
            None => Default::default(),
        };

        let hidden = field.tag.is_some() && tag.name.is_empty();
        let name = match tag.name {
            "" => member,
            name => name,
        };
        let short = tag.short.filter(|short| !short.is_empty());

        self.check_name(member, "name", name)?;
        if let Some(short) = short {
            self.check_name(member, "short name", short)?;
        }

        let case = self.settings.case;

        Ok(Some(Descriptor {
            name: case.fold(name).into_owned(),
            short: short.map(|short| case.fold(short).into_owned()),
            member,
            help: match tag.help {
                "" => field.docs,
                help => help,
            },
            required: tag.required,
            hidden,
            binder: field.binder,
        }))
    }

    /// A name has to survive tokenization intact to ever be matched.
    fn check_name(&self, member: &'static str, kind: &str, name: &str) -> Result<(), Error> {
        let reason = if name.chars().any(char::is_whitespace) {
            format!("the {kind} {name:?} contains whitespace")
        } else if let Some(separator) = self
            .settings
            .separators
            .iter()
            .find(|separator| name.contains(separator.as_str()))
        {
            format!("the {kind} {name:?} contains the separator {separator:?}")
        } else if let Some(prefix) = self
            .settings
            .prefixes
            .iter()
            .find(|prefix| name.starts_with(prefix.as_str()))
        {
            format!("the {kind} {name:?} starts with the prefix {prefix:?}")
        } else {
            return Ok(());
        };

        Err(Error::Descriptor { member, reason })
    }
}
