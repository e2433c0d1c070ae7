/*!
Descriptor export. `switchyard` doesn't render help text itself; instead,
[`descriptors`] gives callers everything they need to render their own.
 */

use core::cmp::Reverse;

use switchyard_parser::Settings;
use tracing::debug;

use crate::{
    Arguments,
    build::DescriptorBuilder,
    descriptor::Descriptor,
    errors::{Error, ParseError},
};

/**
Get the descriptors of `T` under `settings`, as they'd be used by a parse.
Required descriptors come first; each group is sorted by name under the
settings' [`CaseRule`][crate::CaseRule].

Fails if the settings are invalid, or if any member of `T` can't be turned
into a descriptor.
*/
pub fn descriptors<T: Arguments>(settings: &Settings) -> Result<Vec<Descriptor<T>>, ParseError> {
    settings.validate().map_err(Error::from)?;

    let (mut descriptors, errors) = DescriptorBuilder::new(settings).build(T::fields());

    if let Some(error) = ParseError::new(errors) {
        return Err(error);
    }

    let case = settings.case;
    descriptors.sort_by(|lhs, rhs| {
        Reverse(lhs.required())
            .cmp(&Reverse(rhs.required()))
            .then_with(|| case.compare(lhs.name(), rhs.name()))
    });

    debug!(count = descriptors.len(), "exported descriptors");
    Ok(descriptors)
}
