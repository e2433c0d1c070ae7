use crate::descriptor::{MemberType, TypeTag};
use crate::errors::ConversionError;

/**
A value is a type that can be coerced from a single command-line string.

Coercion is resolved per type, in this order of preference:

- Enumerations derive [`Value`][derive@crate::Value], which matches the raw
  string against the variant names, ignoring ASCII case.
- Newtypes derive [`Value`][derive@crate::Value] to wrap the coercion of their
  single field.
- Types with a [`FromStr`][core::str::FromStr] implementation are registered
  with [`parsed_value!`][crate::parsed_value]; the parse error message becomes
  the conversion failure's cause.
- [`String`] takes the raw string unchanged.

A type with none of these can't be used as a member at all; this is caught at
compile time.
*/
pub trait Value: Sized {
    const TYPE: TypeTag;

    fn from_arg(raw: &str) -> Result<Self, ConversionError>;
}

/**
A member is the type of a field in an [`Arguments`][crate::Arguments] struct.
It determines whether the field is a scalar, where every assignment replaces
the previous value, or a list, where each assignment appends.

Every [`Value`] registered with [`parsed_value!`][crate::parsed_value] or
`#[derive(Value)]` is a scalar member. `Vec<T>`, `VecDeque<T>`, and
`LinkedList<T>` are list members, as are their `Option` forms, which are
created empty on the first append.
*/
pub trait Member {
    const TYPE: MemberType;

    fn assign(&mut self, raw: &str) -> Result<(), ConversionError>;
}

/// Replace a scalar with a freshly coerced value. The slot is untouched if
/// coercion fails.
#[inline]
pub fn assign_scalar<V: Value>(slot: &mut V, raw: &str) -> Result<(), ConversionError> {
    *slot = V::from_arg(raw)?;
    Ok(())
}
