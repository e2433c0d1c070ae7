/*!
Field definitions: the static table an [`Arguments`][crate::Arguments] type
provides to describe its members. These are usually generated by
`#[derive(Arguments)]`, but they can be written by hand.

```
use switchyard::field::{Field, Tag};
use switchyard::value::Member;

#[derive(Default)]
struct Person {
    name: String,
    age: u32,
}

impl switchyard::Arguments for Person {
    fn fields() -> Vec<Field<Self>> {
        vec![
            Field::new::<String>("name", |person: &mut Self, raw: &str| {
                person.name.assign(raw)
            })
            .tagged(Tag::new("firstname").required()),
            Field::new::<u32>("age", |person: &mut Self, raw: &str| person.age.assign(raw)),
        ]
    }
}

let parsed = switchyard::parse_default::<Person, _>(&["-firstname", "richard", "-age", "41"]).unwrap();
assert_eq!(parsed.arguments.name, "richard");
assert_eq!(parsed.arguments.age, 41);
```
 */

use core::fmt::{self, Debug};

use crate::descriptor::MemberType;
use crate::errors::ConversionError;
use crate::value::Member;

/// Coerce a raw string and write it into one member of `T`
pub type Write<T> = fn(&mut T, &str) -> Result<(), ConversionError>;

/**
Writes raw values into a single member of `T`. For scalar members, each write
replaces the value; for list members, each write appends, creating the list
first if it's absent.

The write operation is chosen once, when the field is defined, by the
[`Member`] implementation of the field's type.
*/
pub struct FieldBinder<T> {
    member_type: MemberType,
    write: Write<T>,
}

impl<T> FieldBinder<T> {
    #[inline]
    #[must_use]
    pub fn new<M: Member>(write: Write<T>) -> Self {
        Self {
            member_type: M::TYPE,
            write,
        }
    }

    #[inline]
    #[must_use]
    pub fn member_type(&self) -> MemberType {
        self.member_type
    }

    /// Coerce `raw` and write it into `target`
    #[inline]
    pub fn bind(&self, target: &mut T, raw: &str) -> Result<(), ConversionError> {
        (self.write)(target, raw)
    }
}

impl<T> Clone for FieldBinder<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for FieldBinder<T> {}

impl<T> Debug for FieldBinder<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldBinder")
            .field("member_type", &self.member_type)
            .finish_non_exhaustive()
    }
}

/// Explicit metadata attached to a member with `#[argument(...)]`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Tag {
    /// The long name. An empty name hides the member's long name; it can
    /// still be reached by its short name or member name.
    pub name: &'static str,
    pub short: Option<&'static str>,
    pub required: bool,
    pub help: &'static str,
}

impl Tag {
    #[must_use]
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            short: None,
            required: false,
            help: "",
        }
    }

    #[must_use]
    pub const fn short(self, short: &'static str) -> Self {
        Self {
            short: Some(short),
            ..self
        }
    }

    #[must_use]
    pub const fn required(self) -> Self {
        Self {
            required: true,
            ..self
        }
    }

    #[must_use]
    pub const fn help(self, help: &'static str) -> Self {
        Self { help, ..self }
    }
}

/// The definition of one member of an arguments type
pub struct Field<T> {
    pub(crate) member: &'static str,
    pub(crate) tag: Option<Tag>,
    pub(crate) docs: &'static str,
    pub(crate) binder: FieldBinder<T>,
}

impl<T> Field<T> {
    /// Define an untagged member of type `M`. `write` should assign into
    /// the member, usually with [`Member::assign`].
    #[must_use]
    pub fn new<M: Member>(member: &'static str, write: Write<T>) -> Self {
        Self {
            member,
            tag: None,
            docs: "",
            binder: FieldBinder::new::<M>(write),
        }
    }

    #[must_use]
    pub fn tagged(self, tag: Tag) -> Self {
        Self {
            tag: Some(tag),
            ..self
        }
    }

    /// Documentation for the member, used as its help text when the tag
    /// doesn't provide any.
    #[must_use]
    pub fn documented(self, docs: &'static str) -> Self {
        Self { docs, ..self }
    }

    #[inline]
    #[must_use]
    pub fn member(&self) -> &'static str {
        self.member
    }

    #[inline]
    #[must_use]
    pub fn tag(&self) -> Option<&Tag> {
        self.tag.as_ref()
    }
}

impl<T> Debug for Field<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Field")
            .field("member", &self.member)
            .field("tag", &self.tag)
            .field("docs", &self.docs)
            .field("binder", &self.binder)
            .finish()
    }
}
