/*!
Descriptors: the runtime description of one bindable member of an
[`Arguments`][crate::Arguments] type.
 */

use core::fmt::{self, Debug, Display};

use switchyard_parser::{CaseRule, SwitchKind};

use crate::field::FieldBinder;

/// The semantic type of a single value, as far as coercion is concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeTag {
    Bool,
    Integer,
    Float,
    Char,
    String,

    /// An enumeration, parsed by the symbolic names of its variants
    Enum {
        name: &'static str,
        variants: &'static [&'static str],
    },

    /// Anything else that can be parsed from a string
    Other { name: &'static str },
}

impl Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            TypeTag::Bool => f.write_str("bool"),
            TypeTag::Integer => f.write_str("integer"),
            TypeTag::Float => f.write_str("float"),
            TypeTag::Char => f.write_str("char"),
            TypeTag::String => f.write_str("string"),
            TypeTag::Enum { name, .. } | TypeTag::Other { name } => f.write_str(name),
        }
    }
}

/// The shape of a member: a single value, or an ordered list of values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemberType {
    Scalar(TypeTag),
    List(TypeTag),
}

impl MemberType {
    /// The type of each individual value
    #[inline]
    #[must_use]
    pub const fn element(&self) -> TypeTag {
        match *self {
            MemberType::Scalar(tag) | MemberType::List(tag) => tag,
        }
    }

    #[inline]
    #[must_use]
    pub const fn is_list(&self) -> bool {
        matches!(*self, MemberType::List(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_bool(&self) -> bool {
        matches!(*self, MemberType::Scalar(TypeTag::Bool))
    }

    /// How the tokenizer should collect values for a switch of this type
    #[must_use]
    pub const fn switch_kind(&self) -> SwitchKind {
        match *self {
            MemberType::Scalar(TypeTag::Bool) => SwitchKind::Flag,
            MemberType::Scalar(_) => SwitchKind::Value,
            MemberType::List(_) => SwitchKind::List,
        }
    }
}

impl Display for MemberType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            MemberType::Scalar(tag) => Display::fmt(&tag, f),
            MemberType::List(tag) => write!(f, "list of {tag}"),
        }
    }
}

/**
A single bindable member, after its field definition has been resolved
against a set of [`Settings`][crate::Settings].

Descriptors never change once they're built. Whether a required descriptor
was satisfied is tracked separately by each parse, so a list of descriptors
can be reused.
*/
pub struct Descriptor<T> {
    pub(crate) name: String,
    pub(crate) short: Option<String>,
    pub(crate) member: &'static str,
    pub(crate) help: &'static str,
    pub(crate) required: bool,
    pub(crate) hidden: bool,
    pub(crate) binder: FieldBinder<T>,
}

impl<T> Descriptor<T> {
    /// The canonical long name. Never empty: it falls back to the member
    /// name when the tag doesn't give one.
    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    #[must_use]
    pub fn short(&self) -> Option<&str> {
        self.short.as_deref()
    }

    /// The name of the member in the arguments type
    #[inline]
    #[must_use]
    pub fn member(&self) -> &'static str {
        self.member
    }

    #[inline]
    #[must_use]
    pub fn member_type(&self) -> MemberType {
        self.binder.member_type()
    }

    #[inline]
    #[must_use]
    pub fn help(&self) -> &'static str {
        self.help
    }

    /// True if this member must appear on the command line
    #[inline]
    #[must_use]
    pub fn required(&self) -> bool {
        self.required
    }

    /// True if the member was tagged without a name. Hidden members are
    /// still reachable through their short name or member name (which
    /// becomes their [`name`][Self::name]), but callers rendering help will
    /// usually want to skip them.
    #[inline]
    #[must_use]
    pub fn hidden(&self) -> bool {
        self.hidden
    }

    #[inline]
    #[must_use]
    pub fn is_list(&self) -> bool {
        self.member_type().is_list()
    }

    #[inline]
    #[must_use]
    pub fn binder(&self) -> FieldBinder<T> {
        self.binder
    }

    /// Check if a switch key refers to this descriptor
    #[must_use]
    pub fn matches(&self, key: &str, case: CaseRule) -> bool {
        case.matches(&self.name, key)
            || self.short().is_some_and(|short| case.matches(short, key))
    }
}

impl<T> Debug for Descriptor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Descriptor")
            .field("name", &self.name)
            .field("short", &self.short)
            .field("member", &self.member)
            .field("member_type", &self.member_type())
            .field("help", &self.help)
            .field("required", &self.required)
            .field("hidden", &self.hidden)
            .finish_non_exhaustive()
    }
}
