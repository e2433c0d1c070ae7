/*!
A declarative command-line argument parsing library. Describe your options as
a struct, and switchyard fills it in from the command line, collecting every
problem it finds along the way rather than stopping at the first one.

```
use switchyard::{Arguments, Value};

#[derive(Debug, Clone, Copy, Default, PartialEq, Value)]
enum Color {
    #[default]
    White,
    Blue,
}

#[derive(Debug, Default, Arguments)]
struct Options {
    /// The name to greet
    #[argument(name = "firstname", short = "f", required)]
    name: String,

    age: Option<Vec<u32>>,
    verbose: bool,
    color: Color,
}

let parsed = Options::parse(
    &["-f", "richard", "-age", "40", "41", "/no-verbose", "--color=blue", "file.txt"],
    0,
    &switchyard::Settings::default(),
)
.unwrap();

assert_eq!(parsed.arguments.name, "richard");
assert_eq!(parsed.arguments.age, Some(vec![40, 41]));
assert!(!parsed.arguments.verbose);
assert_eq!(parsed.arguments.color, Color::Blue);
assert_eq!(parsed.positional, ["file.txt"]);
```

Switches are introduced by any of the configured [`Settings::prefixes`]
(`--`, `-`, and `/` by default), and can carry their value inline after a
separator (`:` or `=`) or in the following token. Boolean switches never take
the following token; they can be negated with the negation prefix instead
(`-no-verbose`). List members (`Vec<T>`, or `Option<Vec<T>>`) take every
following token up to the next switch. A token made up of only a prefix
(`--`) ends switch parsing; everything after it is positional.

The types of members are handled by the [`value`] module: anything that
implements [`Member`][value::Member] can be a member.
*/

mod arguments;
pub mod build;
mod context;
pub mod descriptor;
pub mod errors;
pub mod field;
pub mod from_args;
pub mod help;
mod impls;
pub mod value;

pub use arguments::LoadedArguments;
pub use descriptor::{Descriptor, MemberType, TypeTag};
pub use errors::{ConversionError, Error, ParseError};
pub use from_args::{Parsed, parse, parse_default};
pub use help::descriptors;
pub use switchyard_derive::{Arguments, Value};
pub use switchyard_parser::{CaseRule, Settings, SettingsError};

/**
A type that can be populated from command-line arguments. Usually this is
derived with [`#[derive(Arguments)]`][derive@Arguments]; see the [`field`]
module for implementing it by hand.

Parsing always starts from `Self::default()`, so members that never appear on
the command line keep their default values.
*/
pub trait Arguments: Default {
    /// The members of this type that might be bound, in declaration order.
    fn fields() -> Vec<field::Field<Self>>;

    /// Parse `args[start..]`. See [`parse`][from_args::parse].
    fn parse<S: AsRef<str>>(
        args: &[S],
        start: usize,
        settings: &Settings,
    ) -> Result<Parsed<Self>, ParseError> {
        from_args::parse(args, start, settings)
    }

    /// The descriptors for this type. See [`descriptors`][help::descriptors].
    fn descriptors(settings: &Settings) -> Result<Vec<Descriptor<Self>>, ParseError> {
        help::descriptors(settings)
    }
}
