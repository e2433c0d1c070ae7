mod arguments;
mod common;
mod generics;
mod value;

use proc_macro::TokenStream;

/**
Derive `Arguments` for a struct with named fields. Every field becomes a
member that can be set from the command line; its type has to implement
`switchyard::value::Member`.

Fields can be tagged with `#[argument(...)]`:

- `name = "..."`: the long name of the switch. Without it (or with an empty
  name), the field's own name is used, and the descriptor is marked hidden.
- `short = "..."`: an additional short name.
- `required`: the parse fails if this switch never appears.
- `help = "..."`: help text for the descriptor. Defaults to the field's doc
  comment.
- `skip`: this field is never bound.

When the parser settings require tags, untagged fields are ignored.
*/
#[proc_macro_derive(Arguments, attributes(argument))]
pub fn derive_arguments(item: TokenStream) -> TokenStream {
    match arguments::derive_arguments_result(item.into()) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

/**
Derive `Value` for an enum or a newtype struct.

Enums are parsed from the names of their unit variants, ignoring ASCII case.
A variant can be given a different name with `#[value(name = "...")]`. An enum
can also have a single variant with exactly one field; any name that doesn't
match a unit variant is parsed as that field's type instead.

Newtype structs are parsed as their inner type.
*/
#[proc_macro_derive(Value, attributes(value))]
pub fn derive_value(item: TokenStream) -> TokenStream {
    match value::derive_value_result(item.into()) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}
