use darling::{
    FromAttributes as _,
    util::{Flag, SpannedValue},
};
use itertools::Itertools as _;
use lazy_format::lazy_format;
use proc_macro2::TokenStream as TokenStream2;
use quote::ToTokens;
use syn::{Attribute, Expr, Field, Ident, Meta, Type, ext::IdentExt as _, spanned::Spanned as _};

pub struct IdentString<'a> {
    raw: &'a Ident,
    string: String,
}

impl<'a> IdentString<'a> {
    pub fn new(ident: &'a Ident) -> Self {
        Self {
            string: ident.unraw().to_string(),
            raw: ident,
        }
    }

    pub fn as_str(&self) -> &str {
        self.string.as_str()
    }
}

impl ToTokens for IdentString<'_> {
    fn to_tokens(&self, tokens: &mut TokenStream2) {
        self.raw.to_tokens(tokens);
    }
}

#[derive(darling::FromAttributes, Debug)]
#[darling(attributes(argument))]
struct RawArgumentAttr {
    name: Option<SpannedValue<String>>,
    short: Option<SpannedValue<String>>,
    required: Flag,
    help: Option<String>,
    skip: Flag,
}

/// Everything given in a field's `#[argument(...)]` attributes
pub struct TagInfo {
    pub name: String,
    pub short: Option<String>,
    pub required: bool,
    pub help: String,
}

pub struct FieldInfo<'a> {
    pub ident: IdentString<'a>,
    pub ty: &'a Type,
    pub docs: String,

    /// `None` if the field has no `#[argument]` attribute at all
    pub tag: Option<TagInfo>,
}

pub fn compute_docs(attrs: &[Attribute]) -> syn::Result<String> {
    let lines: Vec<String> = attrs
        .iter()
        .filter_map(|attr| match attr.meta {
            Meta::NameValue(ref meta) => Some(meta),
            _ => None,
        })
        .filter(|meta| meta.path.is_ident("doc"))
        .map(|meta| match meta.value {
            Expr::Lit(ref lit) => match lit.lit {
                syn::Lit::Str(ref lit) => Ok(lit.value()),
                _ => Err(syn::Error::new(meta.span(), "malformed #[doc] attribute")),
            },
            Expr::Macro(ref expr) => Err(syn::Error::new(
                expr.span(),
                "macro #[doc] attributes aren't supported",
            )),
            _ => Err(syn::Error::new(meta.span(), "malformed #[doc] attribute")),
        })
        .map_ok(|line| line.trim().to_owned())
        .try_collect()?;

    Ok(lines.join("\n").trim().to_owned())
}

fn is_argument_attr(attr: &Attribute) -> bool {
    attr.path().is_ident("argument")
}

impl<'a> FieldInfo<'a> {
    /// Returns `None` for fields marked `#[argument(skip)]`
    pub fn from_field(field: &'a Field) -> syn::Result<Option<Self>> {
        let ident = field.ident.as_ref().map(IdentString::new).ok_or_else(|| {
            syn::Error::new(
                field.span(),
                "can't derive `Arguments` on tuple structs; members need names",
            )
        })?;

        let tagged = field.attrs.iter().any(is_argument_attr);

        // A bare `#[argument]` tags the field without saying anything else
        // about it; only the list forms carry data.
        let listed: Vec<Attribute> = field
            .attrs
            .iter()
            .filter(|attr| !(is_argument_attr(attr) && matches!(attr.meta, Meta::Path(_))))
            .cloned()
            .collect();

        let parsed = RawArgumentAttr::from_attributes(&listed)?;

        if parsed.skip.is_present() {
            return match (
                &parsed.name,
                &parsed.short,
                parsed.required.is_present(),
                &parsed.help,
            ) {
                (None, None, false, None) => Ok(None),
                _ => Err(syn::Error::new(
                    field.span(),
                    "a skipped field can't have any other argument settings",
                )),
            };
        }

        let docs = compute_docs(&field.attrs)?;

        let tag = match tagged {
            false => None,
            true => Some(TagInfo {
                name: parsed
                    .name
                    .map(|name| check_name("name", name))
                    .transpose()?
                    .unwrap_or_default(),
                short: parsed
                    .short
                    .map(|short| check_name("short name", short))
                    .transpose()?
                    .filter(|short| !short.is_empty()),
                required: parsed.required.is_present(),
                help: parsed.help.unwrap_or_default(),
            }),
        };

        Ok(Some(Self {
            ident,
            ty: &field.ty,
            docs,
            tag,
        }))
    }
}

/// Catch names that could never be matched. Anything that depends on the
/// prefixes and separators in use is checked again when the descriptors are
/// built.
fn check_name(kind: &str, name: SpannedValue<String>) -> syn::Result<String> {
    if name.contains(char::is_whitespace) {
        Err(syn::Error::new(
            name.span(),
            lazy_format!(
                "argument {kind} {name:?} shouldn't include whitespace",
                name = name.as_str()
            ),
        ))
    } else {
        Ok(name.as_str().to_owned())
    }
}

#[cfg(test)]
mod tests {
    use syn::{Data, DeriveInput, parse_quote};

    use super::*;

    fn first_field(input: &DeriveInput) -> &Field {
        match input.data {
            Data::Struct(ref data) => data.fields.iter().next().unwrap(),
            _ => panic!("expected a struct"),
        }
    }

    #[test]
    fn skipped_field_is_dropped() {
        let input: DeriveInput = parse_quote! {
            struct Options {
                #[argument(skip)]
                cache: Vec<String>,
            }
        };

        assert!(FieldInfo::from_field(first_field(&input)).unwrap().is_none());
    }

    #[test]
    fn skip_conflicts_with_every_other_setting() {
        let inputs: [DeriveInput; 4] = [
            parse_quote! { struct Options { #[argument(skip, help = "never shown")] cache: String } },
            parse_quote! { struct Options { #[argument(skip, name = "cache")] cache: String } },
            parse_quote! { struct Options { #[argument(skip, short = "c")] cache: String } },
            parse_quote! { struct Options { #[argument(skip, required)] cache: String } },
        ];

        for input in &inputs {
            assert!(FieldInfo::from_field(first_field(input)).is_err());
        }
    }

    #[test]
    fn tags_and_docs() {
        let input: DeriveInput = parse_quote! {
            struct Options {
                /// The name to greet
                #[argument(name = "firstname", short = "f", required)]
                name: String,
            }
        };

        let info = FieldInfo::from_field(first_field(&input)).unwrap().unwrap();
        let tag = info.tag.unwrap();

        assert_eq!(info.ident.as_str(), "name");
        assert_eq!(info.docs, "The name to greet");
        assert_eq!(tag.name, "firstname");
        assert_eq!(tag.short.as_deref(), Some("f"));
        assert!(tag.required);
        assert_eq!(tag.help, "");
    }

    #[test]
    fn bare_attribute_tags_without_a_name() {
        let input: DeriveInput = parse_quote! {
            struct Options {
                #[argument]
                age: u32,
            }
        };

        let info = FieldInfo::from_field(first_field(&input)).unwrap().unwrap();
        assert_eq!(info.tag.map(|tag| tag.name), Some(String::new()));
    }

    #[test]
    fn untagged_field() {
        let input: DeriveInput = parse_quote! {
            struct Options {
                verbose: bool,
            }
        };

        let info = FieldInfo::from_field(first_field(&input)).unwrap().unwrap();
        assert!(info.tag.is_none());
    }
}
