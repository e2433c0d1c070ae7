use std::collections::{HashMap, hash_map::Entry};

use darling::{FromAttributes as _, util::SpannedValue};
use itertools::Itertools as _;
use lazy_format::lazy_format;
use proc_macro2::{Span, TokenStream as TokenStream2};
use quote::quote;
use syn::{
    Data, DeriveInput, Fields, FieldsNamed, FieldsUnnamed, Ident, Token, Variant,
    punctuated::Punctuated, spanned::Spanned as _,
};

use crate::{common::IdentString, generics::reject_generics};

#[derive(darling::FromAttributes, Debug)]
#[darling(attributes(value))]
struct RawVariantAttr {
    name: Option<SpannedValue<String>>,
}

/// A variant holding a single value, used for anything that doesn't match
/// one of the unit variants.
struct Fallback<'a> {
    variant: &'a Ident,
    field: Option<&'a Ident>,
}

struct AnalyzedEnum<'a> {
    variants: Vec<(String, &'a Ident)>,
    fallback: Option<Fallback<'a>>,
}

/// Names are matched case-insensitively, so two names that differ only in
/// case would collide.
fn detect_collision(
    known: &mut HashMap<String, Span>,
    name: &str,
    span: Span,
) -> syn::Result<()> {
    match known.entry(name.to_ascii_lowercase()) {
        Entry::Occupied(entry) => {
            let mut err1 = syn::Error::new(span, lazy_format!("duplicate value name {name:?}"));
            let err2 = syn::Error::new(*entry.get(), "original use here");

            err1.combine(err2);
            Err(err1)
        }
        Entry::Vacant(entry) => {
            entry.insert(span);
            Ok(())
        }
    }
}

impl<'a> AnalyzedEnum<'a> {
    fn from_variants(variants: impl IntoIterator<Item = &'a Variant>) -> syn::Result<Self> {
        let mut fallback = None;
        let mut collected = Vec::new();
        let mut known = HashMap::new();

        for variant in variants {
            let attr = RawVariantAttr::from_attributes(&variant.attrs)?;

            match variant.fields {
                Fields::Unit => {
                    let (name, span) = match attr.name {
                        Some(name) => (name.as_str().to_owned(), name.span()),
                        None => (
                            IdentString::new(&variant.ident).as_str().to_owned(),
                            variant.ident.span(),
                        ),
                    };

                    if name.trim().is_empty() {
                        return Err(syn::Error::new(span, "value names can't be empty"));
                    }

                    detect_collision(&mut known, &name, span)?;
                    collected.push((name, &variant.ident));
                }
                Fields::Unnamed(FieldsUnnamed {
                    unnamed: ref fields,
                    ..
                })
                | Fields::Named(FieldsNamed {
                    named: ref fields, ..
                }) => match fields.iter().exactly_one() {
                    Ok(field) => match (&fallback, attr.name) {
                        (Some(_), _) => {
                            return Err(syn::Error::new(
                                variant.span(),
                                "more than one fallback variant",
                            ));
                        }
                        (None, Some(name)) => {
                            return Err(syn::Error::new(
                                name.span(),
                                "fallback variants can't be renamed",
                            ));
                        }
                        (None, None) => {
                            fallback = Some(Fallback {
                                variant: &variant.ident,
                                field: field.ident.as_ref(),
                            })
                        }
                    },
                    Err(_) => {
                        return Err(syn::Error::new(
                            variant.span(),
                            "variant with more than one field",
                        ));
                    }
                },
            }
        }

        Ok(AnalyzedEnum {
            variants: collected,
            fallback,
        })
    }
}

fn member_impl(ident: &Ident) -> TokenStream2 {
    quote! {
        impl ::switchyard::value::Member for #ident {
            const TYPE: ::switchyard::descriptor::MemberType =
                ::switchyard::descriptor::MemberType::Scalar(
                    <Self as ::switchyard::value::Value>::TYPE,
                );

            #[inline]
            fn assign(
                &mut self,
                raw: &str,
            ) -> ::core::result::Result<(), ::switchyard::errors::ConversionError> {
                ::switchyard::value::assign_scalar(self, raw)
            }
        }
    }
}

fn derive_value_enum(
    ident: &Ident,
    variants: &Punctuated<Variant, Token![,]>,
) -> syn::Result<TokenStream2> {
    let analyzed = AnalyzedEnum::from_variants(variants)?;
    let type_name = IdentString::new(ident);
    let type_name = type_name.as_str();

    let names = analyzed.variants.iter().map(|(name, _)| name.as_str());
    let names2 = names.clone();

    let trimmed = match analyzed.variants.is_empty() {
        true => None,
        false => Some(quote! { let trimmed = raw.trim(); }),
    };

    let unit_arms = analyzed.variants.iter().map(|(name, variant)| {
        quote! {
            if trimmed.eq_ignore_ascii_case(#name) {
                return ::core::result::Result::Ok(Self::#variant);
            }
        }
    });

    let fallback = match analyzed.fallback {
        Some(Fallback { variant, field }) => {
            let body = match field {
                Some(field) => quote! { { #field: value } },
                None => quote! { ( value ) },
            };

            quote! {
                match ::switchyard::value::Value::from_arg(raw) {
                    ::core::result::Result::Ok(value) => ::core::result::Result::Ok(
                        Self::#variant #body
                    ),
                    ::core::result::Result::Err(err) => ::core::result::Result::Err(
                        ::switchyard::errors::ConversionError::expecting(
                            err,
                            <Self as ::switchyard::value::Value>::TYPE,
                        )
                    ),
                }
            }
        }
        None => quote! {
            ::core::result::Result::Err(
                ::switchyard::errors::ConversionError::should_be(
                    raw,
                    <Self as ::switchyard::value::Value>::TYPE,
                    &[ #(#names2,)* ],
                )
            )
        },
    };

    let member = member_impl(ident);

    Ok(quote! {
        impl ::switchyard::value::Value for #ident {
            const TYPE: ::switchyard::descriptor::TypeTag =
                ::switchyard::descriptor::TypeTag::Enum {
                    name: #type_name,
                    variants: &[ #(#names,)* ],
                };

            fn from_arg(
                raw: &str,
            ) -> ::core::result::Result<Self, ::switchyard::errors::ConversionError> {
                #trimmed
                #(#unit_arms)*
                #fallback
            }
        }

        #member
    })
}

fn derive_value_newtype(ident: &Ident, field: Option<&Ident>) -> TokenStream2 {
    let type_name = IdentString::new(ident);
    let type_name = type_name.as_str();

    let struct_body = match field {
        Some(field) => quote! { { #field: value } },
        None => quote! { ( value ) },
    };

    let member = member_impl(ident);

    quote! {
        impl ::switchyard::value::Value for #ident {
            const TYPE: ::switchyard::descriptor::TypeTag =
                ::switchyard::descriptor::TypeTag::Other { name: #type_name };

            fn from_arg(
                raw: &str,
            ) -> ::core::result::Result<Self, ::switchyard::errors::ConversionError> {
                match ::switchyard::value::Value::from_arg(raw) {
                    ::core::result::Result::Ok(value) => ::core::result::Result::Ok(
                        Self #struct_body
                    ),
                    ::core::result::Result::Err(err) => ::core::result::Result::Err(
                        ::switchyard::errors::ConversionError::expecting(
                            err,
                            <Self as ::switchyard::value::Value>::TYPE,
                        )
                    ),
                }
            }
        }

        #member
    }
}

pub fn derive_value_result(item: TokenStream2) -> syn::Result<TokenStream2> {
    let input: DeriveInput = syn::parse2(item)?;
    reject_generics(&input.generics, "Value")?;

    match input.data {
        Data::Struct(ref data) => {
            let field = data.fields.iter().exactly_one().map_err(|_| {
                syn::Error::new(
                    input.span(),
                    "can only derive `Value` on structs with exactly one field",
                )
            })?;

            Ok(derive_value_newtype(&input.ident, field.ident.as_ref()))
        }
        Data::Enum(ref data) => derive_value_enum(&input.ident, &data.variants),
        Data::Union(_) => Err(syn::Error::new(
            input.span(),
            "can't derive `Value` on a union",
        )),
    }
}
