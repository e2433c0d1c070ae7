use itertools::Itertools as _;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{Data, DeriveInput, Fields, Ident, spanned::Spanned as _};

use crate::{
    common::{FieldInfo, TagInfo},
    generics::reject_generics,
};

fn tag_expression(tag: &TagInfo) -> TokenStream2 {
    let TagInfo {
        ref name,
        ref short,
        required,
        ref help,
    } = *tag;

    let short = match short {
        Some(short) => quote! { ::core::option::Option::Some(#short) },
        None => quote! { ::core::option::Option::None },
    };

    quote! {
        ::switchyard::field::Tag {
            name: #name,
            short: #short,
            required: #required,
            help: #help,
        }
    }
}

fn field_expression(field: &FieldInfo<'_>) -> TokenStream2 {
    let ident = &field.ident;
    let member = field.ident.as_str();
    let ty = field.ty;
    let docs = &field.docs;

    let tagged = field.tag.as_ref().map(|tag| {
        let tag = tag_expression(tag);
        quote! { .tagged(#tag) }
    });

    let documented = match docs.is_empty() {
        true => None,
        false => Some(quote! { .documented(#docs) }),
    };

    quote! {
        ::switchyard::field::Field::new::<#ty>(
            #member,
            |target: &mut Self, raw: &str| {
                ::switchyard::value::Member::assign(&mut target.#ident, raw)
            },
        )
        #tagged
        #documented
    }
}

fn derive_arguments_struct(ident: &Ident, fields: &Fields) -> syn::Result<TokenStream2> {
    let fields = match fields {
        Fields::Named(fields) => &fields.named,
        Fields::Unnamed(_) | Fields::Unit => {
            return Err(syn::Error::new(
                fields.span(),
                "can only derive `Arguments` on structs with named fields",
            ));
        }
    };

    let fields: Vec<FieldInfo<'_>> = fields
        .iter()
        .map(FieldInfo::from_field)
        .flatten_ok()
        .try_collect()?;

    let expressions = fields.iter().map(field_expression);

    Ok(quote! {
        impl ::switchyard::Arguments for #ident {
            fn fields() -> ::std::vec::Vec<::switchyard::field::Field<Self>> {
                ::std::vec![
                    #(#expressions,)*
                ]
            }
        }
    })
}

pub fn derive_arguments_result(item: TokenStream2) -> syn::Result<TokenStream2> {
    let input: DeriveInput = syn::parse2(item)?;
    reject_generics(&input.generics, "Arguments")?;

    match input.data {
        Data::Struct(ref data) => derive_arguments_struct(&input.ident, &data.fields),
        Data::Enum(_) => Err(syn::Error::new(
            input.span(),
            "can't derive `Arguments` on an enum; subcommands aren't supported",
        )),
        Data::Union(_) => Err(syn::Error::new(
            input.span(),
            "can't derive `Arguments` on a union",
        )),
    }
}
