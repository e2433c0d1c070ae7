use syn::{GenericParam, Generics, spanned::Spanned};

/// Generated impls name the type directly, so the type can't have any
/// generic parameters of its own.
pub fn reject_generics(generics: &Generics, trait_name: &str) -> syn::Result<()> {
    match generics.params.first() {
        None => Ok(()),
        Some(param) => Err(syn::Error::new(
            param.span(),
            match param {
                GenericParam::Lifetime(_) => {
                    format!("can't derive `{trait_name}` on a type with lifetimes")
                }
                GenericParam::Type(_) => {
                    format!("generic types aren't (yet) supported by `{trait_name}`")
                }
                GenericParam::Const(_) => {
                    format!("const generics aren't (yet) supported by `{trait_name}`")
                }
            },
        )),
    }
}
