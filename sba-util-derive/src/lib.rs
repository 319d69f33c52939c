extern crate proc_macro2;

use proc_macro::TokenStream;
use quote::quote;

fn get_enum_variants(
    input: &syn::DeriveInput,
) -> &syn::punctuated::Punctuated<syn::Variant, syn::token::Comma> {
    let variants = match &input.data {
        syn::Data::Enum(enum_item) => &enum_item.variants,
        _ => panic!("EnumFromStr can only be derived for enums"),
    };

    assert!(
        variants.iter().all(|v| v.fields.is_empty()),
        "EnumFromStr requires all variants to be fieldless"
    );

    variants
}

/// A handful of registry mnemonics (e.g. `1D`, `2D`) aren't valid Rust
/// identifiers; `#[mnemonic = "1D"]` on a variant overrides the literal
/// matched against input text, in place of the variant's own name.
fn mnemonic_literal(variant: &syn::Variant) -> String {
    for attr in &variant.attrs {
        if attr.path().is_ident("mnemonic") {
            if let syn::Meta::NameValue(nv) = &attr.meta {
                if let syn::Expr::Lit(syn::ExprLit {
                    lit: syn::Lit::Str(s),
                    ..
                }) = &nv.value
                {
                    return s.value();
                }
            }
        }
    }
    variant.ident.to_string()
}

/// Derives `sba_util::EnumFromStr` (and `std::str::FromStr`) for a
/// fieldless enum by matching the literal variant identifier against the
/// input string. This is the textual mnemonic -> enum direction used by
/// every enumerant table and by `Opcode` itself; see spec §4.2/§4.3.
#[proc_macro_derive(EnumFromStr, attributes(mnemonic))]
pub fn enum_from_str_derive(input: TokenStream) -> TokenStream {
    let syn_item: syn::DeriveInput = syn::parse(input).unwrap();
    let name = &syn_item.ident;
    let name_str = name.to_string();
    let variants = get_enum_variants(&syn_item);
    let literals = variants.iter().map(mnemonic_literal);
    let identifiers = variants.iter().map(|v| &v.ident);

    let expanded = quote! {
        impl ::sba_util::EnumFromStr for #name {
            fn from_str(s: &str) -> Result<#name, ::sba_util::ParseEnumError> {
                match s {
                    #( #literals => Ok(#name::#identifiers), )*
                    _ => Err(::sba_util::ParseEnumError {
                        value: s.to_string(),
                        enum_name: #name_str,
                    }),
                }
            }
        }

        impl ::core::str::FromStr for #name {
            type Err = ::sba_util::ParseEnumError;

            fn from_str(s: &str) -> Result<#name, ::sba_util::ParseEnumError> {
                ::sba_util::EnumFromStr::from_str(s)
            }
        }
    };

    expanded.into()
}
