//! Derive macro implementation for envtag

use proc_macro::TokenStream;
use quote::quote;
use syn::{parse_macro_input, Data, DeriveInput, Fields, Type};

mod attrs;

use attrs::FieldAttrs;

/// Extract the inner type from `Option<T>`, if the field is one syntactically.
fn option_inner_type(ty: &Type) -> Option<&Type> {
    if let Type::Path(type_path) = ty {
        if let Some(seg) = type_path.path.segments.last() {
            if seg.ident == "Option" {
                if let syn::PathArguments::AngleBracketed(args) = &seg.arguments {
                    if let Some(syn::GenericArgument::Type(inner)) = args.args.first() {
                        return Some(inner);
                    }
                }
            }
        }
    }
    None
}

/// `EnvDecode` derive macro
///
/// Implements `envtag::EnvDecode` on the struct: a walker that visits fields
/// in declaration order, resolves each field's lookup key under the active
/// tag namespace, and converts and assigns the value found in the source.
///
/// # Supported Attributes
///
/// **Field-level** (`#[env(...)]`):
/// - `key = "NAME"`: lookup key under the default `env` namespace; `"-"`
///   excludes the field, `""` is the literal empty key
/// - `tag(ns = "NAME", ...)`: keys under alternate tag namespaces
/// - `nested`: recurse into the field with the same options
/// - `deserializer = "func"`: use a custom deserializer function
///
/// A field with no `#[env(...)]` attribute never participates.
///
/// # Example
///
/// See the `envtag` crate documentation for usage examples.
#[proc_macro_derive(EnvDecode, attributes(env))]
pub fn derive_env_decode(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    // Struct name
    let struct_name = &input.ident;

    // Extract fields
    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => &fields.named,
            _ => {
                return syn::Error::new_spanned(
                    &input,
                    "EnvDecode only supports structs with named fields",
                )
                .to_compile_error()
                .into();
            }
        },
        _ => {
            return syn::Error::new_spanned(&input, "EnvDecode only supports structs")
                .to_compile_error()
                .into();
        }
    };

    // Generate one decode step per field, in declaration order
    let steps = fields.iter().map(|field| {
        let field_name = field.ident.as_ref().unwrap();

        // Parse attributes
        let attrs = match FieldAttrs::from_field(field) {
            Ok(attrs) => attrs,
            Err(err) => return err.to_compile_error(),
        };

        if attrs.nested {
            if attrs.key.is_some() || !attrs.tags.is_empty() || attrs.deserializer.is_some() {
                return syn::Error::new_spanned(
                    field,
                    "nested fields cannot carry a key or deserializer",
                )
                .to_compile_error();
            }

            // Option<T> nesting is allocated before the recursion
            return if option_inner_type(&field.ty).is_some() {
                quote! {
                    ::envtag::de::decode_nested_opt(source, options, &mut self.#field_name)?;
                }
            } else {
                quote! {
                    ::envtag::de::decode_nested(source, options, &mut self.#field_name)?;
                }
            };
        }

        // Per-namespace key table, default namespace first
        let mut entries = Vec::new();
        if let Some(key) = &attrs.key {
            entries.push(quote! { (::envtag::DEFAULT_TAG, #key) });
        }
        for (namespace, key) in &attrs.tags {
            entries.push(quote! { (#namespace, #key) });
        }

        if entries.is_empty() {
            if attrs.deserializer.is_some() {
                return syn::Error::new_spanned(
                    field,
                    "deserializer requires a key or tag entry",
                )
                .to_compile_error();
            }
            // Untagged field: never participates
            return quote! {};
        }

        if let Some(func_path) = &attrs.deserializer {
            // Use custom deserializer function
            let func: proc_macro2::TokenStream = func_path.parse().unwrap();
            quote! {
                if let ::std::option::Option::Some(__key) =
                    options.key_in(&[#(#entries),*])
                {
                    ::envtag::de::decode_leaf_with(
                        source,
                        __key,
                        options.required,
                        &mut self.#field_name,
                        |__raw: &str| #func(__raw),
                    )?;
                }
            }
        } else {
            // Built-in conversion by the field's type
            quote! {
                if let ::std::option::Option::Some(__key) =
                    options.key_in(&[#(#entries),*])
                {
                    ::envtag::de::decode_leaf(
                        source,
                        __key,
                        options.required,
                        &mut self.#field_name,
                    )?;
                }
            }
        }
    });

    let expanded = quote! {
        #[automatically_derived]
        impl ::envtag::EnvDecode for #struct_name {
            fn decode_from<__L: ::envtag::Lookup + ?Sized>(
                &mut self,
                source: &__L,
                options: &::envtag::Options,
            ) -> ::std::result::Result<(), ::envtag::Error> {
                #(#steps)*
                ::std::result::Result::Ok(())
            }
        }
    };

    TokenStream::from(expanded)
}
