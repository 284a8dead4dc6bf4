//! Attribute parsing for `#[env(...)]` annotations.
//!
//! This module extracts and validates decoding attributes from struct fields
//! during macro expansion.

use syn::{Field, LitStr};

/// Parsed `#[env(...)]` attributes from a struct field.
#[derive(Debug, Default)]
pub struct FieldAttrs {
    /// Lookup key under the default `env` tag namespace.
    ///
    /// `Some("-")` is the exclusion sentinel; `Some("")` is the literal
    /// empty key. `None` means the field has no entry in that namespace.
    pub key: Option<String>,

    /// Lookup keys under alternate tag namespaces, in declaration order.
    pub tags: Vec<(String, String)>,

    /// Recurse into the field with the same options instead of converting it.
    pub nested: bool,

    /// Custom deserializer function path (e.g., `"serde_json::from_str"`).
    ///
    /// When specified, bypasses the built-in conversions for this field.
    pub deserializer: Option<String>,
}

impl FieldAttrs {
    /// Extract and parse `#[env(...)]` attributes from a struct field.
    pub fn from_field(field: &Field) -> syn::Result<Self> {
        let mut attrs = Self::default();

        for attr in &field.attrs {
            if !attr.path().is_ident("env") {
                continue;
            }

            attr.parse_nested_meta(|meta| {
                // key = "NAME"
                if meta.path.is_ident("key") {
                    let key: LitStr = meta.value()?.parse()?;
                    attrs.key = Some(key.value());
                    return Ok(());
                }

                // tag(namespace = "NAME", ...)
                if meta.path.is_ident("tag") {
                    meta.parse_nested_meta(|tag| {
                        let namespace = tag
                            .path
                            .get_ident()
                            .ok_or_else(|| tag.error("expected `namespace = \"NAME\"`"))?
                            .to_string();
                        let key: LitStr = tag.value()?.parse()?;
                        attrs.tags.push((namespace, key.value()));
                        Ok(())
                    })?;
                    return Ok(());
                }

                // nested
                if meta.path.is_ident("nested") {
                    attrs.nested = true;
                    return Ok(());
                }

                // deserializer = "function::path"
                if meta.path.is_ident("deserializer") {
                    let func: LitStr = meta.value()?.parse()?;
                    attrs.deserializer = Some(func.value());
                    return Ok(());
                }

                Err(meta.error("unsupported env attribute"))
            })?;
        }

        Ok(attrs)
    }
}
