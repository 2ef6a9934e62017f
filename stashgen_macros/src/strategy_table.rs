//! StrategyTable derive macro implementation

use std::collections::HashMap;

use proc_macro::TokenStream;
use quote::quote;
use syn::{Data, DeriveInput, Fields, Ident, parse_macro_input};

/// Attribute values read from `#[strategy(...)]`
#[derive(Default)]
struct StrategyAttr {
    shape: Option<syn::LitStr>,
    op:    Option<String>,
}

/// Implementation of the StrategyTable derive macro
pub fn derive_strategy_table_impl(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    match expand(&input) {
        Ok(expanded) => TokenStream::from(expanded),
        Err(error) => TokenStream::from(error.to_compile_error()),
    }
}

fn expand(input: &DeriveInput) -> syn::Result<proc_macro2::TokenStream> {
    let Data::Enum(data_enum) = &input.data else {
        return Err(syn::Error::new_spanned(
            &input.ident,
            "StrategyTable can only be derived for enums",
        ));
    };

    let mut errors: Option<syn::Error> = None;
    let mut push_error = |error: syn::Error| match errors.as_mut() {
        Some(existing) => existing.combine(error),
        None => errors = Some(error),
    };

    let mut seen_shapes: HashMap<String, Ident> = HashMap::new();
    let mut table_entries = Vec::new();
    let mut from_shape_arms = Vec::new();
    let mut exact_shape_arms = Vec::new();
    let mut op_suffix_arms = Vec::new();

    for variant in &data_enum.variants {
        if !matches!(variant.fields, Fields::Unit) {
            push_error(syn::Error::new_spanned(
                variant,
                "StrategyTable can only be derived for enums with unit variants",
            ));
            continue;
        }

        let variant_name = &variant.ident;
        let attr = match parse_strategy_attr(&variant.attrs) {
            Ok(attr) => attr,
            Err(error) => {
                push_error(error);
                continue;
            }
        };

        let op = attr.op.unwrap_or_else(|| variant_name.to_string());
        op_suffix_arms.push(quote! { Self::#variant_name => #op });

        let Some(shape_lit) = attr.shape else {
            exact_shape_arms.push(quote! { Self::#variant_name => None });
            continue;
        };

        let shape = shape_lit.value();
        if let Err(reason) = validate_shape(&shape) {
            push_error(syn::Error::new_spanned(
                &shape_lit,
                format!("malformed shape \"{shape}\": {reason}"),
            ));
            continue;
        }

        if let Some(first) = seen_shapes.get(&shape) {
            push_error(syn::Error::new_spanned(
                &shape_lit,
                format!("shape \"{shape}\" is already mapped to `{first}`"),
            ));
            continue;
        }
        seen_shapes.insert(shape.clone(), variant_name.clone());

        table_entries.push(quote! { (#shape, Self::#variant_name) });
        from_shape_arms.push(quote! { #shape => Some(Self::#variant_name) });
        exact_shape_arms.push(quote! { Self::#variant_name => Some(#shape) });
    }

    if let Some(error) = errors {
        return Err(error);
    }

    let enum_name = &input.ident;

    Ok(quote! {
        impl #enum_name {
            /// Every exact-shape entry, in declaration order
            pub const EXACT_TABLE: &'static [(&'static str, Self)] = &[
                #(#table_entries,)*
            ];

            /// Look up the strategy whose exact shape is `shape`
            pub fn from_exact_shape(shape: &str) -> Option<Self> {
                match shape {
                    #(#from_shape_arms,)*
                    _ => None,
                }
            }

            /// The exact shape this strategy is keyed by, if it is a table entry
            pub const fn exact_shape(&self) -> Option<&'static str> {
                match self {
                    #(#exact_shape_arms,)*
                }
            }

            /// Whether this strategy comes from the exact-shape table
            pub const fn is_exact(&self) -> bool {
                self.exact_shape().is_some()
            }

            /// Suffix used to build the `get*`/`put*` helper operation names
            pub const fn op_suffix(&self) -> &'static str {
                match self {
                    #(#op_suffix_arms,)*
                }
            }
        }
    })
}

/// Extract shape and op from the strategy attribute
fn parse_strategy_attr(attrs: &[syn::Attribute]) -> syn::Result<StrategyAttr> {
    let mut parsed = StrategyAttr::default();

    for attr in attrs {
        if !attr.path().is_ident("strategy") {
            continue;
        }

        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("shape") {
                let value = meta.value()?;
                parsed.shape = Some(value.parse()?);
                Ok(())
            } else if meta.path.is_ident("op") {
                let value = meta.value()?;
                let s: syn::LitStr = value.parse()?;
                parsed.op = Some(s.value());
                Ok(())
            } else {
                Err(meta.error("unsupported strategy attribute"))
            }
        })?;
    }

    Ok(parsed)
}

/// Check that a shape is written exactly as a declared type displays
///
/// Type arguments are separated by `,` alone. The only whitespace allowed is the single
/// space around a wildcard bound keyword.
fn validate_shape(shape: &str) -> Result<(), String> {
    if shape.is_empty() {
        return Err("shape is empty".to_string());
    }

    let unbounded = shape.replace("? extends ", "?").replace("? super ", "?");
    let mut depth = 0_usize;
    let mut previous = ' ';
    for ch in unbounded.chars() {
        match ch {
            '<' => depth += 1,
            '>' => {
                depth = depth
                    .checked_sub(1)
                    .ok_or_else(|| "unbalanced '>'".to_string())?;
            }
            ']' if previous != '[' => return Err("'[' without matching ']'".to_string()),
            '[' | ']' | '.' | ',' | '_' | '$' | '?' => {}
            c if c.is_whitespace() => return Err("whitespace outside a wildcard bound".to_string()),
            c if c.is_ascii_alphanumeric() => {
                if previous == '[' {
                    return Err("array brackets must be empty".to_string());
                }
            }
            other => return Err(format!("unexpected character '{other}'")),
        }
        if previous == '[' && ch != ']' {
            return Err("array brackets must be empty".to_string());
        }
        previous = ch;
    }

    if depth != 0 {
        return Err("unbalanced '<'".to_string());
    }
    if previous == '[' {
        return Err("unterminated '['".to_string());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::validate_shape;

    #[test]
    fn test_well_formed_shapes() {
        for shape in [
            "int",
            "int[]",
            "java.lang.String[]",
            "java.util.ArrayList<java.lang.String>",
            "java.util.Map<java.lang.String,java.lang.Integer>",
            "a.Outer$Inner",
            "java.util.List<? extends a.Base>",
            "java.util.List<? super a.Base>",
        ] {
            assert!(validate_shape(shape).is_ok(), "{shape} should be accepted");
        }
    }

    #[test]
    fn test_malformed_shapes() {
        for shape in [
            "",
            " int",
            "java.util.ArrayList<java.lang.String",
            "java.lang.String>",
            "int[",
            "int[3]",
            "int]",
            "java.lang.String\"java.lang.Integer",
            "java.util.Map<java.lang.String, java.lang.Integer>",
            "java.util.Map<java.lang.String,\tjava.lang.Integer>",
            "int ",
            "java.util.List<?  extends a.Base>",
        ] {
            assert!(validate_shape(shape).is_err(), "{shape:?} should be rejected");
        }
    }
}
