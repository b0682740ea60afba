//! Derive macro mapping struct fields to SQL column markers.
//!
//! `#[derive(Table)]` turns a row struct into a table marker and one
//! zero-sized column marker per field, so builders can name tables and
//! columns without strings.

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::{format_ident, quote};
use syn::{
    parse_macro_input, Attribute, Data, DeriveInput, Expr, Fields, GenericArgument, Ident, Lit,
    Meta, PathArguments, Type,
};

/// Derives the `Table` trait for a struct, generating typed column markers.
///
/// # Attributes
///
/// - `#[table(name = "table_name")]` - Specifies the SQL table name
///   (optional, defaults to the struct name verbatim)
///
/// # Field Attributes
///
/// - `#[column(primary_key)]` - Marks the field as primary key
/// - `#[column(name = "column_name")]` - Specifies the SQL column name
///   (optional, defaults to the field name)
/// - `#[column(nullable)]` - Marks the column as nullable; `Option<_>`
///   fields are nullable without it
///
/// # Generated Items
///
/// For a struct `User`, this macro generates:
///
/// - `UserTable` - A type implementing `Table` with table metadata
/// - `UserColumns` - A module of column markers (`Id`, `Name`, ...), each
///   implementing `Column`
/// - Column accessor functions on both `UserTable` and `User`
#[proc_macro_derive(Table, attributes(table, column))]
pub fn derive_table(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    derive_table_impl(&input)
        .unwrap_or_else(|e| e.to_compile_error())
        .into()
}

fn derive_table_impl(input: &DeriveInput) -> syn::Result<TokenStream2> {
    let struct_name = &input.ident;
    let table_name = get_table_name(&input.attrs, struct_name)?;

    if !input.generics.params.is_empty() {
        return Err(syn::Error::new_spanned(
            &input.generics,
            "Table derive does not support generic structs",
        ));
    }

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => &fields.named,
            _ => {
                return Err(syn::Error::new_spanned(
                    input,
                    "Table derive only supports structs with named fields",
                ));
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(
                input,
                "Table derive only supports structs",
            ));
        }
    };

    let mut column_infos: Vec<ColumnInfo> = Vec::new();
    for field in fields {
        let field_name = field
            .ident
            .clone()
            .ok_or_else(|| syn::Error::new_spanned(field, "expected a named field"))?;
        let column_attrs = parse_column_attrs(&field.attrs)?;

        column_infos.push(ColumnInfo {
            column_name: column_attrs
                .name
                .unwrap_or_else(|| field_name.to_string()),
            type_name: format_ident!("{}", to_pascal_case(&field_name.to_string())),
            field_name,
            field_type: field.ty.clone(),
            is_primary_key: column_attrs.primary_key,
            is_nullable: column_attrs.nullable || is_option(&field.ty),
        });
    }

    if column_infos.iter().filter(|c| c.is_primary_key).count() > 1 {
        return Err(syn::Error::new_spanned(
            input,
            "Table derive supports at most one #[column(primary_key)]",
        ));
    }

    let table_struct_name = format_ident!("{}Table", struct_name);
    let columns_mod_name = format_ident!("{}Columns", struct_name);

    // Only the markers live in the module; impls stay beside the row
    // struct so field types resolve in the caller's scope.
    let column_structs = column_infos.iter().map(|info| {
        let type_name = &info.type_name;
        let column_name = &info.column_name;
        quote! {
            #[doc = concat!("Column marker for `", #column_name, "`.")]
            #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
            pub struct #type_name;
        }
    });

    let column_impls = column_infos.iter().map(|info| {
        let type_name = &info.type_name;
        let column_name = &info.column_name;
        let field_type = &info.field_type;
        let is_nullable = info.is_nullable;
        let is_primary_key = info.is_primary_key;
        quote! {
            impl ::regsql_core::schema::Column for #columns_mod_name::#type_name {
                type Table = #table_struct_name;
                type Type = #field_type;

                const NAME: &'static str = #column_name;
                const NULLABLE: bool = #is_nullable;
                const PRIMARY_KEY: bool = #is_primary_key;
            }
        }
    });

    let column_accessors: Vec<TokenStream2> = column_infos
        .iter()
        .map(|info| {
            let method_name = &info.field_name;
            let type_name = &info.type_name;
            quote! {
                /// Returns the column marker for typed queries.
                #[inline]
                #[must_use]
                pub const fn #method_name() -> #columns_mod_name::#type_name {
                    #columns_mod_name::#type_name
                }
            }
        })
        .collect();

    let all_column_names = column_infos.iter().map(|c| c.column_name.as_str());

    let primary_key_impl = match column_infos.iter().find(|c| c.is_primary_key) {
        Some(pk) => {
            let pk = &pk.column_name;
            quote! { const PRIMARY_KEY: Option<&'static str> = Some(#pk); }
        }
        None => quote! { const PRIMARY_KEY: Option<&'static str> = None; },
    };

    let table_accessor = if column_infos.iter().any(|c| c.field_name == "table") {
        quote! {}
    } else {
        quote! {
            /// Returns the table marker.
            #[must_use]
            pub const fn table() -> #table_struct_name {
                #table_struct_name
            }
        }
    };

    let expanded = quote! {
        #[doc = concat!("Column markers for `", stringify!(#struct_name), "`.")]
        #[allow(non_snake_case)]
        pub mod #columns_mod_name {
            #(#column_structs)*
        }

        #[doc = concat!("Table marker for `", stringify!(#struct_name), "`.")]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub struct #table_struct_name;

        impl ::regsql_core::schema::Table for #table_struct_name {
            type Row = #struct_name;

            const NAME: &'static str = #table_name;
            const COLUMNS: &'static [&'static str] = &[#(#all_column_names),*];
            #primary_key_impl
        }

        #(#column_impls)*

        impl #table_struct_name {
            /// Returns the table name.
            #[inline]
            #[must_use]
            pub const fn table_name() -> &'static str {
                #table_name
            }

            #(#column_accessors)*
        }

        impl #struct_name {
            #table_accessor

            #(#column_accessors)*
        }
    };

    Ok(expanded)
}

struct ColumnInfo {
    field_name: Ident,
    field_type: Type,
    type_name: Ident,
    column_name: String,
    is_primary_key: bool,
    is_nullable: bool,
}

#[derive(Default)]
struct ColumnAttrs {
    name: Option<String>,
    primary_key: bool,
    nullable: bool,
}

fn string_value(meta: &syn::meta::ParseNestedMeta<'_>) -> syn::Result<String> {
    let value: Expr = meta.value()?.parse()?;
    match value {
        Expr::Lit(syn::ExprLit {
            lit: Lit::Str(s), ..
        }) => Ok(s.value()),
        other => Err(syn::Error::new_spanned(other, "expected a string literal")),
    }
}

fn get_table_name(attrs: &[Attribute], struct_name: &Ident) -> syn::Result<String> {
    let mut table_name = None;
    for attr in attrs.iter().filter(|a| a.path().is_ident("table")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("name") {
                table_name = Some(string_value(&meta)?);
                Ok(())
            } else {
                Err(meta.error("unsupported table attribute"))
            }
        })?;
    }
    Ok(table_name.unwrap_or_else(|| struct_name.to_string()))
}

fn parse_column_attrs(attrs: &[Attribute]) -> syn::Result<ColumnAttrs> {
    let mut result = ColumnAttrs::default();

    for attr in attrs.iter().filter(|a| a.path().is_ident("column")) {
        // Handle empty attribute like #[column]
        if matches!(attr.meta, Meta::Path(_)) {
            continue;
        }

        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("primary_key") {
                result.primary_key = true;
            } else if meta.path.is_ident("nullable") {
                result.nullable = true;
            } else if meta.path.is_ident("name") {
                result.name = Some(string_value(&meta)?);
            } else {
                return Err(meta.error("unsupported column attribute"));
            }
            Ok(())
        })?;
    }

    Ok(result)
}

fn is_option(ty: &Type) -> bool {
    let Type::Path(path) = ty else {
        return false;
    };
    path.path.segments.last().is_some_and(|segment| {
        segment.ident == "Option"
            && matches!(
                &segment.arguments,
                PathArguments::AngleBracketed(args)
                    if matches!(args.args.first(), Some(GenericArgument::Type(_)))
            )
    })
}

fn to_pascal_case(s: &str) -> String {
    let mut result = String::new();
    let mut capitalize_next = true;
    for c in s.trim_start_matches("r#").chars() {
        if c == '_' {
            capitalize_next = true;
        } else if capitalize_next {
            result.push(c.to_ascii_uppercase());
            capitalize_next = false;
        } else {
            result.push(c);
        }
    }
    result
}
