//! koja-macros - Derive macro for koja JSON Schema generation
//!
//! This crate provides `#[derive(JsonSchema)]`, which implements
//! `koja::JsonSchema` for:
//! - structs with named fields (described as objects)
//! - unit structs (objects without properties)
//! - enums (string enums when every variant is a unit variant, otherwise a
//!   bare polymorphic object)
//!
//! Doc comments are parsed while the derive expands, so a malformed
//! `@param`/`@property` tag fails the build at the offending type.

use darling::ast::{Data, Fields, Style};
use darling::util::Ignored;
use darling::{FromDeriveInput, FromField, FromVariant};
use koja_core::{DocCommentError, DocMetadata, parse_doc_comment, parse_field_doc};
use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::ext::IdentExt;
use syn::meta::ParseNestedMeta;
use syn::{Attribute, DeriveInput, Expr, ExprLit, Lit, Meta, Token, parse_macro_input};

/// Options for the JsonSchema derive macro
#[derive(Debug, FromDeriveInput)]
#[darling(
    attributes(koja),
    forward_attrs(doc, serde),
    supports(struct_named, struct_unit, enum_any)
)]
struct JsonSchemaOpts {
    ident: syn::Ident,
    generics: syn::Generics,
    data: Data<VariantOpts, FieldOpts>,
    attrs: Vec<Attribute>,
}

#[derive(Debug, FromField)]
#[darling(attributes(koja), forward_attrs(doc, serde))]
struct FieldOpts {
    ident: Option<syn::Ident>,
    ty: syn::Type,
    attrs: Vec<Attribute>,

    /// `#[koja(default)]`: the field has a default value and is not required
    #[darling(default)]
    default: bool,
}

#[derive(Debug, FromVariant)]
#[darling(forward_attrs(serde))]
struct VariantOpts {
    ident: syn::Ident,
    fields: Fields<Ignored>,
    attrs: Vec<Attribute>,
}

/// Derive macro for schema types
///
/// # Example
///
/// ```ignore
/// use koja::JsonSchema;
///
/// /// A person
/// /// @param name Full name
/// #[derive(JsonSchema, Serialize, Deserialize)]
/// struct Person {
///     name: String,
///     age: Option<u32>,
///     #[serde(default)]
///     emails: Vec<String>,
/// }
/// ```
#[proc_macro_derive(JsonSchema, attributes(koja))]
pub fn derive_json_schema(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    match expand(&input) {
        Ok(tokens) => TokenStream::from(tokens),
        Err(e) => TokenStream::from(e.write_errors()),
    }
}

/// What a derive contributes besides the impl boilerplate
struct Expansion {
    descriptor: TokenStream2,
    docs: DocMetadata,
    children: Vec<syn::Type>,
}

fn expand(input: &DeriveInput) -> darling::Result<TokenStream2> {
    let opts = JsonSchemaOpts::from_derive_input(input)?;
    let container = serde_attrs(&opts.attrs)?;

    let expansion = match &opts.data {
        Data::Struct(fields) => describe_struct(&opts, fields, container.default)?,
        Data::Enum(variants) => describe_enum(&opts, variants)?,
    };

    let name = &opts.ident;
    let mut generics = opts.generics.clone();
    let predicates = &mut generics.make_where_clause().predicates;
    for param in opts.generics.type_params() {
        let ident = &param.ident;
        predicates.push(syn::parse_quote!(#ident: ::koja::JsonSchema + 'static));
    }
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    let descriptor = &expansion.descriptor;
    let doc_metadata = doc_tokens(&expansion.docs);
    let children = &expansion.children;

    Ok(quote! {
        impl #impl_generics ::koja::JsonSchema for #name #ty_generics #where_clause {
            fn descriptor() -> ::koja::TypeDescriptor {
                #descriptor
            }

            fn doc_metadata() -> ::std::option::Option<::koja::DocMetadata> {
                #doc_metadata
            }

            fn register_docs(registry: &mut ::koja::DocRegistryBuilder) {
                let identity = ::std::any::type_name::<Self>();
                if !registry.visit(identity) {
                    return;
                }
                if let ::std::option::Option::Some(meta) = <Self as ::koja::JsonSchema>::doc_metadata() {
                    registry.insert(identity, meta);
                }
                #(<#children as ::koja::JsonSchema>::register_docs(registry);)*
            }
        }
    })
}

fn describe_struct(
    opts: &JsonSchemaOpts,
    fields: &Fields<FieldOpts>,
    container_default: bool,
) -> darling::Result<Expansion> {
    let mut serialized = Vec::new();
    for field in fields.iter() {
        let Some(ident) = &field.ident else {
            continue;
        };
        let serde = serde_attrs(&field.attrs)?;
        if !serde.skip {
            serialized.push((field, ident, serde));
        }
    }
    let field_names: Vec<String> = serialized
        .iter()
        .map(|(_, ident, _)| ident.unraw().to_string())
        .collect();

    let mut docs = match doc_text(&opts.attrs) {
        Some(text) => {
            parse_doc_comment(&text, &field_names).map_err(|e| doc_error(e, &opts.ident))?
        }
        None => DocMetadata::default(),
    };

    let mut elements = Vec::new();
    let mut children = Vec::new();
    for (field, ident, serde) in serialized {
        let name = ident.unraw().to_string();

        if let Some(text) = doc_text(&field.attrs) {
            if let Some(description) = parse_field_doc(&text).map_err(|e| doc_error(e, ident))? {
                docs.insert_field_doc(&name, description)
                    .map_err(|e| doc_error(e, ident))?;
            }
        }

        let ty = &field.ty;
        let mut element = quote! {
            ::koja::Element::new(
                #name,
                ::koja::LazyDescriptor::new(<#ty as ::koja::JsonSchema>::descriptor),
            )
        };
        if field.default || serde.default || container_default {
            element = quote! { #element.with_default() };
        }
        elements.push(element);
        children.push(ty.clone());
    }

    Ok(Expansion {
        descriptor: quote! {
            ::koja::TypeDescriptor::object(::std::any::type_name::<Self>())
                .eligible()
                #(.field(#elements))*
        },
        docs,
        children,
    })
}

fn describe_enum(opts: &JsonSchemaOpts, variants: &[VariantOpts]) -> darling::Result<Expansion> {
    let mut serialized = Vec::new();
    for variant in variants {
        if !serde_attrs(&variant.attrs)?.skip {
            serialized.push(variant);
        }
    }

    let docs = match doc_text(&opts.attrs) {
        Some(text) => parse_doc_comment::<&str>(&text, &[]).map_err(|e| doc_error(e, &opts.ident))?,
        None => DocMetadata::default(),
    };

    let descriptor = if serialized.iter().all(|v| v.fields.style == Style::Unit) {
        let names: Vec<String> = serialized.iter().map(|v| v.ident.unraw().to_string()).collect();
        let count = names.len();
        quote! {
            {
                let variants: [&str; #count] = [#(#names),*];
                ::koja::TypeDescriptor::enumeration(::std::any::type_name::<Self>(), variants)
                    .eligible()
            }
        }
    } else {
        quote! {
            ::koja::TypeDescriptor::polymorphic(::std::any::type_name::<Self>()).eligible()
        }
    };

    Ok(Expansion {
        descriptor,
        docs,
        children: Vec::new(),
    })
}

fn doc_tokens(docs: &DocMetadata) -> TokenStream2 {
    if docs.is_empty() {
        return quote!(::std::option::Option::None);
    }

    let description = match docs.description() {
        Some(text) => quote!(::std::option::Option::Some(::std::string::String::from(#text))),
        None => quote!(::std::option::Option::None),
    };
    let names = docs.field_descriptions().keys();
    let texts = docs.field_descriptions().values();

    quote! {
        let fields: &[(&str, &str)] = &[#((#names, #texts)),*];
        ::std::option::Option::Some(::koja::DocMetadata::new(#description, fields.iter().copied()))
    }
}

fn doc_error(error: DocCommentError, ident: &syn::Ident) -> darling::Error {
    darling::Error::custom(error).with_span(ident)
}

/// Join the `///` lines of an item, `None` when it has no doc comment
fn doc_text(attrs: &[Attribute]) -> Option<String> {
    let lines: Vec<String> = attrs
        .iter()
        .filter(|attr| attr.path().is_ident("doc"))
        .filter_map(|attr| match &attr.meta {
            Meta::NameValue(nv) => match &nv.value {
                Expr::Lit(ExprLit {
                    lit: Lit::Str(s), ..
                }) => Some(s.value()),
                _ => None,
            },
            _ => None,
        })
        .collect();

    if lines.is_empty() {
        None
    } else {
        Some(lines.join("\n"))
    }
}

/// The serde attributes that change the generated schema
#[derive(Debug, Default, PartialEq, Eq)]
struct SerdeAttrs {
    default: bool,

    /// `skip`, `skip_serializing` or `skip_deserializing`: not part of the schema
    skip: bool,
}

fn serde_attrs(attrs: &[Attribute]) -> syn::Result<SerdeAttrs> {
    let mut parsed = SerdeAttrs::default();
    for attr in attrs.iter().filter(|attr| attr.path().is_ident("serde")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("rename") || meta.path.is_ident("rename_all") {
                return Err(meta.error(
                    "koja: serde renames are not supported; schema names must match the declared names",
                ));
            }
            if meta.path.is_ident("flatten") {
                return Err(meta.error(
                    "koja: serde flatten is not supported; the schema would nest what serde inlines",
                ));
            }
            if meta.path.is_ident("default") {
                parsed.default = true;
            }
            if meta.path.is_ident("skip")
                || meta.path.is_ident("skip_serializing")
                || meta.path.is_ident("skip_deserializing")
            {
                parsed.skip = true;
            }
            skip_meta_value(&meta)
        })?;
    }
    Ok(parsed)
}

/// Consume `= value` or `(...)` after a serde key we do not interpret
fn skip_meta_value(meta: &ParseNestedMeta<'_>) -> syn::Result<()> {
    if meta.input.peek(Token![=]) {
        let _: Expr = meta.value()?.parse()?;
    } else if meta.input.peek(syn::token::Paren) {
        let content;
        syn::parenthesized!(content in meta.input);
        let _: TokenStream2 = content.parse()?;
    }
    Ok(())
}
