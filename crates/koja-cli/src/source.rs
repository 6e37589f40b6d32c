//! Rust source parsing
//!
//! Source files are parsed with [`syn`] into a [`SourceTable`] of struct and
//! enum definitions. Types deriving `JsonSchema` are eligible for schema
//! generation. Every other struct or enum in the files is still recorded, so a
//! reference to it fails validation with the type's name instead of being
//! reported as unknown.
//!
//! Field types resolve the same way the `JsonSchema` implementations in
//! koja-core do:
//!
//! - `String`, `str`, `char`, `bool` and the numeric primitives
//! - `Option<T>` (nullable `T`); `Box<T>`, `Arc<T>`, `Rc<T>` and `&T` (`T`)
//! - `Vec<T>`, `VecDeque<T>`, `[T]`, `[T; N]` (list)
//! - `HashSet<T>`, `BTreeSet<T>`, `IndexSet<T>` (set)
//! - `HashMap<K, V>`, `BTreeMap<K, V>`, `IndexMap<K, V>` (map)
//! - any other bare name is looked up in the table
//!
//! # Limitations
//!
//! - Generic parameters are not substituted; a field of type `T` is unresolved.
//! - Type aliases and `use ... as` renames are not followed.
//! - Types are keyed by name only, so two `Item`s in different modules collide
//!   and the last definition wins.

use anyhow::{Context, Result};
use indexmap::IndexMap;
use koja_core::{
    DocCommentError, DocMetadata, DocRegistry, Element, LazyDescriptor, PrimitiveKind,
    TypeDescriptor, ValidationError, parse_doc_comment, parse_field_doc,
};
use std::path::Path;
use std::sync::Arc;
use syn::ext::IdentExt;
use syn::meta::ParseNestedMeta;
use syn::punctuated::Punctuated;
use syn::{Attribute, Expr, ExprLit, Fields, GenericArgument, Item, Lit, Meta, PathArguments, Token, Type};

/// A field type reduced to what schema generation needs
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeRef {
    Primitive(PrimitiveKind),
    Option(Box<TypeRef>),
    List(Box<TypeRef>),
    Set(Box<TypeRef>),
    Map(Box<TypeRef>, Box<TypeRef>),

    /// A struct or enum looked up in the table by name
    Named(String),

    /// Anything else, kept as written for error messages
    Unsupported(String),
}

/// The structure of a parsed type definition
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Shape {
    /// Struct with named fields, or a unit struct
    Object(Vec<SourceField>),

    /// Enum with unit variants only
    Enum(Vec<String>),

    /// Enum with at least one data-carrying variant
    Polymorphic,

    Tuple,
}

/// A named field of a struct
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceField {
    pub name: String,
    pub ty: TypeRef,
    pub has_default: bool,
    pub docs: Option<String>,
    pub renamed: bool,

    /// `#[serde(flatten)]`: inlined by serde, which a schema property cannot express
    pub flattened: bool,
}

/// A struct or enum found in the sources
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceType {
    pub name: String,

    /// Whether the type derives `JsonSchema`
    pub eligible: bool,

    pub docs: Option<String>,
    pub shape: Shape,

    /// Whether serde renames the type, its variants or all its fields
    pub renamed: bool,
}

/// Every type definition parsed from a set of source files
#[derive(Debug, Default)]
pub struct SourceTable {
    types: IndexMap<String, SourceType>,
}

impl TypeRef {
    pub fn from_syn(ty: &Type) -> Self {
        match ty {
            Type::Path(type_path) if type_path.qself.is_none() => Self::from_path(&type_path.path, ty),
            Type::Reference(reference) => Self::from_syn(&reference.elem),
            Type::Slice(slice) => Self::List(Box::new(Self::from_syn(&slice.elem))),
            Type::Array(array) => Self::List(Box::new(Self::from_syn(&array.elem))),
            Type::Paren(paren) => Self::from_syn(&paren.elem),
            Type::Group(group) => Self::from_syn(&group.elem),
            other => Self::Unsupported(render(other)),
        }
    }

    fn from_path(path: &syn::Path, ty: &Type) -> Self {
        let Some(segment) = path.segments.last() else {
            return Self::Unsupported(render(ty));
        };
        let name = segment.ident.to_string();
        let args = type_arguments(&segment.arguments);

        if args.is_empty() {
            if let Some(kind) = primitive(&name) {
                return Self::Primitive(kind);
            }
        }

        match (name.as_str(), args.as_slice()) {
            ("Option", [inner]) => Self::Option(Box::new(Self::from_syn(inner))),
            ("Box" | "Arc" | "Rc", [inner]) => Self::from_syn(inner),
            ("Vec" | "VecDeque", [item]) => Self::List(Box::new(Self::from_syn(item))),
            ("HashSet" | "BTreeSet" | "IndexSet", [item, ..]) => {
                Self::Set(Box::new(Self::from_syn(item)))
            }
            ("HashMap" | "BTreeMap" | "IndexMap", [key, value, ..]) => Self::Map(
                Box::new(Self::from_syn(key)),
                Box::new(Self::from_syn(value)),
            ),
            (_, []) => Self::Named(segment.ident.unraw().to_string()),
            _ => Self::Unsupported(render(ty)),
        }
    }
}

fn primitive(name: &str) -> Option<PrimitiveKind> {
    let kind = match name {
        "String" | "str" => PrimitiveKind::String,
        "char" => PrimitiveKind::Char,
        "bool" => PrimitiveKind::Boolean,
        "i8" | "u8" => PrimitiveKind::Byte,
        "i16" | "u16" => PrimitiveKind::Short,
        "i32" | "u32" => PrimitiveKind::Int,
        "i64" | "u64" | "isize" | "usize" => PrimitiveKind::Long,
        "f32" => PrimitiveKind::Float,
        "f64" => PrimitiveKind::Double,
        _ => return None,
    };
    Some(kind)
}

fn type_arguments(arguments: &PathArguments) -> Vec<&Type> {
    match arguments {
        PathArguments::AngleBracketed(args) => args
            .args
            .iter()
            .filter_map(|arg| match arg {
                GenericArgument::Type(ty) => Some(ty),
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    }
}

fn render(ty: &Type) -> String {
    quote::quote!(#ty).to_string()
}

impl SourceField {
    fn from_syn(field: &syn::Field, container_default: bool) -> Option<Self> {
        let name = field.ident.as_ref()?.unraw().to_string();
        let flags = SerdeFlags::from_attrs(&field.attrs);
        if flags.skip {
            return None;
        }

        Some(Self {
            name,
            ty: TypeRef::from_syn(&field.ty),
            has_default: container_default || flags.default,
            docs: doc_text(&field.attrs),
            renamed: flags.renamed,
            flattened: flags.flatten,
        })
    }
}

impl SourceType {
    fn from_struct(item: &syn::ItemStruct) -> Self {
        let container = SerdeFlags::from_attrs(&item.attrs);
        let shape = match &item.fields {
            Fields::Named(named) => Shape::Object(
                named
                    .named
                    .iter()
                    .filter_map(|f| SourceField::from_syn(f, container.default))
                    .collect(),
            ),
            Fields::Unit => Shape::Object(Vec::new()),
            Fields::Unnamed(_) => Shape::Tuple,
        };

        Self {
            name: item.ident.unraw().to_string(),
            eligible: derives_json_schema(&item.attrs),
            docs: doc_text(&item.attrs),
            shape,
            renamed: container.renamed,
        }
    }

    fn from_enum(item: &syn::ItemEnum) -> Self {
        let renamed = SerdeFlags::from_attrs(&item.attrs).renamed
            || item
                .variants
                .iter()
                .any(|v| SerdeFlags::from_attrs(&v.attrs).renamed);
        let variants: Vec<&syn::Variant> = item
            .variants
            .iter()
            .filter(|v| !SerdeFlags::from_attrs(&v.attrs).skip)
            .collect();
        let shape = if variants.iter().all(|v| matches!(v.fields, Fields::Unit)) {
            Shape::Enum(variants.iter().map(|v| v.ident.unraw().to_string()).collect())
        } else {
            Shape::Polymorphic
        };

        Self {
            name: item.ident.unraw().to_string(),
            eligible: derives_json_schema(&item.attrs),
            docs: doc_text(&item.attrs),
            shape,
            renamed,
        }
    }

    pub fn fields(&self) -> &[SourceField] {
        match &self.shape {
            Shape::Object(fields) => fields,
            _ => &[],
        }
    }

    /// Parse the type's doc comment and its fields' doc comments
    pub fn doc_metadata(&self) -> Result<DocMetadata, DocCommentError> {
        let fields = self.fields();
        let names: Vec<&str> = fields.iter().map(|f| f.name.as_str()).collect();

        let mut meta = match &self.docs {
            Some(text) => parse_doc_comment(text, &names)?,
            None => DocMetadata::default(),
        };
        for field in fields {
            let Some(text) = &field.docs else {
                continue;
            };
            if let Some(description) = parse_field_doc(text)? {
                meta.insert_field_doc(&field.name, description)?;
            }
        }
        Ok(meta)
    }

    /// Problems that keep an eligible type out of generation
    fn rejection(&self) -> Option<ValidationError> {
        if matches!(self.shape, Shape::Tuple) {
            return Some(
                ValidationError::new("Tuple structs are not supported; use named fields.")
                    .within(self.name.as_str()),
            );
        }
        if self.renamed {
            return Some(ValidationError::new(RENAME_MESSAGE).within(self.name.as_str()));
        }
        if let Some(field) = self.fields().iter().find(|f| f.renamed) {
            return Some(
                ValidationError::new(RENAME_MESSAGE).within(format!("{}.{}", self.name, field.name)),
            );
        }
        self.fields().iter().find(|f| f.flattened).map(|field| {
            ValidationError::new(FLATTEN_MESSAGE).within(format!("{}.{}", self.name, field.name))
        })
    }
}

const RENAME_MESSAGE: &str = "serde renames are not supported; schema names must match the declared names.";
const FLATTEN_MESSAGE: &str = "serde flatten is not supported; the schema would nest what serde inlines.";

impl SourceTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse every file in `paths` into one table
    pub fn parse_files<P: AsRef<Path>>(paths: &[P]) -> Result<Self> {
        let mut table = Self::new();
        for path in paths {
            table.add_file(path.as_ref())?;
        }
        Ok(table)
    }

    pub fn add_file(&mut self, path: &Path) -> Result<()> {
        let content =
            std::fs::read_to_string(path).with_context(|| format!("Failed to read {path:?}"))?;

        self.add_source(&content)
            .with_context(|| format!("Failed to parse {path:?}"))
    }

    pub fn add_source(&mut self, source: &str) -> Result<()> {
        let file = syn::parse_file(source).context("Failed to parse Rust source")?;
        self.add_items(&file.items);
        Ok(())
    }

    fn add_items(&mut self, items: &[Item]) {
        for item in items {
            match item {
                Item::Struct(s) => self.insert(SourceType::from_struct(s)),
                Item::Enum(e) => self.insert(SourceType::from_enum(e)),
                Item::Mod(m) => {
                    if let Some((_, items)) = &m.content {
                        self.add_items(items);
                    }
                }
                _ => {}
            }
        }
    }

    fn insert(&mut self, ty: SourceType) {
        tracing::trace!(name = %ty.name, eligible = ty.eligible, "parsed type");
        if let Some(previous) = self.types.insert(ty.name.clone(), ty) {
            tracing::warn!(name = %previous.name, "type defined more than once; the last definition wins");
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.types.contains_key(name)
    }

    /// Names of the types deriving `JsonSchema`, in the order they were parsed
    pub fn eligible_names(&self) -> Vec<String> {
        self.types
            .values()
            .filter(|ty| ty.eligible)
            .map(|ty| ty.name.clone())
            .collect()
    }

    /// Descriptor of the named type, `None` when no such type was parsed.
    ///
    /// Object fields are resolved lazily through the shared table, so
    /// self-referencing types can be described.
    pub fn descriptor(self: &Arc<Self>, name: &str) -> Option<TypeDescriptor> {
        self.types.get(name).map(|ty| self.describe_type(ty))
    }

    fn describe(self: &Arc<Self>, ty: &TypeRef) -> TypeDescriptor {
        match ty {
            TypeRef::Primitive(kind) => TypeDescriptor::primitive(*kind),
            TypeRef::Option(inner) => self.describe(inner).nullable(),
            TypeRef::List(item) => TypeDescriptor::list(self.describe(item)),
            TypeRef::Set(item) => TypeDescriptor::set(self.describe(item)),
            TypeRef::Map(key, value) => {
                TypeDescriptor::map(self.describe(key), self.describe(value))
            }
            TypeRef::Named(name) => self
                .descriptor(name)
                .unwrap_or_else(|| TypeDescriptor::contextual(name.as_str())),
            TypeRef::Unsupported(text) => TypeDescriptor::contextual(text.as_str()),
        }
    }

    fn describe_type(self: &Arc<Self>, ty: &SourceType) -> TypeDescriptor {
        let descriptor = match &ty.shape {
            Shape::Object(fields) => {
                fields
                    .iter()
                    .fold(TypeDescriptor::object(ty.name.as_str()), |descriptor, field| {
                        let table = Arc::clone(self);
                        let field_type = field.ty.clone();
                        let element = Element::new(
                            field.name.as_str(),
                            LazyDescriptor::new(move || table.describe(&field_type)),
                        );
                        descriptor.field(if field.has_default {
                            element.with_default()
                        } else {
                            element
                        })
                    })
            }
            Shape::Enum(variants) => {
                TypeDescriptor::enumeration(ty.name.as_str(), variants.iter().cloned())
            }
            Shape::Polymorphic => TypeDescriptor::polymorphic(ty.name.as_str()),
            Shape::Tuple => return TypeDescriptor::contextual(ty.name.as_str()),
        };

        if ty.eligible {
            descriptor.eligible()
        } else {
            descriptor
        }
    }

    /// Documentation of every eligible type, plus the doc comments that
    /// failed to parse
    pub fn doc_registry(&self) -> (DocRegistry, Vec<(String, DocCommentError)>) {
        let mut builder = DocRegistry::builder();
        let mut failures = Vec::new();

        for ty in self.types.values().filter(|ty| ty.eligible) {
            match ty.doc_metadata() {
                Ok(meta) => {
                    builder.insert(ty.name.as_str(), meta);
                }
                Err(e) => failures.push((ty.name.clone(), e)),
            }
        }

        (builder.build(), failures)
    }

    /// Eligible types that cannot be generated at all
    pub fn rejections(&self) -> Vec<(String, ValidationError)> {
        self.types
            .values()
            .filter(|ty| ty.eligible)
            .filter_map(|ty| ty.rejection().map(|e| (ty.name.clone(), e)))
            .collect()
    }
}

/// Check for `JsonSchema` in the type's derive list
fn derives_json_schema(attrs: &[Attribute]) -> bool {
    attrs
        .iter()
        .filter(|attr| attr.path().is_ident("derive"))
        .any(|attr| {
            attr.parse_args_with(Punctuated::<syn::Path, Token![,]>::parse_terminated)
                .map(|paths| {
                    paths
                        .iter()
                        .any(|p| p.segments.last().is_some_and(|s| s.ident == "JsonSchema"))
                })
                .unwrap_or(false)
        })
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

/// The serde and koja attribute keys that change the generated schema
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
struct SerdeFlags {
    default: bool,
    renamed: bool,
    skip: bool,
    flatten: bool,
}

impl SerdeFlags {
    fn from_attrs(attrs: &[Attribute]) -> Self {
        let mut flags = Self::default();
        for attr in attrs {
            let is_serde = attr.path().is_ident("serde");
            if !is_serde && !attr.path().is_ident("koja") {
                continue;
            }
            // Malformed attributes are rustc's to report
            let _ = attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("default") {
                    flags.default = true;
                } else if is_serde
                    && (meta.path.is_ident("rename") || meta.path.is_ident("rename_all"))
                {
                    flags.renamed = true;
                } else if is_serde
                    && (meta.path.is_ident("skip")
                        || meta.path.is_ident("skip_serializing")
                        || meta.path.is_ident("skip_deserializing"))
                {
                    flags.skip = true;
                } else if is_serde && meta.path.is_ident("flatten") {
                    flags.flatten = true;
                }
                skip_meta_value(&meta)
            });
        }
        flags
    }
}

fn skip_meta_value(meta: &ParseNestedMeta<'_>) -> syn::Result<()> {
    if meta.input.peek(Token![=]) {
        let _: Expr = meta.value()?.parse()?;
    } else if meta.input.peek(syn::token::Paren) {
        let content;
        syn::parenthesized!(content in meta.input);
        let _: proc_macro2::TokenStream = content.parse()?;
    }
    Ok(())
}
