//! Structural type descriptors
//!
//! A [`TypeDescriptor`] is the read-only view of a type that the transformer
//! and the validator walk. Descriptors are produced by the host: the
//! `JsonSchema` derive, the CLI's source parser, or by hand.
//!
//! Object fields hold their child descriptor behind a [`LazyDescriptor`], so a
//! type that refers to itself can be described without constructing an
//! infinite value. Container items are resolved when the container is built.

use std::fmt;
use std::sync::Arc;

/// The nine primitive kinds a schema can be generated for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveKind {
    String,
    Char,
    Boolean,
    Byte,
    Short,
    Int,
    Long,
    Float,
    Double,
}

impl PrimitiveKind {
    /// Identity used for primitive descriptors
    pub fn name(self) -> &'static str {
        match self {
            PrimitiveKind::String => "String",
            PrimitiveKind::Char => "Char",
            PrimitiveKind::Boolean => "Boolean",
            PrimitiveKind::Byte => "Byte",
            PrimitiveKind::Short => "Short",
            PrimitiveKind::Int => "Int",
            PrimitiveKind::Long => "Long",
            PrimitiveKind::Float => "Float",
            PrimitiveKind::Double => "Double",
        }
    }

    pub fn is_numeric(self) -> bool {
        !matches!(
            self,
            PrimitiveKind::String | PrimitiveKind::Char | PrimitiveKind::Boolean
        )
    }
}

impl fmt::Display for PrimitiveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// What kind of type a descriptor describes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DescriptorKind {
    Primitive(PrimitiveKind),
    List,
    Set,
    Map,
    Object,
    /// Enum with unit variants only; holds the variant names in declaration order
    Enum(Vec<String>),
    /// Open or sealed hierarchy; rendered as a bare object
    Polymorphic,
    /// A type the host could not resolve
    Contextual,
}

impl DescriptorKind {
    pub fn label(&self) -> &'static str {
        match self {
            DescriptorKind::Primitive(_) => "primitive",
            DescriptorKind::List => "list",
            DescriptorKind::Set => "set",
            DescriptorKind::Map => "map",
            DescriptorKind::Object => "object",
            DescriptorKind::Enum(_) => "enum",
            DescriptorKind::Polymorphic => "polymorphic",
            DescriptorKind::Contextual => "contextual",
        }
    }
}

/// A child descriptor that is resolved on demand
#[derive(Clone)]
pub struct LazyDescriptor(Arc<dyn Fn() -> TypeDescriptor + Send + Sync>);

impl LazyDescriptor {
    /// Wrap a thunk producing the child descriptor
    pub fn new<F>(f: F) -> Self
    where
        F: Fn() -> TypeDescriptor + Send + Sync + 'static,
    {
        Self(Arc::new(f))
    }

    /// Wrap an already built descriptor
    pub fn resolved(descriptor: TypeDescriptor) -> Self {
        let descriptor = Arc::new(descriptor);
        Self::new(move || descriptor.as_ref().clone())
    }

    pub fn resolve(&self) -> TypeDescriptor {
        (self.0)()
    }
}

impl fmt::Debug for LazyDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("LazyDescriptor(..)")
    }
}

impl From<TypeDescriptor> for LazyDescriptor {
    fn from(descriptor: TypeDescriptor) -> Self {
        Self::resolved(descriptor)
    }
}

/// A named child of a descriptor: an object field, a list item, a map key or value
#[derive(Debug, Clone)]
pub struct Element {
    name: String,
    optional: bool,
    descriptor: LazyDescriptor,
}

impl Element {
    pub fn new(name: impl Into<String>, descriptor: impl Into<LazyDescriptor>) -> Self {
        Self {
            name: name.into(),
            optional: false,
            descriptor: descriptor.into(),
        }
    }

    /// Mark the element as having a default value
    pub fn with_default(mut self) -> Self {
        self.optional = true;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether the field has a default value
    pub fn is_optional(&self) -> bool {
        self.optional
    }

    pub fn descriptor(&self) -> TypeDescriptor {
        self.descriptor.resolve()
    }
}

/// Structural description of a type
#[derive(Debug, Clone)]
pub struct TypeDescriptor {
    identity: String,
    kind: DescriptorKind,
    nullable: bool,
    schema_eligible: bool,
    elements: Vec<Element>,
}

impl TypeDescriptor {
    /// Build a descriptor from raw parts.
    ///
    /// The shape is not checked here; arity and key rules are enforced by the
    /// validator so that hosts get a structured error instead of a panic.
    pub fn from_parts(
        identity: impl Into<String>,
        kind: DescriptorKind,
        elements: Vec<Element>,
    ) -> Self {
        Self {
            identity: identity.into(),
            kind,
            nullable: false,
            schema_eligible: false,
            elements,
        }
    }

    pub fn primitive(kind: PrimitiveKind) -> Self {
        Self::from_parts(kind.name(), DescriptorKind::Primitive(kind), Vec::new())
    }

    pub fn list(item: TypeDescriptor) -> Self {
        let identity = format!("List<{}>", item.identity);
        Self::from_parts(identity, DescriptorKind::List, vec![Element::new("item", item)])
    }

    pub fn set(item: TypeDescriptor) -> Self {
        let identity = format!("Set<{}>", item.identity);
        Self::from_parts(identity, DescriptorKind::Set, vec![Element::new("item", item)])
    }

    pub fn map(key: TypeDescriptor, value: TypeDescriptor) -> Self {
        let identity = format!("Map<{}, {}>", key.identity, value.identity);
        Self::from_parts(
            identity,
            DescriptorKind::Map,
            vec![Element::new("key", key), Element::new("value", value)],
        )
    }

    /// An object with no fields yet; add them with [`TypeDescriptor::field`]
    pub fn object(identity: impl Into<String>) -> Self {
        Self::from_parts(identity, DescriptorKind::Object, Vec::new())
    }

    pub fn enumeration<I, S>(identity: impl Into<String>, variants: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let variants = variants.into_iter().map(Into::into).collect();
        Self::from_parts(identity, DescriptorKind::Enum(variants), Vec::new())
    }

    pub fn polymorphic(identity: impl Into<String>) -> Self {
        Self::from_parts(identity, DescriptorKind::Polymorphic, Vec::new())
    }

    pub fn contextual(identity: impl Into<String>) -> Self {
        Self::from_parts(identity, DescriptorKind::Contextual, Vec::new())
    }

    /// Append an element (builder style)
    pub fn field(mut self, element: Element) -> Self {
        self.elements.push(element);
        self
    }

    /// Mark values of this descriptor as nullable
    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    /// Mark an object or enum as explicitly opted into schema generation
    pub fn eligible(mut self) -> Self {
        self.schema_eligible = true;
        self
    }

    pub fn identity(&self) -> &str {
        &self.identity
    }

    pub fn kind(&self) -> &DescriptorKind {
        &self.kind
    }

    pub fn is_nullable(&self) -> bool {
        self.nullable
    }

    pub fn is_schema_eligible(&self) -> bool {
        self.schema_eligible
    }

    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    pub fn element(&self, index: usize) -> Option<&Element> {
        self.elements.get(index)
    }

    /// Field names in declaration order
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.elements.iter().map(Element::name)
    }

    /// Variant names; empty unless this is an enum
    pub fn enum_values(&self) -> &[String] {
        match &self.kind {
            DescriptorKind::Enum(values) => values,
            _ => &[],
        }
    }
}
