//! Descriptor to schema transformation

use crate::config::GeneratorConfig;
use crate::descriptor::{DescriptorKind, PrimitiveKind, TypeDescriptor};
use crate::error::SchemaError;
use crate::registry::DocRegistry;
use crate::schema::{ObjectSchema, Schema};
use indexmap::{IndexMap, IndexSet};

/// Generate the schema of `descriptor`, attaching docs found in `registry`.
///
/// Uses the default recursion limits; see [`SchemaGenerator`] to change them.
pub fn to_schema(descriptor: &TypeDescriptor, registry: &DocRegistry) -> Result<Schema, SchemaError> {
    SchemaGenerator::new(registry).generate(descriptor)
}

/// Recursive descriptor walker producing [`Schema`] trees.
///
/// A field is required exactly when it has no default value and its type is
/// not nullable. Object identities on the current path are tracked so that a
/// recursive type fails with [`SchemaError::RecursiveType`] instead of
/// recursing forever.
#[derive(Debug, Clone)]
pub struct SchemaGenerator<'r> {
    registry: &'r DocRegistry,
    max_depth: usize,
}

impl<'r> SchemaGenerator<'r> {
    pub fn new(registry: &'r DocRegistry) -> Self {
        Self::with_config(registry, &GeneratorConfig::default())
    }

    pub fn with_config(registry: &'r DocRegistry, config: &GeneratorConfig) -> Self {
        Self {
            registry,
            max_depth: config.max_depth,
        }
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn generate(&self, descriptor: &TypeDescriptor) -> Result<Schema, SchemaError> {
        let mut path = Vec::new();
        self.schema_for(descriptor, &mut path, 0)
    }

    fn schema_for(
        &self,
        descriptor: &TypeDescriptor,
        path: &mut Vec<String>,
        depth: usize,
    ) -> Result<Schema, SchemaError> {
        if depth > self.max_depth {
            return Err(SchemaError::DepthExceeded {
                identity: descriptor.identity().to_string(),
                max_depth: self.max_depth,
            });
        }

        tracing::trace!(
            identity = descriptor.identity(),
            kind = descriptor.kind().label(),
            depth,
            "generating schema"
        );

        match descriptor.kind() {
            DescriptorKind::Primitive(kind) => Ok(primitive_schema(*kind)),
            DescriptorKind::List | DescriptorKind::Set => {
                let item = child(descriptor, 0, 1)?;
                Ok(Schema::array(self.schema_for(&item, path, depth + 1)?))
            }
            DescriptorKind::Map => {
                let value = child(descriptor, 1, 2)?;
                Ok(Schema::map(self.schema_for(&value, path, depth + 1)?))
            }
            DescriptorKind::Object => {
                if !descriptor.is_schema_eligible() {
                    return Err(SchemaError::NotSchemaEligible {
                        identity: descriptor.identity().to_string(),
                    });
                }
                if path.iter().any(|p| p == descriptor.identity()) {
                    return Err(SchemaError::RecursiveType {
                        identity: descriptor.identity().to_string(),
                    });
                }
                path.push(descriptor.identity().to_string());
                let schema = self.object_schema(descriptor, path, depth);
                path.pop();
                schema
            }
            DescriptorKind::Enum(values) => Ok(Schema::string_enum(values.clone())),
            DescriptorKind::Polymorphic => Ok(Schema::any_object()),
            DescriptorKind::Contextual => Err(SchemaError::UnsupportedKind {
                identity: descriptor.identity().to_string(),
            }),
        }
    }

    fn object_schema(
        &self,
        descriptor: &TypeDescriptor,
        path: &mut Vec<String>,
        depth: usize,
    ) -> Result<Schema, SchemaError> {
        let meta = self.registry.get(descriptor.identity());
        let mut properties = IndexMap::new();
        let mut required = IndexSet::new();

        for element in descriptor.elements() {
            let field = element.descriptor();
            let mut schema = self.schema_for(&field, path, depth + 1)?;

            if let Some(text) = meta.and_then(|m| m.field_description(element.name())) {
                schema = schema.with_description(text);
            }
            if !element.is_optional() && !field.is_nullable() {
                required.insert(element.name().to_string());
            }
            properties.insert(element.name().to_string(), schema);
        }

        Ok(Schema::Object(ObjectSchema {
            description: meta.and_then(|m| m.description()).map(str::to_string),
            properties: Some(properties),
            required,
            additional_properties: None,
        }))
    }
}

fn primitive_schema(kind: PrimitiveKind) -> Schema {
    match kind {
        PrimitiveKind::String | PrimitiveKind::Char => Schema::string(),
        PrimitiveKind::Boolean => Schema::boolean(),
        PrimitiveKind::Byte
        | PrimitiveKind::Short
        | PrimitiveKind::Int
        | PrimitiveKind::Long
        | PrimitiveKind::Float
        | PrimitiveKind::Double => Schema::number(),
    }
}

/// Resolve the element at `index`, failing when the arity is not `expected`
fn child(
    descriptor: &TypeDescriptor,
    index: usize,
    expected: usize,
) -> Result<TypeDescriptor, SchemaError> {
    match descriptor.element(index) {
        Some(element) if descriptor.elements().len() == expected => Ok(element.descriptor()),
        _ => Err(SchemaError::MalformedDescriptor {
            identity: descriptor.identity().to_string(),
            expected,
            actual: descriptor.elements().len(),
        }),
    }
}
