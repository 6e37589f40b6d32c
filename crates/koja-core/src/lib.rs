//! koja-core - Type descriptors, doc comments and JSON Schema generation
//!
//! This crate provides:
//! - [`TypeDescriptor`] and the [`JsonSchema`] trait describing a type's shape
//! - [`Schema`], the generated JSON Schema tree
//! - [`to_schema`] / [`SchemaGenerator`] turning descriptors into schemas
//! - [`parse_doc_comment`] and [`DocRegistry`] for type documentation
//! - [`Validator`] checking descriptor graphs before generation
//! - [`SchemaBatch`] for generating many schemas while collecting every error

mod batch;
mod config;
mod describe;
mod descriptor;
mod doc;
mod error;
mod registry;
mod schema;
mod transform;
mod validate;

pub use batch::{BatchOutcome, SchemaBatch};
pub use config::GeneratorConfig;
pub use describe::JsonSchema;
pub use descriptor::{DescriptorKind, Element, LazyDescriptor, PrimitiveKind, TypeDescriptor};
pub use doc::{DocMetadata, parse_doc_comment, parse_field_doc};
pub use error::{
    BatchError, DocCommentError, KojaError, KojaResult, SchemaError, TypeFailure, ValidationError,
};
pub use registry::{DocRegistry, DocRegistryBuilder};
pub use schema::{ArraySchema, BooleanSchema, NumberSchema, ObjectSchema, Schema, StringSchema};
pub use transform::{SchemaGenerator, to_schema};
pub use validate::{Validator, validate};

/// Validate `descriptor` and generate its schema in one step
pub fn generate(descriptor: &TypeDescriptor, registry: &DocRegistry) -> KojaResult<Schema> {
    validate(descriptor)?;
    Ok(to_schema(descriptor, registry)?)
}

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        DocMetadata, DocRegistry, JsonSchema, KojaError, KojaResult, Schema, TypeDescriptor,
        generate, parse_doc_comment, to_schema,
    };
}

#[cfg(test)]
mod lib_tests;
