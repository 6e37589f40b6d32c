//! # koja
//!
//! Generate JSON Schema documents from the static structure of Rust types,
//! with descriptions taken from their doc comments.
//!
//! koja provides:
//! - `#[derive(JsonSchema)]` for structs and enums
//! - `@param` / `@property` tags in a type's doc comment (or plain `///`
//!   comments on fields) for property descriptions
//! - required-property inference: a field is required unless it is an
//!   `Option` or has a serde/koja default
//! - validation of the type graph before anything is generated
//!
//! ## Quick Start
//!
//! ```ignore
//! use koja::JsonSchema;
//! use serde::Deserialize;
//!
//! /// A person
//! /// @param name Full name
//! #[derive(JsonSchema, Deserialize)]
//! struct Person {
//!     name: String,
//!     age: Option<u32>,
//!     #[serde(default)]
//!     emails: Vec<String>,
//! }
//!
//! let schema = koja::json_schema::<Person>()?;
//! println!("{}", koja::serde_json::to_string_pretty(&schema)?);
//! ```
//!
//! ## Crate Structure
//!
//! This is a facade crate that re-exports from:
//! - [`koja_core`] - Descriptors, doc parsing, validation and generation
//! - [`koja_macros`] - The `JsonSchema` derive

// Lets the derive's `::koja::` paths resolve inside this crate's own tests
extern crate self as koja;

// Re-export core types
pub use koja_core::{
    ArraySchema, BatchError, BatchOutcome, BooleanSchema, DescriptorKind, DocCommentError,
    DocMetadata, DocRegistry, DocRegistryBuilder, Element, GeneratorConfig, JsonSchema, KojaError,
    KojaResult, LazyDescriptor, NumberSchema, ObjectSchema, PrimitiveKind, Schema, SchemaBatch,
    SchemaError, SchemaGenerator, StringSchema, TypeDescriptor, TypeFailure, ValidationError,
    Validator, generate, parse_doc_comment, parse_field_doc, to_schema, validate,
};

// Re-export the derive (lives in the macro namespace next to the trait)
pub use koja_macros::JsonSchema;

// Re-export common dependencies
pub use serde_json;

/// Generate the schema of `T` with default settings.
///
/// Validates `T`'s descriptor graph, collects the documentation of every type
/// reachable from `T` and transforms the descriptor.
pub fn json_schema<T: JsonSchema + ?Sized>() -> KojaResult<Schema> {
    json_schema_with::<T>(&GeneratorConfig::default())
}

/// Generate the schema of `T` using `config`
pub fn json_schema_with<T: JsonSchema + ?Sized>(config: &GeneratorConfig) -> KojaResult<Schema> {
    let descriptor = T::descriptor();
    validate(&descriptor)?;

    let registry = DocRegistry::for_type::<T>();
    tracing::debug!(
        identity = descriptor.identity(),
        documented = registry.len(),
        "generating schema"
    );

    Ok(SchemaGenerator::with_config(&registry, config).generate(&descriptor)?)
}

/// Prelude module for convenient imports.
///
/// Use `use koja::prelude::*;` to import commonly used types.
///
/// This includes:
/// - The `JsonSchema` trait and derive
/// - Generated output: `Schema`
/// - Errors: `KojaError`, `KojaResult`
/// - Entry points: `json_schema`, `json_schema_with`
pub mod prelude {
    pub use crate::{
        GeneratorConfig, JsonSchema, KojaError, KojaResult, Schema, json_schema, json_schema_with,
    };
}
