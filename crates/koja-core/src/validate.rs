//! Pre-generation validation of descriptor graphs
//!
//! Checks that every type reachable from a root can be represented:
//! - primitives (always valid)
//! - lists and sets with exactly one valid item descriptor
//! - maps with exactly two descriptors, a `String` key and a valid value
//! - objects and enums explicitly marked for schema generation, with valid
//!   fields
//!
//! Polymorphic descriptors are accepted and contextual ones rejected.
//!
//! The walk terminates on recursive types: an identity that is already being
//! validated further up the stack is treated as valid, since its own first
//! visit decides the outcome. Nothing reached from a failing root is cached.

use crate::descriptor::{DescriptorKind, PrimitiveKind, TypeDescriptor};
use crate::error::ValidationError;
use std::collections::HashSet;

/// Validate a single descriptor graph
pub fn validate(descriptor: &TypeDescriptor) -> Result<(), ValidationError> {
    Validator::new().validate(descriptor)
}

/// Descriptor validator.
///
/// Results are cached by identity, so one validator can check many roots of
/// the same session without walking shared types twice. Identities that pass
/// inside a walk are only committed to the cache when the outermost
/// validation succeeds, since their result may rest on an ancestor that is
/// still being checked.
#[derive(Debug, Default)]
pub struct Validator {
    validated: HashSet<String>,
    visiting: HashSet<String>,
    pending: HashSet<String>,
}

impl Validator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn validate(&mut self, descriptor: &TypeDescriptor) -> Result<(), ValidationError> {
        // Primitive identities are not cached; a user type may share the name
        if let DescriptorKind::Primitive(_) = descriptor.kind() {
            return Ok(());
        }

        let identity = descriptor.identity();
        if self.validated.contains(identity)
            || self.visiting.contains(identity)
            || self.pending.contains(identity)
        {
            return Ok(());
        }

        self.visiting.insert(identity.to_string());
        let result = self.check(descriptor);
        self.visiting.remove(identity);

        match &result {
            Ok(()) => {
                self.pending.insert(identity.to_string());
            }
            Err(e) => tracing::debug!(identity, error = %e, "descriptor rejected"),
        }

        if self.visiting.is_empty() {
            if result.is_ok() {
                self.validated.extend(self.pending.drain());
            } else {
                self.pending.clear();
            }
        }
        result
    }

    /// Whether `identity` already passed validation in this session
    pub fn is_validated(&self, identity: &str) -> bool {
        self.validated.contains(identity)
    }

    fn check(&mut self, descriptor: &TypeDescriptor) -> Result<(), ValidationError> {
        let identity = descriptor.identity();
        let elements = descriptor.elements();

        match descriptor.kind() {
            DescriptorKind::Primitive(_) | DescriptorKind::Polymorphic => Ok(()),
            DescriptorKind::List | DescriptorKind::Set => {
                let collection = if *descriptor.kind() == DescriptorKind::List {
                    "List"
                } else {
                    "Set"
                };
                let [item] = elements else {
                    return Err(ValidationError::new(format!(
                        "{collection} must have exactly one type parameter."
                    )));
                };
                self.validate(&item.descriptor())
                    .map_err(|e| e.within(identity))
            }
            DescriptorKind::Map => {
                let [key, value] = elements else {
                    return Err(ValidationError::new(
                        "Map must have exactly two type parameters (key and value).",
                    ));
                };
                let key = key.descriptor();
                if *key.kind() != DescriptorKind::Primitive(PrimitiveKind::String) {
                    return Err(ValidationError::new(format!(
                        "Map key must be String, found: {}.",
                        key.identity()
                    )));
                }
                self.validate(&value.descriptor())
                    .map_err(|e| e.within(identity))
            }
            DescriptorKind::Enum(_) => {
                if !descriptor.is_schema_eligible() {
                    return Err(ValidationError::new(format!(
                        "Enum '{identity}' must derive JsonSchema."
                    )));
                }
                Ok(())
            }
            DescriptorKind::Object => {
                if !descriptor.is_schema_eligible() {
                    return Err(ValidationError::new(format!(
                        "'{identity}' must derive JsonSchema."
                    )));
                }
                for field in elements {
                    self.validate(&field.descriptor())
                        .map_err(|e| e.within(format!("{identity}.{}", field.name())))?;
                }
                Ok(())
            }
            DescriptorKind::Contextual => Err(ValidationError::new(format!(
                "Type '{identity}' is not a supported primitive, collection, enum, or JsonSchema type."
            ))),
        }
    }
}
