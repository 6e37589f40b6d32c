//! Schema generation for many types at once
//!
//! Every root is validated and transformed independently. A failure is
//! recorded against its type and the batch moves on, so callers see all
//! problems of a run instead of only the first one.

use crate::config::GeneratorConfig;
use crate::descriptor::TypeDescriptor;
use crate::error::{BatchError, KojaError, TypeFailure};
use crate::registry::DocRegistry;
use crate::schema::Schema;
use crate::transform::SchemaGenerator;
use crate::validate::Validator;
use indexmap::IndexMap;

/// Generates schemas for several root descriptors against one registry
#[derive(Debug)]
pub struct SchemaBatch<'r> {
    registry: &'r DocRegistry,
    config: GeneratorConfig,
}

/// Result of a batch run: the schemas that succeeded and every failure
#[derive(Debug, Default)]
pub struct BatchOutcome {
    /// Generated schemas keyed by type identity, in input order
    pub schemas: IndexMap<String, Schema>,
    pub failures: Vec<TypeFailure>,
}

impl BatchOutcome {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    /// Record a failure that happened outside the batch (e.g. while parsing docs)
    pub fn push_failure(&mut self, identity: impl Into<String>, error: impl Into<KojaError>) {
        self.failures.push(TypeFailure {
            identity: identity.into(),
            error: error.into(),
        });
    }

    pub fn into_result(self) -> Result<IndexMap<String, Schema>, BatchError> {
        if self.failures.is_empty() {
            Ok(self.schemas)
        } else {
            Err(BatchError {
                failures: self.failures,
            })
        }
    }
}

impl<'r> SchemaBatch<'r> {
    pub fn new(registry: &'r DocRegistry) -> Self {
        Self::with_config(registry, GeneratorConfig::default())
    }

    pub fn with_config(registry: &'r DocRegistry, config: GeneratorConfig) -> Self {
        Self { registry, config }
    }

    /// Validate and generate every root, collecting all failures
    pub fn run<'d, I>(&self, roots: I) -> BatchOutcome
    where
        I: IntoIterator<Item = &'d TypeDescriptor>,
    {
        let generator = SchemaGenerator::with_config(self.registry, &self.config);
        let mut validator = Validator::new();
        let mut outcome = BatchOutcome::default();

        for root in roots {
            let identity = root.identity();
            let result = validator
                .validate(root)
                .map_err(KojaError::from)
                .and_then(|()| generator.generate(root).map_err(KojaError::from));

            match result {
                Ok(schema) => {
                    tracing::debug!(identity, "schema generated");
                    outcome.schemas.insert(identity.to_string(), schema);
                }
                Err(error) => {
                    tracing::debug!(identity, %error, "schema generation failed");
                    outcome.push_failure(identity, error);
                }
            }
        }

        outcome
    }

    /// Like [`SchemaBatch::run`], failing with every collected error
    pub fn generate<'d, I>(&self, roots: I) -> Result<IndexMap<String, Schema>, BatchError>
    where
        I: IntoIterator<Item = &'d TypeDescriptor>,
    {
        self.run(roots).into_result()
    }
}
