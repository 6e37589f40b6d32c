//! Error types for schema generation

use thiserror::Error;

/// Result type alias for koja operations
pub type KojaResult<T> = Result<T, KojaError>;

/// Umbrella error for a single type's generation
#[derive(Error, Debug, Clone, PartialEq)]
pub enum KojaError {
    /// The descriptor graph contains an unsupported shape
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// A doc comment violates the tag grammar
    #[error(transparent)]
    DocComment(#[from] DocCommentError),

    /// The transformer was handed a descriptor it cannot represent
    #[error(transparent)]
    Schema(#[from] SchemaError),
}

/// A descriptor shape that cannot be represented as a schema.
///
/// `path` lists the identities and field names walked from the root down to
/// the offending type, outermost first.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}{}", format_path(.path))]
pub struct ValidationError {
    pub message: String,
    pub path: Vec<String>,
}

impl ValidationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            path: Vec::new(),
        }
    }

    /// Prepend a path segment while the error unwinds towards the root
    pub fn within(mut self, segment: impl Into<String>) -> Self {
        self.path.insert(0, segment.into());
        self
    }
}

fn format_path(path: &[String]) -> String {
    if path.is_empty() {
        String::new()
    } else {
        format!(" (at {})", path.join(" -> "))
    }
}

/// Doc comment grammar violations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DocCommentError {
    #[error(
        "Unsupported tag '{tag}' found in doc comment. Only the following tags are allowed: '@param, @property, @return'"
    )]
    UnsupportedTag { tag: String },

    #[error("'{tag}' is not followed by a field name.")]
    MissingFieldName { tag: String },

    #[error("'{tag} {field}' references unknown parameter or field.")]
    UnknownField { tag: String, field: String },

    #[error("'{tag} {field}' has no description.")]
    EmptyDescription { tag: String, field: String },

    #[error("Duplicate '{tag} {field}' found in doc comment.")]
    DuplicateField { tag: String, field: String },

    #[error("Field '{field}' is documented both by its own doc comment and by a @param/@property tag.")]
    ConflictingFieldDoc { field: String },
}

/// Transformer failures.
///
/// These indicate that a descriptor reached the transformer without passing
/// validation, or that the type graph is recursive.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    #[error("internal error: descriptor '{identity}' has a kind that cannot be represented")]
    UnsupportedKind { identity: String },

    #[error("'{identity}' is not marked for schema generation")]
    NotSchemaEligible { identity: String },

    #[error("'{identity}' refers to itself; recursive types cannot be inlined")]
    RecursiveType { identity: String },

    #[error("type graph exceeds the maximum depth of {max_depth} at '{identity}'")]
    DepthExceeded { identity: String, max_depth: usize },

    #[error("'{identity}' has {actual} element descriptors, expected {expected}")]
    MalformedDescriptor {
        identity: String,
        expected: usize,
        actual: usize,
    },
}

/// A single type's failure inside a batch
#[derive(Debug, Clone, PartialEq)]
pub struct TypeFailure {
    pub identity: String,
    pub error: KojaError,
}

/// Every failure collected while generating a batch of schemas
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{} type(s) failed schema generation:{}", .failures.len(), format_failures(.failures))]
pub struct BatchError {
    pub failures: Vec<TypeFailure>,
}

fn format_failures(failures: &[TypeFailure]) -> String {
    failures
        .iter()
        .map(|f| format!("\n  {}: {}", f.identity, f.error))
        .collect()
}
