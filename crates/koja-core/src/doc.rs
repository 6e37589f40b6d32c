//! Doc comment parsing
//!
//! Doc comments attached to schema types are split into a main description
//! and per-field descriptions. The grammar is deliberately small:
//!
//! - The main description runs until the first tag.
//! - `@param <field> <text>` and `@property <field> <text>` describe a field.
//!   Both tags mean the same thing.
//! - `@return <text>` is accepted and ignored.
//! - Any other `@`-token is an error.
//!
//! Whitespace of any kind separates tokens, so descriptions wrapped over
//! several lines come out as a single space-separated line.
//!
//! ```
//! use koja_core::parse_doc_comment;
//!
//! let meta = parse_doc_comment("Greets user\n@param name The name", &["name"]).unwrap();
//! assert_eq!(meta.description(), Some("Greets user"));
//! assert_eq!(meta.field_description("name"), Some("The name"));
//! ```

use crate::error::DocCommentError;
use indexmap::IndexMap;

const PARAM_TAG: &str = "@param";
const PROPERTY_TAG: &str = "@property";
const RETURN_TAG: &str = "@return";

const ALLOWED_TAGS: [&str; 3] = [PARAM_TAG, PROPERTY_TAG, RETURN_TAG];

/// Parsed documentation of one type
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocMetadata {
    description: Option<String>,
    field_descriptions: IndexMap<String, String>,
}

impl DocMetadata {
    pub fn new<I, K, V>(description: Option<String>, field_descriptions: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            description,
            field_descriptions: field_descriptions
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn field_description(&self, field: &str) -> Option<&str> {
        self.field_descriptions.get(field).map(String::as_str)
    }

    pub fn field_descriptions(&self) -> &IndexMap<String, String> {
        &self.field_descriptions
    }

    pub fn is_empty(&self) -> bool {
        self.description.is_none() && self.field_descriptions.is_empty()
    }

    /// Merge a field's own doc comment into the type's metadata.
    ///
    /// Fails when the field was already described by a tag in the type's
    /// doc comment.
    pub fn insert_field_doc(
        &mut self,
        field: &str,
        description: String,
    ) -> Result<(), DocCommentError> {
        if self.field_descriptions.contains_key(field) {
            return Err(DocCommentError::ConflictingFieldDoc {
                field: field.to_string(),
            });
        }
        self.field_descriptions.insert(field.to_string(), description);
        Ok(())
    }
}

fn is_tag(token: &str) -> bool {
    token.starts_with('@')
}

fn check_tags(tokens: &[&str]) -> Result<(), DocCommentError> {
    match tokens
        .iter()
        .copied()
        .find(|t| is_tag(t) && !ALLOWED_TAGS.contains(t))
    {
        Some(tag) => Err(DocCommentError::UnsupportedTag {
            tag: tag.to_string(),
        }),
        None => Ok(()),
    }
}

/// Advance past the tokens before the next tag and return them
fn read_until_tag<'a, 't>(tokens: &'t [&'a str], index: &mut usize) -> &'t [&'a str] {
    let start = *index;
    while *index < tokens.len() && !is_tag(tokens[*index]) {
        *index += 1;
    }
    &tokens[start..*index]
}

/// Parse a type's doc comment against its declared field names.
///
/// Fails without returning partial metadata when the comment uses an
/// unsupported tag, references an unknown field, leaves a field tag without
/// description, or describes the same field twice.
pub fn parse_doc_comment<S: AsRef<str>>(
    text: &str,
    known_fields: &[S],
) -> Result<DocMetadata, DocCommentError> {
    let tokens: Vec<&str> = text.split_whitespace().collect();
    check_tags(&tokens)?;

    let mut index = 0;
    let main = read_until_tag(&tokens, &mut index);
    let description = Some(main.join(" ")).filter(|d| !d.trim().is_empty());

    let mut field_descriptions: IndexMap<String, String> = IndexMap::new();
    while index < tokens.len() {
        let tag = tokens[index];
        index += 1;
        let body = read_until_tag(&tokens, &mut index);

        if tag == RETURN_TAG {
            continue;
        }

        let Some((field, words)) = body.split_first() else {
            return Err(DocCommentError::MissingFieldName {
                tag: tag.to_string(),
            });
        };

        if !known_fields.iter().any(|k| k.as_ref() == *field) {
            return Err(DocCommentError::UnknownField {
                tag: tag.to_string(),
                field: field.to_string(),
            });
        }
        if words.is_empty() {
            return Err(DocCommentError::EmptyDescription {
                tag: tag.to_string(),
                field: field.to_string(),
            });
        }
        if field_descriptions.contains_key(*field) {
            return Err(DocCommentError::DuplicateField {
                tag: tag.to_string(),
                field: field.to_string(),
            });
        }
        field_descriptions.insert(field.to_string(), words.join(" "));
    }

    Ok(DocMetadata {
        description,
        field_descriptions,
    })
}

/// Collapse a field's own doc comment into a single line.
///
/// Field comments carry no tags; any `@`-token is reported as unsupported.
pub fn parse_field_doc(text: &str) -> Result<Option<String>, DocCommentError> {
    let tokens: Vec<&str> = text.split_whitespace().collect();
    if let Some(tag) = tokens.iter().copied().find(|t| is_tag(t)) {
        return Err(DocCommentError::UnsupportedTag {
            tag: tag.to_string(),
        });
    }
    Ok(Some(tokens.join(" ")).filter(|d| !d.is_empty()))
}

#[cfg(test)]
#[path = "doc/doc_tests.rs"]
mod doc_tests;

#[cfg(test)]
#[path = "doc/doc_parameterized_tests.rs"]
mod doc_parameterized_tests;
