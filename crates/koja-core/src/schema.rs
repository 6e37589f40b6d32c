//! JSON Schema output model

use indexmap::{IndexMap, IndexSet};
use serde::{Serialize, Serializer};
use serde_json::{Map, Value, json};

/// A generated JSON Schema.
///
/// Each variant serializes with its JSON type under the `"type"` key:
/// - [`Schema::Object`]: an object with named properties, or a map through
///   `additionalProperties`
/// - [`Schema::String`]: a string, optionally restricted to enum values
/// - [`Schema::Number`]: any JSON number; integer and float widths collapse here
/// - [`Schema::Array`]: an array of `items`
/// - [`Schema::Boolean`]: a boolean
#[derive(Debug, Clone, PartialEq)]
pub enum Schema {
    Object(ObjectSchema),
    String(StringSchema),
    Number(NumberSchema),
    Array(ArraySchema),
    Boolean(BooleanSchema),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ObjectSchema {
    pub description: Option<String>,

    /// `None` for maps and polymorphic fallbacks
    pub properties: Option<IndexMap<String, Schema>>,

    /// Fields that are neither nullable nor defaulted, in declaration order
    pub required: IndexSet<String>,

    pub additional_properties: Option<Box<Schema>>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct StringSchema {
    pub description: Option<String>,
    pub enum_values: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct NumberSchema {
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BooleanSchema {
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ArraySchema {
    pub description: Option<String>,
    pub items: Box<Schema>,
}

impl Schema {
    pub fn string() -> Self {
        Schema::String(StringSchema::default())
    }

    pub fn string_enum(values: Vec<String>) -> Self {
        Schema::String(StringSchema {
            description: None,
            enum_values: Some(values),
        })
    }

    pub fn number() -> Self {
        Schema::Number(NumberSchema::default())
    }

    pub fn boolean() -> Self {
        Schema::Boolean(BooleanSchema::default())
    }

    pub fn array(items: Schema) -> Self {
        Schema::Array(ArraySchema {
            description: None,
            items: Box::new(items),
        })
    }

    /// An object whose values all follow `value`
    pub fn map(value: Schema) -> Self {
        Schema::Object(ObjectSchema {
            additional_properties: Some(Box::new(value)),
            ..ObjectSchema::default()
        })
    }

    /// An object with no constraints at all
    pub fn any_object() -> Self {
        Schema::Object(ObjectSchema::default())
    }

    /// JSON type tag of this schema
    pub fn type_name(&self) -> &'static str {
        match self {
            Schema::Object(_) => "object",
            Schema::String(_) => "string",
            Schema::Number(_) => "number",
            Schema::Array(_) => "array",
            Schema::Boolean(_) => "boolean",
        }
    }

    pub fn description(&self) -> Option<&str> {
        match self {
            Schema::Object(s) => s.description.as_deref(),
            Schema::String(s) => s.description.as_deref(),
            Schema::Number(s) => s.description.as_deref(),
            Schema::Array(s) => s.description.as_deref(),
            Schema::Boolean(s) => s.description.as_deref(),
        }
    }

    /// Return the same schema with its description replaced.
    ///
    /// Only the description slot changes; properties, items, enum values and
    /// additional properties are carried over untouched.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        let slot = match &mut self {
            Schema::Object(s) => &mut s.description,
            Schema::String(s) => &mut s.description,
            Schema::Number(s) => &mut s.description,
            Schema::Array(s) => &mut s.description,
            Schema::Boolean(s) => &mut s.description,
        };
        *slot = Some(description.into());
        self
    }

    /// Convert into a JSON value.
    ///
    /// `description` and `required` are only emitted when non-empty, and
    /// property order follows field declaration order.
    pub fn to_json_value(&self) -> Value {
        let mut out = Map::new();
        out.insert("type".to_string(), json!(self.type_name()));

        if let Some(description) = self.description() {
            out.insert("description".to_string(), json!(description));
        }

        match self {
            Schema::Object(object) => {
                if let Some(properties) = &object.properties {
                    let properties: Map<String, Value> = properties
                        .iter()
                        .map(|(name, schema)| (name.clone(), schema.to_json_value()))
                        .collect();
                    out.insert("properties".to_string(), Value::Object(properties));
                }
                if !object.required.is_empty() {
                    out.insert("required".to_string(), json!(object.required));
                }
                if let Some(additional) = &object.additional_properties {
                    out.insert("additionalProperties".to_string(), additional.to_json_value());
                }
            }
            Schema::String(string) => {
                if let Some(values) = &string.enum_values {
                    out.insert("enum".to_string(), json!(values));
                }
            }
            Schema::Array(array) => {
                out.insert("items".to_string(), array.items.to_json_value());
            }
            Schema::Number(_) | Schema::Boolean(_) => {}
        }

        Value::Object(out)
    }
}

impl Serialize for Schema {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_json_value().serialize(serializer)
    }
}
