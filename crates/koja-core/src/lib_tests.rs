#![allow(non_snake_case)]

use super::*;

fn person() -> TypeDescriptor {
    TypeDescriptor::object("app::Person")
        .eligible()
        .field(Element::new("name", String::descriptor()))
        .field(Element::new("age", Option::<i32>::descriptor()))
        .field(Element::new("emails", Vec::<String>::descriptor()).with_default())
}

#[test]
fn generate___person_with_docs___produces_documented_schema() {
    let meta = parse_doc_comment("A person\n@param name Full name", &["name", "age", "emails"])
        .unwrap();
    let registry: DocRegistry = vec![("app::Person".to_string(), meta)].into_iter().collect();

    let schema = generate(&person(), &registry).unwrap();

    assert_eq!(
        serde_json::to_string(&schema).unwrap(),
        r#"{"type":"object","description":"A person","properties":{"name":{"type":"string","description":"Full name"},"age":{"type":"number"},"emails":{"type":"array","items":{"type":"string"}}},"required":["name"]}"#
    );
}

#[test]
fn generate___invalid_descriptor___fails_before_transform() {
    let descriptor = std::collections::HashMap::<i64, String>::descriptor();

    let err = generate(&descriptor, &DocRegistry::empty()).unwrap_err();

    assert!(matches!(err, KojaError::Validation(_)));
}

#[test]
fn generate___recursive_type___fails_in_transform() {
    fn node() -> TypeDescriptor {
        TypeDescriptor::object("app::Node")
            .eligible()
            .field(Element::new("next", LazyDescriptor::new(|| node().nullable())))
    }

    let err = generate(&node(), &DocRegistry::empty()).unwrap_err();

    assert!(matches!(err, KojaError::Schema(SchemaError::RecursiveType { .. })));
}

#[test]
fn prelude___exposes_generation_entry_points() {
    use crate::prelude::*;

    let schema = to_schema(&bool::descriptor(), &DocRegistry::empty()).unwrap();

    assert_eq!(schema, Schema::boolean());
}
