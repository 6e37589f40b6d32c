#![allow(non_snake_case)]

use super::*;

#[test]
fn parse_doc_comment___main_description_and_param___splits_both() {
    let meta = parse_doc_comment("Greets user\n@param name The name", &["name"]).unwrap();

    assert_eq!(meta.description(), Some("Greets user"));
    assert_eq!(meta.field_description("name"), Some("The name"));
    assert_eq!(meta.field_descriptions().len(), 1);
}

#[test]
fn parse_doc_comment___multiple_params___keeps_each_description() {
    let doc = "Greets multiple users\n\
               @param name The user's name\n\
               @param age The user's age, must be positive\n\
               @param count Number of times to greet";

    let meta = parse_doc_comment(doc, &["name", "age", "count"]).unwrap();

    assert_eq!(meta.description(), Some("Greets multiple users"));
    assert_eq!(meta.field_description("name"), Some("The user's name"));
    assert_eq!(
        meta.field_description("age"),
        Some("The user's age, must be positive")
    );
    assert_eq!(meta.field_description("count"), Some("Number of times to greet"));
}

#[test]
fn parse_doc_comment___empty_text___yields_empty_metadata() {
    let meta = parse_doc_comment("", &["name"]).unwrap();

    assert_eq!(meta.description(), None);
    assert!(meta.field_descriptions().is_empty());
    assert!(meta.is_empty());
}

#[test]
fn parse_doc_comment___blank_text___has_no_description() {
    let meta = parse_doc_comment("  \n\t \n", &["name"]).unwrap();

    assert_eq!(meta.description(), None);
}

#[test]
fn parse_doc_comment___multi_line_param___joins_with_single_spaces() {
    let doc = "Some type\n\
               @param name The user's name\n\
                           spanning multiple lines\n\
                           until next marker\n\
               @param age The age";

    let meta = parse_doc_comment(doc, &["name", "age"]).unwrap();

    let name = meta.field_description("name").unwrap();
    assert_eq!(name, "The user's name spanning multiple lines until next marker");
    assert!(!name.contains('\n'));
    assert_eq!(meta.field_description("age"), Some("The age"));
}

#[test]
fn parse_doc_comment___excess_whitespace___is_collapsed() {
    let doc = "This       type\ndescribes the user      in a\nvery nice way.\n\
               @param name    The    name of\n   the user\n\
               @param age The\nuser's age   over multiple lines";

    let meta = parse_doc_comment(doc, &["name", "age"]).unwrap();

    assert_eq!(
        meta.description(),
        Some("This type describes the user in a very nice way.")
    );
    assert_eq!(meta.field_description("name"), Some("The name of the user"));
    assert_eq!(
        meta.field_description("age"),
        Some("The user's age over multiple lines")
    );
}

#[test]
fn parse_doc_comment___text_before_tag_on_same_line___belongs_to_description() {
    let meta = parse_doc_comment("Something\nx @param name The name", &["name"]).unwrap();

    assert_eq!(meta.description(), Some("Something x"));
    assert_eq!(meta.field_description("name"), Some("The name"));
}

#[test]
fn parse_doc_comment___undocumented_fields___are_not_an_error() {
    let meta = parse_doc_comment("Something\n@param name The name", &["name", "age"]).unwrap();

    assert_eq!(meta.field_descriptions().len(), 1);
    assert_eq!(meta.field_description("age"), None);
}

#[test]
fn parse_doc_comment___params_on_same_line___are_split() {
    let meta = parse_doc_comment("@param name foo @param age bar", &["name", "age"]).unwrap();

    assert_eq!(meta.description(), None);
    assert_eq!(meta.field_description("name"), Some("foo"));
    assert_eq!(meta.field_description("age"), Some("bar"));
}

#[test]
fn parse_doc_comment___return_tag___is_skipped() {
    let doc = "@param name This is a name\n@return Returns something\n@param age This is an age";

    let meta = parse_doc_comment(doc, &["name", "age"]).unwrap();

    assert_eq!(meta.description(), None);
    assert_eq!(meta.field_description("name"), Some("This is a name"));
    assert_eq!(meta.field_description("age"), Some("This is an age"));
    assert_eq!(meta.field_descriptions().len(), 2);
}

#[test]
fn parse_doc_comment___param_and_property___are_interchangeable() {
    let doc = "@property name This is a name\n@param age This is an age";

    let meta = parse_doc_comment(doc, &["name", "age"]).unwrap();

    assert_eq!(meta.field_description("name"), Some("This is a name"));
    assert_eq!(meta.field_description("age"), Some("This is an age"));
}

#[test]
fn parse_doc_comment___field_order___follows_comment_order() {
    let meta = parse_doc_comment("@param b B text @param a A text", &["a", "b"]).unwrap();

    let keys: Vec<&String> = meta.field_descriptions().keys().collect();
    assert_eq!(keys, vec!["b", "a"]);
}

#[test]
fn parse_doc_comment___unknown_field___fails_naming_it() {
    let err = parse_doc_comment("Some type\n@param bogus text", &["name"]).unwrap_err();

    assert_eq!(
        err,
        DocCommentError::UnknownField {
            tag: "@param".into(),
            field: "bogus".into(),
        }
    );
    assert!(err.to_string().contains("bogus"));
    assert!(err.to_string().contains("unknown parameter"));
}

#[test]
fn parse_doc_comment___partial_field_name___is_unknown() {
    let err = parse_doc_comment("Docs\n@param nam Something about 'nam'", &["name"]).unwrap_err();

    assert!(matches!(err, DocCommentError::UnknownField { field, .. } if field == "nam"));
}

#[test]
fn parse_doc_comment___param_without_description___fails() {
    let err = parse_doc_comment("Some type\n@param name", &["name"]).unwrap_err();

    assert_eq!(err.to_string(), "'@param name' has no description.");
}

#[test]
fn parse_doc_comment___param_without_description_before_next_tag___fails() {
    let err = parse_doc_comment("@param name @param age The age", &["name", "age"]).unwrap_err();

    assert!(matches!(err, DocCommentError::EmptyDescription { field, .. } if field == "name"));
}

#[test]
fn parse_doc_comment___tag_without_field_name___fails() {
    let err = parse_doc_comment("Some type\n@property", &["name"]).unwrap_err();

    assert_eq!(
        err,
        DocCommentError::MissingFieldName {
            tag: "@property".into()
        }
    );
}

#[test]
fn parse_doc_comment___duplicate_field___fails() {
    let doc = "Type\n@property name Initial description\n@param name Second description";

    let err = parse_doc_comment(doc, &["name"]).unwrap_err();

    assert!(err.to_string().contains("Duplicate '@param name'"));
}

#[test]
fn parse_doc_comment___unsupported_tag___fails_naming_it() {
    let doc = "Some description\n@param name The name\n@foo Unknown marker should fail";

    let err = parse_doc_comment(doc, &["name"]).unwrap_err();

    assert!(err.to_string().contains("Unsupported tag '@foo'"));
}

#[test]
fn parse_doc_comment___unsupported_tag___wins_over_later_field_errors() {
    let doc = "@param bogus text\n@since 1.0";

    let err = parse_doc_comment(doc, &["name"]).unwrap_err();

    assert_eq!(
        err,
        DocCommentError::UnsupportedTag {
            tag: "@since".into()
        }
    );
}

#[test]
fn parse_doc_comment___accepts_owned_field_names() {
    let fields = vec!["name".to_string()];

    let meta = parse_doc_comment("@param name The name", &fields).unwrap();

    assert_eq!(meta.field_description("name"), Some("The name"));
}

#[test]
fn parse_field_doc___multi_line___collapses_to_one_line() {
    let doc = parse_field_doc(" Full name\n of the   person. ").unwrap();

    assert_eq!(doc.as_deref(), Some("Full name of the person."));
}

#[test]
fn parse_field_doc___blank___is_none() {
    assert_eq!(parse_field_doc(" \n ").unwrap(), None);
}

#[test]
fn parse_field_doc___tag___is_unsupported() {
    let err = parse_field_doc("Name @param").unwrap_err();

    assert!(matches!(err, DocCommentError::UnsupportedTag { tag } if tag == "@param"));
}

#[test]
fn DocMetadata___insert_field_doc___adds_new_field() {
    let mut meta = parse_doc_comment("A person", &["name"]).unwrap();

    meta.insert_field_doc("name", "Full name".into()).unwrap();

    assert_eq!(meta.field_description("name"), Some("Full name"));
}

#[test]
fn DocMetadata___insert_field_doc___conflicts_with_tag() {
    let mut meta = parse_doc_comment("@param name From tag", &["name"]).unwrap();

    let err = meta.insert_field_doc("name", "From field".into()).unwrap_err();

    assert_eq!(
        err,
        DocCommentError::ConflictingFieldDoc {
            field: "name".into()
        }
    );
    assert_eq!(meta.field_description("name"), Some("From tag"));
}
