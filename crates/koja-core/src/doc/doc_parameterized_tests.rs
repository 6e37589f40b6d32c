#![allow(non_snake_case)]

use super::*;
use test_case::test_case;

// ============================================================================
// Tags outside the grammar
// ============================================================================

#[test_case("@see Other", "@see" ; "see")]
#[test_case("@since 1.0", "@since" ; "since")]
#[test_case("@author me", "@author" ; "author")]
#[test_case("@throws Error", "@throws" ; "throws")]
#[test_case("Text @ alone", "@" ; "bare at sign")]
#[test_case("@params name text", "@params" ; "tag with suffix")]
#[test_case("@PARAM name text", "@PARAM" ; "wrong case")]
fn parse_doc_comment___unsupported_tag___is_rejected(doc: &str, tag: &str) {
    let err = parse_doc_comment(doc, &["name"]).unwrap_err();

    assert_eq!(err, DocCommentError::UnsupportedTag { tag: tag.into() });
}

// ============================================================================
// Whitespace normalization
// ============================================================================

#[test_case("Line one\nline two", "Line one line two" ; "newline")]
#[test_case("Tab\tseparated", "Tab separated" ; "tab")]
#[test_case("\n\nLeading blank lines", "Leading blank lines" ; "leading blanks")]
#[test_case("Trailing blank lines\n\n\n", "Trailing blank lines" ; "trailing blanks")]
#[test_case("Windows\r\nline endings", "Windows line endings" ; "crlf")]
fn parse_doc_comment___whitespace___collapses_to_single_spaces(doc: &str, expected: &str) {
    let meta = parse_doc_comment(doc, &["name"]).unwrap();

    assert_eq!(meta.description(), Some(expected));
}

// ============================================================================
// Both field tags behave the same
// ============================================================================

#[test_case("@param" ; "param")]
#[test_case("@property" ; "property")]
fn parse_doc_comment___field_tag___describes_field(tag: &str) {
    let doc = format!("Intro\n{tag} name The name");

    let meta = parse_doc_comment(&doc, &["name"]).unwrap();

    assert_eq!(meta.description(), Some("Intro"));
    assert_eq!(meta.field_description("name"), Some("The name"));
}

#[test_case("@param" ; "param")]
#[test_case("@property" ; "property")]
fn parse_doc_comment___field_tag_without_body___reports_tag(tag: &str) {
    let doc = format!("{tag} name");

    let err = parse_doc_comment(&doc, &["name"]).unwrap_err();

    assert_eq!(err.to_string(), format!("'{tag} name' has no description."));
}
