#![allow(non_snake_case)]

use super::*;
use crate::descriptor::DescriptorKind;
use test_case::test_case;

#[test_case(String::descriptor(), PrimitiveKind::String ; "String")]
#[test_case(<str>::descriptor(), PrimitiveKind::String ; "str")]
#[test_case(char::descriptor(), PrimitiveKind::Char ; "char")]
#[test_case(bool::descriptor(), PrimitiveKind::Boolean ; "bool")]
#[test_case(i8::descriptor(), PrimitiveKind::Byte ; "i8")]
#[test_case(u8::descriptor(), PrimitiveKind::Byte ; "u8")]
#[test_case(i16::descriptor(), PrimitiveKind::Short ; "i16")]
#[test_case(u16::descriptor(), PrimitiveKind::Short ; "u16")]
#[test_case(i32::descriptor(), PrimitiveKind::Int ; "i32")]
#[test_case(u32::descriptor(), PrimitiveKind::Int ; "u32")]
#[test_case(i64::descriptor(), PrimitiveKind::Long ; "i64")]
#[test_case(u64::descriptor(), PrimitiveKind::Long ; "u64")]
#[test_case(usize::descriptor(), PrimitiveKind::Long ; "usize")]
#[test_case(f32::descriptor(), PrimitiveKind::Float ; "f32")]
#[test_case(f64::descriptor(), PrimitiveKind::Double ; "f64")]
fn JsonSchema___primitive___maps_to_kind(descriptor: TypeDescriptor, kind: PrimitiveKind) {
    assert_eq!(descriptor.kind(), &DescriptorKind::Primitive(kind));
    assert!(!descriptor.is_nullable());
}

#[test]
fn JsonSchema___option___marks_inner_nullable() {
    let descriptor = Option::<i32>::descriptor();

    assert!(descriptor.is_nullable());
    assert_eq!(descriptor.identity(), "Int");
}

#[test]
fn JsonSchema___box___is_transparent() {
    assert_eq!(Box::<String>::descriptor().identity(), "String");
    assert_eq!(Arc::<bool>::descriptor().identity(), "Boolean");
    assert_eq!(Rc::<f64>::descriptor().identity(), "Double");
}

#[test_case(Vec::<String>::descriptor() ; "Vec")]
#[test_case(VecDeque::<String>::descriptor() ; "VecDeque")]
#[test_case(<[String]>::descriptor() ; "slice")]
fn JsonSchema___sequence___is_list(descriptor: TypeDescriptor) {
    assert_eq!(descriptor.kind(), &DescriptorKind::List);
    assert_eq!(descriptor.identity(), "List<String>");
}

#[test_case(HashSet::<u8>::descriptor() ; "HashSet")]
#[test_case(BTreeSet::<u8>::descriptor() ; "BTreeSet")]
#[test_case(IndexSet::<u8>::descriptor() ; "IndexSet")]
fn JsonSchema___set___is_set(descriptor: TypeDescriptor) {
    assert_eq!(descriptor.kind(), &DescriptorKind::Set);
    assert_eq!(descriptor.identity(), "Set<Byte>");
}

#[test_case(HashMap::<String, i64>::descriptor() ; "HashMap")]
#[test_case(BTreeMap::<String, i64>::descriptor() ; "BTreeMap")]
#[test_case(IndexMap::<String, i64>::descriptor() ; "IndexMap")]
fn JsonSchema___map___has_key_and_value(descriptor: TypeDescriptor) {
    assert_eq!(descriptor.kind(), &DescriptorKind::Map);
    assert_eq!(descriptor.identity(), "Map<String, Long>");
}

#[test]
fn JsonSchema___nested_containers___compose_identities() {
    let descriptor = Vec::<Option<HashMap<String, Vec<bool>>>>::descriptor();

    assert_eq!(descriptor.identity(), "List<Map<String, List<Boolean>>>");
    assert!(descriptor.elements()[0].descriptor().is_nullable());
}

#[test]
fn JsonSchema___primitives___have_no_docs() {
    let mut builder = DocRegistryBuilder::default();
    String::register_docs(&mut builder);
    Vec::<u32>::register_docs(&mut builder);

    assert!(builder.build().is_empty());
    assert!(String::doc_metadata().is_none());
}
