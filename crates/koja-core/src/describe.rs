//! The [`JsonSchema`] trait and its implementations for std types

use crate::descriptor::{PrimitiveKind, TypeDescriptor};
use crate::doc::DocMetadata;
use crate::registry::DocRegistryBuilder;
use indexmap::{IndexMap, IndexSet};
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque};
use std::rc::Rc;
use std::sync::Arc;

/// A type that can describe its own structure for schema generation.
///
/// Usually implemented with `#[derive(JsonSchema)]`. Hand-written
/// implementations only need [`JsonSchema::descriptor`].
pub trait JsonSchema {
    /// Structural descriptor of this type
    fn descriptor() -> TypeDescriptor;

    /// Documentation parsed from this type's doc comments
    fn doc_metadata() -> Option<DocMetadata> {
        None
    }

    /// Add this type's documentation, and that of every type reachable from
    /// it, to `registry`
    fn register_docs(_registry: &mut DocRegistryBuilder) {}
}

macro_rules! impl_primitive {
    ($($ty:ty => $kind:ident),* $(,)?) => {
        $(
            impl JsonSchema for $ty {
                fn descriptor() -> TypeDescriptor {
                    TypeDescriptor::primitive(PrimitiveKind::$kind)
                }
            }
        )*
    };
}

impl_primitive! {
    String => String,
    str => String,
    char => Char,
    bool => Boolean,
    i8 => Byte,
    u8 => Byte,
    i16 => Short,
    u16 => Short,
    i32 => Int,
    u32 => Int,
    i64 => Long,
    u64 => Long,
    isize => Long,
    usize => Long,
    f32 => Float,
    f64 => Double,
}

impl<T: JsonSchema> JsonSchema for Option<T> {
    fn descriptor() -> TypeDescriptor {
        T::descriptor().nullable()
    }

    fn register_docs(registry: &mut DocRegistryBuilder) {
        T::register_docs(registry);
    }
}

macro_rules! impl_transparent {
    ($($wrapper:ident),*) => {
        $(
            impl<T: JsonSchema + ?Sized> JsonSchema for $wrapper<T> {
                fn descriptor() -> TypeDescriptor {
                    T::descriptor()
                }

                fn register_docs(registry: &mut DocRegistryBuilder) {
                    T::register_docs(registry);
                }
            }
        )*
    };
}

impl_transparent!(Box, Arc, Rc);

impl<T: JsonSchema> JsonSchema for Vec<T> {
    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::list(T::descriptor())
    }

    fn register_docs(registry: &mut DocRegistryBuilder) {
        T::register_docs(registry);
    }
}

impl<T: JsonSchema> JsonSchema for VecDeque<T> {
    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::list(T::descriptor())
    }

    fn register_docs(registry: &mut DocRegistryBuilder) {
        T::register_docs(registry);
    }
}

impl<T: JsonSchema> JsonSchema for [T] {
    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::list(T::descriptor())
    }

    fn register_docs(registry: &mut DocRegistryBuilder) {
        T::register_docs(registry);
    }
}

impl<T: JsonSchema, S> JsonSchema for HashSet<T, S> {
    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::set(T::descriptor())
    }

    fn register_docs(registry: &mut DocRegistryBuilder) {
        T::register_docs(registry);
    }
}

impl<T: JsonSchema> JsonSchema for BTreeSet<T> {
    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::set(T::descriptor())
    }

    fn register_docs(registry: &mut DocRegistryBuilder) {
        T::register_docs(registry);
    }
}

impl<T: JsonSchema, S> JsonSchema for IndexSet<T, S> {
    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::set(T::descriptor())
    }

    fn register_docs(registry: &mut DocRegistryBuilder) {
        T::register_docs(registry);
    }
}

macro_rules! impl_map {
    ($($map:ident<K, V $(, $hasher:ident)?>),*) => {
        $(
            impl<K: JsonSchema, V: JsonSchema $(, $hasher)?> JsonSchema for $map<K, V $(, $hasher)?> {
                fn descriptor() -> TypeDescriptor {
                    TypeDescriptor::map(K::descriptor(), V::descriptor())
                }

                fn register_docs(registry: &mut DocRegistryBuilder) {
                    K::register_docs(registry);
                    V::register_docs(registry);
                }
            }
        )*
    };
}

impl_map!(HashMap<K, V, S>, BTreeMap<K, V>, IndexMap<K, V, S>);

#[cfg(test)]
#[path = "describe/describe_tests.rs"]
mod describe_tests;
