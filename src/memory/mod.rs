//! Simulated memory model for the explainer
//!
//! This module provides the core memory abstractions:
//! - [`types`]: Type descriptors (base type, sign, pointer depth, array length)
//! - [`symbols`]: Symbol table with a monotonic never-freeing allocator
//! - [`encoding`]: Exact bit-pattern rendering (two's complement, IEEE-754)
//! - [`constants`]: Address-space constants
//!
//! # Type Sizes
//!
//! Unlike real C, the simulator uses fixed, platform-independent sizes:
//! - `char`: 1 byte, `short`: 2 bytes
//! - `int`, `float`: 4 bytes
//! - `long`, `double`: 8 bytes
//! - pointer: 8 bytes (regardless of pointee type)
//! - array: element size × element count
//! - struct: sum of member sizes (no padding or alignment)
//!
//! An unrecognized type falls back to 4 bytes; sizing never fails, so one
//! odd declaration cannot abort an analysis.

pub mod constants;
pub mod encoding;
pub mod symbols;
pub mod types;

use rustc_hash::FxHashMap;
use symbols::StructDef;
use types::{BaseType, TypeDescriptor};

/// Calculate the size of a type in bytes
pub fn sizeof_type(t: &TypeDescriptor, struct_defs: &FxHashMap<String, StructDef>) -> usize {
    // If it's a pointer, size is always 8 bytes
    if t.pointer_depth > 0 {
        return constants::POINTER_SIZE;
    }

    let base_size = match &t.base {
        BaseType::Char => 1,
        BaseType::Short => 2,
        BaseType::Int | BaseType::Float => 4,
        BaseType::Long | BaseType::Double => 8,
        BaseType::Void => 0,
        BaseType::Struct(tag) => match struct_defs.get(tag) {
            // Sum of all member sizes (no padding)
            Some(def) => def
                .members
                .iter()
                .map(|m| sizeof_type(&m.member_type, struct_defs))
                .sum(),
            None => constants::DEFAULT_TYPE_SIZE,
        },
    };

    match t.array_len {
        Some(count) => base_size * count,
        None => base_size,
    }
}

#[cfg(test)]
mod tests {
    use super::symbols::{StructDef, StructMember};
    use super::*;

    #[test]
    fn test_fixed_size_table() {
        let defs = FxHashMap::default();
        assert_eq!(sizeof_type(&TypeDescriptor::new(BaseType::Char), &defs), 1);
        assert_eq!(sizeof_type(&TypeDescriptor::new(BaseType::Short), &defs), 2);
        assert_eq!(sizeof_type(&TypeDescriptor::new(BaseType::Int), &defs), 4);
        assert_eq!(sizeof_type(&TypeDescriptor::new(BaseType::Float), &defs), 4);
        assert_eq!(sizeof_type(&TypeDescriptor::new(BaseType::Long), &defs), 8);
        assert_eq!(sizeof_type(&TypeDescriptor::new(BaseType::Double), &defs), 8);
    }

    #[test]
    fn test_pointer_size_is_fixed() {
        let defs = FxHashMap::default();
        let single = TypeDescriptor::new(BaseType::Char).with_pointer_depth(1);
        let double = TypeDescriptor::new(BaseType::Double).with_pointer_depth(2);
        assert_eq!(sizeof_type(&single, &defs), 8);
        assert_eq!(sizeof_type(&double, &defs), 8);
    }

    #[test]
    fn test_array_size_scales_by_count() {
        let defs = FxHashMap::default();
        let arr = TypeDescriptor::new(BaseType::Int).with_array(5);
        assert_eq!(sizeof_type(&arr, &defs), 20);
    }

    #[test]
    fn test_struct_size_sums_members() {
        let mut defs = FxHashMap::default();
        defs.insert(
            "Pair".to_string(),
            StructDef {
                tag: "Pair".to_string(),
                members: vec![
                    StructMember {
                        name: "a".to_string(),
                        member_type: TypeDescriptor::new(BaseType::Int),
                    },
                    StructMember {
                        name: "b".to_string(),
                        member_type: TypeDescriptor::new(BaseType::Char),
                    },
                ],
            },
        );
        let t = TypeDescriptor::new(BaseType::Struct("Pair".to_string()));
        assert_eq!(sizeof_type(&t, &defs), 5);
    }

    #[test]
    fn test_unknown_struct_defaults_to_four_bytes() {
        let defs = FxHashMap::default();
        let t = TypeDescriptor::new(BaseType::Struct("Ghost".to_string()));
        assert_eq!(sizeof_type(&t, &defs), 4);
    }
}
