//! Symbol table and memory allocator
//!
//! This module owns the mutable simulation state for one analysis run:
//! the address counter, the symbol table, and the struct registry, bundled
//! into a [`SimulationContext`].
//!
//! # Allocation Model
//!
//! Addresses are synthetic: a monotonically increasing counter stands in for
//! real process memory. Every declaration reserves `size` fresh bytes and
//! bumps the counter; nothing is ever freed, so address ranges of distinct
//! symbols never overlap and addresses strictly increase in declaration
//! order. Redeclaring an existing name silently overwrites its table entry
//! and reserves a new range; there is no scope model, the table is flat
//! across the whole source block.
//!
//! # Reset Discipline
//!
//! The context is exclusively owned by one in-flight analysis and reset at
//! call entry, so identical source text always produces identical addresses.

use rustc_hash::FxHashMap;

use super::constants::ADDRESS_BASE;
use super::sizeof_type;
use super::types::TypeDescriptor;

/// One member of a struct definition
#[derive(Debug, Clone)]
pub struct StructMember {
    pub name: String,
    pub member_type: TypeDescriptor,
}

/// A named record type, registered once its closing brace has been seen
#[derive(Debug, Clone)]
pub struct StructDef {
    pub tag: String,
    pub members: Vec<StructMember>,
}

impl StructDef {
    /// Cumulative byte offset of each member, in declaration order.
    /// No padding or alignment is modeled.
    pub fn member_offsets(
        &self,
        struct_defs: &FxHashMap<String, StructDef>,
    ) -> Vec<(String, usize)> {
        let mut offsets = Vec::with_capacity(self.members.len());
        let mut offset = 0;
        for member in &self.members {
            offsets.push((member.name.clone(), offset));
            offset += sizeof_type(&member.member_type, struct_defs);
        }
        offsets
    }
}

/// One declared name in the simulated program
#[derive(Debug, Clone)]
pub struct Symbol {
    pub name: String,
    pub symbol_type: TypeDescriptor,
    pub address: u64,
    pub size_bytes: usize,
    pub value: Option<String>, // None before initialization
}

/// Mutable simulation state for one analysis run
#[derive(Debug)]
pub struct SimulationContext {
    next_address: u64,
    symbols: FxHashMap<String, Symbol>,
    structs: FxHashMap<String, StructDef>,
}

impl SimulationContext {
    pub fn new() -> Self {
        SimulationContext {
            next_address: ADDRESS_BASE,
            symbols: FxHashMap::default(),
            structs: FxHashMap::default(),
        }
    }

    /// Clear all tables and rewind the address counter to the base
    pub fn reset(&mut self) {
        self.next_address = ADDRESS_BASE;
        self.symbols.clear();
        self.structs.clear();
    }

    /// Reserve a fresh address range for `name` and record the symbol.
    /// An existing entry under the same name is overwritten; its old range
    /// is not reused.
    pub fn declare(
        &mut self,
        name: &str,
        symbol_type: TypeDescriptor,
        value: Option<String>,
    ) -> &Symbol {
        let size_bytes = sizeof_type(&symbol_type, &self.structs);
        let address = self.next_address;
        self.next_address += size_bytes as u64;

        self.symbols.insert(
            name.to_string(),
            Symbol {
                name: name.to_string(),
                symbol_type,
                address,
                size_bytes,
                value,
            },
        );
        &self.symbols[name]
    }

    pub fn lookup(&self, name: &str) -> Option<&Symbol> {
        self.symbols.get(name)
    }

    /// Store a new value for an existing symbol. The address is unchanged;
    /// returns None when the name was never declared.
    pub fn update_value(&mut self, name: &str, value: String) -> Option<&Symbol> {
        let symbol = self.symbols.get_mut(name)?;
        symbol.value = Some(value);
        Some(&*symbol)
    }

    pub fn define_struct(&mut self, def: StructDef) {
        self.structs.insert(def.tag.clone(), def);
    }

    pub fn struct_def(&self, tag: &str) -> Option<&StructDef> {
        self.structs.get(tag)
    }

    pub fn struct_defs(&self) -> &FxHashMap<String, StructDef> {
        &self.structs
    }

    pub fn symbols(&self) -> &FxHashMap<String, Symbol> {
        &self.symbols
    }
}

impl Default for SimulationContext {
    fn default() -> Self {
        Self::new()
    }
}
