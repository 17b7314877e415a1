//! Line-by-line C source explainer
//!
//! This module provides the [`Explainer`] struct and the analysis entry
//! point. The explainer is deliberately not a parser: it classifies one
//! trimmed source line at a time against a ranked list of statement
//! patterns, updating a simulated memory image as declarations and
//! assignments go by. Branches, loops, and calls are explained lexically,
//! never executed.
//!
//! # Architecture
//!
//! The classification logic is split across multiple files using
//! `impl Explainer` blocks, allowing each module to extend the explainer
//! with related rules while sharing the simulation state:
//! - This module: Explainer struct, line filtering, and coordination
//! - `classifier`: Ordered first-match-wins pattern dispatch
//! - `declarations`: Scalar, array, pointer, and struct-instance rules
//! - `statements`: Assignment, I/O, control-flow, and call rules
//!
//! # Hermeticity
//!
//! [`Explainer::explain`] resets the simulation context at entry, so a call
//! is a pure function of its source text: identical input always yields
//! identical records, addresses included. One explainer must not be shared
//! across concurrent analyses; give each its own instance.

pub mod record;

mod classifier;
mod declarations;
mod patterns;
mod statements;

use crate::memory::symbols::{SimulationContext, StructMember};
use patterns::Patterns;
use record::{ExplanationRecord, MemoryBlock, MemoryLayout};

/// An in-progress struct definition spanning multiple source lines.
/// Carries the opening line so the record emitted at the closing brace can
/// point back at the `struct Tag {` line.
pub(crate) struct PendingStruct {
    pub tag: String,
    pub members: Vec<StructMember>,
    pub line: usize,
    pub code: String,
}

/// Line-by-line explainer with a simulated memory image
pub struct Explainer {
    pub(crate) patterns: Patterns,
    pub(crate) ctx: SimulationContext,
    pub(crate) pending_struct: Option<PendingStruct>,
}

impl Explainer {
    pub fn new() -> Self {
        Explainer {
            patterns: Patterns::new(),
            ctx: SimulationContext::new(),
            pending_struct: None,
        }
    }

    /// Analyze a full source text and return one record per non-trivial
    /// line, in line order.
    ///
    /// The simulation context is reset at entry; blank lines, comment
    /// lines, brace-only lines, and struct-definition body lines produce
    /// no records. A line that matches no pattern still produces a generic
    /// record; classification never fails.
    pub fn explain(&mut self, source: &str) -> Vec<ExplanationRecord> {
        self.ctx.reset();
        self.pending_struct = None;

        let mut records = Vec::new();
        for (index, raw) in source.lines().enumerate() {
            let code = raw.trim();
            if code.is_empty() || is_comment(code) {
                continue;
            }

            // Patterns see the line without any trailing comment; the
            // record keeps the verbatim trimmed line
            let stmt = strip_line_comment(code);
            if stmt.is_empty() {
                continue;
            }

            // Struct-definition blocks swallow their body lines; the single
            // record for the whole block is emitted at the closing brace.
            if self.pending_struct.is_some() {
                if let Some(rec) = self.continue_struct_definition(stmt) {
                    records.push(rec);
                }
                continue;
            }

            if is_brace_only(stmt) {
                continue;
            }

            if let Some(rec) = self.classify_line(stmt, code, index + 1) {
                records.push(rec);
            }
        }
        records
    }

    /// Layout report over the symbols of the most recent analysis,
    /// ordered by ascending address
    pub fn memory_layout(&self) -> MemoryLayout {
        let mut symbols: Vec<_> = self.ctx.symbols().values().collect();
        symbols.sort_by_key(|s| s.address);

        let total_bytes = symbols.iter().map(|s| s.size_bytes).sum();
        let blocks = symbols
            .into_iter()
            .map(|s| MemoryBlock {
                name: s.name.clone(),
                var_type: s.symbol_type.to_string(),
                address: format!("0x{:x}", s.address),
                size_bytes: s.size_bytes,
                value: s.value.clone(),
            })
            .collect::<Vec<_>>();

        MemoryLayout {
            variable_count: blocks.len(),
            total_bytes,
            blocks,
        }
    }
}

impl Default for Explainer {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience entry: one hermetic analysis of `source`
pub fn explain_source(source: &str) -> Vec<ExplanationRecord> {
    Explainer::new().explain(source)
}

fn is_comment(line: &str) -> bool {
    line.starts_with("//") || line.starts_with("/*") || line.starts_with("*/")
}

fn is_brace_only(line: &str) -> bool {
    matches!(line, "{" | "}" | "};")
}

/// Strip a trailing `//` comment, ignoring slashes inside string and
/// character literals
fn strip_line_comment(line: &str) -> &str {
    let bytes = line.as_bytes();
    let mut in_string = false;
    let mut in_char = false;
    let mut escaped = false;
    for i in 0..bytes.len() {
        if escaped {
            escaped = false;
            continue;
        }
        match bytes[i] {
            b'\\' if in_string || in_char => escaped = true,
            b'"' if !in_char => in_string = !in_string,
            b'\'' if !in_string => in_char = !in_char,
            b'/' if !in_string && !in_char && bytes.get(i + 1) == Some(&b'/') => {
                return line[..i].trim_end();
            }
            _ => {}
        }
    }
    line
}
