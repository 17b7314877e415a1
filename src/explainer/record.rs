//! Output records produced by the explainer
//!
//! One [`ExplanationRecord`] is emitted per analyzed source line, in line
//! order. The serialized field names (`memoryInfo`, `binary`, `type`, ...)
//! are the wire contract consumed by the rendering and visualization
//! surfaces, which live outside this crate.

use serde::Serialize;

/// Memory effect of one explained line.
///
/// Present only when the line directly touches simulated memory
/// (declaration, assignment, array/pointer/struct operation). Fields the
/// line could not produce are left out of the serialized form entirely.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MemoryInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub binary: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub var_type: Option<String>,
}

/// One analyzed source line
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExplanationRecord {
    pub line: usize,
    pub code: String,
    pub explanation: String,
    #[serde(rename = "memoryInfo", skip_serializing_if = "Option::is_none")]
    pub memory_info: Option<MemoryInfo>,
}

impl ExplanationRecord {
    /// A record with no memory effect
    pub fn narrative(line: usize, code: &str, explanation: String) -> Self {
        ExplanationRecord {
            line,
            code: code.to_string(),
            explanation,
            memory_info: None,
        }
    }
}

/// One allocated block in the layout report
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MemoryBlock {
    pub name: String,
    #[serde(rename = "type")]
    pub var_type: String,
    pub address: String,
    pub size_bytes: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

/// Summary of the simulated address space after one analysis,
/// ordered by ascending address
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MemoryLayout {
    pub blocks: Vec<MemoryBlock>,
    pub total_bytes: usize,
    pub variable_count: usize,
}
