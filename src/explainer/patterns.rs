//! Compiled pattern set for the line classifier
//!
//! Every statement pattern the classifier dispatches on, compiled once and
//! owned by the [`Explainer`](super::Explainer). The patterns are anchored
//! so that a more general rule cannot steal a line from a more specific one:
//! a scalar-declaration match requires whitespace after the type keyword
//! (so `int *p` falls through to the pointer rule), an assignment match
//! rejects a leading `=` on the right-hand side (so `x == y` is not read as
//! an assignment), and so on.
//!
//! The dispatch order itself lives in the classifier; this module only
//! guarantees that each individual pattern matches exactly the shape its
//! rule is meant to handle.

use regex::Regex;

const TYPE_KEYWORDS: &str = "int|float|double|char|short|long";

pub(crate) struct Patterns {
    pub include: Regex,
    pub function_def: Regex,
    pub struct_open: Regex,
    pub struct_member: Regex,
    pub struct_close: Regex,
    pub scalar_decl: Regex,
    pub array_decl: Regex,
    pub pointer_decl: Regex,
    pub struct_var_decl: Regex,
    pub assignment: Regex,
    pub element_assignment: Regex,
    pub string_literal: Regex,
    pub return_stmt: Regex,
    pub if_stmt: Regex,
    pub for_stmt: Regex,
    pub while_stmt: Regex,
    pub bare_call: Regex,
    pub binary_expr: Regex,
}

impl Patterns {
    pub fn new() -> Self {
        Patterns {
            include: Regex::new(r#"^#\s*include\s*[<"]([^>"]+)[>"]"#).unwrap(),
            function_def: Regex::new(&format!(
                r"^(?:unsigned\s+)?({TYPE_KEYWORDS}|void)\b\s+(\w+)\s*\(([^)]*)\)\s*[{{;]?\s*$"
            ))
            .unwrap(),
            struct_open: Regex::new(r"^struct\s+(\w+)\s*\{\s*$").unwrap(),
            struct_member: Regex::new(&format!(
                r"^(unsigned\s+)?({TYPE_KEYWORDS})\b\s*(\**)\s*(\w+)\s*(?:\[\s*(\d+)\s*\])?\s*;"
            ))
            .unwrap(),
            struct_close: Regex::new(r"^\}\s*;?\s*$").unwrap(),
            scalar_decl: Regex::new(&format!(
                r"^(unsigned\s+)?({TYPE_KEYWORDS})\b\s+(\w+)\s*(?:=\s*(.+?))?\s*;?\s*$"
            ))
            .unwrap(),
            array_decl: Regex::new(&format!(
                r"^(unsigned\s+)?({TYPE_KEYWORDS})\b\s+(\w+)\s*\[\s*(\d*)\s*\]\s*(?:=\s*\{{([^}}]*)\}})?\s*;?\s*$"
            ))
            .unwrap(),
            pointer_decl: Regex::new(&format!(
                r"^(unsigned\s+)?({TYPE_KEYWORDS}|void)\b\s*(\*+)\s*(\w+)\s*(?:=\s*(.+?))?\s*;?\s*$"
            ))
            .unwrap(),
            struct_var_decl: Regex::new(r"^struct\s+(\w+)\s+(\w+)\s*;?\s*$").unwrap(),
            assignment: Regex::new(r"^(\w+)\s*=\s*([^=].*?)\s*;?\s*$").unwrap(),
            element_assignment: Regex::new(
                r"^(\w+)\s*\[\s*(\w+)\s*\]\s*=\s*([^=].*?)\s*;?\s*$",
            )
            .unwrap(),
            string_literal: Regex::new(r#""((?:[^"\\]|\\.)*)""#).unwrap(),
            return_stmt: Regex::new(r"^return\b\s*(.*?)\s*;?\s*$").unwrap(),
            if_stmt: Regex::new(r"^(?:\}\s*)?(?:else\s+)?if\s*\((.*)\)").unwrap(),
            for_stmt: Regex::new(r"^for\s*\(([^;]*);([^;]*);([^)]*)\)").unwrap(),
            while_stmt: Regex::new(r"^(?:\}\s*)?while\s*\((.*)\)").unwrap(),
            bare_call: Regex::new(r"^(\w+)\s*\(([^)]*)\)\s*;?\s*$").unwrap(),
            binary_expr: Regex::new(
                r"^([A-Za-z_]\w*|\d+(?:\.\d+)?)\s*([+*/-])\s*([A-Za-z_]\w*|\d+(?:\.\d+)?)$",
            )
            .unwrap(),
        }
    }
}
