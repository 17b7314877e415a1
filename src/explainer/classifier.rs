//! Ordered statement-pattern dispatch
//!
//! Patterns are tried from most to least specific, and the first match
//! wins. The order is load-bearing: later rules are reachable only when
//! earlier ones fail, so a struct-typed declaration must be tried before
//! the generic fallback, and `while (...)` must be tried before the bare
//! function-call rule that its shape would otherwise satisfy.
//!
//! Classification never fails. A malformed line degrades to whatever its
//! pattern captured, and a line that matches nothing gets the generic
//! "part of the program logic" record.

use crate::memory::symbols::{StructDef, StructMember};
use crate::memory::types::{BaseType, TypeDescriptor};

use super::record::ExplanationRecord;
use super::{Explainer, PendingStruct};

impl Explainer {
    /// Classify one trimmed, non-empty source line, updating the simulation
    /// context as a side effect. `stmt` is the line with any trailing
    /// comment stripped and is what the patterns see; `code` is the
    /// verbatim trimmed line carried into the record. Returns None only for
    /// lines that carry no record of their own (the opening of a struct
    /// block).
    pub(crate) fn classify_line(
        &mut self,
        stmt: &str,
        code: &str,
        number: usize,
    ) -> Option<ExplanationRecord> {
        // Preprocessor include directive
        if let Some(caps) = self.patterns.include.captures(stmt) {
            return Some(ExplanationRecord::narrative(
                number,
                code,
                format!(
                    "Preprocessor directive that includes the {} header file, \
                     providing access to standard library functions.",
                    &caps[1]
                ),
            ));
        }

        // Function definition or signature
        if let Some(caps) = self.patterns.function_def.captures(stmt) {
            return Some(self.explain_function(&caps, code, number));
        }

        // Struct type definition block; the record is emitted at the
        // closing brace, not here
        if let Some(caps) = self.patterns.struct_open.captures(stmt) {
            self.pending_struct = Some(PendingStruct {
                tag: caps[1].to_string(),
                members: Vec::new(),
                line: number,
                code: code.to_string(),
            });
            return None;
        }

        // Scalar declaration, with or without initializer
        if let Some(caps) = self.patterns.scalar_decl.captures(stmt) {
            return Some(self.explain_scalar_decl(&caps, code, number));
        }

        // Array declaration, with or without brace-initializer list
        if let Some(caps) = self.patterns.array_decl.captures(stmt) {
            return Some(self.explain_array_decl(&caps, code, number));
        }

        // Pointer declaration
        if let Some(caps) = self.patterns.pointer_decl.captures(stmt) {
            return Some(self.explain_pointer_decl(&caps, code, number));
        }

        // Struct-typed variable declaration
        if let Some(caps) = self.patterns.struct_var_decl.captures(stmt) {
            return Some(self.explain_struct_var_decl(&caps, code, number));
        }

        // Plain assignment to an existing identifier
        if let Some(caps) = self.patterns.assignment.captures(stmt) {
            return Some(self.explain_assignment(&caps, code, number));
        }

        // Array-element assignment
        if let Some(caps) = self.patterns.element_assignment.captures(stmt) {
            return Some(self.explain_element_assignment(&caps, code, number));
        }

        // Output and input calls
        if stmt.contains("printf") {
            return Some(self.explain_printf(code, number));
        }
        if stmt.contains("scanf") {
            return Some(ExplanationRecord::narrative(
                number,
                code,
                "Reads formatted input from the user using the scanf function \
                 from the stdio.h library."
                    .to_string(),
            ));
        }

        // Return statement
        if let Some(caps) = self.patterns.return_stmt.captures(stmt) {
            return Some(Self::explain_return(&caps, code, number));
        }

        // Conditionals and loops, narrated lexically. A loop is explained
        // once regardless of how many times it would iterate.
        if let Some(caps) = self.patterns.if_stmt.captures(stmt) {
            return Some(ExplanationRecord::narrative(
                number,
                code,
                format!(
                    "Conditional statement that executes the following block \
                     only if the condition '{}' evaluates to true.",
                    caps[1].trim()
                ),
            ));
        }
        if let Some(caps) = self.patterns.for_stmt.captures(stmt) {
            return Some(ExplanationRecord::narrative(
                number,
                code,
                format!(
                    "Loop structure: initializes with '{}', continues while \
                     '{}' holds, and applies '{}' after each iteration.",
                    caps[1].trim(),
                    caps[2].trim(),
                    caps[3].trim()
                ),
            ));
        }
        if let Some(caps) = self.patterns.while_stmt.captures(stmt) {
            return Some(ExplanationRecord::narrative(
                number,
                code,
                format!(
                    "Loop that continues executing as long as the condition \
                     '{}' remains true.",
                    caps[1].trim()
                ),
            ));
        }

        // Bare function call
        if let Some(caps) = self.patterns.bare_call.captures(stmt) {
            return Some(Self::explain_bare_call(&caps, code, number));
        }

        // Fallback: every line gets some record
        Some(self.generic_record(code, number))
    }

    /// Consume one line of an open struct-definition block. Member lines
    /// accumulate silently; the closing brace registers the definition and
    /// yields the single record for the whole block.
    pub(crate) fn continue_struct_definition(
        &mut self,
        stmt: &str,
    ) -> Option<ExplanationRecord> {
        if self.patterns.struct_close.is_match(stmt) {
            let pending = self.pending_struct.take()?;
            let def = StructDef {
                tag: pending.tag.clone(),
                members: pending.members,
            };

            let member_list = def
                .members
                .iter()
                .map(|m| format!("{} {}", m.member_type, m.name))
                .collect::<Vec<_>>()
                .join(", ");
            self.ctx.define_struct(def);

            let size = crate::memory::sizeof_type(
                &TypeDescriptor::new(BaseType::Struct(pending.tag.clone())),
                self.ctx.struct_defs(),
            );
            return Some(ExplanationRecord::narrative(
                pending.line,
                &pending.code,
                format!(
                    "Defines a struct type '{}' with members {}. Each instance \
                     occupies {} bytes, laid out in member order with no \
                     padding.",
                    pending.tag, member_list, size
                ),
            ));
        }

        if let Some(caps) = self.patterns.struct_member.captures(stmt) {
            if let Some(base) = BaseType::from_keyword(&caps[2]) {
                let mut member_type =
                    TypeDescriptor::new(base).with_pointer_depth(caps[3].len());
                if caps.get(1).is_some() {
                    member_type = member_type.with_unsigned();
                }
                if let Some(len) = caps.get(5).and_then(|m| m.as_str().parse().ok()) {
                    member_type = member_type.with_array(len);
                }
                if let Some(pending) = self.pending_struct.as_mut() {
                    pending.members.push(StructMember {
                        name: caps[4].to_string(),
                        member_type,
                    });
                }
            }
        }
        // Lines that are not member declarations are skipped; the block
        // stays open until its closing brace
        None
    }
}
