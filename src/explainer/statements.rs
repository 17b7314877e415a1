//! Statement rule handlers
//!
//! This module handles the non-declaration statements: plain and
//! array-element assignments (the only ones with memory effects), the
//! formatted-output call, and the lexically narrated rest (`return`, bare
//! calls). Assignment handlers recognize a single binary arithmetic
//! expression `a <op> b` over `+ - * /`; anything more elaborate is stored
//! as an opaque value, per the simulator's no-parser design.

use regex::Captures;

use crate::memory::encoding;
use crate::memory::sizeof_type;

use super::declarations::parse_initializer;
use super::record::{ExplanationRecord, MemoryInfo};
use super::Explainer;

impl Explainer {
    /// Plain assignment to an existing identifier: `z = x + y;`
    ///
    /// An unknown target name degrades to a narrative-only record; storage
    /// into something never declared cannot be simulated.
    pub(crate) fn explain_assignment(
        &mut self,
        caps: &Captures,
        code: &str,
        number: usize,
    ) -> ExplanationRecord {
        let name = caps[1].to_string();
        let expr = caps[2].trim().to_string();

        let Some(target) = self.ctx.lookup(&name).cloned() else {
            return ExplanationRecord::narrative(
                number,
                code,
                format!(
                    "Assigns the result of expression '{}' to variable '{}'. \
                     The expression is evaluated first, then stored.",
                    expr, name
                ),
            );
        };
        let ty = target.symbol_type.clone();
        let address = format!("0x{:x}", target.address);

        // ptr = &target: the pointer takes the target's address
        if let Some(pointee) = expr.strip_prefix('&') {
            let pointee = pointee.trim();
            if let Some(pointee_symbol) = self.ctx.lookup(pointee) {
                let pointee_address = pointee_symbol.address;
                let value = format!("0x{:x}", pointee_address);
                self.ctx.update_value(&name, value.clone());
                return ExplanationRecord {
                    line: number,
                    code: code.to_string(),
                    explanation: format!(
                        "Stores the address of '{}' ({}) into pointer '{}'.",
                        pointee, value, name
                    ),
                    memory_info: Some(MemoryInfo {
                        address: Some(address),
                        value: Some(value),
                        binary: Some(encoding::encode_address(pointee_address)),
                        var_type: Some(ty.to_string()),
                    }),
                };
            }
            // Unknown address-of target: fall through to plain handling
        }

        // Binary arithmetic over known operands
        if let Some(ops) = self.patterns.binary_expr.captures(&expr) {
            let operands = (
                self.resolve_operand(&ops[1]),
                self.resolve_operand(&ops[3]),
            );
            if let (Some(a), Some(b)) = operands {
                if let Some(result) = apply_op(a, b, &ops[2]) {
                    // Float targets keep the floating result; integer
                    // targets truncate
                    let value = if ty.is_floating() {
                        format!("{}", result)
                    } else {
                        (result.trunc() as i64).to_string()
                    };
                    self.ctx.update_value(&name, value.clone());
                    return ExplanationRecord {
                        line: number,
                        code: code.to_string(),
                        explanation: format!(
                            "Evaluates {} {} {} = {} and stores the result in \
                             '{}' at its existing address.",
                            &ops[1], &ops[2], &ops[3], value, name
                        ),
                        memory_info: Some(MemoryInfo {
                            address: Some(address),
                            binary: encoding::encode_scalar(&value, &ty),
                            value: Some(value),
                            var_type: Some(ty.to_string()),
                        }),
                    };
                }
            }
        }

        // Opaque right-hand side: strip quotes, store verbatim, re-encode
        // per the target's declared type
        let value = parse_initializer(&expr)
            .or_else(|| self.ctx.lookup(&expr).and_then(|s| s.value.clone()))
            .unwrap_or_else(|| {
                expr.trim_matches(|c| c == '"' || c == '\'').to_string()
            });
        self.ctx.update_value(&name, value.clone());
        ExplanationRecord {
            line: number,
            code: code.to_string(),
            explanation: format!(
                "Assigns the result of expression '{}' to variable '{}'. \
                 The expression is evaluated first, then stored.",
                expr, name
            ),
            memory_info: Some(MemoryInfo {
                address: Some(address),
                binary: encoding::encode_scalar(&value, &ty),
                value: Some(value),
                var_type: Some(ty.to_string()),
            }),
        }
    }

    /// Array-element assignment: `a[2] = 42;`
    ///
    /// The element address is the array base plus index × element size. The
    /// array's aggregate value is not rewritten; the record stands alone.
    pub(crate) fn explain_element_assignment(
        &mut self,
        caps: &Captures,
        code: &str,
        number: usize,
    ) -> ExplanationRecord {
        let name = caps[1].to_string();
        let index_token = caps[2].to_string();
        let expr = caps[3].trim().to_string();

        let narrative_only = || {
            ExplanationRecord::narrative(
                number,
                code,
                format!(
                    "Assigns {} to element {} of array '{}'.",
                    expr, index_token, name
                ),
            )
        };

        let Some(array) = self.ctx.lookup(&name).cloned() else {
            return narrative_only();
        };
        if array.symbol_type.array_len.is_none() {
            return narrative_only();
        }

        let index = index_token.parse::<usize>().ok().or_else(|| {
            self.resolve_operand(&index_token)
                .filter(|v| v.fract() == 0.0 && *v >= 0.0)
                .map(|v| v as usize)
        });
        let Some(index) = index else {
            return narrative_only();
        };

        let element_ty = array.symbol_type.element_type();
        let element_size = sizeof_type(&element_ty, self.ctx.struct_defs());
        let element_address = array.address + (index * element_size) as u64;

        let value = parse_initializer(&expr).unwrap_or_else(|| {
            expr.trim_matches(|c| c == '"' || c == '\'').to_string()
        });

        ExplanationRecord {
            line: number,
            code: code.to_string(),
            explanation: format!(
                "Stores {} into element {} of array '{}'. The element address \
                 is the array base plus {} × {} bytes.",
                value, index, name, index, element_size
            ),
            memory_info: Some(MemoryInfo {
                address: Some(format!("0x{:x}", element_address)),
                binary: encoding::encode_scalar(&value, &element_ty),
                value: Some(value),
                var_type: Some(element_ty.to_string()),
            }),
        }
    }

    /// Formatted-output call; the format string literal is surfaced when
    /// present
    pub(crate) fn explain_printf(&self, code: &str, number: usize) -> ExplanationRecord {
        let explanation = match self.patterns.string_literal.captures(code) {
            Some(caps) => format!(
                "Outputs the formatted string \"{}\" to the console using the \
                 printf function from the stdio.h library.",
                &caps[1]
            ),
            None => "Outputs formatted text to the console using the printf \
                     function from stdio.h library."
                .to_string(),
        };
        ExplanationRecord::narrative(number, code, explanation)
    }

    /// Return statement with the returned expression carried verbatim
    pub(crate) fn explain_return(
        caps: &Captures,
        code: &str,
        number: usize,
    ) -> ExplanationRecord {
        let expr = caps[1].trim();
        let explanation = if expr.is_empty() {
            "Returns from the function and terminates its execution.".to_string()
        } else {
            format!(
                "Returns {} from the function and terminates its execution. \
                 In main(), this becomes the program exit code.",
                expr
            )
        };
        ExplanationRecord::narrative(number, code, explanation)
    }

    /// Bare function call, narrated as a control transfer
    pub(crate) fn explain_bare_call(
        caps: &Captures,
        code: &str,
        number: usize,
    ) -> ExplanationRecord {
        let name = &caps[1];
        let args = caps[2].trim();
        let explanation = if args.is_empty() {
            format!(
                "Calls the function '{}', transferring control to it until \
                 it returns.",
                name
            )
        } else {
            format!(
                "Calls the function '{}' with arguments ({}), transferring \
                 control to it until it returns.",
                name, args
            )
        };
        ExplanationRecord::narrative(number, code, explanation)
    }

    /// Numeric value of an operand token: a literal, or a known symbol's
    /// stored numeric value
    fn resolve_operand(&self, token: &str) -> Option<f64> {
        if let Ok(n) = token.parse::<f64>() {
            return Some(n);
        }
        self.ctx
            .lookup(token)
            .and_then(|s| s.value.as_ref())
            .and_then(|v| v.parse::<f64>().ok())
    }
}

fn apply_op(a: f64, b: f64, op: &str) -> Option<f64> {
    match op {
        "+" => Some(a + b),
        "-" => Some(a - b),
        "*" => Some(a * b),
        "/" if b != 0.0 => Some(a / b),
        _ => None,
    }
}
