//! Declaration rule handlers
//!
//! This module handles the declaration-shaped statement patterns:
//!
//! - Scalar declarations, with or without an initializer
//! - Array declarations, with or without a brace-initializer list
//! - Pointer declarations (always 8 bytes, null pattern until assigned)
//! - Struct-typed variable declarations
//! - Function definitions and signatures
//!
//! Each handler reserves memory through the simulation context and renders
//! the stored value's exact bit pattern where one exists. All handlers are
//! implemented as `pub(crate)` methods on the [`Explainer`] struct.

use regex::Captures;

use crate::memory::encoding;
use crate::memory::types::{BaseType, TypeDescriptor};

use super::record::{ExplanationRecord, MemoryInfo};
use super::Explainer;

impl Explainer {
    /// Function definition or signature; the entry point is special-cased
    pub(crate) fn explain_function(
        &self,
        caps: &Captures,
        code: &str,
        number: usize,
    ) -> ExplanationRecord {
        let name = &caps[2];
        if name == "main" {
            return ExplanationRecord::narrative(
                number,
                code,
                "Entry point of the C program. Execution starts here. \
                 Returns an integer status code."
                    .to_string(),
            );
        }

        let return_type = &caps[1];
        let params = caps[3].trim();
        let explanation = if params.is_empty() || params == "void" {
            format!(
                "Defines the function '{}' returning {}. Execution transfers \
                 here whenever the function is called.",
                name, return_type
            )
        } else {
            format!(
                "Defines the function '{}' taking ({}) and returning {}. \
                 Execution transfers here whenever the function is called.",
                name, params, return_type
            )
        };
        ExplanationRecord::narrative(number, code, explanation)
    }

    /// Scalar variable declaration: `int x = 30;` or `int x;`
    pub(crate) fn explain_scalar_decl(
        &mut self,
        caps: &Captures,
        code: &str,
        number: usize,
    ) -> ExplanationRecord {
        let Some(base) = BaseType::from_keyword(&caps[2]) else {
            return self.generic_record(code, number);
        };
        let mut ty = TypeDescriptor::new(base);
        if caps.get(1).is_some() {
            ty = ty.with_unsigned();
        }
        let name = &caps[3];
        let init = caps.get(4).map(|m| m.as_str());

        let value = init.and_then(parse_initializer);
        let address = self.ctx.declare(name, ty.clone(), value.clone()).address;

        match init {
            Some(raw) => {
                // An initializer the simulator cannot read numerically
                // (a call, a quoted string) still declares the symbol but
                // yields no memory detail
                let memory_info = value.clone().map(|v| MemoryInfo {
                    address: Some(format!("0x{:x}", address)),
                    binary: encoding::encode_scalar(&v, &ty),
                    value: Some(v),
                    var_type: Some(ty.to_string()),
                });
                ExplanationRecord {
                    line: number,
                    code: code.to_string(),
                    explanation: format!(
                        "Declares a {} variable '{}' and initializes it with \
                         value {}. Memory is allocated to store this value.",
                        ty, name, raw
                    ),
                    memory_info,
                }
            }
            None => ExplanationRecord {
                line: number,
                code: code.to_string(),
                explanation: format!(
                    "Declares a {} variable '{}'. Memory is allocated but \
                     left uninitialized.",
                    ty, name
                ),
                memory_info: Some(MemoryInfo {
                    address: Some(format!("0x{:x}", address)),
                    value: Some("uninitialized".to_string()),
                    binary: encoding::encode_scalar("0", &ty),
                    var_type: Some(ty.to_string()),
                }),
            },
        }
    }

    /// Array declaration: `int a[5];` or `int a[5] = {1, 2, 3, 4, 5};`
    /// The element count comes from the brackets, or failing that from the
    /// initializer-list length. Extra initializer values beyond the declared
    /// count are ignored.
    pub(crate) fn explain_array_decl(
        &mut self,
        caps: &Captures,
        code: &str,
        number: usize,
    ) -> ExplanationRecord {
        let Some(base) = BaseType::from_keyword(&caps[2]) else {
            return self.generic_record(code, number);
        };
        let name = caps[3].to_string();
        let declared_len: Option<usize> = caps[4].parse().ok();
        let init_list: Option<Vec<String>> = caps.get(5).map(|m| {
            m.as_str()
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect()
        });

        let count = declared_len.or_else(|| init_list.as_ref().map(Vec::len));
        let Some(count) = count.filter(|&c| c > 0) else {
            return ExplanationRecord::narrative(
                number,
                code,
                format!(
                    "Declares an array '{}' of {} elements, but its element \
                     count cannot be determined, so no memory is simulated.",
                    name, &caps[2]
                ),
            );
        };

        let mut ty = TypeDescriptor::new(base).with_array(count);
        if caps.get(1).is_some() {
            ty = ty.with_unsigned();
        }
        let element_ty = ty.element_type();

        let stored_value = init_list.as_ref().map(|l| format!("{{{}}}", l.join(", ")));
        let symbol = self.ctx.declare(&name, ty.clone(), stored_value.clone());
        let (start, size) = (symbol.address, symbol.size_bytes);
        let element_size = size / count;

        let binary = init_list.as_ref().map(|list| {
            list.iter()
                .take(count)
                .filter_map(|e| {
                    parse_initializer(e)
                        .and_then(|v| encoding::encode_scalar(&v, &element_ty))
                })
                .collect::<Vec<_>>()
                .join(" | ")
        });

        let explanation = if init_list.is_some() {
            format!(
                "Declares an array '{}' of {} {} elements and initializes it \
                 from the brace-enclosed list. A contiguous block of {} bytes \
                 is reserved ({} bytes per element).",
                name, count, element_ty, size, element_size
            )
        } else {
            format!(
                "Declares an array '{}' of {} {} elements. A contiguous block \
                 of {} bytes is reserved ({} bytes per element), left \
                 uninitialized.",
                name, count, element_ty, size, element_size
            )
        };

        ExplanationRecord {
            line: number,
            code: code.to_string(),
            explanation,
            memory_info: Some(MemoryInfo {
                address: Some(range_display(start, size)),
                value: stored_value.or_else(|| Some("uninitialized".to_string())),
                binary: binary.filter(|b| !b.is_empty()),
                var_type: Some(ty.to_string()),
            }),
        }
    }

    /// Pointer declaration: `int *p;`, `int *p = &x;`, `char **argv;`
    /// Pointer width is fixed at 8 bytes regardless of the pointee type.
    pub(crate) fn explain_pointer_decl(
        &mut self,
        caps: &Captures,
        code: &str,
        number: usize,
    ) -> ExplanationRecord {
        let Some(base) = BaseType::from_keyword(&caps[2]) else {
            return self.generic_record(code, number);
        };
        let depth = caps[3].len();
        let mut ty = TypeDescriptor::new(base).with_pointer_depth(depth);
        if caps.get(1).is_some() {
            ty = ty.with_unsigned();
        }
        let name = caps[4].to_string();
        let init = caps.get(5).map(|m| m.as_str().trim());

        // An address-of initializer points at an existing symbol; anything
        // else leaves the all-zero null pattern
        let target = init
            .and_then(|e| e.strip_prefix('&'))
            .map(str::trim)
            .and_then(|t| self.ctx.lookup(t).map(|s| (t.to_string(), s.address)));

        let (value, pointee_address) = match &target {
            Some((_, address)) => (format!("0x{:x}", address), *address),
            None => ("0x0".to_string(), 0),
        };

        let address = self
            .ctx
            .declare(&name, ty.clone(), Some(value.clone()))
            .address;

        let pointee = if depth > 1 {
            format!("{} {}", &caps[2], "*".repeat(depth - 1))
        } else {
            caps[2].to_string()
        };
        let explanation = match &target {
            Some((target_name, _)) => format!(
                "Declares a {} pointer '{}' and initializes it with the \
                 address of '{}'. Pointers always occupy 8 bytes.",
                pointee, name, target_name
            ),
            None => format!(
                "Declares a {} pointer '{}'. It holds the all-zero null \
                 pattern until an address is assigned. Pointers always \
                 occupy 8 bytes.",
                pointee, name
            ),
        };

        ExplanationRecord {
            line: number,
            code: code.to_string(),
            explanation,
            memory_info: Some(MemoryInfo {
                address: Some(format!("0x{:x}", address)),
                value: Some(value),
                binary: Some(encoding::encode_address(pointee_address)),
                var_type: Some(ty.to_string()),
            }),
        }
    }

    /// Struct-typed variable declaration: `struct Point p;`
    /// Requires the struct to be fully defined; otherwise the explanation
    /// degrades to a stub and no memory is reserved.
    pub(crate) fn explain_struct_var_decl(
        &mut self,
        caps: &Captures,
        code: &str,
        number: usize,
    ) -> ExplanationRecord {
        let tag = caps[1].to_string();
        let name = caps[2].to_string();

        let Some(def) = self.ctx.struct_def(&tag).cloned() else {
            return ExplanationRecord::narrative(
                number,
                code,
                format!(
                    "Declares a variable '{}' of struct type '{}', which has \
                     not been defined yet, so its layout is unknown.",
                    name, tag
                ),
            );
        };

        let offsets = def.member_offsets(self.ctx.struct_defs());
        let ty = TypeDescriptor::new(BaseType::Struct(tag.clone()));
        let symbol = self.ctx.declare(&name, ty.clone(), None);
        let (start, size) = (symbol.address, symbol.size_bytes);

        let layout = offsets
            .iter()
            .map(|(member, offset)| format!("{} at byte {}", member, offset))
            .collect::<Vec<_>>()
            .join(", ");

        ExplanationRecord {
            line: number,
            code: code.to_string(),
            explanation: format!(
                "Declares a variable '{}' of struct type '{}'. {} bytes are \
                 reserved, with members laid out in order: {}.",
                name, tag, size, layout
            ),
            memory_info: Some(MemoryInfo {
                address: Some(range_display(start, size)),
                value: Some("uninitialized".to_string()),
                binary: None,
                var_type: Some(ty.to_string()),
            }),
        }
    }

    pub(crate) fn generic_record(&self, code: &str, number: usize) -> ExplanationRecord {
        ExplanationRecord::narrative(
            number,
            code,
            "Code statement - part of the program logic.".to_string(),
        )
    }
}

/// Render an address range as `0xSTART-0xEND` (END inclusive), or a single
/// address for empty ranges
fn range_display(start: u64, size: usize) -> String {
    if size > 1 {
        format!("0x{:x}-0x{:x}", start, start + size as u64 - 1)
    } else {
        format!("0x{:x}", start)
    }
}

/// Interpret a declaration initializer: a numeric literal passes through, a
/// quoted character becomes its ASCII code, anything else (quoted strings,
/// calls, unresolvable expressions) is ignored.
pub(crate) fn parse_initializer(text: &str) -> Option<String> {
    let text = text.trim();
    if let Some(inner) = text.strip_prefix('\'').and_then(|t| t.strip_suffix('\'')) {
        return char_code(inner).map(|c| c.to_string());
    }
    if text.starts_with('"') {
        return None;
    }
    if text.parse::<i64>().is_ok() || text.parse::<f64>().is_ok() {
        return Some(text.to_string());
    }
    None
}

/// ASCII code of a character literal's body, handling the common escapes
fn char_code(body: &str) -> Option<u32> {
    let mut chars = body.chars();
    let code = match (chars.next()?, chars.next()) {
        ('\\', Some(escape)) => match escape {
            'n' => 10,
            't' => 9,
            'r' => 13,
            '0' => 0,
            '\\' => 92,
            '\'' => 39,
            '"' => 34,
            _ => return None,
        },
        (c, None) => c as u32,
        _ => return None,
    };
    Some(code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_numeric_initializers() {
        assert_eq!(parse_initializer("30").as_deref(), Some("30"));
        assert_eq!(parse_initializer("-5").as_deref(), Some("-5"));
        assert_eq!(parse_initializer("3.14159").as_deref(), Some("3.14159"));
    }

    #[test]
    fn test_parse_char_literal_to_ascii() {
        assert_eq!(parse_initializer("'A'").as_deref(), Some("65"));
        assert_eq!(parse_initializer(r"'\n'").as_deref(), Some("10"));
        assert_eq!(parse_initializer(r"'\0'").as_deref(), Some("0"));
    }

    #[test]
    fn test_strings_and_calls_are_ignored() {
        assert_eq!(parse_initializer("\"hello\""), None);
        assert_eq!(parse_initializer("getValue()"), None);
    }
}
