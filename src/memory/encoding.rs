//! Bit-pattern encoder
//!
//! Renders the exact storage representation of a simulated value:
//! two's-complement integers at the type's bit width, and IEEE-754
//! single/double precision floats split into their sign, exponent, and
//! mantissa fields. This is the one part of the simulator where bit-for-bit
//! correctness is a hard requirement, so floats go through `to_bits`
//! reinterpretation rather than any hand-rolled conversion.
//!
//! # Output Format
//!
//! - Integers: binary digits grouped into 8-bit bytes separated by a space,
//!   e.g. `00000000 00011110` for a 16-bit 30.
//! - Floats: `sign | exponent | mantissa`, e.g.
//!   `0 | 01111111 | 00000000000000000000000` for a 32-bit 1.0.
//! - Addresses: the integer encoder at 64 bits, unsigned.

use super::types::{BaseType, TypeDescriptor};

/// Encode `value` as a two's-complement bit pattern `bits` wide.
///
/// Negative signed values are encoded by adding `2^bits` before the base-2
/// conversion; unsigned targets take the raw low bits instead. The result is
/// grouped into 8-bit bytes separated by a single space.
pub fn encode_integer(value: i64, bits: u32, is_unsigned: bool) -> String {
    let mask = (1u128 << bits) - 1;
    let raw = if value < 0 && !is_unsigned {
        ((1u128 << bits) as i128 + i128::from(value)) as u128
    } else {
        value as u128 & mask
    };
    group_bits(raw, bits)
}

/// Encode a simulated 64-bit address (unsigned, zero-extended)
pub fn encode_address(address: u64) -> String {
    group_bits(u128::from(address), 64)
}

/// IEEE-754 single precision, split as `sign(1) | exponent(8) | mantissa(23)`
pub fn encode_f32(value: f32) -> String {
    let bits = value.to_bits();
    let sign = bits >> 31;
    let exponent = (bits >> 23) & 0xff;
    let mantissa = bits & 0x7f_ffff;
    format!("{} | {:08b} | {:023b}", sign, exponent, mantissa)
}

/// IEEE-754 double precision, split as `sign(1) | exponent(11) | mantissa(52)`
pub fn encode_f64(value: f64) -> String {
    let bits = value.to_bits();
    let sign = bits >> 63;
    let exponent = (bits >> 52) & 0x7ff;
    let mantissa = bits & 0xf_ffff_ffff_ffff;
    format!("{} | {:011b} | {:052b}", sign, exponent, mantissa)
}

/// Encode a textual value per its declared scalar type.
///
/// Pointers expect a `0x`-prefixed address and encode it at 64 bits.
/// Integer targets accept integer or fractional text (fractions truncate,
/// matching assignment semantics). Returns `None` when the text cannot be
/// interpreted numerically; callers degrade to a record without a bit
/// pattern.
pub fn encode_scalar(text: &str, ty: &TypeDescriptor) -> Option<String> {
    let text = text.trim();
    if ty.pointer_depth > 0 {
        return parse_address(text).map(encode_address);
    }
    match ty.base {
        BaseType::Float => text.parse::<f32>().ok().map(encode_f32),
        BaseType::Double => text.parse::<f64>().ok().map(encode_f64),
        BaseType::Char | BaseType::Short | BaseType::Int | BaseType::Long => {
            let value = parse_integer(text)?;
            Some(encode_integer(value, scalar_bits(&ty.base), ty.is_unsigned))
        }
        // Aggregates and void have no single scalar encoding
        BaseType::Void | BaseType::Struct(_) => None,
    }
}

/// Parse a `0x`-prefixed hexadecimal address
pub fn parse_address(text: &str) -> Option<u64> {
    let hex = text.trim().strip_prefix("0x")?;
    u64::from_str_radix(hex, 16).ok()
}

fn parse_integer(text: &str) -> Option<i64> {
    if let Ok(n) = text.parse::<i64>() {
        return Some(n);
    }
    // Fractional text stored into an integer target truncates
    text.parse::<f64>().ok().map(|f| f as i64)
}

fn scalar_bits(base: &BaseType) -> u32 {
    match base {
        BaseType::Char => 8,
        BaseType::Short => 16,
        BaseType::Int => 32,
        BaseType::Long => 64,
        _ => 32,
    }
}

fn group_bits(raw: u128, bits: u32) -> String {
    let mut out = String::with_capacity(bits as usize + bits as usize / 8);
    for i in (0..bits).rev() {
        out.push(if raw >> i & 1 == 1 { '1' } else { '0' });
        if i % 8 == 0 && i != 0 {
            out.push(' ');
        }
    }
    out
}
