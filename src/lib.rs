//! # Introduction
//!
//! cexplain reads a block of C source text and explains it line by line,
//! maintaining a simulated process memory image as declarations and
//! assignments go by. Each explained line yields an
//! [`explainer::record::ExplanationRecord`]; lines that touch memory also
//! carry the symbol's synthetic address and the exact bit-level
//! representation of the stored value (two's-complement integers, IEEE-754
//! single/double floats).
//!
//! ## Analysis pipeline
//!
//! ```text
//! Source → Line filter → Classifier → Symbol table / Allocator
//!                                   → Bit-pattern encoder → Records
//! ```
//!
//! 1. [`explainer`] — ordered first-match-wins pattern dispatch over
//!    statement shapes, narrative assembly, and the analysis entry point.
//! 2. [`memory`] — the simulated memory model: type descriptors with fixed
//!    platform-independent sizes, a monotonic never-freeing allocator, and
//!    the bit-pattern encoder.
//!
//! ## What this is not
//!
//! There is no lexer, parser, or AST: the explainer matches one source line
//! (or a small fixed set of multi-line patterns) at a time, by design. It
//! does not execute code — loops and branches are narrated lexically — and
//! it never rejects input: unrecognized lines fall back to a generic
//! explanation.
//!
//! ## Determinism
//!
//! An analysis call resets its simulation context on entry, so identical
//! source text always produces identical records, synthetic addresses
//! included. That reproducibility is what makes the output usable for
//! teaching.

pub mod explainer;
pub mod memory;

pub use explainer::{explain_source, Explainer};
