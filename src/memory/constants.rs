// Constants for the memory simulator

/// Base address of the simulated address space.
/// Every analysis run resets the allocation counter to this value, so
/// identical source text always yields identical addresses.
pub const ADDRESS_BASE: u64 = 0x7fff_0000;

/// Pointer width in bytes. Fixed, not platform-derived.
pub const POINTER_SIZE: usize = 8;

/// Fallback size for types the resolver does not recognize.
pub const DEFAULT_TYPE_SIZE: usize = 4;
