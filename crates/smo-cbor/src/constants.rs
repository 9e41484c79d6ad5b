// Major types (high three bits of the initial byte).
pub const MAJOR_UNSIGNED: u8 = 0;
pub const MAJOR_NEGATIVE: u8 = 1;
pub const MAJOR_BYTES: u8 = 2;
pub const MAJOR_TEXT: u8 = 3;
pub const MAJOR_ARRAY: u8 = 4;
pub const MAJOR_MAP: u8 = 5;
pub const MAJOR_TAG: u8 = 6;
pub const MAJOR_SIMPLE: u8 = 7;

// Additional information values.
pub const INFO_U8: u8 = 24;
pub const INFO_U16: u8 = 25;
pub const INFO_U32: u8 = 26;
pub const INFO_U64: u8 = 27;
pub const INFO_INDEFINITE: u8 = 31;

// Simple values and floats (major type 7). The named simple values come
// from `ciborium_ll::simple`.
pub const SIMPLE_EXTENDED: u8 = 24;
pub const FLOAT_16: u8 = 25;
pub const FLOAT_32: u8 = 26;
pub const FLOAT_64: u8 = 27;

pub const BREAK: u8 = 0xff;

/// Standard date/time tag with an epoch-based numeric payload.
pub const TAG_EPOCH_DATE: u64 = 1;

/// Recursion limit for nested arrays, maps and tags.
pub const MAX_DEPTH: usize = 256;
