//! Wire tag constants for the Condensed format.
//!
//! Every value starts with one tag byte whose high bits identify the kind.
//! Multi-byte integers and floats are little-endian; the rare-shape index
//! is the one big-endian field.

pub const HALF_PRECISION_FLOAT: u8 = 0b1000_0000;
pub const SHORT_STRING: u8 = 0b0110_0000;
pub const RESERVED_1: u8 = 0b0111_1110;
pub const LONG_STRING: u8 = 0b0111_1111;
pub const MINIMAL_INTEGER: u8 = 0b0100_0000;
pub const COMMON_OBJECT: u8 = 0b0011_1000;
pub const RESERVED_2: u8 = 0b0011_1101;
pub const UNCOMMON_OBJECT: u8 = 0b0011_1110;
pub const RARE_OBJECT: u8 = 0b0011_1111;
pub const SMALL_UNIQUE_OBJECT: u8 = 0b0011_0000;
pub const LARGE_UNIQUE_OBJECT: u8 = 0b0011_0110;
pub const HASHTABLE: u8 = 0b0011_0111;
pub const SHORT_ARRAY: u8 = 0b0010_0000;
pub const LONG_ARRAY: u8 = 0b0010_1111;
pub const VERY_SHORT_INTEGER: u8 = 0b0001_0000;
pub const DOUBLE: u8 = 0x0f;
pub const FLOAT: u8 = 0x0e;
pub const SIGNED_LONG_INTEGER: u8 = 0x0d;
pub const UNSIGNED_LONG_INTEGER: u8 = 0x0c;
pub const SIGNED_INTEGER: u8 = 0x0b;
pub const UNSIGNED_INTEGER: u8 = 0x0a;
pub const SIGNED_SHORT_INTEGER: u8 = 0x09;
pub const UNSIGNED_SHORT_INTEGER: u8 = 0x08;
pub const RESERVED_4: u8 = 0x04;
pub const TRUE: u8 = 0x03;
pub const FALSE: u8 = 0x02;
pub const NIL: u8 = 0x01;
pub const TERMINATOR: u8 = 0x00;

/// Longest string the 5-bit length field carries.
pub const MAX_SHORT_STRING_LEN: usize = 29;
/// Longest array the 4-bit length field carries.
pub const MAX_SHORT_ARRAY_LEN: usize = 14;
/// Largest field count the small-unique tag carries.
pub const MAX_SMALL_UNIQUE_OBJECT_FIELDS: usize = 5;

/// Top of the one-byte common-shape band.
pub const MAX_COMMON_OBJECT_ID: usize = 5;
/// Top of the two-byte uncommon-shape band.
pub const MAX_UNCOMMON_OBJECT_ID: usize = 261;
/// Top of the three-byte rare-shape band; shapes past it go inline.
pub const MAX_RARE_OBJECT_ID: usize = 65797;
/// First index carried by the UNCOMMON_OBJECT payload byte.
pub const UNCOMMON_INDEX_BASE: usize = 6;
/// First index carried by the RARE_OBJECT payload word.
pub const RARE_INDEX_BASE: usize = 262;

/// `COMMON_OBJECT | 5` is the same byte as RESERVED_2, so index 5 is never
/// assigned to a shape.
pub const RESERVED_SHAPE_INDEX: usize = 5;

/// Marks the last byte of each key inside a shape key; a lone `0x80` is an
/// empty key.
pub const KEY_FINAL_BIT: u8 = 0x80;
