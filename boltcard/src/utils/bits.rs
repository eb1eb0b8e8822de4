//! Bit-level helpers for the packed file-settings and capability layouts.

/// Largest value representable in a 3-byte field.
pub const U24_MAX: u32 = 0x00ff_ffff;

/// Test bit `index` (0 = least significant).
pub fn bit_lsb(byte: u8, index: u8) -> bool {
    byte & (1 << index) != 0
}

/// Byte with only bit `index` set when `flag` holds.
pub fn flag_bit(flag: bool, index: u8) -> u8 {
    if flag { 1 << index } else { 0 }
}

/// High nibble.
pub fn left_nibble(byte: u8) -> u8 {
    byte >> 4
}

/// Low nibble.
pub fn right_nibble(byte: u8) -> u8 {
    byte & 0x0f
}

/// Pack two nibbles into a byte.
pub fn nibbles(left: u8, right: u8) -> u8 {
    (left & 0x0f) << 4 | (right & 0x0f)
}

/// Read a 3-byte little-endian integer.
pub fn le_u24(bytes: [u8; 3]) -> u32 {
    u32::from_le_bytes([bytes[0], bytes[1], bytes[2], 0])
}

/// Encode a value as 3 little-endian bytes; `None` when it does not fit.
pub fn u24_le(value: u32) -> Option<[u8; 3]> {
    if value > U24_MAX {
        return None;
    }
    let b = value.to_le_bytes();
    Some([b[0], b[1], b[2]])
}
