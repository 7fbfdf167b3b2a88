//! Bit-span primitives for CRU/GRF registers.
//!
//! CRU and GRF configuration registers use the lock-protected half-word
//! convention: bits 0–15 hold the data, bits 16–31 are per-bit write-enable
//! companions. A low-half bit only latches if its enable bit is set in the
//! same write, so a read-modify-write never needs to preserve unrelated
//! fields explicitly — it only has to enable the span being changed.

/// Mask for a span of `msb - lsb + 1` bits (right-aligned).
#[must_use]
pub const fn span_mask(lsb: u8, msb: u8) -> u32 {
    let width = msb - lsb + 1;
    if width >= 32 {
        u32::MAX
    } else {
        (1 << width) - 1
    }
}

/// Extract bits `lsb..=msb` from `value`, right-aligned.
#[must_use]
pub const fn get_bits(value: u32, lsb: u8, msb: u8) -> u32 {
    (value >> lsb) & span_mask(lsb, msb)
}

/// Replace bits `lsb..=msb` of `orig` with `value` (masked to the span width).
#[must_use]
pub const fn set_bits(orig: u32, value: u32, lsb: u8, msb: u8) -> u32 {
    let mask = span_mask(lsb, msb);
    (orig & !(mask << lsb)) | ((value & mask) << lsb)
}

/// Compose the word actually written to a lock-protected register.
///
/// Low half: the new register value's bits 0–15 (the updated field plus any
/// neighbours that already live there). High half: the write-enable mask for
/// exactly the span being changed, so only those bits latch.
///
/// Only valid for fields wholly inside the low half-word (`msb <= 15`).
#[must_use]
pub const fn write_word(new_value: u32, lsb: u8, msb: u8) -> u32 {
    (new_value & 0xFFFF) | (span_mask(lsb, msb) << (lsb + 16))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_set_roundtrip() {
        // get_bits(set_bits(x, v, lsb, msb)) == v & mask for assorted spans
        let cases = [
            (0u32, 0x3FFu32, 0u8, 9u8),
            (0xFFFF_FFFF, 0x2A, 6, 8),
            (0xDEAD_BEEF, 1, 13, 13),
            (0x1234_5678, 0x1F, 1, 5),
            (0, 0xFFFF_FFFF, 0, 31),
        ];
        for (x, v, lsb, msb) in cases {
            let got = get_bits(set_bits(x, v, lsb, msb), lsb, msb);
            assert_eq!(got, v & span_mask(lsb, msb), "span {lsb}..={msb}");
        }
    }

    #[test]
    fn set_bits_preserves_neighbours() {
        // Writing the mux select span must not disturb the dividers beside it
        let orig = 0b1111_1111_1111_1111;
        let out = set_bits(orig, 0b10, 6, 7);
        assert_eq!(get_bits(out, 6, 7), 0b10);
        assert_eq!(get_bits(out, 0, 5), 0b11_1111);
        assert_eq!(get_bits(out, 8, 15), 0xFF);
    }

    #[test]
    fn write_word_places_enable_mask() {
        // 2-bit field at lsb=6: enables must be bits 22..=23
        let w = write_word(0b10 << 6, 6, 7);
        assert_eq!(w & 0xFFFF, 0b10 << 6);
        assert_eq!(w >> 16, 0b11 << 6);
    }

    #[test]
    fn write_word_single_bit() {
        let w = write_word(1 << 13, 13, 13);
        assert_eq!(w, (1 << 13) | (1 << 29));
    }
}
