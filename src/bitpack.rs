//! Bit-aligned field extraction and insertion on a 64-bit container.
//!
//! These are pure functions with no dependency on the rest of the crate;
//! the decoder (`crate::decode`) is the only other module that calls them.
//! Shifts by exactly 64 positions are handled explicitly, since Rust's
//! native `<<`/`>>` operators do not define full-width shift behaviour.

use crate::error::BitpackError;

const WORD_LEN: u32 = 64;

/// True iff `n` can be represented in `width` bits, unsigned.
pub fn fits_unsigned(n: u64, width: u32) -> bool {
    if width == 0 {
        return false;
    }
    if width >= WORD_LEN {
        return true;
    }
    n < (1u64 << width)
}

/// True iff `n` can be represented in `width` bits, signed two's complement.
pub fn fits_signed(n: i64, width: u32) -> bool {
    if width == 0 {
        return false;
    }
    if width >= WORD_LEN {
        return true;
    }
    let pos_limit = (1i64 << (width - 1)) - 1;
    let neg_limit = -(1i64 << (width - 1));
    n >= neg_limit && n <= pos_limit
}

/// Extracts the `width`-bit field whose least significant bit sits at
/// `lsb`, zero-extended. `width == 0` returns 0.
pub fn get_unsigned(word: u64, width: u32, lsb: u32) -> Result<u64, BitpackError> {
    check_geometry(width, lsb)?;
    if width == 0 {
        return Ok(0);
    }
    let distance_to_msb = WORD_LEN - (lsb + width);
    Ok(shift_right_logical(shift_left(word, distance_to_msb), lsb + distance_to_msb))
}

/// Extracts the `width`-bit field whose least significant bit sits at
/// `lsb`, sign-extended from bit `lsb + width - 1`. `width == 0` returns 0.
pub fn get_signed(word: u64, width: u32, lsb: u32) -> Result<i64, BitpackError> {
    check_geometry(width, lsb)?;
    if width == 0 {
        return Ok(0);
    }
    let distance_to_msb = WORD_LEN - (lsb + width);
    let signed_word = shift_left(word, distance_to_msb) as i64;
    Ok(shift_right_arithmetic(signed_word, lsb + distance_to_msb))
}

/// Returns a copy of `word` with the named field replaced by `value`.
pub fn new_unsigned(word: u64, width: u32, lsb: u32, value: u64) -> Result<u64, BitpackError> {
    check_geometry(width, lsb)?;
    if !fits_unsigned(value, width) {
        return Err(BitpackError::Overflow { value: value as i64, width });
    }
    let mask = shift_left(mask_of_width(width), lsb);
    let cleared = word & !mask;
    Ok(cleared | shift_left(value, lsb))
}

/// Returns a copy of `word` with the named field replaced by `value`.
pub fn new_signed(word: u64, width: u32, lsb: u32, value: i64) -> Result<u64, BitpackError> {
    check_geometry(width, lsb)?;
    if !fits_signed(value, width) {
        return Err(BitpackError::Overflow { value, width });
    }
    let mask = shift_left(mask_of_width(width), lsb);
    let cleared = word & !mask;
    let placed = (shift_left(value as u64, lsb)) & mask;
    Ok(cleared | placed)
}

fn check_geometry(width: u32, lsb: u32) -> Result<(), BitpackError> {
    if width > WORD_LEN || width + lsb > WORD_LEN {
        return Err(BitpackError::InvalidWidth { width, lsb });
    }
    Ok(())
}

fn mask_of_width(width: u32) -> u64 {
    match width {
        0 => 0,
        WORD_LEN => u64::MAX,
        _ => shift_left(1, width) - 1,
    }
}

fn shift_left(word: u64, shift: u32) -> u64 {
    if shift >= WORD_LEN {
        0
    } else {
        word << shift
    }
}

fn shift_right_logical(word: u64, shift: u32) -> u64 {
    if shift >= WORD_LEN {
        0
    } else {
        word >> shift
    }
}

fn shift_right_arithmetic(word: i64, shift: u32) -> i64 {
    if shift >= WORD_LEN {
        if word < 0 {
            -1
        } else {
            0
        }
    } else {
        word >> shift
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fits_unsigned_rejects_width_zero() {
        assert!(!fits_unsigned(0, 0));
    }

    #[test]
    fn fits_unsigned_boundary() {
        assert!(fits_unsigned(255, 8));
        assert!(!fits_unsigned(256, 8));
    }

    #[test]
    fn fits_signed_width_zero_rejected_width_one_accepted() {
        // Preserves the original reference implementation's asymmetry:
        // width=0 is always rejected, but width=1 legally represents {-1, 0}.
        assert!(!fits_signed(0, 0));
        assert!(fits_signed(0, 1));
        assert!(fits_signed(-1, 1));
        assert!(!fits_signed(1, 1));
    }

    #[test]
    fn get_unsigned_round_trips_through_new_unsigned() {
        let w = new_unsigned(0, 8, 4, 0xAB).unwrap();
        assert_eq!(get_unsigned(w, 8, 4).unwrap(), 0xAB);
    }

    #[test]
    fn get_signed_sign_extends() {
        // a 4-bit field holding 0b1111 (== -1 in two's complement)
        let w = new_unsigned(0, 4, 0, 0b1111).unwrap();
        assert_eq!(get_signed(w, 4, 0).unwrap(), -1);
    }

    #[test]
    fn width_zero_reads_as_zero() {
        assert_eq!(get_unsigned(u64::MAX, 0, 0).unwrap(), 0);
        assert_eq!(get_signed(u64::MAX, 0, 0).unwrap(), 0);
    }

    #[test]
    fn invalid_geometry_is_rejected() {
        assert!(matches!(
            get_unsigned(0, 65, 0),
            Err(BitpackError::InvalidWidth { .. })
        ));
        assert!(matches!(
            get_unsigned(0, 32, 40),
            Err(BitpackError::InvalidWidth { .. })
        ));
    }

    #[test]
    fn overflow_on_write_is_reported() {
        assert!(matches!(
            new_unsigned(0, 4, 0, 16),
            Err(BitpackError::Overflow { .. })
        ));
        assert!(matches!(
            new_signed(0, 4, 0, 8),
            Err(BitpackError::Overflow { .. })
        ));
    }

    #[test]
    fn full_width_field_is_legal() {
        assert!(fits_unsigned(u64::MAX, 64));
        assert_eq!(new_unsigned(0, 64, 0, u64::MAX).unwrap(), u64::MAX);
        assert_eq!(get_unsigned(u64::MAX, 64, 0).unwrap(), u64::MAX);
    }
}
