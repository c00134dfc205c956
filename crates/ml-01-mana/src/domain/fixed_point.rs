//! # 32-bit Fixed-Point Multiplication
//!
//! Mana values are multiplied by 32-bit factors and rescaled by powers of
//! two. The value is carried as two 32-bit halves in `u64` registers so that
//! no intermediate product needs more than 64 bits.
//!
//! All operations wrap. The results are consensus critical and must match the
//! reference two's-complement arithmetic bit for bit.

const LOWER_32: u64 = 0xFFFF_FFFF;

/// Splits `value` into its upper and lower 32 bits.
#[inline]
pub fn split_u64(value: u64) -> (u64, u64) {
    (value >> 32, value & LOWER_32)
}

/// Inverse of [`split_u64`].
#[inline]
pub fn merge_u64(hi: u64, lo: u64) -> u64 {
    hi.wrapping_shl(32) | lo
}

/// Computes `(hi * 2^32 + lo) * factor / 2^scale` on split halves.
///
/// `factor` must fit in 32 bits and `scale` must be at most 32.
#[inline]
pub fn fixed_point_multiplication32_splitted(hi: u64, lo: u64, factor: u64, scale: u32) -> (u64, u64) {
    let hi = hi.wrapping_mul(factor);
    let carry_mask = 1u64.wrapping_shl(scale).wrapping_sub(1);
    let lo = ((hi & carry_mask).wrapping_shl(32 - scale))
        .wrapping_add(lo.wrapping_mul(factor).wrapping_shr(scale));
    let hi = hi.wrapping_shr(scale).wrapping_add(lo >> 32);
    (hi, lo & LOWER_32)
}

/// Computes `value * factor / 2^scale`, rounding down.
///
/// Scales above 32 run the split multiply at 32 and shift the rest.
pub fn fixed_point_multiplication32(value: u64, factor: u64, scale: u32) -> u64 {
    if scale <= 32 {
        let (hi, lo) = split_u64(value);
        let (hi, lo) = fixed_point_multiplication32_splitted(hi, lo, factor, scale);
        return merge_u64(hi, lo);
    }

    let (hi, lo) = split_u64(value);
    let (hi, lo) = fixed_point_multiplication32_splitted(hi, lo, factor, 32);
    merge_u64(hi, lo).wrapping_shr(scale - 32)
}
