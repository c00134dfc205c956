//! Checked `u64` arithmetic returning [`ArithmeticError`] instead of wrapping.

use crate::errors::ArithmeticError;

/// `lhs + rhs`, failing on overflow.
pub fn safe_add(lhs: u64, rhs: u64) -> Result<u64, ArithmeticError> {
    lhs.checked_add(rhs)
        .ok_or(ArithmeticError::AdditionOverflow { lhs, rhs })
}

/// `lhs - rhs`, failing on underflow.
pub fn safe_sub(lhs: u64, rhs: u64) -> Result<u64, ArithmeticError> {
    lhs.checked_sub(rhs)
        .ok_or(ArithmeticError::SubtractionUnderflow { lhs, rhs })
}

/// `lhs * rhs`, failing on overflow.
pub fn safe_mul(lhs: u64, rhs: u64) -> Result<u64, ArithmeticError> {
    lhs.checked_mul(rhs)
        .ok_or(ArithmeticError::MultiplicationOverflow { lhs, rhs })
}
