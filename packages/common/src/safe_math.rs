//! Checked arithmetic over non-negative integers.
//!
//! Every bridge amount computation (fees, tax, custody balances) goes through
//! these helpers so that a negative operand or an out-of-range result aborts the
//! operation instead of wrapping.

use cosmwasm_std::Uint128;
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq, Clone, Copy)]
pub enum MathError {
    #[error("SafeMath: negative operand")]
    NegativeOperand,

    #[error("SafeMath: overflow")]
    Overflow,

    #[error("SafeMath: subtraction underflow")]
    Underflow,

    #[error("SafeMath: division by zero")]
    DivideByZero,
}

fn ensure_non_negative(a: i128, b: i128) -> Result<(), MathError> {
    if a < 0 || b < 0 {
        return Err(MathError::NegativeOperand);
    }
    Ok(())
}

pub fn add(a: i128, b: i128) -> Result<i128, MathError> {
    ensure_non_negative(a, b)?;
    let c = a.checked_add(b).ok_or(MathError::Overflow)?;
    if c < a || c < b {
        return Err(MathError::Overflow);
    }
    Ok(c)
}

pub fn sub(a: i128, b: i128) -> Result<i128, MathError> {
    ensure_non_negative(a, b)?;
    if b > a {
        return Err(MathError::Underflow);
    }
    Ok(a - b)
}

/// Multiplication. A zero left operand returns zero before any other check.
pub fn mul(a: i128, b: i128) -> Result<i128, MathError> {
    if a == 0 {
        return Ok(0);
    }
    ensure_non_negative(a, b)?;
    let c = a.checked_mul(b).ok_or(MathError::Overflow)?;
    if c / a != b {
        return Err(MathError::Overflow);
    }
    Ok(c)
}

pub fn div(a: i128, b: i128) -> Result<i128, MathError> {
    ensure_non_negative(a, b)?;
    if b == 0 {
        return Err(MathError::DivideByZero);
    }
    Ok(a / b)
}

pub fn modulo(a: i128, b: i128) -> Result<i128, MathError> {
    ensure_non_negative(a, b)?;
    if b == 0 {
        return Err(MathError::DivideByZero);
    }
    Ok(a % b)
}

// ============================================================================
// Uint128 helpers
// ============================================================================

fn to_signed(value: Uint128) -> Result<i128, MathError> {
    i128::try_from(value.u128()).map_err(|_| MathError::Overflow)
}

fn to_unsigned(value: i128) -> Result<Uint128, MathError> {
    u128::try_from(value)
        .map(Uint128::new)
        .map_err(|_| MathError::NegativeOperand)
}

pub fn add_u128(a: Uint128, b: Uint128) -> Result<Uint128, MathError> {
    to_unsigned(add(to_signed(a)?, to_signed(b)?)?)
}

pub fn sub_u128(a: Uint128, b: Uint128) -> Result<Uint128, MathError> {
    to_unsigned(sub(to_signed(a)?, to_signed(b)?)?)
}

pub fn mul_u128(a: Uint128, b: Uint128) -> Result<Uint128, MathError> {
    to_unsigned(mul(to_signed(a)?, to_signed(b)?)?)
}

pub fn div_u128(a: Uint128, b: Uint128) -> Result<Uint128, MathError> {
    to_unsigned(div(to_signed(a)?, to_signed(b)?)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sub_boundaries() {
        assert_eq!(sub(5, 5), Ok(0));
        assert_eq!(sub(5, 6), Err(MathError::Underflow));
    }

    #[test]
    fn test_mul_zero_short_circuits() {
        assert_eq!(mul(0, i128::MAX), Ok(0));
        // Zero left operand skips the sign check as well
        assert_eq!(mul(0, -7), Ok(0));
        assert_eq!(mul(-1, 0), Err(MathError::NegativeOperand));
    }

    #[test]
    fn test_mul_overflow() {
        assert_eq!(mul(i128::MAX, 2), Err(MathError::Overflow));
        assert_eq!(mul(3, 7), Ok(21));
    }

    #[test]
    fn test_add_overflow() {
        assert_eq!(add(i128::MAX, 1), Err(MathError::Overflow));
        assert_eq!(add(2, 3), Ok(5));
    }

    #[test]
    fn test_div_and_mod_by_zero() {
        assert_eq!(div(4, 0), Err(MathError::DivideByZero));
        assert_eq!(modulo(4, 0), Err(MathError::DivideByZero));
        assert_eq!(div(7, 2), Ok(3));
        assert_eq!(modulo(7, 2), Ok(1));
    }

    #[test]
    fn test_negative_operands_rejected() {
        assert_eq!(add(-1, 1), Err(MathError::NegativeOperand));
        assert_eq!(sub(1, -1), Err(MathError::NegativeOperand));
        assert_eq!(mul(2, -1), Err(MathError::NegativeOperand));
        assert_eq!(div(-4, 2), Err(MathError::NegativeOperand));
        assert_eq!(modulo(4, -2), Err(MathError::NegativeOperand));
    }

    #[test]
    fn test_uint128_out_of_signed_range() {
        assert_eq!(
            add_u128(Uint128::MAX, Uint128::one()),
            Err(MathError::Overflow)
        );
        assert_eq!(
            sub_u128(Uint128::new(10), Uint128::new(4)),
            Ok(Uint128::new(6))
        );
    }
}
