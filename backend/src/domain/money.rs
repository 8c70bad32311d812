//! Conversions between decimal amounts and the integer cents stored in SQLite.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use super::error::{LedgerError, LedgerResult};

/// Largest single amount accepted: 1,000,000,000.00
pub const MAX_AMOUNT_CENTS: i64 = 100_000_000_000;

/// Convert a decimal amount to cents, rejecting sub-cent precision
pub fn to_cents(amount: Decimal) -> LedgerResult<i64> {
    if amount.normalize().scale() > 2 {
        return Err(LedgerError::validation(format!(
            "Amount {} has more than two decimal places",
            amount
        )));
    }

    amount
        .checked_mul(Decimal::ONE_HUNDRED)
        .and_then(|cents| cents.to_i64())
        .ok_or_else(|| LedgerError::validation(format!("Amount {} is out of range", amount)))
}

pub fn from_cents(cents: i64) -> Decimal {
    Decimal::new(cents, 2)
}

/// Validate a strictly positive amount (transactions, budgets)
pub fn positive_cents(amount: Decimal) -> LedgerResult<i64> {
    let cents = to_cents(amount)?;
    if cents <= 0 {
        return Err(LedgerError::validation("Amount must be greater than 0"));
    }
    if cents > MAX_AMOUNT_CENTS {
        return Err(LedgerError::validation("Amount exceeds the maximum of 1000000000.00"));
    }
    Ok(cents)
}

/// Validate a non-negative balance (account opening balance)
pub fn non_negative_cents(amount: Decimal) -> LedgerResult<i64> {
    let cents = to_cents(amount)?;
    if cents < 0 {
        return Err(LedgerError::validation("Balance cannot be negative"));
    }
    Ok(cents)
}

/// `part / whole` as a percentage rounded to two places; zero when `whole` is zero
pub fn percentage(part: Decimal, whole: Decimal) -> Decimal {
    if whole.is_zero() {
        return Decimal::ZERO;
    }
    (part / whole * Decimal::ONE_HUNDRED).round_dp(2)
}
