//! Rounding policy
//!
//! Every rounded field goes through one of these helpers so the policy is
//! applied at exactly one point per field:
//!
//! - currency amounts: nearest whole unit, halves away from zero
//! - percentages: two decimals, halves away from zero
//! - payback: whole months, rounded up, never below one
//!
//! `4687.5` therefore becomes `4688`.

/// Round a currency amount to the nearest whole unit
pub fn round_currency(amount: f64) -> f64 {
    amount.round()
}

/// Round a percentage to two decimal places
pub fn round_percent(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Months needed for `monthly_return` to recover `investment`
///
/// Returns `None` when the monthly return is zero or negative, i.e. the
/// investment is not recoverable.
pub fn payback_months(investment: f64, monthly_return: f64) -> Option<u32> {
    if monthly_return.is_nan() || monthly_return <= 0.0 || !investment.is_finite() {
        return None;
    }
    let months = (investment / monthly_return).ceil().max(1.0);
    if months > u32::MAX as f64 {
        return None;
    }
    Some(months as u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_currency_half_away_from_zero() {
        assert_eq!(round_currency(4687.5), 4688.0);
        assert_eq!(round_currency(4687.49), 4687.0);
        assert_eq!(round_currency(-2.5), -3.0);
    }

    #[test]
    fn test_round_percent_two_decimals() {
        assert_eq!(round_percent(225.0), 225.0);
        assert_eq!(round_percent(18.756), 18.76);
        assert_eq!(round_percent(-1.234), -1.23);
    }

    #[test]
    fn test_payback_months() {
        assert_eq!(payback_months(25_000.0, 4688.0), Some(6));
        assert_eq!(payback_months(1000.0, 1000.0), Some(1));
        // Returns larger than the investment still take a month
        assert_eq!(payback_months(1000.0, 50_000.0), Some(1));
    }

    #[test]
    fn test_payback_not_recoverable() {
        assert_eq!(payback_months(25_000.0, 0.0), None);
        assert_eq!(payback_months(25_000.0, -120.0), None);
        assert_eq!(payback_months(25_000.0, f64::NAN), None);
    }
}
