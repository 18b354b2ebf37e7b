use rust_decimal::Decimal;
use rust_decimal::MathematicalOps;
use rust_decimal_macros::dec;

use crate::types::{Money, Percent};

const MONTHS_PER_YEAR: u32 = 12;

/// Convert a whole-number annual percentage into a monthly periodic rate.
pub fn monthly_rate(annual_rate: Percent) -> Decimal {
    annual_rate / dec!(100) / dec!(12)
}

/// Number of monthly payments in a loan term, saturating on absurd terms.
pub fn payment_count(term_years: u32) -> u32 {
    term_years.saturating_mul(MONTHS_PER_YEAR)
}

/// Fixed monthly payment of a fully amortising loan.
///
/// Evaluates `P * r(1+r)^n / ((1+r)^n - 1)` in the equivalent form
/// `P * r / (1 - (1+r)^-n)`, which stays inside the decimal range for long
/// terms and high rates. Degenerate inputs resolve to the formula's limits:
///
/// * `principal <= 0` or a zero-year term: no debt service, `0`
/// * `r = 0`: straight-line amortisation, `P / n`
/// * `(1+r)^n` beyond the decimal range: interest-only limit, `P * r`
/// * `(1+r)^n` collapsing to zero (rate at or below -100%): `0`
pub fn monthly_payment(principal: Money, annual_rate: Percent, term_years: u32) -> Money {
    if principal <= Decimal::ZERO {
        return Decimal::ZERO;
    }

    let periods = payment_count(term_years);
    if periods == 0 {
        return Decimal::ZERO;
    }
    let n = Decimal::from(periods);

    let rate = monthly_rate(annual_rate);
    if rate.is_zero() {
        return principal / n;
    }

    let compound = match (Decimal::ONE + rate).checked_powi(i64::from(periods)) {
        Some(c) => c,
        None => {
            log::debug!("compound factor overflow over {periods} periods, using interest-only limit");
            return principal.saturating_mul(rate);
        }
    };

    let discount = match Decimal::ONE.checked_div(compound) {
        Some(d) => d,
        None => return Decimal::ZERO,
    };

    let denominator = Decimal::ONE - discount;
    if denominator.is_zero() {
        // Rate too small to register over n periods
        return principal / n;
    }

    saturating_div(principal.saturating_mul(rate), denominator)
}

/// Value gained by compounding `base` at `annual_rate` for `years`:
/// `base * (1 + g)^years - base`. Saturates at `Decimal::MAX` magnitude.
pub fn compound_appreciation(base: Money, annual_rate: Percent, years: u32) -> Money {
    let growth = Decimal::ONE + annual_rate / dec!(100);
    let grown = growth
        .checked_powi(i64::from(years))
        .and_then(|factor| base.checked_mul(factor));

    match grown {
        Some(value) => value.saturating_sub(base),
        None => {
            log::warn!("appreciation of {base} at {annual_rate}% over {years} years overflows");
            let factor_negative = growth.is_sign_negative() && years % 2 == 1;
            saturated(base.is_sign_negative() != factor_negative)
        }
    }
}

/// `numerator / denominator`, clamped to `Decimal::MAX` magnitude when the
/// quotient leaves the decimal range. Zero denominators give `0`.
pub fn saturating_div(numerator: Decimal, denominator: Decimal) -> Decimal {
    if denominator.is_zero() {
        return Decimal::ZERO;
    }
    numerator.checked_div(denominator).unwrap_or_else(|| {
        saturated(numerator.is_sign_negative() != denominator.is_sign_negative())
    })
}

/// `numerator / denominator` as a whole-number percentage, with the same
/// zero and overflow handling as `saturating_div`.
pub fn saturating_percent(numerator: Decimal, denominator: Decimal) -> Percent {
    saturating_div(numerator, denominator).saturating_mul(dec!(100))
}

/// True when a value sits at the edge of the decimal range.
pub fn is_saturated(value: Decimal) -> bool {
    value == Decimal::MAX || value == Decimal::MIN
}

fn saturated(negative: bool) -> Decimal {
    if negative {
        Decimal::MIN
    } else {
        Decimal::MAX
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_monthly_rate() {
        assert_eq!(monthly_rate(dec!(6)), dec!(0.005));
    }

    #[test]
    fn test_monthly_payment_standard_30_year() {
        let payment = monthly_payment(dec!(400000), dec!(6.5), 30);
        assert!(
            (payment - dec!(2528.27)).abs() < dec!(0.01),
            "payment {payment} not ~2528.27"
        );
    }

    #[test]
    fn test_monthly_payment_sanity_range() {
        // $750k at 6.5% over 30 years, expected ~$4,740/mo
        let payment = monthly_payment(dec!(750000), dec!(6.5), 30);
        assert!(
            payment > dec!(4700) && payment < dec!(4800),
            "Monthly payment {} outside expected range",
            payment
        );
    }

    #[test]
    fn test_zero_rate_is_straight_line() {
        assert_eq!(monthly_payment(dec!(120000), Decimal::ZERO, 10), dec!(1000));
        assert_eq!(monthly_payment(dec!(360000), Decimal::ZERO, 30), dec!(1000));
    }

    #[test]
    fn test_no_principal_no_payment() {
        assert_eq!(monthly_payment(Decimal::ZERO, dec!(7), 30), Decimal::ZERO);
        assert_eq!(monthly_payment(dec!(-5000), dec!(7), 30), Decimal::ZERO);
    }

    #[test]
    fn test_zero_term_no_payment() {
        assert_eq!(monthly_payment(dec!(100000), dec!(5), 0), Decimal::ZERO);
        assert_eq!(monthly_payment(dec!(100000), Decimal::ZERO, 0), Decimal::ZERO);
    }

    #[test]
    fn test_extreme_rate_falls_back_to_interest_only() {
        // 1000%/yr over 30 years overflows (1+r)^n; payment approaches P*r
        let payment = monthly_payment(dec!(100000), dec!(1000), 30);
        let interest_only = dec!(100000) * monthly_rate(dec!(1000));
        assert!((payment - interest_only).abs() < dec!(0.01));
    }

    #[test]
    fn test_tiny_rate_close_to_straight_line() {
        let payment = monthly_payment(dec!(120000), dec!(0.0000001), 10);
        assert!((payment - dec!(1000)).abs() < dec!(0.01));
    }

    #[test]
    fn test_huge_principal_saturates_instead_of_panicking() {
        // Interest-only limit P * r with r = 2 per month
        assert_eq!(monthly_payment(Decimal::MAX, dec!(2400), 30), Decimal::MAX);
        let payment = monthly_payment(Decimal::MAX, dec!(6.5), 30);
        assert!(payment > Decimal::ZERO);
    }

    #[test]
    fn test_saturating_div() {
        assert_eq!(saturating_div(dec!(10), dec!(4)), dec!(2.5));
        assert_eq!(saturating_div(dec!(10), Decimal::ZERO), Decimal::ZERO);
        assert_eq!(saturating_div(Decimal::MAX, dec!(0.5)), Decimal::MAX);
        assert_eq!(saturating_div(Decimal::MAX, dec!(-0.5)), Decimal::MIN);
        assert_eq!(saturating_percent(dec!(1), dec!(8)), dec!(12.5));
        assert!(is_saturated(saturating_percent(Decimal::MIN, dec!(0.1))));
    }

    #[test]
    fn test_appreciation_overflow_saturates() {
        assert_eq!(compound_appreciation(Decimal::MAX, dec!(50), 10), Decimal::MAX);
        // Value cannot fall further than the decimal range allows
        assert_eq!(
            compound_appreciation(Decimal::MAX, dec!(-300), 5),
            Decimal::MIN
        );
    }

    #[test]
    fn test_compound_appreciation() {
        // 100k at 10% for 2 years: 121k - 100k
        assert_eq!(compound_appreciation(dec!(100000), dec!(10), 2), dec!(21000));
        assert_eq!(compound_appreciation(dec!(300000), Decimal::ZERO, 10), Decimal::ZERO);
    }
}
