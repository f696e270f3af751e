use common::error::{HeError, HeResult};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Currency granularity of computed payments as a number of decimal places
const PAYMENT_SCALE: u32 = 2;

/// Compute the level monthly payment of a fixed-rate loan under standard amortization.
///
/// The annual percentage rate is first converted to a monthly decimal rate
/// `r = annual_rate_percent / 100 / 12`. With a zero rate the standard formula
/// `principal * r * (1 + r)^n / ((1 + r)^n - 1)` divides by zero, so that case is the exact
/// `principal / term_months` split instead. The result is rounded to [PAYMENT_SCALE] decimal
/// places.
///
/// Pure and deterministic, safe to invoke on every keystroke of a loan form.
/// # Errors
/// This function will return an error if `principal` is not positive, `annual_rate_percent` is
/// negative or `term_months` is zero
pub fn compute_monthly_payment(
    principal: Decimal,
    annual_rate_percent: Decimal,
    term_months: u32,
) -> HeResult<Decimal> {
    if principal <= Decimal::ZERO {
        return Err(HeError::InvalidLoanInput {
            field: "principal",
            reason: "must be greater than zero",
        });
    }
    if annual_rate_percent < Decimal::ZERO {
        return Err(HeError::InvalidLoanInput {
            field: "annual_rate_percent",
            reason: "must not be negative",
        });
    }
    if term_months == 0 {
        return Err(HeError::InvalidLoanInput {
            field: "term_months",
            reason: "must be greater than zero",
        });
    }

    let monthly_rate = annual_rate_percent / dec!(100) / dec!(12);
    if monthly_rate.is_zero() {
        return Ok((principal / Decimal::from(term_months)).round_dp(PAYMENT_SCALE));
    }

    let compound = power(Decimal::ONE + monthly_rate, term_months).ok_or(
        HeError::InvalidLoanInput {
            field: "term_months",
            reason: "compounds beyond representable amounts at this rate",
        },
    )?;
    let payment = principal * monthly_rate * compound / (compound - Decimal::ONE);
    Ok(payment.round_dp(PAYMENT_SCALE))
}

/// Raise `base` to the `exponent` power by squaring. Returns [None] if any intermediate product
/// overflows the [Decimal] range.
fn power(base: Decimal, exponent: u32) -> Option<Decimal> {
    let mut result = Decimal::ONE;
    let mut square = base;
    let mut remaining = exponent;
    while remaining > 0 {
        if remaining & 1 == 1 {
            result = result.checked_mul(square)?;
        }
        remaining >>= 1;
        if remaining > 0 {
            square = square.checked_mul(square)?;
        }
    }
    Some(result)
}

#[cfg(test)]
mod test {
    use common::error::HeError;
    use rstest::rstest;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    use super::compute_monthly_payment;

    #[rstest]
    #[case::twelve_even_months(dec!(1200), 12, dec!(100.00))]
    #[case::uneven_split(dec!(1000), 3, dec!(333.33))]
    #[case::single_month(dec!(500), 1, dec!(500.00))]
    fn compute_monthly_payment_should_split_principal_when_zero_rate(
        #[case] principal: Decimal,
        #[case] term_months: u32,
        #[case] expected: Decimal,
    ) {
        let payment = compute_monthly_payment(principal, dec!(0), term_months).unwrap();

        assert_eq!(payment, expected);
    }

    #[rstest]
    #[case::equipment_loan(dec!(20000), dec!(6.99), 36, dec!(617.45))]
    #[case::one_percent_monthly(dec!(100000), dec!(12), 12, dec!(8884.88))]
    #[case::mortgage_length(dec!(250000), dec!(5.25), 360, dec!(1380.51))]
    #[case::mid_size(dec!(15000), dec!(8.5), 48, dec!(369.72))]
    fn compute_monthly_payment_should_match_standard_formula(
        #[case] principal: Decimal,
        #[case] annual_rate_percent: Decimal,
        #[case] term_months: u32,
        #[case] expected: Decimal,
    ) {
        let payment =
            compute_monthly_payment(principal, annual_rate_percent, term_months).unwrap();

        assert!(
            (payment - expected).abs() <= dec!(0.01),
            "payment {payment} deviates from {expected} by more than a cent"
        );
    }

    #[rstest]
    #[case::negative_principal(dec!(-100), dec!(5), 12)]
    #[case::zero_principal(dec!(0), dec!(5), 12)]
    #[case::negative_rate(dec!(100), dec!(-5), 12)]
    #[case::zero_term(dec!(100), dec!(5), 0)]
    fn compute_monthly_payment_should_fail_when_invalid_input(
        #[case] principal: Decimal,
        #[case] annual_rate_percent: Decimal,
        #[case] term_months: u32,
    ) {
        let result = compute_monthly_payment(principal, annual_rate_percent, term_months);

        assert!(matches!(result, Err(HeError::InvalidLoanInput { .. })));
    }

    #[rstest]
    #[case::zero_rate(dec!(1200), dec!(0), 12)]
    #[case::equipment_loan(dec!(20000), dec!(6.99), 36)]
    #[case::mortgage_length(dec!(250000), dec!(5.25), 360)]
    fn compute_monthly_payment_should_cover_principal_over_term(
        #[case] principal: Decimal,
        #[case] annual_rate_percent: Decimal,
        #[case] term_months: u32,
    ) {
        let payment =
            compute_monthly_payment(principal, annual_rate_percent, term_months).unwrap();

        assert!(
            payment * Decimal::from(term_months) >= principal,
            "total paid {} is below the principal {principal}",
            payment * Decimal::from(term_months)
        );
    }

    #[test]
    fn compute_monthly_payment_should_be_deterministic() {
        let first = compute_monthly_payment(dec!(20000), dec!(6.99), 36).unwrap();
        let second = compute_monthly_payment(dec!(20000), dec!(6.99), 36).unwrap();

        assert_eq!(first, second);
    }
}
