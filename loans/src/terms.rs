use common::error::HeResult;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::amortization::compute_monthly_payment;

/// Terms of a loan as edited during a loan application flow. The `monthly_payment` is always
/// derived from the other three fields; mutating any input recomputes it and a rejected input
/// leaves the terms untouched. Lives only for the duration of a UI flow and is never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanTerms {
    /// Amount borrowed
    principal: Decimal,
    /// Annual interest rate as a percentage, e.g. 6.99 for a 6.99% APR
    annual_rate_percent: Decimal,
    /// Number of monthly payments over the life of the loan
    term_months: u32,
    /// Level monthly payment derived from the fields above
    monthly_payment: Decimal,
}

impl LoanTerms {
    /// Create loan terms with the monthly payment computed from the inputs
    /// # Errors
    /// This function will return an error if the inputs are rejected by
    /// [compute_monthly_payment]
    pub fn new(
        principal: Decimal,
        annual_rate_percent: Decimal,
        term_months: u32,
    ) -> HeResult<Self> {
        let monthly_payment =
            compute_monthly_payment(principal, annual_rate_percent, term_months)?;
        Ok(Self {
            principal,
            annual_rate_percent,
            term_months,
            monthly_payment,
        })
    }

    /// Replace the principal, recomputing the monthly payment
    /// # Errors
    /// This function will return an error if the new `principal` is rejected by
    /// [compute_monthly_payment]
    pub fn set_principal(&mut self, principal: Decimal) -> HeResult<()> {
        self.monthly_payment =
            compute_monthly_payment(principal, self.annual_rate_percent, self.term_months)?;
        self.principal = principal;
        Ok(())
    }

    /// Replace the annual rate, recomputing the monthly payment
    /// # Errors
    /// This function will return an error if the new `annual_rate_percent` is rejected by
    /// [compute_monthly_payment]
    pub fn set_annual_rate_percent(&mut self, annual_rate_percent: Decimal) -> HeResult<()> {
        self.monthly_payment =
            compute_monthly_payment(self.principal, annual_rate_percent, self.term_months)?;
        self.annual_rate_percent = annual_rate_percent;
        Ok(())
    }

    /// Replace the term length, recomputing the monthly payment
    /// # Errors
    /// This function will return an error if the new `term_months` is rejected by
    /// [compute_monthly_payment]
    pub fn set_term_months(&mut self, term_months: u32) -> HeResult<()> {
        self.monthly_payment =
            compute_monthly_payment(self.principal, self.annual_rate_percent, term_months)?;
        self.term_months = term_months;
        Ok(())
    }

    /// Returns the amount borrowed
    pub const fn principal(&self) -> Decimal {
        self.principal
    }

    /// Returns the annual interest rate percentage
    pub const fn annual_rate_percent(&self) -> Decimal {
        self.annual_rate_percent
    }

    /// Returns the number of monthly payments
    pub const fn term_months(&self) -> u32 {
        self.term_months
    }

    /// Returns the derived level monthly payment
    pub const fn monthly_payment(&self) -> Decimal {
        self.monthly_payment
    }
}

#[cfg(test)]
mod test {
    use rstest::rstest;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    use super::LoanTerms;

    #[test]
    fn new_should_derive_monthly_payment() {
        let terms = LoanTerms::new(dec!(1200), dec!(0), 12).unwrap();

        assert_eq!(terms.monthly_payment(), dec!(100.00));
    }

    #[test]
    fn new_should_fail_when_invalid_input() {
        let result = LoanTerms::new(dec!(-1), dec!(0), 12);

        assert!(result.is_err());
    }

    #[rstest]
    #[case::larger_principal(dec!(2400), dec!(200.00))]
    #[case::smaller_principal(dec!(600), dec!(50.00))]
    fn set_principal_should_recompute_monthly_payment(
        #[case] principal: Decimal,
        #[case] expected: Decimal,
    ) {
        let mut terms = LoanTerms::new(dec!(1200), dec!(0), 12).unwrap();

        terms.set_principal(principal).unwrap();

        assert_eq!(terms.principal(), principal);
        assert_eq!(terms.monthly_payment(), expected);
    }

    #[test]
    fn set_term_months_should_recompute_monthly_payment() {
        let mut terms = LoanTerms::new(dec!(1200), dec!(0), 12).unwrap();

        terms.set_term_months(6).unwrap();

        assert_eq!(terms.monthly_payment(), dec!(200.00));
    }

    #[test]
    fn set_annual_rate_percent_should_recompute_monthly_payment() {
        let mut terms = LoanTerms::new(dec!(20000), dec!(0), 36).unwrap();

        terms.set_annual_rate_percent(dec!(6.99)).unwrap();

        assert!((terms.monthly_payment() - dec!(617.45)).abs() <= dec!(0.01));
    }

    #[test]
    fn setters_should_leave_terms_unchanged_when_input_rejected() {
        let mut terms = LoanTerms::new(dec!(1200), dec!(0), 12).unwrap();
        let original = terms.clone();

        assert!(terms.set_principal(dec!(-5)).is_err());
        assert!(terms.set_annual_rate_percent(dec!(-1)).is_err());
        assert!(terms.set_term_months(0).is_err());
        assert_eq!(terms, original);
    }
}
