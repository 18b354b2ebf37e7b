use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::time_value::{
    compound_appreciation, is_saturated, monthly_payment, saturating_div, saturating_percent,
};
use crate::types::{with_metadata, ComputationOutput, Money, Multiple, Percent, PropertyType};

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Property and loan description for a single rental analysis.
///
/// Percentages are whole-number scaled (`6.5` = 6.5%). Monthly fields are
/// per month; `closing_costs` is a one-time amount.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyAnalysis {
    /// Street address, informational only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    /// Acquisition price
    pub purchase_price: Money,
    /// Property category, informational only
    #[serde(default)]
    pub property_type: PropertyType,
    /// Cash paid at acquisition
    pub down_payment: Money,
    /// Financed principal. Authoritative: never cross-checked against
    /// `purchase_price - down_payment`.
    pub loan_amount: Money,
    /// Nominal annual interest rate (%)
    pub interest_rate: Percent,
    /// Loan term in years
    pub loan_term: u32,
    /// Gross contractual rent before vacancy
    pub monthly_rent: Money,
    /// Non-rent income (parking, laundry, ...)
    pub other_income: Money,
    pub property_tax: Money,
    pub insurance: Money,
    pub maintenance: Money,
    pub property_management: Money,
    pub utilities: Money,
    /// Expected share of rent lost to vacancy (%, 0-100)
    pub vacancy_rate: Percent,
    /// Assumed annual property value growth (%)
    pub appreciation_rate: Percent,
    /// One-time acquisition costs, counted as invested capital
    pub closing_costs: Money,
}

impl PropertyAnalysis {
    /// Rent after the vacancy allowance: `monthly_rent * (1 - vacancy_rate/100)`.
    pub fn effective_monthly_rent(&self) -> Money {
        let occupancy = Decimal::ONE.saturating_sub(self.vacancy_rate / dec!(100));
        self.monthly_rent.saturating_mul(occupancy)
    }

    /// Capital invested up front: down payment plus closing costs.
    pub fn total_investment(&self) -> Money {
        self.down_payment.saturating_add(self.closing_costs)
    }
}

/// Derived metrics for one `PropertyAnalysis`. Values are unrounded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResults {
    // Monthly
    pub monthly_income: Money,
    pub monthly_expenses: Money,
    pub monthly_cash_flow: Money,

    // Annual
    pub annual_income: Money,
    pub annual_expenses: Money,
    pub annual_cash_flow: Money,

    /// Annual cash flow / (down payment + closing costs), in %
    pub cash_on_cash_return: Percent,
    /// NOI / purchase price, in %
    pub cap_rate: Percent,
    /// Purchase price / annual gross rent
    pub gross_rent_multiplier: Multiple,

    // Loan
    pub monthly_mortgage_payment: Money,
    /// Same value as `monthly_expenses`
    pub total_monthly_payment: Money,

    // Projections
    pub five_year_appreciation: Money,
    pub ten_year_appreciation: Money,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

const MONTHS: Decimal = dec!(12);

/// Compute rental investment metrics for a property.
///
/// Total over its numeric domain: every zero denominator resolves to `0`
/// (cash-on-cash with no invested capital, cap rate with no purchase price,
/// GRM with no rent), the mortgage payment handles zero rates and zero
/// terms through its limits, and sums or products that leave the decimal
/// range are clamped to `Decimal::MAX` / `Decimal::MIN`.
pub fn calculate_analysis(input: &PropertyAnalysis) -> AnalysisResults {
    let monthly_mortgage_payment =
        monthly_payment(input.loan_amount, input.interest_rate, input.loan_term);

    let monthly_income = input.effective_monthly_rent().saturating_add(input.other_income);

    let monthly_expenses = monthly_mortgage_payment
        .saturating_add(input.property_tax)
        .saturating_add(input.insurance)
        .saturating_add(input.maintenance)
        .saturating_add(input.property_management)
        .saturating_add(input.utilities);

    let monthly_cash_flow = monthly_income.saturating_sub(monthly_expenses);

    let annual_income = monthly_income.saturating_mul(MONTHS);
    let annual_expenses = monthly_expenses.saturating_mul(MONTHS);
    let annual_cash_flow = monthly_cash_flow.saturating_mul(MONTHS);

    let cash_on_cash_return = saturating_percent(annual_cash_flow, input.total_investment());

    // NOI excludes debt service
    let annual_operating_expenses =
        annual_expenses.saturating_sub(monthly_mortgage_payment.saturating_mul(MONTHS));
    let net_operating_income = annual_income.saturating_sub(annual_operating_expenses);
    let cap_rate = saturating_percent(net_operating_income, input.purchase_price);

    let annual_gross_rent = input.monthly_rent.saturating_mul(MONTHS);
    let gross_rent_multiplier = saturating_div(input.purchase_price, annual_gross_rent);

    let five_year_appreciation =
        compound_appreciation(input.purchase_price, input.appreciation_rate, 5);
    let ten_year_appreciation =
        compound_appreciation(input.purchase_price, input.appreciation_rate, 10);

    log::trace!(
        "analysis: payment={monthly_mortgage_payment} income={monthly_income} \
         expenses={monthly_expenses} noi={net_operating_income}"
    );

    AnalysisResults {
        monthly_income,
        monthly_expenses,
        monthly_cash_flow,
        annual_income,
        annual_expenses,
        annual_cash_flow,
        cash_on_cash_return,
        cap_rate,
        gross_rent_multiplier,
        monthly_mortgage_payment,
        total_monthly_payment: monthly_expenses,
        five_year_appreciation,
        ten_year_appreciation,
    }
}

/// Run `calculate_analysis` and wrap the result in the standard envelope,
/// with advisory warnings for degenerate or unusual inputs.
pub fn analyze_property(input: &PropertyAnalysis) -> ComputationOutput<AnalysisResults> {
    let start = Instant::now();

    let result = calculate_analysis(input);
    let warnings = collect_warnings(input, &result);
    for w in &warnings {
        log::debug!("{w}");
    }

    let elapsed = start.elapsed().as_micros() as u64;

    with_metadata(
        "Rental Property Cash Flow Analysis (Fixed-Rate Amortisation)",
        input,
        warnings,
        elapsed,
        result,
    )
}

// ---------------------------------------------------------------------------
// Warnings
// ---------------------------------------------------------------------------

fn collect_warnings(input: &PropertyAnalysis, result: &AnalysisResults) -> Vec<String> {
    let mut warnings = Vec::new();

    if input.loan_term == 0 && input.loan_amount > Decimal::ZERO {
        warnings.push(
            "Loan term is 0 years — no debt service computed for the financed amount".into(),
        );
    }

    if input.total_investment().is_zero() {
        warnings.push(
            "No invested capital (down payment + closing costs = 0) — \
             cash-on-cash return is undefined and reported as 0"
                .into(),
        );
    }

    if input.purchase_price.is_zero() {
        warnings.push("Purchase price is 0 — cap rate is undefined and reported as 0".into());
    }

    if input.monthly_rent.is_zero() {
        warnings.push(
            "Monthly rent is 0 — gross rent multiplier is undefined and reported as 0".into(),
        );
    }

    if input.vacancy_rate < Decimal::ZERO || input.vacancy_rate > dec!(100) {
        warnings.push(format!(
            "Vacancy rate {}% is outside 0–100%",
            input.vacancy_rate
        ));
    }

    let implied_loan = input.purchase_price.saturating_sub(input.down_payment);
    if input.loan_amount != implied_loan {
        warnings.push(format!(
            "Loan amount {} differs from purchase price less down payment ({implied_loan})",
            input.loan_amount
        ));
    }

    let saturated: Vec<&str> = [
        ("monthlyIncome", result.monthly_income),
        ("monthlyExpenses", result.monthly_expenses),
        ("monthlyCashFlow", result.monthly_cash_flow),
        ("annualIncome", result.annual_income),
        ("annualExpenses", result.annual_expenses),
        ("annualCashFlow", result.annual_cash_flow),
        ("cashOnCashReturn", result.cash_on_cash_return),
        ("capRate", result.cap_rate),
        ("grossRentMultiplier", result.gross_rent_multiplier),
        ("monthlyMortgagePayment", result.monthly_mortgage_payment),
        ("fiveYearAppreciation", result.five_year_appreciation),
        ("tenYearAppreciation", result.ten_year_appreciation),
    ]
    .into_iter()
    .filter(|(_, value)| is_saturated(*value))
    .map(|(name, _)| name)
    .collect();
    if !saturated.is_empty() {
        log::warn!("decimal range exceeded for {}", saturated.join(", "));
        warnings.push(format!(
            "Inputs exceed the decimal range — {} clamped to the largest representable value",
            saturated.join(", ")
        ));
    }

    if result.monthly_cash_flow < Decimal::ZERO {
        warnings.push(format!(
            "Negative monthly cash flow of {:.2}",
            result.monthly_cash_flow
        ));
    }

    warnings
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    /// Leveraged single-family rental: 20% down, 6.5% over 30 years
    fn sample_input() -> PropertyAnalysis {
        PropertyAnalysis {
            address: Some("123 Main St".into()),
            purchase_price: dec!(500000),
            property_type: PropertyType::House,
            down_payment: dec!(100000),
            loan_amount: dec!(400000),
            interest_rate: dec!(6.5),
            loan_term: 30,
            monthly_rent: dec!(2500),
            other_income: Decimal::ZERO,
            property_tax: dec!(500),
            insurance: dec!(150),
            maintenance: dec!(200),
            property_management: dec!(250),
            utilities: dec!(100),
            vacancy_rate: dec!(5),
            appreciation_rate: dec!(3),
            closing_costs: dec!(10000),
        }
    }

    fn assert_close(actual: Decimal, expected: Decimal, tol: Decimal) {
        assert!(
            (actual - expected).abs() <= tol,
            "expected {expected} ± {tol}, got {actual}"
        );
    }

    #[test]
    fn test_standard_case() {
        let input = sample_input();
        let r = calculate_analysis(&input);

        assert_close(r.monthly_mortgage_payment, dec!(2528.27), dec!(0.01));
        assert_eq!(input.effective_monthly_rent(), dec!(2375));
        assert_eq!(r.monthly_income, dec!(2375));
        assert_close(r.monthly_expenses, dec!(3728.27), dec!(0.01));
        assert_close(r.monthly_cash_flow, dec!(-1353.27), dec!(0.01));
        assert_close(r.cash_on_cash_return, dec!(-14.76), dec!(0.01));
        assert_eq!(
            r.cash_on_cash_return,
            r.annual_cash_flow / dec!(110000) * dec!(100)
        );
    }

    #[test]
    fn test_cap_rate_excludes_debt_service() {
        let r = calculate_analysis(&sample_input());
        // NOI = 2375*12 - 1200*12 = 14100; 14100 / 500000 = 2.82%
        assert_close(r.cap_rate, dec!(2.82), dec!(0.000001));
    }

    #[test]
    fn test_gross_rent_multiplier() {
        let r = calculate_analysis(&sample_input());
        // 500000 / 30000
        assert_close(r.gross_rent_multiplier, dec!(16.6667), dec!(0.0001));
    }

    #[test]
    fn test_appreciation_projections() {
        let r = calculate_analysis(&sample_input());
        // 500000 * 1.03^5 - 500000 = 79637.04
        assert_close(r.five_year_appreciation, dec!(79637.04), dec!(0.01));
        // 500000 * 1.03^10 - 500000 = 171958.19
        assert_close(r.ten_year_appreciation, dec!(171958.19), dec!(0.01));
    }

    #[test]
    fn test_total_monthly_payment_aliases_expenses() {
        let r = calculate_analysis(&sample_input());
        assert_eq!(r.total_monthly_payment, r.monthly_expenses);
    }

    #[test]
    fn test_zero_interest_loan() {
        let mut input = sample_input();
        input.loan_amount = dec!(120000);
        input.interest_rate = Decimal::ZERO;
        input.loan_term = 10;
        let r = calculate_analysis(&input);
        assert_eq!(r.monthly_mortgage_payment, dec!(1000));
    }

    #[test]
    fn test_zero_loan_amount() {
        let mut input = sample_input();
        input.loan_amount = Decimal::ZERO;
        for (rate, term) in [(dec!(6.5), 30), (Decimal::ZERO, 0), (dec!(25), 1)] {
            input.interest_rate = rate;
            input.loan_term = term;
            assert_eq!(
                calculate_analysis(&input).monthly_mortgage_payment,
                Decimal::ZERO
            );
        }
    }

    #[test]
    fn test_zero_loan_term_yields_no_payment() {
        let mut input = sample_input();
        input.loan_term = 0;
        let r = calculate_analysis(&input);
        assert_eq!(r.monthly_mortgage_payment, Decimal::ZERO);
        assert_eq!(r.monthly_expenses, dec!(1200));
    }

    #[test]
    fn test_zero_purchase_price_guards() {
        let mut input = sample_input();
        input.purchase_price = Decimal::ZERO;
        let r = calculate_analysis(&input);
        assert_eq!(r.cap_rate, Decimal::ZERO);
        assert_eq!(r.gross_rent_multiplier, Decimal::ZERO);

        input.monthly_rent = Decimal::ZERO;
        let r = calculate_analysis(&input);
        assert_eq!(r.cap_rate, Decimal::ZERO);
        assert_eq!(r.gross_rent_multiplier, Decimal::ZERO);
    }

    #[test]
    fn test_zero_invested_capital_reports_zero_return() {
        let mut input = sample_input();
        input.down_payment = Decimal::ZERO;
        input.closing_costs = Decimal::ZERO;
        assert_eq!(calculate_analysis(&input).cash_on_cash_return, Decimal::ZERO);
    }

    #[test]
    fn test_zero_appreciation_rate() {
        let mut input = sample_input();
        input.purchase_price = dec!(300000);
        input.appreciation_rate = Decimal::ZERO;
        let r = calculate_analysis(&input);
        assert_eq!(r.five_year_appreciation, Decimal::ZERO);
        assert_eq!(r.ten_year_appreciation, Decimal::ZERO);
    }

    #[test]
    fn test_vacancy_reduces_income_not_expenses() {
        let mut input = sample_input();
        input.vacancy_rate = Decimal::ZERO;
        let full = calculate_analysis(&input);
        input.vacancy_rate = dec!(10);
        let vacant = calculate_analysis(&input);

        assert_eq!(full.monthly_expenses, vacant.monthly_expenses);
        assert_eq!(full.monthly_income - vacant.monthly_income, dec!(250));
    }

    #[test]
    fn test_other_income_added_to_income() {
        let mut input = sample_input();
        input.other_income = dec!(125);
        assert_eq!(calculate_analysis(&input).monthly_income, dec!(2500));
    }

    #[test]
    fn test_oversized_rent_saturates_instead_of_panicking() {
        let mut input = sample_input();
        input.monthly_rent = dec!(10000000000000000000000000000);
        let r = calculate_analysis(&input);
        assert_eq!(r.annual_income, Decimal::MAX);
        assert_eq!(r.annual_cash_flow, Decimal::MAX);
        assert!(r.gross_rent_multiplier > Decimal::ZERO);
        assert!(r.gross_rent_multiplier < dec!(0.000001));

        let out = analyze_property(&input);
        let warning = out
            .warnings
            .iter()
            .find(|w| w.starts_with("Inputs exceed the decimal range"))
            .expect("saturation warning");
        assert!(warning.contains("annualIncome"));
        assert!(!warning.contains("monthlyIncome"));
    }

    #[test]
    fn test_extreme_inputs_never_panic() {
        let extremes = [Decimal::MAX, Decimal::MIN, dec!(0.0000000000000000000000000001)];
        for value in extremes {
            let input = PropertyAnalysis {
                address: None,
                purchase_price: value,
                property_type: PropertyType::Other,
                down_payment: value,
                loan_amount: value,
                interest_rate: value,
                loan_term: u32::MAX,
                monthly_rent: value,
                other_income: value,
                property_tax: value,
                insurance: value,
                maintenance: value,
                property_management: value,
                utilities: value,
                vacancy_rate: value,
                appreciation_rate: value,
                closing_costs: value,
            };
            let out = analyze_property(&input);
            assert_eq!(out.result, calculate_analysis(&input));
        }
    }

    #[test]
    fn test_idempotent() {
        let input = sample_input();
        assert_eq!(calculate_analysis(&input), calculate_analysis(&input));
    }

    #[test]
    fn test_envelope_methodology_and_result() {
        let input = sample_input();
        let out = analyze_property(&input);
        assert_eq!(
            out.methodology,
            "Rental Property Cash Flow Analysis (Fixed-Rate Amortisation)"
        );
        assert_eq!(out.result, calculate_analysis(&input));
        assert_eq!(out.assumptions["purchasePrice"], serde_json::json!("500000"));
    }

    #[test]
    fn test_envelope_warns_on_negative_cash_flow() {
        let out = analyze_property(&sample_input());
        assert!(out
            .warnings
            .iter()
            .any(|w| w.starts_with("Negative monthly cash flow")));
        assert!(!out.warnings.iter().any(|w| w.contains("differs")));
    }

    #[test]
    fn test_envelope_warns_on_undefined_ratios() {
        let mut input = sample_input();
        input.purchase_price = Decimal::ZERO;
        input.monthly_rent = Decimal::ZERO;
        input.down_payment = Decimal::ZERO;
        input.closing_costs = Decimal::ZERO;
        let out = analyze_property(&input);
        assert!(out.warnings.iter().any(|w| w.contains("cash-on-cash")));
        assert!(out.warnings.iter().any(|w| w.contains("cap rate")));
        assert!(out.warnings.iter().any(|w| w.contains("gross rent multiplier")));
    }

    #[test]
    fn test_envelope_warns_on_loan_mismatch_without_changing_result() {
        let mut input = sample_input();
        input.loan_amount = dec!(350000);
        let out = analyze_property(&input);
        assert!(out.warnings.iter().any(|w| w.contains("differs")));
        assert_eq!(
            out.result.monthly_mortgage_payment,
            monthly_payment(dec!(350000), dec!(6.5), 30)
        );
    }

    #[test]
    fn test_camel_case_json_round_trip() {
        let json = r#"{
            "address": "42 Elm St",
            "purchasePrice": 500000,
            "propertyType": "apartment",
            "downPayment": 100000,
            "loanAmount": 400000,
            "interestRate": 6.5,
            "loanTerm": 30,
            "monthlyRent": 2500,
            "otherIncome": 0,
            "propertyTax": 500,
            "insurance": 150,
            "maintenance": 200,
            "propertyManagement": 250,
            "utilities": 100,
            "vacancyRate": 5,
            "appreciationRate": 3,
            "closingCosts": 10000
        }"#;
        let input: PropertyAnalysis = serde_json::from_str(json).unwrap();
        assert_eq!(input.property_type, PropertyType::Apartment);
        assert_eq!(input.interest_rate, dec!(6.5));

        let value = serde_json::to_value(calculate_analysis(&input)).unwrap();
        for key in [
            "monthlyIncome",
            "monthlyExpenses",
            "monthlyCashFlow",
            "annualIncome",
            "annualExpenses",
            "annualCashFlow",
            "cashOnCashReturn",
            "capRate",
            "grossRentMultiplier",
            "monthlyMortgagePayment",
            "totalMonthlyPayment",
            "fiveYearAppreciation",
            "tenYearAppreciation",
        ] {
            assert!(value.get(key).is_some(), "missing {key}");
        }
    }
}
