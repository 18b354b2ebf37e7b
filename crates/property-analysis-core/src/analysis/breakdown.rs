use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::analysis::calculator::{calculate_analysis, AnalysisResults, PropertyAnalysis};
use crate::types::Money;

/// Sign of the monthly cash flow, for reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CashFlowDirection {
    Positive,
    Negative,
}

/// Line items behind one analysis, for a results report.
///
/// Built from the input and its results so reports never recompute the
/// vacancy-adjusted rent themselves.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyBreakdown {
    // Income
    pub rent_after_vacancy: Money,
    pub other_income: Money,
    pub total_income: Money,

    // Expenses
    pub mortgage_payment: Money,
    pub property_tax: Money,
    pub insurance: Money,
    pub maintenance: Money,
    pub property_management: Money,
    pub utilities: Money,
    pub total_expenses: Money,

    pub cash_flow: Money,
    pub cash_flow_direction: CashFlowDirection,

    /// Down payment plus closing costs
    pub total_investment: Money,
}

impl MonthlyBreakdown {
    /// Run the calculator on `input` and break the result down.
    pub fn for_analysis(input: &PropertyAnalysis) -> Self {
        Self::from_analysis(input, &calculate_analysis(input))
    }

    /// Break down results already computed for `input`.
    pub fn from_analysis(input: &PropertyAnalysis, results: &AnalysisResults) -> Self {
        let cash_flow_direction = if results.monthly_cash_flow >= Decimal::ZERO {
            CashFlowDirection::Positive
        } else {
            CashFlowDirection::Negative
        };

        Self {
            rent_after_vacancy: input.effective_monthly_rent(),
            other_income: input.other_income,
            total_income: results.monthly_income,
            mortgage_payment: results.monthly_mortgage_payment,
            property_tax: input.property_tax,
            insurance: input.insurance,
            maintenance: input.maintenance,
            property_management: input.property_management,
            utilities: input.utilities,
            total_expenses: results.monthly_expenses,
            cash_flow: results.monthly_cash_flow,
            cash_flow_direction,
            total_investment: input.total_investment(),
        }
    }
}
