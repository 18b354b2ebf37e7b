use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::analysis::calculator::PropertyAnalysis;
use crate::error::{FieldError, PropertyAnalysisError};
use crate::types::{Money, Percent, PropertyType};
use crate::PropertyAnalysisResult;

pub const DEFAULT_LOAN_TERM_YEARS: u32 = 30;
pub const DEFAULT_VACANCY_RATE: Percent = dec!(5);
pub const DEFAULT_APPRECIATION_RATE: Percent = dec!(3);

/// A partially filled analysis request, as collected from a form or the
/// command line. Blank fields are `None`.
///
/// `into_analysis` turns it into a complete `PropertyAnalysis`: required
/// fields are validated, optional amounts default to zero, and the loan
/// amount is derived from price and down payment when left blank.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PropertyAnalysisForm {
    pub address: Option<String>,
    pub purchase_price: Option<Money>,
    pub property_type: Option<PropertyType>,
    pub down_payment: Option<Money>,
    pub loan_amount: Option<Money>,
    pub interest_rate: Option<Percent>,
    pub loan_term: Option<u32>,
    pub monthly_rent: Option<Money>,
    pub other_income: Option<Money>,
    pub property_tax: Option<Money>,
    pub insurance: Option<Money>,
    pub maintenance: Option<Money>,
    pub property_management: Option<Money>,
    pub utilities: Option<Money>,
    pub vacancy_rate: Option<Percent>,
    pub appreciation_rate: Option<Percent>,
    pub closing_costs: Option<Money>,
}

impl PropertyAnalysisForm {
    /// Check the required fields, reporting every failure at once.
    pub fn validate(&self) -> PropertyAnalysisResult<()> {
        let mut errors = Vec::new();

        if self.address.as_deref().is_none_or(|a| a.trim().is_empty()) {
            errors.push(FieldError::new("address", "Address is required"));
        }
        if self.purchase_price.is_none_or(|p| p <= Decimal::ZERO) {
            errors.push(FieldError::new(
                "purchasePrice",
                "Purchase price must be greater than 0",
            ));
        }
        if self.down_payment.is_none_or(|d| d < Decimal::ZERO) {
            errors.push(FieldError::new("downPayment", "Down payment is required"));
        }
        if self.monthly_rent.is_none_or(|r| r <= Decimal::ZERO) {
            errors.push(FieldError::new("monthlyRent", "Monthly rent is required"));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(PropertyAnalysisError::Validation(errors))
        }
    }

    /// Validate and complete the form into a calculator input.
    pub fn into_analysis(self) -> PropertyAnalysisResult<PropertyAnalysis> {
        self.validate()?;

        // validate() guarantees these are present
        let purchase_price = self.purchase_price.unwrap_or_default();
        let down_payment = self.down_payment.unwrap_or_default();

        let loan_amount = match self.loan_amount {
            Some(amount) if !amount.is_zero() => amount,
            _ => purchase_price - down_payment,
        };

        Ok(PropertyAnalysis {
            address: self.address,
            purchase_price,
            property_type: self.property_type.unwrap_or_default(),
            down_payment,
            loan_amount,
            interest_rate: self.interest_rate.unwrap_or_default(),
            loan_term: self.loan_term.unwrap_or(DEFAULT_LOAN_TERM_YEARS),
            monthly_rent: self.monthly_rent.unwrap_or_default(),
            other_income: self.other_income.unwrap_or_default(),
            property_tax: self.property_tax.unwrap_or_default(),
            insurance: self.insurance.unwrap_or_default(),
            maintenance: self.maintenance.unwrap_or_default(),
            property_management: self.property_management.unwrap_or_default(),
            utilities: self.utilities.unwrap_or_default(),
            vacancy_rate: self.vacancy_rate.unwrap_or(DEFAULT_VACANCY_RATE),
            appreciation_rate: self.appreciation_rate.unwrap_or(DEFAULT_APPRECIATION_RATE),
            closing_costs: self.closing_costs.unwrap_or_default(),
        })
    }
}

impl TryFrom<PropertyAnalysisForm> for PropertyAnalysis {
    type Error = PropertyAnalysisError;

    fn try_from(form: PropertyAnalysisForm) -> Result<Self, Self::Error> {
        form.into_analysis()
    }
}
