use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::analysis::calculator::PropertyAnalysis;
use crate::analysis::form::{DEFAULT_APPRECIATION_RATE, DEFAULT_LOAN_TERM_YEARS, DEFAULT_VACANCY_RATE};
use crate::types::{Money, Percent, PropertyType};

/// A property offered for sale in the opportunities catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Listing {
    pub id: String,
    pub title: String,
    pub city: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub neighborhood: Option<String>,
    pub price: Money,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub area_m2: Option<Decimal>,
    /// Expected rent per month
    pub estimated_rent: Money,
    /// Monthly condominium fee
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condo_fee: Option<Money>,
    /// Annual municipal property tax (IPTU)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iptu_annual: Option<Money>,
    /// Net yield quoted by the source, in %
    pub yield_percent: Percent,
    pub cashflow_monthly: Money,
    pub payback_years: Decimal,
    /// Source quality score, 0-100
    pub immo_score: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Financing assumptions applied when running a listing through the
/// calculator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingFinancing {
    /// Down payment as a share of price (%)
    pub down_payment_percent: Percent,
    pub interest_rate: Percent,
    pub loan_term: u32,
    pub vacancy_rate: Percent,
    pub appreciation_rate: Percent,
    pub closing_costs: Money,
}

impl Default for ListingFinancing {
    fn default() -> Self {
        Self {
            down_payment_percent: dec!(20),
            interest_rate: Decimal::ZERO,
            loan_term: DEFAULT_LOAN_TERM_YEARS,
            vacancy_rate: DEFAULT_VACANCY_RATE,
            appreciation_rate: DEFAULT_APPRECIATION_RATE,
            closing_costs: Decimal::ZERO,
        }
    }
}

impl Listing {
    /// Build a calculator input from the listing. Condo fees map to
    /// maintenance and the annual IPTU is spread over twelve months.
    pub fn to_analysis(&self, financing: &ListingFinancing) -> PropertyAnalysis {
        let down_payment = self.price.saturating_mul(financing.down_payment_percent) / dec!(100);

        PropertyAnalysis {
            address: Some(self.address()),
            purchase_price: self.price,
            property_type: PropertyType::Apartment,
            down_payment,
            loan_amount: self.price.saturating_sub(down_payment),
            interest_rate: financing.interest_rate,
            loan_term: financing.loan_term,
            monthly_rent: self.estimated_rent,
            other_income: Decimal::ZERO,
            property_tax: self.iptu_annual.unwrap_or_default() / dec!(12),
            insurance: Decimal::ZERO,
            maintenance: self.condo_fee.unwrap_or_default(),
            property_management: Decimal::ZERO,
            utilities: Decimal::ZERO,
            vacancy_rate: financing.vacancy_rate,
            appreciation_rate: financing.appreciation_rate,
            closing_costs: financing.closing_costs,
        }
    }

    fn address(&self) -> String {
        match &self.neighborhood {
            Some(n) => format!("{}, {}, {}", self.title, n, self.city),
            None => format!("{}, {}", self.title, self.city),
        }
    }
}
