use chrono::{DateTime, NaiveDate};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Deserializer, Serialize};
use std::time::Instant;

use crate::error::{FieldError, PropertyAnalysisError};
use crate::time_value::{saturating_div, saturating_percent};
use crate::types::{with_metadata, ComputationOutput, Money, Percent};
use crate::PropertyAnalysisResult;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// A property already held in the portfolio.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioProperty {
    pub id: String,
    /// User label, e.g. "Studio in Pinheiros"
    pub name: String,
    pub city: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub neighborhood: Option<String>,
    pub purchase_price: Money,
    /// Calendar date, or a full timestamp of which only the date is kept
    #[serde(deserialize_with = "deserialize_purchase_date")]
    pub purchase_date: NaiveDate,
    /// Owner's estimate of the current market value
    pub current_value_estimate: Money,
    pub rent_monthly: Money,
    /// Monthly condominium / HOA fee
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condo_fee_monthly: Option<Money>,
    /// Annual municipal property tax (IPTU)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iptu_annual: Option<Money>,
    /// Vacancy allowance (%, 0-100)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vacancy_rate: Option<Percent>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Income and value metrics for one held property.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyMetrics {
    /// Rent less condo fees, property tax and vacancy, per year
    pub net_annual_income: Money,
    /// Net annual income / current value, in %
    pub net_yield: Percent,
    /// Current value / net annual income. `None` when income is not positive.
    pub payback_years: Option<Decimal>,
    /// Current value less purchase price
    pub appreciation: Money,
    /// Appreciation / purchase price, in %
    pub appreciation_percent: Percent,
}

/// A held property together with its metrics.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyReport {
    pub id: String,
    pub name: String,
    pub metrics: PropertyMetrics,
}

/// Linear aggregation of every property in the portfolio.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioSummary {
    pub property_count: usize,
    pub total_value: Money,
    /// Sum of monthly rents
    pub total_rent: Money,
    pub total_net_income: Money,
    pub total_appreciation: Money,
    pub total_purchase_price: Money,
    /// Total net income / total value, in %
    pub weighted_yield: Percent,
    /// Total appreciation / total purchase price, in %
    pub appreciation_percent: Percent,
}

/// Full portfolio report: per-property metrics and the aggregate.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioReport {
    pub properties: Vec<PropertyReport>,
    pub summary: PortfolioSummary,
}

/// Parse a purchase date written either as `2021-11-02` or as an RFC 3339
/// timestamp such as `2021-11-02T00:00:00.000Z`. Timestamps keep the date
/// in their own offset.
pub fn parse_purchase_date(raw: &str) -> Result<NaiveDate, String> {
    let raw = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Ok(date);
    }
    DateTime::parse_from_rfc3339(raw)
        .map(|timestamp| timestamp.date_naive())
        .map_err(|e| format!("invalid purchase date '{raw}': {e}"))
}

fn deserialize_purchase_date<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_purchase_date(&raw).map_err(serde::de::Error::custom)
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Compute net income, yield, payback and appreciation for one property.
pub fn property_metrics(property: &PortfolioProperty) -> PropertyMetrics {
    let rent_annual = property.rent_monthly.saturating_mul(dec!(12));
    let condo_annual = property
        .condo_fee_monthly
        .unwrap_or_default()
        .saturating_mul(dec!(12));
    let vacancy_loss = property
        .vacancy_rate
        .map(|rate| rent_annual.saturating_mul(rate) / dec!(100))
        .unwrap_or_default();

    let net_annual_income = rent_annual
        .saturating_sub(condo_annual)
        .saturating_sub(property.iptu_annual.unwrap_or_default())
        .saturating_sub(vacancy_loss);

    let net_yield = saturating_percent(net_annual_income, property.current_value_estimate);

    let payback_years = if net_annual_income > Decimal::ZERO {
        Some(saturating_div(property.current_value_estimate, net_annual_income))
    } else {
        None
    };

    let appreciation = property
        .current_value_estimate
        .saturating_sub(property.purchase_price);
    let appreciation_percent = saturating_percent(appreciation, property.purchase_price);

    PropertyMetrics {
        net_annual_income,
        net_yield,
        payback_years,
        appreciation,
        appreciation_percent,
    }
}

/// Aggregate the portfolio by straight summation.
pub fn summarize_portfolio(properties: &[PortfolioProperty]) -> PortfolioSummary {
    let mut summary = PortfolioSummary {
        property_count: properties.len(),
        total_value: Decimal::ZERO,
        total_rent: Decimal::ZERO,
        total_net_income: Decimal::ZERO,
        total_appreciation: Decimal::ZERO,
        total_purchase_price: Decimal::ZERO,
        weighted_yield: Decimal::ZERO,
        appreciation_percent: Decimal::ZERO,
    };

    for property in properties {
        let metrics = property_metrics(property);
        summary.total_value = summary
            .total_value
            .saturating_add(property.current_value_estimate);
        summary.total_rent = summary.total_rent.saturating_add(property.rent_monthly);
        summary.total_net_income = summary
            .total_net_income
            .saturating_add(metrics.net_annual_income);
        summary.total_appreciation = summary
            .total_appreciation
            .saturating_add(metrics.appreciation);
        summary.total_purchase_price = summary
            .total_purchase_price
            .saturating_add(property.purchase_price);
    }

    summary.weighted_yield = saturating_percent(summary.total_net_income, summary.total_value);
    summary.appreciation_percent =
        saturating_percent(summary.total_appreciation, summary.total_purchase_price);

    summary
}

/// Validate a held property record, reporting every failure at once.
pub fn validate_property(property: &PortfolioProperty) -> PropertyAnalysisResult<()> {
    let mut errors = Vec::new();

    if property.name.trim().is_empty() {
        errors.push(FieldError::new("name", "Name is required"));
    }
    if property.city.trim().is_empty() {
        errors.push(FieldError::new("city", "City is required"));
    }
    if property.purchase_price <= Decimal::ZERO {
        errors.push(FieldError::new(
            "purchasePrice",
            "Purchase price must be greater than 0",
        ));
    }
    if property.current_value_estimate <= Decimal::ZERO {
        errors.push(FieldError::new(
            "currentValueEstimate",
            "Current value must be greater than 0",
        ));
    }
    if property.rent_monthly <= Decimal::ZERO {
        errors.push(FieldError::new(
            "rentMonthly",
            "Monthly rent must be greater than 0",
        ));
    }
    if let Some(rate) = property.vacancy_rate {
        if rate < Decimal::ZERO || rate > dec!(100) {
            errors.push(FieldError::new(
                "vacancyRate",
                "Vacancy rate must be between 0 and 100",
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(PropertyAnalysisError::Validation(errors))
    }
}

/// Validate every property, then report per-property metrics and the
/// portfolio aggregate.
pub fn analyze_portfolio(
    properties: &[PortfolioProperty],
) -> PropertyAnalysisResult<ComputationOutput<PortfolioReport>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    for property in properties {
        validate_property(property).map_err(|e| match e {
            PropertyAnalysisError::Validation(errors) => PropertyAnalysisError::Validation(
                errors
                    .into_iter()
                    .map(|fe| FieldError::new(format!("{}.{}", property.id, fe.field), fe.message))
                    .collect(),
            ),
            other => other,
        })?;
    }

    let reports: Vec<PropertyReport> = properties
        .iter()
        .map(|p| {
            let metrics = property_metrics(p);
            if metrics.payback_years.is_none() {
                warnings.push(format!(
                    "{}: net annual income is not positive — payback period unbounded",
                    p.name
                ));
            }
            PropertyReport {
                id: p.id.clone(),
                name: p.name.clone(),
                metrics,
            }
        })
        .collect();

    if properties.is_empty() {
        warnings.push("Portfolio is empty".into());
    }

    let summary = summarize_portfolio(properties);
    log::debug!(
        "portfolio of {} properties: value={} yield={}%",
        summary.property_count,
        summary.total_value,
        summary.weighted_yield
    );

    let elapsed = start.elapsed().as_micros() as u64;

    Ok(with_metadata(
        "Rental Portfolio Aggregation (Net Yield)",
        &properties,
        warnings,
        elapsed,
        PortfolioReport {
            properties: reports,
            summary,
        },
    ))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
