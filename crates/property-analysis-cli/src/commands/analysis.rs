use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use property_analysis_core::analysis::{
    analyze_property, MonthlyBreakdown, PropertyAnalysis, PropertyAnalysisForm,
};
use property_analysis_core::types::PropertyType;

use crate::input;

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum PropertyTypeArg {
    House,
    Apartment,
    Commercial,
    Other,
}

impl From<PropertyTypeArg> for PropertyType {
    fn from(arg: PropertyTypeArg) -> Self {
        match arg {
            PropertyTypeArg::House => PropertyType::House,
            PropertyTypeArg::Apartment => PropertyType::Apartment,
            PropertyTypeArg::Commercial => PropertyType::Commercial,
            PropertyTypeArg::Other => PropertyType::Other,
        }
    }
}

/// Arguments for a single-property analysis
#[derive(Args)]
pub struct AnalyzeArgs {
    /// Path to JSON or YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Property address
    #[arg(long)]
    pub address: Option<String>,

    /// Property type
    #[arg(long, value_enum)]
    pub property_type: Option<PropertyTypeArg>,

    /// Purchase price
    #[arg(long)]
    pub purchase_price: Option<Decimal>,

    /// Down payment
    #[arg(long)]
    pub down_payment: Option<Decimal>,

    /// Loan amount (defaults to purchase price less down payment)
    #[arg(long)]
    pub loan_amount: Option<Decimal>,

    /// Annual interest rate in percent (e.g. 6.5)
    #[arg(long)]
    pub interest_rate: Option<Decimal>,

    /// Loan term in years [default: 30]
    #[arg(long)]
    pub loan_term: Option<u32>,

    /// Gross monthly rent
    #[arg(long)]
    pub monthly_rent: Option<Decimal>,

    /// Other monthly income
    #[arg(long)]
    pub other_income: Option<Decimal>,

    /// Monthly property tax
    #[arg(long)]
    pub property_tax: Option<Decimal>,

    /// Monthly insurance
    #[arg(long)]
    pub insurance: Option<Decimal>,

    /// Monthly maintenance
    #[arg(long)]
    pub maintenance: Option<Decimal>,

    /// Monthly property management
    #[arg(long)]
    pub property_management: Option<Decimal>,

    /// Monthly utilities
    #[arg(long)]
    pub utilities: Option<Decimal>,

    /// Vacancy rate in percent [default: 5]
    #[arg(long)]
    pub vacancy_rate: Option<Decimal>,

    /// Annual appreciation rate in percent [default: 3]
    #[arg(long)]
    pub appreciation_rate: Option<Decimal>,

    /// One-time closing costs
    #[arg(long)]
    pub closing_costs: Option<Decimal>,

    /// Include the monthly income/expense breakdown
    #[arg(long)]
    pub breakdown: bool,
}

impl AnalyzeArgs {
    fn to_form(&self) -> PropertyAnalysisForm {
        PropertyAnalysisForm {
            address: self.address.clone(),
            purchase_price: self.purchase_price,
            property_type: self.property_type.map(PropertyType::from),
            down_payment: self.down_payment,
            loan_amount: self.loan_amount,
            interest_rate: self.interest_rate,
            loan_term: self.loan_term,
            monthly_rent: self.monthly_rent,
            other_income: self.other_income,
            property_tax: self.property_tax,
            insurance: self.insurance,
            maintenance: self.maintenance,
            property_management: self.property_management,
            utilities: self.utilities,
            vacancy_rate: self.vacancy_rate,
            appreciation_rate: self.appreciation_rate,
            closing_costs: self.closing_costs,
        }
    }
}

/// A complete record is used as given; anything else is treated as a
/// partially filled form and completed with the usual defaults.
fn parse_analysis(data: Value) -> Result<PropertyAnalysis, Box<dyn std::error::Error>> {
    match serde_json::from_value::<PropertyAnalysis>(data.clone()) {
        Ok(analysis) => Ok(analysis),
        Err(e) => {
            log::debug!("input is not a complete analysis record ({e}), completing as form");
            let form: PropertyAnalysisForm = serde_json::from_value(data)?;
            Ok(form.into_analysis()?)
        }
    }
}

pub fn run_analyze(args: AnalyzeArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let analysis: PropertyAnalysis = if let Some(ref path) = args.input {
        parse_analysis(input::file::read_document(path)?)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        parse_analysis(data)?
    } else {
        args.to_form().into_analysis()?
    };

    let output = analyze_property(&analysis);
    let mut value = serde_json::to_value(&output)?;

    if args.breakdown {
        let breakdown = MonthlyBreakdown::from_analysis(&analysis, &output.result);
        if let Value::Object(ref mut map) = value {
            map.insert("breakdown".into(), serde_json::to_value(breakdown)?);
        }
    }

    Ok(value)
}
