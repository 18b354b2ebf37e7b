use clap::Args;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde_json::{json, Value};

use property_analysis_core::analysis::calculate_analysis;
use property_analysis_core::listings::{JsonListingSource, ListingFinancing, ListingSource};

/// Arguments for the listings catalog
#[derive(Args)]
pub struct ListingsArgs {
    /// Path to a JSON array of listings
    #[arg(long)]
    pub input: String,

    /// Run every listing through the calculator
    #[arg(long)]
    pub analyze: bool,

    /// Down payment as a percent of price
    #[arg(long, default_value = "20")]
    pub down_payment_pct: Decimal,

    /// Annual interest rate in percent
    #[arg(long, default_value = "0")]
    pub interest_rate: Decimal,

    /// Loan term in years
    #[arg(long, default_value = "30")]
    pub loan_term: u32,

    /// Vacancy rate in percent
    #[arg(long, default_value = "5")]
    pub vacancy_rate: Decimal,
}

pub fn run_listings(args: ListingsArgs) -> Result<Value, Box<dyn std::error::Error>> {
    if args.down_payment_pct < Decimal::ZERO || args.down_payment_pct > dec!(100) {
        return Err("--down-payment-pct must be between 0 and 100".into());
    }

    let source = JsonListingSource::new(&args.input);
    let listings = source.fetch_listings()?;
    log::info!("{} listings from {}", listings.len(), source.path().display());

    if !args.analyze {
        return Ok(json!({ "results": listings }));
    }

    let financing = ListingFinancing {
        down_payment_percent: args.down_payment_pct,
        interest_rate: args.interest_rate,
        loan_term: args.loan_term,
        vacancy_rate: args.vacancy_rate,
        ..Default::default()
    };

    let rows: Vec<Value> = listings
        .iter()
        .map(|listing| {
            let r = calculate_analysis(&listing.to_analysis(&financing));
            json!({
                "id": listing.id,
                "title": listing.title,
                "city": listing.city,
                "price": listing.price,
                "monthlyMortgagePayment": r.monthly_mortgage_payment,
                "monthlyCashFlow": r.monthly_cash_flow,
                "capRate": r.cap_rate,
                "cashOnCashReturn": r.cash_on_cash_return,
                "grossRentMultiplier": r.gross_rent_multiplier,
            })
        })
        .collect();

    Ok(json!({ "results": rows, "financing": financing }))
}
