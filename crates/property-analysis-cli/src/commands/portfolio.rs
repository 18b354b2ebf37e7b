use clap::Args;
use serde_json::Value;

use property_analysis_core::portfolio::holdings::{self, PortfolioProperty};

use crate::input;

/// Arguments for portfolio aggregation
#[derive(Args)]
pub struct PortfolioArgs {
    /// Path to JSON or YAML file holding an array of portfolio properties
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_portfolio(args: PortfolioArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let properties: Vec<PortfolioProperty> = if let Some(ref path) = args.input {
        input::file::read_document(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        return Err("--input <file.json> or stdin required for portfolio analysis".into());
    };
    let result = holdings::analyze_portfolio(&properties)?;
    Ok(serde_json::to_value(result)?)
}
