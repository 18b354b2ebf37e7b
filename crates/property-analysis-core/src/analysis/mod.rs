pub mod breakdown;
pub mod calculator;
pub mod form;

pub use breakdown::{CashFlowDirection, MonthlyBreakdown};
pub use calculator::{analyze_property, calculate_analysis, AnalysisResults, PropertyAnalysis};
pub use form::PropertyAnalysisForm;
