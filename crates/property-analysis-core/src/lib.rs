pub mod analysis;
pub mod error;
pub mod time_value;
pub mod types;

#[cfg(feature = "portfolio")]
pub mod portfolio;

#[cfg(feature = "listings")]
pub mod listings;

pub use error::{FieldError, PropertyAnalysisError};
pub use types::*;

/// Standard result type for all property-analysis operations
pub type PropertyAnalysisResult<T> = Result<T, PropertyAnalysisError>;
