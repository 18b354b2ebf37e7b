pub mod analysis;
pub mod listings;
pub mod portfolio;
