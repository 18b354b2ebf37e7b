pub mod catalog;
pub mod source;

pub use catalog::{Listing, ListingFinancing};
pub use source::{InMemoryListingSource, JsonListingSource, ListingSource};
