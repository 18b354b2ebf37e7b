use std::fs;
use std::path::{Path, PathBuf};

use crate::error::PropertyAnalysisError;
use crate::listings::catalog::Listing;
use crate::PropertyAnalysisResult;

/// Where the opportunities catalog comes from.
pub trait ListingSource {
    fn fetch_listings(&self) -> PropertyAnalysisResult<Vec<Listing>>;
}

/// Listings held in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryListingSource {
    listings: Vec<Listing>,
}

impl InMemoryListingSource {
    pub fn new(listings: Vec<Listing>) -> Self {
        Self { listings }
    }
}

impl ListingSource for InMemoryListingSource {
    fn fetch_listings(&self) -> PropertyAnalysisResult<Vec<Listing>> {
        Ok(self.listings.clone())
    }
}

/// Listings read from a JSON array on disk, re-read on every fetch.
#[derive(Debug, Clone)]
pub struct JsonListingSource {
    path: PathBuf,
}

impl JsonListingSource {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ListingSource for JsonListingSource {
    fn fetch_listings(&self) -> PropertyAnalysisResult<Vec<Listing>> {
        let contents = fs::read_to_string(&self.path).map_err(|e| {
            PropertyAnalysisError::DataSource(format!(
                "Failed to read '{}': {}",
                self.path.display(),
                e
            ))
        })?;
        let listings: Vec<Listing> = serde_json::from_str(&contents).map_err(|e| {
            PropertyAnalysisError::DataSource(format!(
                "Failed to parse '{}': {}",
                self.path.display(),
                e
            ))
        })?;
        log::debug!("loaded {} listings from {}", listings.len(), self.path.display());
        Ok(listings)
    }
}
