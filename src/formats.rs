use serde::{Deserialize, Serialize};
use url::Url;

/// One scraped title card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListingRecord {
    pub category: String,
    pub url: String,
    pub title: String,
    pub subtitle: String,
    pub authors: Vec<String>,
    pub narrators: Vec<String>,
    pub length_minutes: Option<u32>,
    pub release_date: String,
    pub language: String,
    pub star_rating: String,
    pub rating_count: String,
    pub price: String,
    pub is_podcast: bool,
}

/// A row of the category seed file. Other columns are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct SeedRow {
    pub title_list_url: String,
}

/// A listing page waiting to be fetched and handed to the listing parser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTask {
    pub url: Url,
}

impl FetchTask {
    pub fn new(url: Url) -> Self {
        Self { url }
    }
}
