#![forbid(unsafe_code)]

pub mod cli;
pub mod crawl;
pub mod fetch;
pub mod formats;
pub mod listing;
pub mod logging;
pub mod normalize;
pub mod seeds;
pub mod selectors;
pub mod sink;

#[cfg(test)]
mod test_pages;
