//! Reading the sports site: the fixture listing and individual match pages.

pub mod fetch;
pub mod listing;
pub mod report;

pub use fetch::PageFetcher;
pub use listing::{decode_match_url, parse_listing, ListedMatch, ListedTeams};
pub use report::{extract_report, EventKind, MatchEvent, Score, ScrapedReport};
