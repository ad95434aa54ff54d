//! The maintenance jobs, one per subcommand. Each processes its items one at
//! a time, pausing between network calls, and logs a tally at the end.

use chrono::{DateTime, FixedOffset};
use log::info;

use crate::{blogger::BloggerClient, settings::Settings};

pub mod clean_mappings;
pub mod delete_old;
pub mod lookup;
pub mod match_bot;
pub mod update_posts;

pub struct TaskContext<'a> {
    pub blogger: &'a BloggerClient,
    pub settings: &'a Settings,
    pub now: DateTime<FixedOffset>,
    /// Decide and log, but never write to the blog or to disk.
    pub dry_run: bool,
}

#[derive(Clone, Copy, Default, PartialEq, Eq, Debug)]
pub struct Tally {
    pub changed: usize,
    pub skipped: usize,
    pub errors: usize,
}

impl Tally {
    pub fn total(&self) -> usize {
        self.changed + self.skipped + self.errors
    }

    fn log_summary(&self, changed_label: &str) {
        info!("{changed_label}: {}", self.changed);
        info!("Skipped: {}", self.skipped);
        info!("Errors: {}", self.errors);
        info!("Total processed: {}", self.total());
    }
}
