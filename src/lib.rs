pub mod blogger;
pub mod chrono_util;
pub mod post;
pub mod render;
pub mod scrape;
pub mod settings;
pub mod tasks;
pub mod url_mappings;
