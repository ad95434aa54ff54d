//! Reading live match posts: which posts are matches, when they were published,
//! and what they announce.

pub mod date_category;
pub mod extract;
pub mod kickoff;
pub mod title;
