//! In-memory storage shared by the workers of one crawl
//!
//! - `DedupSet`: every canonical URL ever accepted, so nothing is queued twice
//! - `ResultStore`: the recorded outcome of every visited or terminal URL
//!
//! Both are safe to share across tasks; each guards its own map with a
//! mutex that is never held across an await point.

mod dedup;
mod results;

pub use dedup::DedupSet;
pub use results::ResultStore;
