//! Sentiment history records.
//!
//! A record is written once per successful analysis and never changes
//! afterwards. Persistence lives behind [`crate::db::HistoryStore`].

mod record;

pub use record::SentimentRecord;
