pub mod ask;
pub mod chat;
pub mod dispatch;
pub mod ingest;
pub mod providers;
pub mod query;
