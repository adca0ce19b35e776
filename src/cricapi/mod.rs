pub mod client;
pub mod source;

pub use client::CricApiClient;
pub use source::MatchSource;
