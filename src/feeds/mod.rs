pub mod adapters;
pub mod client;
pub mod models;

pub use client::FeedClient;
