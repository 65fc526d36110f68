pub mod client;
pub mod connections;
pub mod directory;
pub mod events;
pub mod marketplace;
pub mod media;
pub mod messages;
pub mod news;
pub mod posts;
pub mod record;
pub mod users;

pub use client::{ApiClient, ApiError, Result};
