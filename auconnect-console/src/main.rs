use auconnect_api::ApiClient;
use auconnect_common::model::user::{InvalidUsernameError, Username};
use auconnect_feed::{FeedError, FeedReconciler, FeedSource};
use auconnect_store::engagement::LocalStore;
use serde::Deserialize;
use std::path::PathBuf;
use thiserror::Error;
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Error)]
enum InitError {
    #[error("Error parsing .env file: {0}")]
    Dotenv(#[from] dotenvy::Error),
    #[error("Error parsing environment: {0}")]
    Envy(#[from] envy::Error),
    #[error("FEED_USERNAME is not a usable handle: {0}")]
    Username(#[from] InvalidUsernameError),
    #[error("Error loading the feed: {0}")]
    Feed(#[from] FeedError),
}

#[derive(Clone, Eq, PartialEq, Debug, Deserialize)]
struct Env {
    feed_username: String,
    #[serde(default = "default_api_base_url")]
    api_base_url: String,
    #[serde(default = "default_data_dir")]
    data_dir: PathBuf,
}

fn default_api_base_url() -> String {
    "http://localhost:8080".to_owned()
}

fn default_data_dir() -> PathBuf {
    PathBuf::from(".auconnect")
}

fn install_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "auconnect_console=debug,auconnect_feed=debug,\
                auconnect_api=debug,auconnect_store=debug"
                    .into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn get_env() -> Result<Env, InitError> {
    if let Err(e) = dotenvy::dotenv() {
        if e.not_found() {
            debug!("No .dotenv file found");
        } else {
            return Err(e.into());
        }
    }

    envy::from_env().map_err(InitError::from)
}

#[tokio::main]
async fn main() -> Result<(), InitError> {
    install_tracing();
    let env = get_env()?;
    let viewer = Username::new(env.feed_username)?;

    let client = ApiClient::new(env.api_base_url);
    let store = LocalStore::new(env.data_dir);
    let mut feed = FeedReconciler::new(client, store, viewer, FeedSource::Home);

    feed.load_feed().await?;

    for post in feed.posts() {
        let comment_count: usize = post
            .comments
            .iter()
            .map(|comment| 1 + comment.replies.len())
            .sum();
        let liked = if post.is_liked { " ♥" } else { "" };

        println!(
            "[{}] {}: {} likes{liked}, {} comments",
            post.created_at, post.author.name, post.like_count, comment_count
        );
        println!("  {}", post.text);
        if !post.hashtags.is_empty() {
            let tags: Vec<String> = post.hashtags.iter().map(|tag| format!("#{tag}")).collect();
            println!("  {}", tags.join(" "));
        }
    }

    Ok(())
}
