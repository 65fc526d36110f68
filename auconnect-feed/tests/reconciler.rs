//! Drives the reconciler against a real HTTP server on an ephemeral port,
//! with switchable failure injection per route.

use auconnect_api::ApiClient;
use auconnect_common::model::user::Username;
use auconnect_feed::{FeedReconciler, FeedSource};
use auconnect_store::engagement::{Engagement, EngagementStore, MemoryStore};
use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get, post},
};
use serde_json::{Value, json};
use std::sync::{Arc, Mutex};

#[derive(Default)]
struct Backend {
    feed_body: Value,
    like_count_reply: u32,
    fail_likes: bool,
    fail_deletes: bool,
    comment_calls: u32,
    like_calls: u32,
    liked_posts: Value,
    liked_comments: Value,
}

type Shared = Arc<Mutex<Backend>>;

async fn feed(State(state): State<Shared>) -> Json<Value> {
    Json(state.lock().unwrap().feed_body.clone())
}

async fn like_post(
    State(state): State<Shared>,
    Path(_id): Path<u64>,
) -> Result<Json<Value>, StatusCode> {
    let mut backend = state.lock().unwrap();
    backend.like_calls += 1;
    if backend.fail_likes {
        Err(StatusCode::INTERNAL_SERVER_ERROR)
    } else {
        Ok(Json(json!({ "likeCount": backend.like_count_reply })))
    }
}

async fn like_comment(
    State(state): State<Shared>,
    Path(_id): Path<u64>,
) -> Result<Json<Value>, StatusCode> {
    let mut backend = state.lock().unwrap();
    backend.like_calls += 1;
    if backend.fail_likes {
        Err(StatusCode::INTERNAL_SERVER_ERROR)
    } else {
        Ok(Json(json!({ "likeCount": backend.like_count_reply })))
    }
}

async fn add_comment(State(state): State<Shared>, Path(id): Path<u64>) -> Json<Value> {
    state.lock().unwrap().comment_calls += 1;
    Json(json!({
        "id": 900,
        "text": "stored",
        "username": "priya_k",
        "postId": id,
        "createdDate": "2026-03-02T09:00:00Z",
    }))
}

async fn add_reply(
    State(state): State<Shared>,
    Path((post_id, comment_id)): Path<(u64, u64)>,
) -> Json<Value> {
    state.lock().unwrap().comment_calls += 1;
    Json(json!({
        "id": 77,
        "text": "same here",
        "username": "priya_k",
        "postId": post_id,
        "parentId": comment_id,
        "createdDate": "2026-03-02T10:00:00Z",
    }))
}

async fn delete_post(
    State(state): State<Shared>,
    Path(_id): Path<u64>,
) -> Result<StatusCode, StatusCode> {
    if state.lock().unwrap().fail_deletes {
        Err(StatusCode::INTERNAL_SERVER_ERROR)
    } else {
        Ok(StatusCode::OK)
    }
}

async fn user_likes(State(state): State<Shared>) -> Json<Value> {
    Json(state.lock().unwrap().liked_posts.clone())
}

async fn user_comment_likes(State(state): State<Shared>) -> Json<Value> {
    Json(state.lock().unwrap().liked_comments.clone())
}

async fn spawn_backend(state: Shared) -> String {
    let app = Router::new()
        .route("/api/posts/feed", get(feed))
        .route("/api/posts/user-likes", get(user_likes))
        .route("/api/posts/user-comment-likes", get(user_comment_likes))
        .route("/api/posts/{id}/like", post(like_post))
        .route("/api/posts/{id}/comments", post(add_comment))
        .route("/api/posts/{id}/comments/{comment_id}/replies", post(add_reply))
        .route("/api/posts/comments/{id}/like", post(like_comment))
        .route("/api/posts/{id}", delete(delete_post))
        .with_state(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

fn post_body(id: u64, like_count: u32) -> Value {
    json!({
        "id": id,
        "text": "first day at the new lab",
        "username": "priya_k",
        "authorUsername": "priya_k",
        "authorName": "Priya K",
        "authorProfilePhoto": "/uploads/priya.png",
        "imageUrls": ["photo.jpg"],
        "videoUrls": [],
        "createdDate": "2026-03-01T10:00:00Z",
        "likeCount": like_count,
        "comments": [{
            "id": 31,
            "text": "congrats!",
            "date": "2026-03-01T11:00:00Z",
            "likes": 2,
            "author": { "username": "rahul.m", "name": "Rahul M", "profilePhoto": null },
            "replies": [{
                "id": 32,
                "text": "+1",
                "date": "2026-03-01T12:00:00Z",
                "likes": 1,
                "author": { "username": "anita.v", "name": "Anita V", "profilePhoto": null }
            }]
        }]
    })
}

fn viewer() -> Username {
    Username::new("priya_k".to_owned()).unwrap()
}

async fn reconciler_with(
    state: &Shared,
    store: Arc<MemoryStore>,
) -> FeedReconciler<Arc<MemoryStore>> {
    let base_url = spawn_backend(Arc::clone(state)).await;
    FeedReconciler::new(ApiClient::new(base_url), store, viewer(), FeedSource::Home)
}

async fn reconciler_and_origin(
    state: &Shared,
    store: Arc<MemoryStore>,
) -> (FeedReconciler<Arc<MemoryStore>>, String) {
    let base_url = spawn_backend(Arc::clone(state)).await;
    let feed = FeedReconciler::new(
        ApiClient::new(base_url.clone()),
        store,
        viewer(),
        FeedSource::Home,
    );
    (feed, base_url)
}

#[tokio::test]
async fn load_feed_replaces_wholesale_and_annotates() {
    let state = Shared::default();
    state.lock().unwrap().feed_body = json!([post_body(1, 3), post_body(2, 0)]);

    let store = Arc::new(MemoryStore::new());
    store.toggle(&viewer(), Engagement::Post(1.into()), true);

    let (mut feed, origin) = reconciler_and_origin(&state, Arc::clone(&store)).await;
    feed.load_feed().await.unwrap();

    assert_eq!(feed.posts().len(), 2);
    assert!(feed.posts()[0].is_liked);
    assert!(!feed.posts()[1].is_liked);
    assert_eq!(feed.posts()[0].images[0], format!("{origin}/photo.jpg"));
    assert_eq!(
        feed.posts()[0].author.avatar_url,
        format!("{origin}/uploads/priya.png")
    );

    // A second load with a different server response yields exactly the
    // new posts; nothing from the first load survives.
    state.lock().unwrap().feed_body = json!([post_body(3, 9)]);
    feed.load_feed().await.unwrap();

    assert_eq!(feed.posts().len(), 1);
    assert_eq!(feed.posts()[0].id, 3.into());
}

#[tokio::test]
async fn failed_load_keeps_previous_posts() {
    let state = Shared::default();
    state.lock().unwrap().feed_body = json!([post_body(1, 3)]);

    let mut feed = reconciler_with(&state, Arc::new(MemoryStore::new())).await;
    feed.load_feed().await.unwrap();

    // Not an array: the body fails to decode, the list must survive.
    state.lock().unwrap().feed_body = json!({ "oops": true });
    assert!(feed.load_feed().await.is_err());
    assert_eq!(feed.posts().len(), 1);
}

#[tokio::test]
async fn toggle_like_applies_server_count() {
    let state = Shared::default();
    {
        let mut backend = state.lock().unwrap();
        backend.feed_body = json!([post_body(1, 3)]);
        backend.like_count_reply = 5;
    }

    let store = Arc::new(MemoryStore::new());
    let mut feed = reconciler_with(&state, Arc::clone(&store)).await;
    feed.load_feed().await.unwrap();
    assert!(!feed.posts()[0].is_liked);

    feed.toggle_like(1.into()).await.unwrap();

    // The optimistic +1 (3 -> 4) was overwritten by the authoritative 5.
    assert_eq!(feed.posts()[0].like_count, 5);
    assert!(feed.posts()[0].is_liked);
    assert!(store.load(&viewer()).is_post_liked(1.into()));
}

#[tokio::test]
async fn failed_toggle_like_rolls_back_in_full() {
    let state = Shared::default();
    {
        let mut backend = state.lock().unwrap();
        backend.feed_body = json!([post_body(1, 3)]);
        backend.fail_likes = true;
    }

    let store = Arc::new(MemoryStore::new());
    let mut feed = reconciler_with(&state, Arc::clone(&store)).await;
    feed.load_feed().await.unwrap();

    assert!(feed.toggle_like(1.into()).await.is_err());

    assert_eq!(feed.posts()[0].like_count, 3);
    assert!(!feed.posts()[0].is_liked);
    assert!(!store.load(&viewer()).is_post_liked(1.into()));
}

#[tokio::test]
async fn unlike_never_shows_a_negative_count() {
    let state = Shared::default();
    {
        let mut backend = state.lock().unwrap();
        backend.feed_body = json!([post_body(1, 0)]);
        backend.like_count_reply = 0;
    }

    // Cache says liked, server count is already 0: the optimistic
    // decrement must clamp instead of underflowing.
    let store = Arc::new(MemoryStore::new());
    store.toggle(&viewer(), Engagement::Post(1.into()), true);

    let mut feed = reconciler_with(&state, Arc::clone(&store)).await;
    feed.load_feed().await.unwrap();
    assert!(feed.posts()[0].is_liked);

    feed.toggle_like(1.into()).await.unwrap();

    assert_eq!(feed.posts()[0].like_count, 0);
    assert!(!feed.posts()[0].is_liked);
    assert!(!store.load(&viewer()).is_post_liked(1.into()));
}

#[tokio::test]
async fn blank_comment_is_a_no_op_without_network() {
    let state = Shared::default();
    state.lock().unwrap().feed_body = json!([post_body(1, 3)]);

    let mut feed = reconciler_with(&state, Arc::new(MemoryStore::new())).await;
    feed.load_feed().await.unwrap();
    let before = feed.posts().to_vec();

    feed.add_comment(1.into(), "").await.unwrap();
    feed.add_comment(1.into(), "   ").await.unwrap();

    assert_eq!(feed.posts(), before);
    assert_eq!(state.lock().unwrap().comment_calls, 0);
}

#[tokio::test]
async fn add_comment_refreshes_the_feed() {
    let state = Shared::default();
    state.lock().unwrap().feed_body = json!([post_body(1, 3)]);

    let mut feed = reconciler_with(&state, Arc::new(MemoryStore::new())).await;
    feed.load_feed().await.unwrap();
    assert_eq!(feed.posts()[0].comments.len(), 1);

    // The next fetch returns the post with an extra comment, as the
    // server would after storing ours.
    let mut updated = post_body(1, 3);
    updated["comments"].as_array_mut().unwrap().push(json!({
        "id": 900,
        "text": "stored",
        "date": "2026-03-02T09:00:00Z",
        "likes": 0,
        "author": { "username": "priya_k", "name": "Priya K", "profilePhoto": null },
        "replies": []
    }));
    state.lock().unwrap().feed_body = json!([updated]);

    feed.add_comment(1.into(), "stored").await.unwrap();

    assert_eq!(state.lock().unwrap().comment_calls, 1);
    assert_eq!(feed.posts()[0].comments.len(), 2);
    assert_eq!(feed.posts()[0].comments[1].id, 900.into());
}

#[tokio::test]
async fn comment_like_targets_replies_through_the_shared_id_space() {
    let state = Shared::default();
    {
        let mut backend = state.lock().unwrap();
        backend.feed_body = json!([post_body(1, 3)]);
        backend.like_count_reply = 7;
    }

    let store = Arc::new(MemoryStore::new());
    let mut feed = reconciler_with(&state, Arc::clone(&store)).await;
    feed.load_feed().await.unwrap();

    // 32 is a reply id; the lookup must find it inside the comment.
    feed.toggle_comment_like(32.into()).await.unwrap();

    let reply = &feed.posts()[0].comments[0].replies[0];
    assert_eq!(reply.like_count, 7);
    assert!(reply.is_liked);
    assert!(store.load(&viewer()).is_comment_liked(32.into()));
}

#[tokio::test]
async fn failed_comment_like_rolls_back() {
    let state = Shared::default();
    {
        let mut backend = state.lock().unwrap();
        backend.feed_body = json!([post_body(1, 3)]);
        backend.fail_likes = true;
    }

    let store = Arc::new(MemoryStore::new());
    let mut feed = reconciler_with(&state, Arc::clone(&store)).await;
    feed.load_feed().await.unwrap();

    assert!(feed.toggle_comment_like(31.into()).await.is_err());

    let comment = &feed.posts()[0].comments[0];
    assert_eq!(comment.like_count, 2);
    assert!(!comment.is_liked);
    assert!(!store.load(&viewer()).is_comment_liked(31.into()));
}

#[tokio::test]
async fn add_reply_appends_in_place_without_refetch() {
    let state = Shared::default();
    state.lock().unwrap().feed_body = json!([post_body(1, 3)]);

    let mut feed = reconciler_with(&state, Arc::new(MemoryStore::new())).await;
    feed.load_feed().await.unwrap();
    assert_eq!(feed.posts()[0].comments[0].replies.len(), 1);

    feed.add_reply(1.into(), 31.into(), "same here").await.unwrap();

    let replies = &feed.posts()[0].comments[0].replies;
    assert_eq!(replies.len(), 2);
    assert_eq!(replies[1].id, 77.into());
    assert_eq!(replies[1].text, "same here");
    assert_eq!(replies[1].like_count, 0);
}

#[tokio::test]
async fn blank_reply_is_a_no_op_without_network() {
    let state = Shared::default();
    state.lock().unwrap().feed_body = json!([post_body(1, 3)]);

    let mut feed = reconciler_with(&state, Arc::new(MemoryStore::new())).await;
    feed.load_feed().await.unwrap();

    feed.add_reply(1.into(), 31.into(), "  ").await.unwrap();

    assert_eq!(feed.posts()[0].comments[0].replies.len(), 1);
    assert_eq!(state.lock().unwrap().comment_calls, 0);
}

#[tokio::test]
async fn delete_waits_for_confirmation() {
    let state = Shared::default();
    {
        let mut backend = state.lock().unwrap();
        backend.feed_body = json!([post_body(1, 3), post_body(2, 0)]);
        backend.fail_deletes = true;
    }

    let mut feed = reconciler_with(&state, Arc::new(MemoryStore::new())).await;
    feed.load_feed().await.unwrap();

    assert!(feed.delete_post(2.into()).await.is_err());
    assert_eq!(feed.posts().len(), 2);

    state.lock().unwrap().fail_deletes = false;
    feed.delete_post(2.into()).await.unwrap();

    assert_eq!(feed.posts().len(), 1);
    assert_eq!(feed.posts()[0].id, 1.into());
}

#[tokio::test]
async fn sync_engagement_seeds_cache_from_server() {
    let state = Shared::default();
    {
        let mut backend = state.lock().unwrap();
        backend.feed_body = json!([post_body(1, 3)]);
        backend.liked_posts = json!([1]);
        backend.liked_comments = json!([31]);
    }

    let store = Arc::new(MemoryStore::new());
    let mut feed = reconciler_with(&state, Arc::clone(&store)).await;
    feed.load_feed().await.unwrap();
    assert!(!feed.posts()[0].is_liked);

    feed.sync_engagement().await.unwrap();

    assert!(feed.posts()[0].is_liked);
    assert!(feed.posts()[0].comments[0].is_liked);
    assert!(!feed.posts()[0].comments[0].replies[0].is_liked);
    let record = store.load(&viewer());
    assert!(record.is_post_liked(1.into()));
    assert!(record.is_comment_liked(31.into()));
}

#[tokio::test]
async fn unknown_targets_are_reported_without_network() {
    let state = Shared::default();
    state.lock().unwrap().feed_body = json!([post_body(1, 3)]);

    let mut feed = reconciler_with(&state, Arc::new(MemoryStore::new())).await;
    feed.load_feed().await.unwrap();

    assert!(feed.toggle_like(99.into()).await.is_err());
    assert!(feed.toggle_comment_like(99.into()).await.is_err());
    assert_eq!(state.lock().unwrap().like_calls, 0);
}
