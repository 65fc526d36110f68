use crate::{
    client::{ApiClient, Result},
    record::{CreatedCommentRecord, LikeCountResponse, PostRecord},
};
use auconnect_common::model::{
    Id,
    post::{CommentMarker, PostMarker},
    user::Username,
};
use serde::Serialize;
use std::collections::BTreeSet;

#[derive(Clone, Eq, PartialEq, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePostRequest {
    pub text: String,
    pub username: Username,
    pub hashtags: BTreeSet<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub image_urls: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub video_urls: Vec<String>,
}

#[derive(Clone, Eq, PartialEq, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct LikeRequest<'a> {
    username: &'a Username,
    is_liked: bool,
}

#[derive(Clone, Eq, PartialEq, Debug, Serialize)]
struct NewCommentRequest<'a> {
    text: &'a str,
    username: &'a Username,
}

impl ApiClient {
    /// The viewer's home feed: own posts plus connections', newest first.
    pub async fn feed(&self, username: &Username) -> Result<Vec<PostRecord>> {
        self.get_json(&format!("/api/posts/feed?username={username}"))
            .await
    }

    /// All posts of a single author, newest first.
    pub async fn posts_by_author(&self, username: &Username) -> Result<Vec<PostRecord>> {
        self.get_json(&format!("/api/posts?username={username}"))
            .await
    }

    pub async fn create_post(&self, request: &CreatePostRequest) -> Result<()> {
        self.post_unit("/api/posts", request).await
    }

    /// Reports the viewer's new like state; the reply carries the
    /// authoritative count.
    pub async fn set_post_liked(
        &self,
        post: Id<PostMarker>,
        username: &Username,
        is_liked: bool,
    ) -> Result<LikeCountResponse> {
        self.post_json(
            &format!("/api/posts/{post}/like"),
            &LikeRequest { username, is_liked },
        )
        .await
    }

    pub async fn add_comment(
        &self,
        post: Id<PostMarker>,
        username: &Username,
        text: &str,
    ) -> Result<CreatedCommentRecord> {
        self.post_json(
            &format!("/api/posts/{post}/comments"),
            &NewCommentRequest { text, username },
        )
        .await
    }

    pub async fn add_reply(
        &self,
        post: Id<PostMarker>,
        comment: Id<CommentMarker>,
        username: &Username,
        text: &str,
    ) -> Result<CreatedCommentRecord> {
        self.post_json(
            &format!("/api/posts/{post}/comments/{comment}/replies"),
            &NewCommentRequest { text, username },
        )
        .await
    }

    /// Comment and reply ids share one space, so this serves both levels.
    pub async fn set_comment_liked(
        &self,
        comment: Id<CommentMarker>,
        username: &Username,
        is_liked: bool,
    ) -> Result<LikeCountResponse> {
        self.post_json(
            &format!("/api/posts/comments/{comment}/like"),
            &LikeRequest { username, is_liked },
        )
        .await
    }

    pub async fn liked_post_ids(&self, username: &Username) -> Result<Vec<Id<PostMarker>>> {
        self.get_json(&format!("/api/posts/user-likes?username={username}"))
            .await
    }

    pub async fn liked_comment_ids(&self, username: &Username) -> Result<Vec<Id<CommentMarker>>> {
        self.get_json(&format!("/api/posts/user-comment-likes?username={username}"))
            .await
    }

    pub async fn delete_post(&self, post: Id<PostMarker>) -> Result<()> {
        self.delete(&format!("/api/posts/{post}")).await
    }
}
