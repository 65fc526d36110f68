//! Wire shapes for the feed endpoints, kept separate from the view model
//! in `auconnect-common`: the reconciler turns these into display state by
//! resolving media URLs and annotating like membership.

use auconnect_common::model::{
    Id,
    post::{CommentMarker, PostMarker},
    user::Username,
};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

#[derive(Clone, Eq, PartialEq, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostRecord {
    pub id: Id<PostMarker>,
    #[serde(default)]
    pub text: String,
    /// Raw owner handle; `author_*` are the denormalized display fields
    /// the feed endpoint adds on top.
    #[serde(default)]
    pub username: Option<Username>,
    #[serde(default)]
    pub author_username: Option<Username>,
    #[serde(default)]
    pub author_name: Option<String>,
    #[serde(default)]
    pub author_profile_photo: Option<String>,
    #[serde(default)]
    pub hashtags: Vec<HashtagRecord>,
    #[serde(default)]
    pub image_urls: Vec<String>,
    #[serde(default)]
    pub video_urls: Vec<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_date: OffsetDateTime,
    #[serde(default)]
    pub like_count: u32,
    #[serde(default)]
    pub comments: Vec<CommentRecord>,
}

#[derive(Clone, Eq, PartialEq, Debug, Deserialize, Serialize)]
pub struct HashtagRecord {
    #[serde(default)]
    pub id: Option<u64>,
    pub name: String,
}

#[derive(Clone, Eq, PartialEq, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorRecord {
    pub username: Username,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub profile_photo: Option<String>,
}

#[derive(Clone, Eq, PartialEq, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentRecord {
    pub id: Id<CommentMarker>,
    #[serde(default)]
    pub text: String,
    #[serde(with = "time::serde::rfc3339")]
    pub date: OffsetDateTime,
    #[serde(default)]
    pub likes: u32,
    #[serde(default)]
    pub author: Option<AuthorRecord>,
    #[serde(default)]
    pub replies: Vec<ReplyRecord>,
}

#[derive(Clone, Eq, PartialEq, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplyRecord {
    pub id: Id<CommentMarker>,
    #[serde(default)]
    pub text: String,
    #[serde(with = "time::serde::rfc3339")]
    pub date: OffsetDateTime,
    #[serde(default)]
    pub likes: u32,
    #[serde(default)]
    pub author: Option<AuthorRecord>,
}

/// A comment or reply as returned by the creation endpoints: the bare
/// row, without the denormalized author block of [`CommentRecord`].
#[derive(Clone, Eq, PartialEq, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedCommentRecord {
    pub id: Id<CommentMarker>,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub username: Option<Username>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_date: OffsetDateTime,
    #[serde(default)]
    pub post_id: Option<Id<PostMarker>>,
    #[serde(default)]
    pub parent_id: Option<Id<CommentMarker>>,
}

/// Authoritative count returned by both like endpoints.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Default, Hash, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LikeCountResponse {
    pub like_count: u32,
}

#[derive(Clone, Eq, PartialEq, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileUrlResponse {
    pub file_url: String,
}
