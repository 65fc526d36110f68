use crate::model::{Id, user::Username};
use std::collections::BTreeSet;
use time::OffsetDateTime;

#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Default, Hash)]
pub struct PostMarker;

/// Marker for the shared comment/reply identifier space.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Default, Hash)]
pub struct CommentMarker;

#[derive(Clone, Eq, PartialEq, Debug)]
pub struct PostAuthor {
    pub username: Username,
    pub name: String,
    /// Absolute URL, already passed through the media resolver.
    pub avatar_url: String,
}

/// A feed entry as displayed. The authoritative copy lives on the server;
/// `is_liked` is derived from the viewer's engagement record, never from
/// the wire.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct Post {
    pub id: Id<PostMarker>,
    pub author: PostAuthor,
    pub text: String,
    pub hashtags: BTreeSet<String>,
    pub images: Vec<String>,
    pub videos: Vec<String>,
    pub created_at: OffsetDateTime,
    pub like_count: u32,
    pub is_liked: bool,
    pub comments: Vec<Comment>,
}

#[derive(Clone, Eq, PartialEq, Debug)]
pub struct Comment {
    pub id: Id<CommentMarker>,
    pub author: PostAuthor,
    pub text: String,
    pub created_at: OffsetDateTime,
    pub like_count: u32,
    pub is_liked: bool,
    pub replies: Vec<Reply>,
}

/// One level of nesting only: a reply never carries replies of its own.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct Reply {
    pub id: Id<CommentMarker>,
    pub author: PostAuthor,
    pub text: String,
    pub created_at: OffsetDateTime,
    pub like_count: u32,
    pub is_liked: bool,
}
