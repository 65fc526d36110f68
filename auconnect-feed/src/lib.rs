//! Feed reconciliation.
//!
//! [`FeedReconciler`] keeps a displayed post list consistent with the
//! remote source of truth while giving instant feedback on engagement
//! actions. Reversible mutations (like toggles) apply optimistically and
//! roll back in full on failure; destructive ones (post deletion) wait
//! for server confirmation; comment creation trades a refetch for not
//! having to reconcile server-assigned ids locally.
//!
//! The server owns every count. The viewer's own like membership is owned
//! by the injected [`EngagementStore`] and must agree with the displayed
//! `is_liked` flags after every operation settles, success or rollback.

use auconnect_api::{
    ApiClient, ApiError,
    posts::CreatePostRequest,
    record::{AuthorRecord, CommentRecord, PostRecord, ReplyRecord},
};
use auconnect_common::{
    media::MediaUrlResolver,
    model::{
        Id,
        post::{Comment, CommentMarker, Post, PostAuthor, PostMarker, Reply},
        user::Username,
    },
    text::extract_hashtags,
};
use auconnect_store::engagement::{Engagement, EngagementRecord, EngagementStore};
use thiserror::Error;
use tracing::{debug, warn};

pub type Result<T, E = FeedError> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum FeedError {
    #[error("Post {0} is not in the loaded feed")]
    UnknownPost(Id<PostMarker>),
    #[error("Comment {0} is not in the loaded feed")]
    UnknownComment(Id<CommentMarker>),
    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Which post collection the reconciler mirrors.
#[derive(Clone, Eq, PartialEq, Debug)]
pub enum FeedSource {
    /// The viewer's home feed: own posts plus connections'.
    Home,
    /// Every post of a single author, e.g. the university account page.
    Author(Username),
}

/// In-memory mirror of one feed for one viewer.
///
/// All mutating operations take `&mut self`: a reconciler never has two
/// of its own calls in flight, so a rapid re-trigger waits for the
/// previous call instead of racing it. Two reconcilers over the same
/// store can still diverge until the next refresh.
pub struct FeedReconciler<S> {
    client: ApiClient,
    store: S,
    viewer: Username,
    source: FeedSource,
    resolver: MediaUrlResolver,
    posts: Vec<Post>,
}

impl<S: EngagementStore> FeedReconciler<S> {
    #[must_use]
    pub fn new(client: ApiClient, store: S, viewer: Username, source: FeedSource) -> Self {
        let resolver = client.media_resolver();
        Self {
            client,
            store,
            viewer,
            source,
            resolver,
            posts: Vec::new(),
        }
    }

    #[must_use]
    pub fn posts(&self) -> &[Post] {
        &self.posts
    }

    #[must_use]
    pub fn viewer(&self) -> &Username {
        &self.viewer
    }

    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    fn post_mut(&mut self, id: Id<PostMarker>) -> Option<&mut Post> {
        self.posts.iter_mut().find(|post| post.id == id)
    }

    /// Replaces the post list wholesale with the server's current feed,
    /// annotated with the viewer's cached like state and absolute media
    /// URLs. A fresh load always wins; there is no incremental merge. On
    /// failure the previous list stays displayed, stale but available.
    pub async fn load_feed(&mut self) -> Result<()> {
        let records = match &self.source {
            FeedSource::Home => self.client.feed(&self.viewer).await,
            FeedSource::Author(author) => self.client.posts_by_author(author).await,
        };

        let records = match records {
            Ok(records) => records,
            Err(err) => {
                warn!(error = %err, "Feed refresh failed, keeping previous posts");
                return Err(err.into());
            }
        };

        let engagement = self.store.load(&self.viewer);
        self.posts = records
            .into_iter()
            .filter_map(|record| assemble_post(record, &self.resolver, &engagement))
            .collect();
        debug!(posts = self.posts.len(), "Feed replaced");
        Ok(())
    }

    /// Optimistically flips the viewer's like on a post, then confirms
    /// against the server. The server count overwrites the optimistic one
    /// on success; on failure the pre-toggle state is restored exactly,
    /// with no extra refetch.
    pub async fn toggle_like(&mut self, post_id: Id<PostMarker>) -> Result<()> {
        let (prev_count, prev_liked) = {
            let post = self.post_mut(post_id).ok_or(FeedError::UnknownPost(post_id))?;
            let snapshot = (post.like_count, post.is_liked);
            let new_liked = !post.is_liked;
            post.like_count = if new_liked {
                post.like_count + 1
            } else {
                post.like_count.saturating_sub(1)
            };
            post.is_liked = new_liked;
            snapshot
        };
        let new_liked = !prev_liked;
        self.store
            .toggle(&self.viewer, Engagement::Post(post_id), new_liked);

        match self
            .client
            .set_post_liked(post_id, &self.viewer, new_liked)
            .await
        {
            Ok(response) => {
                if let Some(post) = self.post_mut(post_id) {
                    post.like_count = response.like_count;
                }
                Ok(())
            }
            Err(err) => {
                warn!(post = %post_id, error = %err, "Like update failed, rolling back");
                if let Some(post) = self.post_mut(post_id) {
                    post.like_count = prev_count;
                    post.is_liked = prev_liked;
                }
                self.store
                    .toggle(&self.viewer, Engagement::Post(post_id), prev_liked);
                Err(err.into())
            }
        }
    }

    /// Posts a comment and refreshes the whole feed on success. Comments
    /// are not inserted optimistically: the brief latency gap is accepted
    /// instead of reconciling a server-assigned id locally.
    /// Whitespace-only text is silently ignored before any mutation or
    /// network call.
    pub async fn add_comment(&mut self, post_id: Id<PostMarker>, text: &str) -> Result<()> {
        let text = text.trim();
        if text.is_empty() {
            return Ok(());
        }

        self.client.add_comment(post_id, &self.viewer, text).await?;
        self.load_feed().await
    }

    /// Same optimistic-then-confirm pattern as [`Self::toggle_like`]. The
    /// target is looked up across comments and replies by the shared id.
    pub async fn toggle_comment_like(&mut self, comment_id: Id<CommentMarker>) -> Result<()> {
        let Some((prev_count, prev_liked)) =
            with_engagement_target(&mut self.posts, comment_id, |count, liked| (*count, *liked))
        else {
            return Err(FeedError::UnknownComment(comment_id));
        };

        let new_liked = !prev_liked;
        let _ = with_engagement_target(&mut self.posts, comment_id, |count, liked| {
            *count = if new_liked {
                *count + 1
            } else {
                count.saturating_sub(1)
            };
            *liked = new_liked;
        });
        self.store
            .toggle(&self.viewer, Engagement::Comment(comment_id), new_liked);

        match self
            .client
            .set_comment_liked(comment_id, &self.viewer, new_liked)
            .await
        {
            Ok(response) => {
                let _ = with_engagement_target(&mut self.posts, comment_id, |count, _| {
                    *count = response.like_count;
                });
                Ok(())
            }
            Err(err) => {
                warn!(comment = %comment_id, error = %err, "Comment like failed, rolling back");
                let _ = with_engagement_target(&mut self.posts, comment_id, |count, liked| {
                    *count = prev_count;
                    *liked = prev_liked;
                });
                self.store
                    .toggle(&self.viewer, Engagement::Comment(comment_id), prev_liked);
                Err(err.into())
            }
        }
    }

    /// Posts a reply, then appends it in place using the server-returned
    /// id and timestamp. There is no optimistic step before the send (no
    /// id to key on yet) and no refetch after it.
    pub async fn add_reply(
        &mut self,
        post_id: Id<PostMarker>,
        comment_id: Id<CommentMarker>,
        text: &str,
    ) -> Result<()> {
        let text = text.trim();
        if text.is_empty() {
            return Ok(());
        }

        let created = self
            .client
            .add_reply(post_id, comment_id, &self.viewer, text)
            .await?;

        let reply = Reply {
            id: created.id,
            author: PostAuthor {
                username: self.viewer.clone(),
                name: self.viewer.get().to_owned(),
                avatar_url: self.resolver.resolve_or_placeholder(None),
            },
            text: if created.text.is_empty() {
                text.to_owned()
            } else {
                created.text
            },
            created_at: created.created_date,
            like_count: 0,
            is_liked: false,
        };

        let comment = self.post_mut(post_id).and_then(|post| {
            post.comments
                .iter_mut()
                .find(|comment| comment.id == comment_id)
        });
        match comment {
            Some(comment) => comment.replies.push(reply),
            None => warn!(
                post = %post_id,
                comment = %comment_id,
                "Reply created but its comment is no longer loaded"
            ),
        }
        Ok(())
    }

    /// Deletion is destructive and irreversible, so the list is only
    /// touched once the server has confirmed.
    pub async fn delete_post(&mut self, post_id: Id<PostMarker>) -> Result<()> {
        if let Err(err) = self.client.delete_post(post_id).await {
            warn!(post = %post_id, error = %err, "Delete failed, keeping post");
            return Err(err.into());
        }

        self.posts.retain(|post| post.id != post_id);
        Ok(())
    }

    /// Creates a post (hashtags extracted from the text client-side) and
    /// refreshes the feed. Empty input with no media is silently ignored.
    pub async fn create_post(
        &mut self,
        text: &str,
        image_urls: Vec<String>,
        video_urls: Vec<String>,
    ) -> Result<()> {
        let text = text.trim();
        if text.is_empty() && image_urls.is_empty() && video_urls.is_empty() {
            return Ok(());
        }

        let request = CreatePostRequest {
            text: text.to_owned(),
            username: self.viewer.clone(),
            hashtags: extract_hashtags(text),
            image_urls,
            video_urls,
        };
        self.client.create_post(&request).await?;
        self.load_feed().await
    }

    /// Seeds the engagement record from the server's own view of the
    /// viewer's likes and re-annotates the loaded posts. Used at sign-in
    /// on a fresh device, where the local cache starts empty.
    pub async fn sync_engagement(&mut self) -> Result<()> {
        let liked_posts = self.client.liked_post_ids(&self.viewer).await?;
        let liked_comments = self.client.liked_comment_ids(&self.viewer).await?;

        let record = EngagementRecord::from_parts(
            liked_posts.into_iter().collect(),
            liked_comments.into_iter().collect(),
        );
        self.store.save(&self.viewer, &record);

        for post in &mut self.posts {
            post.is_liked = record.is_post_liked(post.id);
            for comment in &mut post.comments {
                comment.is_liked = record.is_comment_liked(comment.id);
                for reply in &mut comment.replies {
                    reply.is_liked = record.is_comment_liked(reply.id);
                }
            }
        }
        Ok(())
    }
}

/// Runs `f` on the like state of whichever comment or reply carries `id`.
/// Top-level comments and replies share one id space, so the first match
/// wins.
fn with_engagement_target<R>(
    posts: &mut [Post],
    id: Id<CommentMarker>,
    f: impl FnOnce(&mut u32, &mut bool) -> R,
) -> Option<R> {
    for post in posts {
        for comment in &mut post.comments {
            if comment.id == id {
                return Some(f(&mut comment.like_count, &mut comment.is_liked));
            }
            for reply in &mut comment.replies {
                if reply.id == id {
                    return Some(f(&mut reply.like_count, &mut reply.is_liked));
                }
            }
        }
    }
    None
}

fn assemble_author(author: Option<AuthorRecord>, resolver: &MediaUrlResolver) -> Option<PostAuthor> {
    let author = author?;
    Some(PostAuthor {
        name: author
            .name
            .unwrap_or_else(|| author.username.get().to_owned()),
        avatar_url: resolver.resolve_or_placeholder(author.profile_photo.as_deref()),
        username: author.username,
    })
}

fn assemble_reply(
    record: ReplyRecord,
    resolver: &MediaUrlResolver,
    engagement: &EngagementRecord,
) -> Option<Reply> {
    let Some(author) = assemble_author(record.author, resolver) else {
        warn!(reply = %record.id, "Dropping reply without author");
        return None;
    };
    Some(Reply {
        id: record.id,
        author,
        text: record.text,
        created_at: record.date,
        like_count: record.likes,
        is_liked: engagement.is_comment_liked(record.id),
    })
}

fn assemble_comment(
    record: CommentRecord,
    resolver: &MediaUrlResolver,
    engagement: &EngagementRecord,
) -> Option<Comment> {
    let Some(author) = assemble_author(record.author, resolver) else {
        warn!(comment = %record.id, "Dropping comment without author");
        return None;
    };
    Some(Comment {
        id: record.id,
        author,
        text: record.text,
        created_at: record.date,
        like_count: record.likes,
        is_liked: engagement.is_comment_liked(record.id),
        replies: record
            .replies
            .into_iter()
            .filter_map(|reply| assemble_reply(reply, resolver, engagement))
            .collect(),
    })
}

fn assemble_post(
    record: PostRecord,
    resolver: &MediaUrlResolver,
    engagement: &EngagementRecord,
) -> Option<Post> {
    let Some(username) = record.author_username.or(record.username) else {
        warn!(post = %record.id, "Dropping post without author");
        return None;
    };

    let author = PostAuthor {
        name: record
            .author_name
            .unwrap_or_else(|| username.get().to_owned()),
        avatar_url: resolver.resolve_or_placeholder(record.author_profile_photo.as_deref()),
        username,
    };

    Some(Post {
        id: record.id,
        author,
        text: record.text,
        hashtags: record.hashtags.into_iter().map(|tag| tag.name).collect(),
        images: record
            .image_urls
            .iter()
            .map(|url| resolver.resolve(url))
            .collect(),
        videos: record
            .video_urls
            .iter()
            .map(|url| resolver.resolve(url))
            .collect(),
        created_at: record.created_date,
        like_count: record.like_count,
        is_liked: engagement.is_post_liked(record.id),
        comments: record
            .comments
            .into_iter()
            .filter_map(|comment| assemble_comment(comment, resolver, engagement))
            .collect(),
    })
}
