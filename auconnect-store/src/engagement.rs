//! The viewer's like memberships, persisted per user.
//!
//! This is the local half of the optimistic-update scheme: the server owns
//! the counts, the client owns which things *this* user has liked. The
//! store is best-effort by contract. Loading falls back to an empty
//! record and saving never propagates a failure, so engagement state can
//! degrade but never take an operation down with it.

use auconnect_common::model::{
    Id,
    post::{CommentMarker, PostMarker},
    user::Username,
};
use serde::{Deserialize, Serialize};
use std::{
    collections::{BTreeSet, HashMap},
    fs, io,
    path::{Path, PathBuf},
    sync::{Mutex, PoisonError},
};
use tracing::warn;

/// A single like target. Posts and comments live in separate id spaces;
/// comments and replies share one.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Hash)]
pub enum Engagement {
    Post(Id<PostMarker>),
    Comment(Id<CommentMarker>),
}

#[derive(Clone, Eq, PartialEq, Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EngagementRecord {
    liked_posts: BTreeSet<Id<PostMarker>>,
    liked_comments: BTreeSet<Id<CommentMarker>>,
}

impl EngagementRecord {
    #[must_use]
    pub fn from_parts(
        liked_posts: BTreeSet<Id<PostMarker>>,
        liked_comments: BTreeSet<Id<CommentMarker>>,
    ) -> Self {
        Self {
            liked_posts,
            liked_comments,
        }
    }

    #[must_use]
    pub fn is_post_liked(&self, id: Id<PostMarker>) -> bool {
        self.liked_posts.contains(&id)
    }

    #[must_use]
    pub fn is_comment_liked(&self, id: Id<CommentMarker>) -> bool {
        self.liked_comments.contains(&id)
    }

    #[must_use]
    pub fn contains(&self, target: Engagement) -> bool {
        match target {
            Engagement::Post(id) => self.is_post_liked(id),
            Engagement::Comment(id) => self.is_comment_liked(id),
        }
    }

    /// Adds or removes the target. Adding a present id or removing an
    /// absent one is a no-op, not an error.
    pub fn apply(&mut self, target: Engagement, liked: bool) {
        match (target, liked) {
            (Engagement::Post(id), true) => {
                self.liked_posts.insert(id);
            }
            (Engagement::Post(id), false) => {
                self.liked_posts.remove(&id);
            }
            (Engagement::Comment(id), true) => {
                self.liked_comments.insert(id);
            }
            (Engagement::Comment(id), false) => {
                self.liked_comments.remove(&id);
            }
        }
    }
}

/// The injected storage seam: the reconciler only ever talks to this
/// trait, so tests substitute [`MemoryStore`] for the file-backed store.
pub trait EngagementStore: Send + Sync {
    /// Persisted membership record for `username`; empty when nothing is
    /// stored or the stored data cannot be read. Never fails.
    fn load(&self, username: &Username) -> EngagementRecord;

    /// Overwrites the persisted record. Failures are logged, not
    /// propagated.
    fn save(&self, username: &Username, record: &EngagementRecord);

    fn toggle(&self, username: &Username, target: Engagement, liked: bool) {
        let mut record = self.load(username);
        record.apply(target, liked);
        self.save(username, &record);
    }
}

impl<S: EngagementStore + ?Sized> EngagementStore for std::sync::Arc<S> {
    fn load(&self, username: &Username) -> EngagementRecord {
        (**self).load(username)
    }

    fn save(&self, username: &Username, record: &EngagementRecord) {
        (**self).save(username, record);
    }

    fn toggle(&self, username: &Username, target: Engagement, liked: bool) {
        (**self).toggle(username, target, liked);
    }
}

/// File-backed store, one `likedPosts_{username}.json` document per user
/// under the data directory.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct LocalStore {
    dir: PathBuf,
}

impl LocalStore {
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub(crate) fn engagement_path(&self, username: &Username) -> PathBuf {
        self.dir.join(format!("likedPosts_{username}.json"))
    }

    /// Drops the persisted record for `username`, as on logout.
    pub(crate) fn clear_engagement(&self, username: &Username) {
        if let Err(err) = fs::remove_file(self.engagement_path(username))
            && err.kind() != io::ErrorKind::NotFound
        {
            warn!(%username, error = %err, "Could not remove engagement record");
        }
    }
}

impl EngagementStore for LocalStore {
    fn load(&self, username: &Username) -> EngagementRecord {
        let path = self.engagement_path(username);
        let bytes = match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(err) => {
                if err.kind() != io::ErrorKind::NotFound {
                    warn!(%username, error = %err, "Could not read engagement record");
                }
                return EngagementRecord::default();
            }
        };

        match serde_json::from_slice(&bytes) {
            Ok(record) => record,
            Err(err) => {
                warn!(%username, error = %err, "Stored engagement record is corrupt");
                EngagementRecord::default()
            }
        }
    }

    fn save(&self, username: &Username, record: &EngagementRecord) {
        let result = fs::create_dir_all(&self.dir).and_then(|()| {
            let json = serde_json::to_vec(record)?;
            fs::write(self.engagement_path(username), json)
        });

        if let Err(err) = result {
            warn!(%username, error = %err, "Could not persist engagement record");
        }
    }
}

/// In-memory store for tests and short-lived embedders.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: Mutex<HashMap<String, EngagementRecord>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl EngagementStore for MemoryStore {
    fn load(&self, username: &Username) -> EngagementRecord {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(username.get())
            .cloned()
            .unwrap_or_default()
    }

    fn save(&self, username: &Username, record: &EngagementRecord) {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(username.get().to_owned(), record.clone());
    }
}
