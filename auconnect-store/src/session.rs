//! The signed-in identity, persisted alongside the engagement records.
//!
//! The token is opaque; nothing here inspects it beyond presence.
//! Logging out removes the session *and* the user's engagement record,
//! the only point at which that record ever expires.

use crate::{Result, engagement::LocalStore};
use auconnect_common::model::user::Username;
use serde::{Deserialize, Serialize};
use std::{fs, io};
use tracing::warn;

const SESSION_FILE: &str = "session.json";

#[derive(Clone, Eq, PartialEq, Debug, Deserialize, Serialize)]
pub struct Session {
    pub username: Username,
    #[serde(default)]
    pub token: Option<String>,
}

impl LocalStore {
    pub fn save_session(&self, session: &Session) -> Result<()> {
        fs::create_dir_all(self.dir())?;
        let json = serde_json::to_vec(session)?;
        fs::write(self.dir().join(SESSION_FILE), json)?;
        Ok(())
    }

    /// The current session, if any. Unreadable session files count as
    /// signed out.
    #[must_use]
    pub fn load_session(&self) -> Option<Session> {
        let bytes = match fs::read(self.dir().join(SESSION_FILE)) {
            Ok(bytes) => bytes,
            Err(err) => {
                if err.kind() != io::ErrorKind::NotFound {
                    warn!(error = %err, "Could not read session record");
                }
                return None;
            }
        };

        match serde_json::from_slice(&bytes) {
            Ok(session) => Some(session),
            Err(err) => {
                warn!(error = %err, "Stored session record is corrupt");
                None
            }
        }
    }

    /// Signs out: removes the session record and the engagement record of
    /// the user it named.
    pub fn clear_session(&self) -> Result<()> {
        let session = self.load_session();

        match fs::remove_file(self.dir().join(SESSION_FILE)) {
            Ok(()) => {}
            Err(err) if err.kind() == io::ErrorKind::NotFound => {}
            Err(err) => return Err(err.into()),
        }

        if let Some(session) = session {
            self.clear_engagement(&session.username);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        engagement::{Engagement, EngagementStore, LocalStore},
        session::Session,
    };
    use auconnect_common::model::user::Username;

    fn user(name: &str) -> Username {
        Username::new(name.to_owned()).unwrap()
    }

    #[test]
    fn session_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalStore::new(dir.path());

        assert_eq!(store.load_session(), None);

        let session = Session {
            username: user("priya_k"),
            token: Some("opaque".to_owned()),
        };
        store.save_session(&session).unwrap();
        assert_eq!(store.load_session(), Some(session));
    }

    #[test]
    fn clear_session_drops_engagement_record() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalStore::new(dir.path());
        let priya = user("priya_k");

        store
            .save_session(&Session {
                username: priya.clone(),
                token: None,
            })
            .unwrap();
        store.toggle(&priya, Engagement::Post(4.into()), true);

        store.clear_session().unwrap();

        assert_eq!(store.load_session(), None);
        assert!(!store.load(&priya).is_post_liked(4.into()));
    }

    #[test]
    fn clear_session_is_fine_when_signed_out() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalStore::new(dir.path());
        store.clear_session().unwrap();
    }
}
