use crate::model::user::Username;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

#[derive(Clone, Eq, PartialEq, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Connection {
    pub id: u64,
    pub from_username: Username,
    pub to_username: Username,
    pub status: ConnectionStatus,
    #[serde(with = "time::serde::rfc3339")]
    pub request_date: OffsetDateTime,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub response_date: Option<OffsetDateTime>,
}

impl Connection {
    /// The side of the connection that is not `username`.
    #[must_use]
    pub fn other_party(&self, username: &Username) -> &Username {
        if &self.from_username == username {
            &self.to_username
        } else {
            &self.from_username
        }
    }
}

#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Hash, Deserialize, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ConnectionStatus {
    Pending,
    Accepted,
    Rejected,
}
