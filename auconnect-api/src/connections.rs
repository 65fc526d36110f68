use crate::client::{ApiClient, Result};
use auconnect_common::model::{
    connection::{Connection, ConnectionStatus},
    user::Username,
};
use serde::{Deserialize, Serialize};

#[derive(Clone, Eq, PartialEq, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ConnectionPair<'a> {
    from_username: &'a Username,
    to_username: &'a Username,
}

#[derive(Clone, Eq, PartialEq, Debug, Default, Deserialize)]
pub struct ConnectionStatusResponse {
    #[serde(default)]
    pub status: Option<ConnectionStatus>,
}

impl ApiClient {
    /// Accepted connections of `username`, both directions.
    pub async fn connections_for(&self, username: &Username) -> Result<Vec<Connection>> {
        self.get_json(&format!("/api/connections/user/{username}"))
            .await
    }

    pub async fn connection_status(
        &self,
        from: &Username,
        to: &Username,
    ) -> Result<ConnectionStatusResponse> {
        self.get_json(&format!(
            "/api/connections/status?fromUsername={from}&toUsername={to}"
        ))
        .await
    }

    pub async fn request_connection(&self, from: &Username, to: &Username) -> Result<()> {
        self.post_unit(
            "/api/connections/connect",
            &ConnectionPair {
                from_username: from,
                to_username: to,
            },
        )
        .await
    }

    pub async fn accept_connection(&self, from: &Username, to: &Username) -> Result<()> {
        self.post_unit(
            "/api/connections/accept",
            &ConnectionPair {
                from_username: from,
                to_username: to,
            },
        )
        .await
    }

    pub async fn reject_connection(&self, from: &Username, to: &Username) -> Result<()> {
        self.post_unit(
            "/api/connections/reject",
            &ConnectionPair {
                from_username: from,
                to_username: to,
            },
        )
        .await
    }

    pub async fn disconnect(&self, from: &Username, to: &Username) -> Result<()> {
        self.post_unit(
            "/api/connections/disconnect",
            &ConnectionPair {
                from_username: from,
                to_username: to,
            },
        )
        .await
    }

    /// Incoming requests still awaiting a response from `username`.
    pub async fn pending_requests(&self, username: &Username) -> Result<Vec<Connection>> {
        self.get_json(&format!("/api/connections/requests?username={username}"))
            .await
    }
}
