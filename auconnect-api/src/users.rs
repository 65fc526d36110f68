use crate::client::{ApiClient, Result};
use auconnect_common::model::user::{Profile, UpdateProfile, Username};
use serde::{Deserialize, Serialize};

#[derive(Clone, Eq, PartialEq, Debug, Serialize)]
struct LoginRequest<'a> {
    username: &'a str,
    password: &'a str,
}

#[derive(Clone, Eq, PartialEq, Debug, Deserialize)]
pub struct LoginResponse {
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub username: Option<Username>,
}

impl ApiClient {
    /// Credentials are passed through untyped: the server decides what a
    /// valid handle is at sign-in time.
    pub async fn login(&self, username: &str, password: &str) -> Result<LoginResponse> {
        self.post_json("/login", &LoginRequest { username, password })
            .await
    }

    pub async fn profile(&self, username: &Username) -> Result<Profile> {
        self.get_json(&format!("/profile?username={username}")).await
    }

    pub async fn update_profile(&self, update: &UpdateProfile) -> Result<()> {
        self.put_unit("/profile", update).await
    }

    pub async fn search_users(&self, term: &str) -> Result<Vec<Profile>> {
        let response = self
            .http()
            .get(self.url("/api/users/search"))
            .query(&[("term", term)])
            .send()
            .await?;
        Self::parse(response).await
    }
}
