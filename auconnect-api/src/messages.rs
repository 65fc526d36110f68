use crate::client::{ApiClient, Result};
use auconnect_common::model::{
    Id,
    message::{ConversationSummary, Message, MessageMarker, SendMessage},
    user::Username,
};

impl ApiClient {
    pub async fn send_message(&self, message: &SendMessage) -> Result<Message> {
        self.post_json("/api/messages/send", message).await
    }

    /// Full history between the viewer and `other`, oldest first.
    pub async fn conversation(&self, other: &Username, viewer: &Username) -> Result<Vec<Message>> {
        self.get_json(&format!(
            "/api/messages/conversation/{other}?username={viewer}"
        ))
        .await
    }

    pub async fn conversations(&self, username: &Username) -> Result<Vec<ConversationSummary>> {
        self.get_json(&format!("/api/messages/conversations?username={username}"))
            .await
    }

    pub async fn recent_messages(&self, username: &Username) -> Result<Vec<Message>> {
        self.get_json(&format!("/api/messages/recent?username={username}"))
            .await
    }

    pub async fn mark_message_read(&self, id: Id<MessageMarker>) -> Result<()> {
        self.post_empty(&format!("/api/messages/read/{id}")).await
    }
}
