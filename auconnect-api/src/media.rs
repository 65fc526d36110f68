use crate::{
    client::{ApiClient, Result},
    record::FileUrlResponse,
};
use reqwest::multipart::{Form, Part};

#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Hash)]
pub enum MediaKind {
    Image,
    Video,
}

impl MediaKind {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            MediaKind::Image => "image",
            MediaKind::Video => "video",
        }
    }
}

#[derive(Clone, Eq, PartialEq, Debug)]
pub struct MediaUpload {
    pub file_name: String,
    pub bytes: Vec<u8>,
    pub kind: MediaKind,
}

impl ApiClient {
    /// Multipart upload of post media. The returned URL is
    /// origin-relative; run it through the media resolver before display.
    pub async fn upload_media(&self, upload: MediaUpload) -> Result<FileUrlResponse> {
        let part = Part::bytes(upload.bytes).file_name(upload.file_name);
        let form = Form::new()
            .part("file", part)
            .text("type", upload.kind.as_str());

        let response = self
            .http()
            .post(self.url("/api/posts/upload-media"))
            .multipart(form)
            .send()
            .await?;
        Self::parse(response).await
    }

    /// Multipart upload of a message attachment.
    pub async fn upload_attachment(
        &self,
        file_name: String,
        bytes: Vec<u8>,
    ) -> Result<FileUrlResponse> {
        let part = Part::bytes(bytes).file_name(file_name);
        let form = Form::new().part("file", part);

        let response = self
            .http()
            .post(self.url("/api/messages/upload-attachment"))
            .multipart(form)
            .send()
            .await?;
        Self::parse(response).await
    }
}
