use crate::client::{ApiClient, Result};
use auconnect_common::model::{
    Id,
    news::{NewNewsItem, NewsItem, NewsMarker},
};

impl ApiClient {
    pub async fn news(&self) -> Result<Vec<NewsItem>> {
        self.get_json("/api/news").await
    }

    pub async fn news_item(&self, id: Id<NewsMarker>) -> Result<NewsItem> {
        self.get_json(&format!("/api/news/{id}")).await
    }

    pub async fn news_by_category(&self, category: &str) -> Result<Vec<NewsItem>> {
        self.get_json(&format!("/api/news/category/{category}"))
            .await
    }

    pub async fn search_news(&self, term: &str) -> Result<Vec<NewsItem>> {
        let response = self
            .http()
            .get(self.url("/api/news/search"))
            .query(&[("term", term)])
            .send()
            .await?;
        Self::parse(response).await
    }

    pub async fn news_categories(&self) -> Result<Vec<String>> {
        self.get_json("/api/news/categories").await
    }

    pub async fn create_news(&self, item: &NewNewsItem) -> Result<NewsItem> {
        self.post_json("/api/news", item).await
    }

    pub async fn update_news(&self, id: Id<NewsMarker>, item: &NewNewsItem) -> Result<NewsItem> {
        self.put_json(&format!("/api/news/{id}"), item).await
    }

    pub async fn delete_news(&self, id: Id<NewsMarker>) -> Result<()> {
        self.delete(&format!("/api/news/{id}")).await
    }
}
