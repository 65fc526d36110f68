use crate::client::{ApiClient, Result};
use auconnect_common::model::{
    Id,
    event::{CalendarEntry, Event, EventMarker, NewEvent},
};

impl ApiClient {
    pub async fn events(&self) -> Result<Vec<Event>> {
        self.get_json("/api/events").await
    }

    pub async fn event(&self, id: Id<EventMarker>) -> Result<Event> {
        self.get_json(&format!("/api/events/{id}")).await
    }

    pub async fn events_by_category(&self, category: &str) -> Result<Vec<Event>> {
        self.get_json(&format!("/api/events/category/{category}"))
            .await
    }

    pub async fn search_events(&self, term: &str) -> Result<Vec<Event>> {
        let response = self
            .http()
            .get(self.url("/api/events/search"))
            .query(&[("term", term)])
            .send()
            .await?;
        Self::parse(response).await
    }

    pub async fn create_event(&self, event: &NewEvent) -> Result<Event> {
        self.post_json("/api/events", event).await
    }

    pub async fn update_event(&self, id: Id<EventMarker>, event: &NewEvent) -> Result<Event> {
        self.put_json(&format!("/api/events/{id}"), event).await
    }

    pub async fn delete_event(&self, id: Id<EventMarker>) -> Result<()> {
        self.delete(&format!("/api/events/{id}")).await
    }

    pub async fn calendar(&self) -> Result<Vec<CalendarEntry>> {
        self.get_json("/api/calendar").await
    }

    pub async fn calendar_by_category(&self, category: &str) -> Result<Vec<CalendarEntry>> {
        self.get_json(&format!("/api/calendar/category/{category}"))
            .await
    }

    pub async fn search_calendar(&self, term: &str) -> Result<Vec<CalendarEntry>> {
        let response = self
            .http()
            .get(self.url("/api/calendar/search"))
            .query(&[("term", term)])
            .send()
            .await?;
        Self::parse(response).await
    }
}
