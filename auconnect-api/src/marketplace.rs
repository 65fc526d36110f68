use crate::client::{ApiClient, Result};
use auconnect_common::model::{
    Id,
    marketplace::{Gig, GigInterest, GigMarker, NewGig, NewReview, Review},
    user::Username,
};
use serde::{Deserialize, Serialize};

#[derive(Clone, Eq, PartialEq, Debug, Serialize)]
struct UsernameBody<'a> {
    username: &'a Username,
}

#[derive(Copy, Clone, Eq, PartialEq, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CanReviewResponse {
    pub can_review: bool,
}

impl ApiClient {
    pub async fn gigs(&self) -> Result<Vec<Gig>> {
        self.get_json("/api/marketplace").await
    }

    pub async fn gig(&self, gig: Id<GigMarker>) -> Result<Gig> {
        self.get_json(&format!("/api/marketplace/{gig}")).await
    }

    pub async fn gigs_by_user(&self, username: &Username) -> Result<Vec<Gig>> {
        self.get_json(&format!("/api/marketplace/user/{username}"))
            .await
    }

    pub async fn gigs_by_category(&self, category: &str) -> Result<Vec<Gig>> {
        self.get_json(&format!("/api/marketplace/category/{category}"))
            .await
    }

    pub async fn search_gigs(&self, term: &str) -> Result<Vec<Gig>> {
        let response = self
            .http()
            .get(self.url("/api/marketplace/search"))
            .query(&[("term", term)])
            .send()
            .await?;
        Self::parse(response).await
    }

    pub async fn create_gig(&self, gig: &NewGig) -> Result<Gig> {
        self.post_json("/api/marketplace", gig).await
    }

    pub async fn update_gig(&self, id: Id<GigMarker>, gig: &NewGig) -> Result<Gig> {
        self.put_json(&format!("/api/marketplace/{id}"), gig).await
    }

    pub async fn delete_gig(&self, id: Id<GigMarker>) -> Result<()> {
        self.delete(&format!("/api/marketplace/{id}")).await
    }

    /// View and response counters are fire-and-forget from the client's
    /// point of view.
    pub async fn record_gig_view(&self, gig: Id<GigMarker>) -> Result<()> {
        self.post_empty(&format!("/api/marketplace/{gig}/view")).await
    }

    /// Either side marks its half of completion; the gig closes once both
    /// have.
    pub async fn confirm_completion(&self, gig: Id<GigMarker>, username: &Username) -> Result<()> {
        self.post_unit(
            &format!("/api/marketplace/{gig}/confirm-completion"),
            &UsernameBody { username },
        )
        .await
    }

    pub async fn completed_gigs_for(&self, username: &Username) -> Result<Vec<Gig>> {
        self.get_json(&format!("/api/marketplace/user/{username}/completed"))
            .await
    }

    pub async fn express_interest(&self, gig: Id<GigMarker>, username: &Username) -> Result<()> {
        self.post_unit(
            &format!("/api/marketplace/{gig}/interest"),
            &UsernameBody { username },
        )
        .await
    }

    pub async fn interested_users(&self, gig: Id<GigMarker>) -> Result<Vec<GigInterest>> {
        self.get_json(&format!("/api/marketplace/{gig}/interested-users"))
            .await
    }

    pub async fn user_interests(&self, username: &Username) -> Result<Vec<GigInterest>> {
        self.get_json(&format!("/api/marketplace/user-interests?username={username}"))
            .await
    }

    /// Accepting one interest moves the gig into its in-progress state for
    /// that worker; the provider later confirms completion.
    pub async fn accept_interest(&self, gig: Id<GigMarker>, username: &Username) -> Result<()> {
        self.post_unit(
            &format!("/api/marketplace/{gig}/accept-interest"),
            &UsernameBody { username },
        )
        .await
    }

    pub async fn reject_interest(&self, gig: Id<GigMarker>, username: &Username) -> Result<()> {
        self.post_unit(
            &format!("/api/marketplace/{gig}/reject-interest"),
            &UsernameBody { username },
        )
        .await
    }

    /// Gigs on which `username` was accepted as the worker.
    pub async fn accepted_gigs_for(&self, username: &Username) -> Result<Vec<Gig>> {
        self.get_json(&format!("/api/marketplace/accepted/{username}"))
            .await
    }

    pub async fn accepted_users(&self, gig: Id<GigMarker>) -> Result<Vec<GigInterest>> {
        self.get_json(&format!("/api/marketplace/{gig}/accepted-users"))
            .await
    }

    pub async fn create_review(&self, gig: Id<GigMarker>, review: &NewReview) -> Result<Review> {
        self.post_json(&format!("/api/reviews/gig/{gig}"), review)
            .await
    }

    pub async fn reviews_for_user(&self, username: &Username) -> Result<Vec<Review>> {
        self.get_json(&format!("/api/reviews/user/{username}")).await
    }

    pub async fn reviews_for_gig(&self, gig: Id<GigMarker>) -> Result<Vec<Review>> {
        self.get_json(&format!("/api/reviews/gig/{gig}")).await
    }

    pub async fn can_review(
        &self,
        gig: Id<GigMarker>,
        username: &Username,
    ) -> Result<CanReviewResponse> {
        self.get_json(&format!(
            "/api/reviews/can-review?gigId={gig}&username={username}"
        ))
        .await
    }
}
