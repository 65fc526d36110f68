use crate::model::{Id, user::Username};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Default, Hash)]
pub struct GigMarker;

/// A marketplace listing together with the presentation fields the server
/// denormalizes onto it.
#[derive(Clone, PartialEq, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Gig {
    pub id: Id<GigMarker>,
    pub title: String,
    pub description: String,
    pub username: Username,
    pub category: String,
    pub price: f64,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub duration: Option<String>,
    pub status: String,
    #[serde(default)]
    pub views: u32,
    #[serde(default)]
    pub responses: u32,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(default)]
    pub user_full_name: Option<String>,
    #[serde(default)]
    pub user_profile_photo: Option<String>,
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub skills_required: Option<String>,
    #[serde(default)]
    pub provider_confirmed_completion: bool,
    #[serde(default)]
    pub worker_confirmed_completion: bool,
}

/// Body for creating or updating a listing; counts, rating and the
/// completion flags are server-owned.
#[derive(Clone, PartialEq, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewGig {
    pub title: String,
    pub description: String,
    pub username: Username,
    pub category: String,
    pub price: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skills_required: Option<String>,
}

#[derive(Clone, Eq, PartialEq, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GigInterest {
    pub id: u64,
    pub gig_id: Id<GigMarker>,
    pub username: Username,
    #[serde(with = "time::serde::rfc3339")]
    pub created_date: OffsetDateTime,
    pub status: InterestStatus,
}

#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum InterestStatus {
    Pending,
    Accepted,
    Rejected,
}

#[derive(Clone, Eq, PartialEq, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: u64,
    pub gig_id: Id<GigMarker>,
    pub reviewer_username: Username,
    pub reviewee_username: Username,
    /// 1-5 stars.
    pub rating: u8,
    #[serde(default)]
    pub comment: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    pub is_worker_review: bool,
    pub communication_rating: u8,
    pub quality_rating: u8,
    pub value_rating: u8,
    pub reliability_rating: u8,
}

#[derive(Clone, Eq, PartialEq, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewReview {
    pub reviewer_username: Username,
    pub reviewee_username: Username,
    pub rating: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    pub is_worker_review: bool,
    pub communication_rating: u8,
    pub quality_rating: u8,
    pub value_rating: u8,
    pub reliability_rating: u8,
}
