//! # Assignment DTOs
//!
//! An assignment is a unit of inspection work offered to, or taken by, a reporter.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::common::{Guests, ListingTypeRef, Pricing, StayDates, Status, UserRef};

/// Listing summary embedded in an assignment.
///
/// Address and coordinates are only present on some endpoints; the full
/// record comes from `GET /listings/{id}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct AssignmentListing {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub main_picture: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub listing_type: Option<ListingTypeRef>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Assignment {
    pub id: String,
    #[serde(default)]
    pub code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub booking_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default)]
    pub purpose: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pricing: Option<Pricing>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guests: Option<Guests>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub checkin_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub checkout_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dates: Option<StayDates>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reservation_id: Option<String>,
    pub listing: AssignmentListing,
    #[serde(default)]
    pub reporter: UserRef,
    pub status: Status,
    #[serde(default)]
    pub created_at: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub taked_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accepted_at: Option<String>,
    #[serde(default)]
    pub expires_at: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deadline: Option<String>,
}

impl Assignment {
    /// Check-in date, preferring the nested `dates` block.
    pub fn checkin(&self) -> Option<&str> {
        self.dates
            .as_ref()
            .and_then(|d| d.checkin.as_deref())
            .or(self.checkin_date.as_deref())
    }

    /// Check-out date, preferring the nested `dates` block.
    pub fn checkout(&self) -> Option<&str> {
        self.dates
            .as_ref()
            .and_then(|d| d.checkout.as_deref())
            .or(self.checkout_date.as_deref())
    }

    pub fn state(&self) -> Option<AssignmentState> {
        AssignmentState::from_slug(&self.status.slug)
    }

    /// Offer deadline, if `expires_at` is a valid RFC 3339 timestamp.
    pub fn expires(&self) -> Option<DateTime<Utc>> {
        DateTime::parse_from_rfc3339(&self.expires_at)
            .ok()
            .map(|t| t.with_timezone(&Utc))
    }

    /// An offered assignment whose deadline has passed can no longer be accepted.
    pub fn is_offer_expired(&self, now: DateTime<Utc>) -> bool {
        self.state() == Some(AssignmentState::Offered)
            && self.expires().is_some_and(|deadline| deadline <= now)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct AssignmentsResponse {
    #[serde(default)]
    pub assignments: Vec<Assignment>,
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub page: u32,
}

/// Assignment lifecycle as catalogued by the backend (ids 1..=5).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssignmentState {
    Offered,
    Accepted,
    Cancelled,
    Declined,
    Expired,
}

impl AssignmentState {
    pub const ALL: [AssignmentState; 5] = [
        AssignmentState::Offered,
        AssignmentState::Accepted,
        AssignmentState::Cancelled,
        AssignmentState::Declined,
        AssignmentState::Expired,
    ];

    pub fn id(self) -> i64 {
        match self {
            AssignmentState::Offered => 1,
            AssignmentState::Accepted => 2,
            AssignmentState::Cancelled => 3,
            AssignmentState::Declined => 4,
            AssignmentState::Expired => 5,
        }
    }

    pub fn slug(self) -> &'static str {
        match self {
            AssignmentState::Offered => "offered",
            AssignmentState::Accepted => "accepted",
            AssignmentState::Cancelled => "cancelled",
            AssignmentState::Declined => "declined",
            AssignmentState::Expired => "expired",
        }
    }

    /// Russian label shown to users.
    pub fn label(self) -> &'static str {
        match self {
            AssignmentState::Offered => "Предложено",
            AssignmentState::Accepted => "Принято",
            AssignmentState::Cancelled => "Отменено",
            AssignmentState::Declined => "Отклонено",
            AssignmentState::Expired => "Просрочено",
        }
    }

    pub fn from_slug(slug: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.slug() == slug)
    }

    pub fn from_id(id: i64) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.id() == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_minimal_assignment() {
        let json = r#"{
            "id": "a1",
            "code": "SG-1",
            "purpose": "check breakfast",
            "listing": {"id": "l1", "title": "Hotel"},
            "reporter": {"id": "u1", "username": "guest"},
            "status": {"id": 1, "slug": "offered", "name": "Предложено"},
            "created_at": "2025-01-01T00:00:00Z",
            "expires_at": "2025-01-02T00:00:00Z",
            "dates": {"checkin": "2025-02-01"}
        }"#;
        let a: Assignment = serde_json::from_str(json).unwrap();
        assert_eq!(a.state(), Some(AssignmentState::Offered));
        assert_eq!(a.checkin(), Some("2025-02-01"));
        assert_eq!(a.checkout(), None);

        let before = DateTime::parse_from_rfc3339("2025-01-01T12:00:00Z").unwrap().with_timezone(&Utc);
        let after = DateTime::parse_from_rfc3339("2025-01-03T00:00:00Z").unwrap().with_timezone(&Utc);
        assert!(!a.is_offer_expired(before));
        assert!(a.is_offer_expired(after));
    }

    #[test]
    fn test_state_catalogue_ids() {
        assert_eq!(AssignmentState::from_id(2), Some(AssignmentState::Accepted));
        assert_eq!(AssignmentState::from_slug("expired").map(|s| s.id()), Some(5));
        assert_eq!(AssignmentState::from_id(9), None);
    }
}
