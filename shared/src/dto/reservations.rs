//! # Secret Guest Reservation DTOs
//!
//! Reservations arrive from OTAs and are turned into assignments by staff.
//! The list endpoint still returns a few PascalCase keys.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::common::{Guests, ListingTypeRef, Pricing, Status};

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ReservationPricingEnvelope {
    #[serde(default)]
    pub pricing: Pricing,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SgReservation {
    pub id: String,
    #[serde(default)]
    pub ota_id: String,
    #[serde(rename = "BookingNumber", default)]
    pub booking_number: String,
    #[serde(rename = "ListingID", default)]
    pub listing_id: String,
    #[serde(rename = "CheckinDate", default)]
    pub checkin_date: String,
    #[serde(rename = "CheckoutDate", default)]
    pub checkout_date: String,
    pub status: Status,
    #[serde(default)]
    pub pricing: ReservationPricingEnvelope,
    #[serde(default)]
    pub guests: Option<Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SgReservationsResponse {
    #[serde(default)]
    pub reservations: Vec<SgReservation>,
    #[serde(default)]
    pub page: u32,
    #[serde(default)]
    pub total: u64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReservationFilters {
    pub status_id: Option<i64>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReservationListing {
    pub id: String,
    pub city: String,
    pub title: String,
    pub address: String,
    pub country: String,
    pub latitude: f64,
    pub longitude: f64,
    pub description: String,
    pub listing_type: ListingTypeRef,
    pub main_picture: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReservationDates {
    pub checkin: String,
    pub checkout: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewReservation {
    pub booking_number: String,
    pub dates: ReservationDates,
    pub guests: Guests,
    pub ota_id: String,
    pub status: String,
    pub listing: ReservationListing,
    pub pricing: Pricing,
}

/// Body of `POST /staff/sg_reservations`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CreateReservationRequest {
    pub source: String,
    pub received_at: String,
    pub reservation: NewReservation,
}

/// Reservation statuses; the backend has no endpoint for them.
pub fn reservation_statuses() -> Vec<Status> {
    [(1, "new", "Новое"), (2, "hold", "Захолдировано"), (3, "booked", "Забронировано"), (4, "no-show", "Не обрабатывать")]
        .into_iter()
        .map(|(id, slug, name)| Status {
            id,
            slug: slug.to_string(),
            name: name.to_string(),
        })
        .collect()
}
