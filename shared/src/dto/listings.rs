//! # Listing DTOs
//!
//! Properties (hotels, apartments) that assignments point at.

use serde::{Deserialize, Serialize};

use super::common::ListingTypeRef;

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Listing {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub country: String,
    #[serde(default)]
    pub latitude: f64,
    #[serde(default)]
    pub longitude: f64,
    #[serde(default, alias = "mainPicture", skip_serializing_if = "Option::is_none")]
    pub main_picture: Option<String>,
    #[serde(default)]
    pub listing_type: ListingTypeRef,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ListingsResponse {
    #[serde(default)]
    pub listings: Vec<Listing>,
    #[serde(default)]
    pub page: u32,
    #[serde(default)]
    pub total: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CreateListingRequest {
    pub address: String,
    pub city: String,
    pub code: String,
    pub country: String,
    pub description: String,
    pub latitude: f64,
    pub listing_type_id: i64,
    pub longitude: f64,
    pub title: String,
}

pub type ListingType = ListingTypeRef;

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ListingTypesResponse {
    #[serde(default)]
    pub listing_types: Vec<ListingType>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CreateListingTypeRequest {
    pub name: String,
    pub slug: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct UpdateListingTypeRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
}
