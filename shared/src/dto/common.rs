//! # Common DTO Building Blocks
//!
//! Small shapes that recur across resources.

use serde::{Deserialize, Serialize};

/// `{id, slug, name}` triple used for statuses and listing types
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Status {
    pub id: i64,
    pub slug: String,
    pub name: String,
}

/// Listing type reference embedded in listings and assignments
pub type ListingTypeRef = Status;

/// Minimal user reference (`{id, username}`)
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserRef {
    pub id: String,
    pub username: String,
}

/// Price breakdown per stay
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct PricingBreakdown {
    pub per_night: f64,
    pub nights: u32,
}

/// Stay pricing
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Pricing {
    pub currency: String,
    pub total: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub breakdown: Option<PricingBreakdown>,
}

/// Guest counts for a stay
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Guests {
    pub adults: u32,
    pub children: u32,
}

/// Check-in / check-out pair
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct StayDates {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub checkin: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub checkout: Option<String>,
}

/// Page/limit pair for list endpoints. Pages are 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub page: u32,
    pub limit: u32,
}

impl Page {
    pub fn new(page: u32, limit: u32) -> Self {
        Self {
            page: page.max(1),
            limit,
        }
    }

    /// Number of pages needed for `total` rows.
    pub fn page_count(&self, total: u64) -> u64 {
        if self.limit == 0 {
            return 0;
        }
        total.div_ceil(u64::from(self.limit))
    }
}

impl Default for Page {
    fn default() -> Self {
        Self { page: 1, limit: 20 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_count() {
        let page = Page::new(1, 20);
        assert_eq!(page.page_count(0), 0);
        assert_eq!(page.page_count(20), 1);
        assert_eq!(page.page_count(21), 2);
        assert_eq!(Page::new(0, 0).page_count(5), 0);
    }

    #[test]
    fn test_page_is_one_based() {
        assert_eq!(Page::new(0, 10).page, 1);
    }
}
