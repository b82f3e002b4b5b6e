//! # User and Profile DTOs

use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    pub id: String,
    pub username: String,
    #[serde(default)]
    pub email: String,
    /// 1 admin, 2 staff, 3 secret guest
    pub role_id: i64,
    #[serde(default)]
    pub role_name: String,
    #[serde(default)]
    pub created_at: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct UsersResponse {
    #[serde(default)]
    pub page: u32,
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub users: Vec<User>,
}

/// Reporter profile with activity counters
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Profile {
    pub id: String,
    pub user_id: String,
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub accepted_offers_count: u64,
    #[serde(default)]
    pub submitted_reports_count: u64,
    #[serde(default)]
    pub correct_reports_count: u64,
    #[serde(default)]
    pub registered_at: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_active_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional_info: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub points: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rank: Option<String>,
}

impl Profile {
    /// Share of submitted reports that were approved, in percent.
    pub fn approval_rate(&self) -> u8 {
        if self.submitted_reports_count == 0 {
            return 0;
        }
        let rate = self.correct_reports_count as f64 / self.submitted_reports_count as f64;
        (rate * 100.0).round().clamp(0.0, 100.0) as u8
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ProfilesResponse {
    #[serde(default)]
    pub page: u32,
    #[serde(default)]
    pub profiles: Vec<Profile>,
    #[serde(default)]
    pub total: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_approval_rate() {
        let mut p = Profile::default();
        assert_eq!(p.approval_rate(), 0);
        p.submitted_reports_count = 3;
        p.correct_reports_count = 2;
        assert_eq!(p.approval_rate(), 67);
    }
}
