//! # Admin Statistics DTOs

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct AdminStatistic {
    pub key: String,
    pub value: i64,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct AdminStatisticsResponse {
    #[serde(default)]
    pub statistics: Vec<AdminStatistic>,
}

impl AdminStatisticsResponse {
    pub fn get(&self, key: &str) -> Option<i64> {
        self.statistics.iter().find(|s| s.key == key).map(|s| s.value)
    }
}
