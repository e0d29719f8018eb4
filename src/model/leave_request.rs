use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{LeaveType, User};
use crate::utils::formatters::days_between;

/// Longest reason the API accepts.
pub const MAX_REASON_LEN: usize = 50;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaveRequest {
    pub id: u64,
    pub user: User,
    pub leave_type: LeaveType,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    #[serde(default)]
    pub reason: String,
}

impl LeaveRequest {
    /// Day count shown in the list's "Days" column.
    pub fn days(&self) -> f64 {
        days_between(self.start_date, self.end_date)
    }
}

/// Envelope of the paginated list endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: u64,
}
