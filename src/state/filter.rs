use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::utils::mappers::Mapping;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LeaveRequestFilter {
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub user: Option<u64>,
    /// free text matched against the reason
    pub search_query: String,
}

impl LeaveRequestFilter {
    /// Set fields only, in display order. Dates go out as Unix seconds.
    pub fn to_params(&self) -> Mapping {
        let mut params = Mapping::new();

        if let Some(start) = self.start_date {
            params.insert("startDate".into(), epoch_seconds(start));
        }
        if let Some(end) = self.end_date {
            params.insert("endDate".into(), epoch_seconds(end));
        }
        if let Some(user) = self.user {
            params.insert("user".into(), user.into());
        }
        if !self.search_query.is_empty() {
            params.insert(
                "searchQuery".into(),
                Value::String(self.search_query.clone()),
            );
        }

        params
    }

    pub fn is_empty(&self) -> bool {
        self.to_params().is_empty()
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Whole seconds stay integral; sub-second instants keep their fraction.
fn epoch_seconds(date: DateTime<Utc>) -> Value {
    let millis = date.timestamp_millis();

    if millis % 1000 == 0 {
        Value::from(millis / 1000)
    } else {
        Value::from(millis as f64 / 1000.0)
    }
}
