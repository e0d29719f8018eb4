use std::collections::BTreeMap;

use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::Value;
use strum_macros::{AsRefStr, Display, EnumIter};

use crate::model::{LeaveRequest, MAX_REASON_LEN};
use crate::utils::formatters::days_between;
use crate::utils::mappers::{Mapping, to_snake_case};

pub const START_REQUIRED: &str = "Start date is required";
pub const END_AFTER_START: &str = "End date must be after start date";
pub const LEAVE_TYPE_REQUIRED: &str = "Leave type is required";
pub const REASON_INVALID: &str = "Reason is required and must be less than 50 characters";
pub const USER_REQUIRED: &str = "User is required";

/// Form inputs; the string form is the field's payload key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, AsRefStr, Display, EnumIter)]
#[strum(serialize_all = "camelCase")]
pub enum FormField {
    StartDate,
    EndDate,
    LeaveType,
    Reason,
    User,
}

/// Per-field validation messages. A field without an entry is valid.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormErrors(BTreeMap<FormField, String>);

impl FormErrors {
    pub fn get(&self, field: FormField) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    pub fn set(&mut self, field: FormField, message: &str) {
        self.0.insert(field, message.to_string());
    }

    pub fn clear(&mut self, field: FormField) {
        self.0.remove(&field);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (FormField, &str)> {
        self.0.iter().map(|(field, message)| (*field, message.as_str()))
    }
}

/// State of the create/edit form. Owned by the caller; every setter is a
/// plain state transition with no I/O.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LeaveRequestForm {
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub leave_type: Option<u64>,
    pub reason: String,
    pub user: Option<u64>,
    /// live day count, refreshed whenever a valid range is picked
    pub days: f64,
    pub errors: FormErrors,
}

impl LeaveRequestForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Prefills the form from a row selected in the list.
    pub fn from_request(request: &LeaveRequest) -> Self {
        Self {
            start_date: Some(request.start_date),
            end_date: Some(request.end_date),
            leave_type: Some(request.leave_type.id),
            reason: request.reason.clone(),
            user: Some(request.user.id),
            days: request.days(),
            errors: FormErrors::default(),
        }
    }

    pub fn set_start_date(&mut self, date: DateTime<Utc>) {
        self.start_date = Some(date);

        match self.end_date {
            Some(end) if date < end => {
                self.days = days_between(date, end);
                self.errors.clear(FormField::StartDate);
                self.errors.clear(FormField::EndDate);
            }
            _ => self.errors.set(FormField::EndDate, END_AFTER_START),
        }
    }

    pub fn set_end_date(&mut self, date: DateTime<Utc>) {
        self.end_date = Some(date);

        if let Some(start) = self.start_date {
            if date > start {
                self.days = days_between(start, date);
                self.errors.clear(FormField::EndDate);
            }
        }
    }

    pub fn set_leave_type(&mut self, leave_type: u64) {
        self.leave_type = Some(leave_type);
        self.errors.clear(FormField::LeaveType);
    }

    pub fn set_user(&mut self, user: u64) {
        self.user = Some(user);
        self.errors.clear(FormField::User);
    }

    pub fn set_reason(&mut self, reason: impl Into<String>) {
        self.reason = reason.into();
    }

    /// Re-checks every field and replaces `errors` with the result.
    pub fn validate(&mut self) -> bool {
        let mut errors = FormErrors::default();

        if self.start_date.is_none() {
            errors.set(FormField::StartDate, START_REQUIRED);
        }

        let end_invalid = match (self.start_date, self.end_date) {
            (_, None) => true,
            (Some(start), Some(end)) => end <= start,
            (None, Some(_)) => false,
        };
        if end_invalid {
            errors.set(FormField::EndDate, END_AFTER_START);
        }

        if self.leave_type.is_none() {
            errors.set(FormField::LeaveType, LEAVE_TYPE_REQUIRED);
        }

        if self.reason.is_empty() || self.reason.chars().count() > MAX_REASON_LEN {
            errors.set(FormField::Reason, REASON_INVALID);
        }

        if self.user.is_none() {
            errors.set(FormField::User, USER_REQUIRED);
        }

        self.errors = errors;
        self.errors.is_empty()
    }

    /// Validated outbound payload with wire (snake_case) keys.
    pub fn submission(&mut self) -> Result<Mapping, FormErrors> {
        if !self.validate() {
            return Err(self.errors.clone());
        }

        let mut form = Mapping::new();
        form.insert(
            FormField::StartDate.to_string(),
            self.start_date.map(wire_instant).into(),
        );
        form.insert(
            FormField::EndDate.to_string(),
            self.end_date.map(wire_instant).into(),
        );
        form.insert(FormField::LeaveType.to_string(), self.leave_type.into());
        form.insert(
            FormField::Reason.to_string(),
            Value::String(self.reason.clone()),
        );
        form.insert(FormField::User.to_string(), self.user.into());

        Ok(to_snake_case(&form))
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// `2024-11-01T09:30:00.000Z`
fn wire_instant(date: DateTime<Utc>) -> String {
    date.to_rfc3339_opts(SecondsFormat::Millis, true)
}
