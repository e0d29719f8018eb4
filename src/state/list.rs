use crate::model::{LeaveRequest, Page};
use crate::utils::formatters::format_date;
use crate::utils::mappers::{EncodingError, Mapping, to_query_string};

use super::{LeaveRequestFilter, PaginationModel};

/// Parameters of one list fetch: filter fields followed by `page`/`limit`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListQuery {
    params: Mapping,
}

impl ListQuery {
    pub fn build(filter: &LeaveRequestFilter, pagination: &PaginationModel) -> Self {
        let mut params = filter.to_params();
        params.extend(pagination.params());

        Self { params }
    }

    pub fn params(&self) -> &Mapping {
        &self.params
    }

    pub fn to_query_string(&self) -> Result<String, EncodingError> {
        to_query_string(&self.params)
    }
}

/// Rows currently shown, the server's total and the loading flag.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LeaveRequestList {
    pub rows: Vec<LeaveRequest>,
    pub total: u64,
    pub loading: bool,
}

impl LeaveRequestList {
    pub fn begin_load(&mut self) {
        self.loading = true;
    }

    pub fn finish_load(&mut self, page: Page<LeaveRequest>) {
        self.rows = page.items;
        self.total = page.total;
        self.loading = false;
    }

    /// Keeps the previous rows on screen.
    pub fn fail_load(&mut self) {
        self.loading = false;
    }

    /// Swaps in an edited row. Returns false when no row has that id.
    pub fn replace(&mut self, updated: LeaveRequest) -> bool {
        match self.rows.iter_mut().find(|row| row.id == updated.id) {
            Some(row) => {
                *row = updated;
                true
            }
            None => false,
        }
    }

    pub fn view(&self) -> Vec<LeaveRow> {
        self.rows.iter().map(LeaveRow::from).collect()
    }
}

/// Display values of one grid row.
#[derive(Debug, Clone, PartialEq)]
pub struct LeaveRow {
    pub id: u64,
    pub user: String,
    pub days: f64,
    pub start_date: String,
    pub end_date: String,
    pub leave_type: String,
    pub reason: String,
}

impl From<&LeaveRequest> for LeaveRow {
    fn from(request: &LeaveRequest) -> Self {
        Self {
            id: request.id,
            user: request.user.full_name(),
            days: request.days(),
            start_date: format_date(&request.start_date),
            end_date: format_date(&request.end_date),
            leave_type: request.leave_type.name.clone(),
            reason: request.reason.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{LeaveType, User};
    use chrono::{TimeZone, Utc};
    use pretty_assertions::assert_eq;

    fn request(id: u64, reason: &str) -> LeaveRequest {
        LeaveRequest {
            id,
            user: User {
                id: 1,
                first_name: "Ivo".into(),
                middle_name: Some("J.".into()),
                last_name: "Kralj".into(),
            },
            leave_type: LeaveType { id: 3, name: "Annual".into() },
            start_date: Utc.with_ymd_and_hms(2024, 11, 1, 8, 0, 0).unwrap(),
            end_date: Utc.with_ymd_and_hms(2024, 11, 5, 8, 0, 0).unwrap(),
            reason: reason.into(),
        }
    }

    #[test]
    fn query_puts_pagination_after_filter() {
        let filter = LeaveRequestFilter {
            start_date: Some(Utc.timestamp_opt(1_700_000_000, 0).unwrap()),
            search_query: "a b".into(),
            ..Default::default()
        };
        let query = ListQuery::build(&filter, &PaginationModel::default());

        assert_eq!(
            query.to_query_string().unwrap(),
            "start_date=1700000000&search_query=a%20b&page=1&limit=10"
        );
    }

    #[test]
    fn unfiltered_query_only_paginates() {
        let query = ListQuery::build(
            &LeaveRequestFilter::default(),
            &PaginationModel { page: 1, page_size: 20 },
        );
        assert_eq!(query.to_query_string().unwrap(), "page=2&limit=20");
    }

    #[test]
    fn load_cycle() {
        let mut list = LeaveRequestList::default();
        list.begin_load();
        assert!(list.loading);

        list.finish_load(Page {
            items: vec![request(1, "a"), request(2, "b")],
            total: 12,
        });
        assert!(!list.loading);
        assert_eq!(list.total, 12);
        assert_eq!(list.rows.len(), 2);

        list.begin_load();
        list.fail_load();
        assert!(!list.loading);
        assert_eq!(list.rows.len(), 2);
    }

    #[test]
    fn replace_only_touches_matching_row() {
        let mut list = LeaveRequestList {
            rows: vec![request(1, "a"), request(2, "b")],
            total: 2,
            loading: false,
        };

        assert!(list.replace(request(2, "changed")));
        assert_eq!(list.rows[0].reason, "a");
        assert_eq!(list.rows[1].reason, "changed");

        assert!(!list.replace(request(9, "missing")));
        assert_eq!(list.rows.len(), 2);
    }

    #[test]
    fn row_view() {
        let list = LeaveRequestList {
            rows: vec![request(1, "trip")],
            total: 1,
            loading: false,
        };

        assert_eq!(
            list.view(),
            vec![LeaveRow {
                id: 1,
                user: "Ivo J. Kralj".into(),
                days: 4.0,
                start_date: "01.11.2024 08:00".into(),
                end_date: "05.11.2024 08:00".into(),
                leave_type: "Annual".into(),
                reason: "trip".into(),
            }]
        );
    }
}
