//! Caller-owned state of the list view, the filter bar and the form.

pub mod filter;
pub mod form;
pub mod list;
pub mod pagination;

pub use filter::LeaveRequestFilter;
pub use form::{FormErrors, FormField, LeaveRequestForm};
pub use list::{LeaveRequestList, LeaveRow, ListQuery};
pub use pagination::PaginationModel;
