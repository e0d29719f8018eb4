pub mod leave_request;
pub mod leave_type;
pub mod user;

pub use leave_request::{LeaveRequest, MAX_REASON_LEN, Page};
pub use leave_type::LeaveType;
pub use user::User;
