//! Leave request management: day counting, wire key mapping, form/list state
//! and a client for the leave API.

pub mod api;
pub mod config;
pub mod model;
pub mod state;
pub mod utils;

pub use api::{ApiClient, ApiError};
pub use config::Config;
pub use utils::formatters::{days_between, format_date};
pub use utils::mappers::{EncodingError, Mapping, to_camel_case, to_query_string, to_snake_case};
