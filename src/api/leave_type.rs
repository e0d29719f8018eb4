use reqwest::Method;

use super::{ApiClient, ApiError, decode, entities};
use crate::model::LeaveType;

impl ApiClient {
    pub async fn fetch_leave_types(&self) -> Result<Vec<LeaveType>, ApiError> {
        let path = "/leave-types";
        let body = self.execute(Method::GET, path, None).await?;
        decode(path, entities(body))
    }
}
