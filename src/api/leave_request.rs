use reqwest::Method;
use serde_json::Value;

use super::{ApiClient, ApiError, decode, entity};
use crate::model::{LeaveRequest, Page};
use crate::state::ListQuery;
use crate::utils::mappers::Mapping;

const LEAVE_REQUESTS: &str = "/leave-requests";

impl ApiClient {
    /// One page of leave requests matching `query`.
    pub async fn fetch_leave_requests(
        &self,
        query: &ListQuery,
    ) -> Result<Page<LeaveRequest>, ApiError> {
        let query_string = query.to_query_string()?;
        let path = if query_string.is_empty() {
            LEAVE_REQUESTS.to_string()
        } else {
            format!("{}?{}", LEAVE_REQUESTS, query_string)
        };

        let body = self.execute(Method::GET, &path, None).await?;
        let page: Page<Value> = decode(&path, body)?;

        let items = page
            .items
            .into_iter()
            .map(|item| decode(&path, entity(item)))
            .collect::<Result<Vec<LeaveRequest>, _>>()?;

        Ok(Page {
            items,
            total: page.total,
        })
    }

    /// `payload` must already carry wire keys, see `LeaveRequestForm::submission`.
    pub async fn create_leave_request(&self, payload: &Mapping) -> Result<LeaveRequest, ApiError> {
        let body = self
            .execute(Method::POST, LEAVE_REQUESTS, Some(payload))
            .await?;
        decode(LEAVE_REQUESTS, entity(body))
    }

    pub async fn update_leave_request(
        &self,
        id: u64,
        payload: &Mapping,
    ) -> Result<LeaveRequest, ApiError> {
        let path = format!("{}/{}", LEAVE_REQUESTS, id);
        let body = self.execute(Method::PUT, &path, Some(payload)).await?;
        decode(&path, entity(body))
    }

    pub async fn delete_leave_request(&self, id: u64) -> Result<(), ApiError> {
        let path = format!("{}/{}", LEAVE_REQUESTS, id);
        self.execute(Method::DELETE, &path, None).await?;
        tracing::info!(leave_id = id, "Leave request deleted");
        Ok(())
    }
}
