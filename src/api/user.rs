use reqwest::Method;

use super::{ApiClient, ApiError, decode, entities};
use crate::model::User;

impl ApiClient {
    /// Users a leave request can be assigned to.
    pub async fn fetch_users(&self) -> Result<Vec<User>, ApiError> {
        let path = "/users";
        let body = self.execute(Method::GET, path, None).await?;
        decode(path, entities(body))
    }
}
