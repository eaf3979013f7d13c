pub mod geocoding;
pub mod routing;

use std::time::Duration;

use crate::error::AppError;

pub fn http_client(timeout: Duration, user_agent: Option<&str>) -> Result<reqwest::Client, AppError> {
    let mut builder = reqwest::Client::builder().timeout(timeout);
    if let Some(user_agent) = user_agent {
        builder = builder.user_agent(user_agent.to_string());
    }

    builder
        .build()
        .map_err(|err| AppError::Internal(format!("failed to build http client: {err}")))
}
