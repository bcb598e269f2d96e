use crate::entities::user_auth::UserAuthData;
use crate::interfaces::auth::AuthServiceInterface;
use crate::middleware::error::{AppError, AppResult};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};

/// Talks to the remote authentication service over HTTP.
pub struct AuthGateway {
    client: Client,
    service_url: String,
}

impl AuthGateway {
    pub fn new(service_url: &str) -> Self {
        Self {
            client: Client::new(),
            service_url: service_url.trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl AuthServiceInterface for AuthGateway {
    async fn check(&self, service: &str, token: &str) -> AppResult<UserAuthData> {
        let response = self
            .client
            .get(format!("{}/user", self.service_url))
            .query(&[("service", service), ("token", token)])
            .send()
            .await
            .map_err(|e| AppError::AuthGateway {
                reason: e.to_string(),
            })?;

        if response.status() != StatusCode::OK {
            tracing::debug!("->> auth check rejected with {}", response.status());
            return Err(AppError::AuthenticationFail);
        }

        response
            .json::<UserAuthData>()
            .await
            .map_err(|e| AppError::AuthGateway {
                reason: e.to_string(),
            })
    }
}
