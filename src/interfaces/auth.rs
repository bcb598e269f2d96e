use crate::entities::user_auth::UserAuthData;
use crate::middleware::error::AppResult;
use async_trait::async_trait;

#[async_trait]
pub trait AuthServiceInterface {
    /// Resolves the identity behind a session token on behalf of `service`.
    async fn check(&self, service: &str, token: &str) -> AppResult<UserAuthData>;
}
